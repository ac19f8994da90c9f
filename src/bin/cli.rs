use corvus::board::Board;
use corvus::moves::magic::loader::load_magic_tables;
use corvus::moves::perft::perft_divide;
use corvus::search::search::search;
use std::env;
use std::io::{self, Read};
use std::process::ExitCode;
use std::str::FromStr;
use std::time::Duration;

#[cfg(feature = "cli")]
use corvus::logger::init_logging;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn usage() -> &'static str {
    "usage: corvus [--fen FEN] [--depth N] [--movetime MS] [--perft N]\n\
     reads FEN from --fen, or from stdin, or defaults to the starting position;\n\
     prints the chosen move and the resulting FEN."
}

fn main() -> ExitCode {
    #[cfg(feature = "cli")]
    init_logging("logs/corvus.log", "info");

    let mut fen_arg: Option<String> = None;
    let mut depth: i32 = 64;
    let mut movetime_ms: Option<u64> = None;
    let mut perft_depth: Option<u32> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--fen" => fen_arg = args.next(),
            "--depth" => {
                depth = match args.next().and_then(|s| s.parse().ok()) {
                    Some(d) => d,
                    None => {
                        eprintln!("--depth requires an integer argument\n{}", usage());
                        return ExitCode::FAILURE;
                    }
                }
            }
            "--movetime" => movetime_ms = args.next().and_then(|s| s.parse().ok()),
            "--perft" => perft_depth = args.next().and_then(|s| s.parse().ok()),
            "-h" | "--help" => {
                println!("{}", usage());
                return ExitCode::SUCCESS;
            }
            other => {
                eprintln!("unrecognized argument '{other}'\n{}", usage());
                return ExitCode::FAILURE;
            }
        }
    }

    let fen = fen_arg.unwrap_or_else(|| {
        let mut input = String::new();
        match io::stdin().read_to_string(&mut input) {
            Ok(_) if !input.trim().is_empty() => input.trim().to_string(),
            _ => STARTPOS.to_string(),
        }
    });

    let mut board = match Board::from_str(&fen) {
        Ok(b) => b,
        Err(e) => {
            eprintln!("invalid FEN: {e}");
            return ExitCode::FAILURE;
        }
    };

    let tables = load_magic_tables();

    if let Some(pd) = perft_depth {
        let nodes = perft_divide(&mut board, &tables, pd);
        println!("nodes {nodes}");
        return ExitCode::SUCCESS;
    }

    let time_limit = movetime_ms.map(Duration::from_millis);

    #[cfg(feature = "cli")]
    let spinner = {
        let pb = indicatif::ProgressBar::new_spinner();
        pb.set_message("searching");
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    };

    let (score, best_move) = search(&mut board, &tables, depth, time_limit);

    #[cfg(feature = "cli")]
    spinner.finish_and_clear();

    match best_move {
        Some(m) => {
            println!("bestmove {}", m.to_uci());
            corvus::moves::execute::make_move_basic(&mut board, m);
            println!("fen {}", board.to_fen());
            println!("info string score {score}");
        }
        None => {
            println!("bestmove 0000");
            println!("fen {}", board.to_fen());
        }
    }

    ExitCode::SUCCESS
}
