//! FEN parsing and serialization.

use super::castle_bits::{CASTLE_BK, CASTLE_BQ, CASTLE_WK, CASTLE_WQ};
use super::fen_tables::{CHAR_TO_PC, PC_TO_CHAR};
use super::{Board, Color, Piece};
use crate::square::Square;
use thiserror::Error;

/// A malformed FEN string, recoverable at the caller boundary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have 6 whitespace-separated fields, found {0}")]
    WrongFieldCount(usize),
    #[error("board field must have 8 ranks separated by '/', found {0}")]
    WrongRankCount(usize),
    #[error("rank {0} does not sum to 8 files: \"{1}\"")]
    RankNotEightFiles(usize, String),
    #[error("unrecognized piece glyph '{0}'")]
    UnknownPieceChar(char),
    #[error("side-to-move field must be 'w' or 'b', found \"{0}\"")]
    InvalidSideToMove(String),
    #[error("castling field contains an invalid character '{0}'")]
    InvalidCastlingChar(char),
    #[error("en passant field is not a valid square: \"{0}\"")]
    InvalidEnPassantSquare(String),
    #[error("halfmove clock is not a valid non-negative integer: \"{0}\"")]
    InvalidHalfmoveClock(String),
    #[error("fullmove number is not a valid positive integer: \"{0}\"")]
    InvalidFullmoveNumber(String),
}

impl Board {
    /// Overwrites `self` in place from a FEN string.
    pub fn set_fen(&mut self, fen: &str) -> Result<(), FenError> {
        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() != 6 {
            return Err(FenError::WrongFieldCount(fields.len()));
        }

        let mut board = Board::new_empty();

        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount(ranks.len()));
        }

        // FEN ranks run 8 down to 1; our rank index 0 is rank 1.
        for (rank_from_top, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_from_top;
            let mut file = 0usize;
            for ch in rank_str.chars() {
                if let Some(skip) = ch.to_digit(10) {
                    file += skip as usize;
                } else {
                    let (piece, color) = CHAR_TO_PC[ch as usize % 128]
                        .filter(|_| ch.is_ascii())
                        .ok_or(FenError::UnknownPieceChar(ch))?;
                    if file >= 8 {
                        return Err(FenError::RankNotEightFiles(
                            rank_from_top,
                            rank_str.to_string(),
                        ));
                    }
                    let sq = Square::from_file_rank(file as u8, rank as u8);
                    let bb = board.bb(color, piece) | (1u64 << sq.index());
                    board.set_bb(color, piece, bb);
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::RankNotEightFiles(
                    rank_from_top,
                    rank_str.to_string(),
                ));
            }
        }

        board.side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(FenError::InvalidSideToMove(other.to_string())),
        };

        let mut rights = 0u8;
        if fields[2] != "-" {
            for ch in fields[2].chars() {
                rights |= match ch {
                    'K' => CASTLE_WK,
                    'Q' => CASTLE_WQ,
                    'k' => CASTLE_BK,
                    'q' => CASTLE_BQ,
                    other => return Err(FenError::InvalidCastlingChar(other)),
                };
            }
        }
        board.castling_rights = rights;

        board.en_passant = if fields[3] == "-" {
            None
        } else {
            fields[3]
                .parse::<Square>()
                .map(Some)
                .map_err(|_| FenError::InvalidEnPassantSquare(fields[3].to_string()))?
        };

        board.halfmove_clock = fields[4]
            .parse()
            .map_err(|_| FenError::InvalidHalfmoveClock(fields[4].to_string()))?;

        board.fullmove_number = fields[5]
            .parse()
            .map_err(|_| FenError::InvalidFullmoveNumber(fields[5].to_string()))?;

        board.refresh_zobrist();
        board.history.clear();

        *self = board;
        Ok(())
    }

    /// Serializes the current position to a FEN string.
    pub fn to_fen(&self) -> String {
        let mut board_field = String::new();
        for rank_from_top in 0..8 {
            let rank = 7 - rank_from_top;
            let mut empty_run = 0u32;
            for file in 0..8 {
                let sq = Square::from_file_rank(file, rank);
                match self.piece_at(sq) {
                    None => empty_run += 1,
                    Some((color, piece)) => {
                        if empty_run > 0 {
                            board_field.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        let idx = (color as usize) * 6 + (piece as usize);
                        board_field.push(PC_TO_CHAR[idx]);
                    }
                }
            }
            if empty_run > 0 {
                board_field.push_str(&empty_run.to_string());
            }
            if rank_from_top != 7 {
                board_field.push('/');
            }
        }

        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let mut castling = String::new();
        if self.castling_rights & CASTLE_WK != 0 {
            castling.push('K');
        }
        if self.castling_rights & CASTLE_WQ != 0 {
            castling.push('Q');
        }
        if self.castling_rights & CASTLE_BK != 0 {
            castling.push('k');
        }
        if self.castling_rights & CASTLE_BQ != 0 {
            castling.push('q');
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let ep = match self.en_passant {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!(
            "{} {} {} {} {} {}",
            board_field, side, castling, ep, self.halfmove_clock, self.fullmove_number
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn startpos_roundtrips() {
        let board: Board = STARTPOS.parse().unwrap();
        assert_eq!(board.to_fen(), STARTPOS);
    }

    #[test]
    fn en_passant_square_is_parsed() {
        let board: Board =
            "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"
                .parse()
                .unwrap();
        assert_eq!(board.en_passant.map(|s| s.to_string()), Some("d6".into()));
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = Board::new_empty().set_fen("8/8/8/8/8/8/8/8 w - -").unwrap_err();
        assert_eq!(err, FenError::WrongFieldCount(5));
    }

    #[test]
    fn unknown_piece_char_is_rejected() {
        let err = Board::new_empty()
            .set_fen("xnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap_err();
        assert_eq!(err, FenError::UnknownPieceChar('x'));
    }

    #[test]
    fn bad_side_to_move_is_rejected() {
        let err = Board::new_empty()
            .set_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR z KQkq - 0 1")
            .unwrap_err();
        assert_eq!(err, FenError::InvalidSideToMove("z".to_string()));
    }
}
