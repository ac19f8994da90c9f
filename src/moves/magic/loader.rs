//! Resolves the rook/bishop magic tables used across move generation,
//! search and evaluation.

use super::precompute::{MagicTableSeed, generate_magic_tables};
use super::structs::MagicTables;
use std::path::Path;

#[cfg(feature = "deterministic_magic")]
const MAGIC_SEED: u64 = 0xC0FF_EE15_BEEF_0000;

fn seed() -> MagicTableSeed {
    #[cfg(feature = "deterministic_magic")]
    {
        MagicTableSeed::Fixed(MAGIC_SEED)
    }
    #[cfg(not(feature = "deterministic_magic"))]
    {
        MagicTableSeed::Random
    }
}

#[cfg(feature = "load_magic")]
const MAGIC_CACHE_PATH: &str = "magic_tables.bin";

#[cfg(feature = "load_magic")]
fn load_from_disk(path: &Path) -> Option<MagicTables> {
    let bytes = std::fs::read(path).ok()?;
    bincode::deserialize(&bytes).ok()
}

#[cfg(feature = "load_magic")]
fn save_to_disk(path: &Path, tables: &MagicTables) {
    if let Ok(bytes) = bincode::serialize(tables) {
        let _ = std::fs::write(path, bytes);
    }
}

/// Builds (or, with `load_magic`, loads a cached copy of) the rook/bishop
/// magic tables.
pub fn load_magic_tables() -> MagicTables {
    #[cfg(feature = "load_magic")]
    {
        let path = Path::new(MAGIC_CACHE_PATH);
        if let Some(tables) = load_from_disk(path) {
            return tables;
        }
        let tables = generate_magic_tables(seed()).expect("magic table generation failed");
        save_to_disk(path, &tables);
        tables
    }
    #[cfg(not(feature = "load_magic"))]
    {
        generate_magic_tables(seed()).expect("magic table generation failed")
    }
}
