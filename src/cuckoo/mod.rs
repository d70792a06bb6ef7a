//! Hash table placing each key in one of two candidate slots, resolving collisions by bounded
//! displacement.

mod config;
mod cuckoo_hash_table;

const DEFAULT_SIZE: usize = 11;
const DEFAULT_MAX_DISPLACEMENTS: usize = 10;
const DEFAULT_SEEDS: [u64; 2] = [1, 2];

pub use self::config::CuckooHashTableConfig;
pub use self::cuckoo_hash_table::{CuckooHashTable, Iter};
