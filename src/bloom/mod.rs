//! Space-efficient probabilistic data structure for approximate membership queries in a set.

mod bloom_filter;
mod config;

pub use self::bloom_filter::{BloomFilter, MAX_BIT_COUNT, MAX_HASHER_TABLE_ENTRIES};
pub use self::config::BloomFilterConfig;
