use crate::error::{Error, Result};
use crate::tabulation::{self, DEFAULT_CHUNK_BIT_COUNT, DEFAULT_CHUNK_COUNT};

/// Parameters for building a [`BloomFilter`](crate::bloom::BloomFilter).
///
/// # Examples
///
/// ```
/// use tabulated_collections::bloom::{BloomFilter, BloomFilterConfig};
///
/// let config = BloomFilterConfig::new(1000, 0.001).with_seed(7).with_chunk_count(8);
/// let filter = BloomFilter::from_config(config).unwrap();
///
/// assert_eq!(filter.seed(), 7);
/// assert_eq!(filter.hasher_count(), 10);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterConfig {
    /// Expected number of distinct insertions.
    pub max_size: usize,

    /// Target false positive probability, strictly between 0 and 1.
    pub tolerance: f64,

    /// Seed of the first hash function; hash function `i` is seeded with `seed + i`. Drawn from the
    /// thread-local RNG when absent.
    pub seed: Option<u64>,

    /// Number of chunks each hash function splits a key into.
    pub chunk_count: usize,

    /// Number of bits per chunk.
    pub chunk_bit_count: usize,
}

impl BloomFilterConfig {
    /// Creates a configuration for `max_size` items at a false positive probability of
    /// `tolerance`, with 4 chunks of 8 bits and no fixed seed.
    pub fn new(max_size: usize, tolerance: f64) -> Self {
        BloomFilterConfig {
            max_size,
            tolerance,
            seed: None,
            chunk_count: DEFAULT_CHUNK_COUNT,
            chunk_bit_count: DEFAULT_CHUNK_BIT_COUNT,
        }
    }

    /// Fixes the seed so the filter is reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the number of chunks per key.
    pub fn with_chunk_count(mut self, chunk_count: usize) -> Self {
        self.chunk_count = chunk_count;
        self
    }

    /// Sets the number of bits per chunk.
    pub fn with_chunk_bit_count(mut self, chunk_bit_count: usize) -> Self {
        self.chunk_bit_count = chunk_bit_count;
        self
    }

    /// Checks every constraint that does not depend on the derived bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `max_size` is zero, if `tolerance` is not a
    /// finite number strictly between 0 and 1, or if the chunk parameters are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::InvalidConfiguration(
                "max size must be positive".to_string(),
            ));
        }
        if !(self.tolerance > 0.0 && self.tolerance < 1.0) {
            return Err(Error::InvalidConfiguration(format!(
                "tolerance must satisfy 0 < tolerance < 1, got {}",
                self.tolerance,
            )));
        }
        tabulation::validate_parameters(self.chunk_count, self.chunk_bit_count, self.chunk_count)
    }
}
