use crate::cuckoo::{DEFAULT_MAX_DISPLACEMENTS, DEFAULT_SEEDS, DEFAULT_SIZE};
use crate::error::{Error, Result};
use crate::tabulation::{self, DEFAULT_CHUNK_BIT_COUNT, DEFAULT_CHUNK_COUNT};

/// Parameters for building a [`CuckooHashTable`](crate::cuckoo::CuckooHashTable).
///
/// # Examples
///
/// ```
/// use tabulated_collections::cuckoo::{CuckooHashTable, CuckooHashTableConfig};
///
/// let config = CuckooHashTableConfig::new()
///     .with_size(101)
///     .with_max_displacements(32)
///     .with_seeds([7, 8]);
/// let table = CuckooHashTable::<u64>::from_config(config).unwrap();
///
/// assert_eq!(table.slot_count(), 101);
/// assert_eq!(table.capacity(), 202);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct CuckooHashTableConfig {
    /// Number of slots in each of the two tables.
    pub size: usize,

    /// Maximum number of probes an insertion may make before giving up.
    pub max_displacements: usize,

    /// Seeds of the two twisted tabulation hash functions. They must differ.
    pub seeds: [u64; 2],

    /// Number of chunks each hash function splits a key into.
    pub chunk_count: usize,

    /// Number of bits per chunk.
    pub chunk_bit_count: usize,
}

impl CuckooHashTableConfig {
    /// Creates a configuration with 11 slots per table, at most 10 displacements, seeds 1 and 2,
    /// and 4 chunks of 8 bits.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of slots per table.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = size;
        self
    }

    /// Sets the displacement bound.
    pub fn with_max_displacements(mut self, max_displacements: usize) -> Self {
        self.max_displacements = max_displacements;
        self
    }

    /// Sets the seeds of the two hash functions.
    pub fn with_seeds(mut self, seeds: [u64; 2]) -> Self {
        self.seeds = seeds;
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

    /// Checks the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `size` or `max_displacements` is zero, if both
    /// seeds are equal, or if the chunk parameters are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::InvalidConfiguration(
                "size must be a positive integer".to_string(),
            ));
        }
        if self.max_displacements == 0 {
            return Err(Error::InvalidConfiguration(
                "max displacements must be a positive integer".to_string(),
            ));
        }
        if self.seeds[0] == self.seeds[1] {
            return Err(Error::InvalidConfiguration(format!(
                "hash function seeds must differ, both are {}",
                self.seeds[0],
            )));
        }
        tabulation::validate_parameters(
            self.chunk_count,
            self.chunk_bit_count,
            self.chunk_count.saturating_add(1),
        )
    }
}

impl Default for CuckooHashTableConfig {
    fn default() -> Self {
        CuckooHashTableConfig {
            size: DEFAULT_SIZE,
            max_displacements: DEFAULT_MAX_DISPLACEMENTS,
            seeds: DEFAULT_SEEDS,
            chunk_count: DEFAULT_CHUNK_COUNT,
            chunk_bit_count: DEFAULT_CHUNK_BIT_COUNT,
        }
    }
}
