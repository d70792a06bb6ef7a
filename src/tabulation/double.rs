use crate::error::Result;
use crate::tabulation::{
    entropy_seed, table_rng, validate_parameters, Chunks, TabulationHash, TabulationKey, Tables,
    DEFAULT_CHUNK_BIT_COUNT, DEFAULT_CHUNK_COUNT,
};

/// Double tabulation hashing.
///
/// Each chunk is first mapped through a first-layer table to an intermediate `r`-bit value. Each
/// intermediate value is then mapped through a second-layer table to a 32-bit value, and the `c`
/// second-layer outputs are combined with XOR.
///
/// # Examples
///
/// ```
/// use tabulated_collections::tabulation::{DoubleTabulationHash, TabulationHash};
///
/// let hasher = DoubleTabulationHash::with_seed(42);
/// let trace = hasher.trace(&123_456_789u32);
///
/// assert_eq!(trace.hash, hasher.hash(&123_456_789u32));
/// assert_eq!(trace.chunks, vec![0x15, 0xCD, 0x5B, 0x07]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DoubleTabulationHash {
    chunk_count: usize,
    chunk_bit_count: usize,
    seed: u64,
    first_layer: Tables,
    second_layer: Tables,
}

/// Every intermediate stage of a [`DoubleTabulationHash`] evaluation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoubleTabulationTrace {
    /// The raw `r`-bit chunks of the key, least significant first.
    pub chunks: Vec<usize>,
    /// The first-layer output for each chunk.
    pub intermediate: Vec<usize>,
    /// The final hash value.
    pub hash: u32,
}

impl DoubleTabulationHash {
    /// Constructs a `DoubleTabulationHash` with 4 chunks of 8 bits, seeded from the thread-local
    /// RNG.
    pub fn new() -> Self {
        Self::with_seed(entropy_seed())
    }

    /// Constructs a `DoubleTabulationHash` with 4 chunks of 8 bits whose tables are generated from
    /// `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_BIT_COUNT, seed)
    }

    /// Constructs a `DoubleTabulationHash` that splits keys into `chunk_count` chunks of
    /// `chunk_bit_count` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) on the same
    /// conditions as [`SimpleTabulationHash::from_parameters`], counting both layers.
    ///
    /// [`SimpleTabulationHash::from_parameters`]: crate::tabulation::SimpleTabulationHash::from_parameters
    pub fn from_parameters(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Result<Self> {
        validate_parameters(
            chunk_count,
            chunk_bit_count,
            chunk_count.saturating_mul(2),
        )?;
        Ok(Self::build(chunk_count, chunk_bit_count, seed))
    }

    fn build(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Self {
        let mut rng = table_rng(seed);
        let first_layer =
            Tables::generate(&mut rng, chunk_count, chunk_bit_count, chunk_bit_count as u32);
        let second_layer = Tables::generate(&mut rng, chunk_count, chunk_bit_count, 32);
        tracing::debug!(chunk_count, chunk_bit_count, seed, "built double tabulation hash");
        DoubleTabulationHash {
            chunk_count,
            chunk_bit_count,
            seed,
            first_layer,
            second_layer,
        }
    }

    #[inline]
    fn intermediate(&self, table: usize, chunk: usize) -> usize {
        self.first_layer.get(table, chunk) as usize
    }

    /// Hashes `key` and returns the chunks, intermediate values and final hash.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::tabulation::DoubleTabulationHash;
    ///
    /// let hasher = DoubleTabulationHash::with_seed(0);
    /// let trace = hasher.trace("hi");
    ///
    /// assert_eq!(trace.chunks, vec![b'i' as usize, b'h' as usize, 0, 0]);
    /// assert!(trace.intermediate.iter().all(|value| *value < 256));
    /// ```
    pub fn trace<K>(&self, key: &K) -> DoubleTabulationTrace
    where
        K: TabulationKey + ?Sized,
    {
        let bytes = key.key_bytes();
        let chunks: Vec<usize> =
            Chunks::new(&bytes, self.chunk_count, self.chunk_bit_count).collect();
        let intermediate: Vec<usize> = chunks
            .iter()
            .enumerate()
            .map(|(table, chunk)| self.intermediate(table, *chunk))
            .collect();
        let hash = intermediate
            .iter()
            .enumerate()
            .fold(0, |hash, (table, value)| {
                hash ^ self.second_layer.get(table, *value)
            });
        DoubleTabulationTrace {
            chunks,
            intermediate,
            hash,
        }
    }
}

impl Default for DoubleTabulationHash {
    fn default() -> Self {
        Self::new()
    }
}

impl TabulationHash for DoubleTabulationHash {
    fn hash<K>(&self, key: &K) -> u32
    where
        K: TabulationKey + ?Sized,
    {
        let bytes = key.key_bytes();
        Chunks::new(&bytes, self.chunk_count, self.chunk_bit_count)
            .enumerate()
            .fold(0, |hash, (table, chunk)| {
                hash ^ self
                    .second_layer
                    .get(table, self.intermediate(table, chunk))
            })
    }

    fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    fn chunk_bit_count(&self) -> usize {
        self.chunk_bit_count
    }

    fn seed(&self) -> u64 {
        self.seed
    }
}
