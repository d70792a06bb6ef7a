use crate::error::Result;
use crate::tabulation::{
    entropy_seed, table_rng, validate_parameters, Chunks, TabulationHash, TabulationKey, Tables,
    DEFAULT_CHUNK_BIT_COUNT, DEFAULT_CHUNK_COUNT,
};

/// Twisted tabulation hashing.
///
/// Computes the simple tabulation hash of the key, then XORs in one entry of an extra "twister"
/// table. The twister entry is indexed by the XOR of the raw chunk values, so keys whose chunk
/// lookups cancel out under simple tabulation still land on different twister entries.
///
/// # Examples
///
/// ```
/// use tabulated_collections::tabulation::{TabulationHash, TwistedTabulationHash};
///
/// let hasher = TwistedTabulationHash::with_seed(42);
/// assert_eq!(hasher.hash("hello"), TwistedTabulationHash::with_seed(42).hash("hello"));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TwistedTabulationHash {
    chunk_count: usize,
    chunk_bit_count: usize,
    seed: u64,
    tables: Tables,
    twister: Tables,
}

impl TwistedTabulationHash {
    /// Constructs a `TwistedTabulationHash` with 4 chunks of 8 bits, seeded from the thread-local
    /// RNG.
    pub fn new() -> Self {
        Self::with_seed(entropy_seed())
    }

    /// Constructs a `TwistedTabulationHash` with 4 chunks of 8 bits whose tables are generated
    /// from `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_BIT_COUNT, seed)
    }

    /// Constructs a `TwistedTabulationHash` that splits keys into `chunk_count` chunks of
    /// `chunk_bit_count` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) on the same
    /// conditions as [`SimpleTabulationHash::from_parameters`], counting the twister table.
    ///
    /// [`SimpleTabulationHash::from_parameters`]: crate::tabulation::SimpleTabulationHash::from_parameters
    pub fn from_parameters(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Result<Self> {
        validate_parameters(chunk_count, chunk_bit_count, chunk_count.saturating_add(1))?;
        Ok(Self::build(chunk_count, chunk_bit_count, seed))
    }

    fn build(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Self {
        let mut rng = table_rng(seed);
        // the twister table is drawn after the chunk tables
        let tables = Tables::generate(&mut rng, chunk_count, chunk_bit_count, 32);
        let twister = Tables::generate(&mut rng, 1, chunk_bit_count, 32);
        tracing::debug!(chunk_count, chunk_bit_count, seed, "built twisted tabulation hash");
        TwistedTabulationHash {
            chunk_count,
            chunk_bit_count,
            seed,
            tables,
            twister,
        }
    }
}

impl Default for TwistedTabulationHash {
    fn default() -> Self {
        Self::new()
    }
}

impl TabulationHash for TwistedTabulationHash {
    fn hash<K>(&self, key: &K) -> u32
    where
        K: TabulationKey + ?Sized,
    {
        let bytes = key.key_bytes();
        let (hash, twist_index) = Chunks::new(&bytes, self.chunk_count, self.chunk_bit_count)
            .enumerate()
            .fold((0, 0), |(hash, twist_index), (table, chunk)| {
                (hash ^ self.tables.get(table, chunk), twist_index ^ chunk)
            });
        hash ^ self.twister.get(0, twist_index)
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
