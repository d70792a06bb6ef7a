use crate::error::Result;
use crate::tabulation::{
    entropy_seed, table_rng, validate_parameters, Chunks, TabulationHash, TabulationKey, Tables,
    DEFAULT_CHUNK_BIT_COUNT, DEFAULT_CHUNK_COUNT,
};

/// Simple tabulation hashing.
///
/// The key is split into `c` chunks of `r` bits, chunk `i` is looked up in table `i`, and the `c`
/// looked-up values are combined with XOR.
///
/// # Examples
///
/// ```
/// use tabulated_collections::tabulation::{SimpleTabulationHash, TabulationHash};
///
/// let hasher = SimpleTabulationHash::with_seed(42);
/// let other = SimpleTabulationHash::with_seed(42);
///
/// assert_eq!(hasher.hash(&123_456_789u32), other.hash(&123_456_789u32));
/// assert_eq!(hasher.hash("hello"), hasher.hash(&b"hello"[..]));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleTabulationHash {
    chunk_count: usize,
    chunk_bit_count: usize,
    seed: u64,
    tables: Tables,
}

impl SimpleTabulationHash {
    /// Constructs a `SimpleTabulationHash` with 4 chunks of 8 bits, seeded from the thread-local
    /// RNG.
    pub fn new() -> Self {
        Self::with_seed(entropy_seed())
    }

    /// Constructs a `SimpleTabulationHash` with 4 chunks of 8 bits whose tables are generated from
    /// `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(DEFAULT_CHUNK_COUNT, DEFAULT_CHUNK_BIT_COUNT, seed)
    }

    /// Constructs a `SimpleTabulationHash` that splits keys into `chunk_count` chunks of
    /// `chunk_bit_count` bits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if either
    /// parameter is zero, if `chunk_bit_count` is above
    /// [`MAX_CHUNK_BIT_COUNT`](crate::tabulation::MAX_CHUNK_BIT_COUNT), or if the tables would be
    /// too large.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::tabulation::{SimpleTabulationHash, TabulationHash};
    ///
    /// let hasher = SimpleTabulationHash::from_parameters(8, 4, 0).unwrap();
    /// assert_eq!(hasher.chunk_count(), 8);
    ///
    /// assert!(SimpleTabulationHash::from_parameters(0, 8, 0).is_err());
    /// ```
    pub fn from_parameters(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Result<Self> {
        validate_parameters(chunk_count, chunk_bit_count, chunk_count)?;
        Ok(Self::build(chunk_count, chunk_bit_count, seed))
    }

    fn build(chunk_count: usize, chunk_bit_count: usize, seed: u64) -> Self {
        let mut rng = table_rng(seed);
        let tables = Tables::generate(&mut rng, chunk_count, chunk_bit_count, 32);
        tracing::debug!(chunk_count, chunk_bit_count, seed, "built simple tabulation hash");
        SimpleTabulationHash {
            chunk_count,
            chunk_bit_count,
            seed,
            tables,
        }
    }
}

impl Default for SimpleTabulationHash {
    fn default() -> Self {
        Self::new()
    }
}

impl TabulationHash for SimpleTabulationHash {
    fn hash<K>(&self, key: &K) -> u32
    where
        K: TabulationKey + ?Sized,
    {
        let bytes = key.key_bytes();
        Chunks::new(&bytes, self.chunk_count, self.chunk_bit_count)
            .enumerate()
            .fold(0, |hash, (table, chunk)| hash ^ self.tables.get(table, chunk))
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

#[cfg(test)]
mod tests {
    use super::SimpleTabulationHash;
    use crate::tabulation::TabulationHash;

    #[test]
    fn test_deterministic() {
        let hasher_1 = SimpleTabulationHash::with_seed(42);
        let hasher_2 = SimpleTabulationHash::with_seed(42);

        for key in 0..1000u32 {
            assert_eq!(hasher_1.hash(&key), hasher_1.hash(&key));
            assert_eq!(hasher_1.hash(&key), hasher_2.hash(&key));
        }
        assert_eq!(hasher_1, hasher_2);
    }

    #[test]
    fn test_seeds_differ() {
        let hasher_1 = SimpleTabulationHash::with_seed(1);
        let hasher_2 = SimpleTabulationHash::with_seed(2);

        let differing = (0..100u32)
            .filter(|key| hasher_1.hash(key) != hasher_2.hash(key))
            .count();
        assert!(differing > 90);
    }

    #[test]
    fn test_is_xor_of_lookups() {
        let hasher = SimpleTabulationHash::with_seed(3);

        // Keys whose chunks only differ in table 0 share the contribution of the other tables.
        let lhs = hasher.hash(&0x0102_0300u32) ^ hasher.hash(&0x0102_0301u32);
        let rhs = hasher.hash(&0x0A0B_0C00u32) ^ hasher.hash(&0x0A0B_0C01u32);
        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_key_representations_agree() {
        let hasher = SimpleTabulationHash::with_seed(11);

        assert_eq!(hasher.hash(&0x6869u16), hasher.hash("hi"));
        assert_eq!(hasher.hash("hi"), hasher.hash(&String::from("hi")));
        assert_eq!(hasher.hash(&vec![0u8, 0x68, 0x69]), hasher.hash(&[0x68u8, 0x69]));
        assert_eq!(hasher.hash(&5u8), hasher.hash(&5u128));
    }

    #[test]
    fn test_from_parameters() {
        let hasher = SimpleTabulationHash::from_parameters(2, 16, 9).unwrap();
        assert_eq!(hasher.chunk_count(), 2);
        assert_eq!(hasher.chunk_bit_count(), 16);
        assert_eq!(hasher.seed(), 9);

        let defaults = SimpleTabulationHash::from_parameters(4, 8, 9).unwrap();
        assert_eq!(defaults, SimpleTabulationHash::with_seed(9));

        assert!(SimpleTabulationHash::from_parameters(4, 0, 9).is_err());
        assert!(SimpleTabulationHash::from_parameters(4, 25, 9).is_err());
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let hasher = SimpleTabulationHash::new();
        let replay = SimpleTabulationHash::with_seed(hasher.seed());
        assert_eq!(hasher.hash("replay"), replay.hash("replay"));
    }
}
