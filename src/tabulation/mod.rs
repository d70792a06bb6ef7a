//! Seedable hash functions built from random lookup tables.
//!
//! A key is read as a big-endian unsigned integer and split into `c` chunks of `r` bits. Each
//! chunk indexes its own table of random values and the looked-up values are combined with XOR.
//! Three variants are provided:
//!
//!  - [`SimpleTabulationHash`]: plain tabulation hashing.
//!  - [`TwistedTabulationHash`]: tabulation hashing with an extra "twister" lookup indexed by the
//!    XOR of the raw chunks.
//!  - [`DoubleTabulationHash`]: chunks are first mapped to intermediate `r`-bit values, which are
//!    then tabulated again.
//!
//! Tables are filled once, at construction, from a generator owned by the instance. Two instances
//! built with the same seed and parameters always produce the same outputs.

mod double;
mod key;
mod simple;
mod twisted;

pub use self::double::{DoubleTabulationHash, DoubleTabulationTrace};
pub use self::key::TabulationKey;
pub use self::simple::SimpleTabulationHash;
pub use self::twisted::TwistedTabulationHash;

pub(crate) use self::key::Chunks;

use crate::error::{Error, Result};
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Default number of chunks a key is split into.
pub const DEFAULT_CHUNK_COUNT: usize = 4;
/// Default number of bits per chunk.
pub const DEFAULT_CHUNK_BIT_COUNT: usize = 8;
/// Largest supported number of bits per chunk.
pub const MAX_CHUNK_BIT_COUNT: usize = 24;
/// Largest number of table entries a single hash function may allocate.
pub const MAX_TABLE_ENTRIES: usize = 1 << 26;

/// A deterministic 32-bit hash function over [`TabulationKey`]s.
pub trait TabulationHash {
    /// Hashes `key` to a 32-bit value.
    fn hash<K>(&self, key: &K) -> u32
    where
        K: TabulationKey + ?Sized;

    /// Returns the number of chunks keys are split into.
    fn chunk_count(&self) -> usize;

    /// Returns the number of bits in each chunk.
    fn chunk_bit_count(&self) -> usize;

    /// Returns the seed the lookup tables were generated from.
    fn seed(&self) -> u64;
}

/// Checks chunk parameters for a hash function that allocates `table_count` tables.
pub(crate) fn validate_parameters(
    chunk_count: usize,
    chunk_bit_count: usize,
    table_count: usize,
) -> Result<()> {
    if chunk_count == 0 {
        return Err(Error::InvalidConfiguration(
            "chunk count must be positive".to_string(),
        ));
    }
    if chunk_bit_count == 0 || chunk_bit_count > MAX_CHUNK_BIT_COUNT {
        return Err(Error::InvalidConfiguration(format!(
            "chunk bit count must be between 1 and {}, got {}",
            MAX_CHUNK_BIT_COUNT, chunk_bit_count,
        )));
    }
    let entries = table_count
        .checked_mul(1 << chunk_bit_count)
        .filter(|entries| *entries <= MAX_TABLE_ENTRIES);
    if entries.is_none() {
        return Err(Error::InvalidConfiguration(format!(
            "{} tables of 2^{} entries exceed the limit of {} entries",
            table_count, chunk_bit_count, MAX_TABLE_ENTRIES,
        )));
    }
    Ok(())
}

/// Draws a fresh seed from the thread-local generator.
pub(crate) fn entropy_seed() -> u64 {
    rand::thread_rng().gen()
}

/// Flat storage for `table_count` lookup tables of `2^r` entries each.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Tables {
    entries: Vec<u32>,
    table_len: usize,
}

impl Tables {
    /// Fills `table_count` tables with values of `value_bit_count` bits drawn from `rng`, table by
    /// table.
    pub(crate) fn generate(
        rng: &mut XorShiftRng,
        table_count: usize,
        chunk_bit_count: usize,
        value_bit_count: u32,
    ) -> Self {
        let table_len = 1 << chunk_bit_count;
        let mask = if value_bit_count >= 32 {
            u32::max_value()
        } else {
            (1 << value_bit_count) - 1
        };
        let entries = (0..table_count * table_len)
            .map(|_| rng.gen::<u32>() & mask)
            .collect();
        Tables { entries, table_len }
    }

    #[inline]
    pub(crate) fn get(&self, table: usize, index: usize) -> u32 {
        self.entries[table * self.table_len + index]
    }
}

/// Returns the generator used to fill the tables of an instance seeded with `seed`.
pub(crate) fn table_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

#[cfg(test)]
mod tests {
    use super::{table_rng, validate_parameters, Tables, MAX_CHUNK_BIT_COUNT};
    use crate::error::Error;

    #[test]
    fn test_validate_parameters() {
        assert!(validate_parameters(4, 8, 4).is_ok());
        assert!(validate_parameters(1, MAX_CHUNK_BIT_COUNT, 1).is_ok());

        assert!(matches!(
            validate_parameters(0, 8, 0),
            Err(Error::InvalidConfiguration(_)),
        ));
        assert!(matches!(
            validate_parameters(4, 0, 4),
            Err(Error::InvalidConfiguration(_)),
        ));
        assert!(matches!(
            validate_parameters(4, MAX_CHUNK_BIT_COUNT + 1, 4),
            Err(Error::InvalidConfiguration(_)),
        ));
        assert!(matches!(
            validate_parameters(8, MAX_CHUNK_BIT_COUNT, 8),
            Err(Error::InvalidConfiguration(_)),
        ));
    }

    #[test]
    fn test_generate_is_reproducible() {
        let tables_1 = Tables::generate(&mut table_rng(42), 2, 4, 32);
        let tables_2 = Tables::generate(&mut table_rng(42), 2, 4, 32);
        let tables_3 = Tables::generate(&mut table_rng(43), 2, 4, 32);

        assert_eq!(tables_1, tables_2);
        assert_ne!(tables_1, tables_3);
        assert_eq!(tables_1.entries.len(), 32);
    }

    #[test]
    fn test_generate_masks_values() {
        let tables = Tables::generate(&mut table_rng(7), 3, 5, 5);
        assert!(tables.entries.iter().all(|value| *value < 32));
    }
}
