use crate::bit_vec::BitVec;
use crate::bloom::BloomFilterConfig;
use crate::error::{Error, Result};
use crate::tabulation::{self, SimpleTabulationHash, TabulationHash};
use crate::util;
use serde::Serialize;

/// Largest number of bits a bloom filter may allocate.
pub const MAX_BIT_COUNT: u64 = 1_000_000_000;
/// Largest number of lookup table entries the hash functions of a bloom filter may allocate in
/// total.
pub const MAX_HASHER_TABLE_ENTRIES: usize = 1 << 24;

/// A space-efficient probabilistic data structure to test for membership in a set.
///
/// The filter is a bit array of `m` bits, initially all unset, and `k` independent simple
/// tabulation hash functions. Adding a value sets the `k` bits its hashes select. A value is
/// definitely absent if any of its `k` bits is unset, and possibly present if all of them are set.
/// `m` and `k` are derived from the expected number of items and the target false positive
/// probability.
///
/// Values are canonicalized with [`canonical_bytes`](crate::canonical_bytes) before hashing, so
/// structurally equal values map to the same bits regardless of their concrete type.
///
/// # Examples
///
/// ```
/// use tabulated_collections::bloom::BloomFilter;
///
/// let mut filter = BloomFilter::with_seed(10, 0.01, 0).unwrap();
///
/// assert!(!filter.contains("foo").unwrap());
/// filter.add("foo").unwrap();
/// assert!(filter.contains("foo").unwrap());
/// assert!(filter.contains(&String::from("foo")).unwrap());
///
/// assert_eq!(filter.bit_count(), 96);
/// assert_eq!(filter.hasher_count(), 7);
/// assert_eq!(filter.size(), 1);
/// assert_eq!(filter.max_remaining_capacity(), 9);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilter {
    bit_vec: BitVec,
    hashers: Vec<SimpleTabulationHash>,
    max_size: usize,
    tolerance: f64,
    seed: u64,
    size: usize,
}

impl BloomFilter {
    /// Constructs a new, empty `BloomFilter` sized for `max_size` items at a false positive
    /// probability of `tolerance`, seeded from the thread-local RNG.
    ///
    /// # Errors
    ///
    /// See [`BloomFilter::from_config`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(100, 0.01).unwrap();
    /// assert_eq!(filter.hasher_count(), 7);
    /// assert!(BloomFilter::new(0, 0.01).is_err());
    /// ```
    pub fn new(max_size: usize, tolerance: f64) -> Result<Self> {
        Self::from_config(BloomFilterConfig::new(max_size, tolerance))
    }

    /// Constructs a new, empty `BloomFilter` whose hash functions are seeded with `seed`,
    /// `seed + 1`, ..., `seed + k - 1`.
    ///
    /// # Errors
    ///
    /// See [`BloomFilter::from_config`].
    pub fn with_seed(max_size: usize, tolerance: f64, seed: u64) -> Result<Self> {
        Self::from_config(BloomFilterConfig::new(max_size, tolerance).with_seed(seed))
    }

    /// Constructs a new, empty `BloomFilter` from `config`.
    ///
    /// The bit count is `m = ceil(-n * ln(p) / ln(2)^2)` and the hash function count is
    /// `k = ceil(-ln(p) / ln(2))`, where `n` is the maximum size and `p` the tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `config` does not validate or if the `k` hash
    /// functions together would need more than [`MAX_HASHER_TABLE_ENTRIES`] table entries, and
    /// [`Error::CapacityExceeded`] if `m` is larger than [`MAX_BIT_COUNT`].
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bloom::{BloomFilter, BloomFilterConfig};
    /// use tabulated_collections::Error;
    ///
    /// let config = BloomFilterConfig::new(2_000_000_000, 0.5);
    /// assert!(matches!(
    ///     BloomFilter::from_config(config),
    ///     Err(Error::CapacityExceeded { .. }),
    /// ));
    /// ```
    pub fn from_config(config: BloomFilterConfig) -> Result<Self> {
        config.validate()?;
        let ln_2 = 2f64.ln();
        let ln_tolerance = config.tolerance.ln();

        let bit_count = (-(config.max_size as f64) * ln_tolerance / (ln_2 * ln_2)).ceil();
        if bit_count > MAX_BIT_COUNT as f64 {
            return Err(Error::CapacityExceeded {
                required: bit_count as u64,
                limit: MAX_BIT_COUNT,
            });
        }
        let bit_count = bit_count as usize;
        let hasher_count = (-ln_tolerance / ln_2).ceil() as usize;

        let table_entries = hasher_count
            .checked_mul(config.chunk_count)
            .and_then(|tables| tables.checked_mul(1 << config.chunk_bit_count))
            .filter(|entries| *entries <= MAX_HASHER_TABLE_ENTRIES);
        if table_entries.is_none() {
            return Err(Error::InvalidConfiguration(format!(
                "{} hash functions of {} tables of 2^{} entries exceed the limit of {} entries",
                hasher_count, config.chunk_count, config.chunk_bit_count, MAX_HASHER_TABLE_ENTRIES,
            )));
        }

        let seed = config.seed.unwrap_or_else(tabulation::entropy_seed);
        let hashers = (0..hasher_count as u64)
            .map(|index| {
                SimpleTabulationHash::from_parameters(
                    config.chunk_count,
                    config.chunk_bit_count,
                    seed.wrapping_add(index),
                )
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            max_size = config.max_size,
            tolerance = config.tolerance,
            bit_count,
            hasher_count,
            seed,
            "built bloom filter"
        );
        Ok(BloomFilter {
            bit_vec: BitVec::new(bit_count),
            hashers,
            max_size: config.max_size,
            tolerance: config.tolerance,
            seed,
            size: 0,
        })
    }

    fn positions<'a>(&'a self, bytes: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
        let bit_count = self.bit_vec.len() as u64;
        self.hashers
            .iter()
            .map(move |hasher| (u64::from(hasher.hash(bytes)) % bit_count) as usize)
    }

    /// Adds a value to the bloom filter.
    ///
    /// The approximate size grows by one if at least one of the value's bits was previously
    /// unset. Adding a value again never changes the filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `value` cannot be serialized; the filter is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::with_seed(100, 0.01, 3).unwrap();
    ///
    /// filter.add("foo").unwrap().add(&42u64).unwrap();
    /// assert!(filter.contains(&42u64).unwrap());
    /// ```
    pub fn add<T>(&mut self, value: &T) -> Result<&mut Self>
    where
        T: Serialize + ?Sized,
    {
        let bytes = util::canonical_bytes(value)?;
        let positions: Vec<usize> = self.positions(&bytes).collect();

        let mut flipped = false;
        for position in positions {
            flipped |= self.bit_vec.set(position);
        }

        if flipped {
            self.size += 1;
            if self.size == self.max_size + 1 {
                tracing::warn!(
                    max_size = self.max_size,
                    "bloom filter exceeded its expected size, false positive rate will degrade"
                );
            }
        } else {
            tracing::trace!("bloom filter insertion set no new bits");
        }
        Ok(self)
    }

    /// Checks if a value is possibly in the bloom filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if `value` cannot be serialized.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::with_seed(100, 0.01, 3).unwrap();
    ///
    /// assert!(!filter.contains("foo").unwrap());
    /// filter.add("foo").unwrap();
    /// assert!(filter.contains("foo").unwrap());
    /// ```
    pub fn contains<T>(&self, value: &T) -> Result<bool>
    where
        T: Serialize + ?Sized,
    {
        let bytes = util::canonical_bytes(value)?;
        let present = self.positions(&bytes).all(|position| self.bit_vec[position]);
        Ok(present)
    }

    /// Returns the approximate number of distinct values added.
    ///
    /// Only additions that set at least one new bit are counted, so the value can fall behind the
    /// true cardinality once hashes collide. It never decreases.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of items the filter was sized for.
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Returns the target false positive probability the filter was sized for.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Returns the seed of the first hash function.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of bits in the bloom filter.
    pub fn bit_count(&self) -> usize {
        self.bit_vec.len()
    }

    /// Returns the number of hash functions used by the bloom filter.
    pub fn hasher_count(&self) -> usize {
        self.hashers.len()
    }

    /// Returns the number of set bits in the bloom filter.
    pub fn count_ones(&self) -> usize {
        self.bit_vec.count_ones()
    }

    /// Returns the estimated false positive probability `(1 - e^(-k * n / m))^k`, where `n` is the
    /// approximate size. This value increases as more items are added.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::with_seed(100, 0.01, 0).unwrap();
    /// assert!(filter.false_positive_probability() < std::f64::EPSILON);
    ///
    /// filter.add("foo").unwrap();
    /// assert!(filter.false_positive_probability() > std::f64::EPSILON);
    /// assert!(filter.false_positive_probability() < 0.01);
    /// ```
    pub fn false_positive_probability(&self) -> f64 {
        let hasher_count = self.hasher_count() as f64;
        let fill = -hasher_count * self.size as f64 / self.bit_count() as f64;
        (1.0 - fill.exp()).powf(hasher_count)
    }

    /// Returns `1 - false_positive_probability()`.
    pub fn confidence(&self) -> f64 {
        1.0 - self.false_positive_probability()
    }

    /// Returns how many more distinct items fit before the approximate size reaches the maximum
    /// size. Exceeding the maximum size is allowed and only degrades the false positive rate.
    pub fn max_remaining_capacity(&self) -> usize {
        self.max_size.saturating_sub(self.size)
    }
}
