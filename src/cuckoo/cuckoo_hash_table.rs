use crate::cuckoo::CuckooHashTableConfig;
use crate::error::Result;
use crate::tabulation::{TabulationHash, TabulationKey, TwistedTabulationHash};
use std::borrow::Borrow;
use std::fmt;
use std::iter::Chain;
use std::mem;
use std::slice;

/// A hash table storing each key in one of two candidate slots.
///
/// The table is made of two slot arrays `T1` and `T2` of equal length, each addressed by its own
/// twisted tabulation hash function `H1` and `H2`. A resident key always sits at either
/// `T1[H1(key)]` or `T2[H2(key)]`, so lookups probe exactly two slots.
///
/// Insertion places the key in `T1[H1(key)]` if that slot is empty. Otherwise the key evicts the
/// resident, and the evicted key moves to its slot in the other table, alternating between the two
/// tables until an empty slot is found or the displacement bound is reached. A failed insertion
/// undoes every displacement it made, so it never loses a resident key. The table never resizes
/// itself; growing and rehashing is left to the caller.
///
/// # Examples
///
/// ```
/// use tabulated_collections::cuckoo::CuckooHashTable;
///
/// let mut table = CuckooHashTable::new(11, 10).unwrap();
///
/// assert!(table.insert(15u64));
/// assert!(table.insert(23u64));
/// assert!(table.contains(&15));
/// assert!(!table.contains(&99));
///
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.capacity(), 22);
/// ```
#[derive(Clone, Debug)]
pub struct CuckooHashTable<K> {
    tables: [Vec<Option<K>>; 2],
    hashers: [TwistedTabulationHash; 2],
    max_displacements: usize,
    len: usize,
}

impl<K> CuckooHashTable<K>
where
    K: TabulationKey + Eq,
{
    /// Constructs a new, empty `CuckooHashTable` with `size` slots in each of its two tables and a
    /// bound of `max_displacements` probes per insertion. The hash functions use the fixed seeds 1
    /// and 2.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if `size` or
    /// `max_displacements` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::cuckoo::CuckooHashTable;
    ///
    /// let table = CuckooHashTable::<String>::new(11, 10).unwrap();
    /// assert!(CuckooHashTable::<String>::new(0, 10).is_err());
    /// assert!(CuckooHashTable::<String>::new(11, 0).is_err());
    /// ```
    pub fn new(size: usize, max_displacements: usize) -> Result<Self> {
        Self::from_config(
            CuckooHashTableConfig::new()
                .with_size(size)
                .with_max_displacements(max_displacements),
        )
    }

    /// Constructs a new, empty `CuckooHashTable` from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`](crate::Error::InvalidConfiguration) if `config`
    /// does not validate.
    pub fn from_config(config: CuckooHashTableConfig) -> Result<Self> {
        config.validate()?;
        let hashers = [
            TwistedTabulationHash::from_parameters(
                config.chunk_count,
                config.chunk_bit_count,
                config.seeds[0],
            )?,
            TwistedTabulationHash::from_parameters(
                config.chunk_count,
                config.chunk_bit_count,
                config.seeds[1],
            )?,
        ];
        tracing::debug!(
            size = config.size,
            max_displacements = config.max_displacements,
            seed_1 = config.seeds[0],
            seed_2 = config.seeds[1],
            "built cuckoo hash table"
        );
        Ok(CuckooHashTable {
            tables: [
                (0..config.size).map(|_| None).collect(),
                (0..config.size).map(|_| None).collect(),
            ],
            hashers,
            max_displacements: config.max_displacements,
            len: 0,
        })
    }

    #[inline]
    fn position<Q>(&self, table: usize, key: &Q) -> usize
    where
        Q: TabulationKey + ?Sized,
    {
        self.hashers[table].hash(key) as usize % self.slot_count()
    }

    /// Inserts a key into the table and returns `true` on success.
    ///
    /// Inserting a key that is already resident succeeds without moving anything. When no empty
    /// slot is reached within the displacement bound the insertion returns `false` and the table
    /// is restored to its previous state. Use [`CuckooHashTable::try_insert`] to get the key back
    /// on failure.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::cuckoo::CuckooHashTable;
    ///
    /// let mut table = CuckooHashTable::new(3, 5).unwrap();
    ///
    /// let inserted: Vec<bool> = (1..=7u64).map(|key| table.insert(key)).collect();
    /// assert!(inserted.contains(&false));
    /// assert!(table.len() <= table.capacity());
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        self.try_insert(key).is_ok()
    }

    /// Inserts a key into the table, handing it back as `Err` if no empty slot is reached within
    /// the displacement bound.
    ///
    /// On failure every displaced key is moved back, so the table is exactly as it was before the
    /// call and the caller can retry the key elsewhere.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::cuckoo::CuckooHashTable;
    ///
    /// let mut table = CuckooHashTable::new(3, 5).unwrap();
    ///
    /// let rejected: Vec<u64> = (1..=7u64).filter_map(|key| table.try_insert(key).err()).collect();
    /// assert!(!rejected.is_empty());
    /// assert!(rejected.iter().all(|key| !table.contains(key)));
    /// ```
    pub fn try_insert(&mut self, key: K) -> std::result::Result<(), K> {
        if self.contains(&key) {
            tracing::trace!("key already resident");
            return Ok(());
        }

        let mut displaced = key;
        let mut journal = Vec::new();
        let mut table = 0;
        for _ in 0..self.max_displacements {
            let position = self.position(table, &displaced);
            let slot = &mut self.tables[table][position];
            if slot.is_none() {
                *slot = Some(displaced);
                self.len += 1;
                return Ok(());
            }
            if let Some(resident) = slot.as_mut() {
                mem::swap(resident, &mut displaced);
            }
            tracing::trace!(table, position, "displaced resident key");
            journal.push((table, position));
            table ^= 1;
        }

        // replaying the swaps backwards hands the original key back to `displaced`
        for (table, position) in journal.into_iter().rev() {
            if let Some(resident) = self.tables[table][position].as_mut() {
                mem::swap(resident, &mut displaced);
            }
        }
        tracing::debug!(
            max_displacements = self.max_displacements,
            len = self.len,
            "cuckoo insertion failed, displacements rolled back"
        );
        Err(displaced)
    }

    /// Checks if a key is in the table by probing its two candidate slots.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::cuckoo::CuckooHashTable;
    ///
    /// let mut table = CuckooHashTable::new(11, 10).unwrap();
    ///
    /// table.insert(String::from("apple"));
    /// assert!(table.contains("apple"));
    /// assert!(!table.contains("banana"));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: TabulationKey + Eq + ?Sized,
    {
        (0..2).any(|table| {
            let position = self.position(table, key);
            match &self.tables[table][position] {
                Some(resident) => {
                    let resident: &Q = resident.borrow();
                    resident == key
                }
                None => false,
            }
        })
    }
}

impl<K> CuckooHashTable<K> {
    /// Returns the number of resident keys.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key is resident.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in each of the two tables.
    pub fn slot_count(&self) -> usize {
        self.tables[0].len()
    }

    /// Returns the total number of slots across both tables.
    pub fn capacity(&self) -> usize {
        self.tables[0].len() + self.tables[1].len()
    }

    /// Returns the fraction of occupied slots.
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns the maximum number of probes an insertion may make.
    pub fn max_displacements(&self) -> usize {
        self.max_displacements
    }

    /// Returns the slots of the first and second table.
    pub fn slots(&self) -> (&[Option<K>], &[Option<K>]) {
        (&self.tables[0], &self.tables[1])
    }

    /// Returns an iterator over the resident keys, first table first.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            slots: self.tables[0].iter().chain(self.tables[1].iter()),
        }
    }
}

impl<K> fmt::Display for CuckooHashTable<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table 1: {:?}", self.tables[0])?;
        write!(f, "table 2: {:?}", self.tables[1])
    }
}

/// An iterator over the keys of a [`CuckooHashTable`].
pub struct Iter<'a, K> {
    slots: Chain<slice::Iter<'a, Option<K>>, slice::Iter<'a, Option<K>>>,
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.slots.find_map(|slot| slot.as_ref())
    }
}

impl<'a, K> IntoIterator for &'a CuckooHashTable<K> {
    type IntoIter = Iter<'a, K>;
    type Item = &'a K;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
