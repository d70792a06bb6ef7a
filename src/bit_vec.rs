//! Fixed-length packed array of bits.

use std::mem;
use std::ops::Index;

/// A fixed-length list of bits packed into a `Vec<u8>`, eight bits per byte.
///
/// Bit `i` lives in byte `i / 8` at bit position `i % 8`, counting from the least significant
/// bit. Bits can be set but never cleared, which is all a bloom filter needs.
///
/// # Examples
///
/// ```
/// use tabulated_collections::bit_vec::BitVec;
///
/// let mut bv = BitVec::new(10);
///
/// assert!(bv.set(1));
/// assert!(bv.set(9));
/// assert!(!bv.set(9));
///
/// assert_eq!(bv.count_ones(), 2);
/// assert_eq!(bv.as_bytes(), &[0b0000_0010, 0b0000_0010]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BitVec {
    blocks: Vec<u8>,
    len: usize,
    one_count: usize,
}

const BLOCK_BIT_COUNT: usize = mem::size_of::<u8>() * 8;
const TRUE: bool = true;
const FALSE: bool = false;

impl BitVec {
    fn get_block_count(len: usize) -> usize {
        (len + BLOCK_BIT_COUNT - 1) / BLOCK_BIT_COUNT
    }

    /// Constructs a new `BitVec` with `len` bits, all unset.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bit_vec::BitVec;
    ///
    /// let bv = BitVec::new(5);
    /// assert_eq!(
    ///     bv.iter().collect::<Vec<bool>>(),
    ///     vec![false, false, false, false, false],
    /// );
    /// ```
    pub fn new(len: usize) -> Self {
        BitVec {
            blocks: vec![0; Self::get_block_count(len)],
            len,
            one_count: 0,
        }
    }

    /// Sets the bit at `index` and returns `true` if it was previously unset.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bit_vec::BitVec;
    ///
    /// let mut bv = BitVec::new(5);
    ///
    /// assert!(bv.set(3));
    /// assert!(!bv.set(3));
    /// assert_eq!(bv.get(3), Some(true));
    /// ```
    pub fn set(&mut self, index: usize) -> bool {
        assert!(index < self.len);
        let block_index = index / BLOCK_BIT_COUNT;
        let bit_index = index % BLOCK_BIT_COUNT;
        let mask = 1 << bit_index;
        let block = &mut self.blocks[block_index];
        if *block & mask != 0 {
            return false;
        }
        *block |= mask;
        self.one_count += 1;
        true
    }

    /// Returns the value at index `index`, or `None` if index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use tabulated_collections::bit_vec::BitVec;
    ///
    /// let mut bv = BitVec::new(5);
    /// bv.set(1);
    ///
    /// assert_eq!(bv.get(0), Some(false));
    /// assert_eq!(bv.get(1), Some(true));
    /// assert_eq!(bv.get(5), None);
    /// ```
    pub fn get(&self, index: usize) -> Option<bool> {
        if index >= self.len {
            None
        } else {
            let block_index = index / BLOCK_BIT_COUNT;
            let bit_index = index % BLOCK_BIT_COUNT;
            self.blocks
                .get(block_index)
                .map(|block| ((block >> bit_index) & 1) != 0)
        }
    }

    /// Returns an iterator over the bits in order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            bit_vec: self,
            index: 0,
        }
    }

    /// Returns the number of bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the `BitVec` holds no bits.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.one_count
    }

    /// Returns the number of unset bits.
    pub fn count_zeros(&self) -> usize {
        self.len - self.one_count
    }

    /// Returns the packed bytes backing the `BitVec`.
    pub fn as_bytes(&self) -> &[u8] {
        &self.blocks
    }
}

impl Index<usize> for BitVec {
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if self.get(index).expect("index out of bounds") {
            &TRUE
        } else {
            &FALSE
        }
    }
}

/// An iterator over the bits of a [`BitVec`].
pub struct Iter<'a> {
    bit_vec: &'a BitVec,
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        let ret = self.bit_vec.get(self.index);
        if ret.is_some() {
            self.index += 1;
        }
        ret
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.bit_vec.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a BitVec {
    type IntoIter = Iter<'a>;
    type Item = bool;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
