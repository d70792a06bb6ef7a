use std::borrow::Cow;

/// A key that can be split into tabulation chunks.
///
/// Every key is read as a big-endian unsigned integer. Integers of any width holding the same
/// value yield the same chunks, as do byte strings that differ only in leading zero bytes. Text is
/// encoded as UTF-8 first.
///
/// # Examples
///
/// ```
/// use tabulated_collections::tabulation::TabulationKey;
///
/// assert_eq!(&*0x0102u16.key_bytes(), &[0x01, 0x02]);
/// assert_eq!(&*"ab".key_bytes(), b"ab");
/// ```
pub trait TabulationKey {
    /// Returns the big-endian byte representation of the key.
    fn key_bytes(&self) -> Cow<'_, [u8]>;
}

macro_rules! impl_tabulation_key_for_uint {
    ($($ty:ty),*) => {
        $(
            impl TabulationKey for $ty {
                #[inline]
                fn key_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_be_bytes().to_vec())
                }
            }
        )*
    };
}

impl_tabulation_key_for_uint!(u8, u16, u32, u64, u128, usize);

impl TabulationKey for [u8] {
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> TabulationKey for [u8; N] {
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self[..])
    }
}

impl TabulationKey for Vec<u8> {
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_slice())
    }
}

impl TabulationKey for str {
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl TabulationKey for String {
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T> TabulationKey for &T
where
    T: TabulationKey + ?Sized,
{
    #[inline]
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).key_bytes()
    }
}

/// Iterator over the `r`-bit chunks of a big-endian key, least significant chunk first.
pub(crate) struct Chunks<'a> {
    bytes: &'a [u8],
    chunk_bit_count: usize,
    mask: u64,
    index: usize,
    chunk_count: usize,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(bytes: &'a [u8], chunk_count: usize, chunk_bit_count: usize) -> Self {
        Chunks {
            bytes,
            chunk_bit_count,
            mask: (1u64 << chunk_bit_count) - 1,
            index: 0,
            chunk_count,
        }
    }

    fn chunk(&self, index: usize) -> usize {
        let start_bit = index * self.chunk_bit_count;
        let first_byte = start_bit / 8;
        let shift = start_bit % 8;
        let byte_span = (shift + self.chunk_bit_count + 7) / 8;

        let mut window = 0u64;
        for offset in 0..byte_span {
            let from_end = first_byte + offset;
            if from_end >= self.bytes.len() {
                break;
            }
            let byte = self.bytes[self.bytes.len() - 1 - from_end];
            window |= u64::from(byte) << (8 * offset);
        }
        ((window >> shift) & self.mask) as usize
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.index == self.chunk_count {
            return None;
        }
        let chunk = self.chunk(self.index);
        self.index += 1;
        Some(chunk)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.chunk_count - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> ExactSizeIterator for Chunks<'a> {}

#[cfg(test)]
mod tests {
    use super::{Chunks, TabulationKey};

    fn chunks(key: &impl TabulationKey, chunk_count: usize, chunk_bit_count: usize) -> Vec<usize> {
        Chunks::new(&key.key_bytes(), chunk_count, chunk_bit_count).collect()
    }

    #[test]
    fn test_byte_chunks() {
        assert_eq!(chunks(&0x0A0B_0C0Du32, 4, 8), vec![0x0D, 0x0C, 0x0B, 0x0A]);
    }

    #[test]
    fn test_unaligned_chunks() {
        assert_eq!(chunks(&0b1100_1011_1001u16, 4, 3), vec![0b001, 0b111, 0b010, 0b110]);
        assert_eq!(chunks(&0xABCDu16, 2, 12), vec![0xBCD, 0xA]);
    }

    #[test]
    fn test_short_keys_pad_with_zero() {
        assert_eq!(chunks(&0x12u8, 4, 8), vec![0x12, 0, 0, 0]);
        assert_eq!(chunks(&"", 4, 8), vec![0, 0, 0, 0]);
    }

    #[test]
    fn test_wide_keys_are_truncated() {
        let key = [0xFFu8, 0xEE, 0x01, 0x02, 0x03, 0x04];
        assert_eq!(chunks(&key, 4, 8), vec![0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_width_independent() {
        assert_eq!(chunks(&7u8, 4, 8), chunks(&7u64, 4, 8));
        assert_eq!(chunks(&7u128, 4, 5), chunks(&7usize, 4, 5));
        assert_eq!(chunks(&vec![0u8, 0, 1, 2], 4, 8), chunks(&[1u8, 2], 4, 8));
    }

    #[test]
    fn test_text_is_utf8_big_endian() {
        assert_eq!(chunks(&"ab", 2, 8), vec![b'b' as usize, b'a' as usize]);
        assert_eq!(chunks(&String::from("ab"), 2, 8), chunks(&"ab", 2, 8));
    }
}
