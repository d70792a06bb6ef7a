use crate::error::{Error, Result};
use bincode::Options;
use serde::Serialize;

/// Returns the stable byte representation of `value` used as a bloom filter key.
///
/// Values are serialized structurally with big-endian, fixed-width integers, so a `&str` and a
/// `String` holding the same text, or a slice and a `Vec` holding the same elements, produce
/// identical bytes. Integers end up in the trailing bytes, which are the ones tabulation reads
/// first.
pub fn canonical_bytes<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    bincode::DefaultOptions::new()
        .with_big_endian()
        .with_fixint_encoding()
        .serialize(value)
        .map_err(|err| Error::Encoding(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::canonical_bytes;
    use crate::error::Error;
    use serde::ser::{Serialize, Serializer};
    use std::collections::BTreeMap;

    #[test]
    fn test_structural_equality() {
        assert_eq!(
            canonical_bytes("foo").unwrap(),
            canonical_bytes(&String::from("foo")).unwrap(),
        );
        assert_eq!(
            canonical_bytes(&[1u32, 2, 3][..]).unwrap(),
            canonical_bytes(&vec![1u32, 2, 3]).unwrap(),
        );
        assert_eq!(
            canonical_bytes(&(1u8, "a")).unwrap(),
            canonical_bytes(&(1u8, String::from("a"))).unwrap(),
        );

        let mut map = BTreeMap::new();
        map.insert("key", "value");
        assert_eq!(canonical_bytes(&map).unwrap(), canonical_bytes(&map).unwrap());
    }

    #[test]
    fn test_integers_are_big_endian() {
        assert_eq!(canonical_bytes(&0x0102u16).unwrap(), vec![0x01, 0x02]);
        assert_eq!(canonical_bytes(&5u64).unwrap(), vec![0, 0, 0, 0, 0, 0, 0, 5]);
        assert_eq!(
            canonical_bytes("ab").unwrap(),
            vec![0, 0, 0, 0, 0, 0, 0, 2, b'a', b'b'],
        );
    }

    struct Unencodable;

    impl Serialize for Unencodable {
        fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            Err(serde::ser::Error::custom("unsupported value"))
        }
    }

    #[test]
    fn test_encoding_error() {
        assert!(matches!(
            canonical_bytes(&Unencodable),
            Err(Error::Encoding(_)),
        ));
    }
}
