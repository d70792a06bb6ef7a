use proptest::prelude::*;
use std::collections::HashSet;
use tabulated_collections::bloom::BloomFilter;
use tabulated_collections::cuckoo::CuckooHashTable;
use tabulated_collections::tabulation::{
    DoubleTabulationHash, SimpleTabulationHash, TabulationHash, TwistedTabulationHash,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // Property: instances built from the same seed hash every key identically
    #[test]
    fn prop_hash_is_deterministic(seed in any::<u64>(), key in prop::collection::vec(any::<u8>(), 0..16)) {
        prop_assert_eq!(
            SimpleTabulationHash::with_seed(seed).hash(&key),
            SimpleTabulationHash::with_seed(seed).hash(&key)
        );
        prop_assert_eq!(
            TwistedTabulationHash::with_seed(seed).hash(&key),
            TwistedTabulationHash::with_seed(seed).hash(&key)
        );
        prop_assert_eq!(
            DoubleTabulationHash::with_seed(seed).hash(&key),
            DoubleTabulationHash::with_seed(seed).hash(&key)
        );
    }

    // Property: an integer hashes like its big-endian bytes, whatever its width
    #[test]
    fn prop_integer_width_is_irrelevant(key in any::<u32>()) {
        let hasher = TwistedTabulationHash::with_seed(3);
        prop_assert_eq!(hasher.hash(&key), hasher.hash(&u64::from(key)));
        prop_assert_eq!(hasher.hash(&key), hasher.hash(&key.to_be_bytes()));
    }

    // Property: every added value is reported present, and the size accounting holds throughout
    #[test]
    fn prop_bloom_has_no_false_negatives(
        seed in any::<u64>(),
        max_size in 1usize..200,
        values in prop::collection::vec("[a-z0-9]{0,12}", 0..100),
    ) {
        let mut filter = BloomFilter::with_seed(max_size, 0.01, seed).unwrap();
        let mut previous_size = 0;

        for (index, value) in values.iter().enumerate() {
            filter.add(value).unwrap();
            prop_assert!(filter.contains(value.as_str()).unwrap());
            prop_assert!(filter.size() >= previous_size);
            prop_assert!(filter.size() <= index + 1);
            prop_assert_eq!(
                filter.max_remaining_capacity(),
                max_size.saturating_sub(filter.size())
            );
            previous_size = filter.size();
        }
        for value in &values {
            prop_assert!(filter.contains(value).unwrap());
        }
    }

    // Property: successful insertions stay resident and failed insertions change nothing
    #[test]
    fn prop_cuckoo_keeps_inserted_keys(
        size in 1usize..16,
        max_displacements in 1usize..16,
        keys in prop::collection::vec(any::<u64>(), 0..48),
    ) {
        let mut table = CuckooHashTable::new(size, max_displacements).unwrap();
        let mut resident = HashSet::new();

        for key in keys {
            let before = (table.slots().0.to_vec(), table.slots().1.to_vec());
            if table.insert(key) {
                resident.insert(key);
            } else {
                prop_assert_eq!((table.slots().0.to_vec(), table.slots().1.to_vec()), before);
            }
            for key in &resident {
                prop_assert!(table.contains(key));
            }
            prop_assert_eq!(table.len(), resident.len());
            prop_assert!(table.len() <= table.capacity());
        }
    }
}
