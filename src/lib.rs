//! # tabulated-collections
//!
//! `tabulated-collections` provides membership structures built on tabulation hashing: keys are
//! split into fixed-width chunks, each chunk is looked up in a table of seeded random values, and
//! the looked-up values are combined with XOR. The hash functions are fast, reproducible from a
//! seed and close to uniform, but make no cryptographic claims.
//!
//!  - [`tabulation`]: the simple, twisted and double tabulation hash families.
//!  - [`bloom::BloomFilter`]: approximate set membership with parameters derived from the expected
//!    size and a target false positive probability.
//!  - [`cuckoo::CuckooHashTable`]: exact membership with two candidate slots per key and bounded
//!    displacement on insertion.
//!
//! ## Usage
//!
//! Add this to your `Cargo.toml`:
//! ```toml
//! [dependencies]
//! tabulated-collections = "*"
//! ```
//!
//! ```rust
//! use tabulated_collections::bloom::BloomFilter;
//! use tabulated_collections::cuckoo::CuckooHashTable;
//! use tabulated_collections::tabulation::{TabulationHash, TwistedTabulationHash};
//!
//! let hasher = TwistedTabulationHash::with_seed(42);
//! assert_eq!(hasher.hash("hello"), TwistedTabulationHash::with_seed(42).hash("hello"));
//!
//! let mut filter = BloomFilter::with_seed(5, 0.01, 7).unwrap();
//! filter.add("a").unwrap().add("b").unwrap().add("c").unwrap();
//! assert!(filter.contains("a").unwrap());
//!
//! let mut table = CuckooHashTable::new(11, 10).unwrap();
//! assert!(table.insert(15u64));
//! assert!(table.contains(&15));
//! ```
//!
//! ## References
//!
//!  - [Universal classes of hash functions](https://doi.org/10.1016/0022-0000(79)90044-8)
//!  > Carter, J. Lawrence, and Mark N. Wegman. 1979. “Universal Classes of Hash Functions.” *Journal of Computer and System Sciences* 18 (2): 143–54.
//!  - [The Power of Simple Tabulation Hashing](https://arxiv.org/abs/1011.5200)
//!  > Pătraşcu, Mihai, and Mikkel Thorup. 2012. “The Power of Simple Tabulation Hashing.” *Journal of the ACM* 59 (3): 14:1–14:50. doi:[10.1145/2220357.2220361](https://doi.org/10.1145/2220357.2220361).
//!  - [Twisted Tabulation Hashing](https://dl.acm.org/citation.cfm?id=2627817.2627833)
//!  > Pătraşcu, Mihai, and Mikkel Thorup. 2013. “Twisted Tabulation Hashing.” In *Proceedings of the Twenty-Fourth Annual ACM-SIAM Symposium on Discrete Algorithms*, 209–28. SODA ’13.
//!  - [Cuckoo Hashing](https://doi.org/10.1016/j.jalgor.2003.12.002)
//!  > Pagh, Rasmus, and Flemming Friche Rodler. 2004. “Cuckoo Hashing.” *Journal of Algorithms* 51 (2): 122–44.

#![warn(missing_docs)]

pub mod bit_vec;
pub mod bloom;
pub mod cuckoo;
mod error;
pub mod tabulation;
mod util;

pub use crate::error::{Error, Result};
pub use crate::util::canonical_bytes;
