//! Errors reported while building or feeding the collections.

/// Errors that can occur when constructing a structure or canonicalizing a value.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// A constructor argument violates a constraint.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The derived bloom filter bit count is above the allocation cap.
    #[error("bloom filter requires {required} bits, exceeding the limit of {limit}")]
    CapacityExceeded {
        /// Number of bits the parameters asked for.
        required: u64,
        /// Largest number of bits a filter may allocate.
        limit: u64,
    },

    /// A value could not be turned into its canonical byte representation.
    #[error("value could not be canonicalized: {0}")]
    Encoding(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
