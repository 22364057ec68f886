//! Crate-scoped error handling for flat-buckets.
//!
//! One unified error type for public APIs, wrapping the per-layer error
//! types. Capacity exhaustion is deliberately not represented here: a full
//! bucket is an expected outcome signalled through `add`'s boolean result,
//! not an error path.

use thiserror::Error;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type exposed to users of the crate.
///
/// Construction is the only fallible operation today, so the bucket layer is
/// the only wrapped source; further layers slot in as variants.
#[derive(Debug, Error)]
pub enum Error {
    /// Errors from the bucket layer (capacity configuration)
    #[error("bucket error: {0}")]
    Bucket(#[from] crate::bucket::BucketError),
}
