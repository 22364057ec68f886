pub mod bucket;
pub mod classify;
pub mod error;
pub mod index;

// Re-export common types for convenience
pub use bucket::{BoundedBucket, BucketError};
pub use classify::{Classifier, GroupKey};
pub use error::{Error, Result};
pub use index::BucketIndex;
