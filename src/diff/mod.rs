//! Comparison of two request batches, e.g. the same deck rendered under two
//! theme revisions.
//!
//! Requests are keyed by `name:objectId` before diffing, so inserting one element
//! does not shift every later request into a spurious change.

pub mod comparer;
pub mod error;
mod formatting;
pub mod structured;

pub use comparer::{BatchComparer, BatchComparerBuilder, BatchComparison};
pub use error::DiffError;
pub use structured::{Change, ChangeType, ValueRepr};
