//! Error types for attrmap.
//!
//! Access failures and persistence failures are separate enums: the in-memory
//! containers never touch I/O, and the file-backed map wraps both.

use thiserror::Error;

use crate::value::Kind;

/// Errors raised by map and list access operations.
///
/// All access errors propagate synchronously to the caller; nothing is
/// retried, logged, or swallowed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessError {
    /// A key lookup or deletion did not find the key.
    #[error("key not found: {key:?}")]
    KeyNotFound {
        /// The missing key.
        key: String,
    },

    /// An attribute lookup or deletion did not find the attribute.
    #[error("attribute not found: {name:?}")]
    AttrNotFound {
        /// The missing attribute name.
        name: String,
    },

    /// A positional operation used an index outside the valid range.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// A merge was fed a value that is not a map.
    #[error("cannot merge value of kind {kind} into a map")]
    NotAMap {
        /// Kind of the rejected value.
        kind: Kind,
    },
}

/// Errors raised while loading or storing a file-backed map.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file did not hold valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An underlying map operation failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}
