//! Error types for facevault
//!
//! Provides a unified error type for all operations.
//!
//! Two persisted-store conditions are deliberately *not* errors and never
//! appear here: a non-matching magic header ("no data", expected on first
//! boot or after a format change) and a stored count above capacity
//! (truncated with a warning). Both are reported through
//! [`LoadReport`](crate::store::LoadReport) instead.

use thiserror::Error;

/// Result type alias using StoreError
pub type Result<T> = std::result::Result<T, StoreError>;

/// Unified error type for facevault operations
#[derive(Debug, Error)]
pub enum StoreError {
    // -------------------------------------------------------------------------
    // Backend Errors
    // -------------------------------------------------------------------------
    #[error("storage region '{0}' not found")]
    RegionNotFound(String),

    #[error("backend {op} failed at offset {offset}: {detail}")]
    Io {
        op: &'static str,
        offset: u64,
        detail: String,
    },

    #[error("region '{name}' too small: {actual} bytes, store needs {needed}")]
    RegionTooSmall {
        name: String,
        actual: u64,
        needed: u64,
    },

    // -------------------------------------------------------------------------
    // Record Format Errors
    // -------------------------------------------------------------------------
    #[error("embedding too large: {floats} floats exceeds ceiling of {ceiling}")]
    TooLarge { floats: usize, ceiling: usize },

    #[error("corrupt record at offset {offset}: {detail}")]
    CorruptRecord { offset: u64, detail: String },

    // -------------------------------------------------------------------------
    // In-Memory Invariant Errors
    // -------------------------------------------------------------------------
    #[error("shape ({n},{w},{h},{c}) declares {expected} floats, data holds {actual}")]
    ShapeMismatch {
        n: u32,
        w: u32,
        h: u32,
        c: u32,
        expected: usize,
        actual: usize,
    },

    #[error("embedding list full (capacity {capacity})")]
    ListFull { capacity: usize },
}
