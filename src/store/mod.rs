//! Store Module
//!
//! Persisted embedding store: a full-rewrite record stream in one raw region.
//!
//! ## Region Format
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ Header (8 bytes)                                        │
//! │   Magic: u32 (4) | Count: u32 (4)                       │
//! ├─────────────────────────────────────────────────────────┤
//! │ Record 0 (variable)                                     │
//! │   [N: i32][W: i32][H: i32][C: i32][Data: f32 × N*W*H*C] │
//! ├─────────────────────────────────────────────────────────┤
//! │ ... Count records total, back to back ...               │
//! ├─────────────────────────────────────────────────────────┤
//! │ Erased tail (0xFF) up to the erase-block-aligned end    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers and floats are little-endian. Records carry no length
//! prefix: a record's length is always derivable from its four leading
//! dims, and invalid dims make the position of every later record
//! indeterminate, so decoding stops at the first corrupt record.

mod codec;
mod manager;

pub use codec::{decode_record, encode_record};
pub use manager::{LoadReport, StoreManager};

// =============================================================================
// Shared Constants (used by codec, manager, config)
// =============================================================================

/// Magic value identifying the current store format
///
/// Any other value at offset 0 (erased-flash fill, an older format's magic,
/// foreign data) reads as "no store here".
pub const MAGIC: u32 = 0xFACE_0002;

/// Header length: Magic (4) + Count (4) = 8 bytes
pub const HEADER_LEN: u64 = 8;

/// Length of a record's dim prefix: four i32 = 16 bytes
pub const DIMS_LEN: usize = 16;

/// Safety ceiling on floats per record
///
/// Caps how much a single record can claim during decode, so corrupt dims
/// cannot trigger outsized allocations. Twice the recognition engine's
/// 512-float face id vectors.
pub const MAX_RECORD_FLOATS: usize = 1024;

/// Largest possible encoded record length in bytes
pub const fn max_record_len() -> usize {
    DIMS_LEN + MAX_RECORD_FLOATS * 4
}
