//! Storage Backend Module
//!
//! Abstracts the raw erasable medium underneath the store.
//!
//! ## Responsibilities
//! - Locate a named region and report its length
//! - Byte-offset reads and writes within a region
//! - Whole-range erase at the medium's block granularity
//!
//! On the device this capability is the flash partition API; on a host it is
//! one of the adapters below. The store itself never assumes more than this
//! trait: no append, no wear-leveling, no partial-block erase.

mod file;
mod memory;

pub use file::FileBackend;
pub use memory::MemBackend;

use crate::error::Result;

/// Byte value of erased flash
pub const ERASED_BYTE: u8 = 0xFF;

/// Handle to a located region
///
/// Returned by [`StorageBackend::find_region`]; all other backend calls take
/// it by reference. Offsets are relative to the region start.
#[derive(Debug, Clone)]
pub struct Region {
    /// Region name as found
    pub name: String,
    /// Total region length in bytes
    pub len: u64,
}

/// Raw erasable storage capability
///
/// Methods take `&mut self`: even reads may move an underlying cursor
/// (file-backed regions seek), and the store is single-threaded by design.
pub trait StorageBackend {
    /// Locate a named region
    ///
    /// Fails with `RegionNotFound` if the medium has no such region.
    fn find_region(&mut self, name: &str) -> Result<Region>;

    /// Read `buf.len()` bytes starting at `offset`
    fn read(&mut self, region: &Region, offset: u64, buf: &mut [u8]) -> Result<()>;

    /// Write `bytes` starting at `offset`
    ///
    /// The range must have been erased since it was last written; the store
    /// guarantees this by erasing the whole range before every rewrite.
    fn write(&mut self, region: &Region, offset: u64, bytes: &[u8]) -> Result<()>;

    /// Erase `len` bytes starting at `offset`, filling with [`ERASED_BYTE`]
    ///
    /// `offset` and `len` must be aligned to the medium's erase block length.
    fn erase_range(&mut self, region: &Region, offset: u64, len: u64) -> Result<()>;
}
