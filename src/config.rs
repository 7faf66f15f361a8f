//! Configuration for the embedding store
//!
//! Centralized configuration with defaults matching the attendance device:
//! a region named "fr", seven enrollable faces, 4 KiB erase blocks.
//!
//! The store length is never configured directly: it is derived from the
//! capacity and the per-record ceiling, then rounded up to the erase block
//! length. Changing capacity can therefore never silently overflow the
//! erased range.

use crate::store::{max_record_len, HEADER_LEN};

/// Default region name (matches the device partition table)
pub const DEFAULT_REGION_NAME: &str = "fr";

/// Default number of enrollable embeddings
pub const DEFAULT_CAPACITY: usize = 7;

/// Default erase block length (NOR flash sector)
pub const DEFAULT_ERASE_BLOCK_LEN: u64 = 4096;

/// Configuration for a [`StoreManager`](crate::store::StoreManager) instance
#[derive(Debug, Clone)]
pub struct StoreConfig {
    // -------------------------------------------------------------------------
    // Region Configuration
    // -------------------------------------------------------------------------
    /// Name of the raw storage region holding the store
    pub region_name: String,

    /// Erase granularity of the backing medium, in bytes (must be non-zero;
    /// erase ranges are aligned to this)
    pub erase_block_len: u64,

    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Maximum number of embeddings the store holds
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            region_name: DEFAULT_REGION_NAME.to_string(),
            erase_block_len: DEFAULT_ERASE_BLOCK_LEN,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Create a new config builder
    pub fn builder() -> StoreConfigBuilder {
        StoreConfigBuilder::default()
    }

    /// Total store length in bytes: header plus `capacity` maximum-size
    /// records, rounded up to the erase block length.
    ///
    /// With defaults: `8 + 7 * (16 + 1024 * 4)` = 28792, rounded to 32768.
    pub fn store_len(&self) -> u64 {
        let raw = HEADER_LEN + self.capacity as u64 * max_record_len() as u64;
        align_up(raw, self.erase_block_len)
    }
}

/// Round `len` up to the next multiple of `align`
fn align_up(len: u64, align: u64) -> u64 {
    len.div_ceil(align) * align
}

/// Builder for StoreConfig
#[derive(Default)]
pub struct StoreConfigBuilder {
    config: StoreConfig,
}

impl StoreConfigBuilder {
    /// Set the storage region name
    pub fn region_name(mut self, name: impl Into<String>) -> Self {
        self.config.region_name = name.into();
        self
    }

    /// Set the erase block length (in bytes)
    pub fn erase_block_len(mut self, len: u64) -> Self {
        self.config.erase_block_len = len;
        self
    }

    /// Set the embedding capacity
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    pub fn build(self) -> StoreConfig {
        self.config
    }
}
