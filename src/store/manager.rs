//! Store Manager
//!
//! Full-store load/save/delete over one raw region.
//!
//! ## Responsibilities
//! - Resolve the configured region at startup and verify it fits the store
//! - Validate the persisted header and enforce count/size limits on load
//! - Rewrite the whole store (erase, then header, then records) on save
//!
//! ## Failure Model
//! A wrong magic is "no data", not an error: erased flash, an older format,
//! or an interrupted erase all land here and boot proceeds with an empty
//! list. Erase/write failures abort the current operation with no internal
//! retry; until a later save completes, the persisted contents must be
//! assumed indeterminate, which the magic check makes safe to reload.

use tracing::{debug, info, warn};

use crate::backend::{Region, StorageBackend};
use crate::config::StoreConfig;
use crate::embedding::{EmbeddingList, EmbeddingTensor};
use crate::error::{Result, StoreError};

use super::{decode_record, encode_record, HEADER_LEN, MAGIC};

/// Outcome of a [`StoreManager::load`]
///
/// Magic mismatch and count truncation are expected conditions, so they are
/// reported here rather than as errors.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Magic matched: a store written by this format was present
    pub found_store: bool,

    /// Count field as persisted (before clamping)
    pub stored_count: u32,

    /// Entries actually decoded into the list
    pub loaded: usize,

    /// Stored count exceeded list capacity; excess entries were dropped
    pub truncated: bool,

    /// Byte offset of the first corrupt record, if decoding stopped early
    pub corrupt_at: Option<u64>,
}

/// Manages the persisted embedding store in one region
///
/// Single-threaded by design: the device accesses the store only from its
/// main control loop, and `save` blocks for the full erase + write window.
pub struct StoreManager<B: StorageBackend> {
    /// Store configuration
    config: StoreConfig,

    /// The raw storage medium
    backend: B,

    /// Resolved region handle
    region: Region,

    /// Erase-block-aligned store length, derived from config
    store_len: u64,
}

impl<B: StorageBackend> StoreManager<B> {
    /// Resolve the configured region and build a manager over it
    ///
    /// Fails with `RegionNotFound` if the backend has no such region, or
    /// `RegionTooSmall` if the region cannot hold a full store. Both are
    /// fatal, the store is unavailable.
    pub fn open(config: StoreConfig, mut backend: B) -> Result<Self> {
        let region = backend.find_region(&config.region_name)?;
        let store_len = config.store_len();

        if region.len < store_len {
            return Err(StoreError::RegionTooSmall {
                name: region.name.clone(),
                actual: region.len,
                needed: store_len,
            });
        }

        info!(
            region = %region.name,
            region_len = region.len,
            store_len,
            capacity = config.capacity,
            "embedding store opened"
        );

        Ok(Self {
            config,
            backend,
            region,
            store_len,
        })
    }

    /// Load persisted embeddings into `list`
    ///
    /// Any existing entries are cleared first. Decoding stops at the first
    /// corrupt record and keeps what was decoded before it: once one record
    /// fails to parse, the position of every later record is indeterminate.
    /// Backend read failures degrade to the "no data" outcome.
    pub fn load(&mut self, list: &mut EmbeddingList) -> Result<LoadReport> {
        list.clear();
        let mut report = LoadReport::default();

        let mut image = vec![0u8; self.store_len as usize];
        if let Err(e) = self.backend.read(&self.region, 0, &mut image) {
            warn!("store read failed, treating as empty: {}", e);
            return Ok(report);
        }

        let magic = u32::from_le_bytes([image[0], image[1], image[2], image[3]]);
        if magic != MAGIC {
            info!(
                "no valid store found (magic 0x{:08X}, expected 0x{:08X})",
                magic, MAGIC
            );
            return Ok(report);
        }
        report.found_store = true;

        report.stored_count = u32::from_le_bytes([image[4], image[5], image[6], image[7]]);
        let mut count = report.stored_count as usize;
        if count > list.capacity() {
            warn!(
                "stored count {} exceeds capacity {}, truncating",
                count,
                list.capacity()
            );
            count = list.capacity();
            report.truncated = true;
        }

        let mut offset = HEADER_LEN as usize;
        for index in 0..count {
            match decode_record(&image[offset..], offset as u64) {
                Ok((tensor, consumed)) => {
                    log_record("loaded", index, &tensor);
                    offset += consumed;
                    list.push(tensor)?;
                    report.loaded += 1;
                }
                Err(StoreError::CorruptRecord { offset, detail }) => {
                    warn!(
                        "corrupt record {} at offset {}: {}; keeping {} decoded so far",
                        index, offset, detail, report.loaded
                    );
                    report.corrupt_at = Some(offset);
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            loaded = report.loaded,
            stored = report.stored_count,
            "store load complete"
        );
        Ok(report)
    }

    /// Persist `list`: erase the whole store range, write header and records
    ///
    /// The store supports only full rewrites: enrollment events are rare
    /// over the device lifetime, so the blocking erase + sequential writes
    /// are the accepted cost. Returns the number of bytes written.
    pub fn save(&mut self, list: &EmbeddingList) -> Result<usize> {
        self.backend.erase_range(&self.region, 0, self.store_len)?;

        let mut header = [0u8; HEADER_LEN as usize];
        header[0..4].copy_from_slice(&MAGIC.to_le_bytes());
        header[4..8].copy_from_slice(&(list.count() as u32).to_le_bytes());
        self.backend.write(&self.region, 0, &header)?;

        let mut offset = HEADER_LEN;
        for (index, tensor) in list.iter().enumerate() {
            let record = encode_record(tensor)?;
            self.backend.write(&self.region, offset, &record)?;
            log_record("saved", index, tensor);
            offset += record.len() as u64;
        }

        info!(
            count = list.count(),
            bytes = offset,
            "store save complete"
        );
        Ok(offset as usize)
    }

    /// Clear `list` and persist the empty store
    ///
    /// Leaves the region valid-but-empty (magic intact, count 0), distinct
    /// from the "no data" state. This is the only deletion granularity;
    /// removing a single embedding is a list edit followed by `save`.
    pub fn delete_all(&mut self, list: &mut EmbeddingList) -> Result<()> {
        list.clear();
        self.save(list)?;
        Ok(())
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// The resolved region handle
    pub fn region(&self) -> &Region {
        &self.region
    }

    /// Derived store length in bytes
    pub fn store_len(&self) -> u64 {
        self.store_len
    }

    /// The configuration
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Mutable access to the backend (tests inject corruption through this)
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

/// Per-record debug line with the leading floats, enough to eyeball whether
/// a vector survived the trip
fn log_record(verb: &str, index: usize, tensor: &EmbeddingTensor) {
    let (n, w, h, c) = tensor.shape();
    let head = &tensor.data()[..tensor.num_floats().min(5)];
    debug!(
        "{} record {} (n:{} w:{} h:{} c:{}) data: {:?}",
        verb, index, n, w, h, c, head
    );
}
