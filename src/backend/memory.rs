//! In-memory backend
//!
//! RAM-backed regions with flash-like erase semantics. Primary test double;
//! also useful for dry-running enrollment flows without touching a device.

use std::collections::HashMap;

use crate::error::{Result, StoreError};

use super::{Region, StorageBackend, ERASED_BYTE};

/// RAM-backed storage regions
pub struct MemBackend {
    regions: HashMap<String, Vec<u8>>,
    erase_block_len: u64,
}

impl MemBackend {
    /// Create a backend with the given erase block length
    pub fn new(erase_block_len: u64) -> Self {
        Self {
            regions: HashMap::new(),
            erase_block_len,
        }
    }

    /// Add a region of `len` bytes, initialized to the erased state
    pub fn add_region(&mut self, name: impl Into<String>, len: u64) {
        self.regions
            .insert(name.into(), vec![ERASED_BYTE; len as usize]);
    }

    /// Raw bytes of a region (for inspection in tests)
    pub fn region_bytes(&self, name: &str) -> Option<&[u8]> {
        self.regions.get(name).map(|r| r.as_slice())
    }

    /// Bounds-check an access and return the backing slice range
    fn range(region_len: usize, offset: u64, len: usize, op: &'static str) -> Result<std::ops::Range<usize>> {
        let start = offset as usize;
        let end = start.checked_add(len).ok_or(StoreError::Io {
            op,
            offset,
            detail: "range overflow".to_string(),
        })?;
        if end > region_len {
            return Err(StoreError::Io {
                op,
                offset,
                detail: format!("range end {} past region length {}", end, region_len),
            });
        }
        Ok(start..end)
    }
}

impl StorageBackend for MemBackend {
    fn find_region(&mut self, name: &str) -> Result<Region> {
        match self.regions.get(name) {
            Some(bytes) => Ok(Region {
                name: name.to_string(),
                len: bytes.len() as u64,
            }),
            None => Err(StoreError::RegionNotFound(name.to_string())),
        }
    }

    fn read(&mut self, region: &Region, offset: u64, buf: &mut [u8]) -> Result<()> {
        let bytes = self
            .regions
            .get(&region.name)
            .ok_or_else(|| StoreError::RegionNotFound(region.name.clone()))?;
        let range = Self::range(bytes.len(), offset, buf.len(), "read")?;
        buf.copy_from_slice(&bytes[range]);
        Ok(())
    }

    fn write(&mut self, region: &Region, offset: u64, data: &[u8]) -> Result<()> {
        let bytes = self
            .regions
            .get_mut(&region.name)
            .ok_or_else(|| StoreError::RegionNotFound(region.name.clone()))?;
        let range = Self::range(bytes.len(), offset, data.len(), "write")?;
        bytes[range].copy_from_slice(data);
        Ok(())
    }

    fn erase_range(&mut self, region: &Region, offset: u64, len: u64) -> Result<()> {
        if offset % self.erase_block_len != 0 || len % self.erase_block_len != 0 {
            return Err(StoreError::Io {
                op: "erase",
                offset,
                detail: format!(
                    "range ({}, {}) not aligned to erase block length {}",
                    offset, len, self.erase_block_len
                ),
            });
        }
        let bytes = self
            .regions
            .get_mut(&region.name)
            .ok_or_else(|| StoreError::RegionNotFound(region.name.clone()))?;
        let range = Self::range(bytes.len(), offset, len as usize, "erase")?;
        bytes[range].fill(ERASED_BYTE);
        Ok(())
    }
}
