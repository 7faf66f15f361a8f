//! File-backed regions
//!
//! Emulates raw regions as pre-sized files under a base directory, one file
//! per region. Lets the store run against real persistence on a host: region
//! images survive process restarts and can be inspected with the
//! `facevault-inspect` tool or copied off a device.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

use super::{Region, StorageBackend, ERASED_BYTE};

/// File-per-region storage backend
pub struct FileBackend {
    base_dir: PathBuf,
    erase_block_len: u64,
}

impl FileBackend {
    /// Create a backend rooted at `base_dir`
    ///
    /// The directory is created if it does not exist.
    pub fn open(base_dir: &Path, erase_block_len: u64) -> Result<Self> {
        std::fs::create_dir_all(base_dir).map_err(|e| io_err("open", 0, e))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            erase_block_len,
        })
    }

    /// Create a region of `len` bytes in the erased state
    ///
    /// An existing region of the same name is replaced.
    pub fn create_region(&mut self, name: &str, len: u64) -> Result<Region> {
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(self.region_path(name))
            .map_err(|e| io_err("create", 0, e))?;

        file.write_all(&vec![ERASED_BYTE; len as usize])
            .map_err(|e| io_err("create", 0, e))?;
        file.sync_all().map_err(|e| io_err("create", 0, e))?;

        Ok(Region {
            name: name.to_string(),
            len,
        })
    }

    /// Path of the image file backing a region
    pub fn region_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(format!("{}.bin", name))
    }

    fn open_region(&self, region: &Region, write: bool, op: &'static str) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(write)
            .open(self.region_path(&region.name))
            .map_err(|e| io_err(op, 0, e))
    }
}

impl StorageBackend for FileBackend {
    fn find_region(&mut self, name: &str) -> Result<Region> {
        let path = self.region_path(name);
        match std::fs::metadata(&path) {
            Ok(meta) => Ok(Region {
                name: name.to_string(),
                len: meta.len(),
            }),
            Err(_) => Err(StoreError::RegionNotFound(name.to_string())),
        }
    }

    fn read(&mut self, region: &Region, offset: u64, buf: &mut [u8]) -> Result<()> {
        let mut file = self.open_region(region, false, "read")?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| io_err("read", offset, e))?;
        file.read_exact(buf).map_err(|e| io_err("read", offset, e))
    }

    fn write(&mut self, region: &Region, offset: u64, bytes: &[u8]) -> Result<()> {
        let mut file = self.open_region(region, true, "write")?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| io_err("write", offset, e))?;
        file.write_all(bytes).map_err(|e| io_err("write", offset, e))?;
        file.sync_all().map_err(|e| io_err("write", offset, e))
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
        let mut file = self.open_region(region, true, "erase")?;
        file.seek(SeekFrom::Start(offset))
            .map_err(|e| io_err("erase", offset, e))?;
        file.write_all(&vec![ERASED_BYTE; len as usize])
            .map_err(|e| io_err("erase", offset, e))?;
        file.sync_all().map_err(|e| io_err("erase", offset, e))
    }
}

fn io_err(op: &'static str, offset: u64, e: std::io::Error) -> StoreError {
    StoreError::Io {
        op,
        offset,
        detail: e.to_string(),
    }
}
