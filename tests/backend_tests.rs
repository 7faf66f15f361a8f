//! Tests for the storage backends
//!
//! These tests verify the backend contract both adapters share:
//! - Named region lookup
//! - Bounds-checked byte-offset reads and writes
//! - Block-aligned erase filling with the erased byte
//! - File regions persisting across reopen

use facevault::backend::{FileBackend, MemBackend, StorageBackend, ERASED_BYTE};
use facevault::StoreError;
use tempfile::TempDir;

const BLOCK_LEN: u64 = 4096;

// =============================================================================
// MemBackend Tests
// =============================================================================

#[test]
fn test_mem_find_region() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 8192);

    let region = backend.find_region("fr").unwrap();
    assert_eq!(region.name, "fr");
    assert_eq!(region.len, 8192);
}

#[test]
fn test_mem_find_missing_region() {
    let mut backend = MemBackend::new(BLOCK_LEN);

    assert!(matches!(
        backend.find_region("nope"),
        Err(StoreError::RegionNotFound(_))
    ));
}

#[test]
fn test_mem_new_region_is_erased() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 4096);
    let region = backend.find_region("fr").unwrap();

    let mut buf = [0u8; 16];
    backend.read(&region, 0, &mut buf).unwrap();
    assert_eq!(buf, [ERASED_BYTE; 16]);
}

#[test]
fn test_mem_write_read_round_trip() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 4096);
    let region = backend.find_region("fr").unwrap();

    backend.write(&region, 100, b"faceprint").unwrap();

    let mut buf = [0u8; 9];
    backend.read(&region, 100, &mut buf).unwrap();
    assert_eq!(&buf, b"faceprint");
}

#[test]
fn test_mem_read_past_end_fails() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 4096);
    let region = backend.find_region("fr").unwrap();

    let mut buf = [0u8; 16];
    let result = backend.read(&region, 4090, &mut buf);

    assert!(matches!(result, Err(StoreError::Io { op: "read", .. })));
}

#[test]
fn test_mem_write_past_end_fails() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 4096);
    let region = backend.find_region("fr").unwrap();

    let result = backend.write(&region, 4095, &[0, 1]);

    assert!(matches!(result, Err(StoreError::Io { op: "write", .. })));
}

#[test]
fn test_mem_erase_fills_with_erased_byte() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 8192);
    let region = backend.find_region("fr").unwrap();

    backend.write(&region, 0, &[0u8; 64]).unwrap();
    backend.erase_range(&region, 0, 4096).unwrap();

    assert!(backend
        .region_bytes("fr")
        .unwrap()
        .iter()
        .all(|&b| b == ERASED_BYTE));
}

#[test]
fn test_mem_erase_rejects_unaligned_range() {
    let mut backend = MemBackend::new(BLOCK_LEN);
    backend.add_region("fr", 8192);
    let region = backend.find_region("fr").unwrap();

    assert!(matches!(
        backend.erase_range(&region, 100, 4096),
        Err(StoreError::Io { op: "erase", .. })
    ));
    assert!(matches!(
        backend.erase_range(&region, 0, 100),
        Err(StoreError::Io { op: "erase", .. })
    ));
}

// =============================================================================
// FileBackend Tests
// =============================================================================

#[test]
fn test_file_create_and_find_region() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();

    backend.create_region("fr", 8192).unwrap();

    let region = backend.find_region("fr").unwrap();
    assert_eq!(region.len, 8192);
    assert!(backend.region_path("fr").exists());
}

#[test]
fn test_file_find_missing_region() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();

    assert!(matches!(
        backend.find_region("fr"),
        Err(StoreError::RegionNotFound(_))
    ));
}

#[test]
fn test_file_new_region_is_erased() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
    let region = backend.create_region("fr", 4096).unwrap();

    let mut buf = [0u8; 32];
    backend.read(&region, 2048, &mut buf).unwrap();
    assert_eq!(buf, [ERASED_BYTE; 32]);
}

#[test]
fn test_file_write_read_round_trip() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
    let region = backend.create_region("fr", 4096).unwrap();

    backend.write(&region, 64, b"embedding").unwrap();

    let mut buf = [0u8; 9];
    backend.read(&region, 64, &mut buf).unwrap();
    assert_eq!(&buf, b"embedding");
}

#[test]
fn test_file_region_persists_across_reopen() {
    let temp = TempDir::new().unwrap();

    {
        let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
        let region = backend.create_region("fr", 4096).unwrap();
        backend.write(&region, 0, b"durable").unwrap();
    }

    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
    let region = backend.find_region("fr").unwrap();

    let mut buf = [0u8; 7];
    backend.read(&region, 0, &mut buf).unwrap();
    assert_eq!(&buf, b"durable");
}

#[test]
fn test_file_erase_rejects_unaligned_range() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
    let region = backend.create_region("fr", 8192).unwrap();

    assert!(matches!(
        backend.erase_range(&region, 1, 4096),
        Err(StoreError::Io { op: "erase", .. })
    ));
}

#[test]
fn test_file_erase_fills_with_erased_byte() {
    let temp = TempDir::new().unwrap();
    let mut backend = FileBackend::open(temp.path(), BLOCK_LEN).unwrap();
    let region = backend.create_region("fr", 4096).unwrap();

    backend.write(&region, 0, &[0u8; 128]).unwrap();
    backend.erase_range(&region, 0, 4096).unwrap();

    let mut buf = [0u8; 128];
    backend.read(&region, 0, &mut buf).unwrap();
    assert!(buf.iter().all(|&b| b == ERASED_BYTE));
}
