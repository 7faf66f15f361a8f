//! Record codec
//!
//! Encoding and decoding functions for single embedding records.
//!
//! ## Record Format
//! ```text
//! ┌────────┬────────┬────────┬────────┬──────────────────────┐
//! │ N (4)  │ W (4)  │ H (4)  │ C (4)  │ Data (f32 × N*W*H*C) │
//! └────────┴────────┴────────┴────────┴──────────────────────┘
//! ```
//!
//! No length prefix: the record length is always derivable from the four
//! leading dims. The flip side is that a record with invalid dims has an
//! unknowable length, so the decoder cannot skip it to resynchronize on a
//! later record: it reports `CorruptRecord` and the caller must stop.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::embedding::EmbeddingTensor;
use crate::error::{Result, StoreError};

use super::{DIMS_LEN, MAX_RECORD_FLOATS};

// =============================================================================
// Encoding
// =============================================================================

/// Encode one embedding as a record
///
/// Fails with `TooLarge` if the tensor exceeds the per-record float ceiling;
/// no partial bytes are produced on failure.
pub fn encode_record(tensor: &EmbeddingTensor) -> Result<Bytes> {
    let floats = tensor.num_floats();
    if floats > MAX_RECORD_FLOATS {
        return Err(StoreError::TooLarge {
            floats,
            ceiling: MAX_RECORD_FLOATS,
        });
    }

    let (n, w, h, c) = tensor.shape();

    let mut buf = BytesMut::with_capacity(DIMS_LEN + floats * 4);
    buf.put_i32_le(n as i32);
    buf.put_i32_le(w as i32);
    buf.put_i32_le(h as i32);
    buf.put_i32_le(c as i32);
    for &value in tensor.data() {
        buf.put_f32_le(value);
    }

    Ok(buf.freeze())
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode one record from the front of `buf`
///
/// `store_offset` is the record's byte offset within the store region; it is
/// carried into errors so corruption is diagnosable from the log alone.
///
/// Returns the tensor and the number of bytes consumed.
pub fn decode_record(buf: &[u8], store_offset: u64) -> Result<(EmbeddingTensor, usize)> {
    if buf.len() < DIMS_LEN {
        return Err(StoreError::CorruptRecord {
            offset: store_offset,
            detail: format!("{} bytes remain, dim prefix needs {}", buf.len(), DIMS_LEN),
        });
    }

    let mut cursor = buf;
    let n = cursor.get_i32_le();
    let w = cursor.get_i32_le();
    let h = cursor.get_i32_le();
    let c = cursor.get_i32_le();

    if n <= 0 || w <= 0 || h <= 0 || c <= 0 {
        return Err(StoreError::CorruptRecord {
            offset: store_offset,
            detail: format!("non-positive dims {}x{}x{}x{}", n, w, h, c),
        });
    }

    // Safe now that all dims are positive; u64 so the product cannot wrap
    let floats = n as u64 * w as u64 * h as u64 * c as u64;
    if floats > MAX_RECORD_FLOATS as u64 {
        return Err(StoreError::CorruptRecord {
            offset: store_offset,
            detail: format!(
                "dims {}x{}x{}x{} declare {} floats, ceiling is {}",
                n, w, h, c, floats, MAX_RECORD_FLOATS
            ),
        });
    }

    let floats = floats as usize;
    if cursor.remaining() < floats * 4 {
        return Err(StoreError::CorruptRecord {
            offset: store_offset,
            detail: format!(
                "payload needs {} bytes, {} remain",
                floats * 4,
                cursor.remaining()
            ),
        });
    }

    let mut data = Vec::with_capacity(floats);
    for _ in 0..floats {
        data.push(cursor.get_f32_le());
    }

    let tensor = EmbeddingTensor::new(n as u32, w as u32, h as u32, c as u32, data)?;
    Ok((tensor, DIMS_LEN + floats * 4))
}
