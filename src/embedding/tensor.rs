//! Embedding Tensor
//!
//! A multi-dimensional floating-point array representing one biometric
//! feature vector. The recognition engine produces these with shape
//! `(1, 1, 1, 512)`; the store accepts any shape whose product stays under
//! the record ceiling.

use crate::error::{Result, StoreError};
use crate::store::MAX_RECORD_FLOATS;

/// One embedding vector with its shape
///
/// Invariants (enforced at construction, relied on by the codec):
/// - all four dims are positive
/// - `data.len()` equals `n * w * h * c`
/// - the shape product does not exceed [`MAX_RECORD_FLOATS`]
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddingTensor {
    n: u32,
    w: u32,
    h: u32,
    c: u32,
    data: Vec<f32>,
}

impl EmbeddingTensor {
    /// Create a tensor from a shape and its flat payload
    pub fn new(n: u32, w: u32, h: u32, c: u32, data: Vec<f32>) -> Result<Self> {
        if n == 0 || w == 0 || h == 0 || c == 0 {
            return Err(StoreError::ShapeMismatch {
                n,
                w,
                h,
                c,
                expected: 0,
                actual: data.len(),
            });
        }

        // Product computed in u64 so a hostile shape cannot wrap around
        let product = n as u64 * w as u64 * h as u64 * c as u64;

        if product > MAX_RECORD_FLOATS as u64 {
            return Err(StoreError::TooLarge {
                floats: product as usize,
                ceiling: MAX_RECORD_FLOATS,
            });
        }

        if product as usize != data.len() {
            return Err(StoreError::ShapeMismatch {
                n,
                w,
                h,
                c,
                expected: product as usize,
                actual: data.len(),
            });
        }

        Ok(Self { n, w, h, c, data })
    }

    /// Create a flat `(1, 1, 1, len)` tensor, the shape the recognition
    /// engine uses for face id vectors
    pub fn flat(data: Vec<f32>) -> Result<Self> {
        let len = data.len() as u32;
        Self::new(1, 1, 1, len, data)
    }

    /// Shape as `(n, w, h, c)`
    pub fn shape(&self) -> (u32, u32, u32, u32) {
        (self.n, self.w, self.h, self.c)
    }

    /// Number of floats in the payload
    pub fn num_floats(&self) -> usize {
        self.data.len()
    }

    /// Flat payload
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Encoded record length in bytes: four i32 dims plus the f32 payload
    pub fn record_len(&self) -> usize {
        crate::store::DIMS_LEN + self.data.len() * 4
    }
}
