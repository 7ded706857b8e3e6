//! Bounded writes into caller-provided byte buffers.

use crate::error::{Result, ThinCloudError};

/// Copy `s` into the front of `buf` and return the byte length written.
///
/// A capacity shortfall is reported instead of truncating; the buffer
/// contents are unspecified after an error.
pub(crate) fn copy_into(buf: &mut [u8], s: &str) -> Result<usize> {
    let bytes = s.as_bytes();
    if bytes.len() > buf.len() {
        return Err(ThinCloudError::BufferTooSmall {
            needed: bytes.len(),
            capacity: buf.len(),
        });
    }
    buf[..bytes.len()].copy_from_slice(bytes);
    Ok(bytes.len())
}
