//! Input resolution: read a local PDF file into memory.
//!
//! The MIME gatekeeping the browser original delegated to its upload widget
//! happens here instead: the first four bytes must spell `%PDF` before
//! anything downstream touches the data. Validating up front means callers
//! get a precise error rather than a parser failure three stages later.

use crate::error::MozhiError;
use std::path::Path;
use tracing::debug;

/// Read a PDF file into memory, validating existence, readability, and the
/// `%PDF` magic bytes.
pub async fn read_pdf(path: impl AsRef<Path>) -> Result<Vec<u8>, MozhiError> {
    let path = path.as_ref();

    let bytes = match tokio::fs::read(path).await {
        Ok(b) => b,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(MozhiError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(MozhiError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(e) => {
            return Err(MozhiError::Internal(format!(
                "failed to read '{}': {e}",
                path.display()
            )));
        }
    };

    validate_magic(&bytes).map_err(|magic| MozhiError::NotAPdf {
        path: path.to_path_buf(),
        magic,
    })?;

    debug!(path = %path.display(), size = bytes.len(), "resolved local PDF");
    Ok(bytes)
}

/// Check the `%PDF` magic bytes on an in-memory buffer.
///
/// Returns the offending first four bytes on mismatch so the error message
/// can show what the file actually was.
pub fn validate_magic(bytes: &[u8]) -> Result<(), [u8; 4]> {
    let mut magic = [0u8; 4];
    let head = bytes.get(..4).unwrap_or(&[]);
    magic[..head.len()].copy_from_slice(head);
    if &magic == b"%PDF" {
        Ok(())
    } else {
        Err(magic)
    }
}
