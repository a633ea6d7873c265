use crate::snapshot::ContentHash;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum ChecksumError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
}

const CHUNK_SIZE: usize = 8192;

/// Computes the SHA-256 checksum of a file's content.
///
/// The file is streamed in fixed-size chunks, so memory use does not depend on
/// file size. Only content contributes to the result; name, mtime and
/// permissions do not.
///
/// # Errors
/// - `ChecksumError::PermissionDenied`: Insufficient permissions to open or read the file
/// - `ChecksumError::Io`: File doesn't exist or any other I/O error
pub fn checksum_file(path: &Path) -> Result<ContentHash, ChecksumError> {
    let map_err = |e: std::io::Error| {
        if e.kind() == ErrorKind::PermissionDenied {
            ChecksumError::PermissionDenied(path.to_path_buf())
        } else {
            ChecksumError::Io(e)
        }
    };

    let mut file = File::open(path).map_err(map_err)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; CHUNK_SIZE];

    loop {
        let bytes_read = match file.read(&mut buffer) {
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(map_err(e)),
        };
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    let hash = ContentHash::from_hex(format!("{:x}", hasher.finalize()));

    debug!("Checksum of {} is {}", path.display(), hash);

    Ok(hash)
}

/// Fingerprints a file, reporting an unreadable file as absent.
///
/// Returns `None` for any read failure (permission denied, vanished file, I/O
/// error) so that one bad file never aborts a whole-tree scan.
pub fn fingerprint_file(path: &Path) -> Option<ContentHash> {
    match checksum_file(path) {
        Ok(hash) => Some(hash),
        Err(e) => {
            debug!("Skipping unreadable file {}: {}", path.display(), e);
            None
        }
    }
}
