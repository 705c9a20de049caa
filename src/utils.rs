use std::borrow::Cow;
use std::fs::{self, File};
use std::io;
use std::path::Path;

use encoding_rs::SHIFT_JIS;
use sha2::{Digest, Sha256};

use crate::error::SplitError;

pub fn read_source(path: &Path) -> Result<Vec<u8>, SplitError> {
    fs::read(path).map_err(|source| SplitError::Read {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_output(path: &Path, contents: &[u8]) -> Result<(), SplitError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SplitError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, contents).map_err(|source| SplitError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn ensure_directory(path: &Path) -> Result<(), SplitError> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(SplitError::DirectoryNotFound(path.to_path_buf()))
    }
}

/// Decodes for display only: UTF-8 first, then Shift_JIS.
pub fn decode_best_effort(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            let (res, _, _) = SHIFT_JIS.decode(bytes);
            res
        }
    }
}

pub fn digest_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

fn digest_file(path: &Path) -> Option<String> {
    let mut file = File::open(path).ok()?;
    let mut hasher = Sha256::new();
    io::copy(&mut file, &mut hasher).ok()?;
    Some(hex::encode(hasher.finalize()))
}

/// True when `path` already holds exactly `contents`.
pub fn file_matches(path: &Path, contents: &[u8]) -> bool {
    if !path.is_file() {
        return false;
    }
    digest_file(path).is_some_and(|h| h == digest_bytes(contents))
}
