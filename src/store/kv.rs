//! Durable string key-value storage.
//!
//! [`FileStore`] keeps one JSON file per key under the data directory,
//! written via a temp file and rename so a crash never leaves half a value.
//! [`MemoryStore`] is the fallback when the data directory is unusable.

use crate::error::NewsError;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// String-keyed storage with get/set/remove semantics.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, NewsError>;
    fn set(&self, key: &str, value: &str) -> Result<(), NewsError>;
    fn remove(&self, key: &str) -> Result<(), NewsError>;
    /// All keys currently stored, in no particular order.
    fn keys(&self) -> Result<Vec<String>, NewsError>;
}

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, NewsError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| storage_err(&dir, e))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, NewsError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_err(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), NewsError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| storage_err(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_err(&path, e))?;
        debug!(key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), NewsError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_err(&path, e)),
        }
    }

    fn keys(&self) -> Result<Vec<String>, NewsError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| storage_err(&self.dir, e))?;
        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| storage_err(&self.dir, e))?;
            let name = entry.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".json")) else {
                continue;
            };
            if let Some(key) = decode_key(stem) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

/// In-process storage; nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: RefCell<BTreeMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, NewsError> {
        Ok(self.map.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), NewsError> {
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), NewsError> {
        self.map.borrow_mut().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, NewsError> {
        Ok(self.map.borrow().keys().cloned().collect())
    }
}

fn storage_err(path: &Path, e: std::io::Error) -> NewsError {
    NewsError::Storage(format!("{}: {e}", path.display()))
}

/// Make a key safe as a file name: `[A-Za-z0-9_-]` pass through, every
/// other byte becomes `%XX`.
fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    for b in key.bytes() {
        if b.is_ascii_alphanumeric() || b == b'_' || b == b'-' {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

fn decode_key(encoded: &str) -> Option<String> {
    let bytes = encoded.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = encoded.get(i + 1..i + 3)?;
            out.push(u8::from_str_radix(hex, 16).ok()?);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).ok()
}
