//! File-Backed Ledger Adapter
//!
//! Implements `LedgerStore` as a JSON object on disk, rewritten after every
//! mutation. Lets successive node invocations share one ledger. A mutation
//! becomes visible to readers only once it has reached disk.
//!
//! Values must be UTF-8; every record the exchange writes is JSON text.

use crate::domain::LedgerError;
use crate::ports::outbound::LedgerStore;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// JSON file ledger.
pub struct FileLedger {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileLedger {
    /// Open the ledger at `path`, starting empty if the file does not exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LedgerError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            if raw.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&raw).map_err(|e| LedgerError::Corrupt(e.to_string()))?
            }
        } else {
            BTreeMap::new()
        };
        debug!(
            "[marbles] Opened ledger {:?} with {} keys",
            path,
            entries.len()
        );
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Location on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), LedgerError> {
        let body = serde_json::to_string_pretty(entries)
            .map_err(|e| LedgerError::Backend(e.to_string()))?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl LedgerStore for FileLedger {
    fn get(&self, key: &str) -> Result<Vec<u8>, LedgerError> {
        Ok(self
            .entries
            .read()
            .get(key)
            .map(|v| v.as_bytes().to_vec())
            .unwrap_or_default())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        let value = String::from_utf8(value)
            .map_err(|_| LedgerError::Backend(format!("value for '{}' is not UTF-8", key)))?;
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), LedgerError> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        next.remove(key);
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}
