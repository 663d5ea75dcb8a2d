//! In-Memory Ledger Adapter
//!
//! Implements `LedgerStore` over a hash map. Used by tests and by the node's
//! `--in-memory` mode.

use crate::domain::LedgerError;
use crate::ports::outbound::LedgerStore;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory ledger.
#[derive(Default)]
pub struct InMemoryLedger {
    entries: RwLock<HashMap<String, Vec<u8>>>,
    reads: AtomicUsize,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put`/`delete` fail.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of `get` calls served.
    pub fn read_count(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    /// Number of `put`/`delete` calls attempted.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True if no keys are held.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    fn check_writable(&self) -> Result<(), LedgerError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(LedgerError::Backend("write rejected".to_string()));
        }
        Ok(())
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Vec<u8>, LedgerError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.read().get(key).cloned().unwrap_or_default())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), LedgerError> {
        self.check_writable()?;
        self.entries.write().remove(key);
        Ok(())
    }
}
