//! # State Accessor
//!
//! Typed access to owners, marbles and offers on top of the raw ledger port.
//!
//! Fetches return `Option`: a missing key, undecodable bytes, a failed read,
//! and a record that fails its presence check all come back as `None`.
//! Marbles and offers must carry the requested id; an owner only needs a
//! username. Writes and deletes propagate store failures verbatim
//! and are applied one at a time.

use crate::domain::{
    invariant_marble_present, invariant_offer_present, invariant_owner_present, EntityKind,
    Marble, MarbleError, Offer, Owner,
};
use crate::ports::outbound::LedgerStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// Typed entity store over a ledger.
pub struct EntityStore<L: LedgerStore> {
    ledger: Arc<L>,
}

impl<L: LedgerStore> EntityStore<L> {
    /// Wrap a ledger.
    pub fn new(ledger: Arc<L>) -> Self {
        Self { ledger }
    }

    /// Underlying ledger.
    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    fn decode<T: DeserializeOwned>(&self, kind: EntityKind, key: &str) -> Option<T> {
        let bytes = match self.ledger.get(key) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("[marbles] Failed to read {} {}: {}", kind, key, e);
                return None;
            }
        };
        if bytes.is_empty() {
            return None;
        }
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("[marbles] Value at {} is not a {}: {}", key, kind, e);
                None
            }
        }
    }

    /// Fetch a marble.
    pub fn fetch_marble(&self, id: &str) -> Option<Marble> {
        self.decode::<Marble>(EntityKind::Marble, id)
            .filter(|marble| invariant_marble_present(marble, id))
    }

    /// Fetch an owner.
    pub fn fetch_owner(&self, id: &str) -> Option<Owner> {
        self.decode::<Owner>(EntityKind::Owner, id)
            .filter(invariant_owner_present)
    }

    /// Fetch an offer.
    pub fn fetch_offer(&self, id: &str) -> Option<Offer> {
        self.decode::<Offer>(EntityKind::Offer, id)
            .filter(|offer| invariant_offer_present(offer, id))
    }

    /// Fetch a marble or fail with not-found.
    pub fn require_marble(&self, id: &str) -> Result<Marble, MarbleError> {
        self.fetch_marble(id)
            .ok_or_else(|| MarbleError::not_found(EntityKind::Marble, id))
    }

    /// Fetch an owner or fail with not-found.
    pub fn require_owner(&self, id: &str) -> Result<Owner, MarbleError> {
        self.fetch_owner(id)
            .ok_or_else(|| MarbleError::not_found(EntityKind::Owner, id))
    }

    /// Fetch an offer or fail with not-found.
    pub fn require_offer(&self, id: &str) -> Result<Offer, MarbleError> {
        self.fetch_offer(id)
            .ok_or_else(|| MarbleError::not_found(EntityKind::Offer, id))
    }

    /// Serialize and write an entity.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), MarbleError> {
        let bytes = serde_json::to_vec(value)?;
        self.ledger.put(key, bytes)?;
        Ok(())
    }

    /// Write raw bytes.
    pub fn put_raw(&self, key: &str, value: Vec<u8>) -> Result<(), MarbleError> {
        self.ledger.put(key, value)?;
        Ok(())
    }

    /// Read raw bytes.
    pub fn read_raw(&self, key: &str) -> Result<Vec<u8>, MarbleError> {
        Ok(self.ledger.get(key)?)
    }

    /// Remove a key.
    pub fn delete(&self, key: &str) -> Result<(), MarbleError> {
        self.ledger.delete(key)?;
        Ok(())
    }
}
