//! # Adapters Layer (Hexagonal Architecture)
//!
//! Implements the outbound port traits: ledger backends and the Horizon
//! payment network client.

mod file_ledger;
mod horizon_client;
mod memory_ledger;

pub use file_ledger::FileLedger;
pub use horizon_client::{HorizonClient, HorizonConfig, DEFAULT_HORIZON_URL};
pub use memory_ledger::InMemoryLedger;
