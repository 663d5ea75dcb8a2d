//! # Marble Exchange
//!
//! Ownership registry and exchange for marble assets on a shared key-value
//! ledger, with offer settlement verified against the Stellar payment
//! network.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! - Register owners and the marbles they hold
//! - Transfer, list, and delete marbles under a company claim
//! - Propose and accept purchase offers
//! - Settle an offer once an external payment with the offer's amount,
//!   recipient, and memo has landed
//!
//! ## Trust Model
//!
//! | Check | Source |
//! |-------|--------|
//! | Company authorization | Caller-asserted label, compared textually |
//! | Payment settlement | Two Horizon lookups (payment, then memo) |
//! | Entity presence | Decoded record whose id matches the key |
//!
//! ## Module Structure
//!
//! ```text
//! marble-exchange/
//! ├── domain/          # Owner, Marble, Offer, validation, errors
//! ├── algorithms/      # Payment verification
//! ├── ports/           # MarbleExchangeApi, LedgerStore, PaymentNetwork
//! ├── adapters/        # InMemoryLedger, FileLedger, HorizonClient
//! ├── state.rs         # Typed ledger access
//! ├── service.rs       # MarbleExchangeService
//! └── dispatch.rs      # Function routing and responses
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod dispatch;
pub mod domain;
pub mod ports;
pub mod service;
pub mod state;

// Re-exports
pub use adapters::{FileLedger, HorizonClient, HorizonConfig, InMemoryLedger, DEFAULT_HORIZON_URL};
pub use algorithms::{check_settlement, parse_payment_amount, verify_payment, PaymentMismatch};
pub use dispatch::{Function, Response, ResponseStatus};
pub use domain::{
    AuthAction, EntityKind, LedgerError, Marble, MarbleError, Offer, OfferStatus, Owner, OwnerRef,
    PaymentNetworkError, ValidationConfig, ValidationError, MAX_ARGUMENT_LEN,
};
pub use ports::{
    LedgerStore, MarbleExchangeApi, MockPaymentNetwork, PaymentNetwork, PaymentRecord,
    TransactionRecord,
};
pub use service::{ExchangeConfig, MarbleExchangeService, ServiceStats};
pub use state::EntityStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
