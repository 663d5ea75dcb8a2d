//! # Outbound Ports
//!
//! Traits for the external collaborators: the key-value ledger that holds all
//! entity state, and the payment network queried during settlement.

use crate::domain::{LedgerError, PaymentNetworkError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// LEDGER
// =============================================================================

/// Key-value ledger - outbound port.
///
/// Reads never fail on a missing key: an absent key yields an empty vector.
/// Writes are applied individually; grouping them into a transaction is the
/// backend's business.
pub trait LedgerStore: Send + Sync {
    /// Read the raw value at `key`.
    fn get(&self, key: &str) -> Result<Vec<u8>, LedgerError>;

    /// Write the raw value at `key`.
    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), LedgerError>;

    /// Remove `key`.
    fn delete(&self, key: &str) -> Result<(), LedgerError>;
}

// =============================================================================
// PAYMENT NETWORK
// =============================================================================

/// Payment operation as reported by the payment network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentRecord {
    /// Paying account.
    pub from: String,
    /// Receiving account.
    pub to: String,
    /// Amount as a decimal string.
    pub amount: String,
    /// Asset type (`native` for lumens).
    pub asset_type: String,
}

/// Transaction metadata as reported by the payment network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionRecord {
    /// Transaction hash.
    pub hash: String,
    /// Memo kind (`text`, `id`, `hash`, `return`, `none`).
    pub memo_type: String,
    /// Memo content.
    pub memo: String,
}

/// Payment network query interface - outbound port.
#[async_trait]
pub trait PaymentNetwork: Send + Sync {
    /// Most recent payment carried by the transaction.
    async fn latest_payment(&self, tx_id: &str) -> Result<PaymentRecord, PaymentNetworkError>;

    /// Transaction metadata including the memo.
    async fn transaction(&self, tx_id: &str) -> Result<TransactionRecord, PaymentNetworkError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock payment network for testing.
#[derive(Clone, Default)]
pub struct MockPaymentNetwork {
    /// Payments keyed by transaction id.
    pub payments: HashMap<String, PaymentRecord>,
    /// Transactions keyed by transaction id.
    pub transactions: HashMap<String, TransactionRecord>,
    /// Should fail?
    pub should_fail: bool,
}

impl MockPaymentNetwork {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a native payment of `amount` to `to` with a text memo.
    pub fn with_payment(mut self, tx_id: &str, to: &str, amount: &str, memo: &str) -> Self {
        self.payments.insert(
            tx_id.to_string(),
            PaymentRecord {
                from: "GBUYER".to_string(),
                to: to.to_string(),
                amount: amount.to_string(),
                asset_type: "native".to_string(),
            },
        );
        self.transactions.insert(
            tx_id.to_string(),
            TransactionRecord {
                hash: tx_id.to_string(),
                memo_type: "text".to_string(),
                memo: memo.to_string(),
            },
        );
        self
    }
}

#[async_trait]
impl PaymentNetwork for MockPaymentNetwork {
    async fn latest_payment(&self, tx_id: &str) -> Result<PaymentRecord, PaymentNetworkError> {
        if self.should_fail {
            return Err(PaymentNetworkError::Request("Mock failure".to_string()));
        }
        self.payments
            .get(tx_id)
            .cloned()
            .ok_or_else(|| PaymentNetworkError::MissingPayment(tx_id.to_string()))
    }

    async fn transaction(&self, tx_id: &str) -> Result<TransactionRecord, PaymentNetworkError> {
        if self.should_fail {
            return Err(PaymentNetworkError::Request("Mock failure".to_string()));
        }
        self.transactions
            .get(tx_id)
            .cloned()
            .ok_or_else(|| PaymentNetworkError::Problem {
                status: 404,
                title: "Resource Missing".to_string(),
                detail: format!("transaction {} not found", tx_id),
            })
    }
}
