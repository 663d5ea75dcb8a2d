//! # Payment Verification
//!
//! Decides whether a transaction on the payment network settles an offer.
//!
//! The memo is the only link between an off-ledger payment and the offer it
//! pays for: the buyer must put the offer id in a text memo.

use crate::domain::{Offer, PaymentNetworkError};
use crate::ports::outbound::{PaymentNetwork, TransactionRecord};
use std::fmt;
use tracing::{debug, info};

/// Memo type required on a settling transaction.
pub const MEMO_TYPE_TEXT: &str = "text";

/// First settlement condition that a payment failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaymentMismatch {
    /// Paid to a different account.
    Recipient {
        /// Account that should have been paid
        expected: String,
        /// Account that was paid
        actual: String,
    },
    /// Paid a different amount.
    Amount {
        /// Offer price
        expected: u64,
        /// Amount paid
        actual: u64,
    },
    /// Memo is not a text memo.
    MemoType(String),
    /// Memo does not name the offer.
    Memo {
        /// Offer id
        expected: String,
        /// Memo content
        actual: String,
    },
}

impl fmt::Display for PaymentMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recipient { expected, actual } => {
                write!(f, "recipient {} != {}", actual, expected)
            }
            Self::Amount { expected, actual } => write!(f, "amount {} != {}", actual, expected),
            Self::MemoType(memo_type) => write!(f, "memo type '{}' is not text", memo_type),
            Self::Memo { expected, actual } => write!(f, "memo '{}' != '{}'", actual, expected),
        }
    }
}

/// Parse a payment amount. Only plain integer strings are accepted.
pub fn parse_payment_amount(amount: &str) -> Result<u64, PaymentNetworkError> {
    amount
        .parse::<u64>()
        .map_err(|_| PaymentNetworkError::AmountParse(amount.to_string()))
}

/// Check a payment of `amount` to `paid_to`, and its transaction, against an
/// offer.
///
/// Returns `None` when every condition holds, otherwise the first one that
/// failed.
pub fn check_settlement(
    offer: &Offer,
    recipient_account: &str,
    paid_to: &str,
    amount: u64,
    transaction: &TransactionRecord,
) -> Option<PaymentMismatch> {
    if paid_to != recipient_account {
        return Some(PaymentMismatch::Recipient {
            expected: recipient_account.to_string(),
            actual: paid_to.to_string(),
        });
    }
    if amount != offer.offer_price {
        return Some(PaymentMismatch::Amount {
            expected: offer.offer_price,
            actual: amount,
        });
    }
    if transaction.memo_type != MEMO_TYPE_TEXT {
        return Some(PaymentMismatch::MemoType(transaction.memo_type.clone()));
    }
    if transaction.memo != offer.id {
        return Some(PaymentMismatch::Memo {
            expected: offer.id.clone(),
            actual: transaction.memo.clone(),
        });
    }
    None
}

/// Verify that `tx_id` pays `offer` to `recipient_account`.
///
/// Performs two independent lookups: the latest payment of the transaction,
/// then the transaction itself for its memo. Lookup and parse failures
/// propagate as errors; unmet conditions return `Ok(false)`.
pub async fn verify_payment<P: PaymentNetwork + ?Sized>(
    network: &P,
    offer: &Offer,
    recipient_account: &str,
    tx_id: &str,
) -> Result<bool, PaymentNetworkError> {
    debug!("[marbles] Fetching payment for transaction {}", tx_id);
    let payment = network.latest_payment(tx_id).await?;
    let amount = parse_payment_amount(&payment.amount)?;

    debug!("[marbles] Fetching transaction {}", tx_id);
    let transaction = network.transaction(tx_id).await?;

    match check_settlement(offer, recipient_account, &payment.to, amount, &transaction) {
        None => {
            info!(
                offer_id = %offer.id,
                tx_id = tx_id,
                amount = amount,
                "[marbles] Payment settles offer"
            );
            Ok(true)
        }
        Some(mismatch) => {
            info!(
                offer_id = %offer.id,
                tx_id = tx_id,
                reason = %mismatch,
                "[marbles] Payment does not settle offer"
            );
            Ok(false)
        }
    }
}
