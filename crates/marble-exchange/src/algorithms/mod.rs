//! # Algorithms Module
//!
//! Settlement verification against the external payment network.

pub mod payment;

pub use payment::{
    check_settlement, parse_payment_amount, verify_payment, PaymentMismatch, MEMO_TYPE_TEXT,
};
