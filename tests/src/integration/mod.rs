//! Cross-module scenarios driven through the public exchange surface.

pub mod flows;
pub mod properties;

use marble_exchange::{ExchangeConfig, InMemoryLedger, MarbleExchangeService, MockPaymentNetwork};

/// Stellar account of the seller used across scenarios.
pub const SELLER_ACCOUNT: &str = "GDQNY3PBOJOKYZSRMK2S7LHHGWZIUISD4QORETLMXEWXBI7KFZZMKTL3";

/// Service over an in-memory ledger and a scripted payment network.
pub type TestExchange = MarbleExchangeService<InMemoryLedger, MockPaymentNetwork>;

/// Own every argument.
pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Fresh exchange with the given payments scripted.
pub fn exchange(network: MockPaymentNetwork) -> TestExchange {
    MarbleExchangeService::new(InMemoryLedger::new(), network, ExchangeConfig::default())
}
