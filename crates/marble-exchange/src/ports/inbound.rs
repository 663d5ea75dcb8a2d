//! # Inbound Ports
//!
//! API trait defining what the marble exchange can do.
//!
//! Every operation takes its arguments as an ordered list of strings, exactly
//! as the invoking environment supplies them, and validates them before
//! touching the ledger. Company arguments are caller-asserted claims.

use crate::domain::{Marble, MarbleError, Offer, Owner};
use async_trait::async_trait;

/// Marble exchange API - inbound port.
#[async_trait]
pub trait MarbleExchangeApi: Send + Sync {
    /// `[owner_id, username, company]` or `[owner_id, username, company, account_id]`.
    fn register_owner(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[marble_id, color, size, owner_id, auth_company]`.
    fn create_marble(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[marble_id, new_owner_id, auth_company]`.
    fn transfer_ownership(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[marble_id, auth_company, min_price]`.
    fn list_for_sale(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[marble_id, buyer_id, auth_company, price, offer_id]`.
    fn propose_offer(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[offer_id, auth_company]`.
    fn accept_offer(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[offer_id, external_tx_id]`. Verifies the payment, then transfers the
    /// marble to the buyer.
    async fn confirm_payment(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[owner_id, auth_company]`.
    fn disable_owner(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[marble_id, auth_company]`.
    fn delete_marble(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[key, value]`. Untyped write.
    fn write(&self, args: &[String]) -> Result<(), MarbleError>;

    /// `[key]`. Untyped read; a missing key yields an empty value.
    fn read(&self, args: &[String]) -> Result<Vec<u8>, MarbleError>;

    /// Get marble by id.
    fn marble(&self, id: &str) -> Option<Marble>;

    /// Get owner by id.
    fn owner(&self, id: &str) -> Option<Owner>;

    /// Get offer by id.
    fn offer(&self, id: &str) -> Option<Offer>;
}
