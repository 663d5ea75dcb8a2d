//! # Domain Value Objects
//!
//! Immutable value types shared by the ledger entities.

use serde::{Deserialize, Serialize};
use std::fmt;

/// `docType` discriminator for marble records.
pub const DOC_TYPE_MARBLE: &str = "marble";
/// `docType` discriminator for owner records.
pub const DOC_TYPE_OWNER: &str = "marble_owner";
/// `docType` discriminator for offer records.
pub const DOC_TYPE_OFFER: &str = "marble_offer";

/// Offer negotiation state.
///
/// Only `Proposed -> Accepted` is defined. Accepting an already accepted
/// offer is permitted and leaves it `Accepted`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferStatus {
    /// Buyer has proposed a price.
    #[default]
    Proposed,
    /// Seller has accepted the proposal.
    Accepted,
}

impl OfferStatus {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: OfferStatus) -> bool {
        matches!(
            (self, next),
            (Self::Proposed, Self::Accepted) | (Self::Accepted, Self::Accepted)
        )
    }
}

impl fmt::Display for OfferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proposed => write!(f, "PROPOSED"),
            Self::Accepted => write!(f, "ACCEPTED"),
        }
    }
}

/// Denormalized owner snapshot embedded in a marble.
///
/// A copy, not a reference: it is refreshed only when the marble changes
/// hands and may drift from the owner record in between.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerRef {
    /// Owner id (ledger key of the owner record).
    pub id: String,
    /// Owner username at snapshot time.
    pub username: String,
    /// Owner company at snapshot time.
    pub company: String,
}
