//! # Domain Entities
//!
//! The three record kinds persisted on the ledger: owners, marbles and offers.
//! Records reference each other by embedded snapshot, never by live pointer.

use super::errors::MarbleError;
use super::value_objects::{OfferStatus, OwnerRef, DOC_TYPE_MARBLE, DOC_TYPE_OFFER, DOC_TYPE_OWNER};
use serde::{Deserialize, Serialize};

/// A registered participant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Owner {
    /// Record discriminator.
    pub doc_type: String,
    /// Stable identifier, also the ledger key.
    pub id: String,
    /// Lower-cased username. Non-empty for every stored owner.
    pub username: String,
    /// Authorization domain.
    pub company: String,
    /// Account on the external payment network that receives settlements.
    pub account_id: String,
    /// Cleared by the disable operation.
    pub enabled: bool,
}

impl Owner {
    /// Create a new enabled owner.
    pub fn new(
        id: impl Into<String>,
        username: &str,
        company: impl Into<String>,
        account_id: impl Into<String>,
    ) -> Self {
        Self {
            doc_type: DOC_TYPE_OWNER.to_string(),
            id: id.into(),
            username: username.to_lowercase(),
            company: company.into(),
            account_id: account_id.into(),
            enabled: true,
        }
    }

    /// Snapshot for embedding in a marble.
    pub fn snapshot(&self) -> OwnerRef {
        OwnerRef {
            id: self.id.clone(),
            username: self.username.clone(),
            company: self.company.clone(),
        }
    }
}

/// A transferable asset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Marble {
    /// Record discriminator.
    pub doc_type: String,
    /// Stable identifier, also the ledger key.
    pub id: String,
    /// Lower-cased color.
    pub color: String,
    /// Size.
    pub size: u64,
    /// Owner snapshot taken at creation or last transfer.
    pub owner: OwnerRef,
    /// Listed for sale.
    pub is_for_sale: bool,
    /// Minimum asking price while listed.
    pub min_price: u64,
}

impl Marble {
    /// Create a new marble held by `owner`.
    pub fn new(id: impl Into<String>, color: &str, size: u64, owner: &Owner) -> Self {
        Self {
            doc_type: DOC_TYPE_MARBLE.to_string(),
            id: id.into(),
            color: color.to_lowercase(),
            size,
            owner: owner.snapshot(),
            is_for_sale: false,
            min_price: 0,
        }
    }

    /// Rewrite the owner snapshot. Every other field is left untouched.
    pub fn transfer_to(&mut self, new_owner: &Owner) {
        self.owner = new_owner.snapshot();
    }

    /// Mark for sale at a minimum price.
    pub fn list_for_sale(&mut self, min_price: u64) {
        self.is_for_sale = true;
        self.min_price = min_price;
    }
}

/// A proposed purchase of a marble.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Offer {
    /// Record discriminator.
    pub doc_type: String,
    /// Ledger key. Also the memo a settling payment must carry.
    pub id: String,
    /// Buyer record at proposal time.
    pub buyer: Owner,
    /// Marble record at proposal time.
    pub marble: Marble,
    /// Proposed price.
    pub offer_price: u64,
    /// Negotiation state.
    pub status: OfferStatus,
}

impl Offer {
    /// Create a new proposed offer from buyer and marble snapshots.
    pub fn propose(id: impl Into<String>, buyer: Owner, marble: Marble, offer_price: u64) -> Self {
        Self {
            doc_type: DOC_TYPE_OFFER.to_string(),
            id: id.into(),
            buyer,
            marble,
            offer_price,
            status: OfferStatus::Proposed,
        }
    }

    /// Transition to new status.
    pub fn transition_to(&mut self, next: OfferStatus) -> Result<(), MarbleError> {
        if !self.status.can_transition_to(next) {
            return Err(MarbleError::InvalidOfferTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        Ok(())
    }

    /// Seller acceptance.
    pub fn accept(&mut self) -> Result<(), MarbleError> {
        self.transition_to(OfferStatus::Accepted)
    }

    /// Company of the marble owner at proposal time.
    pub fn seller_company(&self) -> &str {
        &self.marble.owner.company
    }
}
