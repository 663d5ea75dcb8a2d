//! # Domain Invariants
//!
//! Authorization and existence rules enforced by every operation.

use super::entities::{Marble, Offer, Owner};
use super::errors::{AuthAction, EntityKind, MarbleError};

/// Invariant: company authorization.
///
/// The claimed company must textually equal the company recorded on the
/// entity. The claim is caller-asserted and not tied to any verified
/// identity; only the comparison is enforced here.
pub fn invariant_company_authorized(
    claimed: &str,
    recorded: &str,
    action: AuthAction,
) -> Result<(), MarbleError> {
    if claimed != recorded {
        return Err(MarbleError::AuthorizationMismatch {
            claimed: claimed.to_string(),
            recorded: recorded.to_string(),
            action,
        });
    }
    Ok(())
}

/// Invariant: an owner record exists at the fetched key.
///
/// A non-empty username is the existence signal; the stored id is not compared.
pub fn invariant_owner_present(owner: &Owner) -> bool {
    !owner.username.is_empty()
}

/// Invariant: a marble record exists for `id`.
pub fn invariant_marble_present(marble: &Marble, id: &str) -> bool {
    !marble.id.is_empty() && marble.id == id
}

/// Invariant: an offer record exists for `id`.
pub fn invariant_offer_present(offer: &Offer, id: &str) -> bool {
    !offer.id.is_empty() && offer.id == id
}

/// Invariant: no live entity of `kind` already occupies `id`.
pub fn invariant_unique<T>(existing: Option<T>, kind: EntityKind, id: &str) -> Result<(), MarbleError> {
    match existing {
        Some(_) => Err(MarbleError::already_exists(kind, id)),
        None => Ok(()),
    }
}
