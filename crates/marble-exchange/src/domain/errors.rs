//! # Domain Errors
//!
//! Error taxonomy for the marble exchange.
//!
//! Every failure is reported synchronously to the caller; nothing is retried
//! internally and there is no transient/permanent distinction.

use std::fmt;
use thiserror::Error;

/// Kind of entity stored on the ledger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    /// A marble asset.
    Marble,
    /// A registered owner.
    Owner,
    /// A purchase offer.
    Offer,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Marble => write!(f, "Marble"),
            Self::Owner => write!(f, "Owner"),
            Self::Offer => write!(f, "Offer"),
        }
    }
}

/// Action a company claim is being checked for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthAction {
    /// Marble creation.
    Creation,
    /// Ownership transfer.
    Transfer,
    /// Listing a marble for sale.
    SaleListing,
    /// Accepting an offer.
    OfferAcceptance,
    /// Changing an owner record.
    OwnerChange,
    /// Marble deletion.
    Deletion,
}

impl fmt::Display for AuthAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Creation => write!(f, "creation"),
            Self::Transfer => write!(f, "transfers"),
            Self::SaleListing => write!(f, "sale listing"),
            Self::OfferAcceptance => write!(f, "offer acceptance"),
            Self::OwnerChange => write!(f, "owner changes"),
            Self::Deletion => write!(f, "deletion"),
        }
    }
}

/// Malformed caller arguments.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong number of arguments for the operation.
    #[error("Incorrect number of arguments. Expecting {expected}, got {got}")]
    ArgumentCount {
        /// Required count
        expected: usize,
        /// Supplied count
        got: usize,
    },

    /// Argument count outside an accepted range.
    #[error("Incorrect number of arguments. Expecting {min} to {max}, got {got}")]
    ArgumentRange {
        /// Minimum count
        min: usize,
        /// Maximum count
        max: usize,
        /// Supplied count
        got: usize,
    },

    /// Empty argument.
    #[error("Argument {index} must be a non-empty string")]
    Empty {
        /// Argument position
        index: usize,
    },

    /// Argument longer than the configured bound.
    #[error("Argument {index} must be <= {max} characters")]
    TooLong {
        /// Argument position
        index: usize,
        /// Maximum length in characters
        max: usize,
    },

    /// Argument is not a well-formed payment account id.
    #[error("Argument {index} must be a valid payment account id")]
    InvalidAccountId {
        /// Argument position
        index: usize,
    },
}

/// Failure talking to the external ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Backend rejected or failed the operation.
    #[error("Ledger backend error: {0}")]
    Backend(String),

    /// I/O failure in a persistent backend.
    #[error("Ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted ledger content could not be decoded.
    #[error("Ledger content corrupt: {0}")]
    Corrupt(String),
}

/// Failure querying the external payment network.
#[derive(Debug, Error)]
pub enum PaymentNetworkError {
    /// Request could not be sent or timed out.
    #[error("Payment network request failed: {0}")]
    Request(String),

    /// Non-2xx response carrying a problem document.
    #[error("Payment network returned {status}: {title} ({detail})")]
    Problem {
        /// HTTP status
        status: u16,
        /// Problem title
        title: String,
        /// Problem detail
        detail: String,
    },

    /// Response body could not be decoded.
    #[error("Unable to decode payment network response: {0}")]
    Decode(String),

    /// Transaction carries no payment operation.
    #[error("No payment found for transaction {0}")]
    MissingPayment(String),

    /// Payment amount is not a plain integer.
    #[error("Unable to parse amount in payment: {0}")]
    AmountParse(String),
}

/// Marble exchange error types.
#[derive(Debug, Error)]
pub enum MarbleError {
    /// Malformed arguments.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Integer argument did not parse.
    #[error("Argument {index} must be a numeric string, got '{value}'")]
    NonNumeric {
        /// Argument position
        index: usize,
        /// Supplied value
        value: String,
    },

    /// Integer argument parsed but is below zero.
    #[error("Argument {index} must be a non-negative integer, got '{value}'")]
    Negative {
        /// Argument position
        index: usize,
        /// Supplied value
        value: String,
    },

    /// Entity absent from the ledger.
    #[error("{kind} does not exist - {id}")]
    NotFound {
        /// Entity kind
        kind: EntityKind,
        /// Requested id
        id: String,
    },

    /// Entity already present.
    #[error("This {kind} already exists - {id}")]
    AlreadyExists {
        /// Entity kind
        kind: EntityKind,
        /// Conflicting id
        id: String,
    },

    /// Company claim does not match the recorded company.
    #[error("The company '{claimed}' cannot authorize {action} for '{recorded}'")]
    AuthorizationMismatch {
        /// Company supplied by the caller
        claimed: String,
        /// Company recorded on the entity
        recorded: String,
        /// Action being authorized
        action: AuthAction,
    },

    /// Payment network unreachable or response unusable.
    #[error("Unable to verify payment information: {0}")]
    Verification(#[from] PaymentNetworkError),

    /// Payment exists but does not settle the offer.
    #[error("Payment not done or mismatch in payment information for offer {offer_id}")]
    PaymentConditionsUnmet {
        /// Offer being settled
        offer_id: String,
    },

    /// Illegal offer status transition.
    #[error("Invalid offer transition: {from} -> {to}")]
    InvalidOfferTransition {
        /// Current status
        from: String,
        /// Attempted status
        to: String,
    },

    /// Underlying store failure, propagated verbatim.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Entity encoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Entry point name not recognised.
    #[error("Received unknown function invocation: {0}")]
    UnknownFunction(String),
}

impl MarbleError {
    /// Build a not-found error.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Build an already-exists error.
    pub fn already_exists(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    /// True for malformed-argument failures raised before any ledger access.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::NonNumeric { .. } | Self::Negative { .. }
        )
    }
}
