//! # Input Validation
//!
//! Argument checks applied before any ledger access, so malformed input
//! never reaches a read or write.

use super::errors::{MarbleError, ValidationError};
use serde::{Deserialize, Serialize};

/// Default maximum argument length in characters.
pub const MAX_ARGUMENT_LEN: usize = 32;

/// Length of a Stellar account id (StrKey-encoded ed25519 public key).
pub const ACCOUNT_ID_LEN: usize = 56;

/// Validation configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Longest accepted argument, in characters.
    pub max_argument_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_argument_len: MAX_ARGUMENT_LEN,
        }
    }
}

/// Fail on the first argument that is empty or longer than `max_len` characters.
pub fn sanitize_arguments<S: AsRef<str>>(args: &[S], max_len: usize) -> Result<(), ValidationError> {
    for (index, value) in args.iter().enumerate() {
        let value = value.as_ref();
        if value.is_empty() {
            return Err(ValidationError::Empty { index });
        }
        if value.chars().count() > max_len {
            return Err(ValidationError::TooLong {
                index,
                max: max_len,
            });
        }
    }
    Ok(())
}

/// Require exactly `expected` arguments.
pub fn expect_arguments<S>(args: &[S], expected: usize) -> Result<(), ValidationError> {
    if args.len() != expected {
        return Err(ValidationError::ArgumentCount {
            expected,
            got: args.len(),
        });
    }
    Ok(())
}

/// Require between `min` and `max` arguments inclusive.
pub fn expect_argument_range<S>(args: &[S], min: usize, max: usize) -> Result<(), ValidationError> {
    if args.len() < min || args.len() > max {
        return Err(ValidationError::ArgumentRange {
            min,
            max,
            got: args.len(),
        });
    }
    Ok(())
}

/// Parse a non-negative integer argument.
///
/// A well-formed negative integer is reported separately from text that is
/// not an integer at all.
pub fn parse_integer(value: &str, index: usize) -> Result<u64, MarbleError> {
    if let Ok(n) = value.parse::<u64>() {
        return Ok(n);
    }
    if value.parse::<i64>().is_ok() {
        return Err(MarbleError::Negative {
            index,
            value: value.to_string(),
        });
    }
    Err(MarbleError::NonNumeric {
        index,
        value: value.to_string(),
    })
}

/// Check the shape of a Stellar account id: 56 base32 characters starting with `G`.
pub fn validate_account_id(value: &str, index: usize) -> Result<(), ValidationError> {
    let well_formed = value.len() == ACCOUNT_ID_LEN
        && value.starts_with('G')
        && value
            .bytes()
            .all(|b| b.is_ascii_uppercase() || (b'2'..=b'7').contains(&b));
    if !well_formed {
        return Err(ValidationError::InvalidAccountId { index });
    }
    Ok(())
}
