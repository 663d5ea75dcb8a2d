//! # Invocation Dispatch
//!
//! Routes a named function and its string arguments to the matching
//! operation and wraps the outcome in a [`Response`].

use crate::domain::MarbleError;
use crate::ports::inbound::MarbleExchangeApi;
use crate::ports::outbound::{LedgerStore, PaymentNetwork};
use crate::service::MarbleExchangeService;

use std::fmt;
use std::str::FromStr;
use tracing::{error, instrument};
use uuid::Uuid;

/// Invocable functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    /// Register an owner.
    InitOwner,
    /// Create a marble.
    InitMarble,
    /// Transfer a marble.
    SetOwner,
    /// List a marble for sale.
    MarkForSale,
    /// Propose an offer.
    MakeOffer,
    /// Accept an offer.
    AcceptOffer,
    /// Verify payment and settle an offer.
    PaymentCompleteAgainstOffer,
    /// Disable an owner.
    DisableOwner,
    /// Delete a marble.
    DeleteMarble,
    /// Untyped write.
    Write,
    /// Untyped read.
    Read,
}

impl Function {
    /// All functions, in registration order.
    pub const ALL: [Function; 11] = [
        Function::InitOwner,
        Function::InitMarble,
        Function::SetOwner,
        Function::MarkForSale,
        Function::MakeOffer,
        Function::AcceptOffer,
        Function::PaymentCompleteAgainstOffer,
        Function::DisableOwner,
        Function::DeleteMarble,
        Function::Write,
        Function::Read,
    ];

    /// Wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Function::InitOwner => "init_owner",
            Function::InitMarble => "init_marble",
            Function::SetOwner => "set_owner",
            Function::MarkForSale => "mark_for_sale",
            Function::MakeOffer => "make_offer",
            Function::AcceptOffer => "accept_offer",
            Function::PaymentCompleteAgainstOffer => "payment_complete_against_offer",
            Function::DisableOwner => "disable_owner",
            Function::DeleteMarble => "delete_marble",
            Function::Write => "write",
            Function::Read => "read",
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Function {
    type Err = MarbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Function::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s)
            .ok_or_else(|| MarbleError::UnknownFunction(s.to_string()))
    }
}

/// Outcome status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseStatus {
    /// Operation succeeded.
    Ok,
    /// Operation failed.
    Error,
}

/// Invocation response.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Response {
    /// Outcome.
    pub status: ResponseStatus,
    /// Error message; empty on success.
    pub message: String,
    /// Returned bytes; empty unless the function reads.
    pub payload: Vec<u8>,
}

impl Response {
    /// Successful response carrying `payload`.
    pub fn success(payload: Vec<u8>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: String::new(),
            payload,
        }
    }

    /// Failed response carrying `message`.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: message.into(),
            payload: Vec::new(),
        }
    }

    /// True on success.
    pub fn is_ok(&self) -> bool {
        self.status == ResponseStatus::Ok
    }
}

impl<L: LedgerStore, P: PaymentNetwork> MarbleExchangeService<L, P> {
    /// Invoke `function` by name under a fresh correlation id.
    pub async fn invoke(&self, function: &str, args: &[String]) -> Response {
        self.invoke_correlated(function, args, Uuid::new_v4()).await
    }

    /// Invoke `function` by name, tagging its logs with `correlation_id`.
    #[instrument(skip(self, args), fields(correlation_id = %correlation_id))]
    pub async fn invoke_correlated(
        &self,
        function: &str,
        args: &[String],
        correlation_id: Uuid,
    ) -> Response {
        let result = match function.parse::<Function>() {
            Ok(f) => self.route(f, args).await,
            Err(e) => Err(e),
        };
        self.record_outcome(&result);

        match result {
            Ok(payload) => Response::success(payload),
            Err(e) => {
                error!("[marbles] {} failed: {}", function, e);
                Response::error(e.to_string())
            }
        }
    }

    /// Run a parsed function.
    pub async fn route(&self, function: Function, args: &[String]) -> Result<Vec<u8>, MarbleError> {
        match function {
            Function::InitOwner => self.register_owner(args)?,
            Function::InitMarble => self.create_marble(args)?,
            Function::SetOwner => self.transfer_ownership(args)?,
            Function::MarkForSale => self.list_for_sale(args)?,
            Function::MakeOffer => self.propose_offer(args)?,
            Function::AcceptOffer => self.accept_offer(args)?,
            Function::PaymentCompleteAgainstOffer => self.confirm_payment(args).await?,
            Function::DisableOwner => self.disable_owner(args)?,
            Function::DeleteMarble => self.delete_marble(args)?,
            Function::Write => self.write(args)?,
            Function::Read => return self.read(args),
        }
        Ok(Vec::new())
    }
}
