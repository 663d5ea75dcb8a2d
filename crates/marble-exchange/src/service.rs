//! # Marble Exchange Service
//!
//! The asset/ownership state machine. Each operation validates its raw
//! string arguments, loads the entities it needs fresh from the ledger,
//! enforces authorization, optionally consults the payment network, and
//! writes the result back.
//!
//! ## Authorization
//!
//! Every company argument is a caller-asserted label compared textually to
//! the company recorded on the entity. Nothing here binds that label to a
//! verified identity.
//!
//! ## Settlement
//!
//! `confirm_payment` verifies the payment and then runs the ownership
//! transfer as a separate write. The offer itself is never updated, and a
//! failed transfer after a successful verification leaves no marker.

use crate::adapters::HorizonConfig;
use crate::algorithms::verify_payment;
use crate::domain::{
    expect_argument_range, expect_arguments, invariant_company_authorized, invariant_unique,
    parse_integer, sanitize_arguments, validate_account_id, AuthAction, EntityKind, Marble,
    MarbleError, Offer, Owner, ValidationConfig,
};
use crate::ports::inbound::MarbleExchangeApi;
use crate::ports::outbound::{LedgerStore, PaymentNetwork};
use crate::state::EntityStore;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Exchange configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Argument validation.
    pub validation: ValidationConfig,
    /// Payment network client.
    pub horizon: HorizonConfig,
}

/// Statistics for the exchange service, counted at the entry point.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Total invocations.
    pub invocations: u64,
    /// Invocations that succeeded.
    pub successes: u64,
    /// Invocations that failed.
    pub failures: u64,
    /// Failures caused by malformed arguments.
    pub validation_failures: u64,
    /// Offers settled by a verified payment.
    pub settlements: u64,
}

/// The main marble exchange service.
pub struct MarbleExchangeService<L: LedgerStore, P: PaymentNetwork> {
    /// Service configuration.
    config: ExchangeConfig,
    /// Typed ledger access.
    store: EntityStore<L>,
    /// Payment network adapter.
    payments: Arc<P>,
    /// Service statistics.
    stats: RwLock<ServiceStats>,
}

impl<L: LedgerStore, P: PaymentNetwork> MarbleExchangeService<L, P> {
    /// Create a new service.
    pub fn new(ledger: L, payments: P, config: ExchangeConfig) -> Self {
        Self::with_shared(Arc::new(ledger), Arc::new(payments), config)
    }

    /// Create a service over adapters the caller keeps handles to.
    pub fn with_shared(ledger: Arc<L>, payments: Arc<P>, config: ExchangeConfig) -> Self {
        Self {
            config,
            store: EntityStore::new(ledger),
            payments,
            stats: RwLock::new(ServiceStats::default()),
        }
    }

    /// Service configuration.
    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Underlying ledger.
    pub fn ledger(&self) -> &L {
        self.store.ledger()
    }

    /// Get current service statistics.
    pub fn stats(&self) -> ServiceStats {
        self.stats.read().clone()
    }

    pub(crate) fn record_outcome(&self, result: &Result<Vec<u8>, MarbleError>) {
        let mut stats = self.stats.write();
        stats.invocations += 1;
        match result {
            Ok(_) => stats.successes += 1,
            Err(e) => {
                stats.failures += 1;
                if e.is_validation() {
                    stats.validation_failures += 1;
                }
            }
        }
    }

    fn sanitize(&self, args: &[String]) -> Result<(), MarbleError> {
        sanitize_arguments(args, self.config.validation.max_argument_len)?;
        Ok(())
    }

    /// Rewrite a marble's owner snapshot to `new_owner_id`.
    fn transfer_internal(
        &self,
        marble_id: &str,
        new_owner_id: &str,
        auth_company: &str,
    ) -> Result<Marble, MarbleError> {
        let new_owner = self.store.require_owner(new_owner_id)?;
        let mut marble = self.store.require_marble(marble_id)?;

        invariant_company_authorized(auth_company, &marble.owner.company, AuthAction::Transfer)?;

        marble.transfer_to(&new_owner);
        self.store.put(&marble.id, &marble)?;

        info!(
            marble_id = marble_id,
            new_owner = new_owner_id,
            company = %new_owner.company,
            "[marbles] Ownership transferred"
        );
        Ok(marble)
    }
}

#[async_trait]
impl<L: LedgerStore, P: PaymentNetwork> MarbleExchangeApi for MarbleExchangeService<L, P> {
    fn register_owner(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting register_owner");
        expect_argument_range(args, 3, 4)?;
        self.sanitize(&args[..3])?;
        if let Some(account_id) = args.get(3) {
            validate_account_id(account_id, 3)?;
        }

        let owner = Owner::new(
            &args[0],
            &args[1],
            &args[2],
            args.get(3).cloned().unwrap_or_default(),
        );

        invariant_unique(self.store.fetch_owner(&owner.id), EntityKind::Owner, &owner.id)?;
        self.store.put(&owner.id, &owner)?;

        info!(
            owner_id = %owner.id,
            username = %owner.username,
            company = %owner.company,
            "[marbles] Owner registered"
        );
        Ok(())
    }

    fn create_marble(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting create_marble");
        expect_arguments(args, 5)?;
        self.sanitize(args)?;

        let id = &args[0];
        let owner_id = &args[3];
        let auth_company = &args[4];
        let size = parse_integer(&args[2], 2)?;

        let owner = self.store.require_owner(owner_id)?;
        invariant_company_authorized(auth_company, &owner.company, AuthAction::Creation)?;
        invariant_unique(self.store.fetch_marble(id), EntityKind::Marble, id)?;

        let marble = Marble::new(id, &args[1], size, &owner);
        self.store.put(id, &marble)?;

        info!(
            marble_id = %id,
            owner_id = %owner_id,
            color = %marble.color,
            size = size,
            "[marbles] Marble created"
        );
        Ok(())
    }

    fn transfer_ownership(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting transfer_ownership");
        expect_arguments(args, 3)?;
        self.sanitize(args)?;

        self.transfer_internal(&args[0], &args[1], &args[2])?;
        Ok(())
    }

    fn list_for_sale(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting list_for_sale");
        expect_arguments(args, 3)?;
        self.sanitize(args)?;

        let marble_id = &args[0];
        let auth_company = &args[1];
        let min_price = parse_integer(&args[2], 2)?;

        let mut marble = self.store.require_marble(marble_id)?;
        invariant_company_authorized(auth_company, &marble.owner.company, AuthAction::SaleListing)?;

        marble.list_for_sale(min_price);
        self.store.put(marble_id, &marble)?;

        info!(
            marble_id = %marble_id,
            min_price = min_price,
            "[marbles] Marble listed for sale"
        );
        Ok(())
    }

    fn propose_offer(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting propose_offer");
        expect_arguments(args, 5)?;
        self.sanitize(args)?;

        let marble_id = &args[0];
        let buyer_id = &args[1];
        let offer_price = parse_integer(&args[3], 3)?;
        let offer_id = &args[4];
        debug!(claimed_company = %args[2], "[marbles] Offer company claim is not checked");

        let buyer = self.store.require_owner(buyer_id)?;
        let marble = self.store.require_marble(marble_id)?;

        let offer = Offer::propose(offer_id, buyer, marble, offer_price);
        self.store.put(offer_id, &offer)?;

        info!(
            offer_id = %offer_id,
            marble_id = %marble_id,
            buyer_id = %buyer_id,
            offer_price = offer_price,
            "[marbles] Offer proposed"
        );
        Ok(())
    }

    fn accept_offer(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting accept_offer");
        expect_arguments(args, 2)?;
        self.sanitize(args)?;

        let offer_id = &args[0];
        let auth_company = &args[1];

        let mut offer = self.store.require_offer(offer_id)?;
        invariant_company_authorized(
            auth_company,
            offer.seller_company(),
            AuthAction::OfferAcceptance,
        )?;

        offer.accept()?;
        self.store.put(offer_id, &offer)?;

        info!(offer_id = %offer_id, "[marbles] Offer accepted");
        Ok(())
    }

    async fn confirm_payment(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting confirm_payment");
        expect_arguments(args, 2)?;
        self.sanitize(args)?;

        let offer_id = &args[0];
        let tx_id = &args[1];

        let offer = self.store.require_offer(offer_id)?;
        let current_owner = self.store.require_owner(&offer.marble.owner.id)?;

        let settled =
            verify_payment(self.payments.as_ref(), &offer, &current_owner.account_id, tx_id)
                .await?;
        if !settled {
            return Err(MarbleError::PaymentConditionsUnmet {
                offer_id: offer_id.clone(),
            });
        }

        if let Err(e) =
            self.transfer_internal(&offer.marble.id, &offer.buyer.id, &current_owner.company)
        {
            warn!(
                offer_id = %offer_id,
                tx_id = %tx_id,
                error = %e,
                "[marbles] Payment verified but transfer failed"
            );
            return Err(e);
        }

        self.stats.write().settlements += 1;
        info!(
            offer_id = %offer_id,
            tx_id = %tx_id,
            buyer_id = %offer.buyer.id,
            "[marbles] Offer settled"
        );
        Ok(())
    }

    fn disable_owner(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting disable_owner");
        expect_arguments(args, 2)?;
        self.sanitize(args)?;

        let owner_id = &args[0];
        let auth_company = &args[1];

        let mut owner = self.store.require_owner(owner_id)?;
        invariant_company_authorized(auth_company, &owner.company, AuthAction::OwnerChange)?;

        owner.enabled = false;
        self.store.put(owner_id, &owner)?;

        info!(owner_id = %owner_id, "[marbles] Owner disabled");
        Ok(())
    }

    fn delete_marble(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting delete_marble");
        expect_arguments(args, 2)?;
        self.sanitize(args)?;

        let marble_id = &args[0];
        let auth_company = &args[1];

        let marble = self.store.require_marble(marble_id)?;
        invariant_company_authorized(auth_company, &marble.owner.company, AuthAction::Deletion)?;

        self.store.delete(marble_id)?;

        info!(marble_id = %marble_id, "[marbles] Marble deleted");
        Ok(())
    }

    fn write(&self, args: &[String]) -> Result<(), MarbleError> {
        debug!("[marbles] starting write");
        expect_arguments(args, 2)?;
        self.sanitize(args)?;

        self.store.put_raw(&args[0], args[1].as_bytes().to_vec())?;
        Ok(())
    }

    fn read(&self, args: &[String]) -> Result<Vec<u8>, MarbleError> {
        expect_arguments(args, 1)?;
        self.sanitize(args)?;

        self.store.read_raw(&args[0])
    }

    fn marble(&self, id: &str) -> Option<Marble> {
        self.store.fetch_marble(id)
    }

    fn owner(&self, id: &str) -> Option<Owner> {
        self.store.fetch_owner(id)
    }

    fn offer(&self, id: &str) -> Option<Offer> {
        self.store.fetch_offer(id)
    }
}
