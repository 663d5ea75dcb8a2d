//! # Integration Test Flows
//!
//! Drives the exchange through `invoke`, the same surface the node uses:
//!
//! 1. **Registration**: owners and marbles, duplicate and authorization checks
//! 2. **Trading**: listing, proposing, and accepting offers
//! 3. **Settlement**: payment verification followed by the ownership transfer
//! 4. **Adapters**: a file ledger and a Horizon server stub wired together

#[cfg(test)]
mod tests {
    use super::super::{args, exchange, TestExchange, SELLER_ACCOUNT};
    use marble_exchange::{
        ExchangeConfig, FileLedger, HorizonClient, HorizonConfig, MarbleExchangeApi,
        MarbleExchangeService, MockPaymentNetwork, OfferStatus, ResponseStatus,
    };
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Two owners, m1 held by o1, listed at 100, offer1 from o2 at 150.
    async fn market(network: MockPaymentNetwork) -> TestExchange {
        let svc = exchange(network);
        for (function, a) in [
            ("init_owner", args(&["o1", "bob", "Acme", SELLER_ACCOUNT])),
            ("init_owner", args(&["o2", "alice", "Globex"])),
            ("init_marble", args(&["m1", "blue", "10", "o1", "Acme"])),
            ("mark_for_sale", args(&["m1", "Acme", "100"])),
            ("make_offer", args(&["m1", "o2", "Globex", "150", "offer1"])),
        ] {
            let response = svc.invoke(function, &a).await;
            assert!(response.is_ok(), "{} failed: {}", function, response.message);
        }
        svc
    }

    // =============================================================================
    // REGISTRATION
    // =============================================================================

    #[tokio::test]
    async fn test_duplicate_marble_rejected() {
        let svc = exchange(MockPaymentNetwork::new());
        assert!(svc.invoke("init_owner", &args(&["o1", "bob", "Acme"])).await.is_ok());
        assert!(svc
            .invoke("init_marble", &args(&["m1", "blue", "10", "o1", "Acme"]))
            .await
            .is_ok());

        let response = svc
            .invoke("init_marble", &args(&["m1", "red", "5", "o1", "Acme"]))
            .await;
        assert_eq!(response.status, ResponseStatus::Error);
        assert_eq!(response.message, "This Marble already exists - m1");
        assert_eq!(svc.marble("m1").unwrap().color, "blue");
    }

    #[tokio::test]
    async fn test_duplicate_owner_rejected() {
        let svc = exchange(MockPaymentNetwork::new());
        assert!(svc.invoke("init_owner", &args(&["o1", "bob", "Acme"])).await.is_ok());
        let response = svc.invoke("init_owner", &args(&["o1", "eve", "Evil"])).await;
        assert!(!response.is_ok());
        assert_eq!(svc.owner("o1").unwrap().company, "Acme");
    }

    #[tokio::test]
    async fn test_every_company_mismatch_is_rejected() {
        let svc = market(MockPaymentNetwork::new()).await;
        for (function, a) in [
            ("init_marble", args(&["m2", "red", "5", "o1", "Globex"])),
            ("set_owner", args(&["m1", "o2", "Globex"])),
            ("mark_for_sale", args(&["m1", "Globex", "1"])),
            ("accept_offer", args(&["offer1", "Globex"])),
            ("disable_owner", args(&["o1", "Globex"])),
            ("delete_marble", args(&["m1", "Globex"])),
        ] {
            let response = svc.invoke(function, &a).await;
            assert!(
                response.message.contains("cannot authorize"),
                "{}: {}",
                function,
                response.message
            );
        }

        let marble = svc.marble("m1").unwrap();
        assert_eq!(marble.owner.id, "o1");
        assert_eq!(marble.min_price, 100);
        assert!(svc.owner("o1").unwrap().enabled);
        assert_eq!(svc.offer("offer1").unwrap().status, OfferStatus::Proposed);
    }

    // =============================================================================
    // TRADING
    // =============================================================================

    #[tokio::test]
    async fn test_offer_is_stored_under_its_id() {
        let svc = market(MockPaymentNetwork::new()).await;
        let raw = svc.invoke("read", &args(&["offer1"])).await;
        assert!(raw.is_ok());

        let stored: serde_json::Value = serde_json::from_slice(&raw.payload).unwrap();
        assert_eq!(stored["docType"], "marble_offer");
        assert_eq!(stored["status"], "PROPOSED");
        assert_eq!(stored["offerPrice"], 150);
        assert_eq!(stored["buyer"]["id"], "o2");
        assert_eq!(stored["marble"]["isForSale"], true);
    }

    #[tokio::test]
    async fn test_transfer_keeps_marble_attributes() {
        let svc = market(MockPaymentNetwork::new()).await;
        assert!(svc.invoke("set_owner", &args(&["m1", "o2", "Acme"])).await.is_ok());

        let marble = svc.marble("m1").unwrap();
        assert_eq!(marble.owner.id, "o2");
        assert_eq!(marble.owner.username, "alice");
        assert_eq!(marble.color, "blue");
        assert_eq!(marble.size, 10);
        assert!(marble.is_for_sale);
        assert_eq!(marble.min_price, 100);
    }

    #[tokio::test]
    async fn test_accept_is_repeatable() {
        let svc = market(MockPaymentNetwork::new()).await;
        for _ in 0..2 {
            assert!(svc.invoke("accept_offer", &args(&["offer1", "Acme"])).await.is_ok());
            assert_eq!(svc.offer("offer1").unwrap().status, OfferStatus::Accepted);
        }
    }

    #[tokio::test]
    async fn test_offer_snapshot_goes_stale() {
        let svc = market(MockPaymentNetwork::new()).await;
        assert!(svc.invoke("mark_for_sale", &args(&["m1", "Acme", "500"])).await.is_ok());
        assert_eq!(svc.offer("offer1").unwrap().marble.min_price, 100);
    }

    // =============================================================================
    // SETTLEMENT
    // =============================================================================

    #[tokio::test]
    async fn test_matching_payment_settles_offer() {
        let network =
            MockPaymentNetwork::new().with_payment("tx-ok", SELLER_ACCOUNT, "150", "offer1");
        let svc = market(network).await;
        assert!(svc.invoke("accept_offer", &args(&["offer1", "Acme"])).await.is_ok());

        let response = svc
            .invoke("payment_complete_against_offer", &args(&["offer1", "tx-ok"]))
            .await;
        assert!(response.is_ok(), "{}", response.message);

        let marble = svc.marble("m1").unwrap();
        assert_eq!(marble.owner.id, "o2");
        assert_eq!(marble.owner.company, "Globex");
        assert_eq!(svc.stats().settlements, 1);
    }

    #[tokio::test]
    async fn test_mismatched_payments_change_nothing() {
        let network = MockPaymentNetwork::new()
            .with_payment("tx-memo", SELLER_ACCOUNT, "150", "offer2")
            .with_payment("tx-amount", SELLER_ACCOUNT, "140", "offer1")
            .with_payment(
                "tx-recipient",
                "GBUYERSOWNACCOUNTXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX",
                "150",
                "offer1",
            );
        let svc = market(network).await;
        let before = svc.invoke("read", &args(&["m1"])).await.payload;

        for tx in ["tx-memo", "tx-amount", "tx-recipient"] {
            let response = svc
                .invoke("payment_complete_against_offer", &args(&["offer1", tx]))
                .await;
            assert!(
                response.message.starts_with("Payment not done or mismatch"),
                "{}: {}",
                tx,
                response.message
            );
        }

        assert_eq!(svc.invoke("read", &args(&["m1"])).await.payload, before);
        assert_eq!(svc.stats().settlements, 0);
    }

    #[tokio::test]
    async fn test_unknown_transaction_fails_verification() {
        let svc = market(MockPaymentNetwork::new()).await;
        let response = svc
            .invoke("payment_complete_against_offer", &args(&["offer1", "tx-none"]))
            .await;
        assert!(response
            .message
            .starts_with("Unable to verify payment information"));
        assert_eq!(svc.marble("m1").unwrap().owner.id, "o1");
    }

    #[tokio::test]
    async fn test_settlement_after_seller_deleted_marble() {
        let network =
            MockPaymentNetwork::new().with_payment("tx-ok", SELLER_ACCOUNT, "150", "offer1");
        let svc = market(network).await;
        assert!(svc.invoke("delete_marble", &args(&["m1", "Acme"])).await.is_ok());

        let response = svc
            .invoke("payment_complete_against_offer", &args(&["offer1", "tx-ok"]))
            .await;
        assert_eq!(response.message, "Marble does not exist - m1");
        assert!(svc.marble("m1").is_none());
    }

    // =============================================================================
    // ADAPTERS
    // =============================================================================

    #[tokio::test]
    async fn test_file_ledger_with_horizon_stub() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/transactions/abc123/payments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "_embedded": { "records": [{
                    "to": SELLER_ACCOUNT,
                    "amount": "150",
                    "asset_type": "native"
                }]}
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/transactions/abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hash": "abc123",
                "memo_type": "text",
                "memo": "offer1"
            })))
            .mount(&server)
            .await;

        let dir = tempfile::tempdir().unwrap();
        let ledger_path = dir.path().join("ledger.json");
        let config = ExchangeConfig {
            horizon: HorizonConfig {
                base_url: server.uri(),
                ..Default::default()
            },
            ..Default::default()
        };

        let steps = [
            ("init_owner", args(&["o1", "bob", "Acme", SELLER_ACCOUNT])),
            ("init_owner", args(&["o2", "alice", "Globex"])),
            ("init_marble", args(&["m1", "blue", "10", "o1", "Acme"])),
            ("make_offer", args(&["m1", "o2", "Globex", "150", "offer1"])),
            ("accept_offer", args(&["offer1", "Acme"])),
            ("payment_complete_against_offer", args(&["offer1", "abc123"])),
        ];

        // One service per step, as successive node invocations would run.
        for (function, a) in steps {
            let svc = MarbleExchangeService::new(
                FileLedger::open(&ledger_path).unwrap(),
                HorizonClient::new(&config.horizon).unwrap(),
                config.clone(),
            );
            let response = svc.invoke(function, &a).await;
            assert!(response.is_ok(), "{} failed: {}", function, response.message);
        }

        let svc = MarbleExchangeService::new(
            FileLedger::open(&ledger_path).unwrap(),
            HorizonClient::new(&config.horizon).unwrap(),
            config,
        );
        assert_eq!(svc.marble("m1").unwrap().owner.id, "o2");
    }
}
