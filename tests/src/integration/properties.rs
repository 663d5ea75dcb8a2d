//! Argument validation across every invocable function.
//!
//! A malformed argument list must be rejected before the ledger is touched,
//! whichever function receives it.

#[cfg(test)]
mod tests {
    use super::super::{args, exchange};
    use marble_exchange::{Function, MockPaymentNetwork};

    /// A well-formed argument list for each function.
    fn valid_args(function: Function) -> Vec<String> {
        match function {
            Function::InitOwner => args(&["o1", "bob", "Acme"]),
            Function::InitMarble => args(&["m1", "blue", "10", "o1", "Acme"]),
            Function::SetOwner => args(&["m1", "o2", "Acme"]),
            Function::MarkForSale => args(&["m1", "Acme", "100"]),
            Function::MakeOffer => args(&["m1", "o2", "Globex", "150", "offer1"]),
            Function::AcceptOffer => args(&["offer1", "Acme"]),
            Function::PaymentCompleteAgainstOffer => args(&["offer1", "tx1"]),
            Function::DisableOwner => args(&["o1", "Acme"]),
            Function::DeleteMarble => args(&["m1", "Acme"]),
            Function::Write => args(&["k", "v"]),
            Function::Read => args(&["k"]),
        }
    }

    #[tokio::test]
    async fn test_empty_argument_rejected_everywhere() {
        for function in Function::ALL {
            for index in 0..valid_args(function).len() {
                let svc = exchange(MockPaymentNetwork::new());
                let mut a = valid_args(function);
                a[index].clear();

                let response = svc.invoke(function.name(), &a).await;
                assert_eq!(
                    response.message,
                    format!("Argument {} must be a non-empty string", index),
                    "{}",
                    function
                );
                assert_eq!(svc.ledger().read_count(), 0, "{} read", function);
                assert_eq!(svc.ledger().write_count(), 0, "{} wrote", function);
            }
        }
    }

    #[tokio::test]
    async fn test_overlong_argument_rejected_everywhere() {
        for function in Function::ALL {
            for index in 0..valid_args(function).len() {
                let svc = exchange(MockPaymentNetwork::new());
                let mut a = valid_args(function);
                a[index] = "x".repeat(33);

                let response = svc.invoke(function.name(), &a).await;
                assert_eq!(
                    response.message,
                    format!("Argument {} must be <= 32 characters", index),
                    "{}",
                    function
                );
                assert_eq!(svc.ledger().read_count(), 0);
                assert_eq!(svc.ledger().write_count(), 0);
            }
        }
    }

    #[tokio::test]
    async fn test_bound_counts_characters() {
        let svc = exchange(MockPaymentNetwork::new());
        let key = "é".repeat(32);
        assert!(svc.invoke("write", &args(&[&key, "v"])).await.is_ok());
    }

    #[tokio::test]
    async fn test_wrong_count_rejected_everywhere() {
        for function in Function::ALL {
            let svc = exchange(MockPaymentNetwork::new());
            let mut a = valid_args(function);
            a.push("extra".to_string());
            a.push("extra".to_string());

            let response = svc.invoke(function.name(), &a).await;
            assert!(
                response.message.starts_with("Incorrect number of arguments"),
                "{}: {}",
                function,
                response.message
            );
            assert_eq!(svc.ledger().read_count(), 0);
        }
    }

    #[tokio::test]
    async fn test_non_numeric_prices_rejected() {
        let svc = exchange(MockPaymentNetwork::new());
        for (function, a) in [
            ("init_marble", args(&["m1", "blue", "ten", "o1", "Acme"])),
            ("make_offer", args(&["m1", "o2", "Globex", "1.5", "offer1"])),
        ] {
            let response = svc.invoke(function, &a).await;
            assert!(
                response.message.contains("must be a numeric string"),
                "{}: {}",
                function,
                response.message
            );
        }
        assert_eq!(svc.ledger().read_count(), 0);
    }

    #[tokio::test]
    async fn test_negative_prices_rejected() {
        let svc = exchange(MockPaymentNetwork::new());
        for (function, a) in [
            ("init_marble", args(&["m1", "blue", "-10", "o1", "Acme"])),
            ("mark_for_sale", args(&["m1", "Acme", "-5"])),
            ("make_offer", args(&["m1", "o2", "Globex", "-150", "offer1"])),
        ] {
            let response = svc.invoke(function, &a).await;
            assert!(
                response.message.contains("must be a non-negative integer"),
                "{}: {}",
                function,
                response.message
            );
        }
        assert_eq!(svc.ledger().read_count(), 0);
        assert_eq!(svc.stats().validation_failures, 3);
    }

    #[tokio::test]
    async fn test_unknown_function_rejected() {
        let svc = exchange(MockPaymentNetwork::new());
        let response = svc.invoke("steal_marble", &args(&["m1"])).await;
        assert_eq!(
            response.message,
            "Received unknown function invocation: steal_marble"
        );
        assert_eq!(svc.stats().failures, 1);
    }
}
