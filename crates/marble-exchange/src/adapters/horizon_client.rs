//! Horizon Payment Network Adapter
//!
//! Implements `PaymentNetwork` against a Stellar Horizon server over HTTP.

use crate::domain::PaymentNetworkError;
use crate::ports::outbound::{PaymentNetwork, PaymentRecord, TransactionRecord};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Public Horizon testnet endpoint.
pub const DEFAULT_HORIZON_URL: &str = "https://horizon-testnet.stellar.org";

/// Horizon client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Base URL of the Horizon server.
    pub base_url: String,
    /// Whole-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HORIZON_URL.to_string(),
            request_timeout_secs: 10,
            connect_timeout_secs: 5,
        }
    }
}

/// Horizon problem document returned on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HorizonProblem {
    title: String,
    detail: String,
}

/// HAL collection page.
#[derive(Debug, Deserialize)]
struct Page<T> {
    #[serde(rename = "_embedded")]
    embedded: Embedded<T>,
}

#[derive(Debug, Deserialize)]
struct Embedded<T> {
    records: Vec<T>,
}

/// HTTP client for a Horizon server.
pub struct HorizonClient {
    client: Client,
    base_url: Url,
}

impl HorizonClient {
    /// Create a new client.
    pub fn new(config: &HorizonConfig) -> Result<Self, PaymentNetworkError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| PaymentNetworkError::Request(format!("invalid base URL: {}", e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| PaymentNetworkError::Request(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Build `{base}/transactions/{tx_id}[/{suffix}]`, escaping the id.
    fn transaction_url(&self, tx_id: &str, suffix: Option<&str>) -> Result<Url, PaymentNetworkError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                PaymentNetworkError::Request(format!("base URL cannot be a base: {}", self.base_url))
            })?;
            segments.pop_if_empty().push("transactions").push(tx_id);
            if let Some(suffix) = suffix {
                segments.push(suffix);
            }
        }
        Ok(url)
    }

    /// GET a JSON resource, decoding problem documents on failure.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, PaymentNetworkError> {
        debug!("[marbles] GET {}", url);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PaymentNetworkError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let problem: HorizonProblem = response
                .json()
                .await
                .map_err(|e| PaymentNetworkError::Decode(e.to_string()))?;
            warn!(
                status = status.as_u16(),
                title = %problem.title,
                "[marbles] Horizon request failed"
            );
            return Err(PaymentNetworkError::Problem {
                status: status.as_u16(),
                title: problem.title,
                detail: problem.detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| PaymentNetworkError::Decode(e.to_string()))
    }
}

#[async_trait]
impl PaymentNetwork for HorizonClient {
    async fn latest_payment(&self, tx_id: &str) -> Result<PaymentRecord, PaymentNetworkError> {
        let mut url = self.transaction_url(tx_id, Some("payments"))?;
        url.query_pairs_mut()
            .append_pair("limit", "1")
            .append_pair("order", "desc");

        let page: Page<PaymentRecord> = self.get_json(url).await?;
        page.embedded
            .records
            .into_iter()
            .next()
            .ok_or_else(|| PaymentNetworkError::MissingPayment(tx_id.to_string()))
    }

    async fn transaction(&self, tx_id: &str) -> Result<TransactionRecord, PaymentNetworkError> {
        let url = self.transaction_url(tx_id, None)?;
        self.get_json(url).await
    }
}
