//! Upstream data providers.
//!
//! Each provider sits behind a small trait so the collector can be driven by
//! in-memory fakes. The HTTP implementations live in the submodules.

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::FetchError;
use crate::types::{CloseSeries, FearGreed, HistoryRange, Symbol};

pub mod alternative;
pub mod binance;
pub mod yahoo;

#[async_trait]
pub trait PriceHistorySource: Send + Sync {
    /// Daily closes for each symbol, returned in the order requested.
    async fn daily_closes(
        &self,
        symbols: &[Symbol],
        range: HistoryRange,
    ) -> Result<Vec<CloseSeries>, FetchError>;
}

#[async_trait]
pub trait FundingRateSource: Send + Sync {
    /// Current funding rate as a fraction (0.0001 == 0.01%).
    async fn funding_rate(&self, symbol: &str) -> Result<f64, FetchError>;
}

#[async_trait]
pub trait SentimentSource: Send + Sync {
    async fn fear_greed(&self) -> Result<FearGreed, FetchError>;
}

/// Shared client for all providers. Yahoo refuses requests without a browser-ish UA.
pub fn http_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (compatible; macro-sniper-bot)")
        .build()
}

/// Raw GET: status plus body text. Transport failures are errors, HTTP statuses are not.
pub(crate) async fn get_text(
    client: &reqwest::Client,
    url: url::Url,
    provider: &'static str,
) -> Result<(String, u16, String), FetchError> {
    let endpoint = format!("{}{}", url.origin().ascii_serialization(), url.path());
    tracing::debug!(%endpoint, provider, "GET");

    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|source| FetchError::Http {
            endpoint: endpoint.clone(),
            source,
        })?;

    let status = resp.status().as_u16();
    let body = resp.text().await.map_err(|source| FetchError::Http {
        endpoint: endpoint.clone(),
        source,
    })?;
    Ok((endpoint, status, body))
}

pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &reqwest::Client,
    url: url::Url,
    provider: &'static str,
) -> Result<T, FetchError> {
    let (endpoint, status, body) = get_text(client, url, provider).await?;
    decode_json(provider, endpoint, status, &body)
}

/// Non-2xx is always [`FetchError::Status`], whatever the body looks like.
pub(crate) fn decode_json<T: DeserializeOwned>(
    provider: &'static str,
    endpoint: String,
    status: u16,
    body: &str,
) -> Result<T, FetchError> {
    if !(200..300).contains(&status) {
        return Err(FetchError::Status { endpoint, status });
    }
    serde_json::from_str(body).map_err(|e| FetchError::parse(provider, e.to_string()))
}
