//! Binance USDⓈ-M futures `GET /fapi/v1/premiumIndex` (public, no API key).

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::sources::{get_json, FundingRateSource};

const PROVIDER: &str = "binance";

/// Subset of the single-symbol premium index response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumIndex {
    pub symbol: String,
    pub last_funding_rate: String,
    pub next_funding_time: i64,
}

impl PremiumIndex {
    pub fn funding_rate(&self) -> Result<f64, FetchError> {
        let rate = self
            .last_funding_rate
            .trim()
            .parse::<f64>()
            .map_err(|e| FetchError::parse(PROVIDER, format!("lastFundingRate {:?}: {e}", self.last_funding_rate)))?;
        if !rate.is_finite() {
            return Err(FetchError::parse(PROVIDER, "lastFundingRate is not finite"));
        }
        Ok(rate)
    }
}

pub struct BinanceFundingSource {
    base_url: url::Url,
    client: reqwest::Client,
}

impl BinanceFundingSource {
    pub fn new(base_url: &str, client: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: url::Url::parse(base_url)?,
            client,
        })
    }

    pub fn premium_index_url(&self, symbol: &str) -> Result<url::Url, FetchError> {
        let mut url = self.base_url.join("fapi/v1/premiumIndex")?;
        url.query_pairs_mut().append_pair("symbol", symbol);
        Ok(url)
    }
}

#[async_trait]
impl FundingRateSource for BinanceFundingSource {
    async fn funding_rate(&self, symbol: &str) -> Result<f64, FetchError> {
        let url = self.premium_index_url(symbol)?;
        let index: PremiumIndex = get_json(&self.client, url, PROVIDER).await?;
        let rate = index.funding_rate()?;
        tracing::debug!(symbol = %index.symbol, rate, next_funding_time = index.next_funding_time, "premium index");
        Ok(rate)
    }
}
