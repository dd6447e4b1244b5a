//! alternative.me Crypto Fear & Greed index.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::sources::{get_json, SentimentSource};
use crate::types::FearGreed;

const PROVIDER: &str = "alternative.me";

#[derive(Debug, Deserialize)]
struct FngResponse {
    #[serde(default)]
    data: Vec<FngEntry>,
}

#[derive(Debug, Deserialize)]
struct FngEntry {
    value: String,
    value_classification: String,
}

pub struct FearGreedSource {
    base_url: url::Url,
    client: reqwest::Client,
}

impl FearGreedSource {
    pub fn new(base_url: &str, client: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: url::Url::parse(base_url)?,
            client,
        })
    }
}

#[async_trait]
impl SentimentSource for FearGreedSource {
    async fn fear_greed(&self) -> Result<FearGreed, FetchError> {
        let url = self.base_url.join("fng/")?;
        let resp: FngResponse = get_json(&self.client, url, PROVIDER).await?;
        fear_greed_from(resp)
    }
}

fn fear_greed_from(resp: FngResponse) -> Result<FearGreed, FetchError> {
    let entry = resp
        .data
        .into_iter()
        .next()
        .ok_or_else(|| FetchError::parse(PROVIDER, "empty data array"))?;
    let value: u8 = entry
        .value
        .trim()
        .parse()
        .map_err(|e| FetchError::parse(PROVIDER, format!("value {:?}: {e}", entry.value)))?;
    if value > 100 {
        return Err(FetchError::parse(PROVIDER, format!("value {value} outside 0..=100")));
    }
    Ok(FearGreed {
        value,
        classification: entry.value_classification,
    })
}

pub fn parse_fear_greed(body: &str) -> Result<FearGreed, FetchError> {
    let resp: FngResponse =
        serde_json::from_str(body).map_err(|e| FetchError::parse(PROVIDER, e.to_string()))?;
    fear_greed_from(resp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_latest_entry() {
        let body = r#"{"name":"Fear and Greed Index","data":[{"value":"23","value_classification":"Extreme Fear",
            "timestamp":"1718064000","time_until_update":"3600"}],"metadata":{"error":null}}"#;
        let fg = parse_fear_greed(body).unwrap();
        assert_eq!(fg.value, 23);
        assert_eq!(fg.classification, "Extreme Fear");
    }

    #[test]
    fn empty_data_is_an_error() {
        let err = parse_fear_greed(r#"{"data":[]}"#).unwrap_err();
        assert!(err.to_string().contains("empty data"), "{err}");
    }

    #[test]
    fn out_of_range_value_is_an_error() {
        let body = r#"{"data":[{"value":"180","value_classification":"Greed"}]}"#;
        assert!(parse_fear_greed(body).is_err());
        let body = r#"{"data":[{"value":"n/a","value_classification":"Greed"}]}"#;
        assert!(parse_fear_greed(body).is_err());
    }
}
