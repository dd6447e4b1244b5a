//! Yahoo Finance v8 chart endpoint.

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FetchError;
use crate::sources::{decode_json, get_text, PriceHistorySource};
use crate::types::{CloseSeries, HistoryRange, Symbol};

const PROVIDER: &str = "yahoo";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooChartSource {
    base_url: url::Url,
    client: reqwest::Client,
}

impl YahooChartSource {
    pub fn new(base_url: &str, client: reqwest::Client) -> Result<Self, FetchError> {
        Ok(Self {
            base_url: url::Url::parse(base_url)?,
            client,
        })
    }

    /// `{base}/v8/finance/chart/{symbol}?interval=1d&range=..`; `^` in index tickers is percent-encoded.
    pub fn chart_url(&self, symbol: &Symbol, range: HistoryRange) -> url::Url {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/v8/finance/chart/{}",
            self.base_url.path().trim_end_matches('/'),
            symbol.as_str().replace('^', "%5E")
        );
        url.set_path(&path);
        url.query_pairs_mut()
            .append_pair("interval", "1d")
            .append_pair("range", range.as_query());
        url
    }

    async fn fetch_one(&self, symbol: &Symbol, range: HistoryRange) -> Result<CloseSeries, FetchError> {
        let url = self.chart_url(symbol, range);
        let (endpoint, status, body) = get_text(&self.client, url, PROVIDER).await?;
        let closes = decode_chart(endpoint, status, &body)?;
        tracing::debug!(%symbol, points = closes.len(), "yahoo closes");
        Ok(CloseSeries::new(symbol.clone(), closes))
    }
}

#[async_trait]
impl PriceHistorySource for YahooChartSource {
    async fn daily_closes(
        &self,
        symbols: &[Symbol],
        range: HistoryRange,
    ) -> Result<Vec<CloseSeries>, FetchError> {
        let mut out = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            out.push(self.fetch_one(symbol, range).await?);
        }
        Ok(out)
    }
}

fn closes_from_chart(resp: ChartResponse) -> Result<Vec<Option<f64>>, FetchError> {
    if let Some(err) = resp.chart.error {
        return Err(FetchError::Upstream {
            provider: PROVIDER,
            message: format!("{} - {}", err.code, err.description),
        });
    }
    // A symbol without any rows is an empty series, not an error.
    let Some(data) = resp.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    Ok(data
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default())
}

/// Yahoo answers unknown symbols with a 404 carrying a chart error body; report that error
/// rather than the bare status.
fn decode_chart(endpoint: String, status: u16, body: &str) -> Result<Vec<Option<f64>>, FetchError> {
    if !(200..300).contains(&status) {
        if let Ok(resp) = serde_json::from_str::<ChartResponse>(body) {
            if resp.chart.error.is_some() {
                return closes_from_chart(resp);
            }
        }
    }
    let resp: ChartResponse = decode_json(PROVIDER, endpoint, status, body)?;
    closes_from_chart(resp)
}

/// Parse a raw chart body. Exposed for fixtures.
pub fn parse_chart_closes(body: &str) -> Result<Vec<Option<f64>>, FetchError> {
    let resp: ChartResponse =
        serde_json::from_str(body).map_err(|e| FetchError::parse(PROVIDER, e.to_string()))?;
    closes_from_chart(resp)
}
