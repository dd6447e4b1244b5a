//! Pulls every indicator for one report.
//!
//! Only the primary price fetch can abort a run. Every other metric is fetched
//! independently and replaced by its neutral default on failure:
//!
//! | metric | fallback |
//! |---|---|
//! | Mayer multiple | `0.0` |
//! | funding rate | `0.0` |
//! | Fear & Greed | `50` / `"Neutral"` |

use crate::error::{CollectError, FetchError};
use crate::sources::{FundingRateSource, PriceHistorySource, SentimentSource};
use crate::types::*;

/// Trailing window of the Mayer multiple moving average.
pub const MAYER_WINDOW: usize = 200;

pub struct Collector<'a> {
    pub prices: &'a dyn PriceHistorySource,
    pub funding: &'a dyn FundingRateSource,
    pub sentiment: &'a dyn SentimentSource,
}

impl<'a> Collector<'a> {
    pub fn new(
        prices: &'a dyn PriceHistorySource,
        funding: &'a dyn FundingRateSource,
        sentiment: &'a dyn SentimentSource,
    ) -> Self {
        Self {
            prices,
            funding,
            sentiment,
        }
    }

    pub async fn collect(&self) -> Result<MarketSnapshot, CollectError> {
        tracing::info!("fetching market data");

        let symbols = primary_symbols();
        let series = self
            .prices
            .daily_closes(&symbols, HistoryRange::FiveDays)
            .await
            .map_err(CollectError::PriceHistory)?;

        let latest = |sym: &str| -> f64 {
            let found = series
                .iter()
                .find(|s| s.symbol.as_ref().is_some_and(|x| x.as_str() == sym))
                .and_then(CloseSeries::latest);
            match found {
                Some(v) => v,
                None => {
                    tracing::warn!(symbol = sym, "no valid close in window, using 0");
                    0.0
                }
            }
        };

        let vix = latest(VIX);
        let vvix = latest(VVIX);
        let btc = latest(BTC_USD);
        let dxy = latest(DXY);

        let mayer = if btc > 0.0 {
            self.mayer(btc).await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "mayer multiple unavailable, using 0");
                0.0
            })
        } else {
            tracing::warn!("no btc price, mayer multiple set to 0");
            0.0
        };

        let funding_rate_pct = match self.funding.funding_rate(FUNDING_SYMBOL).await {
            Ok(rate) => rate * 100.0,
            Err(e) => {
                tracing::warn!(error = %e, symbol = FUNDING_SYMBOL, "funding rate unavailable, using 0");
                0.0
            }
        };

        let fear_greed = self.sentiment.fear_greed().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "fear & greed unavailable, using neutral");
            FearGreed::default()
        });

        let snapshot = MarketSnapshot {
            vix,
            vvix,
            btc,
            dxy,
            mayer,
            funding_rate_pct,
            fear_greed,
        };
        tracing::info!(?snapshot, "market data collected");
        Ok(snapshot)
    }

    /// `price` is the reported BTC close; the 1y history only feeds the average.
    async fn mayer(&self, price: f64) -> Result<f64, FetchError> {
        let btc = Symbol::from(BTC_USD);
        let history = self
            .prices
            .daily_closes(std::slice::from_ref(&btc), HistoryRange::OneYear)
            .await?;
        let closes = history
            .into_iter()
            .next()
            .map(|s| s.valid())
            .unwrap_or_default();
        mayer_multiple(price, &closes)
    }
}

/// `price` divided by the mean of the trailing [`MAYER_WINDOW`] closes.
pub fn mayer_multiple(price: f64, closes: &[f64]) -> Result<f64, FetchError> {
    if closes.len() < MAYER_WINDOW {
        return Err(FetchError::InsufficientHistory {
            needed: MAYER_WINDOW,
            got: closes.len(),
        });
    }
    let window = &closes[closes.len() - MAYER_WINDOW..];
    let mean = window.iter().sum::<f64>() / MAYER_WINDOW as f64;
    if !(mean.is_finite() && mean > 0.0) {
        return Err(FetchError::NonPositiveMean(mean));
    }
    Ok(price / mean)
}
