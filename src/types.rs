use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol(s.to_string())
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Yahoo tickers pulled by the primary price fetch.
pub const VIX: &str = "^VIX";
pub const VVIX: &str = "^VVIX";
pub const BTC_USD: &str = "BTC-USD";
pub const DXY: &str = "DX-Y.NYB";

/// Perpetual contract whose funding rate is reported.
pub const FUNDING_SYMBOL: &str = "BTCUSDT";

pub fn primary_symbols() -> Vec<Symbol> {
    [VIX, VVIX, BTC_USD, DXY].into_iter().map(Symbol::from).collect()
}

/// Trailing window requested from the price-history source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryRange {
    /// Five daily observations.
    FiveDays,
    OneYear,
}

impl HistoryRange {
    pub fn as_query(self) -> &'static str {
        match self {
            HistoryRange::FiveDays => "5d",
            HistoryRange::OneYear => "1y",
        }
    }
}

/// Daily closes ordered oldest->newest. Missing observations stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CloseSeries {
    pub symbol: Option<Symbol>,
    pub closes: Vec<Option<f64>>,
}

impl CloseSeries {
    pub fn new(symbol: Symbol, closes: Vec<Option<f64>>) -> Self {
        Self {
            symbol: Some(symbol),
            closes,
        }
    }

    /// Most recent finite close, skipping gaps.
    pub fn latest(&self) -> Option<f64> {
        self.closes
            .iter()
            .rev()
            .filter_map(|c| *c)
            .find(|c| c.is_finite())
    }

    /// Finite closes only, order preserved.
    pub fn valid(&self) -> Vec<f64> {
        self.closes
            .iter()
            .filter_map(|c| *c)
            .filter(|c| c.is_finite())
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FearGreed {
    /// 0..=100
    pub value: u8,
    pub classification: String,
}

impl Default for FearGreed {
    fn default() -> Self {
        Self {
            value: 50,
            classification: "Neutral".to_string(),
        }
    }
}

/// Point-in-time inputs for one report. Rebuilt on every run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub vix: f64,
    pub vvix: f64,
    pub btc: f64,
    pub dxy: f64,
    /// btc / SMA(200) of btc; 0 when undefined.
    pub mayer: f64,
    /// Latest BTCUSDT perpetual funding rate in percent.
    pub funding_rate_pct: f64,
    pub fear_greed: FearGreed,
}

impl Default for MarketSnapshot {
    fn default() -> Self {
        Self {
            vix: 0.0,
            vvix: 0.0,
            btc: 0.0,
            dxy: 0.0,
            mayer: 0.0,
            funding_rate_pct: 0.0,
            fear_greed: FearGreed::default(),
        }
    }
}
