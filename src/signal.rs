//! Threshold classifier.
//!
//! The rule table is evaluated top to bottom and the first matching rule
//! wins. When nothing matches the market is [`Signal::RangeBound`].

use serde::{Deserialize, Serialize};

use crate::types::MarketSnapshot;

/// Mayer multiple below this is considered cheap.
pub const MAYER_DEEP_VALUE: f64 = 0.8;
/// Mayer multiple above this is considered overheated.
pub const MAYER_TOP_RISK: f64 = 2.4;
/// VIX above this is considered panic.
pub const VIX_PANIC: f64 = 30.0;
/// Funding rate (percent) below this flags crowded shorts.
pub const FUNDING_SQUEEZE_PCT: f64 = -0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    DiamondBuy,
    DeepValue,
    PanicSell,
    Squeeze,
    TopRisk,
    RangeBound,
}

impl Signal {
    pub fn label(self) -> &'static str {
        match self {
            Signal::DiamondBuy => "Diamond Buy",
            Signal::DeepValue => "Deep Value",
            Signal::PanicSell => "Panic Sell",
            Signal::Squeeze => "Squeeze",
            Signal::TopRisk => "Top Risk",
            Signal::RangeBound => "Range-bound / Wait",
        }
    }

    pub fn action(self) -> &'static str {
        match self {
            Signal::DiamondBuy => "aggressive staged accumulation",
            Signal::DeepValue => "start dollar-cost-averaging",
            Signal::PanicSell => "staged contrarian buying, watch DXY",
            Signal::Squeeze => "short-term long bias",
            Signal::TopRisk => "staged profit-taking",
            Signal::RangeBound => "grid trading or hold",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Signal::DiamondBuy => "🚀",
            Signal::DeepValue => "💎",
            Signal::PanicSell => "🔥",
            Signal::Squeeze => "⚡",
            Signal::TopRisk => "🔴",
            Signal::RangeBound => "⚖️",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub signal: Signal,
    pub label: &'static str,
    pub action: &'static str,
}

impl From<Signal> for Classification {
    fn from(signal: Signal) -> Self {
        Self {
            signal,
            label: signal.label(),
            action: signal.action(),
        }
    }
}

pub struct Rule {
    pub signal: Signal,
    pub matches: fn(&MarketSnapshot) -> bool,
}

/// Priority order matters: a cheap market in panic is a Diamond Buy, never a Panic Sell.
pub const RULES: [Rule; 5] = [
    Rule {
        signal: Signal::DiamondBuy,
        matches: |s: &MarketSnapshot| s.mayer < MAYER_DEEP_VALUE && s.vix > VIX_PANIC,
    },
    Rule {
        signal: Signal::DeepValue,
        matches: |s: &MarketSnapshot| s.mayer < MAYER_DEEP_VALUE,
    },
    Rule {
        signal: Signal::PanicSell,
        matches: |s: &MarketSnapshot| s.vix > VIX_PANIC,
    },
    Rule {
        signal: Signal::Squeeze,
        matches: |s: &MarketSnapshot| s.funding_rate_pct < FUNDING_SQUEEZE_PCT,
    },
    Rule {
        signal: Signal::TopRisk,
        matches: |s: &MarketSnapshot| s.mayer > MAYER_TOP_RISK,
    },
];

pub fn classify(snapshot: &MarketSnapshot) -> Classification {
    RULES
        .iter()
        .find(|rule| (rule.matches)(snapshot))
        .map_or(Signal::RangeBound, |rule| rule.signal)
        .into()
}
