//! Macro sniper report bot.
//!
//! Once per invocation the bot pulls a handful of macro and crypto indicators
//! (VIX, VVIX, DXY, BTC spot, the Mayer multiple, BTCUSDT funding and the
//! Fear & Greed index), runs them through a fixed threshold classifier and
//! pushes a formatted digest to Telegram.

pub mod collector;
pub mod config;
pub mod error;
pub mod notify;
pub mod report;
pub mod runner;
pub mod signal;
pub mod sources;
pub mod types;

pub use crate::collector::Collector;
pub use crate::runner::{run_once, RunOptions, RunOutcome};
pub use crate::signal::{classify, Classification, Signal};
