use clap::{Parser, ValueEnum};
use serde::Serialize;

pub const DEFAULT_YAHOO_BASE: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_BINANCE_FUTURES_BASE: &str = "https://fapi.binance.com";
pub const DEFAULT_FNG_BASE: &str = "https://api.alternative.me";
pub const DEFAULT_TELEGRAM_BASE: &str = "https://api.telegram.org";

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "bot", about = "Daily macro sniper report: fetch, classify, push to Telegram.")]
pub struct Cli {
    /// Telegram bot token. Delivery is skipped when absent.
    #[arg(long, env = "TG_TOKEN", hide_env_values = true)]
    pub tg_token: Option<String>,

    /// Telegram chat id. Delivery is skipped when absent.
    #[arg(long, env = "TG_CHAT_ID")]
    pub tg_chat_id: Option<String>,

    /// Render and log the report but never deliver it.
    #[arg(long)]
    pub dry_run: bool,

    /// Print snapshot + classification as JSON on stdout.
    #[arg(long)]
    pub json: bool,

    #[arg(long, value_enum, env = "LOG_FORMAT", default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[arg(long, env = "YAHOO_API_BASE", default_value = DEFAULT_YAHOO_BASE)]
    pub yahoo_base: String,

    #[arg(long, env = "BINANCE_FUTURES_BASE", default_value = DEFAULT_BINANCE_FUTURES_BASE)]
    pub binance_base: String,

    #[arg(long, env = "FNG_API_BASE", default_value = DEFAULT_FNG_BASE)]
    pub fng_base: String,

    #[arg(long, env = "TELEGRAM_API_BASE", default_value = DEFAULT_TELEGRAM_BASE)]
    pub telegram_base: String,
}

impl Cli {
    pub fn endpoints(&self) -> Endpoints {
        Endpoints {
            yahoo: self.yahoo_base.clone(),
            binance_futures: self.binance_base.clone(),
            fear_greed: self.fng_base.clone(),
            telegram: self.telegram_base.clone(),
        }
    }

    pub fn telegram(&self) -> Option<TelegramCredentials> {
        TelegramCredentials::from_parts(self.tg_token.clone(), self.tg_chat_id.clone())
    }
}

/// Provider base URLs. Overridable so a proxy or local stub can stand in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Endpoints {
    pub yahoo: String,
    pub binance_futures: String,
    pub fear_greed: String,
    pub telegram: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            yahoo: DEFAULT_YAHOO_BASE.to_string(),
            binance_futures: DEFAULT_BINANCE_FUTURES_BASE.to_string(),
            fear_greed: DEFAULT_FNG_BASE.to_string(),
            telegram: DEFAULT_TELEGRAM_BASE.to_string(),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct TelegramCredentials {
    pub token: String,
    pub chat_id: String,
}

impl TelegramCredentials {
    /// Both parts must be present and non-blank.
    pub fn from_parts(token: Option<String>, chat_id: Option<String>) -> Option<Self> {
        let token = token.filter(|t| !t.trim().is_empty())?;
        let chat_id = chat_id.filter(|c| !c.trim().is_empty())?;
        Some(Self { token, chat_id })
    }
}

// Keep the token out of logs.
impl std::fmt::Debug for TelegramCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramCredentials")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}
