use thiserror::Error;

/// Failure of a single upstream fetch or of a derived metric.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("http request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("{provider} error: {message}")]
    Upstream { provider: &'static str, message: String },
    #[error("malformed response from {provider}: {details}")]
    Parse { provider: &'static str, details: String },
    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
    #[error("need {needed} observations, got {got}")]
    InsufficientHistory { needed: usize, got: usize },
    #[error("moving average is not positive ({0})")]
    NonPositiveMean(f64),
}

impl FetchError {
    pub fn parse(provider: &'static str, details: impl Into<String>) -> Self {
        Self::Parse {
            provider,
            details: details.into(),
        }
    }
}

/// The only failure that aborts a run: the primary price fetch.
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("primary price fetch failed: {0}")]
    PriceHistory(#[source] FetchError),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("telegram request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid telegram url: {0}")]
    Url(#[from] url::ParseError),
    #[error("telegram rejected message (status {status}): {description}")]
    Rejected { status: u16, description: String },
}
