//! Report delivery.
//!
//! Credentials are an explicit `Option` resolved by the caller: a notifier only
//! exists when it can actually send, and [`deliver`] never raises.

use async_trait::async_trait;
use serde::Serialize;

use crate::error::NotifyError;

pub mod telegram;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), NotifyError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    MissingCredentials,
    DryRun,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Delivery {
    Sent,
    Skipped(SkipReason),
    Failed(String),
}

/// Best-effort single delivery attempt. Errors are logged and returned as [`Delivery::Failed`].
pub async fn deliver(notifier: Option<&dyn Notifier>, text: &str) -> Delivery {
    let Some(notifier) = notifier else {
        tracing::warn!("telegram credentials missing (TG_TOKEN / TG_CHAT_ID), skipping delivery");
        return Delivery::Skipped(SkipReason::MissingCredentials);
    };
    match notifier.send(text).await {
        Ok(()) => {
            tracing::info!(bytes = text.len(), "report delivered");
            Delivery::Sent
        }
        Err(e) => {
            tracing::error!(error = %e, "report delivery failed");
            Delivery::Failed(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Counting {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for Counting {
        async fn send(&self, _text: &str) -> Result<(), NotifyError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(NotifyError::Rejected {
                    status: 400,
                    description: "Bad Request: chat not found".into(),
                });
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn sends_once_when_configured() {
        let n = Counting::default();
        assert_eq!(deliver(Some(&n), "hi").await, Delivery::Sent);
        assert_eq!(n.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let n = Counting {
            fail: true,
            ..Default::default()
        };
        let out = deliver(Some(&n), "hi").await;
        assert!(matches!(&out, Delivery::Failed(msg) if msg.contains("chat not found")), "{out:?}");
        assert_eq!(n.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn missing_notifier_skips() {
        assert_eq!(
            deliver(None, "hi").await,
            Delivery::Skipped(SkipReason::MissingCredentials)
        );
    }
}
