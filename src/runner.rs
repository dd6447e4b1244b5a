use chrono::NaiveDate;
use serde::Serialize;

use crate::collector::Collector;
use crate::notify::{deliver, Delivery, Notifier, SkipReason};
use crate::report;
use crate::signal::{classify, Classification};
use crate::types::MarketSnapshot;

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    /// Render but never deliver.
    pub dry_run: bool,
}

#[derive(Clone, Debug, Serialize)]
pub enum RunOutcome {
    /// Primary price fetch failed; nothing was classified or sent.
    Aborted { reason: String },
    Completed {
        snapshot: MarketSnapshot,
        classification: Classification,
        message: String,
        delivery: Delivery,
    },
}

/// One invocation: collect -> classify -> render -> deliver. Never returns an error.
pub async fn run_once(
    collector: &Collector<'_>,
    notifier: Option<&dyn Notifier>,
    today: NaiveDate,
    opts: RunOptions,
) -> RunOutcome {
    let snapshot = match collector.collect().await {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "aborting run");
            return RunOutcome::Aborted {
                reason: e.to_string(),
            };
        }
    };

    let classification = classify(&snapshot);
    tracing::info!(
        signal = classification.label,
        action = classification.action,
        mayer = snapshot.mayer,
        vix = snapshot.vix,
        funding_rate_pct = snapshot.funding_rate_pct,
        "classified"
    );

    let message = report::render(&classification, &snapshot, today);

    let delivery = if opts.dry_run {
        tracing::info!("dry run, not delivering\n{message}");
        Delivery::Skipped(SkipReason::DryRun)
    } else {
        deliver(notifier, &message).await
    };

    RunOutcome::Completed {
        snapshot,
        classification,
        message,
        delivery,
    }
}
