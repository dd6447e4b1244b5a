use anyhow::Context;
use clap::Parser;
use macro_sniper_bot::config::{Cli, LogFormat};
use macro_sniper_bot::notify::telegram::TelegramNotifier;
use macro_sniper_bot::notify::Notifier;
use macro_sniper_bot::sources::alternative::FearGreedSource;
use macro_sniper_bot::sources::binance::BinanceFundingSource;
use macro_sniper_bot::sources::http_client;
use macro_sniper_bot::sources::yahoo::YahooChartSource;
use macro_sniper_bot::{run_once, Collector, RunOptions, RunOutcome};
use tracing_subscriber::EnvFilter;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_tracing(args.log_format);

    let endpoints = args.endpoints();
    let client = http_client().context("build http client")?;

    let prices = YahooChartSource::new(&endpoints.yahoo, client.clone()).context("yahoo endpoint")?;
    let funding =
        BinanceFundingSource::new(&endpoints.binance_futures, client.clone()).context("binance endpoint")?;
    let sentiment = FearGreedSource::new(&endpoints.fear_greed, client.clone()).context("fear & greed endpoint")?;
    let collector = Collector::new(&prices, &funding, &sentiment);

    let notifier = match args.telegram() {
        Some(creds) => Some(
            TelegramNotifier::new(&endpoints.telegram, creds, client.clone()).context("telegram endpoint")?,
        ),
        None => None,
    };

    let today = chrono::Local::now().date_naive();
    let opts = RunOptions {
        dry_run: args.dry_run,
    };
    let outcome = run_once(
        &collector,
        notifier.as_ref().map(|n| n as &dyn Notifier),
        today,
        opts,
    )
    .await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match &outcome {
        RunOutcome::Aborted { reason } => tracing::warn!(%reason, "no report produced"),
        RunOutcome::Completed { delivery, .. } => tracing::info!(?delivery, "run finished"),
    }
    Ok(())
}
