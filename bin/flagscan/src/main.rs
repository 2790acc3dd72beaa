use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use common::{Config, CurrencyPair};
use engine::{AccountSettings, Analyzer};
use replay::ReplayFeed;
use strategy::DetectorConfig;

/// Usage: `flagscan [PAIR...]`. With no pairs, every pair in the snapshot
/// is analysed.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── Logging ──────────────────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    // ── Config ────────────────────────────────────────────────────────────────
    let cfg = Config::from_env();
    info!(snapshot = %cfg.snapshot_path, account = %cfg.account_currency, "FlagScan starting");

    let detector = DetectorConfig::load_or_default(&cfg.detector_config_path)
        .context("invalid detector config")?;

    // ── Data ──────────────────────────────────────────────────────────────────
    let feed = Arc::new(
        ReplayFeed::load(&cfg.snapshot_path)
            .await
            .with_context(|| format!("failed to load snapshot '{}'", cfg.snapshot_path))?,
    );

    let requested: Vec<CurrencyPair> = std::env::args()
        .skip(1)
        .map(|arg| arg.parse())
        .collect::<Result<_, _>>()
        .context("invalid pair argument")?;
    let pairs = if requested.is_empty() { feed.pairs().await } else { requested };

    // ── Analysis ──────────────────────────────────────────────────────────────
    let analyzer = Arc::new(Analyzer::new(
        feed.clone(),
        feed.clone(),
        feed,
        detector,
        AccountSettings::from(&cfg),
    ));

    // Pairs are independent; analyse them concurrently.
    let handles: Vec<_> = pairs
        .into_iter()
        .map(|pair| {
            let analyzer = analyzer.clone();
            tokio::spawn(async move {
                let result = analyzer.run(&pair).await;
                (pair, result)
            })
        })
        .collect();

    let mut failures = 0;
    for handle in handles {
        let (pair, result) = handle.await.context("analysis task panicked")?;
        match result {
            Ok(report) => println!("{}", report.to_json_pretty()?),
            Err(e) => {
                failures += 1;
                error!(%pair, error = %e, "Analysis failed");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} pair(s) failed analysis");
    }
    Ok(())
}
