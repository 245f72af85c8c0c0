// Rust guideline compliant 2026-02-23

//! Fraud-risk dashboard entry point.
//!
//! Wires the workflow components (encoder, dashboard controller) to a
//! scoring adapter and runs one end-to-end demo session: a single
//! prediction followed by a batch ingestion.
//!
//! # Usage
//!
//! ```text
//! # Offline demo adapter (seeded)
//! RUST_LOG=info cargo run
//!
//! # Against a live scoring service
//! SCORING_URL=http://127.0.0.1:8000 RUST_LOG=info cargo run
//! ```

mod adapters;

use adapters::demo_scoring::DemoScoring;
use adapters::http_scoring::HttpScoring;
use anyhow::Context as _;
use dashboard::Dashboard;
use domain::{BatchUpload, ScoringService};
use encoder::RawTransaction;

/// Tiny CSV sample for the batch-upload path; the scoring service parses it
/// server-side (the demo adapter ignores the bytes).
const DEMO_CSV: &str = "\
type,amount,oldbalanceOrg,newbalanceOrig,oldbalanceDest,newbalanceDest
TRANSFER,12500.50,20000,7499.50,0,12500.50
CASH_OUT,8900.25,9000,99.75,0,8900.25
PAYMENT,120.00,500,380,0,0
";

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let dashboard = Dashboard::seeded();

    match std::env::var("SCORING_URL") {
        Ok(url) => {
            tracing::info!("main.adapter: http url={url}");
            run_session(&dashboard, &HttpScoring::new(url)).await
        }
        Err(_) => {
            tracing::info!("main.adapter: demo (set SCORING_URL for a live service)");
            run_session(&dashboard, &DemoScoring::new(None)).await
        }
    }
}

/// One demo session: encode a form entry, score it, ingest a batch, and log
/// the resulting snapshot.
async fn run_session<S: ScoringService>(
    dashboard: &Dashboard,
    service: &S,
) -> anyhow::Result<()> {
    let raw = RawTransaction {
        tx_type: "TRANSFER".to_owned(),
        amount: "12500.50".to_owned(),
        old_balance_origin: "20000".to_owned(),
        new_balance_origin: "7499.50".to_owned(),
        old_balance_destination: "0".to_owned(),
        new_balance_destination: "12500.50".to_owned(),
    };
    let record = encoder::encode(&raw).context("failed to encode demo transaction")?;

    let result = dashboard
        .submit_prediction(service, &record)
        .await
        .context("single prediction failed")?;
    let tier = analytics::classify(result.probability);
    tracing::info!(
        "session.prediction: probability={:.4} tier={} color={}",
        result.probability,
        tier.label(),
        tier.color_hex()
    );
    for factor in &result.factors {
        tracing::info!("session.factor: feature={} impact={:.4}", factor.feature, factor.impact);
    }

    let upload = BatchUpload {
        file_name: "transactions.csv".to_owned(),
        contents: DEMO_CSV.as_bytes().to_vec(),
    };
    let summary = dashboard
        .ingest_batch(service, &upload)
        .await
        .context("batch ingestion failed")?;
    tracing::info!(
        "session.ingest: total={} frauds={} fraud_rate={:.4} avg={:.4}",
        summary.total_transactions,
        summary.total_frauds,
        summary.fraud_rate(),
        summary.avg_fraud_probability
    );

    let snapshot = dashboard.snapshot();
    for tx in &snapshot.ranked_top5 {
        tracing::info!(
            "session.top5: id={} type={} amount={:.2} probability={:.4} tier={}",
            tx.id,
            tx.tx_type,
            tx.amount,
            tx.probability,
            analytics::classify(tx.probability).label()
        );
    }
    for (tx_type, count) in &snapshot.distribution {
        tracing::info!("session.distribution: type={tx_type} frauds={count}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::classify;
    use domain::RiskTier;

    /// Full single-prediction path: raw form input through the encoder,
    /// the port, and the controller.
    #[tokio::test]
    async fn end_to_end_demo_session_updates_the_snapshot() {
        let dashboard = Dashboard::seeded();
        let service = DemoScoring::new(Some(42)).with_batch_size(50);

        run_session(&dashboard, &service).await.unwrap();

        let snapshot = dashboard.snapshot();
        // Batch slices were replaced by the ingested batch.
        assert_eq!(snapshot.summary.total_transactions, 50);
        assert_eq!(snapshot.ranked_top5.len(), 5);
        // Ranking is probability-descending.
        for pair in snapshot.ranked_top5.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
        }
        // The prediction slice no longer holds the seed value.
        assert!((0.0..=1.0).contains(&snapshot.last_prediction.probability));
        let tier = classify(snapshot.last_prediction.probability);
        assert!(matches!(tier, RiskTier::Low | RiskTier::Medium | RiskTier::High));
    }

    #[tokio::test]
    async fn session_is_deterministic_under_a_fixed_seed() {
        let a = Dashboard::seeded();
        let b = Dashboard::seeded();
        run_session(&a, &DemoScoring::new(Some(7))).await.unwrap();
        run_session(&b, &DemoScoring::new(Some(7))).await.unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }
}
