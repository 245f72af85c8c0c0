// Rust guideline compliant 2026-02-23

//! Demo adapter for the `ScoringService` port.
//!
//! Scores transactions with a seeded RNG instead of a network call, so the
//! dashboard runs end to end without the real service. Batch summaries and
//! distributions go through the aggregation engine -- never hand-rolled.

use std::cell::RefCell;

use domain::{
    BatchScoringResult, BatchUpload, FactorImpact, ScoredTransaction, ScoringError,
    ScoringResult, ScoringService, TransactionRecord, TransactionType,
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Feature names reported as explanatory factors, matching the scoring
/// service's column names.
const DEMO_FEATURES: [&str; 3] = ["amount", "oldbalanceOrg", "type"];

/// `ScoringService` adapter producing pseudo-random verdicts.
///
/// Deterministic under a fixed seed; batch size defaults to 200 synthetic
/// rows per upload.
#[derive(Debug)]
pub struct DemoScoring {
    /// Interior mutability required because the port takes `&self`.
    rng: RefCell<StdRng>,
    batch_size: usize,
}

impl DemoScoring {
    /// Create a demo adapter.
    ///
    /// `seed = Some(s)` produces deterministic results; `None` seeds from
    /// the OS.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self { rng: RefCell::new(rng), batch_size: 200 }
    }

    /// Override the number of synthetic rows per batch.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        Self { batch_size, ..self }
    }
}

impl ScoringService for DemoScoring {
    /// Returns a random probability with three random-impact factors; the
    /// record only influences the log line.
    async fn score_one(&self, record: &TransactionRecord) -> Result<ScoringResult, ScoringError> {
        let mut rng = self.rng.borrow_mut();
        let probability: f64 = rng.random();
        let factors = DEMO_FEATURES
            .iter()
            .map(|feature| FactorImpact {
                feature: (*feature).to_owned(),
                impact: rng.random(),
            })
            .collect();
        tracing::debug!(
            "demo_scoring.score_one: type={} probability={probability:.4}",
            record.tx_type
        );
        Ok(ScoringResult::new(probability, factors))
    }

    /// Synthesizes a scored batch; the uploaded bytes are not inspected
    /// (the real service parses the CSV server-side).
    async fn score_batch(&self, upload: &BatchUpload) -> Result<BatchScoringResult, ScoringError> {
        let mut rng = self.rng.borrow_mut();
        let transactions: Vec<ScoredTransaction> = (1..=self.batch_size as u64)
            .map(|id| ScoredTransaction {
                id,
                amount: rng.random_range(1.0..20_000.0),
                tx_type: TransactionType::ALL[rng.random_range(0..TransactionType::ALL.len())],
                probability: rng.random(),
            })
            .collect();
        tracing::debug!(
            "demo_scoring.score_batch: file={} rows={}",
            upload.file_name,
            transactions.len()
        );
        Ok(analytics::batch_result_from(transactions))
    }
}
