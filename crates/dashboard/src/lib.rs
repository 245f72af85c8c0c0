// Rust guideline compliant 2026-02-23

//! Dashboard State Controller -- owns the current in-memory snapshot and
//! applies the update protocol when a single prediction or a batch upload
//! completes.
//!
//! Entry points: [`Dashboard::seeded`], [`Dashboard::submit_prediction`],
//! [`Dashboard::ingest_batch`], [`Dashboard::snapshot`]. The scoring port is
//! injected per call -- the controller never holds a concrete adapter.

use std::cell::RefCell;

use domain::{
    BatchUpload, DashboardSnapshot, ScoredTransaction, ScoringError, ScoringResult,
    ScoringService, SummarySnapshot, TransactionRecord, TransactionType, TypeDistribution,
};

/// How many ranked transactions the dashboard displays.
pub const RANKED_TOP_K: usize = 5;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Exclusive owner of the current [`DashboardSnapshot`].
///
/// All mutation is whole-slice replacement on a single logical control
/// thread: a prediction completion replaces only `last_prediction`, a batch
/// completion replaces `summary`, `ranked_top5`, and `distribution` as one
/// unit. Racing completions of the same kind resolve last-writer-wins; the
/// two kinds own disjoint slices, so they never conflict.
#[derive(Debug)]
pub struct Dashboard {
    /// Interior mutability required because all public methods take `&self`.
    snapshot: RefCell<DashboardSnapshot>,
}

impl Dashboard {
    /// Create a controller from an explicit initial snapshot.
    #[must_use]
    pub fn new(initial: DashboardSnapshot) -> Self {
        Self { snapshot: RefCell::new(initial) }
    }

    /// Create a controller pre-filled with the demo portfolio shown before
    /// any real interaction occurs.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(seed_snapshot())
    }

    /// Clone of the current snapshot, for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> DashboardSnapshot {
        self.snapshot.borrow().clone()
    }

    /// Submit a single transaction for scoring.
    ///
    /// On success, `last_prediction` is replaced wholesale (never merged)
    /// and the result is returned. On any [`ScoringError`] the snapshot is
    /// left untouched, so the display never shows a result inconsistent
    /// with a completed request.
    ///
    /// # Errors
    ///
    /// Propagates the port's [`ScoringError`] unchanged.
    pub async fn submit_prediction<S: ScoringService>(
        &self,
        service: &S,
        record: &TransactionRecord,
    ) -> Result<ScoringResult, ScoringError> {
        let result = service.score_one(record).await?;
        tracing::info!(
            "dashboard.prediction: probability={:.4} factors={}",
            result.probability,
            result.factors.len()
        );
        self.snapshot.borrow_mut().last_prediction = result.clone();
        Ok(result)
    }

    /// Submit a batch file for scoring.
    ///
    /// On success, `summary`, `ranked_top5` (top [`RANKED_TOP_K`] by
    /// probability), and `distribution` are replaced atomically as one unit;
    /// partial updates cannot be observed. On failure the previous snapshot
    /// is retained unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the port's [`ScoringError`] unchanged.
    pub async fn ingest_batch<S: ScoringService>(
        &self,
        service: &S,
        upload: &BatchUpload,
    ) -> Result<SummarySnapshot, ScoringError> {
        let result = service.score_batch(upload).await?;
        let ranked = analytics::top_riskiest(&result.transactions, RANKED_TOP_K);
        tracing::info!(
            "dashboard.ingest: total={} frauds={} ranked={}",
            result.summary.total_transactions,
            result.summary.total_frauds,
            ranked.len()
        );

        // Single borrow scope: the three slices land together or not at all.
        let mut snapshot = self.snapshot.borrow_mut();
        snapshot.summary = result.summary.clone();
        snapshot.ranked_top5 = ranked;
        snapshot.distribution = result.distribution;
        Ok(result.summary)
    }
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

/// The demo snapshot displayed before any real interaction.
#[must_use]
pub fn seed_snapshot() -> DashboardSnapshot {
    let ranked_top5 = vec![
        seed_tx(1, 12_500.50, TransactionType::Transfer, 0.89),
        seed_tx(2, 8_900.25, TransactionType::CashOut, 0.85),
        seed_tx(3, 15_600.00, TransactionType::Payment, 0.82),
        seed_tx(4, 7_800.75, TransactionType::Transfer, 0.78),
        seed_tx(5, 9_200.30, TransactionType::CashOut, 0.76),
    ];
    let mut distribution = TypeDistribution::new();
    distribution.insert(TransactionType::Transfer, 145);
    distribution.insert(TransactionType::CashOut, 89);
    distribution.insert(TransactionType::Payment, 67);
    distribution.insert(TransactionType::Debit, 28);
    distribution.insert(TransactionType::CashIn, 13);

    DashboardSnapshot {
        summary: SummarySnapshot {
            total_transactions: 15_842,
            total_frauds: 342,
            avg_fraud_probability: 0.23,
        },
        ranked_top5,
        distribution,
        last_prediction: ScoringResult::new(0.75, vec![]),
    }
}

fn seed_tx(id: u64, amount: f64, tx_type: TransactionType, probability: f64) -> ScoredTransaction {
    ScoredTransaction { id, amount, tx_type, probability }
}
