// Rust guideline compliant 2026-02-23

//! Portfolio analytics for the fraud-risk dashboard: risk classification,
//! batch aggregation, and the top-K ranking view.
//!
//! Entry points: [`classify`], [`aggregate`], [`top_riskiest`],
//! [`batch_result_from`]. Everything here is a pure transform over domain
//! types; no state, no I/O.

use domain::{
    BatchScoringResult, RiskTier, ScoredTransaction, SummarySnapshot, TypeDistribution,
    clamp_unit,
};

// ---------------------------------------------------------------------------
// Risk classification
// ---------------------------------------------------------------------------

/// Probabilities below this are [`RiskTier::Low`].
pub const MEDIUM_THRESHOLD: f64 = 0.3;

/// Probabilities at or above this are [`RiskTier::High`].
pub const HIGH_THRESHOLD: f64 = 0.6;

/// The tier that counts as fraud in portfolio summaries.
///
/// Product decision inherited from the scoring service's display rules;
/// whether `Medium` should also count is still open with the domain owners.
pub const FRAUD_TIER: RiskTier = RiskTier::High;

/// Map a fraud probability to its discrete risk tier.
///
/// Half-open intervals, evaluated low to high: `p < 0.3` is Low,
/// `0.3 <= p < 0.6` is Medium, `p >= 0.6` is High. Inputs outside `[0, 1]`
/// are clamped first rather than rejected.
#[must_use]
pub fn classify(probability: f64) -> RiskTier {
    let p = clamp_unit(probability);
    if p < MEDIUM_THRESHOLD {
        RiskTier::Low
    } else if p < HIGH_THRESHOLD {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

// ---------------------------------------------------------------------------
// Aggregation engine
// ---------------------------------------------------------------------------

/// Compute portfolio totals and the per-category fraud distribution.
///
/// `total_frauds` counts transactions whose tier equals [`FRAUD_TIER`]. The
/// mean probability of an empty batch is defined as `0` (documented edge
/// case, not an error). The distribution carries a key for every category
/// present in the input, with the count of its fraud-tier rows. Output is
/// identical for any permutation of the same input.
#[must_use]
pub fn aggregate(transactions: &[ScoredTransaction]) -> (SummarySnapshot, TypeDistribution) {
    let mut distribution = TypeDistribution::new();
    let mut frauds = 0u64;
    let mut probability_sum = 0.0f64;

    for tx in transactions {
        let entry = distribution.entry(tx.tx_type).or_insert(0);
        if classify(tx.probability) == FRAUD_TIER {
            frauds += 1;
            *entry += 1;
        }
        probability_sum += tx.probability;
    }

    #[expect(clippy::cast_precision_loss, reason = "display-scale counts")]
    let avg = if transactions.is_empty() {
        0.0
    } else {
        probability_sum / transactions.len() as f64
    };

    let summary = SummarySnapshot {
        total_transactions: transactions.len() as u64,
        total_frauds: frauds,
        avg_fraud_probability: avg,
    };
    tracing::debug!(
        "analytics.aggregate: total={} frauds={} avg={:.4}",
        summary.total_transactions,
        summary.total_frauds,
        summary.avg_fraud_probability
    );
    (summary, distribution)
}

/// Package locally scored transactions as a full batch result, deriving
/// summary and distribution through [`aggregate`].
#[must_use]
pub fn batch_result_from(transactions: Vec<ScoredTransaction>) -> BatchScoringResult {
    let (summary, distribution) = aggregate(&transactions);
    BatchScoringResult { summary, transactions, distribution }
}

// ---------------------------------------------------------------------------
// Ranking view
// ---------------------------------------------------------------------------

/// Select the `k` highest-risk transactions, probability descending.
///
/// Ties break on ascending id so the order is total and reproducible across
/// re-renders. The input is left untouched; the returned vec has length
/// `min(k, transactions.len())`.
#[must_use]
pub fn top_riskiest(transactions: &[ScoredTransaction], k: usize) -> Vec<ScoredTransaction> {
    let mut ranked = transactions.to_vec();
    ranked.sort_by(|a, b| {
        b.probability
            .total_cmp(&a.probability)
            .then_with(|| a.id.cmp(&b.id))
    });
    ranked.truncate(k);
    ranked
}
