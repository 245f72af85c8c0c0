// Rust guideline compliant 2026-02-23

//! Shared domain types for the fraud-risk dashboard workflow.
//!
//! Defines `TransactionRecord`, `ScoringResult`, `ScoredTransaction`,
//! `RiskTier`, the snapshot types, `ScoringError`, and the hexagonal port
//! trait `ScoringService`. All workflow components depend on this crate;
//! no other workspace crate is imported here.

use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The five transaction categories understood by the scoring service.
///
/// The set is closed: the wire ordinal and badge-color tables below are
/// exhaustive matches with no fallthrough arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TransactionType {
    Payment,
    Transfer,
    CashOut,
    Debit,
    CashIn,
}

impl TransactionType {
    /// All five members, in ordinal order.
    pub const ALL: [Self; 5] = [
        Self::Payment,
        Self::Transfer,
        Self::CashOut,
        Self::Debit,
        Self::CashIn,
    ];

    /// Fixed categorical-to-ordinal table shared with the scoring service.
    ///
    /// Part of the wire contract: PAYMENT=0, TRANSFER=1, CASH_OUT=2,
    /// DEBIT=3, CASH_IN=4. Never derived from declaration position.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Self::Payment => 0,
            Self::Transfer => 1,
            Self::CashOut => 2,
            Self::Debit => 3,
            Self::CashIn => 4,
        }
    }

    /// Inverse of [`ordinal`](Self::ordinal); `None` for unknown codes.
    #[must_use]
    pub fn from_ordinal(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Payment),
            1 => Some(Self::Transfer),
            2 => Some(Self::CashOut),
            3 => Some(Self::Debit),
            4 => Some(Self::CashIn),
            _ => None,
        }
    }

    /// Wire name as submitted by the entry form (upper snake case).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Payment => "PAYMENT",
            Self::Transfer => "TRANSFER",
            Self::CashOut => "CASH_OUT",
            Self::Debit => "DEBIT",
            Self::CashIn => "CASH_IN",
        }
    }

    /// Parse a wire name; `None` for anything outside the five members.
    #[must_use]
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "PAYMENT" => Some(Self::Payment),
            "TRANSFER" => Some(Self::Transfer),
            "CASH_OUT" => Some(Self::CashOut),
            "DEBIT" => Some(Self::Debit),
            "CASH_IN" => Some(Self::CashIn),
            _ => None,
        }
    }

    /// Badge color used by the presentation layer for this category.
    #[must_use]
    pub fn badge_color(self) -> &'static str {
        match self {
            Self::Payment => "#4ade80",  // green-400
            Self::Transfer => "#60a5fa", // blue-400
            Self::CashOut => "#c084fc",  // purple-400
            Self::Debit => "#fb923c",    // orange-400
            Self::CashIn => "#818cf8",   // indigo-400
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transaction records and scoring results
// ---------------------------------------------------------------------------

/// A normalized transaction ready for submission to the scoring service.
///
/// Produced exclusively by the encoder; all numeric fields are finite and
/// `amount` is non-negative. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
    /// Transaction category (encoded as its ordinal on the wire).
    pub tx_type: TransactionType,
    /// Transaction amount, `>= 0`.
    pub amount: f64,
    /// Originating account balance before the transaction.
    pub old_balance_origin: f64,
    /// Originating account balance after the transaction.
    pub new_balance_origin: f64,
    /// Destination account balance before the transaction.
    pub old_balance_destination: f64,
    /// Destination account balance after the transaction.
    pub new_balance_destination: f64,
}

/// One explanatory factor returned alongside a fraud probability.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorImpact {
    /// Feature name as reported by the scoring service.
    pub feature: String,
    /// Contribution weight in `[0, 1]`.
    pub impact: f64,
}

/// The scoring service's verdict for a single transaction.
///
/// Construct via [`ScoringResult::new`], which clamps the probability and
/// re-sorts the factors so display code can rely on descending impact.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringResult {
    /// Fraud probability in `[0, 1]`.
    pub probability: f64,
    /// Explanatory factors, ordered by descending impact.
    pub factors: Vec<FactorImpact>,
}

impl ScoringResult {
    /// Build a result, clamping `probability` to `[0, 1]` and ordering
    /// `factors` by descending impact regardless of upstream order.
    #[must_use]
    pub fn new(probability: f64, mut factors: Vec<FactorImpact>) -> Self {
        factors.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        Self {
            probability: clamp_unit(probability),
            factors,
        }
    }
}

/// One row of a scored batch: the unit of aggregation and ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTransaction {
    /// Identifier, `>= 1`, unique within its batch.
    pub id: u64,
    /// Transaction amount, `>= 0`.
    pub amount: f64,
    /// Transaction category.
    pub tx_type: TransactionType,
    /// Fraud probability in `[0, 1]`.
    pub probability: f64,
}

// ---------------------------------------------------------------------------
// RiskTier
// ---------------------------------------------------------------------------

/// Discrete risk classification with total order `Low < Medium < High`.
///
/// Never stored alongside a probability; always recomputed from it so the
/// two can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// Display label for this tier.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    /// Gauge/badge color for this tier.
    #[must_use]
    pub fn color_hex(self) -> &'static str {
        match self {
            Self::Low => "#22d3ee",    // cyan-400
            Self::Medium => "#fb7185", // rose-400
            Self::High => "#f87171",   // red-400
        }
    }
}

// ---------------------------------------------------------------------------
// Portfolio snapshots
// ---------------------------------------------------------------------------

/// Portfolio-level totals for the most recent batch.
#[derive(Debug, Clone, PartialEq)]
pub struct SummarySnapshot {
    /// Number of transactions in the batch.
    pub total_transactions: u64,
    /// Number of transactions counted as fraud; `<= total_transactions`.
    pub total_frauds: u64,
    /// Arithmetic mean fraud probability; `0` for an empty batch.
    pub avg_fraud_probability: f64,
}

impl SummarySnapshot {
    /// An all-zero summary (empty portfolio).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_transactions: 0,
            total_frauds: 0,
            avg_fraud_probability: 0.0,
        }
    }

    /// Fraction of transactions counted as fraud; `0` when the batch is
    /// empty. Un-rounded so presentation never re-derives from display text.
    #[must_use]
    pub fn fraud_rate(&self) -> f64 {
        if self.total_transactions == 0 {
            return 0.0;
        }
        #[expect(clippy::cast_precision_loss, reason = "display-scale counts")]
        let rate = self.total_frauds as f64 / self.total_transactions as f64;
        rate
    }
}

/// Per-category fraud counts. `BTreeMap` keeps iteration deterministic.
pub type TypeDistribution = BTreeMap<TransactionType, u64>;

/// Opaque batch file handle: the CSV is parsed server-side, so the workflow
/// only carries the bytes and a name for the multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchUpload {
    /// File name reported to the scoring service.
    pub file_name: String,
    /// Raw file contents, uninterpreted.
    pub contents: Vec<u8>,
}

/// Everything a batch scoring round yields.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchScoringResult {
    /// Portfolio totals for the batch.
    pub summary: SummarySnapshot,
    /// The scored rows the ranking view operates on.
    pub transactions: Vec<ScoredTransaction>,
    /// Per-category fraud counts.
    pub distribution: TypeDistribution,
}

/// The complete, atomically replaced dashboard state.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// Portfolio totals from the most recent batch.
    pub summary: SummarySnapshot,
    /// Highest-risk transactions, probability descending.
    pub ranked_top5: Vec<ScoredTransaction>,
    /// Per-category fraud counts from the most recent batch.
    pub distribution: TypeDistribution,
    /// Verdict of the most recent single prediction.
    pub last_prediction: ScoringResult,
}

// ---------------------------------------------------------------------------
// ScoringError + ScoringService port
// ---------------------------------------------------------------------------

/// Errors from the `ScoringService` hexagonal port.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// The scoring service could not be reached (including timeouts).
    #[error("scoring service unreachable")]
    Unreachable,
    /// The scoring service rejected the request.
    #[error("scoring request rejected: {reason}")]
    Rejected {
        /// Human-readable description from the service.
        reason: String,
    },
    /// The response was missing required fields or undecodable.
    #[error("malformed scoring response: {reason}")]
    Malformed {
        /// Human-readable description of the problem.
        reason: String,
    },
}

/// Hexagonal port: the external scoring service.
///
/// Implementations live in the binary crate (HTTP and demo adapters); the
/// dashboard controller depends exclusively on this trait -- never on a
/// concrete adapter. Both operations are idempotent from the caller's view:
/// no caller-visible state changes beyond the returned result. Retries and
/// caching are deliberately absent.
#[expect(
    async_fn_in_trait,
    reason = "no dyn dispatch needed; internal workspace only"
)]
pub trait ScoringService {
    /// Score a single transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::Unreachable`] when the service is down,
    /// [`ScoringError::Rejected`] on a validation failure, or
    /// [`ScoringError::Malformed`] when the response lacks required fields.
    async fn score_one(&self, record: &TransactionRecord) -> Result<ScoringResult, ScoringError>;

    /// Score a whole uploaded batch file.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`score_one`](Self::score_one).
    async fn score_batch(&self, upload: &BatchUpload) -> Result<BatchScoringResult, ScoringError>;
}

// ---------------------------------------------------------------------------
// Probability clamping
// ---------------------------------------------------------------------------

/// Clamp a probability to `[0, 1]`; NaN maps to `0`.
///
/// Out-of-range values are a contract violation of the upstream producer,
/// but the workflow stays total so minor numeric noise never breaks display.
#[must_use]
pub fn clamp_unit(p: f64) -> f64 {
    if p.is_nan() {
        return 0.0;
    }
    p.clamp(0.0, 1.0)
}
