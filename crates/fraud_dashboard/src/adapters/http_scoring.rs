// Rust guideline compliant 2026-02-23

//! HTTP adapter for the `ScoringService` port.
//!
//! Talks to the external scoring service over two endpoints:
//! `POST /predict-explain` (single transaction, JSON) and
//! `POST /batch-predict` (multipart CSV upload). A direct translation
//! layer: no retries, no caching, no local scoring.

use std::collections::BTreeMap;
use std::time::Duration;

use domain::{
    BatchScoringResult, BatchUpload, FactorImpact, ScoredTransaction, ScoringError,
    ScoringResult, ScoringService, SummarySnapshot, TransactionRecord, TransactionType,
    TypeDistribution, clamp_unit,
};
use serde::{Deserialize, Serialize};

/// `ScoringService` adapter backed by the remote scoring HTTP API.
#[derive(Debug)]
pub struct HttpScoring {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpScoring {
    /// Create an adapter for the service at `base_url` (no trailing slash).
    ///
    /// Default request timeout is 30 s; override with
    /// [`with_timeout`](Self::with_timeout).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ScoringError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoringError::Rejected {
                reason: format!("status {status}: {body}"),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ScoringError::Malformed { reason: e.to_string() })
    }
}

impl ScoringService for HttpScoring {
    async fn score_one(&self, record: &TransactionRecord) -> Result<ScoringResult, ScoringError> {
        let url = format!("{}/predict-explain", self.base_url);
        tracing::debug!("http_scoring.score_one: url={url}");
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&PredictRequest::from(record))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("http_scoring.score_one.unreachable: error={e}");
                ScoringError::Unreachable
            })?;
        let dto: PredictResponse = Self::decode(response).await?;
        dto.try_into()
    }

    async fn score_batch(&self, upload: &BatchUpload) -> Result<BatchScoringResult, ScoringError> {
        let url = format!("{}/batch-predict", self.base_url);
        tracing::debug!(
            "http_scoring.score_batch: url={url} file={} bytes={}",
            upload.file_name,
            upload.contents.len()
        );
        let part = reqwest::multipart::Part::bytes(upload.contents.clone())
            .file_name(upload.file_name.clone());
        let form = reqwest::multipart::Form::new().part("file", part);
        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("http_scoring.score_batch.unreachable: error={e}");
                ScoringError::Unreachable
            })?;
        let dto: BatchResponse = Self::decode(response).await?;
        dto.try_into()
    }
}

// ---------------------------------------------------------------------------
// Wire DTOs
// ---------------------------------------------------------------------------

/// Single-prediction request body. The categorical type travels as its
/// fixed ordinal; field names follow the service's schema.
#[derive(Debug, Serialize)]
struct PredictRequest {
    #[serde(rename = "type")]
    tx_type: u8,
    amount: f64,
    #[serde(rename = "oldbalanceOrg")]
    old_balance_origin: f64,
    #[serde(rename = "newbalanceOrig")]
    new_balance_origin: f64,
    #[serde(rename = "oldbalanceDest")]
    old_balance_destination: f64,
    #[serde(rename = "newbalanceDest")]
    new_balance_destination: f64,
}

impl From<&TransactionRecord> for PredictRequest {
    fn from(record: &TransactionRecord) -> Self {
        Self {
            tx_type: record.tx_type.ordinal(),
            amount: record.amount,
            old_balance_origin: record.old_balance_origin,
            new_balance_origin: record.new_balance_origin,
            old_balance_destination: record.old_balance_destination,
            new_balance_destination: record.new_balance_destination,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ExplanationDto {
    feature: String,
    impact: f64,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    /// Optional so a missing field is rejected here, not propagated as a
    /// null probability into classification.
    #[serde(rename = "fraudProbability")]
    fraud_probability: Option<f64>,
    explanations: Option<Vec<ExplanationDto>>,
}

impl TryFrom<PredictResponse> for ScoringResult {
    type Error = ScoringError;

    fn try_from(dto: PredictResponse) -> Result<Self, ScoringError> {
        let probability = dto.fraud_probability.ok_or_else(|| ScoringError::Malformed {
            reason: "response missing fraudProbability".to_owned(),
        })?;
        let factors = dto
            .explanations
            .unwrap_or_default()
            .into_iter()
            .map(|e| FactorImpact { feature: e.feature, impact: clamp_unit(e.impact) })
            .collect();
        // The constructor re-sorts; upstream order is never trusted.
        Ok(Self::new(probability, factors))
    }
}

#[derive(Debug, Deserialize)]
struct RiskRowDto {
    /// Categorical ordinal; the service emits it as a float column.
    #[serde(rename = "type")]
    tx_type: f64,
    amount: f64,
    #[serde(rename = "fraudProbability")]
    fraud_probability: f64,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(rename = "totalTransactions")]
    total_transactions: u64,
    #[serde(rename = "totalFrauds")]
    total_frauds: u64,
    #[serde(rename = "averageFraudProbability")]
    average_fraud_probability: f64,
    /// Keys are stringified ordinals; values may arrive as floats.
    #[serde(rename = "typeWiseFrauds")]
    type_wise_frauds: BTreeMap<String, f64>,
    #[serde(rename = "top5Risks")]
    top5_risks: Vec<RiskRowDto>,
}

impl TryFrom<BatchResponse> for BatchScoringResult {
    type Error = ScoringError;

    fn try_from(dto: BatchResponse) -> Result<Self, ScoringError> {
        if dto.total_frauds > dto.total_transactions {
            return Err(ScoringError::Malformed {
                reason: format!(
                    "totalFrauds {} exceeds totalTransactions {}",
                    dto.total_frauds, dto.total_transactions
                ),
            });
        }

        let mut distribution = TypeDistribution::new();
        for (key, count) in dto.type_wise_frauds {
            // Unknown category keys are dropped, not fatal.
            match parse_ordinal_key(&key) {
                Some(tx_type) => {
                    distribution.insert(tx_type, count_from_wire(count));
                }
                None => {
                    tracing::warn!("http_scoring.batch.unknown_type_key: key={key}");
                }
            }
        }

        // Wire rows carry no id; assign 1..n in wire order so ranking has a
        // reproducible tie-break.
        let mut transactions = Vec::with_capacity(dto.top5_risks.len());
        for row in dto.top5_risks {
            let Some(tx_type) = parse_ordinal(row.tx_type) else {
                tracing::warn!("http_scoring.batch.unknown_row_type: code={}", row.tx_type);
                continue;
            };
            transactions.push(ScoredTransaction {
                id: transactions.len() as u64 + 1,
                amount: row.amount,
                tx_type,
                probability: clamp_unit(row.fraud_probability),
            });
        }

        Ok(Self {
            summary: SummarySnapshot {
                total_transactions: dto.total_transactions,
                total_frauds: dto.total_frauds,
                avg_fraud_probability: clamp_unit(dto.average_fraud_probability),
            },
            transactions,
            distribution,
        })
    }
}

/// Parse a stringified categorical ordinal ("1" or "1.0").
fn parse_ordinal_key(key: &str) -> Option<TransactionType> {
    key.trim().parse::<f64>().ok().and_then(parse_ordinal)
}

fn parse_ordinal(code: f64) -> Option<TransactionType> {
    if code.fract() != 0.0 || !(0.0..=4.0).contains(&code) {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range-checked integral value"
    )]
    TransactionType::from_ordinal(code as u8)
}

/// Fraud counts may arrive as floats from the service's dataframe layer.
fn count_from_wire(value: f64) -> u64 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "counts are small non-negative integers on the wire"
    )]
    let count = value.max(0.0).round() as u64;
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // ------------------------------------------------------------------
    // Single-prediction wire shaping
    // ------------------------------------------------------------------

    #[test]
    fn predict_request_uses_ordinal_and_wire_names() {
        let record = TransactionRecord {
            tx_type: TransactionType::Transfer,
            amount: 12_500.50,
            old_balance_origin: 20_000.0,
            new_balance_origin: 7_499.50,
            old_balance_destination: 0.0,
            new_balance_destination: 12_500.50,
        };
        let body = serde_json::to_value(PredictRequest::from(&record)).unwrap();
        assert_eq!(
            body,
            json!({
                "type": 1,
                "amount": 12_500.50,
                "oldbalanceOrg": 20_000.0,
                "newbalanceOrig": 7_499.50,
                "oldbalanceDest": 0.0,
                "newbalanceDest": 12_500.50,
            })
        );
    }

    #[test]
    fn predict_response_decodes_and_resorts() {
        let dto: PredictResponse = serde_json::from_value(json!({
            "isFraud": 1,
            "fraudProbability": 0.89,
            "explanations": [
                {"feature": "type", "impact": 0.1},
                {"feature": "amount", "impact": 0.4},
            ],
        }))
        .unwrap();
        let result = ScoringResult::try_from(dto).unwrap();
        assert!((result.probability - 0.89).abs() < f64::EPSILON);
        assert_eq!(result.factors[0].feature, "amount");
        assert_eq!(result.factors[1].feature, "type");
    }

    #[test]
    fn missing_probability_is_malformed() {
        let dto: PredictResponse =
            serde_json::from_value(json!({ "explanations": [] })).unwrap();
        let result = ScoringResult::try_from(dto);
        assert!(matches!(result, Err(ScoringError::Malformed { .. })));
    }

    #[test]
    fn absent_explanations_yield_empty_factors() {
        let dto: PredictResponse =
            serde_json::from_value(json!({ "fraudProbability": 0.15 })).unwrap();
        let result = ScoringResult::try_from(dto).unwrap();
        assert!(result.factors.is_empty());
    }

    #[test]
    fn negative_factor_impacts_are_clamped() {
        let dto: PredictResponse = serde_json::from_value(json!({
            "fraudProbability": 0.5,
            "explanations": [{"feature": "amount", "impact": -0.3}],
        }))
        .unwrap();
        let result = ScoringResult::try_from(dto).unwrap();
        assert!(result.factors[0].impact.abs() < f64::EPSILON);
    }

    // ------------------------------------------------------------------
    // Batch wire shaping
    // ------------------------------------------------------------------

    fn batch_json() -> serde_json::Value {
        json!({
            "totalTransactions": 1000,
            "totalFrauds": 42,
            "averageFraudProbability": 0.18,
            "typeWiseFrauds": {"1.0": 30.0, "2.0": 12.0, "9.0": 99.0},
            "top5Risks": [
                {"type": 1.0, "amount": 12_500.50, "fraudProbability": 0.89},
                {"type": 2.0, "amount": 8_900.25, "fraudProbability": 0.85},
            ],
        })
    }

    #[test]
    fn batch_response_decodes_summary_and_rows() {
        let dto: BatchResponse = serde_json::from_value(batch_json()).unwrap();
        let result = BatchScoringResult::try_from(dto).unwrap();

        assert_eq!(result.summary.total_transactions, 1000);
        assert_eq!(result.summary.total_frauds, 42);
        assert!((result.summary.avg_fraud_probability - 0.18).abs() < f64::EPSILON);

        assert_eq!(result.transactions.len(), 2);
        assert_eq!(result.transactions[0].id, 1);
        assert_eq!(result.transactions[0].tx_type, TransactionType::Transfer);
        assert_eq!(result.transactions[1].id, 2);
        assert_eq!(result.transactions[1].tx_type, TransactionType::CashOut);
    }

    #[test]
    fn unknown_distribution_keys_are_dropped() {
        let dto: BatchResponse = serde_json::from_value(batch_json()).unwrap();
        let result = BatchScoringResult::try_from(dto).unwrap();
        assert_eq!(result.distribution.len(), 2);
        assert_eq!(result.distribution.get(&TransactionType::Transfer), Some(&30));
        assert_eq!(result.distribution.get(&TransactionType::CashOut), Some(&12));
    }

    #[test]
    fn frauds_exceeding_total_is_malformed() {
        let dto: BatchResponse = serde_json::from_value(json!({
            "totalTransactions": 10,
            "totalFrauds": 11,
            "averageFraudProbability": 0.5,
            "typeWiseFrauds": {},
            "top5Risks": [],
        }))
        .unwrap();
        assert!(matches!(
            BatchScoringResult::try_from(dto),
            Err(ScoringError::Malformed { .. })
        ));
    }

    #[test]
    fn batch_missing_required_field_fails_decode() {
        let result: Result<BatchResponse, _> = serde_json::from_value(json!({
            "totalFrauds": 0,
            "averageFraudProbability": 0.0,
            "typeWiseFrauds": {},
            "top5Risks": [],
        }));
        assert!(matches!(result, Err(_)), "totalTransactions is required");
    }

    #[test]
    fn ordinal_parsing_accepts_ints_and_integral_floats_only() {
        assert_eq!(parse_ordinal_key("0"), Some(TransactionType::Payment));
        assert_eq!(parse_ordinal_key("4.0"), Some(TransactionType::CashIn));
        assert_eq!(parse_ordinal_key("1.5"), None);
        assert_eq!(parse_ordinal_key("-1"), None);
        assert_eq!(parse_ordinal_key("5"), None);
        assert_eq!(parse_ordinal_key("TRANSFER"), None);
    }

    #[test]
    fn row_probabilities_are_clamped() {
        let dto: BatchResponse = serde_json::from_value(json!({
            "totalTransactions": 1,
            "totalFrauds": 1,
            "averageFraudProbability": 1.0,
            "typeWiseFrauds": {},
            "top5Risks": [{"type": 0.0, "amount": 1.0, "fraudProbability": 1.2}],
        }))
        .unwrap();
        let result = BatchScoringResult::try_from(dto).unwrap();
        assert!((result.transactions[0].probability - 1.0).abs() < f64::EPSILON);
    }
}
