// Rust guideline compliant 2026-02-23

//! Transaction Encoder -- normalizes raw form input into a well-typed
//! [`TransactionRecord`] for submission to the scoring service.
//!
//! Entry point: [`encode`]. Pure function of its input; user-input failures
//! are reported as [`EncodingError`] and never mutate anything.

use domain::{TransactionRecord, TransactionType};

// ---------------------------------------------------------------------------
// EncodingError
// ---------------------------------------------------------------------------

/// User-input errors produced while encoding a raw transaction.
///
/// Always recoverable locally: the caller re-prompts and re-invokes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A numeric field did not parse as a finite, in-range real.
    #[error("field `{field}` is not a valid number")]
    InvalidNumber {
        /// Wire name of the offending field.
        field: String,
    },
    /// The type field was not one of the five recognized categories.
    #[error("unknown transaction type `{value}`")]
    UnknownType {
        /// The rejected raw value.
        value: String,
    },
}

// ---------------------------------------------------------------------------
// RawTransaction + encode
// ---------------------------------------------------------------------------

/// Raw single-entry form input: six fields, all strings, possibly empty.
///
/// Field names mirror the entry form; the wire names used in error reports
/// are `type`, `amount`, `oldBalanceOrigin`, `newBalanceOrigin`,
/// `oldBalanceDestination`, `newBalanceDestination`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTransaction {
    pub tx_type: String,
    pub amount: String,
    pub old_balance_origin: String,
    pub new_balance_origin: String,
    pub old_balance_destination: String,
    pub new_balance_destination: String,
}

/// Normalize raw form input into a [`TransactionRecord`].
///
/// The type field must be one of the five recognized categories; every
/// numeric field must parse as a finite real, and `amount` must be
/// non-negative. The categorical ordinal is applied later, at the wire
/// boundary -- the record keeps the typed enum.
///
/// # Errors
///
/// Returns [`EncodingError::UnknownType`] for an unrecognized type value or
/// [`EncodingError::InvalidNumber`] naming the first offending numeric field.
pub fn encode(raw: &RawTransaction) -> Result<TransactionRecord, EncodingError> {
    let tx_type = TransactionType::from_wire(&raw.tx_type).ok_or_else(|| {
        EncodingError::UnknownType { value: raw.tx_type.clone() }
    })?;

    let amount = parse_field("amount", &raw.amount)?;
    // Amount is the only field with a sign constraint; balances may go
    // negative in overdraft data.
    if amount < 0.0 {
        return Err(EncodingError::InvalidNumber { field: "amount".to_owned() });
    }

    let record = TransactionRecord {
        tx_type,
        amount,
        old_balance_origin: parse_field("oldBalanceOrigin", &raw.old_balance_origin)?,
        new_balance_origin: parse_field("newBalanceOrigin", &raw.new_balance_origin)?,
        old_balance_destination: parse_field(
            "oldBalanceDestination",
            &raw.old_balance_destination,
        )?,
        new_balance_destination: parse_field(
            "newBalanceDestination",
            &raw.new_balance_destination,
        )?,
    };
    tracing::debug!("encoder.encode: type={} amount={}", record.tx_type, record.amount);
    Ok(record)
}

/// Parse one numeric field; rejects anything non-finite (NaN, infinities).
fn parse_field(field: &str, value: &str) -> Result<f64, EncodingError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EncodingError::InvalidNumber { field: field.to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_raw() -> RawTransaction {
        RawTransaction {
            tx_type: "TRANSFER".to_owned(),
            amount: "12500.50".to_owned(),
            old_balance_origin: "20000".to_owned(),
            new_balance_origin: "7499.50".to_owned(),
            old_balance_destination: "0".to_owned(),
            new_balance_destination: "12500.50".to_owned(),
        }
    }

    // ------------------------------------------------------------------
    // Happy path
    // ------------------------------------------------------------------

    #[test]
    fn encodes_valid_transfer_unchanged() {
        let record = encode(&valid_raw()).unwrap();
        assert_eq!(record.tx_type, TransactionType::Transfer);
        assert_eq!(record.tx_type.ordinal(), 1);
        assert!((record.amount - 12500.50).abs() < f64::EPSILON);
        assert!((record.old_balance_origin - 20000.0).abs() < f64::EPSILON);
        assert!((record.new_balance_origin - 7499.50).abs() < f64::EPSILON);
        assert!(record.old_balance_destination.abs() < f64::EPSILON);
        assert!((record.new_balance_destination - 12500.50).abs() < f64::EPSILON);
    }

    #[test]
    fn accepts_all_five_types() {
        for tx_type in TransactionType::ALL {
            let raw = RawTransaction { tx_type: tx_type.as_str().to_owned(), ..valid_raw() };
            assert_eq!(encode(&raw).unwrap().tx_type, tx_type);
        }
    }

    #[test]
    fn trims_surrounding_whitespace_in_numbers() {
        let raw = RawTransaction { amount: " 42.5 ".to_owned(), ..valid_raw() };
        assert!((encode(&raw).unwrap().amount - 42.5).abs() < f64::EPSILON);
    }

    #[test]
    fn allows_negative_balances() {
        // Overdrafts appear in real data; only amount carries a sign rule.
        let raw = RawTransaction { new_balance_origin: "-12.5".to_owned(), ..valid_raw() };
        assert!((encode(&raw).unwrap().new_balance_origin + 12.5).abs() < f64::EPSILON);
    }

    // ------------------------------------------------------------------
    // Rejections
    // ------------------------------------------------------------------

    #[test]
    fn rejects_unknown_type() {
        let raw = RawTransaction { tx_type: "WIRE".to_owned(), ..valid_raw() };
        assert_eq!(
            encode(&raw),
            Err(EncodingError::UnknownType { value: "WIRE".to_owned() })
        );
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let raw = RawTransaction { amount: "abc".to_owned(), ..valid_raw() };
        assert_eq!(
            encode(&raw),
            Err(EncodingError::InvalidNumber { field: "amount".to_owned() })
        );
    }

    #[test]
    fn rejects_empty_field_naming_it() {
        let raw = RawTransaction { old_balance_destination: String::new(), ..valid_raw() };
        assert_eq!(
            encode(&raw),
            Err(EncodingError::InvalidNumber { field: "oldBalanceDestination".to_owned() })
        );
    }

    #[test]
    fn rejects_negative_amount() {
        let raw = RawTransaction { amount: "-1".to_owned(), ..valid_raw() };
        assert_eq!(
            encode(&raw),
            Err(EncodingError::InvalidNumber { field: "amount".to_owned() })
        );
    }

    #[test]
    fn rejects_non_finite_values() {
        for bad in ["inf", "-inf", "NaN"] {
            let raw = RawTransaction { new_balance_destination: bad.to_owned(), ..valid_raw() };
            assert_eq!(
                encode(&raw),
                Err(EncodingError::InvalidNumber {
                    field: "newBalanceDestination".to_owned()
                }),
                "`{bad}` must be rejected"
            );
        }
    }

    #[test]
    fn type_is_checked_before_numbers() {
        // Both fields invalid; the categorical check reports first.
        let raw = RawTransaction {
            tx_type: "GIFT".to_owned(),
            amount: "abc".to_owned(),
            ..valid_raw()
        };
        assert!(matches!(encode(&raw), Err(EncodingError::UnknownType { .. })));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let e = EncodingError::InvalidNumber { field: "amount".to_owned() };
        assert_eq!(e.to_string(), "field `amount` is not a valid number");
        let e = EncodingError::UnknownType { value: "WIRE".to_owned() };
        assert_eq!(e.to_string(), "unknown transaction type `WIRE`");
    }
}
