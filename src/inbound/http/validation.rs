//! Shared request-shape validation for inbound HTTP adapters.
//!
//! Field-level validation (required fields, enum membership, numeric
//! bounds, timestamp formats) happens here, before a request reaches a
//! service. Referential checks against stored state stay in the domain
//! services. Every failure carries `{ field, code }` details so clients can
//! attach messages to form fields.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::{Error, PartStatus};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidStatus,
    QuantityOutOfRange,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidStatus => "invalid_status",
            ErrorCode::QuantityOutOfRange => "quantity_out_of_range",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn field_error(field: FieldName, message: String, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn field_value_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": code.as_str(),
    }))
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let name = field.as_str();
    field_error(
        field,
        format!("missing required field: {name}"),
        ErrorCode::MissingField,
    )
}

/// Require a non-blank string field.
pub(crate) fn require_string(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(missing_field_error(field)),
    }
}

/// Accept an absent field, reject a supplied-but-blank one.
pub(crate) fn optional_non_blank(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<String>, Error> {
    match value {
        Some(value) if value.trim().is_empty() => Err(missing_field_error(field)),
        other => Ok(other),
    }
}

/// Parse an optional status against the closed vocabulary.
pub(crate) fn parse_optional_status(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<PartStatus>, Error> {
    let Some(raw) = value else {
        return Ok(None);
    };
    raw.parse::<PartStatus>().map(Some).map_err(|_| {
        let allowed: Vec<&str> = PartStatus::ALL.iter().map(|s| s.as_str()).collect();
        let name = field.as_str();
        field_value_error(
            field,
            format!("{name} must be one of: {}", allowed.join(", ")),
            ErrorCode::InvalidStatus,
            raw,
        )
    })
}

/// Quantity counts physical items; zero and negatives are rejected.
pub(crate) fn ensure_optional_quantity(
    value: Option<i32>,
    field: FieldName,
) -> Result<Option<i32>, Error> {
    match value {
        Some(quantity) if quantity < 1 => {
            let name = field.as_str();
            Err(field_value_error(
                field,
                format!("{name} must be at least 1"),
                ErrorCode::QuantityOutOfRange,
                quantity.to_string(),
            ))
        }
        other => Ok(other),
    }
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    field_value_error(
        field,
        format!("{name} must be an RFC 3339 timestamp"),
        ErrorCode::InvalidTimestamp,
        value,
    )
}

pub(crate) fn parse_optional_rfc3339_timestamp(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<DateTime<Utc>>, Error> {
    value
        .map(|raw| {
            DateTime::parse_from_rfc3339(&raw)
                .map(|timestamp| timestamp.with_timezone(&Utc))
                .map_err(|_| invalid_timestamp_error(field, &raw))
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const FIELD: FieldName = FieldName::new("quantity");

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    #[case(Some("   ".to_owned()))]
    fn require_string_rejects_missing_and_blank(#[case] value: Option<String>) {
        let err = require_string(value, FieldName::new("partName")).expect_err("rejected");
        let details = err.details.expect("details");
        assert_eq!(details["field"], "partName");
        assert_eq!(details["code"], "missing_field");
    }

    #[test]
    fn require_string_accepts_non_blank() {
        let value = require_string(Some("Resistor".into()), FieldName::new("partName"))
            .expect("accepted");
        assert_eq!(value, "Resistor");
    }

    #[test]
    fn parse_optional_status_accepts_vocabulary() {
        let status = parse_optional_status(Some("loaned".into()), FieldName::new("status"))
            .expect("accepted");
        assert_eq!(status, Some(PartStatus::Loaned));
    }

    #[test]
    fn parse_optional_status_rejects_unknown_value() {
        let err = parse_optional_status(Some("broken".into()), FieldName::new("status"))
            .expect_err("rejected");
        let details = err.details.expect("details");
        assert_eq!(details["code"], "invalid_status");
        assert_eq!(details["value"], "broken");
    }

    #[rstest]
    #[case(0)]
    #[case(-3)]
    fn quantity_below_one_is_rejected(#[case] quantity: i32) {
        let err = ensure_optional_quantity(Some(quantity), FIELD).expect_err("rejected");
        let details = err.details.expect("details");
        assert_eq!(details["code"], "quantity_out_of_range");
    }

    #[test]
    fn absent_quantity_passes_through() {
        assert_eq!(ensure_optional_quantity(None, FIELD).expect("ok"), None);
    }

    #[test]
    fn timestamps_must_be_rfc3339() {
        let field = FieldName::new("expectedReturn");
        let parsed =
            parse_optional_rfc3339_timestamp(Some("2026-03-01T12:00:00Z".into()), field)
                .expect("accepted");
        assert!(parsed.is_some());

        let err = parse_optional_rfc3339_timestamp(Some("next tuesday".into()), field)
            .expect_err("rejected");
        let details = err.details.expect("details");
        assert_eq!(details["code"], "invalid_timestamp");
    }
}
