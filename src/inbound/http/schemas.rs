//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI
//! documentation using utoipa's external schema registration.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails field-level validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A referenced location or container does not exist.
    #[schema(rename = "unknown_reference")]
    UnknownReference,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The operation conflicts with current state.
    #[schema(rename = "conflict")]
    Conflict,
    /// The bounded identifier space is exhausted.
    #[schema(rename = "range_exhausted")]
    RangeExhausted,
    /// The persistence backend could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "missing required field: partName")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    trace_id: Option<String>,
    /// Supplementary error details for clients, e.g. the offending field
    /// for validation failures or the blocking part count for location
    /// deletion.
    details: Option<serde_json::Value>,
}
