//! Part API handlers.
//!
//! ```text
//! POST   /api/inventory/parts               Create a part
//! GET    /api/inventory/parts               List all parts
//! GET    /api/inventory/parts/{key}         Fetch by id or name
//! PUT    /api/inventory/parts/{key}         Partial update
//! DELETE /api/inventory/parts/{key}         Delete
//! POST   /api/inventory/parts/{key}/loan    Loan to a borrower
//! POST   /api/inventory/parts/{key}/return  Return to stock
//! ```
//!
//! A numeric `{key}` addresses the canonical identifier; anything else is a
//! name lookup where the first match wins.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::{CreatePartRequest, LoanRequest, PartKey, UpdatePartRequest};
use crate::domain::{Loan, Part, PartStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, ensure_optional_quantity, optional_non_blank, parse_optional_rfc3339_timestamp,
    parse_optional_status, require_string,
};

/// Loan metadata on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanDto {
    /// Borrower the part was handed to.
    pub loaned_to: String,
    /// Agreed return date, when one was set.
    pub expected_return: Option<DateTime<Utc>>,
}

impl From<Loan> for LoanDto {
    fn from(loan: Loan) -> Self {
        Self {
            loaned_to: loan.loaned_to,
            expected_return: loan.expected_return,
        }
    }
}

/// Stored part as returned to clients.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PartResponse {
    pub part_id: i32,
    pub part_name: String,
    pub part_description: Option<String>,
    #[serde(rename = "type")]
    pub part_type: String,
    /// One of `available`, `loaned`, `maintenance`, `disposed`.
    #[schema(value_type = String, example = "available")]
    pub status: PartStatus,
    pub date_added: DateTime<Utc>,
    pub current_loan: Option<LoanDto>,
    pub quantity: i32,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
    pub category: Option<String>,
}

impl From<Part> for PartResponse {
    fn from(part: Part) -> Self {
        Self {
            part_id: part.id,
            part_name: part.name,
            part_description: part.description,
            part_type: part.part_type,
            status: part.status,
            date_added: part.date_added,
            current_loan: part.current_loan.map(LoanDto::from),
            quantity: part.quantity,
            manufacturer: part.manufacturer,
            model: part.model,
            location_id: part.location_id,
            container: part.container,
            row: part.row,
            position: part.position,
            category: part.category,
        }
    }
}

fn to_responses(parts: Vec<Part>) -> Vec<PartResponse> {
    parts.into_iter().map(PartResponse::from).collect()
}

/// Part creation body. `partName` and `type` are required; everything else
/// is optional and validated field by field.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartBody {
    pub part_name: Option<String>,
    #[serde(rename = "type")]
    pub part_type: Option<String>,
    /// Client-supplied identifier; allocated when absent.
    pub part_id: Option<i32>,
    pub part_description: Option<String>,
    /// One of `available`, `loaned`, `maintenance`, `disposed`.
    pub status: Option<String>,
    pub quantity: Option<i32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location_name: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

fn validate_create_part(body: CreatePartBody) -> ApiResult<CreatePartRequest> {
    Ok(CreatePartRequest {
        name: require_string(body.part_name, FieldName::new("partName"))?,
        part_type: require_string(body.part_type, FieldName::new("type"))?,
        id: body.part_id,
        description: body.part_description,
        status: parse_optional_status(body.status, FieldName::new("status"))?,
        quantity: ensure_optional_quantity(body.quantity, FieldName::new("quantity"))?,
        manufacturer: body.manufacturer,
        model: body.model,
        category: body.category,
        location_name: optional_non_blank(body.location_name, FieldName::new("locationName"))?,
        location_id: body.location_id,
        container: body.container,
        row: body.row,
        position: body.position,
    })
}

/// Partial update body. Absent fields are preserved; `partId` and
/// `dateAdded` are not updatable and have no counterpart here.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartBody {
    pub part_name: Option<String>,
    pub part_description: Option<String>,
    #[serde(rename = "type")]
    pub part_type: Option<String>,
    /// One of `available`, `loaned`, `maintenance`, `disposed`.
    pub status: Option<String>,
    pub quantity: Option<i32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location_name: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

fn validate_update_part(body: UpdatePartBody) -> ApiResult<UpdatePartRequest> {
    Ok(UpdatePartRequest {
        name: optional_non_blank(body.part_name, FieldName::new("partName"))?,
        description: body.part_description,
        part_type: optional_non_blank(body.part_type, FieldName::new("type"))?,
        status: parse_optional_status(body.status, FieldName::new("status"))?,
        quantity: ensure_optional_quantity(body.quantity, FieldName::new("quantity"))?,
        manufacturer: body.manufacturer,
        model: body.model,
        category: body.category,
        location_name: optional_non_blank(body.location_name, FieldName::new("locationName"))?,
        location_id: body.location_id,
        container: body.container,
        row: body.row,
        position: body.position,
    })
}

/// Loan request body.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanPartBody {
    /// Borrower the part is handed to. Required.
    pub loaned_to: Option<String>,
    /// Agreed return date, RFC 3339.
    pub expected_return: Option<String>,
}

fn validate_loan_part(body: LoanPartBody) -> ApiResult<LoanRequest> {
    Ok(LoanRequest {
        loaned_to: require_string(body.loaned_to, FieldName::new("loanedTo"))?,
        expected_return: parse_optional_rfc3339_timestamp(
            body.expected_return,
            FieldName::new("expectedReturn"),
        )?,
    })
}

/// Create a part.
///
/// Referenced locations and containers must already exist; the stored
/// record, including the assigned identifier, is returned.
#[utoipa::path(
    post,
    path = "/api/inventory/parts",
    request_body = CreatePartBody,
    responses(
        (status = 201, description = "Part created", body = PartResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 422, description = "Referenced location or container does not exist", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Identifier already in use", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[post("/parts")]
pub async fn create_part(
    state: web::Data<HttpState>,
    body: web::Json<CreatePartBody>,
) -> ApiResult<HttpResponse> {
    let request = validate_create_part(body.into_inner())?;
    let part = state.parts.create(request).await?;
    Ok(HttpResponse::Created().json(PartResponse::from(part)))
}

/// List every part, ordered by name.
#[utoipa::path(
    get,
    path = "/api/inventory/parts",
    responses(
        (status = 200, description = "All parts", body = [PartResponse])
    ),
    tags = ["parts"]
)]
#[get("/parts")]
pub async fn list_parts(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let parts = state.parts.list().await?;
    Ok(HttpResponse::Ok().json(to_responses(parts)))
}

/// Fetch a single part by identifier or name.
#[utoipa::path(
    get,
    path = "/api/inventory/parts/{key}",
    params(("key" = String, Path, description = "Part identifier, or name for a first-match lookup")),
    responses(
        (status = 200, description = "The part", body = PartResponse),
        (status = 404, description = "No such part", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[get("/parts/{key}")]
pub async fn get_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = PartKey::from_segment(&path.into_inner());
    let part = state.parts.get(&key).await?;
    Ok(HttpResponse::Ok().json(PartResponse::from(part)))
}

/// Merge a partial update onto a part.
#[utoipa::path(
    put,
    path = "/api/inventory/parts/{key}",
    params(("key" = String, Path, description = "Part identifier, or name for a first-match lookup")),
    request_body = UpdatePartBody,
    responses(
        (status = 200, description = "Updated part", body = PartResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No such part", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 422, description = "Referenced location or container does not exist", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[put("/parts/{key}")]
pub async fn update_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<UpdatePartBody>,
) -> ApiResult<HttpResponse> {
    let key = PartKey::from_segment(&path.into_inner());
    let patch = validate_update_part(body.into_inner())?;
    let part = state.parts.update(&key, patch).await?;
    Ok(HttpResponse::Ok().json(PartResponse::from(part)))
}

/// Delete a part.
#[utoipa::path(
    delete,
    path = "/api/inventory/parts/{key}",
    params(("key" = String, Path, description = "Part identifier, or name for a first-match lookup")),
    responses(
        (status = 204, description = "Part deleted"),
        (status = 404, description = "No such part", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[delete("/parts/{key}")]
pub async fn delete_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = PartKey::from_segment(&path.into_inner());
    state.parts.delete(&key).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Loan a part to a borrower.
///
/// The part must currently be available; double-loaning is rejected.
#[utoipa::path(
    post,
    path = "/api/inventory/parts/{key}/loan",
    params(("key" = String, Path, description = "Part identifier, or name for a first-match lookup")),
    request_body = LoanPartBody,
    responses(
        (status = 200, description = "Part loaned", body = PartResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "No such part", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Part is not available", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[post("/parts/{key}/loan")]
pub async fn loan_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    body: web::Json<LoanPartBody>,
) -> ApiResult<HttpResponse> {
    let key = PartKey::from_segment(&path.into_inner());
    let request = validate_loan_part(body.into_inner())?;
    let part = state.parts.loan(&key, request).await?;
    Ok(HttpResponse::Ok().json(PartResponse::from(part)))
}

/// Return a loaned part to stock.
#[utoipa::path(
    post,
    path = "/api/inventory/parts/{key}/return",
    params(("key" = String, Path, description = "Part identifier, or name for a first-match lookup")),
    responses(
        (status = 200, description = "Part returned", body = PartResponse),
        (status = 404, description = "No such part", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["parts"]
)]
#[post("/parts/{key}/return")]
pub async fn return_part(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let key = PartKey::from_segment(&path.into_inner());
    let part = state.parts.return_to_stock(&key).await?;
    Ok(HttpResponse::Ok().json(PartResponse::from(part)))
}
