//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: the inventory endpoints (parts, locations, search) and the
//!   health probes
//! - **Schemas**: request/response bodies from the inbound layer plus the
//!   error wrappers that keep domain types framework-free
//!
//! The generated specification backs the Swagger UI served at `/docs` in
//! debug builds.

use crate::inbound::http::locations::{CreateLocationBody, LocationResponse};
use crate::inbound::http::parts::{
    CreatePartBody, LoanDto, LoanPartBody, PartResponse, UpdatePartBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockroom API",
        description = "Inventory tracking: parts, storage locations, and the loan lifecycle."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::parts::create_part,
        crate::inbound::http::parts::list_parts,
        crate::inbound::http::parts::get_part,
        crate::inbound::http::parts::update_part,
        crate::inbound::http::parts::delete_part,
        crate::inbound::http::parts::loan_part,
        crate::inbound::http::parts::return_part,
        crate::inbound::http::locations::create_location,
        crate::inbound::http::locations::get_locations,
        crate::inbound::http::locations::delete_location,
        crate::inbound::http::search::search_parts,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        PartResponse,
        CreatePartBody,
        UpdatePartBody,
        LoanPartBody,
        LoanDto,
        LocationResponse,
        CreateLocationBody,
        ErrorSchema,
        ErrorCodeSchema,
    )),
    tags(
        (name = "parts", description = "Part records and the loan lifecycle"),
        (name = "locations", description = "Storage locations"),
        (name = "search", description = "Part search by location, type, or status"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
