//! Location API handlers.
//!
//! ```text
//! POST   /api/inventory/locations          Create a location
//! GET    /api/inventory/locations?name=    List all, or fetch one by name
//! DELETE /api/inventory/locations/{name}   Delete (blocked while in use)
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::Location;
use crate::domain::ports::CreateLocationRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, require_string};

/// Stored location as returned to clients.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    pub location_id: i32,
    pub location_name: String,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

impl From<Location> for LocationResponse {
    fn from(location: Location) -> Self {
        Self {
            location_id: location.id,
            location_name: location.name,
            container: location.container,
            row: location.row,
            position: location.position,
        }
    }
}

/// Location creation body. `locationName` is required.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateLocationBody {
    pub location_name: Option<String>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

fn validate_create_location(body: CreateLocationBody) -> ApiResult<CreateLocationRequest> {
    Ok(CreateLocationRequest {
        name: require_string(body.location_name, FieldName::new("locationName"))?,
        container: body.container,
        row: body.row,
        position: body.position,
    })
}

/// Query string for the listing endpoint.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct LocationsQuery {
    /// When present, fetch the first location with this name instead of
    /// listing everything.
    pub name: Option<String>,
}

/// Create a location.
#[utoipa::path(
    post,
    path = "/api/inventory/locations",
    request_body = CreateLocationBody,
    responses(
        (status = 201, description = "Location created", body = LocationResponse),
        (status = 400, description = "Invalid request", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 500, description = "Location identifier space exhausted", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["locations"]
)]
#[post("/locations")]
pub async fn create_location(
    state: web::Data<HttpState>,
    body: web::Json<CreateLocationBody>,
) -> ApiResult<HttpResponse> {
    let request = validate_create_location(body.into_inner())?;
    let location = state.locations.create(request).await?;
    Ok(HttpResponse::Created().json(LocationResponse::from(location)))
}

/// List all locations, or fetch a single one by name.
#[utoipa::path(
    get,
    path = "/api/inventory/locations",
    params(LocationsQuery),
    responses(
        (status = 200, description = "All locations, or the named one", body = [LocationResponse]),
        (status = 404, description = "No location with the given name", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["locations"]
)]
#[get("/locations")]
pub async fn get_locations(
    state: web::Data<HttpState>,
    query: web::Query<LocationsQuery>,
) -> ApiResult<HttpResponse> {
    match &query.name {
        Some(name) => {
            let location = state.locations.get_by_name(name).await?;
            Ok(HttpResponse::Ok().json(LocationResponse::from(location)))
        }
        None => {
            let locations = state.locations.list().await?;
            let responses: Vec<LocationResponse> =
                locations.into_iter().map(LocationResponse::from).collect();
            Ok(HttpResponse::Ok().json(responses))
        }
    }
}

/// Delete a location by name.
///
/// Blocked while any part still references the location; the error reports
/// the exact blocking count.
#[utoipa::path(
    delete,
    path = "/api/inventory/locations/{name}",
    params(("name" = String, Path, description = "Location name; first match is canonical")),
    responses(
        (status = 204, description = "Location deleted"),
        (status = 404, description = "No such location", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Location still has referencing parts", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["locations"]
)]
#[delete("/locations/{name}")]
pub async fn delete_location(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.locations.delete(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
