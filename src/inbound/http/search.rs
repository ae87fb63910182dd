//! Part search endpoint.
//!
//! ```text
//! GET /api/inventory/search?location=|type=|status=
//! ```
//!
//! Filters take precedence in that order; with no recognised filter the
//! full part list is returned.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::inbound::http::ApiResult;
use crate::inbound::http::parts::PartResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_status};

/// Query string for part search.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
pub struct SearchQuery {
    /// Location name to filter by.
    pub location: Option<String>,
    /// Part type to filter by.
    #[serde(rename = "type")]
    pub part_type: Option<String>,
    /// Status to filter by: `available`, `loaned`, `maintenance`, `disposed`.
    pub status: Option<String>,
}

/// Search parts by location, type, or status.
#[utoipa::path(
    get,
    path = "/api/inventory/search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching parts, ordered by name", body = [PartResponse]),
        (status = 400, description = "Unknown status value", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["search"]
)]
#[get("/search")]
pub async fn search_parts(
    state: web::Data<HttpState>,
    query: web::Query<SearchQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();

    let parts = if let Some(location) = query.location {
        state.parts.find_by_location(&location).await?
    } else if let Some(part_type) = query.part_type {
        state.parts.find_by_type(&part_type).await?
    } else if let Some(status) =
        parse_optional_status(query.status, FieldName::new("status"))?
    {
        state.parts.find_by_status(status).await?
    } else {
        state.parts.list().await?
    };

    let responses: Vec<PartResponse> = parts.into_iter().map(PartResponse::from).collect();
    Ok(HttpResponse::Ok().json(responses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::test_utils::test_app;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use serde_json::{Value, json};

    async fn seed(app: &impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >) {
        let create_location = actix_test::TestRequest::post()
            .uri("/api/inventory/locations")
            .set_json(json!({ "locationName": "Shelf-A" }))
            .to_request();
        actix_test::call_service(app, create_location).await;

        for (name, part_type, location) in [
            ("Resistor 10k", "resistor", Some("Shelf-A")),
            ("Capacitor 1u", "capacitor", Some("Shelf-A")),
            ("Relay 5V", "relay", None),
        ] {
            let mut body = json!({ "partName": name, "type": part_type });
            if let Some(location) = location {
                body["locationName"] = json!(location);
            }
            let request = actix_test::TestRequest::post()
                .uri("/api/inventory/parts")
                .set_json(body)
                .to_request();
            actix_test::call_service(app, request).await;
        }
    }

    fn names(body: &Value) -> Vec<&str> {
        body.as_array()
            .expect("array body")
            .iter()
            .filter_map(|part| part["partName"].as_str())
            .collect()
    }

    #[actix_web::test]
    async fn location_filter_takes_precedence() {
        let app = actix_test::init_service(test_app()).await;
        seed(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/inventory/search?location=Shelf-A&type=relay")
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(names(&body), vec!["Capacitor 1u", "Resistor 10k"]);
    }

    #[actix_web::test]
    async fn type_filter_matches_exactly() {
        let app = actix_test::init_service(test_app()).await;
        seed(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/inventory/search?type=relay")
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(names(&body), vec!["Relay 5V"]);
    }

    #[actix_web::test]
    async fn status_filter_parses_the_vocabulary() {
        let app = actix_test::init_service(test_app()).await;
        seed(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/inventory/search?status=loaned")
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(names(&body).len(), 0);
    }

    #[actix_web::test]
    async fn unknown_status_is_rejected() {
        let app = actix_test::init_service(test_app()).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/inventory/search?status=borrowed")
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn no_filter_returns_everything_ordered_by_name() {
        let app = actix_test::init_service(test_app()).await;
        seed(&app).await;

        let request = actix_test::TestRequest::get()
            .uri("/api/inventory/search")
            .to_request();
        let body: Value =
            actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
        assert_eq!(
            names(&body),
            vec!["Capacitor 1u", "Relay 5V", "Resistor 10k"]
        );
    }
}
