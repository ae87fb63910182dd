//! End-to-end coverage of the REST surface over in-memory stores.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use serde_json::{Value, json};

use stockroom::Trace;
use stockroom::domain::allocator::{AllocatorSeed, IdAllocator};
use stockroom::domain::ports::memory::{InMemoryLocationRepository, InMemoryPartRepository};
use stockroom::domain::{InventoryService, LocationService};
use stockroom::inbound::http::state::HttpState;
use stockroom::inbound::http::{locations, parts, search};

struct Stores {
    parts: Arc<InMemoryPartRepository>,
    locations: Arc<InMemoryLocationRepository>,
}

fn build_state(stores: &Stores) -> HttpState {
    let allocator = Arc::new(IdAllocator::new(AllocatorSeed::default()));
    HttpState::new(
        Arc::new(InventoryService::new(
            Arc::clone(&stores.parts),
            Arc::clone(&stores.locations),
            Arc::clone(&allocator),
        )),
        Arc::new(LocationService::new(
            Arc::clone(&stores.locations),
            Arc::clone(&stores.parts),
            allocator,
        )),
    )
}

fn build_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).wrap(Trace).service(
        web::scope("/api/inventory")
            .service(parts::create_part)
            .service(parts::list_parts)
            .service(parts::get_part)
            .service(parts::update_part)
            .service(parts::delete_part)
            .service(parts::loan_part)
            .service(parts::return_part)
            .service(locations::create_location)
            .service(locations::get_locations)
            .service(locations::delete_location)
            .service(search::search_parts),
    )
}

fn fresh_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let stores = Stores {
        parts: Arc::new(InMemoryPartRepository::new()),
        locations: Arc::new(InMemoryLocationRepository::new()),
    };
    build_app(build_state(&stores))
}

async fn post_json(
    app: &impl Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    >,
    uri: &str,
    body: Value,
) -> actix_web::dev::ServiceResponse {
    let request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(body)
        .to_request();
    actix_test::call_service(app, request).await
}

#[actix_web::test]
async fn worked_example_full_lifecycle() {
    let app = actix_test::init_service(fresh_app()).await;

    // Create location "Shelf-A": first identifier in the location range.
    let response = post_json(
        &app,
        "/api/inventory/locations",
        json!({ "locationName": "Shelf-A" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let location: Value = actix_test::read_body_json(response).await;
    assert_eq!(location["locationId"], 1);

    // Create a part at that location: first identifier in the part range.
    let response = post_json(
        &app,
        "/api/inventory/parts",
        json!({
            "partName": "Resistor 10k",
            "type": "resistor",
            "locationName": "Shelf-A",
            "quantity": 50
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let part: Value = actix_test::read_body_json(response).await;
    assert_eq!(part["partId"], 101);
    assert_eq!(part["status"], "available");
    assert_eq!(part["locationId"], 1);

    // Loan it out.
    let response = post_json(
        &app,
        "/api/inventory/parts/101/loan",
        json!({ "loanedTo": "Alice" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let loaned: Value = actix_test::read_body_json(response).await;
    assert_eq!(loaned["status"], "loaned");

    // Deleting the location is blocked with the exact part count.
    let request = actix_test::TestRequest::delete()
        .uri("/api/inventory/locations/Shelf-A")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let conflict: Value = actix_test::read_body_json(response).await;
    assert_eq!(conflict["code"], "conflict");
    assert_eq!(conflict["details"]["partCount"], 1);

    // Delete the part, then the location goes through.
    let request = actix_test::TestRequest::delete()
        .uri("/api/inventory/parts/101")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let request = actix_test::TestRequest::delete()
        .uri("/api/inventory/locations/Shelf-A")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn stored_record_round_trips_through_get() {
    let app = actix_test::init_service(fresh_app()).await;

    post_json(
        &app,
        "/api/inventory/locations",
        json!({ "locationName": "Shelf-A", "container": "Bin 3" }),
    )
    .await;

    let response = post_json(
        &app,
        "/api/inventory/parts",
        json!({
            "partName": "Resistor 10k",
            "type": "resistor",
            "locationName": "Shelf-A",
            "container": "Bin 3",
            "manufacturer": "Vishay",
            "quantity": 50
        }),
    )
    .await;
    let created: Value = actix_test::read_body_json(response).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/inventory/parts/101")
        .to_request();
    let fetched: Value =
        actix_test::read_body_json(actix_test::call_service(&app, request).await).await;

    assert_eq!(fetched, created);
}

#[actix_web::test]
async fn create_against_missing_location_persists_nothing() {
    let app = actix_test::init_service(fresh_app()).await;

    let response = post_json(
        &app,
        "/api/inventory/parts",
        json!({
            "partName": "Resistor 10k",
            "type": "resistor",
            "locationName": "Nowhere"
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let request = actix_test::TestRequest::get()
        .uri("/api/inventory/parts")
        .to_request();
    let listed: Value =
        actix_test::read_body_json(actix_test::call_service(&app, request).await).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(0));
}

#[actix_web::test]
async fn error_responses_carry_the_trace_identifier() {
    let app = actix_test::init_service(fresh_app()).await;

    let request = actix_test::TestRequest::get()
        .uri("/api/inventory/parts/999")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().contains_key("trace-id"));

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "not_found");
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn allocator_reseeded_from_storage_never_reissues_identifiers() {
    // Shared stores survive the simulated restart; the allocator does not.
    let stores = Stores {
        parts: Arc::new(InMemoryPartRepository::new()),
        locations: Arc::new(InMemoryLocationRepository::new()),
    };

    let app = actix_test::init_service(build_app(build_state(&stores))).await;
    post_json(
        &app,
        "/api/inventory/parts",
        json!({ "partName": "Resistor 10k", "type": "resistor", "partId": 500 }),
    )
    .await;

    // "Restart": fresh services over the same stores, allocator reseeded
    // from the persisted maxima.
    let allocator = Arc::new(
        IdAllocator::from_storage(stores.locations.as_ref(), stores.parts.as_ref())
            .await
            .expect("seed allocator"),
    );
    let state = HttpState::new(
        Arc::new(InventoryService::new(
            Arc::clone(&stores.parts),
            Arc::clone(&stores.locations),
            Arc::clone(&allocator),
        )),
        Arc::new(LocationService::new(
            Arc::clone(&stores.locations),
            Arc::clone(&stores.parts),
            allocator,
        )),
    );
    let app = actix_test::init_service(build_app(state)).await;

    let response = post_json(
        &app,
        "/api/inventory/parts",
        json!({ "partName": "Capacitor 1u", "type": "capacitor" }),
    )
    .await;
    let part: Value = actix_test::read_body_json(response).await;
    assert_eq!(part["partId"], 501);
}
