//! Shared fixtures for handler tests: an app wired over in-memory stores.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::domain::allocator::{AllocatorSeed, IdAllocator};
use crate::domain::ports::memory::{InMemoryLocationRepository, InMemoryPartRepository};
use crate::domain::{InventoryService, LocationService};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{locations, parts, search};

/// Handler state backed by fresh in-memory repositories.
pub(crate) fn test_state() -> HttpState {
    let part_repo = Arc::new(InMemoryPartRepository::new());
    let location_repo = Arc::new(InMemoryLocationRepository::new());
    let allocator = Arc::new(IdAllocator::new(AllocatorSeed::default()));

    HttpState::new(
        Arc::new(InventoryService::new(
            Arc::clone(&part_repo),
            Arc::clone(&location_repo),
            Arc::clone(&allocator),
        )),
        Arc::new(LocationService::new(location_repo, part_repo, allocator)),
    )
}

/// An app exposing the full inventory surface over in-memory stores.
pub(crate) fn test_app() -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(test_state()))
        .service(
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
