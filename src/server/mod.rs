//! Server construction and wiring.
//!
//! Chooses Diesel-backed or in-memory repositories from the configuration,
//! seeds the identifier allocator from the persisted maxima, and assembles
//! the Actix app with the tracing middleware and the inventory routes.

mod config;

pub use config::{AppConfig, ServerConfig};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::allocator::{AllocatorSeed, IdAllocator};
use crate::domain::ports::memory::{InMemoryLocationRepository, InMemoryPartRepository};
use crate::domain::{InventoryService, LocationService};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::{locations, parts, search};
use crate::middleware::Trace;
use crate::outbound::persistence::{DieselLocationRepository, DieselPartRepository};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use std::sync::Arc;

/// Build the handler state from the configuration.
///
/// With a database pool the repositories are Diesel-backed and the
/// allocator is seeded from the highest persisted identifiers; without one
/// the server runs entirely in memory with fresh counters.
async fn build_http_state(server_config: &ServerConfig) -> std::io::Result<HttpState> {
    match &server_config.db_pool {
        Some(pool) => {
            let parts = Arc::new(DieselPartRepository::new(pool.clone()));
            let locations = Arc::new(DieselLocationRepository::new(pool.clone()));
            let allocator = Arc::new(
                IdAllocator::from_storage(locations.as_ref(), parts.as_ref())
                    .await
                    .map_err(|err| {
                        std::io::Error::other(format!("allocator seeding failed: {err}"))
                    })?,
            );
            info!("persistence: PostgreSQL, allocator seeded from stored identifiers");
            Ok(HttpState::new(
                Arc::new(InventoryService::new(
                    Arc::clone(&parts),
                    Arc::clone(&locations),
                    Arc::clone(&allocator),
                )),
                Arc::new(LocationService::new(locations, parts, allocator)),
            ))
        }
        None => {
            let parts = Arc::new(InMemoryPartRepository::new());
            let locations = Arc::new(InMemoryLocationRepository::new());
            let allocator = Arc::new(IdAllocator::new(AllocatorSeed::default()));
            info!("persistence: in-memory stores");
            Ok(HttpState::new(
                Arc::new(InventoryService::new(
                    Arc::clone(&parts),
                    Arc::clone(&locations),
                    Arc::clone(&allocator),
                )),
                Arc::new(LocationService::new(locations, parts, allocator)),
            ))
        }
    }
}

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/inventory")
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
        .service(search::search_parts);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the allocator cannot be seeded or
/// when binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    server_config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&server_config).await?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(server_config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
