//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on the driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LocationsService, PartsService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Part use-cases.
    pub parts: Arc<dyn PartsService>,
    /// Location use-cases.
    pub locations: Arc<dyn LocationsService>,
}

impl HttpState {
    /// Bundle the driving ports for handler injection.
    pub fn new(parts: Arc<dyn PartsService>, locations: Arc<dyn LocationsService>) -> Self {
        Self { parts, locations }
    }
}
