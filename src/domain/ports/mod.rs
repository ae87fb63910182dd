//! Domain ports: driving use-case traits and outbound repository traits.
//!
//! Inbound adapters depend on the driving ports; outbound adapters
//! implement the repository ports. In-memory fixture implementations back
//! tests and database-less runs.

mod inventory;
mod location_repository;
pub mod memory;
mod part_repository;

pub use inventory::{
    CreateLocationRequest, CreatePartRequest, LoanRequest, LocationsService, PartKey,
    PartsService, UpdatePartRequest,
};
pub use location_repository::{LocationRepository, LocationRepositoryError};
pub use part_repository::{PartRepository, PartRepositoryError};

#[cfg(test)]
pub use location_repository::MockLocationRepository;
#[cfg(test)]
pub use part_repository::MockPartRepository;
