//! Location use-cases: create, lookup, listing, and guarded deletion.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::allocator::IdAllocator;
use crate::domain::ports::{
    CreateLocationRequest, LocationRepository, LocationRepositoryError, LocationsService,
    PartRepository,
};
use crate::domain::{Error, Location, LocationDraft, LocationValidationError};

use super::inventory_service::map_part_store_error;

/// Map location store failures onto domain errors.
pub(crate) fn map_location_store_error(error: LocationRepositoryError) -> Error {
    match error {
        LocationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("location store unavailable: {message}"))
        }
        LocationRepositoryError::Query { message } => {
            Error::internal(format!("location store error: {message}"))
        }
        LocationRepositoryError::DuplicateId { message } => {
            Error::conflict(format!("location identifier already in use: {message}"))
                .with_details(json!({ "code": "duplicate_identifier" }))
        }
    }
}

fn map_location_validation_error(error: LocationValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Location service backed by the repository ports and the identifier
/// allocator.
///
/// Deletion runs a read-then-delete sequence with no wrapping transaction:
/// a part created between the count and the delete slips past the guard.
/// Accepted for the target write concurrency and documented rather than
/// hidden.
#[derive(Clone)]
pub struct LocationService<L, P> {
    locations: Arc<L>,
    parts: Arc<P>,
    allocator: Arc<IdAllocator>,
}

impl<L, P> LocationService<L, P> {
    /// Create a new service with the given repositories and allocator.
    pub fn new(locations: Arc<L>, parts: Arc<P>, allocator: Arc<IdAllocator>) -> Self {
        Self {
            locations,
            parts,
            allocator,
        }
    }
}

#[async_trait]
impl<L, P> LocationsService for LocationService<L, P>
where
    L: LocationRepository,
    P: PartRepository,
{
    async fn create(&self, request: CreateLocationRequest) -> Result<Location, Error> {
        let id = self.allocator.next_location_id()?;

        let location = Location::new(LocationDraft {
            id,
            name: request.name,
            container: request.container,
            row: request.row,
            position: request.position,
        })
        .map_err(map_location_validation_error)?;

        self.locations
            .insert(&location)
            .await
            .map_err(map_location_store_error)
    }

    async fn get_by_name(&self, name: &str) -> Result<Location, Error> {
        self.locations
            .find_first_by_name(name)
            .await
            .map_err(map_location_store_error)?
            .ok_or_else(|| {
                Error::not_found(format!("location \"{name}\" not found")).with_details(json!({
                    "locationName": name,
                    "code": "unknown_location",
                }))
            })
    }

    async fn list(&self) -> Result<Vec<Location>, Error> {
        self.locations
            .list_all()
            .await
            .map_err(map_location_store_error)
    }

    async fn delete(&self, name: &str) -> Result<(), Error> {
        let location = self.get_by_name(name).await?;

        let referencing = self
            .parts
            .count_for_location(location.id)
            .await
            .map_err(map_part_store_error)?;
        if referencing > 0 {
            return Err(Error::conflict(format!(
                "location \"{name}\" still has {referencing} referencing part(s)"
            ))
            .with_details(json!({
                "locationName": name,
                "partCount": referencing,
                "code": "location_in_use",
            })));
        }

        let deleted = self
            .locations
            .delete(location.id)
            .await
            .map_err(map_location_store_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("location \"{name}\" not found")))
        }
    }
}
