//! Part use-cases: create with referential checks, lookup, merge-update,
//! loan/return transitions, and the find-by searches.
//!
//! The referential checks and the writes that follow them are separate
//! statements with no wrapping transaction. Two concurrent creates can both
//! pass a check before either insert commits; the losing insert surfaces a
//! duplicate-identifier conflict to its caller, who may resubmit.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;

use crate::domain::allocator::IdAllocator;
use crate::domain::ports::{
    CreatePartRequest, LoanRequest, LocationRepository, PartKey, PartRepository,
    PartRepositoryError, PartsService, UpdatePartRequest,
};
use crate::domain::{Error, Loan, Part, PartDraft, PartStatus, PartValidationError};

use super::location_service::map_location_store_error;

/// Map part store failures onto domain errors.
///
/// Connection loss is retryable and reported as unavailability; everything
/// else is either the documented identifier race (a conflict) or an
/// internal fault.
pub(crate) fn map_part_store_error(error: PartRepositoryError) -> Error {
    match error {
        PartRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("part store unavailable: {message}"))
        }
        PartRepositoryError::Query { message } => {
            Error::internal(format!("part store error: {message}"))
        }
        PartRepositoryError::DuplicateId { message } => {
            Error::conflict(format!("part identifier already in use: {message}"))
                .with_details(json!({ "code": "duplicate_identifier" }))
        }
    }
}

fn map_part_validation_error(error: PartValidationError) -> Error {
    Error::invalid_request(error.to_string())
}

/// Part service backed by the repository ports and the identifier allocator.
#[derive(Clone)]
pub struct InventoryService<P, L> {
    parts: Arc<P>,
    locations: Arc<L>,
    allocator: Arc<IdAllocator>,
}

impl<P, L> InventoryService<P, L> {
    /// Create a new service with the given repositories and allocator.
    pub fn new(parts: Arc<P>, locations: Arc<L>, allocator: Arc<IdAllocator>) -> Self {
        Self {
            parts,
            locations,
            allocator,
        }
    }
}

impl<P, L> InventoryService<P, L>
where
    P: PartRepository,
    L: LocationRepository,
{
    /// Resolve a key to the stored record: identifiers are canonical, a
    /// name falls back to the first match.
    async fn resolve(&self, key: &PartKey) -> Result<Part, Error> {
        let found = match key {
            PartKey::Id(id) => self.parts.find_by_id(*id).await,
            PartKey::Name(name) => self.parts.find_first_by_name(name).await,
        }
        .map_err(map_part_store_error)?;

        found.ok_or_else(|| {
            Error::not_found(format!("part {key} not found"))
                .with_details(json!({ "key": key.to_string(), "code": "unknown_part" }))
        })
    }

    /// Referential checks for a part placement.
    ///
    /// A location named by `location_name` must exist and resolves to its
    /// canonical identifier; a bare `location_id` must exist as given; a
    /// container must be recorded on the resolved location row. Returns the
    /// resolved location identifier, if any.
    async fn check_placement(
        &self,
        location_name: Option<&str>,
        location_id: Option<i32>,
        container: Option<&str>,
    ) -> Result<Option<i32>, Error> {
        let resolved = if let Some(name) = location_name {
            let location = self
                .locations
                .find_first_by_name(name)
                .await
                .map_err(map_location_store_error)?;
            match location {
                Some(location) => Some(location.id),
                None => {
                    return Err(Error::unknown_reference(format!(
                        "location \"{name}\" does not exist; create the location first"
                    ))
                    .with_details(json!({
                        "field": "locationName",
                        "value": name,
                        "code": "unknown_location",
                    })));
                }
            }
        } else if let Some(id) = location_id {
            let location = self
                .locations
                .find_by_id(id)
                .await
                .map_err(map_location_store_error)?;
            if location.is_none() {
                return Err(Error::unknown_reference(format!(
                    "location with id {id} does not exist"
                ))
                .with_details(json!({
                    "field": "locationId",
                    "value": id,
                    "code": "unknown_location",
                })));
            }
            Some(id)
        } else {
            None
        };

        if let (Some(id), Some(container)) = (resolved, container) {
            let exists = self
                .locations
                .container_exists(id, container)
                .await
                .map_err(map_location_store_error)?;
            if !exists {
                return Err(Error::unknown_reference(format!(
                    "container \"{container}\" does not exist in the referenced location"
                ))
                .with_details(json!({
                    "field": "container",
                    "value": container,
                    "code": "unknown_container",
                })));
            }
        }

        Ok(resolved)
    }
}

#[async_trait]
impl<P, L> PartsService for InventoryService<P, L>
where
    P: PartRepository,
    L: LocationRepository,
{
    async fn create(&self, request: CreatePartRequest) -> Result<Part, Error> {
        let location_id = self
            .check_placement(
                request.location_name.as_deref(),
                request.location_id,
                request.container.as_deref(),
            )
            .await?;

        let id = match request.id {
            Some(id) => id,
            None => self.allocator.next_part_id()?,
        };

        let part = Part::new(PartDraft {
            id,
            name: request.name,
            description: request.description,
            part_type: request.part_type,
            status: request.status.unwrap_or(PartStatus::Available),
            quantity: request.quantity.unwrap_or(1),
            date_added: Utc::now(),
            current_loan: None,
            manufacturer: request.manufacturer,
            model: request.model,
            category: request.category,
            location_id,
            container: request.container,
            row: request.row,
            position: request.position,
        })
        .map_err(map_part_validation_error)?;

        self.parts.insert(&part).await.map_err(map_part_store_error)
    }

    async fn get(&self, key: &PartKey) -> Result<Part, Error> {
        self.resolve(key).await
    }

    async fn list(&self) -> Result<Vec<Part>, Error> {
        self.parts.list_all().await.map_err(map_part_store_error)
    }

    async fn update(&self, key: &PartKey, patch: UpdatePartRequest) -> Result<Part, Error> {
        let part = self.resolve(key).await?;

        // Re-run the referential checks when the patch touches the
        // placement, against the merged location/container pair.
        let placement = if patch.touches_placement() {
            let container = patch.container.as_deref().or(part.container.as_deref());
            let fallback_id = patch.location_id.or(part.location_id);
            Some(
                self.check_placement(patch.location_name.as_deref(), fallback_id, container)
                    .await?,
            )
        } else {
            None
        };

        let merged = part
            .apply(&patch, placement)
            .map_err(map_part_validation_error)?;

        self.parts
            .update(&merged)
            .await
            .map_err(map_part_store_error)?
            .ok_or_else(|| Error::not_found(format!("part {key} not found")))
    }

    async fn delete(&self, key: &PartKey) -> Result<(), Error> {
        let part = self.resolve(key).await?;
        let deleted = self
            .parts
            .delete(part.id)
            .await
            .map_err(map_part_store_error)?;
        if deleted {
            Ok(())
        } else {
            Err(Error::not_found(format!("part {key} not found")))
        }
    }

    async fn loan(&self, key: &PartKey, request: LoanRequest) -> Result<Part, Error> {
        let part = self.resolve(key).await?;
        let loaned = part
            .loan(Loan {
                loaned_to: request.loaned_to,
                expected_return: request.expected_return,
            })
            .map_err(|err| {
                Error::conflict(err.to_string()).with_details(json!({
                    "status": err.status.as_str(),
                    "code": "part_not_available",
                }))
            })?;

        self.parts
            .update(&loaned)
            .await
            .map_err(map_part_store_error)?
            .ok_or_else(|| Error::not_found(format!("part {key} not found")))
    }

    async fn return_to_stock(&self, key: &PartKey) -> Result<Part, Error> {
        let part = self.resolve(key).await?;
        let returned = part.return_to_stock();

        self.parts
            .update(&returned)
            .await
            .map_err(map_part_store_error)?
            .ok_or_else(|| Error::not_found(format!("part {key} not found")))
    }

    async fn find_by_location(&self, location_name: &str) -> Result<Vec<Part>, Error> {
        let location = self
            .locations
            .find_first_by_name(location_name)
            .await
            .map_err(map_location_store_error)?;
        match location {
            Some(location) => self
                .parts
                .find_by_location_id(location.id)
                .await
                .map_err(map_part_store_error),
            None => Ok(Vec::new()),
        }
    }

    async fn find_by_type(&self, part_type: &str) -> Result<Vec<Part>, Error> {
        self.parts
            .find_by_type(part_type)
            .await
            .map_err(map_part_store_error)
    }

    async fn find_by_status(&self, status: PartStatus) -> Result<Vec<Part>, Error> {
        self.parts
            .find_by_status(status)
            .await
            .map_err(map_part_store_error)
    }
}
