//! Driving ports for the inventory use-cases.
//!
//! HTTP handlers depend on these traits only; the service implementations
//! live in [`crate::domain::inventory_service`] and
//! [`crate::domain::location_service`]. Request structs carry
//! shape-validated input; referential checks happen inside the services.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Error, Location, Part, PartStatus};

/// Key addressing a single part on the item routes.
///
/// Integer identifiers are canonical; a non-numeric path segment falls back
/// to a name lookup where the first match is canonical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartKey {
    /// Canonical integer identifier.
    Id(i32),
    /// Alternate lookup by part name.
    Name(String),
}

impl PartKey {
    /// Parse a raw path segment: numeric → id, anything else → name.
    pub fn from_segment(segment: &str) -> Self {
        match segment.parse::<i32>() {
            Ok(id) => Self::Id(id),
            Err(_) => Self::Name(segment.to_owned()),
        }
    }
}

impl std::fmt::Display for PartKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "{id}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}

/// Shape-validated input for part creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreatePartRequest {
    /// Required classification string, free-form.
    pub part_type: String,
    /// Required human-readable name.
    pub name: String,
    /// Client-supplied identifier; allocated when absent. A collision with
    /// an existing identifier surfaces as a conflict.
    pub id: Option<i32>,
    pub description: Option<String>,
    /// Defaults to [`PartStatus::Available`].
    pub status: Option<PartStatus>,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    /// Referenced location by name; must exist and resolves to the
    /// canonical identifier.
    pub location_name: Option<String>,
    /// Referenced location by identifier; must exist. Ignored when
    /// `location_name` is supplied.
    pub location_id: Option<i32>,
    /// Container within the referenced location; the pair must be recorded.
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

/// Shape-validated partial update. Absent fields are preserved; `partId`
/// and `dateAdded` are not updatable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdatePartRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub part_type: Option<String>,
    pub status: Option<PartStatus>,
    pub quantity: Option<i32>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub location_name: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

impl UpdatePartRequest {
    /// Whether the patch touches the referenced location or container, in
    /// which case the referential checks must be re-run on the merged
    /// placement.
    pub fn touches_placement(&self) -> bool {
        self.location_name.is_some() || self.location_id.is_some() || self.container.is_some()
    }
}

/// Shape-validated loan request.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    /// Borrower the part is handed to.
    pub loaned_to: String,
    /// Agreed return date, when one was set.
    pub expected_return: Option<DateTime<Utc>>,
}

/// Shape-validated input for location creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateLocationRequest {
    /// Required human-readable name.
    pub name: String,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

/// Use-cases over parts.
#[async_trait]
pub trait PartsService: Send + Sync {
    /// Create a part after referential checks, assigning an identifier when
    /// the request does not supply one.
    async fn create(&self, request: CreatePartRequest) -> Result<Part, Error>;

    /// Fetch a part by key.
    async fn get(&self, key: &PartKey) -> Result<Part, Error>;

    /// Every part, ordered by name ascending.
    async fn list(&self) -> Result<Vec<Part>, Error>;

    /// Merge a partial update onto the stored record.
    async fn update(&self, key: &PartKey, patch: UpdatePartRequest) -> Result<Part, Error>;

    /// Remove a part.
    async fn delete(&self, key: &PartKey) -> Result<(), Error>;

    /// Hand a part out on loan; the part must currently be available.
    async fn loan(&self, key: &PartKey, request: LoanRequest) -> Result<Part, Error>;

    /// Return a loaned part to stock.
    async fn return_to_stock(&self, key: &PartKey) -> Result<Part, Error>;

    /// Parts stored at the named location.
    async fn find_by_location(&self, location_name: &str) -> Result<Vec<Part>, Error>;

    /// Parts of the given type.
    async fn find_by_type(&self, part_type: &str) -> Result<Vec<Part>, Error>;

    /// Parts in the given status.
    async fn find_by_status(&self, status: PartStatus) -> Result<Vec<Part>, Error>;
}

/// Use-cases over locations.
#[async_trait]
pub trait LocationsService: Send + Sync {
    /// Create a location with an allocator-assigned identifier.
    async fn create(&self, request: CreateLocationRequest) -> Result<Location, Error>;

    /// Fetch the first location with the given name.
    async fn get_by_name(&self, name: &str) -> Result<Location, Error>;

    /// Every location, unfiltered.
    async fn list(&self) -> Result<Vec<Location>, Error>;

    /// Delete a location by name; blocked while parts still reference it.
    async fn delete(&self, name: &str) -> Result<(), Error>;
}
