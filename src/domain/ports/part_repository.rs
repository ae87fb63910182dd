//! Outbound port for part persistence.
//!
//! Keeps the services free of storage concerns: adapters translate these
//! calls into whatever the backing store speaks. Listings are returned
//! ordered by part name ascending.

use async_trait::async_trait;

use crate::domain::{Part, PartStatus};

/// Errors raised by part store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartRepositoryError {
    /// Store connection could not be established.
    #[error("part store connection failed: {message}")]
    Connection { message: String },

    /// Query failed during execution or row conversion.
    #[error("part store query failed: {message}")]
    Query { message: String },

    /// Insert collided with an identifier already present in the store.
    ///
    /// Identifier allocation and the consuming insert are not one atomic
    /// unit, so concurrent creates can race onto the same id; the loser
    /// observes this error.
    #[error("duplicate part identifier: {message}")]
    DuplicateId { message: String },
}

impl PartRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a duplicate-identifier error with the given message.
    pub fn duplicate_id(message: impl Into<String>) -> Self {
        Self::DuplicateId {
            message: message.into(),
        }
    }
}

/// Port for persisting and querying parts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PartRepository: Send + Sync {
    /// Persist a new part and return the stored record.
    async fn insert(&self, part: &Part) -> Result<Part, PartRepositoryError>;

    /// Fetch a part by its identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Part>, PartRepositoryError>;

    /// Fetch the first part with the given name. Names are not unique; the
    /// lowest identifier wins.
    async fn find_first_by_name(&self, name: &str) -> Result<Option<Part>, PartRepositoryError>;

    /// Every part, ordered by name ascending.
    async fn list_all(&self) -> Result<Vec<Part>, PartRepositoryError>;

    /// Replace the stored record with the same identifier. Returns `None`
    /// when the row no longer exists.
    async fn update(&self, part: &Part) -> Result<Option<Part>, PartRepositoryError>;

    /// Remove a part by identifier. Returns `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, PartRepositoryError>;

    /// Parts referencing the given location, ordered by name ascending.
    async fn find_by_location_id(
        &self,
        location_id: i32,
    ) -> Result<Vec<Part>, PartRepositoryError>;

    /// Parts of the given type, ordered by name ascending.
    async fn find_by_type(&self, part_type: &str) -> Result<Vec<Part>, PartRepositoryError>;

    /// Parts in the given status, ordered by name ascending.
    async fn find_by_status(&self, status: PartStatus) -> Result<Vec<Part>, PartRepositoryError>;

    /// Number of parts referencing the given location.
    async fn count_for_location(&self, location_id: i32) -> Result<i64, PartRepositoryError>;

    /// Highest part identifier currently persisted, if any. Seeds the
    /// identifier allocator at startup.
    async fn max_id(&self) -> Result<Option<i32>, PartRepositoryError>;
}
