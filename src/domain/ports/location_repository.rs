//! Outbound port for location persistence.

use async_trait::async_trait;

use crate::domain::Location;

/// Errors raised by location store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationRepositoryError {
    /// Store connection could not be established.
    #[error("location store connection failed: {message}")]
    Connection { message: String },

    /// Query failed during execution or row conversion.
    #[error("location store query failed: {message}")]
    Query { message: String },

    /// Insert collided with an identifier already present in the store.
    #[error("duplicate location identifier: {message}")]
    DuplicateId { message: String },
}

impl LocationRepositoryError {
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

/// Port for persisting and querying locations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Persist a new location and return the stored record.
    async fn insert(&self, location: &Location) -> Result<Location, LocationRepositoryError>;

    /// Fetch a location by its identifier.
    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, LocationRepositoryError>;

    /// Fetch the first location with the given name. Names are not unique;
    /// the lowest identifier wins.
    async fn find_first_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, LocationRepositoryError>;

    /// Every location, unfiltered.
    async fn list_all(&self) -> Result<Vec<Location>, LocationRepositoryError>;

    /// Remove a location by identifier. Returns `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, LocationRepositoryError>;

    /// Whether the given container is recorded on the location row with the
    /// given identifier.
    async fn container_exists(
        &self,
        location_id: i32,
        container: &str,
    ) -> Result<bool, LocationRepositoryError>;

    /// Highest location identifier currently persisted, if any. Seeds the
    /// identifier allocator at startup.
    async fn max_id(&self) -> Result<Option<i32>, LocationRepositoryError>;
}
