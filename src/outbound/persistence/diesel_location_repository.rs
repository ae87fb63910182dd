//! PostgreSQL-backed `LocationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LocationRepository, LocationRepositoryError};
use crate::domain::{Location, LocationDraft};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{LocationRow, NewLocationRow};
use super::pool::{DbPool, PoolError};
use super::schema::locations;

/// Diesel-backed implementation of the location repository port.
#[derive(Clone)]
pub struct DieselLocationRepository {
    pool: DbPool,
}

impl DieselLocationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port errors.
fn map_pool(error: PoolError) -> LocationRepositoryError {
    map_pool_error(error, LocationRepositoryError::connection)
}

/// Map Diesel errors to port errors.
fn map_diesel(error: diesel::result::Error) -> LocationRepositoryError {
    map_diesel_error(
        error,
        LocationRepositoryError::query,
        LocationRepositoryError::connection,
        LocationRepositoryError::duplicate_id,
    )
}

/// Convert a database row into a validated domain location.
fn row_to_location(row: LocationRow) -> Result<Location, LocationRepositoryError> {
    Location::new(LocationDraft {
        id: row.location_id,
        name: row.location_name,
        container: row.container,
        row: row.row,
        position: row.position,
    })
    .map_err(|err| LocationRepositoryError::query(err.to_string()))
}

fn new_row(location: &Location) -> NewLocationRow<'_> {
    NewLocationRow {
        location_id: location.id,
        location_name: &location.name,
        container: location.container.as_deref(),
        row: location.row,
        position: location.position.as_deref(),
    }
}

#[async_trait]
impl LocationRepository for DieselLocationRepository {
    async fn insert(&self, location: &Location) -> Result<Location, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = diesel::insert_into(locations::table)
            .values(&new_row(location))
            .returning(LocationRow::as_returning())
            .get_result::<LocationRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_location(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = locations::table
            .find(id)
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_location).transpose()
    }

    async fn find_first_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = locations::table
            .filter(locations::location_name.eq(name))
            .order(locations::location_id.asc())
            .select(LocationRow::as_select())
            .first::<LocationRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_location).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<LocationRow> = locations::table
            .order(locations::location_id.asc())
            .select(LocationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_location).collect()
    }

    async fn delete(&self, id: i32) -> Result<bool, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let affected = diesel::delete(locations::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(affected > 0)
    }

    async fn container_exists(
        &self,
        location_id: i32,
        container: &str,
    ) -> Result<bool, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let found = locations::table
            .filter(locations::location_id.eq(location_id))
            .filter(locations::container.eq(container))
            .select(locations::location_id)
            .first::<i32>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        Ok(found.is_some())
    }

    async fn max_id(&self) -> Result<Option<i32>, LocationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        locations::table
            .select(diesel::dsl::max(locations::location_id))
            .first::<Option<i32>>(&mut conn)
            .await
            .map_err(map_diesel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn row_conversion_builds_a_validated_location() {
        let location = row_to_location(LocationRow {
            location_id: 1,
            location_name: "Shelf-A".into(),
            container: Some("Bin 3".into()),
            row: Some(2),
            position: None,
        })
        .expect("valid row");
        assert_eq!(location.id, 1);
        assert_eq!(location.container.as_deref(), Some("Bin 3"));
    }

    #[rstest]
    fn row_conversion_rejects_blank_name() {
        let err = row_to_location(LocationRow {
            location_id: 1,
            location_name: "  ".into(),
            container: None,
            row: None,
            position: None,
        })
        .expect_err("blank name");
        assert!(matches!(err, LocationRepositoryError::Query { .. }));
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool(PoolError::checkout("connection refused"));
        assert!(matches!(
            repo_err,
            LocationRepositoryError::Connection { .. }
        ));
    }
}
