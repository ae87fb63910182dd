//! PostgreSQL-backed `PartRepository` implementation using Diesel ORM.
//!
//! Translates between Diesel rows and validated domain parts. Loan
//! metadata travels as `jsonb`; the status column is re-parsed against the
//! closed vocabulary on every read.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PartRepository, PartRepositoryError};
use crate::domain::{Loan, Part, PartDraft, PartStatus};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewPartRow, PartRow, PartRowChanges};
use super::pool::{DbPool, PoolError};
use super::schema::parts;

/// Diesel-backed implementation of the part repository port.
#[derive(Clone)]
pub struct DieselPartRepository {
    pool: DbPool,
}

impl DieselPartRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to port errors.
fn map_pool(error: PoolError) -> PartRepositoryError {
    map_pool_error(error, PartRepositoryError::connection)
}

/// Map Diesel errors to port errors.
fn map_diesel(error: diesel::result::Error) -> PartRepositoryError {
    map_diesel_error(
        error,
        PartRepositoryError::query,
        PartRepositoryError::connection,
        PartRepositoryError::duplicate_id,
    )
}

fn encode_loan(part: &Part) -> Result<Option<serde_json::Value>, PartRepositoryError> {
    part.current_loan
        .as_ref()
        .map(serde_json::to_value)
        .transpose()
        .map_err(|err| PartRepositoryError::query(format!("serialise loan: {err}")))
}

/// Convert a database row into a validated domain part.
fn row_to_part(row: PartRow) -> Result<Part, PartRepositoryError> {
    let PartRow {
        part_id,
        part_name,
        part_description,
        part_type,
        status,
        date_added,
        current_loan,
        quantity,
        manufacturer,
        model,
        location_id,
        container,
        row,
        position,
        category,
    } = row;

    let status: PartStatus = status
        .parse()
        .map_err(|err: crate::domain::ParseStatusError| {
            PartRepositoryError::query(err.to_string())
        })?;

    let current_loan: Option<Loan> = current_loan
        .map(serde_json::from_value)
        .transpose()
        .map_err(|err| PartRepositoryError::query(format!("decode current_loan: {err}")))?;

    Part::new(PartDraft {
        id: part_id,
        name: part_name,
        description: part_description,
        part_type,
        status,
        quantity,
        date_added,
        current_loan,
        manufacturer,
        model,
        category,
        location_id,
        container,
        row,
        position,
    })
    .map_err(|err| PartRepositoryError::query(err.to_string()))
}

fn new_row<'a>(part: &'a Part, loan: Option<&'a serde_json::Value>) -> NewPartRow<'a> {
    NewPartRow {
        part_id: part.id,
        part_name: &part.name,
        part_description: part.description.as_deref(),
        part_type: &part.part_type,
        status: part.status.as_str(),
        date_added: part.date_added,
        current_loan: loan,
        quantity: part.quantity,
        manufacturer: part.manufacturer.as_deref(),
        model: part.model.as_deref(),
        location_id: part.location_id,
        container: part.container.as_deref(),
        row: part.row,
        position: part.position.as_deref(),
        category: part.category.as_deref(),
    }
}

fn changes<'a>(part: &'a Part, loan: Option<&'a serde_json::Value>) -> PartRowChanges<'a> {
    PartRowChanges {
        part_name: &part.name,
        part_description: part.description.as_deref(),
        part_type: &part.part_type,
        status: part.status.as_str(),
        current_loan: loan,
        quantity: part.quantity,
        manufacturer: part.manufacturer.as_deref(),
        model: part.model.as_deref(),
        location_id: part.location_id,
        container: part.container.as_deref(),
        row: part.row,
        position: part.position.as_deref(),
        category: part.category.as_deref(),
    }
}

#[async_trait]
impl PartRepository for DieselPartRepository {
    async fn insert(&self, part: &Part) -> Result<Part, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let loan = encode_loan(part)?;

        let row = diesel::insert_into(parts::table)
            .values(&new_row(part, loan.as_ref()))
            .returning(PartRow::as_returning())
            .get_result::<PartRow>(&mut conn)
            .await
            .map_err(map_diesel)?;

        row_to_part(row)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = parts::table
            .find(id)
            .select(PartRow::as_select())
            .first::<PartRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_part).transpose()
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let row = parts::table
            .filter(parts::part_name.eq(name))
            .order(parts::part_id.asc())
            .select(PartRow::as_select())
            .first::<PartRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_part).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PartRow> = parts::table
            .order((parts::part_name.asc(), parts::part_id.asc()))
            .select(PartRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_part).collect()
    }

    async fn update(&self, part: &Part) -> Result<Option<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;
        let loan = encode_loan(part)?;

        let row = diesel::update(parts::table.find(part.id))
            .set(&changes(part, loan.as_ref()))
            .returning(PartRow::as_returning())
            .get_result::<PartRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel)?;

        row.map(row_to_part).transpose()
    }

    async fn delete(&self, id: i32) -> Result<bool, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let affected = diesel::delete(parts::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel)?;

        Ok(affected > 0)
    }

    async fn find_by_location_id(
        &self,
        location_id: i32,
    ) -> Result<Vec<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PartRow> = parts::table
            .filter(parts::location_id.eq(location_id))
            .order((parts::part_name.asc(), parts::part_id.asc()))
            .select(PartRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_part).collect()
    }

    async fn find_by_type(&self, part_type: &str) -> Result<Vec<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PartRow> = parts::table
            .filter(parts::part_type.eq(part_type))
            .order((parts::part_name.asc(), parts::part_id.asc()))
            .select(PartRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_part).collect()
    }

    async fn find_by_status(&self, status: PartStatus) -> Result<Vec<Part>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        let rows: Vec<PartRow> = parts::table
            .filter(parts::status.eq(status.as_str()))
            .order((parts::part_name.asc(), parts::part_id.asc()))
            .select(PartRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel)?;

        rows.into_iter().map(row_to_part).collect()
    }

    async fn count_for_location(&self, location_id: i32) -> Result<i64, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        parts::table
            .filter(parts::location_id.eq(location_id))
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(map_diesel)
    }

    async fn max_id(&self) -> Result<Option<i32>, PartRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool)?;

        parts::table
            .select(diesel::dsl::max(parts::part_id))
            .first::<Option<i32>>(&mut conn)
            .await
            .map_err(map_diesel)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for error mapping and row conversion edge cases.

    use chrono::Utc;
    use rstest::{fixture, rstest};
    use serde_json::json;

    use super::*;

    #[fixture]
    fn valid_row() -> PartRow {
        PartRow {
            part_id: 101,
            part_name: "Resistor 10k".into(),
            part_description: None,
            part_type: "resistor".into(),
            status: "loaned".into(),
            date_added: Utc::now(),
            current_loan: Some(json!({ "loanedTo": "Alice" })),
            quantity: 50,
            manufacturer: None,
            model: None,
            location_id: Some(1),
            container: None,
            row: None,
            position: None,
            category: None,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error(#[values(true, false)] checkout: bool) {
        let pool_err = if checkout {
            PoolError::checkout("connection refused")
        } else {
            PoolError::build("bad url")
        };
        let repo_err = map_pool(pool_err);
        assert!(matches!(repo_err, PartRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_not_found_maps_to_query_error() {
        let repo_err = map_diesel(diesel::result::Error::NotFound);
        assert!(matches!(repo_err, PartRepositoryError::Query { .. }));
        assert!(repo_err.to_string().contains("record not found"));
    }

    #[rstest]
    fn row_conversion_decodes_loan_metadata(valid_row: PartRow) {
        let part = row_to_part(valid_row).expect("valid row");
        assert_eq!(part.status, PartStatus::Loaned);
        assert_eq!(
            part.current_loan.as_ref().map(|l| l.loaned_to.as_str()),
            Some("Alice")
        );
    }

    #[rstest]
    fn row_conversion_rejects_unknown_status(mut valid_row: PartRow) {
        valid_row.status = "borrowed".into();
        let err = row_to_part(valid_row).expect_err("unknown status");
        assert!(matches!(err, PartRepositoryError::Query { .. }));
        assert!(err.to_string().contains("borrowed"));
    }

    #[rstest]
    fn row_conversion_rejects_malformed_loan_json(mut valid_row: PartRow) {
        valid_row.current_loan = Some(json!({ "borrower": 42 }));
        let err = row_to_part(valid_row).expect_err("malformed loan");
        assert!(matches!(err, PartRepositoryError::Query { .. }));
        assert!(err.to_string().contains("current_loan"));
    }

    #[rstest]
    fn row_conversion_rejects_loan_on_available_part(mut valid_row: PartRow) {
        valid_row.status = "available".into();
        let err = row_to_part(valid_row).expect_err("inconsistent row");
        assert!(matches!(err, PartRepositoryError::Query { .. }));
    }
}
