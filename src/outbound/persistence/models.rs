//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{locations, parts};

/// Row struct for reading from the locations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub location_id: i32,
    pub location_name: String,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

/// Insertable struct for creating new location records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub location_id: i32,
    pub location_name: &'a str,
    pub container: Option<&'a str>,
    pub row: Option<i32>,
    pub position: Option<&'a str>,
}

/// Row struct for reading from the parts table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = parts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct PartRow {
    pub part_id: i32,
    pub part_name: String,
    pub part_description: Option<String>,
    pub part_type: String,
    pub status: String,
    pub date_added: DateTime<Utc>,
    pub current_loan: Option<serde_json::Value>,
    pub quantity: i32,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub location_id: Option<i32>,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
    pub category: Option<String>,
}

/// Insertable struct for creating new part records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = parts)]
pub(crate) struct NewPartRow<'a> {
    pub part_id: i32,
    pub part_name: &'a str,
    pub part_description: Option<&'a str>,
    pub part_type: &'a str,
    pub status: &'a str,
    pub date_added: DateTime<Utc>,
    pub current_loan: Option<&'a serde_json::Value>,
    pub quantity: i32,
    pub manufacturer: Option<&'a str>,
    pub model: Option<&'a str>,
    pub location_id: Option<i32>,
    pub container: Option<&'a str>,
    pub row: Option<i32>,
    pub position: Option<&'a str>,
    pub category: Option<&'a str>,
}

/// Changeset replacing every mutable column of a part row.
///
/// `treat_none_as_null` makes `None` write SQL NULL rather than skipping
/// the column; the merge semantics already happened in the domain, so the
/// row must mirror the merged record exactly. `part_id` and `date_added`
/// are deliberately absent: they never change after creation.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = parts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct PartRowChanges<'a> {
    pub part_name: &'a str,
    pub part_description: Option<&'a str>,
    pub part_type: &'a str,
    pub status: &'a str,
    pub current_loan: Option<&'a serde_json::Value>,
    pub quantity: i32,
    pub manufacturer: Option<&'a str>,
    pub model: Option<&'a str>,
    pub location_id: Option<i32>,
    pub container: Option<&'a str>,
    pub row: Option<i32>,
    pub position: Option<&'a str>,
    pub category: Option<&'a str>,
}
