//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `migrations/` exactly; they drive Diesel's
//! compile-time query validation and type-safe SQL generation.

diesel::table! {
    /// Storage locations.
    ///
    /// `location_id` is allocator-assigned within `1..=100`.
    locations (location_id) {
        /// Primary key, assigned by the identifier allocator.
        location_id -> Int4,
        /// Human-readable name; not unique, first match is canonical.
        location_name -> Varchar,
        /// Optional container recorded at this location.
        container -> Nullable<Varchar>,
        /// Optional shelf row.
        row -> Nullable<Int4>,
        /// Optional free-form position descriptor.
        position -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Inventoried parts.
    ///
    /// `part_id` is allocator-assigned within `101..=1_000_000` unless the
    /// client supplied one. `current_loan` holds the loan metadata as JSON
    /// while the part is out.
    parts (part_id) {
        /// Primary key, assigned by the identifier allocator.
        part_id -> Int4,
        /// Human-readable name; not unique, first match is canonical.
        part_name -> Varchar,
        part_description -> Nullable<Text>,
        /// Free-form classification string.
        #[sql_name = "type"]
        part_type -> Varchar,
        /// Lifecycle status: available, loaned, maintenance, disposed.
        status -> Varchar,
        /// Creation timestamp, set once.
        date_added -> Timestamptz,
        /// Loan metadata, present only while status is loaned.
        current_loan -> Nullable<Jsonb>,
        quantity -> Int4,
        manufacturer -> Nullable<Varchar>,
        model -> Nullable<Varchar>,
        /// Referencing location; must exist at creation.
        location_id -> Nullable<Int4>,
        container -> Nullable<Varchar>,
        row -> Nullable<Int4>,
        position -> Nullable<Varchar>,
        category -> Nullable<Varchar>,
    }
}

diesel::joinable!(parts -> locations (location_id));
diesel::allow_tables_to_appear_in_same_query!(locations, parts);
