//! Location aggregate: a named physical storage place, optionally
//! subdivided by container, row, and position.

/// Input payload for [`Location::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocationDraft {
    pub id: i32,
    pub name: String,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

/// Validation failures raised by [`Location::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationValidationError {
    /// `locationName` is required and must not be blank.
    #[error("location name must not be empty")]
    EmptyName,
}

/// A storage location.
///
/// ## Invariants
/// - `name` is non-blank. Names are not unique; lookups by name treat the
///   first match as canonical.
/// - `id` is assigned at creation and never changes; it is the join key for
///   parts stored at this location.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub id: i32,
    pub name: String,
    pub container: Option<String>,
    pub row: Option<i32>,
    pub position: Option<String>,
}

impl Location {
    /// Validate and construct a location.
    pub fn new(draft: LocationDraft) -> Result<Self, LocationValidationError> {
        if draft.name.trim().is_empty() {
            return Err(LocationValidationError::EmptyName);
        }
        Ok(Self {
            id: draft.id,
            name: draft.name,
            container: draft.container,
            row: draft.row,
            position: draft.position,
        })
    }
}
