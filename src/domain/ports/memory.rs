//! In-memory fixture repositories.
//!
//! Used by tests and by the server when no database is configured. They
//! honour the same contracts as the Diesel adapters: name-ordered listings,
//! first-match-by-lowest-id name lookups, and duplicate-identifier errors
//! on insert.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{
    LocationRepository, LocationRepositoryError, PartRepository, PartRepositoryError,
};
use crate::domain::{Location, Part, PartStatus};

fn sort_by_name(mut parts: Vec<Part>) -> Vec<Part> {
    parts.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    parts
}

/// Part store backed by a `BTreeMap` keyed on the part identifier.
#[derive(Debug, Default)]
pub struct InMemoryPartRepository {
    rows: RwLock<BTreeMap<i32, Part>>,
}

impl InMemoryPartRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<i32, Part>> {
        self.rows.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<i32, Part>> {
        self.rows.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl PartRepository for InMemoryPartRepository {
    async fn insert(&self, part: &Part) -> Result<Part, PartRepositoryError> {
        let mut rows = self.write();
        if rows.contains_key(&part.id) {
            return Err(PartRepositoryError::duplicate_id(format!(
                "part {} already exists",
                part.id
            )));
        }
        rows.insert(part.id, part.clone());
        Ok(part.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Part>, PartRepositoryError> {
        Ok(self.read().get(&id).cloned())
    }

    async fn find_first_by_name(&self, name: &str) -> Result<Option<Part>, PartRepositoryError> {
        Ok(self.read().values().find(|part| part.name == name).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Part>, PartRepositoryError> {
        Ok(sort_by_name(self.read().values().cloned().collect()))
    }

    async fn update(&self, part: &Part) -> Result<Option<Part>, PartRepositoryError> {
        let mut rows = self.write();
        if !rows.contains_key(&part.id) {
            return Ok(None);
        }
        rows.insert(part.id, part.clone());
        Ok(Some(part.clone()))
    }

    async fn delete(&self, id: i32) -> Result<bool, PartRepositoryError> {
        Ok(self.write().remove(&id).is_some())
    }

    async fn find_by_location_id(
        &self,
        location_id: i32,
    ) -> Result<Vec<Part>, PartRepositoryError> {
        Ok(sort_by_name(
            self.read()
                .values()
                .filter(|part| part.location_id == Some(location_id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_type(&self, part_type: &str) -> Result<Vec<Part>, PartRepositoryError> {
        Ok(sort_by_name(
            self.read()
                .values()
                .filter(|part| part.part_type == part_type)
                .cloned()
                .collect(),
        ))
    }

    async fn find_by_status(&self, status: PartStatus) -> Result<Vec<Part>, PartRepositoryError> {
        Ok(sort_by_name(
            self.read()
                .values()
                .filter(|part| part.status == status)
                .cloned()
                .collect(),
        ))
    }

    async fn count_for_location(&self, location_id: i32) -> Result<i64, PartRepositoryError> {
        Ok(self
            .read()
            .values()
            .filter(|part| part.location_id == Some(location_id))
            .count() as i64)
    }

    async fn max_id(&self) -> Result<Option<i32>, PartRepositoryError> {
        Ok(self.read().keys().next_back().copied())
    }
}

/// Location store backed by a `BTreeMap` keyed on the location identifier.
#[derive(Debug, Default)]
pub struct InMemoryLocationRepository {
    rows: RwLock<BTreeMap<i32, Location>>,
}

impl InMemoryLocationRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<i32, Location>> {
        self.rows.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, BTreeMap<i32, Location>> {
        self.rows.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl LocationRepository for InMemoryLocationRepository {
    async fn insert(&self, location: &Location) -> Result<Location, LocationRepositoryError> {
        let mut rows = self.write();
        if rows.contains_key(&location.id) {
            return Err(LocationRepositoryError::duplicate_id(format!(
                "location {} already exists",
                location.id
            )));
        }
        rows.insert(location.id, location.clone());
        Ok(location.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(self.read().get(&id).cloned())
    }

    async fn find_first_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Location>, LocationRepositoryError> {
        Ok(self
            .read()
            .values()
            .find(|location| location.name == name)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Location>, LocationRepositoryError> {
        Ok(self.read().values().cloned().collect())
    }

    async fn delete(&self, id: i32) -> Result<bool, LocationRepositoryError> {
        Ok(self.write().remove(&id).is_some())
    }

    async fn container_exists(
        &self,
        location_id: i32,
        container: &str,
    ) -> Result<bool, LocationRepositoryError> {
        Ok(self
            .read()
            .get(&location_id)
            .is_some_and(|location| location.container.as_deref() == Some(container)))
    }

    async fn max_id(&self) -> Result<Option<i32>, LocationRepositoryError> {
        Ok(self.read().keys().next_back().copied())
    }
}
