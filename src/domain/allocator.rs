//! Bounded, monotonic identifier allocation for locations and parts.
//!
//! Locations draw from `1..=100`; parts draw from `101..=1_000_000`, with
//! the first hundred values reserved for locations. The allocator is an
//! explicit object seeded from the highest persisted identifier in each
//! table at startup, so restarts never reissue a value already in use.
//!
//! The counter increment and the insert that consumes the identifier are
//! not one atomic unit. Two requests in flight can both pass the bound
//! check, and a value allocated here can collide with a row inserted by a
//! client-supplied identifier; the losing insert surfaces a duplicate-key
//! error to its caller. No locks, no retries.

use std::sync::atomic::{AtomicI32, Ordering};

use crate::domain::Error;
use crate::domain::inventory_service::map_part_store_error;
use crate::domain::location_service::map_location_store_error;
use crate::domain::ports::{LocationRepository, PartRepository};

/// Highest location identifier the allocator will issue.
pub const LOCATION_ID_CEILING: i32 = 100;
/// Part identifiers start above the location range.
pub const PART_ID_FLOOR: i32 = 100;
/// Highest part identifier the allocator will issue.
pub const PART_ID_CEILING: i32 = 1_000_000;

/// Identifier family, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Location,
    Part,
}

impl std::fmt::Display for IdKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Location => f.write_str("location"),
            Self::Part => f.write_str("part"),
        }
    }
}

/// Raised when a bounded identifier sequence runs dry.
///
/// Fatal to further creates of that kind for the lifetime of the data set;
/// the sibling sequence is unaffected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} identifier space exhausted at {ceiling}")]
pub struct ExhaustedRange {
    /// Which sequence ran dry.
    pub kind: IdKind,
    /// The inclusive upper bound of the sequence.
    pub ceiling: i32,
}

impl From<ExhaustedRange> for Error {
    fn from(err: ExhaustedRange) -> Self {
        Error::range_exhausted(err.to_string()).with_details(serde_json::json!({
            "kind": err.kind.to_string(),
            "ceiling": err.ceiling,
        }))
    }
}

/// Initial counter positions, normally the highest persisted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocatorSeed {
    /// Last location identifier already in use; the next issued is one above.
    pub last_location_id: i32,
    /// Last part identifier already in use; the next issued is one above.
    pub last_part_id: i32,
}

impl Default for AllocatorSeed {
    fn default() -> Self {
        Self {
            last_location_id: 0,
            last_part_id: PART_ID_FLOOR,
        }
    }
}

/// Issues unique identifiers within the bounded ranges.
///
/// Counters are process-local and strictly increasing within a process
/// lifetime. Pass the allocator by handle to the services that consume it
/// rather than reaching for ambient state.
#[derive(Debug)]
pub struct IdAllocator {
    last_location_id: AtomicI32,
    last_part_id: AtomicI32,
}

impl IdAllocator {
    /// Build an allocator from explicit counter positions.
    pub fn new(seed: AllocatorSeed) -> Self {
        let defaults = AllocatorSeed::default();
        Self {
            last_location_id: AtomicI32::new(
                seed.last_location_id.max(defaults.last_location_id),
            ),
            last_part_id: AtomicI32::new(seed.last_part_id.max(defaults.last_part_id)),
        }
    }

    /// Seed an allocator from the highest identifiers currently persisted.
    pub async fn from_storage<L, P>(locations: &L, parts: &P) -> Result<Self, Error>
    where
        L: LocationRepository + ?Sized,
        P: PartRepository + ?Sized,
    {
        let last_location_id = locations
            .max_id()
            .await
            .map_err(map_location_store_error)?
            .unwrap_or(0);
        let last_part_id = parts
            .max_id()
            .await
            .map_err(map_part_store_error)?
            .unwrap_or(PART_ID_FLOOR);
        Ok(Self::new(AllocatorSeed {
            last_location_id,
            last_part_id,
        }))
    }

    /// Issue the next location identifier.
    pub fn next_location_id(&self) -> Result<i32, ExhaustedRange> {
        Self::bump(&self.last_location_id, LOCATION_ID_CEILING).ok_or(ExhaustedRange {
            kind: IdKind::Location,
            ceiling: LOCATION_ID_CEILING,
        })
    }

    /// Issue the next part identifier.
    pub fn next_part_id(&self) -> Result<i32, ExhaustedRange> {
        Self::bump(&self.last_part_id, PART_ID_CEILING).ok_or(ExhaustedRange {
            kind: IdKind::Part,
            ceiling: PART_ID_CEILING,
        })
    }

    /// Advance a counter unless it would cross its ceiling. The counter is
    /// left untouched on exhaustion so repeated calls keep failing cleanly.
    fn bump(counter: &AtomicI32, ceiling: i32) -> Option<i32> {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                (last < ceiling).then_some(last + 1)
            })
            .ok()
            .map(|last| last + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn issues_strictly_increasing_location_ids_from_one() {
        let allocator = IdAllocator::new(AllocatorSeed::default());
        assert_eq!(allocator.next_location_id().expect("first"), 1);
        assert_eq!(allocator.next_location_id().expect("second"), 2);
    }

    #[test]
    fn first_part_id_is_one_above_the_reserved_range() {
        let allocator = IdAllocator::new(AllocatorSeed::default());
        assert_eq!(allocator.next_part_id().expect("first"), 101);
    }

    #[test]
    fn location_sequence_exhausts_at_the_ceiling() {
        let allocator = IdAllocator::new(AllocatorSeed {
            last_location_id: LOCATION_ID_CEILING - 1,
            last_part_id: PART_ID_FLOOR,
        });
        assert_eq!(allocator.next_location_id().expect("last slot"), 100);
        let err = allocator.next_location_id().expect_err("exhausted");
        assert_eq!(err.kind, IdKind::Location);
        assert_eq!(err.ceiling, LOCATION_ID_CEILING);
        // Exhaustion is sticky.
        assert!(allocator.next_location_id().is_err());
    }

    #[test]
    fn part_sequence_exhausts_at_the_ceiling() {
        let allocator = IdAllocator::new(AllocatorSeed {
            last_location_id: 0,
            last_part_id: PART_ID_CEILING,
        });
        assert!(allocator.next_part_id().is_err());
    }

    #[test]
    fn exhausting_one_sequence_leaves_the_other_usable() {
        let allocator = IdAllocator::new(AllocatorSeed {
            last_location_id: LOCATION_ID_CEILING,
            last_part_id: PART_ID_FLOOR,
        });
        assert!(allocator.next_location_id().is_err());
        assert_eq!(allocator.next_part_id().expect("part id"), 101);
    }

    #[test]
    fn seed_positions_continue_the_persisted_sequence() {
        let allocator = IdAllocator::new(AllocatorSeed {
            last_location_id: 7,
            last_part_id: 250,
        });
        assert_eq!(allocator.next_location_id().expect("location"), 8);
        assert_eq!(allocator.next_part_id().expect("part"), 251);
    }

    #[test]
    fn seed_below_the_floor_is_clamped() {
        let allocator = IdAllocator::new(AllocatorSeed {
            last_location_id: -5,
            last_part_id: 3,
        });
        assert_eq!(allocator.next_location_id().expect("location"), 1);
        assert_eq!(allocator.next_part_id().expect("part"), 101);
    }

    #[test]
    fn concurrent_allocations_never_duplicate() {
        let allocator = Arc::new(IdAllocator::new(AllocatorSeed::default()));
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let allocator = Arc::clone(&allocator);
                std::thread::spawn(move || {
                    (0..100)
                        .map(|_| allocator.next_part_id().expect("within range"))
                        .collect::<Vec<i32>>()
                })
            })
            .collect();

        let mut issued: Vec<i32> = handles
            .into_iter()
            .flat_map(|h| h.join().expect("thread completes"))
            .collect();
        issued.sort_unstable();
        let before = issued.len();
        issued.dedup();
        assert_eq!(issued.len(), before);
    }

    #[tokio::test]
    async fn from_storage_seeds_from_persisted_maxima() {
        use crate::domain::ports::memory::{InMemoryLocationRepository, InMemoryPartRepository};
        use crate::domain::{Location, LocationDraft};

        let locations = InMemoryLocationRepository::new();
        let parts = InMemoryPartRepository::new();
        use crate::domain::ports::LocationRepository as _;
        locations
            .insert(
                &Location::new(LocationDraft {
                    id: 4,
                    name: "Shelf-D".into(),
                    container: None,
                    row: None,
                    position: None,
                })
                .expect("valid location"),
            )
            .await
            .expect("insert");

        let allocator = IdAllocator::from_storage(&locations, &parts)
            .await
            .expect("seed");
        assert_eq!(allocator.next_location_id().expect("location"), 5);
        assert_eq!(allocator.next_part_id().expect("part"), 101);
    }
}
