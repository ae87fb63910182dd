//! Domain layer: entities, identifier allocation, services, and ports.
//!
//! Types here are transport and storage agnostic. Entities validate their
//! invariants in `new` constructors taking Draft input structs; services
//! orchestrate the allocator, the referential checks, and the repository
//! ports; adapters on either side translate to HTTP and SQL.

pub mod allocator;
pub mod error;
pub mod inventory_service;
pub mod location;
pub mod location_service;
pub mod part;
pub mod ports;

pub use self::allocator::{AllocatorSeed, ExhaustedRange, IdAllocator};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::inventory_service::InventoryService;
pub use self::location::{Location, LocationDraft, LocationValidationError};
pub use self::location_service::LocationService;
pub use self::part::{
    Loan, LoanStateError, ParseStatusError, Part, PartDraft, PartStatus, PartValidationError,
};

/// Convenient result alias for domain operations.
pub type DomainResult<T> = Result<T, Error>;
