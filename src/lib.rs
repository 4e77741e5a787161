//! # URL Registry
//!
//! An in-memory URL-shortening registry: create short links with bounded
//! lifetimes, resolve them with click counting, soft-delete them, and compute
//! aggregate statistics. Records live in process memory for the lifetime of
//! the owning process; there is no persistence and no background sweeper.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - The [`ShortLink`](domain::entities::ShortLink)
//!   entity and the [`LinkRepository`](domain::repositories::LinkRepository) trait
//! - **Application Layer** ([`application`]) - The
//!   [`RegistryService`](application::services::RegistryService) operations and DTOs
//! - **Infrastructure Layer** ([`infrastructure`]) - The in-memory storage
//!   backend and the bounded audit log
//!
//! ## Semantics
//!
//! - At most a configurable number of records (default 5) are active at once.
//! - Short codes are unique among *active* records only; expired or deleted
//!   codes may be reused.
//! - Expiry is lazy: operations flip overdue records to inactive at read
//!   time, so a record can appear active on one call and inactive on the
//!   next. No background timer exists.
//! - Resolving a code increments its click counter; the mutation-on-read is
//!   deliberate, every resolution counts as a visit.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use url_registry::prelude::*;
//!
//! # async fn demo() -> Result<(), RegistryError> {
//! let repository = Arc::new(MemoryLinkRepository::new(5));
//! let registry = RegistryService::new(repository, "http://localhost:3000", 5);
//!
//! let link = registry
//!     .create(ShortenRequest::new("https://example.com", 30))
//!     .await?;
//! let hit = registry.resolve(&link.short_code).await?;
//! assert_eq!(hit.click_count, 1);
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use config::Config;
pub use error::RegistryError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::dto::{ShortenRequest, StatisticsSummary};
    pub use crate::application::services::RegistryService;
    pub use crate::config::Config;
    pub use crate::domain::entities::{NewShortLink, ShortLink};
    pub use crate::error::{FieldError, RegistryError};
    pub use crate::infrastructure::logging::{AuditLevel, AuditLog};
    pub use crate::infrastructure::storage::MemoryLinkRepository;
}
