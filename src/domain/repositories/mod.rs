//! Repository trait definitions for the domain layer.
//!
//! Traits define the contract for storage operations; the concrete
//! in-memory backend lives in `crate::infrastructure::storage`. Mock
//! implementations are auto-generated via `mockall` for unit tests.

pub mod link_repository;

pub use link_repository::LinkRepository;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
