//! Data Transfer Objects for registry requests and responses.
//!
//! DTOs use Serde for serialization and `validator` for input validation.

pub mod shorten;
pub mod stats;

pub use shorten::ShortenRequest;
pub use stats::StatisticsSummary;
