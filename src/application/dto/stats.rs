//! Aggregate statistics DTO.

use serde::Serialize;

/// Registry-wide counters, computed over every record ever created
/// (inactive records keep contributing their clicks).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsSummary {
    pub total_links: usize,
    pub active_links: usize,
    pub inactive_links: usize,
    pub total_clicks: u64,
}
