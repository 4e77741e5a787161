//! Application layer: operation logic and DTOs.

pub mod dto;
pub mod services;
