//! Core domain entities.

pub mod link;

pub use link::{NewShortLink, ShortLink};
