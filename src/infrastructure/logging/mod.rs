//! In-memory audit logging.

pub mod audit_log;

pub use audit_log::{AuditEntry, AuditLevel, AuditLog, AuditStats};
