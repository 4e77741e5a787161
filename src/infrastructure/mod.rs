//! Infrastructure layer: storage backend and audit logging.

pub mod logging;
pub mod storage;
