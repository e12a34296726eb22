//! Infrastructure layer - storage, logging and metrics implementations

pub mod logging;
pub mod observability;
pub mod storage;
pub mod user;
