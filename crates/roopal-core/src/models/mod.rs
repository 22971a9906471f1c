//! Data models for earnings statements.

pub mod config;
pub mod invoice;
pub mod line;
pub mod rider;
