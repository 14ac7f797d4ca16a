//! Database models for the Block Factory Management Platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
