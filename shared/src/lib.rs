//! Shared types and models for the Block Factory Management Platform
//!
//! This crate contains domain models, closed enums and pure derivation
//! helpers shared between the backend and other components of the system.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
