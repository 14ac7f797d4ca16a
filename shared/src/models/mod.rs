//! Domain models for the Block Factory Management Platform

mod block;
mod cashbook;
mod customer;
mod invoice;
mod material;
mod member;
mod production;
mod sequence;
mod vehicle;

pub use block::*;
pub use cashbook::*;
pub use customer::*;
pub use invoice::*;
pub use material::*;
pub use member::*;
pub use production::*;
pub use sequence::*;
pub use vehicle::*;
