//! HTTP request handlers

pub mod block;
pub mod cashbook;
pub mod customer;
pub mod health;
pub mod material;
pub mod member;
pub mod production;
pub mod report;
pub mod sales;
pub mod sequence;
pub mod vehicle;

pub use block::*;
pub use cashbook::*;
pub use customer::*;
pub use health::*;
pub use material::*;
pub use member::*;
pub use production::*;
pub use report::*;
pub use sales::*;
pub use sequence::*;
pub use vehicle::*;
