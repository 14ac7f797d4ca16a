//! Business logic services

pub mod block;
pub mod cashbook;
pub mod customer;
pub mod material;
pub mod member;
pub mod production;
pub mod report;
pub mod sales;
pub mod sequence;
pub mod stock;
pub mod vehicle;

pub use block::BlockService;
pub use cashbook::CashbookService;
pub use customer::CustomerService;
pub use material::MaterialService;
pub use member::MemberService;
pub use production::ProductionService;
pub use report::ReportService;
pub use sales::SalesService;
pub use sequence::SequenceService;
pub use stock::StockService;
pub use vehicle::VehicleService;
