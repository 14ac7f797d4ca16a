//! Route definitions for the Block Factory Management Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Block catalog and stock
        .nest("/blocks", block_routes())
        // Raw material stores
        .nest("/materials", material_routes())
        // Customer accounts
        .nest("/customers", customer_routes())
        // Sales and invoicing
        .nest("/sales", sales_routes())
        // Production batches
        .nest("/production", production_routes())
        // Cashbook ledger
        .nest("/cashbook", cashbook_routes())
        // Payroll roster
        .nest("/members", member_routes())
        // Delivery fleet
        .nest("/vehicles", vehicle_routes())
        // Reports
        .nest("/reports", report_routes())
        // Document sequences
        .nest("/sequences", sequence_routes())
}

/// Block catalog routes
fn block_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_blocks).post(handlers::create_block))
        .route(
            "/:block_id",
            get(handlers::get_block)
                .put(handlers::update_block)
                .delete(handlers::delete_block),
        )
        .route("/:block_id/adjust", post(handlers::adjust_block_stock))
}

/// Raw material routes
fn material_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route("/low-stock", get(handlers::low_stock_materials))
        .route(
            "/:material_id",
            get(handlers::get_material)
                .put(handlers::update_material)
                .delete(handlers::delete_material),
        )
        .route("/:material_id/purchase", post(handlers::record_purchase))
        .route("/:material_id/adjust", post(handlers::adjust_material_stock))
}

/// Customer account routes
fn customer_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_customers).post(handlers::create_customer),
        )
        .route(
            "/:customer_id",
            get(handlers::get_customer)
                .put(handlers::update_customer)
                .delete(handlers::delete_customer),
        )
        .route("/:customer_id/payments", post(handlers::receive_payment))
}

/// Sales and invoicing routes
fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_invoices).post(handlers::create_sale))
        .route("/:invoice_id", get(handlers::get_invoice))
        .route(
            "/:invoice_id/delivery",
            post(handlers::update_delivery_status),
        )
}

/// Production batch routes
fn production_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_batches).post(handlers::start_batch))
        .route("/:batch_id", get(handlers::get_batch))
        .route("/:batch_id/produce", post(handlers::record_production))
        .route("/:batch_id/pause", post(handlers::pause_batch))
        .route("/:batch_id/resume", post(handlers::resume_batch))
        .route("/:batch_id/complete", post(handlers::complete_batch))
}

/// Cashbook routes
fn cashbook_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_entries).post(handlers::create_entry))
        .route("/summary", get(handlers::summary))
        .route("/export", get(handlers::export_csv))
}

/// Payroll roster routes
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_members).post(handlers::create_member))
        .route(
            "/:member_id",
            get(handlers::get_member)
                .put(handlers::update_member)
                .delete(handlers::delete_member),
        )
}

/// Delivery fleet routes
fn vehicle_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_vehicles).post(handlers::create_vehicle),
        )
        .route(
            "/:vehicle_id",
            get(handlers::get_vehicle).delete(handlers::delete_vehicle),
        )
        .route("/:vehicle_id/dispatch", post(handlers::dispatch_vehicle))
        .route("/:vehicle_id/release", post(handlers::release_vehicle))
        .route(
            "/:vehicle_id/maintenance",
            post(handlers::start_maintenance).delete(handlers::end_maintenance),
        )
}

/// Reporting routes
fn report_routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(handlers::dashboard))
}

/// Document sequence routes
fn sequence_routes() -> Router<AppState> {
    Router::new()
        .route("/invoice/next", post(handlers::next_invoice_number))
        .route("/batch/next", post(handlers::next_batch_number))
}
