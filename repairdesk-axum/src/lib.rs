//! # repairdesk-axum
//!
//! REST API for repairdesk built on [axum](https://github.com/tokio-rs/axum).
//!
//! Every endpoint answers with the [`ApiResponse`] envelope. Search endpoints
//! read their criteria and paging from the query string, so
//! `GET /api/appliance-models?model=tv&yearGreaterOrEqual=2020&page=1&size=20`
//! returns page 1 of the TV models from 2020 on. A search with no matches is
//! a successful empty page; only lookups by id answer `404`.
//!
//! ```rust,ignore
//! use repairdesk_axum::{AppState, router};
//! use repairdesk_shop::{RepairShop, SearchConfig};
//!
//! let app = router(AppState::new(RepairShop::in_memory(SearchConfig::default())));
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod error;
pub mod extract;
pub mod handlers;
pub mod layer;
pub mod response;

use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use repairdesk_shop::RepairShop;

pub use error::{ApiError, ApiResult};
pub use extract::{ApiJson, ApiPath, ApiQuery, RequestScope};
pub use layer::{RequestIdLayer, RequestIdService};
pub use response::{ApiResponse, ErrorBody};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub shop: RepairShop,
}

impl AppState {
    /// Create state around a shop.
    pub fn new(shop: RepairShop) -> Self {
        Self { shop }
    }
}

/// Routes without middleware.
pub fn routes() -> Router<AppState> {
    use handlers::*;

    Router::new()
        .route("/health", get(health_check))
        .route("/api/clients", get(search_clients).post(create_client))
        .route("/api/clients/{id}", get(get_client).delete(delete_client))
        .route(
            "/api/appliance-models",
            get(search_appliance_models).post(create_appliance_model),
        )
        .route("/api/appliance-models/{id}", get(get_appliance_model))
        .route("/api/inventory", get(search_inventory).post(create_inventory_item))
        .route("/api/inventory/{id}", get(get_inventory_item))
        .route("/api/inventory/{id}/stock", post(adjust_stock))
        .route("/api/orders", get(search_orders).post(create_order))
        .route("/api/orders/{id}", get(get_order))
        .route("/api/orders/{id}/status", put(update_order_status))
}

/// The complete application: routes, state, request ids, CORS and tracing.
pub fn router(state: AppState) -> Router {
    routes()
        .with_state(state)
        .layer(RequestIdLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ApiError, ApiResponse, ApiResult, AppState, RequestScope, router};
    pub use repairdesk_shop::prelude::*;
}
