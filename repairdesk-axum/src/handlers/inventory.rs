//! Inventory handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use repairdesk_shop::{InventoryItem, InventoryItemCriteria, NewInventoryItem, Page, PageRequest};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, RequestScope};
use crate::response::ApiResponse;

/// Body of `POST /api/inventory/{id}/stock`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StockAdjustment {
    /// Units added (positive) or taken (negative).
    pub delta: i64,
}

/// `GET /api/inventory?name=&partNumber=&category=&minQuantity=&maxPrice=&compatibleModel=`
pub async fn search_inventory(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<InventoryItemCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<ApiResponse<Page<InventoryItem>>> {
    let page = state.shop.search_inventory(&criteria, page).await?;
    Ok(ApiResponse::ok(page))
}

/// `POST /api/inventory`
pub async fn create_inventory_item(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiJson(input): ApiJson<NewInventoryItem>,
) -> ApiResult<(StatusCode, ApiResponse<InventoryItem>)> {
    let item = state.shop.create_inventory_item(&ctx, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(item)))
}

/// `GET /api/inventory/{id}`
pub async fn get_inventory_item(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<InventoryItem>> {
    let item = state.shop.get_inventory_item(id).await?;
    Ok(ApiResponse::ok(item))
}

/// `POST /api/inventory/{id}/stock`
pub async fn adjust_stock(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<StockAdjustment>,
) -> ApiResult<ApiResponse<InventoryItem>> {
    let item = state.shop.adjust_stock(&ctx, id, body.delta).await?;
    Ok(ApiResponse::ok(item))
}
