//! Repair order handlers.

use axum::extract::State;
use axum::http::StatusCode;
use serde::Deserialize;
use uuid::Uuid;

use repairdesk_shop::{NewRepairOrder, OrderStatus, Page, PageRequest, RepairOrder, RepairOrderCriteria};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, RequestScope};
use crate::response::ApiResponse;

/// Body of `PUT /api/orders/{id}/status`.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// `GET /api/orders?status=&clientId=&description=&receivedFrom=&receivedTo=&applianceModel=`
pub async fn search_orders(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<RepairOrderCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<ApiResponse<Page<RepairOrder>>> {
    let page = state.shop.search_orders(&criteria, page).await?;
    Ok(ApiResponse::ok(page))
}

/// `POST /api/orders`
pub async fn create_order(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiJson(input): ApiJson<NewRepairOrder>,
) -> ApiResult<(StatusCode, ApiResponse<RepairOrder>)> {
    let order = state.shop.create_order(&ctx, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(order)))
}

/// `GET /api/orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<RepairOrder>> {
    let order = state.shop.get_order(id).await?;
    Ok(ApiResponse::ok(order))
}

/// `PUT /api/orders/{id}/status`
pub async fn update_order_status(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(body): ApiJson<StatusUpdate>,
) -> ApiResult<ApiResponse<RepairOrder>> {
    let order = state.shop.update_order_status(&ctx, id, body.status).await?;
    Ok(ApiResponse::ok(order))
}
