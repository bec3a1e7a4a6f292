//! Client handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use repairdesk_shop::{Client, ClientCriteria, NewClient, Page, PageRequest};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, RequestScope};
use crate::response::ApiResponse;

/// `GET /api/clients?name=&phone=&email=&page=&size=`
pub async fn search_clients(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<ClientCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<ApiResponse<Page<Client>>> {
    let page = state.shop.search_clients(&criteria, page).await?;
    Ok(ApiResponse::ok(page))
}

/// `POST /api/clients`
pub async fn create_client(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiJson(input): ApiJson<NewClient>,
) -> ApiResult<(StatusCode, ApiResponse<Client>)> {
    let client = state.shop.create_client(&ctx, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(client)))
}

/// `GET /api/clients/{id}`
pub async fn get_client(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<Client>> {
    let client = state.shop.get_client(id).await?;
    Ok(ApiResponse::ok(client))
}

/// `DELETE /api/clients/{id}`
pub async fn delete_client(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<Client>> {
    let client = state.shop.delete_client(&ctx, id).await?;
    Ok(ApiResponse::ok(client))
}
