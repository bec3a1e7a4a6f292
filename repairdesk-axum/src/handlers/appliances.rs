//! Appliance model handlers.

use axum::extract::State;
use axum::http::StatusCode;
use uuid::Uuid;

use repairdesk_shop::{ApplianceModel, ApplianceModelCriteria, NewApplianceModel, Page, PageRequest};

use crate::AppState;
use crate::error::ApiResult;
use crate::extract::{ApiJson, ApiPath, ApiQuery, RequestScope};
use crate::response::ApiResponse;

/// `GET /api/appliance-models?brand=&model=&kind=&yearGreaterOrEqual=&yearLessOrEqual=`
pub async fn search_appliance_models(
    State(state): State<AppState>,
    ApiQuery(criteria): ApiQuery<ApplianceModelCriteria>,
    ApiQuery(page): ApiQuery<PageRequest>,
) -> ApiResult<ApiResponse<Page<ApplianceModel>>> {
    let page = state.shop.search_appliance_models(&criteria, page).await?;
    Ok(ApiResponse::ok(page))
}

/// `POST /api/appliance-models`
pub async fn create_appliance_model(
    State(state): State<AppState>,
    RequestScope(ctx): RequestScope,
    ApiJson(input): ApiJson<NewApplianceModel>,
) -> ApiResult<(StatusCode, ApiResponse<ApplianceModel>)> {
    let model = state.shop.create_appliance_model(&ctx, input).await?;
    Ok((StatusCode::CREATED, ApiResponse::ok(model)))
}

/// `GET /api/appliance-models/{id}`
pub async fn get_appliance_model(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> ApiResult<ApiResponse<ApplianceModel>> {
    let model = state.shop.get_appliance_model(id).await?;
    Ok(ApiResponse::ok(model))
}
