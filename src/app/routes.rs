// ==========================================
// 空气污染风险评估 - HTTP 路由
// ==========================================
// 职责: 将 HTTP 请求映射到 API 层
// 规则:
// - 所有来源允许跨域 (CORS permissive)
// - 每个路由都响应 OPTIONS: 200 空响应体
// - 预测请求体按原始字节读取，由 PredictionApi 解析
// ==========================================

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::api::{
    ApiResult, DashboardResponse, HealthResponse, ModelInfoResponse, PredictionResponse,
};
use crate::app::state::AppState;

/// 构建路由
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(status_page).options(preflight))
        .route("/api/health", get(health).options(preflight))
        .route("/api/dashboard", get(dashboard).options(preflight))
        .route("/api/model", get(model_info).options(preflight))
        .route("/api/predict", post(predict).options(preflight))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn status_page(State(state): State<AppState>) -> Html<String> {
    Html(state.dashboard_api.status_page())
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(state.dashboard_api.health())
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    Json(state.dashboard_api.dashboard())
}

async fn model_info(State(state): State<AppState>) -> Json<ModelInfoResponse> {
    Json(state.dashboard_api.model_info())
}

async fn predict(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<PredictionResponse>> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("predict", %request_id);
    let result = span.in_scope(|| state.prediction_api.predict_body(&body))?;
    Ok(Json(result.into()))
}
