// ==========================================
// 空气污染风险评估 - API 层
// ==========================================
// 职责: 提供业务 API 接口,供 HTTP 路由调用
// ==========================================

pub mod dashboard_api;
pub mod error;
pub mod prediction_api;

// 重导出核心类型
pub use dashboard_api::{
    DashboardApi, DashboardResponse, HealthResponse, ModelInfoResponse, ModelSummary,
};
pub use error::{ApiError, ApiResult, ErrorBody};
pub use prediction_api::{PredictionApi, PredictionResponse};
