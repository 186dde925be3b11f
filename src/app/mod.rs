// ==========================================
// 空气污染风险评估 - 应用层
// ==========================================
// 职责: 启动装配 + HTTP 集成
// ==========================================

pub mod routes;
pub mod state;

// 重导出
pub use routes::router;
pub use state::AppState;
