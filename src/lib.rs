// ==========================================
// 空气污染风险评估服务 - 核心库
// ==========================================
// 技术栈: axum + tokio + serde
// 系统定位: 无状态预测服务（启动时加载制品，之后只读）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 读数、分类器制品、预测结果
pub mod domain;

// 数据仓储层 - 制品文件读取
pub mod repository;

// 引擎层 - 分类、AQI、建议
pub mod engine;

// 配置层 - 环境变量
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 启动装配与 HTTP 路由
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AqiCategory, RiskCategory};

// 领域实体
pub use domain::{ClassifierBundle, ModelMetadata, PredictionResult, RawReading, Reading};

// 引擎
pub use engine::{
    AqiEngine, FallbackClassifier, ModelBackedClassifier, RecommendationEngine, RiskClassifier,
    RuleBasedClassifier,
};

// API
pub use api::{ApiError, DashboardApi, PredictionApi};

// 应用
pub use app::{router, AppState};
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 服务版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 服务名称
pub const APP_NAME: &str = "Metro Manila Air Pollution Risk API";
