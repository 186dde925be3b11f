// ==========================================
// 空气污染风险评估 - 引擎层
// ==========================================
// 职责: AQI 换算、风险分类、建议生成
// 红线: 引擎无状态、不读文件、不做 HTTP
// ==========================================

pub mod aqi;
pub mod classifier;
pub mod recommendation;

// 重导出核心引擎
pub use aqi::AqiEngine;
pub use classifier::{
    FallbackClassifier, ModelBackedClassifier, RiskClassifier, RuleBasedClassifier,
};
pub use recommendation::{RecommendationBucket, RecommendationEngine};
