// ==========================================
// 空气污染风险评估 - 领域模型层
// ==========================================
// 职责: 定义读数、分级、分类器制品、预测结果、驾驶舱数据
// 红线: 不含 HTTP 逻辑,不含文件读取
// ==========================================

pub mod classifier_bundle;
pub mod dashboard;
pub mod prediction;
pub mod reading;
pub mod types;

// 重导出核心类型
pub use classifier_bundle::{
    ClassifierBundle, Estimator, LabelEncoder, ModelError, ModelMetadata, Scaler, TreeNode,
};
pub use dashboard::{DashboardData, ModelInfoDescriptor};
pub use prediction::{
    ClassifierOutput, PredictionModelInfo, PredictionResult, ProbabilityMap, RecommendationSet,
};
pub use reading::{RawReading, Reading, ReadingError};
pub use types::{AqiCategory, RiskCategory};
