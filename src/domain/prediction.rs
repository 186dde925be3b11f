// ==========================================
// 空气污染风险评估 - 预测结果领域模型
// ==========================================
// 每次请求新建，不持久化；所有字段必填
// ==========================================

use crate::domain::reading::Reading;
use crate::domain::types::{AqiCategory, RiskCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 类别(小写) -> 百分比
pub type ProbabilityMap = BTreeMap<String, f64>;

// ==========================================
// ClassifierOutput - 分类器输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifierOutput {
    pub prediction: RiskCategory,
    /// 置信度 (0-100)
    pub confidence: f64,
    pub probabilities: ProbabilityMap,
}

// ==========================================
// RecommendationSet - 建议
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub general: Vec<String>,
    pub sensitive_groups: Vec<String>,
    pub actions: Vec<String>,
}

// ==========================================
// PredictionModelInfo - 结果中回显的模型元数据
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionModelInfo {
    #[serde(rename = "type")]
    pub model_type: String,
    /// 百分比，保留两位小数
    pub accuracy: f64,
    pub features_used: Vec<String>,
}

// ==========================================
// PredictionResult - 预测结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: RiskCategory,
    /// 保留两位小数
    pub confidence: f64,
    pub probabilities: ProbabilityMap,
    /// 保留一位小数
    pub aqi: f64,
    pub aqi_category: AqiCategory,
    /// 默认值填充后的读数（而非原始输入）
    pub parameters: Reading,
    pub location: serde_json::Value,
    pub timestamp: String,
    pub model_info: PredictionModelInfo,
    pub recommendations: RecommendationSet,
}

/// 保留 n 位小数
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
