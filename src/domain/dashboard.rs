// ==========================================
// 空气污染风险评估 - 驾驶舱与模型描述
// ==========================================
// 外部 JSON 文件提供的静态数据，只读
// 未识别的字段原样透传
// ==========================================

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// 模型描述缺省时使用的名称
pub const DEFAULT_MODEL_NAME: &str = "Decision Tree Classifier";
/// 规则模式下合成描述使用的名称
pub const RULE_BASED_MODEL_NAME: &str = "Rule-Based System";
pub const DEFAULT_MODEL_DESCRIPTION: &str = "Metro Manila air pollution risk assessment model";

// ==========================================
// DashboardData - 驾驶舱聚合数据
// ==========================================
// 外部文件内容不做结构约束，按原样返回；
// 状态页只通过访问器宽松读取少数字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DashboardData(Value);

impl DashboardData {
    /// 数据文件缺失时合成的默认驾驶舱数据
    ///
    /// # 参数
    /// - model_accuracy: 模型准确率（0-1）
    pub fn synthesized(model_accuracy: f64) -> Self {
        let monthly_trends: Vec<Value> = [28, 32, 35, 30, 25, 22, 28, 33, 38, 35, 32]
            .into_iter()
            .enumerate()
            .map(|(i, pm25)| json!({"period": format!("2025-{:02}", i + 1), "pm25": pm25}))
            .collect();

        Self(json!({
            "risk_distribution": {"Low": 42, "Moderate": 48, "High": 10},
            "monthly_trends": monthly_trends,
            "summary": {
                "total_samples": 1000,
                "avg_pm25": 25.5,
                "model_accuracy": model_accuracy * 100.0
            }
        }))
    }

    /// 原始 JSON
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// 某风险等级的占比（缺失或非数值为 0）
    pub fn risk_share(&self, category: &str) -> f64 {
        self.number_at(&["risk_distribution", category])
    }

    /// summary.total_samples（缺失或非数值为 0）
    pub fn total_samples(&self) -> f64 {
        self.number_at(&["summary", "total_samples"])
    }

    /// summary.avg_pm25（缺失或非数值为 0）
    pub fn avg_pm25(&self) -> f64 {
        self.number_at(&["summary", "avg_pm25"])
    }

    fn number_at(&self, path: &[&str]) -> f64 {
        path.iter()
            .try_fold(&self.0, |node, key| node.get(*key))
            .and_then(Value::as_f64)
            .unwrap_or(0.0)
    }
}

impl From<Value> for DashboardData {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

// ==========================================
// ModelInfoDescriptor - 模型描述文件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfoDescriptor {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub accuracy: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ModelInfoDescriptor {
    /// 描述文件缺失时合成
    pub fn synthesized(model_loaded: bool, model_accuracy: f64) -> Self {
        let name = if model_loaded {
            DEFAULT_MODEL_NAME
        } else {
            RULE_BASED_MODEL_NAME
        };
        Self {
            name: Some(name.to_string()),
            accuracy: Some(crate::domain::prediction::round_to(model_accuracy * 100.0, 2)),
            description: Some(DEFAULT_MODEL_DESCRIPTION.to_string()),
            extra: Map::new(),
        }
    }
}
