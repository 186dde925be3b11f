// ==========================================
// 空气污染风险评估 - 驾驶舱 API
// ==========================================
// 职责: 健康检查、驾驶舱静态数据、模型信息、状态页
// 数据: 启动时加载的只读数据，请求期间不修改
// ==========================================

use std::sync::Arc;

use serde::Serialize;

use crate::api::prediction_api::now_timestamp;
use crate::domain::classifier_bundle::ModelMetadata;
use crate::domain::dashboard::{
    DashboardData, ModelInfoDescriptor, DEFAULT_MODEL_DESCRIPTION, DEFAULT_MODEL_NAME,
};

/// 健康检查状态值
pub const HEALTHY_STATUS: &str = "healthy";

// ==========================================
// 响应体
// ==========================================

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
    pub model_accuracy: f64,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardResponse {
    pub success: bool,
    pub dashboard: DashboardData,
    pub model_loaded: bool,
    pub last_updated: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub accuracy: f64,
    pub features: Vec<String>,
    pub classes: Vec<String>,
    pub description: String,
    pub loaded: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ModelInfoResponse {
    pub success: bool,
    pub model: ModelSummary,
}

// ==========================================
// DashboardApi - 驾驶舱 API
// ==========================================

/// 驾驶舱API
///
/// 职责：
/// 1. 健康检查
/// 2. 驾驶舱聚合数据（外部文件或合成默认值）
/// 3. 模型信息（制品元数据 + 模型描述文件）
pub struct DashboardApi {
    metadata: Arc<ModelMetadata>,
    model_info: ModelInfoDescriptor,
    dashboard: DashboardData,
}

impl DashboardApi {
    /// 创建新的DashboardApi实例
    ///
    /// # 参数
    /// - metadata: 运行时模型元数据
    /// - model_info: 模型描述
    /// - dashboard: 驾驶舱数据
    pub fn new(
        metadata: Arc<ModelMetadata>,
        model_info: ModelInfoDescriptor,
        dashboard: DashboardData,
    ) -> Self {
        Self {
            metadata,
            model_info,
            dashboard,
        }
    }

    /// 健康检查
    pub fn health(&self) -> HealthResponse {
        HealthResponse {
            status: HEALTHY_STATUS.to_string(),
            model_loaded: self.metadata.loaded,
            model_accuracy: self.metadata.accuracy_percent(),
            timestamp: now_timestamp(),
        }
    }

    /// 驾驶舱数据
    pub fn dashboard(&self) -> DashboardResponse {
        DashboardResponse {
            success: true,
            dashboard: self.dashboard.clone(),
            model_loaded: self.metadata.loaded,
            last_updated: now_timestamp(),
        }
    }

    /// 模型信息
    ///
    /// # 说明
    /// - 准确率始终取自制品（或默认值），不取描述文件中的 accuracy
    /// - 名称/描述缺省时使用内置文案
    pub fn model_info(&self) -> ModelInfoResponse {
        ModelInfoResponse {
            success: true,
            model: self.model_summary(),
        }
    }

    fn model_summary(&self) -> ModelSummary {
        ModelSummary {
            name: self
                .model_info
                .name
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_NAME.to_string()),
            accuracy: self.metadata.accuracy_percent(),
            features: self.metadata.features.clone(),
            classes: self.metadata.classes.clone(),
            description: self
                .model_info
                .description
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL_DESCRIPTION.to_string()),
            loaded: self.metadata.loaded,
        }
    }

    /// 状态页 (HTML)
    pub fn status_page(&self) -> String {
        let (status_class, status_text, model_name) = if self.metadata.loaded {
            ("success", "Model Loaded", self.model_summary().name)
        } else {
            ("warning", "Using Rule-Based Fallback", "Rule-Based".to_string())
        };

        let features = if self.metadata.features.is_empty() {
            "[]".to_string()
        } else {
            format!("[{}]", self.metadata.features.join(", "))
        };

        format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Air Pollution API</title>
    <style>
        body {{ font-family: Arial, sans-serif; margin: 40px; }}
        h1 {{ color: #2c3e50; }}
        .status {{ padding: 15px; border-radius: 5px; margin: 20px 0; }}
        .success {{ background: #d4edda; color: #155724; border-left: 5px solid #28a745; }}
        .warning {{ background: #fff3cd; color: #856404; border-left: 5px solid #ffc107; }}
        pre {{ background: #f8f9fa; padding: 15px; border-radius: 5px; overflow-x: auto; }}
    </style>
</head>
<body>
    <h1>Metro Manila Air Pollution Risk API</h1>
    <div class="status {status_class}">
        <strong>Status:</strong> {status_text}<br>
        <strong>Model:</strong> {model_name}<br>
        <strong>Accuracy:</strong> {accuracy}%<br>
        <strong>Features:</strong> {features}
    </div>
    <h3>API Endpoints:</h3>
    <ul>
        <li><a href="/api/health">GET /api/health</a> - Health check</li>
        <li><a href="/api/dashboard">GET /api/dashboard</a> - Dashboard data</li>
        <li><a href="/api/model">GET /api/model</a> - Model information</li>
        <li>POST /api/predict - Get risk prediction</li>
    </ul>
    <h3>Test Prediction:</h3>
    <pre>
curl -X POST http://localhost:5000/api/predict \
  -H "Content-Type: application/json" \
  -d '{{"pm25": 25, "pm10": 50, "no2": 30, "so2": 10, "co": 1.5, "o3": 40, "temperature": 28, "humidity": 65}}'
    </pre>
    <h3>Dashboard Preview:</h3>
    <div style="background: #f8f9fa; padding: 15px; border-radius: 5px;">
        <strong>Risk Distribution:</strong><br>
        Low: {low}%<br>
        Moderate: {moderate}%<br>
        High: {high}%
    </div>
    <div style="margin-top: 20px; color: #666;">
        <p>Total samples: {total_samples}</p>
        <p>Average PM2.5: {avg_pm25:.1} μg/m³</p>
    </div>
</body>
</html>
"#,
            accuracy = self.metadata.accuracy_percent(),
            low = self.dashboard.risk_share("Low"),
            moderate = self.dashboard.risk_share("Moderate"),
            high = self.dashboard.risk_share("High"),
            total_samples = self.dashboard.total_samples(),
            avg_pm25 = self.dashboard.avg_pm25(),
        )
    }
}
