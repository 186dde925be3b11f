// ==========================================
// 空气污染风险评估 - 预测 API
// ==========================================
// 职责: 编排一次预测请求
// 流程: 默认值填充/数值转换 -> 风险分类 -> AQI 换算 -> 建议生成 -> 组装结果
// 红线: 推理失败不重试；无共享可变状态
// ==========================================

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::classifier_bundle::ModelMetadata;
use crate::domain::prediction::{round_to, PredictionModelInfo, PredictionResult};
use crate::domain::reading::RawReading;
use crate::engine::aqi::AqiEngine;
use crate::engine::classifier::RiskClassifier;
use crate::engine::recommendation::RecommendationEngine;

/// 当前本地时间（ISO 8601，微秒精度，无时区）
pub fn now_timestamp() -> String {
    chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

// ==========================================
// PredictionResponse - 成功响应体
// ==========================================
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub success: bool,
    #[serde(flatten)]
    pub result: PredictionResult,
}

impl From<PredictionResult> for PredictionResponse {
    fn from(result: PredictionResult) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

// ==========================================
// PredictionApi - 预测 API
// ==========================================
pub struct PredictionApi {
    classifier: Arc<dyn RiskClassifier>,
    metadata: Arc<ModelMetadata>,
    aqi_engine: AqiEngine,
    recommendation_engine: RecommendationEngine,
    default_location: String,
}

impl PredictionApi {
    /// 创建新的PredictionApi实例
    ///
    /// # 参数
    /// - classifier: 启动时选定的分类器
    /// - metadata: 模型元数据（结果中回显）
    /// - default_location: 请求未给出 location 时的默认值
    pub fn new(
        classifier: Arc<dyn RiskClassifier>,
        metadata: Arc<ModelMetadata>,
        default_location: impl Into<String>,
    ) -> Self {
        Self {
            classifier,
            metadata,
            aqi_engine: AqiEngine::new(),
            recommendation_engine: RecommendationEngine::new(),
            default_location: default_location.into(),
        }
    }

    /// 从原始请求体预测
    ///
    /// # 规则
    /// - 空请求体 / null 视为 {}
    /// - 非法 JSON -> ApiError::InvalidBody
    pub fn predict_body(&self, body: &[u8]) -> ApiResult<PredictionResult> {
        let value = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(body).map_err(|e| ApiError::InvalidBody(e.to_string()))?
        };
        let raw = RawReading::from_body(value)?;
        self.predict(&raw)
    }

    /// 预测
    ///
    /// # 返回
    /// - Ok(PredictionResult): 所有字段均已填充
    /// - Err(ApiError): 校验失败或推理失败
    pub fn predict(&self, raw: &RawReading) -> ApiResult<PredictionResult> {
        // 1. 默认值填充 + 数值转换
        let reading = raw.resolve()?;
        debug!(?reading, "读数解析完成");

        // 2. 风险分类
        let output = self.classifier.classify(&reading)?;

        // 3. AQI 只依据 pm25
        let aqi = self.aqi_engine.calculate_aqi(reading.pm25);
        let aqi_category = self.aqi_engine.aqi_category(aqi);

        // 4. 建议（使用分类结果与未取整的 AQI）
        let recommendations = self.recommendation_engine.recommend(output.prediction, aqi);

        info!(
            prediction = %output.prediction,
            confidence = output.confidence,
            aqi = aqi,
            aqi_category = %aqi_category,
            "预测完成"
        );

        // 5. 组装
        Ok(PredictionResult {
            prediction: output.prediction,
            confidence: round_to(output.confidence, 2),
            probabilities: output.probabilities,
            aqi: round_to(aqi, 1),
            aqi_category,
            parameters: reading,
            location: raw.location(&self.default_location),
            timestamp: now_timestamp(),
            model_info: PredictionModelInfo {
                model_type: self.classifier.model_type().to_string(),
                accuracy: self.metadata.accuracy_percent(),
                features_used: self.metadata.features.clone(),
            },
            recommendations,
        })
    }
}
