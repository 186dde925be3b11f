// ==========================================
// 空气污染风险评估 - 风险分类引擎
// ==========================================
// 职责: 读数 -> 三级风险 + 置信度 + 各类别概率
// 变体:
// - ModelBackedClassifier: 预训练制品推理
// - RuleBasedClassifier: 固定 PM2.5 阈值
// - FallbackClassifier: 推理失败时按请求降级到规则
// 变体在启动时选定一次，请求中不再切换
// ==========================================

use crate::domain::classifier_bundle::{ClassifierBundle, ModelError};
use crate::domain::prediction::{ClassifierOutput, ProbabilityMap};
use crate::domain::reading::Reading;
use crate::domain::types::RiskCategory;

// ==========================================
// Trait: RiskClassifier
// ==========================================
pub trait RiskClassifier: Send + Sync {
    /// 对完整读数分类
    fn classify(&self, reading: &Reading) -> Result<ClassifierOutput, ModelError>;

    /// 模型类型名（结果中回显）
    fn model_type(&self) -> &str;
}

// ==========================================
// RuleBasedClassifier - 规则分类器
// ==========================================

/// 低风险上限 (µg/m³)
pub const LOW_PM25_LIMIT: f64 = 12.0;
/// 中等风险上限 (µg/m³)
pub const MODERATE_PM25_LIMIT: f64 = 35.4;

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier;

impl RuleBasedClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 固定输出表: (等级, 置信度, [low, moderate, high])
    fn decide(pm25: f64) -> (RiskCategory, f64, [f64; 3]) {
        if pm25 <= LOW_PM25_LIMIT {
            (RiskCategory::Low, 95.0, [90.0, 8.0, 2.0])
        } else if pm25 <= MODERATE_PM25_LIMIT {
            (RiskCategory::Moderate, 90.0, [10.0, 85.0, 5.0])
        } else {
            (RiskCategory::High, 85.0, [2.0, 8.0, 90.0])
        }
    }
}

impl RiskClassifier for RuleBasedClassifier {
    fn classify(&self, reading: &Reading) -> Result<ClassifierOutput, ModelError> {
        let (prediction, confidence, shares) = Self::decide(reading.pm25);
        let probabilities = RiskCategory::ALL
            .iter()
            .zip(shares)
            .map(|(category, share)| (category.key().to_string(), share))
            .collect();

        Ok(ClassifierOutput {
            prediction,
            confidence,
            probabilities,
        })
    }

    fn model_type(&self) -> &str {
        "Rule-Based"
    }
}

// ==========================================
// ModelBackedClassifier - 制品推理分类器
// ==========================================

/// 无概率估计能力时的固定置信度
pub const NO_PROBA_CONFIDENCE: f64 = 90.0;

#[derive(Debug, Clone)]
pub struct ModelBackedClassifier {
    bundle: ClassifierBundle,
}

impl ModelBackedClassifier {
    pub fn new(bundle: ClassifierBundle) -> Self {
        Self { bundle }
    }

    /// 按制品声明的特征顺序构造输入向量
    ///
    /// 读数中不存在的特征名: pm25 取 25, pm10 取 50, 其余取 30
    pub fn feature_vector(&self, reading: &Reading) -> Vec<f64> {
        self.bundle
            .features
            .iter()
            .map(|name| {
                reading.get(name).unwrap_or(match name.as_str() {
                    "pm25" => 25.0,
                    "pm10" => 50.0,
                    _ => 30.0,
                })
            })
            .collect()
    }
}

impl RiskClassifier for ModelBackedClassifier {
    fn classify(&self, reading: &Reading) -> Result<ClassifierOutput, ModelError> {
        let input = self.feature_vector(reading);
        let scaled = self.bundle.scaler.transform(&input)?;

        let code = self.bundle.model.predict(scaled.view())?;
        let class_name = self.bundle.label_encoder.inverse_transform(code)?;
        let prediction: RiskCategory = class_name
            .parse()
            .map_err(|_| ModelError::UnknownCategory(class_name.to_string()))?;

        let classes = &self.bundle.label_encoder.classes;
        let (confidence, probabilities) = if self.bundle.model.supports_proba() {
            let proba = self.bundle.model.predict_proba(scaled.view())? * 100.0;
            if proba.len() != classes.len() {
                return Err(ModelError::InvalidModel(format!(
                    "{} probabilities for {} classes",
                    proba.len(),
                    classes.len()
                )));
            }
            let max = proba.fold(f64::NEG_INFINITY, |m, &p| m.max(p));
            let map: ProbabilityMap = classes
                .iter()
                .zip(proba.iter())
                .map(|(name, &p)| (name.to_lowercase(), p))
                .collect();
            (max, map)
        } else {
            // 仅预测类别取固定置信度，其余为 0
            let mut map: ProbabilityMap = classes
                .iter()
                .map(|name| (name.to_lowercase(), 0.0))
                .collect();
            map.insert(class_name.to_lowercase(), NO_PROBA_CONFIDENCE);
            (NO_PROBA_CONFIDENCE, map)
        };

        tracing::debug!(
            prediction = %prediction,
            confidence,
            "模型推理完成"
        );

        Ok(ClassifierOutput {
            prediction,
            confidence,
            probabilities,
        })
    }

    fn model_type(&self) -> &str {
        self.bundle.model.type_name()
    }
}

// ==========================================
// FallbackClassifier - 推理失败时降级
// ==========================================
// 仅在配置 fallback_on_inference_error 开启时使用
#[derive(Debug, Clone)]
pub struct FallbackClassifier {
    primary: ModelBackedClassifier,
    fallback: RuleBasedClassifier,
}

impl FallbackClassifier {
    pub fn new(primary: ModelBackedClassifier) -> Self {
        Self {
            primary,
            fallback: RuleBasedClassifier::new(),
        }
    }
}

impl RiskClassifier for FallbackClassifier {
    fn classify(&self, reading: &Reading) -> Result<ClassifierOutput, ModelError> {
        match self.primary.classify(reading) {
            Ok(output) => Ok(output),
            Err(e) => {
                tracing::warn!("模型推理失败，本次请求使用规则分类: {}", e);
                self.fallback.classify(reading)
            }
        }
    }

    fn model_type(&self) -> &str {
        self.primary.model_type()
    }
}
