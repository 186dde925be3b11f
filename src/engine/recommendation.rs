// ==========================================
// 空气污染风险评估 - 建议生成引擎
// ==========================================
// 职责: (风险等级, AQI) -> 一般建议 / 敏感人群建议 / 行动建议
// 规则: 有序 OR 判定，先命中先返回
//   1. Low 或 aqi <= 50
//   2. Moderate 或 aqi <= 100
//   3. 其余
// 文案: locales/*.yml (recommendation.*)，英文文案为兼容基准
// ==========================================

use crate::domain::prediction::RecommendationSet;
use crate::domain::types::RiskCategory;
use crate::i18n::t;

/// 建议档位
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationBucket {
    Low,
    Moderate,
    High,
}

struct BucketKeys {
    general: &'static [&'static str],
    sensitive_groups: &'static [&'static str],
    actions: &'static [&'static str],
}

const LOW_KEYS: BucketKeys = BucketKeys {
    general: &["recommendation.low.general_1", "recommendation.low.general_2"],
    sensitive_groups: &["recommendation.low.sensitive_1"],
    actions: &["recommendation.low.action_1", "recommendation.low.action_2"],
};

const MODERATE_KEYS: BucketKeys = BucketKeys {
    general: &[
        "recommendation.moderate.general_1",
        "recommendation.moderate.general_2",
    ],
    sensitive_groups: &[
        "recommendation.moderate.sensitive_1",
        "recommendation.moderate.sensitive_2",
    ],
    actions: &[
        "recommendation.moderate.action_1",
        "recommendation.moderate.action_2",
        "recommendation.moderate.action_3",
    ],
};

const HIGH_KEYS: BucketKeys = BucketKeys {
    general: &["recommendation.high.general_1", "recommendation.high.general_2"],
    sensitive_groups: &[
        "recommendation.high.sensitive_1",
        "recommendation.high.sensitive_2",
    ],
    actions: &[
        "recommendation.high.action_1",
        "recommendation.high.action_2",
        "recommendation.high.action_3",
    ],
};

impl RecommendationBucket {
    /// 有序 OR 判定（不是 AND，不做两路信号调和）
    pub fn select(category: RiskCategory, aqi: f64) -> Self {
        if category == RiskCategory::Low || aqi <= 50.0 {
            RecommendationBucket::Low
        } else if category == RiskCategory::Moderate || aqi <= 100.0 {
            RecommendationBucket::Moderate
        } else {
            RecommendationBucket::High
        }
    }

    fn keys(&self) -> &'static BucketKeys {
        match self {
            RecommendationBucket::Low => &LOW_KEYS,
            RecommendationBucket::Moderate => &MODERATE_KEYS,
            RecommendationBucket::High => &HIGH_KEYS,
        }
    }
}

// ==========================================
// RecommendationEngine - 建议生成引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct RecommendationEngine;

impl RecommendationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 生成建议（使用当前语言）
    pub fn recommend(&self, category: RiskCategory, aqi: f64) -> RecommendationSet {
        let keys = RecommendationBucket::select(category, aqi).keys();
        let translate = |list: &[&str]| list.iter().map(|key| t(key)).collect::<Vec<_>>();

        RecommendationSet {
            general: translate(keys.general),
            sensitive_groups: translate(keys.sensitive_groups),
            actions: translate(keys.actions),
        }
    }
}
