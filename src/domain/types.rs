// ==========================================
// 空气污染风险评估 - 领域类型定义
// ==========================================
// 两套分级互相独立:
// - RiskCategory: 分类器输出的三级风险
// - AqiCategory: 按 AQI 阈值得到的五级空气质量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 风险等级 (Risk Category)
// ==========================================
// 顺序: Low < Moderate < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,      // 低风险
    Moderate, // 中等风险
    High,     // 高风险
}

impl RiskCategory {
    /// 全部等级（按顺序）
    pub const ALL: [RiskCategory; 3] = [RiskCategory::Low, RiskCategory::Moderate, RiskCategory::High];

    /// 规范名称 (Low / Moderate / High)
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Moderate => "Moderate",
            RiskCategory::High => "High",
        }
    }

    /// 概率表中使用的小写键
    pub fn key(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Moderate => "moderate",
            RiskCategory::High => "high",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskCategory {
    type Err = String;

    /// 大小写不敏感解析（标签编码器中的类别名可能是任意大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(RiskCategory::Low),
            "moderate" => Ok(RiskCategory::Moderate),
            "high" => Ok(RiskCategory::High),
            other => Err(format!("unknown risk category '{}'", other)),
        }
    }
}

// ==========================================
// AQI 等级 (AQI Category)
// ==========================================
// 序列化为固定英文标签，调用方按字符串匹配
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AqiCategory {
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "Unhealthy for Sensitive Groups")]
    UnhealthyForSensitiveGroups,
    #[serde(rename = "Unhealthy")]
    Unhealthy,
    #[serde(rename = "Very Unhealthy")]
    VeryUnhealthy,
}

impl AqiCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
