// ==========================================
// 空气污染风险评估 - AQI 换算引擎
// ==========================================
// 职责: PM2.5 浓度 -> AQI 数值 -> 五级 AQI 标签
// 输入: pm25 (µg/m³)
// 输出: aqi (无量纲), AqiCategory
// ==========================================

use crate::domain::types::AqiCategory;

/// PM2.5 分段: (浓度下限, 浓度上限, AQI 下限, AQI 上限)
///
/// 相邻分段的浓度下限按 0.1 µg/m³ 精度取值 (12.1 / 35.5 / 55.5 / 150.5)，
/// 最后一段斜率沿用到 150.4 以上，不截断
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 5] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 150.4, 151.0, 200.0),
    (150.5, 200.0, 201.0, 300.0),
];

/// AQI 标签阈值（闭区间上限）
const AQI_CATEGORY_LIMITS: [(f64, AqiCategory); 4] = [
    (50.0, AqiCategory::Good),
    (100.0, AqiCategory::Moderate),
    (150.0, AqiCategory::UnhealthyForSensitiveGroups),
    (200.0, AqiCategory::Unhealthy),
];

// ==========================================
// AqiEngine - AQI 换算引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct AqiEngine;

impl AqiEngine {
    pub fn new() -> Self {
        Self
    }

    /// PM2.5 -> AQI
    ///
    /// 分段线性: aqi = lo_aqi + (pm25 - lo_pm) * (hi_aqi - lo_aqi) / (hi_pm - lo_pm)
    /// 分段选择按浓度上限: pm25 <= 12 / <= 35.4 / <= 55.4 / <= 150.4 / 其余
    pub fn calculate_aqi(&self, pm25: f64) -> f64 {
        let last = PM25_BREAKPOINTS.len() - 1;
        let (lo_pm, hi_pm, lo_aqi, hi_aqi) = PM25_BREAKPOINTS
            .iter()
            .take(last)
            .find(|(_, hi_pm, _, _)| pm25 <= *hi_pm)
            .copied()
            .unwrap_or(PM25_BREAKPOINTS[last]);

        lo_aqi + (pm25 - lo_pm) * (hi_aqi - lo_aqi) / (hi_pm - lo_pm)
    }

    /// AQI -> 五级标签
    pub fn aqi_category(&self, aqi: f64) -> AqiCategory {
        AQI_CATEGORY_LIMITS
            .iter()
            .find(|(limit, _)| aqi <= *limit)
            .map(|(_, category)| *category)
            .unwrap_or(AqiCategory::VeryUnhealthy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_breakpoints() {
        let engine = AqiEngine::new();
        assert!(approx(engine.calculate_aqi(0.0), 0.0));
        assert!(approx(engine.calculate_aqi(12.0), 50.0));
        assert!(approx(engine.calculate_aqi(35.4), 100.0));
        assert!(approx(engine.calculate_aqi(55.4), 150.0));
        assert!(approx(engine.calculate_aqi(150.4), 200.0));
    }

    #[test]
    fn test_extrapolates_above_top_breakpoint() {
        let engine = AqiEngine::new();
        // 201 + (250.5 - 150.5) * 2
        assert!(approx(engine.calculate_aqi(250.5), 401.0));
        assert!(engine.calculate_aqi(600.0) > 500.0);
    }

    #[test]
    fn test_category_boundaries() {
        let engine = AqiEngine::new();
        assert_eq!(engine.aqi_category(50.0), AqiCategory::Good);
        assert_eq!(engine.aqi_category(50.01), AqiCategory::Moderate);
        assert_eq!(engine.aqi_category(100.0), AqiCategory::Moderate);
        assert_eq!(engine.aqi_category(150.0), AqiCategory::UnhealthyForSensitiveGroups);
        assert_eq!(engine.aqi_category(200.0), AqiCategory::Unhealthy);
        assert_eq!(engine.aqi_category(200.5), AqiCategory::VeryUnhealthy);
    }
}
