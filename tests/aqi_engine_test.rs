// ==========================================
// AqiEngine 引擎集成测试
// ==========================================
// 测试目标: 验证 PM2.5 -> AQI 换算及五级标签
// 覆盖范围: 分段端点、段间空隙、超上限外推、单调性
// ==========================================

use air_risk_api::domain::types::AqiCategory;
use air_risk_api::engine::AqiEngine;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ==========================================
// 分段端点
// ==========================================

#[test]
fn test_segment_endpoints() {
    let engine = AqiEngine::new();

    let cases = [
        (0.0, 0.0),
        (12.0, 50.0),
        (12.1, 51.0),
        (35.4, 100.0),
        (35.5, 101.0),
        (55.4, 150.0),
        (55.5, 151.0),
        (150.4, 200.0),
        (150.5, 201.0),
        (200.0, 300.0),
    ];

    for (pm25, expected) in cases {
        let aqi = engine.calculate_aqi(pm25);
        assert!(
            approx(aqi, expected),
            "pm25={} 期望 AQI {}，实际 {}",
            pm25,
            expected,
            aqi
        );
    }
}

#[test]
fn test_default_pm25() {
    let engine = AqiEngine::new();
    // 51 + (25 - 12.1) * 49 / 23.3
    let aqi = engine.calculate_aqi(25.0);
    assert!((aqi - 78.128).abs() < 1e-3);
    assert_eq!(engine.aqi_category(aqi), AqiCategory::Moderate);
}

#[test]
fn test_gap_between_segments() {
    let engine = AqiEngine::new();
    // 12.0 与 12.1 之间落在第二段，结果介于 50 与 51 之间
    let aqi = engine.calculate_aqi(12.05);
    assert!(aqi > 50.0 && aqi < 51.0);
}

#[test]
fn test_extrapolation_above_table() {
    let engine = AqiEngine::new();
    // 最后一段斜率 99 / 49.5 = 2，不截断
    assert!(approx(engine.calculate_aqi(250.0), 400.0));
    assert!(approx(engine.calculate_aqi(500.0), 900.0));
    assert_eq!(engine.aqi_category(900.0), AqiCategory::VeryUnhealthy);
}

// ==========================================
// 五级标签
// ==========================================

#[test]
fn test_category_boundaries() {
    let engine = AqiEngine::new();

    assert_eq!(engine.aqi_category(0.0), AqiCategory::Good);
    assert_eq!(engine.aqi_category(50.0), AqiCategory::Good);
    assert_eq!(engine.aqi_category(50.01), AqiCategory::Moderate);
    assert_eq!(engine.aqi_category(100.0), AqiCategory::Moderate);
    assert_eq!(
        engine.aqi_category(100.01),
        AqiCategory::UnhealthyForSensitiveGroups
    );
    assert_eq!(
        engine.aqi_category(150.0),
        AqiCategory::UnhealthyForSensitiveGroups
    );
    assert_eq!(engine.aqi_category(150.01), AqiCategory::Unhealthy);
    assert_eq!(engine.aqi_category(200.0), AqiCategory::Unhealthy);
    assert_eq!(engine.aqi_category(200.01), AqiCategory::VeryUnhealthy);
}

#[test]
fn test_category_labels() {
    assert_eq!(
        AqiCategory::UnhealthyForSensitiveGroups.as_str(),
        "Unhealthy for Sensitive Groups"
    );
    assert_eq!(
        serde_json::to_value(AqiCategory::VeryUnhealthy).unwrap(),
        serde_json::json!("Very Unhealthy")
    );
}

// ==========================================
// 单调性
// ==========================================

#[test]
fn test_monotonic_sweep() {
    let engine = AqiEngine::new();

    let mut prev = engine.calculate_aqi(0.0);
    for i in 1..=30_000 {
        let pm25 = i as f64 / 100.0;
        let aqi = engine.calculate_aqi(pm25);
        assert!(
            aqi >= prev,
            "AQI 在 pm25={} 处下降: {} -> {}",
            pm25,
            prev,
            aqi
        );
        prev = aqi;
    }
}
