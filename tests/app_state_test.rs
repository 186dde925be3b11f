// ==========================================
// AppState 启动装配集成测试
// ==========================================
// 测试目标: 验证制品缺失/损坏时的降级与外部数据透传
// 覆盖范围: 分类器制品、模型描述、驾驶舱数据各自独立加载
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use air_risk_api::app::AppState;
use air_risk_api::config::AppConfig;
use serde_json::json;
use test_helpers::*;

#[test]
fn test_missing_artifacts_use_defaults() {
    let (_dir, config) = create_artifact_dir();
    let state = AppState::load(config);

    assert!(!state.metadata.loaded);
    assert_eq!(state.metadata.model_type, "Rule-Based");
    assert_eq!(state.metadata.classes, vec!["Low", "Moderate", "High"]);

    let health = state.dashboard_api.health();
    assert!(!health.model_loaded);
    assert_eq!(health.model_accuracy, 85.0);

    let info = state.dashboard_api.model_info();
    assert_eq!(info.model.name, "Rule-Based System");
    assert_eq!(
        info.model.description,
        "Metro Manila air pollution risk assessment model"
    );

    let dashboard = state.dashboard_api.dashboard();
    assert_eq!(dashboard.dashboard.as_value()["summary"]["model_accuracy"], 85.0);
    assert_eq!(dashboard.dashboard.risk_share("Low"), 42.0);
}

#[test]
fn test_corrupt_bundle_falls_back_to_rules() {
    let (_dir, config) = create_artifact_dir();
    std::fs::write(&config.model_path, b"\x80\x04\x95 pickled bytes").unwrap();

    let state = AppState::load(config);
    assert!(!state.metadata.loaded);

    let result = state.prediction_api.predict_body(b"{}").unwrap();
    assert_eq!(result.model_info.model_type, "Rule-Based");
}

#[test]
fn test_artifacts_load_independently() {
    let (_dir, config) = create_artifact_dir();
    write_json(&config.model_path, &decision_tree_bundle_json());
    std::fs::write(&config.model_info_path, "{ broken").unwrap();
    write_json(
        &config.dashboard_path,
        &json!({
            "risk_distribution": {"Low": 30, "Moderate": 50, "High": 20},
            "monthly_trends": [{"period": "2024-12", "pm25": 31.2}],
            "summary": {"total_samples": 5400, "avg_pm25": 27.4, "model_accuracy": 93.12},
            "stations": ["Makati", "Pasig"]
        }),
    );

    let state = AppState::load(config);
    assert!(state.metadata.loaded);
    assert_eq!(state.metadata.model_type, "DecisionTreeClassifier");

    // 描述文件损坏 -> 合成描述（模型已加载）
    let info = state.dashboard_api.model_info();
    assert_eq!(info.model.name, "Decision Tree Classifier");
    assert_eq!(info.model.accuracy, 93.12);

    // 驾驶舱数据原样透传
    let dashboard = serde_json::to_value(state.dashboard_api.dashboard()).unwrap();
    assert_eq!(dashboard["dashboard"]["summary"]["total_samples"], 5400);
    assert_eq!(dashboard["dashboard"]["stations"], json!(["Makati", "Pasig"]));
    assert_eq!(dashboard["dashboard"]["monthly_trends"][0]["period"], "2024-12");
}

#[test]
fn test_model_info_accuracy_comes_from_bundle() {
    let (_dir, config) = create_artifact_dir();
    write_json(&config.model_path, &decision_tree_bundle_json());
    write_json(
        &config.model_info_path,
        &json!({
            "name": "Pruned Decision Tree",
            "accuracy": 12.5,
            "training_date": "2025-06-01"
        }),
    );

    let state = AppState::load(config);
    let info = state.dashboard_api.model_info();
    assert_eq!(info.model.name, "Pruned Decision Tree");
    assert_eq!(info.model.accuracy, 93.12);
    assert_eq!(info.model.features, FEATURES.to_vec());
}

#[test]
fn test_fallback_flag_keeps_model_type() {
    let (_dir, config) = create_artifact_dir();
    write_json(&config.model_path, &unknown_class_bundle_json());
    let config = AppConfig {
        fallback_on_inference_error: true,
        ..config
    };

    let state = AppState::load(config);
    assert!(state.config.fallback_on_inference_error);

    let result = state
        .prediction_api
        .predict_body(br#"{"pm25": 75}"#)
        .unwrap();
    assert_eq!(result.model_info.model_type, "NearestCentroid");
    assert_eq!(result.confidence, 85.0);
}

// ==========================================
// 驾驶舱数据原样透传
// ==========================================

fn load_dashboard_file(content: &serde_json::Value) -> serde_json::Value {
    let (_dir, config) = create_artifact_dir();
    write_json(&config.dashboard_path, content);
    let state = AppState::load(config);
    serde_json::to_value(state.dashboard_api.dashboard()).unwrap()["dashboard"].clone()
}

#[test]
fn test_dashboard_with_frontend_summary_numbers() {
    let content = json!({
        "risk_distribution": {"Low": 55.2, "Moderate": 38.1, "High": 6.7},
        "monthly_trends": [
            {"period": "2024-01", "pm25": 15.3},
            {"period": "2024-02", "pm25": 12.9}
        ],
        "summary": {"total_samples": 1320729, "avg_pm25": 13.79, "model_accuracy": 93.12}
    });
    assert_eq!(load_dashboard_file(&content), content);
}

#[test]
fn test_dashboard_with_float_sample_count() {
    let content = json!({
        "summary": {"total_samples": 1320729.0, "avg_pm25": 13.79}
    });
    let served = load_dashboard_file(&content);
    assert_eq!(served, content);
    // 文件中没有的键不补齐
    assert!(served.get("risk_distribution").is_none());
    assert!(served.get("monthly_trends").is_none());
}

#[test]
fn test_dashboard_with_unfamiliar_trend_keys() {
    let content = json!({
        "risk_distribution": {"Low": 40, "Moderate": 45, "High": 15},
        "monthly_trends": [
            {"month": "2024-11", "avg_pm25": 17.4, "max_pm25": 61.0},
            {"month": "2024-12", "avg_pm25": 19.0, "stations": ["Makati", "Taguig"]}
        ],
        "summary": {"total_samples": "n/a"}
    });
    assert_eq!(load_dashboard_file(&content), content);
}
