// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供临时制品目录、测试用分类器制品、AppState 构建
// ==========================================

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use air_risk_api::app::AppState;
use air_risk_api::config::AppConfig;
use air_risk_api::domain::{ClassifierBundle, DashboardData, ModelInfoDescriptor};
use air_risk_api::logging;
use serde_json::{json, Value};
use tempfile::TempDir;

/// 训练时使用的特征顺序
pub const FEATURES: [&str; 8] = [
    "pm25",
    "pm10",
    "no2",
    "so2",
    "co",
    "o3",
    "temperature",
    "humidity",
];

/// 创建临时制品目录，并返回指向其中三个制品路径的配置
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - AppConfig: 制品路径位于临时目录下
pub fn create_artifact_dir() -> (TempDir, AppConfig) {
    logging::init_test();
    let dir = TempDir::new().expect("创建临时目录失败");
    let config = AppConfig {
        model_path: dir.path().join("air_pollution_model.json"),
        model_info_path: dir.path().join("model_info.json"),
        dashboard_path: dir.path().join("dashboard_data.json"),
        ..AppConfig::default()
    };
    (dir, config)
}

/// 写入 JSON 制品
pub fn write_json(path: &Path, value: &Value) -> PathBuf {
    std::fs::write(path, serde_json::to_vec_pretty(value).expect("序列化失败"))
        .expect("写入制品失败");
    path.to_path_buf()
}

/// 决策树制品（类别按字母序编码: High / Low / Moderate）
///
/// 树结构:
/// - pm25 <= 12   -> Low      (叶子计数 [0, 9, 1])
/// - pm25 <= 35.4 -> Moderate (叶子计数 [1, 2, 7])
/// - 其余         -> High     (叶子计数 [8, 0, 2])
pub fn decision_tree_bundle_json() -> Value {
    json!({
        "model": {
            "type": "decision_tree",
            "nodes": [
                {"feature": 0, "threshold": 12.0, "left": 1, "right": 2},
                {"value": [0.0, 9.0, 1.0]},
                {"feature": 0, "threshold": 35.4, "left": 3, "right": 4},
                {"value": [1.0, 2.0, 7.0]},
                {"value": [8.0, 0.0, 2.0]}
            ]
        },
        "scaler": {"type": "identity"},
        "label_encoder": {"classes": ["High", "Low", "Moderate"]},
        "features": FEATURES,
        "accuracy": 0.9312
    })
}

/// 最近质心制品（无概率估计），其中一个类别名不属于三级风险
///
/// pm25 靠近 60 时预测为 "Severe"，推理阶段报错
pub fn unknown_class_bundle_json() -> Value {
    json!({
        "model": {"type": "nearest_centroid", "centroids": [[5.0], [60.0]]},
        "scaler": {"type": "identity"},
        "label_encoder": {"classes": ["Low", "Severe"]},
        "features": ["pm25"],
        "accuracy": 0.8
    })
}

pub fn bundle_from(value: Value) -> ClassifierBundle {
    let bundle: ClassifierBundle = serde_json::from_value(value).expect("制品格式错误");
    bundle.validate().expect("制品校验失败");
    bundle
}

/// 规则分类模式的 AppState（不读文件）
pub fn rule_based_state() -> AppState {
    logging::init_test();
    AppState::from_parts(
        AppConfig::default(),
        None,
        ModelInfoDescriptor::synthesized(false, 0.85),
        DashboardData::synthesized(0.85),
    )
}

/// 制品推理模式的 AppState（不读文件）
pub fn model_backed_state(bundle: ClassifierBundle, fallback: bool) -> AppState {
    logging::init_test();
    let accuracy = bundle.accuracy;
    let config = AppConfig {
        fallback_on_inference_error: fallback,
        ..AppConfig::default()
    };
    AppState::from_parts(
        config,
        Some(bundle),
        ModelInfoDescriptor::synthesized(true, accuracy),
        DashboardData::synthesized(accuracy),
    )
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
