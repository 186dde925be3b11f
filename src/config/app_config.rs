// ==========================================
// 空气污染风险评估 - 应用配置
// ==========================================
// 职责: 配置加载、默认值管理
// 来源: 环境变量 (config_keys)，缺省或非法时取默认值
// ==========================================

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::i18n::DEFAULT_LOCALE;

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 服务
    pub const BIND_ADDR: &str = "AIR_RISK_BIND_ADDR";

    // 制品
    pub const MODEL_PATH: &str = "AIR_RISK_MODEL_PATH";
    pub const MODEL_INFO_PATH: &str = "AIR_RISK_MODEL_INFO_PATH";
    pub const DASHBOARD_PATH: &str = "AIR_RISK_DASHBOARD_PATH";

    // 行为
    pub const LOCALE: &str = "AIR_RISK_LOCALE";
    pub const FALLBACK_ON_INFERENCE_ERROR: &str = "AIR_RISK_FALLBACK_ON_INFERENCE_ERROR";
    pub const DEFAULT_LOCATION: &str = "AIR_RISK_DEFAULT_LOCATION";
}

// ==========================================
// 默认值
// ==========================================
pub mod config_defaults {
    pub const BIND_ADDR: &str = "0.0.0.0:5000";
    pub const MODEL_PATH: &str = "air_pollution_model.json";
    pub const MODEL_INFO_PATH: &str = "model_info.json";
    pub const DASHBOARD_PATH: &str = "dashboard_data.json";
    pub const FALLBACK_ON_INFERENCE_ERROR: bool = false;
    pub const DEFAULT_LOCATION: &str = "Metro Manila";
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub model_info_path: PathBuf,
    pub dashboard_path: PathBuf,
    pub locale: String,
    /// 推理失败时是否按请求降级到规则分类（默认关闭，失败即返回 400）
    pub fallback_on_inference_error: bool,
    pub default_location: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            model_path: PathBuf::from(config_defaults::MODEL_PATH),
            model_info_path: PathBuf::from(config_defaults::MODEL_INFO_PATH),
            dashboard_path: PathBuf::from(config_defaults::DASHBOARD_PATH),
            locale: DEFAULT_LOCALE.to_string(),
            fallback_on_inference_error: config_defaults::FALLBACK_ON_INFERENCE_ERROR,
            default_location: config_defaults::DEFAULT_LOCATION.to_string(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5000))
}

impl AppConfig {
    /// 从进程环境变量加载
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源加载
    ///
    /// # 参数
    /// - lookup: 配置键 -> 配置值
    ///
    /// # 说明
    /// 空字符串视为未配置；无法解析的值记录告警后取默认值
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let bind_addr = match get(config_keys::BIND_ADDR) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!(
                    "配置 {} 无法解析 ({}): {}，使用默认值 {}",
                    config_keys::BIND_ADDR,
                    raw,
                    e,
                    config_defaults::BIND_ADDR
                );
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let fallback_on_inference_error = match get(config_keys::FALLBACK_ON_INFERENCE_ERROR) {
            Some(raw) => parse_bool(&raw).unwrap_or_else(|| {
                tracing::warn!(
                    "配置 {} 无法解析 ({})，使用默认值 {}",
                    config_keys::FALLBACK_ON_INFERENCE_ERROR,
                    raw,
                    defaults.fallback_on_inference_error
                );
                defaults.fallback_on_inference_error
            }),
            None => defaults.fallback_on_inference_error,
        };

        Self {
            bind_addr,
            model_path: get(config_keys::MODEL_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            model_info_path: get(config_keys::MODEL_INFO_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.model_info_path),
            dashboard_path: get(config_keys::DASHBOARD_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.dashboard_path),
            locale: get(config_keys::LOCALE).unwrap_or(defaults.locale),
            fallback_on_inference_error,
            default_location: get(config_keys::DEFAULT_LOCATION)
                .unwrap_or(defaults.default_location),
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
