// ==========================================
// 空气污染风险评估 - 配置层
// ==========================================
// 职责: 服务地址、制品路径、语言、降级开关
// 来源: 环境变量
// ==========================================

pub mod app_config;

// 重导出核心配置
pub use app_config::{config_defaults, config_keys, AppConfig};
