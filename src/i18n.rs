// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认，对外兼容文案）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

/// 已提供文案的语言
pub const AVAILABLE_LOCALES: [&str; 2] = ["en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
///
/// # 返回
/// - false: 未提供该语言文案，保持当前语言不变
pub fn set_locale(locale: &str) -> bool {
    if !AVAILABLE_LOCALES.contains(&locale) {
        tracing::warn!("不支持的语言: {}，保持 {}", locale, current_locale());
        return false;
    }
    rust_i18n::set_locale(locale);
    true
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use air_risk_api::i18n::t;
/// let msg = t("recommendation.low.general_1");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use air_risk_api::i18n::t_with_args;
/// let msg = t_with_args("startup.artifact_missing", &[("path", "model_info.json")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // rust-i18n 的 locale 为全局状态，且 Rust 测试默认并行执行；
    // 为避免测试互相干扰，这里对 i18n 相关测试串行化。
    static LOCALE_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_set_locale() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        assert!(set_locale("zh-CN"));
        assert_eq!(current_locale(), "zh-CN");

        // 不支持的语言不生效
        assert!(!set_locale("fr"));
        assert_eq!(current_locale(), "zh-CN");

        set_locale(DEFAULT_LOCALE);
        assert_eq!(current_locale(), "en");
    }

    #[test]
    fn test_translate_simple() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        assert_eq!(t("api.prediction_failed"), "预测请求处理失败");
        assert_eq!(t("recommendation.high.general_1"), "空气质量不健康");

        set_locale("en");
        assert_eq!(
            t("recommendation.high.general_1"),
            "Air quality is unhealthy"
        );
        assert_eq!(
            t("api.prediction_failed"),
            "Error processing prediction request"
        );
    }

    #[test]
    fn test_translate_with_args() {
        let _guard = LOCALE_TEST_LOCK.lock().unwrap();
        set_locale("zh-CN");
        let msg = t_with_args("startup.artifact_missing", &[("path", "model_info.json")]);
        assert!(msg.contains("model_info.json"));
        assert!(msg.contains("内置默认值"));

        set_locale("en");
        let msg = t_with_args("startup.artifact_missing", &[("path", "model_info.json")]);
        assert!(msg.contains("model_info.json"));
        assert!(msg.contains("built-in defaults"));
    }
}
