// ==========================================
// 空气污染风险评估服务 - 主入口
// ==========================================
// 启动顺序: 日志 -> 配置 -> 语言 -> 制品加载 -> HTTP 服务
// ==========================================

use tokio::signal;

use air_risk_api::app::{router, AppState};
use air_risk_api::config::AppConfig;
use air_risk_api::{i18n, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", air_risk_api::APP_NAME);
    tracing::info!("系统版本: {}", air_risk_api::VERSION);
    tracing::info!("==================================================");

    let config = AppConfig::from_env();
    i18n::set_locale(&config.locale);
    tracing::info!(locale = %i18n::current_locale(), "语言设置完成");

    let bind_addr = config.bind_addr;
    let state = AppState::load(config);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("监听 http://{}", listener.local_addr()?);

    let serve = axum::serve(listener, app);
    tokio::select! {
        r = serve => { r?; },
        _ = signal::ctrl_c() => { tracing::info!("收到退出信号"); }
    }

    tracing::info!("服务已退出");
    Ok(())
}
