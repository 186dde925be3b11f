// ==========================================
// 空气污染风险评估 - 应用状态
// ==========================================
// 职责: 启动时一次性构建所有 API 实例
// 规则:
// - 每个制品独立加载，失败只记录告警并替换为默认值
// - 分类器变体在此选定，运行期间不再切换
// - 构建完成后只读，通过 Arc 共享，无锁
// ==========================================

use std::sync::Arc;

use crate::api::{DashboardApi, PredictionApi};
use crate::config::AppConfig;
use crate::domain::classifier_bundle::{ClassifierBundle, ModelMetadata};
use crate::domain::dashboard::{DashboardData, ModelInfoDescriptor};
use crate::engine::classifier::{
    FallbackClassifier, ModelBackedClassifier, RiskClassifier, RuleBasedClassifier,
};
use crate::i18n::t_with_args;
use crate::repository::{ArtifactRepository, RepositoryError};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在 axum 路由中作为 State 共享
#[derive(Clone)]
pub struct AppState {
    /// 应用配置
    pub config: Arc<AppConfig>,

    /// 运行时模型元数据
    pub metadata: Arc<ModelMetadata>,

    /// 预测API
    pub prediction_api: Arc<PredictionApi>,

    /// 驾驶舱API
    pub dashboard_api: Arc<DashboardApi>,
}

impl AppState {
    /// 按配置加载制品并构建AppState
    ///
    /// # 说明
    /// 该方法不会失败：
    /// 1. 分类器制品缺失/损坏 -> 规则分类模式
    /// 2. 模型描述缺失/损坏 -> 合成描述
    /// 3. 驾驶舱数据缺失/损坏 -> 合成数据
    pub fn load(config: AppConfig) -> Self {
        let repo = ArtifactRepository::new(
            config.model_path.clone(),
            config.model_info_path.clone(),
            config.dashboard_path.clone(),
        );

        tracing::info!("正在加载分类器制品: {}", repo.model_path().display());
        let bundle = match repo.load_bundle() {
            Ok(bundle) => {
                tracing::info!(
                    model_type = bundle.model.type_name(),
                    accuracy = bundle.accuracy,
                    features = ?bundle.features,
                    classes = ?bundle.label_encoder.classes,
                    "分类器制品加载成功"
                );
                Some(bundle)
            }
            Err(e) => {
                warn_artifact(&e);
                tracing::warn!("使用规则分类模式");
                None
            }
        };
        let metadata = ModelMetadata::from_bundle(bundle.as_ref());

        let model_info = repo.load_model_info().unwrap_or_else(|e| {
            warn_artifact(&e);
            ModelInfoDescriptor::synthesized(metadata.loaded, metadata.accuracy)
        });

        let dashboard = repo.load_dashboard().unwrap_or_else(|e| {
            warn_artifact(&e);
            DashboardData::synthesized(metadata.accuracy)
        });

        Self::from_parts(config, bundle, model_info, dashboard)
    }

    /// 由已加载的部件构建AppState
    ///
    /// # 参数
    /// - config: 应用配置
    /// - bundle: 分类器制品（None 表示规则分类模式）
    /// - model_info: 模型描述
    /// - dashboard: 驾驶舱数据
    pub fn from_parts(
        config: AppConfig,
        bundle: Option<ClassifierBundle>,
        model_info: ModelInfoDescriptor,
        dashboard: DashboardData,
    ) -> Self {
        let metadata = Arc::new(ModelMetadata::from_bundle(bundle.as_ref()));

        let classifier: Arc<dyn RiskClassifier> = match bundle {
            Some(bundle) => {
                let model = ModelBackedClassifier::new(bundle);
                if config.fallback_on_inference_error {
                    tracing::info!("推理失败时按请求降级到规则分类");
                    Arc::new(FallbackClassifier::new(model))
                } else {
                    Arc::new(model)
                }
            }
            None => Arc::new(RuleBasedClassifier::new()),
        };

        let prediction_api = Arc::new(PredictionApi::new(
            classifier,
            metadata.clone(),
            config.default_location.clone(),
        ));
        let dashboard_api = Arc::new(DashboardApi::new(metadata.clone(), model_info, dashboard));

        tracing::info!(
            model_loaded = metadata.loaded,
            model_type = %metadata.model_type,
            "AppState初始化成功"
        );

        Self {
            config: Arc::new(config),
            metadata,
            prediction_api,
            dashboard_api,
        }
    }
}

fn warn_artifact(err: &RepositoryError) {
    match err {
        RepositoryError::NotFound { path } => {
            let path = path.display().to_string();
            tracing::warn!("{}", t_with_args("startup.artifact_missing", &[("path", &path)]));
        }
        other => tracing::warn!("{}", other),
    }
}
