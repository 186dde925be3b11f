// ==========================================
// 空气污染风险评估 - 制品仓储
// ==========================================
// 职责: 启动时读取外部制品 (分类器 / 模型描述 / 驾驶舱数据)
// 红线: 只读，不做缺省替换（由应用层决定降级策略）
// ==========================================

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::classifier_bundle::ClassifierBundle;
use crate::domain::dashboard::{DashboardData, ModelInfoDescriptor};
use crate::repository::error::{RepositoryError, RepositoryResult};

// ==========================================
// ArtifactRepository - 制品仓储
// ==========================================
#[derive(Debug, Clone)]
pub struct ArtifactRepository {
    model_path: PathBuf,
    model_info_path: PathBuf,
    dashboard_path: PathBuf,
}

impl ArtifactRepository {
    /// 创建新的 ArtifactRepository 实例
    ///
    /// # 参数
    /// - model_path: 分类器制品路径
    /// - model_info_path: 模型描述 JSON 路径
    /// - dashboard_path: 驾驶舱数据 JSON 路径
    pub fn new(
        model_path: impl Into<PathBuf>,
        model_info_path: impl Into<PathBuf>,
        dashboard_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            model_path: model_path.into(),
            model_info_path: model_info_path.into(),
            dashboard_path: dashboard_path.into(),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// 读取并校验分类器制品
    ///
    /// # 返回
    /// - Ok(ClassifierBundle): 结构校验通过的制品
    /// - Err(RepositoryError): 文件缺失 / 解析失败 / 结构无效
    pub fn load_bundle(&self) -> RepositoryResult<ClassifierBundle> {
        let bundle: ClassifierBundle = read_json(&self.model_path)?;
        bundle
            .validate()
            .map_err(|reason| RepositoryError::InvalidBundle {
                path: self.model_path.clone(),
                reason,
            })?;
        Ok(bundle)
    }

    /// 读取模型描述
    pub fn load_model_info(&self) -> RepositoryResult<ModelInfoDescriptor> {
        read_json(&self.model_info_path)
    }

    /// 读取驾驶舱聚合数据
    pub fn load_dashboard(&self) -> RepositoryResult<DashboardData> {
        read_json(&self.dashboard_path)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> RepositoryResult<T> {
    if !path.exists() {
        return Err(RepositoryError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let raw = fs::read_to_string(path).map_err(|source| RepositoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| RepositoryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
