// ==========================================
// 空气污染风险评估 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::path::PathBuf;
use thiserror::Error;

/// 仓储层错误类型（制品读取）
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("制品文件不存在: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("制品读取失败 ({}): {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("制品解析失败 ({}): {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("分类器制品无效 ({}): {reason}", path.display())]
    InvalidBundle { path: PathBuf, reason: String },
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
