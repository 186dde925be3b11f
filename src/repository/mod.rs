// ==========================================
// 空气污染风险评估 - 数据仓储层
// ==========================================
// 职责: 外部制品读取
// 红线: 不含业务规则
// ==========================================

pub mod artifact_repo;
pub mod error;

// 重导出
pub use artifact_repo::ArtifactRepository;
pub use error::{RepositoryError, RepositoryResult};
