// ==========================================
// 空气污染风险评估 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换领域错误为统一的错误响应
// 响应: HTTP 400 + {success:false, error, message}
// ==========================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::domain::classifier_bundle::ModelError;
use crate::domain::reading::ReadingError;
use crate::i18n::t;

/// API层错误类型
/// 错误信息原样返回给调用方（error 字段）
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求校验错误
    // ==========================================
    #[error(transparent)]
    InvalidInput(#[from] ReadingError),

    #[error("invalid JSON body: {0}")]
    InvalidBody(String),

    // ==========================================
    // 推理错误（不重试）
    // ==========================================
    #[error(transparent)]
    Inference(#[from] ModelError),
}

impl ApiError {
    /// 错误分类（日志用）
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "invalid_input",
            ApiError::InvalidBody(_) => "invalid_body",
            ApiError::Inference(_) => "inference",
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 错误响应体
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            success: false,
            error: err.to_string(),
            message: t("api.prediction_failed"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(kind = self.kind(), "请求处理失败: {}", self);
        (StatusCode::BAD_REQUEST, Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_error_conversion() {
        let err: ApiError = ReadingError::NonNumeric {
            field: "pm25",
            value: "\"abc\"".to_string(),
        }
        .into();
        assert_eq!(err.kind(), "invalid_input");
        assert!(err.to_string().contains("pm25"));

        let body = ErrorBody::from(&err);
        assert!(!body.success);
        assert_eq!(body.error, err.to_string());
    }

    #[test]
    fn test_model_error_conversion() {
        let err: ApiError = ModelError::FeatureCountMismatch {
            expected: 8,
            actual: 3,
        }
        .into();
        assert_eq!(err.kind(), "inference");
        assert!(err.to_string().contains("expecting 8 features"));
    }

    #[test]
    fn test_into_response_is_bad_request() {
        let response = ApiError::InvalidBody("EOF".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
