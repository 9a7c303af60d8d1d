use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use imageops_core::{HostedError, ImageOpsError, RequestError, ToolError};

const PROCESSING_FAILED: &str = "Image processing failed";

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// CORS プリフライト。ボディは空で 200 を返す
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    MethodNotAllowed,
    /// 外部サービス・外部ツールの失敗。上流のメッセージとコードをそのまま返す
    Upstream { details: String, code: ErrorCode },
}

/// エラーレスポンスの `code`。上流の HTTP ステータス、ツールの終了コード、または不明
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ErrorCode {
    Status(u16),
    Exit(i32),
    Unknown(&'static str),
}

impl ErrorCode {
    const UNKNOWN: ErrorCode = ErrorCode::Unknown("UNKNOWN");
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

impl From<ImageOpsError> for AppError {
    fn from(err: ImageOpsError) -> Self {
        match err {
            ImageOpsError::Request(request_err) => request_err.into(),
            ImageOpsError::Hosted(hosted_err) => hosted_err.into(),
            ImageOpsError::Tool(tool_err) => tool_err.into(),
        }
    }
}

impl From<RequestError> for AppError {
    fn from(err: RequestError) -> Self {
        tracing::warn!(error = %err, "invalid request");
        AppError::BadRequest(err.to_string())
    }
}

impl From<HostedError> for AppError {
    fn from(err: HostedError) -> Self {
        let code = err
            .status_code()
            .map(ErrorCode::Status)
            .unwrap_or(ErrorCode::UNKNOWN);

        match &err {
            HostedError::MissingCredentials(var) => {
                tracing::error!(missing = %var, "Cloudinary credentials are not configured");
            }
            _ => {
                tracing::error!(error = %err, code = ?code, "Cloudinary processing failed");
            }
        }

        AppError::Upstream {
            details: err.to_string(),
            code,
        }
    }
}

impl From<ToolError> for AppError {
    fn from(err: ToolError) -> Self {
        let code = match &err {
            ToolError::Failed {
                code: Some(exit), ..
            } => ErrorCode::Exit(*exit),
            _ => ErrorCode::UNKNOWN,
        };
        tracing::error!(error = %err, "ImageMagick processing failed");

        AppError::Upstream {
            details: err.to_string(),
            code,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    error: msg,
                    details: None,
                    code: None,
                },
            ),
            AppError::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                ErrorBody {
                    error: "Method Not Allowed".to_string(),
                    details: None,
                    code: None,
                },
            ),
            AppError::Upstream { details, code } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    error: PROCESSING_FAILED.to_string(),
                    details: Some(details),
                    code: Some(code),
                },
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
