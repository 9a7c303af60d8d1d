use thiserror::Error;

/// 画像処理の統合エラー型
#[derive(Debug, Error)]
pub enum ImageOpsError {
    #[error("request error: {0}")]
    Request(#[from] RequestError),

    #[error("hosted service error: {0}")]
    Hosted(#[from] HostedError),

    #[error("image tool error: {0}")]
    Tool(#[from] ToolError),
}

/// リクエスト検証エラー（クライアント起因、400 相当）
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Invalid JSON body")]
    InvalidBody,

    #[error("Missing required fields: imageData and operation")]
    MissingFields,

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("invalid parameter {name}: {reason}")]
    InvalidParam { name: String, reason: String },

    #[error("invalid image data: {0}")]
    InvalidImageData(String),
}

impl RequestError {
    pub(crate) fn invalid_param(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParam {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Cloudinary 呼び出しエラー
#[derive(Debug, Error)]
pub enum HostedError {
    #[error("Cloudinary credentials are not configured (missing {0})")]
    MissingCredentials(&'static str),

    /// Cloudinary が返したエラー。メッセージと HTTP ステータスをそのまま保持する
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected response: {0}")]
    InvalidResponse(String),
}

impl HostedError {
    /// レスポンスの `code` に載せる上流の HTTP ステータス
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HostedError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// ImageMagick 実行エラー
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to prepare working directory: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to launch {binary}: {reason}")]
    Spawn { binary: String, reason: String },

    #[error("{binary} exited with status {code:?}: {stderr}")]
    Failed {
        binary: String,
        code: Option<i32>,
        stderr: String,
    },
}
