use serde::Deserialize;
use serde_json::Value;

use crate::constants::{DEFAULT_FORMAT, DEFAULT_QUALITY};
use crate::errors::RequestError;
use crate::transform::OperationKind;
use crate::validation::params::{is_falsy, validate_token, Params};

/// 検証済みの処理リクエスト
///
/// `O` はハンドラが受け付ける操作の集合（Cloudinary / ImageMagick）。
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessingRequest<O> {
    pub image_data: String,
    pub operation: O,
    pub params: Params,
    pub return_url: bool,
    pub format: String,
    pub quality: String,
}

/// 受信した JSON ボディ。型の検証はこの後で行う
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRequest {
    image_data: Option<Value>,
    operation: Option<Value>,
    params: Option<Value>,
    return_url: Option<Value>,
    format: Option<Value>,
    quality: Option<Value>,
}

impl<O: OperationKind> ProcessingRequest<O> {
    /// リクエストボディのバイト列から作成する
    pub fn from_slice(body: &[u8]) -> Result<Self, RequestError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| RequestError::InvalidBody)?;
        if !value.is_object() {
            return Err(RequestError::InvalidBody);
        }
        let raw = RawRequest::deserialize(value).map_err(|_| RequestError::InvalidBody)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawRequest) -> Result<Self, RequestError> {
        // 必須フィールド
        let (Some(image_data), Some(operation)) = (
            raw.image_data.filter(is_present),
            raw.operation.filter(is_present),
        ) else {
            return Err(RequestError::MissingFields);
        };

        let image_data = match image_data {
            Value::String(s) => s,
            _ => {
                return Err(RequestError::InvalidImageData(
                    "imageData must be a string".to_string(),
                ));
            }
        };

        let operation_name = match operation {
            Value::String(s) => s,
            other => return Err(RequestError::UnsupportedOperation(other.to_string())),
        };

        let params = Params::from_value(raw.params)?;
        let operation = O::parse(&operation_name, &params)?;

        let format = match raw.format.filter(is_present) {
            Some(Value::String(s)) => s,
            None => DEFAULT_FORMAT.to_string(),
            Some(_) => return Err(RequestError::invalid_param("format", "must be a string")),
        };
        if !format.chars().all(|c| c.is_ascii_alphanumeric()) || format.len() > 16 {
            return Err(RequestError::invalid_param("format", "must be alphanumeric"));
        }

        let quality = match raw.quality.filter(is_present) {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            None => DEFAULT_QUALITY.to_string(),
            Some(_) => {
                return Err(RequestError::invalid_param(
                    "quality",
                    "must be a string or number",
                ));
            }
        };
        validate_token("quality", &quality)?;

        // `params` と同じ規則で、偽とみなす値以外はすべて真
        let return_url = raw.return_url.as_ref().is_some_and(|v| !is_falsy(v));

        Ok(Self {
            image_data,
            operation,
            params,
            return_url,
            format,
            quality,
        })
    }
}

fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
