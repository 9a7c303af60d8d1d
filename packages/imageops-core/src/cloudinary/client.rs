use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Deserialize;
use std::time::{SystemTime, UNIX_EPOCH};

use super::config::CloudinaryConfig;
use super::signature::sign_params;
use super::{ImageHost, UploadedAsset};
use crate::errors::HostedError;
use crate::transform::TransformationSpec;

/// Cloudinary アップロード API クライアント
#[derive(Clone)]
pub struct CloudinaryClient {
    client: Client,
    config: CloudinaryConfig,
}

/// 認証情報がそろっているときだけ作られる
struct Credentials<'a> {
    cloud_name: &'a str,
    api_key: &'a str,
    api_secret: &'a str,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

impl CloudinaryClient {
    /// 新しい CloudinaryClient を作成する
    pub fn new(config: CloudinaryConfig) -> Self {
        Self {
            client: Client::new(),
            config: CloudinaryConfig {
                api_base: config.api_base.trim_end_matches('/').to_string(),
                delivery_base: config.delivery_base.trim_end_matches('/').to_string(),
                ..config
            },
        }
    }

    fn credentials(&self) -> Result<Credentials<'_>, HostedError> {
        if let Some(missing) = self.config.missing_credential() {
            return Err(HostedError::MissingCredentials(missing));
        }

        match (
            self.config.cloud_name.as_deref(),
            self.config.api_key.as_deref(),
            self.config.api_secret.as_deref(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Ok(Credentials {
                cloud_name,
                api_key,
                api_secret,
            }),
            _ => Err(HostedError::MissingCredentials("CLOUDINARY_CLOUD_NAME")),
        }
    }

    fn upload_url(&self, cloud_name: &str) -> String {
        format!("{}/{}/image/upload", self.config.api_base, cloud_name)
    }
}

#[async_trait]
impl ImageHost for CloudinaryClient {
    async fn upload(
        &self,
        data_uri: &str,
        spec: &TransformationSpec,
    ) -> Result<UploadedAsset, HostedError> {
        let credentials = self.credentials()?;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string();
        let transformation = spec.to_transformation_string();

        let signed: [(&str, &str); 5] = [
            ("folder", self.config.upload_folder.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", transformation.as_str()),
            ("unique_filename", "true"),
            ("use_filename", "false"),
        ];
        let signature = sign_params(&signed, credentials.api_secret);

        let mut form: Vec<(&str, &str)> = signed.to_vec();
        form.push(("file", data_uri));
        form.push(("api_key", credentials.api_key));
        form.push(("signature", signature.as_str()));

        tracing::debug!(
            cloud_name = %credentials.cloud_name,
            folder = %self.config.upload_folder,
            transformation = %transformation,
            "uploading image to Cloudinary"
        );

        let response = self
            .client
            .post(self.upload_url(credentials.cloud_name))
            .form(&form)
            .send()
            .await
            .map_err(|e| HostedError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HostedError::Transport(e.to_string()))?;

        if !status.is_success() {
            // エラー本文は {"error":{"message":...}} 形式。読めなければ本文をそのまま返す
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            tracing::error!(status = %status, error = %message, "Cloudinary rejected upload");
            return Err(HostedError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<UploadedAsset>(&body)
            .map_err(|e| HostedError::InvalidResponse(e.to_string()))
    }

    fn delivery_url(&self, public_id: &str, spec: &TransformationSpec) -> String {
        let cloud_name = self.config.cloud_name.as_deref().unwrap_or_default();
        format!(
            "{}/{}/image/upload/{}/{}.{}",
            self.config.delivery_base,
            cloud_name,
            spec.to_delivery_path(),
            public_id,
            spec.format
        )
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, HostedError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| HostedError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HostedError::Rejected {
                status: status.as_u16(),
                message: format!("unexpected status fetching processed image: {status}"),
            });
        }

        response
            .bytes()
            .await
            .map_err(|e| HostedError::Transport(e.to_string()))
    }
}
