pub mod client;
pub mod config;
pub mod signature;

use async_trait::async_trait;
use bytes::Bytes;
use serde::Deserialize;

pub use client::CloudinaryClient;
pub use config::CloudinaryConfig;
pub use signature::sign_params;

use crate::errors::HostedError;
use crate::transform::TransformationSpec;

/// アップロード済みアセット（Cloudinary のアップロード API 応答）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadedAsset {
    pub public_id: String,
    pub secure_url: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub bytes: u64,
}

/// 画像変換を委譲するホスト型サービス
///
/// ハンドラはこのトレイト越しにしか外部サービスに触れない。
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// 画像と変換記述子を送信し、変換済みアセットを保存させる
    async fn upload(
        &self,
        data_uri: &str,
        spec: &TransformationSpec,
    ) -> Result<UploadedAsset, HostedError>;

    /// 保存済みアセットの派生画像 URL を組み立てる（通信しない）
    fn delivery_url(&self, public_id: &str, spec: &TransformationSpec) -> String;

    /// 変換済み画像のバイト列を取得する
    async fn fetch(&self, url: &str) -> Result<Bytes, HostedError>;
}
