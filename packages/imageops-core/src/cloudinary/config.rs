use std::fmt;

use crate::constants::DEFAULT_UPLOAD_FOLDER;

pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com/v1_1";
pub const DEFAULT_DELIVERY_BASE: &str = "https://res.cloudinary.com";

/// Cloudinary の接続設定
///
/// 認証情報はクライアント生成時に注入する。欠けていてもクライアントは作れるが、
/// アップロードのたびに `HostedError::MissingCredentials` で失敗する。
#[derive(Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: Option<String>,
    pub api_key: Option<String>,
    pub api_secret: Option<String>,
    pub upload_folder: String,
    pub api_base: String,
    pub delivery_base: String,
}

impl CloudinaryConfig {
    pub fn new(cloud_name: String, api_key: String, api_secret: String) -> Self {
        Self {
            cloud_name: Some(cloud_name),
            api_key: Some(api_key),
            api_secret: Some(api_secret),
            ..Self::default()
        }
    }

    /// 環境変数から CloudinaryConfig を作成する
    ///
    /// 認証情報:
    /// - CLOUDINARY_CLOUD_NAME
    /// - CLOUDINARY_API_KEY
    /// - CLOUDINARY_API_SECRET
    ///
    /// 任意:
    /// - CLOUDINARY_UPLOAD_FOLDER
    /// - CLOUDINARY_API_BASE
    /// - CLOUDINARY_DELIVERY_BASE
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の変数ソースから作成する。空文字列は未設定として扱う
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Self {
            cloud_name: var("CLOUDINARY_CLOUD_NAME"),
            api_key: var("CLOUDINARY_API_KEY"),
            api_secret: var("CLOUDINARY_API_SECRET"),
            upload_folder: var("CLOUDINARY_UPLOAD_FOLDER").unwrap_or(defaults.upload_folder),
            api_base: var("CLOUDINARY_API_BASE").unwrap_or(defaults.api_base),
            delivery_base: var("CLOUDINARY_DELIVERY_BASE").unwrap_or(defaults.delivery_base),
        }
    }

    /// 最初に見つかった欠落認証情報の環境変数名
    pub fn missing_credential(&self) -> Option<&'static str> {
        if self.cloud_name.is_none() {
            Some("CLOUDINARY_CLOUD_NAME")
        } else if self.api_key.is_none() {
            Some("CLOUDINARY_API_KEY")
        } else if self.api_secret.is_none() {
            Some("CLOUDINARY_API_SECRET")
        } else {
            None
        }
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            upload_folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            delivery_base: DEFAULT_DELIVERY_BASE.to_string(),
        }
    }
}

// API シークレットをログに出さない
impl fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("upload_folder", &self.upload_folder)
            .field("api_base", &self.api_base)
            .field("delivery_base", &self.delivery_base)
            .finish()
    }
}
