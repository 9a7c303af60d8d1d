use std::net::SocketAddr;
use std::path::PathBuf;

use imageops_core::CloudinaryConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_MAX_BODY_BYTES: usize = 20 * 1024 * 1024;
const DEFAULT_MAGICK_BINARY: &str = "magick";

/// サービス設定
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub max_body_bytes: usize,
    pub magick_binary: PathBuf,
    pub cloudinary: CloudinaryConfig,
}

impl ServiceConfig {
    /// 環境変数から ServiceConfig を作成する。
    ///
    /// 任意の環境変数:
    /// - BIND_ADDR
    /// - MAX_BODY_BYTES
    /// - MAGICK_BINARY
    /// - CLOUDINARY_* （`CloudinaryConfig::from_env` を参照）
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| format!("BIND_ADDR is invalid: {e}"))?;

        let max_body_bytes = match lookup("MAX_BODY_BYTES") {
            Some(v) => v
                .parse()
                .map_err(|e| format!("MAX_BODY_BYTES is invalid: {e}"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        let magick_binary = lookup("MAGICK_BINARY")
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_MAGICK_BINARY.to_string())
            .into();

        Ok(Self {
            bind_addr,
            max_body_bytes,
            magick_binary,
            cloudinary: CloudinaryConfig::from_lookup(&lookup),
        })
    }
}
