#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Method, Request, StatusCode};
use axum::Router;
use bytes::Bytes;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use imageops_core::{HostedError, ImageHost, ImageMagick, TransformationSpec, UploadedAsset};
use imageops_processor::{build_router, AppState};

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// 送信内容を記録するだけのホスト
pub struct FakeHost {
    pub uploads: Mutex<Vec<(String, TransformationSpec)>>,
    pub fetches: Mutex<Vec<String>>,
    pub reject_upload: Option<(u16, String)>,
    pub fetch_fails: bool,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
            fetches: Mutex::new(Vec::new()),
            reject_upload: None,
            fetch_fails: false,
        }
    }
}

#[async_trait]
impl ImageHost for FakeHost {
    async fn upload(
        &self,
        data_uri: &str,
        spec: &TransformationSpec,
    ) -> Result<UploadedAsset, HostedError> {
        self.uploads
            .lock()
            .unwrap()
            .push((data_uri.to_string(), spec.clone()));

        if let Some((status, message)) = &self.reject_upload {
            return Err(HostedError::Rejected {
                status: *status,
                message: message.clone(),
            });
        }

        Ok(UploadedAsset {
            public_id: "retool-processed/fake123".to_string(),
            secure_url: "https://res.example.com/demo/image/upload/retool-processed/fake123.jpg"
                .to_string(),
            width: 800,
            height: 600,
            format: spec.format.clone(),
            bytes: 4096,
        })
    }

    fn delivery_url(&self, public_id: &str, spec: &TransformationSpec) -> String {
        format!(
            "https://res.example.com/{}/{}.{}",
            spec.to_delivery_path(),
            public_id,
            spec.format
        )
    }

    async fn fetch(&self, url: &str) -> Result<Bytes, HostedError> {
        self.fetches.lock().unwrap().push(url.to_string());
        if self.fetch_fails {
            return Err(HostedError::Transport("connection reset".to_string()));
        }
        Ok(Bytes::from_static(b"processed-bytes"))
    }
}

/// 入力ファイルを出力パスにコピーするだけの偽 magick スクリプト
///
/// 入力が `FAIL` で始まる場合は標準エラーに出力して終了コード 3 で終わる。
/// 同時実行の検証用に少し待ってからコピーする。
const FAKE_MAGICK: &str = r#"#!/bin/sh
input="$1"
for arg in "$@"; do output="$arg"; done
if head -c 4 "$input" | grep -q FAIL; then
  echo "magick: improper image header" >&2
  exit 3
fi
sleep 0.2
cp "$input" "$output"
"#;

/// テストバイナリ全体で 1 回だけ作る（書き込み直後の exec による ETXTBSY を避ける）
pub fn fake_magick() -> PathBuf {
    static SCRIPT: OnceLock<(TempDir, PathBuf)> = OnceLock::new();
    let (_, path) = SCRIPT.get_or_init(|| {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fake-magick");
        std::fs::write(&path, FAKE_MAGICK).unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        }
        (dir, path)
    });
    path.clone()
}

pub fn router_with(host: Arc<dyn ImageHost>, magick: ImageMagick) -> Router {
    build_router(AppState::new(host, magick), MAX_BODY_BYTES)
}

pub fn router_with_host(host: Arc<FakeHost>) -> Router {
    router_with(host, ImageMagick::new(fake_magick()))
}

pub fn default_router() -> Router {
    router_with_host(Arc::new(FakeHost::new()))
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

pub async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn assert_cors_headers(headers: &HeaderMap) {
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "*");
    assert_eq!(
        headers.get("access-control-allow-headers").unwrap(),
        "Content-Type"
    );
    assert_eq!(
        headers.get("access-control-allow-methods").unwrap(),
        "POST, OPTIONS"
    );
}
