use serde::Serialize;

use crate::cloudinary::{ImageHost, UploadedAsset};
use crate::transform::{OutputFormat, TransformationSpec};
use crate::validation::Params;

pub const FETCH_FALLBACK_WARNING: &str = "Could not return base64 data, URL provided instead";

/// Cloudinary ハンドラの成功レスポンス
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedResult {
    pub success: bool,
    pub original_url: String,
    pub public_id: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
    pub size: u64,
    pub variations: Variations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

impl HostedResult {
    pub fn new(asset: UploadedAsset, variations: Variations) -> Self {
        Self {
            success: true,
            original_url: asset.secure_url,
            public_id: asset.public_id,
            width: asset.width,
            height: asset.height,
            format: asset.format,
            size: asset.bytes,
            variations,
            image_data: None,
            warning: None,
        }
    }
}

/// 派生画像の URL
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Variations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webp: Option<String>,
}

impl Variations {
    /// `generateThumbnail` / `generateWebP` フラグに応じて派生 URL を作る
    pub fn build<H: ImageHost + ?Sized>(
        host: &H,
        public_id: &str,
        spec: &TransformationSpec,
        params: &Params,
    ) -> Self {
        let thumbnail = params
            .flag("generateThumbnail")
            .then(|| host.delivery_url(public_id, &TransformationSpec::thumbnail(&spec.format)));
        let webp = params
            .flag("generateWebP")
            .then(|| host.delivery_url(public_id, &spec.with_format("webp")));

        Self { thumbnail, webp }
    }
}

/// ImageMagick ハンドラの成功レスポンス
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalResult {
    pub success: bool,
    pub image_data: String,
    pub content_type: &'static str,
    pub format: &'static str,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl LocalResult {
    pub fn new(image_data: String, format: OutputFormat, size: usize) -> Self {
        Self {
            success: true,
            image_data,
            content_type: format.content_type(),
            format: format.extension(),
            size,
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(self, width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cloudinary::{CloudinaryClient, CloudinaryConfig};
    use serde_json::json;

    fn asset() -> UploadedAsset {
        UploadedAsset {
            public_id: "retool-processed/abc".to_string(),
            secure_url: "https://res.example.com/abc.jpg".to_string(),
            width: 800,
            height: 600,
            format: "jpg".to_string(),
            bytes: 1234,
        }
    }

    #[test]
    fn test_hosted_result_shape() {
        let result = HostedResult::new(asset(), Variations::default());
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "originalUrl": "https://res.example.com/abc.jpg",
                "publicId": "retool-processed/abc",
                "width": 800,
                "height": 600,
                "format": "jpg",
                "size": 1234,
                "variations": {}
            })
        );
    }

    #[test]
    fn test_variations_follow_flags() {
        let host = CloudinaryClient::new(CloudinaryConfig::new(
            "demo".into(),
            "key".into(),
            "secret".into(),
        ));
        let spec = TransformationSpec::thumbnail("jpg");

        let none = Variations::build(&host, "id", &spec, &Params::default());
        assert_eq!(none, Variations::default());

        let params = Params::from_value(Some(json!({
            "generateThumbnail": true,
            "generateWebP": true
        })))
        .unwrap();
        let both = Variations::build(&host, "id", &spec, &params);
        assert!(both.thumbnail.unwrap().ends_with("/id.jpg"));
        assert!(both.webp.unwrap().ends_with("/id.webp"));
    }

    #[test]
    fn test_hex_color_watermark_variation_url() {
        use crate::transform::{Operation, OperationKind};

        let host = CloudinaryClient::new(CloudinaryConfig::new(
            "demo".into(),
            "key".into(),
            "secret".into(),
        ));
        let params = Params::from_value(Some(json!({
            "color": "#ff0000",
            "generateWebP": true
        })))
        .unwrap();
        let op = Operation::parse("watermark", &params).unwrap();
        let spec = TransformationSpec::build(&op, "jpg", "auto");

        let variations = Variations::build(&host, "retool-processed/abc", &spec, &params);
        let webp = variations.webp.unwrap();
        assert!(!webp.contains('#'));
        assert!(webp.contains("co_rgb:ff0000"));
        assert!(webp.ends_with("/retool-processed/abc.webp"));
    }

    #[test]
    fn test_local_result_shape() {
        let result = LocalResult::new("AAAA".to_string(), OutputFormat::Png, 3).with_dimensions(10, 20);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "success": true,
                "imageData": "AAAA",
                "contentType": "image/png",
                "format": "png",
                "size": 3,
                "width": 10,
                "height": 20
            })
        );
    }
}
