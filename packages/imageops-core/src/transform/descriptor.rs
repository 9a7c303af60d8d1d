use serde::Serialize;

use crate::constants::{DEFAULT_CROP_MODE, DEFAULT_QUALITY, THUMBNAIL_SIZE};
use crate::transform::operation::Operation;

/// Cloudinary に渡す変換記述子
///
/// 操作ごとに決まったフィールドだけが埋まる。`format` と `quality` は常に含まれる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformationSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improve: Option<String>,
    pub format: String,
    pub quality: String,
}

impl TransformationSpec {
    /// 操作から変換記述子を組み立てる
    pub fn build(operation: &Operation, format: &str, quality: &str) -> Self {
        let base = Self {
            format: format.to_string(),
            quality: quality.to_string(),
            ..Self::default()
        };

        match operation {
            Operation::Resize {
                width,
                height,
                crop,
            } => Self {
                width: Some(*width),
                height: Some(*height),
                crop: Some(crop.clone()),
                ..base
            },
            Operation::Crop {
                width,
                height,
                x,
                y,
            } => Self {
                width: *width,
                height: *height,
                x: Some(*x),
                y: Some(*y),
                crop: Some("crop".to_string()),
                ..base
            },
            Operation::Rotate { angle } => Self {
                angle: Some(*angle),
                ..base
            },
            Operation::Filter(filter) => Self {
                effect: Some(filter.effect()),
                ..base
            },
            Operation::Watermark(watermark) => Self {
                overlay: Some(watermark.text.clone()),
                gravity: Some(watermark.gravity.clone()),
                opacity: Some(watermark.opacity),
                color: Some(watermark.color.clone()),
                ..base
            },
            Operation::BackgroundRemoval => Self {
                background: Some("remove".to_string()),
                ..base
            },
            Operation::AutoEnhance => Self {
                effect: Some("auto_color".to_string()),
                improve: Some("auto".to_string()),
                ..base
            },
            Operation::FormatConversion => base,
        }
    }

    /// サムネイル派生画像の変換記述子
    pub fn thumbnail(format: &str) -> Self {
        Self {
            width: Some(THUMBNAIL_SIZE),
            height: Some(THUMBNAIL_SIZE),
            crop: Some(DEFAULT_CROP_MODE.to_string()),
            format: format.to_string(),
            quality: DEFAULT_QUALITY.to_string(),
            ..Self::default()
        }
    }

    /// フォーマットだけを差し替えた複製
    pub fn with_format(&self, format: &str) -> Self {
        Self {
            format: format.to_string(),
            ..self.clone()
        }
    }

    /// アップロード時の `transformation` パラメータ
    pub fn to_transformation_string(&self) -> String {
        self.components(true).join("/")
    }

    /// 配信 URL のパス部分。フォーマットは拡張子で指定するため `f_` を含めない
    pub fn to_delivery_path(&self) -> String {
        self.components(false).join("/")
    }

    /// Cloudinary の変換コンポーネント列
    ///
    /// 1 つ目のコンポーネントはキー順に並べる。`e_` を重ねられない効果は
    /// 後続のコンポーネントとしてチェーンする。
    fn components(&self, include_format: bool) -> Vec<String> {
        let mut params: Vec<(&str, String)> = Vec::new();

        if let Some(width) = self.width {
            params.push(("w", width.to_string()));
        }
        if let Some(height) = self.height {
            params.push(("h", height.to_string()));
        }
        if let Some(crop) = &self.crop {
            params.push(("c", crop.clone()));
        }
        if let Some(x) = self.x {
            params.push(("x", x.to_string()));
        }
        if let Some(y) = self.y {
            params.push(("y", y.to_string()));
        }
        if let Some(angle) = self.angle {
            params.push(("a", angle.to_string()));
        }
        if let Some(effect) = &self.effect {
            params.push(("e", effect.clone()));
        }
        if let Some(overlay) = &self.overlay {
            params.push(("l", format!("text:Arial_40:{}", escape_overlay_text(overlay))));
        }
        if let Some(gravity) = &self.gravity {
            params.push(("g", gravity.clone()));
        }
        if let Some(opacity) = self.opacity {
            params.push(("o", opacity.to_string()));
        }
        if let Some(color) = &self.color {
            params.push(("co", color.clone()));
        }
        if include_format {
            params.push(("f", self.format.clone()));
        }
        params.push(("q", self.quality.clone()));

        params.sort_by(|a, b| a.0.cmp(b.0));

        let primary = params
            .iter()
            .map(|(key, value)| format!("{key}_{value}"))
            .collect::<Vec<_>>()
            .join(",");

        let mut components = vec![primary];
        if self.background.as_deref() == Some("remove") {
            components.push("e_background_removal".to_string());
        }
        if self.improve.is_some() {
            components.push("e_improve".to_string());
        }

        components
    }
}

/// テキストオーバーレイ用のエスケープ
///
/// Cloudinary ではカンマとスラッシュを二重エスケープする必要がある。
fn escape_overlay_text(text: &str) -> String {
    urlencoding::encode(text)
        .replace("%2C", "%252C")
        .replace("%2F", "%252F")
}
