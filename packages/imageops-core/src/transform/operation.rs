use crate::constants::{
    DEFAULT_BLUR_RADIUS, DEFAULT_CROP_MODE, DEFAULT_HEIGHT, DEFAULT_WATERMARK_COLOR,
    DEFAULT_WATERMARK_GRAVITY, DEFAULT_WATERMARK_OPACITY, DEFAULT_WATERMARK_TEXT, DEFAULT_WIDTH,
    MAX_BLUR_RADIUS, MAX_DIMENSION,
};
use crate::errors::RequestError;
use crate::validation::Params;

/// 各ハンドラが受け付ける操作の集合
///
/// 操作名と `params` から、その操作が受け付けるパラメータだけを持つ値を作る。
pub trait OperationKind: Sized {
    fn parse(name: &str, params: &Params) -> Result<Self, RequestError>;

    /// ログ出力用の操作名
    fn name(&self) -> &'static str;
}

/// Cloudinary ハンドラの操作
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Resize {
        width: u32,
        height: u32,
        crop: String,
    },
    Crop {
        width: Option<u32>,
        height: Option<u32>,
        x: i64,
        y: i64,
    },
    Rotate {
        angle: i64,
    },
    Filter(FilterOptions),
    Watermark(WatermarkOptions),
    BackgroundRemoval,
    AutoEnhance,
    FormatConversion,
}

/// フィルタ効果の指定
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub grayscale: bool,
    pub sepia: bool,
    pub blur: Option<i64>,
    pub brightness: Option<i64>,
    pub contrast: Option<i64>,
}

impl FilterOptions {
    /// カンマ区切りの効果リスト
    ///
    /// 順序は grayscale, sepia, blur, brightness, contrast で固定。
    /// 何も指定されていなければ `grayscale`。
    pub fn effect(&self) -> String {
        let mut effects = Vec::new();
        if self.grayscale {
            effects.push("grayscale".to_string());
        }
        if self.sepia {
            effects.push("sepia".to_string());
        }
        if let Some(blur) = self.blur {
            effects.push(format!("blur:{blur}"));
        }
        if let Some(brightness) = self.brightness {
            effects.push(format!("brightness:{brightness}"));
        }
        if let Some(contrast) = self.contrast {
            effects.push(format!("contrast:{contrast}"));
        }

        if effects.is_empty() {
            "grayscale".to_string()
        } else {
            effects.join(",")
        }
    }
}

/// テキストウォーターマークの指定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkOptions {
    pub text: String,
    pub gravity: String,
    pub opacity: u8,
    pub color: String,
}

impl OperationKind for Operation {
    fn parse(name: &str, params: &Params) -> Result<Self, RequestError> {
        let operation = match name {
            "resize" => Operation::Resize {
                width: params.dimension("width")?.unwrap_or(DEFAULT_WIDTH),
                height: params.dimension("height")?.unwrap_or(DEFAULT_HEIGHT),
                crop: params
                    .token("crop")?
                    .unwrap_or_else(|| DEFAULT_CROP_MODE.to_string()),
            },
            "crop" => Operation::Crop {
                width: params.dimension("width")?,
                height: params.dimension("height")?,
                x: params.integer("x")?.unwrap_or(0),
                y: params.integer("y")?.unwrap_or(0),
            },
            "rotate" => Operation::Rotate {
                angle: params.integer("degrees")?.unwrap_or(0),
            },
            "filter" => Operation::Filter(FilterOptions {
                grayscale: params.flag("grayscale"),
                sepia: params.flag("sepia"),
                blur: params.integer("blur")?,
                brightness: params.integer("brightness")?,
                contrast: params.integer("contrast")?,
            }),
            "watermark" => Operation::Watermark(WatermarkOptions {
                text: params
                    .text("watermarkText")?
                    .unwrap_or_else(|| DEFAULT_WATERMARK_TEXT.to_string()),
                gravity: params
                    .token("position")?
                    .unwrap_or_else(|| DEFAULT_WATERMARK_GRAVITY.to_string()),
                opacity: params
                    .integer("opacity")?
                    .map(|o| o.clamp(0, 100) as u8)
                    .unwrap_or(DEFAULT_WATERMARK_OPACITY),
                color: params
                    .color("color")?
                    .unwrap_or_else(|| DEFAULT_WATERMARK_COLOR.to_string()),
            }),
            "background_removal" => Operation::BackgroundRemoval,
            "auto_enhance" => Operation::AutoEnhance,
            "format_conversion" => Operation::FormatConversion,
            other => return Err(RequestError::UnsupportedOperation(other.to_string())),
        };

        Ok(operation)
    }

    fn name(&self) -> &'static str {
        match self {
            Operation::Resize { .. } => "resize",
            Operation::Crop { .. } => "crop",
            Operation::Rotate { .. } => "rotate",
            Operation::Filter(_) => "filter",
            Operation::Watermark(_) => "watermark",
            Operation::BackgroundRemoval => "background_removal",
            Operation::AutoEnhance => "auto_enhance",
            Operation::FormatConversion => "format_conversion",
        }
    }
}

/// ImageMagick ハンドラの操作
///
/// 数値パラメータはコマンドに渡す前に安全な範囲へ丸める。
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOperation {
    Resize { width: u32, height: u32 },
    Rotate { degrees: i64 },
    Blur { radius: f64 },
    RemoveBackground,
}

impl OperationKind for ToolOperation {
    fn parse(name: &str, params: &Params) -> Result<Self, RequestError> {
        let operation = match name {
            "resize" => ToolOperation::Resize {
                width: params
                    .dimension("width")?
                    .unwrap_or(DEFAULT_WIDTH)
                    .min(MAX_DIMENSION),
                height: params
                    .dimension("height")?
                    .unwrap_or(DEFAULT_HEIGHT)
                    .min(MAX_DIMENSION),
            },
            "rotate" => ToolOperation::Rotate {
                degrees: params.integer("degrees")?.unwrap_or(0) % 360,
            },
            "blur" => ToolOperation::Blur {
                radius: params
                    .number("radius")?
                    .unwrap_or(DEFAULT_BLUR_RADIUS)
                    .clamp(0.0, MAX_BLUR_RADIUS),
            },
            "remove-background" => ToolOperation::RemoveBackground,
            other => return Err(RequestError::UnsupportedOperation(other.to_string())),
        };

        Ok(operation)
    }

    fn name(&self) -> &'static str {
        match self {
            ToolOperation::Resize { .. } => "resize",
            ToolOperation::Rotate { .. } => "rotate",
            ToolOperation::Blur { .. } => "blur",
            ToolOperation::RemoveBackground => "remove-background",
        }
    }
}
