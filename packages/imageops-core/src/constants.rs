/// リサイズ時のデフォルト幅
pub const DEFAULT_WIDTH: u32 = 800;

/// リサイズ時のデフォルト高さ
pub const DEFAULT_HEIGHT: u32 = 600;

/// リサイズ時のデフォルトクロップモード
pub const DEFAULT_CROP_MODE: &str = "fill";

/// デフォルト出力フォーマット
pub const DEFAULT_FORMAT: &str = "jpg";

/// デフォルト品質（Cloudinary の自動品質）
pub const DEFAULT_QUALITY: &str = "auto";

/// ウォーターマークのデフォルト文字列
pub const DEFAULT_WATERMARK_TEXT: &str = "Sample Watermark";

/// ウォーターマークのデフォルト配置
pub const DEFAULT_WATERMARK_GRAVITY: &str = "south_east";

/// ウォーターマークのデフォルト不透明度（0-100）
pub const DEFAULT_WATERMARK_OPACITY: u8 = 60;

/// ウォーターマークのデフォルト色
pub const DEFAULT_WATERMARK_COLOR: &str = "white";

/// ImageMagick に渡す寸法の上限（幅・高さ）
pub const MAX_DIMENSION: u32 = 4096;

/// ImageMagick に渡すぼかし半径の上限
pub const MAX_BLUR_RADIUS: f64 = 100.0;

/// ぼかし半径のデフォルト
pub const DEFAULT_BLUR_RADIUS: f64 = 1.0;

/// サムネイル派生画像の一辺
pub const THUMBNAIL_SIZE: u32 = 150;

/// Cloudinary のアップロード先フォルダ
pub const DEFAULT_UPLOAD_FOLDER: &str = "retool-processed";

/// 生の base64 を data URI に変換する際のプレフィックス
pub const DEFAULT_DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";
