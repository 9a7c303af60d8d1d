use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// 処理結果の寸法とフォーマット
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub format: Option<ImageFormat>,
}

/// ヘッダだけを読んで寸法を取得する（全体はデコードしない）
///
/// 読めないフォーマットの場合は None。呼び出し側は寸法なしで応答する。
pub fn inspect(bytes: &[u8]) -> Option<ImageInfo> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .ok()?;
    let format = reader.format();
    let (width, height) = reader.into_dimensions().ok()?;

    Some(ImageInfo {
        width,
        height,
        format,
    })
}
