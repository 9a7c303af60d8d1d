use std::ffi::OsString;
use std::path::Path;

use crate::transform::{OutputFormat, ToolOperation};
use crate::validation::params::format_number;

/// 背景除去のフィルタチェーン（白に近い画素を透過させてから拡大・シャープ化）
const REMOVE_BACKGROUND_CHAIN: &[&str] = &[
    "-background",
    "none",
    "-alpha",
    "set",
    "-channel",
    "A",
    "-evaluate",
    "set",
    "0",
    "+channel",
    "-fuzz",
    "10%",
    "-transparent",
    "white",
    "-filter",
    "Lanczos",
    "-resize",
    "400%",
    "-unsharp",
    "0x0.75+0.75+0.008",
];

/// 操作ごとの ImageMagick 引数
pub fn operation_args(operation: &ToolOperation) -> Vec<String> {
    match operation {
        ToolOperation::Resize { width, height } => {
            vec!["-resize".to_string(), format!("{width}x{height}")]
        }
        ToolOperation::Rotate { degrees } => vec!["-rotate".to_string(), degrees.to_string()],
        ToolOperation::Blur { radius } => vec!["-blur".to_string(), format_number(*radius)],
        ToolOperation::RemoveBackground => REMOVE_BACKGROUND_CHAIN
            .iter()
            .map(|arg| arg.to_string())
            .collect(),
    }
}

/// `magick <input> <操作引数...> <output>` の引数ベクタ
///
/// シェルを介さずに渡すため、パラメータがコマンドとして解釈されることはない。
pub fn build_args(input: &Path, operation: &ToolOperation, output: &Path) -> Vec<OsString> {
    let mut args = Vec::with_capacity(8);
    args.push(input.as_os_str().to_os_string());
    args.extend(operation_args(operation).into_iter().map(OsString::from));
    args.push(output.as_os_str().to_os_string());
    args
}

/// 実際に書き出すフォーマット
///
/// 背景除去は透過を保持する必要があるため、JPEG が要求された場合は WebP で出力する。
pub fn output_format(operation: &ToolOperation, requested: OutputFormat) -> OutputFormat {
    match operation {
        ToolOperation::RemoveBackground if !requested.supports_alpha() => OutputFormat::WebP,
        _ => requested,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_args() {
        assert_eq!(
            operation_args(&ToolOperation::Resize {
                width: 100,
                height: 50
            }),
            vec!["-resize", "100x50"]
        );
        assert_eq!(
            operation_args(&ToolOperation::Rotate { degrees: -90 }),
            vec!["-rotate", "-90"]
        );
        assert_eq!(
            operation_args(&ToolOperation::Blur { radius: 2.5 }),
            vec!["-blur", "2.5"]
        );
        assert_eq!(
            operation_args(&ToolOperation::Blur { radius: 3.0 }),
            vec!["-blur", "3"]
        );
        assert_eq!(
            operation_args(&ToolOperation::RemoveBackground).len(),
            REMOVE_BACKGROUND_CHAIN.len()
        );
    }

    #[test]
    fn test_build_args_wraps_input_and_output() {
        let args = build_args(
            Path::new("/tmp/x/input"),
            &ToolOperation::RemoveBackground,
            Path::new("/tmp/x/output.webp"),
        );
        assert_eq!(args.first().unwrap(), "/tmp/x/input");
        // 背景除去も他の操作と同じ出力パスに書き出す
        assert_eq!(args.last().unwrap(), "/tmp/x/output.webp");
        assert!(!args.iter().any(|a| a == "output.webp"));
    }

    #[test]
    fn test_output_format() {
        assert_eq!(
            output_format(&ToolOperation::RemoveBackground, OutputFormat::Jpeg),
            OutputFormat::WebP
        );
        assert_eq!(
            output_format(&ToolOperation::RemoveBackground, OutputFormat::Png),
            OutputFormat::Png
        );
        assert_eq!(
            output_format(&ToolOperation::Rotate { degrees: 0 }, OutputFormat::Jpeg),
            OutputFormat::Jpeg
        );
    }
}
