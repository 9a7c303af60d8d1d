use std::path::PathBuf;
use tokio::process::Command;

use super::command::{build_args, output_format};
use crate::errors::ToolError;
use crate::transform::{OutputFormat, ToolOperation};

/// ImageMagick 実行結果
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
}

/// ImageMagick のコマンドラインツールを呼び出すランナー
#[derive(Debug, Clone)]
pub struct ImageMagick {
    binary: PathBuf,
}

impl ImageMagick {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// 画像バイト列に操作を適用する
    ///
    /// 入出力ファイルは呼び出しごとに作る一時ディレクトリに置く。
    /// ディレクトリは成功・失敗にかかわらず関数を抜けるときに削除される。
    pub async fn process(
        &self,
        input: &[u8],
        operation: &ToolOperation,
        requested: OutputFormat,
    ) -> Result<ToolOutput, ToolError> {
        let workdir = tempfile::Builder::new().prefix("imageops-").tempdir()?;

        let format = output_format(operation, requested);
        let input_path = workdir.path().join("input");
        let output_path = workdir.path().join(format!("output.{}", format.extension()));

        tokio::fs::write(&input_path, input).await?;

        let args = build_args(&input_path, operation, &output_path);
        tracing::debug!(
            binary = %self.binary.display(),
            args = ?args,
            "running ImageMagick"
        );

        let output = Command::new(&self.binary)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ToolError::Spawn {
                binary: self.binary.display().to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                binary: self.binary.display().to_string(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let bytes = tokio::fs::read(&output_path).await?;

        Ok(ToolOutput { bytes, format })
    }
}
