use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use tracing::Instrument;
use uuid::Uuid;

use crate::handler::AppError;
use crate::AppState;
use imageops_core::{
    decode_image_data, encode_base64, inspect, LocalResult, OperationKind, OutputFormat,
    ProcessingRequest, ToolOperation,
};

/// ImageMagick で変換するハンドラ
pub async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<LocalResult>, AppError> {
    let span = tracing::info_span!("image_processor", request_id = %Uuid::new_v4());
    process_inner(state, body).instrument(span).await
}

async fn process_inner(state: AppState, body: Bytes) -> Result<Json<LocalResult>, AppError> {
    let request: ProcessingRequest<ToolOperation> = ProcessingRequest::from_slice(&body)?;

    let format = OutputFormat::from_str(&request.format)
        .ok_or_else(|| AppError::BadRequest(format!("Unsupported format: {}", request.format)))?;
    let input = decode_image_data(&request.image_data)?;

    tracing::info!(
        operation = request.operation.name(),
        format = ?format,
        input_size = input.len(),
        "transforming image with ImageMagick"
    );

    let output = state
        .magick
        .process(&input, &request.operation, format)
        .await?;

    let mut result = LocalResult::new(
        encode_base64(&output.bytes),
        output.format,
        output.bytes.len(),
    );
    match inspect(&output.bytes) {
        Some(info) => {
            tracing::debug!(detected = ?info.format, "inspected output image");
            result = result.with_dimensions(info.width, info.height);
        }
        None => tracing::debug!("output dimensions unavailable"),
    }

    tracing::info!(
        output_size = result.size,
        width = ?result.width,
        height = ?result.height,
        "transform complete"
    );

    Ok(Json(result))
}
