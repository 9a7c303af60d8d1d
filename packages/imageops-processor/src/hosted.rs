use axum::extract::State;
use axum::Json;
use bytes::Bytes;
use tracing::Instrument;
use uuid::Uuid;

use crate::handler::AppError;
use crate::AppState;
use imageops_core::{
    encode_base64, to_data_uri, HostedResult, Operation, OperationKind, ProcessingRequest,
    TransformationSpec, Variations, FETCH_FALLBACK_WARNING,
};

/// Cloudinary に変換を委譲するハンドラ
pub async fn process(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<HostedResult>, AppError> {
    let span = tracing::info_span!("cloudinary_processor", request_id = %Uuid::new_v4());
    process_inner(state, body).instrument(span).await
}

async fn process_inner(state: AppState, body: Bytes) -> Result<Json<HostedResult>, AppError> {
    let request: ProcessingRequest<Operation> = ProcessingRequest::from_slice(&body)?;
    let spec = TransformationSpec::build(&request.operation, &request.format, &request.quality);

    tracing::info!(
        operation = request.operation.name(),
        format = %request.format,
        quality = %request.quality,
        return_url = request.return_url,
        "uploading image to Cloudinary"
    );

    let data_uri = to_data_uri(&request.image_data);
    let asset = state.host.upload(&data_uri, &spec).await?;

    tracing::info!(
        public_id = %asset.public_id,
        width = asset.width,
        height = asset.height,
        size = asset.bytes,
        "upload complete"
    );

    let variations = Variations::build(
        state.host.as_ref(),
        &asset.public_id,
        &spec,
        &request.params,
    );
    let mut result = HostedResult::new(asset, variations);

    // 取得失敗は致命的ではない。URL だけを返す
    if !request.return_url {
        match state.host.fetch(&result.original_url).await {
            Ok(bytes) => result.image_data = Some(encode_base64(&bytes)),
            Err(e) => {
                tracing::warn!(error = %e, url = %result.original_url, "failed to fetch processed image");
                result.warning = Some(FETCH_FALLBACK_WARNING.to_string());
            }
        }
    }

    Ok(Json(result))
}
