use base64::engine::general_purpose::STANDARD as Base64;
use base64::Engine as _;

use crate::constants::DEFAULT_DATA_URI_PREFIX;
use crate::errors::RequestError;

/// Cloudinary に送る data URI を作る
///
/// すでに `data:` で始まる場合はそのまま、生の base64 なら JPEG として前置する。
pub fn to_data_uri(image_data: &str) -> String {
    if image_data.starts_with("data:") {
        image_data.to_string()
    } else {
        format!("{DEFAULT_DATA_URI_PREFIX}{image_data}")
    }
}

/// base64 文字列（data URI 可）を画像バイト列にデコードする
pub fn decode_image_data(image_data: &str) -> Result<Vec<u8>, RequestError> {
    let encoded = match image_data.strip_prefix("data:") {
        Some(rest) => {
            let (header, payload) = rest
                .split_once(',')
                .ok_or_else(|| RequestError::InvalidImageData("malformed data URI".to_string()))?;
            if !header.ends_with(";base64") {
                return Err(RequestError::InvalidImageData(
                    "data URI must be base64 encoded".to_string(),
                ));
            }
            payload
        }
        None => image_data,
    };

    let cleaned: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = Base64
        .decode(cleaned)
        .map_err(|e| RequestError::InvalidImageData(format!("invalid base64: {e}")))?;

    if bytes.is_empty() {
        return Err(RequestError::InvalidImageData("image is empty".to_string()));
    }

    Ok(bytes)
}

pub fn encode_base64(bytes: &[u8]) -> String {
    Base64.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_data_uri() {
        assert_eq!(to_data_uri("AAAA"), "data:image/jpeg;base64,AAAA");
        assert_eq!(
            to_data_uri("data:image/png;base64,AAAA"),
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_decode_raw_and_data_uri() {
        let encoded = encode_base64(b"hello");
        assert_eq!(decode_image_data(&encoded).unwrap(), b"hello");
        assert_eq!(
            decode_image_data(&format!("data:image/png;base64,{encoded}")).unwrap(),
            b"hello"
        );
        // 改行入りの base64 も受け付ける
        assert_eq!(decode_image_data("aGVs\nbG8=").unwrap(), b"hello");
    }

    #[test]
    fn test_decode_rejects_invalid() {
        assert!(decode_image_data("not base64!").is_err());
        assert!(decode_image_data("data:image/png,plain").is_err());
        assert!(decode_image_data("data:image/png;base64").is_err());
    }
}
