use sha1::{Digest, Sha1};

/// アップロード API の署名を計算する
///
/// 空でないパラメータをキー順に `key=value` で `&` 連結し、末尾に API シークレットを
/// 付けた文字列の SHA-1 を 16 進で返す。`file` と `api_key` は署名対象に含めない。
pub fn sign_params(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted: Vec<&(&str, &str)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    let mut hasher = Sha1::new();
    hasher.update(to_sign.as_bytes());
    hasher.update(api_secret.as_bytes());
    hex::encode(hasher.finalize())
}
