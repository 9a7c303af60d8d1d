use serde_json::{Map, Value};

use crate::errors::RequestError;

/// 操作ごとのオプションパラメータ（リクエストの `params`）
///
/// 欠落・`null`・`false`・`0`・空文字列は「未指定」として扱い、
/// 呼び出し側でデフォルト値が適用される。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Map<String, Value>);

impl Params {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// リクエストの `params` フィールドから作成する
    pub fn from_value(value: Option<Value>) -> Result<Self, RequestError> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(_) => Err(RequestError::invalid_param("params", "must be an object")),
        }
    }

    /// 未指定扱いでない値のみを返す
    fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !is_falsy(v))
    }

    /// 真偽フラグ
    pub fn flag(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// 数値（JSON 数値または数値文字列）
    pub fn number(&self, name: &str) -> Result<Option<f64>, RequestError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        match parsed {
            Some(n) if n.is_finite() => Ok(Some(n)),
            _ => Err(RequestError::invalid_param(name, "must be a number")),
        }
    }

    /// 整数
    pub fn integer(&self, name: &str) -> Result<Option<i64>, RequestError> {
        match self.number(name)? {
            Some(n) if n.fract() == 0.0 && n.abs() <= i64::MAX as f64 => Ok(Some(n as i64)),
            Some(_) => Err(RequestError::invalid_param(name, "must be an integer")),
            None => Ok(None),
        }
    }

    /// 画像寸法（正の整数）。0 は未指定扱い
    pub fn dimension(&self, name: &str) -> Result<Option<u32>, RequestError> {
        match self.integer(name)? {
            Some(0) | None => Ok(None),
            Some(n) if n > 0 && n <= u32::MAX as i64 => Ok(Some(n as u32)),
            Some(_) => Err(RequestError::invalid_param(name, "must be a positive integer")),
        }
    }

    /// 任意文字列
    pub fn text(&self, name: &str) -> Result<Option<String>, RequestError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(RequestError::invalid_param(name, "must be a string")),
        }
    }

    /// URL や変換文字列に埋め込まれる識別子（`fill`, `south_east`, `rgb:ff0000` など）
    pub fn token(&self, name: &str) -> Result<Option<String>, RequestError> {
        match self.text(name)? {
            Some(s) => validate_token(name, &s).map(|_| Some(s)),
            None => Ok(None),
        }
    }

    /// 色指定。`#rrggbb` は Cloudinary の `rgb:rrggbb` 形式に変換する
    pub fn color(&self, name: &str) -> Result<Option<String>, RequestError> {
        match self.text(name)? {
            Some(s) => {
                let color = match s.strip_prefix('#') {
                    Some(hex) => format!("rgb:{hex}"),
                    None => s,
                };
                validate_token(name, &color).map(|_| Some(color))
            }
            None => Ok(None),
        }
    }
}

/// 識別子として許可される文字のみで構成されているか検証する
pub fn validate_token(name: &str, value: &str) -> Result<(), RequestError> {
    if value.is_empty() || value.len() > 64 {
        return Err(RequestError::invalid_param(name, "must be 1-64 characters"));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
    {
        return Err(RequestError::invalid_param(name, "contains invalid characters"));
    }

    Ok(())
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// 整数値なら小数点なしで文字列化する
pub(crate) fn format_number(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: Value) -> Params {
        Params::from_value(Some(value)).unwrap()
    }

    #[test]
    fn test_falsy_values_are_absent() {
        let p = params(json!({"a": 0, "b": "", "c": null, "d": false}));
        assert_eq!(p.dimension("a").unwrap(), None);
        assert_eq!(p.text("b").unwrap(), None);
        assert_eq!(p.number("c").unwrap(), None);
        assert!(!p.flag("d"));
        assert!(!p.flag("missing"));
    }

    #[test]
    fn test_numeric_strings_are_accepted() {
        let p = params(json!({"width": "320", "blur": 2.5}));
        assert_eq!(p.dimension("width").unwrap(), Some(320));
        assert_eq!(p.number("blur").unwrap(), Some(2.5));
    }

    #[test]
    fn test_invalid_numbers() {
        let p = params(json!({"width": "wide", "height": -5, "angle": 1.5}));
        assert!(matches!(
            p.dimension("width"),
            Err(RequestError::InvalidParam { name, .. }) if name == "width"
        ));
        assert!(p.dimension("height").is_err());
        assert!(p.integer("angle").is_err());
    }

    #[test]
    fn test_params_must_be_object() {
        assert!(Params::from_value(Some(json!([1, 2]))).is_err());
        assert_eq!(Params::from_value(None).unwrap(), Params::default());
    }

    #[test]
    fn test_token_rejects_separators() {
        let p = params(json!({"crop": "fill", "gravity": "south_east/../x", "color": "rgb:ff0000"}));
        assert_eq!(p.token("crop").unwrap(), Some("fill".to_string()));
        assert_eq!(p.token("color").unwrap(), Some("rgb:ff0000".to_string()));
        assert!(p.token("gravity").is_err());
    }

    #[test]
    fn test_hex_color_becomes_rgb() {
        let p = params(json!({"a": "#ff0000", "b": "black", "c": "#ff/00"}));
        assert_eq!(p.color("a").unwrap(), Some("rgb:ff0000".to_string()));
        assert_eq!(p.color("b").unwrap(), Some("black".to_string()));
        assert!(p.color("c").is_err());
        // URL のフラグメントになるため `#` は識別子に使えない
        assert!(p.token("a").is_err());
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-20.0), "-20");
        assert_eq!(format_number(0.5), "0.5");
    }
}
