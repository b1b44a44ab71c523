//! Scalar kinds and their token encoding.
//!
//! Each kind maps to exactly one JSON token shape. Decoding never coerces:
//! a number is not a boolean, a quoted number is not an integer, and an
//! integer outside its kind's range is rejected rather than truncated.

use serde_json::Value;
use std::fmt;

/// Declared kind of a formatting option
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// UTF-8 text
    Text,
    /// `true` / `false`
    Boolean,
    /// Unsigned byte (0..=255)
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// Enumeration written by variant name
    Enum(&'static [&'static str]),
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScalarKind::Text => write!(f, "a string"),
            ScalarKind::Boolean => write!(f, "a boolean"),
            ScalarKind::Int8 => write!(f, "an integer in 0..=255"),
            ScalarKind::Int16 => write!(f, "a 16-bit integer"),
            ScalarKind::Int32 => write!(f, "a 32-bit integer"),
            ScalarKind::Int64 => write!(f, "a 64-bit integer"),
            ScalarKind::Enum(_) => write!(f, "a variant name"),
        }
    }
}

/// A typed formatting option value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarValue {
    /// UTF-8 text
    Text(String),
    /// Boolean
    Boolean(bool),
    /// Unsigned byte
    Int8(u8),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Enumeration variant name
    Enum(&'static str),
}

impl ScalarValue {
    /// Returns true if this value is of the given kind.
    ///
    /// An enumeration value matches only if it names one of the kind's variants.
    pub fn kind_matches(&self, kind: ScalarKind) -> bool {
        match (self, kind) {
            (ScalarValue::Text(_), ScalarKind::Text)
            | (ScalarValue::Boolean(_), ScalarKind::Boolean)
            | (ScalarValue::Int8(_), ScalarKind::Int8)
            | (ScalarValue::Int16(_), ScalarKind::Int16)
            | (ScalarValue::Int32(_), ScalarKind::Int32)
            | (ScalarValue::Int64(_), ScalarKind::Int64) => true,
            (ScalarValue::Enum(name), ScalarKind::Enum(variants)) => variants.contains(name),
            _ => false,
        }
    }

    /// Returns the variant name of an enumeration value
    pub fn as_enum(&self) -> Option<&'static str> {
        match self {
            ScalarValue::Enum(name) => Some(*name),
            _ => None,
        }
    }
}

/// Why a token could not be decoded as a kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScalarError {
    /// The token's shape does not fit the kind
    TypeMismatch {
        /// Shape of the offending token
        found: String,
    },
    /// The text is not a declared variant
    UnknownVariant {
        /// The offending text
        value: String,
    },
}

/// Encodes a value as its document token
pub fn encode_scalar(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Text(s) => Value::String(s.clone()),
        ScalarValue::Boolean(b) => Value::Bool(*b),
        ScalarValue::Int8(n) => Value::from(*n),
        ScalarValue::Int16(n) => Value::from(*n),
        ScalarValue::Int32(n) => Value::from(*n),
        ScalarValue::Int64(n) => Value::from(*n),
        ScalarValue::Enum(name) => Value::String((*name).to_string()),
    }
}

/// Decodes a document token as a value of the given kind
pub fn decode_scalar(kind: ScalarKind, token: &Value) -> Result<ScalarValue, ScalarError> {
    let mismatch = || ScalarError::TypeMismatch {
        found: describe_token(token),
    };

    match kind {
        ScalarKind::Text => token
            .as_str()
            .map(|s| ScalarValue::Text(s.to_string()))
            .ok_or_else(mismatch),
        ScalarKind::Boolean => token.as_bool().map(ScalarValue::Boolean).ok_or_else(mismatch),
        ScalarKind::Int8 => token
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .map(ScalarValue::Int8)
            .ok_or_else(mismatch),
        ScalarKind::Int16 => token
            .as_i64()
            .and_then(|n| i16::try_from(n).ok())
            .map(ScalarValue::Int16)
            .ok_or_else(mismatch),
        ScalarKind::Int32 => token
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .map(ScalarValue::Int32)
            .ok_or_else(mismatch),
        ScalarKind::Int64 => token.as_i64().map(ScalarValue::Int64).ok_or_else(mismatch),
        ScalarKind::Enum(variants) => {
            let text = token.as_str().ok_or_else(mismatch)?;
            variants
                .iter()
                .copied()
                .find(|variant| *variant == text)
                .map(ScalarValue::Enum)
                .ok_or_else(|| ScalarError::UnknownVariant {
                    value: text.to_string(),
                })
        }
    }
}

/// Describes the shape of a token for error messages
pub(crate) fn describe_token(token: &Value) -> String {
    match token {
        Value::Null => "null".to_string(),
        Value::Bool(b) => format!("boolean {}", b),
        Value::Number(n) => format!("number {}", n),
        Value::String(_) => "a string".to_string(),
        Value::Array(_) => "an array".to_string(),
        Value::Object(_) => "an object".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PLACEMENT: ScalarKind = ScalarKind::Enum(&["TopOfFile", "InsideNamespace"]);

    #[test]
    fn test_encode_shapes() {
        assert_eq!(encode_scalar(&ScalarValue::Text("\t".into())), json!("\t"));
        assert_eq!(encode_scalar(&ScalarValue::Boolean(false)), json!(false));
        assert_eq!(encode_scalar(&ScalarValue::Int8(255)), json!(255));
        assert_eq!(encode_scalar(&ScalarValue::Int16(-3)), json!(-3));
        assert_eq!(encode_scalar(&ScalarValue::Int64(i64::MIN)), json!(i64::MIN));
        assert_eq!(encode_scalar(&ScalarValue::Enum("TopOfFile")), json!("TopOfFile"));
    }

    #[test]
    fn test_decode_each_kind() {
        assert_eq!(
            decode_scalar(ScalarKind::Text, &json!("    ")),
            Ok(ScalarValue::Text("    ".into()))
        );
        assert_eq!(
            decode_scalar(ScalarKind::Boolean, &json!(true)),
            Ok(ScalarValue::Boolean(true))
        );
        assert_eq!(decode_scalar(ScalarKind::Int8, &json!(7)), Ok(ScalarValue::Int8(7)));
        assert_eq!(
            decode_scalar(ScalarKind::Int16, &json!(-32768)),
            Ok(ScalarValue::Int16(i16::MIN))
        );
        assert_eq!(
            decode_scalar(ScalarKind::Int32, &json!(2)),
            Ok(ScalarValue::Int32(2))
        );
        assert_eq!(
            decode_scalar(ScalarKind::Int64, &json!(i64::MAX)),
            Ok(ScalarValue::Int64(i64::MAX))
        );
        assert_eq!(
            decode_scalar(PLACEMENT, &json!("InsideNamespace")),
            Ok(ScalarValue::Enum("InsideNamespace"))
        );
    }

    #[test]
    fn test_integers_out_of_range_are_rejected() {
        for (kind, token) in [
            (ScalarKind::Int8, json!(256)),
            (ScalarKind::Int8, json!(-1)),
            (ScalarKind::Int16, json!(40000)),
            (ScalarKind::Int32, json!(i64::from(i32::MAX) + 1)),
            (ScalarKind::Int64, json!(u64::MAX)),
        ] {
            assert!(
                matches!(decode_scalar(kind, &token), Err(ScalarError::TypeMismatch { .. })),
                "{kind:?} accepted {token}"
            );
        }
    }

    #[test]
    fn test_no_coercion_between_kinds() {
        for (kind, token) in [
            (ScalarKind::Boolean, json!(1)),
            (ScalarKind::Boolean, json!("true")),
            (ScalarKind::Int32, json!("1")),
            (ScalarKind::Int32, json!(1.5)),
            (ScalarKind::Int32, json!(true)),
            (ScalarKind::Text, json!(null)),
            (ScalarKind::Text, json!(4)),
            (PLACEMENT, json!(0)),
        ] {
            assert!(
                matches!(decode_scalar(kind, &token), Err(ScalarError::TypeMismatch { .. })),
                "{kind:?} accepted {token}"
            );
        }
    }

    #[test]
    fn test_unknown_variant() {
        assert_eq!(
            decode_scalar(PLACEMENT, &json!("topoffile")),
            Err(ScalarError::UnknownVariant {
                value: "topoffile".into()
            })
        );
    }

    #[test]
    fn test_kind_matches() {
        assert!(ScalarValue::Enum("TopOfFile").kind_matches(PLACEMENT));
        assert!(!ScalarValue::Enum("Elsewhere").kind_matches(PLACEMENT));
        assert!(!ScalarValue::Int16(1).kind_matches(ScalarKind::Int32));
    }
}
