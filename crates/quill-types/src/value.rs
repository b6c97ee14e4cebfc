use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single positional argument to a log call.
///
/// Renderers never fail on a value: every variant has a total string
/// coercion, a total numeric coercion, and a total JSON coercion. Values
/// that cannot be represented as JSON are captured as [`LogValue::Unserializable`]
/// and surface as the literal `[Circular]`.
#[derive(Debug, Clone, PartialEq)]
pub enum LogValue {
    Null,
    Undefined,
    Bool(bool),
    /// An f64 so that NaN and the infinities stay representable.
    Number(f64),
    Str(String),
    /// Structured data, already in JSON form.
    Json(Value),
    /// An error with its reduced serialization surface.
    Error(ErrorValue),
    /// A value that could not be converted to JSON when it was captured.
    Unserializable,
}

/// The serializable face of an error argument.
///
/// Field order is the serialization order: message, stack, type, name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorValue {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub name: String,
}

impl LogValue {
    /// Capture any serializable value, degrading to `Unserializable` when
    /// the conversion fails (non-string map keys, failing `Serialize` impls).
    pub fn from_serialize<T: Serialize>(value: &T) -> LogValue {
        match serde_json::to_value(value) {
            Ok(v) => LogValue::Json(v),
            Err(_) => LogValue::Unserializable,
        }
    }

    /// Capture an error together with its source chain.
    pub fn error(err: &dyn std::error::Error) -> LogValue {
        let mut chain = Vec::new();
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {}", cause));
            source = cause.source();
        }
        LogValue::Error(ErrorValue {
            message: err.to_string(),
            stack: if chain.is_empty() {
                None
            } else {
                Some(chain.join("\n"))
            },
            kind: None,
            name: "Error".to_string(),
        })
    }

    /// Whether the value goes through structural inspection (instead of
    /// plain string coercion) when it is not consumed by a format token.
    pub fn is_structured(&self) -> bool {
        matches!(
            self,
            LogValue::Json(Value::Object(_)) | LogValue::Json(Value::Array(_)) | LogValue::Error(_)
        )
    }

    /// String coercion: `null`, `undefined` and `NaN` stringify to their
    /// literal names; numbers drop a redundant decimal point.
    pub fn as_display_string(&self) -> String {
        match self {
            LogValue::Null => "null".to_string(),
            LogValue::Undefined => "undefined".to_string(),
            LogValue::Bool(b) => b.to_string(),
            LogValue::Number(n) => format_number(*n),
            LogValue::Str(s) => s.clone(),
            LogValue::Json(v) => json_display_string(v),
            LogValue::Error(e) => format!("{}: {}", e.name, e.message),
            LogValue::Unserializable => "[Circular]".to_string(),
        }
    }

    /// Numeric coercion: NaN for anything without a numeric reading, never
    /// an error.
    pub fn as_number(&self) -> f64 {
        match self {
            LogValue::Null => 0.0,
            LogValue::Undefined => f64::NAN,
            LogValue::Bool(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            LogValue::Number(n) => *n,
            LogValue::Str(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse::<f64>().unwrap_or(f64::NAN)
                }
            }
            LogValue::Json(_) | LogValue::Error(_) | LogValue::Unserializable => f64::NAN,
        }
    }

    /// JSON coercion. Strings are quoted, non-finite numbers collapse to
    /// `null`, errors expose only message/stack/type/name, and anything
    /// that fails to serialize becomes the literal `[Circular]`.
    pub fn to_json_string(&self) -> String {
        match self {
            LogValue::Null => "null".to_string(),
            LogValue::Undefined => "undefined".to_string(),
            LogValue::Bool(b) => b.to_string(),
            LogValue::Number(n) => {
                if n.is_finite() {
                    format_number(*n)
                } else {
                    "null".to_string()
                }
            }
            LogValue::Str(s) => {
                serde_json::to_string(s).unwrap_or_else(|_| "[Circular]".to_string())
            }
            LogValue::Json(v) => {
                serde_json::to_string(v).unwrap_or_else(|_| "[Circular]".to_string())
            }
            LogValue::Error(e) => {
                serde_json::to_string(e).unwrap_or_else(|_| "[Circular]".to_string())
            }
            LogValue::Unserializable => "[Circular]".to_string(),
        }
    }
}

/// Render an f64 the way a log reader expects: integer values without a
/// decimal point, `NaN` and `Infinity` spelled out.
pub fn format_number(n: f64) -> String {
    if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else {
        n.to_string()
    }
}

// Plain string coercion of JSON values: arrays flatten to comma-joined
// elements, objects collapse to an opaque marker.
fn json_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n
            .as_f64()
            .map(format_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(json_display_string)
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::Str(s.to_string())
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::Str(s)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl From<f64> for LogValue {
    fn from(n: f64) -> Self {
        LogValue::Number(n)
    }
}

impl From<f32> for LogValue {
    fn from(n: f32) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<i32> for LogValue {
    fn from(n: i32) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<i64> for LogValue {
    fn from(n: i64) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<u32> for LogValue {
    fn from(n: u32) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<u64> for LogValue {
    fn from(n: u64) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<usize> for LogValue {
    fn from(n: usize) -> Self {
        LogValue::Number(n as f64)
    }
}

impl From<Value> for LogValue {
    fn from(v: Value) -> Self {
        LogValue::Json(v)
    }
}

impl From<ErrorValue> for LogValue {
    fn from(e: ErrorValue) -> Self {
        LogValue::Error(e)
    }
}

/// Build a `Vec<LogValue>` from mixed argument expressions.
///
/// ```
/// use quill_types::{vals, LogValue};
///
/// let args = vals!["%s of %d", "three", 4];
/// assert_eq!(args.len(), 3);
/// assert_eq!(args[1], LogValue::Str("three".to_string()));
/// ```
#[macro_export]
macro_rules! vals {
    () => { Vec::<$crate::LogValue>::new() };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::LogValue::from($value)),+]
    };
}
