use quill_types::{format_number, LogValue};
use serde_json::json;

#[test]
fn test_display_string_literals() {
    assert_eq!(LogValue::Null.as_display_string(), "null");
    assert_eq!(LogValue::Undefined.as_display_string(), "undefined");
    assert_eq!(LogValue::Number(f64::NAN).as_display_string(), "NaN");
    assert_eq!(LogValue::Number(12.0).as_display_string(), "12");
    assert_eq!(LogValue::Number(12.75).as_display_string(), "12.75");
    assert_eq!(LogValue::Bool(true).as_display_string(), "true");
}

#[test]
fn test_number_coercion() {
    assert_eq!(LogValue::Null.as_number(), 0.0);
    assert!(LogValue::Undefined.as_number().is_nan());
    assert_eq!(LogValue::Bool(true).as_number(), 1.0);
    assert_eq!(LogValue::Str(" 12.5 ".to_string()).as_number(), 12.5);
    assert_eq!(LogValue::Str("".to_string()).as_number(), 0.0);
    assert!(LogValue::Str("twelve".to_string()).as_number().is_nan());
    assert!(LogValue::Json(json!({})).as_number().is_nan());
}

#[test]
fn test_json_coercion() {
    assert_eq!(LogValue::Str("hi".to_string()).to_json_string(), "\"hi\"");
    assert_eq!(LogValue::Number(f64::NAN).to_json_string(), "null");
    assert_eq!(LogValue::Number(f64::INFINITY).to_json_string(), "null");
    assert_eq!(
        LogValue::Json(json!({"a": [1, 2]})).to_json_string(),
        r#"{"a":[1,2]}"#
    );
    assert_eq!(LogValue::Unserializable.to_json_string(), "[Circular]");
}

#[test]
fn test_format_number_spells_out_infinities() {
    assert_eq!(format_number(f64::INFINITY), "Infinity");
    assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(format_number(0.5), "0.5");
}

#[test]
fn test_error_capture_includes_source_chain() {
    use std::fmt;

    #[derive(Debug)]
    struct Inner;
    impl fmt::Display for Inner {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "inner failure")
        }
    }
    impl std::error::Error for Inner {}

    #[derive(Debug)]
    struct Outer(Inner);
    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failure")
        }
    }
    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    let value = LogValue::error(&Outer(Inner));
    match value {
        LogValue::Error(e) => {
            assert_eq!(e.message, "outer failure");
            assert_eq!(e.name, "Error");
            assert_eq!(e.stack.as_deref(), Some("caused by: inner failure"));
        }
        other => panic!("expected an error value, got {:?}", other),
    }
}
