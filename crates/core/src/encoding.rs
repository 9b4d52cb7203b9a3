//! JSON text encoding for the structured prompt fields
//!
//! The `*_json` columns keep the layout existing consumers of the index
//! already read:
//! - `", "` between items and `": "` between a key and its value
//! - no indentation or trailing whitespace
//! - non-ASCII characters written as-is, only control characters escaped
//! - object keys in source order (serde_json `preserve_order`)
//! - numbers written as they appear in the source (`arbitrary_precision`)

use std::io;

use serde::Serialize;
use serde_json::{ser::Formatter, Value};

use crate::errors::Result;

/// Compact formatter with a space after every separator
#[derive(Debug, Clone, Copy, Default)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encode a JSON value as column text
///
/// # Examples
/// ```
/// use prompts_loader::encoding::to_json_text;
/// use serde_json::json;
///
/// let text = to_json_text(&json!({"origin": "manual", "tags": ["a", "b"]})).unwrap();
/// assert_eq!(text, r#"{"origin": "manual", "tags": ["a", "b"]}"#);
/// ```
pub fn to_json_text(value: &Value) -> Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut ser)?;

    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_scalars_are_unchanged() {
        assert_eq!(to_json_text(&json!(null)).unwrap(), "null");
        assert_eq!(to_json_text(&json!(true)).unwrap(), "true");
        assert_eq!(to_json_text(&json!(42)).unwrap(), "42");
        assert_eq!(to_json_text(&json!("name")).unwrap(), "\"name\"");
    }

    #[test]
    fn test_single_item_has_no_separator() {
        assert_eq!(to_json_text(&json!(["name"])).unwrap(), r#"["name"]"#);
        assert_eq!(
            to_json_text(&json!({"origin": "manual"})).unwrap(),
            r#"{"origin": "manual"}"#
        );
    }

    #[test]
    fn test_nested_separators() {
        let value = json!({"a": [1, 2, {"b": []}], "c": {}});
        assert_eq!(
            to_json_text(&value).unwrap(),
            r#"{"a": [1, 2, {"b": []}], "c": {}}"#
        );
    }

    #[test]
    fn test_non_ascii_kept_literally() {
        let value = json!(["שם", "תאריך"]);
        assert_eq!(to_json_text(&value).unwrap(), r#"["שם", "תאריך"]"#);
    }

    #[test]
    fn test_control_characters_escaped() {
        let value = json!("line\nnext\t\"quoted\"");
        assert_eq!(
            to_json_text(&value).unwrap(),
            r#""line\nnext\t\"quoted\"""#
        );
    }

    #[test]
    fn test_key_order_preserved() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2, "mid": 3}"#).unwrap();
        assert_eq!(
            to_json_text(&value).unwrap(),
            r#"{"zeta": 1, "alpha": 2, "mid": 3}"#
        );
    }

    #[test]
    fn test_number_literals_kept_as_written() {
        let value: Value =
            serde_json::from_str(r#"{"n": 123456789012345678901234567890, "x": [0.1000, 2.5e3]}"#)
                .unwrap();
        assert_eq!(
            to_json_text(&value).unwrap(),
            r#"{"n": 123456789012345678901234567890, "x": [0.1000, 2.5e3]}"#
        );
    }

    fn number(literal: String) -> Value {
        serde_json::from_str(&literal).unwrap()
    }

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "-?[1-9][0-9]{19,30}".prop_map(number),
            (any::<i32>(), 0u32..1000).prop_map(|(int, frac)| number(format!("{}.{}", int, frac))),
            "\\PC{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::vec(("\\PC{0,6}", inner), 0..4)
                    .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_decoding_restores_the_value(value in arb_json()) {
            let text = to_json_text(&value).unwrap();
            let decoded: Value = serde_json::from_str(&text).unwrap();
            prop_assert_eq!(decoded, value);
        }
    }
}
