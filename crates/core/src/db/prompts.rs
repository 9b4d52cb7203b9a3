use std::{fs, path::Path};

use rusqlite::{
    params,
    types::{ToSqlOutput, Value as SqlValue, ValueRef},
    Connection, ToSql,
};
use serde_json::{Number, Value};

use super::schema::{DELETE_PROMPTS, INSERT_PROMPT};
use crate::{
    encoding::to_json_text,
    errors::{LoaderError, Result},
};

/// A record value stored verbatim in its column
///
/// Numbers are bound as INTEGER or REAL; the column's declared affinity
/// decides how SQLite stores them (a `TEXT` column keeps `17` as `'17'`).
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Scalar {
    fn from_json(index: usize, field: &'static str, value: &Value) -> Result<Self> {
        let unsupported = |reason: String| LoaderError::UnsupportedValue {
            index,
            field,
            reason,
        };

        match value {
            Value::Null => Ok(Scalar::Null),
            Value::Bool(b) => Ok(Scalar::Integer(i64::from(*b))),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Scalar::Integer(i))
                } else if is_integer_literal(n) {
                    Err(unsupported(format!("integer {} does not fit in 64 bits", n)))
                } else {
                    n.as_f64()
                        .map(Scalar::Real)
                        .ok_or_else(|| unsupported(format!("number {} is not representable", n)))
                }
            },
            Value::String(s) => Ok(Scalar::Text(s.clone())),
            Value::Array(_) => Err(unsupported("arrays cannot be stored in a plain column".into())),
            Value::Object(_) => Err(unsupported("objects cannot be stored in a plain column".into())),
        }
    }
}

impl ToSql for Scalar {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Scalar::Null => ToSqlOutput::Owned(SqlValue::Null),
            Scalar::Integer(i) => ToSqlOutput::Owned(SqlValue::Integer(*i)),
            Scalar::Real(f) => ToSqlOutput::Owned(SqlValue::Real(*f)),
            Scalar::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

/// One entry of `prompts.he.json`
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRecord {
    pub id:             Scalar,
    pub title_he:       Scalar,
    pub category:       Scalar,
    pub use_case:       Scalar,
    pub prompt_he:      Scalar,
    pub variables:      Value,
    pub output_format:  Scalar,
    pub quality_checks: Value,
    pub source:         Value,
}

impl PromptRecord {
    /// Extract the required keys from the `index`-th array element
    ///
    /// Keys are looked up in column order, so the first missing one is the
    /// one reported. Unknown keys are ignored.
    pub fn from_json(index: usize, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| LoaderError::InvalidRecord {
            index,
            reason: format!("expected an object, found {}", json_kind(value)),
        })?;

        let field = move |name: &'static str| {
            object
                .get(name)
                .ok_or(LoaderError::MissingField { index, field: name })
        };
        let scalar = move |name: &'static str| field(name).and_then(|v| Scalar::from_json(index, name, v));

        Ok(Self {
            id:             scalar("id")?,
            title_he:       scalar("title_he")?,
            category:       scalar("category")?,
            use_case:       scalar("use_case")?,
            prompt_he:      scalar("prompt_he")?,
            variables:      field("variables")?.clone(),
            output_format:  scalar("output_format")?,
            quality_checks: field("quality_checks")?.clone(),
            source:         field("source")?.clone(),
        })
    }
}

/// Numbers keep their source literal (`arbitrary_precision`), so an integer
/// too wide for i64 is still recognisable as one.
fn is_integer_literal(n: &Number) -> bool {
    !n.to_string().contains(['.', 'e', 'E'])
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Read the JSON source and return its top-level array
pub fn read_records(path: &Path) -> Result<Vec<Value>> {
    let text = fs::read_to_string(path).map_err(|e| LoaderError::io(path, e))?;
    let data: Value = serde_json::from_str(&text).map_err(|source| LoaderError::JsonParse {
        path: path.to_path_buf(),
        source,
    })?;

    match data {
        Value::Array(items) => Ok(items),
        _ => Err(LoaderError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}

/// Remove every row from `prompts`, returning how many were removed
pub fn clear_prompts(conn: &Connection) -> Result<usize> {
    Ok(conn.execute(DELETE_PROMPTS, [])?)
}

pub fn insert_prompt(conn: &Connection, record: &PromptRecord) -> Result<()> {
    let variables_json = to_json_text(&record.variables)?;
    let quality_checks_json = to_json_text(&record.quality_checks)?;
    let source_json = to_json_text(&record.source)?;

    let mut stmt = conn.prepare_cached(INSERT_PROMPT)?;
    stmt.execute(params![
        record.id,
        record.title_he,
        record.category,
        record.use_case,
        record.prompt_he,
        variables_json,
        record.output_format,
        quality_checks_json,
        source_json,
    ])?;

    Ok(())
}

/// Insert every record in array order
///
/// Stops at the first record that cannot be extracted or inserted; the
/// caller decides whether the rows already written are committed.
pub fn insert_prompts(conn: &Connection, records: &[Value]) -> Result<usize> {
    for (index, value) in records.iter().enumerate() {
        let record = PromptRecord::from_json(index, value)?;
        insert_prompt(conn, &record)?;
    }
    Ok(records.len())
}
