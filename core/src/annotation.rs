//! # Annotation Parsing
//!
//! Turns the raw text of a leading comment block into an ordered key-value mapping.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_yaml::Value;

/// Key-value data parsed out of one comment block, in source order.
pub type Annotation = IndexMap<String, String>;

/// Parses comment text into an [`Annotation`].
///
/// Implementations must be pure: the same text always yields the same result.
pub trait CommentParser {
    /// Parses the raw comment text (comment markers already stripped).
    fn parse(&self, raw: &str) -> AppResult<Annotation>;
}

impl<F> CommentParser for F
where
    F: Fn(&str) -> AppResult<Annotation>,
{
    fn parse(&self, raw: &str) -> AppResult<Annotation> {
        self(raw)
    }
}

/// Default parser: the comment body is a YAML mapping of `key: value` lines.
///
/// # Examples
/// ```
/// use cdd_inspect_core::annotation::{CommentParser, YamlCommentParser};
///
/// let data = YamlCommentParser.parse("summary: fetch a pet\ndeprecated: true").unwrap();
/// assert_eq!(data["summary"], "fetch a pet");
/// assert_eq!(data["deprecated"], "true");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct YamlCommentParser;

impl CommentParser for YamlCommentParser {
    fn parse(&self, raw: &str) -> AppResult<Annotation> {
        if raw.trim().is_empty() {
            return Ok(Annotation::new());
        }

        let doc: Document = serde_yaml::from_str(raw)
            .map_err(|e| AppError::Annotation(format!("invalid YAML: {}", e)))?;

        let mapping = match doc {
            Document::Mapping(m) => m,
            Document::Other(Value::Null) => return Ok(Annotation::new()),
            Document::Other(other) => {
                return Err(AppError::Annotation(format!(
                    "expected `key: value` lines, found {}",
                    describe(&other)
                )))
            }
        };

        let mut data = Annotation::with_capacity(mapping.len());
        for (key, value) in mapping {
            let key = scalar_text(&key).ok_or_else(|| {
                AppError::Annotation(format!("keys must be scalars, found {}", describe(&key)))
            })?;
            data.insert(key, value_text(&value)?);
        }

        Ok(data)
    }
}

/// Top-level shape of a comment body.
///
/// The mapping arm goes through `IndexMap::insert`, so a repeated key keeps its
/// first position and takes the last value.
#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Mapping(IndexMap<Value, Value>),
    Other(Value),
}

/// Renders a scalar as text. Returns `None` for collections.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => Some(String::new()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        Value::Sequence(_) | Value::Mapping(_) | Value::Tagged(_) => None,
    }
}

/// Scalars verbatim, collections as compact JSON.
fn value_text(value: &Value) -> AppResult<String> {
    match scalar_text(value) {
        Some(text) => Ok(text),
        None => serde_json::to_string(value)
            .map_err(|e| AppError::Annotation(format!("unsupported value: {}", e))),
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "nothing",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "plain text",
        Value::Sequence(_) => "a list",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
