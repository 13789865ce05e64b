//! Solr documents
//!
//! A document is the field map Solr returned plus, for search results, the
//! highlight fragments for that document. Field values are a tagged
//! [`FieldValue`] so that accessors can match exhaustively instead of
//! inspecting JSON at runtime. Nested objects (atomic updates, child
//! documents) keep their structure and are written back unchanged.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Name of the unique key field
pub const ID_FIELD: &str = "id";

/// Field holding nested child documents
pub const CHILD_DOCUMENTS_FIELD: &str = "_childDocuments_";

/// A single field value as returned by Solr
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "serde_json::Value")]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    Text(String),
    List(Vec<FieldValue>),
    Object(IndexMap<String, FieldValue>),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Unsigned(u)
                } else {
                    Self::Float(n.as_f64().unwrap_or_default())
                }
            }
            Value::String(s) => Self::Text(s),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(i) => Self::Integer(i),
            Err(_) => Self::Unsigned(value),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Integer(i) => write!(f, "{}", i),
            Self::Unsigned(u) => write!(f, "{}", u),
            Self::Float(x) => write!(f, "{}", x),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                let parts: Vec<String> = items.iter().map(ToString::to_string).collect();
                f.write_str(&parts.join(" "))
            }
            Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

/// Field name to value map, in the order Solr returned the fields
pub type DocumentData = IndexMap<String, FieldValue>;

/// A document retrieved from (or destined for) Solr
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub data: DocumentData,
    /// Only populated for documents returned by a search
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub highlights: BTreeMap<String, Vec<String>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with_field<K: Into<String>, V: Into<FieldValue>>(mut self, field: K, value: V) -> Self {
        self.set(field, value);
        self
    }

    /// Set (or replace) a field
    pub fn set<K: Into<String>, V: Into<FieldValue>>(&mut self, field: K, value: V) {
        self.data.insert(field.into(), value.into());
    }

    /// Attach highlight fragments. Called once, while decoding a search response.
    pub(crate) fn attach_highlights(&mut self, highlights: BTreeMap<String, Vec<String>>) {
        self.highlights = highlights;
    }

    /// The field's value as a string; list elements are joined with a space
    pub fn value(&self, field: &str) -> String {
        self.data
            .get(field)
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// All values in a field. A single value is returned as a list of one;
    /// a missing or null field yields an empty list.
    pub fn values(&self, field: &str) -> Vec<String> {
        match self.data.get(field) {
            None | Some(FieldValue::Null) => Vec::new(),
            Some(FieldValue::List(items)) => items.iter().map(ToString::to_string).collect(),
            Some(value) => vec![value.to_string()],
        }
    }

    /// The field's value if it is a JSON number, `0.0` otherwise.
    /// Text is never parsed, so `"9.99"` yields `0.0`.
    pub fn value_float(&self, field: &str) -> f64 {
        match self.data.get(field) {
            Some(FieldValue::Float(x)) => *x,
            Some(FieldValue::Integer(i)) => *i as f64,
            Some(FieldValue::Unsigned(u)) => *u as f64,
            _ => 0.0,
        }
    }

    pub fn id(&self) -> String {
        self.value(ID_FIELD)
    }

    /// Nested documents under `_childDocuments_`; entries that are not
    /// objects are skipped
    pub fn child_documents(&self) -> Vec<Document> {
        let children = match self.data.get(CHILD_DOCUMENTS_FIELD) {
            Some(FieldValue::List(items)) => items.as_slice(),
            Some(single @ FieldValue::Object(_)) => std::slice::from_ref(single),
            _ => &[],
        };
        children
            .iter()
            .filter_map(|child| match child {
                FieldValue::Object(data) => Some(Document::from(data.clone())),
                _ => None,
            })
            .collect()
    }

    /// Append a nested document under `_childDocuments_`
    pub fn add_child(&mut self, child: Document) {
        let child = FieldValue::Object(child.data);
        match self.data.get_mut(CHILD_DOCUMENTS_FIELD) {
            Some(FieldValue::List(items)) => items.push(child),
            _ => {
                self.data
                    .insert(CHILD_DOCUMENTS_FIELD.to_string(), FieldValue::List(vec![child]));
            }
        }
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn highlights_for(&self, field: &str) -> &[String] {
        self.highlights
            .get(field)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Highlight fragments for a field joined with a space
    pub fn highlight_for(&self, field: &str) -> String {
        self.highlights_for(field).join(" ")
    }

    pub fn is_highlighted(&self, field: &str) -> bool {
        !self.highlights_for(field).is_empty()
    }
}

impl From<DocumentData> for Document {
    fn from(data: DocumentData) -> Self {
        Self {
            data,
            highlights: BTreeMap::new(),
        }
    }
}
