//! Filter queries (`fq`)
//!
//! Inbound URLs carry filters in the compact `field|value` form. On the wire
//! to Solr each filter becomes a phrase match, `fq=field:"value"`.

use serde::{Deserialize, Serialize};

use crate::query_string::{query_escape, QueryString};

/// Separator between field and value in the compact token
pub const TOKEN_SEPARATOR: char = '|';

/// A single field/value filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterQuery {
    pub field: String,
    pub value: String,
}

impl FilterQuery {
    pub fn new<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Parse a `field|value` token. Anything without exactly one pipe is rejected.
    pub fn parse(token: &str) -> Option<Self> {
        let mut parts = token.split(TOKEN_SEPARATOR);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(field), Some(value), None) => Some(Self::new(field, value)),
            _ => None,
        }
    }

    /// The compact `field|value` token
    pub fn token(&self) -> String {
        format!("{}{}{}", self.field, TOKEN_SEPARATOR, self.value)
    }

    /// Solr filter expression, e.g. `subject:%22abc+xyz%22`
    pub fn to_solr_value(&self) -> String {
        format!("{}:{}", self.field, query_escape(&format!("\"{}\"", self.value)))
    }
}

/// Ordered list of filter queries. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilterQueries(Vec<FilterQuery>);

impl FilterQueries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `fq` values of a query string. Malformed entries are dropped.
    pub fn parse<S: AsRef<str>>(values: &[S]) -> Self {
        let filters = values
            .iter()
            .filter_map(|v| {
                let fq = FilterQuery::parse(v.as_ref());
                if fq.is_none() {
                    tracing::debug!("Ignoring malformed filter query: {}", v.as_ref());
                }
                fq
            })
            .collect();
        Self(filters)
    }

    pub fn push(&mut self, fq: FilterQuery) {
        self.0.push(fq);
    }

    /// True when the exact field/value pair is being filtered on
    pub fn has_field_value(&self, field: &str, value: &str) -> bool {
        self.0.iter().any(|fq| fq.field == field && fq.value == value)
    }

    /// All values currently filtered on `field`, in order
    pub fn field_values(&self, field: &str) -> Vec<&str> {
        self.0
            .iter()
            .filter(|fq| fq.field == field)
            .map(|fq| fq.value.as_str())
            .collect()
    }

    /// Render every filter as `fq=field:"value"&`
    pub fn to_query_string(&self) -> String {
        let mut qs = QueryString::new();
        for fq in &self.0 {
            qs.add_raw("fq", &fq.to_solr_value());
        }
        qs.into_string()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FilterQuery> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FilterQuery> for FilterQueries {
    fn from_iter<I: IntoIterator<Item = FilterQuery>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a FilterQueries {
    type Item = &'a FilterQuery;
    type IntoIter = std::slice::Iter<'a, FilterQuery>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        let fqs = FilterQueries::parse(&["f1|v1", "f2|v2"]);
        assert_eq!(fqs.len(), 2);
        assert!(fqs.has_field_value("f1", "v1"));
        assert!(fqs.has_field_value("f2", "v2"));
        assert!(!fqs.has_field_value("f1", "v2"));
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        let fqs = FilterQueries::parse(&["novalue", "a|b|c", "", "ok|yes"]);
        assert_eq!(fqs.len(), 1);
        assert!(fqs.has_field_value("ok", "yes"));
    }

    #[test]
    fn test_token_round_trip() {
        let fq = FilterQuery::new("f1", "v1");
        assert_eq!(fq.token(), "f1|v1");
        assert_eq!(FilterQuery::parse(&fq.token()), Some(fq));
    }

    #[test]
    fn test_duplicate_fields_are_kept() {
        let fqs = FilterQueries::parse(&["subject|art", "subject|music", "year|1999"]);
        assert_eq!(fqs.field_values("subject"), vec!["art", "music"]);
        assert_eq!(fqs.field_values("year"), vec!["1999"]);
        assert!(fqs.field_values("author").is_empty());
    }

    #[test]
    fn test_to_query_string() {
        let fqs = FilterQueries::parse(&["f1|v1", "subject|abc xyz"]);
        assert_eq!(
            fqs.to_query_string(),
            "fq=f1:%22v1%22&fq=subject:%22abc+xyz%22&"
        );
        assert_eq!(FilterQueries::new().to_query_string(), "");
    }
}
