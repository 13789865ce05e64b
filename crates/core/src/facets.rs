//! Facet definitions and the values Solr returns for them

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::filter_query::FilterQueries;
use crate::query_string::QueryString;

/// A single facet field.
///
/// Created empty from a definition at request time, populated with values
/// when the response is decoded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetField {
    /// Name of the field in Solr
    pub field: String,
    /// Display title for the field
    pub title: String,
    /// Display position, ascending
    pub order: i32,
    /// Values returned by Solr for this field
    pub values: Vec<FacetValue>,
}

/// A value/count pair for a facet field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValue {
    pub text: String,
    pub count: u64,
    /// True if the current search is filtering by this value
    pub active: bool,
}

impl FacetValue {
    pub fn new<S: Into<String>>(text: S, count: u64, active: bool) -> Self {
        Self {
            text: text.into(),
            count,
            active,
        }
    }
}

impl FacetField {
    /// Create a facet from a field name and its display definition.
    ///
    /// The display may carry an order prefix, `"2|Subject"`.
    pub fn from_definition(field: &str, display: &str) -> Self {
        let (order, title) = parse_display(display);
        Self {
            field: field.to_string(),
            title,
            order,
            values: Vec::new(),
        }
    }

    /// Populate values from Solr's flat `[value1, count1, value2, count2, ...]`
    /// array. Filter values Solr did not return are added with a count of zero
    /// so they can still be removed.
    pub fn decode_counts(&mut self, tokens: &[Value], filters: &FilterQueries) {
        for pair in tokens.chunks_exact(2) {
            let text = match &pair[0] {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            let count = pair[1].as_u64().unwrap_or(0);
            let active = filters.has_field_value(&self.field, &text);
            self.values.push(FacetValue::new(text, count, active));
        }

        for value in filters.field_values(&self.field) {
            if !self.values.iter().any(|v| v.text == value) {
                self.values.push(FacetValue::new(value, 0, true));
            }
        }
    }

    /// Values currently being filtered on
    pub fn active_values(&self) -> impl Iterator<Item = &FacetValue> {
        self.values.iter().filter(|v| v.active)
    }
}

/// `"N|Title"` yields `(N, "Title")`; anything else is a plain title at order 0.
fn parse_display(display: &str) -> (i32, String) {
    if let Some((prefix, title)) = display.split_once('|') {
        if let Ok(order) = prefix.trim().parse::<i32>() {
            return (order, title.to_string());
        }
    }
    (0, display.to_string())
}

/// Ordered collection of facet fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facets(Vec<FacetField>);

impl Facets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(field, display)` definitions, sorted by order. Ties keep
    /// the order in which the definitions were given.
    pub fn from_definitions<I, K, V>(definitions: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut facets: Vec<FacetField> = definitions
            .into_iter()
            .map(|(field, display)| FacetField::from_definition(field.as_ref(), display.as_ref()))
            .collect();
        facets.sort_by_key(|f| f.order);
        Self(facets)
    }

    pub fn push(&mut self, facet: FacetField) {
        self.0.push(facet);
    }

    /// Find the facet for a field
    pub fn for_field(&self, field: &str) -> Option<&FacetField> {
        self.0.iter().find(|f| f.field == field)
    }

    /// `facet=on&facet.field=a&facet.field=b&`, or nothing without facets.
    ///
    /// mincount, limit and offset are left to the caller's options.
    pub fn to_query_string(&self) -> String {
        let mut qs = QueryString::new();
        if !self.0.is_empty() {
            qs.add("facet", "on");
            for facet in &self.0 {
                qs.add("facet.field", &facet.field);
            }
        }
        qs.into_string()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FacetField> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FacetField> for Facets {
    fn from_iter<I: IntoIterator<Item = FacetField>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Facets {
    type Item = &'a FacetField;
    type IntoIter = std::slice::Iter<'a, FacetField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
