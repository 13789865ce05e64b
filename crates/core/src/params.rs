//! Request parameters for searches and single-document lookups

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::{QueryDefaults, DEFAULT_QUERY};
use crate::document::ID_FIELD;
use crate::facets::Facets;
use crate::filter_query::FilterQueries;
use crate::query_string::QueryString;

/// Options passed straight through to Solr (e.g. `defType: edismax`).
/// Sorted by key so the query string is deterministic.
pub type Options = BTreeMap<String, String>;

/// Inbound query-string values: every key maps to all of its values
pub type QueryValues = BTreeMap<String, Vec<String>>;

/// Decode a raw query string (`q=a+b&fq=x%7Cy&fq=z|w`) into [`QueryValues`]
pub fn parse_query_values(query: &str) -> QueryValues {
    let query = query.trim_start_matches('?');
    let mut values = QueryValues::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    values
}

/// Parameters used to issue a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub q: String,
    /// Fields to fetch
    pub fl: Vec<String>,
    /// Sort clause, e.g. `year desc, title asc`
    #[serde(default)]
    pub sort: Option<String>,
    pub rows: usize,
    pub start: usize,
    /// Values passed as `fq`
    pub filter_queries: FilterQueries,
    /// Facets to request
    pub facets: Facets,
    pub options: Options,
    /// Defaults in effect for these parameters
    #[serde(default)]
    pub defaults: QueryDefaults,
}

impl SearchParams {
    /// Parameters for a plain search text
    pub fn new<S, I, K, V>(q: S, options: Options, facets: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::with_defaults(q, options, facets, QueryDefaults::default())
    }

    /// Like [`SearchParams::new`], with explicit defaults
    pub fn with_defaults<S, I, K, V>(
        q: S,
        options: Options,
        facets: I,
        defaults: QueryDefaults,
    ) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self {
            q: q.into(),
            fl: Vec::new(),
            sort: None,
            rows: defaults.rows,
            start: 0,
            filter_queries: FilterQueries::new(),
            facets: Facets::from_definitions(facets),
            options,
            defaults,
        }
    }

    /// Parameters from inbound query-string values. Picks up `q`, `sort`,
    /// `rows`, `start` and every `fq`; missing or unparsable numbers fall
    /// back to the defaults.
    pub fn from_query_values<I, K, V>(
        qs: &QueryValues,
        options: Options,
        facets: I,
        defaults: QueryDefaults,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let q = first_value(qs, "q")
            .filter(|q| !q.is_empty())
            .unwrap_or(defaults.query.as_str())
            .to_string();
        let sort = first_value(qs, "sort")
            .filter(|sort| !sort.is_empty())
            .map(str::to_string);
        let rows = parse_usize(qs, "rows").unwrap_or(defaults.rows);
        let start = parse_usize(qs, "start").unwrap_or(0);
        let filter_queries = qs
            .get("fq")
            .map(|values| FilterQueries::parse(values.as_slice()))
            .unwrap_or_default();

        Self {
            q,
            fl: Vec::new(),
            sort,
            rows,
            start,
            filter_queries,
            facets: Facets::from_definitions(facets),
            options,
            defaults,
        }
    }

    /// Parameters from a raw inbound query string
    pub fn from_query_string<I, K, V>(
        query: &str,
        options: Options,
        facets: I,
        defaults: QueryDefaults,
    ) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Self::from_query_values(&parse_query_values(query), options, facets, defaults)
    }

    /// Builder-style field list
    pub fn with_fl<S: Into<String>>(mut self, fl: impl IntoIterator<Item = S>) -> Self {
        self.fl = fl.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style sort clause; an empty clause clears it
    pub fn with_sort<S: Into<String>>(mut self, sort: S) -> Self {
        let sort = sort.into();
        self.sort = (!sort.is_empty()).then_some(sort);
        self
    }

    /// Serialize into the query string sent to `/select`
    pub fn to_solr_query_string(&self) -> String {
        let mut qs = QueryString::new();
        qs.add_default("q", &self.q, &self.defaults.query);
        qs.add_many("fl", &self.fl);
        if let Some(sort) = &self.sort {
            qs.add("sort", sort);
        }
        qs.extend(&self.filter_queries.to_query_string());
        qs.extend(&self.facets.to_query_string());

        if self.start > 0 {
            qs.add_int("start", self.start as i64);
        }

        if self.rows != self.defaults.rows {
            qs.add_int("rows", self.rows as i64);
        }

        for (key, value) in &self.options {
            qs.add(key, value);
        }
        qs.into_string()
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self::new(DEFAULT_QUERY, Options::new(), Vec::<(String, String)>::new())
    }
}

fn first_value<'a>(qs: &'a QueryValues, key: &str) -> Option<&'a str> {
    qs.get(key)
        .and_then(|values| values.first())
        .map(String::as_str)
}

fn parse_usize(qs: &QueryValues, key: &str) -> Option<usize> {
    first_value(qs, key).and_then(|v| v.trim().parse().ok())
}

/// Parameters used to get a single document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParams {
    /// Typically `id:xyz`
    pub q: String,
    /// Fields to fetch
    pub fl: Vec<String>,
    pub options: Options,
}

impl GetParams {
    pub fn new<S: Into<String>>(q: S, fl: Vec<String>, options: Options) -> Self {
        Self {
            q: q.into(),
            fl,
            options,
        }
    }

    /// Lookup by unique key, as a phrase so ids with spaces or colons match exactly
    pub fn for_id(id: &str) -> Self {
        Self::new(
            format!("{}:\"{}\"", ID_FIELD, id.replace('"', "\\\"")),
            Vec::new(),
            Options::new(),
        )
    }

    pub fn to_solr_query_string(&self) -> String {
        let mut qs = QueryString::new();
        qs.add("q", &self.q);
        qs.add_many("fl", &self.fl);
        for (key, value) in &self.options {
            qs.add(key, value);
        }
        qs.into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_facets() -> Vec<(String, String)> {
        Vec::new()
    }

    fn options(pairs: &[(&str, &str)]) -> Options {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_get_params_query_string() {
        let params = GetParams::new(
            "id:123",
            vec!["a".into(), "b".into(), "c".into()],
            options(&[("opt1", "val1")]),
        );
        assert_eq!(
            params.to_solr_query_string(),
            "q=id%3A123&fl=a,b,c&opt1=val1&"
        );
    }

    #[test]
    fn test_get_params_for_id() {
        let params = GetParams::for_id("00009565");
        assert_eq!(params.q, "id:\"00009565\"");
        assert_eq!(params.to_solr_query_string(), "q=id%3A%2200009565%22&");
    }

    #[test]
    fn test_empty_query_string_uses_defaults() {
        let params = SearchParams::from_query_string(
            "",
            Options::new(),
            no_facets(),
            QueryDefaults::default(),
        );
        assert_eq!(params.q, "*");
        assert_eq!(params.rows, 10);
        assert_eq!(params.start, 0);
        assert!(params.filter_queries.is_empty());
        assert_eq!(params.to_solr_query_string(), "q=%2A&");
    }

    #[test]
    fn test_search_params_query_string() {
        let mut qs = QueryValues::new();
        qs.insert("q".into(), vec!["title:\"one two\"".into()]);
        qs.insert("fq".into(), vec!["f1|v1".into(), "f2|v2".into()]);

        let params = SearchParams::from_query_values(
            &qs,
            options(&[("opt1", "val1")]),
            no_facets(),
            QueryDefaults::default(),
        )
        .with_fl(["a", "b", "c"]);

        assert_eq!(
            params.to_solr_query_string(),
            "q=title%3A%22one+two%22&fl=a,b,c&fq=f1:%22v1%22&fq=f2:%22v2%22&opt1=val1&"
        );
    }

    #[test]
    fn test_search_params_with_facets() {
        let params = SearchParams::from_query_string(
            "q=title%3A%22one+two%22&fq=f1%7Cv1",
            Options::new(),
            vec![("faA", "xx"), ("faB", "yy")],
            QueryDefaults::default(),
        );
        let qs = params.to_solr_query_string();
        assert!(qs.contains("facet=on&"));
        assert!(qs.contains("facet.field=faA&"));
        assert!(qs.contains("facet.field=faB&"));
        assert!(qs.contains("fq=f1:%22v1%22&"));
    }

    #[test]
    fn test_rows_and_start() {
        let params = SearchParams::from_query_string(
            "q=george&rows=20&start=40",
            Options::new(),
            no_facets(),
            QueryDefaults::default(),
        );
        assert_eq!(params.rows, 20);
        assert_eq!(params.start, 40);
        assert_eq!(params.to_solr_query_string(), "q=george&start=40&rows=20&");
    }

    #[test]
    fn test_sort() {
        let params = SearchParams::from_query_string(
            "q=george&sort=year+desc%2C+title+asc",
            Options::new(),
            no_facets(),
            QueryDefaults::default(),
        )
        .with_fl(["id"]);
        assert_eq!(params.sort.as_deref(), Some("year desc, title asc"));
        assert_eq!(
            params.to_solr_query_string(),
            "q=george&fl=id&sort=year+desc%2C+title+asc&"
        );

        let params = SearchParams::new("george", Options::new(), no_facets()).with_sort("");
        assert_eq!(params.sort, None);
        assert_eq!(params.to_solr_query_string(), "q=george&");
    }

    #[test]
    fn test_bad_numbers_fall_back() {
        let params = SearchParams::from_query_string(
            "rows=lots&start=-5",
            Options::new(),
            no_facets(),
            QueryDefaults::default(),
        );
        assert_eq!(params.rows, 10);
        assert_eq!(params.start, 0);
    }

    #[test]
    fn test_custom_default_rows() {
        let defaults = QueryDefaults {
            rows: 25,
            ..Default::default()
        };
        let params = SearchParams::from_query_string("", Options::new(), no_facets(), defaults);
        assert_eq!(params.rows, 25);
        assert_eq!(params.to_solr_query_string(), "q=%2A&");

        let params = SearchParams::new("x", Options::new(), no_facets());
        assert_eq!(params.rows, 10);
    }

    #[test]
    fn test_options_are_sorted() {
        let params = SearchParams::new(
            "george",
            options(&[("qf", "authorsAll title"), ("defType", "edismax"), ("hl", "on")]),
            no_facets(),
        );
        assert_eq!(
            params.to_solr_query_string(),
            "q=george&defType=edismax&hl=on&qf=authorsAll+title&"
        );
    }

    #[test]
    fn test_parse_query_values() {
        let values = parse_query_values("?q=one+two&fq=a%7Cb&fq=c|d&empty=");
        assert_eq!(values["q"], vec!["one two"]);
        assert_eq!(values["fq"], vec!["a|b", "c|d"]);
        assert_eq!(values["empty"], vec![""]);
    }
}
