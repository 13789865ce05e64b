//! Query-string encoding for Solr requests
//!
//! Every fragment produced here has the form `name=value&`, so fragments can be
//! concatenated without tracking separators. Values are escaped with the usual
//! form rules: unreserved characters pass through, space becomes `+`, and
//! everything else is percent-encoded.

use std::fmt;

/// Escape a value for use inside a query string.
///
/// ASCII alphanumerics and `-_.~` are kept, space becomes `+`, and every other
/// byte is percent-encoded (`*` becomes `%2A`).
pub fn query_escape(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

/// Builder for a Solr query string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    buf: String,
}

impl QueryString {
    /// Create an empty query string
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `name=escaped(value)&`
    pub fn add(&mut self, name: &str, value: &str) -> &mut Self {
        self.add_raw(name, &query_escape(value))
    }

    /// Append `name=value&` without escaping the value.
    ///
    /// The caller is responsible for `value` already being query-safe.
    pub fn add_raw(&mut self, name: &str, value: &str) -> &mut Self {
        self.buf.push_str(name);
        self.buf.push('=');
        self.buf.push_str(value);
        self.buf.push('&');
        self
    }

    /// Append the value, or `default` when the value is empty
    pub fn add_default(&mut self, name: &str, value: &str, default: &str) -> &mut Self {
        if value.is_empty() {
            self.add(name, default)
        } else {
            self.add(name, value)
        }
    }

    /// Append a list joined with literal commas (`fl=a,b,c&`).
    ///
    /// Nothing is emitted for an empty list.
    pub fn add_many<S: AsRef<str>>(&mut self, name: &str, values: &[S]) -> &mut Self {
        if values.is_empty() {
            return self;
        }
        let joined = values
            .iter()
            .map(|v| query_escape(v.as_ref()))
            .collect::<Vec<_>>()
            .join(",");
        self.add_raw(name, &joined)
    }

    /// Append a signed integer
    pub fn add_int(&mut self, name: &str, value: i64) -> &mut Self {
        self.add_raw(name, &value.to_string())
    }

    /// Append another, already built, query string
    pub fn extend(&mut self, other: &str) -> &mut Self {
        self.buf.push_str(other);
        self
    }

    /// Borrow the encoded string
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Check whether nothing has been appended yet
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the builder, returning the encoded string
    pub fn into_string(self) -> String {
        self.buf
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}

impl From<QueryString> for String {
    fn from(qs: QueryString) -> Self {
        qs.buf
    }
}
