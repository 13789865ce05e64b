//! Navigation links for faceted search
//!
//! Navigation URLs carry filters as `fq=field|value&`, with the value escaped
//! and the pipe left literal. The same token is used to build a search URL and
//! to add or remove a filter from it, so removal is an exact string match.

use serde::{Deserialize, Serialize};

use crate::query_string::{query_escape, QueryString};

/// URLs to add or remove a facet value filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetLinks {
    /// The base URL with this value's filter appended
    pub add_url: String,
    /// The base URL with this value's filter removed
    pub remove_url: String,
}

/// The canonical `fq=field|value&` navigation token
pub fn filter_token(field: &str, value: &str) -> String {
    let mut qs = QueryString::new();
    qs.add_raw("fq", &format!("{}|{}", field, query_escape(value)));
    qs.into_string()
}

/// Add/remove links for one facet value against a navigation URL.
///
/// `base_url` must be a URL built by this crate (e.g. `SearchResponse::url`).
/// Only the first occurrence of the filter is removed.
pub fn facet_links(field: &str, value: &str, base_url: &str) -> FacetLinks {
    let token = filter_token(field, value);
    FacetLinks {
        add_url: format!("{}{}", base_url, token),
        remove_url: base_url.replacen(&token, "", 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_token_escapes_value_only() {
        assert_eq!(filter_token("subject", "v1"), "fq=subject|v1&");
        assert_eq!(
            filter_token("subject", "World War II"),
            "fq=subject|World+War+II&"
        );
        assert_eq!(filter_token("year", "a&b"), "fq=year|a%26b&");
    }

    #[test]
    fn test_add_appends_token() {
        let links = facet_links("subject", "art", "q=george&");
        assert_eq!(links.add_url, "q=george&fq=subject|art&");
        // not filtered yet, nothing to strip
        assert_eq!(links.remove_url, "q=george&");
    }

    #[test]
    fn test_remove_strips_first_occurrence() {
        let base = "q=george&fq=subject|World+War+II&fq=year|1999&";
        let links = facet_links("subject", "World War II", base);
        assert_eq!(links.remove_url, "q=george&fq=year|1999&");

        let base = "fq=a|b&fq=a|b&";
        assert_eq!(facet_links("a", "b", base).remove_url, "fq=a|b&");
    }
}
