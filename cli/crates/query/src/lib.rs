//! Server-side filter primitives for Cloud Controller list endpoints.
//!
//! A [`Query`] pairs one filter key with an ordered list of values. List
//! endpoints accept each filter as a single query-string parameter whose
//! values are comma-separated, so the encoding here escapes commas that occur
//! inside a value before joining.
//!
//! Filters use equality semantics: `names=example.com` matches the resource
//! named exactly `example.com`, never a substring.
//!
//! # Example
//!
//! ```
//! use resource_query::{Query, QueryKey, append_to_url};
//! use url::Url;
//!
//! let mut url = Url::parse("https://api.example.com/v3/domains").expect("valid url");
//! append_to_url(&mut url, &[Query::new(QueryKey::NameFilter, ["example.com"])]);
//! assert_eq!(url.query(), Some("names=example.com"));
//! ```

use std::fmt;

use url::Url;

/// Escape sequence substituted for commas inside a single filter value.
pub const ESCAPED_COMMA: &str = "%2C";

/// Filter keys understood by the list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// Match resources whose name equals one of the values.
    NameFilter,
}

impl QueryKey {
    /// Query-string parameter name for this key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NameFilter => "names",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One server-side filter.
///
/// Equality compares key and values in order, so two queries with the same
/// values in a different order are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// Filter key.
    pub key: QueryKey,
    /// Ordered filter values.
    pub values: Vec<String>,
}

impl Query {
    /// Build a query from a key and any iterable of string-like values.
    #[must_use]
    pub fn new<I, S>(key: QueryKey, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            key,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Equality filter on resource name.
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self::new(QueryKey::NameFilter, [name.into()])
    }

    /// Encode the values as one comma-separated parameter value.
    ///
    /// Returns `None` when the query carries no values; such queries are not
    /// sent to the server.
    #[must_use]
    pub fn encoded_value(&self) -> Option<String> {
        if self.values.is_empty() {
            return None;
        }
        let joined = self
            .values
            .iter()
            .map(|value| value.replace(',', ESCAPED_COMMA))
            .collect::<Vec<_>>()
            .join(",");
        Some(joined)
    }
}

/// Convert queries into `(parameter, value)` pairs, preserving order.
#[must_use]
pub fn to_pairs(queries: &[Query]) -> Vec<(&'static str, String)> {
    queries
        .iter()
        .filter_map(|query| {
            query
                .encoded_value()
                .map(|value| (query.key.as_str(), value))
        })
        .collect()
}

/// Append the queries to the URL's query string.
///
/// Existing parameters are kept; no pairs are appended for an empty slice.
pub fn append_to_url(url: &mut Url, queries: &[Query]) {
    let pairs = to_pairs(queries);
    if pairs.is_empty() {
        return;
    }
    let mut serializer = url.query_pairs_mut();
    for (key, value) in pairs {
        serializer.append_pair(key, &value);
    }
}
