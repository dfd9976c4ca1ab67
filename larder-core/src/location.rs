//! Filter state <-> location query parameters.
//!
//! Outbound, the list's filter state is written into the location's query
//! parameters, leaving unrelated parameters alone. Inbound, the state is
//! rebuilt from the parameters with lenient defaults.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use url::form_urlencoded;

pub const SEARCH_PARAM: &str = "search";
pub const TAGS_PARAM: &str = "tags";
pub const PAGE_PARAM: &str = "page";

/// Ordered multimap of query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` query string. A leading `?` is ignored.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            pairs: form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Every value for `key`, in order.
    pub fn get_all(&self, key: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn append(&mut self, key: &str, value: impl Into<String>) {
        self.pairs.push((key.to_string(), value.into()));
    }

    pub fn remove(&mut self, key: &str) {
        self.pairs.retain(|(k, _)| k != key);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// What the list view shows: text query, required tags, page index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub query: String,
    pub tags: BTreeSet<String>,
    pub page: usize,
}

impl FilterState {
    /// Rebuild state from location parameters.
    ///
    /// - `search`: first value, default empty
    /// - `tags`: one or many values, empty values dropped
    /// - `page`: non-negative integer, anything unparseable becomes 0
    pub fn from_params(params: &QueryParams) -> Self {
        let query = params.get(SEARCH_PARAM).unwrap_or_default().to_string();

        let tags = params
            .get_all(TAGS_PARAM)
            .into_iter()
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();

        let page = params
            .get(PAGE_PARAM)
            .and_then(|p| p.trim().parse::<usize>().ok())
            .unwrap_or(0);

        Self { query, tags, page }
    }

    /// Write this state into `params`, keeping every unrelated parameter.
    ///
    /// `search` is present only for a non-empty query, `tags` only for a
    /// non-empty tag set (one entry per tag), `page` always.
    pub fn write_to(&self, params: &mut QueryParams) {
        params.remove(SEARCH_PARAM);
        params.remove(TAGS_PARAM);
        params.remove(PAGE_PARAM);

        if !self.query.is_empty() {
            params.append(SEARCH_PARAM, self.query.as_str());
        }
        for tag in &self.tags {
            params.append(TAGS_PARAM, tag.as_str());
        }
        params.append(PAGE_PARAM, self.page.to_string());
    }

    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        self.write_to(&mut params);
        params
    }
}

/// A path plus its query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub path: String,
    pub params: QueryParams,
}

impl Location {
    pub fn new(path: &str, params: QueryParams) -> Self {
        Self {
            path: path.to_string(),
            params,
        }
    }

    /// Split `"/recipes?search=x"` into path and parameters.
    pub fn parse(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, QueryParams::parse(query)),
            None => Self::new(href, QueryParams::new()),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.params.to_query_string())
        }
    }
}

/// How a location change is recorded in navigation history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum History {
    Push,
    /// Overwrite the current entry; filter changes never add history entries.
    Replace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationUpdate {
    pub location: Location,
    pub history: History,
}
