use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::Url;

/// Search token selecting issues that have a linked pull request.
pub const LINKED_TOKEN: &str = "linked:pr";
/// Negated form of [`LINKED_TOKEN`].
pub const NOT_LINKED_TOKEN: &str = "-linked:pr";
/// Query parameter holding the host's free-text search.
pub const SEARCH_PARAM: &str = "q";

/// Tri-state link filter encoded in the search text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterState {
    #[default]
    None,
    #[serde(rename = "with-pr")]
    WithLink,
    #[serde(rename = "without-pr")]
    WithoutLink,
}

impl FilterState {
    pub const ALL: [FilterState; 3] = [
        FilterState::None,
        FilterState::WithLink,
        FilterState::WithoutLink,
    ];

    /// Stable identifier used for the option elements of the control.
    pub fn key(self) -> &'static str {
        match self {
            FilterState::None => "none",
            FilterState::WithLink => "with-pr",
            FilterState::WithoutLink => "without-pr",
        }
    }

    fn token(self) -> Option<&'static str> {
        match self {
            FilterState::None => None,
            FilterState::WithLink => Some(LINKED_TOKEN),
            FilterState::WithoutLink => Some(NOT_LINKED_TOKEN),
        }
    }
}

impl fmt::Display for FilterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterState {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterState::ALL
            .into_iter()
            .find(|state| state.key() == s)
            .ok_or_else(|| QueryError::UnknownFilter(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid url {url:?}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("unknown filter option {0:?}")]
    UnknownFilter(String),
}

/// Reads the filter out of raw search text. Tokens only match as whole words.
pub fn decode(query: &str) -> FilterState {
    let mut linked = false;
    for word in query.split_whitespace() {
        if word == NOT_LINKED_TOKEN {
            return FilterState::WithoutLink;
        }
        linked |= word == LINKED_TOKEN;
    }
    if linked {
        FilterState::WithLink
    } else {
        FilterState::None
    }
}

/// Rewrites search text so that it selects exactly `desired`.
///
/// Both link tokens are dropped wherever they appear, the remaining words keep
/// their order joined by single spaces, and the token for `desired` (if any)
/// is appended at the end.
pub fn encode(query: &str, desired: FilterState) -> String {
    let mut words: Vec<&str> = query
        .split_whitespace()
        .filter(|word| *word != LINKED_TOKEN && *word != NOT_LINKED_TOKEN)
        .collect();
    if let Some(token) = desired.token() {
        words.push(token);
    }
    words.join(" ")
}

/// Decodes the filter from a full page URL's `q` parameter.
pub fn decode_url(url: &str) -> FilterState {
    Url::parse(url)
        .ok()
        .and_then(|parsed| search_text(&parsed))
        .map(|query| decode(&query))
        .unwrap_or_default()
}

/// Returns `url` with its `q` parameter rewritten to select `desired`.
///
/// Other query parameters are kept in their original order.
pub fn with_filter(url: &str, desired: FilterState) -> Result<String, QueryError> {
    let mut parsed = Url::parse(url).map_err(|err| QueryError::InvalidUrl {
        url: url.to_string(),
        message: err.to_string(),
    })?;

    let current = search_text(&parsed).unwrap_or_default();
    let rewritten = encode(&current, desired);

    let mut pairs: Vec<(String, String)> = Vec::new();
    let mut replaced = false;
    for (key, value) in parsed.query_pairs() {
        if key != SEARCH_PARAM {
            pairs.push((key.into_owned(), value.into_owned()));
        } else if !replaced {
            pairs.push((key.into_owned(), rewritten.clone()));
            replaced = true;
        }
    }
    if !replaced {
        pairs.push((SEARCH_PARAM.to_string(), rewritten));
    }

    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    Ok(parsed.into())
}

fn search_text(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == SEARCH_PARAM)
        .map(|(_, value)| value.into_owned())
}
