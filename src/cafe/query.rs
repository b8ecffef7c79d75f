//! Query parameter validation for `/cafe`
//!
//! Decodes the raw query string and checks `city`, `count` and `search`
//! in that order. The first failing check decides the error.

use thiserror::Error;

use super::directory::CafeDirectory;

/// Rejection reasons; the `Display` text is sent verbatim as the 400 body
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryError {
    #[error("unknown city")]
    UnknownCity,
    #[error("incorrect count")]
    IncorrectCount,
}

/// A validated `/cafe` request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CafeQuery {
    /// Known directory key
    pub city: String,
    /// Maximum number of entries, `None` for all
    pub count: Option<usize>,
    /// Case-insensitive name substring
    pub search: Option<String>,
}

impl CafeQuery {
    /// Validate a raw query string (without the leading `?`)
    pub fn parse(query: Option<&str>, directory: &CafeDirectory) -> Result<Self, QueryError> {
        let raw = RawParams::decode(query.unwrap_or_default());

        let city = raw
            .city
            .filter(|city| directory.contains_city(city))
            .ok_or(QueryError::UnknownCity)?;

        let count = raw.count.as_deref().map(parse_count).transpose()?;

        Ok(Self {
            city,
            count,
            search: raw.search,
        })
    }
}

/// First occurrence of each known parameter, empty values dropped
#[derive(Debug, Default)]
struct RawParams {
    city: Option<String>,
    count: Option<String>,
    search: Option<String>,
}

impl RawParams {
    fn decode(query: &str) -> Self {
        let mut raw = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match &*key {
                "city" => &mut raw.city,
                "count" => &mut raw.count,
                "search" => &mut raw.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }

        Self {
            city: non_empty(raw.city),
            count: non_empty(raw.count),
            search: non_empty(raw.search),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Negative and overflowing values are rejected along with non-numeric ones
fn parse_count(raw: &str) -> Result<usize, QueryError> {
    raw.parse::<usize>().map_err(|_| QueryError::IncorrectCount)
}
