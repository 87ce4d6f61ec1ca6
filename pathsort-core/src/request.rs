use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::reflect::Reflect;
use crate::sorting::{order_by_property_with, OrderedView, SortDirection};

/// A single sort: which path, which direction
///
/// Deserializes from `{"path": "SubCategory.Name", "direction": "descending"}`
/// with the direction optional, and parses from the shorthand
/// `SubCategory.Name:desc`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRequest {
    pub path: String,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortRequest {
    pub fn new(path: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            path: path.into(),
            direction,
        }
    }

    /// Order `source` according to this request
    pub fn apply<I>(&self, source: I) -> OrderedView<I>
    where
        I: IntoIterator,
        I::Item: Reflect,
    {
        order_by_property_with(source, &self.path, self.direction)
    }
}

impl FromStr for SortRequest {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (path, direction) = match s.rsplit_once(':') {
            Some((path, suffix)) => (path, parse_direction(suffix)?),
            None => (s, SortDirection::Ascending),
        };

        let path = path.trim();
        if path.is_empty() {
            return Err("Sort path cannot be empty".to_string());
        }

        Ok(Self::new(path, direction))
    }
}

fn parse_direction(s: &str) -> Result<SortDirection, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "asc" | "ascending" => Ok(SortDirection::Ascending),
        "desc" | "descending" => Ok(SortDirection::Descending),
        other => Err(format!(
            "Unknown sort direction '{}'. Expected 'asc' or 'desc'",
            other
        )),
    }
}

impl fmt::Display for SortRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.path, self.direction)
    }
}
