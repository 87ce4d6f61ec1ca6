use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::error::PathError;

static SEGMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid regex"));

/// A dot-separated member path such as `SubCategory.Name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPath {
    /// The raw path string
    pub raw: String,
    /// Segment names, in traversal order
    pub segments: Vec<String>,
}

impl PropertyPath {
    /// Parse a path, rejecting empty input and malformed segments
    ///
    /// Whitespace is never stripped: a segment with surrounding spaces names
    /// no member and is rejected as malformed.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }

        let segments = path
            .split('.')
            .enumerate()
            .map(|(position, segment)| {
                if SEGMENT_RE.is_match(segment) {
                    Ok(segment.to_string())
                } else {
                    Err(PathError::InvalidSegment {
                        segment: segment.to_string(),
                        position,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            raw: path.to_string(),
            segments,
        })
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nested_path() {
        let path = PropertyPath::parse("ListSubCategory.DeepCategory.Name").unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.segments[0], "ListSubCategory");
        assert_eq!(path.segments[2], "Name");
        assert_eq!(path.to_string(), "ListSubCategory.DeepCategory.Name");
    }

    #[test]
    fn test_whitespace_is_not_stripped() {
        assert_eq!(
            PropertyPath::parse(" Id").unwrap_err(),
            PathError::InvalidSegment {
                segment: " Id".to_string(),
                position: 0
            }
        );
        assert_eq!(
            PropertyPath::parse("SubCategory. Name").unwrap_err(),
            PathError::InvalidSegment {
                segment: " Name".to_string(),
                position: 1
            }
        );
        assert!(PropertyPath::parse("   ").is_err());
    }

    #[test]
    fn test_non_ascii_segment_is_rejected() {
        assert_eq!(
            PropertyPath::parse("Café").unwrap_err(),
            PathError::InvalidSegment {
                segment: "Café".to_string(),
                position: 0
            }
        );
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert_eq!(PropertyPath::parse(""), Err(PathError::Empty));
    }

    #[test]
    fn test_empty_segment_is_rejected() {
        let err = PropertyPath::parse("SubCategory..Name").unwrap_err();
        assert_eq!(
            err,
            PathError::InvalidSegment {
                segment: String::new(),
                position: 1
            }
        );

        assert!(PropertyPath::parse("Name.").is_err());
        assert!(PropertyPath::parse("9lives").is_err());
    }
}
