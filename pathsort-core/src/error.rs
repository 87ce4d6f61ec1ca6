use thiserror::Error;

/// Why a property path failed to resolve against a type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("property path is empty")]
    Empty,

    #[error("invalid path segment '{segment}' at position {position}")]
    InvalidSegment { segment: String, position: usize },

    #[error("type '{type_name}' has no member named '{segment}'")]
    UnknownMember {
        segment: String,
        type_name: &'static str,
    },
}

/// Faults raised while ordering already extracted keys
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    #[error("cannot compare {left} key with {right} key")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },
}
