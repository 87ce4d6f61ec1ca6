use pathsort_core::{PropertyPath, SortRequest};
use std::path::Path;

/// Validation error with field and message
#[derive(Debug)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Parse a `--sort` argument of the form `PATH[:asc|:desc]`
///
/// Only the direction suffix and emptiness are checked here. A path naming
/// members `Product` does not have is still accepted; sorting by it keeps
/// the catalog order.
pub fn parse_sort_argument(arg: &str) -> Result<SortRequest, ValidationError> {
    arg.parse::<SortRequest>().map_err(|message| ValidationError {
        field: "sort".to_string(),
        message,
    })
}

/// Check that a sort path is syntactically well formed
pub fn check_path_syntax(path: &str) -> Result<PropertyPath, ValidationError> {
    PropertyPath::parse(path).map_err(|e| ValidationError {
        field: "sort".to_string(),
        message: e.to_string(),
    })
}

/// Refuse to write the sorted catalog over its own input
pub fn validate_output_path(output: &Path, input: &Path) -> Result<(), ValidationError> {
    let same = match (output.canonicalize(), input.canonicalize()) {
        (Ok(out), Ok(inp)) => out == inp,
        _ => output == input,
    };

    if same {
        return Err(ValidationError {
            field: "output".to_string(),
            message: "Output file must differ from the input catalog".to_string(),
        });
    }

    Ok(())
}
