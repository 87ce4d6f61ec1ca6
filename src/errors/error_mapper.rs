use std::path::Path;

/// Map catalog loading errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_catalog_load_error(error: &dyn std::error::Error, path: &Path) -> (String, String, String) {
    let error_string = error.to_string();

    if error_string.contains("No such file") {
        (
            "File Not Found".to_string(),
            "The catalog file could not be found.".to_string(),
            format!(
                "Path: {}\n\nPlease verify the file exists and you have permission to read it.",
                path.display()
            ),
        )
    } else if error_string.contains("Permission denied") {
        (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to read this file:\n{}", path.display()),
        )
    } else if error_string.contains("at line") {
        (
            "Invalid Catalog".to_string(),
            "The catalog file is not valid catalog JSON.".to_string(),
            error_string,
        )
    } else {
        (
            "Error Loading File".to_string(),
            "Failed to load catalog file.".to_string(),
            error_string,
        )
    }
}

/// Map sort-request file errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_sort_file_error(error: &dyn std::error::Error, path: &Path) -> (String, String, String) {
    let error_string = error.to_string();

    if error_string.contains("No such file") {
        (
            "File Not Found".to_string(),
            "The sort file could not be found.".to_string(),
            format!("Path: {}", path.display()),
        )
    } else if error_string.contains("missing field `path`") {
        (
            "Invalid Sort File".to_string(),
            "The sort file has no path.".to_string(),
            "Expected an object like {\"path\": \"SubCategory.Name\", \"direction\": \"descending\"}"
                .to_string(),
        )
    } else if error_string.contains("unknown variant") {
        (
            "Invalid Sort File".to_string(),
            "The sort direction is not recognized.".to_string(),
            format!("{}\n\nUse \"ascending\" or \"descending\".", error_string),
        )
    } else {
        (
            "Error Loading Sort File".to_string(),
            "Failed to load sort file.".to_string(),
            error_string,
        )
    }
}

/// Map catalog saving errors to user-friendly messages
/// Returns (title, message, details)
pub fn map_catalog_save_error(error: &dyn std::error::Error, path: &Path) -> (String, String, String) {
    let error_string = error.to_string();

    if error_string.contains("Permission denied") {
        (
            "Permission Denied".to_string(),
            "Permission denied.".to_string(),
            format!("You don't have permission to write to:\n{}", path.display()),
        )
    } else if error_string.contains("No space left") {
        (
            "Disk Full".to_string(),
            "Disk full.".to_string(),
            "There is no space left on the device to save the file.".to_string(),
        )
    } else {
        (
            "Error Saving File".to_string(),
            "Failed to save catalog file.".to_string(),
            error_string,
        )
    }
}
