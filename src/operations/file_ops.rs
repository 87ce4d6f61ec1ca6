use anyhow::{anyhow, Context};
use pathsort_core::*;
use std::path::Path;
use tracing::{debug, info};

use super::validation::{check_path_syntax, parse_sort_argument, validate_output_path};
use crate::errors::{map_catalog_save_error, map_sort_file_error};
use crate::state::{AppState, Listing};

/// Work out the sort request from the command line
///
/// `--sort` and `--sort-file` are mutually exclusive; neither means the
/// catalog keeps its stored order.
pub fn resolve_sort_request(
    sort: Option<&str>,
    sort_file: Option<&Path>,
) -> anyhow::Result<Option<SortRequest>> {
    let request = match (sort, sort_file) {
        (Some(arg), _) => parse_sort_argument(arg)?,
        (None, Some(path)) => load_sort_request(path).map_err(|e| {
            let (title, message, details) = map_sort_file_error(&*e, path);
            anyhow!("{}: {}\n{}", title, message, details)
        })?,
        (None, None) => return Ok(None),
    };

    // Malformed paths still sort as a no-op; note them for -v
    if let Err(e) = check_path_syntax(&request.path) {
        debug!(path = %request.path, error = %e, "sort path is malformed");
    }

    Ok(Some(request))
}

/// Save the products in listing order under the loaded catalog's title
pub fn write_sorted_catalog(state: &AppState, listing: &Listing<'_>, output: &Path) -> anyhow::Result<()> {
    if let Some(input) = &state.current_file {
        validate_output_path(output, input)?;
    }

    let catalog = Catalog {
        title: state.catalog.as_ref().and_then(|c| c.title.clone()),
        products: listing.entries.iter().map(|e| e.product.clone()).collect(),
    };

    save_catalog(&catalog, output)
        .map_err(|e| {
            let (title, message, details) = map_catalog_save_error(&*e, output);
            anyhow!("{}: {}\n{}", title, message, details)
        })
        .with_context(|| format!("writing {}", output.display()))?;

    info!(products = catalog.products.len(), output = %output.display(), "saved sorted catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state_with(dir: &Path, value: serde_json::Value) -> AppState {
        let input = dir.join("catalog.json");
        std::fs::write(&input, value.to_string()).unwrap();
        let mut state = AppState::new();
        state.load_from_file(input).unwrap();
        state
    }

    #[test]
    fn test_no_sort_arguments() {
        assert!(resolve_sort_request(None, None).unwrap().is_none());
    }

    #[test]
    fn test_sort_argument_wins() {
        let request = resolve_sort_request(Some("Price:desc"), None).unwrap().unwrap();
        assert_eq!(request, SortRequest::new("Price", SortDirection::Descending));
    }

    #[test]
    fn test_sort_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sort.json");
        std::fs::write(&path, r#"{"path": "Tags.Weight", "direction": "descending"}"#).unwrap();

        let request = resolve_sort_request(None, Some(&path)).unwrap().unwrap();
        assert_eq!(request.path, "Tags.Weight");
        assert_eq!(request.direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_file_errors_are_mapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sort.json");
        std::fs::write(&path, r#"{"direction": "ascending"}"#).unwrap();

        let err = resolve_sort_request(None, Some(&path)).unwrap_err();
        assert!(err.to_string().starts_with("Invalid Sort File"));
    }

    #[test]
    fn test_write_sorted_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_with(
            dir.path(),
            json!({
                "title": "Desk",
                "products": [
                    {"id": 1, "name": "Stapler", "price": 9.5},
                    {"id": 2, "name": "Lamp", "price": 30.0},
                    {"id": 3, "name": "Pen", "price": 1.25}
                ]
            }),
        );
        state.set_sort(Some("price".parse().unwrap()));

        let output = dir.path().join("sorted.json");
        let listing = state.listing().unwrap();
        write_sorted_catalog(&state, &listing, &output).unwrap();

        let saved = load_catalog(&output).unwrap();
        assert_eq!(saved.title.as_deref(), Some("Desk"));
        let ids: Vec<i64> = saved.products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_write_refuses_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_with(dir.path(), json!({"products": []}));
        let listing = state.listing().unwrap();

        let input = dir.path().join("catalog.json");
        assert!(write_sorted_catalog(&state, &listing, &input).is_err());
    }
}
