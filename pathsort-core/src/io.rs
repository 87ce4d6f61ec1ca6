use crate::models::Catalog;
use crate::request::SortRequest;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Load a product catalog from a JSON file
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let catalog: Catalog = serde_json::from_str(&contents)?;
    Ok(catalog)
}

/// Save a catalog to a JSON file with pretty printing
pub fn save_catalog<P: AsRef<Path>>(catalog: &Catalog, path: P) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load a sort request from a JSON file
pub fn load_sort_request<P: AsRef<Path>>(path: P) -> Result<SortRequest, Box<dyn Error>> {
    let contents = fs::read_to_string(path)?;
    let request: SortRequest = serde_json::from_str(&contents)?;
    Ok(request)
}
