use pathsort_core::*;
use std::path::PathBuf;

/// One listed product with the key it was ordered by
#[derive(Debug)]
pub struct ListingEntry<'a> {
    pub product: &'a Product,
    pub key: Option<Value<'a>>,
}

/// Products in display order
#[derive(Debug)]
pub struct Listing<'a> {
    pub entries: Vec<ListingEntry<'a>>,
    /// Whether a sort path resolved and was applied
    pub ordered: bool,
}

/// Application state: the loaded catalog and the requested sort
#[derive(Debug)]
pub struct AppState {
    /// Currently loaded catalog
    pub catalog: Option<Catalog>,
    /// Path to current catalog file
    pub current_file: Option<PathBuf>,
    /// Requested sort, if any
    pub sort: Option<SortRequest>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: None,
            current_file: None,
            sort: None,
        }
    }

    /// Load a catalog file
    pub fn load_from_file(&mut self, path: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let catalog = load_catalog(&path)?;

        self.catalog = Some(catalog);
        self.current_file = Some(path);

        Ok(())
    }

    pub fn set_sort(&mut self, request: Option<SortRequest>) {
        self.sort = request;
    }

    /// Get a reference to products
    pub fn get_products(&self) -> &[Product] {
        self.catalog
            .as_ref()
            .map(|c| c.products.as_slice())
            .unwrap_or_default()
    }

    /// Products in the order the current sort request gives them
    pub fn listing(&self) -> Result<Listing<'_>, SortError> {
        let products = self.get_products();

        let Some(request) = &self.sort else {
            return Ok(Listing {
                entries: products
                    .iter()
                    .map(|product| ListingEntry { product, key: None })
                    .collect(),
                ordered: false,
            });
        };

        let view = request.apply(products);
        let ordered = view.is_ordered();
        let sorted = view.try_into_vec()?;

        // Keys borrow from the products, not from the view's element references
        let selector = KeySelector::<Product>::compile(&request.path).ok();
        let entries = sorted
            .into_iter()
            .map(|product| ListingEntry {
                product,
                key: selector.as_ref().map(|s| s.key(product)),
            })
            .collect();

        Ok(Listing { entries, ordered })
    }

    /// Catalog title with the file name as fallback
    pub fn title(&self) -> String {
        let file_name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        match self.catalog.as_ref().and_then(|c| c.title.as_deref()) {
            Some(title) => format!("{} ({})", title, file_name),
            None => file_name.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_catalog(value: serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", value).unwrap();
        file
    }

    fn sample() -> serde_json::Value {
        json!({
            "title": "Kitchen",
            "products": [
                {"id": 1, "name": "Whisk"},
                {"id": 2, "name": "Ladle"},
                {"id": 3, "name": "Teapot", "sub_category": {"id": 30, "name": "Pots"}},
                {"id": 4, "name": "Colander", "sub_category": {"id": 40, "name": "Bowls"}},
                {"id": 5, "name": "Grater", "sub_category": {"id": 50, "name": "Graters"}}
            ]
        })
    }

    fn ids(listing: &Listing<'_>) -> Vec<i64> {
        listing.entries.iter().map(|e| e.product.id).collect()
    }

    #[test]
    fn test_load_and_list_in_catalog_order() {
        let file = write_catalog(sample());
        let mut state = AppState::new();
        state.load_from_file(file.path().to_path_buf()).unwrap();

        let listing = state.listing().unwrap();
        assert!(!listing.ordered);
        assert_eq!(ids(&listing), vec![1, 2, 3, 4, 5]);
        assert!(state.title().starts_with("Kitchen ("));
    }

    #[test]
    fn test_listing_sorted_by_nested_path() {
        let file = write_catalog(sample());
        let mut state = AppState::new();
        state.load_from_file(file.path().to_path_buf()).unwrap();
        state.set_sort(Some("SubCategory.Name".parse().unwrap()));

        let listing = state.listing().unwrap();
        assert!(listing.ordered);
        assert_eq!(ids(&listing), vec![1, 2, 4, 5, 3]);
        assert_eq!(listing.entries[0].key, Some(Value::Str("".into())));
        assert_eq!(listing.entries[4].key, Some(Value::Str("Pots".into())));
    }

    #[test]
    fn test_unknown_path_keeps_catalog_order() {
        let file = write_catalog(sample());
        let mut state = AppState::new();
        state.load_from_file(file.path().to_path_buf()).unwrap();
        state.set_sort(Some("Colour:desc".parse().unwrap()));

        let listing = state.listing().unwrap();
        assert!(!listing.ordered);
        assert_eq!(ids(&listing), vec![1, 2, 3, 4, 5]);
        assert!(listing.entries.iter().all(|e| e.key.is_none()));
    }

    #[test]
    fn test_load_missing_file_fails() {
        let mut state = AppState::new();
        assert!(state
            .load_from_file(PathBuf::from("/definitely/not/here.json"))
            .is_err());
        assert!(state.catalog.is_none());
        assert_eq!(state.title(), "Untitled");
    }
}
