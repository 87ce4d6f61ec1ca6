use pathsort_core::*;
use std::fmt::Write;

use crate::state::{Listing, ListingEntry};

/// Outcome of checking a sort path against `Product`
#[derive(Debug)]
pub struct ResolutionReport {
    pub text: String,
    pub resolved: bool,
}

/// Render the listing as Markdown
pub fn format_listing(title: &str, sort: Option<&SortRequest>, listing: &Listing<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", title);

    if let Some(request) = sort {
        if listing.ordered {
            let _ = writeln!(out, "**Sorted by:** {}\n", request);
        } else {
            let _ = writeln!(out, "**Sorted by:** {} _(unresolved, catalog order kept)_\n", request);
        }
    }

    let _ = writeln!(out, "**Products:** {}\n", listing.entries.len());

    if listing.entries.is_empty() {
        let _ = writeln!(out, "_No products in catalog._");
        return out;
    }

    for entry in &listing.entries {
        let _ = writeln!(out, "{}", format_entry(entry));
    }

    out
}

/// One Markdown list line for a product
pub fn format_entry(entry: &ListingEntry<'_>) -> String {
    let product = entry.product;
    let mut line = format!("- **{}** #{}", product.name, product.id);

    if let Some(category) = product.category_name() {
        let _ = write!(line, " in {}", category);
    }

    if let Some(key) = &entry.key {
        let _ = write!(line, " (key: {})", format_key(key));
    }

    line
}

/// Display a sort key, marking null and empty keys
pub fn format_key(key: &Value<'_>) -> String {
    match key {
        Value::Null => "_null_".to_string(),
        Value::Str(s) if s.is_empty() => "\"\"".to_string(),
        Value::Str(s) => format!("\"{}\"", s),
        other => other.to_string(),
    }
}

/// Describe how each segment of `path` resolves on `Product`
pub fn format_resolution(path: &str) -> ResolutionReport {
    let mut text = String::new();
    let _ = writeln!(text, "# Path: {}\n", path);

    match resolve_path(&Product::shape(), path) {
        Ok(steps) => {
            for (depth, step) in steps.iter().enumerate() {
                let via = if step.through_collection {
                    " (first element)"
                } else {
                    ""
                };
                let origin = match step.member.origin {
                    MemberOrigin::Property => "property",
                    MemberOrigin::Field => "field",
                };
                let _ = writeln!(
                    text,
                    "{}. {}{}.{}: {} {}",
                    depth + 1,
                    step.owner.non_null(),
                    via,
                    step.member.name,
                    origin,
                    step.member.declared_shape()
                );
            }
            if let Ok(selector) = KeySelector::<Product>::compile(path) {
                let _ = writeln!(text, "\n**Key type:** {}", selector.leaf_shape());
            }
            ResolutionReport { text, resolved: true }
        }
        Err(err) => {
            let _ = writeln!(text, "**Unresolved:** {}", err);
            ResolutionReport {
                text,
                resolved: false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str) -> Product {
        Product {
            id,
            name: name.to_string(),
            price: 0.0,
            released: None,
            sub_category: Some(SubCategory {
                id: 1,
                name: "Cups".to_string(),
                deep_category: None,
            }),
            list_sub_category: Vec::new(),
            tags: Vec::new(),
            attributes: serde_json::Value::Null,
        }
    }

    #[test]
    fn test_format_key() {
        assert_eq!(format_key(&Value::Null), "_null_");
        assert_eq!(format_key(&Value::Str("".into())), "\"\"");
        assert_eq!(format_key(&Value::Str("Mug".into())), "\"Mug\"");
        assert_eq!(format_key(&Value::Int(7)), "7");
    }

    #[test]
    fn test_format_entry() {
        let item = product(3, "Mug");
        let entry = ListingEntry {
            product: &item,
            key: Some(Value::Int(3)),
        };
        assert_eq!(format_entry(&entry), "- **Mug** #3 in Cups (key: 3)");
    }

    #[test]
    fn test_format_listing_marks_unresolved_sort() {
        let item = product(1, "Mug");
        let listing = Listing {
            entries: vec![ListingEntry {
                product: &item,
                key: None,
            }],
            ordered: false,
        };
        let request = SortRequest::new("Colour", SortDirection::Ascending);

        let text = format_listing("Kitchen", Some(&request), &listing);
        assert!(text.starts_with("# Kitchen\n"));
        assert!(text.contains("unresolved"));
        assert!(text.contains("**Products:** 1"));
    }

    #[test]
    fn test_format_resolution_through_collection() {
        let report = format_resolution("ListSubCategory.DeepCategory.Name");
        assert!(report.resolved);
        assert!(report.text.contains("1. Product.list_sub_category: field"));
        assert!(report.text.contains("SubCategory (first element).deep_category"));
        assert!(report.text.contains("**Key type:** String"));
    }

    #[test]
    fn test_format_resolution_unknown_member() {
        let report = format_resolution("SubCategory.Colour");
        assert!(!report.resolved);
        assert!(report.text.contains("Unresolved"));
    }
}
