use crate::error::PathError;
use crate::path::PropertyPath;
use crate::resolver::{collection_element, resolve_member};
use crate::shape::{Member, Shape};

/// One segment of a path, resolved against the type it was looked up on
#[derive(Debug, Clone, Copy)]
pub struct ResolvedStep {
    /// Type the member was found on
    pub owner: Shape,
    pub member: Member,
    /// Whether the owner was reached by stepping into a collection's elements
    pub through_collection: bool,
}

/// Check whether `path` resolves against `shape` without raising
pub fn path_is_resolvable(shape: &Shape, path: Option<&str>) -> bool {
    match path {
        Some(path) => resolve_path(shape, path).is_ok(),
        None => false,
    }
}

/// Resolve every segment of `path`, failing on the first unknown member
///
/// When the current type is collection-like its element type is used
/// before resolving the next segment.
pub fn resolve_path(shape: &Shape, path: &str) -> Result<Vec<ResolvedStep>, PathError> {
    let path = PropertyPath::parse(path)?;
    resolve_segments(shape, &path.segments)
}

pub fn resolve_segments(shape: &Shape, segments: &[String]) -> Result<Vec<ResolvedStep>, PathError> {
    if segments.is_empty() {
        return Err(PathError::Empty);
    }

    let mut steps = Vec::with_capacity(segments.len());
    let mut current = *shape;

    for segment in segments {
        let element = collection_element(&current);
        let through_collection = element.is_some();
        if let Some(element) = element {
            current = element;
        }

        let member = resolve_member(&current, segment).ok_or_else(|| PathError::UnknownMember {
            segment: segment.clone(),
            type_name: current.non_null().type_name,
        })?;

        steps.push(ResolvedStep {
            owner: current,
            member,
            through_collection,
        });
        current = member.declared_shape();
    }

    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::Reflect;

    #[test]
    fn test_single_segment_resolves() {
        assert!(path_is_resolvable(&Product::shape(), Some("Id")));
        assert!(path_is_resolvable(&Product::shape(), Some("name")));
    }

    #[test]
    fn test_nested_and_collection_paths_resolve() {
        let shape = Product::shape();

        assert!(path_is_resolvable(&shape, Some("SubCategory.Name")));
        assert!(path_is_resolvable(&shape, Some("ListSubCategory.DeepCategory.Name")));

        let steps = resolve_path(&shape, "ListSubCategory.DeepCategory.Name").unwrap();
        let names: Vec<_> = steps.iter().map(|s| s.member.name).collect();
        assert_eq!(names, vec!["list_sub_category", "deep_category", "name"]);
        assert!(!steps[0].through_collection);
        assert!(steps[1].through_collection);
        assert_eq!(steps[1].owner.type_name, "SubCategory");
    }

    #[test]
    fn test_unresolvable_paths() {
        let shape = Product::shape();

        assert!(!path_is_resolvable(&shape, Some("Unknown")));
        assert!(!path_is_resolvable(&shape, Some("SubCategory.Unknown")));
        assert!(!path_is_resolvable(&shape, Some("")));
        assert!(!path_is_resolvable(&shape, None));
        assert!(!path_is_resolvable(&shape, Some("Name.Length")));
    }

    #[test]
    fn test_error_names_failing_segment() {
        let err = resolve_path(&Product::shape(), "SubCategory.Colour").unwrap_err();
        assert_eq!(
            err,
            PathError::UnknownMember {
                segment: "Colour".to_string(),
                type_name: "SubCategory"
            }
        );
    }
}
