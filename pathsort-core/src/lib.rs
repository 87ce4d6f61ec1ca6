//! Sort sequences of records by a member path chosen at run time.
//!
//! ```
//! use pathsort_core::{order_by_property, reflect_record};
//!
//! pub struct Category {
//!     pub name: String,
//! }
//!
//! pub struct Item {
//!     pub id: i64,
//!     pub category: Option<Category>,
//! }
//!
//! reflect_record!(Category { name: String });
//! reflect_record!(Item { id: i64, category: Option<Category> });
//!
//! let items = vec![
//!     Item { id: 1, category: Some(Category { name: "b".into() }) },
//!     Item { id: 2, category: None },
//!     Item { id: 3, category: Some(Category { name: "a".into() }) },
//! ];
//!
//! let ids: Vec<i64> = order_by_property(&items, "Category.Name", true)
//!     .into_iter()
//!     .map(|item| item.id)
//!     .collect();
//! assert_eq!(ids, vec![2, 3, 1]);
//! ```

// Public modules
pub mod error;
pub mod io;
pub mod models;
pub mod node;
pub mod path;
pub mod reflect;
pub mod request;
pub mod resolver;
pub mod selector;
pub mod shape;
pub mod sorting;
pub mod validation;
pub mod value;

// Re-export commonly used types for convenience
pub use error::{PathError, SortError};
pub use io::{load_catalog, load_sort_request, save_catalog};
pub use models::{Catalog, DeepCategory, Product, SubCategory, Tag};
pub use node::{build_node, AccessNode, NullGuard};
pub use path::PropertyPath;
pub use reflect::{IntoKey, Record, Reflect, Sequence};
pub use request::SortRequest;
pub use resolver::{collection_element, is_collection, resolve_member};
pub use selector::KeySelector;
pub use shape::{CollectionKind, Def, Member, MemberOrigin, ScalarKind, Shape};
pub use sorting::{order_by_property, order_by_property_with, OrderByProperty, OrderedView, SortDirection};
pub use validation::{path_is_resolvable, resolve_path, resolve_segments, ResolvedStep};
pub use value::{default_key, Value};
