pub mod file_ops;
pub mod validation;

pub use file_ops::{resolve_sort_request, write_sorted_catalog};
