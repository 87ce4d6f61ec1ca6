pub mod error_mapper;

pub use error_mapper::{map_catalog_load_error, map_catalog_save_error, map_sort_file_error};
