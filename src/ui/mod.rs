pub mod formatting;

pub use formatting::{format_listing, format_resolution};
