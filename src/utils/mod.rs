// URL handling utilities
pub mod url_encoding;
pub mod query_string;

// Parsing utilities
pub mod is_uuid;

// Display utilities
pub mod json_converter;
pub mod status_formatter;

pub mod random_name;

// Re-export all utilities for convenient access
pub use url_encoding::encode_path_segment;
pub use query_string::build_query_string;
pub use is_uuid::is_uuid;
pub use json_converter::value_to_short_string;
pub use status_formatter::format_state;
pub use random_name::random_name;
