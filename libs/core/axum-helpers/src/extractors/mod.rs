//! Custom extractors for request parsing.

pub mod json_body;

pub use json_body::JsonBody;
