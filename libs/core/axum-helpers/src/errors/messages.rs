//! Client-facing messages shared across services.

pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
pub const NOT_FOUND_ROUTE: &str = "Not found";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
