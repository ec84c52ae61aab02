//! OpenAPI documentation configuration

use utoipa::{Modify, OpenApi};

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Tasks API",
        version = "0.1.0",
        description = "CRUD service for task records backed by PostgreSQL"
    ),
    servers(
        (url = "http://localhost:8056", description = "Local development server")
    ),
    modifiers(&DomainDocs)
)]
pub struct ApiDoc;

/// Pulls in domain documents. Their routes are mounted at the root, so
/// paths are merged as-is rather than nested.
struct DomainDocs;

impl Modify for DomainDocs {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_tasks::handlers::ApiDoc::openapi());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_paths_are_documented() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/tasks/"));
        assert!(doc.paths.paths.contains_key("/tasks/{id}"));
        assert_eq!(doc.info.title, "Tasks API");
    }
}
