use axum::http::{HeaderName, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// How long browsers may cache a preflight response.
pub const CORS_MAX_AGE: Duration = Duration::from_secs(300);

/// Creates a CORS layer that accepts any origin.
///
/// The request `Origin` is mirrored back instead of answering `*`, which is
/// what lets credentials stay allowed. Configuration:
/// - Methods: GET, POST, PUT, DELETE, OPTIONS
/// - Headers: Accept, Authorization, Content-Type, X-CSRF-Token
/// - Exposed headers: Link
/// - Credentials: allowed
/// - Max age: 300 seconds
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::ACCEPT,
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            HeaderName::from_static("x-csrf-token"),
        ])
        .expose_headers([header::LINK])
        .allow_credentials(true)
        .max_age(CORS_MAX_AGE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, http::StatusCode, routing::get};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new()
            .route("/tasks/", get(|| async { "[]" }))
            .layer(create_permissive_cors_layer())
    }

    #[tokio::test]
    async fn test_preflight_allows_any_origin_with_credentials() {
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/tasks/")
            .header("origin", "http://example.com")
            .header("access-control-request-method", "PUT")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(headers["access-control-allow-origin"], "http://example.com");
        assert_eq!(headers["access-control-allow-credentials"], "true");
        assert_eq!(headers["access-control-max-age"], "300");
        assert!(
            headers["access-control-allow-methods"]
                .to_str()
                .unwrap()
                .contains("DELETE")
        );
    }

    #[tokio::test]
    async fn test_simple_request_exposes_link_header() {
        let request = Request::builder()
            .uri("/tasks/")
            .header("origin", "http://localhost:5173")
            .body(Body::empty())
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        let headers = response.headers();

        assert_eq!(headers["access-control-allow-origin"], "http://localhost:5173");
        assert_eq!(
            headers["access-control-expose-headers"].to_str().unwrap(),
            "link"
        );
    }
}
