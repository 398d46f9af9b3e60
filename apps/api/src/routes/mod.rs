pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/roles", get(handlers::handle_list_roles))
        // Trailing-slash form is what existing frontends post to.
        .route("/analyze_resume/", post(handlers::handle_analyze_resume))
        .route("/analyze_resume", post(handlers::handle_analyze_resume))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::catalog::RoleCatalog;
    use crate::analysis::fixtures::minimal_pdf;
    use crate::config::Config;

    const BOUNDARY: &str = "analyzer-test-boundary";

    fn test_state() -> AppState {
        test_state_with_limit(1024 * 1024)
    }

    fn test_state_with_limit(max_upload_bytes: usize) -> AppState {
        AppState {
            config: Config {
                port: 0,
                rust_log: "info".to_string(),
                role_catalog_path: None,
                max_upload_bytes,
            },
            catalog: Arc::new(
                RoleCatalog::from_roles([
                    ("backend", vec!["python", "sql"]),
                    ("frontend", vec!["react", "css"]),
                ])
                .unwrap(),
            ),
        }
    }

    fn multipart_request(field: &str, payload: &[u8]) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{field}\"; filename=\"resume.pdf\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/analyze_resume/")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_reports_catalog_size() {
        let response = build_router(test_state())
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["roles"], 2);
    }

    #[tokio::test]
    async fn test_roles_lists_catalog() {
        let response = build_router(test_state())
            .oneshot(Request::get("/roles").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["backend"], serde_json::json!(["python", "sql"]));
        assert_eq!(body["frontend"], serde_json::json!(["react", "css"]));
    }

    #[tokio::test]
    async fn test_non_pdf_upload_is_decode_error() {
        let response = build_router(test_state())
            .oneshot(multipart_request("file", b"hello, i am plain text"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "PDF_DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_empty_upload_is_decode_error() {
        let response = build_router(test_state())
            .oneshot(multipart_request("file", b""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "PDF_DECODE_ERROR");
    }

    #[tokio::test]
    async fn test_missing_file_field_is_validation_error() {
        let response = build_router(test_state())
            .oneshot(multipart_request("attachment", b"%PDF-1.4"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_upload_returns_analysis() {
        let pdf = minimal_pdf("Experienced in Python and SQL development");
        let response = build_router(test_state())
            .oneshot(multipart_request("file", &pdf))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body,
            serde_json::json!({
                "matched_keywords": {"backend": ["python", "sql"]},
                "role_percentages": [["backend", 100.0]],
                "best_role": ["backend", 100.0]
            })
        );
    }

    #[tokio::test]
    async fn test_oversized_upload_is_413() {
        let response = build_router(test_state_with_limit(64))
            .oneshot(multipart_request("file", &[b'x'; 4096]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }
}
