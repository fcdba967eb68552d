use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use service::store::PayloadStore;

/// Fixed response bodies; the HTTP status is 200 for all of them.
pub const PAYLOAD_SET: &str = "Set the payload.";
pub const ID_STORED: &str = "ID is stored.";
pub const ID_NOT_STORED: &str = "ID not stored.";

/// Replace the stored payload with the request body.
/// Any JSON shape is accepted; nothing is validated.
async fn set_payload(
    State(store): State<Arc<PayloadStore>>,
    Json(payload): Json<Value>,
) -> &'static str {
    store.replace(payload).await;
    PAYLOAD_SET
}

/// Answer whether the path segment equals the string form of the `id`
/// field of the stored payload. Always 200; never an error.
async fn check_id(State(store): State<Arc<PayloadStore>>, Path(id): Path<String>) -> &'static str {
    if store.matches_id(&id).await {
        ID_STORED
    } else {
        ID_NOT_STORED
    }
}

/// Build the application router: the two routes, CORS, and request tracing.
pub fn build_router(store: Arc<PayloadStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/", post(set_payload))
        .route("/:id", get(check_id))
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::json;
    use tower::ServiceExt;

    fn app(store: Arc<PayloadStore>) -> Router {
        build_router(store, CorsLayer::very_permissive())
    }

    fn post_root(body: &Value) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), 1024).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn post_sets_payload_and_confirms() {
        let store = PayloadStore::new();
        let res = app(store.clone()).oneshot(post_root(&json!({"id": "7"}))).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, PAYLOAD_SET);
        assert_eq!(store.snapshot().await, Some(json!({"id": "7"})));
    }

    #[tokio::test]
    async fn get_answers_from_store() {
        let store = PayloadStore::new();
        store.replace(json!({"id": "7"})).await;

        let res = app(store.clone())
            .oneshot(Request::get("/7").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, ID_STORED);

        let res = app(store)
            .oneshot(Request::get("/8").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(body_text(res).await, ID_NOT_STORED);
    }

    #[tokio::test]
    async fn malformed_json_is_rejected_and_store_untouched() {
        let store = PayloadStore::new();
        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let res = app(store.clone()).oneshot(req).await.unwrap();
        assert!(res.status().is_client_error());
        assert_eq!(store.snapshot().await, None);
    }

    #[tokio::test]
    async fn get_on_root_is_method_not_allowed() {
        let store = PayloadStore::new();
        let res = app(store)
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
