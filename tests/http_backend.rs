use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use concept_studio_lib::api::{ApiError, ConceptBackend, HttpBackend};
use concept_studio_lib::models::ConceptResult;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Recorded = Arc<Mutex<Vec<Value>>>;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend(url: &str) -> HttpBackend {
    HttpBackend::new(url, None).unwrap()
}

#[tokio::test]
async fn test_generate_success() {
    let recorded: Recorded = Arc::default();
    let router = Router::new()
        .route(
            "/api/generate",
            post(|State(rec): State<Recorded>, headers: HeaderMap, Json(body): Json<Value>| async move {
                assert!(headers.contains_key("x-request-id"));
                rec.lock().unwrap().push(body.clone());
                Json(json!({
                    "prompt": body["prompt"],
                    "flowise_response": "# City\nFloats.",
                    "gemini_image_urls": ["http://x/1.png"]
                }))
            }),
        )
        .with_state(recorded.clone());
    let url = serve(router).await;

    let concept = backend(&url).generate("a floating city").await.unwrap();

    assert_eq!(concept.prompt, "a floating city");
    assert_eq!(concept.flowise_response, "# City\nFloats.");
    assert_eq!(concept.gemini_image_urls, vec!["http://x/1.png".to_string()]);
    assert_eq!(*recorded.lock().unwrap(), vec![json!({"prompt": "a floating city"})]);
}

#[tokio::test]
async fn test_generate_error_field() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({"error": "overloaded"}))) }),
    );
    let url = serve(router).await;

    let err = backend(&url).generate("x").await.unwrap_err();

    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "overloaded");
}

#[tokio::test]
async fn test_generate_prefers_details() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Failed to get valid response from Flowise",
                    "details": "Flowise request timed out (90s)"
                })),
            )
        }),
    );
    let url = serve(router).await;

    let err = backend(&url).generate("x").await.unwrap_err();

    assert_eq!(err.to_string(), "Flowise request timed out (90s)");
}

#[tokio::test]
async fn test_non_json_error_uses_status() {
    let router = Router::new().route(
        "/api/generate",
        post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
    );
    let url = serve(router).await;

    let err = backend(&url).generate("x").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 502");
}

#[tokio::test]
async fn test_malformed_success_body() {
    let router = Router::new().route("/api/generate", post(|| async { "not json" }));
    let url = serve(router).await;

    let err = backend(&url).generate("x").await.unwrap_err();

    assert!(matches!(err, ApiError::Parse(_)));
}

#[tokio::test]
async fn test_save_posts_full_concept() {
    let recorded: Recorded = Arc::default();
    let router = Router::new()
        .route(
            "/api/archive",
            post(|State(rec): State<Recorded>, Json(body): Json<Value>| async move {
                rec.lock().unwrap().push(body);
                (
                    StatusCode::CREATED,
                    Json(json!({"message": "Concept archived successfully", "id": 4})),
                )
            }),
        )
        .with_state(recorded.clone());
    let url = serve(router).await;
    let concept = ConceptResult {
        prompt: "a floating city".into(),
        flowise_response: "# City\nFloats.".into(),
        gemini_image_urls: vec!["http://x/1.png".into()],
        timestamp: None,
        id: None,
    };

    let receipt = backend(&url).save(&concept).await.unwrap();

    assert_eq!(receipt.id, Some(4));
    assert_eq!(
        *recorded.lock().unwrap(),
        vec![json!({
            "prompt": "a floating city",
            "flowise_response": "# City\nFloats.",
            "gemini_image_urls": ["http://x/1.png"]
        })]
    );
}

#[tokio::test]
async fn test_save_error_ignores_details() {
    let router = Router::new().route(
        "/api/archive",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({"details": "not shown"})),
            )
        }),
    );
    let url = serve(router).await;
    let concept = ConceptResult {
        prompt: "p".into(),
        flowise_response: "t".into(),
        gemini_image_urls: vec![],
        timestamp: None,
        id: None,
    };

    let err = backend(&url).save(&concept).await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP error! status: 400");
}

#[tokio::test]
async fn test_list_archive_preserves_order() {
    let router = Router::new().route(
        "/api/archive",
        get(|| async {
            Json(json!([
                {"id": 2, "prompt": "b", "flowise_response": "B", "gemini_image_urls": [], "timestamp": "2025-06-11 10:00:00"},
                {"id": 1, "prompt": "a", "flowise_response": null, "gemini_image_urls": ["http://x/a.png"], "timestamp": "2025-06-10 10:00:00"}
            ]))
        }),
    );
    let url = serve(router).await;

    let items = backend(&url).list_archive().await.unwrap();

    let ids: Vec<Option<i64>> = items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![Some(2), Some(1)]);
    assert_eq!(items[1].flowise_response, "");
    assert_eq!(items[0].timestamp.as_deref(), Some("2025-06-11 10:00:00"));
}

#[tokio::test]
async fn test_list_archive_error() {
    let router = Router::new().route(
        "/api/archive",
        get(|| async { (StatusCode::SERVICE_UNAVAILABLE, Json(json!({"error": "database locked"}))) }),
    );
    let url = serve(router).await;

    let err = backend(&url).list_archive().await.unwrap_err();

    assert_eq!(err.to_string(), "database locked");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = backend(&format!("http://{}", addr)).list_archive().await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
}
