use std::sync::{Arc, Mutex};

use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
use pos_receipt::{AuthToken, ImageError, ImageSource, SignedImageClient, SignedImageConfig};
use serde_json::{json, Value};
use tokio::net::TcpListener;

/// A signing request as the endpoint saw it.
#[derive(Debug, Clone)]
struct SeenRequest {
    authorization: Option<String>,
    body: Value,
}

struct Endpoint {
    status: StatusCode,
    response: Value,
    seen: Mutex<Vec<SeenRequest>>,
}

async fn sign(
    State(endpoint): State<Arc<Endpoint>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let authorization = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    endpoint
        .seen
        .lock()
        .unwrap()
        .push(SeenRequest { authorization, body });
    (endpoint.status, Json(endpoint.response.clone()))
}

/// Serve the signing route on a loopback port with a canned reply.
async fn spawn_endpoint(status: StatusCode, response: Value) -> (String, Arc<Endpoint>) {
    let endpoint = Arc::new(Endpoint {
        status,
        response,
        seen: Mutex::new(Vec::new()),
    });
    let app = Router::new()
        .route("/api/imagekit/signed-url", post(sign))
        .with_state(endpoint.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    (format!("http://{addr}"), endpoint)
}

fn client(base_url: &str) -> SignedImageClient {
    let config = SignedImageConfig {
        base_url: base_url.to_string(),
        ..SignedImageConfig::default()
    };
    SignedImageClient::new(&config, AuthToken::new("pos-token-123")).expect("client")
}

#[tokio::test]
async fn signs_file_path_with_bearer_token() {
    let (base_url, endpoint) = spawn_endpoint(
        StatusCode::OK,
        json!({ "signedUrl": "https://cdn.example/latte.jpg?sig=abc" }),
    )
    .await;

    let source = client(&base_url)
        .resolve(Some("/products/latte.jpg"), Some("https://static.example/latte.jpg"))
        .await;
    assert_eq!(
        source,
        ImageSource::Signed("https://cdn.example/latte.jpg?sig=abc".to_string())
    );

    let seen = endpoint.seen.lock().unwrap().clone();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].authorization.as_deref(), Some("Bearer pos-token-123"));
    assert_eq!(seen[0].body, json!({ "filePath": "/products/latte.jpg" }));
}

#[tokio::test]
async fn trailing_slash_in_base_url_hits_the_same_route() {
    let (base_url, endpoint) =
        spawn_endpoint(StatusCode::OK, json!({ "signedUrl": "https://cdn.example/a.jpg" })).await;

    let url = client(&format!("{base_url}/"))
        .request_signed_url("/a.jpg")
        .await
        .expect("signed url");
    assert_eq!(url, "https://cdn.example/a.jpg");
    assert_eq!(endpoint.seen.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_request_uses_fallback_url() {
    let (base_url, _) =
        spawn_endpoint(StatusCode::UNAUTHORIZED, json!({ "error": "expired" })).await;
    let client = client(&base_url);

    let err = client
        .request_signed_url("/products/latte.jpg")
        .await
        .expect_err("401");
    assert!(matches!(err, ImageError::Status(401)));

    let source = client
        .resolve(Some("/products/latte.jpg"), Some("https://static.example/latte.jpg"))
        .await;
    assert_eq!(
        source,
        ImageSource::Fallback("https://static.example/latte.jpg".to_string())
    );
}

#[tokio::test]
async fn failure_without_fallback_is_placeholder() {
    let (base_url, _) = spawn_endpoint(StatusCode::INTERNAL_SERVER_ERROR, json!({})).await;
    let source = client(&base_url).resolve(Some("/products/latte.jpg"), None).await;
    assert_eq!(source, ImageSource::Placeholder);
}

#[tokio::test]
async fn empty_signed_url_is_not_an_image() {
    let (base_url, _) = spawn_endpoint(StatusCode::OK, json!({ "signedUrl": "" })).await;
    let client = client(&base_url);
    assert!(matches!(
        client.request_signed_url("/a.jpg").await,
        Err(ImageError::EmptyUrl)
    ));
    assert_eq!(client.resolve(Some("/a.jpg"), None).await, ImageSource::Placeholder);
}

#[tokio::test]
async fn unreachable_endpoint_uses_fallback_url() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let source = client(&format!("http://{addr}"))
        .resolve(Some("/a.jpg"), Some("https://static.example/a.jpg"))
        .await;
    assert_eq!(source, ImageSource::Fallback("https://static.example/a.jpg".to_string()));
}

#[tokio::test]
async fn no_file_path_skips_the_endpoint() {
    let (base_url, endpoint) =
        spawn_endpoint(StatusCode::OK, json!({ "signedUrl": "https://x" })).await;
    let client = client(&base_url);

    assert_eq!(
        client.resolve(None, Some("https://static.example/a.jpg")).await,
        ImageSource::Fallback("https://static.example/a.jpg".to_string())
    );
    assert_eq!(client.resolve(Some(""), None).await, ImageSource::Placeholder);
    assert_eq!(client.resolve(None, Some("")).await, ImageSource::Placeholder);
    assert!(endpoint.seen.lock().unwrap().is_empty());
}
