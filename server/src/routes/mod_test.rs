use super::*;
use crate::state::test_helpers::test_app_state;
use axum::body::Body;
use axum::http::Request;
use tower::ServiceExt;

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn healthz_is_ok() {
    let response = api_routes(test_app_state()).oneshot(get("/healthz")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_api_path_is_not_found() {
    let response = api_routes(test_app_state()).oneshot(get("/api/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn client_routes_fall_back_to_index_html() {
    let dir = std::env::temp_dir().join(format!("storefront-static-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html>storefront</html>").unwrap();

    let router = app(test_app_state(), &dir, false);
    let response = router.oneshot(get("/orders")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"<html>storefront</html>");

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn api_paths_never_serve_index_html() {
    let dir = std::env::temp_dir().join(format!("storefront-static-api-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("index.html"), "<html></html>").unwrap();

    let response = app(test_app_state(), &dir, true).oneshot(get("/api/missing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    std::fs::remove_dir_all(&dir).ok();
}
