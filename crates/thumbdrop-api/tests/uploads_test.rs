mod helpers;

use helpers::fixtures::{create_test_png, file_form};
use helpers::setup_test_app;
use thumbdrop_storage::Storage;

#[tokio::test]
async fn test_serves_uploaded_file_with_content_type() {
    let app = setup_test_app();
    let png = create_test_png(12, 12);

    let response = app
        .client()
        .post("/uploadSingle")
        .multipart(file_form("picture", "tiny.png", "image/png", png.clone()))
        .await;
    assert_eq!(response.status_code(), 200);

    let served = app
        .client()
        .get(&format!("/uploads/{}", app.stored("tiny.png")))
        .await;

    assert_eq!(served.status_code(), 200);
    assert_eq!(served.header("content-type"), "image/png");
    assert_eq!(served.as_bytes().to_vec(), png);
}

#[tokio::test]
async fn test_unknown_extension_is_octet_stream() {
    let app = setup_test_app();
    app.storage.write("1-data.bin", b"raw".to_vec()).await.unwrap();

    let served = app.client().get("/uploads/1-data.bin").await;

    assert_eq!(served.status_code(), 200);
    assert_eq!(served.header("content-type"), "application/octet-stream");
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let app = setup_test_app();

    let response = app.client().get("/uploads/nothing-here.png").await;

    assert_eq!(response.status_code(), 404);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_encoded_traversal_is_rejected() {
    let app = setup_test_app();

    let response = app
        .client()
        .get("/uploads/a%2F..%2F..%2Fsecret.txt")
        .await;

    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_health_reports_storage_backend() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert_eq!(body, serde_json::json!({"status": "healthy", "storage": "memory"}));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = setup_test_app();

    let response = app.client().get("/api/openapi.json").await;

    assert_eq!(response.status_code(), 200);
    let body: serde_json::Value = response.json();
    assert!(body["paths"].get("/uploadSingle").is_some());
    assert!(body["paths"].get("/uploadSingleOrZip").is_some());
}
