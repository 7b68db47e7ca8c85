//! Development mode flips a process-wide flag, so it gets its own test binary.

mod common;

use axum::http::StatusCode;
use catalog_admin_api::error::set_expose_details;
use common::{PNG_DATA_URI, json_request, send, setup_with_failing_uploads};
use serde_json::json;

#[tokio::test]
async fn development_mode_exposes_error_detail() -> anyhow::Result<()> {
    set_expose_details(true);
    let ctx = setup_with_failing_uploads().await?;

    let (status, body) = send(
        &ctx.app(),
        json_request(
            "POST",
            "/api/products",
            json!({
                "name": "Poster",
                "description": "A3",
                "price": 12,
                "categories": ["art"],
                "image": PNG_DATA_URI,
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to upload image");
    assert_eq!(
        body["detail"],
        "media service rejected the upload: File size too large"
    );

    // Client errors never carry detail.
    let (status, body) = send(
        &ctx.app(),
        json_request("POST", "/api/products", json!({"name": "Poster"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.get("detail").is_none());
    Ok(())
}
