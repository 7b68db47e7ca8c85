mod common;

use axum::http::StatusCode;
use common::{PNG_DATA_URI, empty_request, json_request, multipart_request, send, setup};
use serde_json::json;
use uuid::Uuid;

const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

#[tokio::test]
async fn create_with_name_only() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        multipart_request("POST", "/api/category", &[("name", "Electronics")], None),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["name"], "Electronics");
    assert_eq!(body["data"]["description"], "");
    assert!(body["data"].get("image").is_none());
    assert!(body["data"]["createdAt"].is_string());
    assert_eq!(ctx.uploader.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn long_names_are_accepted() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let name = "c".repeat(300);

    let (status, body) = send(
        &ctx.app(),
        multipart_request("POST", "/api/category", &[("name", name.as_str())], None),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["name"], name.as_str());
    Ok(())
}

#[tokio::test]
async fn image_file_is_uploaded_and_asset_id_kept() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            "/api/category",
            &[("name", "Garden"), ("description", "Outdoor things")],
            Some(("garden.png", "image/png", PNG_BYTES)),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let image = &body["data"]["image"];
    assert_eq!(image["assetId"], "categories/asset-1");
    assert_eq!(image["url"], "https://res.cloudinary.test/categories/asset-1.png");
    assert_eq!(ctx.uploader.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn empty_file_part_means_no_image() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        multipart_request(
            "POST",
            "/api/category",
            &[("name", "Toys")],
            Some(("", "application/octet-stream", b"")),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["data"].get("image").is_none());
    assert_eq!(ctx.uploader.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn missing_name_is_rejected_without_writing() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        multipart_request("POST", "/api/category", &[("description", "x")], None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Category name is required");

    // JSON is not a form.
    let (status, body) = send(
        &app,
        json_request("POST", "/api/category", json!({"name": "Books"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);

    let (_, body) = send(&app, empty_request("GET", "/api/category")).await;
    assert_eq!(body["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn list_is_newest_first_and_searchable() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    for name in ["Kitchen", "Garden", "Kitchenware"] {
        let (status, _) = send(
            &app,
            multipart_request("POST", "/api/category", &[("name", name)], None),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let (status, body) = send(&app, empty_request("GET", "/api/category")).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|c| c["name"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["Kitchenware", "Garden", "Kitchen"]);

    let (_, body) = send(&app, empty_request("GET", "/api/category?search=KITCHEN")).await;
    assert_eq!(body["data"].as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn update_get_and_delete_by_id() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (_, created) = send(
        &app,
        multipart_request(
            "POST",
            "/api/category",
            &[("name", "Audio"), ("description", "Speakers")],
            None,
        ),
    )
    .await;
    let id = created["data"]["id"].as_str().expect("id").to_string();
    let uri = format!("/api/category/{id}");

    let (status, body) = send(
        &app,
        multipart_request("PUT", &uri, &[("image", PNG_DATA_URI)], None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Audio");
    assert_eq!(body["data"]["description"], "Speakers");
    assert!(
        body["data"]["image"]["url"]
            .as_str()
            .is_some_and(|url| url.starts_with("https://"))
    );

    let (status, fetched) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], body["data"]);

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id.as_str());

    let (status, body) = send(&app, empty_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Category not found");

    let (status, _) = send(&app, empty_request("GET", &uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_and_unknown_ids() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (status, body) = send(
        &app,
        multipart_request("PUT", "/api/category/123", &[("name", "X")], None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid category ID");

    let missing = format!("/api/category/{}", Uuid::new_v4());
    let (status, body) = send(
        &app,
        multipart_request("PUT", &missing, &[("name", "X")], None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    Ok(())
}

#[tokio::test]
async fn deleting_a_category_leaves_product_references() -> anyhow::Result<()> {
    let ctx = setup().await?;
    let app = ctx.app();

    let (_, category) = send(
        &app,
        multipart_request("POST", "/api/category", &[("name", "Lighting")], None),
    )
    .await;
    let category_id = category["data"]["id"].as_str().expect("id").to_string();

    let (status, product) = send(
        &app,
        json_request(
            "POST",
            "/api/products",
            json!({
                "name": "Floor Lamp",
                "description": "Tall",
                "price": 80,
                "categories": [category_id],
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let product_id = product["data"]["id"].as_str().expect("id").to_string();

    let (status, _) = send(
        &app,
        empty_request("DELETE", &format!("/api/category/{category_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        empty_request("GET", &format!("/api/products/{product_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["categories"], json!([category_id]));
    Ok(())
}
