#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use catalog_admin_api::{
    create_app,
    db::{create_orm_conn, run_migrations},
    media::{EmbeddedImage, MediaUploader, UploadError, UploadFolder, UploadedAsset},
    routes::HttpOptions,
    state::AppState,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

pub const ALLOWED_ORIGIN: &str = "https://admin.example.com";
pub const PNG_DATA_URI: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUg==";
const BOUNDARY: &str = "catalog-test-boundary";

/// Records uploads instead of calling the media service.
pub struct FakeUploader {
    calls: AtomicUsize,
    fail: bool,
}

impl FakeUploader {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for FakeUploader {
    async fn upload(
        &self,
        image: EmbeddedImage,
        folder: UploadFolder,
    ) -> Result<UploadedAsset, UploadError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail {
            return Err(UploadError::Rejected("File size too large".to_string()));
        }
        assert!(!image.bytes.is_empty(), "uploads always carry bytes");
        Ok(UploadedAsset {
            asset_id: format!("{folder}/asset-{n}"),
            url: format!("https://res.cloudinary.test/{folder}/asset-{n}.png"),
        })
    }
}

pub struct TestContext {
    pub state: AppState,
    pub uploader: Arc<FakeUploader>,
    _dir: TempDir,
}

impl TestContext {
    pub fn app(&self) -> Router {
        self.app_with_body_limit(10 * 1024 * 1024)
    }

    pub fn app_with_body_limit(&self, max_body_bytes: usize) -> Router {
        let options = HttpOptions {
            allowed_origins: vec![ALLOWED_ORIGIN.to_string()],
            max_body_bytes,
        };
        create_app(self.state.clone(), &options).expect("router")
    }
}

pub async fn setup() -> anyhow::Result<TestContext> {
    setup_with(false).await
}

pub async fn setup_with_failing_uploads() -> anyhow::Result<TestContext> {
    setup_with(true).await
}

async fn setup_with(fail: bool) -> anyhow::Result<TestContext> {
    let dir = tempfile::tempdir()?;
    let url = format!(
        "sqlite://{}?mode=rwc",
        dir.path().join("catalog.db").display()
    );
    let orm = create_orm_conn(&url).await?;
    run_migrations(&orm).await?;

    let uploader = Arc::new(FakeUploader {
        calls: AtomicUsize::new(0),
        fail,
    });
    let state = AppState::new(orm, uploader.clone());
    Ok(TestContext {
        state,
        uploader,
        _dir: dir,
    })
}

/// Run one request through the router and decode the JSON body (`Null` if empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

/// A file part for [`multipart_request`]: (file name, content type, bytes).
pub type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

pub fn multipart_request(
    method: &str,
    uri: &str,
    fields: &[(&str, &str)],
    image: Option<FilePart<'_>>,
) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, content_type, bytes)) = image {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"image\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request")
}
