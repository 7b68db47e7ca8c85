//! Image payload handling and the hosted media upload client.
//!
//! Inbound image strings are parsed once into an [`ImageRef`]. Embedded
//! payloads are pushed to the media service and replaced by the returned URL
//! before anything reaches the store; already-stored URLs pass through.

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::config::MediaConfig;

const EMBEDDED_PREFIX: &str = "data:image";

/// Destination grouping on the media service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFolder {
    Products,
    Categories,
    Deals,
}

impl UploadFolder {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadFolder::Products => "products",
            UploadFolder::Categories => "categories",
            UploadFolder::Deals => "deals",
        }
    }
}

impl std::fmt::Display for UploadFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw image bytes that still have to be uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidDataUri(&'static str);

impl EmbeddedImage {
    pub fn new(content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Decode `data:<mime>;base64,<payload>`.
    pub fn from_data_uri(raw: &str) -> Result<Self, InvalidDataUri> {
        let rest = raw
            .strip_prefix("data:")
            .ok_or(InvalidDataUri("image is not a data URI"))?;
        let (meta, payload) = rest
            .split_once(',')
            .ok_or(InvalidDataUri("image data URI has no payload"))?;
        let content_type = meta
            .strip_suffix(";base64")
            .ok_or(InvalidDataUri("image data URI must be base64 encoded"))?;
        if content_type.is_empty() {
            return Err(InvalidDataUri("image data URI has no content type"));
        }

        let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
        let bytes = general_purpose::STANDARD
            .decode(compact)
            .map_err(|_| InvalidDataUri("image data URI is not valid base64"))?;
        if bytes.is_empty() {
            return Err(InvalidDataUri("image data URI is empty"));
        }

        Ok(Self::new(content_type, bytes))
    }

    fn file_name(&self) -> String {
        let extension = self
            .content_type
            .split_once('/')
            .map(|(_, subtype)| subtype.split(';').next().unwrap_or(subtype))
            .filter(|subtype| !subtype.is_empty())
            .unwrap_or("bin");
        format!("upload.{extension}")
    }
}

/// An image field value: either a payload to upload or a resolved URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    Embedded(EmbeddedImage),
    Stored(String),
}

impl ImageRef {
    /// Blank input means "no image" and yields `None`.
    pub fn parse(raw: &str) -> Result<Option<Self>, InvalidDataUri> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        if raw.starts_with(EMBEDDED_PREFIX) {
            return EmbeddedImage::from_data_uri(raw).map(|image| Some(ImageRef::Embedded(image)));
        }
        Ok(Some(ImageRef::Stored(raw.to_string())))
    }

    /// Upload an embedded payload; stored URLs are returned untouched.
    pub async fn resolve(
        self,
        uploader: &dyn MediaUploader,
        folder: UploadFolder,
    ) -> Result<String, UploadError> {
        match self {
            ImageRef::Stored(url) => Ok(url),
            ImageRef::Embedded(image) => Ok(uploader.upload(image, folder).await?.url),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub asset_id: String,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("media service rejected the upload: {0}")]
    Rejected(String),

    #[error("invalid image payload: {0}")]
    InvalidPayload(String),

    #[error("media service unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected media service response: {0}")]
    InvalidResponse(String),
}

/// Stores one image remotely. Not idempotent: every call creates a new asset.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    async fn upload(
        &self,
        image: EmbeddedImage,
        folder: UploadFolder,
    ) -> Result<UploadedAsset, UploadError>;
}

/// Unsigned uploads against the Cloudinary image API.
pub struct CloudinaryUploader {
    client: reqwest::Client,
    endpoint: String,
    upload_preset: String,
}

#[derive(Deserialize)]
struct UploadReply {
    secure_url: Option<String>,
    public_id: Option<String>,
    error: Option<UploadReplyError>,
}

#[derive(Deserialize)]
struct UploadReplyError {
    message: String,
}

impl CloudinaryUploader {
    pub fn new(config: &MediaConfig) -> Result<Self, UploadError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/{}/image/upload", config.api_base, config.cloud_name),
            upload_preset: config.upload_preset.clone(),
        })
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(
        &self,
        image: EmbeddedImage,
        folder: UploadFolder,
    ) -> Result<UploadedAsset, UploadError> {
        tracing::debug!(%folder, bytes = image.bytes.len(), "uploading image");

        let file_name = image.file_name();
        let part = Part::bytes(image.bytes)
            .file_name(file_name)
            .mime_str(&image.content_type)
            .map_err(|_| UploadError::InvalidPayload(image.content_type.clone()))?;
        let form = Form::new()
            .part("file", part)
            .text("upload_preset", self.upload_preset.clone())
            .text("folder", folder.as_str());

        let response = self.client.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body = response.text().await?;

        let reply: UploadReply = match serde_json::from_str(&body) {
            Ok(reply) => reply,
            Err(_) if !status.is_success() => return Err(UploadError::Rejected(status.to_string())),
            Err(err) => return Err(UploadError::InvalidResponse(err.to_string())),
        };

        if !status.is_success() {
            let message = reply
                .error
                .map(|e| e.message)
                .unwrap_or_else(|| status.to_string());
            tracing::warn!(%folder, %status, %message, "image upload rejected");
            return Err(UploadError::Rejected(message));
        }

        match (reply.public_id, reply.secure_url) {
            (Some(asset_id), Some(url)) => {
                tracing::info!(%folder, %asset_id, "image uploaded");
                Ok(UploadedAsset { asset_id, url })
            }
            _ => Err(UploadError::InvalidResponse(
                "missing secure_url or public_id".to_string(),
            )),
        }
    }
}
