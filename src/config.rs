use std::env;

use anyhow::Context;

const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";
const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// `APP_ENV=development` adds the error source to failure responses.
    pub development: bool,
    pub cors_allowed_origins: Vec<String>,
    pub max_body_bytes: usize,
    pub media: MediaConfig,
}

/// Settings for the hosted image-upload service.
#[derive(Debug, Clone)]
pub struct MediaConfig {
    pub api_base: String,
    pub cloud_name: String,
    pub upload_preset: String,
}

/// The only setting the `migrate` and `seed` binaries need.
pub fn database_url_from_env() -> anyhow::Result<String> {
    env::var("DATABASE_URL").context("DATABASE_URL is not set")
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = database_url_from_env()?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let development = env::var("APP_ENV")
            .map(|v| v.eq_ignore_ascii_case("development"))
            .unwrap_or(false);
        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGINS.to_string()),
        );
        let max_body_bytes = match env::var("MAX_BODY_BYTES") {
            Ok(value) => value
                .parse::<usize>()
                .with_context(|| format!("parsing MAX_BODY_BYTES value `{value}`"))?,
            Err(_) => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            port,
            database_url,
            host,
            development,
            cors_allowed_origins,
            max_body_bytes,
            media: MediaConfig::from_env()?,
        })
    }
}

impl MediaConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let cloud_name = env::var("MEDIA_CLOUD_NAME").context("MEDIA_CLOUD_NAME is not set")?;
        let upload_preset =
            env::var("MEDIA_UPLOAD_PRESET").unwrap_or_else(|_| "ml_default".to_string());
        let api_base = env::var("MEDIA_API_BASE")
            .unwrap_or_else(|_| "https://api.cloudinary.com/v1_1".to_string());
        Ok(Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            cloud_name,
            upload_preset,
        })
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| origin.trim_end_matches('/').to_string())
        .collect()
}
