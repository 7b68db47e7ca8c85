use std::{net::SocketAddr, sync::Arc};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_admin_api::{
    config::AppConfig,
    create_app,
    db::{create_orm_conn, run_migrations},
    error::set_expose_details,
    media::CloudinaryUploader,
    routes::HttpOptions,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_admin_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    set_expose_details(config.development);

    let orm = create_orm_conn(&config.database_url).await?;
    run_migrations(&orm).await?;

    let media = Arc::new(CloudinaryUploader::new(&config.media)?);
    let state = AppState::new(orm, media);

    let options = HttpOptions {
        allowed_origins: config.cors_allowed_origins.clone(),
        max_body_bytes: config.max_body_bytes,
    };
    let app = create_app(state, &options)?;

    let addr = SocketAddr::from((config.host.parse::<std::net::IpAddr>()?, config.port));
    tracing::info!(
        development = config.development,
        origins = ?config.cors_allowed_origins,
        "listening on {}",
        addr
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app).await?;

    Ok(())
}
