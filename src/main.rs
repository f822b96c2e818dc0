use learnpath_api::{
    api::{cors_layer, create_router, AppState},
    config::Config,
    error::ArtifactError,
    repository::Catalog,
    services::Artifacts,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env()?;

    let catalog = match Catalog::from_file(&config.catalog_path) {
        Ok(catalog) => catalog,
        Err(ArtifactError::Missing(path)) => {
            tracing::warn!(path = %path, "Catalog seed not found, starting with an empty catalog");
            Catalog::default()
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load catalog: {}", e)),
    };
    tracing::info!(
        courses = catalog.course_count(),
        skills = catalog.skill_count(),
        "Catalog loaded"
    );

    // Artifacts are loaded before the listener binds
    let artifacts = Artifacts::load(&config);
    let state = AppState::in_memory(catalog, artifacts);

    let app = create_router(state).layer(cors_layer(&config.cors_origin)?);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(addr = %config.bind_addr(), "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
