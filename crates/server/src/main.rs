//! Entry point for `exovet-server`.

use exovet_server::{router, AppState, ModelHandle, ServerConfig, ServerError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "exovet_server=info,classifier_core=info,tower_http=info";

async fn serve() -> Result<(), ServerError> {
    let config = ServerConfig::from_env()?;
    let addr = config.socket_addr()?;

    let app = router(AppState::new(ModelHandle::new(config.model_path.clone())));

    tracing::info!(
        model = %config.model_path.display(),
        "exovet-server v{} listening on {}",
        env!("CARGO_PKG_VERSION"),
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .init();

    if let Err(e) = serve().await {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
