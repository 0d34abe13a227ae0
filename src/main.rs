use std::path::Path;
use std::sync::Arc;

use inventario_sicurezza::config::AppConfig;
use inventario_sicurezza::{build_router, AppState};

fn setup_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = AppConfig::load_with_env_file(Path::new(".env"));
    setup_tracing();

    tracing::info!(
        host = %config.host,
        port = config.port,
        productos = %config.productos_path.display(),
        ventas = %config.ventas_path.display(),
        "iniciando API Inventario Sicurezza"
    );

    let state = Arc::new(AppState::new(&config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    axum::serve(listener, app).await
}
