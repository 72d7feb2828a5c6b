use anyhow::Context;
use quiz_backend::{app, db, AppState, Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    // 数据库连接池
    let pool = db::init_db(&config)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;
    let app = app(AppState { pool }, &config);

    let listener = tokio::net::TcpListener::bind(config.socket_addr())
        .await
        .with_context(|| format!("failed to bind {}", config.socket_addr()))?;
    tracing::info!("Server running on: {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
