use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::{routes, shared, system};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| {
                // Keep SQL chatter out of the application log
                "info,sqlx=warn,sea_orm=warn".into()
            }),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    let config = shared::config::load_config()?;
    shared::config::set_environment(&config.environment);

    let db_path = shared::config::get_database_path(&config)?;
    shared::data::db::initialize_database(Some(&db_path.to_string_lossy()))
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    system::initialization::ensure_admin_user_exists().await?;

    let app = routes::configure_app();

    let addr: SocketAddr = ([0, 0, 0, 0], config.server.port).into();

    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) if e.kind() == std::io::ErrorKind::AddrInUse => {
            tracing::error!(
                "port {} is already taken; stop the other process or change [server].port",
                config.server.port
            );
            return Err(e.into());
        }
        Err(e) => {
            tracing::error!("could not bind {}: {}", addr, e);
            return Err(e.into());
        }
    };

    tracing::info!("listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
