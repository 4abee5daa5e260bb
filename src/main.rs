use std::sync::Arc;

use movie_catalog::{AppState, app, config::Config, db};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,movie_catalog=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Arc::new(Config::from_env()?);

    let conn = db::connect_and_migrate(&config.database_url).await?;
    if config.seed_demo_movies {
        db::seed_demo_movies(&conn).await?;
    }

    let state = Arc::new(AppState::new(config.clone(), conn));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app(state)).await?;

    Ok(())
}
