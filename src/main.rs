use jobly_api::{
    app, ensure_database_exists, ensure_tables, validate_column_maps, AppState, PasswordHasher,
    Settings, TokenIssuer, ALL_COLUMN_MAPS,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jobly_api=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");
    validate_column_maps(ALL_COLUMN_MAPS)?;

    ensure_database_exists(&settings.database_url).await?;
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;
    ensure_tables(&pool).await?;

    let state = AppState {
        pool,
        tokens: Arc::new(TokenIssuer::new(
            settings.secret_key.as_bytes(),
            chrono::Duration::seconds(settings.token_ttl_secs),
        )),
        passwords: PasswordHasher::new(settings.bcrypt_work_factor),
    };

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("jobly-api listening on http://0.0.0.0:{}", port);
    axum::serve(listener, app(state, settings.body_limit_bytes)).await?;
    Ok(())
}
