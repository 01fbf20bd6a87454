use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vidsum_web::{build_router, settings::Settings, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file (silently ignore if missing)
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "vidsum_web=debug,vidsum_core=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load()?;
    info!(
        working_dir = %settings.working_dir().display(),
        max_upload_bytes = settings.storage.max_upload_bytes,
        transcription_url = %settings.fireworks.transcription_url,
        summarization_url = %settings.fireworks.summarization_url,
        "Loaded settings"
    );

    let app_state = AppState::from_settings(&settings).await?;
    let app = build_router(app_state);

    let addr = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
