use std::time::Duration;

use poem::{Server, listener::TcpListener};
use tracing::{error, info};
use weather_forecast::{
    config::Settings,
    db::{self, SqliteRepository, seed},
    error::WfError,
    startup::build_app,
    telemetry,
};

const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> Result<(), WfError> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _log_guard = telemetry::init("weather-forecast", &settings.telemetry)?;

    let pool = db::connect(&settings.database).await?;
    db::migrate(&pool).await?;
    let repository = SqliteRepository::new(pool);

    if settings.database.seed_sample_forecasts > 0 {
        seed::seed_if_empty(&repository, settings.database.seed_sample_forecasts).await?;
    }

    let app = build_app(repository, &settings.application);

    info!(
        address = %settings.application.bind_address,
        environment = ?settings.application.environment,
        "Starting weather forecast API"
    );
    Server::new(TcpListener::bind(settings.application.bind_address.clone()))
        .run_with_graceful_shutdown(
            app,
            async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!("Failed to listen for shutdown signal: {e}");
                }
                info!("Shutdown requested");
            },
            Some(SHUTDOWN_GRACE),
        )
        .await?;

    Ok(())
}
