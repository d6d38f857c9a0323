use std::{str::FromStr, time::Duration};

use sqlx::{
    SqlitePool,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};
use tracing::{info, warn};

use crate::{Forecast, NewForecast, config::DatabaseSettings, error::WfError};

pub mod memory;
pub mod seed;

const INITIAL_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Read access to the persisted forecasts.
pub trait Repository {
    /// Every forecast in insertion order.
    fn all_forecasts(&self) -> impl Future<Output = Result<Vec<Forecast>, WfError>> + Send;

    /// First forecast whose summary equals `summary` exactly.
    fn forecast_by_summary(
        &self,
        summary: &str,
    ) -> impl Future<Output = Result<Option<Forecast>, WfError>> + Send;
}

#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

impl SqliteRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert_forecast(&self, forecast: &NewForecast) -> Result<Forecast, WfError> {
        let inserted = sqlx::query_as::<_, Forecast>(
            "INSERT INTO weather_forecasts (date, temperature_c, summary) \
             VALUES (?, ?, ?) \
             RETURNING id, date, temperature_c, summary",
        )
        .bind(forecast.date)
        .bind(forecast.temperature_c)
        .bind(forecast.summary.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(inserted)
    }

    pub async fn count_forecasts(&self) -> Result<i64, WfError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM weather_forecasts")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

impl Repository for SqliteRepository {
    async fn all_forecasts(&self) -> Result<Vec<Forecast>, WfError> {
        let forecasts = sqlx::query_as::<_, Forecast>(
            "SELECT id, date, temperature_c, summary FROM weather_forecasts ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(forecasts)
    }

    async fn forecast_by_summary(&self, summary: &str) -> Result<Option<Forecast>, WfError> {
        let forecast = sqlx::query_as::<_, Forecast>(
            "SELECT id, date, temperature_c, summary FROM weather_forecasts \
             WHERE summary = ? ORDER BY id LIMIT 1",
        )
        .bind(summary)
        .fetch_optional(&self.pool)
        .await?;
        Ok(forecast)
    }
}

/// Opens the pool, retrying with exponential backoff while the store is unreachable.
pub async fn connect(settings: &DatabaseSettings) -> Result<SqlitePool, WfError> {
    let options = SqliteConnectOptions::from_str(&settings.url)?.create_if_missing(true);
    let mut delay = INITIAL_RETRY_DELAY.min(settings.max_retry_delay);
    let mut attempt = 0;

    loop {
        match SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => {
                info!(url = %settings.url, "Connected to forecast store");
                return Ok(pool);
            }
            Err(e) if attempt < settings.connect_retries => {
                attempt += 1;
                warn!(
                    attempt,
                    retry_in_secs = delay.as_secs(),
                    "Failed to connect to forecast store: {e}"
                );
                tokio::time::sleep(delay).await;
                delay = next_retry_delay(delay, settings.max_retry_delay);
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn next_retry_delay(delay: Duration, cap: Duration) -> Duration {
    delay.saturating_mul(2).min(cap)
}

pub async fn migrate(pool: &SqlitePool) -> Result<(), WfError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
