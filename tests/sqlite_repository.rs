use std::time::Duration;

use chrono::{TimeZone, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use weather_forecast::{
    NewForecast,
    config::DatabaseSettings,
    db::{self, Repository, SqliteRepository, seed},
    service::ForecastService,
};

async fn empty_repository() -> SqliteRepository {
    // A single connection keeps every query on the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::migrate(&pool).await.unwrap();
    SqliteRepository::new(pool)
}

#[tokio::test]
async fn empty_store_yields_no_forecasts() {
    let repository = empty_repository().await;

    assert!(repository.all_forecasts().await.unwrap().is_empty());
    assert!(repository.forecast_by_summary("Mild").await.unwrap().is_none());
    assert_eq!(repository.count_forecasts().await.unwrap(), 0);
}

#[tokio::test]
async fn insert_assigns_ids_and_all_keeps_insertion_order() {
    let repository = empty_repository().await;
    let date = Utc.with_ymd_and_hms(2022, 1, 6, 12, 18, 47).unwrap();

    let first = repository
        .insert_forecast(&NewForecast::new(date, 5, "Test1"))
        .await
        .unwrap();
    let second = repository
        .insert_forecast(&NewForecast::new(date, 10, "Test2"))
        .await
        .unwrap();

    assert!(second.id > first.id);
    assert_eq!(first.date, date);

    let all = repository.all_forecasts().await.unwrap();
    assert_eq!(all, vec![first, second]);
}

#[tokio::test]
async fn summary_lookup_is_exact_and_returns_first_match() {
    let repository = empty_repository().await;
    let date = Utc.with_ymd_and_hms(2022, 1, 6, 0, 0, 0).unwrap();
    let first = repository
        .insert_forecast(&NewForecast::new(date, 1, "Mild"))
        .await
        .unwrap();
    repository
        .insert_forecast(&NewForecast::new(date, 2, "Mild"))
        .await
        .unwrap();
    repository
        .insert_forecast(&NewForecast {
            date,
            temperature_c: 3,
            summary: None,
        })
        .await
        .unwrap();

    assert_eq!(
        repository.forecast_by_summary("Mild").await.unwrap(),
        Some(first)
    );
    assert!(repository.forecast_by_summary("Mil").await.unwrap().is_none());
    assert!(repository.forecast_by_summary("").await.unwrap().is_none());
}

#[tokio::test]
async fn service_over_sqlite_matches_store_contents() {
    let repository = empty_repository().await;
    for forecast in seed::sample_forecasts(4, Utc::now()) {
        repository.insert_forecast(&forecast).await.unwrap();
    }
    let service = ForecastService::new(repository);

    let all = service.get_all().await.unwrap();
    assert_eq!(all.len(), 4);
    for forecast in &all {
        let summary = forecast.summary.as_deref().unwrap();
        let found = service.get_by_summary(summary).await.unwrap().unwrap();
        assert_eq!(found.summary.as_deref(), Some(summary));
    }
}

#[tokio::test]
async fn seeding_only_fills_an_empty_store() {
    let repository = empty_repository().await;

    assert_eq!(seed::seed_if_empty(&repository, 5).await.unwrap(), 5);
    assert_eq!(seed::seed_if_empty(&repository, 5).await.unwrap(), 0);
    assert_eq!(repository.count_forecasts().await.unwrap(), 5);
}

#[tokio::test]
async fn connect_opens_and_migrates_a_fresh_database() {
    let settings = DatabaseSettings {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connect_retries: 0,
        max_retry_delay: Duration::from_secs(1),
        seed_sample_forecasts: 0,
    };

    let pool = db::connect(&settings).await.unwrap();
    db::migrate(&pool).await.unwrap();

    let repository = SqliteRepository::new(pool);
    assert_eq!(repository.count_forecasts().await.unwrap(), 0);
}
