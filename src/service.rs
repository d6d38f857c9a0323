use tracing::debug;

use crate::{Forecast, db::Repository, error::WfError};

/// Pass-through queries over a [`Repository`].
///
/// A summary without a match is `Ok(None)`; an empty store is `Ok(vec![])`.
/// Neither is an error.
#[derive(Debug, Clone)]
pub struct ForecastService<R> {
    repository: R,
}

impl<R> ForecastService<R>
where
    R: Repository + Sync,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    #[tracing::instrument(name = "Fetch all forecasts", skip(self))]
    pub async fn get_all(&self) -> Result<Vec<Forecast>, WfError> {
        let forecasts = self.repository.all_forecasts().await?;
        debug!(count = forecasts.len(), "Fetched forecasts");
        Ok(forecasts)
    }

    #[tracing::instrument(name = "Fetch forecast by summary", skip(self))]
    pub async fn get_by_summary(&self, summary: &str) -> Result<Option<Forecast>, WfError> {
        let forecast = self.repository.forecast_by_summary(summary).await?;
        match &forecast {
            Some(found) => debug!("Found forecast: {found}"),
            None => debug!("No forecast matches"),
        }
        Ok(forecast)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use poem::http::StatusCode;

    use super::*;
    use crate::{NewForecast, db::memory::InMemoryRepository};

    fn two_forecasts() -> Vec<NewForecast> {
        let now = Utc::now();
        vec![
            NewForecast::new(now, 5, "Test1"),
            NewForecast::new(now, 10, "Test2"),
        ]
    }

    #[tokio::test]
    async fn get_all_returns_every_forecast_in_order() {
        let repository = InMemoryRepository::new(two_forecasts());
        let expected = repository.forecasts().to_vec();
        let service = ForecastService::new(repository);

        let result = service.get_all().await.unwrap();

        assert_eq!(result, expected);
        assert_eq!(result[0].temperature_c, 5);
        assert_eq!(result[1].summary.as_deref(), Some("Test2"));
    }

    #[tokio::test]
    async fn get_all_on_empty_store_is_empty() {
        let service = ForecastService::new(InMemoryRepository::default());
        assert!(service.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_by_summary_finds_matching_forecast() {
        let service = ForecastService::new(InMemoryRepository::new(two_forecasts()));

        let found = service.get_by_summary("Test1").await.unwrap().unwrap();

        assert_eq!(found.summary.as_deref(), Some("Test1"));
        assert_eq!(found.temperature_c, 5);
    }

    #[tokio::test]
    async fn get_by_summary_returns_first_of_duplicates() {
        let now = Utc::now();
        let service = ForecastService::new(InMemoryRepository::new(vec![
            NewForecast::new(now, 1, "Mild"),
            NewForecast::new(now, 2, "Mild"),
        ]));

        let found = service.get_by_summary("Mild").await.unwrap().unwrap();

        assert_eq!(found.id, 1);
    }

    #[tokio::test]
    async fn get_by_summary_without_match_is_none() {
        let service = ForecastService::new(InMemoryRepository::new(two_forecasts()));
        assert!(service.get_by_summary("Test3").await.unwrap().is_none());
        assert!(service.get_by_summary("test1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn repository_faults_propagate() {
        let service = ForecastService::new(InMemoryRepository::failing_with(|| {
            WfError::with_status(StatusCode::BAD_REQUEST, "bad input")
        }));

        let err = service.get_all().await.unwrap_err();

        assert!(matches!(
            err,
            WfError::Status { status, ref message }
                if status == StatusCode::BAD_REQUEST && message == "bad input"
        ));
    }
}
