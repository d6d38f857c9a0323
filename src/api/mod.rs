use chrono::{DateTime, Utc};
use forecast_response::ForecastApiResponse;
use poem_openapi::{Object, OpenApi, param::Path, payload::Json};

use crate::{Forecast, db::Repository, service::ForecastService};

pub mod fault;
mod forecast_response;

/// Wire form of a [`Forecast`].
#[derive(Debug, Clone, PartialEq, Object)]
#[oai(rename_all = "camelCase")]
pub struct ForecastDto {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub temperature_c: i32,
    pub temperature_f: i32,
    pub summary: Option<String>,
}

impl From<Forecast> for ForecastDto {
    fn from(forecast: Forecast) -> Self {
        Self {
            temperature_f: forecast.temperature_f(),
            id: forecast.id,
            date: forecast.date,
            temperature_c: forecast.temperature_c,
            summary: forecast.summary,
        }
    }
}

pub struct ForecastApi<R> {
    service: ForecastService<R>,
}

impl<R> ForecastApi<R> {
    pub fn new(service: ForecastService<R>) -> Self {
        Self { service }
    }
}

#[OpenApi]
impl<R> ForecastApi<R>
where
    R: Repository + Send + Sync + 'static,
{
    /// List every forecast in the store.
    #[oai(method = "get", path = "/WeatherForecast")]
    async fn get_all(&self) -> poem::Result<ForecastApiResponse<Vec<ForecastDto>>> {
        let forecasts = self.service.get_all().await?;
        Ok(ForecastApiResponse::Ok(Json(
            forecasts.into_iter().map(ForecastDto::from).collect(),
        )))
    }

    /// First forecast with exactly this summary, or `null` when none matches.
    #[oai(method = "get", path = "/WeatherForecast/:summary")]
    async fn get_by_summary(
        &self,
        summary: Path<String>,
    ) -> poem::Result<ForecastApiResponse<Option<ForecastDto>>> {
        let forecast = self.service.get_by_summary(&summary.0).await?;
        Ok(ForecastApiResponse::Ok(Json(forecast.map(ForecastDto::from))))
    }
}
