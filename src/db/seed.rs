use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::{NewForecast, error::WfError};

use super::SqliteRepository;

pub const SUMMARIES: &[&str] = &[
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

/// Deterministic forecasts for `count` consecutive days starting at `start`.
pub fn sample_forecasts(count: usize, start: DateTime<Utc>) -> Vec<NewForecast> {
    (0..count)
        .map(|day| {
            // Spread over -20..=54, the usual demo range.
            let temperature_c = -20 + ((day * 17) % 75) as i32;
            NewForecast::new(
                start + Duration::days(day as i64),
                temperature_c,
                SUMMARIES[day % SUMMARIES.len()],
            )
        })
        .collect()
}

/// Inserts `count` sample forecasts unless the store already holds data.
/// Returns how many rows were written.
pub async fn seed_if_empty(repository: &SqliteRepository, count: usize) -> Result<usize, WfError> {
    let existing = repository.count_forecasts().await?;
    if existing > 0 {
        info!(existing, "Forecast store already populated, skipping seed");
        return Ok(0);
    }

    for forecast in sample_forecasts(count, Utc::now()) {
        repository.insert_forecast(&forecast).await?;
    }
    info!(count, "Seeded sample forecasts");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn samples_cycle_through_summaries_on_consecutive_days() {
        let start = Utc.with_ymd_and_hms(2022, 1, 6, 12, 0, 0).unwrap();
        let samples = sample_forecasts(12, start);

        assert_eq!(samples.len(), 12);
        assert_eq!(samples[0].summary.as_deref(), Some("Freezing"));
        assert_eq!(samples[9].summary.as_deref(), Some("Scorching"));
        assert_eq!(samples[10].summary.as_deref(), Some("Freezing"));
        assert_eq!(samples[3].date, start + Duration::days(3));
    }

    #[test]
    fn sample_temperatures_stay_in_range() {
        let samples = sample_forecasts(200, Utc::now());
        assert!(
            samples
                .iter()
                .all(|f| (-20..=54).contains(&f.temperature_c))
        );
    }

    #[test]
    fn zero_samples_is_empty() {
        assert!(sample_forecasts(0, Utc::now()).is_empty());
    }
}
