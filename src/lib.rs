use chrono::{DateTime, Utc};

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod service;
pub mod startup;
pub mod telemetry;

/// A single persisted weather forecast.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Forecast {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl Forecast {
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / 0.5556) as i32
    }
}

impl std::fmt::Display for Forecast {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "#{}[{}] - temperature: {}C, summary: {}",
            self.id,
            self.date.to_rfc3339(),
            self.temperature_c,
            self.summary.as_deref().unwrap_or("-")
        )
    }
}

/// Payload for inserting a forecast; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewForecast {
    pub date: DateTime<Utc>,
    pub temperature_c: i32,
    pub summary: Option<String>,
}

impl NewForecast {
    pub fn new(date: DateTime<Utc>, temperature_c: i32, summary: impl Into<String>) -> Self {
        Self {
            date,
            temperature_c,
            summary: Some(summary.into()),
        }
    }
}
