//! In-memory [`Repository`] used as a stand-in for the SQLite store in tests.

use std::sync::Arc;

use crate::{Forecast, NewForecast, error::WfError};

use super::Repository;

type FaultFactory = Arc<dyn Fn() -> WfError + Send + Sync>;

#[derive(Clone, Default)]
pub struct InMemoryRepository {
    forecasts: Vec<Forecast>,
    fault: Option<FaultFactory>,
}

impl InMemoryRepository {
    /// Builds a store holding `forecasts`, assigning ids in order starting at 1.
    pub fn new(forecasts: impl IntoIterator<Item = NewForecast>) -> Self {
        let forecasts = forecasts
            .into_iter()
            .enumerate()
            .map(|(idx, new)| Forecast {
                id: idx as i64 + 1,
                date: new.date,
                temperature_c: new.temperature_c,
                summary: new.summary,
            })
            .collect();
        Self {
            forecasts,
            fault: None,
        }
    }

    /// Every query fails with the error produced by `fault`.
    pub fn failing_with(fault: impl Fn() -> WfError + Send + Sync + 'static) -> Self {
        Self {
            forecasts: Vec::new(),
            fault: Some(Arc::new(fault)),
        }
    }

    pub fn forecasts(&self) -> &[Forecast] {
        &self.forecasts
    }

    fn check_fault(&self) -> Result<(), WfError> {
        match &self.fault {
            Some(fault) => Err(fault()),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for InMemoryRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("forecasts", &self.forecasts)
            .field("failing", &self.fault.is_some())
            .finish()
    }
}

impl Repository for InMemoryRepository {
    async fn all_forecasts(&self) -> Result<Vec<Forecast>, WfError> {
        self.check_fault()?;
        Ok(self.forecasts.clone())
    }

    async fn forecast_by_summary(&self, summary: &str) -> Result<Option<Forecast>, WfError> {
        self.check_fault()?;
        Ok(self
            .forecasts
            .iter()
            .find(|f| f.summary.as_deref() == Some(summary))
            .cloned())
    }
}
