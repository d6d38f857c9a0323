use poem::{error::ResponseError, http::StatusCode};

#[derive(Debug, thiserror::Error)]
pub enum WfError {
    /// Raised by application code to answer the caller with a specific status.
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("Error querying the forecast store")]
    Database(#[from] sqlx::Error),
    #[error("Error applying database migrations")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Config parsing error: {0}")]
    Config(#[from] dotenvy::Error),
    #[error("Invalid value `{value}` for {key}")]
    InvalidSetting { key: &'static str, value: String },
    #[error("Error binding the HTTP listener")]
    Network(#[from] std::io::Error),
    #[error("Failed to install the tracing subscriber")]
    Telemetry(#[from] tracing::subscriber::SetGlobalDefaultError),
}

impl WfError {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

impl ResponseError for WfError {
    fn status(&self) -> StatusCode {
        match self {
            WfError::Status { status, .. } => *status,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
