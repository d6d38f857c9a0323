use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, Registry, fmt::MakeWriter, layer::SubscriberExt};

use crate::{config::TelemetrySettings, error::WfError};

const LOG_FILE_PREFIX: &str = "weather-forecast.log";

/// Bunyan JSON subscriber writing to `sink`, filtered by `env_filter`.
///
/// `RUST_LOG` is resolved into [`TelemetrySettings::filter`] already and is not re-read here.
pub fn get_subscriber<Sink>(
    name: String,
    env_filter: String,
    sink: Sink,
) -> impl Subscriber + Send + Sync
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let env_filter = EnvFilter::new(env_filter);
    let formatting_layer = BunyanFormattingLayer::new(name, sink);
    Registry::default()
        .with(env_filter)
        .with(JsonStorageLayer)
        .with(formatting_layer)
}

pub fn init_subscriber(subscriber: impl Subscriber + Send + Sync + 'static) -> Result<(), WfError> {
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// lifetime of the process or buffered lines are lost.
pub fn init(name: &str, settings: &TelemetrySettings) -> Result<WorkerGuard, WfError> {
    let (writer, guard) = match &settings.log_dir {
        Some(dir) => {
            tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX))
        }
        None => tracing_appender::non_blocking(std::io::stdout()),
    };
    init_subscriber(get_subscriber(
        name.to_string(),
        settings.filter.clone(),
        writer,
    ))?;
    Ok(guard)
}
