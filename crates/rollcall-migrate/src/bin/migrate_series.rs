use chrono_tz::Tz;
use rollcall_core::config::load_config;
use rollcall_core::error::CoreError;
use rollcall_migrate::batch::{SourceRow, translate_rows};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("debug"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .init();

    tracing::info!("Starting legacy recurrence migration");

    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping debug");
    }

    let timezone: Tz = config
        .migration
        .source_timezone
        .parse()
        .map_err(|_| CoreError::UnknownTimezone(config.migration.source_timezone.clone()))?;

    let raw = std::fs::read_to_string(&config.migration.source_file)?;
    let rows: Vec<SourceRow> = serde_json::from_str(&raw)?;

    tracing::info!(rows = rows.len(), timezone = %timezone, "Loaded source rows");

    let report = translate_rows(&rows, timezone);

    std::fs::write(
        &config.migration.destination_file,
        serde_json::to_string_pretty(&report.destinations)?,
    )?;

    tracing::info!(
        destination = %config.migration.destination_file,
        translated = report.destinations.len(),
        skipped = report.skipped,
        failed = report.failures.len(),
        "Migration finished"
    );

    if report.all_failed() {
        anyhow::bail!("every source row failed to translate");
    }

    Ok(())
}
