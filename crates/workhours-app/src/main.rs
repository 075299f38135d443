use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};
use workhours_core::config::load_config;
use workhours_recur::{ExpansionEnd, RecurrenceConfig};

mod summary;

fn main() -> anyhow::Result<()> {
    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_target(true))
        .init();

    let config = load_config()?;

    tracing::debug!(config = ?config, "Configuration loaded");

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping info");
    }

    let base = RecurrenceConfig::from_defaults(&config.recurrence);
    tracing::info!(
        timezone = base.timezone().name(),
        utc_offset_minutes = ?base.timezone().utc_offset_minutes(),
        summary = %base.describe(),
        "Default excluded-date recurrence"
    );

    let today = chrono::Local::now().date_naive();
    for entry in summary::summarize_presets(&config, &base, today) {
        match entry.outcome {
            Ok(preset) => {
                tracing::info!(
                    preset = %entry.name,
                    summary = %preset.summary,
                    rrule = preset.rrule.as_deref().unwrap_or("-"),
                    upcoming = ?preset.upcoming,
                    "Preset"
                );
                if preset.end == ExpansionEnd::CalendarEnd {
                    tracing::warn!(
                        preset = %entry.name,
                        occurrences = preset.upcoming.len(),
                        "Preset runs past the last supported year"
                    );
                }
            }
            Err(e) => tracing::warn!(preset = %entry.name, error = %e, "Skipping invalid preset"),
        }
    }

    for entry in summary::summarize_date_rules(&config, today) {
        match entry.outcome {
            Ok(Some(next)) => tracing::info!(rule = %entry.name, %next, "Date rule"),
            Ok(None) => tracing::warn!(rule = %entry.name, "Date rule has no upcoming date"),
            Err(e) => tracing::warn!(rule = %entry.name, error = %e, "Skipping invalid date rule"),
        }
    }

    Ok(())
}
