//! Per-entry summaries for the configured presets and date rules.

use chrono::NaiveDate;
use workhours_core::config::Settings;
use workhours_recur::{ExpansionEnd, NamedDateRule, Preset, RecurResult, RecurrenceConfig};

/// What a preset looks like once applied to the base configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetSummary {
    pub summary: String,
    pub rrule: Option<String>,
    pub upcoming: Vec<NaiveDate>,
    pub end: ExpansionEnd,
}

#[derive(Debug)]
pub struct PresetEntry {
    pub name: String,
    pub outcome: RecurResult<PresetSummary>,
}

/// ## Summary
/// Applies every configured preset to a copy of `base` and expands it from
/// `today`, bounded by `recurrence.expansion_limit`.
///
/// Invalid presets are reported per entry and do not stop the others.
pub fn summarize_presets(
    settings: &Settings,
    base: &RecurrenceConfig,
    today: NaiveDate,
) -> Vec<PresetEntry> {
    settings
        .presets
        .iter()
        .map(|raw| PresetEntry {
            name: raw.name.clone(),
            outcome: Preset::try_from(raw).and_then(|preset| {
                let mut config = base.clone();
                config.apply_preset(&preset);
                let expansion = config.expand(today, settings.recurrence.expansion_limit)?;
                Ok(PresetSummary {
                    summary: config.describe(),
                    rrule: config.to_rrule(),
                    upcoming: expansion.dates,
                    end: expansion.end,
                })
            }),
        })
        .collect()
}

#[derive(Debug)]
pub struct DateRuleEntry {
    pub name: String,
    /// Next date on or after today, `None` if the rule never falls again.
    pub outcome: RecurResult<Option<NaiveDate>>,
}

/// ## Summary
/// Resolves every configured date rule to its next date on or after `today`.
///
/// Invalid rules are reported per entry and do not stop the others.
pub fn summarize_date_rules(settings: &Settings, today: NaiveDate) -> Vec<DateRuleEntry> {
    settings
        .date_rules
        .iter()
        .map(|raw| DateRuleEntry {
            name: raw.name.clone(),
            outcome: NamedDateRule::try_from(raw)
                .and_then(|named| named.rule().next_occurrence(today)),
        })
        .collect()
}
