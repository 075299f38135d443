//! Repeat settings for an excluded date and everything derived from them.

pub mod config;
pub mod date_rule;
pub mod dynamic;
pub mod lunar;
pub mod period;
pub mod preset;
pub mod rule;
pub mod timezone;
pub mod value;

pub use config::RecurrenceConfig;
pub use date_rule::{DateRule, NamedDateRule};
pub use lunar::{LunarDate, LunarError};
pub use period::RecurrencePeriod;
pub use preset::Preset;
pub use rule::{Expansion, ExpansionEnd};
pub use timezone::BaseTimezone;
pub use value::{RepeatCount, RepeatInterval};

/// Appends `s` to `word` when `n > 1`.
#[must_use]
pub(crate) fn pluralize(word: &str, n: i64) -> String {
    if n > 1 {
        format!("{word}s")
    } else {
        word.to_string()
    }
}
