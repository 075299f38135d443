//! Recurrence configuration model for excluded dates.
//!
//! Holds the repeat settings an excluded-date form edits, validates every
//! edit, and derives both the human-readable summary and a concrete RFC 5545
//! recurrence rule from them. Holiday-style dates defined by weekday position
//! or by the Chinese lunar calendar are resolved to concrete dates as well.

pub mod error;
pub mod recurrence;

pub use error::{AllowedRange, RecurError, RecurResult, ValidationError};
pub use recurrence::{
    BaseTimezone, DateRule, Expansion, ExpansionEnd, LunarDate, LunarError, NamedDateRule, Preset,
    RecurrenceConfig, RecurrencePeriod, RepeatCount, RepeatInterval,
};
