/// Configuration constants shared across crates
pub const CONFIG_FILE_STEM: &str = "workhours";
pub const CONFIG_FILE_NAME: &str = const_str::concat!(CONFIG_FILE_STEM, ".toml");
pub const ENV_PREFIX: &str = "WORKHOURS";

/// Repeat interval bounds ("every N periods").
pub const MIN_REPEAT_INTERVAL: i64 = 1;
pub const MAX_REPEAT_INTERVAL: i64 = 5;

/// Repeat count bounds. `UNBOUNDED_REPEAT_COUNT` means "No End".
pub const MIN_REPEAT_COUNT: i64 = 1;
pub const MAX_REPEAT_COUNT: i64 = 10;
pub const UNBOUNDED_REPEAT_COUNT: i64 = -1;

/// Upper bound on expanded occurrences when the count is unbounded.
pub const DEFAULT_EXPANSION_LIMIT: u16 = 52;
