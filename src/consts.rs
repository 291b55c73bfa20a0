/// Prices in the built-in table and in config files are quoted per this many tokens
pub(crate) const TOKENS_PER_PRICE_UNIT: f64 = 1_000_000.0;

/// Requests above this many input (or output) tokens are billed at the high tier
pub(crate) const DEFAULT_TIER_THRESHOLD_TOKENS: u64 = 200_000;

/// Depth cap used when rendering message metadata
pub(crate) const DEFAULT_MAX_DEPTH: usize = 5;

/// Fallback value when a role, id or model name is unavailable
pub(crate) const UNKNOWN: &str = "unknown";
