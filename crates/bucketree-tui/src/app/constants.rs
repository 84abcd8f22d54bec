//! Application constants.

/// Rows moved by a page up/down jump.
pub const PAGE_SIZE: usize = 10;

/// Tick interval for the redraw timer in milliseconds.
pub const TICK_INTERVAL_MS: u64 = 50;

/// How long transient status messages stay visible, in milliseconds.
pub const STATUS_TTL_MS: u64 = 3000;
