//! This module contains global constants used across the indication engine and the daemon.

/// Delay between a track change and the start of marquee scrolling, in milliseconds.
pub const TICKER_DELAY_MS: u64 = 1600;

/// How many times the marquee repeats once scrolling starts.
pub const MARQUEE_REPEAT_LIMIT: u32 = 2;

/// Separator between artist and title in the composed indication.
pub const ARTIST_TITLE_SEPARATOR: &str = " - ";

// wake reason codes as reported by the host doze controller
pub const PULSE_REASON_NONE: i32 = -1;
pub const PULSE_REASON_INTENT: i32 = 0;
pub const PULSE_REASON_NOTIFICATION: i32 = 1;
pub const PULSE_REASON_SIGMOTION: i32 = 2;
pub const PULSE_REASON_SENSOR_PICKUP: i32 = 3;
pub const PULSE_REASON_SENSOR_DOUBLE_TAP: i32 = 4;
pub const PULSE_REASON_SENSOR_LONG_PRESS: i32 = 5;
pub const PULSE_REASON_DOCKING: i32 = 6;
pub const PULSE_REASON_FORCED_MEDIA_NOTIFICATION: i32 = 7;

/// Default log filter when neither config nor RUST_LOG says otherwise.
pub const DEFAULT_LOG_LEVEL: &str = "info";
