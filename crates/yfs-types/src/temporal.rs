use std::time::{SystemTime, UNIX_EPOCH};

/// Wall-clock seconds since the UNIX epoch.
///
/// Attribute timestamps are second-granular; a clock set before the epoch
/// reports `0` rather than failing.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
