use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub booking: BookingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BookingConfig {
    /// Modifications and cancellations close this many hours before check-in.
    #[serde(default = "default_cancellation_window_hours")]
    pub cancellation_window_hours: i64,
    /// How many times a write rejected by the store's overlap backstop is
    /// retried after a fresh availability re-check.
    #[serde(default = "default_conflict_retries")]
    pub conflict_retries: u32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            cancellation_window_hours: default_cancellation_window_hours(),
            conflict_retries: default_conflict_retries(),
        }
    }
}

fn default_cancellation_window_hours() -> i64 {
    48
}

fn default_conflict_retries() -> u32 {
    1
}
