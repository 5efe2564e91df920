use chrono::{DateTime, Utc};

/// Wall-clock access. Injected so the cancellation-window boundary is
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
