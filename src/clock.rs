//! Injectable time source for note timestamps.

use chrono::{DateTime, SubsecRound, Utc};
use std::sync::Arc;

/// Source of timestamps for created and edited notes.
///
/// Timestamps carry millisecond precision so that they survive a round trip
/// through the stored JSON unchanged.
#[derive(Clone)]
pub struct Clock(Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>);

impl Clock {
    /// Returns the current time, truncated to milliseconds.
    pub fn now(&self) -> DateTime<Utc> {
        (self.0)().trunc_subsecs(3)
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock(Arc::new(Utc::now))
    }
}

impl<F> From<F> for Clock
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Clock(Arc::new(f))
    }
}

impl std::fmt::Debug for Clock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Clock(<fn>)")
    }
}
