//! Wall-clock port.
//!
//! Everything time-dependent in the monitor (ingestion stamps, retention cutoffs, alert
//! timestamps) reads the time through [`Clock`], so tests can drive the retention window
//! and the alarm deterministically with [`ManualClock`].

use chrono::{DateTime, Utc};
use std::fmt::Debug;

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by `Utc::now()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use manual::ManualClock;

#[cfg(any(test, feature = "test-helpers"))]
mod manual {
    use super::Clock;
    use chrono::{DateTime, Duration, Utc};
    use std::sync::{Arc, Mutex};

    /// Clock that only moves when told to.
    ///
    /// Clones share the same instant, so a test can hand one clone to a monitor and keep
    /// advancing the other.
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        current: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        pub fn new(start: DateTime<Utc>) -> Self {
            Self {
                current: Arc::new(Mutex::new(start)),
            }
        }

        pub fn advance(&self, by: Duration) {
            let mut now = self.current.lock().expect("ManualClock mutex poisoned");
            *now += by;
        }

        pub fn set(&self, at: DateTime<Utc>) {
            let mut now = self.current.lock().expect("ManualClock mutex poisoned");
            *now = at;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.current.lock().expect("ManualClock mutex poisoned")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn manual_clock_advances_and_is_shared_across_clones() {
        // Arrange
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let clock = ManualClock::new(start);
        let other = clock.clone();

        // Act
        other.advance(Duration::seconds(30));

        // Assert
        assert_eq!(clock.now(), start + Duration::seconds(30));

        clock.set(start);
        assert_eq!(other.now(), start);
    }
}
