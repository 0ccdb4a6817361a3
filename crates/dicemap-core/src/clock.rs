//! Clock abstraction for determinism.

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current time, injected wherever a deadline is checked.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Time left until `deadline`, or `None` once it has been reached.
    fn remaining_until(&self, deadline: DateTime<Utc>) -> Option<TimeDelta> {
        let remaining = deadline - self.now();
        (remaining > TimeDelta::zero()).then_some(remaining)
    }
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    struct At(DateTime<Utc>);

    impl Clock for At {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[test]
    fn test_remaining_until_future_deadline() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(now);
        assert_eq!(
            clock.remaining_until(now + TimeDelta::milliseconds(250)),
            Some(TimeDelta::milliseconds(250))
        );
    }

    #[test]
    fn test_remaining_until_reached_deadline() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap();
        let clock = At(now);
        assert_eq!(clock.remaining_until(now), None);
        assert_eq!(clock.remaining_until(now - TimeDelta::seconds(1)), None);
    }
}
