//! Injectable time source for OTP generation.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::OtpError;

/// Source of the current wall-clock instant.
pub trait Clock {
    /// The instant to derive codes for.
    fn now(&self) -> SystemTime;

    /// Whole seconds since the Unix epoch (floored).
    ///
    /// # Errors
    /// Returns [`OtpError::ClockBeforeEpoch`] for instants before 1970.
    fn unix_seconds(&self) -> Result<u64, OtpError> {
        self.now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .map_err(|_| OtpError::ClockBeforeEpoch)
    }
}

/// The live system clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// A clock frozen at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub SystemTime);

impl FixedClock {
    /// Freeze the clock at `secs` seconds after the Unix epoch.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects)]
    pub fn from_unix(secs: u64) -> Self {
        Self(UNIX_EPOCH + Duration::from_secs(secs))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> SystemTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> SystemTime {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_instant() {
        assert_eq!(FixedClock::from_unix(1_700_000_000).unix_seconds(), Ok(1_700_000_000));
    }

    #[test]
    fn sub_second_instants_are_floored() {
        let clock = FixedClock(UNIX_EPOCH + Duration::from_millis(59_999));
        assert_eq!(clock.unix_seconds(), Ok(59));
    }

    #[test]
    fn pre_epoch_instant_is_an_error() {
        let clock = FixedClock(UNIX_EPOCH - Duration::from_secs(1));
        assert_eq!(clock.unix_seconds(), Err(OtpError::ClockBeforeEpoch));
    }

    #[test]
    fn system_clock_is_after_epoch() {
        assert!(SystemClock.unix_seconds().is_ok());
    }
}
