//! Model of a single electronics clock.

use crate::config::ConfigurationError;
use crate::units::{dimensionless, in_megahertz, in_microseconds, Frequency, Ratio, Time};

/// One readout electronics clock: a start time on the electronics axis, a
/// frame period and a tick frequency.
///
/// Immutable after construction. Tick/time arithmetic never rounds;
/// truncation to integral ticks is the caller's decision (see
/// [`RealTick::floor`](crate::RealTick::floor)).
///
/// # Examples
///
/// ```
/// use detclock::ReadoutClock;
/// use detclock::units::{in_microseconds, megahertz, microseconds};
///
/// let clock = ReadoutClock::new(microseconds(0.0), microseconds(1_638.4), megahertz(2.0))?;
/// assert_eq!(in_microseconds(clock.tick_period()), 0.5);
/// assert_eq!(clock.time_to_tick(microseconds(3.0)), 6.0);
/// # Ok::<(), detclock::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReadoutClock {
    start_time: Time,
    frame_period: Time,
    frequency: Frequency,
}

impl ReadoutClock {
    /// Creates a clock, rejecting non-positive frequencies and frame periods.
    pub fn new(
        start_time: Time,
        frame_period: Time,
        frequency: Frequency,
    ) -> Result<Self, ConfigurationError> {
        if in_megahertz(frequency) <= 0.0 {
            return Err(ConfigurationError::NonPositiveFrequency {
                megahertz: in_megahertz(frequency),
            });
        }
        if in_microseconds(frame_period) <= 0.0 {
            return Err(ConfigurationError::NonPositiveFramePeriod {
                microseconds: in_microseconds(frame_period),
            });
        }

        Ok(Self {
            start_time,
            frame_period,
            frequency,
        })
    }

    /// A copy of this clock with a replaced start time.
    ///
    /// Frequency and frame period were validated when the clock was built, so
    /// this cannot fail.
    pub fn with_start_time(&self, start_time: Time) -> Self {
        Self {
            start_time,
            ..*self
        }
    }

    /// Instant, on the electronics axis, at which this clock started.
    pub fn start_time(&self) -> Time {
        self.start_time
    }

    /// Duration of one readout frame.
    pub fn frame_period(&self) -> Time {
        self.frame_period
    }

    /// Tick frequency.
    pub fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Duration of one tick.
    pub fn tick_period(&self) -> Time {
        Ratio::new::<uom::si::ratio::ratio>(1.0) / self.frequency
    }

    /// Number of ticks in one frame.
    pub fn ticks_per_frame(&self) -> f64 {
        dimensionless(self.frame_period * self.frequency)
    }

    /// The time, since this clock's start, of the (possibly fractional) tick
    /// `tick`. No rounding.
    pub fn tick_to_time(&self, tick: f64) -> Time {
        self.tick_period() * tick
    }

    /// The fractional tick count at `time` (measured since this clock's
    /// start). No rounding.
    pub fn time_to_tick(&self, time: Time) -> f64 {
        dimensionless(time * self.frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{megahertz, microseconds};

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn rejects_non_positive_frequency() {
        let err = ReadoutClock::new(microseconds(0.0), microseconds(1.0), megahertz(0.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositiveFrequency { .. }
        ));

        let err = ReadoutClock::new(microseconds(0.0), microseconds(1.0), megahertz(-2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositiveFrequency { .. }
        ));
    }

    #[test]
    fn rejects_non_positive_frame_period() {
        let err = ReadoutClock::new(microseconds(0.0), microseconds(-1.0), megahertz(2.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::NonPositiveFramePeriod { .. }
        ));
    }

    #[test]
    fn tick_time_arithmetic() {
        let clock =
            ReadoutClock::new(microseconds(0.0), microseconds(1_638.4), megahertz(2.0)).unwrap();

        assert!((in_microseconds(clock.tick_period()) - 0.5).abs() < TOLERANCE);
        assert!((in_microseconds(clock.tick_to_time(5.0)) - 2.5).abs() < TOLERANCE);
        assert!((clock.time_to_tick(microseconds(2.5)) - 5.0).abs() < TOLERANCE);
        assert!((clock.ticks_per_frame() - 3_276.8).abs() < TOLERANCE);
    }

    #[test]
    fn tick_time_round_trip() {
        let clock =
            ReadoutClock::new(microseconds(-1_600.0), microseconds(1_638.4), megahertz(2.0))
                .unwrap();

        for tick in [-3200.0, -0.5, 0.0, 0.25, 17.0, 123_456.75] {
            let back = clock.time_to_tick(clock.tick_to_time(tick));
            assert!(
                (back - tick).abs() < TOLERANCE,
                "tick {tick} round-tripped to {back}"
            );
        }
    }

    #[test]
    fn with_start_time_keeps_the_rest() {
        let clock =
            ReadoutClock::new(microseconds(0.0), microseconds(1_638.4), megahertz(2.0)).unwrap();
        let moved = clock.with_start_time(microseconds(-1_600.0));

        assert!((in_microseconds(moved.start_time()) + 1_600.0).abs() < TOLERANCE);
        assert_eq!(moved.frequency(), clock.frequency());
        assert_eq!(moved.frame_period(), clock.frame_period());
    }
}
