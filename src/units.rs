//! Unit-tagged scalar quantities used throughout the crate.
//!
//! Everything is built on [`uom`], so arithmetic between incompatible units
//! fails to compile rather than at run time. The helpers below pin down the
//! conventional units of the readout chain: microseconds for hardware clock
//! times, nanoseconds for simulation time and megahertz for clock
//! frequencies.

pub use uom::si::f64::{Frequency, Ratio, Time};

/// A [`Time`] of `value` microseconds.
pub fn microseconds(value: f64) -> Time {
    Time::new::<uom::si::time::microsecond>(value)
}

/// A [`Time`] of `value` nanoseconds.
pub fn nanoseconds(value: f64) -> Time {
    Time::new::<uom::si::time::nanosecond>(value)
}

/// A [`Frequency`] of `value` megahertz.
pub fn megahertz(value: f64) -> Frequency {
    Frequency::new::<uom::si::frequency::megahertz>(value)
}

/// The value of `time` in microseconds.
pub fn in_microseconds(time: Time) -> f64 {
    time.get::<uom::si::time::microsecond>()
}

/// The value of `time` in nanoseconds.
pub fn in_nanoseconds(time: Time) -> f64 {
    time.get::<uom::si::time::nanosecond>()
}

/// The value of `frequency` in megahertz.
pub fn in_megahertz(frequency: Frequency) -> f64 {
    frequency.get::<uom::si::frequency::megahertz>()
}

/// The raw value of a dimensionless quantity (e.g. a tick count).
pub fn dimensionless(ratio: Ratio) -> f64 {
    ratio.get::<uom::si::ratio::ratio>()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Unit coefficients are not powers of two, so converted values can be off
    // by an ulp; compare with a picosecond-level tolerance.
    const TOLERANCE: f64 = 1e-6;

    #[test]
    fn microsecond_nanosecond_factor() {
        let t = microseconds(1.0);
        assert!((in_nanoseconds(t) - 1000.0).abs() < TOLERANCE);
        assert!((in_microseconds(nanoseconds(500.0)) - 0.5).abs() < TOLERANCE);
    }

    #[test]
    fn time_times_frequency_is_dimensionless() {
        // 2 MHz for 3 us is 6 ticks.
        let ticks = microseconds(3.0) * megahertz(2.0);
        assert!((dimensionless(ticks) - 6.0).abs() < TOLERANCE);
    }

    #[test]
    fn ticks_over_frequency_is_time() {
        let period = Ratio::new::<uom::si::ratio::ratio>(1.0) / megahertz(2.0);
        assert!((in_microseconds(period) - 0.5).abs() < TOLERANCE);
    }
}
