//! Time axes of the detector readout chain.
//!
//! Each axis ("timescale") has its own zero point and, for all but the
//! simulation axis, a hardware clock ticking along it:
//!
//! | Timescale | Native unit | Clock |
//! |---|---|---|
//! | Electronics | µs | TPC clock (shared, own origin) |
//! | TPC electronics | µs | TPC clock |
//! | Optical | µs | optical clock |
//! | Trigger | µs | trigger clock |
//! | Simulation | ns | none |
//!
//! Timescales are zero-sized marker types implementing [`Timescale`]; values
//! on an axis are [`TimePoint`]s tagged with the marker. Tick counts since an
//! axis's own start are [`RealTick`] (fractional) or [`Tick`] (integral).
//! Asking for ticks on the simulation axis is a compile error, since no clock
//! backs it ([`HardwareTimescale`] is not implemented for
//! [`SimulationTime`]).

use crate::bank::ClockBank;
use crate::clock::ReadoutClock;
use crate::units::{in_microseconds, in_nanoseconds, Time};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Sub};

/// The unit a timescale's values are conventionally quoted in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NativeUnit {
    Microsecond,
    Nanosecond,
}

impl NativeUnit {
    /// Unit symbol for display purposes.
    pub fn symbol(self) -> &'static str {
        match self {
            NativeUnit::Microsecond => "us",
            NativeUnit::Nanosecond => "ns",
        }
    }
}

/// Runtime identifier of a timescale, with its static properties.
///
/// This is the data counterpart of the [`Timescale`] marker types; the
/// conversion engine never branches on it, but presentation and diagnostic
/// code can iterate [`TimescaleId::ALL`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimescaleId {
    Electronics,
    Tpc,
    Optical,
    Trigger,
    Simulation,
}

impl TimescaleId {
    /// Every timescale known to the readout chain.
    pub const ALL: [TimescaleId; 5] = [
        TimescaleId::Electronics,
        TimescaleId::Tpc,
        TimescaleId::Optical,
        TimescaleId::Trigger,
        TimescaleId::Simulation,
    ];

    /// Human-readable name of the axis.
    pub fn label(self) -> &'static str {
        match self {
            TimescaleId::Electronics => "electronics",
            TimescaleId::Tpc => "TPC electronics",
            TimescaleId::Optical => "optical",
            TimescaleId::Trigger => "trigger",
            TimescaleId::Simulation => "simulation",
        }
    }

    /// The unit values on this axis are conventionally quoted in.
    pub fn native_unit(self) -> NativeUnit {
        match self {
            TimescaleId::Simulation => NativeUnit::Nanosecond,
            _ => NativeUnit::Microsecond,
        }
    }

    /// Whether a hardware clock ticks along this axis.
    ///
    /// The electronics axis counts as clock-backed: it borrows the TPC clock
    /// for tick purposes while keeping its own time origin.
    pub fn has_clock(self) -> bool {
        !matches!(self, TimescaleId::Simulation)
    }

    /// The clock ticking along this axis, or `None` for the simulation axis.
    ///
    /// Runtime counterpart of [`HardwareTimescale::clock`], for code that
    /// holds a [`TimescaleId`] instead of a marker type.
    pub fn clock_of(self, bank: &ClockBank) -> Option<&ReadoutClock> {
        match self {
            TimescaleId::Electronics | TimescaleId::Tpc => Some(bank.tpc_clock()),
            TimescaleId::Optical => Some(bank.optical_clock()),
            TimescaleId::Trigger => Some(bank.trigger_clock()),
            TimescaleId::Simulation => None,
        }
    }
}

impl fmt::Display for TimescaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A time axis of the readout chain.
///
/// Implemented by the five marker types; values never exist, only the tags.
pub trait Timescale: Copy + fmt::Debug + 'static {
    const ID: TimescaleId;
}

/// A timescale backed by a hardware clock in the [`ClockBank`].
///
/// Not implemented for [`SimulationTime`]: simulation time has no associated
/// clock, so tick conversions targeting it do not compile.
pub trait HardwareTimescale: Timescale {
    /// The clock that ticks along this axis.
    fn clock(bank: &ClockBank) -> &ReadoutClock;
}

macro_rules! timescale {
    ($(#[$doc:meta])* $name:ident => $id:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {}

        impl Timescale for $name {
            const ID: TimescaleId = $id;
        }
    };
}

timescale! {
    /// The canonical reference axis; every other axis's offset is ultimately
    /// expressed relative to it.
    ElectronicsTime => TimescaleId::Electronics
}
timescale! {
    /// The TPC readout axis; its zero is the start of the TPC clock.
    TpcTime => TimescaleId::Tpc
}
timescale! {
    /// The optical readout axis.
    OpticalTime => TimescaleId::Optical
}
timescale! {
    /// The hardware trigger axis; its zero is the trigger time.
    TriggerTime => TimescaleId::Trigger
}
timescale! {
    /// The simulated-event axis; zero is the simulation (G4) start time.
    /// Has no associated hardware clock.
    SimulationTime => TimescaleId::Simulation
}

impl HardwareTimescale for ElectronicsTime {
    // Shares the TPC clock; only the time origin differs.
    fn clock(bank: &ClockBank) -> &ReadoutClock {
        bank.tpc_clock()
    }
}

impl HardwareTimescale for TpcTime {
    fn clock(bank: &ClockBank) -> &ReadoutClock {
        bank.tpc_clock()
    }
}

impl HardwareTimescale for OpticalTime {
    fn clock(bank: &ClockBank) -> &ReadoutClock {
        bank.optical_clock()
    }
}

impl HardwareTimescale for TriggerTime {
    fn clock(bank: &ClockBank) -> &ReadoutClock {
        bank.trigger_clock()
    }
}

/// An absolute instant on the axis of timescale `S`.
///
/// The wrapped value is the elapsed time since the axis's own zero point.
/// Subtracting two points of the same timescale yields a plain [`Time`]
/// interval; points of different timescales cannot be mixed (use a
/// [`TimeConverter`](crate::TimeConverter) to move between axes).
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TimePoint<S: Timescale> {
    value: Time,
    _scale: PhantomData<S>,
}

impl<S: Timescale> TimePoint<S> {
    /// Tags `value` (elapsed time since the axis zero) as a point on `S`.
    pub fn new(value: Time) -> Self {
        Self {
            value,
            _scale: PhantomData,
        }
    }

    /// The zero point of the axis.
    pub fn origin() -> Self {
        Self::new(Time::new::<uom::si::time::second>(0.0))
    }

    /// Elapsed time since the axis's own zero point.
    pub fn elapsed(self) -> Time {
        self.value
    }
}

impl<S: Timescale> Add<Time> for TimePoint<S> {
    type Output = TimePoint<S>;

    fn add(self, interval: Time) -> TimePoint<S> {
        TimePoint::new(self.value + interval)
    }
}

impl<S: Timescale> Sub<Time> for TimePoint<S> {
    type Output = TimePoint<S>;

    fn sub(self, interval: Time) -> TimePoint<S> {
        TimePoint::new(self.value - interval)
    }
}

impl<S: Timescale> Sub for TimePoint<S> {
    type Output = Time;

    fn sub(self, other: TimePoint<S>) -> Time {
        self.value - other.value
    }
}

impl<S: Timescale> fmt::Display for TimePoint<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = S::ID.native_unit();
        let value = match unit {
            NativeUnit::Microsecond => in_microseconds(self.value),
            NativeUnit::Nanosecond => in_nanoseconds(self.value),
        };
        write!(f, "{} {} ({})", value, unit.symbol(), S::ID)
    }
}

/// A fractional count of clock ticks since the start of axis `S`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct RealTick<S: HardwareTimescale> {
    value: f64,
    _scale: PhantomData<S>,
}

impl<S: HardwareTimescale> RealTick<S> {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            _scale: PhantomData,
        }
    }

    /// The raw tick count.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Truncates to the tick during which the instant falls.
    ///
    /// This is a floor, not a round: an instant at `k * period - epsilon`
    /// belongs to tick `k - 1`.
    pub fn floor(self) -> Tick<S> {
        Tick::new(self.value.floor() as i64)
    }
}

impl<S: HardwareTimescale> fmt::Display for RealTick<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks ({})", self.value, S::ID)
    }
}

/// An integral count of clock ticks since the start of axis `S`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tick<S: HardwareTimescale> {
    value: i64,
    _scale: PhantomData<S>,
}

impl<S: HardwareTimescale> Tick<S> {
    pub fn new(value: i64) -> Self {
        Self {
            value,
            _scale: PhantomData,
        }
    }

    /// The raw tick count.
    pub fn value(self) -> i64 {
        self.value
    }

    /// The same count as a fractional tick.
    pub fn as_real(self) -> RealTick<S> {
        RealTick::new(self.value as f64)
    }
}

impl<S: HardwareTimescale> fmt::Display for Tick<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks ({})", self.value, S::ID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockConfig;
    use crate::units::{megahertz, microseconds};

    #[test]
    fn registry_native_units() {
        for id in TimescaleId::ALL {
            let expected = match id {
                TimescaleId::Simulation => NativeUnit::Nanosecond,
                _ => NativeUnit::Microsecond,
            };
            assert_eq!(id.native_unit(), expected, "{id}");
        }
    }

    #[test]
    fn registry_clock_flags() {
        assert!(TimescaleId::Electronics.has_clock());
        assert!(TimescaleId::Tpc.has_clock());
        assert!(TimescaleId::Optical.has_clock());
        assert!(TimescaleId::Trigger.has_clock());
        assert!(!TimescaleId::Simulation.has_clock());
    }

    #[test]
    fn registry_clock_selector_matches_markers() {
        let config = ClockConfig::builder()
            .g4_ref_time(crate::units::nanoseconds(0.0))
            .frame_period(microseconds(1_638.4))
            .tpc_frequency(megahertz(2.0))
            .optical_frequency(megahertz(64.0))
            .trigger_frequency(megahertz(16.0))
            .default_trigger_time(microseconds(0.0))
            .default_beam_gate_time(microseconds(0.0))
            .tpc_trigger_offset(-1_600.0)
            .build();
        let bank = ClockBank::from_config(&config).unwrap();

        assert_eq!(
            TimescaleId::Electronics.clock_of(&bank),
            Some(ElectronicsTime::clock(&bank))
        );
        assert_eq!(TimescaleId::Tpc.clock_of(&bank), Some(TpcTime::clock(&bank)));
        assert_eq!(
            TimescaleId::Optical.clock_of(&bank),
            Some(OpticalTime::clock(&bank))
        );
        assert_eq!(
            TimescaleId::Trigger.clock_of(&bank),
            Some(TriggerTime::clock(&bank))
        );
        assert!(TimescaleId::Simulation.clock_of(&bank).is_none());

        for id in TimescaleId::ALL {
            assert_eq!(id.has_clock(), id.clock_of(&bank).is_some(), "{id}");
        }
    }

    #[test]
    fn point_interval_arithmetic() {
        let a = TimePoint::<TriggerTime>::new(microseconds(10.0));
        let b = a + microseconds(5.0);
        assert!((in_microseconds(b.elapsed()) - 15.0).abs() < 1e-9);
        assert!((in_microseconds(b - a) - 5.0).abs() < 1e-9);
        assert_eq!(in_microseconds(a - a), 0.0);
    }

    #[test]
    fn real_tick_floor_is_truncation() {
        assert_eq!(RealTick::<TpcTime>::new(3.999).floor().value(), 3);
        assert_eq!(RealTick::<TpcTime>::new(4.0).floor().value(), 4);
        assert_eq!(RealTick::<TpcTime>::new(-0.001).floor().value(), -1);
    }

    #[test]
    fn display_uses_native_unit() {
        // Powers of two survive the unit conversion exactly.
        let t = TimePoint::<SimulationTime>::new(crate::units::nanoseconds(512.0));
        assert_eq!(t.to_string(), "512 ns (simulation)");
        let t = TimePoint::<TpcTime>::new(microseconds(1.5));
        assert_eq!(t.to_string(), "1.5 us (TPC electronics)");
    }
}
