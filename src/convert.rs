//! Conversions between detector timescales.
//!
//! Every axis's zero point is ultimately known on the electronics axis, so a
//! conversion from `From` to `To` is always `origin of From in To + value`.
//! The origin is resolved per timescale pair, in this priority order:
//!
//! 1. **identity**: `From == To` gives 0;
//! 2. **direct**: each hardware wiring fact is tabulated by hand:
//!    TPC start = TPC clock start time, optical start = 0, simulation start =
//!    the simulation reference time, trigger start = the trigger time (all on
//!    the electronics axis);
//! 3. **inverse**: electronics in `X` is minus `X` in electronics;
//! 4. **transitive**: any remaining pair chains through the electronics
//!    axis, with a single indirection.
//!
//! Each rule is a trait impl, so the whole dispatch happens at compile time:
//! a pair without a resolution rule does not implement [`OriginIn`] and the
//! conversion does not compile. Likewise, tick conversions demand a
//! [`HardwareTimescale`] target, so asking for simulation time in ticks is
//! rejected by the compiler rather than at run time.
//!
//! All conversions are pure functions of the borrowed [`ClockBank`].

use crate::bank::ClockBank;
use crate::timescales::{
    ElectronicsTime, HardwareTimescale, OpticalTime, RealTick, SimulationTime, Tick, TimePoint,
    Timescale, TpcTime, TriggerTime,
};
use crate::units::{Frequency, Time};

/// Resolution of the instant at which the `Self` axis's zero point occurs,
/// expressed on the `To` axis.
///
/// Implemented exactly for the supported timescale pairs; everything else is
/// a compile error by construction.
pub trait OriginIn<To: Timescale>: Timescale {
    /// Zero point of the `Self` axis, as a point on the `To` axis.
    fn origin(bank: &ClockBank) -> TimePoint<To>;
}

/// Every axis starts at its own zero.
impl<S: Timescale> OriginIn<S> for S {
    fn origin(_bank: &ClockBank) -> TimePoint<S> {
        TimePoint::origin()
    }
}

/// The TPC axis starts when the TPC clock starts.
impl OriginIn<ElectronicsTime> for TpcTime {
    fn origin(bank: &ClockBank) -> TimePoint<ElectronicsTime> {
        TimePoint::new(bank.tpc_clock().start_time())
    }
}

/// The optical axis is assumed to start together with the electronics axis.
///
/// A physical approximation, not a calibrated value; it holds for any bank
/// configuration.
impl OriginIn<ElectronicsTime> for OpticalTime {
    fn origin(_bank: &ClockBank) -> TimePoint<ElectronicsTime> {
        TimePoint::origin()
    }
}

/// Simulated time zero occurs at the simulation reference time.
impl OriginIn<ElectronicsTime> for SimulationTime {
    fn origin(bank: &ClockBank) -> TimePoint<ElectronicsTime> {
        TimePoint::new(bank.sim_reference_time())
    }
}

/// The trigger axis starts at the hardware trigger time.
impl OriginIn<ElectronicsTime> for TriggerTime {
    fn origin(bank: &ClockBank) -> TimePoint<ElectronicsTime> {
        TimePoint::new(bank.trigger_time())
    }
}

// The electronics origin in X is minus the X origin in electronics.
fn electronics_origin_in<To>(bank: &ClockBank) -> TimePoint<To>
where
    To: Timescale + OriginIn<ElectronicsTime>,
{
    TimePoint::new(-To::origin(bank).elapsed())
}

impl OriginIn<TpcTime> for ElectronicsTime {
    fn origin(bank: &ClockBank) -> TimePoint<TpcTime> {
        electronics_origin_in(bank)
    }
}

impl OriginIn<OpticalTime> for ElectronicsTime {
    fn origin(bank: &ClockBank) -> TimePoint<OpticalTime> {
        electronics_origin_in(bank)
    }
}

impl OriginIn<SimulationTime> for ElectronicsTime {
    fn origin(bank: &ClockBank) -> TimePoint<SimulationTime> {
        electronics_origin_in(bank)
    }
}

impl OriginIn<TriggerTime> for ElectronicsTime {
    fn origin(bank: &ClockBank) -> TimePoint<TriggerTime> {
        electronics_origin_in(bank)
    }
}

// Neither axis is the electronics one: compute the offset on the electronics
// axis, then carry that single point onward.
fn via_electronics<From, To>(bank: &ClockBank) -> TimePoint<To>
where
    From: OriginIn<ElectronicsTime>,
    ElectronicsTime: OriginIn<To>,
    To: Timescale,
{
    <ElectronicsTime as OriginIn<To>>::origin(bank)
        + <From as OriginIn<ElectronicsTime>>::origin(bank).elapsed()
}

macro_rules! chain_via_electronics {
    ($($from:ty => $to:ty),* $(,)?) => {$(
        /// Chains through the electronics axis.
        impl OriginIn<$to> for $from {
            fn origin(bank: &ClockBank) -> TimePoint<$to> {
                via_electronics::<$from, $to>(bank)
            }
        }
    )*};
}

chain_via_electronics! {
    TpcTime => OpticalTime,
    TpcTime => SimulationTime,
    TpcTime => TriggerTime,
    OpticalTime => TpcTime,
    OpticalTime => SimulationTime,
    OpticalTime => TriggerTime,
    SimulationTime => TpcTime,
    SimulationTime => OpticalTime,
    SimulationTime => TriggerTime,
    TriggerTime => TpcTime,
    TriggerTime => OpticalTime,
    TriggerTime => SimulationTime,
}

/// The conversion engine: answers timescale queries against a borrowed
/// [`ClockBank`].
///
/// # Examples
///
/// ```
/// use detclock::{ClockBank, ClockConfig, ElectronicsTime, TimeConverter, TimePoint, TriggerTime};
/// use detclock::units::{in_microseconds, megahertz, microseconds, nanoseconds};
///
/// let config = ClockConfig::builder()
///     .g4_ref_time(nanoseconds(0.0))
///     .frame_period(microseconds(1_638.4))
///     .tpc_frequency(megahertz(2.0))
///     .optical_frequency(megahertz(64.0))
///     .trigger_frequency(megahertz(16.0))
///     .default_trigger_time(microseconds(10.0))
///     .default_beam_gate_time(microseconds(10.0))
///     .tpc_trigger_offset(-1_600.0)
///     .build();
/// let bank = ClockBank::from_config(&config)?;
/// let timings = TimeConverter::new(&bank);
///
/// // 5 us after the trigger is 15 us on the electronics axis.
/// let t = TimePoint::<TriggerTime>::new(microseconds(5.0));
/// let e = timings.to_electronics_time(t);
/// assert!((in_microseconds(e.elapsed()) - 15.0).abs() < 1e-9);
/// # Ok::<(), detclock::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TimeConverter<'a> {
    bank: &'a ClockBank,
}

impl<'a> TimeConverter<'a> {
    pub fn new(bank: &'a ClockBank) -> Self {
        Self { bank }
    }

    /// The bank this converter reads from.
    pub fn bank(&self) -> &ClockBank {
        self.bank
    }

    /// Zero point of the `From` axis, expressed on the `To` axis.
    pub fn origin_of<From, To>(&self) -> TimePoint<To>
    where
        From: OriginIn<To>,
        To: Timescale,
    {
        From::origin(self.bank)
    }

    /// Converts a time point onto the `To` axis.
    pub fn convert<To, From>(&self, point: TimePoint<From>) -> TimePoint<To>
    where
        To: Timescale,
        From: OriginIn<To>,
    {
        From::origin(self.bank) + point.elapsed()
    }

    /// Converts a time point onto the electronics axis.
    pub fn to_electronics_time<From>(&self, point: TimePoint<From>) -> TimePoint<ElectronicsTime>
    where
        From: OriginIn<ElectronicsTime>,
    {
        self.convert(point)
    }

    /// Converts a time point onto the TPC electronics axis.
    pub fn to_tpc_time<From>(&self, point: TimePoint<From>) -> TimePoint<TpcTime>
    where
        From: OriginIn<TpcTime>,
    {
        self.convert(point)
    }

    /// Converts a time point onto the optical axis.
    pub fn to_optical_time<From>(&self, point: TimePoint<From>) -> TimePoint<OpticalTime>
    where
        From: OriginIn<OpticalTime>,
    {
        self.convert(point)
    }

    /// Converts a time point onto the trigger axis.
    pub fn to_trigger_time<From>(&self, point: TimePoint<From>) -> TimePoint<TriggerTime>
    where
        From: OriginIn<TriggerTime>,
    {
        self.convert(point)
    }

    /// Converts a time point onto the simulation axis.
    pub fn to_simulation_time<From>(&self, point: TimePoint<From>) -> TimePoint<SimulationTime>
    where
        From: OriginIn<SimulationTime>,
    {
        self.convert(point)
    }

    /// The fractional tick count, on `To`'s clock, of a time point.
    ///
    /// The point is first converted onto the `To` axis, then divided by that
    /// clock's tick period.
    pub fn to_real_tick<To, From>(&self, point: TimePoint<From>) -> RealTick<To>
    where
        To: HardwareTimescale,
        From: OriginIn<To>,
    {
        let on_target = self.convert::<To, From>(point);
        RealTick::new(To::clock(self.bank).time_to_tick(on_target.elapsed()))
    }

    /// The integral tick during which a time point falls, on `To`'s clock.
    ///
    /// Truncation happens as the very last step.
    pub fn to_tick<To, From>(&self, point: TimePoint<From>) -> Tick<To>
    where
        To: HardwareTimescale,
        From: OriginIn<To>,
    {
        self.to_real_tick::<To, From>(point).floor()
    }

    /// The time point, on the `To` axis, of a fractional tick.
    ///
    /// The tick is first turned back into an instant on its own axis (tick
    /// count times that axis's clock period) and only then converted; the
    /// intermediate step carries the axis-specific period.
    pub fn real_tick_to_time<To, From>(&self, tick: RealTick<From>) -> TimePoint<To>
    where
        From: HardwareTimescale + OriginIn<To>,
        To: Timescale,
    {
        let implied = TimePoint::<From>::new(From::clock(self.bank).tick_to_time(tick.value()));
        self.convert(implied)
    }

    /// The time point, on the `To` axis, of an integral tick.
    pub fn tick_to_time<To, From>(&self, tick: Tick<From>) -> TimePoint<To>
    where
        From: HardwareTimescale + OriginIn<To>,
        To: Timescale,
    {
        self.real_tick_to_time(tick.as_real())
    }

    /// A fractional tick count re-expressed on another clock's axis.
    pub fn convert_tick<To, From>(&self, tick: RealTick<From>) -> RealTick<To>
    where
        From: HardwareTimescale + OriginIn<To>,
        To: HardwareTimescale,
    {
        let on_target = self.real_tick_to_time::<To, From>(tick);
        RealTick::new(To::clock(self.bank).time_to_tick(on_target.elapsed()))
    }

    /// Hardware trigger time, as a point on the electronics axis.
    pub fn trigger_time(&self) -> TimePoint<ElectronicsTime> {
        TimePoint::new(self.bank.trigger_time())
    }

    /// Beam-gate opening time, as a point on the electronics axis.
    pub fn beam_gate_time(&self) -> TimePoint<ElectronicsTime> {
        TimePoint::new(self.bank.beam_gate_time())
    }

    /// Frequency of the clock backing timescale `S`.
    pub fn clock_frequency<S: HardwareTimescale>(&self) -> Frequency {
        S::clock(self.bank).frequency()
    }

    /// Tick period of the clock backing timescale `S`.
    pub fn clock_period<S: HardwareTimescale>(&self) -> Time {
        S::clock(self.bank).tick_period()
    }
}
