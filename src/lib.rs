//! Detector clock and timing utilities.
//!
//! A detector readout chain runs several hardware clocks, each with its own
//! start epoch, tick frequency and conventional unit. This crate models
//! those clocks and converts values between their time axes: electronics,
//! TPC electronics, optical, trigger and simulation time. Nonsensical
//! queries, like a conversion with no resolution rule or simulation time
//! expressed in ticks, are rejected at compile time; there is no runtime
//! branching in the conversion path.
//!
//! The pieces, bottom up:
//!
//! - [`units`]: unit-tagged scalars (microseconds, nanoseconds, megahertz)
//!   built on [`uom`];
//! - [`TimescaleId`] and the [`Timescale`] marker types: the fixed set of
//!   time axes and their static properties;
//! - [`ReadoutClock`]: one electronics clock and its tick arithmetic;
//! - [`ClockBank`]: the clocks plus the per-event reference times, built from
//!   a [`ClockConfig`];
//! - [`TimeConverter`]: the conversion engine, borrowing a bank;
//! - [`resolve_trigger`] / [`correct_sim_reference`]: the per-event
//!   zero/one/many trigger policy;
//! - [`MinMaxCollector`] and [`WeightedStats`]: small running accumulators.
//!
//! # Examples
//!
//! ```
//! use detclock::{ClockBank, ClockConfig, SimulationTime, TimeConverter, TimePoint, TpcTime};
//! use detclock::units::{megahertz, microseconds, nanoseconds};
//!
//! let config = ClockConfig::builder()
//!     .g4_ref_time(nanoseconds(-1_600_000.0))
//!     .frame_period(microseconds(1_638.4))
//!     .tpc_frequency(megahertz(2.0))
//!     .optical_frequency(megahertz(64.0))
//!     .trigger_frequency(megahertz(16.0))
//!     .default_trigger_time(microseconds(0.0))
//!     .default_beam_gate_time(microseconds(0.0))
//!     .tpc_trigger_offset(-1_600.0)
//!     .build();
//!
//! let bank = ClockBank::from_config(&config)?;
//! let timings = TimeConverter::new(&bank);
//!
//! // Where does a simulated energy deposit at t = 1.25 us land on the TPC
//! // readout, in ticks? Simulated time zero sits at -1600 us electronics,
//! // right at the TPC clock start, so the deposit falls 1.25 us into the
//! // readout: tick 2 at 2 MHz.
//! let deposit = TimePoint::<SimulationTime>::new(nanoseconds(1_250.0));
//! let tick = timings.to_tick::<TpcTime, _>(deposit);
//! assert_eq!(tick.value(), 2);
//! # Ok::<(), detclock::ConfigurationError>(())
//! ```

/// The bank of hardware clocks and reference times.
pub mod bank;
/// Model of a single electronics clock.
pub mod clock;
/// Resolved timing configuration.
pub mod config;
/// Conversions between detector timescales.
pub mod convert;
/// Running min/max and weighted mean/variance accumulators.
pub mod statistics;
/// Time axes of the readout chain and values tagged with them.
pub mod timescales;
/// Per-event trigger resolution.
pub mod trigger;
/// Unit-tagged scalar quantities.
pub mod units;

pub use bank::ClockBank;
pub use clock::ReadoutClock;
pub use config::{ClockConfig, ConfigurationError};
pub use convert::{OriginIn, TimeConverter};
pub use statistics::{MinMaxCollector, WeightedStats};
pub use timescales::{
    ElectronicsTime, HardwareTimescale, NativeUnit, OpticalTime, RealTick, SimulationTime, Tick,
    TimePoint, Timescale, TimescaleId, TpcTime, TriggerTime,
};
pub use trigger::{correct_sim_reference, resolve_trigger, AmbiguousTriggerError, TriggerRecord};
