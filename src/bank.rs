//! The bank of hardware clocks and per-event reference times.

use crate::clock::ReadoutClock;
use crate::config::{ClockConfig, ConfigurationError};
use crate::units::{microseconds, Time};

/// Owns one instance of each hardware clock plus the scalar reference times
/// every conversion is anchored to.
///
/// A bank is built once per run from a [`ClockConfig`]; the per-event trigger
/// and beam-gate times can then be supplied in one of two ways:
///
/// - [`data_for`](ClockBank::data_for) produces a fresh immutable snapshot
///   for one event and leaves `self` untouched. This is the preferred entry
///   point: each event gets its own bank and nothing is shared, so events can
///   be processed in parallel.
/// - [`set_trigger_times`](ClockBank::set_trigger_times) mutates the bank in
///   place, mirroring the historical per-job singleton service. It must not
///   be shared across concurrently processed events.
///
/// # Examples
///
/// ```
/// use detclock::{ClockBank, ClockConfig};
/// use detclock::units::{in_microseconds, megahertz, microseconds, nanoseconds};
///
/// let config = ClockConfig::builder()
///     .g4_ref_time(nanoseconds(0.0))
///     .frame_period(microseconds(1_638.4))
///     .tpc_frequency(megahertz(2.0))
///     .optical_frequency(megahertz(64.0))
///     .trigger_frequency(megahertz(16.0))
///     .default_trigger_time(microseconds(0.0))
///     .default_beam_gate_time(microseconds(0.0))
///     .tpc_trigger_offset(-1_600.0)
///     .build();
///
/// let bank = ClockBank::from_config(&config)?;
/// let event_bank = bank.data_for(nanoseconds(0.0), microseconds(5.0), microseconds(2.0));
/// assert_eq!(in_microseconds(event_bank.trigger_time()), 5.0);
/// // The run-level bank still carries the configured default.
/// assert_eq!(in_microseconds(bank.trigger_time()), 0.0);
/// # Ok::<(), detclock::ConfigurationError>(())
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ClockBank {
    tpc_clock: ReadoutClock,
    optical_clock: ReadoutClock,
    trigger_clock: ReadoutClock,
    // Present for completeness but absent unless explicitly configured; no
    // timescale is backed by it.
    external_clock: Option<ReadoutClock>,
    sim_reference_time: Time,
    trigger_time: Time,
    beam_gate_time: Time,
    // Resolved microsecond form of the configured TPC trigger offset.
    tpc_trigger_offset: Time,
    frame_period: Time,
}

impl ClockBank {
    /// Builds the bank from a resolved configuration.
    ///
    /// All clocks start at the configured default trigger time; the TPC
    /// clock is additionally shifted by the TPC trigger offset. Fails with
    /// [`ConfigurationError`] on a non-positive frequency or frame period.
    pub fn from_config(config: &ClockConfig) -> Result<Self, ConfigurationError> {
        let trigger_time = config.default_trigger_time;

        let tpc_clock =
            ReadoutClock::new(trigger_time, config.frame_period, config.tpc_frequency)?;
        // Negative offsets are microseconds as-is; non-negative ones are the
        // tick count at which the trigger arrives, hence the sign flip.
        let tpc_trigger_offset = if config.tpc_trigger_offset < 0.0 {
            microseconds(config.tpc_trigger_offset)
        } else {
            -tpc_clock.tick_to_time(config.tpc_trigger_offset)
        };
        let tpc_clock = tpc_clock.with_start_time(trigger_time + tpc_trigger_offset);

        let optical_clock =
            ReadoutClock::new(trigger_time, config.frame_period, config.optical_frequency)?;
        let trigger_clock =
            ReadoutClock::new(trigger_time, config.frame_period, config.trigger_frequency)?;
        let external_clock = match config.external_frequency {
            Some(frequency) => Some(ReadoutClock::new(
                trigger_time,
                config.frame_period,
                frequency,
            )?),
            None => None,
        };

        Ok(Self {
            tpc_clock,
            optical_clock,
            trigger_clock,
            external_clock,
            sim_reference_time: config.g4_ref_time,
            trigger_time,
            beam_gate_time: config.default_beam_gate_time,
            tpc_trigger_offset,
            frame_period: config.frame_period,
        })
    }

    /// A fresh bank for one event, with the given simulation reference,
    /// trigger and beam-gate times. Pure: `self` is not touched.
    ///
    /// All clock start times are rebuilt exactly as at construction.
    pub fn data_for(
        &self,
        sim_reference_time: Time,
        trigger_time: Time,
        beam_gate_time: Time,
    ) -> Self {
        Self {
            tpc_clock: self
                .tpc_clock
                .with_start_time(trigger_time + self.tpc_trigger_offset),
            optical_clock: self.optical_clock.with_start_time(trigger_time),
            trigger_clock: self.trigger_clock.with_start_time(trigger_time),
            external_clock: self
                .external_clock
                .map(|clock| clock.with_start_time(trigger_time)),
            sim_reference_time,
            trigger_time,
            beam_gate_time,
            tpc_trigger_offset: self.tpc_trigger_offset,
            frame_period: self.frame_period,
        }
    }

    /// Replaces the trigger and beam-gate times in place and moves the TPC
    /// clock's start accordingly.
    ///
    /// Legacy mutating path. Only the TPC clock is rebuilt, matching the
    /// historical service behavior; the other clocks keep the start time they
    /// were built with. There is no guard against being called twice for the
    /// same event: a second call silently overwrites the first.
    pub fn set_trigger_times(&mut self, trigger_time: Time, beam_gate_time: Time) {
        self.trigger_time = trigger_time;
        self.beam_gate_time = beam_gate_time;
        self.tpc_clock = self
            .tpc_clock
            .with_start_time(trigger_time + self.tpc_trigger_offset);
    }

    /// The TPC readout clock.
    pub fn tpc_clock(&self) -> &ReadoutClock {
        &self.tpc_clock
    }

    /// The optical readout clock.
    pub fn optical_clock(&self) -> &ReadoutClock {
        &self.optical_clock
    }

    /// The trigger clock.
    pub fn trigger_clock(&self) -> &ReadoutClock {
        &self.trigger_clock
    }

    /// The external clock, if one was configured. No timescale is backed by
    /// it, so it never participates in conversions.
    pub fn external_clock(&self) -> Option<&ReadoutClock> {
        self.external_clock.as_ref()
    }

    /// Instant, on the electronics axis, at which simulated time zero occurs.
    pub fn sim_reference_time(&self) -> Time {
        self.sim_reference_time
    }

    /// Hardware trigger time, on the electronics axis.
    pub fn trigger_time(&self) -> Time {
        self.trigger_time
    }

    /// Beam-gate opening time, on the electronics axis.
    pub fn beam_gate_time(&self) -> Time {
        self.beam_gate_time
    }

    /// Start of the TPC clock relative to the trigger, as a signed duration.
    pub fn tpc_trigger_offset(&self) -> Time {
        self.tpc_trigger_offset
    }

    /// Duration of one readout frame.
    pub fn frame_period(&self) -> Time {
        self.frame_period
    }
}
