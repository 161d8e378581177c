//! Resolved timing configuration.
//!
//! Parameter-set parsing is the job of the host framework; this crate only
//! consumes the already-resolved record below. Required fields are enforced
//! by the builder at compile time, so a bank can never be built from a
//! partial configuration.

use crate::units::{Frequency, Time};
use bon::Builder;
use std::fmt;

/// The resolved timing configuration of one analysis run.
///
/// # Examples
///
/// ```
/// use detclock::ClockConfig;
/// use detclock::units::{megahertz, microseconds, nanoseconds};
///
/// let config = ClockConfig::builder()
///     .g4_ref_time(nanoseconds(-1_600_000.0))
///     .frame_period(microseconds(1_638.4))
///     .tpc_frequency(megahertz(2.0))
///     .optical_frequency(megahertz(64.0))
///     .trigger_frequency(megahertz(16.0))
///     .default_trigger_time(microseconds(0.0))
///     .default_beam_gate_time(microseconds(0.0))
///     .tpc_trigger_offset(-1_600.0)
///     .build();
/// ```
#[derive(Builder, Clone, Copy, Debug)]
pub struct ClockConfig {
    /// Instant, on the electronics axis, at which simulated (G4) time zero
    /// occurs. Conventionally quoted in nanoseconds.
    pub g4_ref_time: Time,
    /// Duration of one readout frame.
    pub frame_period: Time,
    /// TPC clock frequency.
    pub tpc_frequency: Frequency,
    /// Optical clock frequency.
    pub optical_frequency: Frequency,
    /// Trigger clock frequency.
    pub trigger_frequency: Frequency,
    /// External clock frequency. Historically never configured; leaving it
    /// out keeps the external clock absent from the bank rather than backing
    /// it with an invented value.
    pub external_frequency: Option<Frequency>,
    /// Trigger time used until per-event values are known.
    pub default_trigger_time: Time,
    /// Beam-gate time used until per-event values are known.
    pub default_beam_gate_time: Time,
    /// Start of the TPC clock relative to the trigger.
    ///
    /// Negative values are a microsecond offset used as-is; non-negative
    /// values are the tick count at which the trigger arrives, converted to
    /// `-(ticks / tpc_frequency)`. Both conventions appear in deployed
    /// configurations, so the dual reading is preserved.
    pub tpc_trigger_offset: f64,
}

/// The error type returned when the timing configuration is unusable.
///
/// Configuration errors are fatal: they are raised at construction, before
/// any event is processed, and are never retried.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ConfigurationError {
    /// A clock frequency was zero or negative.
    NonPositiveFrequency {
        /// The offending value, in megahertz.
        megahertz: f64,
    },
    /// The frame period was zero or negative.
    NonPositiveFramePeriod {
        /// The offending value, in microseconds.
        microseconds: f64,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::NonPositiveFrequency { megahertz } => {
                write!(f, "clock frequency must be positive, got {megahertz} MHz")
            }
            ConfigurationError::NonPositiveFramePeriod { microseconds } => {
                write!(f, "frame period must be positive, got {microseconds} us")
            }
        }
    }
}

impl std::error::Error for ConfigurationError {}
