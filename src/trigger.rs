//! Per-event trigger resolution.
//!
//! The host framework hands over whatever trigger records it found for an
//! event; this module applies the zero/one/many policy:
//!
//! - no record is not an error: the configured defaults apply;
//! - exactly one record supplies the trigger and beam-gate times;
//! - more than one record is fatal. Only one trigger per event is supported,
//!   and the ambiguity is surfaced rather than resolved here.

use crate::units::Time;
use std::fmt;

/// One hardware trigger record of an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRecord {
    /// Trigger time, on the electronics axis.
    pub trigger_time: Time,
    /// Beam-gate opening time, on the electronics axis.
    pub beam_gate_time: Time,
}

/// The error type returned when an event carries more than one trigger
/// record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbiguousTriggerError {
    /// How many records the event carried.
    pub found: usize,
}

impl fmt::Display for AmbiguousTriggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "found {} trigger records; only one trigger per event is supported",
            self.found
        )
    }
}

impl std::error::Error for AmbiguousTriggerError {}

/// Resolves the trigger and beam-gate times of one event.
///
/// Returns the configured defaults when no record is present, the record's
/// values when exactly one is, and [`AmbiguousTriggerError`] otherwise.
///
/// # Examples
///
/// ```
/// use detclock::{resolve_trigger, TriggerRecord};
/// use detclock::units::{in_microseconds, microseconds};
///
/// let record = TriggerRecord {
///     trigger_time: microseconds(5.0),
///     beam_gate_time: microseconds(2.0),
/// };
/// let (trigger, beam_gate) =
///     resolve_trigger([record], microseconds(0.0), microseconds(0.0))?;
/// assert_eq!(in_microseconds(trigger), 5.0);
/// assert_eq!(in_microseconds(beam_gate), 2.0);
/// # Ok::<(), detclock::AmbiguousTriggerError>(())
/// ```
pub fn resolve_trigger<I>(
    records: I,
    default_trigger_time: Time,
    default_beam_gate_time: Time,
) -> Result<(Time, Time), AmbiguousTriggerError>
where
    I: IntoIterator<Item = TriggerRecord>,
{
    let mut records = records.into_iter();
    match (records.next(), records.next()) {
        (None, _) => Ok((default_trigger_time, default_beam_gate_time)),
        (Some(record), None) => Ok((record.trigger_time, record.beam_gate_time)),
        (Some(_), Some(_)) => Err(AmbiguousTriggerError {
            found: 2 + records.count(),
        }),
    }
}

/// Shifts the configured simulation reference time by the difference between
/// the measured trigger time and the simulated trigger time of this event.
///
/// `sim_trigger_times` follows the same zero/one/many policy as
/// [`resolve_trigger`]: with no simulated trigger the configured reference is
/// returned unchanged; with exactly one, the corrected reference is
/// `configured - trigger_time + sim_trigger_time`.
pub fn correct_sim_reference<I>(
    configured_reference: Time,
    trigger_time: Time,
    sim_trigger_times: I,
) -> Result<Time, AmbiguousTriggerError>
where
    I: IntoIterator<Item = Time>,
{
    let mut times = sim_trigger_times.into_iter();
    match (times.next(), times.next()) {
        (None, _) => Ok(configured_reference),
        (Some(sim_trigger_time), None) => {
            Ok(configured_reference - trigger_time + sim_trigger_time)
        }
        (Some(_), Some(_)) => Err(AmbiguousTriggerError {
            found: 2 + times.count(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{in_microseconds, microseconds};

    #[test]
    fn zero_records_fall_back_to_defaults() {
        let (trigger, beam_gate) =
            resolve_trigger([], microseconds(0.0), microseconds(0.0)).unwrap();
        assert_eq!(in_microseconds(trigger), 0.0);
        assert_eq!(in_microseconds(beam_gate), 0.0);
    }

    #[test]
    fn one_record_wins_over_defaults() {
        let record = TriggerRecord {
            trigger_time: microseconds(5.0),
            beam_gate_time: microseconds(2.0),
        };
        let (trigger, beam_gate) =
            resolve_trigger([record], microseconds(1.0), microseconds(1.0)).unwrap();
        assert_eq!(in_microseconds(trigger), 5.0);
        assert_eq!(in_microseconds(beam_gate), 2.0);
    }

    #[test]
    fn two_records_are_ambiguous() {
        let record = TriggerRecord {
            trigger_time: microseconds(5.0),
            beam_gate_time: microseconds(2.0),
        };
        let err = resolve_trigger([record, record], microseconds(0.0), microseconds(0.0))
            .unwrap_err();
        assert_eq!(err.found, 2);
        assert_eq!(
            err.to_string(),
            "found 2 trigger records; only one trigger per event is supported"
        );

        let err = resolve_trigger(
            [record, record, record],
            microseconds(0.0),
            microseconds(0.0),
        )
        .unwrap_err();
        assert_eq!(err.found, 3);
    }

    #[test]
    fn sim_reference_unchanged_without_sim_trigger() {
        let corrected =
            correct_sim_reference(microseconds(-1_600.0), microseconds(5.0), []).unwrap();
        assert_eq!(in_microseconds(corrected), -1_600.0);
    }

    #[test]
    fn sim_reference_shifted_by_trigger_difference() {
        let corrected = correct_sim_reference(
            microseconds(-1_600.0),
            microseconds(5.0),
            [microseconds(3.0)],
        )
        .unwrap();
        // -1600 - 5 + 3
        assert!((in_microseconds(corrected) + 1_602.0).abs() < 1e-9);
    }

    #[test]
    fn two_sim_triggers_are_ambiguous() {
        let err = correct_sim_reference(
            microseconds(0.0),
            microseconds(0.0),
            [microseconds(1.0), microseconds(2.0)],
        )
        .unwrap_err();
        assert_eq!(err.found, 2);
    }
}
