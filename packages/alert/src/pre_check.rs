//! Pre-submission spam gate.
//!
//! Runs on the raw signals a reporter enters alongside an SOS, before any
//! alert record exists. A blocked submission never reaches the store; an
//! allowed one is still classified by [`crate::verify`] once constructed.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display};

/// Hours of the day (00:00-03:59) treated as unusual for an SOS.
pub const UNUSUAL_HOURS: Range<u32> = 0..4;

/// Raw signals entered on the submission form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionSignals {
    /// Alerts the reporter says they have sent recently.
    pub frequency: u32,
    /// Distance moved since the last alert, in meters.
    pub location_change: f64,
    /// Whether the alert is being sent in the small hours.
    pub unusual_time: bool,
}

impl Default for SubmissionSignals {
    fn default() -> Self {
        Self {
            frequency: 1,
            location_change: 0.0,
            unusual_time: false,
        }
    }
}

/// Returns `true` if `hour` falls in [`UNUSUAL_HOURS`].
#[must_use]
pub fn is_unusual_hour(hour: u32) -> bool {
    UNUSUAL_HOURS.contains(&hour)
}

/// Limits above which a submission is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreCheckThresholds {
    pub max_frequency: u32,
    pub max_location_change_meters: f64,
}

impl Default for PreCheckThresholds {
    fn default() -> Self {
        Self {
            max_frequency: 3,
            max_location_change_meters: 20.0,
        }
    }
}

/// Why a submission was blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum BlockReason {
    #[strum(to_string = "too many recent alerts from this reporter")]
    ExcessiveFrequency,
    #[strum(to_string = "reporter location jumped too far")]
    LocationJump,
    #[strum(to_string = "alert sent at an unusual time")]
    UnusualTime,
}

/// Outcome of the pre-submission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Allowed,
    Blocked(BlockReason),
}

impl Gate {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Checks raw submission signals against `thresholds`.
///
/// Signals are checked in order (frequency, location change, unusual time)
/// and the first one over its limit decides the reason.
#[must_use]
pub fn pre_check(signals: &SubmissionSignals, thresholds: &PreCheckThresholds) -> Gate {
    if signals.frequency > thresholds.max_frequency {
        return Gate::Blocked(BlockReason::ExcessiveFrequency);
    }
    if signals.location_change > thresholds.max_location_change_meters {
        return Gate::Blocked(BlockReason::LocationJump);
    }
    if signals.unusual_time {
        return Gate::Blocked(BlockReason::UnusualTime);
    }
    Gate::Allowed
}
