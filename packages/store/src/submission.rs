//! The SOS submission flow.
//!
//! A submission passes two gates in sequence. The pre-submission check runs
//! on the raw form signals and can stop the submission outright. If it
//! passes, an alert is built and added to the store, where verification
//! tags it `pending` or `spam`.

use chrono::NaiveTime;
use safenet_alert::{BlockReason, Gate, SubmissionSignals, pre_check};
use safenet_alert_models::{Alert, AlertId, AlertStatus, Coordinates};
use serde::{Deserialize, Serialize};

use crate::AlertStore;

/// Everything a reporter sends with an SOS.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(rename = "type")]
    pub emergency_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub people_affected: Option<i64>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    pub location: String,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default = "default_distance")]
    pub distance: String,
    #[serde(default)]
    pub reporter_id: Option<String>,
    #[serde(default)]
    pub signals: SubmissionSignals,
}

fn default_distance() -> String {
    "0 km".to_string()
}

/// What happened to a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Stopped by the pre-submission check; nothing was stored.
    Blocked(BlockReason),
    /// Stored under `id` with the status verification assigned.
    Recorded { id: AlertId, status: AlertStatus },
}

impl AlertStore {
    /// Runs the submission flow for `submission`, stamping the alert with
    /// `now` as its time of day.
    pub fn submit(&mut self, submission: Submission, now: NaiveTime) -> SubmissionOutcome {
        if let Gate::Blocked(reason) = pre_check(&submission.signals, &self.pre_check) {
            log::warn!(
                "Blocked {} submission at {}: {reason}",
                submission.emergency_type,
                submission.location
            );
            return SubmissionOutcome::Blocked(reason);
        }

        let id = self.allocate_id();
        let alert = Alert {
            id,
            alert_type: submission.emergency_type,
            description: submission.description,
            people_affected: submission.people_affected,
            contact_phone: submission.contact_phone,
            location: submission.location,
            time: now.format("%H:%M").to_string(),
            distance: submission.distance,
            status: AlertStatus::Pending,
            responders: 0,
            coordinates: submission.coordinates,
            reporter_id: submission.reporter_id,
        };

        let status = self.insert(alert).status();
        SubmissionOutcome::Recorded { id, status }
    }
}
