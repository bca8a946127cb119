//! Rule-based classification of incoming alerts as legitimate or spam.
//!
//! Rules run in a fixed order and the first failing rule decides the
//! verdict:
//!
//! 1. the alert type is on the allow-list,
//! 2. the location label is non-empty and coordinates are present,
//! 3. `peopleAffected`, when given, is positive,
//! 4. the alert's group has fewer than `frequency_limit` alerts in the same
//!    hour,
//! 5. the distance field reads as a number.
//!
//! Verification is a pure function of the candidate, the alerts already
//! stored, and the [`VerificationConfig`].

use safenet_alert_models::{Alert, AlertStatus, EmergencyType};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Default number of same-group, same-hour alerts that trips the frequency
/// rule.
pub const DEFAULT_FREQUENCY_LIMIT: usize = 3;

/// How alerts are grouped when counting recent alerts for the frequency
/// rule.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FrequencyKey {
    /// Alerts sharing the candidate's own id.
    ///
    /// This only ever matches an id collision, never a genuinely different
    /// earlier alert, so the rule is effectively inert.
    #[default]
    AlertId,
    /// Alerts reported at the same location label.
    Location,
    /// Alerts carrying the same reporter id. Candidates without a reporter
    /// id match nothing.
    Reporter,
}

impl FrequencyKey {
    /// Whether `existing` falls in the same frequency group as `candidate`.
    #[must_use]
    pub fn same_group(self, candidate: &Alert, existing: &Alert) -> bool {
        match self {
            Self::AlertId => existing.id == candidate.id,
            Self::Location => existing.location == candidate.location,
            Self::Reporter => candidate
                .reporter_id
                .as_ref()
                .is_some_and(|reporter| existing.reporter_id.as_ref() == Some(reporter)),
        }
    }
}

/// Tunable inputs to the verification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Alert types that may pass verification. Compared case-sensitively.
    pub allowed_types: Vec<String>,
    /// Recent alerts in the same group and hour at which a new one is spam.
    pub frequency_limit: usize,
    /// How recent alerts are grouped for the frequency rule.
    pub frequency_key: FrequencyKey,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            allowed_types: EmergencyType::verifiable()
                .iter()
                .map(ToString::to_string)
                .collect(),
            frequency_limit: DEFAULT_FREQUENCY_LIMIT,
            frequency_key: FrequencyKey::default(),
        }
    }
}

/// Which rule rejected an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum SpamReason {
    #[strum(to_string = "type is empty or not on the allow-list")]
    UnrecognizedType,
    #[strum(to_string = "location is empty")]
    MissingLocation,
    #[strum(to_string = "coordinates are missing")]
    MissingCoordinates,
    #[strum(to_string = "people affected must be positive")]
    NonPositivePeopleAffected,
    #[strum(to_string = "too many alerts in the same hour")]
    FrequencyExceeded,
    #[strum(to_string = "distance is not a number")]
    UnreadableDistance,
}

/// Outcome of verifying one alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Legitimate,
    Spam(SpamReason),
}

impl Verdict {
    #[must_use]
    pub const fn is_legitimate(self) -> bool {
        matches!(self, Self::Legitimate)
    }

    /// The status an alert receives when stored with this verdict.
    #[must_use]
    pub const fn status(self) -> AlertStatus {
        match self {
            Self::Legitimate => AlertStatus::Pending,
            Self::Spam(_) => AlertStatus::Spam,
        }
    }
}

/// Applies the verification rules with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct Verifier {
    config: VerificationConfig,
}

impl Verifier {
    #[must_use]
    pub const fn new(config: VerificationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &VerificationConfig {
        &self.config
    }

    /// Classifies `candidate` against the alerts already stored.
    #[must_use]
    pub fn verify(&self, candidate: &Alert, existing: &[Alert]) -> Verdict {
        match self.first_failure(candidate, existing) {
            Some(reason) => Verdict::Spam(reason),
            None => Verdict::Legitimate,
        }
    }

    fn first_failure(&self, candidate: &Alert, existing: &[Alert]) -> Option<SpamReason> {
        if candidate.alert_type.is_empty()
            || !self
                .config
                .allowed_types
                .iter()
                .any(|t| *t == candidate.alert_type)
        {
            return Some(SpamReason::UnrecognizedType);
        }

        if candidate.location.is_empty() {
            return Some(SpamReason::MissingLocation);
        }
        if candidate.coordinates.is_none() {
            return Some(SpamReason::MissingCoordinates);
        }

        if candidate.people_affected.is_some_and(|n| n <= 0) {
            return Some(SpamReason::NonPositivePeopleAffected);
        }

        if self.recent_in_group(candidate, existing) >= self.config.frequency_limit {
            return Some(SpamReason::FrequencyExceeded);
        }

        if candidate.response_value().is_none() {
            return Some(SpamReason::UnreadableDistance);
        }

        None
    }

    /// Counts stored alerts in the candidate's group reported in the same
    /// hour. A candidate without a readable hour matches nothing.
    fn recent_in_group(&self, candidate: &Alert, existing: &[Alert]) -> usize {
        let Some(hour) = candidate.hour() else {
            return 0;
        };

        existing
            .iter()
            .filter(|a| self.config.frequency_key.same_group(candidate, a))
            .filter(|a| a.hour() == Some(hour))
            .count()
    }
}

/// Classifies `candidate` with the default configuration.
#[must_use]
pub fn verify(candidate: &Alert, existing: &[Alert]) -> Verdict {
    Verifier::default().verify(candidate, existing)
}
