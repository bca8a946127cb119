#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! SOS alert records, lifecycle statuses, and volunteer statistics types.
//!
//! These are the plain data types shared by verification, analytics, and
//! the alert store. Field names serialize as camelCase so snapshots read the
//! same way the dashboard consumes them.

pub mod parse;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Identifier of an alert. Unique within a store; ordering carries no meaning.
pub type AlertId = u64;

/// Lifecycle status of an alert.
///
/// `Pending` and `Spam` are assigned by verification when an alert is
/// added. The remaining statuses are reached only through explicit updates.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertStatus {
    /// Verified and waiting for a volunteer
    #[default]
    Pending,
    /// A volunteer has taken the mission
    Accepted,
    /// Responders are on the way
    Responding,
    /// The emergency has been handled
    Completed,
    /// Failed verification
    Spam,
}

impl AlertStatus {
    /// Returns `true` for alerts still waiting on or assigned to a volunteer.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Pending,
            Self::Accepted,
            Self::Responding,
            Self::Completed,
            Self::Spam,
        ]
    }
}

/// Emergency categories known to the submission and verification screens.
///
/// Alert types are stored as free-form strings; this enum names the values
/// the front ends offer. Only the verifiable subset passes verification with
/// the default configuration.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EmergencyType {
    Fire,
    Medical,
    Accident,
    Crime,
    /// Personal safety
    Safety,
    /// Natural disaster
    Disaster,
    Other,
}

impl EmergencyType {
    /// Human-readable label shown on the submission form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fire => "Fire",
            Self::Medical => "Medical Emergency",
            Self::Accident => "Accident",
            Self::Crime => "Crime",
            Self::Safety => "Personal Safety",
            Self::Disaster => "Natural Disaster",
            Self::Other => "Other Emergency",
        }
    }

    /// Whether this type is on the default verification allow-list.
    #[must_use]
    pub const fn is_verifiable(self) -> bool {
        matches!(
            self,
            Self::Fire | Self::Medical | Self::Accident | Self::Crime
        )
    }

    /// Returns the types on the default verification allow-list.
    #[must_use]
    pub fn verifiable() -> Vec<Self> {
        Self::all()
            .iter()
            .copied()
            .filter(|t| t.is_verifiable())
            .collect()
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Fire,
            Self::Medical,
            Self::Accident,
            Self::Crime,
            Self::Safety,
            Self::Disaster,
            Self::Other,
        ]
    }
}

/// A latitude/longitude pair. No range validation is applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// A reported emergency event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Unique identifier.
    pub id: AlertId,
    /// Free-form category (e.g. `"medical"`). Not restricted to
    /// [`EmergencyType`].
    #[serde(rename = "type")]
    pub alert_type: String,
    /// What the reporter wrote about the emergency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Number of people affected, if given. Signed so that bad input can be
    /// represented and rejected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub people_affected: Option<i64>,
    /// Callback number, if given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    /// Free-form place label.
    #[serde(default)]
    pub location: String,
    /// Time of day, `HH:mm`.
    #[serde(default)]
    pub time: String,
    /// Numeric-ish string standing in for the response time.
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub status: AlertStatus,
    /// Number of responders on the alert.
    #[serde(default)]
    pub responders: u32,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    /// Opaque caller/session key, used for reporter-based frequency limiting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporter_id: Option<String>,
}

impl Alert {
    /// Creates an alert with the required fields and no optional metadata.
    #[must_use]
    pub fn new(
        id: AlertId,
        alert_type: impl Into<String>,
        location: impl Into<String>,
        time: impl Into<String>,
        distance: impl Into<String>,
        coordinates: Option<Coordinates>,
    ) -> Self {
        Self {
            id,
            alert_type: alert_type.into(),
            description: None,
            people_affected: None,
            contact_phone: None,
            location: location.into(),
            time: time.into(),
            distance: distance.into(),
            status: AlertStatus::Pending,
            responders: 0,
            coordinates,
            reporter_id: None,
        }
    }

    /// Hour of day read from the `time` field, if it starts with a number.
    ///
    /// Not range checked: `"25:00"` yields `25`.
    #[must_use]
    pub fn hour(&self) -> Option<i64> {
        self.time.split(':').next().and_then(parse::leading_int)
    }

    /// Numeric value of the `distance` field, if it starts with a number.
    #[must_use]
    pub fn response_value(&self) -> Option<f64> {
        parse::leading_float(&self.distance)
    }

    #[must_use]
    pub fn is_spam(&self) -> bool {
        self.status == AlertStatus::Spam
    }
}

/// A partial update to an [`Alert`]. Every `Some` field overwrites the
/// corresponding field; `None` leaves it untouched.
///
/// The alert id is deliberately absent: a patch can never re-key an alert.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPatch {
    #[serde(default, rename = "type")]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub people_affected: Option<i64>,
    #[serde(default)]
    pub contact_phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub distance: Option<String>,
    #[serde(default)]
    pub status: Option<AlertStatus>,
    #[serde(default)]
    pub responders: Option<u32>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub reporter_id: Option<String>,
}

impl AlertPatch {
    /// A patch that only sets the status.
    #[must_use]
    pub fn status(status: AlertStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Shallow-merges this patch over `alert`, last write wins per field.
    pub fn apply(&self, alert: &mut Alert) {
        if let Some(alert_type) = &self.alert_type {
            alert.alert_type.clone_from(alert_type);
        }
        if let Some(description) = &self.description {
            alert.description = Some(description.clone());
        }
        if let Some(people_affected) = self.people_affected {
            alert.people_affected = Some(people_affected);
        }
        if let Some(contact_phone) = &self.contact_phone {
            alert.contact_phone = Some(contact_phone.clone());
        }
        if let Some(location) = &self.location {
            alert.location.clone_from(location);
        }
        if let Some(time) = &self.time {
            alert.time.clone_from(time);
        }
        if let Some(distance) = &self.distance {
            alert.distance.clone_from(distance);
        }
        if let Some(status) = self.status {
            alert.status = status;
        }
        if let Some(responders) = self.responders {
            alert.responders = responders;
        }
        if let Some(coordinates) = self.coordinates {
            alert.coordinates = Some(coordinates);
        }
        if let Some(reporter_id) = &self.reporter_id {
            alert.reporter_id = Some(reporter_id.clone());
        }
    }
}

/// Responder-side metrics. Set from outside the store; never derived from
/// the alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStats {
    pub active_volunteers: u32,
    /// Percentage, 0-100.
    pub success_rate: f64,
    /// Minutes.
    pub avg_response_time: f64,
}

/// A partial update to [`VolunteerStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerStatsPatch {
    #[serde(default)]
    pub active_volunteers: Option<u32>,
    #[serde(default)]
    pub success_rate: Option<f64>,
    #[serde(default)]
    pub avg_response_time: Option<f64>,
}

impl VolunteerStatsPatch {
    pub fn apply(&self, stats: &mut VolunteerStats) {
        if let Some(active_volunteers) = self.active_volunteers {
            stats.active_volunteers = active_volunteers;
        }
        if let Some(success_rate) = self.success_rate {
            stats.success_rate = success_rate;
        }
        if let Some(avg_response_time) = self.avg_response_time {
            stats.avg_response_time = avg_response_time;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_a(id: AlertId) -> Alert {
        Alert::new(
            id,
            "medical",
            "Block A",
            "14:30",
            "5",
            Some(Coordinates::new(1.0, 1.0)),
        )
    }

    #[test]
    fn verifiable_types_match_allow_list() {
        let names: Vec<String> = EmergencyType::verifiable()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(names, vec!["fire", "medical", "accident", "crime"]);
    }

    #[test]
    fn emergency_type_parses_from_wire_name() {
        assert_eq!(
            "disaster".parse::<EmergencyType>().unwrap(),
            EmergencyType::Disaster
        );
        assert!("dance-party".parse::<EmergencyType>().is_err());
        for t in EmergencyType::all() {
            assert!(!t.label().is_empty());
        }
    }

    #[test]
    fn open_statuses() {
        let open: Vec<_> = AlertStatus::all()
            .iter()
            .filter(|s| s.is_open())
            .collect();
        assert_eq!(open, vec![&AlertStatus::Pending, &AlertStatus::Accepted]);
    }

    #[test]
    fn hour_and_response_value() {
        let mut alert = block_a(1);
        assert_eq!(alert.hour(), Some(14));
        assert_eq!(alert.response_value(), Some(5.0));

        alert.time = "late".to_string();
        alert.distance = "n/a".to_string();
        assert_eq!(alert.hour(), None);
        assert_eq!(alert.response_value(), None);
    }

    #[test]
    fn patch_overwrites_only_given_fields() {
        let mut alert = block_a(7);
        let patch = AlertPatch {
            responders: Some(3),
            description: Some("smoke on 2nd floor".to_string()),
            ..AlertPatch::status(AlertStatus::Responding)
        };
        patch.apply(&mut alert);

        assert_eq!(alert.id, 7);
        assert_eq!(alert.status, AlertStatus::Responding);
        assert_eq!(alert.responders, 3);
        assert_eq!(alert.description.as_deref(), Some("smoke on 2nd floor"));
        assert_eq!(alert.location, "Block A");
        assert_eq!(alert.time, "14:30");
    }

    #[test]
    fn stats_patch_merges() {
        let mut stats = VolunteerStats::default();
        VolunteerStatsPatch {
            active_volunteers: Some(12),
            ..VolunteerStatsPatch::default()
        }
        .apply(&mut stats);
        VolunteerStatsPatch {
            success_rate: Some(96.0),
            ..VolunteerStatsPatch::default()
        }
        .apply(&mut stats);

        assert_eq!(stats.active_volunteers, 12);
        assert!((stats.success_rate - 96.0).abs() < f64::EPSILON);
        assert!(stats.avg_response_time.abs() < f64::EPSILON);
    }

    #[test]
    fn alert_json_uses_camel_case() {
        let json = r#"{
            "id": 3,
            "type": "fire",
            "peopleAffected": 2,
            "location": "Block C",
            "time": "09:15",
            "distance": "1.5",
            "status": "accepted",
            "responders": 1,
            "coordinates": { "lat": 28.6, "lng": 77.2 }
        }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.alert_type, "fire");
        assert_eq!(alert.people_affected, Some(2));
        assert_eq!(alert.status, AlertStatus::Accepted);
        assert_eq!(alert.contact_phone, None);

        let out = serde_json::to_value(&alert).unwrap();
        assert_eq!(out["peopleAffected"], 2);
        assert!(out.get("contactPhone").is_none());
    }

    #[test]
    fn alert_json_tolerates_missing_coordinates() {
        let json = r#"{ "id": 1, "type": "fire", "location": "", "time": "", "distance": "" }"#;
        let alert: Alert = serde_json::from_str(json).unwrap();
        assert_eq!(alert.coordinates, None);
        assert_eq!(alert.status, AlertStatus::Pending);
    }
}
