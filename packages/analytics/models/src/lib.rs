#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Derived alert analytics types.
//!
//! [`AnalyticsStats`] is always a function of the full alert list; nothing
//! in it is set independently. Responder-side numbers that are set from
//! outside live in `safenet_alert_models::VolunteerStats` instead.

use std::collections::BTreeMap;

use safenet_alert_models::Coordinates;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Maximum number of entries in [`AnalyticsStats::top_locations`].
pub const TOP_LOCATION_LIMIT: usize = 5;

/// Six-hour time-of-day slot.
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
pub enum TimeBucket {
    /// 00:00-05:59
    #[serde(rename = "00-06")]
    #[strum(serialize = "00-06")]
    Night,
    /// 06:00-11:59
    #[serde(rename = "06-12")]
    #[strum(serialize = "06-12")]
    Morning,
    /// 12:00-17:59
    #[serde(rename = "12-18")]
    #[strum(serialize = "12-18")]
    Afternoon,
    /// 18:00-23:59, and every hour that is missing or out of range
    #[serde(rename = "18-24")]
    #[strum(serialize = "18-24")]
    Evening,
}

impl TimeBucket {
    /// Buckets an hour of day. Missing, negative, and out-of-range hours all
    /// land in [`Self::Evening`].
    #[must_use]
    pub const fn from_hour(hour: Option<i64>) -> Self {
        match hour {
            Some(0..=5) => Self::Night,
            Some(6..=11) => Self::Morning,
            Some(12..=17) => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Night, Self::Morning, Self::Afternoon, Self::Evening]
    }
}

/// One entry of the busiest-locations ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRanking {
    /// Location label as reported.
    pub area: String,
    /// Number of alerts at this location.
    pub alerts: u64,
    /// Mean response value, one decimal, suffixed with `m` (e.g. `"4.5m"`).
    pub response_time: String,
    /// Coordinates of the first alert seen at this location.
    pub coordinates: Option<Coordinates>,
}

/// Aggregate statistics over every stored alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsStats {
    /// Number of alerts in the store.
    pub total_alerts_today: u64,
    /// Alert count per type string, covering every type that occurs.
    pub alerts_by_type: BTreeMap<String, u64>,
    /// Alert count per time-of-day slot. Always holds all four slots.
    pub time_distribution: BTreeMap<TimeBucket, u64>,
    /// Busiest locations, most alerts first.
    pub top_locations: Vec<LocationRanking>,
}

impl Default for AnalyticsStats {
    fn default() -> Self {
        Self {
            total_alerts_today: 0,
            alerts_by_type: BTreeMap::new(),
            time_distribution: TimeBucket::all().iter().map(|b| (*b, 0)).collect(),
            top_locations: Vec::new(),
        }
    }
}

impl AnalyticsStats {
    /// Alerts counted in `bucket`.
    #[must_use]
    pub fn bucket_count(&self, bucket: TimeBucket) -> u64 {
        self.time_distribution.get(&bucket).copied().unwrap_or(0)
    }

    /// Share of all alerts with type `alert_type`, as a rounded percentage.
    /// Zero when there are no alerts.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn type_share(&self, alert_type: &str) -> u64 {
        if self.total_alerts_today == 0 {
            return 0;
        }
        let count = self.alerts_by_type.get(alert_type).copied().unwrap_or(0);
        (count as f64 / self.total_alerts_today as f64 * 100.0).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_boundaries() {
        assert_eq!(TimeBucket::from_hour(Some(0)), TimeBucket::Night);
        assert_eq!(TimeBucket::from_hour(Some(5)), TimeBucket::Night);
        assert_eq!(TimeBucket::from_hour(Some(6)), TimeBucket::Morning);
        assert_eq!(TimeBucket::from_hour(Some(12)), TimeBucket::Afternoon);
        assert_eq!(TimeBucket::from_hour(Some(18)), TimeBucket::Evening);
        assert_eq!(TimeBucket::from_hour(Some(23)), TimeBucket::Evening);
    }

    #[test]
    fn odd_hours_fall_into_evening() {
        assert_eq!(TimeBucket::from_hour(None), TimeBucket::Evening);
        assert_eq!(TimeBucket::from_hour(Some(-1)), TimeBucket::Evening);
        assert_eq!(TimeBucket::from_hour(Some(24)), TimeBucket::Evening);
    }

    #[test]
    fn bucket_names() {
        let names: Vec<&str> = TimeBucket::all().iter().map(AsRef::as_ref).collect();
        assert_eq!(names, vec!["00-06", "06-12", "12-18", "18-24"]);
        assert_eq!("12-18".parse::<TimeBucket>().unwrap(), TimeBucket::Afternoon);
    }

    #[test]
    fn empty_stats_have_all_buckets() {
        let stats = AnalyticsStats::default();
        assert_eq!(stats.time_distribution.len(), 4);
        assert_eq!(stats.type_share("fire"), 0);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["timeDistribution"]["00-06"], 0);
        assert_eq!(json["totalAlertsToday"], 0);
    }

    #[test]
    fn type_share_rounds() {
        let mut stats = AnalyticsStats {
            total_alerts_today: 3,
            ..AnalyticsStats::default()
        };
        stats.alerts_by_type.insert("fire".to_string(), 2);
        stats.alerts_by_type.insert("medical".to_string(), 1);

        assert_eq!(stats.type_share("fire"), 67);
        assert_eq!(stats.type_share("medical"), 33);
        assert_eq!(stats.type_share("crime"), 0);
    }
}
