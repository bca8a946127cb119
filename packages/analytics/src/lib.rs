#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dashboard analytics over the alert list.
//!
//! [`compute_analytics`] is a full recomputation: it folds every alert each
//! time it is called and keeps no state between calls. The store calls it
//! after every alert mutation.

use std::collections::BTreeMap;

use safenet_alert_models::{Alert, Coordinates};
use safenet_analytics_models::{AnalyticsStats, LocationRanking, TOP_LOCATION_LIMIT, TimeBucket};

/// Derives [`AnalyticsStats`] from `alerts`.
///
/// Locations are ranked by alert count, most first. Locations with equal
/// counts keep the order in which they first appear in `alerts`.
#[must_use]
pub fn compute_analytics(alerts: &[Alert]) -> AnalyticsStats {
    let mut stats = AnalyticsStats {
        total_alerts_today: alerts.len() as u64,
        ..AnalyticsStats::default()
    };

    for alert in alerts {
        *stats
            .alerts_by_type
            .entry(alert.alert_type.clone())
            .or_insert(0) += 1;
        *stats
            .time_distribution
            .entry(TimeBucket::from_hour(alert.hour()))
            .or_insert(0) += 1;
    }

    stats.top_locations = rank_locations(alerts);

    log::trace!(
        "Analytics: {} alerts, {} types, {} ranked locations",
        stats.total_alerts_today,
        stats.alerts_by_type.len(),
        stats.top_locations.len()
    );

    stats
}

struct LocationTally<'a> {
    area: &'a str,
    count: u64,
    total_response: f64,
    coordinates: Option<Coordinates>,
}

fn rank_locations(alerts: &[Alert]) -> Vec<LocationRanking> {
    let mut slots: BTreeMap<&str, usize> = BTreeMap::new();
    let mut tallies: Vec<LocationTally<'_>> = Vec::new();

    for alert in alerts {
        let slot = *slots.entry(alert.location.as_str()).or_insert_with(|| {
            tallies.push(LocationTally {
                area: &alert.location,
                count: 0,
                total_response: 0.0,
                coordinates: alert.coordinates,
            });
            tallies.len() - 1
        });

        let tally = &mut tallies[slot];
        tally.count += 1;
        tally.total_response += alert.response_value().unwrap_or(0.0);
    }

    // Stable sort: equal counts stay in first-seen order.
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies.truncate(TOP_LOCATION_LIMIT);

    tallies
        .into_iter()
        .map(|tally| LocationRanking {
            area: tally.area.to_string(),
            alerts: tally.count,
            response_time: format_minutes(mean(tally.total_response, tally.count)),
            coordinates: tally.coordinates,
        })
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean(total: f64, count: u64) -> f64 {
    total / count as f64
}

/// Formats a response value with one decimal and an `m` suffix.
///
/// Values exactly halfway between two tenths round away from zero, so
/// `2.25` reads `2.3m`. Values that only look halfway in decimal (`0.15` is
/// stored just below it) round by their exact binary value.
#[allow(clippy::float_cmp)]
fn format_minutes(value: f64) -> String {
    if value.is_nan() {
        "NaNm".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "Infinitym".to_string()
        } else {
            "-Infinitym".to_string()
        }
    } else {
        let scaled = value * 10.0;
        let exact_tie = scaled.fract().abs() == 0.5 && value.mul_add(10.0, -scaled) == 0.0;
        let rounded = if exact_tie { scaled.round() / 10.0 } else { value };
        format!("{rounded:.1}m")
    }
}
