//! Plain-text dashboard summary of a store.

use safenet_alert::pre_check::is_unusual_hour;
use safenet_alert_models::{Alert, EmergencyType};
use safenet_analytics_models::TimeBucket;
use safenet_store::AlertStore;

/// Renders the counts the volunteer dashboard and analytics page show.
#[must_use]
pub fn render(store: &AlertStore) -> String {
    let analytics = store.analytics();
    let mut lines = Vec::new();

    lines.push(format!(
        "Alerts: {} (open {}, completed {}, responders {})",
        analytics.total_alerts_today,
        store.open_alerts().count(),
        store.completed_alerts().count(),
        store.total_responders()
    ));

    let late_night = store
        .alerts()
        .iter()
        .filter_map(Alert::hour)
        .filter_map(|h| u32::try_from(h).ok())
        .filter(|h| is_unusual_hour(*h))
        .count();
    lines.push(format!("Reported 00:00-03:59: {late_night}"));

    lines.push("By type:".to_string());
    for (alert_type, count) in &analytics.alerts_by_type {
        let label = alert_type
            .parse::<EmergencyType>()
            .map_or("Unlisted", EmergencyType::label);
        let open = store
            .alerts_of_type(alert_type)
            .filter(|a| a.status.is_open())
            .count();
        lines.push(format!(
            "  {label} ({alert_type}): {count} ({}%), {open} open",
            analytics.type_share(alert_type)
        ));
    }

    lines.push("By time:".to_string());
    for bucket in TimeBucket::all() {
        lines.push(format!("  {bucket}: {}", analytics.bucket_count(*bucket)));
    }

    lines.push("Top locations:".to_string());
    for location in &analytics.top_locations {
        lines.push(format!(
            "  {}: {} alerts, {}",
            location.area, location.alerts, location.response_time
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use safenet_alert_models::Coordinates;

    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn summarizes_demo_scenario() {
        let mut store = AlertStore::new();
        Scenario::from_toml(include_str!("../scenarios/demo.toml"))
            .unwrap()
            .run(&mut store)
            .unwrap();

        let report = render(&store);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines[0], "Alerts: 4 (open 1, completed 1, responders 3)");
        assert_eq!(lines[1], "Reported 00:00-03:59: 0");
        assert!(lines.contains(&"  Crime (crime): 1 (25%), 1 open"));
        assert!(lines.contains(&"  Natural Disaster (disaster): 1 (25%), 0 open"));
        assert!(lines.contains(&"  Medical Emergency (medical): 1 (25%), 0 open"));
        assert!(lines.contains(&"  06-12: 3"));
        assert!(lines.contains(&"  18-24: 1"));
        assert!(lines.contains(&"  Karol Bagh: 2 alerts, 6.0m"));
    }

    #[test]
    fn flags_late_night_and_unlisted_types() {
        let mut store = AlertStore::new();
        for (id, alert_type, time) in [(1, "fire", "02:15"), (2, "dance-party", "03:59")] {
            store.add_alert(Alert::new(
                id,
                alert_type,
                "Block A",
                time,
                "1",
                Some(Coordinates::new(0.0, 0.0)),
            ));
        }
        store.add_alert(Alert::new(
            3,
            "fire",
            "Block B",
            "04:00",
            "1",
            Some(Coordinates::new(0.0, 0.0)),
        ));

        let report = render(&store);
        assert!(report.contains("Reported 00:00-03:59: 2"));
        assert!(report.contains("  Unlisted (dance-party): 1 (33%), 0 open"));
        assert!(report.contains("  Fire (fire): 2 (67%), 2 open"));
    }

    #[test]
    fn empty_store() {
        let report = render(&AlertStore::new());
        assert!(report.starts_with("Alerts: 0 (open 0, completed 0, responders 0)"));
        assert!(report.contains("  00-06: 0"));
        assert!(report.ends_with("Top locations:"));
    }
}
