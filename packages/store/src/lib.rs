#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory SOS alert store.
//!
//! [`AlertStore`] is created once per session and handed by reference to
//! every consumer (submission form, map, volunteer dashboard, analytics
//! page). It owns three pieces of state with different update rules:
//!
//! - the alert list, changed only through the mutation methods,
//! - [`AnalyticsStats`], recomputed from scratch after every alert mutation,
//! - [`VolunteerStats`], set from outside via [`AlertStore::update_stats`]
//!   and never derived.
//!
//! Every method runs to completion synchronously. Alerts are never removed.

pub mod submission;

use std::collections::BTreeSet;

use safenet_alert::{PreCheckThresholds, SafenetConfig, Verdict, Verifier};
use safenet_alert_models::{
    Alert, AlertId, AlertPatch, AlertStatus, VolunteerStats, VolunteerStatsPatch,
};
use safenet_analytics::compute_analytics;
use safenet_analytics_models::AnalyticsStats;
use serde::{Deserialize, Serialize};

pub use submission::{Submission, SubmissionOutcome};

/// A point-in-time copy of everything the store exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSnapshot {
    pub alerts: Vec<Alert>,
    pub stats: VolunteerStats,
    pub analytics: AnalyticsStats,
}

/// The session's alert store.
#[derive(Debug, Clone)]
pub struct AlertStore {
    alerts: Vec<Alert>,
    stats: VolunteerStats,
    analytics: AnalyticsStats,
    verifier: Verifier,
    pre_check: PreCheckThresholds,
    /// Lowest id above every stored id, or `None` once an alert holds
    /// `AlertId::MAX`.
    next_id: Option<AlertId>,
}

impl Default for AlertStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertStore {
    /// Creates an empty store with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&SafenetConfig::default())
    }

    /// Creates an empty store using `config` for verification and the
    /// pre-submission gate.
    #[must_use]
    pub fn with_config(config: &SafenetConfig) -> Self {
        Self {
            alerts: Vec::new(),
            stats: VolunteerStats::default(),
            analytics: compute_analytics(&[]),
            verifier: Verifier::new(config.verification.clone()),
            pre_check: config.pre_check,
            next_id: Some(1),
        }
    }

    /// Verifies `alert` against the stored alerts, stamps it `pending` or
    /// `spam` (ignoring the status it arrived with), appends it, and
    /// recomputes analytics.
    pub fn add_alert(&mut self, alert: Alert) {
        self.insert(alert);
    }

    /// Shallow-merges `patch` over the alert with `id`. Does nothing to the
    /// alert list if no alert matches; analytics are recomputed either way.
    pub fn update_alert(&mut self, id: AlertId, patch: &AlertPatch) {
        if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == id) {
            if alert.is_spam()
                && let Some(status) = patch.status
                && status != AlertStatus::Spam
            {
                log::warn!("Alert {id} was flagged as spam but is being moved to {status}");
            }
            patch.apply(alert);
            log::debug!("Updated alert {id}");
        } else {
            log::debug!("No alert {id} to update");
        }

        self.recompute_analytics();
    }

    /// Marks the alert with `id` completed.
    pub fn complete_alert(&mut self, id: AlertId) {
        self.update_alert(id, &AlertPatch::status(AlertStatus::Completed));
    }

    /// Marks the alert with `id` accepted by a volunteer.
    pub fn accept_alert(&mut self, id: AlertId) {
        self.update_alert(id, &AlertPatch::status(AlertStatus::Accepted));
    }

    /// Marks the alert with `id` as having responders en route.
    pub fn respond_to_alert(&mut self, id: AlertId) {
        self.update_alert(id, &AlertPatch::status(AlertStatus::Responding));
    }

    #[must_use]
    pub fn get_alert_by_id(&self, id: AlertId) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    /// Merges `patch` into the volunteer statistics. Alerts and analytics are
    /// untouched.
    pub fn update_stats(&mut self, patch: &VolunteerStatsPatch) {
        patch.apply(&mut self.stats);
        log::debug!("Volunteer stats now {:?}", self.stats);
    }

    /// All alerts in insertion order.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    #[must_use]
    pub const fn stats(&self) -> &VolunteerStats {
        &self.stats
    }

    #[must_use]
    pub const fn analytics(&self) -> &AnalyticsStats {
        &self.analytics
    }

    #[must_use]
    pub const fn verifier(&self) -> &Verifier {
        &self.verifier
    }

    #[must_use]
    pub const fn pre_check_thresholds(&self) -> &PreCheckThresholds {
        &self.pre_check
    }

    /// Alerts whose type is exactly `alert_type`.
    pub fn alerts_of_type<'a>(&'a self, alert_type: &'a str) -> impl Iterator<Item = &'a Alert> {
        self.alerts.iter().filter(move |a| a.alert_type == alert_type)
    }

    /// Alerts waiting on or assigned to a volunteer.
    pub fn open_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|a| a.status.is_open())
    }

    /// Alerts that have been handled.
    pub fn completed_alerts(&self) -> impl Iterator<Item = &Alert> {
        self.alerts
            .iter()
            .filter(|a| a.status == AlertStatus::Completed)
    }

    /// Responders across all alerts.
    #[must_use]
    pub fn total_responders(&self) -> u64 {
        self.alerts.iter().map(|a| u64::from(a.responders)).sum()
    }

    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            alerts: self.alerts.clone(),
            stats: self.stats,
            analytics: self.analytics.clone(),
        }
    }

    /// Hands out an id no stored alert uses.
    ///
    /// Ids count up past the highest stored id. Once that reaches
    /// `AlertId::MAX`, the lowest unused id is handed out instead.
    pub fn allocate_id(&mut self) -> AlertId {
        if let Some(id) = self.next_id {
            self.next_id = id.checked_add(1);
            return id;
        }

        let used: BTreeSet<AlertId> = self.alerts.iter().map(|a| a.id).collect();
        let id = (1..=AlertId::MAX)
            .find(|id| !used.contains(id))
            .unwrap_or_default();
        log::debug!("No ids left above the highest stored id; reusing {id}");
        id
    }

    fn insert(&mut self, mut alert: Alert) -> Verdict {
        let verdict = self.verifier.verify(&alert, &self.alerts);
        alert.status = verdict.status();

        match verdict {
            Verdict::Legitimate => {
                log::debug!("Alert {} ({}) verified", alert.id, alert.alert_type);
            }
            Verdict::Spam(reason) => {
                log::warn!(
                    "Alert {} ({}) flagged as spam: {reason}",
                    alert.id,
                    alert.alert_type
                );
            }
        }

        self.next_id = self
            .next_id
            .zip(alert.id.checked_add(1))
            .map(|(next, above)| next.max(above));
        self.alerts.push(alert);
        self.recompute_analytics();

        verdict
    }

    fn recompute_analytics(&mut self) {
        self.analytics = compute_analytics(&self.alerts);
    }
}
