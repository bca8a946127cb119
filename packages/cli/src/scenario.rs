//! Scripted store sessions.
//!
//! A scenario is a TOML file with an ordered list of `[[step]]` tables. Each
//! step is one thing a front end would do to the store: submit an SOS, add a
//! raw alert, move an alert through the volunteer lifecycle, or set the
//! volunteer statistics.

use std::path::Path;

use chrono::NaiveTime;
use safenet_alert_models::{Alert, AlertId, AlertPatch, VolunteerStatsPatch};
use safenet_store::{AlertStore, Submission, SubmissionOutcome};
use serde::Deserialize;

use crate::CliError;

/// A named list of steps.
#[derive(Debug, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

/// One action against the store.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Run the submission flow. `at` is `HH:MM`; the local clock is used when
    /// it is omitted.
    Submit {
        #[serde(default)]
        at: Option<String>,
        submission: Submission,
    },
    /// Add a fully formed alert, bypassing the pre-submission check.
    AddAlert { alert: Alert },
    Update { id: AlertId, patch: AlertPatch },
    Accept { id: AlertId },
    Respond { id: AlertId },
    Complete { id: AlertId },
    UpdateStats { stats: VolunteerStatsPatch },
}

impl Scenario {
    /// Parses a scenario from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Scenario`] if the text is not a valid scenario.
    pub fn from_toml(text: &str) -> Result<Self, CliError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a scenario file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text)
    }

    /// Applies every step to `store` in order.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::InvalidTime`] if a submit step has a malformed
    /// `at`. Steps before it have already been applied.
    pub fn run(self, store: &mut AlertStore) -> Result<(), CliError> {
        log::info!(
            "Running scenario '{}' ({} steps)",
            self.name.as_deref().unwrap_or("unnamed"),
            self.steps.len()
        );

        for (index, step) in self.steps.into_iter().enumerate() {
            log::debug!("Step {}: {step:?}", index + 1);
            apply(store, step)?;
        }

        Ok(())
    }
}

fn apply(store: &mut AlertStore, step: Step) -> Result<(), CliError> {
    match step {
        Step::Submit { at, submission } => {
            let now = match at {
                Some(value) => parse_time(&value)?,
                None => chrono::Local::now().time(),
            };
            match store.submit(submission, now) {
                SubmissionOutcome::Blocked(reason) => {
                    log::info!("Submission blocked: {reason}");
                }
                SubmissionOutcome::Recorded { id, status } => {
                    log::info!("Submission recorded as alert {id} ({status})");
                }
            }
        }
        Step::AddAlert { alert } => {
            let id = alert.id;
            store.add_alert(alert);
            if let Some(stored) = store.get_alert_by_id(id) {
                log::info!("Added alert {id} ({})", stored.status);
            }
        }
        Step::Update { id, patch } => store.update_alert(id, &patch),
        Step::Accept { id } => store.accept_alert(id),
        Step::Respond { id } => store.respond_to_alert(id),
        Step::Complete { id } => store.complete_alert(id),
        Step::UpdateStats { stats } => store.update_stats(&stats),
    }

    Ok(())
}

fn parse_time(value: &str) -> Result<NaiveTime, CliError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|source| CliError::InvalidTime {
        value: value.to_string(),
        source,
    })
}
