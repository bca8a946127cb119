#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spam screening for SOS alerts.
//!
//! Two independent gates sit between a reporter and the alert store:
//!
//! - [`pre_check`] looks at the raw signals typed into the submission form
//!   and can block a submission before an alert is ever built.
//! - [`verify`] classifies a constructed [`Alert`] as legitimate or spam
//!   against the alerts already stored; spam alerts are still stored, just
//!   tagged.
//!
//! [`Alert`]: safenet_alert_models::Alert

pub mod config;
pub mod pre_check;
pub mod verify;

pub use config::{ConfigError, SafenetConfig};
pub use pre_check::{BlockReason, Gate, PreCheckThresholds, SubmissionSignals, pre_check};
pub use verify::{FrequencyKey, SpamReason, VerificationConfig, Verdict, Verifier, verify};
