//! HealthBuddy - terminal health assistant
//!
//! Rule-based symptom triage with an optional LLM chat companion.
//!
//! # Architecture
//!
//! - **triage**: keyword classifier, risk scoring, emergency detection
//! - **assistant**: remote completion client with offline fallback
//! - **history / i18n / guide**: session records, phrases, emergency guide
//! - **cli / repl / doctor**: command-line surface and interactive chat

pub mod errors;
pub mod triage;

pub use errors::{AssistantError, Result};
pub use triage::{classify, AnalysisResult, RiskLevel, SymptomClassifier, TriageTables, UserProfile};

pub mod assistant;
pub mod guide;
pub mod history;
pub mod i18n;

pub mod cli;
pub mod doctor;
pub mod logging;
pub mod repl;
