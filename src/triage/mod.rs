//! Symptom triage: keyword tables, classifier and advice
//!
//! The classifier is pure and never fails. Tables are immutable once built
//! and may be shared freely across threads.

pub mod classifier;
pub mod recommendations;
pub mod tables;
pub mod types;

pub use classifier::SymptomClassifier;
pub use recommendations::{build_advice, Advice, FOLLOW_UP_QUESTIONS};
pub use tables::{CategoryKeywords, EmergencyCondition, TriageTables, EMERGENCY_TRIGGER_THRESHOLD};
pub use types::{AnalysisResult, RiskLevel, SymptomCategory, UserProfile};

/// Classify text with the built-in tables
pub fn classify(text: &str, profile: Option<&UserProfile>) -> AnalysisResult {
    SymptomClassifier::builtin().classify(text, profile)
}
