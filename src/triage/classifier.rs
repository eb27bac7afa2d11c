//! Rule-based symptom classifier
//!
//! Scans case-folded text for keyword substrings, scores intensity, checks
//! emergency clusters in table order and attaches fixed advice.
//!
//! Matching is plain substring search: "chest pain" contains "pain" and a
//! keyword listed under two categories is recorded under both. The advice
//! rules key off exact keyword membership, so the semantics stay as they are.

use crate::triage::recommendations::build_advice;
use crate::triage::tables::{TriageTables, EMERGENCY_TRIGGER_THRESHOLD};
use crate::triage::types::{AnalysisResult, RiskLevel, UserProfile};
use tracing::debug;

/// Severity added per matched keyword when an intensity word is present
const SEVERITY_STEP: f64 = 0.5;
const MAX_SEVERITY: f64 = 3.0;

/// Distinct keyword count that lifts risk to medium
const MEDIUM_SYMPTOM_COUNT: usize = 3;
const MEDIUM_SEVERITY: f64 = 2.0;

const CONFIDENCE_PER_SYMPTOM: f64 = 0.2;
const CONFIDENCE_PER_SEVERITY: f64 = 0.1;
const MAX_CONFIDENCE: f64 = 0.9;

/// Classifier bound to a set of triage tables
#[derive(Debug, Clone, Copy)]
pub struct SymptomClassifier<'t> {
    tables: &'t TriageTables,
}

impl SymptomClassifier<'static> {
    /// Classifier over the shared built-in tables
    pub fn builtin() -> Self {
        Self::new(TriageTables::builtin())
    }
}

impl<'t> SymptomClassifier<'t> {
    pub fn new(tables: &'t TriageTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &'t TriageTables {
        self.tables
    }

    /// Classify a free-text symptom description.
    ///
    /// Total over all inputs. The profile is accepted for callers that
    /// thread it through to display; it does not affect scoring.
    pub fn classify(&self, text: &str, profile: Option<&UserProfile>) -> AnalysisResult {
        if text.is_empty() {
            return AnalysisResult::default();
        }

        let folded = text.to_lowercase();
        let intense = self
            .tables
            .intensity_words()
            .iter()
            .any(|w| folded.contains(w.as_str()));

        let mut result = AnalysisResult::default();
        let mut indicators: usize = 0;

        for entry in self.tables.categories() {
            for keyword in &entry.keywords {
                if !folded.contains(keyword.as_str()) {
                    continue;
                }
                result.symptoms_found.push(keyword.clone());
                if !result.categories.contains(&entry.category) {
                    result.categories.push(entry.category);
                }
                if intense {
                    indicators += 1;
                }
            }
        }

        result.severity_score = (indicators as f64 * SEVERITY_STEP).min(MAX_SEVERITY);

        // First condition in table order wins, not the best match.
        if let Some(condition) = self
            .tables
            .emergencies()
            .iter()
            .find(|c| c.matching_triggers(&folded) >= EMERGENCY_TRIGGER_THRESHOLD)
        {
            result.is_emergency = true;
            result.emergency_type = Some(condition.id.clone());
        }

        let distinct = result.distinct_symptoms().len();

        result.risk_level = if result.is_emergency {
            RiskLevel::High
        } else if distinct >= MEDIUM_SYMPTOM_COUNT || result.severity_score >= MEDIUM_SEVERITY {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        };

        result.confidence = (distinct as f64 * CONFIDENCE_PER_SYMPTOM
            + result.severity_score * CONFIDENCE_PER_SEVERITY)
            .min(MAX_CONFIDENCE);

        let advice = build_advice(
            self.tables,
            result.is_emergency,
            result.emergency_type.as_deref(),
            result.risk_level,
            &result.symptoms_found,
        );
        result.recommendations = advice.recommendations;
        result.suggested_actions = advice.suggested_actions;
        result.follow_up_questions = advice.follow_up_questions;

        debug!(
            symptoms = distinct,
            risk = %result.risk_level,
            emergency = ?result.emergency_type,
            has_profile = profile.is_some_and(|p| !p.is_empty()),
            "classified symptom text"
        );

        result
    }
}

impl Default for SymptomClassifier<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}
