//! Fixed advice lists attached to every analysis

use crate::triage::tables::TriageTables;
use crate::triage::types::RiskLevel;

const EMERGENCY_INSTRUCTIONS: [&str; 2] = [
    "Do not drive yourself to the hospital",
    "Have someone stay with you until help arrives",
];

const HIGH_RISK: [&str; 3] = [
    "Contact healthcare provider within 24 hours",
    "Monitor symptoms closely for changes",
    "Avoid strenuous activities",
];

const MEDIUM_RISK: [&str; 3] = [
    "Schedule appointment with healthcare provider",
    "Rest and maintain hydration",
    "Monitor symptoms for improvement or worsening",
];

const LOW_RISK: [&str; 3] = [
    "Self-monitor for 24-48 hours",
    "Practice general wellness habits",
    "Seek care if symptoms persist or worsen",
];

const FEVER_SYMPTOMS: [&str; 2] = ["fever", "chills"];

const FEVER_ACTIONS: [&str; 3] = [
    "Monitor temperature every 4-6 hours",
    "Stay hydrated with water and electrolyte solutions",
    "Use fever-reducing medication as directed",
];

const RESPIRATORY_SYMPTOMS: [&str; 2] = ["cough", "congestion"];

const RESPIRATORY_ACTIONS: [&str; 3] = [
    "Use humidifier or steam inhalation",
    "Stay hydrated to thin mucus",
    "Avoid irritants like smoke and strong odors",
];

/// Questions asked after every non-empty analysis
pub const FOLLOW_UP_QUESTIONS: [&str; 5] = [
    "How long have you been experiencing these symptoms?",
    "Have you noticed any triggers or patterns?",
    "Are you currently taking any medications?",
    "Do you have any known medical conditions?",
    "Have you traveled recently or been around sick individuals?",
];

/// Advice derived from a finished classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Advice {
    pub recommendations: Vec<String>,
    pub suggested_actions: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

/// Build advice from the classification outcome.
///
/// `emergency_type` is only consulted when `is_emergency` is set; an id the
/// tables do not know contributes no response line.
pub fn build_advice(
    tables: &TriageTables,
    is_emergency: bool,
    emergency_type: Option<&str>,
    risk_level: RiskLevel,
    symptoms_found: &[String],
) -> Advice {
    let mut recommendations = Vec::new();

    if is_emergency {
        if let Some(condition) = emergency_type.and_then(|id| tables.emergency(id)) {
            recommendations.push(condition.response.clone());
        }
        recommendations.extend(to_owned(&EMERGENCY_INSTRUCTIONS));
    }

    let risk_advice: &[&str] = match risk_level {
        RiskLevel::High => &HIGH_RISK,
        RiskLevel::Medium => &MEDIUM_RISK,
        RiskLevel::Low => &LOW_RISK,
    };
    recommendations.extend(to_owned(risk_advice));

    let mut suggested_actions = Vec::new();
    if mentions_any(symptoms_found, &FEVER_SYMPTOMS) {
        suggested_actions.extend(to_owned(&FEVER_ACTIONS));
    }
    if mentions_any(symptoms_found, &RESPIRATORY_SYMPTOMS) {
        suggested_actions.extend(to_owned(&RESPIRATORY_ACTIONS));
    }

    Advice {
        recommendations,
        suggested_actions,
        follow_up_questions: to_owned(&FOLLOW_UP_QUESTIONS),
    }
}

fn mentions_any(symptoms_found: &[String], wanted: &[&str]) -> bool {
    symptoms_found.iter().any(|s| wanted.contains(&s.as_str()))
}

fn to_owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|l| l.to_string()).collect()
}
