//! Value types produced and consumed by the symptom classifier

use serde::{Deserialize, Serialize};
use std::fmt;

/// Body system a symptom keyword belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SymptomCategory {
    Respiratory,
    Cardiovascular,
    Neurological,
    Digestive,
    Musculoskeletal,
    General,
}

impl SymptomCategory {
    /// All categories in table order
    pub const ALL: [SymptomCategory; 6] = [
        SymptomCategory::Respiratory,
        SymptomCategory::Cardiovascular,
        SymptomCategory::Neurological,
        SymptomCategory::Digestive,
        SymptomCategory::Musculoskeletal,
        SymptomCategory::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SymptomCategory::Respiratory => "Respiratory",
            SymptomCategory::Cardiovascular => "Cardiovascular",
            SymptomCategory::Neurological => "Neurological",
            SymptomCategory::Digestive => "Digestive",
            SymptomCategory::Musculoskeletal => "Musculoskeletal",
            SymptomCategory::General => "General",
        }
    }
}

impl fmt::Display for SymptomCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordinal risk classification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one classification call
///
/// Built fresh on every call and owned by the caller. `symptoms_found` keeps
/// one entry per (category, keyword) hit, so a keyword listed under two
/// categories ("chest pain", "dizziness", "swelling") appears twice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub symptoms_found: Vec<String>,
    pub categories: Vec<SymptomCategory>,
    pub severity_score: f64,
    pub risk_level: RiskLevel,
    pub is_emergency: bool,
    pub emergency_type: Option<String>,
    pub confidence: f64,
    pub recommendations: Vec<String>,
    pub suggested_actions: Vec<String>,
    pub follow_up_questions: Vec<String>,
}

impl AnalysisResult {
    /// Matched keywords with cross-category repeats removed, scan order kept
    pub fn distinct_symptoms(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.symptoms_found.len());
        for symptom in &self.symptoms_found {
            if !seen.contains(&symptom.as_str()) {
                seen.push(symptom);
            }
        }
        seen
    }

    /// Whether a keyword was matched in any category
    pub fn has_symptom(&self, keyword: &str) -> bool {
        self.symptoms_found.iter().any(|s| s == keyword)
    }

    /// Human label for the emergency type, e.g. "heart_attack" -> "Heart Attack"
    pub fn emergency_label(&self) -> Option<String> {
        self.emergency_type.as_deref().map(title_case)
    }
}

/// Optional user context passed alongside symptom text
///
/// Not used for scoring; carried through to the chat context for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub existing_conditions: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
}

impl UserProfile {
    /// Split a comma-separated field, dropping blank entries
    pub fn parse_list(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.age_group.is_none()
            && self.existing_conditions.is_empty()
            && self.medications.is_empty()
            && self.allergies.is_empty()
    }
}

fn title_case(identifier: &str) -> String {
    identifier
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
