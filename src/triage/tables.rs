//! Keyword and emergency-condition tables used by the classifier
//!
//! Tables are built once (the built-in set, or a custom TOML file loaded at
//! startup), validated, and only ever handed out by shared reference.

use crate::errors::{AssistantError, Result};
use crate::triage::types::SymptomCategory;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;
use tracing::info;

/// Minimum number of triggers that must be present for a condition to fire
pub const EMERGENCY_TRIGGER_THRESHOLD: usize = 2;

static BUILTIN: LazyLock<TriageTables> = LazyLock::new(TriageTables::standard);

/// Keywords owned by one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryKeywords {
    pub category: SymptomCategory,
    pub keywords: Vec<String>,
}

/// Named cluster of trigger keywords with a fixed warning message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyCondition {
    pub id: String,
    pub triggers: Vec<String>,
    pub response: String,
}

impl EmergencyCondition {
    /// Number of triggers appearing as substrings of already case-folded text
    pub fn matching_triggers(&self, folded_text: &str) -> usize {
        self.triggers
            .iter()
            .filter(|t| folded_text.contains(t.as_str()))
            .count()
    }
}

/// Complete lookup configuration for the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageTables {
    #[serde(default = "default_intensity_words")]
    intensity_words: Vec<String>,
    categories: Vec<CategoryKeywords>,
    #[serde(default)]
    emergencies: Vec<EmergencyCondition>,
}

impl TriageTables {
    /// Shared built-in tables, initialized on first use
    pub fn builtin() -> &'static TriageTables {
        &BUILTIN
    }

    /// Build an owned copy of the built-in tables
    pub fn standard() -> Self {
        Self {
            intensity_words: default_intensity_words(),
            categories: vec![
                category(
                    SymptomCategory::Respiratory,
                    &["cough", "shortness of breath", "chest pain", "wheezing", "congestion", "sore throat"],
                ),
                category(
                    SymptomCategory::Cardiovascular,
                    &["chest pain", "palpitations", "dizziness", "swelling", "irregular heartbeat"],
                ),
                category(
                    SymptomCategory::Neurological,
                    &["headache", "dizziness", "numbness", "vision changes", "confusion", "seizure"],
                ),
                category(
                    SymptomCategory::Digestive,
                    &["nausea", "vomiting", "diarrhea", "constipation", "abdominal pain", "bloating"],
                ),
                category(
                    SymptomCategory::Musculoskeletal,
                    &["joint pain", "back pain", "muscle ache", "stiffness", "swelling"],
                ),
                category(
                    SymptomCategory::General,
                    &["fever", "fatigue", "weakness", "weight loss", "chills", "sweating"],
                ),
            ],
            emergencies: vec![
                emergency(
                    "heart_attack",
                    &["chest pain", "shortness of breath", "pain in arms", "nausea", "cold sweat"],
                    "🚨 CALL EMERGENCY SERVICES IMMEDIATELY - Possible heart attack",
                ),
                emergency(
                    "stroke",
                    &["face drooping", "arm weakness", "speech difficulty", "confusion"],
                    "🚨 CALL EMERGENCY SERVICES IMMEDIATELY - Possible stroke",
                ),
                emergency(
                    "severe_allergy",
                    &["difficulty breathing", "swelling face", "swelling throat", "hives", "dizziness"],
                    "🚨 CALL EMERGENCY SERVICES - Severe allergic reaction",
                ),
            ],
        }
    }

    /// Parse tables from TOML, lowercasing keywords and validating
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut tables: TriageTables = toml::from_str(contents)
            .map_err(|e| AssistantError::InvalidTables(format!("Failed to parse tables: {}", e)))?;
        tables.normalize();
        tables.validate()?;
        Ok(tables)
    }

    /// Load tables from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let tables = Self::from_toml_str(&contents)?;
        info!(
            path = %path.display(),
            categories = tables.categories.len(),
            emergencies = tables.emergencies.len(),
            "loaded custom triage tables"
        );
        Ok(tables)
    }

    /// Check structural invariants the classifier relies on
    pub fn validate(&self) -> Result<()> {
        if self.categories.is_empty() {
            return Err(AssistantError::InvalidTables(
                "at least one category is required".to_string(),
            ));
        }

        for (i, entry) in self.categories.iter().enumerate() {
            if self.categories[..i].iter().any(|c| c.category == entry.category) {
                return Err(AssistantError::InvalidTables(format!(
                    "category {} listed more than once",
                    entry.category
                )));
            }
            if entry.keywords.iter().any(|k| k.trim().is_empty()) {
                return Err(AssistantError::InvalidTables(format!(
                    "empty keyword in {}",
                    entry.category
                )));
            }
        }

        for (i, condition) in self.emergencies.iter().enumerate() {
            if condition.id.trim().is_empty() {
                return Err(AssistantError::InvalidTables(
                    "emergency condition with empty id".to_string(),
                ));
            }
            if self.emergencies[..i].iter().any(|c| c.id == condition.id) {
                return Err(AssistantError::InvalidTables(format!(
                    "emergency condition {} listed more than once",
                    condition.id
                )));
            }
            if condition.triggers.len() < EMERGENCY_TRIGGER_THRESHOLD {
                return Err(AssistantError::InvalidTables(format!(
                    "emergency condition {} needs at least {} triggers",
                    condition.id, EMERGENCY_TRIGGER_THRESHOLD
                )));
            }
            if condition.triggers.iter().any(|t| t.trim().is_empty()) {
                return Err(AssistantError::InvalidTables(format!(
                    "empty trigger in {}",
                    condition.id
                )));
            }
            if condition.response.trim().is_empty() {
                return Err(AssistantError::InvalidTables(format!(
                    "emergency condition {} has no response",
                    condition.id
                )));
            }
        }

        if self.intensity_words.iter().any(|w| w.trim().is_empty()) {
            return Err(AssistantError::InvalidTables(
                "empty intensity word".to_string(),
            ));
        }

        Ok(())
    }

    pub fn categories(&self) -> &[CategoryKeywords] {
        &self.categories
    }

    pub fn emergencies(&self) -> &[EmergencyCondition] {
        &self.emergencies
    }

    pub fn intensity_words(&self) -> &[String] {
        &self.intensity_words
    }

    /// Look up an emergency condition by identifier
    pub fn emergency(&self, id: &str) -> Option<&EmergencyCondition> {
        self.emergencies.iter().find(|c| c.id == id)
    }

    /// Total keyword entries across all categories
    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }

    // Matching runs against lowercased text, so stored terms must be lowercase too.
    fn normalize(&mut self) {
        for entry in &mut self.categories {
            for keyword in &mut entry.keywords {
                *keyword = keyword.to_lowercase();
            }
        }
        for condition in &mut self.emergencies {
            for trigger in &mut condition.triggers {
                *trigger = trigger.to_lowercase();
            }
        }
        for word in &mut self.intensity_words {
            *word = word.to_lowercase();
        }
    }
}

impl Default for TriageTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn default_intensity_words() -> Vec<String> {
    ["severe", "intense", "unbearable", "worst"]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

fn category(category: SymptomCategory, keywords: &[&str]) -> CategoryKeywords {
    CategoryKeywords {
        category,
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

fn emergency(id: &str, triggers: &[&str], response: &str) -> EmergencyCondition {
    EmergencyCondition {
        id: id.to_string(),
        triggers: triggers.iter().map(|t| t.to_string()).collect(),
        response: response.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CUSTOM_TABLES: &str = r#"
intensity_words = ["Severe"]

[[categories]]
category = "General"
keywords = ["Fever", "chills"]

[[emergencies]]
id = "sepsis"
triggers = ["fever", "confusion"]
response = "Seek emergency care"
"#;

    #[test]
    fn test_builtin_is_valid() {
        let tables = TriageTables::builtin();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.categories().len(), 6);
        assert_eq!(tables.emergencies().len(), 3);
        assert_eq!(tables.keyword_count(), 34);
    }

    #[test]
    fn test_builtin_emergency_order() {
        let ids: Vec<&str> = TriageTables::builtin()
            .emergencies()
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["heart_attack", "stroke", "severe_allergy"]);
    }

    #[test]
    fn test_builtin_is_shared() {
        assert!(std::ptr::eq(TriageTables::builtin(), TriageTables::builtin()));
    }

    #[test]
    fn test_from_toml_lowercases() {
        let tables = TriageTables::from_toml_str(CUSTOM_TABLES).unwrap();
        assert_eq!(tables.categories()[0].keywords[0], "fever");
        assert_eq!(tables.intensity_words(), &["severe".to_string()]);
        assert!(tables.emergency("sepsis").is_some());
    }

    #[test]
    fn test_intensity_words_default_when_missing() {
        let toml = r#"
[[categories]]
category = "Digestive"
keywords = ["nausea"]
"#;
        let tables = TriageTables::from_toml_str(toml).unwrap();
        assert_eq!(tables.intensity_words().len(), 4);
        assert!(tables.emergencies().is_empty());
    }

    #[test]
    fn test_rejects_empty_keyword() {
        let toml = r#"
[[categories]]
category = "Digestive"
keywords = ["nausea", "  "]
"#;
        assert!(matches!(
            TriageTables::from_toml_str(toml),
            Err(AssistantError::InvalidTables(_))
        ));
    }

    #[test]
    fn test_rejects_single_trigger_emergency() {
        let toml = r#"
[[categories]]
category = "General"
keywords = ["fever"]

[[emergencies]]
id = "lonely"
triggers = ["fever"]
response = "Call someone"
"#;
        let err = TriageTables::from_toml_str(toml).unwrap_err();
        assert!(err.to_string().contains("lonely"));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let toml = r#"
[[categories]]
category = "General"
keywords = ["fever"]

[[categories]]
category = "General"
keywords = ["chills"]
"#;
        assert!(TriageTables::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_rejects_unknown_category() {
        let toml = r#"
[[categories]]
category = "Dermatological"
keywords = ["rash"]
"#;
        assert!(TriageTables::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CUSTOM_TABLES.as_bytes()).unwrap();
        let tables = TriageTables::from_file(file.path()).unwrap();
        assert_eq!(tables.categories().len(), 1);
    }

    #[test]
    fn test_from_missing_file() {
        let result = TriageTables::from_file(Path::new("/nonexistent/tables.toml"));
        assert!(matches!(result, Err(AssistantError::IoError(_))));
    }

    #[test]
    fn test_matching_triggers() {
        let stroke = TriageTables::builtin().emergency("stroke").unwrap();
        assert_eq!(stroke.matching_triggers("face drooping and confusion"), 2);
        assert_eq!(stroke.matching_triggers("nothing relevant"), 0);
    }
}
