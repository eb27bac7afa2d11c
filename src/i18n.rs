//! Translated phrases for the supported languages
//!
//! Coverage is partial: lookups fall back to English, then to the key.

use crate::errors::AssistantError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported interface languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    #[default]
    English,
    Urdu,
    Hindi,
    Arabic,
    Spanish,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Urdu,
        Language::Hindi,
        Language::Arabic,
        Language::Spanish,
    ];

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Urdu => "Urdu",
            Language::Hindi => "Hindi",
            Language::Arabic => "Arabic",
            Language::Spanish => "Spanish",
        }
    }

    /// ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
            Language::Hindi => "hi",
            Language::Arabic => "ar",
            Language::Spanish => "es",
        }
    }

    /// Match a language by name or code, ignoring case
    pub fn parse(input: &str) -> Option<Language> {
        let wanted = input.trim();
        Self::ALL.into_iter().find(|lang| {
            lang.name().eq_ignore_ascii_case(wanted) || lang.code().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = AssistantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::parse(s).ok_or_else(|| {
            AssistantError::ConfigError(format!(
                "Unsupported language: {} (expected one of English, Urdu, Hindi, Arabic, Spanish)",
                s
            ))
        })
    }
}

const EMERGENCY: &[(Language, &str)] = &[
    (Language::English, "🚨 EMERGENCY - SEEK IMMEDIATE MEDICAL ATTENTION"),
    (Language::Urdu, "🚨 ایمرجنسی - فوری طبی امداد حاصل کریں"),
    (Language::Hindi, "🚨 आपातकाल - तत्काल चिकित्सा सहायता लें"),
    (Language::Spanish, "🚨 EMERGENCIA - BUSQUE ATENCIÓN MÉDICA INMEDIATA"),
];

const WELCOME: &[(Language, &str)] = &[
    (Language::English, "Welcome to HealthBuddy 🏥"),
    (Language::Urdu, "ہیلتھ بڈی میں خوش آمدید 🏥"),
    (Language::Hindi, "हेल्थबडी में आपका स्वागत है 🏥"),
    (Language::Spanish, "Bienvenido a HealthBuddy 🏥"),
];

fn table(key: &str) -> Option<&'static [(Language, &'static str)]> {
    match key {
        "emergency" => Some(EMERGENCY),
        "welcome" => Some(WELCOME),
        _ => None,
    }
}

/// Look up a phrase: translation, then English, then the key itself
pub fn phrase(key: &str, language: Language) -> String {
    let Some(entries) = table(key) else {
        return key.to_string();
    };
    let lookup = |lang: Language| entries.iter().find(|(l, _)| *l == lang).map(|(_, p)| *p);
    lookup(language)
        .or_else(|| lookup(Language::English))
        .unwrap_or(key)
        .to_string()
}

/// Everyday phrases as (English prompt, translation) pairs
pub fn common_phrases(language: Language) -> Option<&'static [(&'static str, &'static str)]> {
    match language {
        Language::English => Some(&[
            ("I need help", "I need medical assistance"),
            ("Where is hospital?", "Can you direct me to the nearest hospital?"),
            ("I have pain", "I'm experiencing pain and need help"),
        ]),
        Language::Urdu => Some(&[
            ("I need help", "مجھے طبی امداد کی ضرورت ہے"),
            ("Where is hospital?", "آپ مجھے قریبی ہسپتال کا راستہ بتا سکتے ہیں؟"),
            ("I have pain", "مجھے درد ہو رہا ہے اور مدد کی ضرورت ہے"),
        ]),
        Language::Hindi => Some(&[
            ("I need help", "मुझे चिकित्सा सहायता की आवश्यकता है"),
            ("Where is hospital?", "क्या आप मुझे निकटतम अस्पताल का रास्ता बता सकते हैं?"),
            ("I have pain", "मुझे दर्द हो रहा है और मदद की जरूरत है"),
        ]),
        Language::Arabic | Language::Spanish => None,
    }
}

/// Basic health vocabulary as (term, transliteration, meaning)
pub fn health_terms(language: Language) -> Option<&'static [(&'static str, &'static str, &'static str)]> {
    match language {
        Language::Urdu => Some(&[
            ("درد", "Dard", "Pain"),
            ("بخار", "Bukhaar", "Fever"),
            ("کھانسی", "Khansi", "Cough"),
            ("متلی", "Matli", "Nausea"),
        ]),
        Language::Hindi => Some(&[
            ("दर्द", "Dard", "Pain"),
            ("बुखार", "Bukhaar", "Fever"),
            ("खांसी", "Khaansi", "Cough"),
            ("जी मिचलाना", "Ji michlana", "Nausea"),
        ]),
        _ => None,
    }
}

/// Tips shown when no vocabulary list exists for a language
pub const COMMUNICATION_TIPS: [&str; 4] = [
    "Speak slowly and clearly",
    "Use simple words",
    "Point to body parts if needed",
    "Keep emergency phrases saved",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_by_name_and_code() {
        assert_eq!(Language::parse("urdu"), Some(Language::Urdu));
        assert_eq!(Language::parse("HI"), Some(Language::Hindi));
        assert_eq!(Language::parse(" Spanish "), Some(Language::Spanish));
        assert_eq!(Language::parse("klingon"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(matches!(err, AssistantError::ConfigError(_)));
    }

    #[test]
    fn test_phrase_translation() {
        assert!(phrase("emergency", Language::Spanish).contains("EMERGENCIA"));
    }

    #[test]
    fn test_phrase_falls_back_to_english() {
        assert_eq!(
            phrase("emergency", Language::Arabic),
            phrase("emergency", Language::English)
        );
    }

    #[test]
    fn test_phrase_unknown_key() {
        assert_eq!(phrase("goodbye", Language::Urdu), "goodbye");
    }

    #[test]
    fn test_common_phrases_coverage() {
        assert_eq!(common_phrases(Language::Hindi).map(|p| p.len()), Some(3));
        assert!(common_phrases(Language::Arabic).is_none());
        assert!(health_terms(Language::English).is_none());
    }
}
