//! Display manager for terminal output
//!
//! Color-coded rendering of analyses, replies, history and the static guides.

use crate::assistant::{Reply, ReplySource};
use crate::guide::{Protocol, CONTACTS, EMERGENCY_KIT, PROTOCOLS};
use crate::history::{HealthInsights, HealthRecord};
use crate::repl::session::{ChatMessage, Role};
use crate::i18n::{common_phrases, health_terms, phrase, Language, COMMUNICATION_TIPS};
use crate::triage::{AnalysisResult, RiskLevel, UserProfile};
use colored::*;
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::time::Duration;

/// Recommendations and actions shown in the compact view
const SUMMARY_ITEMS: usize = 3;

/// Symptom text length in history listings
const PREVIEW_CHARS: usize = 50;

pub struct DisplayManager {
    current_bar: Option<ProgressBar>,
    show_progress: bool,
    update_interval: Duration,
}

impl DisplayManager {
    pub fn new() -> Self {
        DisplayManager {
            current_bar: None,
            show_progress: true,
            update_interval: Duration::from_millis(100),
        }
    }

    /// Disable spinners (quiet mode, piped output)
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    pub fn show_banner(&self, version: &str, mode: &str, language: Language) {
        let width = 64;
        let rule = "=".repeat(width).cyan();
        let title = format!("  HealthBuddy {} - {}", version, phrase("welcome", language));
        let info = format!("  Assistant: {} | Language: {}", mode, language);

        println!("\n{}", rule);
        println!("{}", title.bold().cyan());
        println!("{}", info.dimmed());
        println!("{}\n", rule);
        println!(
            "Describe your symptoms (or {} for commands, {} to quit)",
            "/help".green(),
            "/exit".green()
        );
        println!(
            "{}\n",
            "Informational only. Not a substitute for professional medical advice.".dimmed()
        );
    }

    /// Start a spinner; returns `None` when progress display is off
    pub fn start_spinner(&mut self, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }
        self.finish_current();

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(self.update_interval);

        self.current_bar = Some(pb.clone());
        Some(pb)
    }

    pub fn finish_current(&mut self) {
        if let Some(pb) = self.current_bar.take() {
            pb.finish_and_clear();
        }
    }

    /// Render an analysis. The compact view shows the first three
    /// recommendations and actions; `detailed` shows everything.
    pub fn show_analysis(&self, analysis: &AnalysisResult, language: Language, detailed: bool) {
        if analysis.symptoms_found.is_empty() && !analysis.is_emergency {
            self.show_info("No known symptoms recognized. Try describing them in more detail.");
        }

        if analysis.is_emergency {
            println!("\n{}", phrase("emergency", language).white().on_red().bold());
        }

        self.show_section("Analysis Summary");
        println!("  Risk Level:     {}", risk_label(analysis.risk_level));
        println!(
            "  Symptoms Found: {}",
            analysis.symptoms_found.len().to_string().cyan()
        );
        println!(
            "  Confidence:     {}",
            format_confidence(analysis.confidence).cyan()
        );
        if analysis.severity_score > 0.0 {
            println!("  Severity:       {:.1} / 3.0", analysis.severity_score);
        }
        if let Some(label) = analysis.emergency_label() {
            println!("  Emergency Type: {}", label.red().bold());
        }

        if !analysis.symptoms_found.is_empty() {
            self.show_section("Identified Symptoms");
            for symptom in analysis.distinct_symptoms() {
                self.show_bullet(&title_words(symptom));
            }
        }

        if !analysis.categories.is_empty() {
            self.show_section("Affected Systems");
            for category in &analysis.categories {
                self.show_bullet(category.as_str());
            }
        }

        if !analysis.recommendations.is_empty() {
            self.show_section("Recommendations");
            for (i, rec) in limit(&analysis.recommendations, detailed).iter().enumerate() {
                self.show_numbered(i + 1, rec);
            }
        }

        if !analysis.suggested_actions.is_empty() {
            self.show_section("Suggested Actions");
            for action in limit(&analysis.suggested_actions, detailed) {
                self.show_bullet(action);
            }
        }

        if detailed && !analysis.follow_up_questions.is_empty() {
            self.show_section("Follow-up Questions");
            for question in &analysis.follow_up_questions {
                self.show_bullet(question);
            }
        }
        println!();
    }

    pub fn show_reply(&self, reply: &Reply) {
        let label = match reply.source {
            ReplySource::Remote => "Assistant:".green().bold(),
            ReplySource::Fallback => "Assistant (offline guidance):".yellow().bold(),
        };
        println!("\n{}\n{}\n", label, reply.text);
    }

    /// One-line risk summary shown after a chat reply
    pub fn show_turn_summary(&self, analysis: &AnalysisResult) {
        if analysis.symptoms_found.is_empty() {
            return;
        }
        println!(
            "{} {} | {} | {}",
            "→".cyan(),
            format!("Risk: {}", risk_label(analysis.risk_level)),
            format!("Symptoms: {}", analysis.distinct_symptoms().join(", ")).dimmed(),
            "/history for details".dimmed()
        );
        println!();
    }

    /// History listing, oldest first
    pub fn show_history(&self, records: &[&HealthRecord]) {
        if records.is_empty() {
            println!("{}", "No analyses in history yet.".yellow());
            return;
        }

        self.show_section(&format!("Recent Analyses (last {})", records.len()));
        for record in records {
            let marker = if record.analysis.is_emergency {
                "!".red().bold()
            } else {
                " ".normal()
            };
            println!(
                "  {}{} {:<8} {}",
                marker,
                record.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
                risk_label(record.analysis.risk_level),
                record.preview(PREVIEW_CHARS)
            );
        }
        println!();
    }

    pub fn show_insights(&self, insights: Option<&HealthInsights>) {
        let Some(insights) = insights else {
            println!(
                "{}",
                "No health data available yet. Start by describing some symptoms!".yellow()
            );
            return;
        };

        self.show_section("Health Overview");
        println!("  Total Analyses:  {}", insights.total_analyses.to_string().green());
        println!("  Emergency Cases: {}", insights.emergency_cases.to_string().red());
        println!("  Last 7 Days:     {}", insights.recent_activity.to_string().cyan());
        if let Some(top) = insights.top_category() {
            println!("  Most Common:     {}", top.as_str().bold());
        }

        if !insights.common_categories.is_empty() {
            self.show_section("Common Categories");
            let mut counts: Vec<_> = insights.common_categories.iter().collect();
            counts.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
            for (category, count) in counts {
                println!("  {:<16} {}", category.as_str(), "#".repeat(*count).cyan());
            }
        }
        println!();
    }

    pub fn show_profile(&self, profile: &UserProfile) {
        self.show_section("Health Profile");
        let none = "-".dimmed().to_string();
        let list = |items: &[String]| {
            if items.is_empty() {
                none.clone()
            } else {
                items.join(", ")
            }
        };
        println!(
            "  Age Group:   {}",
            profile.age_group.clone().unwrap_or_else(|| none.clone())
        );
        println!("  Conditions:  {}", list(&profile.existing_conditions));
        println!("  Medications: {}", list(&profile.medications));
        println!("  Allergies:   {}", list(&profile.allergies));
        println!();
    }

    pub fn show_guide(&self, language: Language) {
        println!("\n{}", phrase("emergency", language).white().on_red().bold());

        self.show_section("Emergency Protocols");
        for protocol in &PROTOCOLS {
            self.show_protocol(protocol);
        }

        self.show_section("Emergency Contacts");
        for contact in &CONTACTS {
            println!("  {:<22} {}", contact.service, contact.number.bold().green());
        }

        self.show_section("Emergency Kit");
        for item in &EMERGENCY_KIT {
            println!("  ☐ {}", item);
        }
        println!();
    }

    pub fn show_protocol(&self, protocol: &Protocol) {
        println!("\n  {}", protocol.name.bold());
        println!("    {}", "Symptoms:".dimmed());
        for symptom in protocol.symptoms {
            println!("      • {}", symptom);
        }
        println!("    {}", "Actions:".dimmed());
        for action in protocol.actions {
            println!("      • {}", action.yellow());
        }
    }

    /// Conversation so far, oldest first
    pub fn show_transcript(&self, messages: &[&ChatMessage]) {
        if messages.is_empty() {
            println!("{}", "No conversation yet. Describe your symptoms to start.".yellow());
            return;
        }

        self.show_section(&format!("Conversation ({} messages)", messages.len()));
        for message in messages {
            let speaker = match message.role {
                Role::User => speaker_label(message.role).cyan().bold(),
                Role::Assistant => speaker_label(message.role).green().bold(),
            };
            println!("\n{}\n{}", speaker, message.content);
        }
        println!();
    }

    pub fn show_phrases(&self, language: Language) {
        self.show_section(&format!("Health Phrases ({})", language));
        match common_phrases(language) {
            Some(phrases) => {
                for (english, translated) in phrases {
                    println!("  {:<20} {}", english.dimmed(), translated);
                }
            }
            None => self.show_info(&format!("No phrase table for {} yet.", language)),
        }

        match health_terms(language) {
            Some(terms) => {
                self.show_section(&format!("{} Health Terms", language));
                for (term, transliteration, meaning) in terms {
                    println!("  {} ({}) - {}", term, transliteration, meaning);
                }
            }
            None => {
                self.show_section("Communication Tips");
                for tip in &COMMUNICATION_TIPS {
                    self.show_bullet(tip);
                }
            }
        }
        println!();
    }

    pub fn show_error(&self, error: &str) {
        eprintln!("{} {}", "Error:".red().bold(), error.red());
    }

    pub fn show_warning(&self, warning: &str) {
        println!("{} {}", "Warning:".yellow().bold(), warning.yellow());
    }

    pub fn show_info(&self, info: &str) {
        println!("{} {}", "Info:".cyan(), info);
    }

    pub fn clear_screen(&self) -> io::Result<()> {
        execute!(io::stdout(), Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    pub fn show_section(&self, title: &str) {
        println!("\n{}", title.bold().cyan());
        println!("{}", "-".repeat(60).cyan());
    }

    pub fn show_bullet(&self, text: &str) {
        println!("  {} {}", "•".cyan(), text);
    }

    pub fn show_numbered(&self, index: usize, text: &str) {
        println!("  {}. {}", index.to_string().cyan(), text);
    }
}

impl Default for DisplayManager {
    fn default() -> Self {
        Self::new()
    }
}

fn limit(items: &[String], detailed: bool) -> &[String] {
    if detailed {
        items
    } else {
        &items[..items.len().min(SUMMARY_ITEMS)]
    }
}

/// Upper-case risk label colored by severity
pub fn risk_label(risk: RiskLevel) -> ColoredString {
    let text = risk.as_str().to_uppercase();
    match risk {
        RiskLevel::High => text.red().bold(),
        RiskLevel::Medium => text.yellow().bold(),
        RiskLevel::Low => text.green().bold(),
    }
}

/// Confidence as a whole percentage
pub fn format_confidence(confidence: f64) -> String {
    format!("{:.0}%", confidence * 100.0)
}

/// Transcript speaker prefix
pub fn speaker_label(role: Role) -> &'static str {
    match role {
        Role::User => "You:",
        Role::Assistant => "Assistant:",
    }
}

/// Capitalize each word: "shortness of breath" -> "Shortness Of Breath"
pub fn title_words(text: &str) -> String {
    text.split(' ')
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HealthHistory;
    use crate::triage::classify;

    #[test]
    fn test_display_manager_creation() {
        let manager = DisplayManager::new();
        assert!(manager.current_bar.is_none());
        assert!(manager.show_progress);
        assert_eq!(manager.update_interval, Duration::from_millis(100));
    }

    #[test]
    fn test_spinner_lifecycle() {
        let mut manager = DisplayManager::new();
        let pb = manager.start_spinner("Analyzing...");
        assert!(pb.is_some());
        assert!(manager.current_bar.is_some());

        manager.finish_current();
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_spinner_disabled() {
        let mut manager = DisplayManager::new().without_progress();
        assert!(manager.start_spinner("Analyzing...").is_none());
        assert!(manager.current_bar.is_none());
    }

    #[test]
    fn test_format_confidence() {
        assert_eq!(format_confidence(0.0), "0%");
        assert_eq!(format_confidence(0.2), "20%");
        assert_eq!(format_confidence(0.9), "90%");
    }

    #[test]
    fn test_speaker_label() {
        assert_eq!(speaker_label(Role::User), "You:");
        assert_eq!(speaker_label(Role::Assistant), "Assistant:");
    }

    #[test]
    fn test_title_words() {
        assert_eq!(title_words("shortness of breath"), "Shortness Of Breath");
        assert_eq!(title_words("fever"), "Fever");
    }

    #[test]
    fn test_limit() {
        let items: Vec<String> = (0..5).map(|i| i.to_string()).collect();
        assert_eq!(limit(&items, false).len(), 3);
        assert_eq!(limit(&items, true).len(), 5);
        assert!(limit(&[], false).is_empty());
    }

    #[test]
    fn test_risk_label_text() {
        colored::control::set_override(false);
        assert_eq!(risk_label(RiskLevel::Medium).to_string(), "MEDIUM");
    }

    #[test]
    fn test_render_everything() {
        let manager = DisplayManager::new();
        let analysis = classify("severe chest pain and nausea with fever", None);
        manager.show_analysis(&analysis, Language::Urdu, true);
        manager.show_analysis(&AnalysisResult::default(), Language::English, false);
        manager.show_turn_summary(&analysis);

        let mut history = HealthHistory::new();
        history.record("severe chest pain and nausea with fever", analysis);
        manager.show_history(&history.recent(5));
        manager.show_insights(history.insights().as_ref());
        manager.show_insights(None);

        manager.show_profile(&UserProfile::default());
        manager.show_guide(Language::Hindi);
        manager.show_protocol(&PROTOCOLS[1]);
        manager.show_transcript(&[]);
        manager.show_phrases(Language::Urdu);
        manager.show_phrases(Language::Arabic);
    }
}
