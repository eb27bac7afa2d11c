//! Command handler for chat built-in commands

use crate::guide::{find_protocol, PROTOCOLS};
use crate::i18n::Language;
use crate::repl::display::DisplayManager;
use crate::repl::session::SessionManager;
use crate::triage::{SymptomClassifier, UserProfile};
use anyhow::Result;
use colored::*;

/// Default number of history entries listed
const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Profile fields editable from the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    AgeGroup,
    Conditions,
    Medications,
    Allergies,
}

impl ProfileField {
    fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "age" | "age_group" => Some(ProfileField::AgeGroup),
            "conditions" | "condition" => Some(ProfileField::Conditions),
            "medications" | "meds" => Some(ProfileField::Medications),
            "allergies" | "allergy" => Some(ProfileField::Allergies),
            _ => None,
        }
    }

    /// Apply a value; an empty value clears the field
    pub fn apply(&self, profile: &mut UserProfile, value: &str) {
        let value = value.trim();
        match self {
            ProfileField::AgeGroup => {
                profile.age_group = (!value.is_empty()).then(|| value.to_string());
            }
            ProfileField::Conditions => profile.existing_conditions = UserProfile::parse_list(value),
            ProfileField::Medications => profile.medications = UserProfile::parse_list(value),
            ProfileField::Allergies => profile.allergies = UserProfile::parse_list(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    Show,
    Clear,
    Set { field: ProfileField, value: String },
}

/// Chat command types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Analyze { text: String },
    History { limit: Option<usize> },
    Insights,
    Profile(ProfileAction),
    Language { language: Option<String> },
    Guide { topic: Option<String> },
    Transcript { limit: Option<usize> },
    Reset,
    Clear,
    Exit,
    Unknown { input: String },
}

/// Command handler for parsing and executing chat commands
pub struct CommandHandler {
    detailed: bool,
}

impl CommandHandler {
    pub fn new() -> Self {
        CommandHandler { detailed: false }
    }

    /// Show full analyses (all recommendations and follow-up questions)
    pub fn with_details(mut self, detailed: bool) -> Self {
        self.detailed = detailed;
        self
    }

    /// Parse input string into a command
    pub fn parse(&self, input: &str) -> Command {
        let trimmed = input.trim();

        let Some(body) = trimmed.strip_prefix('/') else {
            return Command::Unknown {
                input: input.to_string(),
            };
        };

        let (name, rest) = match body.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (body, ""),
        };

        match name.to_lowercase().as_str() {
            "help" | "h" => Command::Help,
            "exit" | "quit" | "q" => Command::Exit,
            "analyze" | "a" => Command::Analyze {
                text: rest.to_string(),
            },
            "history" => Command::History {
                limit: rest.parse().ok(),
            },
            "insights" | "stats" => Command::Insights,
            "profile" => self.parse_profile(input, rest),
            "lang" | "language" => Command::Language {
                language: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "guide" | "emergency" => Command::Guide {
                topic: (!rest.is_empty()).then(|| rest.to_string()),
            },
            "transcript" | "conversation" => Command::Transcript {
                limit: rest.parse().ok(),
            },
            "reset" => Command::Reset,
            "clear" | "cls" => Command::Clear,
            _ => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    fn parse_profile(&self, input: &str, rest: &str) -> Command {
        if rest.is_empty() {
            return Command::Profile(ProfileAction::Show);
        }
        if rest.eq_ignore_ascii_case("clear") {
            return Command::Profile(ProfileAction::Clear);
        }

        let (field, value) = rest
            .split_once(char::is_whitespace)
            .map(|(f, v)| (f, v.trim()))
            .unwrap_or((rest, ""));

        match ProfileField::parse(field) {
            Some(field) => Command::Profile(ProfileAction::Set {
                field,
                value: value.to_string(),
            }),
            None => Command::Unknown {
                input: input.to_string(),
            },
        }
    }

    /// Execute a command
    ///
    /// Returns true if the session should continue, false to exit
    pub fn execute(
        &mut self,
        command: Command,
        session: &mut SessionManager,
        display: &DisplayManager,
        classifier: SymptomClassifier<'_>,
    ) -> Result<bool> {
        match command {
            Command::Help => {
                self.show_help();
                Ok(true)
            }
            Command::Exit => {
                println!(
                    "{}",
                    format!(
                        "{} turns in {}s",
                        session.turn_count(),
                        session.session_duration()
                    )
                    .dimmed()
                );
                println!("{}", "Take care!".green());
                Ok(false)
            }
            Command::Analyze { text } => {
                if text.is_empty() {
                    display.show_warning("Please describe your symptoms: /analyze <text>");
                    return Ok(true);
                }
                let analysis = classifier.classify(&text, Some(session.profile()));
                display.show_analysis(&analysis, session.language(), self.detailed);
                session.record_analysis(&text, analysis);
                Ok(true)
            }
            Command::History { limit } => {
                let records = session
                    .history()
                    .recent(limit.unwrap_or(DEFAULT_HISTORY_LIMIT));
                display.show_history(&records);
                Ok(true)
            }
            Command::Insights => {
                display.show_insights(session.history().insights().as_ref());
                Ok(true)
            }
            Command::Profile(action) => {
                match action {
                    ProfileAction::Show => {}
                    ProfileAction::Clear => {
                        *session.profile_mut() = UserProfile::default();
                        println!("{}", "Profile cleared.".yellow());
                    }
                    ProfileAction::Set { field, value } => {
                        field.apply(session.profile_mut(), &value);
                        println!("{}", "Profile updated!".green());
                    }
                }
                display.show_profile(session.profile());
                Ok(true)
            }
            Command::Language { language } => {
                match language {
                    None => {
                        let names: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
                        println!(
                            "Current language: {} (available: {})",
                            session.language().to_string().cyan(),
                            names.join(", ")
                        );
                    }
                    Some(requested) => match Language::parse(&requested) {
                        Some(language) => {
                            session.set_language(language);
                            println!("{}", format!("Language set to {}", language).cyan());
                        }
                        None => display.show_error(&format!("Unsupported language: {}", requested)),
                    },
                }
                Ok(true)
            }
            Command::Guide { topic: None } => {
                display.show_guide(session.language());
                Ok(true)
            }
            Command::Guide { topic: Some(topic) } => {
                match find_protocol(&topic) {
                    Some(protocol) => display.show_protocol(protocol),
                    None => {
                        let names: Vec<&str> = PROTOCOLS.iter().map(|p| p.name).collect();
                        display.show_warning(&format!(
                            "No protocol for '{}' (available: {})",
                            topic,
                            names.join(", ")
                        ));
                    }
                }
                Ok(true)
            }
            Command::Transcript { limit } => {
                let messages = session.recent_messages(limit.unwrap_or(usize::MAX));
                display.show_transcript(&messages);
                Ok(true)
            }
            Command::Reset => {
                session.reset();
                println!("{}", "Session reset. Conversation and history cleared.".yellow());
                Ok(true)
            }
            Command::Clear => {
                display.clear_screen()?;
                Ok(true)
            }
            Command::Unknown { input } => {
                println!("{}", format!("Unknown command: {}", input).red());
                println!("Type {} for available commands", "/help".cyan());
                Ok(true)
            }
        }
    }

    fn show_help(&self) {
        println!("\n{}", "Available Commands:".bold().cyan());
        println!("{}", "=".repeat(60).cyan());

        let commands = [
            ("/help, /h", "Show this help message"),
            ("/analyze <text>", "Analyze symptoms without asking the assistant"),
            ("/history [n]", "Show last n analyses (default: 10)"),
            ("/insights", "Show health insights for this session"),
            ("/profile", "Show your health profile"),
            ("/profile <field> <value>", "Set age, conditions, medications or allergies"),
            ("/profile clear", "Clear your health profile"),
            ("/lang [language]", "Show or change the interface language"),
            ("/guide [protocol]", "Show the emergency guide or one protocol"),
            ("/transcript [n]", "Replay the conversation (last n messages)"),
            ("/reset", "Clear conversation and history"),
            ("/clear, /cls", "Clear screen"),
            ("/exit, /quit, /q", "Exit"),
        ];

        for (cmd, desc) in commands {
            println!("  {:<26} {}", cmd.green(), desc);
        }

        println!("\n{}", "Usage:".bold());
        println!("  - Describe your symptoms directly (no / prefix)");
        println!("  - List values with commas: /profile allergies penicillin, latex");
        println!("  - Press {} or {} to exit", "Ctrl-D".cyan(), "/exit".cyan());
        println!();
    }

    pub fn is_detailed(&self) -> bool {
        self.detailed
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if input is a command (starts with /)
pub fn is_command(input: &str) -> bool {
    input.trim().starts_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(handler: &mut CommandHandler, session: &mut SessionManager, input: &str) -> bool {
        let command = handler.parse(input);
        handler
            .execute(
                command,
                session,
                &DisplayManager::new().without_progress(),
                SymptomClassifier::builtin(),
            )
            .unwrap()
    }

    #[test]
    fn test_is_command() {
        assert!(is_command("/help"));
        assert!(is_command(" /help"));
        assert!(!is_command("help"));
        assert!(!is_command("I have a headache"));
    }

    #[test]
    fn test_parse_help_and_exit() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/help"), Command::Help);
        assert_eq!(handler.parse("/H"), Command::Help);
        assert_eq!(handler.parse("/quit"), Command::Exit);
        assert_eq!(handler.parse("/q"), Command::Exit);
    }

    #[test]
    fn test_parse_analyze_keeps_text() {
        let handler = CommandHandler::new();
        assert_eq!(
            handler.parse("/analyze  Severe Headache and fever "),
            Command::Analyze {
                text: "Severe Headache and fever".to_string()
            }
        );
        assert_eq!(
            handler.parse("/analyze"),
            Command::Analyze {
                text: String::new()
            }
        );
    }

    #[test]
    fn test_parse_history() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/history"), Command::History { limit: None });
        assert_eq!(handler.parse("/history 5"), Command::History { limit: Some(5) });
        assert_eq!(handler.parse("/history lots"), Command::History { limit: None });
    }

    #[test]
    fn test_parse_profile() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/profile"), Command::Profile(ProfileAction::Show));
        assert_eq!(handler.parse("/profile clear"), Command::Profile(ProfileAction::Clear));
        assert_eq!(
            handler.parse("/profile meds aspirin, metformin"),
            Command::Profile(ProfileAction::Set {
                field: ProfileField::Medications,
                value: "aspirin, metformin".to_string()
            })
        );
        assert!(matches!(handler.parse("/profile height 180"), Command::Unknown { .. }));
    }

    #[test]
    fn test_parse_language() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/lang"), Command::Language { language: None });
        assert_eq!(
            handler.parse("/lang Urdu"),
            Command::Language {
                language: Some("Urdu".to_string())
            }
        );
    }

    #[test]
    fn test_parse_guide_and_transcript() {
        let handler = CommandHandler::new();
        assert_eq!(handler.parse("/guide"), Command::Guide { topic: None });
        assert_eq!(
            handler.parse("/guide stroke"),
            Command::Guide {
                topic: Some("stroke".to_string())
            }
        );
        assert_eq!(handler.parse("/transcript"), Command::Transcript { limit: None });
        assert_eq!(
            handler.parse("/conversation 4"),
            Command::Transcript { limit: Some(4) }
        );
    }

    #[test]
    fn test_execute_guide_topic() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();
        assert!(run(&mut handler, &mut session, "/guide heart"));
        assert!(run(&mut handler, &mut session, "/guide sprain"));
    }

    #[test]
    fn test_parse_unknown_and_plain_text() {
        let handler = CommandHandler::new();
        assert!(matches!(handler.parse("/unknown"), Command::Unknown { .. }));
        assert!(matches!(handler.parse("I feel dizzy"), Command::Unknown { .. }));
        assert!(matches!(handler.parse("/"), Command::Unknown { .. }));
    }

    #[test]
    fn test_execute_exit() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();
        assert!(!run(&mut handler, &mut session, "/exit"));
    }

    #[test]
    fn test_execute_analyze_records_history() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();

        assert!(run(&mut handler, &mut session, "/analyze chest pain and nausea"));
        assert_eq!(session.history().len(), 1);
        assert!(session.history().recent(1)[0].analysis.is_emergency);

        // empty text records nothing
        run(&mut handler, &mut session, "/analyze");
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_execute_profile_updates() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();

        run(&mut handler, &mut session, "/profile age 31-50");
        run(&mut handler, &mut session, "/profile allergies penicillin, latex");
        assert_eq!(session.profile().age_group.as_deref(), Some("31-50"));
        assert_eq!(session.profile().allergies.len(), 2);

        run(&mut handler, &mut session, "/profile age");
        assert!(session.profile().age_group.is_none());

        run(&mut handler, &mut session, "/profile clear");
        assert!(session.profile().is_empty());
    }

    #[test]
    fn test_execute_language() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();

        run(&mut handler, &mut session, "/lang hi");
        assert_eq!(session.language(), Language::Hindi);

        run(&mut handler, &mut session, "/lang elvish");
        assert_eq!(session.language(), Language::Hindi);
    }

    #[test]
    fn test_execute_reset() {
        let mut handler = CommandHandler::new();
        let mut session = SessionManager::default();
        run(&mut handler, &mut session, "/analyze cough");
        assert_eq!(session.history().len(), 1);

        run(&mut handler, &mut session, "/reset");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_execute_read_only_commands() {
        let mut handler = CommandHandler::new().with_details(true);
        let mut session = SessionManager::default();
        assert!(handler.is_detailed());
        for input in ["/help", "/history 3", "/insights", "/guide", "/profile", "/lang", "/bogus"] {
            assert!(run(&mut handler, &mut session, input));
        }
    }
}
