//! Interactive chat mode
//!
//! Ties together line input, built-in commands, session state and display.
//! Plain input is a chat turn: it is classified, answered by the assistant
//! and stored in the session history.

pub mod commands;
pub mod display;
pub mod input;
pub mod session;

use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

use crate::assistant::{HealthAssistant, TurnOutcome};
use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::i18n::Language;
use crate::repl::commands::{is_command, CommandHandler};
pub use crate::repl::display::DisplayManager;
use crate::repl::input::{InputHandler, LineInput};
pub use crate::repl::session::{ChatMessage, Role, SessionManager};
use crate::triage::{SymptomClassifier, TriageTables};

/// Configuration for chat mode
#[derive(Debug, Clone)]
pub struct ReplConfig {
    pub history_file: Option<PathBuf>,
    pub history_limit: usize,
    pub language: Language,
    pub show_progress: bool,
    /// Show full analyses instead of the compact view
    pub detailed: bool,
}

impl Default for ReplConfig {
    fn default() -> Self {
        ReplConfig {
            history_file: None,
            history_limit: DEFAULT_HISTORY_LIMIT,
            language: Language::English,
            show_progress: true,
            detailed: false,
        }
    }
}

impl ReplConfig {
    pub fn with_history(path: PathBuf) -> Self {
        ReplConfig {
            history_file: Some(path),
            ..Default::default()
        }
    }
}

/// Chat session coordinator
pub struct ReplSession {
    input_handler: InputHandler,
    command_handler: CommandHandler,
    session_manager: SessionManager,
    display_manager: DisplayManager,
    assistant: HealthAssistant,
    tables: Arc<TriageTables>,
}

impl ReplSession {
    pub fn new(
        config: ReplConfig,
        assistant: HealthAssistant,
        tables: Arc<TriageTables>,
    ) -> Result<Self> {
        let input_handler = match config.history_file {
            Some(path) => InputHandler::with_history(path)?,
            None => InputHandler::new()?,
        };
        let display_manager = if config.show_progress {
            DisplayManager::new()
        } else {
            DisplayManager::new().without_progress()
        };

        let mut repl = ReplSession {
            input_handler,
            command_handler: CommandHandler::new().with_details(config.detailed),
            session_manager: SessionManager::new(config.history_limit, config.language),
            display_manager,
            assistant,
            tables,
        };
        repl.sync_prompt();
        Ok(repl)
    }

    pub fn show_welcome(&self, version: &str) {
        let mode = match self.assistant.backend() {
            Some(backend) => backend.model().to_string(),
            None => "offline guidance".to_string(),
        };
        self.display_manager
            .show_banner(version, &mode, self.session_manager.language());
    }

    pub fn read_input(&mut self) -> Result<LineInput> {
        self.input_handler.read_line()
    }

    /// Handle a built-in command
    ///
    /// Returns true if the session should continue, false to exit
    pub fn handle_command(&mut self, input: &str) -> Result<bool> {
        let command = self.command_handler.parse(input);
        let classifier = SymptomClassifier::new(&self.tables);
        let keep_going = self.command_handler.execute(
            command,
            &mut self.session_manager,
            &self.display_manager,
            classifier,
        )?;
        self.sync_prompt();
        Ok(keep_going)
    }

    /// Run one chat turn and record it
    pub async fn chat(&mut self, input: &str) -> TurnOutcome {
        self.session_manager.add_message(Role::User, input);
        let _spinner = self.display_manager.start_spinner("Analyzing...");

        let outcome = self
            .assistant
            .chat_turn(
                input,
                self.session_manager.profile(),
                self.session_manager.language(),
                SymptomClassifier::new(&self.tables),
            )
            .await;

        self.display_manager.finish_current();
        debug!(source = ?outcome.reply.source, "chat turn complete");

        self.session_manager
            .add_message(Role::Assistant, outcome.reply.text.clone());
        self.session_manager
            .record_analysis(input, outcome.analysis.clone());

        outcome
    }

    /// Main loop: read, dispatch, repeat until /exit or EOF
    pub async fn run(&mut self) -> Result<()> {
        loop {
            let input = match self.read_input()? {
                LineInput::Line(input) if input.is_empty() => continue,
                LineInput::Line(input) => input,
                LineInput::Interrupted => {
                    println!("\nUse /exit to quit gracefully");
                    continue;
                }
                LineInput::Eof => break,
            };

            if is_command(&input) {
                match self.handle_command(&input) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => self.display_manager.show_error(&e.to_string()),
                }
                continue;
            }

            let outcome = self.chat(&input).await;
            self.display_manager.show_reply(&outcome.reply);
            self.display_manager.show_turn_summary(&outcome.analysis);
        }

        self.save()
    }

    pub fn session(&self) -> &SessionManager {
        &self.session_manager
    }

    pub fn display(&self) -> &DisplayManager {
        &self.display_manager
    }

    pub fn prompt(&self) -> &str {
        self.input_handler.prompt()
    }

    /// Save line history
    pub fn save(&mut self) -> Result<()> {
        self.input_handler.save_history()
    }

    fn sync_prompt(&mut self) {
        self.input_handler
            .set_language(self.session_manager.language());
    }
}
