//! Line input for chat mode
//!
//! rustyline editor with a persistent history file and a prompt tagged with
//! the session language.

use crate::i18n::Language;
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::history::History;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Prompt for a session language; English is untagged
pub fn prompt_for(language: Language) -> String {
    match language {
        Language::English => "healthbuddy> ".to_string(),
        other => format!("healthbuddy[{}]> ", other.code()),
    }
}

/// One read from the terminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineInput {
    /// Trimmed text; empty for a blank line
    Line(String),
    /// Ctrl-C
    Interrupted,
    /// Ctrl-D
    Eof,
}

pub struct InputHandler {
    editor: DefaultEditor,
    history_path: Option<PathBuf>,
    prompt: String,
}

impl InputHandler {
    pub fn new() -> Result<Self> {
        Ok(InputHandler {
            editor: DefaultEditor::new()?,
            history_path: None,
            prompt: prompt_for(Language::English),
        })
    }

    /// Input handler backed by a history file; a missing or unreadable file
    /// starts an empty history
    pub fn with_history(history_file: PathBuf) -> Result<Self> {
        let mut handler = Self::new()?;
        if history_file.exists() {
            let _ = handler.editor.load_history(&history_file);
        }
        handler.history_path = Some(history_file);
        Ok(handler)
    }

    pub fn set_language(&mut self, language: Language) {
        self.prompt = prompt_for(language);
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Read one line. Non-blank lines are added to the history.
    pub fn read_line(&mut self) -> Result<LineInput> {
        match self.editor.readline(&self.prompt) {
            Ok(line) => {
                let line = line.trim();
                if !line.is_empty() {
                    let _ = self.editor.add_history_entry(line);
                }
                Ok(LineInput::Line(line.to_string()))
            }
            Err(ReadlineError::Interrupted) => Ok(LineInput::Interrupted),
            Err(ReadlineError::Eof) => Ok(LineInput::Eof),
            Err(err) => Err(err).context("failed to read input"),
        }
    }

    /// Write the history file, creating its directory
    pub fn save_history(&mut self) -> Result<()> {
        let Some(path) = &self.history_path else {
            return Ok(());
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("cannot create {}", dir.display()))?;
        }
        self.editor
            .save_history(path)
            .with_context(|| format!("cannot write {}", path.display()))
    }

    pub fn clear_history(&mut self) {
        let _ = self.editor.history_mut().clear();
    }

    pub fn history_len(&self) -> usize {
        self.editor.history().len()
    }
}
