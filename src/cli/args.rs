//! Command-line argument parsing for HealthBuddy
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use crate::cli::config::Config;
use crate::errors::Result;
use crate::i18n::Language;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HealthBuddy - symptom triage and health guidance in your terminal
#[derive(Parser, Debug)]
#[command(name = "healthbuddy")]
#[command(author = "Jerome (Kubashen) Naidoo")]
#[command(version)]
#[command(
    about = "Rule-based symptom triage with an optional LLM health companion",
    long_about = "HealthBuddy classifies free-text symptom descriptions into body-system \
categories, scores risk, detects emergency clusters and offers general guidance. \
It is informational only and never a substitute for professional medical advice."
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (errors only on stderr)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Interface language (name or code, e.g. Urdu or ur)
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Remote model override
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Never contact the remote completion API
    #[arg(long, global = true)]
    pub offline: bool,

    /// Custom triage tables (TOML)
    #[arg(long, global = true, value_name = "PATH")]
    pub tables: Option<PathBuf>,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Classify a symptom description
    Analyze {
        /// Free-text symptom description
        #[arg(value_name = "TEXT")]
        text: String,

        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ask a single health question (analysis plus assistant reply)
    Ask {
        #[arg(value_name = "TEXT")]
        text: String,
    },

    /// Start interactive chat mode
    Chat,

    /// Show the emergency preparedness guide
    Guide,

    /// Show common health phrases for the selected language
    Phrases,

    /// Run diagnostics and health checks
    Doctor,

    /// Display current configuration
    Config {
        /// Write the effective configuration to the config file
        #[arg(long)]
        save: bool,
    },
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Verbosity from flags, or the configured default when no flag is given
    pub fn effective_verbosity(&self, config: &Config) -> Verbosity {
        if self.quiet || self.verbose > 0 {
            self.verbosity()
        } else {
            Verbosity::parse(&config.telemetry.default_verbosity).unwrap_or(Verbosity::Normal)
        }
    }

    /// Fold command-line overrides into the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) -> Result<()> {
        if let Some(language) = &self.language {
            let parsed: Language = language.parse()?;
            config.assistant.language = parsed.name().to_string();
        }
        if let Some(model) = &self.model {
            config.api.model = model.clone();
        }
        if self.offline {
            config.assistant.offline = true;
        }
        if let Some(tables) = &self.tables {
            config.triage.tables_path = Some(tables.to_string_lossy().into_owned());
        }
        config.validate()
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    pub fn parse(value: &str) -> Option<Verbosity> {
        match value {
            "quiet" => Some(Verbosity::Quiet),
            "normal" => Some(Verbosity::Normal),
            "verbose" => Some(Verbosity::Verbose),
            "very_verbose" => Some(Verbosity::VeryVerbose),
            _ => None,
        }
    }

    /// Check if should show spinners
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if should show the full analysis (all recommendations and questions)
    pub fn show_details(&self) -> bool {
        matches!(self, Verbosity::Verbose | Verbosity::VeryVerbose)
    }
}
