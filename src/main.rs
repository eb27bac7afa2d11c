//! HealthBuddy - CLI entry point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use healthbuddy::{
    assistant::HealthAssistant,
    cli::{Args, Commands, Config, Verbosity},
    doctor::Doctor,
    i18n::Language,
    logging,
    repl::{DisplayManager, ReplConfig, ReplSession},
    triage::{SymptomClassifier, TriageTables},
};
use std::sync::Arc;
use tracing::debug;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config)?;

    let verbosity = args.effective_verbosity(&config);
    logging::init(verbosity);
    if !config.telemetry.color_output {
        colored::control::set_override(false);
    }
    debug!(?verbosity, "configuration loaded");

    let language = config.language()?;

    match &args.command {
        Some(Commands::Analyze { text, json }) => {
            let tables = load_tables(&config)?;
            run_analyze(&tables, text, *json, language, verbosity)?;
        }
        Some(Commands::Ask { text }) => {
            let tables = load_tables(&config)?;
            run_ask(&config, &tables, text, language, verbosity).await;
        }
        Some(Commands::Chat) => {
            let tables = load_tables(&config)?;
            run_chat(&config, tables, language, verbosity).await?;
        }
        Some(Commands::Guide) => {
            DisplayManager::new().show_guide(language);
        }
        Some(Commands::Phrases) => {
            DisplayManager::new().show_phrases(language);
        }
        Some(Commands::Doctor) => {
            run_doctor(config).await;
        }
        Some(Commands::Config { save }) => {
            show_config(&config)?;
            if *save {
                let path = Config::target_path(args.config.as_deref())?;
                config.save(&path)?;
                println!("\n{} {}", "Saved to".green(), path.display());
            }
        }
        None => {
            println!("HealthBuddy v{} - Symptom Triage Assistant", VERSION);
            println!("\nUsage:");
            println!("  healthbuddy analyze <text>    Classify a symptom description");
            println!("  healthbuddy ask <text>        Analysis plus assistant reply");
            println!("  healthbuddy chat              Interactive chat mode");
            println!("  healthbuddy guide             Emergency preparedness guide");
            println!("  healthbuddy phrases           Health phrases for your language");
            println!("  healthbuddy doctor            Setup diagnostics");
            println!("  healthbuddy config [--save]   Show or save configuration");
            println!("\nExample:");
            println!("  healthbuddy analyze \"severe headache and fever since yesterday\"");
            println!();
        }
    }

    Ok(())
}

/// Custom tables from configuration, or a copy of the built-in set
fn load_tables(config: &Config) -> Result<Arc<TriageTables>> {
    let tables = match config.tables_path() {
        Some(path) => TriageTables::from_file(&path)?,
        None => TriageTables::builtin().clone(),
    };
    Ok(Arc::new(tables))
}

fn run_analyze(
    tables: &TriageTables,
    text: &str,
    json: bool,
    language: Language,
    verbosity: Verbosity,
) -> Result<()> {
    let analysis = SymptomClassifier::new(tables).classify(text, None);

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        DisplayManager::new().show_analysis(&analysis, language, verbosity.show_details());
    }
    Ok(())
}

async fn run_ask(
    config: &Config,
    tables: &TriageTables,
    text: &str,
    language: Language,
    verbosity: Verbosity,
) {
    let assistant = HealthAssistant::from_config(config);
    let mut display = if verbosity.show_progress() {
        DisplayManager::new()
    } else {
        DisplayManager::new().without_progress()
    };

    let _spinner = display.start_spinner("Analyzing...");
    let outcome = assistant
        .chat_turn(
            text,
            &Default::default(),
            language,
            SymptomClassifier::new(tables),
        )
        .await;
    display.finish_current();

    display.show_analysis(&outcome.analysis, language, verbosity.show_details());
    display.show_reply(&outcome.reply);
}

async fn run_chat(
    config: &Config,
    tables: Arc<TriageTables>,
    language: Language,
    verbosity: Verbosity,
) -> Result<()> {
    let repl_config = ReplConfig {
        history_file: Some(config.history_file()),
        history_limit: config.assistant.history_limit,
        language,
        show_progress: verbosity.show_progress(),
        detailed: verbosity.show_details(),
    };

    let assistant = HealthAssistant::from_config(config);
    let mut repl = ReplSession::new(repl_config, assistant, tables)?;
    repl.show_welcome(VERSION);
    repl.run().await
}

async fn run_doctor(config: Config) {
    let backend = HealthAssistant::from_config(&config).shared_backend();
    let doctor = Doctor::new(config, backend);

    let checks = doctor.run_diagnostics().await;
    Doctor::display_results(&checks);

    std::process::exit(if Doctor::overall_status(&checks) { 0 } else { 1 });
}

fn show_config(config: &Config) -> Result<()> {
    println!("\n{}\n", "HealthBuddy Configuration".bold().cyan());
    match Config::default_path() {
        Some(path) => println!("{} {}\n", "Default file:".dimmed(), path.display()),
        None => println!("{}\n", "Default file: unavailable (no home directory)".dimmed()),
    }
    println!("{}", toml::to_string_pretty(config)?);

    let key_status = if config.api_key().is_ok() {
        "set".green()
    } else {
        "not set".yellow()
    };
    println!("{} {}", format!("{}:", config.api.api_key_env).dimmed(), key_status);
    Ok(())
}
