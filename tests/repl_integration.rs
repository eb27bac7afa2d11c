//! Chat mode flows: commands, chat turns and session state together

use healthbuddy::assistant::{HealthAssistant, ReplySource};
use healthbuddy::i18n::{phrase, Language};
use healthbuddy::repl::commands::{is_command, Command, CommandHandler, ProfileAction, ProfileField};
use healthbuddy::repl::{DisplayManager, ReplConfig, ReplSession, Role, SessionManager};
use healthbuddy::triage::{SymptomClassifier, TriageTables};
use std::sync::Arc;
use tempfile::TempDir;

fn offline_repl(history_limit: usize) -> ReplSession {
    let config = ReplConfig {
        history_limit,
        show_progress: false,
        ..Default::default()
    };
    ReplSession::new(
        config,
        HealthAssistant::offline(),
        Arc::new(TriageTables::standard()),
    )
    .unwrap()
}

#[test]
fn profile_commands_parse_and_apply() {
    let handler = CommandHandler::new();
    assert_eq!(
        handler.parse("/profile meds aspirin, metformin"),
        Command::Profile(ProfileAction::Set {
            field: ProfileField::Medications,
            value: "aspirin, metformin".to_string(),
        })
    );
    assert_eq!(handler.parse("/profile"), Command::Profile(ProfileAction::Show));
    assert!(matches!(handler.parse("/profile height 180"), Command::Unknown { .. }));

    let mut session = SessionManager::default();
    let mut handler = CommandHandler::new();
    let command = handler.parse("/profile allergies penicillin, latex");
    handler
        .execute(
            command,
            &mut session,
            &DisplayManager::new().without_progress(),
            SymptomClassifier::builtin(),
        )
        .unwrap();
    assert_eq!(
        session.profile().allergies,
        vec!["penicillin".to_string(), "latex".to_string()]
    );
}

#[test]
fn analyze_command_records_without_transcript() {
    let mut repl = offline_repl(50);
    assert!(repl.handle_command("/analyze severe headache and fever").unwrap());

    assert_eq!(repl.session().history().len(), 1);
    assert_eq!(repl.session().transcript_len(), 0);

    let recent = repl.session().history().recent(1);
    let record = recent[0];
    assert_eq!(record.symptoms, "severe headache and fever");
    assert!(record.analysis.severity_score > 0.0);
}

#[test]
fn empty_analyze_is_ignored() {
    let mut repl = offline_repl(50);
    assert!(repl.handle_command("/analyze").unwrap());
    assert!(repl.session().history().is_empty());
}

#[tokio::test]
async fn emergency_turn_uses_selected_language() {
    let mut repl = offline_repl(50);
    repl.handle_command("/lang Urdu").unwrap();
    assert_eq!(repl.session().language(), Language::Urdu);

    let outcome = repl.chat("face drooping and arm weakness").await;
    assert_eq!(outcome.analysis.emergency_type.as_deref(), Some("stroke"));
    assert_eq!(outcome.reply.source, ReplySource::Fallback);
    assert!(outcome
        .reply
        .text
        .contains(&phrase("emergency", Language::Urdu)));

    let last = repl.session().transcript().last().unwrap();
    assert_eq!(last.role, Role::Assistant);
    assert_eq!(last.content, outcome.reply.text);
}

#[tokio::test]
async fn reset_clears_conversation_but_keeps_profile() {
    let mut repl = offline_repl(50);
    repl.handle_command("/profile age 30-45").unwrap();
    repl.chat("I keep coughing").await;
    repl.chat("now a fever too").await;
    assert_eq!(repl.session().turn_count(), 2);

    repl.handle_command("/reset").unwrap();

    assert_eq!(repl.session().transcript_len(), 0);
    assert!(repl.session().history().insights().is_none());
    assert_eq!(repl.session().profile().age_group.as_deref(), Some("30-45"));
}

#[tokio::test]
async fn transcript_command_replays_turns_in_order() {
    let mut repl = offline_repl(50);
    repl.chat("I keep coughing").await;
    repl.chat("and a fever since last night").await;

    assert!(repl.handle_command("/transcript").unwrap());
    assert!(repl.handle_command("/conversation 2").unwrap());

    let roles: Vec<Role> = repl
        .session()
        .recent_messages(usize::MAX)
        .iter()
        .map(|m| m.role)
        .collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );

    let last_two = repl.session().recent_messages(2);
    assert_eq!(last_two[0].content, "and a fever since last night");
    assert_eq!(last_two[1].role, Role::Assistant);
}

#[test]
fn guide_command_finds_protocol_by_prefix() {
    let mut repl = offline_repl(50);
    assert!(repl.handle_command("/guide severe").unwrap());
    assert!(repl.handle_command("/guide unknown thing").unwrap());
    assert!(repl.session().history().is_empty());
}

#[tokio::test]
async fn history_evicts_oldest_turns() {
    let mut repl = offline_repl(2);
    for text in ["cough", "fever", "nausea"] {
        repl.chat(text).await;
    }

    let symptoms: Vec<&str> = repl
        .session()
        .history()
        .iter()
        .map(|r| r.symptoms.as_str())
        .collect();
    assert_eq!(symptoms, vec!["fever", "nausea"]);
}

#[test]
fn saving_creates_state_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state").join("chat_history");
    let config = ReplConfig {
        history_file: Some(path.clone()),
        show_progress: false,
        ..Default::default()
    };

    let mut repl = ReplSession::new(
        config,
        HealthAssistant::offline(),
        Arc::new(TriageTables::standard()),
    )
    .unwrap();
    repl.save().unwrap();

    assert!(path.parent().unwrap().is_dir());
}

#[test]
fn only_slash_input_is_a_command() {
    assert!(is_command("/help"));
    assert!(is_command("  /exit"));
    assert!(!is_command("I have a headache / fever"));
}
