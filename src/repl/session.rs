//! Session manager for chat state
//!
//! Maintains the conversation transcript, the user's profile and language,
//! and the bounded history of analyses made during the session.

use crate::history::HealthHistory;
use crate::i18n::Language;
use crate::triage::{AnalysisResult, UserProfile};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Maximum number of transcript messages kept
const MAX_TRANSCRIPT_SIZE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Session manager maintaining chat state
pub struct SessionManager {
    transcript: VecDeque<ChatMessage>,
    history: HealthHistory,
    profile: UserProfile,
    language: Language,
    session_start: DateTime<Utc>,
    turn_count: usize,
}

impl SessionManager {
    pub fn new(history_limit: usize, language: Language) -> Self {
        SessionManager {
            transcript: VecDeque::new(),
            history: HealthHistory::with_limit(history_limit),
            profile: UserProfile::default(),
            language,
            session_start: Utc::now(),
            turn_count: 0,
        }
    }

    /// Append a transcript message, dropping the oldest at capacity
    pub fn add_message(&mut self, role: Role, content: impl Into<String>) {
        if self.transcript.len() >= MAX_TRANSCRIPT_SIZE {
            self.transcript.pop_front();
        }
        if role == Role::User {
            self.turn_count += 1;
        }
        self.transcript.push_back(ChatMessage {
            role,
            content: content.into(),
        });
    }

    pub fn transcript(&self) -> impl Iterator<Item = &ChatMessage> {
        self.transcript.iter()
    }

    /// Last `n` messages, oldest first
    pub fn recent_messages(&self, n: usize) -> Vec<&ChatMessage> {
        let skip = self.transcript.len().saturating_sub(n);
        self.transcript.iter().skip(skip).collect()
    }

    pub fn transcript_len(&self) -> usize {
        self.transcript.len()
    }

    /// Store an analysis in the session history
    pub fn record_analysis(&mut self, symptoms: &str, analysis: AnalysisResult) -> Uuid {
        self.history.record(symptoms, analysis)
    }

    pub fn history(&self) -> &HealthHistory {
        &self.history
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    pub fn profile_mut(&mut self) -> &mut UserProfile {
        &mut self.profile
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Clear transcript and analysis history; profile and language are kept
    pub fn reset(&mut self) {
        self.transcript.clear();
        self.history.clear();
        self.turn_count = 0;
        self.session_start = Utc::now();
    }

    /// User turns since start or last reset
    pub fn turn_count(&self) -> usize {
        self.turn_count
    }

    /// Session duration in seconds
    pub fn session_duration(&self) -> i64 {
        (Utc::now() - self.session_start).num_seconds()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(crate::history::DEFAULT_HISTORY_LIMIT, Language::default())
    }
}
