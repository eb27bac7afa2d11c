//! Health chat assistant
//!
//! Wraps an optional remote completion backend. Every turn is classified
//! locally first; the reply comes from the backend when one is configured and
//! answers, otherwise from the canned fallback texts.

pub mod client;
pub mod fallback;

pub use client::{ChatClient, CompletionBackend};
pub use fallback::fallback_response;

use crate::cli::Config;
use crate::errors::{AssistantError, Result};
use crate::i18n::{phrase, Language};
use crate::triage::{AnalysisResult, RiskLevel, SymptomClassifier, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Fixed system prompt sent with every remote request
pub const SYSTEM_PROMPT: &str = "You are an advanced AI health assistant. Provide accurate, helpful, and safe medical information.

GUIDELINES:
- Always emphasize this is not a substitute for professional medical advice
- For emergencies, immediately direct users to seek professional help
- Provide clear, evidence-based information
- Be empathetic and understanding
- Suggest following up with healthcare providers
- Use simple language that's easy to understand
- Include practical recommendations when appropriate";

/// Context block attached to the user's message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatContext {
    pub symptoms: String,
    pub risk_level: RiskLevel,
    pub is_emergency: bool,
    pub user_profile: UserProfile,
}

impl ChatContext {
    pub fn from_analysis(symptoms: &str, analysis: &AnalysisResult, profile: &UserProfile) -> Self {
        Self {
            symptoms: symptoms.to_string(),
            risk_level: analysis.risk_level,
            is_emergency: analysis.is_emergency,
            user_profile: profile.clone(),
        }
    }
}

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

impl Reply {
    fn fallback(prompt: &str) -> Self {
        Self {
            text: fallback_response(prompt).to_string(),
            source: ReplySource::Fallback,
        }
    }
}

/// Outcome of one chat turn
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub analysis: AnalysisResult,
    pub reply: Reply,
}

/// Chat assistant over an optional completion backend
#[derive(Clone, Default)]
pub struct HealthAssistant {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl HealthAssistant {
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    /// Assistant that only uses the canned replies
    pub fn offline() -> Self {
        Self { backend: None }
    }

    pub fn with_backend(backend: impl CompletionBackend + 'static) -> Self {
        Self {
            backend: Some(Arc::new(backend)),
        }
    }

    /// Build from configuration; a missing key degrades to offline mode
    pub fn from_config(config: &Config) -> Self {
        if config.assistant.offline {
            info!("offline mode: remote completions disabled");
            return Self::offline();
        }

        match ChatClient::from_env(&config.api) {
            Ok(client) => {
                info!(model = %config.api.model, "remote completions enabled");
                Self::with_backend(client)
            }
            Err(e @ AssistantError::MissingApiKey { .. }) => {
                info!(error = %e, "using built-in guidance");
                Self::offline()
            }
            Err(e) => {
                warn!(error = %e, "remote completions unavailable, using built-in guidance");
                Self::offline()
            }
        }
    }

    pub fn is_remote(&self) -> bool {
        self.backend.is_some()
    }

    pub fn backend(&self) -> Option<&dyn CompletionBackend> {
        self.backend.as_deref()
    }

    pub fn shared_backend(&self) -> Option<Arc<dyn CompletionBackend>> {
        self.backend.clone()
    }

    /// Answer a prompt. Never fails: any backend error yields the fallback.
    pub async fn respond(&self, prompt: &str, context: &ChatContext) -> Reply {
        let Some(backend) = &self.backend else {
            return Reply::fallback(prompt);
        };

        let result = match user_message(prompt, context) {
            Ok(message) => backend.complete(SYSTEM_PROMPT, &message).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(text) => Reply {
                text,
                source: ReplySource::Remote,
            },
            Err(e) => {
                warn!(error = %e, "completion failed, falling back");
                Reply::fallback(prompt)
            }
        }
    }

    /// Classify the input, ask for a reply and flag emergencies
    pub async fn chat_turn(
        &self,
        input: &str,
        profile: &UserProfile,
        language: Language,
        classifier: SymptomClassifier<'_>,
    ) -> TurnOutcome {
        let analysis = classifier.classify(input, Some(profile));
        let context = ChatContext::from_analysis(input, &analysis, profile);
        let mut reply = self.respond(input, &context).await;

        if analysis.is_emergency {
            reply.text = format!("🚨 **{}**\n\n{}", phrase("emergency", language), reply.text);
        }

        TurnOutcome { analysis, reply }
    }
}

impl std::fmt::Debug for HealthAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthAssistant")
            .field("model", &self.backend.as_ref().map(|b| b.model().to_string()))
            .finish()
    }
}

/// User message carrying the serialized context
pub fn user_message(prompt: &str, context: &ChatContext) -> Result<String> {
    let context_json = serde_json::to_string(context)?;
    Ok(format!("Context: {}\n\nUser Query: {}", context_json, prompt))
}
