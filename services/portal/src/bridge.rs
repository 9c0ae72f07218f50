//! services/portal/src/bridge.rs
//!
//! The AI helper conversation: an append-only history and the single outbound
//! completion call per turn. Provider failures never escape this module; they
//! turn into a fixed assistant reply.

use std::sync::Arc;
use std::time::Instant;

use portal_core::domain::{ChatMessage, Sender, Student};
use portal_core::ports::{ChatCompletionService, PortError};
use tracing::{error, info, warn};

pub const UNAVAILABLE_REPLY: &str =
    "I'm sorry, but the AI service is currently unavailable (Missing API Key).";
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error while processing your request.";
pub const EMPTY_REPLY: &str = "I couldn't generate a response at this time.";

/// Wraps the context snapshot in the assistant's standing instructions.
pub fn system_instruction(context: &str) -> String {
    format!(
        "You are \"NCU Bot\", a helpful and friendly AI assistant for The NorthCap University student portal.\n\
         You have access to the following context about the student:\n\
         {context}\n\
         Answer the student's questions based on this data. If they ask about their schedule, grades, or fees, look up the information in the context.\n\
         If the question is general (e.g., \"How to study effectively?\"), provide general advice.\n\
         Keep answers concise, professional, and encouraging."
    )
}

pub fn welcome_message(student: &Student) -> ChatMessage {
    ChatMessage::new(
        Sender::Ai,
        format!(
            "Hi {}! I'm your NCU Assistant. Ask me about your attendance, fees, syllabus, or assignments.",
            student.first_name()
        ),
    )
}

pub struct ChatBridge {
    service: Option<Arc<dyn ChatCompletionService>>,
    history: Vec<ChatMessage>,
    pending: bool,
}

impl ChatBridge {
    /// Starts a conversation with the welcome message for `student`.
    /// `service` is `None` when no API credential is configured.
    pub fn new(service: Option<Arc<dyn ChatCompletionService>>, student: &Student) -> Self {
        Self {
            service,
            history: vec![welcome_message(student)],
            pending: false,
        }
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Sends one user turn and appends the assistant's reply.
    ///
    /// Blank input is ignored and yields `None`. Otherwise the returned text is
    /// the reply that was appended, which may be one of the fixed fallbacks.
    pub async fn send(&mut self, text: &str, context: &str) -> Option<String> {
        if text.trim().is_empty() {
            return None;
        }

        self.history.push(ChatMessage::new(Sender::User, text));
        self.pending = true;

        let reply = self.request_reply(text, context).await;

        self.history.push(ChatMessage::new(Sender::Ai, reply.clone()));
        self.pending = false;
        Some(reply)
    }

    async fn request_reply(&self, text: &str, context: &str) -> String {
        let Some(service) = self.service.as_ref() else {
            warn!("AI helper used without an API key configured.");
            return UNAVAILABLE_REPLY.to_string();
        };

        let start_time = Instant::now();
        info!(prompt_len = text.len(), "Sending chat completion request.");
        match service.complete(&system_instruction(context), text).await {
            Ok(reply) if reply.trim().is_empty() => {
                warn!("Chat completion returned no text.");
                EMPTY_REPLY.to_string()
            }
            Ok(reply) => {
                info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "Chat reply received.");
                reply
            }
            Err(PortError::Unavailable) => UNAVAILABLE_REPLY.to_string(),
            Err(e) => {
                error!("Chat completion failed: {}", e);
                FAILURE_REPLY.to_string()
            }
        }
    }
}
