//! Assistant chat: conversation state, delayed triage replies, quick questions.
//!
//! Builds on top of:
//! - `models::Message` (immutable message struct)
//! - `triage::classify` (reply text and category)
//!
//! Replies are spawned tasks that sleep for the "thinking" delay, so
//! abandoning the chat aborts them instead of leaving dangling callbacks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use crate::config;
use crate::models::{Message, TriageCategory};
use crate::triage;

/// Longest message accepted from the user, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Message cannot be empty")]
    EmptyMessage,
    #[error("Message too long (max {MAX_MESSAGE_CHARS} chars)")]
    TooLong,
    #[error("Conversation lock poisoned")]
    LockPoisoned,
}

// ═══════════════════════════════════════════
// Conversation
// ═══════════════════════════════════════════

/// Append-only message list, oldest first.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    /// Bumped when pending replies are abandoned. A reply only lands if
    /// it was scheduled in the current epoch.
    epoch: u64,
}

impl Conversation {
    /// A conversation opened by the assistant greeting.
    pub fn new() -> Self {
        Self {
            messages: vec![Message::from_assistant(triage::GREETING_MESSAGE, None)],
            epoch: 0,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    fn push(&mut self, message: Message) {
        self.messages.push(message);
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

/// Trim and validate user input.
pub fn normalize_input(text: &str) -> Result<&str, ChatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ChatError::EmptyMessage);
    }
    if trimmed.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ChatError::TooLong);
    }
    Ok(trimmed)
}

/// Build the assistant reply for a user message.
pub fn reply_to(text: &str) -> Message {
    let rule = triage::matching_rule(text).map(|r| r.id).unwrap_or("TRI-FALLBACK");
    let response = triage::classify(text);
    tracing::info!(rule, category = %response.category, "Assistant reply generated");
    Message::from_assistant(response.message, Some(response.category))
}

// ═══════════════════════════════════════════
// Chat session
// ═══════════════════════════════════════════

/// Snapshot returned to the chat screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatView {
    pub messages: Vec<Message>,
    pub is_loading: bool,
}

pub struct ChatSession {
    conversation: Arc<Mutex<Conversation>>,
    pending: Mutex<Vec<JoinHandle<()>>>,
    in_flight: Arc<AtomicUsize>,
    reply_delay: Duration,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::with_delay(Duration::from_millis(config::CHAT_RESPONSE_DELAY_MS))
    }

    pub fn with_delay(reply_delay: Duration) -> Self {
        Self {
            conversation: Arc::new(Mutex::new(Conversation::new())),
            pending: Mutex::new(Vec::new()),
            in_flight: Arc::new(AtomicUsize::new(0)),
            reply_delay,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub fn view(&self) -> Result<ChatView, ChatError> {
        let conversation = self.conversation.lock().map_err(|_| ChatError::LockPoisoned)?;
        Ok(ChatView {
            messages: conversation.messages().to_vec(),
            is_loading: self.is_loading(),
        })
    }

    /// Record a user message and schedule the assistant reply.
    /// Must be called inside a tokio runtime.
    pub fn send(&self, text: &str) -> Result<Message, ChatError> {
        let text = normalize_input(text)?;
        let message = Message::from_user(text);
        let epoch = {
            let mut conv = self.conversation.lock().map_err(|_| ChatError::LockPoisoned)?;
            conv.push(message.clone());
            // Counted under the conversation lock so abandon sees a consistent total.
            self.in_flight.fetch_add(1, Ordering::SeqCst);
            conv.epoch
        };

        let conversation = self.conversation.clone();
        let in_flight = self.in_flight.clone();
        let delay = self.reply_delay;
        let user_text = text.to_string();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let reply = reply_to(&user_text);
            let Ok(mut conv) = conversation.lock() else {
                tracing::error!("Conversation lock poisoned, reply dropped");
                return;
            };
            if conv.epoch != epoch {
                tracing::debug!("Reply for an abandoned chat dropped");
                return;
            }
            conv.push(reply);
            in_flight.fetch_sub(1, Ordering::SeqCst);
        });

        let mut pending = self.pending.lock().map_err(|_| ChatError::LockPoisoned)?;
        pending.retain(|h| !h.is_finished());
        pending.push(handle);

        Ok(message)
    }

    /// Leave the chat: abort replies that have not arrived yet.
    /// Returns how many were dropped.
    pub fn abandon_pending(&self) -> Result<usize, ChatError> {
        let aborted = self.invalidate_pending()?;
        let mut pending = self.pending.lock().map_err(|_| ChatError::LockPoisoned)?;
        for handle in pending.drain(..) {
            handle.abort();
        }
        if aborted > 0 {
            tracing::info!(aborted, "Pending assistant replies abandoned");
        }
        Ok(aborted)
    }

    /// Start a new epoch so replies scheduled earlier are discarded when
    /// they wake, even if their task can no longer be aborted.
    /// Returns how many replies had not arrived yet.
    fn invalidate_pending(&self) -> Result<usize, ChatError> {
        let mut conv = self.conversation.lock().map_err(|_| ChatError::LockPoisoned)?;
        conv.epoch += 1;
        Ok(self.in_flight.swap(0, Ordering::SeqCst))
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

// ═══════════════════════════════════════════
// Quick questions
// ═══════════════════════════════════════════

/// One-tap prompt for the empty chat state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickQuestion {
    pub text: String,
    /// Category the assistant will answer with.
    pub category: TriageCategory,
}

pub fn quick_questions() -> Vec<QuickQuestion> {
    triage::quick_questions()
        .into_iter()
        .map(|text| QuickQuestion {
            text: text.to_string(),
            category: triage::classify(text).category,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sender;

    #[test]
    fn conversation_starts_with_greeting() {
        let conv = Conversation::new();
        assert_eq!(conv.len(), 1);
        assert_eq!(conv.messages()[0].sender, Sender::Assistant);
        assert_eq!(conv.messages()[0].text, triage::GREETING_MESSAGE);
    }

    #[test]
    fn normalize_trims() {
        assert_eq!(normalize_input("  I feel dizzy \n").unwrap(), "I feel dizzy");
    }

    #[test]
    fn normalize_rejects_blank() {
        assert!(matches!(normalize_input("   "), Err(ChatError::EmptyMessage)));
        assert!(matches!(normalize_input(""), Err(ChatError::EmptyMessage)));
    }

    #[test]
    fn normalize_rejects_too_long() {
        let long = "a".repeat(MAX_MESSAGE_CHARS + 1);
        assert!(matches!(normalize_input(&long), Err(ChatError::TooLong)));
    }

    #[test]
    fn reply_carries_category() {
        let reply = reply_to("bleeding a little");
        assert_eq!(reply.sender, Sender::Assistant);
        assert_eq!(reply.category, Some(TriageCategory::Emergency));
    }

    #[tokio::test(start_paused = true)]
    async fn reply_arrives_after_delay() {
        let chat = ChatSession::new();
        let sent = chat.send("  I feel dizzy  ").unwrap();
        assert_eq!(sent.text, "I feel dizzy");

        let view = chat.view().unwrap();
        assert_eq!(view.messages.len(), 2);
        assert!(view.is_loading);

        tokio::time::sleep(Duration::from_millis(1_600)).await;
        let view = chat.view().unwrap();
        assert_eq!(view.messages.len(), 3);
        assert!(!view.is_loading);
        assert_eq!(view.messages[2].category, Some(TriageCategory::Warning));
        assert_eq!(view.messages[2].text, triage::DISCOMFORT_MESSAGE);
    }

    #[tokio::test(start_paused = true)]
    async fn messages_ordered_by_creation() {
        let chat = ChatSession::new();
        chat.send("baby").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        chat.send("food").unwrap();
        tokio::time::sleep(Duration::from_secs(3)).await;

        let view = chat.view().unwrap();
        let texts: Vec<_> = view.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[1], "baby");
        assert_eq!(texts[2], "food");
        assert_eq!(texts[3], triage::DEVELOPMENT_MESSAGE);
        assert_eq!(texts[4], triage::NUTRITION_MESSAGE);
        for pair in view.messages.windows(2) {
            assert!(pair[0].timestamp <= pair[1].timestamp);
        }
    }

    #[tokio::test]
    async fn empty_send_creates_nothing() {
        let chat = ChatSession::new();
        assert!(chat.send("   ").is_err());
        let view = chat.view().unwrap();
        assert_eq!(view.messages.len(), 1);
        assert!(!view.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_drops_pending_reply() {
        let chat = ChatSession::new();
        chat.send("emergency").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(chat.abandon_pending().unwrap(), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let view = chat.view().unwrap();
        assert_eq!(view.messages.len(), 2);
        assert!(!view.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn reply_that_outlives_abandon_is_discarded() {
        let chat = ChatSession::with_delay(Duration::from_millis(100));
        chat.send("baby").unwrap();

        // Invalidate without aborting: the task wakes up as if abort came too late.
        assert_eq!(chat.invalidate_pending().unwrap(), 1);
        chat.send("food").unwrap();
        assert!(chat.is_loading());

        tokio::time::sleep(Duration::from_millis(500)).await;
        let view = chat.view().unwrap();
        let texts: Vec<_> = view.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts.len(), 4);
        assert_eq!(texts[1], "baby");
        assert_eq!(texts[2], "food");
        assert_eq!(texts[3], triage::NUTRITION_MESSAGE);
        assert!(!view.is_loading);
    }

    #[tokio::test(start_paused = true)]
    async fn abandon_after_reply_reports_nothing_dropped() {
        let chat = ChatSession::with_delay(Duration::from_millis(100));
        chat.send("baby").unwrap();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(chat.abandon_pending().unwrap(), 0);
        assert_eq!(chat.view().unwrap().messages.len(), 3);
    }

    #[test]
    fn quick_questions_have_categories() {
        let questions = quick_questions();
        assert_eq!(questions.len(), 6);
        assert_eq!(questions[2].category, TriageCategory::Warning);
        assert_eq!(questions[5].category, TriageCategory::Emergency);
    }
}
