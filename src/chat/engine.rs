//! Investigation-thread engine.
//!
//! Owns the message log and the in-flight marker. `submit` applies the
//! optimistic user append and hands back a ticket for dispatch; the network
//! layer reports back through `complete`. At most one query is in flight;
//! further submissions are rejected until the outstanding one resolves.

use crate::constants::{AI_UNREACHABLE_MESSAGE, ANSWER_FALLBACK, ASSISTANT_GREETING};
use crate::gateway::{AskResponse, Outcome};

use super::conversation::{Conversation, Message};

/// A query accepted by `submit`, ready to be dispatched to the gateway.
/// The sequence number ties the eventual completion back to this submission;
/// completions carrying any other sequence are dropped as stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTicket {
    pub seq: u64,
    pub prompt: String,
}

pub struct ConversationEngine {
    conversation: Conversation,
    pending: bool,
    last_error: bool,
    next_seq: u64,
    inflight: Option<u64>,
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationEngine {
    /// A fresh thread, seeded with the assistant greeting.
    pub fn new() -> Self {
        let mut conversation = Conversation::new();
        conversation.push_assistant(ASSISTANT_GREETING);
        Self {
            conversation,
            pending: false,
            last_error: false,
            next_seq: 0,
            inflight: None,
        }
    }

    /// Accept a prompt for dispatch. Appends the user message immediately
    /// (it stays visible even if the call later fails) and marks the query
    /// pending. Returns `None` for blank input or while a query is in flight.
    pub fn submit(&mut self, text: &str) -> Option<QueryTicket> {
        let prompt = text.trim();
        if prompt.is_empty() || self.pending {
            return None;
        }

        self.conversation.push_user(prompt);
        self.pending = true;
        self.last_error = false;

        self.next_seq += 1;
        self.inflight = Some(self.next_seq);
        Some(QueryTicket {
            seq: self.next_seq,
            prompt: prompt.to_string(),
        })
    }

    /// Fold a completed call back into the thread. Outcomes whose sequence is
    /// not the one in flight (a late reply from before a reset, or a duplicate
    /// delivery) are ignored.
    pub fn complete(&mut self, seq: u64, outcome: Outcome<AskResponse>) {
        if self.inflight != Some(seq) {
            return;
        }
        self.inflight = None;

        match outcome {
            Ok(response) => {
                self.conversation
                    .push_assistant(response.answer.as_deref().unwrap_or(ANSWER_FALLBACK));
            }
            Err(_) => {
                self.conversation.push_assistant(AI_UNREACHABLE_MESSAGE);
                self.last_error = true;
            }
        }
        self.pending = false;
    }

    /// Start the thread over: greeting re-seeded, any in-flight ticket
    /// abandoned so its eventual completion is dropped.
    pub fn reset(&mut self) {
        self.conversation = Conversation::new();
        self.conversation.push_assistant(ASSISTANT_GREETING);
        self.pending = false;
        self.last_error = false;
        self.inflight = None;
    }

    pub fn messages(&self) -> &[Message] {
        self.conversation.messages()
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    /// Whether the most recent query failed to reach the service.
    pub fn last_error(&self) -> bool {
        self.last_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MessageRole;
    use crate::gateway::{FailureKind, GatewayError};

    fn answer(text: &str) -> AskResponse {
        AskResponse {
            answer: Some(text.to_string()),
            intent: None,
        }
    }

    fn unreachable() -> GatewayError {
        GatewayError {
            kind: FailureKind::Unreachable,
            detail: "connection refused".to_string(),
        }
    }

    // ── Seeding ───────────────────────────────────────────────────

    #[test]
    fn thread_starts_with_the_greeting() {
        let engine = ConversationEngine::new();
        assert_eq!(engine.messages().len(), 1);
        assert_eq!(engine.messages()[0].role, MessageRole::Assistant);
        assert_eq!(engine.messages()[0].content, ASSISTANT_GREETING);
    }

    // ── submit guards ─────────────────────────────────────────────

    #[test]
    fn empty_submit_is_a_noop() {
        let mut engine = ConversationEngine::new();
        assert!(engine.submit("").is_none());
        assert!(engine.submit("   ").is_none());
        assert_eq!(engine.messages().len(), 1);
        assert!(!engine.pending());
    }

    #[test]
    fn submit_rejected_while_pending() {
        let mut engine = ConversationEngine::new();
        let first = engine.submit("who owns 1.2.3.4?").unwrap();
        assert!(engine.submit("second question").is_none());
        // Only the first user message made it into the thread
        assert_eq!(engine.messages().len(), 2);

        engine.complete(first.seq, Ok(answer("A hosting provider.")));
        assert!(!engine.pending());
        // A new submission is accepted now
        assert!(engine.submit("second question").is_some());
    }

    #[test]
    fn user_message_appended_optimistically() {
        let mut engine = ConversationEngine::new();
        engine.submit("check the proxy logs").unwrap();
        let last = engine.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::User);
        assert_eq!(last.content, "check the proxy logs");
        assert!(engine.pending());
    }

    // ── Completions ───────────────────────────────────────────────

    #[test]
    fn success_appends_the_answer() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("summarize alerts").unwrap();
        engine.complete(ticket.seq, Ok(answer("Two critical alerts overnight.")));

        assert_eq!(engine.messages().len(), 3);
        let last = engine.messages().last().unwrap();
        assert_eq!(last.role, MessageRole::Assistant);
        assert_eq!(last.content, "Two critical alerts overnight.");
        assert!(!engine.pending());
        assert!(!engine.last_error());
    }

    #[test]
    fn missing_answer_uses_fallback_text() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("run enrichment").unwrap();
        engine.complete(
            ticket.seq,
            Ok(AskResponse {
                answer: None,
                intent: Some("enrich".to_string()),
            }),
        );
        assert_eq!(engine.messages().last().unwrap().content, ANSWER_FALLBACK);
    }

    #[test]
    fn failure_appends_diagnostic_and_sets_last_error() {
        let mut engine = ConversationEngine::new();
        let before = engine.messages().len();
        let ticket = engine.submit("anything").unwrap();
        engine.complete(ticket.seq, Err(unreachable()));

        // Grows by exactly two: the user message plus the diagnostic
        assert_eq!(engine.messages().len(), before + 2);
        assert_eq!(engine.messages().last().unwrap().content, AI_UNREACHABLE_MESSAGE);
        assert!(engine.last_error());
        assert!(!engine.pending());
    }

    #[test]
    fn next_submit_clears_last_error() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("first").unwrap();
        engine.complete(ticket.seq, Err(unreachable()));
        assert!(engine.last_error());

        engine.submit("retry").unwrap();
        assert!(!engine.last_error());
    }

    // ── Staleness guard ───────────────────────────────────────────

    #[test]
    fn stale_completion_is_dropped_after_reset() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("old question").unwrap();
        engine.reset();

        engine.complete(ticket.seq, Ok(answer("late reply")));
        // Only the re-seeded greeting; the late reply never lands
        assert_eq!(engine.messages().len(), 1);
        assert!(!engine.pending());
    }

    #[test]
    fn duplicate_completion_is_ignored() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("question").unwrap();
        engine.complete(ticket.seq, Ok(answer("reply")));
        engine.complete(ticket.seq, Ok(answer("reply again")));
        assert_eq!(engine.messages().len(), 3);
    }

    #[test]
    fn unknown_sequence_is_ignored() {
        let mut engine = ConversationEngine::new();
        engine.submit("question").unwrap();
        engine.complete(999, Ok(answer("from nowhere")));
        // Still pending on the real ticket
        assert!(engine.pending());
        assert_eq!(engine.messages().len(), 2);
    }

    // ── Ordering ──────────────────────────────────────────────────

    #[test]
    fn sequential_queries_never_interleave() {
        let mut engine = ConversationEngine::new();
        let a = engine.submit("a").unwrap();
        engine.complete(a.seq, Ok(answer("answer a")));
        let b = engine.submit("b").unwrap();
        engine.complete(b.seq, Ok(answer("answer b")));

        let contents: Vec<&str> = engine.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(
            contents,
            vec![ASSISTANT_GREETING, "a", "answer a", "b", "answer b"]
        );
    }

    // ── reset ─────────────────────────────────────────────────────

    #[test]
    fn reset_reseeds_the_greeting() {
        let mut engine = ConversationEngine::new();
        let ticket = engine.submit("question").unwrap();
        engine.complete(ticket.seq, Ok(answer("reply")));
        engine.reset();
        assert_eq!(engine.messages().len(), 1);
        assert_eq!(engine.messages()[0].content, ASSISTANT_GREETING);
        assert!(!engine.last_error());
    }
}
