//! Chat surface controller.
//!
//! Owns the append-only transcript and the request/response cycle with
//! the advisory endpoint. At most one request is in flight at a time;
//! submitting while busy or with empty input is a no-op.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use immify_core::{AdvisorAgent, ChatMessage};
use tokio::sync::RwLock;

use crate::notify::Notifier;

/// Greeting seeded into every new transcript.
pub const GREETING: &str = "Hello! I'm your StudyAbroad AI Advisor. How can I help you with your international education journey?";

/// Assistant turn substituted when the exchange fails, keeping the
/// conversation coherent.
pub const FALLBACK_REPLY: &str =
    "I apologize, but I encountered an error processing your request. Please try again later.";

const SEND_FAILED_NOTICE: &str = "Failed to get response. Please try again.";

/// What happened to a `submit` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Empty input or a request already in flight; transcript untouched.
    Ignored,
    /// The exchange ran to completion (reply or fallback appended).
    Completed,
}

/// Manages the transcript and the advisory exchange for one chat session.
pub struct ChatController {
    agent: Arc<dyn AdvisorAgent>,
    notifier: Arc<dyn Notifier>,
    transcript: RwLock<Vec<ChatMessage>>,
    in_flight: AtomicBool,
}

impl ChatController {
    /// Creates a controller with the greeting already in the transcript.
    pub fn new(agent: Arc<dyn AdvisorAgent>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            agent,
            notifier,
            transcript: RwLock::new(vec![ChatMessage::assistant(GREETING)]),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Returns a snapshot of the transcript in display order.
    pub async fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.read().await.clone()
    }

    /// Whether a request is currently in flight.
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Submits one user turn and awaits the assistant's reply.
    ///
    /// Appends exactly two entries on acceptance: the user turn, then the
    /// reply (or [`FALLBACK_REPLY`] with an error notification when the
    /// exchange fails). The in-flight guard is released on every exit
    /// path, so the controller is always re-submittable afterward.
    pub async fn submit(&self, input: &str) -> SubmitOutcome {
        let text = input.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored;
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return SubmitOutcome::Ignored;
        }

        self.transcript.write().await.push(ChatMessage::user(text));

        let reply = match self.agent.ask(text).await {
            Ok(reply) => reply,
            Err(err) => {
                log::warn!("advisory exchange failed: {err}");
                self.notifier.error(SEND_FAILED_NOTICE);
                FALLBACK_REPLY.to_string()
            }
        };

        self.transcript.write().await.push(ChatMessage::assistant(reply));
        self.in_flight.store(false, Ordering::SeqCst);
        SubmitOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::{Notice, RecordingNotifier};
    use immify_core::{ImmifyError, MessageRole, Result};
    use tokio::sync::Semaphore;

    struct FixedAgent {
        reply: Result<String>,
    }

    #[async_trait::async_trait]
    impl AdvisorAgent for FixedAgent {
        async fn ask(&self, _message: &str) -> Result<String> {
            self.reply.clone()
        }
    }

    /// Agent that blocks until the test releases a permit.
    struct GatedAgent {
        gate: Arc<Semaphore>,
    }

    #[async_trait::async_trait]
    impl AdvisorAgent for GatedAgent {
        async fn ask(&self, _message: &str) -> Result<String> {
            let _permit = self.gate.acquire().await.unwrap();
            Ok("done".to_string())
        }
    }

    fn controller(reply: Result<String>) -> (Arc<ChatController>, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let agent = Arc::new(FixedAgent { reply });
        (
            Arc::new(ChatController::new(agent, notifier.clone())),
            notifier,
        )
    }

    #[tokio::test]
    async fn transcript_starts_with_the_greeting() {
        let (chat, _) = controller(Ok("hi".into()));
        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript[0], ChatMessage::assistant(GREETING));
    }

    #[tokio::test]
    async fn submit_appends_user_then_reply_in_order() {
        let (chat, notifier) = controller(Ok("You need Form I-20.".into()));

        let outcome = chat.submit("What are F-1 visa requirements?").await;
        assert_eq!(outcome, SubmitOutcome::Completed);

        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].role, MessageRole::User);
        assert_eq!(transcript[1].content, "What are F-1 visa requirements?");
        assert_eq!(transcript[2].role, MessageRole::Assistant);
        assert_eq!(transcript[2].content, "You need Form I-20.");
        assert!(notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn failed_exchange_appends_fallback_and_notifies() {
        let (chat, notifier) = controller(Err(ImmifyError::agent_status(500)));

        chat.submit("hello").await;

        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[2].content, FALLBACK_REPLY);
        assert_eq!(
            notifier.notices(),
            vec![Notice::Error(SEND_FAILED_NOTICE.to_string())]
        );
    }

    #[tokio::test]
    async fn empty_and_whitespace_input_are_no_ops() {
        let (chat, _) = controller(Ok("unused".into()));

        assert_eq!(chat.submit("").await, SubmitOutcome::Ignored);
        assert_eq!(chat.submit("   \t ").await, SubmitOutcome::Ignored);
        assert_eq!(chat.transcript().await.len(), 1);
    }

    #[tokio::test]
    async fn input_is_trimmed_before_appending() {
        let (chat, _) = controller(Ok("ok".into()));
        chat.submit("  hello  ").await;
        assert_eq!(chat.transcript().await[1].content, "hello");
    }

    #[tokio::test]
    async fn submit_while_in_flight_is_a_no_op() {
        let gate = Arc::new(Semaphore::new(0));
        let notifier = Arc::new(RecordingNotifier::default());
        let agent = Arc::new(GatedAgent { gate: gate.clone() });
        let chat = Arc::new(ChatController::new(agent, notifier));

        let first = {
            let chat = chat.clone();
            tokio::spawn(async move { chat.submit("first").await })
        };

        // Let the first submit reach the gated agent call.
        while !chat.is_busy() {
            tokio::task::yield_now().await;
        }

        assert_eq!(chat.submit("second").await, SubmitOutcome::Ignored);

        gate.add_permits(1);
        assert_eq!(first.await.unwrap(), SubmitOutcome::Completed);

        // Only the first exchange made it into the transcript.
        let transcript = chat.transcript().await;
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[1].content, "first");
    }

    #[tokio::test]
    async fn controller_is_resubmittable_after_both_outcomes() {
        let (chat, _) = controller(Ok("reply".into()));
        chat.submit("one").await;
        assert!(!chat.is_busy());
        chat.submit("two").await;
        assert_eq!(chat.transcript().await.len(), 5);
    }
}
