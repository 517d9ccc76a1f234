use crate::models::Message;
use serde::Serialize;
use tokio::sync::oneshot;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone, PartialEq, Eq)]
pub enum ActorError {
    /// The actor has stopped (widget dismissed) and no longer accepts messages.
    #[error("Chat actor is closed")]
    Closed,
    /// The actor dropped the reply channel without answering.
    #[error("Chat actor dropped the request")]
    Dropped,
    /// An error indicating that an actor operation timed out.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for ActorError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        ActorError::Timeout(format!("Actor operation timed out: {}", err))
    }
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the chat actor.
#[derive(Debug)]
pub enum ChatMessage {
    /// A citizen utterance submitted from the input box.
    Submit {
        text: String,
        /// Receives the stored user message, or a validation error for blank input.
        responder: oneshot::Sender<Result<Message, AppError>>,
    },
    /// The deferred assistant answer, posted once the simulated delay elapsed.
    /// `seq` is the scheduling order; the actor appends replies in that order.
    DeliverReply { seq: u64, text: String },
    /// A request for a snapshot of the conversation in insertion order.
    History {
        responder: oneshot::Sender<Vec<Message>>,
    },
    /// A request for the number of replies still waiting on their timer.
    PendingReplies { responder: oneshot::Sender<usize> },
    /// Answered once no scheduled reply is left unappended.
    Settle { responder: oneshot::Sender<()> },
    /// The widget was closed. The actor stops; in-flight timers still fire.
    Dismiss,
}
