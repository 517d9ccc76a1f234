use crate::assistant::IntentClassifier;
use async_trait::async_trait;

/// Defines the public interface for whatever produces the assistant's answer.
///
/// The chat actor only needs text in and text out, so the scripted classifier
/// and test doubles can be swapped freely.
#[async_trait]
pub trait Responder: Send + Sync + 'static {
    /// Produces the answer to one utterance. Never fails.
    async fn respond(&self, utterance: &str) -> String;
}

#[async_trait]
impl Responder for IntentClassifier {
    async fn respond(&self, utterance: &str) -> String {
        IntentClassifier::respond(self, utterance).to_string()
    }
}
