//! Actor layer: the chat widget's event loop and its message types.

pub mod chat;
pub mod messages;
pub mod traits;

pub use chat::{ChatHandle, ChatOptions};
pub use traits::Responder;
