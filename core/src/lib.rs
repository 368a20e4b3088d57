//! Streaming chat session over an OpenAI-compatible chat-completion service.
//!
//! The transport is abstracted behind [`ChatTransport`]; this crate only
//! knows about turns, fragments, and how a reply is rendered and recorded.

pub mod config;
pub mod error;
pub mod http;
pub mod message;
pub mod session;
pub mod transport;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use config::ConnectionConfig;
pub use error::ChatError;
pub use message::{ConversationHistory, Message, Role};
pub use session::{StreamingChatSession, render_stream};
pub use transport::{ChatTransport, FragmentStream, StreamFragment};
