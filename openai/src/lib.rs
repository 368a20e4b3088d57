//! Minimal client for OpenAI-compatible chat-completion servers that sit
//! behind a per-project path segment.

pub mod client;
pub mod resources;
pub mod types;

pub use client::{Client, ClientConfig};
pub use streamchat_core::{
    ChatError, ChatTransport, ConnectionConfig, FragmentStream, Message, StreamFragment,
    StreamingChatSession,
};

use futures_util::StreamExt;
use futures_util::future::BoxFuture;
use tracing::debug;
use types::chat::{ChatCompletionChunk, ChatCompletionRequest, ChatMessage};

/// Validate `config` and build a session that talks to the server it names.
///
/// Only the config's structure is checked; the server is not contacted.
pub fn connect(config: &ConnectionConfig) -> Result<StreamingChatSession<Client>, ChatError> {
    let client = Client::new(config)?;
    Ok(StreamingChatSession::new(client))
}

/// Reduce a decoded chunk to the fragment it contributes.
pub fn chunk_to_fragment(chunk: &ChatCompletionChunk) -> StreamFragment {
    StreamFragment::new(chunk.delta_text().map(str::to_string))
}

impl ChatTransport for Client {
    fn open_stream<'a>(
        &'a self,
        turns: &'a [Message],
    ) -> BoxFuture<'a, Result<FragmentStream, ChatError>> {
        Box::pin(async move {
            let request = ChatCompletionRequest::builder()
                .model(self.config.model.clone())
                .messages(turns.iter().map(ChatMessage::from).collect())
                .stream(true)
                .build();

            debug!(turns = turns.len(), model = %self.config.model, "opening chat stream");
            let stream = self.chat().create_stream(request).await?;
            let fragments = stream.map(|chunk| chunk.map(|c| chunk_to_fragment(&c)));

            Ok(Box::pin(fragments) as FragmentStream)
        })
    }
}
