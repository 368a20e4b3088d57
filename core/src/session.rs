use crate::error::ChatError;
use crate::message::{ConversationHistory, Message};
use crate::transport::{ChatTransport, FragmentStream};
use futures_util::StreamExt;
use std::io::Write;
use tracing::{debug, warn};

/// Drain a fragment stream into `sink`, returning the concatenated reply.
///
/// Non-empty fragments are written and flushed one at a time, in arrival
/// order. Empty fragments are skipped. The first error ends the stream and is
/// returned as is; whatever was already written stays written.
pub async fn render_stream<W>(mut stream: FragmentStream, sink: &mut W) -> Result<String, ChatError>
where
    W: Write + ?Sized,
{
    let mut reply = String::new();
    let mut fragments = 0usize;

    while let Some(fragment) = stream.next().await {
        let fragment = fragment?;
        if fragment.is_empty() {
            continue;
        }
        sink.write_all(fragment.text().as_bytes())?;
        sink.flush()?;
        reply.push_str(fragment.text());
        fragments += 1;
    }

    debug!(fragments, reply_len = reply.len(), "stream completed");
    Ok(reply)
}

/// A conversation with a remote chat-completion service.
///
/// The session owns its history; only [`run_exchange`](Self::run_exchange)
/// writes to it, and only after a stream has completed.
#[derive(Debug)]
pub struct StreamingChatSession<T> {
    transport: T,
    history: ConversationHistory,
}

impl<T: ChatTransport> StreamingChatSession<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            history: ConversationHistory::new(),
        }
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `user_input` after the running history and stream the reply to
    /// `sink`.
    ///
    /// On success both the user turn and the assistant reply are appended.
    /// On failure, whether opening the stream or partway through it, history
    /// is left exactly as it was.
    pub async fn run_exchange<W>(
        &mut self,
        user_input: impl Into<String>,
        sink: &mut W,
    ) -> Result<String, ChatError>
    where
        W: Write + ?Sized,
    {
        let user = Message::user(user_input);
        let turns = self.history.with_pending(&user);

        let reply = match self.stream_turns(&turns, sink).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, history_len = self.history.len(), "exchange failed, history unchanged");
                return Err(e);
            }
        };

        self.history
            .commit_exchange(user, Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Stream a reply to a caller-supplied turn list. The session history is
    /// neither read nor written.
    pub async fn run_fixed_demo<W>(
        &self,
        turns: &[Message],
        sink: &mut W,
    ) -> Result<String, ChatError>
    where
        W: Write + ?Sized,
    {
        self.stream_turns(turns, sink).await
    }

    async fn stream_turns<W>(&self, turns: &[Message], sink: &mut W) -> Result<String, ChatError>
    where
        W: Write + ?Sized,
    {
        let stream = self.transport.open_stream(turns).await?;
        render_stream(stream, sink).await
    }
}
