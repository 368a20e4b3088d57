//! In-memory transport for tests.
//!
//! Available behind the `test-utils` feature flag.

use crate::error::ChatError;
use crate::message::Message;
use crate::transport::{ChatTransport, FragmentStream, StreamFragment};
use futures_util::future::BoxFuture;
use futures_util::stream;
use std::collections::VecDeque;
use std::sync::Mutex;

/// What the transport does for one call.
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Yield the fragments, then either end cleanly or fail with a stream
    /// error.
    Stream {
        fragments: Vec<StreamFragment>,
        failure: Option<String>,
    },
    /// Fail before any fragment is produced.
    Refuse(String),
}

impl ScriptedReply {
    pub fn text<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::fragments(parts.into_iter().map(|p| StreamFragment::new(Some(p.into()))).collect())
    }

    pub fn fragments(fragments: Vec<StreamFragment>) -> Self {
        Self::Stream {
            fragments,
            failure: None,
        }
    }

    pub fn fail_after<I, S>(parts: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Stream {
            fragments: parts
                .into_iter()
                .map(|p| StreamFragment::new(Some(p.into())))
                .collect(),
            failure: Some(message.into()),
        }
    }

    pub fn refuse(message: impl Into<String>) -> Self {
        Self::Refuse(message.into())
    }
}

/// Plays back queued replies in order and records every turn list it was
/// asked to send.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Turn lists received so far, oldest first.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }
}

impl ChatTransport for ScriptedTransport {
    fn open_stream<'a>(
        &'a self,
        turns: &'a [Message],
    ) -> BoxFuture<'a, Result<FragmentStream, ChatError>> {
        Box::pin(async move {
            self.requests
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(turns.to_vec());

            let next = self
                .replies
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .pop_front();

            match next {
                Some(ScriptedReply::Stream { fragments, failure }) => {
                    let mut items: Vec<Result<StreamFragment, ChatError>> =
                        fragments.into_iter().map(Ok).collect();
                    if let Some(message) = failure {
                        items.push(Err(ChatError::StreamError(message)));
                    }
                    Ok(Box::pin(stream::iter(items)) as FragmentStream)
                }
                Some(ScriptedReply::Refuse(message)) => Err(ChatError::ApiError(message)),
                None => Err(ChatError::ApiError("no scripted reply left".to_string())),
            }
        })
    }
}
