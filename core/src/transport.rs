use crate::error::ChatError;
use crate::message::Message;
use futures_util::future::BoxFuture;
use futures_util::stream::BoxStream;

/// One increment of streamed assistant output.
///
/// Role-only and control increments carry no text; they are represented as
/// an empty fragment rather than an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreamFragment {
    text: Option<String>,
}

impl StreamFragment {
    pub fn new(text: Option<String>) -> Self {
        Self { text }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

impl From<&str> for StreamFragment {
    fn from(text: &str) -> Self {
        Self::new(Some(text.to_string()))
    }
}

impl From<String> for StreamFragment {
    fn from(text: String) -> Self {
        Self::new(Some(text))
    }
}

/// Lazy, finite, single-pass sequence of fragments in arrival order.
pub type FragmentStream = BoxStream<'static, Result<StreamFragment, ChatError>>;

/// Something that can turn an ordered turn list into a live fragment stream.
pub trait ChatTransport: Send + Sync {
    fn open_stream<'a>(
        &'a self,
        turns: &'a [Message],
    ) -> BoxFuture<'a, Result<FragmentStream, ChatError>>;
}
