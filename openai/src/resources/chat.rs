use crate::client::Client;
use crate::types::chat::{ChatCompletionChunk, ChatCompletionRequest};
use eventsource_stream::Eventsource;
use futures_core::Stream;
use futures_util::StreamExt;
use std::future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use streamchat_core::http::send_json;
use streamchat_core::ChatError;

const CHAT_COMPLETIONS_SEGMENTS: [&str; 2] = ["chat", "completions"];
const DEBUG_REQUESTS_VAR: &str = "STREAMCHAT_DEBUG_REQUESTS";

static REQUEST_DUMP_SEQ: AtomicU64 = AtomicU64::new(1);

fn maybe_dump_request(url: &str, request: &ChatCompletionRequest) {
    if std::env::var_os(DEBUG_REQUESTS_VAR).is_none() {
        return;
    }
    let seq = REQUEST_DUMP_SEQ.fetch_add(1, Ordering::Relaxed);
    match serde_json::to_string_pretty(request) {
        Ok(json) => eprintln!("\n=== streamchat request #{seq} {url} ===\n{json}\n"),
        Err(err) => eprintln!("\n=== streamchat request #{seq} {url} ===\n<serialize error: {err}>\n"),
    }
}

fn maybe_dump_sse_event(url: &str, event_name: &str, data: &str) {
    if std::env::var_os(DEBUG_REQUESTS_VAR).is_none() {
        return;
    }
    eprintln!("\n=== streamchat sse event {url} event={event_name:?} ===\n{data}\n");
}

pub type ChunkStream = Pin<Box<dyn Stream<Item = Result<ChatCompletionChunk, ChatError>> + Send + 'static>>;

#[derive(Clone, Debug)]
pub struct ChatResource {
    pub(crate) client: Client,
}

impl ChatResource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn url(&self) -> Result<String, ChatError> {
        let url = self.client.config.endpoint(&CHAT_COMPLETIONS_SEGMENTS)?;
        Ok(url.into())
    }

    /// Create a Chat Completion Stream
    ///
    /// POST {api_base}/chat/completions (returning an SSE stream)
    pub async fn create_stream(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChunkStream, ChatError> {
        request.stream = Some(true);

        let url = self.url()?;
        maybe_dump_request(&url, &request);
        let response = send_json(&self.client.http_client, &url, &request).await?;
        let stream = response.bytes_stream().eventsource();

        // OpenAI-compatible servers signal end of stream with `data: [DONE]`;
        // anything after it is ignored even if the connection stays open.
        let mapped_stream = stream
            .take_while(|event_result| {
                future::ready(!matches!(event_result, Ok(event) if event.data == "[DONE]"))
            })
            .map(move |event_result| match event_result {
                Ok(event) => {
                    maybe_dump_sse_event(&url, &event.event, &event.data);
                    serde_json::from_str::<ChatCompletionChunk>(&event.data)
                        .map_err(ChatError::SerializationError)
                }
                Err(e) => Err(ChatError::StreamError(e.to_string())),
            });

        Ok(Box::pin(mapped_stream))
    }
}
