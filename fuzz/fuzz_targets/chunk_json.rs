#![no_main]

use futures_util::stream;
use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;
use streamchat_core::{ChatError, FragmentStream, StreamFragment, render_stream};
use streamchat_openai::chunk_to_fragment;
use streamchat_openai::types::chat::ChatCompletionChunk;
use tokio::runtime::{Builder, Runtime};

const MAX_INPUT_BYTES: usize = 16 * 1024;
const MAX_LINES: usize = 128;

fn runtime() -> &'static Runtime {
    static RUNTIME: OnceLock<Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        Builder::new_current_thread()
            .enable_all()
            .build()
            .expect("failed to build tokio runtime for fuzz target")
    })
}

// Each line stands in for one SSE `data:` payload.
fn decode_line(line: &str) -> Result<StreamFragment, ChatError> {
    serde_json::from_str::<ChatCompletionChunk>(line)
        .map(|chunk| chunk_to_fragment(&chunk))
        .map_err(ChatError::SerializationError)
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() || data.len() > MAX_INPUT_BYTES {
        return;
    }

    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    let items: Vec<Result<StreamFragment, ChatError>> =
        input.lines().take(MAX_LINES).map(decode_line).collect();
    let expected: Option<String> = items
        .iter()
        .map(|item| item.as_ref().ok().map(|f| f.text().to_string()))
        .collect();

    let stream: FragmentStream = Box::pin(stream::iter(items));
    let mut sink = Vec::new();
    let result = runtime().block_on(render_stream(stream, &mut sink));

    // The reply always equals what was written, and when every line decoded
    // it equals the in-order concatenation.
    if let Ok(reply) = &result {
        assert_eq!(reply.as_bytes(), sink.as_slice());
    }
    if let Some(expected) = expected {
        assert_eq!(result.ok(), Some(expected));
    }
});
