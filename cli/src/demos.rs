use std::io::Write;
use streamchat_core::{ChatError, ChatTransport, Message, StreamingChatSession};

/// A canned, stateless request shown with a banner.
pub struct Example {
    pub title: &'static str,
    /// Turns echoed before the reply, for examples that replay a transcript.
    pub echo_transcript: bool,
    pub turns: fn() -> Vec<Message>,
}

pub const EXAMPLES: &[Example] = &[
    Example {
        title: "Simple Chat",
        echo_transcript: false,
        turns: || vec![Message::user("Hello! What is TENEX?")],
    },
    Example {
        title: "Multi-turn Conversation",
        echo_transcript: true,
        turns: || {
            vec![
                Message::user("What is 2+2?"),
                Message::assistant("2+2 equals 4."),
                Message::user("What about 3+3?"),
            ]
        },
    },
    Example {
        title: "Code Generation",
        echo_transcript: false,
        turns: || vec![Message::user("Write a Python function to reverse a string")],
    },
];

fn speaker(message: &Message) -> &'static str {
    match message.role() {
        streamchat_core::Role::User => "User",
        streamchat_core::Role::Assistant => "Assistant",
    }
}

pub async fn run_example<T, W>(
    session: &StreamingChatSession<T>,
    number: usize,
    example: &Example,
    out: &mut W,
) -> Result<String, ChatError>
where
    T: ChatTransport,
    W: Write,
{
    writeln!(out, "=== Example {}: {} ===\n", number, example.title)?;

    let turns = (example.turns)();
    if example.echo_transcript {
        for turn in &turns {
            writeln!(out, "{}: {}", speaker(turn), turn.content())?;
        }
    }

    write!(out, "Assistant: ")?;
    out.flush()?;
    let reply = session.run_fixed_demo(&turns, out).await?;
    writeln!(out, "\n")?;
    Ok(reply)
}

/// Run every canned example in order, stopping at the first failure.
pub async fn run_examples<T, W>(session: &StreamingChatSession<T>, out: &mut W) -> Result<(), ChatError>
where
    T: ChatTransport,
    W: Write,
{
    for (index, example) in EXAMPLES.iter().enumerate() {
        run_example(session, index + 1, example, out).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use streamchat_core::testing::{ScriptedReply, ScriptedTransport};

    #[tokio::test]
    async fn test_multi_turn_transcript_is_printed_in_order() {
        let session = StreamingChatSession::new(ScriptedTransport::new([ScriptedReply::text([
            "3+3 ",
            "equals 6.",
        ])]));
        let mut out = Vec::new();

        let reply = run_example(&session, 2, &EXAMPLES[1], &mut out).await.unwrap();

        assert_eq!(reply, "3+3 equals 6.");
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "=== Example 2: Multi-turn Conversation ===\n\n\
             User: What is 2+2?\n\
             Assistant: 2+2 equals 4.\n\
             User: What about 3+3?\n\
             Assistant: 3+3 equals 6.\n\n"
        );
        assert!(session.history().is_empty());
    }

    #[tokio::test]
    async fn test_all_examples_run_statelessly() {
        let session = StreamingChatSession::new(ScriptedTransport::new([
            ScriptedReply::text(["TENEX is a multi-agent system."]),
            ScriptedReply::text(["6"]),
            ScriptedReply::text(["def reverse(s): return s[::-1]"]),
        ]));
        let mut out = Vec::new();

        run_examples(&session, &mut out).await.unwrap();

        let requests = session.transport().requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[0], vec![Message::user("Hello! What is TENEX?")]);
        assert_eq!(requests[1].len(), 3);
        assert!(session.history().is_empty());

        let transcript = String::from_utf8(out).unwrap();
        let first = transcript.find("Example 1").unwrap();
        let third = transcript.find("Example 3: Code Generation").unwrap();
        assert!(first < third);
    }

    #[tokio::test]
    async fn test_examples_stop_at_first_failure() {
        let session = StreamingChatSession::new(ScriptedTransport::new([
            ScriptedReply::text(["ok"]),
            ScriptedReply::refuse("server down"),
        ]));
        let mut out = Vec::new();

        let err = run_examples(&session, &mut out).await.unwrap_err();

        assert!(matches!(err, ChatError::ApiError(_)));
        assert_eq!(session.transport().call_count(), 2);
        assert!(!String::from_utf8(out).unwrap().contains("Example 3"));
    }
}
