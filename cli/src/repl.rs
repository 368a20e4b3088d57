use std::io::Write;
use streamchat_core::{ChatError, ChatTransport, StreamingChatSession};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

pub const QUIT_KEYWORD: &str = "quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    WaitingForInput,
    Streaming,
    Terminated,
}

/// What one line of user input asks the loop to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction<'a> {
    Quit,
    Skip,
    Submit(&'a str),
}

/// `None` means end of input.
pub fn classify_input(line: Option<&str>) -> InputAction<'_> {
    let Some(line) = line else {
        return InputAction::Quit;
    };
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case(QUIT_KEYWORD) {
        InputAction::Quit
    } else if trimmed.is_empty() {
        InputAction::Skip
    } else {
        InputAction::Submit(trimmed)
    }
}

/// Prompt, read, stream, repeat until `quit` or end of input.
///
/// Each submitted line goes through [`StreamingChatSession::run_exchange`],
/// so the session history only ever holds completed exchanges. The first
/// failed exchange ends the loop and is returned to the caller.
pub async fn run_interactive<T, R, W>(
    session: &mut StreamingChatSession<T>,
    input: R,
    out: &mut W,
) -> Result<(), ChatError>
where
    T: ChatTransport,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "=== Example 4: Interactive Chat ===")?;
    writeln!(out, "Type '{QUIT_KEYWORD}' to exit\n")?;

    let mut lines = input.lines();
    let mut state = LoopState::WaitingForInput;

    while state != LoopState::Terminated {
        write!(out, "You: ")?;
        out.flush()?;

        let line = lines.next_line().await?;
        state = match classify_input(line.as_deref()) {
            InputAction::Quit => LoopState::Terminated,
            InputAction::Skip => LoopState::WaitingForInput,
            InputAction::Submit(text) => {
                debug!(state = ?LoopState::Streaming, history_len = session.history().len(), "submitting turn");
                write!(out, "Assistant: ")?;
                out.flush()?;
                session.run_exchange(text, out).await?;
                writeln!(out, "\n")?;
                LoopState::WaitingForInput
            }
        };
    }

    Ok(())
}
