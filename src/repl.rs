//! Terminal chat loop.

use std::future::Future;
use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use crate::core::{LlmError, LlmProvider, UserInput};

pub const BANNER: &str = "Groq chat loop started. Type 'quit' to exit.";

/// Run the chat loop until the user types `quit`, input ends, or `shutdown` resolves.
///
/// Each non-empty line is sent as an independent request. Provider errors are
/// printed and the loop carries on; only I/O errors on `output` end it early.
/// `shutdown` (Ctrl-C in the binary) is handled like end of input, also while a
/// request is in flight.
pub async fn run<R, W, S>(
    provider: &dyn LlmProvider,
    input: R,
    output: &mut W,
    shutdown: S,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    S: Future<Output = ()>,
{
    writeln!(output, "{BANNER}")?;
    tokio::pin!(shutdown);

    let mut lines = input.lines();
    loop {
        write!(output, "You: ")?;
        output.flush()?;

        let next = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            next = lines.next_line() => Some(next),
        };

        let line = match next {
            Some(Ok(Some(line))) => line,
            Some(Ok(None)) | None => {
                writeln!(output, "\nExiting.")?;
                break;
            }
            Some(Err(e)) => {
                debug!(error = %e, "Input stream failed");
                writeln!(output, "\nExiting.")?;
                break;
            }
        };

        let text = match UserInput::parse(&line) {
            UserInput::Quit => {
                writeln!(output, "Exiting.")?;
                break;
            }
            UserInput::Empty => continue,
            UserInput::Prompt(text) => text,
        };

        let result = tokio::select! {
            biased;
            _ = &mut shutdown => None,
            result = provider.complete(&text) => Some(result),
        };

        match result {
            Some(Ok(answer)) => writeln!(output, "Assistant: {answer}\n")?,
            Some(Err(e)) => writeln!(output, "{}\n", render_error(&e))?,
            None => {
                writeln!(output, "\nExiting.")?;
                break;
            }
        }
    }

    Ok(())
}

fn render_error(error: &LlmError) -> String {
    match error {
        LlmError::Http { status_code, body } => format!("HTTP error {status_code}: {body}"),
        LlmError::Network { .. } => format!("Network error: {}", error.detail()),
        other => format!("Unexpected error: {other}"),
    }
}
