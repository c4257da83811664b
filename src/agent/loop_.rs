//! Line-oriented dialog: read a line, ask the assistant, print the answer.
//!
//! Turns are strictly sequential. The loop ends on the `exit` sentinel (any
//! case), end of input, cancellation, or the first error.

use crate::agent::session::Assistant;
use crate::error::{Error, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

pub const SENTINEL: &str = "exit";

/// Why the dialog stopped without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEnd {
    Sentinel,
    EndOfInput,
    Interrupted,
}

pub fn is_sentinel(line: &str) -> bool {
    line.eq_ignore_ascii_case(SENTINEL)
}

/// Run the dialog until it terminates. Errors are logged before returning.
pub async fn run_dialog<A, R, W>(
    assistant: &A,
    input: R,
    output: &mut W,
    cancel: CancellationToken,
) -> Result<DialogEnd>
where
    A: Assistant + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Start dialog (type '{}' to exit):", SENTINEL);

    let result = dialog_turns(assistant, input, output, &cancel).await;
    match &result {
        Ok(end) => info!("Dialog finished ({:?})", end),
        Err(e) => report_failure(e),
    }
    result
}

async fn dialog_turns<A, R, W>(
    assistant: &A,
    input: R,
    output: &mut W,
    cancel: &CancellationToken,
) -> Result<DialogEnd>
where
    A: Assistant + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut turn: u64 = 0;

    loop {
        let line = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(DialogEnd::Interrupted),
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            return Ok(DialogEnd::EndOfInput);
        };
        if is_sentinel(&line) {
            return Ok(DialogEnd::Sentinel);
        }
        if line.trim().is_empty() {
            continue;
        }

        turn += 1;
        debug!("[Turn {}] User: {}", turn, line);

        let reply = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Ok(DialogEnd::Interrupted),
            reply = assistant.chat(&line) => reply?,
        };

        output.write_all(reply.as_bytes()).await?;
        output.write_all(b"\n").await?;
        output.flush().await?;
    }
}

fn report_failure(e: &Error) {
    match e.http_details() {
        Some((status, body)) => error!("code: {} response: {}", status, body),
        None => error!("Dialog terminated: {}", e),
    }
}
