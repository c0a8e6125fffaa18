//! The read-dispatch-print loop.
//!
//! One command per input line, one JSON response envelope per output line.
//! Two console directives bypass the dispatcher:
//!
//! - `:context` prints a context snapshot
//! - `:quit` ends the session
//!
//! Blank lines are skipped.

use std::io::{BufRead, Write};

use blackfile_core::Dispatcher;
use tracing::{debug, info};

use crate::error::ConsoleError;

/// Directive that prints a context snapshot.
pub const CONTEXT_DIRECTIVE: &str = ":context";

/// Directive that ends the session.
pub const QUIT_DIRECTIVE: &str = ":quit";

/// Run the loop until end of input or `:quit`. Returns the number of
/// commands dispatched.
pub fn run<R: BufRead, W: Write>(
    dispatcher: &mut Dispatcher,
    input: R,
    mut output: W,
) -> Result<u64, ConsoleError> {
    let mut dispatched: u64 = 0;

    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        match trimmed {
            "" => continue,
            QUIT_DIRECTIVE => {
                info!(dispatched, "session ended by operator");
                break;
            }
            CONTEXT_DIRECTIVE => {
                let snapshot = dispatcher.build_context();
                serde_json::to_writer(&mut output, &snapshot)?;
            }
            command => {
                let response = dispatcher.process(command);
                debug!(status = ?response.status, "response ready");
                serde_json::to_writer(&mut output, &response)?;
                dispatched = dispatched.saturating_add(1);
            }
        }
        writeln!(output)?;
        output.flush()?;
    }

    Ok(dispatched)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn lines(output: &[u8]) -> Vec<serde_json::Value> {
        String::from_utf8(output.to_vec())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[test]
    fn one_envelope_per_command() {
        let mut dispatcher = Dispatcher::default();
        let input = "HELP\n\nESCALATE\nBOGUS\n";
        let mut output = Vec::new();

        let count = run(&mut dispatcher, input.as_bytes(), &mut output).unwrap();
        assert_eq!(count, 3);

        let envelopes = lines(&output);
        assert_eq!(envelopes.len(), 3);
        assert_eq!(envelopes[0]["status"], "SUCCESS");
        assert_eq!(envelopes[1]["data"]["escalation"]["to"], "ELEVATED");
        assert_eq!(envelopes[2]["message"], "Unknown command: BOGUS");
    }

    #[test]
    fn context_and_quit_directives() {
        let mut dispatcher = Dispatcher::default();
        let input = "ALERT sighting\n:context\n:quit\nESCALATE\n";
        let mut output = Vec::new();

        let count = run(&mut dispatcher, input.as_bytes(), &mut output).unwrap();
        assert_eq!(count, 1);

        let envelopes = lines(&output);
        assert_eq!(envelopes.len(), 2);
        assert_eq!(envelopes[1]["metadata"]["threatLevel"], "ELEVATED");
        assert!(envelopes[1]["activeThreats"].is_array());
    }
}
