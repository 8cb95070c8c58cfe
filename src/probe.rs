//! Probe implementations.
//! `TerminalProbe` asks the operator; `FixedProbe` answers the same way every time.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::output;
use crate::resolver::{Answer, Probe, Prompt};
use crate::shutdown;

/// Asks on stderr and reads a line from stdin.
/// Every conflict is asked separately; there is no sticky "yes to all".
pub struct TerminalProbe<R> {
    input: R,
    attached: bool,
}

impl TerminalProbe<io::StdinLock<'static>> {
    /// Probe bound to the process stdin. Reports `Unavailable` when stdin is not a TTY.
    pub fn stdin() -> Self {
        Self {
            input: io::stdin().lock(),
            attached: atty::is(atty::Stream::Stdin),
        }
    }
}

impl<R: BufRead> TerminalProbe<R> {
    /// Probe over an arbitrary reader treated as an attached terminal.
    pub fn with_reader(input: R) -> Self {
        Self {
            input,
            attached: true,
        }
    }
}

/// Interpret one line of operator input.
fn parse_reply(line: &str) -> Answer {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Answer::Yes,
        _ => Answer::No,
    }
}

impl<R: BufRead> Probe for TerminalProbe<R> {
    fn confirm(&mut self, prompt: &Prompt<'_>) -> Answer {
        if !self.attached {
            debug!(existing = %prompt.existing.display(), "no terminal attached; cannot prompt");
            return Answer::Unavailable;
        }

        output::print_prompt(&prompt.question());
        let _ = io::stderr().flush();

        // Ctrl-C does not interrupt the read; it is honoured once the line arrives.
        let mut line = String::new();
        let reply = match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => Answer::Unavailable,
            Ok(_) => parse_reply(&line),
        };
        if shutdown::is_requested() {
            debug!(existing = %prompt.existing.display(), "interrupted while prompting; declining");
            return Answer::No;
        }
        reply
    }
}

/// Gives the same answer to every question.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe(pub Answer);

impl Probe for FixedProbe {
    fn confirm(&mut self, _prompt: &Prompt<'_>) -> Answer {
        self.0
    }
}
