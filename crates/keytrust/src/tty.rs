//! Terminal interaction channel used by the ownertrust dialog.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{RecipientError, Result};

/// Line-oriented terminal.
pub trait Tty {
    /// Show `prompt` and block until the operator enters a line.
    ///
    /// # Errors
    ///
    /// `RecipientError::TerminalClosed` once no more input can arrive.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Print `text` verbatim.
    fn print(&mut self, text: &str);

    /// Remove the echoed prompt line, where the terminal supports it.
    fn kill_prompt(&mut self) {}
}

/// Prompts on stderr, reads from stdin.
///
/// End of input is reported as `TerminalClosed`; the dialogs that use this
/// channel have no default answer to fall back to.
#[derive(Debug, Default)]
pub struct StdTty;

impl Tty for StdTty {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        let mut stderr = std::io::stderr();
        let _ = write!(stderr, "{prompt}");
        let _ = stderr.flush();

        let mut line = String::new();
        match std::io::stdin().lock().read_line(&mut line) {
            Ok(0) => {
                log::error!("end of input while waiting for an answer");
                Err(RecipientError::TerminalClosed)
            }
            Ok(_) => Ok(line),
            Err(e) => {
                log::error!("failed to read from terminal: {e}");
                Err(RecipientError::Io(e))
            }
        }
    }

    fn print(&mut self, text: &str) {
        eprint!("{text}");
    }
}

/// A terminal driven by a fixed script of input lines.
///
/// Everything printed and every prompt shown is captured for inspection.
/// Reading past the end of the script reports `TerminalClosed`, the same
/// as a real terminal reaching end of input.
#[derive(Debug, Default)]
pub struct ScriptedTty {
    input: VecDeque<String>,
    output: String,
    prompts: Vec<String>,
}

impl ScriptedTty {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            output: String::new(),
            prompts: Vec::new(),
        }
    }

    /// Everything printed so far.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Prompts shown so far, in order.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Input lines not consumed yet.
    pub fn remaining(&self) -> usize {
        self.input.len()
    }
}

impl Tty for ScriptedTty {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.input.pop_front().ok_or(RecipientError::TerminalClosed)
    }

    fn print(&mut self, text: &str) {
        self.output.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_tty_replays_lines() {
        let mut tty = ScriptedTty::new(["one", "two"]);
        assert_eq!(tty.read_line("a? ").unwrap(), "one");
        tty.print("hello\n");
        assert_eq!(tty.read_line("b? ").unwrap(), "two");
        assert_eq!(tty.prompts(), ["a? ", "b? "]);
        assert_eq!(tty.output(), "hello\n");
        assert_eq!(tty.remaining(), 0);
    }

    #[test]
    fn test_scripted_tty_reports_closed_when_exhausted() {
        let mut tty = ScriptedTty::new(Vec::<String>::new());
        assert!(matches!(
            tty.read_line("? "),
            Err(RecipientError::TerminalClosed)
        ));
        assert_eq!(tty.prompts(), ["? "]);
    }
}
