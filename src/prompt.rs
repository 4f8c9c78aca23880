//! Line-oriented console prompts.
//!
//! [`parse_choice`] is the pure validation step; [`Prompter`] wraps it in a
//! re-prompt loop over any `BufRead`/`Write` pair.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

pub const RETRY_MESSAGE: &str = "Sorry, I didn't catch that. Try again.";

/// An answer outside the accepted set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not one of the accepted answers")]
pub struct InvalidInput(pub String);

/// Matches `input` against `choices`, ignoring case and surrounding whitespace.
pub fn parse_choice<T: Clone>(input: &str, choices: &[(&str, T)]) -> Result<T, InvalidInput> {
    let answer = input.trim().to_lowercase();
    choices
        .iter()
        .find(|(label, _)| *label == answer)
        .map(|(_, value)| value.clone())
        .ok_or(InvalidInput(answer))
}

/// Only "yes" (any case) counts as agreement.
pub fn is_yes(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case("yes")
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    ///
    /// Bytes that are not UTF-8 become replacement characters, so such an
    /// answer is rejected like any other unknown one.
    fn read_answer(&mut self, prompt: &str) -> io::Result<Option<String>> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    /// Asks until the answer is one of `choices`. `None` at end of input.
    pub fn ask<T: Clone>(&mut self, prompt: &str, choices: &[(&str, T)]) -> io::Result<Option<T>> {
        while let Some(line) = self.read_answer(prompt)? {
            match parse_choice(&line, choices) {
                Ok(value) => return Ok(Some(value)),
                Err(e) => {
                    debug!(error = %e, "Rejected answer");
                    writeln!(self.output, "{RETRY_MESSAGE}")?;
                }
            }
        }
        Ok(None)
    }

    /// Yes/no question; anything but "yes", including end of input, is no.
    pub fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        Ok(self.read_answer(prompt)?.is_some_and(|line| is_yes(&line)))
    }
}
