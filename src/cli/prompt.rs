//! Reading user input and writing messages.
//!
//! Every prompt reads a whole line of text; interpretation (integer parsing,
//! state lookup) happens in the caller so the validation messages are the same
//! whichever prompter is in use.

use crate::error::{AppError, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use std::io::{self, BufRead, Write};
use std::num::ParseIntError;

/// Parses a line of user input as an integer, ignoring surrounding whitespace.
pub fn parse_integer(input: &str) -> std::result::Result<i128, ParseIntError> {
    input.trim().parse::<i128>()
}

/// Line-oriented conversation with the user.
pub trait Prompter {
    /// Shows `prompt` and returns the next line the user enters, without its
    /// line ending.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InputClosed` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Writes `text` exactly as given.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Writes `text` followed by a newline.
    fn say(&mut self, text: &str) -> Result<()> {
        self.write_text(text)?;
        self.write_text("\n")
    }
}

/// Prompter over a plain reader and writer, normally standard input and output.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.output, "{}\t", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::InputClosed);
        }

        let trimmed_len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        Ok(())
    }
}

/// Prompter using `dialoguer` text input with its colorful theme.
#[derive(Default)]
pub struct DialoguerPrompter {
    theme: ColorfulTheme,
}

impl Prompter for DialoguerPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt.trim_end_matches(':'))
            .allow_empty(true)
            .interact_text()
            .map_err(|err| match err {
                dialoguer::Error::IO(ref e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    AppError::InputClosed
                },
                other => other.into(),
            })
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(text.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}
