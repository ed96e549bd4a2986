//! Line-based operator prompts

use anyhow::{Context, Result};
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

/// Source of operator answers
pub(crate) trait Prompter {
    /// Ask `question`; an empty answer (or end of input) yields `default`.
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;
}

/// Prompter over any line reader and writer (stdin/stderr in the binary)
pub(crate) struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<std::io::StdinLock<'static>, std::io::Stderr> {
    pub(crate) fn stdio() -> Self {
        Self::new(std::io::stdin().lock(), std::io::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", question, default).context("Failed to write prompt")?;
        self.output.flush().context("Failed to write prompt")?;

        let mut line = String::new();
        self.input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        let answer = line.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// Ask until the answer parses as `T`.
pub(crate) fn ask_parsed<T>(prompter: &mut dyn Prompter, question: &str, default: T) -> Result<T>
where
    T: FromStr + Display,
{
    let default_text = default.to_string();
    loop {
        let answer = prompter.ask(question, &default_text)?;
        match answer.parse() {
            Ok(value) => return Ok(value),
            Err(_) => eprintln!("  '{}' is not a valid value, try again", answer),
        }
    }
}

#[cfg(test)]
#[path = "prompt_test.rs"]
mod tests;
