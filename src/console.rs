// Console module: the prompts and printed lines every script goes through.
//
// Two implementations: `TermConsole` uses dialoguer when a person is at the
// keyboard, `LineConsole` reads plain lines from any reader so the scripts
// can be driven by a pipe (and by tests).

use std::io::{BufRead, Write};

use crossterm::style::{style, Stylize};
use dialoguer::Input;

use crate::error::{AppError, AppResult};
use crate::money::Money;

pub trait Console {
    /// Show `prompt` and return the line typed, without its line ending.
    fn read_line(&mut self, prompt: &str) -> AppResult<String>;

    /// Print one line of output.
    fn say(&mut self, line: &str) -> AppResult<()>;

    fn read_number(&mut self, prompt: &str) -> AppResult<f64> {
        let raw = self.read_line(prompt)?;
        let raw = raw.trim();
        raw.parse()
            .map_err(|_| AppError::InvalidNumber(raw.to_string()))
    }

    fn read_amount(&mut self, prompt: &str) -> AppResult<Money> {
        Money::parse(&self.read_line(prompt)?)
    }

    /// Script title line.
    fn heading(&mut self, title: &str) -> AppResult<()> {
        self.say(title)
    }
}

/// Interactive console backed by dialoguer. Numeric prompts re-ask until
/// the input parses.
#[derive(Debug, Default)]
pub struct TermConsole;

impl TermConsole {
    pub fn new() -> Self {
        Self
    }
}

impl Console for TermConsole {
    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        let line: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn say(&mut self, line: &str) -> AppResult<()> {
        println!("{}", line);
        Ok(())
    }

    fn read_number(&mut self, prompt: &str) -> AppResult<f64> {
        let value: f64 = Input::new().with_prompt(prompt).interact_text()?;
        Ok(value)
    }

    fn read_amount(&mut self, prompt: &str) -> AppResult<Money> {
        let value: Money = Input::new().with_prompt(prompt).interact_text()?;
        Ok(value)
    }

    fn heading(&mut self, title: &str) -> AppResult<()> {
        println!("{}", style(title).bold());
        Ok(())
    }
}

/// Line-oriented console: prompts are written as `"{prompt}: "` and one
/// line is read per prompt. End of input is reported as
/// `AppError::EndOfInput`.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> AppResult<String> {
        write!(self.output, "{}: ", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(AppError::EndOfInput);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(line)
    }

    fn say(&mut self, line: &str) -> AppResult<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}

/// In-memory console over a fixed script of input lines.
#[cfg(test)]
pub(crate) fn scripted(input: &str) -> LineConsole<std::io::Cursor<Vec<u8>>, Vec<u8>> {
    LineConsole::new(std::io::Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

#[cfg(test)]
pub(crate) fn transcript(console: &LineConsole<std::io::Cursor<Vec<u8>>, Vec<u8>>) -> String {
    String::from_utf8_lossy(console.output()).into_owned()
}
