pub mod check;
pub mod config;
pub mod context;
pub mod list;
pub mod menu;
pub mod record;
pub mod remove;
pub mod select;

use anyhow::Result;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// How a `check` decides whether to replace the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Ask on the terminal
    Ask,
    /// Replace without asking
    Always,
    /// Never replace
    Never,
}

/// Line-oriented prompt over an input and an output stream.
///
/// Commands write their primary output through [`Terminal::out`] and read
/// answers with [`Terminal::choose`], [`Terminal::confirm`] and
/// [`Terminal::read_line`]. End of input counts as "no answer".
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    /// Terminal over the process's stdin and stdout
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `prompt` and read one line without its line ending
    ///
    /// Returns `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Numbered menu; re-prompts until a valid number is entered
    ///
    /// Returns the zero-based index of the choice, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub fn choose<S: AsRef<str>>(&mut self, title: &str, options: &[S]) -> Result<Option<usize>> {
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "{title}")?;
            for (i, option) in options.iter().enumerate() {
                writeln!(self.output, "{}) {}", i + 1, option.as_ref())?;
            }

            let Some(answer) = self.read_line("Enter your choice: ")? else {
                return Ok(None);
            };
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    /// Yes/no question defaulting to no
    ///
    /// # Errors
    ///
    /// Returns an error if reading or writing fails
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.read_line(&format!("{question} [y/N]: "))?;
        Ok(answer.is_some_and(|a| {
            let a = a.trim();
            a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")
        }))
    }
}
