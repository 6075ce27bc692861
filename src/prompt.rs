/*!
 * Interactive option menu
 *
 * Reads answers from any `BufRead` and writes questions to any `Write`, so
 * the entry point can hand it stdin/stderr and tests can hand it buffers.
 * End of input is treated as the user aborting the run.
 */

use std::io::{BufRead, Write};

use crate::config::Options;
use crate::error::{CodeDigestError, Result};
use crate::policy::MarkdownMode;

const MARKDOWN_CHOICES: [(&str, &str, MarkdownMode); 3] = [
    ("1", "Include only README.md files", MarkdownMode::Readme),
    ("2", "Include all *.md files", MarkdownMode::All),
    ("3", "Exclude all Markdown files", MarkdownMode::None),
];

/// Question/answer loop over a reader and a writer
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Create a prompter
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask every option, offering `current` as the defaults
    pub fn run_menu(&mut self, current: Options) -> Result<Options> {
        writeln!(self.output, "\n🛠  Interactive options menu\n")?;

        let remove_comments = self.ask_yes_no(
            "Remove comments/documentation from code?",
            current.remove_comments,
        )?;
        let markdown_mode = self.ask_markdown_mode(current.markdown_mode)?;
        let include_js = self.ask_yes_no(
            "Include JavaScript/JSX files (.js/.jsx)?",
            current.include_js,
        )?;

        writeln!(self.output)?;

        Ok(Options {
            remove_comments,
            markdown_mode,
            include_js,
        })
    }

    /// Ask a yes/no question until a valid answer is given
    pub fn ask_yes_no(&mut self, question: &str, default: bool) -> Result<bool> {
        let suffix = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            write!(self.output, "{} {}: ", question, suffix)?;
            self.output.flush()?;

            match self.read_answer()?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                "" => return Ok(default),
                _ => writeln!(self.output, "Please answer 'y' or 'n'.")?,
            }
        }
    }

    /// Ask for the Markdown mode from a numbered list
    pub fn ask_markdown_mode(&mut self, default: MarkdownMode) -> Result<MarkdownMode> {
        writeln!(self.output, "Markdown inclusion mode:")?;
        for (key, label, mode) in MARKDOWN_CHOICES {
            let mark = if mode == default { " (default)" } else { "" };
            writeln!(self.output, "  {}) {}{}", key, label, mark)?;
        }

        loop {
            write!(self.output, "Select: ")?;
            self.output.flush()?;

            let answer = self.read_answer()?;
            if answer.is_empty() {
                return Ok(default);
            }
            if let Some((_, _, mode)) = MARKDOWN_CHOICES.iter().find(|(key, _, _)| *key == answer) {
                return Ok(*mode);
            }
            writeln!(self.output, "Invalid choice. Please select a valid option.")?;
        }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(CodeDigestError::Interrupted);
        }
        Ok(line.trim().to_string())
    }
}
