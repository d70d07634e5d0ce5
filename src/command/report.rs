use std::io::{self, Write};
use std::path::Path;

use crate::command::tree::{DurationEntry, DurationTree};
use crate::error::Problem;
use crate::utils::probe::Length;
use crate::utils::time::{format_length, Style};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// One line per measured file.
    #[default]
    Summary,
    /// A single `Total` line.
    Total,
}

// Prints lengths to `out` and per-path errors, prefixed with the program name, to `err`.
pub struct Reporter<'a, W: Write, E: Write> {
    program: &'a str,
    style: Style,
    out: W,
    err: E,
}

impl<'a, W: Write, E: Write> Reporter<'a, W, E> {
    pub fn new(program: &'a str, style: Style, out: W, err: E) -> Self {
        Self {
            program,
            style,
            out,
            err,
        }
    }

    pub fn problems(&mut self, problems: &[Problem]) -> io::Result<()> {
        for problem in problems {
            writeln!(self.err, "{}: {}", self.program, problem)?;
        }
        Ok(())
    }

    pub fn report(&mut self, tree: &DurationTree, mode: Mode) -> io::Result<()> {
        match mode {
            Mode::Summary => self.summary(tree),
            Mode::Total => self.total(tree),
        }
    }

    pub fn summary(&mut self, tree: &DurationTree) -> io::Result<()> {
        for (path, entry) in tree {
            match entry {
                DurationEntry::Leaf(Length::NotAudio) => self.not_audio(path)?,
                DurationEntry::Leaf(Length::Seconds(seconds)) => {
                    self.line(&path.display().to_string(), *seconds)?
                }
                DurationEntry::Subtree(subtree) => self.summary(subtree)?,
            }
        }
        Ok(())
    }

    pub fn total(&mut self, tree: &DurationTree) -> io::Result<()> {
        self.line("Total", tree.total_seconds())
    }

    fn line(&mut self, label: &str, seconds: u64) -> io::Result<()> {
        writeln!(self.out, "{}", format_length(label, seconds, self.style))
    }

    fn not_audio(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.err, "{}: {}: not an MP3", self.program, path.display())
    }
}
