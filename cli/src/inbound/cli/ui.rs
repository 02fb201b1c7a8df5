//! Terminal output for commands.
//!
//! Progress, results and `OK` go to the output stream; warnings, `FAILED` and
//! error text go to the error stream.

use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};

use crate::domain::Warnings;

const COLUMN_GAP: &str = "   ";

/// Output and error writers for one command run.
pub struct Ui<O, E> {
    out: O,
    err: E,
}

impl Ui<Stdout, Stderr> {
    /// UI over the process's standard streams.
    pub fn stdio() -> Self {
        Self::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Ui<O, E> {
    /// UI over arbitrary writers; tests capture into `Vec<u8>`.
    pub fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    /// Print one line to the output stream.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    /// Print every warning on its own line.
    pub fn warn(&mut self, warnings: &Warnings) -> io::Result<()> {
        for warning in warnings {
            writeln!(self.err, "{warning}")?;
        }
        Ok(())
    }

    /// Print `OK`.
    pub fn ok(&mut self) -> io::Result<()> {
        writeln!(self.out, "OK")
    }

    /// Print `FAILED` followed by the error text.
    pub fn failed(&mut self, error: impl Display) -> io::Result<()> {
        writeln!(self.err, "FAILED")?;
        writeln!(self.err, "{error}")
    }

    /// Print rows as left-aligned columns under a header row.
    pub fn table(&mut self, header: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
        let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
        for row in rows {
            for (index, cell) in row.iter().enumerate() {
                let width = cell.chars().count();
                match widths.get_mut(index) {
                    Some(current) => *current = (*current).max(width),
                    None => widths.push(width),
                }
            }
        }

        let header = header.iter().map(|cell| (*cell).to_owned()).collect::<Vec<_>>();
        for row in std::iter::once(&header).chain(rows) {
            let line = row
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join(COLUMN_GAP);
            writeln!(self.out, "{}", line.trim_end())?;
        }
        Ok(())
    }

    /// Flush both streams.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()?;
        self.err.flush()
    }

    /// Hand back the output and error writers.
    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }
}
