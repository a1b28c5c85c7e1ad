use std::io::{self, IsTerminal, Write};

pub struct OutputConfig {
    pub json: bool,
    pub verbose: bool,
    pub quiet: bool,
    pub no_color: bool,
}

impl OutputConfig {
    pub fn from_global(json: bool, verbose: bool, quiet: bool, no_color: bool) -> Self {
        let no_color = no_color || std::env::var("NO_COLOR").is_ok() || !io::stdout().is_terminal();
        Self {
            json,
            verbose,
            quiet,
            no_color,
        }
    }

    /// Whether human-readable lines should be printed at all.
    fn chatty(&self) -> bool {
        !self.quiet && !self.json
    }

    /// Print a status/confirmation message (suppressed in quiet and JSON mode).
    pub fn status(&self, msg: &str) {
        if self.chatty() {
            println!("{msg}");
        }
    }

    /// Print extra detail (only shown in verbose mode).
    pub fn detail(&self, msg: &str) {
        if self.verbose && self.chatty() {
            println!("{msg}");
        }
    }

    pub fn print_json<T: serde::Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    /// Aligned columns on a color terminal, tab-separated otherwise.
    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        if rows.is_empty() {
            return;
        }

        if self.no_color {
            println!("{}", headers.join("\t"));
            for row in rows {
                println!("{}", row.join("\t"));
            }
            return;
        }

        let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(cell.len());
            }
        }
        println!("\x1b[1m{}\x1b[0m", pad_row(headers.iter().copied(), &widths));
        let sep: String = widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{sep}");
        for row in rows {
            println!("{}", pad_row(row.iter().map(String::as_str), &widths));
        }
    }
}

fn pad_row<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
}
