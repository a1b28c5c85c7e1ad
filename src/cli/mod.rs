pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "epub-tools",
    version,
    about = "EPUB packaging tools: create an epub from a source tree, or extract one for editing"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Package a source tree (mimetype, META-INF, OEBPS) into an epub
    Make {
        /// Path to the .opf file inside OEBPS/<subdir>/
        input: PathBuf,
        /// Name of the epub to write in the tree's root, without extension
        target: Option<String>,
        /// Open the resulting epub with the default application
        #[arg(short, long)]
        open: bool,
    },
    /// Extract an epub so its contents can be edited
    Extract {
        /// Path to the epub file
        input: PathBuf,
        /// Output directory; defaults to the epub's own directory
        target: Option<PathBuf>,
        /// Open the output directory with the default file browser
        #[arg(short, long)]
        open: bool,
    },
}
