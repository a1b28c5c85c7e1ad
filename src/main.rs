use anyhow::{Context, Result};
use clap::Parser;
use epub_tools::cli::output::OutputConfig;
use epub_tools::cli::{Cli, Command};
use epub_tools::epub::layout::SourceTree;
use epub_tools::epub::{reader, writer};
use epub_tools::error::{EpubToolError, ErrorKind};
use epub_tools::util::{format_size, open_with_default_app, resolve_extract_target};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = init_logging(cli.verbose) {
        eprintln!("warning: {err}");
    }

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        if err
            .downcast_ref::<EpubToolError>()
            .is_some_and(|e| e.kind() == ErrorKind::Usage)
        {
            eprintln!("\nFor more information, try '--help'.");
        }
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the `--verbose` default.
fn init_logging(verbose: bool) -> Result<()> {
    let default = if verbose { "epub_tools=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}

fn run(cli: Cli) -> Result<()> {
    let output = OutputConfig::from_global(cli.json, cli.verbose, cli.quiet, cli.no_color);

    match cli.command {
        Command::Make {
            input,
            target,
            open,
        } => {
            let name = target.ok_or(EpubToolError::MissingTarget)?;
            writer::check_target_name(&name)?;
            handle_make(&input, &name, open, &output)
        }
        Command::Extract {
            input,
            target,
            open,
        } => {
            let target_dir = resolve_extract_target(target.as_deref(), &input);
            handle_extract(&input, &target_dir, open, &output)
        }
    }
}

fn handle_make(input: &Path, name: &str, open: bool, output: &OutputConfig) -> Result<()> {
    output.status(&format!("creating epub with name {name}"));

    let tree = SourceTree::from_descriptor(input)
        .with_context(|| format!("checking source tree for {}", input.display()))?;
    output.detail(&format!(
        "base path for compressing: {}",
        display_abs(&tree.base_dir).display()
    ));

    let summary = writer::package_tree(&tree, name)
        .with_context(|| format!("packaging {}", tree.base_dir.display()))?;

    if output.json {
        output.print_json(&summary)?;
    } else {
        output.status(&format!("Success! epub written in -> {}", summary.archive.display()));
        if output.verbose && !output.quiet {
            let rows: Vec<Vec<String>> = summary
                .entries
                .iter()
                .map(|e| vec![e.name.clone(), e.kind.to_string(), format_size(e.size)])
                .collect();
            output.print_table(&["ENTRY", "KIND", "SIZE"], &rows);
        }
        output.detail(&format!(
            "  {} entries, {} hidden file(s) skipped",
            summary.entries.len(),
            summary.skipped
        ));
    }

    if open {
        open_with_default_app(&summary.archive);
    }
    Ok(())
}

fn handle_extract(input: &Path, target: &Path, open: bool, output: &OutputConfig) -> Result<()> {
    output.status(&format!(
        "extracting {} in {}",
        input.display(),
        target.display()
    ));

    let summary = reader::extract_archive(input, target)
        .with_context(|| format!("extracting {} to {}", input.display(), target.display()))?;

    if output.json {
        output.print_json(&summary)?;
    } else {
        output.status("Success!");
        output.detail(&format!("  {} entries", summary.entries));
    }

    if open {
        open_with_default_app(target);
    }
    Ok(())
}

fn display_abs(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
