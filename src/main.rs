//! mermaid-restyle - Restyle mermaid diagrams in markdown documentation.
//!
//! # Usage
//!
//! ```bash
//! mermaid-restyle
//! mermaid-restyle --dry-run
//! mermaid-restyle --check --docs-dir handbook
//! mermaid-restyle --theme payment docs/billing.md
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mermaid_restyle::config::{
    ConfigFlags, ThemeChoice, clear_config_flags, global_config_path, load_config_flags,
    local_override_path, parse_flag_tokens, save_config_flags,
};
use mermaid_restyle::document::{
    DEFAULT_DOCS_DIR, FileOutcome, FileReport, WriteMode, discover_documents, restyle_all,
};
use mermaid_restyle::perf;
use mermaid_restyle::rewrite::Rewriter;
use mermaid_restyle::theme::themes;

/// Restyle mermaid diagrams in markdown documentation
#[derive(Parser, Debug)]
#[command(name = "mermaid-restyle", version, about, long_about = None)]
struct Cli {
    /// Markdown files to restyle (default: discover under the root)
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Project root to discover documents in
    #[arg(long, value_name = "DIR", default_value = ".")]
    root: PathBuf,

    /// Documentation directory below the root, searched recursively
    #[arg(long, value_name = "DIR")]
    docs_dir: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Like --dry-run, but exit non-zero if any document would change
    #[arg(long)]
    check: bool,

    /// Force one theme for every diagram
    #[arg(long, value_enum)]
    theme: Option<ThemeChoice>,

    /// Only add style classes to diagram kinds that support them
    #[arg(long)]
    kind_aware: bool,

    /// Log timing of the restyle pipeline
    #[arg(long)]
    perf: bool,

    /// Log every diagram as it is restyled
    #[arg(short, long)]
    verbose: bool,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

/// Build the log filter. `RUST_LOG` (`env`) replaces the flag-based default
/// level when set; the perf target is enabled on top of either.
fn log_filter(env: Option<&str>, flags: &ConfigFlags) -> Result<EnvFilter> {
    let level = if flags.verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    let mut filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(env.unwrap_or_default());
    if flags.perf {
        filter = filter.add_directive(
            format!("{}=info", perf::TARGET)
                .parse()
                .context("perf log directive")?,
        );
    }
    Ok(filter)
}

fn init_tracing(flags: &ConfigFlags) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env.as_deref(), flags)?)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn documents(cli: &Cli, docs_dir: &Path) -> Result<Vec<PathBuf>> {
    if !cli.paths.is_empty() {
        return Ok(cli.paths.clone());
    }
    discover_documents(&cli.root, docs_dir)
        .with_context(|| format!("Failed to discover documents in {}", cli.root.display()))
}

fn print_report(report: &FileReport, dry_run: bool) {
    let status = match (report.outcome, dry_run) {
        (FileOutcome::NoDiagrams, _) => return,
        (FileOutcome::Unchanged, _) => "unchanged",
        (FileOutcome::Restyled, true) => "would restyle",
        (FileOutcome::Restyled, false) => "restyled",
    };
    println!(
        "{status}: {} ({} diagrams)",
        report.path.display(),
        report.diagrams.len()
    );
    for diagram in &report.diagrams {
        println!(
            "    diagram {}: {} theme, {} nodes classified",
            diagram.index,
            diagram.diagram.theme.name,
            diagram.diagram.classified_nodes()
        );
    }
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path(&cli.root);
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_tracing(&effective)?;
    perf::set_enabled(effective.perf);
    let _scope = perf::scope("main");

    let docs_dir = effective
        .docs_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_DIR));
    let paths = documents(&cli, &docs_dir)?;
    println!("Found {} markdown files", paths.len());

    let rewriter = Rewriter::default()
        .with_category(effective.theme.and_then(ThemeChoice::category))
        .with_kind_aware(effective.kind_aware);
    let mode = if effective.writes() {
        WriteMode::Write
    } else {
        WriteMode::DryRun
    };

    let summary = restyle_all(&paths, &rewriter, mode);
    for report in &summary.reports {
        print_report(report, summary.dry_run);
    }
    println!("\n{summary}");

    if summary.restyled() > 0 && mode == WriteMode::Write {
        println!("\nThemes:");
        for theme in themes() {
            println!("  {} - {} diagrams", theme.name, theme.category);
        }
    }

    if !summary.failures.is_empty() {
        anyhow::bail!("failed to restyle {} documents", summary.failures.len());
    }
    if effective.check && summary.restyled() > 0 {
        anyhow::bail!("{} documents need restyling", summary.restyled());
    }
    Ok(())
}
