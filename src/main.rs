// SPDX-License-Identifier: PMPL-1.0-or-later
//! a11y-audit CLI - audit static HTML for accessibility conformance.

use a11y_audit::checks;
use a11y_audit::dom::HtmlDocument;
use a11y_audit::engine::{self, AuditContext, AuditSession, RunConfig};
use a11y_audit::locale::MessageCatalog;
use a11y_audit::report::{render_report, AuditReport, OutputFormat};
use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// File extensions the CLI audits.
const SCANNABLE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Directories to skip when auditing a tree.
const SKIP_DIRS: &[&str] = &[
    "node_modules", ".git", "target", "dist", "build", "_build", "vendor", "coverage",
];

/// WCAG accessibility audit engine
#[derive(Parser)]
#[command(name = "a11y-audit")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit an HTML file or directory
    Audit {
        /// File or directory to audit
        path: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// CSS selectors for containers to exclude from the audit
        #[arg(long)]
        exclude: Vec<String>,

        /// Rule ids to disable for this run
        #[arg(long)]
        disable: Vec<String>,

        /// JSON file with per-rule configuration overrides
        #[arg(long)]
        config: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// List the built-in rule catalog
    Rules,
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("a11y_audit=debug")
    } else {
        EnvFilter::new("a11y_audit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Audit {
            path,
            format,
            output,
            exclude,
            disable,
            config,
            verbose,
        } => {
            init_logging(verbose);
            let run_config = load_run_config(config.as_deref(), &disable)?;
            let reports = audit_path(&path, &run_config, &exclude).await?;

            let format = OutputFormat::from(format);
            let rendered = render_reports(&reports, format);
            write_output(&rendered, output.as_deref())?;

            if reports.iter().any(AuditReport::has_errors) {
                std::process::exit(1);
            }
        }

        Commands::Rules => {
            for rule in checks::builtin_rules() {
                let criteria: Vec<&str> =
                    rule.wcag_criteria.iter().map(String::as_str).collect();
                println!(
                    "{:<20} {:<10} wcag: [{}]",
                    rule.id,
                    rule.severity.to_string(),
                    criteria.join(", ")
                );
            }
        }
    }

    Ok(())
}

fn load_run_config(path: Option<&Path>, disable: &[String]) -> anyhow::Result<RunConfig> {
    let mut run_config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)
                .with_context(|| format!("reading config {}", p.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing config {}", p.display()))?
        }
        None => RunConfig::new(),
    };
    for rule_id in disable {
        run_config.disable(rule_id.clone());
    }
    Ok(run_config)
}

async fn audit_path(
    path: &Path,
    run_config: &RunConfig,
    exclude: &[String],
) -> anyhow::Result<Vec<AuditReport>> {
    let files = collect_files(path)?;
    anyhow::ensure!(
        !files.is_empty(),
        "no auditable HTML files under {}",
        path.display()
    );

    let registry = checks::builtin_registry()?;
    let standards = checks::builtin_standards();
    let messages = MessageCatalog::english();

    let mut reports = Vec::with_capacity(files.len());
    for file in files {
        let html = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        let doc = HtmlDocument::parse(&html);
        let mut ctx = AuditContext::document(&doc, file.display().to_string());
        for selector in exclude {
            ctx = ctx
                .exclude_matching(selector)
                .with_context(|| format!("resolving --exclude {}", selector))?;
        }
        let mut session = AuditSession::new();
        let report =
            engine::run(&registry, run_config, &standards, &messages, &ctx, &mut session)
                .await?;
        reports.push(report);
    }
    Ok(reports)
}

fn collect_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name().to_str().unwrap_or("");
            if e.file_type().is_dir() {
                return !SKIP_DIRS.contains(&name) && !name.starts_with('.');
            }
            true
        })
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        if !entry.file_type().is_file() {
            continue;
        }
        let ext = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        if SCANNABLE_EXTENSIONS.contains(&ext) {
            files.push(entry.path().to_path_buf());
        }
    }
    Ok(files)
}

fn render_reports(reports: &[AuditReport], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json if reports.len() == 1 => render_report(&reports[0], format),
        OutputFormat::Json => serde_json::to_string_pretty(reports)
            .unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e)),
        OutputFormat::Text => reports
            .iter()
            .map(|r| render_report(r, format))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
