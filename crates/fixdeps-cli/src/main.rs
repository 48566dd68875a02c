//! CLI entry point for fixdeps.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, logging setup, and
//! exit codes. All business logic lives in the `fixdeps-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use fixdeps_app::{
    CheckInput, ExplainOutput, parse_report_json, render_annotations, render_markdown, run_check,
    run_explain, run_workspaces, runtime_error_report, serialize_report, to_renderable,
    verdict_exit_code,
};
use fixdeps_domain::workspace::WorkspaceTool;
use fixdeps_settings::Overrides;
use fixdeps_types::FixdepsReport;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "fixdeps",
    version,
    about = "Verify that JavaScript imports are declared in the nearest package.json"
)]
struct Cli {
    /// Project root (directory containing the root package.json). Overrides `project_dir`.
    #[arg(long)]
    project_dir: Option<Utf8PathBuf>,

    /// Path to fixdeps config TOML, relative to the project root when one is given.
    #[arg(long, default_value = "fixdeps.toml")]
    config: Utf8PathBuf,

    /// Override profile (strict|warn).
    #[arg(long)]
    profile: Option<String>,

    /// Override maximum findings to emit.
    #[arg(long)]
    max_findings: Option<u32>,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check import sites against package.json declarations and write artifacts.
    Check {
        /// JSON array of import sites produced by source traversal.
        #[arg(long)]
        sites: Utf8PathBuf,

        /// Write planned dependency insertions into the owning package.json files.
        #[arg(long)]
        fix: bool,

        /// Check every external specifier, even when it is not installed under node_modules.
        #[arg(long)]
        assume_resolved: bool,

        /// Where to write the JSON report.
        #[arg(long, default_value = "artifacts/fixdeps/report.json")]
        report_out: Utf8PathBuf,

        /// Write a Markdown report alongside the JSON.
        #[arg(long)]
        write_markdown: bool,

        /// Where to write the Markdown report (if enabled).
        #[arg(long, default_value = "artifacts/fixdeps/comment.md")]
        markdown_out: Utf8PathBuf,
    },

    /// List the workspace packages declared by the project root as JSON.
    Workspaces {
        /// Workspace declarations to consult, in order.
        #[arg(long, value_delimiter = ',', default_value = "yarn,bolt")]
        tools: Vec<WorkspaceTool>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/fixdeps/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/fixdeps/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g., "deps.no_extraneous") or code (e.g., "missing_dependency").
        identifier: String,
    },

    /// Print the JSON Schema of the report or config format.
    Schema {
        #[arg(value_enum)]
        kind: SchemaKind,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SchemaKind {
    Report,
    Config,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match &cli.cmd {
        Commands::Check {
            sites,
            fix,
            assume_resolved,
            report_out,
            write_markdown,
            markdown_out,
        } => cmd_check(
            &cli,
            CheckArgs {
                sites,
                fix: *fix,
                assume_resolved: *assume_resolved,
                report_out,
                write_markdown: *write_markdown,
                markdown_out,
            },
        ),
        Commands::Workspaces { tools } => cmd_workspaces(&cli, tools),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
        Commands::Explain { identifier } => cmd_explain(identifier),
        Commands::Schema { kind } => cmd_schema(*kind),
    }
}

/// Logs go to stderr so stdout stays machine readable.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FIXDEPS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

struct CheckArgs<'a> {
    sites: &'a Utf8Path,
    fix: bool,
    assume_resolved: bool,
    report_out: &'a Utf8Path,
    write_markdown: bool,
    markdown_out: &'a Utf8Path,
}

fn cmd_check(cli: &Cli, args: CheckArgs<'_>) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<i32> {
        let (config_text, config_dir) = load_config(cli)?;
        let sites = fixdeps_repo::load_import_sites(args.sites).context("load import sites")?;

        let input = CheckInput {
            config_text: &config_text,
            config_dir: &config_dir,
            overrides: Overrides {
                profile: cli.profile.clone(),
                project_dir: cli.project_dir.as_deref().map(absolute),
                max_findings: cli.max_findings,
            },
            sites,
            apply_fixes: args.fix,
            assume_resolved: args.assume_resolved,
        };

        let output = run_check(input)?;
        if args.fix {
            eprintln!("fixdeps: applied {} fix(es)", output.fixes_applied);
        }

        write_report_file(args.report_out, &output.report).context("write report json")?;

        if args.write_markdown {
            let md = render_markdown(&to_renderable(&output.report));
            write_text_file(args.markdown_out, &md).context("write markdown")?;
        }

        Ok(verdict_exit_code(output.report.verdict.clone()))
    })();

    match result {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = runtime_error_report(&format!("{err:#}"));
            let _ = write_report_file(args.report_out, &report);
            eprintln!("fixdeps error: {err:#}");
            std::process::exit(1);
        }
    }
}

/// Read the config file (a missing file is allowed) and the directory its paths are relative to.
fn load_config(cli: &Cli) -> anyhow::Result<(String, Utf8PathBuf)> {
    let base = cli
        .project_dir
        .as_deref()
        .map(absolute)
        .unwrap_or_else(|| absolute(Utf8Path::new(".")));
    let cfg_path = base.join(&cli.config);

    if !cfg_path.is_file() {
        tracing::debug!(path = %cfg_path, "no config file; using defaults and overrides");
        return Ok((String::new(), base));
    }

    let text =
        std::fs::read_to_string(&cfg_path).with_context(|| format!("read config: {cfg_path}"))?;
    let dir = cfg_path
        .parent()
        .map(Utf8Path::to_path_buf)
        .unwrap_or(base);
    Ok((text, dir))
}

fn absolute(path: &Utf8Path) -> Utf8PathBuf {
    path.canonicalize_utf8()
        .unwrap_or_else(|_| path.to_path_buf())
}

fn cmd_workspaces(cli: &Cli, tools: &[WorkspaceTool]) -> anyhow::Result<()> {
    let root = cli
        .project_dir
        .as_deref()
        .map(absolute)
        .unwrap_or_else(|| absolute(Utf8Path::new(".")));

    match run_workspaces(&root, tools) {
        Ok(listing) => {
            let json = serde_json::to_string_pretty(&listing).context("serialize workspaces")?;
            println!("{json}");
            Ok(())
        }
        Err(err) => {
            eprintln!("fixdeps error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_report_file(path: &Utf8Path, report: &FixdepsReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {path}"))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {path}"))?;
    Ok(())
}

fn read_report(path: &Utf8Path) -> anyhow::Result<FixdepsReport> {
    let text = std::fs::read_to_string(path).with_context(|| format!("read report: {path}"))?;
    parse_report_json(&text)
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{md}");
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report = read_report(report_path)?;
    for annotation in render_annotations(&to_renderable(&report), max) {
        println!("{annotation}");
    }
    Ok(())
}

fn cmd_explain(identifier: &str) -> anyhow::Result<()> {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", fixdeps_app::format_explanation(&exp));
            Ok(())
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                fixdeps_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            std::process::exit(1);
        }
    }
}

fn cmd_schema(kind: SchemaKind) -> anyhow::Result<()> {
    let schema = match kind {
        SchemaKind::Report => fixdeps_app::report_schema(),
        SchemaKind::Config => fixdeps_app::config_schema(),
    };
    let json = serde_json::to_string_pretty(&schema).context("serialize schema")?;
    println!("{json}");
    Ok(())
}
