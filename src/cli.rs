use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use structlens::report::{
    Annotation, annotations, hover_text, memory_layout_text, optimization_warnings,
    record_hover, render_warnings,
};
use structlens::sources::{SourceFile, collect_sources};
use structlens::{
    Analyzer, AnalyzerConfig, DocumentAnalysis, MultiNamePolicy, Position, RecordAnalysis,
    TargetArch,
};
use structlens_utils::{Stopwatch, init_logging};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target architecture (GOARCH name, e.g. amd64, arm64, 386)
    #[arg(long, global = true)]
    arch: Option<TargetArch>,

    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// How `a, b T` field lines are counted (first-name or expand)
    #[arg(long, global = true)]
    multi_name_fields: Option<MultiNamePolicy>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the memory layout of every struct
    Analyze {
        /// Go files or directories to search for `.go` files
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Report structs whose size a field reordering would reduce
    Check {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Describe the field or struct at a position (1-based)
    Inspect {
        path: PathBuf,

        #[arg(long)]
        line: usize,

        #[arg(long)]
        column: usize,
    },
    /// Print a file with size annotations after each struct and field name
    Annotate { path: PathBuf },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

impl Cli {
    /// Defaults, then the config file, then the environment, then flags.
    fn resolve_config(&self) -> Result<AnalyzerConfig> {
        let config = match &self.config {
            Some(path) => AnalyzerConfig::from_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => AnalyzerConfig::default(),
        };
        let mut config = config.merge_with_env();

        if let Some(arch) = &self.arch {
            config.architecture = arch.clone();
        }
        if let Some(policy) = self.multi_name_fields {
            config.multi_name_fields = policy;
        }
        Ok(config)
    }
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if cli.no_color {
        colored::control::set_override(false);
    }

    let config = cli.resolve_config()?;
    debug!(
        arch = %config.architecture,
        multi_name_fields = %config.multi_name_fields,
        "resolved configuration"
    );
    let analyzer = Analyzer::new(&config);

    match &cli.command {
        Command::Analyze { paths, format } => {
            let files = analyze_paths(&analyzer, paths)?;
            match format {
                Format::Text => print_layouts(&files),
                Format::Json => print_json(&config, &files)?,
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Check { paths } => {
            let files = analyze_paths(&analyzer, paths)?;
            let mut total = 0;
            for (source, analysis) in &files {
                let warnings = optimization_warnings(analysis, &config);
                if warnings.is_empty() {
                    continue;
                }
                total += warnings.len();
                let rendered =
                    render_warnings(&source.display_name(), &source.text, &warnings, !cli.no_color)?;
                print!("{rendered}");
            }
            if total == 0 {
                info!("no structs can be shrunk by reordering");
                Ok(ExitCode::SUCCESS)
            } else {
                info!(warnings = total, "found structs that can be shrunk");
                Ok(ExitCode::from(1))
            }
        }
        Command::Inspect { path, line, column } => {
            let source = SourceFile::read(path)?;
            let analysis = analyzer.analyze(&source.text);
            println!("{}", inspect(&analysis, *line, *column)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Annotate { path } => {
            let source = SourceFile::read(path)?;
            let analysis = analyzer.analyze(&source.text);
            print!("{}", annotate(&source.text, &annotations(&analysis, &config)));
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn analyze_paths(
    analyzer: &Analyzer,
    paths: &[PathBuf],
) -> Result<Vec<(SourceFile, DocumentAnalysis)>> {
    let watch = Stopwatch::start_new("analyze");
    let files = collect_sources(paths)?;
    debug!(files = files.len(), "collected sources");

    let analyzed = files
        .par_iter()
        .map(|path| {
            let source = SourceFile::read(path)?;
            let analysis = analyzer.analyze(&source.text);
            Ok((source, analysis))
        })
        .collect::<Result<Vec<_>>>()?;

    watch.finish();
    Ok(analyzed)
}

fn print_layouts(files: &[(SourceFile, DocumentAnalysis)]) {
    for (source, analysis) in files {
        if analysis.is_empty() {
            continue;
        }
        println!("{}", source.display_name().bold());
        for record in &analysis.records {
            print!("{}", describe_record(record));
        }
        println!();
    }
}

fn describe_record(record: &RecordAnalysis) -> String {
    let layout = &record.layout;
    let mut text = format!(
        "  {} {}  {} (align {}, {} bytes padding)\n",
        "struct".dimmed(),
        record.name().cyan().bold(),
        format!("{} bytes", layout.total_size).bold(),
        layout.record_alignment,
        layout.total_padding()
    );
    for line in memory_layout_text(layout).lines() {
        let _ = writeln!(text, "    {line}");
    }

    let optimality = &record.optimality;
    if optimality.is_optimizable {
        let _ = writeln!(
            text,
            "    {} {} bytes with order: {}",
            "can shrink to".yellow(),
            optimality.optimal_size,
            optimality.suggested_order.join(", ")
        );
    }
    text
}

#[derive(Serialize)]
struct FileReport<'a> {
    path: &'a Path,
    #[serde(flatten)]
    analysis: &'a DocumentAnalysis,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    architecture: String,
    word_size: u8,
    files: Vec<FileReport<'a>>,
}

fn print_json(config: &AnalyzerConfig, files: &[(SourceFile, DocumentAnalysis)]) -> Result<()> {
    let report = JsonReport {
        architecture: config.architecture.to_string(),
        word_size: config.word_size().into(),
        files: files
            .iter()
            .map(|(source, analysis)| FileReport {
                path: &source.path,
                analysis,
            })
            .collect(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn inspect(analysis: &DocumentAnalysis, line: usize, column: usize) -> Result<String> {
    if line == 0 || column == 0 {
        bail!("line and column are 1-based");
    }
    let position = Position::new(line - 1, column - 1);

    if let Some(target) = analysis.hover_at(position) {
        return Ok(hover_text(target));
    }
    match analysis.record_at(position) {
        Some(record) => Ok(record_hover(record)),
        None => bail!("no struct at {position}"),
    }
}

/// Appends each line's annotation labels as a trailing comment.
fn annotate(text: &str, annotations: &[Annotation]) -> String {
    let mut out = String::new();
    for (index, line) in text.lines().enumerate() {
        let labels: Vec<&str> = annotations
            .iter()
            .filter(|annotation| annotation.position.line == index)
            .map(|annotation| annotation.label.as_str())
            .collect();

        if labels.is_empty() {
            let _ = writeln!(out, "{line}");
        } else {
            let note = format!("// {}", labels.join(" | "));
            let _ = writeln!(out, "{line}  {}", note.dimmed());
        }
    }
    out
}
