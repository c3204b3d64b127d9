//! linkscan: classify procurement records for China links.

mod source;
mod summary;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

use linkscan_config::{Deployment, DeploymentConfig};

use crate::source::{records, InputFormat, SourceItem};
use crate::summary::{OutputLine, RunSummary};

#[derive(Parser, Debug)]
#[command(
    name = "linkscan",
    about = "China-link entity detection for procurement records",
    version
)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON). Defaults to $LINKSCAN_CONFIG, then linkscan.toml.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify records and write one JSON line per record.
    Classify {
        /// Input file; stdin when omitted.
        #[arg(long, value_name = "FILE")]
        input: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = InputFormat::Jsonl)]
        format: InputFormat,

        /// Output file; stdout when omitted.
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also write the run summary as JSON.
        #[arg(long, value_name = "FILE")]
        summary: Option<PathBuf>,
    },
    /// Validate the configuration and print the category and tier layout.
    CheckConfig,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("linkscan=info,warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => DeploymentConfig::from_path(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => DeploymentConfig::load_or_default().context("Failed to load config")?,
    };
    let deployment = config.build().context("Invalid configuration")?;

    match cli.command {
        Command::Classify {
            input,
            format,
            output,
            summary,
        } => classify(
            &deployment,
            input.as_deref(),
            format,
            output.as_deref(),
            summary.as_deref(),
        ),
        Command::CheckConfig => {
            let stdout = io::stdout();
            print_layout(&deployment, &mut stdout.lock())?;
            Ok(())
        }
    }
}

/// Records classified and written per chunk.
const CHUNK_SIZE: usize = 4096;

fn classify(
    deployment: &Deployment,
    input: Option<&Path>,
    format: InputFormat,
    output: Option<&Path>,
    summary_path: Option<&Path>,
) -> Result<()> {
    let reader: Box<dyn BufRead> = match input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(io::stdin().lock()),
    };

    let mut out: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let summary = run(deployment, records(reader, format), CHUNK_SIZE, &mut out)?;
    out.flush()?;
    summary.log();

    if let Some(path) = summary_path {
        let file = File::create(path)
            .with_context(|| format!("Failed to create summary {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)?;
        info!("Summary written to {}", path.display());
    }
    Ok(())
}

/// Classify the stream chunk by chunk, writing output lines in input order.
fn run<I, W>(
    deployment: &Deployment,
    items: I,
    chunk_size: usize,
    out: &mut W,
) -> Result<RunSummary>
where
    I: IntoIterator<Item = SourceItem>,
    W: Write + ?Sized,
{
    let mut summary = RunSummary::new(deployment.classifier.tiers());
    let mut items = items.into_iter();
    loop {
        let chunk: Vec<SourceItem> = items.by_ref().take(chunk_size.max(1)).collect();
        if chunk.is_empty() {
            break;
        }
        write_chunk(deployment, chunk, &mut summary, out)?;
    }
    Ok(summary)
}

fn write_chunk<W: Write + ?Sized>(
    deployment: &Deployment,
    chunk: Vec<SourceItem>,
    summary: &mut RunSummary,
    out: &mut W,
) -> Result<()> {
    let mut lines = Vec::with_capacity(chunk.len());
    let mut parsed = Vec::with_capacity(chunk.len());
    for item in chunk {
        match item.record {
            Ok(record) => {
                lines.push((item.line, None));
                parsed.push(record);
            }
            Err(e) => lines.push((item.line, Some(e.to_string()))),
        }
    }

    let mut results = deployment.classifier.classify_batch(&parsed).into_iter();
    for (line, error) in lines {
        match error {
            Some(error) => {
                summary.add_error();
                serde_json::to_writer(&mut *out, &OutputLine::Failed { line, error })?;
            }
            None => {
                let result = results
                    .next()
                    .context("classifier returned fewer results than records")?;
                let importance =
                    deployment.importance.as_ref().map(|rules| rules.assess(&result));
                summary.add_result(&result, importance.as_ref());
                serde_json::to_writer(
                    &mut *out,
                    &OutputLine::Classified {
                        line,
                        result: &result,
                        importance: importance.as_ref(),
                    },
                )?;
            }
        }
        out.write_all(b"\n")?;
    }
    Ok(())
}

fn print_layout<W: Write>(deployment: &Deployment, out: &mut W) -> Result<()> {
    let classifier = &deployment.classifier;
    let stats = classifier.library().stats();
    writeln!(
        out,
        "Categories ({}; {} triggers, {} regex patterns):",
        stats.category_count, stats.trigger_count, stats.regex_count
    )?;
    for category in classifier.library().categories() {
        writeln!(
            out,
            "  {:<24} weight {:>4}  {:?}  {} triggers, {} patterns",
            category.name(),
            category.weight(),
            category.mode(),
            category.triggers().len(),
            category.regex_count()
        )?;
    }

    writeln!(out, "Exclusions: {}", classifier.exclusions().len())?;

    writeln!(out, "Tiers:")?;
    for band in classifier.tiers().bands() {
        writeln!(out, "  >= {:<6} {}", band.min_score, band.tier)?;
    }

    let fields = classifier.fields();
    writeln!(out, "Scan fields: {}", fields.scan.join(", "))?;
    writeln!(out, "Exclusion fields: {}", fields.exclusion_fields().join(", "))?;

    match &deployment.importance {
        Some(rules) => writeln!(
            out,
            "Importance: entities [{}], tech [{}], commodity [{}]",
            rules.strategic_entities.join(", "),
            rules.strategic_tech.join(", "),
            rules.commodity.join(", ")
        )?,
        None => writeln!(out, "Importance: off")?,
    }
    Ok(())
}
