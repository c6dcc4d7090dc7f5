//! texelmap CLI
//!
//! Renders a text document as a PNG texel map.
//!
//! Usage:
//!   texelmap -i article.txt -d words.2d.txt -o out.png -r 512

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use texelmap::pipeline::write_report;
use texelmap::{load_dictionary, process, DictionaryStats, PipelineConfig, TexelResult};

#[derive(Debug, Parser)]
#[command(name = "texelmap", version, about = "Render a document as a word-embedding texel map")]
struct Cli {
    /// Input text document
    #[arg(short, long)]
    input: PathBuf,

    /// Dictionary of `word x y` lines
    #[arg(short, long)]
    dictionary: PathBuf,

    /// Output PNG path
    #[arg(short, long, default_value = "out.png")]
    output: PathBuf,

    /// Output resolution (side length in pixels)
    #[arg(short, long, default_value_t = 256, value_parser = clap::value_parser!(u32).range(1..))]
    resolution: u32,

    /// Also write the run report as JSON
    #[arg(long)]
    report: Option<PathBuf>,
}

fn run(cli: &Cli) -> TexelResult<()> {
    let config = PipelineConfig::with_resolution(cli.resolution);
    config.validate()?;

    let dictionary = load_dictionary(&cli.dictionary)?;
    let report = process(&dictionary.index, &cli.input, &cli.output, &config)?
        .with_dictionary(DictionaryStats::from(&dictionary));

    info!(
        words = report.kept_tokens,
        distinct = report.distinct_words,
        unknown = report.unknown_words,
        "run complete"
    );

    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
