use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mbw_core::errors::VizError;
use mbw_viz::console::{completion_banner, diagnostic_lines, start_banner};
use mbw_viz::{load_config, run_pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(
    name = "mbw-plot",
    about = "Render charts and a summary report from CUDA memory benchmark results"
)]
struct Cli {
    /// Directory holding the benchmark CSV files.
    #[arg(long)]
    results: Option<PathBuf>,
    /// Output directory for charts and the summary report.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Optional YAML configuration; explicit flags take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    println!("{}", start_banner());
    match run(&cli) {
        Ok(out_dir) => {
            println!("{}", completion_banner(&out_dir));
            ExitCode::SUCCESS
        }
        Err(err) => {
            for line in diagnostic_lines(&err) {
                eprintln!("{line}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<PathBuf, VizError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(results) = &cli.results {
        config.results_dir = results.clone();
    }
    if let Some(out) = &cli.out {
        config.out_dir = out.clone();
    }
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    run_pipeline(&config, &mut handle)?;
    Ok(config.out_dir)
}
