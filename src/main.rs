//! perf-summary - Frame-rate summary for Qt Quick scene graph logs
//!
//! Reads a debug log written with the scene graph render loop timing
//! category enabled and prints:
//! - Average, min and max FPS from GUI thread frame intervals
//! - Average and max render time, average sync time from the render thread

mod config;
mod error;
mod import;

use crate::error::AnalyzeError;
use crate::import::{parse_scenegraph_log, PerfSummary};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// perf-summary - Summarize scene graph frame timings
#[derive(Parser)]
#[command(name = "perf-summary")]
#[command(version)]
#[command(about = "Summarize frame rate and render timings from a Qt Quick scene graph log")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a log file (default when no command is given)
    Analyze {
        /// Path to the log (defaults to the configured log file, shell_perf.log)
        file: Option<PathBuf>,
    },

    /// Show configuration and the effective input path
    Config,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze { file }) => run_analyze(file)?,
        None => run_analyze(None)?,
        Some(Commands::Config) => show_config_info(),
    }

    Ok(())
}

fn run_analyze(file: Option<PathBuf>) -> Result<()> {
    let file_path = match file {
        Some(path) => path,
        None => config::Config::load()?.input.log_file,
    };

    match analyze(&file_path) {
        Ok(summary) => {
            print!("{}", summary);
            Ok(())
        }
        Err(AnalyzeError::NoFrameData) => {
            println!("{}", AnalyzeError::NoFrameData);
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn analyze(path: &Path) -> Result<PerfSummary, AnalyzeError> {
    tracing::debug!(path = %path.display(), "analyzing log");

    let samples = parse_scenegraph_log(path)?;
    if let Some(avg_total) = samples.average_frame_total_ms() {
        tracing::debug!(
            frames = samples.render_count(),
            avg_total_ms = avg_total,
            "render thread frame totals"
        );
    }

    let summary = samples.summarize().ok_or(AnalyzeError::NoFrameData)?;
    tracing::debug!(
        average_interval_ms = summary.average_interval_ms,
        "summary calculated"
    );
    if summary.render.is_none() {
        tracing::warn!("no render thread timings found; render and sync times reported as n/a");
    }

    Ok(summary)
}

fn show_config_info() {
    println!("{}", "perf-summary Configuration\n".bright_cyan().bold());

    match config::Config::config_path() {
        Ok(path) => {
            println!(
                "{} {}",
                "Config file:".bright_yellow(),
                path.display().to_string().bright_white()
            );
            if path.exists() {
                println!("  {} {}", "Status:".bright_cyan(), "Exists".bright_green());
            } else {
                println!(
                    "  {} {}",
                    "Status:".bright_cyan(),
                    "Not created (using defaults)".bright_yellow()
                );
            }
        }
        Err(e) => {
            println!(
                "{} Could not determine config path: {}",
                "Error:".bright_red(),
                e
            );
        }
    }

    let cfg = match config::Config::load() {
        Ok(cfg) => cfg,
        Err(err) => {
            println!(
                "  {} {}",
                "Note:".bright_yellow(),
                format!("Could not load config, showing defaults: {:#}", err).bright_black()
            );
            config::Config::default()
        }
    };

    println!("\n{}", "Input settings:".bright_white().bold());
    println!(
        "  {} {}",
        "Log file:".bright_cyan(),
        cfg.input.log_file.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_analyze_without_intervals_reports_no_frame_data() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[render thread] syncAndRender: frame rendered in 6ms, sync=1, render=5, swap=0"
        )
        .unwrap();

        let err = analyze(file.path()).unwrap_err();
        assert!(matches!(err, AnalyzeError::NoFrameData));
        assert_eq!(err.to_string(), "No frame data found in log.");
    }

    #[test]
    fn test_analyze_summary() {
        let mut file = NamedTempFile::new().unwrap();
        for interval in [10, 20, 30] {
            writeln!(
                file,
                "[gui thread] polishAndSync: start, elapsed since last call: {} ms",
                interval
            )
            .unwrap();
        }

        let summary = analyze(file.path()).unwrap();
        assert_eq!(summary.frame_count, 3);
        assert!(summary.render.is_none());
        assert!(summary
            .to_string()
            .starts_with("--- Performance Summary ---\nTotal Frames Analyzed: 3\n"));
    }

    #[test]
    fn test_cli_parses_analyze_file() {
        let cli = Cli::try_parse_from(["perf-summary", "analyze", "render.log"]).unwrap();
        match cli.command {
            Some(Commands::Analyze { file }) => {
                assert_eq!(file, Some(PathBuf::from("render.log")))
            }
            _ => panic!("expected analyze command"),
        }
    }

    #[test]
    fn test_cli_defaults_to_no_command() {
        let cli = Cli::try_parse_from(["perf-summary"]).unwrap();
        assert!(cli.command.is_none());
    }
}
