//! Repograph CLI — structural inventory and dependency graph for source trees.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use repograph_core::acquire;
use repograph_core::config::AnalysisConfig;
use repograph_core::output::write_report;
use repograph_core::pipeline;

#[derive(Parser)]
#[command(
    name = "repograph",
    about = "Repograph - Map the structure and import graph of a repository"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyse a source tree (local path or git URL) and produce a report
    Analyze {
        /// Local directory, or an https:///git@ URL to clone
        source: String,

        /// Output JSON file path
        #[arg(short, long)]
        output: Option<String>,

        /// Comma-separated language filter (python,javascript,typescript)
        #[arg(short, long)]
        languages: Option<String>,

        /// Maximum file size to parse, in bytes
        #[arg(long, default_value = "500000")]
        max_file_size: u64,

        /// Additional directory names to exclude
        #[arg(long)]
        exclude: Vec<String>,

        /// Show per-phase timing breakdown
        #[arg(long)]
        verbose: bool,

        /// Suppress all output except errors
        #[arg(long)]
        quiet: bool,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            output,
            languages,
            max_file_size,
            exclude,
            verbose,
            quiet,
        } => {
            // Remote sources are cloned into a temporary checkout that is
            // removed when the analysis finishes.
            let checkout = if acquire::is_git_locator(&source) {
                let dest_root = std::env::temp_dir().join("repograph");
                match acquire::clone_repository(&source, &dest_root) {
                    Ok(c) => Some(c),
                    Err(e) => {
                        eprintln!("Failed to acquire repository: {e}");
                        std::process::exit(if e.is_caller_error() { 2 } else { 1 });
                    }
                }
            } else {
                None
            };

            let repo_path = match &checkout {
                Some(c) => c.path().to_path_buf(),
                None => {
                    let path = PathBuf::from(&source);
                    path.canonicalize().unwrap_or(path)
                }
            };
            let repo_name = repo_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| "repo".to_string());

            let output_path = output.unwrap_or_else(|| format!("{repo_name}.repograph.json"));

            let lang_filter = languages.map(|l| {
                l.split(',')
                    .map(|s| s.trim().to_string())
                    .collect::<Vec<_>>()
            });

            let config = AnalysisConfig {
                repo_path: repo_path.to_string_lossy().to_string(),
                output_path: Some(output_path.clone()),
                languages: lang_filter,
                exclude_patterns: exclude,
                max_file_size,
                verbose,
                quiet,
                ..Default::default()
            };

            if quiet {
                run_quiet(&config, &output_path);
            } else {
                run_with_progress(&config, &output_path, verbose);
            }
        }
    }
}

fn run_quiet(config: &AnalysisConfig, output_path: &str) {
    match pipeline::run_pipeline(config, None) {
        Ok(report) => {
            if let Err(e) = write_report(&report, output_path) {
                eprintln!("Error writing output: {e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    }
}

fn run_with_progress(config: &AnalysisConfig, output_path: &str, verbose: bool) {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    pb.set_message("Initialising...");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));

    let progress: pipeline::ProgressCallback = {
        let pb = pb.clone();
        Box::new(move |_name, label| {
            pb.set_message(label.to_string());
        })
    };

    let start = Instant::now();
    let report = match pipeline::run_pipeline(config, Some(progress)) {
        Ok(r) => r,
        Err(e) => {
            pb.finish_and_clear();
            eprintln!("Analysis failed: {e}");
            std::process::exit(1);
        }
    };
    pb.finish_and_clear();

    // Summary
    println!(
        "\n{}  Repograph Analysis: {}",
        style("✓").green().bold(),
        style(
            std::path::Path::new(&config.repo_path)
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default()
        )
        .bold()
    );
    println!(
        "  {:<16} {}",
        "Files:",
        report.stats.get("files").unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<16} {}",
        "Elements:",
        report.stats.get("elements").unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<16} {}",
        "Resolved edges:",
        report
            .stats
            .get("resolved_edges")
            .unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<16} {}",
        "Isolated files:",
        report
            .stats
            .get("isolated_files")
            .unwrap_or(&serde_json::json!(0))
    );
    println!(
        "  {:<16} {}",
        "Cycles:",
        report.stats.get("cycles").unwrap_or(&serde_json::json!(0))
    );

    let duration = start.elapsed();
    println!(
        "  {:<16} {:.1}ms",
        "Duration:",
        duration.as_secs_f64() * 1000.0
    );

    if verbose {
        if let Some(serde_json::Value::Object(timings)) = report.metadata.get("phase_timings") {
            println!("\n  Phase Timings:");
            for (phase, secs) in timings {
                if let Some(val) = secs.as_f64() {
                    println!("    {:<14} {:.1}ms", phase, val * 1000.0);
                }
            }
        }
    }

    if let Err(e) = write_report(&report, output_path) {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }

    println!(
        "\n  {} {}",
        style("Output written to:").green(),
        output_path
    );
}
