use anyhow::{anyhow, Context, Result};
use clap::Parser;
use colored::Colorize;
use env_logger::Builder;
use log::{error, info, warn, Level, LevelFilter};
use similar::udiff::unified_diff;
use srpatch::{ApplyError, FailedBlock, Patcher, DEFAULT_BUFFER_LINES, DEFAULT_FUZZY_THRESHOLD};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

// --- Main Application Entry Point ---

fn main() {
    // 1. Parse command-line arguments using `clap`.
    let args = Args::parse();

    setup_logging(&args);

    // 2. Call the main logic function; all complex logic and error handling
    //    lives inside `run`.
    if let Err(e) = run(args) {
        // Using {:?} ensures the full error chain from `anyhow` is printed.
        eprintln!("{} {:?}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

/// Contains the primary logic of the application.
fn run(args: Args) -> Result<()> {
    // --- Argument Validation ---
    if !(0.0..=1.0).contains(&args.fuzz) {
        return Err(anyhow!("Fuzz threshold must be between 0.0 and 1.0."));
    }

    // --- Input Reading ---
    let diff_content = fs::read_to_string(&args.diff_file)
        .with_context(|| format!("Failed to read diff file '{}'", args.diff_file.display()))?;
    let original_content = fs::read_to_string(&args.target_file)
        .with_context(|| format!("Failed to read target file '{}'", args.target_file.display()))?;

    // --- Core Patching Logic ---
    let patcher = Patcher::builder()
        .fuzzy_threshold(args.fuzz)
        .buffer_lines(args.buffer_lines)
        .build();

    info!(
        "Applying '{}' to '{}' (threshold: {:.2}, buffer: {} lines).",
        args.diff_file.display(),
        args.target_file.display(),
        patcher.fuzzy_threshold,
        patcher.buffer_lines
    );

    let outcome = match patcher.apply_with_hint(&original_content, &diff_content, args.line) {
        Ok(outcome) => outcome,
        Err(e @ ApplyError::NoBlocks) => return Err(anyhow::Error::new(e)),
        Err(ApplyError::AllBlocksFailed { failures }) => {
            error!(
                "--- FAILED to apply any block to: {}",
                args.target_file.display()
            );
            for (i, failure) in failures.iter().enumerate() {
                log_failed_block(i, failure);
            }
            return Err(anyhow!(
                "Failed to apply all {} block(s). The file was not modified.",
                failures.len()
            ));
        }
    };

    // --- Output ---
    if args.dry_run {
        info!(
            "DRY RUN: Would write changes to '{}'",
            args.target_file.display()
        );
        let diff_text = unified_diff(
            similar::Algorithm::default(),
            &original_content,
            &outcome.content,
            3,
            Some(("a", "b")),
        );
        println!(
            "----- Proposed Changes for {} -----",
            args.target_file.display()
        );
        print!("{}", diff_text);
        println!("------------------------------------");
    } else {
        fs::write(&args.target_file, &outcome.content).with_context(|| {
            format!("Failed to write target file '{}'", args.target_file.display())
        })?;
    }

    // --- Final Summary ---
    info!("\n--- Summary ---");
    info!("Applied blocks: {}", outcome.applied.len());
    info!("Failed blocks:  {}", outcome.failed.len());
    if args.dry_run {
        info!("DRY RUN completed. No files were modified.");
    }

    if !outcome.failed.is_empty() {
        if !args.dry_run {
            warn!(
                "Wrote partial changes to '{}'. Review the failed blocks below.",
                args.target_file.display()
            );
        }
        for (i, failure) in outcome.failed.iter().enumerate() {
            log_failed_block(i, failure);
        }
        // Return an error to set a non-zero exit code.
        return Err(anyhow!(
            "Completed with {} failed block(s).",
            outcome.failed.len()
        ));
    }

    Ok(())
}

// --- Helper Structs and Functions ---

/// Logs why a block failed, with enough context to correct the diff.
fn log_failed_block(index: usize, failure: &FailedBlock) {
    warn!("  - Block {} failed: {}", index + 1, failure.reason);
    if let Some(first_line) = failure.search.lines().next() {
        warn!("    Searched for: {}", first_line);
    }
    if !failure.best_match_preview.is_empty() {
        warn!(
            "    Best match (score {:.3}): {}",
            failure.best_score,
            failure.best_match_preview.lines().next().unwrap_or("")
        );
    }
}

/// Defines the command-line arguments for the application.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Apply SEARCH/REPLACE edit blocks from a diff file to a target file.",
    long_about = "Applies LLM-generated SEARCH/REPLACE blocks using fuzzy matching.\nLine hints (:start_line:) are advisory; matching tolerates smart quotes and\nwhitespace drift at block edges."
)]
struct Args {
    /// Path to the file containing SEARCH/REPLACE blocks.
    diff_file: PathBuf,
    /// Path to the file to patch.
    target_file: PathBuf,
    /// If set, show what would be done, but don't modify any files.
    #[arg(
        short = 'n',
        long,
        help = "Show what would be done, but don't modify files."
    )]
    dry_run: bool,
    /// The similarity threshold for accepting a match (0.0 to 1.0).
    /// 1.0 requires an exact (post-normalization) match.
    #[arg(short = 'f', long, default_value_t = DEFAULT_FUZZY_THRESHOLD, help = "Similarity threshold for accepting a match (0.0 to 1.0). 1.0 requires an exact match.")]
    fuzz: f64,
    /// Number of context lines searched on each side of a line hint.
    #[arg(short = 'b', long, default_value_t = DEFAULT_BUFFER_LINES, help = "Context lines searched on each side of a line hint.")]
    buffer_lines: usize,
    /// Fallback 1-based line hint for blocks without a :start_line: hint.
    #[arg(short = 'l', long, default_value_t = 0, help = "Fallback 1-based line hint for blocks without their own (0 = none).")]
    line: usize,
    /// Increase logging verbosity. Can be used multiple times.
    /// -v for info, -vv for debug, -vvv for trace.
    #[arg(short, long, action = clap::ArgAction::Count, long_help = "Increase logging verbosity.\n-v for info, -vv for debug, -vvv for trace.")]
    verbose: u8,
}

/// Sets up the global logger with colored per-level prefixes.
fn setup_logging(args: &Args) {
    let log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| match record.level() {
            Level::Error => writeln!(buf, "{} {}", "error:".red().bold(), record.args()),
            Level::Warn => writeln!(buf, "{} {}", "warning:".yellow().bold(), record.args()),
            Level::Info => writeln!(buf, "{}", record.args()),
            Level::Debug => writeln!(buf, "{} {}", "debug:".blue().bold(), record.args()),
            Level::Trace => writeln!(buf, "{} {}", "trace:".cyan().bold(), record.args()),
        })
        .init();
}
