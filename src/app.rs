//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - sets up logging
//! - loads the selected month (through the shared pipeline)
//! - prints, exports, or hands over to the TUI

use std::fs::File;
use std::io;
use std::sync::Mutex;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Command, ExportArgs, ReportArgs, ShowArgs};
use crate::data::{CsvDirectory, DataLoader};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `procure` binary.
pub fn run() -> Result<(), AppError> {
    // `procure` and `procure --data-dir x` behave like `procure tui ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Tui(args) => handle_tui(args),
        Command::Show(args) => handle_show(args),
        Command::Export(args) => handle_export(args),
        Command::Months => {
            print!("{}", crate::report::format_month_list());
            Ok(())
        }
    }
}

fn handle_tui(args: ReportArgs) -> Result<(), AppError> {
    init_logging(&args, LogTarget::FileOnly)?;
    crate::tui::run(args.to_config())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    init_logging(&args.report, LogTarget::Stderr)?;
    let config = args.report.to_config();
    let mut loader = DataLoader::new(CsvDirectory::new(&config.data_dir));
    let view = pipeline::build_report(&mut loader, &args.month)?;

    if args.json {
        crate::io::write_snapshot_json(io::stdout().lock(), &view)
    } else {
        print!("{}", crate::report::format_report(&view, &config));
        Ok(())
    }
}

fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    init_logging(&args.report, LogTarget::Stderr)?;
    let config = args.report.to_config();
    let mut loader = DataLoader::new(CsvDirectory::new(&config.data_dir));
    let view = pipeline::build_report(&mut loader, &args.month)?;

    let doc = crate::io::export_pdf(view.month, &view.dataset)?;
    let path = crate::io::save_document(&config.out_dir, &doc)?;
    println!("Wrote {} ({} bytes, {})", path.display(), doc.bytes.len(), doc.content_type);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogTarget {
    /// Log to `--log-file` if given, otherwise stay silent.
    FileOnly,
    /// Log to `--log-file` if given, otherwise stderr.
    Stderr,
}

fn init_logging(args: &ReportArgs, target: LogTarget) -> Result<(), AppError> {
    let level = match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("procurement_report={level}")));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    // A subscriber may already be installed (tests, embedding); keep it.
    if let Some(path) = &args.log_file {
        let file = File::create(path)
            .map_err(|e| AppError::usage(format!("Failed to create log file '{}': {e}", path.display())))?;
        let _ = builder.with_ansi(false).with_writer(Mutex::new(file)).try_init();
    } else if target == LogTarget::Stderr {
        let _ = builder.with_writer(io::stderr).try_init();
    }
    Ok(())
}

/// Rewrite argv so `procure` defaults to `procure tui`.
///
/// Rules:
/// - `procure`                      -> `procure tui`
/// - `procure --data-dir d ...`     -> `procure tui --data-dir d ...`
/// - `procure --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "tui" | "show" | "export" | "months");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
