//! Command-line parsing for the procurement report viewer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from loading, rendering and export code.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::domain::ReportConfig;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "procure", version, about = "Monthly procurement report viewer and PDF exporter")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Launch the interactive TUI (default).
    Tui(ReportArgs),
    /// Print one month's report to stdout.
    Show(ShowArgs),
    /// Write one month's report as `<Month>_report.pdf`.
    Export(ExportArgs),
    /// List the available report months.
    Months,
}

/// Options shared by every report command.
#[derive(Debug, Args, Clone)]
pub struct ReportArgs {
    /// Directory containing one `<month>.csv` per report month (e.g. `dec 2025.csv`).
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Image shown in the duties summary.
    #[arg(long, default_value = "images/process_map.png")]
    pub image: PathBuf,

    /// Video shown in the media tab.
    #[arg(long, default_value = "videos/demo.mp4")]
    pub video: PathBuf,

    /// Directory where downloaded PDFs are written.
    #[arg(long, default_value = ".")]
    pub out: PathBuf,

    /// Write logs to this file (the TUI never logs to the terminal).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl ReportArgs {
    pub fn to_config(&self) -> ReportConfig {
        ReportConfig {
            data_dir: self.data_dir.clone(),
            image_path: self.image.clone(),
            video_path: self.video.clone(),
            out_dir: self.out.clone(),
            ..ReportConfig::default()
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ShowArgs {
    /// Report month, e.g. "Nov 2025".
    #[arg(short, long, default_value = "Dec 2025")]
    pub month: String,

    /// Print a JSON snapshot (suppliers + metrics) instead of the text report.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    /// Report month, e.g. "Nov 2025".
    #[arg(short, long, default_value = "Dec 2025")]
    pub month: String,

    #[command(flatten)]
    pub report: ReportArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_args_parse() {
        let cli = Cli::parse_from(["procure", "export", "-m", "Nov 2025", "--out", "reports"]);
        let Command::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.month, "Nov 2025");
        let config = args.report.to_config();
        assert_eq!(config.out_dir, PathBuf::from("reports"));
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.image_caption, "Procurement Flow");
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::parse_from(["procure", "tui", "-vv"]);
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.verbose, 2);
    }
}
