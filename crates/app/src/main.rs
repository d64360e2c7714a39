use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use kobo_core::ReportWindow;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod input;

use commands::{classify, run_report, ReportOptions};
use config::{config_path, init_config, load_config};

#[derive(Parser, Debug)]
#[command(name = "kobo", version, about = "Classify Kuda alert emails into debit and credit reports")]
struct Cli {
    /// Config file (default: ./kobo.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify saved alerts and write the debit and credit CSV reports
    Report {
        /// Directory of alert .html files, or a JSON-lines file
        #[arg(long)]
        input: Option<PathBuf>,

        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Last day of the report window (default: today)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        #[arg(long)]
        window_days: Option<u32>,
    },

    /// Classify a single alert and print the records as JSON
    Classify {
        #[arg(long)]
        header: String,

        #[arg(long)]
        body: String,

        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config file
    Init,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let path = config_path(cli.config.as_deref());

    if let Command::Config { command: ConfigCommand::Init } = cli.command {
        if init_config(&path)? {
            println!("Wrote {}", path.display());
        } else {
            println!("Config already exists: {}", path.display());
        }
        return Ok(());
    }

    let cfg = load_config(&path)?;
    init_tracing(&cfg.log.filter);

    match cli.command {
        Command::Report { input, out_dir, end_date, window_days } => {
            let end = end_date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let days = window_days.unwrap_or(cfg.report.window_days);
            let opts = ReportOptions {
                input: input.unwrap_or(cfg.report.input),
                out_dir: out_dir.unwrap_or(cfg.report.output_dir),
                window: ReportWindow::trailing(end, days),
                include_unmatched: cfg.report.include_unmatched,
            };
            let summary = run_report(&opts)?;
            println!("{} ({} rows)", summary.debit_path.display(), summary.debit_rows);
            println!("{} ({} rows)", summary.credit_path.display(), summary.credit_rows);
            if summary.failures > 0 {
                println!("{} field(s) could not be extracted, see log", summary.failures);
            }
        }
        Command::Classify { header, body, date } => {
            println!("{}", classify(&header, &body, &date)?);
        }
        Command::Config { .. } => {}
    }
    Ok(())
}
