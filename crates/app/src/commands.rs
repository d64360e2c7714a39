use anyhow::{Context, Result};
use kobo_core::{RawTransaction, ReportWindow};
use kobo_import::{Aggregator, TracingObserver};
use kobo_report::{report_file_name, write_report_file, ReportKind};
use std::path::PathBuf;

use crate::input::{load_transactions, within_window};

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub input: PathBuf,
    pub out_dir: PathBuf,
    pub window: ReportWindow,
    pub include_unmatched: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub debit_path: PathBuf,
    pub credit_path: PathBuf,
    pub debit_rows: usize,
    pub credit_rows: usize,
    pub failures: usize,
}

/// Load alerts, classify them through both pipelines and write the two CSV reports.
pub fn run_report(opts: &ReportOptions) -> Result<ReportSummary> {
    let all = load_transactions(&opts.input)?;
    tracing::info!(input = %opts.input.display(), alerts = all.len(), "loaded alerts");
    let transactions = within_window(all, opts.window);

    let aggregator = Aggregator::new(TracingObserver);
    let mut debits = aggregator.process_debit(&transactions);
    let mut credits = aggregator.process_credit(&transactions);

    let failures = debits.iter().map(|r| r.failures.len()).sum::<usize>()
        + credits.iter().map(|r| r.failures.len()).sum::<usize>();
    if failures > 0 {
        tracing::warn!(failures, "some fields could not be extracted");
    }

    if !opts.include_unmatched {
        debits.retain(|r| r.is_matched());
        credits.retain(|r| r.is_matched());
    }

    let debit_path = opts.out_dir.join(report_file_name(ReportKind::Debit, &opts.window));
    let credit_path = opts.out_dir.join(report_file_name(ReportKind::Credit, &opts.window));
    write_report_file(&debit_path, &debits)
        .with_context(|| format!("write {}", debit_path.display()))?;
    write_report_file(&credit_path, &credits)
        .with_context(|| format!("write {}", credit_path.display()))?;

    tracing::info!(
        window = %opts.window,
        debit = debits.count(),
        credit = credits.count(),
        "reports written"
    );

    Ok(ReportSummary {
        debit_path,
        credit_path,
        debit_rows: debits.count(),
        credit_rows: credits.count(),
        failures,
    })
}

/// Both pipelines' records for one alert, as pretty JSON.
pub fn classify(header: &str, body: &str, date: &str) -> Result<String> {
    let tx = RawTransaction::new(header, body, date)?;
    let aggregator = Aggregator::new(TracingObserver);
    let out = serde_json::json!({
        "debit": aggregator.classify_debit(0, &tx),
        "credit": aggregator.classify_credit(0, &tx),
    });
    serde_json::to_string_pretty(&out).context("serialize records")
}
