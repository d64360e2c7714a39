use anyhow::{Context, Result};
use kobo_core::{RawTransaction, ReportWindow};
use kobo_import::{date_from_file_name, parse_alert_html};
use std::fs;
use std::path::Path;

/// Raw alerts from a directory of saved `.html` emails or a JSON-lines file.
pub fn load_transactions(path: &Path) -> Result<Vec<RawTransaction>> {
    if path.is_dir() {
        load_html_dir(path)
    } else {
        load_json_lines(path)
    }
}

/// File names carry the alert date (`transaction_on_2023-11-20_10-15.html`).
/// Files without a date, or without an `<h1>`/`<span>`, are skipped.
pub fn load_html_dir(dir: &Path) -> Result<Vec<RawTransaction>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some("html") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut out = Vec::with_capacity(paths.len());
    for path in paths {
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        let Some(date) = date_from_file_name(name) else {
            tracing::warn!(file = %path.display(), "no date in file name, skipping");
            continue;
        };
        let html =
            fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        match parse_alert_html(&html) {
            Ok(alert) => out.push(alert.into_transaction(date)),
            Err(e) => tracing::info!(file = %path.display(), error = %e, "skipping"),
        }
    }
    Ok(out)
}

pub fn load_json_lines(path: &Path) -> Result<Vec<RawTransaction>> {
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(n, line)| {
            serde_json::from_str(line)
                .with_context(|| format!("parse {} line {}", path.display(), n + 1))
        })
        .collect()
}

pub fn within_window(transactions: Vec<RawTransaction>, window: ReportWindow) -> Vec<RawTransaction> {
    let total = transactions.len();
    let kept: Vec<RawTransaction> = transactions
        .into_iter()
        .filter(|tx| window.contains(tx.date))
        .collect();
    if kept.len() < total {
        tracing::info!(%window, dropped = total - kept.len(), "alerts outside report window");
    }
    kept
}
