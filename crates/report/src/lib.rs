//! Tabular export of classified alerts.

use chrono::Datelike;
use kobo_core::{RecordFields, ReportBatch, ReportWindow};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Debit,
    Credit,
}

impl ReportKind {
    fn prefix(self) -> &'static str {
        match self {
            ReportKind::Debit => "debit",
            ReportKind::Credit => "credit",
        }
    }
}

/// Header row of `R::COLUMNS`, then one row per record ordered by date.
/// Records sharing a date keep their batch order.
pub fn write_report<W: Write, R: RecordFields>(
    writer: W,
    batch: &ReportBatch<R>,
) -> Result<(), ReportError> {
    let mut rows: Vec<&R> = batch.iter().collect();
    rows.sort_by_key(|r| r.date());

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(R::COLUMNS)?;
    for record in rows {
        wtr.write_record(record.row())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_report_file<R: RecordFields>(
    path: &Path,
    batch: &ReportBatch<R>,
) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_report(BufWriter::new(file), batch)
}

/// e.g. `debit_report_for_November_12th-20th.csv`. The month is the window start's.
pub fn report_file_name(kind: ReportKind, window: &ReportWindow) -> String {
    format!(
        "{}_report_for_{}_{}-{}.csv",
        kind.prefix(),
        window.start.format("%B"),
        ordinal(window.start.day()),
        ordinal(window.end.day()),
    )
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use kobo_core::{
        Amount, CreditMatch, CreditRecord, DebitMatch, DebitRecord,
    };

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn transfer(date: NaiveDate, receiver: &str, kobo: i64) -> DebitRecord {
        let mut rec = DebitRecord::new(date);
        rec.matches.push(DebitMatch::Transfer {
            receiver: Some(receiver.into()),
            description: Some("Gum".into()),
        });
        rec.amount = Some(Amount::from_kobo(kobo));
        rec
    }

    fn render<R: RecordFields>(batch: &ReportBatch<R>) -> String {
        let mut out = Vec::new();
        write_report(&mut out, batch).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn header_then_rows_sorted_by_date() {
        let batch: ReportBatch<DebitRecord> = [
            transfer(ymd(2023, 11, 20), "Jack", 80_000),
            transfer(ymd(2023, 11, 14), "Ada", 150_000),
            transfer(ymd(2023, 11, 20), "Bola", 1_000),
        ]
        .into_iter()
        .collect();

        let text = render(&batch);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "DATE,AIRTIME RECHARGE,NETWORK,PHONE NUMBER,TRANSFER,RECEIVER,DESCRIPTION,CARD,\
             CARD POS WITHDRAWAL,CARD ONLINE,SPEND AND SAVE,AMOUNT"
        );
        assert_eq!(
            lines[1],
            "2023-11-14,False,,,True,Ada,Gum,False,False,False,False,1500.00"
        );
        assert!(lines[2].contains(",Jack,"));
        assert!(lines[3].contains(",Bola,"));
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn unmatched_credit_row_has_empty_cells() {
        let mut alert = CreditRecord::new(ymd(2023, 11, 15));
        alert.matches.push(CreditMatch::Alert {
            sender: Some("Jack".into()),
            description: String::new(),
        });
        alert.amount = Some(Amount::from_kobo(2_500_000));
        let batch: ReportBatch<CreditRecord> =
            [alert, CreditRecord::new(ymd(2023, 11, 16))].into_iter().collect();

        let text = render(&batch);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "DATE,CREDIT BY ALERT,SENDER,DESCRIPTION,CREDIT BY REVERSAL,AMOUNT");
        assert_eq!(lines[1], "2023-11-15,True,Jack,,False,25000.00");
        assert_eq!(lines[2], "2023-11-16,False,,,False,");
    }

    #[test]
    fn empty_batch_writes_header_only() {
        let text = render(&ReportBatch::<CreditRecord>::new());
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn file_is_written_under_new_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports").join("nested").join("debit.csv");
        let batch: ReportBatch<DebitRecord> =
            std::iter::once(transfer(ymd(2023, 11, 20), "Jack", 80_000)).collect();

        write_report_file(&path, &batch).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.contains("Jack"));
    }

    #[test]
    fn file_names_use_ordinals() {
        let window = ReportWindow::new(ymd(2023, 11, 12), ymd(2023, 11, 20));
        assert_eq!(
            report_file_name(ReportKind::Debit, &window),
            "debit_report_for_November_12th-20th.csv"
        );
        let window = ReportWindow::new(ymd(2023, 10, 31), ymd(2023, 11, 3));
        assert_eq!(
            report_file_name(ReportKind::Credit, &window),
            "credit_report_for_October_31st-3rd.csv"
        );
    }

    #[test]
    fn ordinal_suffixes() {
        let got: Vec<String> = [1, 2, 3, 4, 11, 12, 13, 21, 22, 23, 30].map(ordinal).into();
        assert_eq!(
            got,
            ["1st", "2nd", "3rd", "4th", "11th", "12th", "13th", "21st", "22nd", "23rd", "30th"]
        );
    }
}
