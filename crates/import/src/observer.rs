use chrono::NaiveDate;
use kobo_core::{CreditCategory, DebitCategory, ExtractError};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pipeline {
    Debit,
    Credit,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pipeline::Debit => write!(f, "debit"),
            Pipeline::Credit => write!(f, "credit"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnyCategory {
    Debit(DebitCategory),
    Credit(CreditCategory),
}

impl AnyCategory {
    pub fn pipeline(self) -> Pipeline {
        match self {
            AnyCategory::Debit(_) => Pipeline::Debit,
            AnyCategory::Credit(_) => Pipeline::Credit,
        }
    }
}

impl From<DebitCategory> for AnyCategory {
    fn from(c: DebitCategory) -> Self {
        AnyCategory::Debit(c)
    }
}

impl From<CreditCategory> for AnyCategory {
    fn from(c: CreditCategory) -> Self {
        AnyCategory::Credit(c)
    }
}

impl fmt::Display for AnyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnyCategory::Debit(c) => c.fmt(f),
            AnyCategory::Credit(c) => c.fmt(f),
        }
    }
}

/// What the aggregator reports while it works through a batch.
/// `index` is the transaction's position in the input.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic<'a> {
    TransactionStarted {
        pipeline: Pipeline,
        index: usize,
        date: NaiveDate,
    },
    Matched {
        index: usize,
        category: AnyCategory,
    },
    NotMatched {
        index: usize,
        category: AnyCategory,
    },
    ExtractionFailed {
        index: usize,
        category: AnyCategory,
        error: &'a ExtractError,
    },
    TransactionFinished {
        pipeline: Pipeline,
        index: usize,
        matched: usize,
        failures: usize,
    },
}

/// Receives diagnostics from the aggregator. The engine never logs on its own.
pub trait Observer {
    fn observe(&self, event: &Diagnostic<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Diagnostic<'_>),
{
    fn observe(&self, event: &Diagnostic<'_>) {
        self(event)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn observe(&self, _event: &Diagnostic<'_>) {}
}

/// Forwards diagnostics to `tracing` as structured events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn observe(&self, event: &Diagnostic<'_>) {
        match event {
            Diagnostic::TransactionStarted { pipeline, index, date } => {
                tracing::debug!(%pipeline, index, %date, "processing transaction");
            }
            Diagnostic::Matched { index, category } => {
                tracing::info!(pipeline = %category.pipeline(), index, %category, "category matched");
            }
            Diagnostic::NotMatched { index, category } => {
                tracing::debug!(pipeline = %category.pipeline(), index, %category, "category not matched");
            }
            Diagnostic::ExtractionFailed { index, category, error } => {
                tracing::warn!(
                    pipeline = %category.pipeline(),
                    index,
                    %category,
                    field = %error.field(),
                    %error,
                    "field extraction failed"
                );
            }
            Diagnostic::TransactionFinished { pipeline, index, matched, failures } => {
                tracing::debug!(%pipeline, index, matched, failures, "done processing transaction");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn closures_are_observers() {
        let seen = RefCell::new(Vec::new());
        let observer = |e: &Diagnostic<'_>| seen.borrow_mut().push(format!("{e:?}"));
        observer.observe(&Diagnostic::Matched {
            index: 3,
            category: DebitCategory::Transfer.into(),
        });
        assert_eq!(seen.borrow().len(), 1);
        assert!(seen.borrow()[0].contains("Transfer"));
    }

    #[test]
    fn any_category_display_and_pipeline() {
        let c: AnyCategory = CreditCategory::Reversal.into();
        assert_eq!(c.to_string(), "credit by reversal");
        assert_eq!(c.pipeline(), Pipeline::Credit);
        let d: AnyCategory = DebitCategory::SpendAndSave.into();
        assert_eq!(d.pipeline().to_string(), "debit");
    }

    #[test]
    fn noop_and_tracing_observers_accept_every_event() {
        let err = ExtractError::AmountNotFound;
        let events = [
            Diagnostic::TransactionStarted {
                pipeline: Pipeline::Credit,
                index: 0,
                date: NaiveDate::from_ymd_opt(2023, 11, 20).unwrap(),
            },
            Diagnostic::NotMatched { index: 0, category: CreditCategory::Alert.into() },
            Diagnostic::ExtractionFailed {
                index: 0,
                category: CreditCategory::Reversal.into(),
                error: &err,
            },
            Diagnostic::TransactionFinished {
                pipeline: Pipeline::Credit,
                index: 0,
                matched: 1,
                failures: 1,
            },
        ];
        for e in &events {
            NoopObserver.observe(e);
            TracingObserver.observe(e);
        }
    }
}
