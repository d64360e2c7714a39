//! Runs raw alerts through every matcher of a pipeline and folds the results
//! into one record per alert.
//!
//! Evaluation order is fixed: airtime, transfer, card POS, card online,
//! spend-and-save for debits; alert, reversal for credits. When more than one
//! amount-bearing category fires the last successful amount wins. A failed
//! amount is recorded as a failure and leaves any earlier amount in place.

use kobo_core::{
    Amount, CategoryMatch, CreditCategory, CreditMatch, CreditRecord, DebitCategory, DebitMatch,
    DebitRecord, ExtractError, RawTransaction, ReportBatch, TransactionRecord,
};

use crate::amount::parse_amount_in;
use crate::credit::{get_credit_by_alert_info, is_credit_by_alert, is_credit_by_reversal};
use crate::debit::{
    get_debit_by_airtime_info, get_debit_by_transfer_info, is_debit_by_airtime_recharge,
    is_debit_by_card_online, is_debit_by_card_pos, is_debit_by_spend_and_save,
    is_debit_by_transfer,
};
use crate::observer::{AnyCategory, Diagnostic, NoopObserver, Observer, Pipeline};

/// The outcome of one matcher that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification<M> {
    pub matched: M,
    pub amount: Result<Amount, ExtractError>,
    /// Field extraction failures other than the amount.
    pub failures: Vec<ExtractError>,
}

type Step<M> = fn(&RawTransaction) -> Option<Classification<M>>;

const DEBIT_STEPS: [(DebitCategory, Step<DebitMatch>); 5] = [
    (DebitCategory::AirtimeRecharge, airtime_step),
    (DebitCategory::Transfer, transfer_step),
    (DebitCategory::CardPos, card_pos_step),
    (DebitCategory::CardOnline, card_online_step),
    (DebitCategory::SpendAndSave, spend_and_save_step),
];

const CREDIT_STEPS: [(CreditCategory, Step<CreditMatch>); 2] = [
    (CreditCategory::Alert, alert_step),
    (CreditCategory::Reversal, reversal_step),
];

// ── Aggregator ───────────────────────────────────────────────────────────────

/// Drives transactions through the debit and credit pipelines, reporting
/// progress to `O`.
#[derive(Debug, Clone, Default)]
pub struct Aggregator<O = NoopObserver> {
    observer: O,
}

impl<O: Observer> Aggregator<O> {
    pub fn new(observer: O) -> Self {
        Aggregator { observer }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn classify_debit(&self, index: usize, tx: &RawTransaction) -> DebitRecord {
        self.classify(Pipeline::Debit, index, tx, &DEBIT_STEPS)
    }

    pub fn classify_credit(&self, index: usize, tx: &RawTransaction) -> CreditRecord {
        self.classify(Pipeline::Credit, index, tx, &CREDIT_STEPS)
    }

    pub fn process_debit(&self, transactions: &[RawTransaction]) -> ReportBatch<DebitRecord> {
        transactions
            .iter()
            .enumerate()
            .map(|(i, tx)| self.classify_debit(i, tx))
            .collect()
    }

    pub fn process_credit(&self, transactions: &[RawTransaction]) -> ReportBatch<CreditRecord> {
        transactions
            .iter()
            .enumerate()
            .map(|(i, tx)| self.classify_credit(i, tx))
            .collect()
    }

    fn classify<M>(
        &self,
        pipeline: Pipeline,
        index: usize,
        tx: &RawTransaction,
        steps: &[(M::Category, Step<M>)],
    ) -> TransactionRecord<M>
    where
        M: CategoryMatch,
        AnyCategory: From<M::Category>,
    {
        self.observer.observe(&Diagnostic::TransactionStarted {
            pipeline,
            index,
            date: tx.date,
        });

        let mut record = TransactionRecord::new(tx.date);
        for &(category, step) in steps {
            let category = AnyCategory::from(category);
            let Some(found) = step(tx) else {
                self.observer.observe(&Diagnostic::NotMatched { index, category });
                continue;
            };
            self.observer.observe(&Diagnostic::Matched { index, category });

            let mut failures = found.failures;
            match found.amount {
                Ok(amount) => record.amount = Some(amount),
                Err(e) => failures.push(e),
            }
            for error in &failures {
                self.observer.observe(&Diagnostic::ExtractionFailed { index, category, error });
            }
            record.failures.extend(failures);
            record.matches.push(found.matched);
        }

        self.observer.observe(&Diagnostic::TransactionFinished {
            pipeline,
            index,
            matched: record.matches.len(),
            failures: record.failures.len(),
        });
        record
    }
}

// ── Convenience entry points ─────────────────────────────────────────────────

pub fn process_debit(transactions: &[RawTransaction]) -> ReportBatch<DebitRecord> {
    Aggregator::<NoopObserver>::default().process_debit(transactions)
}

pub fn process_credit(transactions: &[RawTransaction]) -> ReportBatch<CreditRecord> {
    Aggregator::<NoopObserver>::default().process_credit(transactions)
}

pub fn classify_debit(tx: &RawTransaction) -> DebitRecord {
    Aggregator::<NoopObserver>::default().classify_debit(0, tx)
}

pub fn classify_credit(tx: &RawTransaction) -> CreditRecord {
    Aggregator::<NoopObserver>::default().classify_credit(0, tx)
}

// ── Steps ────────────────────────────────────────────────────────────────────

fn keep(value: Result<String, ExtractError>, failures: &mut Vec<ExtractError>) -> Option<String> {
    value.map_err(|e| failures.push(e)).ok()
}

fn flag_only<M>(matched: M, amount_text: &str) -> Classification<M> {
    Classification {
        matched,
        amount: parse_amount_in(amount_text),
        failures: Vec::new(),
    }
}

fn airtime_step(tx: &RawTransaction) -> Option<Classification<DebitMatch>> {
    if !is_debit_by_airtime_recharge(&tx.body) {
        return None;
    }
    let info = get_debit_by_airtime_info(&tx.body);
    let mut failures = Vec::new();
    let matched = DebitMatch::AirtimeRecharge {
        network: keep(info.network, &mut failures),
        phone_number: keep(info.phone_number, &mut failures),
    };
    Some(Classification {
        matched,
        amount: parse_amount_in(&tx.body),
        failures,
    })
}

fn transfer_step(tx: &RawTransaction) -> Option<Classification<DebitMatch>> {
    if !is_debit_by_transfer(&tx.body) {
        return None;
    }
    let info = get_debit_by_transfer_info(&tx.body);
    let mut failures = Vec::new();
    let matched = DebitMatch::Transfer {
        receiver: keep(info.receiver, &mut failures),
        description: keep(info.description, &mut failures),
    };
    Some(Classification {
        matched,
        amount: parse_amount_in(&tx.body),
        failures,
    })
}

fn card_pos_step(tx: &RawTransaction) -> Option<Classification<DebitMatch>> {
    is_debit_by_card_pos(&tx.header).then(|| flag_only(DebitMatch::CardPos, &tx.body))
}

fn card_online_step(tx: &RawTransaction) -> Option<Classification<DebitMatch>> {
    is_debit_by_card_online(&tx.header).then(|| flag_only(DebitMatch::CardOnline, &tx.body))
}

fn spend_and_save_step(tx: &RawTransaction) -> Option<Classification<DebitMatch>> {
    is_debit_by_spend_and_save(&tx.header).then(|| flag_only(DebitMatch::SpendAndSave, &tx.body))
}

fn alert_step(tx: &RawTransaction) -> Option<Classification<CreditMatch>> {
    if !is_credit_by_alert(&tx.body) {
        return None;
    }
    let info = get_credit_by_alert_info(&tx.body);
    let mut failures = Vec::new();
    let matched = CreditMatch::Alert {
        sender: keep(info.sender, &mut failures),
        description: info.description,
    };
    Some(Classification {
        matched,
        amount: parse_amount_in(&tx.body),
        failures,
    })
}

// Reversal amounts are read from the header, not the body.
fn reversal_step(tx: &RawTransaction) -> Option<Classification<CreditMatch>> {
    is_credit_by_reversal(&tx.header).then(|| flag_only(CreditMatch::Reversal, &tx.header))
}
