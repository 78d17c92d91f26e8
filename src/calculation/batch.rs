//! Batch payroll calculation across many staff members.
//!
//! Entries are computed in parallel with rayon. Output order matches input
//! order, and a failing entry is reported in place without stopping the rest.

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::payroll::compute_payroll;
use crate::config::PayrollConfig;
use crate::models::{PayrollCalculationResult, PayrollInput};

/// One staff member's input in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntry {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The calculation input.
    pub input: PayrollInput,
}

/// The outcome for one batch entry: a result or an error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchEntryResult {
    /// The staff member's identifier.
    pub staff_id: String,
    /// The breakdown, if the calculation succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PayrollCalculationResult>,
    /// The error message, if the calculation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregates over the successful entries of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchTotals {
    /// Number of entries that calculated successfully.
    pub staff_count: usize,
    /// Number of entries that failed.
    pub failed_count: usize,
    /// Sum of gross pay.
    pub total_gross_pay: Decimal,
    /// Sum of total deductions.
    pub total_deductions: Decimal,
    /// Sum of net pay.
    pub total_net_pay: Decimal,
}

/// The per-entry outcomes of a batch and their totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBatchResult {
    /// Outcomes in input order.
    pub entries: Vec<BatchEntryResult>,
    /// Totals over the successful entries.
    pub totals: BatchTotals,
}

/// Computes payroll for every entry.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{compute_payroll_batch, BatchEntry};
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let entries = vec![
///     BatchEntry { staff_id: "S-001".into(), input: PayrollInput::new("GL01", 1) },
///     BatchEntry { staff_id: "S-002".into(), input: PayrollInput::new("GL99", 1) },
/// ];
///
/// let batch = compute_payroll_batch(&entries, loader.config());
/// assert_eq!(batch.totals.staff_count, 1);
/// assert_eq!(batch.totals.failed_count, 1);
/// assert_eq!(batch.totals.total_net_pay, Decimal::from(55_876));
/// assert!(batch.entries[1].error.is_some());
/// ```
pub fn compute_payroll_batch(entries: &[BatchEntry], config: &PayrollConfig) -> PayrollBatchResult {
    let outcomes: Vec<BatchEntryResult> = entries
        .par_iter()
        .map(|entry| match compute_payroll(&entry.input, config) {
            Ok(computation) => BatchEntryResult {
                staff_id: entry.staff_id.clone(),
                result: Some(computation.result),
                error: None,
            },
            Err(e) => {
                warn!(staff_id = %entry.staff_id, error = %e, "Batch entry failed");
                BatchEntryResult {
                    staff_id: entry.staff_id.clone(),
                    result: None,
                    error: Some(e.to_string()),
                }
            }
        })
        .collect();

    let mut totals = BatchTotals {
        staff_count: 0,
        failed_count: 0,
        total_gross_pay: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        total_net_pay: Decimal::ZERO,
    };
    for outcome in &outcomes {
        match &outcome.result {
            Some(result) => {
                totals.staff_count += 1;
                totals.total_gross_pay += result.gross_pay;
                totals.total_deductions += result.total_deductions;
                totals.total_net_pay += result.net_pay;
            }
            None => totals.failed_count += 1,
        }
    }

    debug!(
        entries = entries.len(),
        succeeded = totals.staff_count,
        failed = totals.failed_count,
        total_net_pay = %totals.total_net_pay,
        "Computed payroll batch"
    );

    PayrollBatchResult {
        entries: outcomes,
        totals,
    }
}
