//! Staff identity and the export records built from a calculation.
//!
//! The engine does not know about file formats. These are the data contracts
//! payslip renderers and bank-transfer exporters consume.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::PayrollCalculationResult;

/// A staff member's bank details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    /// Name of the bank.
    pub bank_name: String,
    /// Account number.
    pub account_number: String,
    /// Name on the account.
    pub account_name: String,
    /// Sort or institution code of the bank, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
}

/// The identity fields the staff directory supplies for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffProfile {
    /// Staff identifier.
    pub staff_id: String,
    /// Full name.
    pub staff_name: String,
    /// Department name.
    pub department: String,
    /// Grade code.
    pub grade_level: String,
    /// Step within the grade.
    pub step: u32,
    /// Salary account.
    pub bank_account: BankAccount,
}

/// Everything a payslip shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayslipData {
    /// Staff identifier.
    pub staff_id: String,
    /// Full name.
    pub staff_name: String,
    /// Pay period label (e.g., "January 2025").
    pub pay_period: String,
    /// Department name.
    pub department: String,
    /// Grade code.
    pub grade_level: String,
    /// Step within the grade.
    pub step: u32,
    /// The itemized calculation.
    pub calculation: PayrollCalculationResult,
}

impl PayslipData {
    /// Labels a calculation with the staff member's identity and the period.
    pub fn new(
        staff: &StaffProfile,
        pay_period: impl Into<String>,
        calculation: PayrollCalculationResult,
    ) -> Self {
        Self {
            staff_id: staff.staff_id.clone(),
            staff_name: staff.staff_name.clone(),
            pay_period: pay_period.into(),
            department: staff.department.clone(),
            grade_level: staff.grade_level.to_ascii_uppercase(),
            step: staff.step,
            calculation,
        }
    }
}

/// One line of a bank transfer schedule. `amount` is the net pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankTransferRecord {
    /// Staff identifier.
    pub staff_id: String,
    /// Full name.
    pub staff_name: String,
    /// Account number.
    pub account_number: String,
    /// Name of the bank.
    pub bank_name: String,
    /// Name on the account.
    pub account_name: String,
    /// Amount to transfer.
    pub amount: Decimal,
    /// Sort or institution code of the bank, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank_code: Option<String>,
}

impl BankTransferRecord {
    /// Builds the transfer for a staff member's net pay.
    pub fn new(staff: &StaffProfile, calculation: &PayrollCalculationResult) -> Self {
        let account = &staff.bank_account;
        Self {
            staff_id: staff.staff_id.clone(),
            staff_name: staff.staff_name.clone(),
            account_number: account.account_number.clone(),
            bank_name: account.bank_name.clone(),
            account_name: account.account_name.clone(),
            amount: calculation.net_pay,
            bank_code: account.bank_code.clone(),
        }
    }
}

/// Count and total of the transfers going to one bank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSummary {
    /// Name of the bank.
    pub bank_name: String,
    /// Number of transfers.
    pub count: usize,
    /// Sum of the transfer amounts.
    pub total_amount: Decimal,
}

/// Groups transfer records by bank, sorted by bank name.
pub fn summarize_by_bank(records: &[BankTransferRecord]) -> Vec<BankSummary> {
    let mut groups: BTreeMap<&str, (usize, Decimal)> = BTreeMap::new();
    for record in records {
        let entry = groups
            .entry(record.bank_name.as_str())
            .or_insert((0, Decimal::ZERO));
        entry.0 += 1;
        entry.1 += record.amount;
    }

    groups
        .into_iter()
        .map(|(bank_name, (count, total_amount))| BankSummary {
            bank_name: bank_name.to_string(),
            count,
            total_amount,
        })
        .collect()
}
