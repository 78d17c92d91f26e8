//! Calculation result models for the payroll engine.
//!
//! This module contains the [`PayrollCalculationResult`] breakdown, the
//! intermediate allowance and deduction sets it is built from, and the
//! [`PayrollCalculation`] envelope that carries the breakdown together with
//! an audit trace.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six resolved allowances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceSet {
    /// Housing allowance.
    pub housing: Decimal,
    /// Transport allowance.
    pub transport: Decimal,
    /// Medical allowance.
    pub medical: Decimal,
    /// Leave allowance.
    pub leave: Decimal,
    /// Responsibility allowance.
    pub responsibility: Decimal,
    /// Hazard allowance.
    pub hazard: Decimal,
}

impl AllowanceSet {
    /// Returns the sum of all six allowances.
    pub fn total(&self) -> Decimal {
        self.housing
            + self.transport
            + self.medical
            + self.leave
            + self.responsibility
            + self.hazard
    }
}

/// The resolved deductions for a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionSet {
    /// PAYE income tax withholding.
    pub paye: Decimal,
    /// Employee pension contribution.
    pub pension: Decimal,
    /// National Housing Fund contribution.
    pub nhf: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Union dues.
    pub union_dues: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// Cooperative society deduction.
    pub cooperative_deduction: Decimal,
    /// Any other deduction.
    pub other_deductions: Decimal,
}

impl DeductionSet {
    /// Returns the sum of all eight deductions.
    pub fn total(&self) -> Decimal {
        self.paye
            + self.pension
            + self.nhf
            + self.insurance
            + self.union_dues
            + self.loan_deduction
            + self.cooperative_deduction
            + self.other_deductions
    }
}

/// The itemized payroll breakdown for one staff member and period.
///
/// Invariants, for every value produced by the engine:
/// - `gross_pay` is basic salary plus the six allowances plus overtime,
///   bonus and arrears
/// - `total_deductions` is the sum of the eight deduction fields
/// - `net_pay` is `gross_pay - total_deductions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculationResult {
    /// Basic salary from the compensation scale.
    pub basic_salary: Decimal,
    /// Housing allowance.
    pub housing_allowance: Decimal,
    /// Transport allowance.
    pub transport_allowance: Decimal,
    /// Medical allowance.
    pub medical_allowance: Decimal,
    /// Leave allowance.
    pub leave_allowance: Decimal,
    /// Responsibility allowance.
    pub responsibility_allowance: Decimal,
    /// Hazard allowance.
    pub hazard_allowance: Decimal,
    /// Overtime pay.
    pub overtime: Decimal,
    /// Bonus.
    pub bonus: Decimal,
    /// Salary arrears.
    pub arrears: Decimal,
    /// Gross pay.
    pub gross_pay: Decimal,
    /// PAYE income tax.
    pub paye: Decimal,
    /// Pension contribution.
    pub pension: Decimal,
    /// National Housing Fund contribution.
    pub nhf: Decimal,
    /// Insurance premium.
    pub insurance: Decimal,
    /// Union dues.
    pub union_dues: Decimal,
    /// Loan repayment.
    pub loan_deduction: Decimal,
    /// Cooperative society deduction.
    pub cooperative_deduction: Decimal,
    /// Any other deduction.
    pub other_deductions: Decimal,
    /// Sum of all deductions.
    pub total_deductions: Decimal,
    /// Gross pay less total deductions.
    pub net_pay: Decimal,
}

impl PayrollCalculationResult {
    /// Returns the allowances as a set.
    pub fn allowances(&self) -> AllowanceSet {
        AllowanceSet {
            housing: self.housing_allowance,
            transport: self.transport_allowance,
            medical: self.medical_allowance,
            leave: self.leave_allowance,
            responsibility: self.responsibility_allowance,
            hazard: self.hazard_allowance,
        }
    }

    /// Returns the deductions as a set.
    pub fn deductions(&self) -> DeductionSet {
        DeductionSet {
            paye: self.paye,
            pension: self.pension,
            nhf: self.nhf,
            insurance: self.insurance,
            union_dues: self.union_dues,
            loan_deduction: self.loan_deduction,
            cooperative_deduction: self.cooperative_deduction,
            other_deductions: self.other_deductions,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete audit trace for a calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// A calculated payroll, labelled for storage and display.
///
/// Wraps the deterministic [`PayrollCalculationResult`] with the identifiers
/// and timing a caller needs to keep a record of the calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The version of the engine that performed the calculation.
    pub engine_version: String,
    /// The salary structure the calculation used (e.g., "CONJUSS").
    pub scheme: String,
    /// The grade code, normalized to upper case.
    pub grade_level: String,
    /// The step within the grade.
    pub step: u32,
    /// The itemized breakdown.
    pub result: PayrollCalculationResult,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
