//! Core data models for the payroll engine.
//!
//! This module contains the calculation input and output types, the export
//! records built from a calculation, and the payroll run lifecycle.

mod calculation_result;
mod payroll_input;
mod payroll_run;
mod staff;

pub use calculation_result::{
    AllowanceSet, AuditStep, AuditTrace, DeductionSet, PayrollCalculation,
    PayrollCalculationResult,
};
pub use payroll_input::{
    AdditionalPayments, AllowanceOverrides, DeductionOverrides, MAX_AMOUNT, PayrollInput,
};
pub use payroll_run::{PayrollRun, PayrollRunStatus};
pub use staff::{
    BankAccount, BankSummary, BankTransferRecord, PayslipData, StaffProfile, summarize_by_bank,
};
