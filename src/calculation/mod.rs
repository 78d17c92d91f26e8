//! Calculation logic for the payroll engine.
//!
//! This module contains every step of a payroll calculation: basic salary
//! lookup on the compensation scale, allowance resolution, progressive PAYE,
//! statutory and optional deductions, the compositor that ties them together
//! into a breakdown, and the parallel batch runner.

mod allowances;
mod batch;
mod deductions;
mod money;
mod paye;
mod payroll;
mod salary_table;

pub use allowances::{AllowanceResult, calculate_allowances};
pub use batch::{
    BatchEntry, BatchEntryResult, BatchTotals, PayrollBatchResult, compute_payroll_batch,
};
pub use deductions::{DeductionResult, calculate_deductions};
pub use money::{format_naira, round_to_unit};
pub use paye::{PayeResult, calculate_paye};
pub use payroll::{PayrollComputation, compute_payroll};
pub use salary_table::{BasicSalaryLookupResult, get_basic_salary, is_valid_grade_step};
