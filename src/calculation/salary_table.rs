//! Basic salary lookup functionality.
//!
//! This module resolves a grade/step coordinate to a basic salary from the
//! compensation scale.

use rust_decimal::Decimal;

use crate::config::CompensationScale;
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of a basic salary lookup, including the amount and audit step.
#[derive(Debug, Clone)]
pub struct BasicSalaryLookupResult {
    /// The monthly basic salary.
    pub amount: Decimal,
    /// The grade code normalized to upper case.
    pub grade_level: String,
    /// The audit step recording this lookup.
    pub audit_step: AuditStep,
}

/// Looks up the basic salary for a grade and step.
///
/// # Arguments
///
/// * `grade` - The grade code, matched case-insensitively (e.g., "GL08")
/// * `step` - The step within the grade, starting at 1
/// * `scale` - The compensation scale
/// * `step_number` - The step number for audit trail sequencing
///
/// # Returns
///
/// Returns a `BasicSalaryLookupResult`, or `InvalidGradeOrStep` if the grade
/// is not on the scale or the step is outside it. No default is substituted.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::get_basic_salary;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let result = get_basic_salary("gl08", 5, loader.config().scale(), 1).unwrap();
/// assert_eq!(result.amount, Decimal::from(131_100));
/// assert_eq!(result.grade_level, "GL08");
/// ```
pub fn get_basic_salary(
    grade: &str,
    step: u32,
    scale: &CompensationScale,
    step_number: u32,
) -> EngineResult<BasicSalaryLookupResult> {
    let amount = scale
        .amount(grade, step)
        .ok_or_else(|| EngineError::InvalidGradeOrStep {
            grade: grade.to_string(),
            step,
        })?;

    let grade_level = grade.to_ascii_uppercase();
    let audit_step = AuditStep {
        step_number,
        rule_id: "basic_salary_lookup".to_string(),
        rule_name: "Basic Salary Lookup".to_string(),
        input: serde_json::json!({
            "grade_level": grade,
            "step": step
        }),
        output: serde_json::json!({
            "basic_salary": amount.to_string()
        }),
        reasoning: format!(
            "Grade {} step {} on the compensation scale: ₦{}",
            grade_level, step, amount
        ),
    };

    Ok(BasicSalaryLookupResult {
        amount,
        grade_level,
        audit_step,
    })
}

/// Returns true if the grade and step exist on the scale.
///
/// Form validation calls this before submitting a calculation.
pub fn is_valid_grade_step(grade: &str, step: u32, scale: &CompensationScale) -> bool {
    scale.amount(grade, step).is_some()
}
