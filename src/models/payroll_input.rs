//! Payroll calculation input models.
//!
//! Every override group is a record of optional fields. An absent field means
//! "use the default"; an explicit zero is a real value and is kept.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest amount accepted from a caller or a compensation scale: 10^15.
///
/// Every sum and product the engine forms from amounts under this ceiling
/// stays far inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Caller overrides for the six allowances.
///
/// Fields left as `None` are derived from basic salary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllowanceOverrides {
    /// Housing allowance.
    #[serde(default)]
    pub housing: Option<Decimal>,
    /// Transport allowance.
    #[serde(default)]
    pub transport: Option<Decimal>,
    /// Medical allowance.
    #[serde(default)]
    pub medical: Option<Decimal>,
    /// Leave allowance.
    #[serde(default)]
    pub leave: Option<Decimal>,
    /// Responsibility allowance.
    #[serde(default)]
    pub responsibility: Option<Decimal>,
    /// Hazard allowance.
    #[serde(default)]
    pub hazard: Option<Decimal>,
}

/// One-off payments for the period. Absent fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalPayments {
    /// Overtime pay.
    #[serde(default)]
    pub overtime: Option<Decimal>,
    /// Bonus.
    #[serde(default)]
    pub bonus: Option<Decimal>,
    /// Salary arrears.
    #[serde(default)]
    pub arrears: Option<Decimal>,
}

/// Optional deductions. Absent fields are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeductionOverrides {
    /// Insurance premium.
    #[serde(default)]
    pub insurance: Option<Decimal>,
    /// Union dues.
    #[serde(default)]
    pub union_dues: Option<Decimal>,
    /// Loan repayment.
    #[serde(default)]
    pub loan_deduction: Option<Decimal>,
    /// Cooperative society deduction.
    #[serde(default)]
    pub cooperative_deduction: Option<Decimal>,
    /// Any other deduction.
    #[serde(default)]
    pub other_deductions: Option<Decimal>,
}

/// Everything needed to compute one staff member's payroll for a period.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollInput;
///
/// let input: PayrollInput = serde_json::from_str(
///     r#"{ "gradeLevel": "GL08", "step": 5, "allowances": { "housing": 0 } }"#,
/// ).unwrap();
/// assert_eq!(input.grade_level, "GL08");
/// assert!(input.allowances.housing.is_some());
/// assert!(input.allowances.transport.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollInput {
    /// Grade code, matched case-insensitively (e.g., "GL08").
    pub grade_level: String,
    /// Step within the grade, starting at 1.
    pub step: u32,
    /// Allowance overrides.
    #[serde(default)]
    pub allowances: AllowanceOverrides,
    /// One-off payments.
    #[serde(default)]
    pub additional_payments: AdditionalPayments,
    /// Optional deductions.
    #[serde(default)]
    pub deductions: DeductionOverrides,
}

impl PayrollInput {
    /// Creates an input with no overrides.
    pub fn new(grade_level: impl Into<String>, step: u32) -> Self {
        Self {
            grade_level: grade_level.into(),
            step,
            allowances: AllowanceOverrides::default(),
            additional_payments: AdditionalPayments::default(),
            deductions: DeductionOverrides::default(),
        }
    }

    /// Returns every caller-supplied amount with its dotted field name.
    pub fn supplied_amounts(&self) -> Vec<(&'static str, Decimal)> {
        let a = &self.allowances;
        let p = &self.additional_payments;
        let d = &self.deductions;
        [
            ("allowances.housing", a.housing),
            ("allowances.transport", a.transport),
            ("allowances.medical", a.medical),
            ("allowances.leave", a.leave),
            ("allowances.responsibility", a.responsibility),
            ("allowances.hazard", a.hazard),
            ("additionalPayments.overtime", p.overtime),
            ("additionalPayments.bonus", p.bonus),
            ("additionalPayments.arrears", p.arrears),
            ("deductions.insurance", d.insurance),
            ("deductions.unionDues", d.union_dues),
            ("deductions.loanDeduction", d.loan_deduction),
            ("deductions.cooperativeDeduction", d.cooperative_deduction),
            ("deductions.otherDeductions", d.other_deductions),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}
