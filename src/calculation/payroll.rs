//! Payroll composition.
//!
//! Runs the full pipeline for one staff member: basic salary lookup,
//! allowances, gross pay, deductions and net pay. The result is a pure
//! function of the input and the configuration.

use rust_decimal::Decimal;
use tracing::debug;

use super::allowances::calculate_allowances;
use super::deductions::calculate_deductions;
use super::salary_table::get_basic_salary;
use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, PayrollCalculationResult, PayrollInput, MAX_AMOUNT};

/// A computed payroll with the audit steps that produced it.
#[derive(Debug, Clone)]
pub struct PayrollComputation {
    /// The grade code, normalized to upper case.
    pub grade_level: String,
    /// The step within the grade.
    pub step: u32,
    /// The itemized breakdown.
    pub result: PayrollCalculationResult,
    /// Audit steps in the order they were applied.
    pub audit_steps: Vec<AuditStep>,
}

/// Computes the full payroll breakdown for one input.
///
/// An unknown grade or out-of-range step is reported before any supplied
/// amount is checked. A negative supplied amount is rejected, as is one
/// above [`MAX_AMOUNT`].
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_payroll;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::PayrollInput;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let computation = compute_payroll(&PayrollInput::new("GL01", 1), loader.config()).unwrap();
///
/// assert_eq!(computation.result.gross_pay, Decimal::from(67_620));
/// assert_eq!(computation.result.total_deductions, Decimal::from(11_744));
/// assert_eq!(computation.result.net_pay, Decimal::from(55_876));
/// ```
pub fn compute_payroll(
    input: &PayrollInput,
    config: &PayrollConfig,
) -> EngineResult<PayrollComputation> {
    let basic = get_basic_salary(&input.grade_level, input.step, config.scale(), 1)?;

    if let Some((field, amount)) = input
        .supplied_amounts()
        .into_iter()
        .find(|(_, amount)| amount.is_sign_negative() && !amount.is_zero())
    {
        return Err(EngineError::NegativeAmount {
            field: field.to_string(),
            amount,
        });
    }

    if let Some((field, amount)) = input
        .supplied_amounts()
        .into_iter()
        .find(|(_, amount)| *amount > MAX_AMOUNT)
    {
        return Err(EngineError::AmountOutOfRange {
            field: field.to_string(),
            amount,
        });
    }

    let allowance_result = calculate_allowances(
        basic.amount,
        &input.allowances,
        config.allowance_rates(),
        2,
    );
    let allowances = allowance_result.allowances;

    let overtime = input.additional_payments.overtime.unwrap_or(Decimal::ZERO);
    let bonus = input.additional_payments.bonus.unwrap_or(Decimal::ZERO);
    let arrears = input.additional_payments.arrears.unwrap_or(Decimal::ZERO);
    let gross_pay = basic.amount + allowances.total() + overtime + bonus + arrears;

    let gross_step = AuditStep {
        step_number: 3,
        rule_id: "gross_pay".to_string(),
        rule_name: "Gross Pay".to_string(),
        input: serde_json::json!({
            "basic_salary": basic.amount.to_string(),
            "allowances_total": allowances.total().to_string(),
            "overtime": overtime.to_string(),
            "bonus": bonus.to_string(),
            "arrears": arrears.to_string()
        }),
        output: serde_json::json!({
            "gross_pay": gross_pay.to_string()
        }),
        reasoning: format!(
            "₦{} basic + ₦{} allowances + ₦{} additional = ₦{}",
            basic.amount,
            allowances.total(),
            overtime + bonus + arrears,
            gross_pay
        ),
    };

    let deduction_result = calculate_deductions(
        gross_pay,
        &input.deductions,
        config.statutory_rates(),
        config.paye(),
        4,
    )?;
    let deductions = deduction_result.deductions;
    let total_deductions = deductions.total();
    let net_pay = gross_pay - total_deductions;

    let net_step = AuditStep {
        step_number: 6,
        rule_id: "net_pay".to_string(),
        rule_name: "Net Pay".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "total_deductions": total_deductions.to_string()
        }),
        output: serde_json::json!({
            "net_pay": net_pay.to_string()
        }),
        reasoning: format!(
            "₦{} gross - ₦{} deductions = ₦{}",
            gross_pay, total_deductions, net_pay
        ),
    };

    debug!(
        grade_level = %basic.grade_level,
        step = input.step,
        gross_pay = %gross_pay,
        net_pay = %net_pay,
        "Computed payroll"
    );

    let result = PayrollCalculationResult {
        basic_salary: basic.amount,
        housing_allowance: allowances.housing,
        transport_allowance: allowances.transport,
        medical_allowance: allowances.medical,
        leave_allowance: allowances.leave,
        responsibility_allowance: allowances.responsibility,
        hazard_allowance: allowances.hazard,
        overtime,
        bonus,
        arrears,
        gross_pay,
        paye: deductions.paye,
        pension: deductions.pension,
        nhf: deductions.nhf,
        insurance: deductions.insurance,
        union_dues: deductions.union_dues,
        loan_deduction: deductions.loan_deduction,
        cooperative_deduction: deductions.cooperative_deduction,
        other_deductions: deductions.other_deductions,
        total_deductions,
        net_pay,
    };

    let mut audit_steps = vec![basic.audit_step, allowance_result.audit_step, gross_step];
    audit_steps.extend(deduction_result.audit_steps);
    audit_steps.push(net_step);

    Ok(PayrollComputation {
        grade_level: basic.grade_level,
        step: input.step,
        result,
        audit_steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn config() -> PayrollConfig {
        ConfigLoader::builtin().unwrap().into_config()
    }

    // ==========================================================================
    // Reference breakdown
    // ==========================================================================

    #[test]
    fn test_gl01_step_1_full_breakdown() {
        let computation = compute_payroll(&PayrollInput::new("GL01", 1), &config()).unwrap();
        let result = computation.result;

        assert_eq!(result.basic_salary, dec("42000"));
        assert_eq!(result.housing_allowance, dec("8400"));
        assert_eq!(result.transport_allowance, dec("6300"));
        assert_eq!(result.medical_allowance, dec("4200"));
        assert_eq!(result.leave_allowance, dec("3360"));
        assert_eq!(result.responsibility_allowance, dec("2100"));
        assert_eq!(result.hazard_allowance, dec("1260"));
        assert_eq!(result.gross_pay, dec("67620"));
        assert_eq!(result.paye, dec("4643"));
        assert_eq!(result.pension, dec("5410"));
        assert_eq!(result.nhf, dec("1691"));
        assert_eq!(result.total_deductions, dec("11744"));
        assert_eq!(result.net_pay, dec("55876"));
    }

    #[test]
    fn test_grade_is_normalized() {
        let computation = compute_payroll(&PayrollInput::new("gl08", 5), &config()).unwrap();

        assert_eq!(computation.grade_level, "GL08");
        assert_eq!(computation.step, 5);
        assert_eq!(computation.result.basic_salary, dec("131100"));
    }

    // ==========================================================================
    // Overrides and additional payments
    // ==========================================================================

    #[test]
    fn test_allowance_override_changes_gross() {
        let mut input = PayrollInput::new("GL01", 1);
        input.allowances.housing = Some(dec("5000"));

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert_eq!(result.housing_allowance, dec("5000"));
        assert_eq!(result.gross_pay, dec("64220"));
    }

    #[test]
    fn test_additional_payments_are_added_to_gross() {
        let mut input = PayrollInput::new("GL01", 1);
        input.additional_payments.overtime = Some(dec("3000"));
        input.additional_payments.bonus = Some(dec("10000"));
        input.additional_payments.arrears = Some(dec("1380"));

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert_eq!(result.overtime, dec("3000"));
        assert_eq!(result.bonus, dec("10000"));
        assert_eq!(result.arrears, dec("1380"));
        assert_eq!(result.gross_pay, dec("82000"));
    }

    #[test]
    fn test_optional_deductions_reduce_net() {
        let mut input = PayrollInput::new("GL01", 1);
        input.deductions.loan_deduction = Some(dec("10000"));
        input.deductions.union_dues = Some(dec("500"));

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert_eq!(result.total_deductions, dec("22244"));
        assert_eq!(result.net_pay, dec("45376"));
    }

    #[test]
    fn test_net_pay_may_be_negative() {
        let mut input = PayrollInput::new("GL01", 1);
        input.deductions.loan_deduction = Some(dec("100000"));

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert!(result.net_pay < Decimal::ZERO);
        assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
    }

    #[test]
    fn test_explicit_zero_allowances_are_kept() {
        let mut input = PayrollInput::new("GL01", 1);
        input.allowances.housing = Some(Decimal::ZERO);
        input.allowances.transport = Some(Decimal::ZERO);
        input.allowances.medical = Some(Decimal::ZERO);
        input.allowances.leave = Some(Decimal::ZERO);
        input.allowances.responsibility = Some(Decimal::ZERO);
        input.allowances.hazard = Some(Decimal::ZERO);

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert_eq!(result.gross_pay, dec("42000"));
        // 504,000 a year, 304,000 taxable: 21,000 + 4,000 * 11% = 21,440
        assert_eq!(result.paye, dec("1787"));
    }

    // ==========================================================================
    // Errors
    // ==========================================================================

    #[test]
    fn test_invalid_grade_returns_error() {
        match compute_payroll(&PayrollInput::new("GL18", 1), &config()) {
            Err(EngineError::InvalidGradeOrStep { grade, step }) => {
                assert_eq!(grade, "GL18");
                assert_eq!(step, 1);
            }
            other => panic!("Expected InvalidGradeOrStep, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_supplied_amount_is_rejected() {
        let mut input = PayrollInput::new("GL01", 1);
        input.deductions.insurance = Some(dec("-50"));

        match compute_payroll(&input, &config()) {
            Err(EngineError::NegativeAmount { field, amount }) => {
                assert_eq!(field, "deductions.insurance");
                assert_eq!(amount, dec("-50"));
            }
            other => panic!("Expected NegativeAmount, got {:?}", other),
        }
    }

    #[test]
    fn test_max_decimal_bonus_is_out_of_range() {
        let mut input = PayrollInput::new("GL01", 1);
        input.additional_payments.bonus = Some(Decimal::MAX);

        match compute_payroll(&input, &config()) {
            Err(EngineError::AmountOutOfRange { field, amount }) => {
                assert_eq!(field, "additionalPayments.bonus");
                assert_eq!(amount, Decimal::MAX);
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_too_large_to_annualize_is_out_of_range() {
        let mut input = PayrollInput::new("GL01", 1);
        input.additional_payments.bonus = Some(Decimal::MAX / Decimal::from(10));

        assert!(matches!(
            compute_payroll(&input, &config()),
            Err(EngineError::AmountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_huge_override_is_out_of_range() {
        let mut input = PayrollInput::new("GL01", 1);
        input.allowances.housing = Some(Decimal::MAX);

        match compute_payroll(&input, &config()) {
            Err(EngineError::AmountOutOfRange { field, .. }) => {
                assert_eq!(field, "allowances.housing");
            }
            other => panic!("Expected AmountOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_amount_at_ceiling_is_computed() {
        let mut input = PayrollInput::new("GL01", 1);
        input.additional_payments.bonus = Some(MAX_AMOUNT);
        input.additional_payments.arrears = Some(MAX_AMOUNT);

        let result = compute_payroll(&input, &config()).unwrap().result;

        assert_eq!(result.gross_pay, dec("67620") + MAX_AMOUNT + MAX_AMOUNT);
        assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
    }

    #[test]
    fn test_invalid_grade_is_reported_before_negative_amount() {
        let mut input = PayrollInput::new("GL00", 1);
        input.additional_payments.bonus = Some(dec("-1"));

        assert!(matches!(
            compute_payroll(&input, &config()),
            Err(EngineError::InvalidGradeOrStep { .. })
        ));
    }

    // ==========================================================================
    // Invariants
    // ==========================================================================

    #[test]
    fn test_totals_hold_for_every_coordinate() {
        let config = config();
        for grade in config.scale().grades() {
            for step in 1..=config.scale().steps_per_grade() {
                let result = compute_payroll(&PayrollInput::new(grade.code.clone(), step), &config)
                    .unwrap()
                    .result;

                assert_eq!(
                    result.gross_pay,
                    result.basic_salary + result.allowances().total()
                );
                assert_eq!(result.total_deductions, result.deductions().total());
                assert_eq!(result.net_pay, result.gross_pay - result.total_deductions);
            }
        }
    }

    #[test]
    fn test_repeated_calls_are_identical() {
        let config = config();
        let mut input = PayrollInput::new("GL12", 9);
        input.allowances.hazard = Some(dec("7777"));
        input.deductions.other_deductions = Some(dec("123.45"));

        let first = compute_payroll(&input, &config).unwrap();
        let second = compute_payroll(&input, &config).unwrap();

        assert_eq!(first.result, second.result);
        assert_eq!(first.audit_steps, second.audit_steps);
    }

    #[test]
    fn test_audit_steps_cover_pipeline() {
        let computation = compute_payroll(&PayrollInput::new("GL01", 1), &config()).unwrap();

        let rule_ids: Vec<&str> = computation
            .audit_steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();
        assert_eq!(
            rule_ids,
            vec!["basic_salary_lookup", "allowances", "gross_pay", "paye", "deductions", "net_pay"]
        );

        let numbers: Vec<u32> = computation.audit_steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5, 6]);
    }
}
