//! Deduction aggregation.
//!
//! PAYE, pension and NHF are always computed from gross pay. The five
//! optional deductions come from the caller and default to zero.

use rust_decimal::Decimal;

use super::money::round_to_unit;
use super::paye::calculate_paye;
use crate::config::{PayeSchedule, StatutoryRates};
use crate::error::EngineResult;
use crate::models::{AuditStep, DeductionOverrides, DeductionSet};

/// The result of aggregating deductions, including the set and audit steps.
#[derive(Debug, Clone)]
pub struct DeductionResult {
    /// The resolved deductions.
    pub deductions: DeductionSet,
    /// Audit steps: PAYE first, then the statutory and optional deductions.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates every deduction for a period's gross pay.
///
/// # Arguments
///
/// * `gross_pay` - The period's gross pay
/// * `overrides` - Optional deductions supplied by the caller
/// * `statutory` - Pension and NHF rates
/// * `paye` - The PAYE schedule
/// * `step_number_start` - The starting step number for audit trail sequencing
///
/// Fails only if PAYE cannot annualize the gross pay.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::DeductionOverrides;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let config = loader.config();
/// let result = calculate_deductions(
///     Decimal::from(67_620),
///     &DeductionOverrides::default(),
///     config.statutory_rates(),
///     config.paye(),
///     1,
/// )?;
/// assert_eq!(result.deductions.pension, Decimal::from(5410));
/// assert_eq!(result.deductions.nhf, Decimal::from(1691));
/// assert_eq!(result.deductions.total(), Decimal::from(11_744));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_deductions(
    gross_pay: Decimal,
    overrides: &DeductionOverrides,
    statutory: &StatutoryRates,
    paye: &PayeSchedule,
    step_number_start: u32,
) -> EngineResult<DeductionResult> {
    let paye_result = calculate_paye(gross_pay, paye, step_number_start)?;

    let deductions = DeductionSet {
        paye: paye_result.period_tax,
        pension: round_to_unit(gross_pay * statutory.pension),
        nhf: round_to_unit(gross_pay * statutory.nhf),
        insurance: overrides.insurance.unwrap_or(Decimal::ZERO),
        union_dues: overrides.union_dues.unwrap_or(Decimal::ZERO),
        loan_deduction: overrides.loan_deduction.unwrap_or(Decimal::ZERO),
        cooperative_deduction: overrides.cooperative_deduction.unwrap_or(Decimal::ZERO),
        other_deductions: overrides.other_deductions.unwrap_or(Decimal::ZERO),
    };

    let total = deductions.total();
    let statutory_step = AuditStep {
        step_number: step_number_start + 1,
        rule_id: "deductions".to_string(),
        rule_name: "Deductions".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "pension_rate": statutory.pension.to_string(),
            "nhf_rate": statutory.nhf.to_string(),
            "overrides": overrides
        }),
        output: serde_json::json!({
            "deductions": deductions,
            "total_deductions": total.to_string()
        }),
        reasoning: format!(
            "PAYE ₦{} + pension ₦{} + NHF ₦{} + optional ₦{} = ₦{}",
            deductions.paye,
            deductions.pension,
            deductions.nhf,
            total - deductions.paye - deductions.pension - deductions.nhf,
            total
        ),
    };

    Ok(DeductionResult {
        deductions,
        audit_steps: vec![paye_result.audit_step, statutory_step],
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

    fn run(gross: &str, overrides: &DeductionOverrides) -> DeductionResult {
        let loader = ConfigLoader::builtin().unwrap();
        let config = loader.config();
        calculate_deductions(dec(gross), overrides, config.statutory_rates(), config.paye(), 1)
            .unwrap()
    }

    #[test]
    fn test_statutory_deductions_for_gl01_step_1() {
        let result = run("67620", &DeductionOverrides::default());

        assert_eq!(result.deductions.paye, dec("4643"));
        // 67,620 * 8% = 5,409.6
        assert_eq!(result.deductions.pension, dec("5410"));
        // 67,620 * 2.5% = 1,690.5
        assert_eq!(result.deductions.nhf, dec("1691"));
    }

    #[test]
    fn test_optional_deductions_default_to_zero() {
        let result = run("67620", &DeductionOverrides::default());

        assert_eq!(result.deductions.insurance, Decimal::ZERO);
        assert_eq!(result.deductions.union_dues, Decimal::ZERO);
        assert_eq!(result.deductions.loan_deduction, Decimal::ZERO);
        assert_eq!(result.deductions.cooperative_deduction, Decimal::ZERO);
        assert_eq!(result.deductions.other_deductions, Decimal::ZERO);
        assert_eq!(result.deductions.total(), dec("11744"));
    }

    #[test]
    fn test_supplied_optional_deductions_are_added() {
        let overrides = DeductionOverrides {
            insurance: Some(dec("1200")),
            union_dues: Some(dec("500")),
            loan_deduction: Some(dec("10000")),
            cooperative_deduction: Some(dec("2500")),
            other_deductions: Some(dec("300")),
        };

        let result = run("67620", &overrides);

        assert_eq!(result.deductions.loan_deduction, dec("10000"));
        assert_eq!(result.deductions.total(), dec("26244"));
    }

    #[test]
    fn test_low_gross_has_no_paye_but_still_contributes() {
        let result = run("15000", &DeductionOverrides::default());

        assert_eq!(result.deductions.paye, Decimal::ZERO);
        assert_eq!(result.deductions.pension, dec("1200"));
        assert_eq!(result.deductions.nhf, dec("375"));
    }

    #[test]
    fn test_audit_steps_are_sequenced() {
        let loader = ConfigLoader::builtin().unwrap();
        let config = loader.config();
        let result = calculate_deductions(
            dec("67620"),
            &DeductionOverrides::default(),
            config.statutory_rates(),
            config.paye(),
            4,
        )
        .unwrap();

        assert_eq!(result.audit_steps.len(), 2);
        assert_eq!(result.audit_steps[0].rule_id, "paye");
        assert_eq!(result.audit_steps[0].step_number, 4);
        assert_eq!(result.audit_steps[1].rule_id, "deductions");
        assert_eq!(result.audit_steps[1].step_number, 5);
        assert_eq!(result.audit_steps[1].output["total_deductions"], "11744");
    }
}
