//! Progressive PAYE income tax calculation.
//!
//! ## Method
//!
//! 1. Annualize the period's gross pay.
//! 2. Subtract the annual tax-free threshold. Nothing left means no tax.
//! 3. Tax the remainder slice by slice; each bracket's rate applies only to
//!    the part of taxable income that falls inside it.
//! 4. Spread the annual tax back over the periods and round to a whole unit.
//!
//! Under the CONJUSS schedule the slices are 300,000 at 7%, 300,000 at 11%,
//! 500,000 at 15%, 500,000 at 19%, 1,600,000 at 21% and the rest at 24%.

use rust_decimal::Decimal;

use super::money::round_to_unit;
use crate::config::{PayeSchedule, TaxBracket};
use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// The result of a PAYE calculation.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// Tax withheld for the period.
    pub period_tax: Decimal,
    /// Gross pay multiplied out to a year.
    pub annual_income: Decimal,
    /// Annual income above the tax-free threshold (zero if none).
    pub taxable_income: Decimal,
    /// Tax on the taxable income before spreading over periods.
    pub annual_tax: Decimal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the PAYE withholding for one period's gross pay.
///
/// Gross pay at or below the threshold (including negative gross pay) is
/// not taxed. Fails with `AmountOverflow` if the annualized income does not
/// fit in a decimal.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_paye;
/// use payroll_engine::config::ConfigLoader;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let schedule = loader.config().paye();
///
/// // 15,000 a month is 180,000 a year, under the 200,000 threshold.
/// assert_eq!(calculate_paye(Decimal::from(15_000), schedule, 1)?.period_tax, Decimal::ZERO);
///
/// // 67,620 a month: 611,440 taxable, 55,716 a year, 4,643 a month.
/// assert_eq!(calculate_paye(Decimal::from(67_620), schedule, 1)?.period_tax, Decimal::from(4643));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn calculate_paye(
    gross_pay: Decimal,
    schedule: &PayeSchedule,
    step_number: u32,
) -> EngineResult<PayeResult> {
    let periods = Decimal::from(schedule.periods_per_year);
    let annual_income = gross_pay
        .checked_mul(periods)
        .ok_or_else(|| EngineError::AmountOverflow {
            field: "annual_income".to_string(),
        })?;
    let above_threshold = annual_income
        .checked_sub(schedule.tax_free_threshold)
        .ok_or_else(|| EngineError::AmountOverflow {
            field: "annual_income".to_string(),
        })?;

    if above_threshold <= Decimal::ZERO {
        let audit_step = AuditStep {
            step_number,
            rule_id: "paye".to_string(),
            rule_name: "PAYE Income Tax".to_string(),
            input: serde_json::json!({
                "gross_pay": gross_pay.to_string(),
                "annual_income": annual_income.to_string(),
                "tax_free_threshold": schedule.tax_free_threshold.to_string()
            }),
            output: serde_json::json!({
                "taxable_income": "0",
                "annual_tax": "0",
                "period_tax": "0"
            }),
            reasoning: format!(
                "Annual income ₦{} is within the ₦{} tax-free threshold - no tax",
                annual_income, schedule.tax_free_threshold
            ),
        };

        return Ok(PayeResult {
            period_tax: Decimal::ZERO,
            annual_income,
            taxable_income: Decimal::ZERO,
            annual_tax: Decimal::ZERO,
            audit_step,
        });
    }

    let taxable_income = above_threshold;
    let (annual_tax, slices) = tax_by_bracket(taxable_income, &schedule.brackets);
    let period_tax = round_to_unit(annual_tax / periods);

    let audit_step = AuditStep {
        step_number,
        rule_id: "paye".to_string(),
        rule_name: "PAYE Income Tax".to_string(),
        input: serde_json::json!({
            "gross_pay": gross_pay.to_string(),
            "annual_income": annual_income.to_string(),
            "tax_free_threshold": schedule.tax_free_threshold.to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.to_string(),
            "slices": slices
                .iter()
                .map(|(amount, rate, tax)| serde_json::json!({
                    "amount": amount.to_string(),
                    "rate": rate.to_string(),
                    "tax": tax.to_string()
                }))
                .collect::<Vec<_>>(),
            "annual_tax": annual_tax.to_string(),
            "period_tax": period_tax.to_string()
        }),
        reasoning: format!(
            "₦{} taxable a year across {} bracket(s) = ₦{} a year, ÷ {} = ₦{}",
            taxable_income,
            slices.len(),
            annual_tax.normalize(),
            schedule.periods_per_year,
            period_tax
        ),
    };

    Ok(PayeResult {
        period_tax,
        annual_income,
        taxable_income,
        annual_tax,
        audit_step,
    })
}

/// Applies marginal rates slice by slice.
///
/// Returns the total tax and, for each bracket reached, the amount taxed in
/// it, its rate and the tax on that slice.
fn tax_by_bracket(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> (Decimal, Vec<(Decimal, Decimal, Decimal)>) {
    let mut remaining = taxable_income;
    let mut total = Decimal::ZERO;
    let mut slices = Vec::new();

    for bracket in brackets {
        if remaining <= Decimal::ZERO {
            break;
        }
        let amount = match bracket.width {
            Some(width) => remaining.min(width),
            None => remaining,
        };
        let tax = amount * bracket.rate;
        total += tax;
        remaining -= amount;
        slices.push((amount, bracket.rate, tax));
    }

    (total, slices)
}
