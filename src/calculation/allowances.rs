//! Allowance calculation functionality.
//!
//! Each of the six allowances is either the caller's explicit value, used
//! verbatim (an explicit zero included), or a fixed share of basic salary
//! rounded to the nearest whole unit.

use rust_decimal::Decimal;

use super::money::round_to_unit;
use crate::config::AllowanceRates;
use crate::models::{AllowanceOverrides, AllowanceSet, AuditStep};

/// The result of calculating allowances, including the set and audit step.
#[derive(Debug, Clone)]
pub struct AllowanceResult {
    /// The resolved allowances.
    pub allowances: AllowanceSet,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Resolves all six allowances for a basic salary.
///
/// # Arguments
///
/// * `basic_salary` - The monthly basic salary
/// * `overrides` - Caller-supplied allowances; `None` fields are derived
/// * `rates` - The share of basic salary for each derived allowance
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_allowances;
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::AllowanceOverrides;
/// use rust_decimal::Decimal;
///
/// let loader = ConfigLoader::builtin().unwrap();
/// let overrides = AllowanceOverrides {
///     housing: Some(Decimal::from(5000)),
///     ..Default::default()
/// };
///
/// let result = calculate_allowances(
///     Decimal::from(42_000),
///     &overrides,
///     loader.config().allowance_rates(),
///     1,
/// );
/// assert_eq!(result.allowances.housing, Decimal::from(5000));
/// assert_eq!(result.allowances.transport, Decimal::from(6300));
/// ```
pub fn calculate_allowances(
    basic_salary: Decimal,
    overrides: &AllowanceOverrides,
    rates: &AllowanceRates,
    step_number: u32,
) -> AllowanceResult {
    let resolve = |supplied: Option<Decimal>, rate: Decimal| -> (Decimal, &'static str) {
        match supplied {
            Some(amount) => (amount, "override"),
            None => (round_to_unit(basic_salary * rate), "default"),
        }
    };

    let housing = resolve(overrides.housing, rates.housing);
    let transport = resolve(overrides.transport, rates.transport);
    let medical = resolve(overrides.medical, rates.medical);
    let leave = resolve(overrides.leave, rates.leave);
    let responsibility = resolve(overrides.responsibility, rates.responsibility);
    let hazard = resolve(overrides.hazard, rates.hazard);

    let allowances = AllowanceSet {
        housing: housing.0,
        transport: transport.0,
        medical: medical.0,
        leave: leave.0,
        responsibility: responsibility.0,
        hazard: hazard.0,
    };

    let overridden = [housing.1, transport.1, medical.1, leave.1, responsibility.1, hazard.1]
        .iter()
        .filter(|source| **source == "override")
        .count();

    let audit_step = AuditStep {
        step_number,
        rule_id: "allowances".to_string(),
        rule_name: "Allowances".to_string(),
        input: serde_json::json!({
            "basic_salary": basic_salary.to_string(),
            "overrides": overrides
        }),
        output: serde_json::json!({
            "housing": { "amount": housing.0.to_string(), "source": housing.1 },
            "transport": { "amount": transport.0.to_string(), "source": transport.1 },
            "medical": { "amount": medical.0.to_string(), "source": medical.1 },
            "leave": { "amount": leave.0.to_string(), "source": leave.1 },
            "responsibility": { "amount": responsibility.0.to_string(), "source": responsibility.1 },
            "hazard": { "amount": hazard.0.to_string(), "source": hazard.1 },
            "total": allowances.total().to_string()
        }),
        reasoning: format!(
            "{} of 6 allowances supplied by caller, the rest derived from basic salary ₦{}: total ₦{}",
            overridden,
            basic_salary,
            allowances.total()
        ),
    };

    AllowanceResult {
        allowances,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn rates() -> AllowanceRates {
        AllowanceRates {
            housing: dec("0.20"),
            transport: dec("0.15"),
            medical: dec("0.10"),
            leave: dec("0.08"),
            responsibility: dec("0.05"),
            hazard: dec("0.03"),
        }
    }

    #[test]
    fn test_defaults_for_gl01_step_1() {
        let result = calculate_allowances(dec("42000"), &AllowanceOverrides::default(), &rates(), 1);

        assert_eq!(result.allowances.housing, dec("8400"));
        assert_eq!(result.allowances.transport, dec("6300"));
        assert_eq!(result.allowances.medical, dec("4200"));
        assert_eq!(result.allowances.leave, dec("3360"));
        assert_eq!(result.allowances.responsibility, dec("2100"));
        assert_eq!(result.allowances.hazard, dec("1260"));
        assert_eq!(result.allowances.total(), dec("25620"));
    }

    #[test]
    fn test_override_is_used_verbatim() {
        let overrides = AllowanceOverrides {
            housing: Some(dec("5000")),
            ..Default::default()
        };

        let result = calculate_allowances(dec("42000"), &overrides, &rates(), 1);

        assert_eq!(result.allowances.housing, dec("5000"));
        assert_eq!(result.allowances.transport, dec("6300"));
    }

    #[test]
    fn test_explicit_zero_is_kept() {
        let overrides = AllowanceOverrides {
            hazard: Some(Decimal::ZERO),
            responsibility: Some(Decimal::ZERO),
            ..Default::default()
        };

        let result = calculate_allowances(dec("42000"), &overrides, &rates(), 1);

        assert_eq!(result.allowances.hazard, Decimal::ZERO);
        assert_eq!(result.allowances.responsibility, Decimal::ZERO);
        assert_eq!(result.allowances.housing, dec("8400"));
    }

    #[test]
    fn test_each_field_rounds_independently() {
        // 43470 * 0.03 = 1304.1, 43470 * 0.05 = 2173.5, 43470 * 0.15 = 6520.5
        let result = calculate_allowances(dec("43470"), &AllowanceOverrides::default(), &rates(), 1);

        assert_eq!(result.allowances.hazard, dec("1304"));
        assert_eq!(result.allowances.responsibility, dec("2174"));
        assert_eq!(result.allowances.transport, dec("6521"));
        assert_eq!(result.allowances.leave, dec("3478"));
    }

    #[test]
    fn test_audit_step_marks_sources() {
        let overrides = AllowanceOverrides {
            medical: Some(dec("1000")),
            ..Default::default()
        };

        let result = calculate_allowances(dec("42000"), &overrides, &rates(), 2);

        assert_eq!(result.audit_step.step_number, 2);
        assert_eq!(result.audit_step.rule_id, "allowances");
        assert_eq!(result.audit_step.output["medical"]["source"], "override");
        assert_eq!(result.audit_step.output["housing"]["source"], "default");
        assert!(result.audit_step.reasoning.starts_with("1 of 6"));
    }
}
