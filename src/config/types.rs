//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the validated
//! [`PayrollConfig`] that the calculation functions read from.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{EngineError, EngineResult};
use crate::models::MAX_AMOUNT;

/// Metadata about the pay scheme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeMetadata {
    /// The short code of the salary structure (e.g., "CONJUSS").
    pub code: String,
    /// The human-readable name of the salary structure.
    pub name: String,
    /// ISO 4217 currency code for all amounts.
    pub currency: String,
    /// The version or effective date of the structure.
    pub version: String,
}

/// The monthly basic salary for every step of one grade level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeScale {
    /// The grade code (e.g., "GL08").
    pub code: String,
    /// Basic salary per step; index 0 is step 1.
    pub steps: Vec<Decimal>,
}

/// Scale configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ScaleConfig {
    /// Number of steps every grade must carry.
    pub steps_per_grade: u32,
    /// Grades in ascending order.
    pub grades: Vec<GradeScale>,
}

/// The compensation scale: a read-only grade/step to basic salary table.
///
/// Grade codes are matched case-insensitively and steps are 1-based.
#[derive(Debug, Clone)]
pub struct CompensationScale {
    steps_per_grade: u32,
    grades: Vec<GradeScale>,
}

impl CompensationScale {
    /// Builds a scale, checking that it is well formed.
    ///
    /// Every grade must have exactly `steps_per_grade` non-negative amounts
    /// that never decrease as the step increases, and grade codes must be
    /// unique ignoring case.
    pub fn new(steps_per_grade: u32, grades: Vec<GradeScale>) -> EngineResult<Self> {
        if steps_per_grade == 0 {
            return Err(EngineError::InvalidConfig {
                message: "steps_per_grade must be at least 1".to_string(),
            });
        }
        if grades.is_empty() {
            return Err(EngineError::InvalidConfig {
                message: "scale defines no grades".to_string(),
            });
        }

        let mut seen = HashSet::new();
        for grade in &grades {
            if !seen.insert(grade.code.to_ascii_uppercase()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("grade {} is defined more than once", grade.code),
                });
            }
            if grade.steps.len() != steps_per_grade as usize {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "grade {} has {} steps, expected {}",
                        grade.code,
                        grade.steps.len(),
                        steps_per_grade
                    ),
                });
            }
            if let Some(amount) = grade.steps.iter().find(|a| a.is_sign_negative()) {
                return Err(EngineError::InvalidConfig {
                    message: format!("grade {} has negative amount {}", grade.code, amount),
                });
            }
            if let Some(amount) = grade.steps.iter().find(|a| **a > MAX_AMOUNT) {
                return Err(EngineError::InvalidConfig {
                    message: format!("grade {} has amount {} above {}", grade.code, amount, MAX_AMOUNT),
                });
            }
            if grade.steps.windows(2).any(|pair| pair[1] < pair[0]) {
                return Err(EngineError::InvalidConfig {
                    message: format!("grade {} decreases between steps", grade.code),
                });
            }
        }

        Ok(Self {
            steps_per_grade,
            grades,
        })
    }

    /// Returns the number of steps in every grade.
    pub fn steps_per_grade(&self) -> u32 {
        self.steps_per_grade
    }

    /// Returns the grades in their configured order.
    pub fn grades(&self) -> &[GradeScale] {
        &self.grades
    }

    /// Returns the basic salary at a grade and step, if both exist.
    pub fn amount(&self, grade: &str, step: u32) -> Option<Decimal> {
        if step == 0 || step > self.steps_per_grade {
            return None;
        }
        self.grades
            .iter()
            .find(|g| g.code.eq_ignore_ascii_case(grade))
            .and_then(|g| g.steps.get(step as usize - 1).copied())
    }
}

/// Allowance rates as a share of basic salary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowanceRates {
    /// Housing allowance rate.
    pub housing: Decimal,
    /// Transport allowance rate.
    pub transport: Decimal,
    /// Medical allowance rate.
    pub medical: Decimal,
    /// Leave allowance rate.
    pub leave: Decimal,
    /// Responsibility allowance rate.
    pub responsibility: Decimal,
    /// Hazard allowance rate.
    pub hazard: Decimal,
}

/// Statutory contribution rates as a share of gross pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Employee pension contribution rate.
    pub pension: Decimal,
    /// National Housing Fund contribution rate.
    pub nhf: Decimal,
}

/// One slice of the progressive tax schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Width of the slice in annual taxable income; `None` for the top slice.
    #[serde(default)]
    pub width: Option<Decimal>,
    /// Marginal rate applied within the slice.
    pub rate: Decimal,
}

/// PAYE schedule applied to annualized gross pay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayeSchedule {
    /// Pay periods per year used to annualize and de-annualize.
    pub periods_per_year: u32,
    /// Annual income exempt from tax.
    pub tax_free_threshold: Decimal,
    /// Brackets in ascending order.
    pub brackets: Vec<TaxBracket>,
}

/// Rates configuration file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Allowance rates.
    pub allowances: AllowanceRates,
    /// Statutory contribution rates.
    pub statutory: StatutoryRates,
    /// PAYE schedule.
    pub paye: PayeSchedule,
}

/// The complete payroll configuration loaded from YAML files.
///
/// Immutable once built; share it behind an `Arc` across threads.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    metadata: SchemeMetadata,
    scale: CompensationScale,
    allowance_rates: AllowanceRates,
    statutory_rates: StatutoryRates,
    paye: PayeSchedule,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        metadata: SchemeMetadata,
        scale: CompensationScale,
        rates: RatesConfig,
    ) -> EngineResult<Self> {
        validate_rates(&rates)?;
        Ok(Self {
            metadata,
            scale,
            allowance_rates: rates.allowances,
            statutory_rates: rates.statutory,
            paye: rates.paye,
        })
    }

    /// Returns the scheme metadata.
    pub fn scheme(&self) -> &SchemeMetadata {
        &self.metadata
    }

    /// Returns the compensation scale.
    pub fn scale(&self) -> &CompensationScale {
        &self.scale
    }

    /// Returns the allowance rates.
    pub fn allowance_rates(&self) -> &AllowanceRates {
        &self.allowance_rates
    }

    /// Returns the statutory contribution rates.
    pub fn statutory_rates(&self) -> &StatutoryRates {
        &self.statutory_rates
    }

    /// Returns the PAYE schedule.
    pub fn paye(&self) -> &PayeSchedule {
        &self.paye
    }
}

fn validate_rates(rates: &RatesConfig) -> EngineResult<()> {
    let a = &rates.allowances;
    let named = [
        ("allowances.housing", a.housing),
        ("allowances.transport", a.transport),
        ("allowances.medical", a.medical),
        ("allowances.leave", a.leave),
        ("allowances.responsibility", a.responsibility),
        ("allowances.hazard", a.hazard),
        ("statutory.pension", rates.statutory.pension),
        ("statutory.nhf", rates.statutory.nhf),
    ];
    for (name, rate) in named {
        check_rate(name, rate)?;
    }

    let paye = &rates.paye;
    if paye.periods_per_year == 0 {
        return Err(EngineError::InvalidConfig {
            message: "paye.periods_per_year must be at least 1".to_string(),
        });
    }
    if paye.tax_free_threshold.is_sign_negative() {
        return Err(EngineError::InvalidConfig {
            message: "paye.tax_free_threshold must not be negative".to_string(),
        });
    }
    if paye.brackets.is_empty() {
        return Err(EngineError::InvalidConfig {
            message: "paye.brackets must not be empty".to_string(),
        });
    }

    let last = paye.brackets.len() - 1;
    for (index, bracket) in paye.brackets.iter().enumerate() {
        check_rate(&format!("paye.brackets[{}].rate", index), bracket.rate)?;
        match bracket.width {
            Some(width) if width <= Decimal::ZERO => {
                return Err(EngineError::InvalidConfig {
                    message: format!("paye.brackets[{}].width must be positive", index),
                });
            }
            None if index != last => {
                return Err(EngineError::InvalidConfig {
                    message: format!(
                        "paye.brackets[{}] is open-ended but is not the last bracket",
                        index
                    ),
                });
            }
            _ => {}
        }
    }

    Ok(())
}

fn check_rate(name: &str, rate: Decimal) -> EngineResult<()> {
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(EngineError::InvalidConfig {
            message: format!("{} must be between 0 and 1, got {}", name, rate),
        });
    }
    Ok(())
}
