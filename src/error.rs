//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading pay-scale
//! configuration and computing payroll.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::PayrollRunStatus;

/// The main error type for the payroll engine.
///
/// All fallible operations in the engine return this error type, making it
/// easy to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::InvalidGradeOrStep {
///     grade: "GL99".to_string(),
///     step: 1,
/// };
/// assert_eq!(error.to_string(), "Invalid grade level or step: GL99 step 1");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but violates a structural rule of the pay scheme.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the violated rule.
        message: String,
    },

    /// The grade code is unknown or the step is outside the scale.
    #[error("Invalid grade level or step: {grade} step {step}")]
    InvalidGradeOrStep {
        /// The grade code as supplied by the caller.
        grade: String,
        /// The step as supplied by the caller.
        step: u32,
    },

    /// A caller-supplied amount was negative.
    #[error("Amount for '{field}' must not be negative: {amount}")]
    NegativeAmount {
        /// The input field carrying the amount.
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// A caller-supplied amount is larger than the engine accepts.
    #[error("Amount for '{field}' exceeds the supported maximum: {amount}")]
    AmountOutOfRange {
        /// The input field carrying the amount.
        field: String,
        /// The rejected amount.
        amount: Decimal,
    },

    /// A derived amount does not fit in a decimal.
    #[error("Arithmetic overflow computing {field}")]
    AmountOverflow {
        /// The quantity being computed.
        field: String,
    },

    /// A payroll run was asked to move to a status it cannot reach.
    #[error("Invalid payroll run transition from {from} to {to}")]
    InvalidStatusTransition {
        /// The current status of the run.
        from: PayrollRunStatus,
        /// The requested status.
        to: PayrollRunStatus,
    },

    /// Batch totals were offered to a run that is no longer a draft.
    #[error("Payroll run in status {status} cannot take new totals")]
    RunNotEditable {
        /// The current status of the run.
        status: PayrollRunStatus,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/scale.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/scale.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "grade GL03 has 14 steps, expected 15".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: grade GL03 has 14 steps, expected 15"
        );
    }

    #[test]
    fn test_invalid_grade_or_step_displays_grade_and_step() {
        let error = EngineError::InvalidGradeOrStep {
            grade: "GL01".to_string(),
            step: 16,
        };
        assert_eq!(
            error.to_string(),
            "Invalid grade level or step: GL01 step 16"
        );
    }

    #[test]
    fn test_negative_amount_displays_field_and_amount() {
        let error = EngineError::NegativeAmount {
            field: "allowances.housing".to_string(),
            amount: Decimal::new(-500, 0),
        };
        assert_eq!(
            error.to_string(),
            "Amount for 'allowances.housing' must not be negative: -500"
        );
    }

    #[test]
    fn test_invalid_status_transition_displays_statuses() {
        let error = EngineError::InvalidStatusTransition {
            from: PayrollRunStatus::Draft,
            to: PayrollRunStatus::Paid,
        };
        assert_eq!(
            error.to_string(),
            "Invalid payroll run transition from draft to paid"
        );
    }

    #[test]
    fn test_amount_out_of_range_displays_field() {
        let error = EngineError::AmountOutOfRange {
            field: "additionalPayments.bonus".to_string(),
            amount: Decimal::new(5, 0),
        };
        assert_eq!(
            error.to_string(),
            "Amount for 'additionalPayments.bonus' exceeds the supported maximum: 5"
        );
    }

    #[test]
    fn test_run_not_editable_displays_status() {
        let error = EngineError::RunNotEditable {
            status: PayrollRunStatus::Approved,
        };
        assert_eq!(
            error.to_string(),
            "Payroll run in status approved cannot take new totals"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid_grade() -> EngineResult<()> {
            Err(EngineError::InvalidGradeOrStep {
                grade: "GL99".to_string(),
                step: 1,
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid_grade()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
