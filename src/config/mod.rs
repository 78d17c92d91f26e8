//! Configuration loading and management for the payroll engine.
//!
//! This module loads the salary structure from YAML files: scheme metadata,
//! the grade/step compensation scale, allowance and statutory rates, and the
//! progressive PAYE schedule.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/conjuss").unwrap();
//! println!("Loaded scheme: {}", config.scheme().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    AllowanceRates, CompensationScale, GradeScale, PayeSchedule, PayrollConfig, RatesConfig,
    ScaleConfig, SchemeMetadata, StatutoryRates, TaxBracket,
};
