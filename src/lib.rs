//! Payroll Engine for grade/step civil-service pay scales
//!
//! This crate computes a staff member's monthly payroll from a grade level
//! and step on the CONJUSS compensation scale: basic salary, six allowances,
//! progressive PAYE income tax, pension and NHF contributions, optional
//! deductions and net pay. Each calculation carries an audit trace of the
//! rules applied.
//!
//! Pay-scheme data (salary table, rates and tax brackets) is loaded from
//! YAML through [`config::ConfigLoader`], or taken from the copy built into
//! the crate with [`config::ConfigLoader::builtin`].

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
