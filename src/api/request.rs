//! Request types for the payroll engine API.
//!
//! `POST /payroll/calculate` takes a [`PayrollInput`](crate::models::PayrollInput)
//! body directly; the types here cover the other endpoints.

use serde::{Deserialize, Serialize};

use crate::calculation::BatchEntry;

/// Request body for the `/payroll/batch` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchRequest {
    /// The staff entries to compute.
    pub entries: Vec<BatchEntry>,
}

/// Query string for the `/grades/validate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateQuery {
    /// The grade code to check.
    pub grade: String,
    /// The step to check.
    pub step: u32,
}
