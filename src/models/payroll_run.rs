//! Payroll run model and its approval lifecycle.
//!
//! A run collects the calculations for one pay period and moves through
//! `draft → pending_review → approved → finalized → paid`. A run under review
//! can be sent back to draft, and any run that has not been finalized can be
//! cancelled.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::calculation::PayrollBatchResult;
use crate::error::{EngineError, EngineResult};

/// Where a payroll run is in its approval lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollRunStatus {
    /// Being prepared; calculations may still change.
    Draft,
    /// Submitted and awaiting review.
    PendingReview,
    /// Reviewed and approved for payment.
    Approved,
    /// Locked; no further changes.
    Finalized,
    /// Transfers have been made.
    Paid,
    /// Abandoned before finalization.
    Cancelled,
}

impl PayrollRunStatus {
    /// Returns true if a run in this status may move to `next`.
    pub fn can_transition_to(self, next: PayrollRunStatus) -> bool {
        use PayrollRunStatus::*;
        matches!(
            (self, next),
            (Draft, PendingReview)
                | (PendingReview, Draft)
                | (PendingReview, Approved)
                | (Approved, Finalized)
                | (Finalized, Paid)
                | (Draft, Cancelled)
                | (PendingReview, Cancelled)
                | (Approved, Cancelled)
        )
    }

    fn as_str(self) -> &'static str {
        match self {
            PayrollRunStatus::Draft => "draft",
            PayrollRunStatus::PendingReview => "pending_review",
            PayrollRunStatus::Approved => "approved",
            PayrollRunStatus::Finalized => "finalized",
            PayrollRunStatus::Paid => "paid",
            PayrollRunStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for PayrollRunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payroll run for one pay period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Pay period label (e.g., "January 2025").
    pub pay_period: String,
    /// Lifecycle status.
    pub status: PayrollRunStatus,
    /// Total net pay across the run.
    pub total_amount: Decimal,
    /// Number of staff paid in the run.
    pub staff_count: usize,
    /// Who created the run.
    pub created_by: String,
    /// Who submitted the run for review.
    pub reviewed_by: Option<String>,
    /// Who approved the run.
    pub approved_by: Option<String>,
    /// Who finalized the run.
    pub finalized_by: Option<String>,
    /// When the run was submitted for review.
    pub reviewed_at: Option<DateTime<Utc>>,
    /// When the run was approved.
    pub approved_at: Option<DateTime<Utc>>,
    /// When the run was finalized.
    pub finalized_at: Option<DateTime<Utc>>,
    /// When the run was created.
    pub created_at: DateTime<Utc>,
    /// When the run last changed.
    pub updated_at: DateTime<Utc>,
}

impl PayrollRun {
    /// Creates an empty draft run.
    pub fn new(
        title: impl Into<String>,
        pay_period: impl Into<String>,
        created_by: impl Into<String>,
        at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            pay_period: pay_period.into(),
            status: PayrollRunStatus::Draft,
            total_amount: Decimal::ZERO,
            staff_count: 0,
            created_by: created_by.into(),
            reviewed_by: None,
            approved_by: None,
            finalized_by: None,
            reviewed_at: None,
            approved_at: None,
            finalized_at: None,
            created_at: at,
            updated_at: at,
        }
    }

    /// Records a batch's totals on the run.
    ///
    /// Only a draft can take new totals; the amount is the batch's net pay.
    pub fn apply_batch(&mut self, batch: &PayrollBatchResult, at: DateTime<Utc>) -> EngineResult<()> {
        if self.status != PayrollRunStatus::Draft {
            return Err(EngineError::RunNotEditable {
                status: self.status,
            });
        }
        self.total_amount = batch.totals.total_net_pay;
        self.staff_count = batch.totals.staff_count;
        self.updated_at = at;
        Ok(())
    }

    /// Moves the run to `next`, stamping the actor where the lifecycle records one.
    pub fn transition(
        &mut self,
        next: PayrollRunStatus,
        actor: &str,
        at: DateTime<Utc>,
    ) -> EngineResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(EngineError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }

        match next {
            PayrollRunStatus::PendingReview => {
                self.reviewed_by = Some(actor.to_string());
                self.reviewed_at = Some(at);
            }
            PayrollRunStatus::Approved => {
                self.approved_by = Some(actor.to_string());
                self.approved_at = Some(at);
            }
            PayrollRunStatus::Finalized => {
                self.finalized_by = Some(actor.to_string());
                self.finalized_at = Some(at);
            }
            // Sent back from review: the next submission starts fresh.
            PayrollRunStatus::Draft => {
                self.reviewed_by = None;
                self.reviewed_at = None;
            }
            PayrollRunStatus::Paid | PayrollRunStatus::Cancelled => {}
        }

        self.status = next;
        self.updated_at = at;
        Ok(())
    }
}
