//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for computing payroll for
//! one staff member or a batch, and for checking grade/step coordinates.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BatchRequest, ValidateQuery};
pub use response::{ApiError, GradesResponse, ValidateResponse};
pub use state::AppState;
