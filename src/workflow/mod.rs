//! Workflow module
//!
//! Step ordering for the lead tracker and status pipelines for orders and
//! design projects.

pub mod progress;
pub mod transitions;

pub use progress::{resolve_progress, LeadProgress};
pub use transitions::{
    check_design_transition, check_order_transition, design_next_statuses, order_next_statuses,
};
