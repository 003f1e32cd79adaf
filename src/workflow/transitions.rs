//! Status transition tables
//!
//! Order and design statuses move through fixed pipelines. Each table lists
//! the statuses reachable from a given one; anything else is rejected as an
//! invalid transition. The quality gate on `ready_to_ship` is enforced
//! separately by the order service, which can see the status log.

use crate::models::design::DesignStatus;
use crate::models::order::OrderStatus;
use crate::utils::errors::{Result, ThreadlineError};

/// Statuses an order may move to from `from`
pub fn order_next_statuses(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[OrderStatus::InProduction, OrderStatus::Cancelled],
        OrderStatus::InProduction => &[OrderStatus::QualityCheck, OrderStatus::Cancelled],
        OrderStatus::QualityCheck => &[
            OrderStatus::InProduction,
            OrderStatus::ReadyToShip,
            OrderStatus::Cancelled,
        ],
        OrderStatus::ReadyToShip => &[OrderStatus::Shipped, OrderStatus::Cancelled],
        OrderStatus::Shipped => &[],
        OrderStatus::Cancelled => &[],
    }
}

/// Validate an order status transition
pub fn check_order_transition(from: OrderStatus, to: OrderStatus) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if order_next_statuses(from).contains(&to) {
        return Ok(());
    }
    Err(ThreadlineError::InvalidStateTransition {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    })
}

/// Statuses a design project may move to from `from`
pub fn design_next_statuses(from: DesignStatus) -> &'static [DesignStatus] {
    match from {
        DesignStatus::Submitted => &[DesignStatus::InDesign],
        DesignStatus::InDesign => &[DesignStatus::Review],
        DesignStatus::Review => &[DesignStatus::InDesign, DesignStatus::Approved],
        DesignStatus::Approved => &[DesignStatus::InDesign],
    }
}

/// Validate a design status transition
pub fn check_design_transition(from: DesignStatus, to: DesignStatus) -> Result<()> {
    if from == to {
        return Ok(());
    }
    if design_next_statuses(from).contains(&to) {
        return Ok(());
    }
    Err(ThreadlineError::InvalidStateTransition {
        from: from.as_str().to_string(),
        to: to.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_pipeline_moves_forward() {
        assert!(check_order_transition(OrderStatus::Pending, OrderStatus::InProduction).is_ok());
        assert!(check_order_transition(OrderStatus::InProduction, OrderStatus::QualityCheck).is_ok());
        assert!(check_order_transition(OrderStatus::QualityCheck, OrderStatus::ReadyToShip).is_ok());
        assert!(check_order_transition(OrderStatus::ReadyToShip, OrderStatus::Shipped).is_ok());
    }

    #[test]
    fn order_cannot_skip_production() {
        let err = check_order_transition(OrderStatus::Pending, OrderStatus::ReadyToShip).unwrap_err();
        assert!(matches!(err, ThreadlineError::InvalidStateTransition { .. }));
    }

    #[test]
    fn quality_check_can_send_back() {
        assert!(check_order_transition(OrderStatus::QualityCheck, OrderStatus::InProduction).is_ok());
    }

    #[test]
    fn shipped_is_terminal() {
        assert!(check_order_transition(OrderStatus::Shipped, OrderStatus::Cancelled).is_err());
    }

    #[test]
    fn same_status_is_a_no_op() {
        assert!(check_order_transition(OrderStatus::Pending, OrderStatus::Pending).is_ok());
    }

    #[test]
    fn design_review_loops_back() {
        assert!(check_design_transition(DesignStatus::Review, DesignStatus::InDesign).is_ok());
        assert!(check_design_transition(DesignStatus::Review, DesignStatus::Approved).is_ok());
        assert!(check_design_transition(DesignStatus::Submitted, DesignStatus::Approved).is_err());
    }
}
