//! Order state machine
//!
//! placed ─send_to_kitchen─▶ in_kitchen ─mark_served─▶ served
//! placed / in_kitchen ─cancel─▶ cancelled
//!
//! Served and cancelled are terminal. Line items may only change while the
//! order is still `placed`.

use super::LifecycleError;
use crate::db::models::OrderStatus;

/// Action applied to an order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    SendToKitchen,
    MarkServed,
    Cancel,
}

impl OrderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderAction::SendToKitchen => "send_to_kitchen",
            OrderAction::MarkServed => "mark_served",
            OrderAction::Cancel => "cancel",
        }
    }
}

const TRANSITIONS: &[(OrderStatus, OrderAction, OrderStatus)] = &[
    (OrderStatus::Placed, OrderAction::SendToKitchen, OrderStatus::InKitchen),
    (OrderStatus::InKitchen, OrderAction::MarkServed, OrderStatus::Served),
    (OrderStatus::Placed, OrderAction::Cancel, OrderStatus::Cancelled),
    (OrderStatus::InKitchen, OrderAction::Cancel, OrderStatus::Cancelled),
];

/// Compute the status after `action`, or reject the move
pub fn next(from: OrderStatus, action: OrderAction) -> Result<OrderStatus, LifecycleError> {
    TRANSITIONS
        .iter()
        .find(|(f, a, _)| *f == from && *a == action)
        .map(|(_, _, to)| *to)
        .ok_or_else(|| LifecycleError::InvalidTransition {
            entity: "order",
            from: from.to_string(),
            action: action.as_str(),
        })
}

/// True while line items may still be added or removed
pub fn items_mutable(status: OrderStatus) -> bool {
    status == OrderStatus::Placed
}
