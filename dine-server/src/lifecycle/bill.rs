//! Bill state machine
//!
//! not_generated ─generate─▶ pending ─mark_paid─▶ paid
//! pending ─generate─▶ pending (regeneration before payment)
//! not_generated / pending ─cancel─▶ cancelled
//!
//! Paid and cancelled are terminal.

use super::LifecycleError;
use crate::db::models::BillStatus;

/// Action applied to a bill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillAction {
    Generate,
    MarkPaid,
    Cancel,
}

impl BillAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillAction::Generate => "generate",
            BillAction::MarkPaid => "mark_paid",
            BillAction::Cancel => "cancel",
        }
    }
}

const TRANSITIONS: &[(BillStatus, BillAction, BillStatus)] = &[
    (BillStatus::NotGenerated, BillAction::Generate, BillStatus::Pending),
    (BillStatus::Pending, BillAction::Generate, BillStatus::Pending),
    (BillStatus::Pending, BillAction::MarkPaid, BillStatus::Paid),
    (BillStatus::NotGenerated, BillAction::Cancel, BillStatus::Cancelled),
    (BillStatus::Pending, BillAction::Cancel, BillStatus::Cancelled),
];

/// Compute the status after `action`, or reject the move
pub fn next(from: BillStatus, action: BillAction) -> Result<BillStatus, LifecycleError> {
    TRANSITIONS
        .iter()
        .find(|(f, a, _)| *f == from && *a == action)
        .map(|(_, _, to)| *to)
        .ok_or_else(|| LifecycleError::InvalidTransition {
            entity: "bill",
            from: from.to_string(),
            action: action.as_str(),
        })
}
