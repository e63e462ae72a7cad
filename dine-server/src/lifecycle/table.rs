//! Table state machine
//!
//! ```text
//! available ──seat_order──▶ occupied ──request_bill──▶ bill_requested
//!     ▲                        │                            │
//!     │◀──────release_order────┘                            │
//!     │◀─────────────settle_bill────────────────────────────┘
//!     │◀──────settle_bill──────┘ (direct settle, no request)
//! available ◀──reopen── closed ◀──close── available
//! ```

use super::LifecycleError;
use crate::db::models::TableStatus;

/// Action applied to a table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    SeatOrder,
    RequestBill,
    SettleBill,
    ReleaseOrder,
    Close,
    Reopen,
}

impl TableAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableAction::SeatOrder => "seat_order",
            TableAction::RequestBill => "request_bill",
            TableAction::SettleBill => "settle_bill",
            TableAction::ReleaseOrder => "release_order",
            TableAction::Close => "close",
            TableAction::Reopen => "reopen",
        }
    }
}

const TRANSITIONS: &[(TableStatus, TableAction, TableStatus)] = &[
    (TableStatus::Available, TableAction::SeatOrder, TableStatus::Occupied),
    (TableStatus::Occupied, TableAction::RequestBill, TableStatus::BillRequested),
    (TableStatus::BillRequested, TableAction::SettleBill, TableStatus::Available),
    (TableStatus::Occupied, TableAction::SettleBill, TableStatus::Available),
    (TableStatus::Occupied, TableAction::ReleaseOrder, TableStatus::Available),
    (TableStatus::Available, TableAction::Close, TableStatus::Closed),
    (TableStatus::Closed, TableAction::Reopen, TableStatus::Available),
];

/// Compute the status after `action`, or reject the move
pub fn next(from: TableStatus, action: TableAction) -> Result<TableStatus, LifecycleError> {
    TRANSITIONS
        .iter()
        .find(|(f, a, _)| *f == from && *a == action)
        .map(|(_, _, to)| *to)
        .ok_or_else(|| LifecycleError::InvalidTransition {
            entity: "table",
            from: from.to_string(),
            action: action.as_str(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path() {
        let s = next(TableStatus::Available, TableAction::SeatOrder).unwrap();
        assert_eq!(s, TableStatus::Occupied);
        let s = next(s, TableAction::RequestBill).unwrap();
        assert_eq!(s, TableStatus::BillRequested);
        let s = next(s, TableAction::SettleBill).unwrap();
        assert_eq!(s, TableStatus::Available);
    }

    #[test]
    fn test_settle_without_request() {
        assert_eq!(
            next(TableStatus::Occupied, TableAction::SettleBill).unwrap(),
            TableStatus::Available
        );
    }

    #[test]
    fn test_closed_only_from_available() {
        assert!(next(TableStatus::Occupied, TableAction::Close).is_err());
        assert!(next(TableStatus::BillRequested, TableAction::Close).is_err());
        assert_eq!(
            next(TableStatus::Available, TableAction::Close).unwrap(),
            TableStatus::Closed
        );
        assert_eq!(
            next(TableStatus::Closed, TableAction::Reopen).unwrap(),
            TableStatus::Available
        );
    }

    #[test]
    fn test_closed_table_cannot_seat() {
        let err = next(TableStatus::Closed, TableAction::SeatOrder).unwrap_err();
        assert!(matches!(err, LifecycleError::InvalidTransition { entity: "table", .. }));
    }

}
