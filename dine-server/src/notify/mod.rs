//! Notification dispatch
//!
//! Lifecycle events fan out to in-app notifications, one row per active
//! staff member of the recipient roles. Dispatch runs after the triggering
//! transaction commits; a dispatch failure is logged and never rolls back
//! the state change that caused it.

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::db::models::{NotificationType, StaffRole};
use crate::db::repository::{notification, staff};
use crate::db::repository::notification::NotificationInsert;

/// Roles that receive a given notification kind
pub fn recipients(kind: NotificationType) -> &'static [StaffRole] {
    match kind {
        NotificationType::OrderPlaced => &[StaffRole::Kitchen, StaffRole::Manager],
        NotificationType::OrderReady => &[StaffRole::Waiter, StaffRole::Manager],
        NotificationType::BillPending => &[StaffRole::Cashier, StaffRole::Manager],
        NotificationType::PaymentReceived => &[StaffRole::Cashier, StaffRole::Manager],
        NotificationType::TableAlert => &[StaffRole::Manager],
    }
}

/// Event payload handed to the dispatcher
#[derive(Debug, Clone)]
pub struct Event {
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub table_id: Option<i64>,
    pub order_id: Option<i64>,
    pub bill_id: Option<i64>,
}

/// Fans lifecycle events out to staff notifications
#[derive(Clone)]
pub struct Dispatcher {
    pool: SqlitePool,
}

impl Dispatcher {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert one notification per recipient; returns the number delivered
    pub async fn dispatch(&self, event: Event) -> usize {
        let targets = match staff::find_active_by_roles(&self.pool, recipients(event.kind)).await {
            Ok(targets) => targets,
            Err(e) => {
                warn!("Notification dispatch skipped, recipient lookup failed: {e}");
                return 0;
            }
        };

        let mut delivered = 0;
        for target in &targets {
            let insert = NotificationInsert {
                user_id: target.id,
                notification_type: event.kind,
                title: event.title.clone(),
                message: event.message.clone(),
                table_id: event.table_id,
                order_id: event.order_id,
                bill_id: event.bill_id,
            };
            match notification::insert(&self.pool, insert).await {
                Ok(_) => delivered += 1,
                Err(e) => warn!(
                    "Failed to notify user {} ({}): {e}",
                    target.id, target.username
                ),
            }
        }

        info!(
            kind = event.kind.as_str(),
            delivered, "Notifications dispatched"
        );
        delivered
    }

    pub async fn order_placed(&self, table_number: i64, table_id: i64, order_id: i64) -> usize {
        self.dispatch(Event {
            kind: NotificationType::OrderPlaced,
            title: format!("New order for table {table_number}"),
            message: format!("Order #{order_id} was sent to the kitchen from table {table_number}"),
            table_id: Some(table_id),
            order_id: Some(order_id),
            bill_id: None,
        })
        .await
    }

    pub async fn order_ready(&self, table_number: i64, table_id: i64, order_id: i64) -> usize {
        self.dispatch(Event {
            kind: NotificationType::OrderReady,
            title: format!("Order ready for table {table_number}"),
            message: format!("Order #{order_id} for table {table_number} is ready to serve"),
            table_id: Some(table_id),
            order_id: Some(order_id),
            bill_id: None,
        })
        .await
    }

    pub async fn bill_pending(
        &self,
        table_number: i64,
        table_id: i64,
        bill_id: i64,
        total: &str,
    ) -> usize {
        self.dispatch(Event {
            kind: NotificationType::BillPending,
            title: format!("Bill pending for table {table_number}"),
            message: format!("Bill #{bill_id} for table {table_number} awaits payment ({total})"),
            table_id: Some(table_id),
            order_id: None,
            bill_id: Some(bill_id),
        })
        .await
    }

    pub async fn payment_received(
        &self,
        table_number: i64,
        table_id: i64,
        bill_id: i64,
        total: &str,
    ) -> usize {
        self.dispatch(Event {
            kind: NotificationType::PaymentReceived,
            title: format!("Payment received for table {table_number}"),
            message: format!("Bill #{bill_id} for table {table_number} was paid ({total})"),
            table_id: Some(table_id),
            order_id: None,
            bill_id: Some(bill_id),
        })
        .await
    }

    pub async fn table_alert(&self, table_number: i64, table_id: i64, detail: String) -> usize {
        self.dispatch(Event {
            kind: NotificationType::TableAlert,
            title: format!("Attention needed on table {table_number}"),
            message: detail,
            table_id: Some(table_id),
            order_id: None,
            bill_id: None,
        })
        .await
    }
}

/// Remove notifications older than the retention window plus expired token
/// revocations. Runs periodically and is safe to repeat.
pub async fn sweep(pool: &SqlitePool, retention_days: i64) -> (u64, u64) {
    let cutoff = crate::utils::time::now_millis() - retention_days * 24 * 60 * 60 * 1000;

    let notifications = match crate::db::repository::notification::delete_older_than(pool, cutoff).await {
        Ok(n) => n,
        Err(e) => {
            warn!("Notification sweep failed: {e}");
            0
        }
    };

    let tokens = match crate::db::repository::token::delete_expired(pool).await {
        Ok(n) => n,
        Err(e) => {
            warn!("Revoked token sweep failed: {e}");
            0
        }
    };

    if notifications > 0 || tokens > 0 {
        info!(notifications, tokens, "Sweep removed expired rows");
    }
    (notifications, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipient_matrix() {
        assert_eq!(
            recipients(NotificationType::OrderPlaced),
            &[StaffRole::Kitchen, StaffRole::Manager]
        );
        assert_eq!(
            recipients(NotificationType::OrderReady),
            &[StaffRole::Waiter, StaffRole::Manager]
        );
        assert_eq!(
            recipients(NotificationType::BillPending),
            &[StaffRole::Cashier, StaffRole::Manager]
        );
        assert_eq!(
            recipients(NotificationType::PaymentReceived),
            &[StaffRole::Cashier, StaffRole::Manager]
        );
        assert_eq!(
            recipients(NotificationType::TableAlert),
            &[StaffRole::Manager]
        );
    }

    #[test]
    fn test_managers_see_everything() {
        for kind in [
            NotificationType::OrderPlaced,
            NotificationType::OrderReady,
            NotificationType::BillPending,
            NotificationType::PaymentReceived,
            NotificationType::TableAlert,
        ] {
            assert!(recipients(kind).contains(&StaffRole::Manager));
        }
    }
}
