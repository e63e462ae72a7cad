//! Permission Definitions
//!
//! Capability sets per staff role. Roles carry flat permission lists rather
//! than inheriting from each other; the manager role holds the `all`
//! permission and short-circuits every check.

use crate::db::models::StaffRole;

/// Waiter: runs the floor — seats orders, edits them, requests bills
pub const WAITER_PERMISSIONS: &[&str] = &[
    "tables:view",
    "tables:request_bill",
    "menu:view",
    "orders:view",
    "orders:manage",
    "orders:progress",
    "bills:view",
];

/// Cashier: settles bills
pub const CASHIER_PERMISSIONS: &[&str] = &[
    "tables:view",
    "menu:view",
    "orders:view",
    "bills:view",
    "bills:manage",
];

/// Kitchen: sees orders and moves them through preparation
pub const KITCHEN_PERMISSIONS: &[&str] = &["menu:view", "orders:view", "orders:progress"];

/// Manager: everything
pub const MANAGER_PERMISSIONS: &[&str] = &["all"];

/// Permissions granted to a role at login
pub fn for_role(role: StaffRole) -> Vec<String> {
    let set = match role {
        StaffRole::Waiter => WAITER_PERMISSIONS,
        StaffRole::Cashier => CASHIER_PERMISSIONS,
        StaffRole::Kitchen => KITCHEN_PERMISSIONS,
        StaffRole::Manager => MANAGER_PERMISSIONS,
    };
    set.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_waiter_cannot_settle_bills() {
        let perms = for_role(StaffRole::Waiter);
        assert!(perms.contains(&"orders:manage".to_string()));
        assert!(!perms.contains(&"bills:manage".to_string()));
    }

    #[test]
    fn test_cashier_cannot_edit_orders() {
        let perms = for_role(StaffRole::Cashier);
        assert!(perms.contains(&"bills:manage".to_string()));
        assert!(!perms.contains(&"orders:manage".to_string()));
        assert!(!perms.contains(&"orders:progress".to_string()));
    }

    #[test]
    fn test_kitchen_progresses_orders_only() {
        let perms = for_role(StaffRole::Kitchen);
        assert!(perms.contains(&"orders:progress".to_string()));
        assert!(!perms.contains(&"tables:view".to_string()));
    }

    #[test]
    fn test_manager_holds_all() {
        assert_eq!(for_role(StaffRole::Manager), vec!["all".to_string()]);
    }
}
