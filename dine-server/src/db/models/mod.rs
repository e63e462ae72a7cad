//! Database models
//!
//! Row structs and request payloads. Status enums persist as snake_case TEXT;
//! decimal columns decode through [`crate::db::money::Money`].

pub mod bill;
pub mod menu_item;
pub mod notification;
pub mod order;
pub mod staff;
pub mod table;

pub use bill::{Bill, BillCreate, BillGenerate, BillStatus};
pub use menu_item::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate};
pub use notification::{Notification, NotificationType};
pub use order::{Order, OrderAddItem, OrderCreate, OrderDetail, OrderItem, OrderStatus};
pub use staff::{Staff, StaffCreate, StaffRole};
pub use table::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableDashboardEntry, TableStatus,
};
