//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health checks (public)
//! - [`auth`] - login / logout / me
//! - [`tables`] - dining table management and lifecycle actions
//! - [`menu_items`] - menu management
//! - [`orders`] - order lifecycle and line items
//! - [`bills`] - billing, settlement, PDF export
//! - [`notifications`] - per-user notifications
//! - [`reports`] - daily sales reporting
//! - [`staff`] - account administration

pub mod auth;
pub mod bills;
pub mod health;
pub mod menu_items;
pub mod notifications;
pub mod orders;
pub mod reports;
pub mod staff;
pub mod tables;
