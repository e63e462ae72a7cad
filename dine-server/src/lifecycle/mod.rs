//! Entity lifecycle state machines
//!
//! Tables, orders and bills move through fixed state graphs. Each submodule
//! declares an action enum and a transition table; [`table::next`],
//! [`order::next`] and [`bill::next`] are the only way to compute a new
//! status. Repositories pair these with conditional UPDATEs so a transition
//! that lost a race never lands.

pub mod bill;
pub mod order;
pub mod table;

pub use bill::BillAction;
pub use order::OrderAction;
pub use table::TableAction;

/// Rejected lifecycle move
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("{entity} in status '{from}' does not accept '{action}'")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        action: &'static str,
    },

    #[error("{0}")]
    TableUnavailable(String),

    #[error("{0}")]
    OrderLocked(String),

    #[error("{0}")]
    OrderNotServed(String),

    #[error("{0}")]
    BillAlreadyExists(String),
}
