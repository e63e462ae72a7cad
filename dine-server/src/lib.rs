//! Dine Server - dine-in restaurant management backend
//!
//! # Overview
//!
//! Tracks the dine-in flow end to end: tables are seated, orders move
//! through the kitchen, bills are generated and settled, and staff are
//! notified about the events their role cares about.
//!
//! # Module structure
//!
//! ```text
//! dine-server/src/
//! ├── core/        # configuration, state, server, background tasks
//! ├── auth/        # JWT auth, role capability sets, middleware
//! ├── lifecycle/   # table / order / bill state machines
//! ├── billing/     # decimal bill calculator
//! ├── notify/      # notification dispatch and sweep
//! ├── services/    # external collaborators (PDF renderer)
//! ├── api/         # HTTP routes and handlers
//! ├── db/          # pool, models, repositories
//! └── utils/       # errors, logging, time
//! ```

pub mod api;
pub mod auth;
pub mod billing;
pub mod core;
pub mod db;
pub mod lifecycle;
pub mod notify;
pub mod services;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState, build_router};
pub use utils::{ApiResponse, AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - tracing with a dedicated target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env and initialize logging; call once at startup
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
