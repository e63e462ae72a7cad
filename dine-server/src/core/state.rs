use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::tasks::BackgroundTasks;
use crate::core::Config;
use crate::db::DbService;
use crate::db::models::{StaffCreate, StaffRole};
use crate::db::repository::{bill, staff, table};
use crate::notify::{self, Dispatcher};
use crate::services::PdfService;
use crate::utils::{AppError, AppResult};

/// Server state - shared handles to every service
///
/// Cloned per request; everything inside is either a pool handle or Arc.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// Notification fan-out
    pub dispatcher: Dispatcher,
    /// External PDF renderer
    pub pdf: PdfService,
}

impl ServerState {
    /// Build the full state: open the database, run migrations, seed the
    /// first manager account when the staff table is empty
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        std::fs::create_dir_all(&config.work_dir)
            .map_err(|e| AppError::internal(format!("Cannot create work dir: {e}")))?;

        let db = DbService::new(&config.database_path).await?;
        seed_first_manager(&db.pool).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let dispatcher = Dispatcher::new(db.pool.clone());
        let pdf = PdfService::new(config.pdf_renderer_url.clone());

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            jwt_service,
            dispatcher,
            pdf,
        })
    }

    /// Construct from parts; used by tests with an already-open pool
    pub fn new(config: Config, pool: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let dispatcher = Dispatcher::new(pool.clone());
        let pdf = PdfService::new(config.pdf_renderer_url.clone());

        Self {
            config,
            pool,
            jwt_service,
            dispatcher,
            pdf,
        }
    }

    /// Register the periodic background tasks
    pub fn start_background_tasks(&self) -> BackgroundTasks {
        let mut tasks = BackgroundTasks::new();

        // Sweep: expired notifications and revoked tokens
        {
            let pool = self.pool.clone();
            let interval = Duration::from_secs(self.config.sweep_interval_secs);
            let retention_days = self.config.notification_retention_days;
            let token = tasks.shutdown_token();
            tasks.spawn("notification_sweep", async move {
                let mut ticker = tokio::time::interval(interval);
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            notify::sweep(&pool, retention_days).await;
                        }
                        _ = token.cancelled() => break,
                    }
                }
            });
        }

        // Reminders for bills left pending and tables stuck awaiting payment
        {
            let pool = self.pool.clone();
            let dispatcher = self.dispatcher.clone();
            let alert_secs = self.config.pending_bill_alert_secs;
            let token = tasks.shutdown_token();
            tasks.spawn("overdue_bill_check", async move {
                let mut ticker = tokio::time::interval(Duration::from_secs(15 * 60));
                ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
                loop {
                    tokio::select! {
                        _ = ticker.tick() => {
                            check_overdue_bills(&pool, &dispatcher, alert_secs).await;
                        }
                        _ = token.cancelled() => break,
                    }
                }
            });
        }

        tasks.log_summary();
        tasks
    }
}

/// Seed a manager account on first start so the API is reachable
async fn seed_first_manager(pool: &SqlitePool) -> AppResult<()> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM staff")
        .fetch_one(pool)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;
    if count > 0 {
        return Ok(());
    }

    let password = std::env::var("INITIAL_MANAGER_PASSWORD").unwrap_or_else(|_| {
        tracing::warn!("INITIAL_MANAGER_PASSWORD not set, seeding manager with default password");
        "change-me-now".to_string()
    });

    staff::create(
        pool,
        StaffCreate {
            username: "manager".to_string(),
            password,
            display_name: Some("Manager".to_string()),
            role: StaffRole::Manager,
        },
    )
    .await?;

    tracing::info!("Seeded initial manager account 'manager'");
    Ok(())
}

/// Remind cashiers/managers about bills pending too long and flag tables
/// stuck awaiting payment
async fn check_overdue_bills(pool: &SqlitePool, dispatcher: &Dispatcher, alert_secs: i64) {
    let cutoff = crate::utils::time::now_millis() - alert_secs * 1000;

    match bill::find_overdue_pending(pool, cutoff).await {
        Ok(bills) => {
            for overdue in bills {
                let table_number = match table::find_by_id(pool, overdue.table_id).await {
                    Ok(Some(t)) => t.table_number,
                    _ => continue,
                };
                dispatcher
                    .bill_pending(
                        table_number,
                        overdue.table_id,
                        overdue.id,
                        &overdue.total_amount.to_string(),
                    )
                    .await;
            }
        }
        Err(e) => tracing::warn!("Overdue bill check failed: {e}"),
    }

    match table::find_stale_bill_requested(pool, cutoff).await {
        Ok(tables) => {
            for stale in tables {
                dispatcher
                    .table_alert(
                        stale.table_number,
                        stale.id,
                        format!(
                            "Table {} has been awaiting payment since {}",
                            stale.table_number, stale.updated_at
                        ),
                    )
                    .await;
            }
        }
        Err(e) => tracing::warn!("Stale table check failed: {e}"),
    }
}
