use crate::auth::JwtConfig;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | HTTP_PORT | 3000 | HTTP API port |
/// | DATABASE_PATH | {WORK_DIR}/dine-server.db | SQLite file |
/// | ENVIRONMENT | development | development / staging / production |
/// | SWEEP_INTERVAL_SECS | 21600 | notification sweep period |
/// | NOTIFICATION_RETENTION_DAYS | 30 | sweep cutoff |
/// | PENDING_BILL_ALERT_SECS | 7200 | overdue pending bill reminder |
/// | PDF_RENDERER_URL | (unset) | external bill PDF renderer |
/// | LOG_DIR | (unset) | daily-rolling log files when set |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/dine HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database and logs
    pub work_dir: String,
    /// HTTP API port
    pub http_port: u16,
    /// SQLite database file
    pub database_path: String,
    /// JWT configuration
    pub jwt: JwtConfig,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Seconds between sweep runs
    pub sweep_interval_secs: u64,
    /// Notifications older than this many days are removed by the sweep
    pub notification_retention_days: i64,
    /// A bill pending longer than this many seconds triggers a reminder
    pub pending_bill_alert_secs: i64,
    /// External bill PDF renderer; export is unavailable when unset
    pub pdf_renderer_url: Option<String>,
    /// Directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_path = std::env::var("DATABASE_PATH")
            .unwrap_or_else(|_| format!("{work_dir}/dine-server.db"));

        Self {
            work_dir,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            database_path,
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sweep_interval_secs: std::env::var("SWEEP_INTERVAL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(6 * 60 * 60),
            notification_retention_days: std::env::var("NOTIFICATION_RETENTION_DAYS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            pending_bill_alert_secs: std::env::var("PENDING_BILL_ALERT_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(2 * 60 * 60),
            pdf_renderer_url: std::env::var("PDF_RENDERER_URL").ok(),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
