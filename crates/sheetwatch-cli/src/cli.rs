//! Command-line argument parsing with clap.

use clap::Parser;

/// Sheetwatch - threshold alerts over tabular metric data.
#[derive(Parser, Debug, Clone)]
#[command(name = "sheetwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the table store (one JSON file per table).
    #[arg(long, env = "SHEETWATCH_DATA_DIR", default_value = "data")]
    pub data_dir: String,

    /// Table holding the current metric readings.
    #[arg(long, default_value = "Latest")]
    pub metrics_table: String,

    /// Table holding the alert rule rows.
    #[arg(long, default_value = "Config")]
    pub rules_table: String,

    /// Table the audit trail is appended to.
    #[arg(long, default_value = "Logs")]
    pub audit_table: String,

    /// Prefix for message subject lines.
    #[arg(long, default_value = "[Metric Alert]")]
    pub subject_prefix: String,

    /// Evaluate and print what would be sent; deliver nothing, audit nothing.
    #[arg(long)]
    pub dry_run: bool,

    /// Skip message delivery but still write the audit trail.
    #[arg(long)]
    pub no_send: bool,

    /// Deliver messages but skip the audit trail.
    #[arg(long)]
    pub no_audit: bool,

    /// Verbose logging (debug level).
    #[arg(short, long)]
    pub verbose: bool,

    /// SMTP server hostname.
    #[arg(long, env = "SHEETWATCH_SMTP_HOST", default_value = "smtp.gmail.com")]
    pub smtp_host: String,

    /// SMTP server port.
    #[arg(long, env = "SHEETWATCH_SMTP_PORT", default_value_t = 587)]
    pub smtp_port: u16,

    /// SMTP login user; also the sender address.
    #[arg(long, env = "SHEETWATCH_SMTP_USER")]
    pub smtp_user: Option<String>,

    /// SMTP login password (app password).
    #[arg(long, env = "SHEETWATCH_SMTP_PASSWORD", hide_env_values = true)]
    pub smtp_password: Option<String>,

    /// Display name for the From header.
    #[arg(long, env = "SHEETWATCH_SENDER_NAME", default_value = "Sheetwatch Alerts")]
    pub sender_name: String,
}
