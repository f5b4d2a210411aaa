//! Run configuration derived from the command line.

use crate::cli::Cli;

/// Everything one alert run needs to know about where its tables live and
/// which side effects are enabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Table holding current metric readings.
    pub metrics_table: String,
    /// Table holding alert rule rows.
    pub rules_table: String,
    /// Table the audit trail is appended to.
    pub audit_table: String,
    /// Subject line prefix.
    pub subject_prefix: String,
    /// When set, print previews and perform no side effects at all.
    pub dry_run: bool,
    /// Whether messages are actually handed to the channel.
    pub send_enabled: bool,
    /// Whether audit rows are written.
    pub audit_enabled: bool,
}

impl RunConfig {
    /// Derives the run configuration from parsed arguments.
    ///
    /// A dry run overrides everything else: no delivery and no audit,
    /// regardless of the other flags.
    #[must_use]
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            metrics_table: cli.metrics_table.clone(),
            rules_table: cli.rules_table.clone(),
            audit_table: cli.audit_table.clone(),
            subject_prefix: cli.subject_prefix.clone(),
            dry_run: cli.dry_run,
            send_enabled: !cli.dry_run && !cli.no_send,
            audit_enabled: !cli.dry_run && !cli.no_audit,
        }
    }
}
