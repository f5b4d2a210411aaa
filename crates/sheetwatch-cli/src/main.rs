//! Sheetwatch binary entrypoint.

use std::io;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use sheetwatch_audit::{AuditSink, NoopAuditSink, TableAuditSink};
use sheetwatch_cli::cli::Cli;
use sheetwatch_cli::config::RunConfig;
use sheetwatch_cli::error::CliError;
use sheetwatch_cli::runner::{RunReport, run_alerts};
use sheetwatch_notify::{LogChannel, MessageChannel, SmtpChannel, SmtpSettings};
use sheetwatch_tables::JsonTableSource;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    match run(&cli) {
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunReport, CliError> {
    let config = RunConfig::from_cli(cli);
    let source = JsonTableSource::new(cli.data_dir.as_str());

    let channel: Box<dyn MessageChannel> = if config.send_enabled {
        Box::new(SmtpChannel::new(smtp_settings(cli)?)?)
    } else {
        Box::new(LogChannel::default())
    };

    let table_sink;
    let noop_sink = NoopAuditSink::new();
    let sink: &dyn AuditSink = if config.audit_enabled {
        table_sink = TableAuditSink::new(&source, config.audit_table.clone());
        &table_sink
    } else {
        &noop_sink
    };

    let mut stdout = io::stdout().lock();
    run_alerts(&mut stdout, &source, channel.as_ref(), sink, &config)
}

fn smtp_settings(cli: &Cli) -> Result<SmtpSettings, CliError> {
    let username = cli.smtp_user.clone().ok_or_else(|| CliError::Config {
        reason: "SMTP user is required to send (set SHEETWATCH_SMTP_USER or pass --no-send)"
            .to_string(),
    })?;
    let password = cli.smtp_password.clone().ok_or_else(|| CliError::Config {
        reason:
            "SMTP password is required to send (set SHEETWATCH_SMTP_PASSWORD or pass --no-send)"
                .to_string(),
    })?;
    Ok(SmtpSettings {
        host: cli.smtp_host.clone(),
        port: cli.smtp_port,
        username,
        password,
        sender_name: cli.sender_name.clone(),
    })
}

fn print_summary(report: &RunReport) {
    if report.is_quiet() {
        return;
    }
    println!(
        "Run {}: {} trigger(s), {} recipient(s), {} sent, {} audited ({} send / {} audit failures)",
        report.run_id,
        report.triggered,
        report.recipients,
        report.sent,
        report.audited,
        report.send_failures,
        report.audit_failures,
    );
}
