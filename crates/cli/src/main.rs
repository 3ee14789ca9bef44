use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use change_report_core::{
    load_config, validate_config, JiraClient, MessagingApi, ReportPipeline, ReportWriter,
    SanitizedConfig, SlackClient, TextRenderer, TicketingApi,
};

/// Default config file, overridable by flag or `CHANGE_REPORT_CONFIG`.
const DEFAULT_CONFIG: &str = "config.toml";

/// Build the weekly change-request cost impact report.
#[derive(Debug, Parser)]
#[command(name = "change-report", version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, env = "CHANGE_REPORT_CONFIG", default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Write the report here instead of `report.output_path`
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override `slack.lookback_days`
    #[arg(long)]
    lookback_days: Option<u32>,

    /// Print a text preview to stdout instead of writing the report file
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    info!("Loading configuration from {:?}", cli.config);
    let mut config = load_config(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    if let Some(output) = cli.output {
        config.report.output_path = output;
    }
    if let Some(days) = cli.lookback_days {
        config.slack.lookback_days = days;
    }

    validate_config(&config).context("Configuration validation failed")?;

    info!(
        config = ?SanitizedConfig::from(&config),
        "Configuration loaded successfully"
    );

    let messaging: Arc<dyn MessagingApi> =
        Arc::new(SlackClient::new(&config.slack).context("Failed to create Slack client")?);
    let ticketing: Arc<dyn TicketingApi> =
        Arc::new(JiraClient::new(&config.jira).context("Failed to create Jira client")?);

    let pipeline = ReportPipeline::new(messaging, ticketing, &config);
    let now = Utc::now();

    let report = if cli.dry_run {
        let report = pipeline
            .build(now)
            .await
            .context("Failed to build report")?;
        print!("{}", TextRenderer::new().render_string(&report.document));
        report
    } else {
        let writer = ReportWriter::for_format(config.report.format);
        pipeline
            .run(now, &writer, &config.report.output_path)
            .await
            .context("Failed to write report")?
    };

    if let Some(reason) = &report.collection_error {
        warn!(reason = %reason, "Channel history was incomplete");
    }
    for skipped in &report.skipped {
        warn!(key = %skipped.key, reason = %skipped.reason, "Ticket left out of report");
    }

    info!(
        messages = report.messages_scanned,
        tickets = report.keys.len(),
        records = report.record_count(),
        skipped = report.skipped.len(),
        "Report complete"
    );
    if !cli.dry_run {
        info!("Report saved as: {}", config.report.output_path.display());
    }

    Ok(())
}
