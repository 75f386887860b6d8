//! weeknote - annual performance reports from HackMD weekly notes.
//!
//! Reads notes from HackMD, asks the selected LLM provider to write the
//! report, saves it under the reports directory and uploads a copy.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weeknote_core::HackMdClient;
use weeknote_llm::create_backend;
use weeknote_report::{
    Cli, ReportConfig, ReportError, ReportOutcome, RunSummary, Settings, pipeline,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env is fine; real environment variables always win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let settings = match Settings::load(cli.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) => return RunSummary::failed(&e).emit(),
    };

    init_logging(&cli, &settings);

    let summary = match generate(&cli, &settings).await {
        Ok(outcome) => RunSummary::completed(&outcome),
        Err(e) => {
            error!("{e:#}");
            RunSummary::failed(format!("{e:#}"))
        }
    };
    summary.emit()
}

fn init_logging(cli: &Cli, settings: &Settings) {
    let log_level = if cli.verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{log_level},hyper=warn,reqwest=warn").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn generate(cli: &Cli, settings: &Settings) -> Result<ReportOutcome> {
    let config = ReportConfig::resolve(cli, settings, |key| std::env::var(key).ok())?;

    info!("Starting report generation...");
    info!(
        "Date range: {} to {}",
        config.run.criteria.start_date, config.run.criteria.end_date
    );
    info!("Folder: {}", config.run.criteria.folder_name);
    info!("LLM Provider: {}", config.provider.kind);

    let notes = HackMdClient::with_timeout(
        &config.hackmd.api_token,
        &config.hackmd.api_url,
        config.request_timeout,
    )
    .context("failed to build HackMD client")?
    .with_share_base_url(&config.hackmd.share_base_url);
    let llm = create_backend(&config.provider).map_err(ReportError::from)?;
    info!("Clients initialized");

    let outcome = pipeline::run(&config.run, &notes, llm.as_ref()).await?;
    Ok(outcome)
}
