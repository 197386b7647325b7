use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing::{info, warn};

use proposal_builder::adapters::document::DEFAULT_PANDOC;
use proposal_builder::adapters::{app_router, HandlebarsNarrativeRenderer, ProposalAppState};
use proposal_builder::application::handlers::proposal::{
    GenerateProposalCommand, GenerateProposalError, GenerateProposalHandler, OutputFormat,
    ProposalOutput,
};
use proposal_builder::config::{AppConfig, ConfigError, ValidationError};
use proposal_builder::domain::wizard::WizardAnswers;
use proposal_builder::ports::ProposalRenderer;
use proposal_builder::telemetry::{self, TelemetryError};

#[derive(Parser, Debug)]
#[command(
    name = "proposal-builder",
    about = "Generate software development proposals from questionnaire answers",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Render a proposal from a JSON answers file
    Render(RenderArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Questionnaire answers as JSON
    input: PathBuf,
    /// Where to write the rendered proposal
    #[arg(short, long)]
    output: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Pdf)]
    format: Format,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Html,
    Pdf,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Html => OutputFormat::Html,
            Format::Pdf => OutputFormat::Pdf,
        }
    }
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid answers file: {0}")]
    Answers(#[from] serde_json::Error),
    #[error(transparent)]
    Generate(#[from] GenerateProposalError),
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    let config = AppConfig::load()?;
    config.validate()?;
    telemetry::init(&config.server)?;

    match command {
        Command::Serve(args) => run_server(config, args).await,
        Command::Render(args) => run_render(config, args).await,
    }
}

fn build_state(config: &AppConfig) -> ProposalAppState {
    ProposalAppState::new(
        Arc::new(config.catalog()),
        Arc::new(HandlebarsNarrativeRenderer::new(config.templates.dir.clone())),
        Arc::new(config.rendering.renderer()),
    )
}

async fn run_server(mut config: AppConfig, mut args: ServeArgs) -> Result<(), AppError> {
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    config.server.validate()?;

    let renderer = config.rendering.renderer();
    if !renderer.is_available().await {
        warn!(
            pandoc = config.rendering.pandoc_path.as_deref().unwrap_or(DEFAULT_PANDOC),
            "pandoc not found; PDF downloads will fail until it is installed"
        );
    }

    let app = app_router(build_state(&config), &config.server);
    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(
        environment = ?config.server.environment,
        %addr,
        templates = %config.templates.dir.display(),
        "proposal builder ready"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn run_render(config: AppConfig, args: RenderArgs) -> Result<(), AppError> {
    let raw = tokio::fs::read_to_string(&args.input).await?;
    let answers: WizardAnswers = serde_json::from_str(&raw)?;

    let handler = GenerateProposalHandler::new(
        Arc::new(config.catalog()),
        Arc::new(HandlebarsNarrativeRenderer::new(config.templates.dir.clone())),
        Arc::new(config.rendering.renderer()),
    );
    let result = handler
        .handle(GenerateProposalCommand {
            answers,
            format: args.format.into(),
        })
        .await?;

    let bytes = match result.output {
        ProposalOutput::Html(html) => html.into_bytes(),
        ProposalOutput::Pdf(pdf) => pdf,
    };
    tokio::fs::write(&args.output, bytes).await?;

    for note in &result.notes {
        println!("note: {note}");
    }
    println!(
        "proposal {} written to {}",
        result.proposal_id,
        args.output.display()
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
