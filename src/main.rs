use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use scholarship_portal::config::AppConfig;
use scholarship_portal::error::AppError;
use scholarship_portal::telemetry;
use scholarship_portal::workflows::scholarship::applications::infra::{
    LoggingNotifier, MemoryDocumentStore, MemoryRepository,
};
use scholarship_portal::workflows::scholarship::applications::{
    application_router, validate_submission, ApplicationSubmission, DocumentPolicy,
    ScholarshipApplicationService,
};
use serde_json::json;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Scholarship Portal",
    about = "Run the scholarship application workflow service from the command line",
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
    /// Work with application submissions offline
    Submission {
        #[command(subcommand)]
        command: SubmissionCommand,
    },
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

#[derive(Subcommand, Debug)]
enum SubmissionCommand {
    /// Run the validation gate over a submission JSON file and print the errors
    Check(CheckArgs),
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// Path to a JSON-encoded application submission
    #[arg(long)]
    file: PathBuf,
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

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Submission {
            command: SubmissionCommand::Check(args),
        } => run_submission_check(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let service = Arc::new(ScholarshipApplicationService::new(
        Arc::new(MemoryRepository::default()),
        Arc::new(LoggingNotifier::new(config.notification.from_address.clone())),
        Arc::new(MemoryDocumentStore),
        DocumentPolicy::default(),
    ));

    let core = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state);

    let app = core
        .merge(application_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scholarship portal service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_submission_check(args: CheckArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.file)?;
    let submission: ApplicationSubmission = serde_json::from_str(&raw)?;

    let report = validate_submission(&submission, &DocumentPolicy::default());
    if report.is_empty() {
        println!("All sections valid");
        return Ok(());
    }

    for (section, errors) in &report.sections {
        println!("Section {}", section.label());
        for (field, message) in errors {
            println!("- {field}: {message}");
        }
    }

    std::process::exit(1);
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
