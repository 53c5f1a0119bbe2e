use axum::extract::Extension;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Json;
use axum_prometheus::PrometheusMetricLayer;
use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use metrics_exporter_prometheus::PrometheusHandle;
use screening_hub::config::AppConfig;
use screening_hub::error::AppError;
use screening_hub::screening::{
    AnswerSheet, CsvResultRecorder, Gender, InMemorySessionStore, ParticipantProfile,
    ResultSink, ScreeningCatalog, ScreeningReportSummary, ScreeningService, ScreeningSession,
    ScoringEngine, screening_router,
};
use screening_hub::telemetry;
use screening_hub::training::{DatasetTrainer, TrainingConfig, TrainingReport};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Screening Hub",
    about = "Administer behavioral screening instruments and record scored results",
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
    /// Offline screening operations
    Screening {
        #[command(subcommand)]
        command: ScreeningCommand,
    },
    /// Train the dataset classifier against an exported CSV
    Train(TrainArgs),
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
enum ScreeningCommand {
    /// Score a completed answer sheet and append the result row
    Score(ScoreArgs),
    /// List the available instrument presets
    Instruments,
}

#[derive(Args, Debug)]
struct ScoreArgs {
    /// Instrument preset id (see `screening instruments`)
    #[arg(long)]
    instrument: String,
    /// Path to a Question,Answer CSV answer sheet
    #[arg(long)]
    answers: PathBuf,
    /// Participant name
    #[arg(long)]
    name: String,
    /// Participant age
    #[arg(long)]
    age: u8,
    /// Participant gender (female, male, other)
    #[arg(long, value_parser = parse_gender)]
    gender: Gender,
    /// Date for the result row (defaults to today)
    #[arg(long, value_parser = parse_date)]
    recorded_on: Option<NaiveDate>,
    /// Override the configured result file path
    #[arg(long)]
    results: Option<PathBuf>,
    /// Print the full text report after scoring
    #[arg(long)]
    report: bool,
}

#[derive(Args, Debug)]
struct TrainArgs {
    /// Path to the dataset CSV export
    #[arg(long)]
    dataset: PathBuf,
    /// Target column name (defaults to the export's label column)
    #[arg(long)]
    target_column: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrainingRunRequest {
    dataset_csv: String,
    #[serde(default)]
    target_column: Option<String>,
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
        Command::Screening {
            command: ScreeningCommand::Score(args),
        } => run_score(args),
        Command::Screening {
            command: ScreeningCommand::Instruments,
        } => {
            render_instruments();
            Ok(())
        }
        Command::Train(args) => run_train(args),
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn parse_gender(raw: &str) -> Result<Gender, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "female" | "f" => Ok(Gender::Female),
        "male" | "m" => Ok(Gender::Male),
        "other" => Ok(Gender::Other),
        other => Err(format!("'{other}' is not one of female, male, other")),
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

    let repository = Arc::new(InMemorySessionStore::default());
    let recorder = Arc::new(CsvResultRecorder::new(config.results.path.clone()));
    let service = Arc::new(ScreeningService::new(repository, recorder));

    let app = screening_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/training/runs", post(training_run_endpoint))
        .layer(Extension(state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, results = %config.results.path.display(), "screening service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        instrument,
        answers,
        name,
        age,
        gender,
        recorded_on,
        results,
        report,
    } = args;

    let catalog = ScreeningCatalog::standard();
    let preset = catalog
        .find(&instrument)
        .ok_or_else(|| {
            screening_hub::screening::ScreeningServiceError::UnknownInstrument {
                id: instrument.trim().to_string(),
            }
        })?
        .clone();

    let mut session = ScreeningSession::new(preset, ParticipantProfile { name, age, gender });
    let sheet = AnswerSheet::from_path(answers)?;
    sheet.apply(&mut session)?;

    let recorded_on = recorded_on.unwrap_or_else(|| Local::now().date_naive());
    let result = ScoringEngine::new()
        .evaluate(&session, recorded_on)
        .map_err(screening_hub::screening::ScreeningServiceError::from)?;
    let summary = ScreeningReportSummary::new(&result, session.instrument());

    let results_path = match results {
        Some(path) => path,
        None => AppConfig::load()?.results.path,
    };
    let recorder = CsvResultRecorder::new(&results_path);
    let persisted = match recorder.append(&result) {
        Ok(()) => true,
        Err(error) => {
            warn!(%error, path = %results_path.display(), "result row was not persisted");
            false
        }
    };

    render_score_summary(&summary, persisted, &results_path);
    if report {
        println!("\n{}", summary.render_text());
    }

    Ok(())
}

fn run_train(args: TrainArgs) -> Result<(), AppError> {
    let mut config = TrainingConfig::default();
    if let Some(target_column) = args.target_column {
        config.target_column = target_column;
    }

    let report = DatasetTrainer::from_path(args.dataset, &config)?;
    render_training_report(&report);
    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
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

async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn training_run_endpoint(
    Json(payload): Json<TrainingRunRequest>,
) -> Result<Json<TrainingReport>, AppError> {
    let mut config = TrainingConfig::default();
    if let Some(target_column) = payload.target_column {
        config.target_column = target_column;
    }

    let reader = Cursor::new(payload.dataset_csv.into_bytes());
    let report = DatasetTrainer::from_reader(reader, &config)?;
    Ok(Json(report))
}

fn render_instruments() {
    let catalog = ScreeningCatalog::standard();
    println!("Available instruments");
    for instrument in catalog.instruments() {
        println!(
            "- {} | {} | {} items, max score {}",
            instrument.id,
            instrument.name,
            instrument.question_count(),
            instrument.max_score()
        );
        println!("  scale: {}", instrument.scale.labels().join(" / "));
        println!("  {}", instrument.polarity.label());
    }
}

fn render_score_summary(
    summary: &ScreeningReportSummary,
    persisted: bool,
    results_path: &std::path::Path,
) {
    println!("Screening summary");
    println!(
        "Instrument: {} ({})",
        summary.instrument_name, summary.instrument
    );
    println!(
        "Participant: {} (age {}, {})",
        summary.participant_name, summary.age, summary.gender_label
    );
    println!("Total Score: {} / {}", summary.total_score, summary.max_score);
    println!("Score Percentage: {:.2}%", summary.percent);
    println!("Risk Level: {}", summary.risk_label);
    println!("{}", summary.guidance);

    println!("\nSection scores");
    for section in &summary.sections {
        println!("- {}: {} / {}", section.name, section.score, section.max);
    }

    if persisted {
        println!("\nResult appended to {}", results_path.display());
    } else {
        println!("\nWarning: result row was not persisted");
    }
}

fn render_training_report(report: &TrainingReport) {
    println!("Training run complete");
    println!(
        "Rows: {} ({} positive, {} negative)",
        report.rows, report.positives, report.negatives
    );
    println!("Features: {}", report.feature_names.join(", "));
    println!(
        "Holdout accuracy: {:.2} over {} row(s)",
        report.accuracy, report.holdout_rows
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_parser_accepts_iso_dates_only() {
        assert_eq!(
            parse_date("2026-04-02").expect("valid date"),
            NaiveDate::from_ymd_opt(2026, 4, 2).expect("valid date")
        );
        assert!(parse_date("02/04/2026").is_err());
    }

    #[test]
    fn gender_parser_accepts_short_forms() {
        assert_eq!(parse_gender("F").expect("parses"), Gender::Female);
        assert_eq!(parse_gender("male").expect("parses"), Gender::Male);
        assert!(parse_gender("unknown").is_err());
    }

    #[tokio::test]
    async fn training_endpoint_reports_metrics() {
        let mut dataset = String::from("A1,A2,Class/ASD Traits \n");
        for index in 0..20 {
            if index % 2 == 0 {
                dataset.push_str("1,2,YES\n");
            } else {
                dataset.push_str("0,0,NO\n");
            }
        }

        let Json(report) = training_run_endpoint(Json(TrainingRunRequest {
            dataset_csv: dataset,
            target_column: None,
        }))
        .await
        .expect("training succeeds");

        assert_eq!(report.rows, 20);
        assert_eq!(report.positives, 10);
        assert!(report.accuracy > 0.9);
    }

    #[tokio::test]
    async fn training_endpoint_rejects_missing_target_column() {
        let error = training_run_endpoint(Json(TrainingRunRequest {
            dataset_csv: "A1,Label\n1,YES\n0,NO\n1,YES\n0,NO\n1,YES\n".to_string(),
            target_column: None,
        }))
        .await
        .expect_err("column absent");

        assert!(matches!(error, AppError::Training(_)));
    }
}
