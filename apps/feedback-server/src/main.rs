use anyhow::{anyhow, Context, Result};
use axum::{body::Body, http::Request, routing::get, Json, Router};
use clap::{Parser, Subcommand};
use feedback_mgt::api::rest::routes::FeedbackApiDoc;
use feedback_mgt::config::FeedbackMgtConfig;
use feedback_mgt::FeedbackMgt;
use mimalloc::MiMalloc;
use modkit_db::{ConnectOpts, DbHandle};
use runtime::{AppConfig, CliArgs, DatabaseConfig};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use url::Url;
use utoipa::OpenApi;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const REQUEST_ID_HEADER: &str = "x-request-id";
const BODY_LIMIT_BYTES: usize = 16 * 1024 * 1024;

/// Expand a sqlite DSN into an absolute-path DSN using a base directory.
/// - Keeps "sqlite::memory:" as-is.
/// - Normalizes backslashes into forward slashes (important on Windows).
fn absolutize_sqlite_dsn(dsn: &str, base_dir: &Path, create_dirs: bool) -> Result<String> {
    if dsn.eq_ignore_ascii_case("sqlite::memory:") || dsn.eq_ignore_ascii_case("sqlite://:memory:")
    {
        return Ok("sqlite::memory:".to_string());
    }
    let db_path = dsn
        .strip_prefix("sqlite://")
        .ok_or_else(|| anyhow!("DSN must start with sqlite:// (got: {})", dsn))?;

    let (path_str, query) = match db_path.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (db_path, None),
    };

    let mut p = PathBuf::from(path_str);
    if p.as_os_str().is_empty() {
        return Err(anyhow!("Empty SQLite path in DSN"));
    }
    if p.is_relative() {
        p = base_dir.join(p);
    }

    if let Some(dir) = p.parent() {
        if create_dirs {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut out = String::from("sqlite://");
    out.push_str(&p.to_string_lossy().replace('\\', "/"));
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    Ok(out)
}

/// Feedback Server - stores and searches user feedback
#[derive(Parser)]
#[command(name = "feedback-server")]
#[command(about = "Feedback Server - stores and searches user feedback")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print current configuration and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use an in-memory SQLite database
    #[arg(long)]
    mock: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Check configuration
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        config: cli.config.as_ref().map(|p| p.to_string_lossy().to_string()),
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
        mock: cli.mock,
    };

    // Load configuration (normalized home_dir is applied inside)
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.as_ref().cloned().unwrap_or_default();
    runtime::logging::init_logging_from_config(&logging_config, Path::new(&config.server.home_dir));
    tracing::info!("Feedback Server starting");

    if cli.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config, args).await,
        Commands::Check => check_config(config, args),
    }
}

/// Detect DB backend from URL scheme.
fn detect_from_dsn(cfg: &DatabaseConfig) -> Result<&'static str> {
    let raw = cfg.url.trim();
    if raw.is_empty() {
        return Err(anyhow!("Database URL not configured"));
    }

    if raw.starts_with("sqlite:") {
        return Ok("sqlite");
    }
    let url = Url::parse(raw).map_err(|e| {
        anyhow!(
            "Invalid database DSN '{}': {}",
            modkit_db::redact_credentials_in_dsn(raw),
            e
        )
    })?;

    match url.scheme() {
        "postgres" | "postgresql" => Ok("postgres"),
        other => Err(anyhow!("Unsupported database type: {}", other)),
    }
}

/// Final DSN to connect with: `--mock` wins, sqlite paths are made absolute.
fn resolve_dsn(config: &AppConfig, args: &CliArgs) -> Result<String> {
    if args.mock {
        return Ok("sqlite::memory:".to_string());
    }
    let db_config = config
        .database
        .as_ref()
        .ok_or_else(|| anyhow!("No database configuration found (use --mock for in-memory)"))?;
    detect_from_dsn(db_config)?;

    let dsn = db_config.url.trim().to_owned();
    if dsn.starts_with("sqlite://") {
        absolutize_sqlite_dsn(&dsn, Path::new(&config.server.home_dir), true)
    } else {
        Ok(dsn)
    }
}

fn connect_opts(config: &AppConfig) -> ConnectOpts {
    let db_config = config.database.as_ref();
    ConnectOpts {
        max_conns: db_config.and_then(|c| c.max_conns),
        acquire_timeout: Some(Duration::from_secs(5)),
        sqlite_busy_timeout: db_config
            .and_then(|c| c.busy_timeout_ms)
            .map(|ms| Duration::from_millis(u64::from(ms))),
        create_sqlite_dirs: true,
        ..Default::default()
    }
}

/// Assemble the HTTP router.
///
/// Layer order (outermost first): PropagateRequestId -> SetRequestId -> Trace ->
/// Timeout -> BodyLimit.
fn build_router(module: &FeedbackMgt, timeout_sec: u64) -> Router {
    let mut router = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/openapi.json",
            get(|| async { Json(FeedbackApiDoc::openapi()) }),
        );
    router = module.register_rest(router);

    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));
    if timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(timeout_sec)));
    }
    router = router.layer(
        TraceLayer::new_for_http().make_span_with(|req: &Request<Body>| {
            let rid = req
                .headers()
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("n/a");
            tracing::info_span!(
                "http_request",
                method = %req.method(),
                uri = %req.uri().path(),
                version = ?req.version(),
                request_id = %rid,
            )
        }),
    );

    let x_request_id = axum::http::HeaderName::from_static(REQUEST_ID_HEADER);
    router
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(x_request_id))
}

async fn run_server(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Initializing feedback_mgt...");

    let module_cfg: FeedbackMgtConfig = config.module_config(FeedbackMgt::NAME)?;

    let dsn = resolve_dsn(&config, &args)?;
    tracing::info!(
        "Connecting to database: {}",
        modkit_db::redact_credentials_in_dsn(&dsn)
    );
    let db = DbHandle::connect(&dsn, connect_opts(&config)).await?;
    tracing::info!("Connected DB backend: {:?}", db.engine());

    let conn = db.sea();
    FeedbackMgt::migrate(&conn).await?;
    let module = FeedbackMgt::new(conn, &module_cfg);

    let router = build_router(&module, config.server.timeout_sec);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| {
            format!(
                "Invalid bind address '{}:{}'",
                config.server.host, config.server.port
            )
        })?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("HTTP server bound on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(wait_for_shutdown())
        .await
        .map_err(|e| anyhow!(e))?;

    db.close().await;
    tracing::info!("Feedback Server stopped");
    Ok(())
}

async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {},
                    _ = tokio::signal::ctrl_c() => {},
                }
            }
            Err(e) => {
                tracing::warn!("SIGTERM handler unavailable: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("HTTP server shutting down gracefully");
}

fn check_config(config: AppConfig, args: CliArgs) -> Result<()> {
    tracing::info!("Checking configuration...");

    let _: FeedbackMgtConfig = config.module_config(FeedbackMgt::NAME)?;
    if !args.mock {
        if let Some(db_config) = &config.database {
            detect_from_dsn(db_config)?;
        }
    }

    tracing::info!("Configuration is valid");
    println!("Configuration check passed");
    println!("Server config:");
    println!("{}", config.to_yaml()?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_dsn_is_kept() {
        let base = Path::new("/srv");
        assert_eq!(
            absolutize_sqlite_dsn("sqlite://:memory:", base, false).unwrap(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn relative_sqlite_path_joins_base_dir_and_keeps_query() {
        let tmp = tempfile::tempdir().unwrap();
        let dsn =
            absolutize_sqlite_dsn("sqlite://database/feedback.db?mode=rwc", tmp.path(), true)
                .unwrap();
        let expected = format!(
            "sqlite://{}/database/feedback.db?mode=rwc",
            tmp.path().to_string_lossy().replace('\\', "/")
        );
        assert_eq!(dsn, expected);
        assert!(tmp.path().join("database").is_dir());
    }

    #[test]
    fn non_sqlite_dsn_is_rejected_by_absolutize() {
        assert!(absolutize_sqlite_dsn("postgres://h/db", Path::new("/"), false).is_err());
        assert!(absolutize_sqlite_dsn("sqlite://", Path::new("/"), false).is_err());
    }

    #[test]
    fn backend_is_detected_from_scheme() {
        let cfg = |url: &str| DatabaseConfig {
            url: url.to_string(),
            max_conns: None,
            busy_timeout_ms: None,
        };
        assert_eq!(detect_from_dsn(&cfg("sqlite://db.sqlite")).unwrap(), "sqlite");
        assert_eq!(detect_from_dsn(&cfg("sqlite::memory:")).unwrap(), "sqlite");
        assert_eq!(
            detect_from_dsn(&cfg("postgresql://u:p@localhost/db")).unwrap(),
            "postgres"
        );
        assert!(detect_from_dsn(&cfg("mysql://localhost/db")).is_err());
        assert!(detect_from_dsn(&cfg("  ")).is_err());
    }

    #[test]
    fn mock_flag_overrides_configured_database() {
        let mut config = AppConfig::default();
        config.database = Some(DatabaseConfig {
            url: "postgresql://localhost/nonexistent".into(),
            max_conns: None,
            busy_timeout_ms: None,
        });
        let args = CliArgs {
            mock: true,
            ..Default::default()
        };
        assert_eq!(resolve_dsn(&config, &args).unwrap(), "sqlite::memory:");
    }
}
