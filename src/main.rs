use clap::Parser;
use polarx_api::{RestApi, ServerConfig, DEFAULT_JSON_LIMIT};
use polarx_core::Alienation;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Polarization measure service
#[derive(Parser, Debug)]
#[command(name = "polarx")]
#[command(about = "Evaluate polarization measures over weighted distributions", long_about = None)]
struct Args {
    /// Address to bind the HTTP API to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// HTTP API port
    #[arg(long, default_value_t = 8000)]
    http_port: u16,

    /// Maximum JSON request body size in bytes
    #[arg(long, default_value_t = DEFAULT_JSON_LIMIT)]
    json_limit: usize,

    /// Log level, overridden by RUST_LOG when set
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting polarx v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Alienation functions: {}",
        Alienation::keys().collect::<Vec<_>>().join(", ")
    );

    let config = ServerConfig {
        host: args.host.clone(),
        port: args.http_port,
        json_limit: args.json_limit,
    };

    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on {}:{}", config.host, config.port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(config).await {
                error!("HTTP server error: {}", e);
            }
        })
    });

    info!("polarx started successfully");
    info!("HTTP API: http://{}:{}/", args.host, args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    Ok(())
}
