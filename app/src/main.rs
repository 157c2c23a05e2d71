use clap::Parser;
use kit::{AppConfig, Config, Server, ServerConfig};
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use users_api::config::{self, ProbeConfig};
use users_api::{probe, routes};

#[derive(Parser)]
#[command(name = "users-api")]
#[command(about = "In-memory users CRUD service", long_about = None)]
struct Cli {
    /// Address to listen on (overrides SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides SERVER_PORT, default: 8081)
    #[arg(long, short = 'p')]
    port: Option<u16>,

    /// Skip the startup self-probe
    #[arg(long)]
    no_probe: bool,
}

fn init_tracing() {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // .env may set RUST_LOG, so load it before the subscriber
    let environment = Config::init(Path::new("."));
    config::register_all();
    init_tracing();

    let app = Config::get::<AppConfig>().unwrap_or_default();
    let mut server_config = Config::get::<ServerConfig>().unwrap_or_default();
    if let Some(host) = cli.host {
        server_config.host = host;
    }
    if let Some(port) = cli.port {
        server_config.port = port;
    }

    let probe_config = Config::get::<ProbeConfig>().unwrap_or_default();
    if probe_config.enabled && !cli.no_probe {
        probe::run(&probe_config.target(server_config.port)).await;
    }

    tracing::info!(
        "starting {} in {} environment on port {}",
        app.name,
        environment,
        server_config.port
    );
    let server = Server::with_config(routes::router(), server_config);

    tokio::select! {
        result = server.run() => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                tracing::error!("server error: {}", err);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received Ctrl+C, shutting down");
            ExitCode::SUCCESS
        }
    }
}
