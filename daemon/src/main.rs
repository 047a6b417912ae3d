//! KYC daemon — entry point for running the verification service.

use anyhow::Context;
use clap::Parser;
use kyc_engine::{init_logging, KycConfig, LogFormat, ShutdownController, VerificationOrchestrator};
use kyc_rpc::{AppState, RpcServer};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kyc-daemon", about = "KYC identity verification service")]
struct Cli {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "KYC_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP API port.
    #[arg(long, env = "KYC_PORT")]
    port: Option<u16>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KYC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "KYC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the HTTP service until SIGINT/SIGTERM.
    Serve,
    /// Load and validate the configuration, then print it.
    CheckConfig,
}

impl Cli {
    /// File (or default) configuration with CLI overrides applied.
    fn resolve_config(&self) -> anyhow::Result<KycConfig> {
        let mut config = match &self.config {
            Some(path) => KycConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => KycConfig::default(),
        };

        if let Some(port) = self.port {
            config.rpc_port = port;
        }
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command {
        Command::CheckConfig => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Serve => {
            init_logging(config.log_format, &config.log_level)
                .context("installing the log subscriber")?;
            serve(config).await?;
        }
    }

    Ok(())
}

async fn serve(config: KycConfig) -> anyhow::Result<()> {
    tracing::info!(
        port = config.rpc_port,
        rate_limit = config.rate_limit.limit,
        window_ms = config.rate_limit.window_ms,
        retry_attempts = config.retry.attempts,
        confidence_threshold = config.decision.confidence_threshold,
        metrics = config.enable_metrics,
        "starting KYC service"
    );

    let orchestrator =
        VerificationOrchestrator::from_config(&config).context("wiring provider transports")?;
    let state = Arc::new(AppState {
        orchestrator: Arc::new(orchestrator),
        metrics_enabled: config.enable_metrics,
    });

    let shutdown = Arc::new(ShutdownController::new());
    let signals = shutdown.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    RpcServer::new(config.rpc_port, state)
        .start(shutdown.notified())
        .await?;

    tracing::info!("KYC daemon exited cleanly");
    Ok(())
}
