//! KYC mock daemon — entry point for running the verification server.

use clap::Parser;
use kyc_rpc::{AppState, RpcServer, ServerConfig, ShutdownController};
use kyc_utils::LogFormat;
use kyc_verification::sandbox::sandbox_profiles;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kyc-daemon", about = "Mock identity-verification (OTP + e-KYC) server")]
struct Cli {
    /// Address to bind.
    #[arg(long, env = "KYC_LISTEN_ADDR")]
    listen_addr: Option<IpAddr>,

    /// HTTP port.
    #[arg(long, env = "KYC_PORT")]
    port: Option<u16>,

    /// Log format: "human" or "json".
    #[arg(long, env = "KYC_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "KYC_LOG_LEVEL")]
    log_level: Option<String>,

    /// Clear a challenge code after it has been redeemed once.
    #[arg(long, env = "KYC_CONSUME_ON_SUCCESS")]
    consume_on_success: bool,

    /// Do not echo issued codes in structured-data responses.
    #[arg(long, env = "KYC_HIDE_CODE_HINT")]
    hide_code_hint: bool,

    /// Start with an empty store instead of the sandbox identities.
    #[arg(long, env = "KYC_NO_SANDBOX")]
    no_sandbox: bool,

    /// Disable the permissive CORS layer.
    #[arg(long, env = "KYC_DISABLE_CORS")]
    disable_cors: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "KYC_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the server until SIGINT/SIGTERM.
    Serve,
    /// Print the effective configuration as TOML and exit.
    Config,
}

impl Cli {
    /// File settings (or defaults), overridden by flags and env vars.
    fn resolve_config(&self) -> anyhow::Result<ServerConfig> {
        let base = match &self.config {
            Some(path) => ServerConfig::from_toml_file(path)?,
            None => ServerConfig::default(),
        };

        Ok(ServerConfig {
            listen_addr: self.listen_addr.unwrap_or(base.listen_addr),
            port: self.port.unwrap_or(base.port),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            consume_on_success: self.consume_on_success || base.consume_on_success,
            expose_code_hint: !self.hide_code_hint && base.expose_code_hint,
            seed_sandbox: !self.no_sandbox && base.seed_sandbox,
            enable_cors: !self.disable_cors && base.enable_cors,
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match cli.command {
        Command::Config => {
            print!("{}", config.to_toml_string()?);
        }
        Command::Serve => {
            kyc_utils::init_logging(config.log_format, &config.log_level);
            if let Some(path) = &cli.config {
                tracing::info!("Loaded config from {}", path.display());
            }
            if config.consume_on_success {
                tracing::info!("challenge codes are single-use (consume_on_success)");
            } else {
                tracing::warn!("challenge codes stay redeemable after success");
            }
            if config.seed_sandbox {
                let ids: Vec<String> = sandbox_profiles()
                    .into_iter()
                    .map(|(id, profile)| format!("{id} - {}", profile.name))
                    .collect();
                tracing::info!("Test identifiers: {}", ids.join(", "));
            }

            let state = AppState::from_config(&config)?;
            let server = RpcServer::new(config, state);

            let shutdown = ShutdownController::new();
            let rx = shutdown.subscribe();
            let mut serve = tokio::spawn(async move { server.start(rx).await });

            // The server can stop on its own, e.g. when the bind fails.
            let stopped_early = tokio::select! {
                result = &mut serve => Some(result),
                _ = shutdown.wait_for_signal() => None,
            };
            match stopped_early {
                Some(result) => result??,
                None => serve.await??,
            }

            tracing::info!("KYC daemon exited cleanly");
        }
    }

    Ok(())
}
