// crates/seclens-server/src/main.rs
// seclens - LLM-backed security review for code snippets

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use seclens::{
    analysis::Analyzer,
    config::EnvConfig,
    http::create_shared_client,
    llm::OpenAiClient,
    web::{self, state::AppState},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "seclens")]
#[command(about = "LLM-backed security review for code snippets")]
#[command(version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (default)
    Serve {
        /// Address to bind (overrides SECLENS_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides SECLENS_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Skip the simulated analysis delay
        #[arg(long)]
        no_delay: bool,
    },

    /// Validate configuration and exit
    Check,

    /// Analyze one file (or `-` for stdin) and print the result as JSON
    Analyze {
        /// Source file to analyze
        file: PathBuf,
    },
}

/// Wire the adapter to the real completion API
fn build_analyzer(config: &EnvConfig) -> Result<Analyzer> {
    let Some(api_key) = config.api_key.clone() else {
        bail!("OPENAI_API_KEY is not set");
    };
    let client = OpenAiClient::new(api_key, create_shared_client()).with_base_url(&config.base_url);
    Ok(Analyzer::new(Arc::new(client))
        .with_model(&config.model)
        .with_temperature(config.temperature))
}

fn ensure_valid(config: &EnvConfig) -> Result<()> {
    let validation = config.validate();
    for warning in &validation.warnings {
        warn!("{}", warning);
    }
    if !validation.is_valid() {
        bail!("invalid configuration:\n{}", validation.report());
    }
    Ok(())
}

async fn run_web_server(
    mut config: EnvConfig,
    host: Option<String>,
    port: Option<u16>,
    no_delay: bool,
) -> Result<()> {
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if no_delay {
        config.analyze_delay = Duration::ZERO;
    }
    ensure_valid(&config)?;

    let analyzer = build_analyzer(&config)?;
    info!(
        model = %analyzer.model(),
        temperature = analyzer.temperature(),
        delay_ms = config.analyze_delay.as_millis() as u64,
        "Analyzer ready"
    );

    let state = AppState::new(analyzer).with_delay(config.analyze_delay);
    let app = match config.assets_dir {
        Some(ref dir) => {
            info!(assets = %dir.display(), "Serving frontend assets");
            web::create_router_with_assets(state, dir)
        }
        None => web::create_router(state),
    };

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("seclens running on http://{}", addr);
    println!("seclens running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    Ok(())
}

async fn run_check(config: &EnvConfig) -> Result<()> {
    let validation = config.validate();
    println!("{}", validation.report());
    if !validation.is_valid() {
        bail!("configuration is invalid");
    }
    Ok(())
}

async fn run_analyze(config: &EnvConfig, file: PathBuf) -> Result<()> {
    ensure_valid(config)?;

    let code = if file.as_os_str() == "-" {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        buf
    } else {
        tokio::fs::read_to_string(&file).await?
    };

    let analyzer = build_analyzer(config)?;
    let result = analyzer.analyze(&code).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from current directory
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = EnvConfig::load();

    match cli.command {
        None => run_web_server(config, None, None, false).await?,
        Some(Commands::Serve {
            host,
            port,
            no_delay,
        }) => run_web_server(config, host, port, no_delay).await?,
        Some(Commands::Check) => run_check(&config).await?,
        Some(Commands::Analyze { file }) => run_analyze(&config, file).await?,
    }

    Ok(())
}
