use clap::{Parser, Subcommand};

use extbot::application::errors::BotError;
use extbot::application::BotRuntime;
use extbot::extensions::bundled::bundled_catalog;
use extbot::infrastructure::adapters::ConsoleAdapter;
use extbot::infrastructure::config::Config;

#[derive(Parser)]
#[command(name = "extbot")]
#[command(about = "A chat bot with hot-swappable extensions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (.yaml or .json)
    #[arg(short, long, default_value = "config.yaml")]
    config: String,

    /// Bot token (overrides config)
    #[arg(short, long)]
    token: Option<String>,

    /// User id the console speaks as (defaults to the owner)
    #[arg(short, long)]
    user: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the bot
    Run,
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run => run_bot(&cli.config, cli.token, cli.user),
        Commands::Version => {
            println!("extbot v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig => init_config(),
    };

    if let Err(e) = result {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run_bot(config_path: &str, token_override: Option<String>, user: Option<String>) -> Result<(), BotError> {
    // Load config
    let mut config = if std::path::Path::new(config_path).exists() {
        Config::load(config_path)?.with_env()
    } else {
        tracing::warn!("Config {} not found, using environment", config_path);
        Config::load_env()
    };

    if let Some(token) = token_override {
        config.token = token;
    }
    config.validate()?;

    tracing::info!(
        "Starting extbot with prefix {:?} and {} configured extensions",
        config.command_prefix,
        config.extensions.len()
    );

    let user = user.unwrap_or_else(|| config.owner_id.clone());

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| BotError::Internal(format!("Failed to start tokio runtime: {}", e)))?;

    rt.block_on(async {
        let adapter = ConsoleAdapter::new(user);
        let mut runtime = BotRuntime::new(adapter, config.into_shared(), bundled_catalog())?;
        runtime.run().await
    })
}

fn init_config() -> Result<(), BotError> {
    let config = Config {
        owner_id: "0".to_string(),
        ..Config::default()
    };
    println!("{}", config.to_yaml()?);
    println!("\nSave this to config.yaml and set owner_id.");
    Ok(())
}
