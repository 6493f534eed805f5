use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market::cli::{run, Session};
use market::config::{loader, Config, MarketPaths, RuntimeContext, Settings};

#[derive(Parser)]
#[command(
    name = "market",
    author = "Kaylee Beyene",
    version,
    about = "Interactive command-line coin ledger",
    long_about = "market keeps a persisted coin balance. Buy items, complete jobs \
                  and review your transaction history from a small REPL. \
                  Configuration is read from an apprc file layered by mode."
)]
struct Cli {
    /// Configuration mode (section merged over `_default`)
    #[arg(short, long, env = "MARKET_MODE", default_value = "dev")]
    mode: String,

    /// Path to the apprc file (defaults to ./apprc.yml)
    #[arg(long, env = "MARKET_APPRC")]
    apprc: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Start the interactive ledger (default)
    Run,

    /// Show the resolved configuration and paths
    Config,
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "market=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.apprc.clone().unwrap_or_else(loader::apprc_path);
    let runtime = RuntimeContext::detect(&cli.mode)?;

    Config::load_from(&path, &runtime).map_err(|e| {
        let context = if e.is_fatal_config() {
            format!(
                "{} is not a usable configuration for mode `{}`",
                path.display(),
                cli.mode
            )
        } else {
            format!("Failed to load configuration from {}", path.display())
        };
        anyhow::Error::new(e).context(context)
    })
}

fn main() -> Result<()> {
    // Must precede argument parsing so clap sees variables from .env
    let dotenv = dotenvy::dotenv().ok();
    init_tracing();
    if let Some(path) = dotenv {
        tracing::debug!(path = %path.display(), "Loaded environment from .env");
    }

    let cli = Cli::parse();

    let config = load_config(&cli)?;

    let paths = MarketPaths::new()?.with_config(&config)?;
    let settings = Settings::from_config(&config)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            let mut session = Session::open(&paths, settings)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            run(&mut session, stdin.lock(), &mut stdout.lock())?;
        }
        Commands::Config => {
            println!("Market Configuration");
            println!("====================");
            println!("Mode:          {}", config.mode());
            if let Some(source) = config.source() {
                println!("apprc:         {}", source.display());
            }
            println!("Working dir:   {}", paths.base_dir().display());
            println!("State file:    {}", paths.state_file().display());
            println!("Items file:    {}", paths.items_file().display());
            println!("Jobs file:     {}", paths.jobs_file().display());
            println!();
            println!("Settings:");
            println!("  Greeting:      {}", settings.greeting);
            println!("  History limit: {}", settings.history_limit);
            println!();
            println!("Variables:");
            for (name, value) in config.variables() {
                println!("  {} = {}", name, value);
            }
            println!();
            println!("Resolved configuration:");
            print!("{}", serde_yaml::to_string(config.values())?);
        }
    }

    Ok(())
}
