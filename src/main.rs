use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use globex::cli::ui;
use globex::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for globex::AppCommand {
    fn from(cmd: Commands) -> globex::AppCommand {
        match cmd {
            Commands::Convert {
                amount,
                from,
                to,
                history,
            } => globex::AppCommand::Convert {
                amount,
                from,
                to,
                history,
            },
            Commands::History {
                from,
                to,
                start,
                end,
            } => globex::AppCommand::History {
                from,
                to,
                start,
                end,
            },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert an amount between two currencies using live rates
    Convert {
        /// Amount to convert
        #[arg(short, long, default_value_t = 1.0)]
        amount: f64,

        /// Source currency code (defaults to the configured base currency)
        #[arg(short, long)]
        from: Option<String>,

        /// Target currency code (defaults to the configured target currency)
        #[arg(short, long)]
        to: Option<String>,

        /// Also display rate history for the pair
        #[arg(long)]
        history: bool,
    },
    /// Display exchange rate history for a currency pair
    History {
        /// Source currency code (defaults to the configured base currency)
        #[arg(short, long)]
        from: Option<String>,

        /// Target currency code (defaults to the configured target currency)
        #[arg(short, long)]
        to: Option<String>,

        /// First date of the range, YYYY-MM-DD (defaults to 30 days before end)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Last date of the range, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        end: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(cmd) => globex::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "Application failed");
        eprintln!("{}", ui::error_text(&e.to_string()));
        std::process::exit(1);
    }
    Ok(())
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = globex::core::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  exchange_rate:
    base_url: "https://api.exchangerate-api.com"
  frankfurter:
    base_url: "https://api.frankfurter.app"

base_currency: "USD"
target_currency: "INR"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
