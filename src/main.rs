use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fsniper::core::log::init_logging;

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

impl From<Commands> for fsniper::AppCommand {
    fn from(cmd: Commands) -> fsniper::AppCommand {
        match cmd {
            Commands::Quote { from } => fsniper::AppCommand::Quote { from },
            Commands::Afford {
                price,
                installments,
            } => fsniper::AppCommand::Afford {
                price,
                installments,
            },
            Commands::Import { price, currency } => {
                fsniper::AppCommand::Import { price, currency }
            }
            Commands::Recommend { item } => fsniper::AppCommand::Recommend { item },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Show the current exchange rate for a foreign currency
    Quote {
        /// Foreign currency code
        #[arg(default_value = "USD")]
        from: String,
    },
    /// Check whether a price fits the configured budget
    Afford {
        /// Target price in the local currency
        price: f64,

        /// Number of installments, when paying in parts
        #[arg(short, long)]
        installments: Option<u32>,
    },
    /// Compute the landed cost of a foreign-priced product
    Import {
        /// Price in the foreign currency
        price: f64,

        /// Currency the price is denominated in
        #[arg(default_value = "USD")]
        currency: String,
    },
    /// Rank a project item's offers and pick the smart choice
    Recommend {
        /// Item name; evaluates every configured item when omitted
        item: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fsniper::cli::setup::setup(),
        Some(cmd) => fsniper::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
