use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nestbook::cli::{
    clear_all, export_snapshot, handle_pin_command, import_snapshot, init_config, mark_launched,
    show_status, PinCommands,
};
use nestbook::config::{NestPaths, StoreConfig};
use nestbook::crypto::FORMAT_TAG;
use nestbook::display::yes_no;
use nestbook::export::ExportFormat;
use nestbook::services::PersistenceService;

#[derive(Parser)]
#[command(
    name = "nestbook",
    version,
    about = "Local, PIN-gated store for a child journal",
    long_about = "nestbook keeps a single obfuscated snapshot of your child's journal \
                  (profile, diary, growth, vaccines, milestones, events, medical \
                  history and documents) on this machine, optionally behind a PIN. \
                  The obfuscation is not encryption."
)]
struct Cli {
    /// Current PIN, for commands that need to unlock the journal
    #[arg(long, global = true, env = "NESTBOOK_PIN", hide_env_values = true)]
    pin: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show storage state and a summary of saved data
    Status,

    /// PIN management commands
    #[command(subcommand)]
    Pin(PinCommands),

    /// Record that the first launch has completed
    Launched,

    /// Replace the saved data with a JSON or YAML snapshot file
    Import {
        /// Path to the snapshot file
        file: PathBuf,
    },

    /// Write the saved data in plain text
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete all saved data, the PIN and the launch marker
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Show resolved paths and store configuration
    Config {
        /// Write the current configuration to the config file if none exists
        #[arg(long)]
        init: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nestbook=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let paths = NestPaths::new()?;
    let config = StoreConfig::load_or_default(&paths)?;
    let service = PersistenceService::open_default(&paths, config);
    let pin = cli.pin.as_deref();

    match cli.command {
        Some(Commands::Status) => show_status(&paths, &service).await?,
        Some(Commands::Pin(cmd)) => handle_pin_command(&service, pin, cmd)?,
        Some(Commands::Launched) => mark_launched(&service)?,
        Some(Commands::Import { file }) => import_snapshot(&service, pin, &file).await?,
        Some(Commands::Export { format, output }) => {
            export_snapshot(&service, pin, format, output).await?
        }
        Some(Commands::Clear { yes }) => clear_all(&service, pin, yes).await?,
        Some(Commands::Config { init: true }) => init_config(&paths, &service)?,
        Some(Commands::Config { init: false }) => {
            let config = service.config();
            println!("nestbook Configuration");
            println!("======================");
            println!("Base directory:  {}", paths.base_dir().display());
            println!("Config file:     {}", paths.settings_file().display());
            println!("Flag store:      {}", paths.flags_file().display());
            println!(
                "Database:        {} (schema v{})",
                paths.database_dir(&config.database_name).display(),
                config.schema_version
            );
            println!("Object store:    {}", config.store_name);
            println!("Snapshot format: {}", FORMAT_TAG);
            println!("Persistable:     {}", yes_no(service.is_persistable()));
        }
        None => {
            if service.is_first_launch() {
                println!("Welcome to nestbook!");
                println!();
                println!("Import your journal with 'nestbook import <file>',");
                println!("protect it with 'nestbook pin set', then run 'nestbook launched'.");
            } else {
                println!("nestbook - local store for your child's journal");
                println!();
                println!("Run 'nestbook --help' for usage information.");
            }
        }
    }

    Ok(())
}
