mod commands;

use anyhow::{bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use finreq_directory::{load_countries_or_empty, RestCountriesDirectory};
use finreq_rules::{currency_symbol, validate};
use finreq_schemas::Currency;

#[derive(Parser)]
#[command(name = "finreq")]
#[command(about = "Financing request form CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a draft file and print its errors
    Validate {
        /// JSON object keyed by form input name
        #[arg(long)]
        draft: String,

        /// Reference date for the date rules (defaults to the local date)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Fill a form session from a draft file and submit it once
    Submit {
        #[arg(long)]
        draft: String,

        /// Config paths in merge order
        #[arg(long = "config")]
        config_paths: Vec<String>,

        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Fetch and print the selectable country list
    Countries {
        #[arg(long = "config")]
        config_paths: Vec<String>,
    },

    /// Compute the layered config hash + print the effective config as JSON
    ConfigHash {
        /// Paths in merge order (base -> env -> local...)
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Print the amount prefix for a currency code
    Symbol { currency: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env.local if present (dev convenience).
    let _ = dotenvy::from_filename(".env.local");

    init_tracing();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Validate { draft, today } => {
            let fields = commands::load_draft_fields(&draft)?;
            let draft = commands::draft_from_fields(&fields)?;
            let errors = validate(&draft, today.unwrap_or_else(local_today));
            if errors.is_empty() {
                println!("valid");
            } else {
                println!("{}", serde_json::to_string_pretty(&errors)?);
                bail!("draft has {} invalid field(s)", errors.len());
            }
        }

        Commands::Submit {
            draft,
            config_paths,
            today,
        } => {
            let cfg = commands::load_form_config(&config_paths)?;
            let fields = commands::load_draft_fields(&draft)?;
            commands::submit::run(&cfg, &fields, today.unwrap_or_else(local_today)).await?;
        }

        Commands::Countries { config_paths } => {
            let cfg = commands::load_form_config(&config_paths)?;
            let directory = RestCountriesDirectory::new_with_base_url(cfg.countries.base_url);
            for name in load_countries_or_empty(&directory).await {
                println!("{name}");
            }
        }

        Commands::ConfigHash { paths } => {
            let path_refs: Vec<&str> = paths.iter().map(|s| s.as_str()).collect();
            let cfg = finreq_config::load_layered_yaml(&path_refs)?;
            println!("config_hash={}", cfg.config_hash()?);
            println!("{}", cfg.canonical_json()?);
        }

        Commands::Symbol { currency } => {
            let currency: Currency = currency.parse()?;
            println!("{}", currency_symbol(currency));
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}
