use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use redemption_oracle::config::{Config, ConfigOverrides};
use redemption_oracle::engine::RedemptionEngine;
use redemption_oracle::insights::provider_from_config;
use redemption_oracle::output::csv::{history_to_csv, outcome_to_csv, wallet_to_csv};
use redemption_oracle::output::json::{render_json, render_json_lines};
use redemption_oracle::output::table::{
    render_history_table, render_outcome_table, render_partners_table, render_sources_table,
    render_sweet_spots_table, render_wallet_table,
};
use redemption_oracle::reference::ReferenceData;
use redemption_oracle::server::run_server;
use redemption_oracle::transfer::transfer_options_for;
use redemption_oracle::types::{Cabin, Program, ProgramKind, TripRequest, UserPreferences};
use redemption_oracle::wallet::parse_wallet;
use redemption_oracle::wallet::store::WalletStore;
use redemption_oracle::wallet::SearchRecord;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "redemption-oracle",
    about = "Find the best way to spend loyalty points on a trip"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    db: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone)]
struct TripArgs {
    #[arg(long = "from")]
    origin: Option<String>,
    #[arg(long = "to")]
    destination: Option<String>,
    #[arg(long)]
    depart: Option<NaiveDate>,
    #[arg(long = "return")]
    return_date: Option<NaiveDate>,
    #[arg(long, default_value = "economy")]
    cabin: Cabin,
    #[arg(long, default_value_t = 1)]
    passengers: u32,
    #[arg(long)]
    hotel: bool,
    #[arg(long)]
    category: Option<String>,
    #[arg(long, value_delimiter = ',')]
    prefer: Vec<String>,
    #[arg(long, value_delimiter = ',')]
    avoid: Vec<String>,
    /// Repeat the last saved search.
    #[arg(long)]
    last: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Search {
        #[command(flatten)]
        trip: TripArgs,
        /// JSON wallet file to use instead of the stored wallet.
        #[arg(long)]
        programs: Option<PathBuf>,
        #[arg(long)]
        summary: bool,
        #[arg(long = "no-history")]
        no_history: bool,
    },
    Wallet {
        #[command(subcommand)]
        command: WalletCommand,
    },
    History {
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    SweetSpots,
    Partners {
        #[arg(long, conflicts_with = "into")]
        card: Option<String>,
        #[arg(long)]
        into: Option<String>,
    },
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[derive(Debug, Subcommand)]
enum WalletCommand {
    Add {
        name: String,
        balance: u64,
        /// airline, hotel or card. Inferred from the name when omitted.
        #[arg(long = "type")]
        kind: Option<ProgramKind>,
        #[arg(long)]
        expiry: Option<NaiveDate>,
    },
    Remove {
        name: String,
    },
    List,
    Import {
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        db_path: cli.db.clone(),
        summary_url: None,
    });

    if matches!(cli.command, Commands::Config { .. }) {
        return handle_config_command(&cli.command, &config, &config_path);
    }
    if let Commands::Serve { host, port } = &cli.command {
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, addr).await;
    }

    let engine = RedemptionEngine::new(ReferenceData::shared(), config.valuation.clone());

    match &cli.command {
        Commands::Search {
            trip,
            programs,
            summary,
            no_history,
        } => {
            let store = WalletStore::open(&config.resolved_db_path())?;
            let trip = build_trip(trip, &store)?;
            let programs = match programs {
                Some(path) => load_wallet_file(path)?,
                None => store.list_programs()?,
            };

            let outcome = engine.search(&trip, &programs);
            if !*no_history {
                let record = SearchRecord::from_outcome(&trip, &outcome, Utc::now());
                store.save_last_search(&trip)?;
                store.insert_search(&record)?;
                info!(fingerprint = %record.fingerprint, "persisted search");
            }

            match cli.output {
                OutputFormat::Table => println!("{}", render_outcome_table(&outcome)),
                OutputFormat::Json => println!("{}", render_json(&outcome)?),
                OutputFormat::Csv => println!("{}", outcome_to_csv(&outcome)?),
            }
            if *summary {
                let provider = provider_from_config(&config.insights, engine.clone())?;
                let text = provider.summarize(&trip, &programs).await?;
                println!("\n{text}");
            }
        }
        Commands::Wallet { command } => {
            let store = WalletStore::open(&config.resolved_db_path())?;
            handle_wallet_command(command, &store, cli.output)?;
        }
        Commands::History { limit } => {
            let store = WalletStore::open(&config.resolved_db_path())?;
            let history = store.load_history((*limit).max(1))?;
            match cli.output {
                OutputFormat::Table => println!("{}", render_history_table(&history)),
                OutputFormat::Json => println!("{}", render_json(&history)?),
                OutputFormat::Csv => println!("{}", history_to_csv(&history)?),
            }
        }
        Commands::SweetSpots => {
            let spots = engine.reference().sweet_spots();
            match cli.output {
                OutputFormat::Table => println!("{}", render_sweet_spots_table(spots)),
                OutputFormat::Json => println!("{}", render_json(spots)?),
                OutputFormat::Csv => {
                    warn!("CSV output for sweet spots not implemented, using JSON");
                    println!("{}", render_json(spots)?);
                }
            }
        }
        Commands::Partners { card, into } => {
            let reference = engine.reference();
            match (card, into) {
                (Some(card), _) => {
                    let partners = reference.partners_from(card);
                    match cli.output {
                        OutputFormat::Table => {
                            println!("{}", render_partners_table(card, partners))
                        }
                        OutputFormat::Json => println!("{}", render_json(partners)?),
                        OutputFormat::Csv => {
                            warn!("CSV output for partners not implemented, using JSON");
                            println!("{}", render_json(partners)?);
                        }
                    }
                }
                (None, Some(program)) => {
                    let sources = transfer_options_for(reference, program);
                    match cli.output {
                        OutputFormat::Table => {
                            println!("{}", render_sources_table(program, &sources))
                        }
                        OutputFormat::Json => println!("{}", render_json(&sources)?),
                        OutputFormat::Csv => {
                            warn!("CSV output for partners not implemented, using JSON");
                            println!("{}", render_json(&sources)?);
                        }
                    }
                }
                (None, None) => return Err(anyhow!("pass --card or --into")),
            }
        }
        Commands::Serve { .. } | Commands::Config { .. } => {}
    }

    Ok(())
}

fn handle_config_command(command: &Commands, config: &Config, config_path: &Path) -> Result<()> {
    let Commands::Config { init, show } = command else {
        return Ok(());
    };
    if *init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if *show || !*init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn handle_wallet_command(
    command: &WalletCommand,
    store: &WalletStore,
    format: OutputFormat,
) -> Result<()> {
    match command {
        WalletCommand::Add {
            name,
            balance,
            kind,
            expiry,
        } => {
            let kind = kind.unwrap_or_else(|| ProgramKind::infer(name));
            let mut program = Program::new(name.trim(), kind, *balance);
            program.expiry = *expiry;
            store.upsert_program(&program)?;
            println!("Saved {} ({kind}) with {balance} points", program.name);
        }
        WalletCommand::Remove { name } => {
            if store.remove_program(name)? {
                println!("Removed {name}");
            } else {
                warn!("no program named {name} in wallet");
            }
        }
        WalletCommand::List => {
            let programs = store.list_programs()?;
            match format {
                OutputFormat::Table => println!("{}", render_wallet_table(&programs)),
                OutputFormat::Json => print!("{}", render_json_lines(&programs)?),
                OutputFormat::Csv => print!("{}", wallet_to_csv(&programs)?),
            }
        }
        WalletCommand::Import { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed reading wallet file: {}", file.display()))?;
            let count = store.import_json(&raw)?;
            println!("Imported {count} programs from {}", file.display());
        }
    }
    Ok(())
}

fn load_wallet_file(path: &Path) -> Result<Vec<Program>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed reading wallet file: {}", path.display()))?;
    parse_wallet(&raw).with_context(|| format!("invalid wallet file: {}", path.display()))
}

fn build_trip(args: &TripArgs, store: &WalletStore) -> Result<TripRequest> {
    if args.last {
        return store
            .load_last_search()?
            .ok_or_else(|| anyhow!("no saved search yet; run a search first"));
    }
    let destination = args
        .destination
        .clone()
        .ok_or_else(|| anyhow!("--to is required"))?;
    let depart = args
        .depart
        .ok_or_else(|| anyhow!("--depart is required"))?;

    let mut trip = if args.hotel {
        let check_out = args
            .return_date
            .ok_or_else(|| anyhow!("--return (check-out) is required for hotel searches"))?;
        TripRequest::hotel(&destination, depart, check_out, args.cabin)
    } else {
        let origin = args
            .origin
            .clone()
            .ok_or_else(|| anyhow!("--from is required for flight searches"))?;
        let mut trip = TripRequest::flight(&origin, &destination, depart, args.cabin);
        if let Some(return_date) = args.return_date {
            trip = trip.with_return(return_date);
        }
        trip
    };
    trip = trip
        .with_passengers(args.passengers)
        .with_preferences(UserPreferences {
            preferred_airlines: args.prefer.clone(),
            avoided_airlines: args.avoid.clone(),
            ..UserPreferences::default()
        });
    if let Some(category) = &args.category {
        trip = trip.with_hotel_category(category.clone());
    }
    Ok(trip)
}
