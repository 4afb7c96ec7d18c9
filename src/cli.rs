//! CLI definition and dispatch.

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_import;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_store_adapter::JsonStoreAdapter;
use crate::domain::error::BlotterError;
use crate::domain::filter::FilterCriteria;
use crate::domain::query::ListParams;
use crate::domain::sort::{SortField, SortOrder};
use crate::domain::store::TradeStore;
use crate::domain::trade::{Side, SubmissionDetails, TradeSubmission};
use crate::ports::config_port::ConfigPort;
use crate::ports::store_port::StorePort;

#[derive(Parser, Debug)]
#[command(name = "blotter", about = "Trade record-management service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new trade
    Add {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        instrument_id: String,
        #[arg(long)]
        instrument_name: String,
        #[arg(long)]
        trader: String,
        #[arg(long)]
        side: String,
        #[arg(long)]
        price: f64,
        #[arg(long)]
        quantity: i64,
        #[arg(long)]
        asset_class: Option<String>,
        #[arg(long)]
        counterparty: Option<String>,
        #[arg(long)]
        trade_date_time: Option<String>,
    },
    /// Look up a single trade by id
    Get {
        #[arg(short, long)]
        config: PathBuf,
        id: u64,
    },
    /// Free-text search across counterparty, instrument and trader fields
    Search {
        #[arg(short, long)]
        config: PathBuf,
        query: String,
    },
    /// List trades with filtering, sorting and pagination
    List {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        asset_class: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
        #[arg(long)]
        trade_type: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 10)]
        limit: usize,
        #[arg(long)]
        sort: Option<String>,
        #[arg(long, default_value = "asc")]
        order: String,
    },
    /// Bulk-import trades from a CSV file
    Import {
        #[arg(short, long)]
        config: PathBuf,
        file: PathBuf,
    },
    /// Start the web server
    Serve {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    env_logger::init();

    match cli.command {
        Command::Add {
            config,
            instrument_id,
            instrument_name,
            trader,
            side,
            price,
            quantity,
            asset_class,
            counterparty,
            trade_date_time,
        } => run_add(
            &config,
            AddArgs {
                instrument_id,
                instrument_name,
                trader,
                side,
                price,
                quantity,
                asset_class,
                counterparty,
                trade_date_time,
            },
        ),
        Command::Get { config, id } => run_get(&config, id),
        Command::Search { config, query } => run_search(&config, &query),
        Command::List {
            config,
            asset_class,
            start,
            end,
            min_price,
            max_price,
            trade_type,
            page,
            limit,
            sort,
            order,
        } => run_list(
            &config,
            ListArgs {
                asset_class,
                start,
                end,
                min_price,
                max_price,
                trade_type,
                page,
                limit,
                sort,
                order,
            },
        ),
        Command::Import { config, file } => run_import(&config, &file),
        Command::Serve { config } => run_serve(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = BlotterError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Build the configured store backend and load the record collection.
pub fn open_store(config: &dyn ConfigPort) -> Result<TradeStore, ExitCode> {
    let backend = config
        .get_string("store", "backend")
        .unwrap_or_else(|| "json".to_string());

    let port: Box<dyn StorePort + Send + Sync> = match backend.as_str() {
        "json" => match JsonStoreAdapter::from_config(config) {
            Ok(adapter) => Box::new(adapter),
            Err(e) => return Err(report(&e)),
        },
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            use crate::adapters::sqlite_store_adapter::SqliteStoreAdapter;
            match SqliteStoreAdapter::from_config(config) {
                Ok(adapter) => Box::new(adapter),
                Err(e) => return Err(report(&e)),
            }
        }
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => {
            eprintln!("error: sqlite feature is required for the sqlite backend");
            return Err(ExitCode::from(2));
        }
        other => {
            let err = BlotterError::ConfigInvalid {
                section: "store".into(),
                key: "backend".into(),
                reason: format!("unknown backend {other:?} (expected json or sqlite)"),
            };
            return Err(report(&err));
        }
    };

    TradeStore::open(port).map_err(|e| report(&e))
}

fn report(err: &BlotterError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            format!("invalid timestamp {value:?}: {e} (expected RFC 3339, e.g. 2024-01-15T10:30:00Z)")
        })
}

fn print_json<T: serde::Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to encode output: {e}");
            ExitCode::from(1)
        }
    }
}

struct AddArgs {
    instrument_id: String,
    instrument_name: String,
    trader: String,
    side: String,
    price: f64,
    quantity: i64,
    asset_class: Option<String>,
    counterparty: Option<String>,
    trade_date_time: Option<String>,
}

fn run_add(config_path: &PathBuf, args: AddArgs) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let trade_date_time = match args.trade_date_time.as_deref().map(parse_timestamp) {
        Some(Ok(at)) => Some(at),
        Some(Err(reason)) => {
            eprintln!("error: {reason}");
            return ExitCode::from(4);
        }
        None => None,
    };

    let submission = TradeSubmission {
        asset_class: args.asset_class,
        counterparty: args.counterparty,
        instrument_id: args.instrument_id,
        instrument_name: args.instrument_name,
        trade_date_time,
        trade_details: SubmissionDetails {
            buy_sell_indicator: args.side,
            price: args.price,
            quantity: args.quantity,
        },
        trader: args.trader,
    };

    match store.append(submission) {
        Ok(trade) => {
            eprintln!("Recorded trade {}", trade.trade_id);
            print_json(&trade)
        }
        Err(e) => report(&e),
    }
}

fn run_get(config_path: &PathBuf, id: u64) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match store.by_id(id) {
        Some(trade) => print_json(&trade),
        None => {
            // absence is an empty result, not a failure
            eprintln!("No trade with id {id}");
            ExitCode::SUCCESS
        }
    }
}

fn run_search(config_path: &PathBuf, query: &str) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let trades = store.search(query);
    eprintln!("{} trades matched", trades.len());
    print_json(&trades)
}

struct ListArgs {
    asset_class: Option<String>,
    start: Option<String>,
    end: Option<String>,
    min_price: Option<f64>,
    max_price: Option<f64>,
    trade_type: Option<String>,
    page: usize,
    limit: usize,
    sort: Option<String>,
    order: String,
}

fn run_list(config_path: &PathBuf, args: ListArgs) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let start = match args.start.as_deref().map(parse_timestamp) {
        Some(Ok(at)) => Some(at),
        Some(Err(reason)) => {
            eprintln!("error: {reason}");
            return ExitCode::from(4);
        }
        None => None,
    };
    let end = match args.end.as_deref().map(parse_timestamp) {
        Some(Ok(at)) => Some(at),
        Some(Err(reason)) => {
            eprintln!("error: {reason}");
            return ExitCode::from(4);
        }
        None => None,
    };

    let trade_type = match args.trade_type.as_deref().map(Side::from_str).transpose() {
        Ok(side) => side,
        Err(e) => return report(&e),
    };
    let sort = match args.sort.as_deref().map(SortField::from_str).transpose() {
        Ok(field) => field,
        Err(e) => return report(&e),
    };
    let order = match SortOrder::from_str(&args.order) {
        Ok(order) => order,
        Err(e) => return report(&e),
    };

    let params = ListParams {
        criteria: FilterCriteria {
            asset_class: args.asset_class,
            start,
            end,
            min_price: args.min_price,
            max_price: args.max_price,
            trade_type,
        },
        page: args.page,
        limit: args.limit,
        sort,
        order,
    };

    match store.list(&params) {
        Ok(page) => {
            eprintln!(
                "Page {} ({} of {} trades)",
                page.page,
                page.items.len(),
                page.total
            );
            print_json(&page)
        }
        Err(e) => report(&e),
    }
}

fn run_import(config_path: &PathBuf, file: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let store = match open_store(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let submissions = match csv_import::read_submissions(file) {
        Ok(s) => s,
        Err(e) => return report(&e),
    };

    let total = submissions.len();
    for (index, submission) in submissions.into_iter().enumerate() {
        if let Err(e) = store.append(submission) {
            eprintln!(
                "error: import stopped at record {} of {}: {e}",
                index + 1,
                total
            );
            return ExitCode::from(&e);
        }
    }

    eprintln!("Imported {} trades from {}", total, file.display());
    ExitCode::SUCCESS
}

fn run_serve(config_path: &PathBuf) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};
        use std::net::SocketAddr;
        use std::sync::Arc;

        eprintln!("Loading config from {}", config_path.display());
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(code) => return code,
        };
        let store = match open_store(&config) {
            Ok(s) => s,
            Err(code) => return code,
        };

        let addr: SocketAddr = config
            .get_string("server", "listen")
            .unwrap_or_else(|| "127.0.0.1:8000".to_string())
            .parse()
            .unwrap_or_else(|_| "127.0.0.1:8000".parse().unwrap());

        let state = AppState {
            store: Arc::new(store),
        };
        let router = build_router(state);

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(1);
            }
        };

        let served: std::io::Result<()> = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            log::info!("listening on {addr}");
            axum::serve(listener, router).await
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::from(1)
            }
        }
    }

    #[cfg(not(feature = "web"))]
    {
        let _ = config_path;
        eprintln!("error: web feature is required for serve");
        ExitCode::from(1)
    }
}
