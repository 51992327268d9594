//! CLI definition and dispatch.

use chrono::Duration;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::adapters::clock_adapter::SystemClock;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::static_catalog_adapter::StaticCatalogAdapter;
use crate::domain::config_validation::{
    DEFAULT_LISTEN, validate_market_config, validate_web_config,
};
use crate::domain::error::GbceError;
use crate::domain::market::{DEFAULT_WINDOW_MINUTES, Market, MarketConfig};
use crate::domain::stock::StockClass;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Parser, Debug)]
#[command(name = "gbce", about = "Global Beverage Corporation Exchange market data service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP service
    Serve {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// List the reference stocks
    Stocks,
    /// Show dividend yield and P/E ratio for a stock at a given price
    Quote {
        symbol: String,
        #[arg(short, long, allow_negative_numbers = true)]
        price: f64,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Serve { config } => run_serve(config.as_ref()),
        Command::Stocks => run_stocks(),
        Command::Quote { symbol, price } => run_quote(&symbol, price),
    }
}

/// Loads the INI file at `path`, or an empty config when no path is given.
pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, GbceError> {
    match path {
        Some(p) => FileConfigAdapter::from_file(p),
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_market_config(config: &dyn ConfigPort) -> Result<MarketConfig, GbceError> {
    validate_market_config(config)?;
    let minutes = config.get_int("market", "vwsp_window_minutes", DEFAULT_WINDOW_MINUTES);
    let vwsp_window = Duration::try_minutes(minutes).ok_or_else(|| GbceError::ConfigInvalid {
        section: "market".into(),
        key: "vwsp_window_minutes".into(),
        reason: format!("{minutes} minutes is out of range"),
    })?;
    Ok(MarketConfig { vwsp_window })
}

pub fn listen_addr(config: &dyn ConfigPort) -> Result<SocketAddr, GbceError> {
    validate_web_config(config)?;
    let listen = config.get_string_or("web", "listen", DEFAULT_LISTEN);
    listen.parse().map_err(|_| GbceError::ConfigInvalid {
        section: "web".into(),
        key: "listen".into(),
        reason: format!("'{listen}' is not a socket address"),
    })
}

pub fn build_market(config: MarketConfig) -> Market {
    Market::new(
        Arc::new(StaticCatalogAdapter::reference()),
        Arc::new(SystemClock),
        config,
    )
}

fn run_stocks() -> ExitCode {
    let market = build_market(MarketConfig::default());
    println!(
        "{:<8} {:<10} {:>14} {:>12} {:>10}",
        "SYMBOL", "CLASS", "LAST DIVIDEND", "FIXED RATE", "PAR VALUE"
    );
    for stock in market.stocks() {
        let (class, fixed) = match stock.class {
            StockClass::Common => ("Common", "-".to_string()),
            StockClass::Preferred {
                fixed_dividend_rate,
            } => ("Preferred", format!("{:.0}%", fixed_dividend_rate * 100.0)),
        };
        println!(
            "{:<8} {:<10} {:>14} {:>12} {:>10}",
            stock.symbol, class, stock.last_dividend, fixed, stock.par_value
        );
    }
    ExitCode::SUCCESS
}

fn run_quote(symbol: &str, price: f64) -> ExitCode {
    let market = build_market(MarketConfig::default());

    let dividend_yield = match market.dividend_yield(symbol, price) {
        Ok(y) => y,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let pe_ratio = match market.pe_ratio(symbol, price) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    println!("Dividend Yield:   {:.4}", dividend_yield);
    if pe_ratio.is_finite() {
        println!("P/E Ratio:        {:.2}", pe_ratio);
    } else {
        println!("P/E Ratio:        inf (no dividend)");
    }
    ExitCode::SUCCESS
}

fn run_serve(config_path: Option<&PathBuf>) -> ExitCode {
    #[cfg(feature = "web")]
    {
        use crate::adapters::web::{AppState, build_router};

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        init_tracing(&config.get_string_or("log", "filter", DEFAULT_LOG_FILTER));

        let market_config = match build_market_config(&config) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };
        let addr = match listen_addr(&config) {
            Ok(a) => a,
            Err(e) => {
                eprintln!("error: {e}");
                return (&e).into();
            }
        };

        let state = AppState {
            market: Arc::new(build_market(market_config)),
        };
        let router = build_router(state);

        let runtime = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("error: failed to start runtime: {e}");
                return ExitCode::from(1);
            }
        };

        let served: std::io::Result<()> = runtime.block_on(async {
            let listener = tokio::net::TcpListener::bind(addr).await?;
            tracing::info!(
                %addr,
                vwsp_window_minutes = market_config.vwsp_window.num_minutes(),
                "gbce listening"
            );
            axum::serve(listener, router).await
        });

        match served {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                let err = GbceError::Io(e);
                tracing::error!(error = %err, "server stopped");
                eprintln!("error: {err}");
                (&err).into()
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

/// `RUST_LOG` takes precedence over the configured filter.
pub fn init_tracing(default_filter: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
