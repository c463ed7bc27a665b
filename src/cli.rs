//! CLI definition and dispatch.
//!
//! The CLI only orchestrates: it loads the price table through the CSV
//! adapter, builds validated settings from an optional INI file, runs the
//! engines, and prints (or writes as JSON) the resulting records.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvPriceAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    validate_metrics_config, validate_strategy_config, DEFAULT_LOOKBACK_LONG,
    DEFAULT_LOOKBACK_SHORT, DEFAULT_PERIODS_PER_YEAR, DEFAULT_TOP_K,
};
use crate::domain::error::MomtraderError;
use crate::domain::metrics::{Metrics, MetricsConfig};
use crate::domain::prices::PriceTable;
use crate::domain::report::{monthly_summary, MonthlySummary, StrategyAnalysis};
use crate::domain::strategy::{run_strategy, StrategyConfig, StrategyRun};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;

#[derive(Parser, Debug)]
#[command(name = "momtrader", about = "Cross-sectional momentum strategy comparator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single lookback configuration
    Run {
        /// Wide CSV price file (Date,ASSET,...)
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Momentum lookback in trading days (overrides config)
        #[arg(short, long)]
        lookback: Option<usize>,
        /// Write the analysis record as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Compare the short and long lookback variants side by side
    Compare {
        #[arg(short, long)]
        data: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        json: Option<PathBuf>,
    },
    /// Show the date range and assets of a price file
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Run {
            data,
            config,
            lookback,
            json,
        } => run_single(&data, config.as_ref(), lookback, json.as_ref()),
        Command::Compare { data, config, json } => run_compare(&data, config.as_ref(), json.as_ref()),
        Command::Info { data } => run_info(&data),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(&err)
        }
    }
}

/// Validated run parameters, assembled from defaults and an optional INI file.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lookback_short: usize,
    pub lookback_long: usize,
    pub top_k: usize,
    pub metrics: MetricsConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            lookback_short: DEFAULT_LOOKBACK_SHORT as usize,
            lookback_long: DEFAULT_LOOKBACK_LONG as usize,
            top_k: DEFAULT_TOP_K as usize,
            metrics: MetricsConfig::default(),
        }
    }
}

pub fn build_settings(config: Option<&FileConfigAdapter>) -> Result<Settings, MomtraderError> {
    let Some(config) = config else {
        return Ok(Settings::default());
    };

    validate_strategy_config(config)?;
    validate_metrics_config(config)?;

    Ok(Settings {
        lookback_short: config.get_int("strategy", "lookback_short", DEFAULT_LOOKBACK_SHORT)
            as usize,
        lookback_long: config.get_int("strategy", "lookback_long", DEFAULT_LOOKBACK_LONG) as usize,
        top_k: config.get_int("strategy", "top_k", DEFAULT_TOP_K) as usize,
        metrics: MetricsConfig {
            risk_free_rate: config.get_double("metrics", "risk_free_rate", 0.0),
            target_return: config.get_double("metrics", "target_return", 0.0),
            periods_per_year: config.get_int(
                "metrics",
                "periods_per_year",
                DEFAULT_PERIODS_PER_YEAR,
            ) as u32,
        },
    })
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, MomtraderError> {
    let adapter = match config_path {
        Some(path) => Some(FileConfigAdapter::from_file(path).map_err(|e| {
            MomtraderError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            }
        })?),
        None => None,
    };
    build_settings(adapter.as_ref())
}

/// One evaluated lookback variant.
pub struct Evaluation {
    pub run: StrategyRun,
    pub metrics: Metrics,
    pub analysis: StrategyAnalysis,
    pub months: Vec<MonthlySummary>,
}

pub fn evaluate(
    table: &PriceTable,
    lookback: usize,
    top_k: usize,
    metrics_config: &MetricsConfig,
) -> Result<Evaluation, MomtraderError> {
    let strategy = StrategyConfig::new(lookback, top_k)?;
    let run = run_strategy(table, &strategy)?;
    let metrics = Metrics::compute(&run.returns, metrics_config)?;
    let analysis = StrategyAnalysis::new(lookback, top_k, &metrics);
    let months = monthly_summary(table, &run);
    Ok(Evaluation {
        run,
        metrics,
        analysis,
        months,
    })
}

fn run_single(
    data: &PathBuf,
    config: Option<&PathBuf>,
    lookback: Option<usize>,
    json: Option<&PathBuf>,
) -> Result<(), MomtraderError> {
    let settings = load_settings(config)?;
    let table = CsvPriceAdapter::new(data.clone()).fetch_prices()?;
    let lookback = lookback.unwrap_or(settings.lookback_short);

    let eval = evaluate(&table, lookback, settings.top_k, &settings.metrics)?;
    print_table_summary(&table);
    print_evaluation(&eval, lookback);

    if let Some(path) = json {
        write_json(path, &eval.analysis)?;
    }
    Ok(())
}

fn run_compare(
    data: &PathBuf,
    config: Option<&PathBuf>,
    json: Option<&PathBuf>,
) -> Result<(), MomtraderError> {
    let settings = load_settings(config)?;
    let table = CsvPriceAdapter::new(data.clone()).fetch_prices()?;

    let short = evaluate(
        &table,
        settings.lookback_short,
        settings.top_k,
        &settings.metrics,
    )?;
    let long = evaluate(
        &table,
        settings.lookback_long,
        settings.top_k,
        &settings.metrics,
    )?;

    print_table_summary(&table);
    print_evaluation(&short, settings.lookback_short);
    print_evaluation(&long, settings.lookback_long);
    print_comparison(&short, &long, &settings);

    if let Some(path) = json {
        let records = [&short.analysis, &long.analysis];
        write_json(path, &records)?;
    }
    Ok(())
}

fn run_info(data: &PathBuf) -> Result<(), MomtraderError> {
    let table = CsvPriceAdapter::new(data.clone()).fetch_prices()?;
    print_table_summary(&table);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &PathBuf, value: &T) -> Result<(), MomtraderError> {
    let body = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    fs::write(path, body)?;
    println!("analysis record written to {}", path.display());
    Ok(())
}

fn print_table_summary(table: &PriceTable) {
    println!(
        "{} trading days, {} assets: {}",
        table.n_rows(),
        table.n_assets(),
        table.assets().join(", ")
    );
    if let (Some(first), Some(last)) = (table.first_date(), table.last_date()) {
        println!("date range: {first} to {last}");
    }
}

fn print_evaluation(eval: &Evaluation, lookback: usize) {
    println!("\n{}-day momentum lookback", lookback);
    println!("{:-<58}", "");
    let m = &eval.metrics;
    println!("{:<28} {:>10.2}%", "Total return", m.total_return * 100.0);
    println!("{:<28} {:>10.2}%", "CAGR", m.cagr * 100.0);
    println!("{:<28} {:>10.2}%", "Annualized volatility", m.volatility * 100.0);
    println!("{:<28} {:>10.2}%", "Maximum drawdown", m.max_drawdown * 100.0);
    println!("{:<28} {:>11.4}", "Sharpe ratio", m.sharpe_ratio);
    println!("{:<28} {:>11.4}", "Sortino ratio", m.sortino_ratio);

    println!("\n{:<10} {:>10} {:>10}  {}", "Month", "Wealth", "Return", "Holdings");
    for month in &eval.months {
        let holdings = if month.holdings.is_empty() {
            "cash".to_string()
        } else {
            month
                .holdings
                .iter()
                .map(|(name, w)| format!("{} ({:.0}%)", name, w * 100.0))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!(
            "{:04}-{:02}    {:>10.4} {:>9.2}%  {}",
            month.year,
            month.month,
            month.end_wealth,
            month.monthly_return * 100.0,
            holdings
        );
    }
}

fn print_comparison(short: &Evaluation, long: &Evaluation, settings: &Settings) {
    println!("\ncomparison ({} vs {} days)", settings.lookback_short, settings.lookback_long);
    println!("{:-<58}", "");
    let rows: [(&str, f64, f64); 6] = [
        ("total_return", short.metrics.total_return, long.metrics.total_return),
        ("cagr", short.metrics.cagr, long.metrics.cagr),
        ("volatility", short.metrics.volatility, long.metrics.volatility),
        ("max_drawdown", short.metrics.max_drawdown, long.metrics.max_drawdown),
        ("sharpe_ratio", short.metrics.sharpe_ratio, long.metrics.sharpe_ratio),
        ("sortino_ratio", short.metrics.sortino_ratio, long.metrics.sortino_ratio),
    ];
    for (name, a, b) in rows {
        println!("{:<16} {:>12.4} {:>12.4}", name, a, b);
    }
}
