//! CLI definition and dispatch.

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::{error, info, warn};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::log_sink::{LogSink, RecordingSink, Tee};
use crate::adapters::text_report::TextReport;
use crate::domain::backtest::{self as backtest_engine, BacktestConfig, BacktestResult};
use crate::domain::config_validation::{
    validate_backtest_config, validate_strategy_config, validate_strategy_kind,
};
use crate::domain::error::BacktestError;
use crate::domain::execution::ExecutionPolicy;
use crate::domain::series::BarSeries;
use crate::domain::strategy::rsi::{DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD};
use crate::domain::strategy::{Strategy, StrategySpec};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::event_port::EventSink;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "barreplay", about = "Single-asset bar-by-bar backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one strategy over a CSV file
    Run {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        strategy: StrategyArgs,
        /// Print every executed trade
        #[arg(long)]
        trades: bool,
    },
    /// Run the MA crossover and RSI strategies side by side
    Compare {
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        strategy: StrategyArgs,
        #[arg(long)]
        trades: bool,
    },
    /// Show what a data file contains
    Info {
        #[arg(short, long)]
        data: PathBuf,
    },
}

#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// OHLCV CSV file; overrides [data] path
    #[arg(short, long)]
    pub data: Option<PathBuf>,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Starting cash; overrides [backtest] starting_cash
    #[arg(long)]
    pub cash: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    Ma,
    Rsi,
}

#[derive(Args, Debug, Clone, Default)]
pub struct StrategyArgs {
    /// Strategy to run; overrides [strategy] kind
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyKind>,
    #[arg(long)]
    pub short: Option<usize>,
    #[arg(long)]
    pub long: Option<usize>,
    /// RSI lookback
    #[arg(long)]
    pub period: Option<usize>,
}

pub fn run(cli: Cli) -> ExitCode {
    let outcome = match cli.command {
        Command::Run {
            common,
            strategy,
            trades,
        } => run_single(&common, &strategy, trades),
        Command::Compare {
            common,
            strategy,
            trades,
        } => run_compare(&common, &strategy, trades),
        Command::Info { data } => run_info(&data),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, BacktestError> {
    match path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            FileConfigAdapter::from_file(path)
        }
        None => Ok(FileConfigAdapter::empty()),
    }
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    cash_override: Option<f64>,
) -> Result<BacktestConfig, BacktestError> {
    validate_backtest_config(config)?;

    let defaults = BacktestConfig::default();
    let starting_cash = match cash_override {
        Some(cash) => cash,
        None => config.get_double("backtest", "starting_cash", defaults.starting_cash),
    };

    let policy = ExecutionPolicy {
        buy_cash_fraction: config.get_double(
            "backtest",
            "buy_cash_fraction",
            defaults.policy.buy_cash_fraction,
        ),
        sell_position_fraction: config.get_double(
            "backtest",
            "sell_position_fraction",
            defaults.policy.sell_position_fraction,
        ),
    };

    Ok(BacktestConfig {
        starting_cash,
        policy,
    })
}

fn config_kind(config: &dyn ConfigPort) -> StrategyKind {
    match config.get_string("strategy", "kind").as_deref().map(str::trim) {
        Some("rsi") => StrategyKind::Rsi,
        _ => StrategyKind::Ma,
    }
}

fn period(config: &dyn ConfigPort, key: &str, default: usize, overridden: Option<usize>) -> usize {
    overridden.unwrap_or_else(|| config.get_int("strategy", key, default as i64).max(0) as usize)
}

/// Build one strategy spec of the given kind from config, with command-line overrides.
pub fn build_strategy_spec(
    config: &dyn ConfigPort,
    kind: StrategyKind,
    args: &StrategyArgs,
) -> StrategySpec {
    match kind {
        StrategyKind::Ma => StrategySpec::MaCrossover {
            short_period: period(config, "short_period", 3, args.short),
            long_period: period(config, "long_period", 5, args.long),
        },
        StrategyKind::Rsi => StrategySpec::Rsi {
            period: period(config, "period", 14, args.period),
            oversold: config.get_double("strategy", "oversold", DEFAULT_OVERSOLD),
            overbought: config.get_double("strategy", "overbought", DEFAULT_OVERBOUGHT),
        },
    }
}

/// Resolve the data file: the command-line path wins over `[data] path`.
pub fn resolve_data_path(
    data_override: Option<&PathBuf>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, BacktestError> {
    if let Some(path) = data_override {
        return Ok(path.clone());
    }
    config
        .get_string("data", "path")
        .filter(|s| !s.trim().is_empty())
        .map(|s| PathBuf::from(s.trim()))
        .ok_or_else(|| BacktestError::ConfigMissing {
            section: "data".into(),
            key: "path".into(),
        })
}

/// Load a series from a CSV file, optionally refusing unordered timestamps.
pub fn load_series(
    path: &Path,
    require_chronological: bool,
    sink: &dyn EventSink,
) -> Result<BarSeries, BacktestError> {
    let adapter = CsvAdapter::new(path);
    let mut series = BarSeries::new();
    let count = series.load(&adapter, sink)?;
    info!("Loaded {} bars from {}", count, adapter.describe());

    if require_chronological {
        if let Some(index) = series.first_out_of_order() {
            return Err(BacktestError::UnorderedData { index });
        }
    }
    if series.is_empty() {
        return Err(BacktestError::EmptySeries);
    }
    Ok(series)
}

/// Validate config, load the data, then run every spec against its own portfolio.
pub fn run_pipeline(
    config: &dyn ConfigPort,
    common: &CommonArgs,
    specs: &[StrategySpec],
    sink: &dyn EventSink,
) -> Result<Vec<BacktestResult>, BacktestError> {
    validate_strategy_config(config)?;
    for spec in specs {
        validate_strategy_kind(config, spec.kind())?;
    }
    let bt_config = build_backtest_config(config, common.cash)?;

    let data_path = resolve_data_path(common.data.as_ref(), config)?;
    let require_chronological = config.get_bool("data", "require_chronological", false);
    let series = load_series(&data_path, require_chronological, sink)?;

    let strategies: Vec<Box<dyn Strategy>> = specs
        .iter()
        .map(StrategySpec::build)
        .collect::<Result<_, _>>()?;
    for strategy in &strategies {
        if strategy.warmup_bars() > series.len() {
            warn!(
                "{} needs {} bars of history but only {} are loaded; it will only hold",
                strategy.name(),
                strategy.warmup_bars(),
                series.len()
            );
        }
    }

    info!(
        "Running {} strategies over {} bars with ${:.2}",
        strategies.len(),
        series.len(),
        bt_config.starting_cash
    );
    let refs: Vec<&dyn Strategy> = strategies.iter().map(|s| s.as_ref()).collect();
    backtest_engine::compare(&series, &refs, &bt_config, sink)
}

fn warn_if_inverted(specs: &[StrategySpec]) {
    for spec in specs {
        if let StrategySpec::MaCrossover {
            short_period,
            long_period,
        } = spec
        {
            if short_period >= long_period {
                warn!(
                    "short_period {short_period} is not below long_period {long_period}; crossover signals are inverted"
                );
            }
        }
    }
}

/// Run the pipeline with events logged as they happen and a warning tally at the end.
fn run_logged(
    config: &dyn ConfigPort,
    common: &CommonArgs,
    specs: &[StrategySpec],
) -> Result<Vec<BacktestResult>, BacktestError> {
    let recorder = RecordingSink::new();
    let results = run_pipeline(config, common, specs, &Tee(LogSink, &recorder))?;
    let warnings = recorder.warning_count();
    if warnings > 0 {
        warn!("{warnings} rows or orders were dropped during the run");
    }
    Ok(results)
}

fn run_single(common: &CommonArgs, args: &StrategyArgs, trades: bool) -> Result<(), BacktestError> {
    let config = load_config(common.config.as_ref())?;
    let kind = args.strategy.unwrap_or_else(|| config_kind(&config));

    let specs = [build_strategy_spec(&config, kind, args)];
    warn_if_inverted(&specs);
    let results = run_logged(&config, common, &specs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = TextReport::new(trades);
    for result in &results {
        report.write(result, &mut out)?;
    }
    Ok(())
}

fn run_compare(common: &CommonArgs, args: &StrategyArgs, trades: bool) -> Result<(), BacktestError> {
    let config = load_config(common.config.as_ref())?;

    let specs: Vec<StrategySpec> = [StrategyKind::Ma, StrategyKind::Rsi]
        .iter()
        .map(|&kind| build_strategy_spec(&config, kind, args))
        .collect();
    warn_if_inverted(&specs);
    let results = run_logged(&config, common, &specs)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    TextReport::new(trades).write_comparison(&results, &mut out)
}

fn run_info(data: &Path) -> Result<(), BacktestError> {
    let series = load_series(data, false, &LogSink)?;

    println!("{}: {} bars", data.display(), series.len());
    if let (Some(first), Some(last)) = (series.first(), series.last()) {
        println!(
            "  first: t={} open={} high={} low={} close={} volume={}",
            first.timestamp, first.open, first.high, first.low, first.close, first.volume
        );
        println!(
            "  last:  t={} open={} high={} low={} close={} volume={}",
            last.timestamp, last.open, last.high, last.low, last.close, last.volume
        );
        println!("  last typical price: {:.4}", last.typical_price());
    }
    match series.first_out_of_order() {
        Some(index) => println!("  timestamps go backwards at bar {index}"),
        None => println!("  timestamps are in order"),
    }
    Ok(())
}
