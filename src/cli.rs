//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use log::{info, warn};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::str::FromStr;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReport;
use crate::domain::alignment::align_two_assets;
use crate::domain::backtest::{
    BacktestResult, DEFAULT_INVEST_DAY, DEFAULT_TRAILING_YEARS, DcaSchedule,
    backtest_ma250_drawdown,
};
use crate::domain::config_validation::{
    parse_date, parse_symbol_pair, parse_weight_pair, validate_config,
};
use crate::domain::error::DcaError;
use crate::domain::pooled_backtest::{AssetWeights, DipBuyConfig, backtest_two_asset_dca_with_pool};
use crate::domain::price::PricePoint;
use crate::domain::schedule::validate_invest_day;
use crate::domain::signal::{compute_dip_buy_signal, compute_ma250_signal};
use crate::domain::strategy::StrategyKey;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "dcatrader", about = "Monthly DCA strategy backtester")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Backtest one strategy, or `all` to compare both
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = "ma250_drawdown")]
        strategy: String,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Print today's recommendation from the latest closes
    Signal {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = "ma250_drawdown")]
        strategy: String,
        /// Evaluate as of this date (YYYY-MM-DD) instead of the latest close
        #[arg(long)]
        date: Option<String>,
        #[command(flatten)]
        overrides: Overrides,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols with a price file in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

/// Command-line values that take precedence over the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct Overrides {
    /// ma250_drawdown: price symbol
    #[arg(long)]
    pub symbol: Option<String>,
    /// etf_dca_dip_buy: two symbols, comma-separated
    #[arg(long)]
    pub symbols: Option<String>,
    /// ma250_drawdown: base monthly contribution
    #[arg(long)]
    pub base_amount: Option<f64>,
    /// etf_dca_dip_buy: total monthly contribution
    #[arg(long)]
    pub monthly_total: Option<f64>,
    /// etf_dca_dip_buy: reserve pool, refilled every calendar year
    #[arg(long)]
    pub annual_pool: Option<f64>,
    /// etf_dca_dip_buy: two weights, comma-separated (e.g. 0.6,0.4)
    #[arg(long)]
    pub weights: Option<String>,
    /// Day of month to invest (1..=28)
    #[arg(long)]
    pub invest_day: Option<u32>,
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

/// Which strategies a command runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategySelection {
    Single(StrategyKey),
    All,
}

impl StrategySelection {
    pub fn keys(&self) -> Vec<StrategyKey> {
        match self {
            StrategySelection::Single(key) => vec![*key],
            StrategySelection::All => StrategyKey::ALL.to_vec(),
        }
    }
}

impl FromStr for StrategySelection {
    type Err = DcaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "all" {
            return Ok(StrategySelection::All);
        }
        s.parse::<StrategyKey>()
            .map(StrategySelection::Single)
            .map_err(|e| match e {
                DcaError::UnknownStrategy { key, available } => DcaError::UnknownStrategy {
                    key,
                    available: format!("{}, all", available),
                },
                other => other,
            })
    }
}

/// Everything a run needs, resolved from config defaults and overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub data_dir: PathBuf,
    pub schedule: DcaSchedule,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub symbol: String,
    pub base_amount: f64,
    pub symbols: (String, String),
    pub weights: AssetWeights,
    pub monthly_total: f64,
    pub annual_pool: f64,
    pub vix_symbol: String,
}

impl RunSettings {
    pub fn dip_buy_config(&self) -> DipBuyConfig {
        DipBuyConfig {
            monthly_total: self.monthly_total,
            weights: self.weights,
            annual_pool: self.annual_pool,
            schedule: self.schedule,
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            strategy,
            overrides,
        } => run_backtest(config.as_ref(), &strategy, &overrides),
        Command::Signal {
            config,
            strategy,
            date,
            overrides,
        } => run_signal(config.as_ref(), &strategy, date.as_deref(), &overrides),
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config, data_dir } => {
            run_list_symbols(config.as_ref(), data_dir.as_ref())
        }
    }
}

fn fail(e: DcaError) -> ExitCode {
    eprintln!("error: {e}");
    (&e).into()
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, DcaError> {
    FileConfigAdapter::from_file(path).map_err(|e| DcaError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Load (or default) the config, validate it, then apply overrides.
pub fn load_settings(
    config_path: Option<&PathBuf>,
    overrides: &Overrides,
) -> Result<RunSettings, DcaError> {
    let adapter = match config_path {
        Some(path) => {
            info!("Loading config from {}", path.display());
            load_config(path)?
        }
        None => FileConfigAdapter::empty(),
    };
    validate_config(&adapter)?;
    let settings = build_settings(&adapter)?;
    apply_overrides(settings, overrides)
}

/// Read every run setting, falling back to defaults. Expects a validated config.
pub fn build_settings(adapter: &dyn ConfigPort) -> Result<RunSettings, DcaError> {
    let start_date = adapter
        .get_string("backtest", "start_date")
        .map(|s| parse_date(&s, "start_date"))
        .transpose()?;
    let end_date = adapter
        .get_string("backtest", "end_date")
        .map(|s| parse_date(&s, "end_date"))
        .transpose()?;

    let symbols = match adapter.get_string("etf_dca_dip_buy", "symbols") {
        Some(s) => parse_symbol_pair(&s).map_err(|reason| DcaError::ConfigInvalid {
            section: "etf_dca_dip_buy".into(),
            key: "symbols".into(),
            reason,
        })?,
        None => ("SPY".to_string(), "QQQ".to_string()),
    };
    let weights = match adapter.get_string("etf_dca_dip_buy", "weights") {
        Some(s) => {
            let (a, b) = parse_weight_pair(&s).map_err(|reason| DcaError::ConfigInvalid {
                section: "etf_dca_dip_buy".into(),
                key: "weights".into(),
                reason,
            })?;
            AssetWeights::new(a, b)?
        }
        None => AssetWeights::default(),
    };
    let dip_defaults = DipBuyConfig::default();

    Ok(RunSettings {
        data_dir: PathBuf::from(
            adapter
                .get_string("data", "dir")
                .unwrap_or_else(|| "data".to_string()),
        ),
        schedule: DcaSchedule {
            invest_day: config_u32(adapter, "backtest", "invest_day", DEFAULT_INVEST_DAY)?,
            trailing_years: config_u32(
                adapter,
                "backtest",
                "trailing_years",
                DEFAULT_TRAILING_YEARS,
            )?,
        },
        start_date,
        end_date,
        symbol: adapter
            .get_string("ma250_drawdown", "symbol")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "QQQ".to_string()),
        base_amount: adapter.get_double("ma250_drawdown", "base_amount", 10_000.0),
        symbols,
        weights,
        monthly_total: adapter.get_double(
            "etf_dca_dip_buy",
            "monthly_total",
            dip_defaults.monthly_total,
        ),
        annual_pool: adapter.get_double("etf_dca_dip_buy", "annual_pool", dip_defaults.annual_pool),
        vix_symbol: adapter
            .get_string("etf_dca_dip_buy", "vix_symbol")
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|| "^VIX".to_string()),
    })
}

fn config_u32(
    adapter: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: u32,
) -> Result<u32, DcaError> {
    let value = adapter.get_int(section, key, i64::from(default));
    u32::try_from(value).map_err(|_| DcaError::ConfigInvalid {
        section: section.into(),
        key: key.into(),
        reason: format!("{} is out of range: {}", key, value),
    })
}

fn invalid_flag(key: &str, reason: impl Into<String>) -> DcaError {
    DcaError::ConfigInvalid {
        section: "cli".into(),
        key: key.into(),
        reason: reason.into(),
    }
}

pub fn apply_overrides(
    mut settings: RunSettings,
    overrides: &Overrides,
) -> Result<RunSettings, DcaError> {
    if let Some(dir) = &overrides.data_dir {
        settings.data_dir = dir.clone();
    }
    if let Some(day) = overrides.invest_day {
        validate_invest_day(day)?;
        settings.schedule.invest_day = day;
    }
    if let Some(symbol) = &overrides.symbol {
        let symbol = symbol.trim();
        if symbol.is_empty() {
            return Err(invalid_flag("symbol", "symbol must not be empty"));
        }
        settings.symbol = symbol.to_string();
    }
    if let Some(symbols) = &overrides.symbols {
        settings.symbols =
            parse_symbol_pair(symbols).map_err(|reason| invalid_flag("symbols", reason))?;
    }
    if let Some(weights) = &overrides.weights {
        let (a, b) = parse_weight_pair(weights).map_err(|reason| invalid_flag("weights", reason))?;
        settings.weights = AssetWeights::new(a, b)?;
    }
    if let Some(amount) = overrides.base_amount {
        if !(amount > 0.0) {
            return Err(invalid_flag("base_amount", "base_amount must be positive"));
        }
        settings.base_amount = amount;
    }
    if let Some(amount) = overrides.monthly_total {
        if !(amount > 0.0) {
            return Err(invalid_flag("monthly_total", "monthly_total must be positive"));
        }
        settings.monthly_total = amount;
    }
    if let Some(amount) = overrides.annual_pool {
        if !(amount >= 0.0) {
            return Err(invalid_flag("annual_pool", "annual_pool must be non-negative"));
        }
        settings.annual_pool = amount;
    }
    Ok(settings)
}

fn fetch_required(
    data_port: &dyn PriceDataPort,
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<PricePoint>, DcaError> {
    let points = data_port.fetch_closes(symbol, start, end)?;
    if points.is_empty() {
        return Err(DcaError::NoData {
            symbol: symbol.to_string(),
        });
    }
    info!(
        "{}: {} closes, {} to {}",
        symbol,
        points.len(),
        points[0].date,
        points[points.len() - 1].date
    );
    Ok(points)
}

/// The volatility index is optional; a missing series only disables
/// index-gated tiers.
fn fetch_index(
    data_port: &dyn PriceDataPort,
    symbol: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<Vec<PricePoint>, DcaError> {
    match data_port.fetch_closes(symbol, start, end) {
        Ok(points) => Ok(points),
        Err(DcaError::NoData { .. }) => {
            warn!("{}: no data, index-gated tiers disabled", symbol);
            Ok(Vec::new())
        }
        Err(e) => Err(e),
    }
}

pub fn run_ma250_backtest(
    data_port: &dyn PriceDataPort,
    settings: &RunSettings,
) -> Result<BacktestResult, DcaError> {
    let points = fetch_required(
        data_port,
        &settings.symbol,
        settings.start_date,
        settings.end_date,
    )?;
    backtest_ma250_drawdown(
        &settings.symbol,
        &points,
        settings.base_amount,
        &settings.schedule,
    )
}

pub fn run_dip_buy_backtest(
    data_port: &dyn PriceDataPort,
    settings: &RunSettings,
) -> Result<BacktestResult, DcaError> {
    let (symbol_a, symbol_b) = (&settings.symbols.0, &settings.symbols.1);
    let a = fetch_required(data_port, symbol_a, settings.start_date, settings.end_date)?;
    let b = fetch_required(data_port, symbol_b, settings.start_date, settings.end_date)?;
    let index = fetch_index(
        data_port,
        &settings.vix_symbol,
        settings.start_date,
        settings.end_date,
    )?;

    let series = align_two_assets((symbol_a, symbol_b), &a, &b, &index);
    if series.is_empty() {
        return Err(DcaError::NoData {
            symbol: format!("{},{}", symbol_a, symbol_b),
        });
    }
    info!("Aligned {} common sessions", series.len());
    backtest_two_asset_dca_with_pool(&series, &settings.dip_buy_config())
}

pub fn run_backtests(
    data_port: &dyn PriceDataPort,
    settings: &RunSettings,
    selection: StrategySelection,
) -> Result<Vec<BacktestResult>, DcaError> {
    selection
        .keys()
        .into_iter()
        .map(|key| {
            info!("Running {}", key);
            match key {
                StrategyKey::Ma250Drawdown => run_ma250_backtest(data_port, settings),
                StrategyKey::EtfDcaDipBuy => run_dip_buy_backtest(data_port, settings),
            }
        })
        .collect()
}

pub fn run_signals(
    data_port: &dyn PriceDataPort,
    report: &dyn ReportPort,
    out: &mut dyn Write,
    settings: &RunSettings,
    selection: StrategySelection,
    as_of: Option<NaiveDate>,
) -> Result<(), DcaError> {
    let end = as_of.or(settings.end_date);
    for key in selection.keys() {
        match key {
            StrategyKey::Ma250Drawdown => {
                let points = fetch_required(data_port, &settings.symbol, None, end)?;
                let signal = compute_ma250_signal(&settings.symbol, &points, settings.base_amount)?;
                report.write_ma250_signal(out, &signal)?;
            }
            StrategyKey::EtfDcaDipBuy => {
                let (symbol_a, symbol_b) = (&settings.symbols.0, &settings.symbols.1);
                let a = fetch_required(data_port, symbol_a, None, end)?;
                let b = fetch_required(data_port, symbol_b, None, end)?;
                let index = fetch_index(data_port, &settings.vix_symbol, None, end)?;
                let date = as_of.unwrap_or_else(|| {
                    let last_a = a[a.len() - 1].date;
                    let last_b = b[b.len() - 1].date;
                    last_a.max(last_b)
                });
                let signal = compute_dip_buy_signal(
                    date,
                    [(symbol_a.as_str(), &a[..]), (symbol_b.as_str(), &b[..])],
                    &index,
                    &settings.dip_buy_config(),
                )?;
                report.write_dip_buy_signal(out, &signal)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn run_backtest(
    config_path: Option<&PathBuf>,
    strategy: &str,
    overrides: &Overrides,
) -> ExitCode {
    // Stage 1: Resolve strategy selection
    let selection = match strategy.parse::<StrategySelection>() {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    // Stage 2: Load, validate, override config
    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    // Stage 3: Simulate
    let data_port = CsvAdapter::new(settings.data_dir.clone());
    info!("Reading prices from {}", settings.data_dir.display());
    let results = match run_backtests(&data_port, &settings, selection) {
        Ok(r) => r,
        Err(e) => return fail(e),
    };

    // Stage 4: Report
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match TextReport::new().write_comparison(&mut out, &results) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn run_signal(
    config_path: Option<&PathBuf>,
    strategy: &str,
    date: Option<&str>,
    overrides: &Overrides,
) -> ExitCode {
    let selection = match strategy.parse::<StrategySelection>() {
        Ok(s) => s,
        Err(e) => return fail(e),
    };
    let as_of = match date.map(|d| parse_date(d, "date")).transpose() {
        Ok(d) => d,
        Err(e) => return fail(e),
    };
    let settings = match load_settings(config_path, overrides) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let data_port = CsvAdapter::new(settings.data_dir.clone());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match run_signals(
        &data_port,
        &TextReport::new(),
        &mut out,
        &settings,
        selection,
        as_of,
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(e),
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    info!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(e) => return fail(e),
    };
    if let Err(e) = validate_config(&adapter) {
        return fail(e);
    }
    let settings = match build_settings(&adapter) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    eprintln!("data dir:        {}", settings.data_dir.display());
    eprintln!(
        "schedule:        day {} of each month, trailing {}y",
        settings.schedule.invest_day, settings.schedule.trailing_years
    );
    eprintln!(
        "ma250_drawdown:  {} base {:.2}",
        settings.symbol, settings.base_amount
    );
    eprintln!(
        "etf_dca_dip_buy: {},{} weights {},{} monthly {:.2} pool {:.2} index {}",
        settings.symbols.0,
        settings.symbols.1,
        settings.weights.a,
        settings.weights.b,
        settings.monthly_total,
        settings.annual_pool,
        settings.vix_symbol
    );
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: Option<&PathBuf>, data_dir: Option<&PathBuf>) -> ExitCode {
    let overrides = Overrides {
        data_dir: data_dir.cloned(),
        ..Overrides::default()
    };
    let settings = match load_settings(config_path, &overrides) {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    let adapter = CsvAdapter::new(settings.data_dir.clone());
    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => return fail(e),
    };

    if symbols.is_empty() {
        eprintln!("No symbols found in {}", settings.data_dir.display());
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_from(content: &str) -> RunSettings {
        let adapter = FileConfigAdapter::from_string(content).unwrap();
        validate_config(&adapter).unwrap();
        build_settings(&adapter).unwrap()
    }

    #[test]
    fn defaults_without_config() {
        let settings = load_settings(None, &Overrides::default()).unwrap();
        assert_eq!(settings.data_dir, PathBuf::from("data"));
        assert_eq!(settings.schedule, DcaSchedule::default());
        assert_eq!(settings.symbol, "QQQ");
        assert_eq!(settings.base_amount, 10_000.0);
        assert_eq!(settings.symbols, ("SPY".to_string(), "QQQ".to_string()));
        assert_eq!(settings.weights, AssetWeights::default());
        assert_eq!(settings.monthly_total, 900.0);
        assert_eq!(settings.annual_pool, 4000.0);
        assert_eq!(settings.vix_symbol, "^VIX");
        assert_eq!(settings.start_date, None);
    }

    #[test]
    fn config_values_are_read() {
        let settings = settings_from(
            "[backtest]\ninvest_day = 3\nstart_date = 2010-01-01\n\
             [etf_dca_dip_buy]\nsymbols = VOO,QQQM\nweights = 0.7,0.3\n",
        );
        assert_eq!(settings.schedule.invest_day, 3);
        assert_eq!(settings.start_date, NaiveDate::from_ymd_opt(2010, 1, 1));
        assert_eq!(settings.symbols, ("VOO".to_string(), "QQQM".to_string()));
        assert_eq!(settings.weights, AssetWeights { a: 0.7, b: 0.3 });
        assert_eq!(settings.dip_buy_config().schedule.invest_day, 3);
    }

    #[test]
    fn out_of_range_integers_are_rejected_not_truncated() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\ntrailing_years = 4294967299\n").unwrap();
        assert!(matches!(
            build_settings(&adapter),
            Err(DcaError::ConfigInvalid { key, .. }) if key == "trailing_years"
        ));

        let adapter = FileConfigAdapter::from_string("[backtest]\ninvest_day = -1\n").unwrap();
        assert!(matches!(
            build_settings(&adapter),
            Err(DcaError::ConfigInvalid { key, .. }) if key == "invest_day"
        ));
    }

    #[test]
    fn overrides_win() {
        let base = settings_from("[ma250_drawdown]\nsymbol = SPY\n");
        let overrides = Overrides {
            symbol: Some("QQQ".into()),
            weights: Some("0.4,0.6".into()),
            invest_day: Some(20),
            annual_pool: Some(0.0),
            ..Overrides::default()
        };
        let settings = apply_overrides(base, &overrides).unwrap();
        assert_eq!(settings.symbol, "QQQ");
        assert_eq!(settings.weights, AssetWeights { a: 0.4, b: 0.6 });
        assert_eq!(settings.schedule.invest_day, 20);
        assert_eq!(settings.annual_pool, 0.0);
    }

    #[test]
    fn bad_overrides_are_rejected() {
        let base = settings_from("");
        let bad_day = Overrides {
            invest_day: Some(31),
            ..Overrides::default()
        };
        assert!(matches!(
            apply_overrides(base.clone(), &bad_day),
            Err(DcaError::InvalidInvestDay(31))
        ));

        let bad_weights = Overrides {
            weights: Some("0.9,0.9".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            apply_overrides(base.clone(), &bad_weights),
            Err(DcaError::InvalidWeights(..))
        ));

        let one_symbol = Overrides {
            symbols: Some("SPY".into()),
            ..Overrides::default()
        };
        assert!(matches!(
            apply_overrides(base, &one_symbol),
            Err(DcaError::ConfigInvalid { key, .. }) if key == "symbols"
        ));
    }

    #[test]
    fn strategy_selection_parses() {
        assert_eq!(
            "all".parse::<StrategySelection>().unwrap(),
            StrategySelection::All
        );
        assert_eq!(
            "etf_dca_dip_buy".parse::<StrategySelection>().unwrap(),
            StrategySelection::Single(StrategyKey::EtfDcaDipBuy)
        );
        assert_eq!(StrategySelection::All.keys().len(), 2);
        match "nope".parse::<StrategySelection>() {
            Err(DcaError::UnknownStrategy { available, .. }) => {
                assert!(available.ends_with("all"))
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_backtest_flags() {
        let cli = Cli::try_parse_from([
            "dcatrader",
            "backtest",
            "--strategy",
            "all",
            "--weights",
            "0.6,0.4",
            "--invest-day",
            "15",
            "--data-dir",
            "/tmp/prices",
        ])
        .unwrap();
        match cli.command {
            Command::Backtest {
                config,
                strategy,
                overrides,
            } => {
                assert!(config.is_none());
                assert_eq!(strategy, "all");
                assert_eq!(overrides.weights.as_deref(), Some("0.6,0.4"));
                assert_eq!(overrides.invest_day, Some(15));
                assert_eq!(overrides.data_dir, Some(PathBuf::from("/tmp/prices")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
