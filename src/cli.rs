//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::adapters::console_report::{
    render_detail, render_sectors, render_summary, render_table, LEGEND,
};
use crate::adapters::csv_adapter::CsvMetricsAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{invalid, validate_config, DEFAULT_TOP_N};
use crate::domain::error::IntrinsicError;
use crate::domain::recommender::Recommender;
use crate::domain::sector::SectorTable;
use crate::domain::universe::{apply_limit, default_universe, dedup_tickers, parse_tickers};
use crate::domain::valuation::{
    ValuationConfig, WaccInputs, DEFAULT_BETA, DEFAULT_DEBT_TO_EQUITY,
    DEFAULT_MARKET_RISK_PREMIUM, DEFAULT_PROJECTION_YEARS, DEFAULT_RISK_FREE_RATE,
    DEFAULT_TAX_RATE, DEFAULT_TERMINAL_GROWTH_RATE,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

pub const DEFAULT_OUTPUT_PATH: &str = "stock_recommendations.csv";

#[derive(Parser, Debug)]
#[command(name = "intrinsic", about = "Cash-flow based stock valuation and ranking")]
pub struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a ticker universe and rank the results
    Rank {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Fundamentals CSV
        #[arg(short, long)]
        data: Option<PathBuf>,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        top_n: Option<usize>,
        #[arg(long)]
        limit: Option<usize>,
        /// Print the table without writing a CSV report
        #[arg(long)]
        no_csv: bool,
        /// Tickers to analyze; overrides the configured universe
        tickers: Vec<String>,
    },
    /// Print the full analysis of one ticker
    Show {
        ticker: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
    /// Print the sector growth table
    Sectors,
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Rank {
            config,
            data,
            output,
            top_n,
            limit,
            no_csv,
            tickers,
        } => run_rank(&RankArgs {
            config,
            data,
            output,
            top_n,
            limit,
            no_csv,
            tickers,
        }),
        Command::Show {
            ticker,
            config,
            data,
        } => run_show(&ticker, config.as_deref(), data.as_deref()),
        Command::Sectors => run_sectors(),
        Command::Validate { config } => run_validate(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

/// Installs the stderr subscriber. Later calls are no-ops.
pub fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Loads the config file when given, otherwise an empty config.
pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, IntrinsicError> {
    let adapter = match path {
        Some(p) => {
            tracing::info!("Loading config from {}", p.display());
            FileConfigAdapter::from_file(p)?
        }
        None => FileConfigAdapter::empty(),
    };
    validate_config(&adapter)?;
    Ok(adapter)
}

pub fn build_valuation_config(config: &dyn ConfigPort) -> Result<ValuationConfig, IntrinsicError> {
    let growth_override = match config.get_string("valuation", "growth_rate") {
        Some(_) => Some(config.get_double("valuation", "growth_rate", 0.0)?),
        None => None,
    };

    let projection_years = config.get_int(
        "valuation",
        "projection_years",
        DEFAULT_PROJECTION_YEARS as i64,
    )?;
    let projection_years = u32::try_from(projection_years).map_err(|_| {
        invalid(
            "valuation",
            "projection_years",
            format!("{projection_years} is out of range"),
        )
    })?;

    Ok(ValuationConfig {
        wacc: WaccInputs {
            risk_free_rate: config.get_double(
                "valuation",
                "risk_free_rate",
                DEFAULT_RISK_FREE_RATE,
            )?,
            market_risk_premium: config.get_double(
                "valuation",
                "market_risk_premium",
                DEFAULT_MARKET_RISK_PREMIUM,
            )?,
            beta: config.get_double("valuation", "beta", DEFAULT_BETA)?,
            debt_to_equity: config.get_double(
                "valuation",
                "debt_to_equity",
                DEFAULT_DEBT_TO_EQUITY,
            )?,
        },
        terminal_growth_rate: config.get_double(
            "valuation",
            "terminal_growth_rate",
            DEFAULT_TERMINAL_GROWTH_RATE,
        )?,
        projection_years,
        tax_rate: config.get_double("valuation", "tax_rate", DEFAULT_TAX_RATE)?,
        growth_override,
    })
}

/// Rejects a zero count given on the command line.
fn positive_flag(flag: &str, value: Option<usize>) -> Result<Option<usize>, IntrinsicError> {
    match value {
        Some(0) => Err(invalid("cli", flag, format!("{flag} must be at least 1"))),
        other => Ok(other),
    }
}

/// Command-line tickers win over `[universe] tickers`, which wins over the
/// default universe. The limit from the command line wins over
/// `[universe] limit`.
///
/// Each command-line argument is its own comma-separated list; the lists are
/// merged in order with overlap between them dropped.
pub fn resolve_tickers(
    cli_tickers: &[String],
    config: &dyn ConfigPort,
    limit: Option<usize>,
) -> Result<Vec<String>, IntrinsicError> {
    let limit = positive_flag("--limit", limit)?;

    let tickers = if !cli_tickers.is_empty() {
        let mut lists = Vec::new();
        for arg in cli_tickers {
            lists.extend(parse_tickers(arg)?);
        }
        let requested = lists.len();
        let merged = dedup_tickers(lists);
        if merged.len() < requested {
            tracing::debug!(
                "dropped {} repeated tickers from the command line",
                requested - merged.len()
            );
        }
        merged
    } else if let Some(configured) = config.get_string("universe", "tickers") {
        parse_tickers(&configured)?
    } else {
        default_universe()
    };

    let limit = match limit {
        Some(l) => Some(l),
        None if config.get_string("universe", "limit").is_some() => {
            let configured = config.get_int("universe", "limit", 0)?;
            Some(usize::try_from(configured).map_err(|_| {
                invalid("universe", "limit", "limit must be a positive integer")
            })?)
        }
        None => None,
    };
    Ok(apply_limit(tickers, limit))
}

pub fn resolve_data_path(
    cli_path: Option<&Path>,
    config: &dyn ConfigPort,
) -> Result<PathBuf, IntrinsicError> {
    if let Some(p) = cli_path {
        return Ok(p.to_path_buf());
    }
    config
        .get_string("data", "fundamentals_path")
        .map(PathBuf::from)
        .ok_or_else(|| IntrinsicError::ConfigMissing {
            section: "data".into(),
            key: "fundamentals_path".into(),
        })
}

pub fn resolve_top_n(
    cli_top_n: Option<usize>,
    config: &dyn ConfigPort,
) -> Result<usize, IntrinsicError> {
    if let Some(top_n) = positive_flag("--top-n", cli_top_n)? {
        return Ok(top_n);
    }
    let configured = config.get_int("report", "top_n", DEFAULT_TOP_N)?;
    usize::try_from(configured)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| invalid("report", "top_n", "top_n must be at least 1"))
}

/// `--no-csv` wins; otherwise `[report] write_csv`, default true.
pub fn resolve_write_csv(no_csv: bool, config: &dyn ConfigPort) -> Result<bool, IntrinsicError> {
    if no_csv {
        return Ok(false);
    }
    config.get_bool("report", "write_csv", true)
}

pub fn resolve_output_path(cli_path: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    cli_path
        .map(Path::to_path_buf)
        .or_else(|| config.get_string("report", "output_path").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH))
}

pub struct RankArgs {
    pub config: Option<PathBuf>,
    pub data: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub top_n: Option<usize>,
    pub limit: Option<usize>,
    pub no_csv: bool,
    pub tickers: Vec<String>,
}

pub fn run_rank(args: &RankArgs) -> Result<(), IntrinsicError> {
    let config = load_config(args.config.as_deref())?;
    let valuation = build_valuation_config(&config)?;
    let tickers = resolve_tickers(&args.tickers, &config, args.limit)?;
    let data_path = resolve_data_path(args.data.as_deref(), &config)?;
    let top_n = resolve_top_n(args.top_n, &config)?;
    let write_csv = resolve_write_csv(args.no_csv, &config)?;

    tracing::info!("Loading fundamentals from {}", data_path.display());
    let metrics = CsvMetricsAdapter::from_path(&data_path)?;
    if metrics.is_empty() {
        tracing::warn!("{} has no usable rows", data_path.display());
    } else {
        tracing::info!("Fundamentals loaded for {} tickers", metrics.len());
    }
    let sectors = SectorTable::builtin();
    let mut recommender = Recommender::new(&metrics, &sectors, &valuation);
    let report = recommender.analyze_universe(&tickers, top_n);

    if report.analyzed == 0 {
        return Err(IntrinsicError::NoResults);
    }

    println!("{}", render_table(&report.ranked));
    println!("{LEGEND}");
    println!(
        "{}",
        render_summary(report.analyzed, report.total(), report.ranked.len())
    );

    if write_csv {
        let output = resolve_output_path(args.output.as_deref(), &config);
        CsvReportAdapter.write(&report.ranked, &output)?;
        tracing::info!("Report written to: {}", output.display());
    }
    Ok(())
}

fn run_show(
    ticker: &str,
    config_path: Option<&Path>,
    data_path: Option<&Path>,
) -> Result<(), IntrinsicError> {
    let config = load_config(config_path)?;
    let valuation = build_valuation_config(&config)?;
    let data_path = resolve_data_path(data_path, &config)?;

    let metrics = CsvMetricsAdapter::from_path(&data_path)?;
    let sectors = SectorTable::builtin();
    let recommender = Recommender::new(&metrics, &sectors, &valuation);
    let rec = recommender
        .analyze_stock(&ticker.trim().to_uppercase())
        .map_err(|s| s.into_error())?;

    print!("{}", render_detail(&rec));
    Ok(())
}

fn run_sectors() -> Result<(), IntrinsicError> {
    print!("{}", render_sectors(&SectorTable::builtin()));
    Ok(())
}

fn run_validate(config_path: &Path) -> Result<(), IntrinsicError> {
    let config = load_config(Some(config_path))?;
    build_valuation_config(&config)?;
    resolve_tickers(&[], &config, None)?;
    eprintln!("Config validated successfully");
    Ok(())
}
