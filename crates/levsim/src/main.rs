use clap::Parser;
use color_eyre::eyre::{WrapErr, eyre};
use levsim::{JsonFileCache, RunConfig, init_logging, load_daily_file, report};
use levsim_core::{LogReturnEstimator, SeriesCache, cache_key, compare_from_history};
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "levsim")]
#[command(about = "Compare simulated leveraged and unleveraged price paths")]
struct Args {
    /// YAML run configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Ticker whose history drives the simulation
    #[arg(short, long)]
    ticker: Option<String>,

    /// Alpha Vantage TIME_SERIES_DAILY JSON file to import for the ticker
    #[arg(long)]
    prices: Option<PathBuf>,

    /// Leverage factor
    #[arg(long)]
    leverage: Option<f64>,

    /// Simulation horizon in years
    #[arg(long)]
    years: Option<u32>,

    /// Years of history used for estimation (default: the horizon)
    #[arg(long)]
    window_years: Option<u32>,

    /// Number of simulated paths
    #[arg(long)]
    paths: Option<usize>,

    #[arg(long)]
    initial_price: Option<f64>,

    /// RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Path to the data directory (default: ~/.levsim/)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(ticker) = &self.ticker {
            config.ticker = ticker.clone();
        }
        if let Some(leverage) = self.leverage {
            config.leverage = leverage;
        }
        if let Some(years) = self.years {
            config.horizon_years = years;
        }
        if let Some(window) = self.window_years {
            config.window_years = Some(window);
        }
        if let Some(paths) = self.paths {
            config.path_count = paths;
        }
        if let Some(price) = self.initial_price {
            config.initial_price = price;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".levsim")
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    let data_dir = args.data_dir.clone().unwrap_or_else(default_data_dir);

    init_logging(&data_dir, &args.log_level)?;

    let mut config = match &args.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };
    args.apply_overrides(&mut config);
    tracing::debug!(?config, "Resolved run configuration");

    let mut cache = JsonFileCache::new(&data_dir);
    let key = cache_key(&config.ticker);
    let series = match &args.prices {
        Some(path) => {
            let series = load_daily_file(path)
                .wrap_err_with(|| format!("importing {}", path.display()))?;
            cache.put(&key, &series)?;
            series
        }
        None => cache.get(&key)?.ok_or_else(|| {
            eyre!(
                "no cached price history for '{}'; import one with --prices",
                config.ticker
            )
        })?,
    };

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(
        ticker = %config.ticker,
        bars = series.len(),
        seed,
        leverage = config.leverage,
        horizon_years = config.horizon_years,
        path_count = config.path_count,
        "Starting simulation"
    );

    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    let estimator = LogReturnEstimator::new(config.steps_per_year);
    let result = compare_from_history(
        &series,
        &estimator,
        config.estimation_window(),
        &config.base_parameters(),
        &mut rng,
    )?;

    tracing::info!(
        annual_return = result.estimate.annual_return,
        annual_volatility = result.estimate.annual_volatility,
        "Simulation finished"
    );

    println!("{}", report::render(&config.ticker, &result));

    Ok(())
}
