use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use fuzzy_blt::config::{load_config, validate_config, Config};
use fuzzy_blt::dataset::{find_household, load_households, save_ranked_csv};
use fuzzy_blt::output;
use fuzzy_blt::plot::{self, ChartSizes};
use fuzzy_blt::scoring::{rank_households, validate_scorer, FuzzyScorer};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_OUTPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Table,
    Tsv,
    Json,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Household CSV (columns: id, income, debt in thousands)
    input: Option<PathBuf>,

    /// Ranked CSV output path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of top households to export
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Directory for the rendered charts
    #[arg(long, value_name = "DIR")]
    charts: Option<PathBuf>,

    /// Skip chart rendering
    #[arg(long)]
    no_charts: bool,

    /// How to print the ranking on stdout
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    format: Format,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score, rank and export households (default if no subcommand)
    Rank(RankArgs),
    /// Show how a single household was scored
    Explain {
        /// Household CSV
        input: PathBuf,
        /// Identifier of the household to explain
        id: String,
    },
    /// Render only the membership-function charts
    Curves {
        /// Output directory (defaults to the configured chart directory)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(name = "fuzzy-blt")]
#[command(about = "Fuzzy-logic household scoring for direct cash assistance", long_about = None)]
#[command(version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/fuzzy-blt/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(flatten)]
    rank: RankArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Why a run stopped, mapped to an exit code in `main`.
enum Failure {
    Config(Vec<String>),
    Input(anyhow::Error),
    Output(anyhow::Error),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Config(_) => EXIT_CONFIG,
            Failure::Input(_) => EXIT_INPUT,
            Failure::Output(_) => EXIT_OUTPUT,
        }
    }

    fn report(&self) {
        match self {
            Failure::Config(errors) => {
                eprintln!("Config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
            }
            Failure::Input(e) => eprintln!("Input error: {:#}", e),
            Failure::Output(e) => eprintln!("Output error: {:#}", e),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "fuzzy_blt=debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_rank(args: RankArgs, mut config: Config) -> Result<(), Failure> {
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(dir) = args.charts {
        config.charts.dir = dir;
    }
    if args.no_charts {
        config.charts.enabled = false;
    }
    validate_config(&config).map_err(Failure::Config)?;

    let input = args
        .input
        .or_else(|| config.input.clone())
        .ok_or_else(|| Failure::Config(vec!["input: no household CSV given".to_string()]))?;

    let households = load_households(&input).map_err(Failure::Input)?;
    info!(count = households.len(), path = %input.display(), "loaded households");

    let scorer = FuzzyScorer::STANDARD;
    let ranking = rank_households(&households, &scorer);
    if !ranking.excluded.is_empty() {
        warn!(
            excluded = ranking.excluded.len(),
            "households left out of the ranking because no rule fired"
        );
    }

    let top = ranking.top(config.top_n);
    save_ranked_csv(&config.output, top).map_err(Failure::Output)?;
    info!(rows = top.len(), path = %config.output.display(), "wrote ranked households");

    if config.charts.enabled {
        let written = plot::render_all(
            &config.charts.dir,
            &ranking.ranked,
            &scorer.functions,
            ChartSizes {
                scatter: config.charts.scatter_size,
                curves: config.charts.curve_size,
            },
        )
        .map_err(Failure::Output)?;
        for path in written {
            info!(path = %path.display(), "rendered chart");
        }
    }

    match args.format {
        Format::Table => {
            println!("{}", output::format_ranked_table(top, output::should_use_colors()));
        }
        Format::Tsv => {
            if !top.is_empty() {
                println!("{}", output::format_tsv(top));
            }
        }
        Format::Json => {
            let json = output::format_json(top).map_err(|e| {
                Failure::Output(anyhow::Error::new(e).context("Failed to encode ranking"))
            })?;
            println!("{}", json);
        }
    }

    Ok(())
}

fn run_explain(input: PathBuf, id: String) -> Result<(), Failure> {
    let households = load_households(&input).map_err(Failure::Input)?;
    // Ids must be unique so the printed rank belongs to this household
    let household = find_household(&households, &id).map_err(|e| {
        Failure::Input(
            anyhow::Error::new(e)
                .context(format!("Failed to select household from {}", input.display())),
        )
    })?;

    let scorer = FuzzyScorer::STANDARD;
    let ranking = rank_households(&households, &scorer);
    let rank = ranking.find(&id).map(|(idx, _)| idx + 1);
    let breakdown = scorer.explain(household);

    println!(
        "{}",
        output::format_breakdown(household, &breakdown, rank, output::should_use_colors())
    );
    Ok(())
}

fn run_curves(dir: Option<PathBuf>, config: Config) -> Result<(), Failure> {
    let dir = dir.unwrap_or(config.charts.dir);
    let written = plot::render_curve_charts(
        &dir,
        &FuzzyScorer::STANDARD.functions,
        config.charts.curve_size,
    )
    .map_err(Failure::Output)?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let start_time = Instant::now();

    // Load config
    let config_path = cli.config.map(PathBuf::from);
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate the fixed rule base at startup
    if let Err(errors) = validate_scorer(&FuzzyScorer::STANDARD) {
        Failure::Config(errors).report();
        std::process::exit(EXIT_CONFIG);
    }

    let command = cli.command.unwrap_or(Commands::Rank(cli.rank));
    let result = match command {
        Commands::Rank(args) => run_rank(args, config),
        Commands::Explain { input, id } => run_explain(input, id),
        Commands::Curves { dir } => run_curves(dir, config),
    };

    let elapsed = Duration::from_millis(start_time.elapsed().as_millis() as u64);
    debug!(elapsed = %humantime::format_duration(elapsed), "finished");

    match result {
        Ok(()) => std::process::exit(EXIT_SUCCESS),
        Err(failure) => {
            failure.report();
            std::process::exit(failure.exit_code());
        }
    }
}
