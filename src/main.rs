use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, error, info, trace};
use user_activity::config::Config;
use user_activity::records::EnrichedUserRecord;
use user_activity::report::{render_table, ACTIVITY_JSON};
use user_activity::source::{load_local, CachePolicy, HttpSource};

/// A collection could not be loaded from the endpoint or a local copy.
const EXIT_UNAVAILABLE: i32 = 2;

/// Rank users by post activity and write JSON and CSV reports
#[derive(Parser)]
#[command(name = "user-activity")]
#[command(about = "Rank users by post activity and write JSON and CSV reports", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (default: ./user-activity.toml if present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Load users and posts, rank users and write reports (default command)
    Run(RunArgs),
    /// Print the last written activity ranking
    Show,
}

#[derive(Args, Default)]
struct RunArgs {
    /// Number of users to keep in the ranking
    #[arg(short = 'n', long)]
    top: Option<usize>,

    /// Ignore local copies and fetch both collections
    #[arg(long)]
    refresh: bool,

    /// Fetch again when a local copy is older than this (e.g. "30m", "1h")
    #[arg(long, value_parser = parse_duration, conflicts_with = "refresh")]
    max_age: Option<Duration>,

    /// Directory holding users.json and posts.json
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Directory for the activity JSON and CSV reports
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Leave users without posts out of the reports instead of counting 0
    #[arg(long)]
    drop_missing: bool,

    /// Do not print the ranking table
    #[arg(short, long)]
    quiet: bool,
}

fn parse_duration(value: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let command = cli.command.unwrap_or(Commands::Run(RunArgs::default()));
    if let Commands::Run(args) = &command {
        apply_run_args(&mut config, args);
    }

    // `show` only reads reports; it must not clobber the last run's log
    let log_file = match &command {
        Commands::Run(_) => Some(config.log_file.as_path()),
        Commands::Show => None,
    };
    if let Err(e) = user_activity::logging::init(cli.verbose, log_file) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    debug!("user-activity started with verbosity level: {}", cli.verbose);
    trace!("Full CLI args: {:?}", std::env::args().collect::<Vec<_>>());

    let result = match command {
        Commands::Run(args) => run(&config, &args).await,
        Commands::Show => Ok(show(&config)),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("Fatal error: {}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn apply_run_args(config: &mut Config, args: &RunArgs) {
    if let Some(top) = args.top {
        config.top_n = top;
    }
    if let Some(max_age) = args.max_age {
        config.max_age = Some(max_age);
    }
    if let Some(dir) = &args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if args.drop_missing {
        config.missing_count = user_activity::aggregate::MissingCountPolicy::Drop;
    }
}

async fn run(config: &Config, args: &RunArgs) -> anyhow::Result<i32> {
    let source = HttpSource::new(config.timeout)?;
    let policy = if args.refresh {
        CachePolicy::Refresh
    } else {
        config.cache_policy()
    };

    let summary = user_activity::pipeline::run(config, &source, &policy).await?;

    if !args.quiet {
        print!("{}", render_table(&summary.ranked));
    }
    for path in &summary.written {
        info!("Wrote {}", path.display());
    }

    if summary.is_complete() {
        Ok(0)
    } else {
        eprintln!(
            "Warning: source data unavailable (users: {}, posts: {})",
            summary.users_origin, summary.posts_origin
        );
        Ok(EXIT_UNAVAILABLE)
    }
}

fn show(config: &Config) -> i32 {
    let path = config.output_dir.join(ACTIVITY_JSON);
    match load_local::<Vec<EnrichedUserRecord>>(&path) {
        Some(records) => {
            print!("{}", render_table(&records));
            0
        }
        None => {
            eprintln!(
                "No activity report at {}; run `user-activity run` first",
                path.display()
            );
            EXIT_UNAVAILABLE
        }
    }
}
