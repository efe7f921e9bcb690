//! Post-Match Report CLI
//!
//! Extraction JSON → match summary / report tables as JSON.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use pmr_cli::Report;
#[cfg(feature = "cli")]
use pmr_core::Side;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "pmr")]
#[command(version = pmr_core::VERSION)]
#[command(about = "Build post-match report tables from an extraction file", long_about = None)]
struct Cli {
    /// Extraction JSON file
    #[arg(long, short = 'i', global = true)]
    input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(long, short = 'o', global = true)]
    out: Option<PathBuf>,

    /// Analysis config JSON (defaults to PMR_PROFILE / environment overrides)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long, global = true, default_value = "false")]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    Home,
    Away,
}

#[cfg(feature = "cli")]
impl From<SideArg> for Side {
    fn from(side: SideArg) -> Self {
        match side {
            SideArg::Home => Side::Home,
            SideArg::Away => Side::Away,
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Full match summary
    Summary,

    /// Team statistics, comparison and categories
    Stats,

    /// Pass network of one side
    PassNetwork {
        #[arg(long, value_enum)]
        side: SideArg,

        /// Override the edge threshold
        #[arg(long)]
        min_passes: Option<usize>,

        /// Include substitutes
        #[arg(long, default_value = "false")]
        all_players: bool,
    },

    /// Zonal control grid
    Zones {
        /// Grid as <cols>x<rows>
        #[arg(long)]
        grid: Option<String>,
    },

    /// Momentum timeline
    Momentum,

    /// Median touch positions of one side
    Positions {
        #[arg(long, value_enum)]
        side: SideArg,

        /// Include substitutes
        #[arg(long, default_value = "false")]
        all_players: bool,
    },

    /// Ranked players
    Top {
        /// Ranking metric (e.g. passes_completed, total_xg, rating)
        #[arg(long, default_value = "total_events")]
        metric: String,

        #[arg(long, value_enum)]
        side: Option<SideArg>,

        #[arg(long)]
        n: Option<usize>,
    },

    /// Cumulative xG of one side
    XgTimeline {
        #[arg(long, value_enum)]
        side: SideArg,
    },

    /// Goals, cards and substitutions
    KeyMoments,
}

#[cfg(feature = "cli")]
fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let Some(input) = cli.input else {
        anyhow::bail!("--input <extraction.json> is required");
    };
    let mut config = pmr_cli::load_config(cli.config.as_deref())?;

    let report = match cli.command {
        Commands::Summary => Report::Summary,
        Commands::Stats => Report::Stats,
        Commands::PassNetwork {
            side,
            min_passes,
            all_players,
        } => {
            if let Some(n) = min_passes {
                config.pass_network.min_pass_count = n;
            }
            if all_players {
                config.pass_network.starting_xi_only = false;
            }
            Report::PassNetwork { side: side.into() }
        }
        Commands::Zones { grid } => {
            config.apply_overrides(None, grid.as_deref());
            config.validate()?;
            Report::Zones
        }
        Commands::Momentum => Report::Momentum,
        Commands::Positions { side, all_players } => Report::Positions {
            side: side.into(),
            starting_xi_only: !all_players,
        },
        Commands::Top { metric, side, n } => Report::TopPerformers {
            metric,
            side: side.map(Side::from),
            top_n: n,
        },
        Commands::XgTimeline { side } => Report::XgTimeline { side: side.into() },
        Commands::KeyMoments => Report::KeyMoments,
    };

    pmr_cli::run(&input, cli.out.as_deref(), &report, &config, cli.pretty)
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("pmr CLI is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
