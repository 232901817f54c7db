//! Observation CLI
//!
//! Snapshot file (JSON/YAML) → observation vector, layout, or JSON schema.
//! Results go to stdout; logs go to stderr.

#[cfg(feature = "cli")]
use anyhow::Result;
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "obs_cli")]
#[command(about = "Build and inspect vehicle-soccer observations", long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Build the observation of one player
    Build {
        /// Snapshot file (.json, .yaml, .yml)
        #[arg(long)]
        state: PathBuf,

        /// Observer car id
        #[arg(long)]
        player: Option<u32>,

        /// Build for every player in roster order instead
        #[arg(long, conflicts_with = "player")]
        all: bool,

        /// Observation config file (.json, .yaml, .yml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Observation builder (advanced, padded, extended)
        #[arg(long, default_value = "advanced")]
        builder: String,

        /// Labelled segments instead of a flat array
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Print the labelled segment layout for one player
    Layout {
        #[arg(long)]
        state: PathBuf,

        #[arg(long)]
        player: u32,

        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(long, default_value = "advanced")]
        builder: String,
    },

    /// Print the JSON schema of snapshot or config files
    Schema {
        #[arg(value_enum, default_value = "state")]
        target: SchemaArg,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum SchemaArg {
    State,
    Config,
}

#[cfg(feature = "cli")]
fn init_logging(level: &str) -> Result<()> {
    use tracing::Level;

    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    use obs_cli::{build_for, labelled, load_config, load_state, make_builder, schema_json, SchemaTarget};
    use obs_core::ObservationBuilder;

    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Commands::Build { state, player, all, config, builder, pretty } => {
            let config = load_config(config.as_deref())?;
            let builder = make_builder(&builder, config)?;
            let state = load_state(&state)?;

            if all {
                let mut rows = Vec::with_capacity(state.players.len());
                for p in &state.players {
                    rows.push(build_for(&builder, &state, p.car_id)?.into_vec());
                }
                println!("{}", serde_json::to_string(&rows)?);
                return Ok(());
            }

            let Some(car_id) = player else {
                anyhow::bail!("either --player <ID> or --all is required");
            };
            let obs = build_for(&builder, &state, car_id)?;
            if pretty {
                let layout = builder.layout(state.player(car_id)?, &state);
                println!("{}", serde_json::to_string_pretty(&labelled(&obs, &layout))?);
            } else {
                println!("{}", obs.to_json()?);
            }
        }

        Commands::Layout { state, player, config, builder } => {
            let config = load_config(config.as_deref())?;
            let builder = make_builder(&builder, config)?;
            let state = load_state(&state)?;

            let layout = builder.layout(state.player(player)?, &state);
            for seg in &layout.segments {
                println!("{:>4} {:>3}  {}", seg.offset, seg.len, seg.label);
            }
            println!("total {}", layout.len());
        }

        Commands::Schema { target } => {
            let target = match target {
                SchemaArg::State => SchemaTarget::State,
                SchemaArg::Config => SchemaTarget::Config,
            };
            println!("{}", schema_json(target)?);
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("obs_cli is not available. Enable the 'cli' feature to use it.");
    std::process::exit(1);
}
