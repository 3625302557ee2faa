//! CycleGate CLI: replay recorded ticks through the breakout strategy.
//!
//! Commands:
//! - `replay`: warm up from 1-minute history, then replay ticks against the
//!   paper gateway and print a summary
//! - `init-config`: write the default strategy config as TOML

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cyclegate_core::data::{load_minute_bars_csv, load_ticks_csv};
use cyclegate_core::execution::PaperGateway;
use cyclegate_core::{run_replay, BreakoutStrategy, ReplaySummary, StrategyConfig};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cyclegate",
    about = "CycleGate CLI: cycle-gated breakout strategy replay"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a tick CSV through the strategy on a paper gateway.
    Replay {
        /// Tick CSV (symbol,datetime,last_price,volume,open_interest).
        #[arg(long)]
        ticks: PathBuf,

        /// Strategy config TOML. Defaults are used when omitted.
        #[arg(long)]
        config: Option<PathBuf>,

        /// 1-minute bar CSV used to warm up the indicator window.
        #[arg(long)]
        history: Option<PathBuf>,

        /// Print the summary as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write the default strategy config.
    InitConfig {
        /// Output path. Prints to stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cyclegate=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            ticks,
            config,
            history,
            json,
        } => run_replay_cmd(&ticks, config.as_deref(), history.as_deref(), json),
        Commands::InitConfig { output } => run_init_config(output.as_deref()),
    }
}

fn run_replay_cmd(
    ticks_path: &Path,
    config_path: Option<&Path>,
    history_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    let config = match config_path {
        Some(path) => StrategyConfig::load(path)?,
        None => StrategyConfig::default(),
    };

    let history = match history_path {
        Some(path) => load_minute_bars_csv(path)
            .with_context(|| format!("loading history {}", path.display()))?,
        None => Vec::new(),
    };
    let ticks = load_ticks_csv(ticks_path)
        .with_context(|| format!("loading ticks {}", ticks_path.display()))?;
    if ticks.is_empty() {
        bail!("no ticks in {}", ticks_path.display());
    }
    info!(
        "{}: {} history bars, {} ticks",
        config.symbol,
        history.len(),
        ticks.len()
    );

    let gateway = PaperGateway::with_symbols([config.symbol.clone()]);
    let mut strategy = BreakoutStrategy::new(config, gateway)?;
    strategy.on_init(&history);
    strategy.on_start();
    let summary = run_replay(&mut strategy, &ticks);
    strategy.on_stop();

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }
    Ok(())
}

fn run_init_config(output: Option<&Path>) -> Result<()> {
    let text = StrategyConfig::default().to_toml_string()?;
    match output {
        Some(path) => {
            if path.exists() {
                bail!("{} already exists", path.display());
            }
            std::fs::write(path, &text)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Config written to: {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}

fn print_summary(summary: &ReplaySummary) {
    let vars = &summary.variables;
    println!("Symbol:          {}", summary.symbol);
    println!("Ticks processed: {}", summary.ticks_processed);
    println!("Entries:         {}", summary.entries_submitted);
    println!("Exits:           {}", summary.exits_submitted);
    println!("Stops:           {}", summary.stops_submitted);
    println!("Trades:          {}", summary.trades);
    println!("Final position:  {}", summary.final_position);
    println!("Realized PnL:    {:.2}", summary.realized_pnl);
    match (vars.ma_previous, vars.ma_current) {
        (Some(prev), Some(cur)) => println!("MA prev/current: {prev:.2} / {cur:.2}"),
        _ => println!("MA prev/current: (window warming up)"),
    }
}
