use std::{
    fs,
    io::{self, BufReader, Write},
    path::PathBuf,
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;
use ui_core::{ChronologicalFlattener, CombinedState, UiReducer};

mod config;
mod replay;

#[derive(Parser, Debug)]
#[command(about = "Replay recorded UI actions against a wallet state snapshot")]
struct Args {
    /// Combined wallet/UI state as JSON.
    #[arg(long)]
    state: Option<PathBuf>,
    /// JSON-lines action log.
    #[arg(long)]
    events: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print every intermediate UI state instead of only the last one.
    #[arg(long)]
    each_step: bool,
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut settings = config::load_settings(args.config.as_deref())?;
    if args.state.is_some() {
        settings.state_path = args.state;
    }
    if args.events.is_some() {
        settings.events_path = args.events;
    }
    settings.pretty |= args.pretty;
    settings.emit_each_step |= args.each_step;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .with_writer(io::stderr)
        .init();

    let state_path = settings
        .state_path
        .clone()
        .ok_or_else(|| anyhow!("no state file given; pass --state or set UI_REPLAY_STATE"))?;
    let events_path = settings
        .events_path
        .clone()
        .ok_or_else(|| anyhow!("no event log given; pass --events or set UI_REPLAY_EVENTS"))?;

    let raw_state = fs::read_to_string(&state_path)
        .with_context(|| format!("failed to read state file '{}'", state_path.display()))?;
    let mut state: CombinedState = serde_json::from_str(&raw_state)
        .with_context(|| format!("failed to parse state file '{}'", state_path.display()))?;

    let events = fs::File::open(&events_path)
        .with_context(|| format!("failed to open event log '{}'", events_path.display()))?;

    let reducer = UiReducer::<ChronologicalFlattener>::default();
    let steps = replay::replay(&reducer, &mut state, BufReader::new(events))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if settings.emit_each_step {
        for step in &steps {
            write_json(&mut out, step, settings.pretty)?;
        }
    } else {
        let last = reducer_output(&reducer, &state);
        write_json(&mut out, &last, settings.pretty)?;
    }

    Ok(())
}

/// Final UI state, or the fresh default when the log was empty.
fn reducer_output(
    reducer: &UiReducer<ChronologicalFlattener>,
    state: &CombinedState,
) -> ui_core::UiState {
    match state.live_ui() {
        Some(ui) => ui.clone(),
        None => reducer.reduce(state, &ui_core::UiAction::Unrecognized(String::new())),
    }
}

fn write_json(out: &mut impl Write, value: &impl Serialize, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *out, value)?;
    } else {
        serde_json::to_writer(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
