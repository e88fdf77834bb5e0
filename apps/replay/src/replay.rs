//! Folds a recorded action log through the UI reducer.

use std::io::BufRead;

use anyhow::{Context, Result};
use shared::protocol::RawAction;
use tracing::{debug, info};
use ui_core::{CombinedState, PendingActionFlattener, UiAction, UiReducer, UiState};

/// Parses one JSON-lines record and validates it into a typed action.
pub fn parse_action_line(line: &str) -> Result<UiAction> {
    let raw: RawAction = serde_json::from_str(line).context("invalid action envelope")?;
    let action = UiAction::try_from(raw)?;
    Ok(action)
}

/// Applies every action in `events` to `state`, returning each intermediate
/// UI snapshot. Blank lines are skipped; the first invalid line aborts.
pub fn replay<F, R>(
    reducer: &UiReducer<F>,
    state: &mut CombinedState,
    events: R,
) -> Result<Vec<UiState>>
where
    F: PendingActionFlattener,
    R: BufRead,
{
    let mut steps = Vec::new();

    for (index, line) in events.lines().enumerate() {
        let line_no = index + 1;
        let line = line.with_context(|| format!("failed to read event line {line_no}"))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let action = parse_action_line(trimmed)
            .with_context(|| format!("rejected event on line {line_no}"))?;
        debug!(line = line_no, action = action.tag(), "replaying action");

        let next = reducer.reduce(state, &action);
        state.set_ui(next.clone());
        steps.push(next);
    }

    info!(steps = steps.len(), "replay finished");
    Ok(steps)
}

#[cfg(test)]
#[path = "tests/replay_tests.rs"]
mod tests;
