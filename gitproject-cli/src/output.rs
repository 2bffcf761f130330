//! Colored per-module report lines

use colored::{Color, Colorize};
use gitproject_core::{Observation, ReconcileOutcome, RepoState};

const MARKER: &str = "██";

/// Marker color for a classified state
pub fn state_color(state: &RepoState) -> Color {
    match state {
        RepoState::Missing => Color::Cyan,
        RepoState::Dirty => Color::Yellow,
        RepoState::AheadOfRemote => Color::Blue,
        RepoState::BehindRemote { .. } => Color::Red,
        RepoState::UpToDate => Color::Green,
        RepoState::AdapterError { .. } => Color::Magenta,
    }
}

/// Marker color for a reconcile outcome
pub fn outcome_color(outcome: &ReconcileOutcome) -> Color {
    match outcome {
        ReconcileOutcome::Cloned | ReconcileOutcome::Updated => Color::Green,
        ReconcileOutcome::Failed { .. } => Color::Magenta,
    }
}

/// Status line for one module
pub fn status_line(name: &str, observation: &Observation) -> String {
    let mut line = format!(
        "{} {}: {}",
        MARKER.color(state_color(&observation.state)),
        name,
        observation.state
    );
    if let Some(branch) = &observation.head_branch {
        line.push_str(&format!(" [{}]", branch).dimmed().to_string());
    }
    line
}

/// Outcome line for one module
pub fn outcome_line(name: &str, outcome: &ReconcileOutcome) -> String {
    format!("{} {}: {}", MARKER.color(outcome_color(outcome)), name, outcome)
}
