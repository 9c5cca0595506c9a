//! Run status tracking.

use crate::table::StateNo;
use serde::{Deserialize, Serialize};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "reason")]
pub enum Halt {
    /// Every symbol was consumed.
    Accepted,
    /// A symbol matched no transition of the current state.
    Rejected {
        symbol: char,
        state_no: StateNo,
        position: usize,
    },
}

/// Status of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Positioned at a table index, accepting symbols.
    Running { index: usize },
    /// Stopped; no further symbols are consumed.
    Halted(Halt),
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Running { index: 0 }
    }
}

impl RunStatus {
    /// Returns true while symbols can still be consumed.
    pub fn is_running(&self) -> bool {
        matches!(self, RunStatus::Running { .. })
    }

    /// Returns true once the run has stopped.
    pub fn is_halted(&self) -> bool {
        matches!(self, RunStatus::Halted(_))
    }

    /// Returns the current table index of a running run.
    pub fn index(&self) -> Option<usize> {
        match self {
            RunStatus::Running { index } => Some(*index),
            RunStatus::Halted(_) => None,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    /// Symbols consumed, including a rejected one.
    pub consumed: usize,

    /// Outputs emitted.
    pub emitted: usize,

    /// Table index the run ended at.
    pub final_index: usize,

    /// Number of the state the run ended at.
    pub final_state_no: StateNo,

    pub halt: Halt,
}

impl RunSummary {
    /// Returns true if the run consumed all of its input.
    pub fn accepted(&self) -> bool {
        self.halt == Halt::Accepted
    }
}
