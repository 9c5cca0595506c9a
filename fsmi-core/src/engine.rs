//! Execution engine - walks a symbol stream through a table.

use crate::error::CoreError;
use crate::run::{Halt, RunStatus, RunSummary};
use crate::table::{State, Table};

/// Result of one accepted symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step<'t> {
    /// Output of the matched transition.
    pub output: &'t str,
    pub from_index: usize,
    pub to_index: usize,
    /// The destination had no state, so the run stayed put.
    pub dangling: bool,
}

/// A single run against a shared table.
///
/// Runs always start at table index 0. The table is only read, so any
/// number of engines may share it.
#[derive(Debug)]
pub struct Engine<'t> {
    table: &'t Table,
    status: RunStatus,
    /// Index of the last state the run was positioned at.
    index: usize,
    consumed: usize,
    emitted: usize,
}

impl<'t> Engine<'t> {
    /// Creates a run positioned at the initial state.
    pub fn new(table: &'t Table) -> Result<Self, CoreError> {
        if table.is_empty() {
            tracing::debug!("refusing to run an empty table");
            return Err(CoreError::EmptyTable);
        }

        Ok(Self {
            table,
            status: RunStatus::default(),
            index: 0,
            consumed: 0,
            emitted: 0,
        })
    }

    pub fn status(&self) -> RunStatus {
        self.status
    }

    /// Returns the state the run is positioned at (or halted in).
    pub fn current_state(&self) -> &'t State {
        &self.table.states()[self.index]
    }

    /// Returns the number of symbols consumed so far.
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Consumes one symbol.
    ///
    /// A symbol with no matching transition halts the run and returns
    /// [`CoreError::RejectedInput`]. A matching transition whose destination
    /// does not exist leaves the run at its current state.
    pub fn step(&mut self, symbol: char) -> Result<Step<'t>, CoreError> {
        let Some(from_index) = self.status.index() else {
            return Err(CoreError::Halted);
        };

        let state = self.current_state();
        let position = self.consumed;
        self.consumed += 1;

        let Some(transition) = state.transition_for(symbol) else {
            tracing::debug!(
                "rejected {:?} at position {} in state {}",
                symbol,
                position,
                state.state_no
            );
            self.status = RunStatus::Halted(Halt::Rejected {
                symbol,
                state_no: state.state_no,
                position,
            });
            return Err(CoreError::RejectedInput {
                state_no: state.state_no,
                symbol,
                position,
            });
        };

        let (to_index, dangling) = match self.table.index_of(transition.next) {
            Some(index) => (index, false),
            None => {
                tracing::debug!(
                    "state {} has no entry, staying in state {}",
                    transition.next,
                    state.state_no
                );
                (from_index, true)
            }
        };

        tracing::trace!(
            "{} --{:?}/{}--> {}",
            state.state_no,
            symbol,
            transition.output,
            self.table.states()[to_index].state_no
        );

        self.emitted += 1;
        self.index = to_index;
        self.status = RunStatus::Running { index: to_index };

        Ok(Step {
            output: &transition.output,
            from_index,
            to_index,
            dangling,
        })
    }

    /// Consumes every symbol, passing each output to `emit` as soon as its
    /// transition is taken.
    ///
    /// Stops at the first rejected symbol; outputs already emitted stand.
    pub fn execute<I, F>(mut self, symbols: I, mut emit: F) -> Result<RunSummary, CoreError>
    where
        I: IntoIterator<Item = char>,
        F: FnMut(&'t str) -> std::io::Result<()>,
    {
        for symbol in symbols {
            let step = self.step(symbol)?;
            emit(step.output)?;
        }
        Ok(self.finish())
    }

    /// Ends the run, accepting if it has not halted.
    pub fn finish(self) -> RunSummary {
        let halt = match self.status {
            RunStatus::Halted(halt) => halt,
            RunStatus::Running { .. } => Halt::Accepted,
        };

        RunSummary {
            consumed: self.consumed,
            emitted: self.emitted,
            final_index: self.index,
            final_state_no: self.current_state().state_no,
            halt,
        }
    }
}

/// Runs `symbols` against `table` from the initial state.
pub fn execute<'t, I, F>(table: &'t Table, symbols: I, emit: F) -> Result<RunSummary, CoreError>
where
    I: IntoIterator<Item = char>,
    F: FnMut(&'t str) -> std::io::Result<()>,
{
    Engine::new(table)?.execute(symbols, emit)
}

/// Splits a line into symbols, one per character.
pub fn symbols(line: &str) -> std::str::Chars<'_> {
    line.chars()
}
