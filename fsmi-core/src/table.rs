//! FSM table types.
//!
//! A table is an ordered list of states, each owning its outgoing
//! transitions in the order they were described:
//!
//! ```text
//! 0 a X 1
//! 0 b Y 0
//! 1 b Z 0
//! ```
//!
//! States are addressed by position (index 0 is the initial state). Looking
//! a state up by number always resolves to the first state carrying that
//! number, even when the description produced several.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of a state as written in a description.
pub type StateNo = i32;

/// One parsed description line: `(state_no, input, output, next)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuple {
    pub state_no: StateNo,
    pub input: String,
    pub output: String,
    pub next: StateNo,
}

impl Tuple {
    pub fn new(
        state_no: StateNo,
        input: impl Into<String>,
        output: impl Into<String>,
        next: StateNo,
    ) -> Self {
        Self {
            state_no,
            input: input.into(),
            output: output.into(),
            next,
        }
    }
}

/// An outgoing transition of a state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    /// Input symbol that triggers this transition.
    pub input: String,

    /// Output emitted when the transition is taken.
    pub output: String,

    /// Destination state number.
    pub next: StateNo,
}

impl Transition {
    /// Returns true if this transition accepts the given symbol.
    ///
    /// Inputs longer than one character never match.
    pub fn accepts(&self, symbol: char) -> bool {
        let mut chars = self.input.chars();
        chars.next() == Some(symbol) && chars.next().is_none()
    }
}

/// A state and its transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    pub state_no: StateNo,
    pub transitions: Vec<Transition>,
}

impl State {
    pub fn new(state_no: StateNo) -> Self {
        Self {
            state_no,
            transitions: Vec::new(),
        }
    }

    /// Returns the first transition accepting `symbol`.
    pub fn transition_for(&self, symbol: char) -> Option<&Transition> {
        self.transitions.iter().find(|t| t.accepts(symbol))
    }
}

/// An immutable FSM table.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    states: Vec<State>,

    /// First index of each state number.
    #[serde(skip)]
    index: HashMap<StateNo, usize>,
}

impl Table {
    /// Builds a table from tuples in description order.
    pub fn from_tuples<I>(tuples: I) -> Self
    where
        I: IntoIterator<Item = Tuple>,
    {
        let mut builder = TableBuilder::new();
        for tuple in tuples {
            builder.push(tuple);
        }
        builder.build()
    }

    /// Returns the number of states (including duplicate-numbered ones).
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns true if the table has no states.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns all states in construction order.
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the state at the given position.
    pub fn state(&self, index: usize) -> Option<&State> {
        self.states.get(index)
    }

    /// Returns the position of the first state numbered `state_no`.
    pub fn index_of(&self, state_no: StateNo) -> Option<usize> {
        self.index.get(&state_no).copied()
    }

    /// Returns the total number of transitions.
    pub fn transition_count(&self) -> usize {
        self.states.iter().map(|s| s.transitions.len()).sum()
    }

    /// Returns state numbers that appear on more than one state entry,
    /// in order of their second appearance.
    pub fn duplicate_state_nos(&self) -> Vec<StateNo> {
        let mut duplicates = Vec::new();
        for (i, state) in self.states.iter().enumerate() {
            if self.index_of(state.state_no) != Some(i) && !duplicates.contains(&state.state_no)
            {
                duplicates.push(state.state_no);
            }
        }
        duplicates
    }

    /// Returns `(state index, transition)` for every transition whose
    /// destination has no state.
    pub fn dangling_transitions(&self) -> Vec<(usize, &Transition)> {
        self.states
            .iter()
            .enumerate()
            .flat_map(|(i, s)| s.transitions.iter().map(move |t| (i, t)))
            .filter(|(_, t)| !self.index.contains_key(&t.next))
            .collect()
    }
}

/// Incremental table builder.
///
/// Tuples extend the most recently opened state while their number matches
/// it; any other number opens a new state, even if that number was seen
/// before.
#[derive(Debug, Default)]
pub struct TableBuilder {
    states: Vec<State>,
    open: Option<StateNo>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one tuple.
    pub fn push(&mut self, tuple: Tuple) {
        if self.open != Some(tuple.state_no) {
            self.states.push(State::new(tuple.state_no));
            self.open = Some(tuple.state_no);
        }

        let transition = Transition {
            input: tuple.input,
            output: tuple.output,
            next: tuple.next,
        };
        if let Some(state) = self.states.last_mut() {
            state.transitions.push(transition);
        }
    }

    /// Finishes the table.
    pub fn build(self) -> Table {
        let mut index = HashMap::new();
        for (i, state) in self.states.iter().enumerate() {
            index.entry(state.state_no).or_insert(i);
        }

        tracing::debug!(
            "built table: {} states, {} distinct numbers",
            self.states.len(),
            index.len()
        );

        Table {
            states: self.states,
            index,
        }
    }
}
