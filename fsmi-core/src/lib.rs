//! # fsmi-core
//!
//! Finite state machine table and execution engine for fsmi.
//!
//! This crate provides:
//! - The FSM table and its builder
//! - Parsing of the tabular description format
//! - The symbol-by-symbol execution engine
//! - Run status tracking

pub mod engine;
pub mod error;
pub mod run;
pub mod source;
pub mod table;

pub use engine::{execute, symbols, Engine, Step};
pub use error::CoreError;
pub use run::{Halt, RunStatus, RunSummary};
pub use source::{load_table, parse_table, parse_tuple, LoadOptions};
pub use table::{State, StateNo, Table, TableBuilder, Transition, Tuple};
