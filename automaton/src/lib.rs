//! Two-dimensional binary cellular automata.
//!
//! A [`Grid`] is built by decoding a run-length [`pattern`] description or by
//! thresholding an intensity matrix, then handed to an [`Automaton`] which
//! evolves it one generation at a time under a neighbour-count
//! [`RuleTable`]. Conway's Game of Life is the default rule.
//!
//! ```
//! use automaton::{Automaton, Charset, decode};
//!
//! let blinker = decode(",3A,", &Charset::default()).unwrap();
//! let mut life = Automaton::new(blinker.clone());
//! life.advance();
//! life.advance();
//! assert_eq!(life.current_generation(), &blinker);
//! ```

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod pattern;
pub mod rule;

pub use config::{Boundary, Config};
pub use engine::Automaton;
pub use error::{AutomatonError, Result};
pub use grid::{Grid, Threshold};
pub use pattern::{Charset, decode};
pub use rule::{RuleTable, Transition, window_size};
