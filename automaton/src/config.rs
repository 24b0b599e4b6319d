// config.rs - Engine construction parameters

use crate::error::{AutomatonError, Result};
use crate::rule::{RuleTable, window_size};

/// Edge policy for neighbour counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Boundary {
    /// Cells outside the grid are permanently dead.
    #[default]
    Bounded,
    /// Coordinates wrap modulo the grid dimensions.
    Toroidal,
}

/// Radius, rule and boundary for an [`Automaton`](crate::Automaton).
///
/// Defaults to Conway's Game of Life on a bounded grid.
///
/// `radius` is the requested neighbourhood size and is authoritative: the
/// rule carries its own radius, and [`Config::validate`] rejects the pair
/// unless the two agree. Nothing reaches an engine without passing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub radius: usize,
    pub rule: RuleTable,
    pub boundary: Boundary,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            radius: 1,
            rule: RuleTable::conway(),
            boundary: Boundary::Bounded,
        }
    }
}

impl Config {
    pub fn with_radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_rule(mut self, rule: RuleTable) -> Self {
        self.rule = rule;
        self
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = boundary;
        self
    }

    /// Checks the radius (at least 1, window representable) and that the
    /// rule table was built for exactly that radius.
    pub fn validate(self) -> Result<(RuleTable, Boundary)> {
        let expected = match window_size(self.radius) {
            Some(size) if self.radius > 0 => size,
            _ => return Err(AutomatonError::InvalidRadius(self.radius)),
        };
        if self.rule.radius() != self.radius {
            return Err(AutomatonError::InvalidRule {
                radius: self.radius,
                expected,
                actual: self.rule.transitions().len(),
            });
        }
        Ok((self.rule, self.boundary))
    }
}
