// rule.rs - Transition tables indexed by living-neighbour count

use std::fmt;
use std::str::FromStr;

use crate::error::{AutomatonError, Result};

/// What happens to a cell for a given neighbour count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transition {
    Die,
    Stay,
    Live,
}

impl Transition {
    /// Next state of a cell currently in state `alive`.
    #[inline]
    pub fn apply(self, alive: bool) -> bool {
        match self {
            Transition::Die => false,
            Transition::Stay => alive,
            Transition::Live => true,
        }
    }

    fn symbol(self) -> char {
        match self {
            Transition::Die => 'D',
            Transition::Stay => 'S',
            Transition::Live => 'L',
        }
    }
}

/// Number of cells in the `(2r+1) x (2r+1)` window, or `None` if it does
/// not fit in a `usize`.
pub fn window_size(radius: usize) -> Option<usize> {
    let side = radius.checked_mul(2)?.checked_add(1)?;
    side.checked_mul(side)
}

/// Validated rule table: exactly one transition per neighbour count
/// `0..window_size(radius)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleTable {
    radius: usize,
    transitions: Vec<Transition>,
}

impl RuleTable {
    pub fn new(radius: usize, transitions: Vec<Transition>) -> Result<Self> {
        if radius == 0 {
            return Err(AutomatonError::InvalidRadius(radius));
        }
        let expected = window_size(radius).ok_or(AutomatonError::InvalidRadius(radius))?;
        if transitions.len() != expected {
            return Err(AutomatonError::InvalidRule {
                radius,
                expected,
                actual: transitions.len(),
            });
        }
        Ok(Self { radius, transitions })
    }

    /// Conway's Game of Life: stay on 2, live on 3, die otherwise.
    pub fn conway() -> Self {
        use Transition::*;
        Self {
            radius: 1,
            transitions: vec![Die, Die, Stay, Live, Die, Die, Die, Die, Die],
        }
    }

    /// Builds a table from `-1` (die), `0` (stay) and `1` (live) switches.
    /// Any other value is rejected as an invalid rule.
    pub fn from_switches(radius: usize, switches: &[i8]) -> Result<Self> {
        let transitions = switches
            .iter()
            .enumerate()
            .map(|(index, &switch)| match switch {
                -1 => Ok(Transition::Die),
                0 => Ok(Transition::Stay),
                1 => Ok(Transition::Live),
                other => Err(AutomatonError::MalformedRule(format!(
                    "switch {} at count {} is not -1, 0 or 1",
                    other, index
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        Self::new(radius, transitions)
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Transition for `count` living neighbours. Counts beyond the window
    /// cannot occur for a validated table, so they map to `Die`.
    #[inline]
    pub fn lookup(&self, count: usize) -> Transition {
        self.transitions.get(count).copied().unwrap_or(Transition::Die)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::conway()
    }
}

/// Compact text form, one `D`/`S`/`L` per count, e.g. `DDSLDDDDD` for Conway.
/// The radius is inferred from the length.
impl FromStr for RuleTable {
    type Err = AutomatonError;

    fn from_str(s: &str) -> Result<Self> {
        let transitions = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .enumerate()
            .map(|(index, c)| match c.to_ascii_uppercase() {
                'D' => Ok(Transition::Die),
                'S' => Ok(Transition::Stay),
                'L' => Ok(Transition::Live),
                _ => Err(AutomatonError::MalformedRule(format!(
                    "unknown transition symbol {:?} at count {} in {:?}",
                    c, index, s
                ))),
            })
            .collect::<Result<Vec<_>>>()?;

        // smallest radius whose window covers the table
        let mut radius = 1;
        while window_size(radius).is_some_and(|size| size < transitions.len()) {
            radius += 1;
        }
        Self::new(radius, transitions)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for transition in &self.transitions {
            write!(f, "{}", transition.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_sizes() {
        assert_eq!(window_size(1), Some(9));
        assert_eq!(window_size(2), Some(25));
        assert_eq!(window_size(3), Some(49));
        assert_eq!(window_size(usize::MAX), None);
        assert_eq!(window_size(usize::MAX / 2), None);
    }

    #[test]
    fn length_must_match_radius() {
        let err = RuleTable::new(2, RuleTable::conway().transitions().to_vec()).unwrap_err();
        assert_eq!(
            err,
            AutomatonError::InvalidRule {
                radius: 2,
                expected: 25,
                actual: 9
            }
        );
        assert_eq!(
            RuleTable::new(0, vec![Transition::Die]),
            Err(AutomatonError::InvalidRadius(0))
        );
    }

    #[test]
    fn switches_match_conway() {
        let rule = RuleTable::from_switches(1, &[-1, -1, 0, 1, -1, -1, -1, -1, -1]).unwrap();
        assert_eq!(rule, RuleTable::conway());
    }

    #[test]
    fn bad_switch_names_value_and_count() {
        let err = RuleTable::from_switches(1, &[-1, -1, 0, 2, -1, -1, -1, -1, -1]).unwrap_err();
        assert_eq!(
            err,
            AutomatonError::MalformedRule("switch 2 at count 3 is not -1, 0 or 1".to_string())
        );
    }

    #[test]
    fn oversized_radius_is_rejected() {
        assert_eq!(
            RuleTable::new(usize::MAX / 2, vec![]),
            Err(AutomatonError::InvalidRadius(usize::MAX / 2))
        );
        assert_eq!(
            RuleTable::new(usize::MAX, vec![Transition::Die]),
            Err(AutomatonError::InvalidRadius(usize::MAX))
        );
    }

    #[test]
    fn text_form_round_trips() {
        let rule: RuleTable = "DDSLDDDDD".parse().unwrap();
        assert_eq!(rule, RuleTable::conway());
        assert_eq!(rule.to_string(), "DDSLDDDDD");

        let wide: RuleTable = "D".repeat(25).parse().unwrap();
        assert_eq!(wide.radius(), 2);
        assert!("DDSLDDDD".parse::<RuleTable>().is_err());
        assert!(matches!(
            "DDSLXDDDD".parse::<RuleTable>(),
            Err(AutomatonError::MalformedRule(msg)) if msg.contains("'X' at count 4")
        ));
    }

    #[test]
    fn stay_keeps_state() {
        assert!(Transition::Stay.apply(true));
        assert!(!Transition::Stay.apply(false));
        assert!(Transition::Live.apply(false));
        assert!(!Transition::Die.apply(true));
    }
}
