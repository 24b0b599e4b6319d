// pattern.rs - Run-length pattern decoder
//
// A pattern is a list of rows split on the separator symbol. Each row is a
// sequence of `<count><symbol>` tokens where the count is optional (and a
// count of zero means one). Unrecognised characters are skipped, which lets
// foreign dialects carry terminators such as `!`.

use log::warn;

use crate::error::{AutomatonError, Result};
use crate::grid::Grid;

/// The three symbols the decoder recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset {
    pub alive: char,
    pub dead: char,
    pub row_separator: char,
}

impl Charset {
    /// The `o`/`b`/`$` dialect used by community pattern catalogs.
    pub const RLE: Charset = Charset {
        alive: 'o',
        dead: 'b',
        row_separator: '$',
    };

    pub fn new(alive: char, dead: char, row_separator: char) -> Result<Self> {
        let symbols = [alive, dead, row_separator];
        if symbols.iter().any(|c| c.is_ascii_digit()) {
            return Err(AutomatonError::MalformedPattern(format!(
                "charset {:?} uses a digit",
                symbols
            )));
        }
        if alive == dead || alive == row_separator || dead == row_separator {
            return Err(AutomatonError::MalformedPattern(format!(
                "charset {:?} repeats a symbol",
                symbols
            )));
        }
        Ok(Self {
            alive,
            dead,
            row_separator,
        })
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            alive: 'A',
            dead: 'D',
            row_separator: ',',
        }
    }
}

/// Decodes one row into its cells.
fn decode_row(row: &str, charset: &Charset) -> Result<Vec<bool>> {
    let mut cells = Vec::new();
    let mut count: usize = 0;
    for ch in row.chars() {
        if let Some(digit) = ch.to_digit(10) {
            count = count
                .checked_mul(10)
                .and_then(|c| c.checked_add(digit as usize))
                .ok_or_else(|| {
                    AutomatonError::MalformedPattern(format!("run length overflows in {:?}", row))
                })?;
        } else if ch == charset.alive || ch == charset.dead {
            let run = count.max(1);
            let len = cells
                .len()
                .checked_add(run)
                .ok_or_else(|| AutomatonError::MalformedPattern(format!("row {:?} is too long", row)))?;
            cells.try_reserve(run).map_err(|err| {
                AutomatonError::MalformedPattern(format!("run of {} cells in {:?}: {}", run, row, err))
            })?;
            cells.resize(len, ch == charset.alive);
            count = 0;
        }
    }
    if count != 0 {
        warn!("ignoring dangling run length {} in row {:?}", count, row);
    }
    Ok(cells)
}

/// Decodes `description` into a grid with a one-cell dead border.
///
/// The output has `rows + 2` rows and `longest_row + 2` columns; shorter
/// rows are right-padded with dead cells.
pub fn decode(description: &str, charset: &Charset) -> Result<Grid> {
    if description.is_empty() {
        return Err(AutomatonError::MalformedPattern(
            "pattern has no rows".to_string(),
        ));
    }

    let rows = description
        .split(charset.row_separator)
        .map(|row| decode_row(row, charset))
        .collect::<Result<Vec<_>>>()?;

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let mut grid = Grid::try_new(rows.len() + 2, width + 2)?;
    for (r, cells) in rows.iter().enumerate() {
        for (c, &alive) in cells.iter().enumerate() {
            grid.set(r + 1, c + 1, alive);
        }
    }
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interior(grid: &Grid) -> Vec<Vec<bool>> {
        (1..grid.rows() - 1)
            .map(|r| grid.row(r)[1..grid.cols() - 1].to_vec())
            .collect()
    }

    #[test]
    fn run_lengths_expand() {
        let grid = decode("3A2D,D3A", &Charset::default()).unwrap();
        assert_eq!(grid.dimensions(), (4, 7));
        assert_eq!(
            interior(&grid),
            vec![
                vec![true, true, true, false, false],
                vec![false, true, true, true, false],
            ]
        );
        assert!(grid.border_is_dead());
    }

    #[test]
    fn zero_count_means_one() {
        let grid = decode("0A", &Charset::default()).unwrap();
        assert_eq!(interior(&grid), vec![vec![true]]);
    }

    #[test]
    fn short_rows_are_padded() {
        let grid = decode("A,3A,", &Charset::default()).unwrap();
        assert_eq!(grid.dimensions(), (5, 5));
        assert_eq!(
            interior(&grid),
            vec![
                vec![true, false, false],
                vec![true, true, true],
                vec![false, false, false],
            ]
        );
    }

    #[test]
    fn rle_dialect() {
        let grid = decode("bo$2bo$3o!", &Charset::RLE).unwrap();
        assert_eq!(
            interior(&grid),
            vec![
                vec![false, true, false],
                vec![false, false, true],
                vec![true, true, true],
            ]
        );
    }

    #[test]
    fn empty_rows_are_legal() {
        let grid = decode(",,", &Charset::default()).unwrap();
        assert_eq!(grid.dimensions(), (5, 2));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn empty_description_is_rejected() {
        assert!(matches!(
            decode("", &Charset::default()),
            Err(AutomatonError::MalformedPattern(_))
        ));
    }

    #[test]
    fn overflowing_count_is_rejected() {
        let text = format!("{}A", "9".repeat(40));
        assert!(decode(&text, &Charset::default()).is_err());
    }

    #[test]
    fn unallocatable_runs_are_rejected() {
        for text in ["A18446744073709551615A", "18446744073709551615A", "D18446744073709551615D"] {
            assert!(
                matches!(
                    decode(text, &Charset::default()),
                    Err(AutomatonError::MalformedPattern(_))
                ),
                "{}",
                text
            );
        }
    }

    #[test]
    fn charset_symbols_must_be_distinct() {
        assert!(Charset::new('o', 'o', '$').is_err());
        assert!(Charset::new('1', 'b', '$').is_err());
        assert_eq!(Charset::new('o', 'b', '$').unwrap(), Charset::RLE);
    }
}
