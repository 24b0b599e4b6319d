// catalog.rs - Named Game of Life patterns, decoded once on first use
//
// Source: https://en.wikipedia.org/wiki/Conway%27s_Game_of_Life#Examples_of_patterns

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;

use crate::grid::Grid;
use crate::pattern::{Charset, decode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StillLife,
    Oscillator,
    Spaceship,
    Gun,
}

pub struct Pattern {
    pub name: &'static str,
    pub category: Category,
    pub description: &'static str,
    pub grid: Grid,
}

const SOURCES: &[(&str, Category, &str)] = &[
    ("Block", Category::StillLife, "AA,AA"),
    ("Beehive", Category::StillLife, "DAA,ADDA,ADDA,DAA"),
    ("Loaf", Category::StillLife, "DAA,ADDA,DADA,DDA"),
    ("Boat", Category::StillLife, "AA,ADA,DA"),
    ("Ship", Category::StillLife, "AA,ADA,DAA"),
    ("Tub", Category::StillLife, "DA,ADA,DA"),
    ("Pond", Category::StillLife, "DAA,ADDA,DAA"),
    ("Blinker", Category::Oscillator, ",3A,"),
    ("Toad", Category::Oscillator, ",D3A,3A,"),
    ("Beacon", Category::Oscillator, "AA,A,3DA,DDAA"),
    (
        "Pulsar",
        Category::Oscillator,
        ",3D3A3D3A,,DA4DADA4DA,DA4DADA4DA,DA4DADA4DA,3D3A3D3A,,3D3A3D3A,DA4DADA4DA,DA4DADA4DA,DA4DADA4DA,,3D3A3D3A,",
    ),
    (
        "Pentadecathlon",
        Category::Oscillator,
        ",,,3D3A,DDA3DA,DA5DA,,A7DA,A7DA,,DA5DA,DDA3DA,3D3A,,,",
    ),
    ("Clock", Category::Oscillator, "DDA,ADA,DADA,DA"),
    ("Glider", Category::Spaceship, "DA,DDA,3A"),
    ("LWSS", Category::Spaceship, "ADDA,4DA,A3DA,D4A,"),
    ("MWSS", Category::Spaceship, "DA,A3DA,5DA,A4DA,D5A,,"),
    ("HWSS", Category::Spaceship, "DDAA,A4DA,6DA,A5DA,D6A,,"),
    (
        "Gosper Glider Gun",
        Category::Gun,
        "24DA,22DADA,12DAA6DAA12DAA,11DA3DA4DAA12DAA,AA8DA5DA3DAA,AA8DA3DADAA4DADA,10DA5DA7DA,11DA3DA,12DAA",
    ),
];

lazy_static! {
    static ref PATTERNS: Vec<Pattern> = SOURCES
        .iter()
        .filter_map(|&(name, category, description)| {
            decode(description, &Charset::default())
                .map(|grid| Pattern {
                    name,
                    category,
                    description,
                    grid,
                })
                .map_err(|err| log::error!("catalog pattern {} failed to decode: {}", name, err))
                .ok()
        })
        .collect();
}

/// Every catalog entry, in catalog order.
pub fn entries() -> &'static [Pattern] {
    &PATTERNS
}

/// Pattern grid by name, ignoring ASCII case.
pub fn get(name: &str) -> Option<&'static Grid> {
    PATTERNS
        .iter()
        .find(|pattern| pattern.name.eq_ignore_ascii_case(name))
        .map(|pattern| &pattern.grid)
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static Pattern> {
    PATTERNS.iter().filter(move |pattern| pattern.category == category)
}

/// A pseudo-random soup with roughly a third of the cells alive, framed by
/// a dead border.
pub fn random(rows: usize, cols: usize, seed: u64) -> Grid {
    let mut grid = Grid::new(rows, cols);

    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    let mut state = hasher.finish();

    for row in 1..rows.saturating_sub(1) {
        for col in 1..cols.saturating_sub(1) {
            state = state.wrapping_mul(1103515245).wrapping_add(12345);
            grid.set(row, col, (state >> 16) % 3 == 0);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_source_decodes() {
        assert_eq!(entries().len(), SOURCES.len());
        for pattern in entries() {
            assert!(pattern.grid.border_is_dead(), "{}", pattern.name);
            assert!(pattern.grid.population() > 0, "{}", pattern.name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        let block = get("block").unwrap();
        assert_eq!(block.dimensions(), (4, 4));
        assert_eq!(block.population(), 4);
        assert!(get("no such pattern").is_none());
    }

    #[test]
    fn gosper_gun_dimensions() {
        let gun = get("Gosper Glider Gun").unwrap();
        assert_eq!(gun.dimensions(), (11, 38));
        assert_eq!(gun.population(), 36);
    }

    #[test]
    fn categories_partition_catalog() {
        let total: usize = [
            Category::StillLife,
            Category::Oscillator,
            Category::Spaceship,
            Category::Gun,
        ]
        .into_iter()
        .map(|category| by_category(category).count())
        .sum();
        assert_eq!(total, entries().len());
        assert_eq!(by_category(Category::Spaceship).count(), 4);
    }

    #[test]
    fn random_soup_is_seeded() {
        let a = random(20, 30, 7);
        assert_eq!(a, random(20, 30, 7));
        assert!(a.border_is_dead());
        assert!(a.population() > 0);
    }
}
