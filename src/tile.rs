// Copyright (C) 2020-2026 Andy Kurnia.

use rustc_hash::FxHashMap;

pub const BLANK: char = '*';

pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's',
    't', 'u', 'v', 'w', 'x', 'y', 'z',
];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tile {
    pub letter: char,
    pub value: i32,
}

// letter -> initial count and letter -> score, immutable after construction.
pub struct TileSet {
    counts: FxHashMap<char, u8>,
    values: FxHashMap<char, i32>,
}

impl TileSet {
    // default French-variant distribution, 102 tiles total.
    pub fn french() -> TileSet {
        let counts = [
            ('a', 9),
            ('b', 2),
            ('c', 2),
            ('d', 3),
            ('e', 15),
            ('f', 2),
            ('g', 2),
            ('h', 2),
            ('i', 8),
            ('j', 1),
            ('k', 1),
            ('l', 5),
            ('m', 3),
            ('n', 6),
            ('o', 6),
            ('p', 2),
            ('q', 1),
            ('r', 6),
            ('s', 6),
            ('t', 6),
            ('u', 6),
            ('v', 2),
            ('w', 1),
            ('x', 1),
            ('y', 1),
            ('z', 1),
            (BLANK, 2),
        ]
        .into_iter()
        .collect();
        let values = [
            ('a', 1),
            ('b', 3),
            ('c', 3),
            ('d', 2),
            ('e', 1),
            ('f', 4),
            ('g', 2),
            ('h', 4),
            ('i', 1),
            ('j', 8),
            ('k', 10),
            ('l', 1),
            ('m', 2),
            ('n', 1),
            ('o', 1),
            ('p', 3),
            ('q', 8),
            ('r', 1),
            ('s', 1),
            ('t', 1),
            ('u', 1),
            ('v', 4),
            ('w', 10),
            ('x', 10),
            ('y', 10),
            ('z', 10),
            (BLANK, 0),
        ]
        .into_iter()
        .collect();
        TileSet { counts, values }
    }

    #[inline(always)]
    pub fn count(&self, letter: char) -> u8 {
        self.counts.get(&letter).copied().unwrap_or(0)
    }

    // letters outside the set (e.g. the uppercase display form of a played
    // blank) score zero.
    #[inline(always)]
    pub fn value(&self, letter: char) -> i32 {
        self.values.get(&letter).copied().unwrap_or(0)
    }

    #[inline(always)]
    pub fn num_tiles(&self) -> usize {
        self.counts.values().map(|&n| n as usize).sum()
    }

    #[inline(always)]
    pub fn letters(&self) -> impl Iterator<Item = (char, u8)> + '_ {
        self.counts.iter().map(|(&letter, &count)| (letter, count))
    }

    #[inline(always)]
    pub fn new_tile(&self, letter: char) -> Tile {
        Tile {
            letter,
            value: self.value(letter),
        }
    }
}
