// Copyright (C) 2020-2026 Andy Kurnia.

use super::bag::Bag;
use super::error::GameError;
use super::tile::Tile;
use rand::prelude::*;

pub const RACK_SIZE: usize = 7;

pub struct Rack(pub Vec<Tile>);

impl Rack {
    pub fn new() -> Rack {
        Rack(Vec::with_capacity(RACK_SIZE))
    }

    pub fn fill(&mut self, rng: &mut dyn RngCore, bag: &mut Bag) {
        while self.0.len() < RACK_SIZE {
            match bag.draw(rng) {
                Ok(tile) => self.0.push(tile),
                Err(_) => return,
            }
        }
    }

    #[inline(always)]
    pub fn index_of(&self, letter: char) -> Option<usize> {
        self.0.iter().position(|t| t.letter == letter)
    }

    #[inline(always)]
    pub fn contains(&self, letter: char) -> bool {
        self.index_of(letter).is_some()
    }

    // removes and returns the first tile with that letter, keeping the order
    // of the remaining tiles.
    pub fn remove(&mut self, letter: char) -> Result<Tile, GameError> {
        match self.index_of(letter) {
            Some(i) => Ok(self.0.remove(i)),
            None => Err(GameError::TileNotInRack),
        }
    }

    #[inline(always)]
    pub fn as_chars(&self) -> Vec<char> {
        self.0.iter().map(|t| t.letter).collect()
    }

    #[inline(always)]
    pub fn as_string(&self) -> String {
        self.0.iter().map(|t| t.letter).collect()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn sum_of_values(&self) -> i32 {
        self.0.iter().map(|t| t.value).sum()
    }
}

impl Default for Rack {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Rack {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}
