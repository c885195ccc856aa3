// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::GameError;
use super::rack::RACK_SIZE;
use super::tile::{Tile, TileSet};
use rand::prelude::*;

pub struct Bag(pub Vec<Tile>);

impl Bag {
    pub fn new(tile_set: &TileSet) -> Bag {
        let mut bag = Vec::with_capacity(tile_set.num_tiles());
        for (letter, count) in tile_set.letters() {
            for _ in 0..count {
                bag.push(tile_set.new_tile(letter));
            }
        }
        Bag(bag)
    }

    pub fn shuffle(&mut self, mut rng: &mut dyn RngCore) {
        self.0.shuffle(&mut rng);
    }

    // uniformly random draw; the swapped-in last tile keeps removal O(1).
    pub fn draw(&mut self, rng: &mut dyn RngCore) -> Result<Tile, GameError> {
        if self.0.is_empty() {
            return Err(GameError::BagEmpty);
        }
        let i = rng.gen_range(0..self.0.len());
        Ok(self.0.swap_remove(i))
    }

    #[inline(always)]
    pub fn return_tile(&mut self, tile: Tile) {
        self.0.push(tile);
    }

    #[inline(always)]
    pub fn tile_count(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline(always)]
    pub fn exchange_allowed(&self) -> bool {
        self.0.len() >= RACK_SIZE
    }
}

impl Clone for Bag {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.0.clone_from(&source.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> rand_chacha::ChaCha20Rng {
        rand_chacha::ChaCha20Rng::seed_from_u64(0)
    }

    #[test]
    fn new_bag_is_full() {
        let ts = TileSet::french();
        assert_eq!(Bag::new(&ts).tile_count(), 102);
    }

    #[test]
    fn draw_then_return_restores_count() {
        let ts = TileSet::french();
        let mut rng = rng();
        let mut bag = Bag::new(&ts);
        let tile = bag.draw(&mut rng).unwrap();
        assert_eq!(bag.tile_count(), 101);
        bag.return_tile(tile);
        assert_eq!(bag.tile_count(), 102);
    }

    #[test]
    fn draw_from_empty_bag_fails() {
        let ts = TileSet::french();
        let mut rng = rng();
        let mut bag = Bag::new(&ts);
        for _ in 0..102 {
            bag.draw(&mut rng).unwrap();
        }
        assert_eq!(bag.draw(&mut rng), Err(GameError::BagEmpty));
    }

    #[test]
    fn exchange_allowed_boundary() {
        let ts = TileSet::french();
        let mut rng = rng();
        let mut bag = Bag::new(&ts);
        while bag.tile_count() > RACK_SIZE {
            bag.draw(&mut rng).unwrap();
        }
        assert!(bag.exchange_allowed());
        bag.draw(&mut rng).unwrap();
        assert!(!bag.exchange_allowed());
    }
}
