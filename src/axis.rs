// Copyright (C) 2020-2026 Andy Kurnia.

use super::board::{Board, Direction, Position, Square, BOARD_CENTER, BOARD_SIZE};
use super::game::GameState;
use super::moves::Move;
use super::navigator::{ExtendAfterNavigator, ExtendBeforeNavigator, LeftPart};
use super::tile::{ALPHABET, BLANK};

// one row or column of the board, oriented for move generation. built fresh
// per generation job from the immutable game state snapshot.
pub struct Axis<'a> {
    state: &'a GameState<'a>,
    horizontal: bool,
    rack: Vec<char>,
    rack_string: String,
    squares: Vec<&'a Square>,
    cross_check_letters: Vec<Vec<char>>,
    is_anchor: [bool; BOARD_SIZE],
}

impl<'a> Axis<'a> {
    pub fn new(state: &'a GameState<'a>, index: usize, horizontal: bool) -> Axis<'a> {
        let board = state.board;
        let rack = state.rack.as_chars();
        let rack_string = state.rack.as_string();
        let squares: Vec<&Square> = (0..BOARD_SIZE)
            .map(|i| {
                board.get_square(if horizontal {
                    Position::new(index as i8, i as i8)
                } else {
                    Position::new(i as i8, index as i8)
                })
            })
            .collect();
        let mut axis = Axis {
            state,
            horizontal,
            rack,
            rack_string,
            squares,
            cross_check_letters: vec![Vec::new(); BOARD_SIZE],
            is_anchor: [false; BOARD_SIZE],
        };
        let board_is_empty = board
            .get_square(Position::new(BOARD_CENTER as i8, BOARD_CENTER as i8))
            .tile
            .is_none();
        for i in 0..BOARD_SIZE {
            let sq = axis.squares[i];
            if sq.tile.is_some() {
                // occupied: not an anchor and no cross-check set needed
                continue;
            }
            let is_anchor = if board_is_empty {
                // on an empty board the center square anchors the vertical
                // axis only, so each first move is generated exactly once
                !horizontal && index == BOARD_CENTER && i == BOARD_CENTER
            } else {
                sq.is_anchor(board)
            };
            if !is_anchor {
                // no adjacent tiles: any rack letter may land here, and a
                // blank opens up the whole alphabet
                axis.cross_check_letters[i] = if axis.rack_string.contains(BLANK) {
                    ALPHABET.to_vec()
                } else {
                    axis.rack.clone()
                };
            } else {
                axis.is_anchor[i] = true;
                // playable letters are those in the rack that also satisfy
                // the perpendicular cross-check; the set may end up empty
                let mut letters = Vec::new();
                if !axis.rack.is_empty() {
                    let playable = axis.cross_check(sq);
                    if axis.rack_string.contains(BLANK) {
                        letters = playable;
                    } else {
                        letters = playable
                            .into_iter()
                            .filter(|letter| axis.rack.contains(letter))
                            .collect();
                    }
                }
                axis.cross_check_letters[i] = letters;
            }
        }
        axis
    }

    fn cross_check(&self, sq: &Square) -> Vec<char> {
        let (prev, after) = self
            .state
            .board
            .cross_word_fragments(sq.position, self.horizontal);
        if prev.is_empty() && after.is_empty() {
            // no cross word, no constraint beyond the rack
            return self.rack.clone();
        }
        self.state.dawg.cross_check(&prev, &after).to_vec()
    }

    pub fn generate_moves(&self, left_parts: &[Vec<LeftPart>]) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut last_anchor: isize = -1;
        for i in 0..BOARD_SIZE {
            if !self.is_anchor[i] {
                continue;
            }
            if !self.cross_check_letters[i].is_empty() {
                // count open squares to the anchor's left, staying clear of
                // the previous anchor's territory
                let mut open_count = 0;
                let mut left = i as isize;
                while left > 0 && left > last_anchor + 1 && self.is_open(left as usize - 1) {
                    open_count += 1;
                    left -= 1;
                }
                let max_left = open_count.min(self.rack.len().saturating_sub(1));
                moves.extend(self.gen_moves_from_anchor(i, max_left, left_parts));
            }
            last_anchor = i as isize;
        }
        moves
    }

    fn gen_moves_from_anchor(
        &self,
        anchor: usize,
        max_left: usize,
        left_parts: &[Vec<LeftPart>],
    ) -> Vec<Move> {
        if max_left == 0 && anchor > 0 && self.squares[anchor - 1].tile.is_some() {
            // tiles already on the board form a fixed prefix
            return self.extend_before(anchor);
        }
        self.extend_after(anchor, max_left, left_parts)
    }

    // completes a prefix that already sits on the board before the anchor.
    fn extend_before(&self, anchor: usize) -> Vec<Move> {
        let dawg = self.state.dawg;
        let direction = if self.horizontal {
            Direction::Left
        } else {
            Direction::Above
        };
        let fragment = self
            .state
            .board
            .tile_fragment(self.squares[anchor].position, direction);
        // the fragment walks backwards; flip it into reading order
        let left: Vec<char> = fragment.iter().rev().map(|tile| tile.letter).collect();
        let mut ebn = ExtendBeforeNavigator::new(&left);
        dawg.navigate_resumable(&mut ebn);
        match ebn.state() {
            None => {
                // the prefix is not in the dawg: nothing can complete it
                Vec::new()
            }
            Some(state) => {
                let mut ean = ExtendAfterNavigator::new(self, anchor, &self.rack_string);
                let matched: String = left.iter().collect();
                dawg.resume(&mut ean, &state, &matched);
                ean.into_moves()
            }
        }
    }

    // extends from the anchor itself, then from every precomputed left part
    // that fits in the open space before it.
    fn extend_after(
        &self,
        anchor: usize,
        max_left: usize,
        left_parts: &[Vec<LeftPart>],
    ) -> Vec<Move> {
        let dawg = self.state.dawg;
        let mut ean = ExtendAfterNavigator::new(self, anchor, &self.rack_string);
        dawg.navigate(&mut ean);
        let mut moves = ean.into_moves();
        for left_len in 1..=max_left {
            for left_part in &left_parts[left_len - 1] {
                let mut ean = ExtendAfterNavigator::new(self, anchor, &left_part.rack);
                dawg.resume(&mut ean, &left_part.state, &left_part.matched);
                moves.extend(ean.into_moves());
            }
        }
        moves
    }

    #[inline(always)]
    pub fn is_anchor(&self, index: usize) -> bool {
        self.is_anchor[index]
    }

    // an open square is empty and admits at least one letter.
    #[inline(always)]
    pub fn is_open(&self, index: usize) -> bool {
        self.squares[index].tile.is_none() && !self.cross_check_letters[index].is_empty()
    }

    #[inline(always)]
    pub fn allows(&self, index: usize, letter: char) -> bool {
        self.squares[index].tile.is_none() && self.cross_check_letters[index].contains(&letter)
    }

    #[inline(always)]
    pub fn square(&self, index: usize) -> &Square {
        self.squares[index]
    }

    #[inline(always)]
    pub fn rack_string(&self) -> &str {
        &self.rack_string
    }

    #[inline(always)]
    pub fn board(&self) -> &Board {
        self.state.board
    }
}
