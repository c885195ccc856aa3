// Copyright (C) 2020-2026 Andy Kurnia.

use super::board::{Board, Direction, Position, BOARD_CENTER, BOARD_SIZE};
use super::error::GameError;
use super::game::{Game, GameState};
use super::rack::RACK_SIZE;
use super::tile::BLANK;
use rand::prelude::*;
use rustc_hash::FxHashMap;

pub const BINGO_BONUS: i32 = 50;
pub const ILLEGAL_MOVE_WORD: &str = "[???]";

// source is '*' when the covering tile is a blank; actual is the letter it
// plays as.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Cover {
    pub source: char,
    pub actual: char,
}

pub type Covers = FxHashMap<Position, Cover>;

#[derive(Clone, Debug)]
pub enum Move {
    Tile(TileMove),
    Pass,
    Exchange(ExchangeMove),
    Final(FinalMove),
}

impl Move {
    pub fn is_valid(&self, game: &Game) -> bool {
        match self {
            Move::Tile(mv) => mv.is_valid(game),
            Move::Exchange(mv) => mv.is_valid(game),
            Move::Pass | Move::Final(_) => true,
        }
    }

    pub fn apply(&self, rng: &mut dyn RngCore, game: &mut Game) -> Result<(), GameError> {
        match self {
            Move::Tile(mv) => mv.apply(rng, game),
            Move::Exchange(mv) => mv.apply(rng, game),
            Move::Pass => {
                game.num_pass_moves += 1;
                Ok(())
            }
            Move::Final(_) => Ok(()),
        }
    }

    pub fn score(&mut self, state: &GameState<'_>) -> i32 {
        match self {
            Move::Tile(mv) => mv.score(state),
            Move::Pass | Move::Exchange(_) => 0,
            Move::Final(mv) => mv.score(state),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Tile(mv) => write!(
                f,
                "({},{})-({},{}) Word: {} Score: {}",
                mv.start.row,
                mv.start.col,
                mv.end.row,
                mv.end.col,
                mv.word,
                mv.cached_score.unwrap_or(0),
            ),
            Move::Pass => write!(f, "Pass"),
            Move::Exchange(mv) => write!(f, "Exchanged letters: {}", mv.letters),
            Move::Final(mv) => write!(f, "Rack {}", mv.opponent_rack),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TileMove {
    pub start: Position,
    pub end: Position,
    pub covers: Covers,
    pub horizontal: bool,
    pub word: String,
    pub cached_score: Option<i32>,
    pub validate_words: bool,
}

impl TileMove {
    pub fn new(board: &Board, covers: Covers) -> TileMove {
        Self::init(board, covers, true)
    }

    // bot-generated moves skip word validation; the generator only ever
    // produces words the traversal proved.
    pub fn new_unchecked(board: &Board, covers: Covers) -> TileMove {
        Self::init(board, covers, false)
    }

    fn init(board: &Board, covers: Covers, validate_words: bool) -> TileMove {
        let mut top = BOARD_SIZE as i8;
        let mut left = BOARD_SIZE as i8;
        let mut bottom = -1i8;
        let mut right = -1i8;
        for pos in covers.keys() {
            top = top.min(pos.row);
            left = left.min(pos.col);
            bottom = bottom.max(pos.row);
            right = right.max(pos.col);
        }
        let start = Position::new(top, left);
        let end = Position::new(bottom, right);
        let horizontal = if covers.len() >= 2 {
            top == bottom
        } else {
            // single cover: follow the longer of the two crossings
            let hcross = board.tile_fragment(start, Direction::Left).len()
                + board.tile_fragment(start, Direction::Right).len();
            let vcross = board.tile_fragment(start, Direction::Above).len()
                + board.tile_fragment(start, Direction::Below).len();
            hcross >= vcross
        };
        let mut mv = TileMove {
            start,
            end,
            covers,
            horizontal,
            word: String::new(),
            cached_score: None,
            validate_words,
        };
        mv.word = mv.collect_word(board);
        mv
    }

    // the whole contiguous word along the axis, including any prefix and
    // suffix already on the board. an impossible layout yields the sentinel.
    fn collect_word(&self, board: &Board) -> String {
        if !self.start.in_bounds() || !self.end.in_bounds() {
            return ILLEGAL_MOVE_WORD.to_string();
        }
        let (direction, reverse) = if self.horizontal {
            (Direction::Right, Direction::Left)
        } else {
            (Direction::Below, Direction::Above)
        };
        let mut word = board.word_fragment(self.start, reverse);
        let mut pos = self.start;
        loop {
            if let Some(cover) = self.covers.get(&pos) {
                word.push(cover.actual);
            } else if let Some(tile) = board.get_square(pos).tile {
                word.push(tile.letter);
            } else {
                // a square between the covers is neither covered nor occupied
                return ILLEGAL_MOVE_WORD.to_string();
            }
            if pos.row == self.end.row && pos.col == self.end.col {
                break;
            }
            pos = pos.step(direction);
            if !pos.in_bounds() {
                return ILLEGAL_MOVE_WORD.to_string();
            }
        }
        word.push_str(&board.word_fragment(self.end, direction));
        word
    }

    pub fn is_valid(&self, game: &Game) -> bool {
        if self.covers.is_empty() || self.covers.len() > RACK_SIZE {
            return false;
        }
        let board = &game.board;
        let mut num_adjacent_tiles = 0;
        for pos in self.covers.keys() {
            if !pos.in_bounds() {
                return false;
            }
            if board.get_square(*pos).tile.is_some() {
                return false;
            }
            num_adjacent_tiles += board.num_adjacent_tiles(*pos);
        }
        if self.end.row > self.start.row && self.end.col > self.start.col {
            // neither strictly horizontal nor strictly vertical
            return false;
        }
        // intervening squares must already hold a tile
        if self.horizontal {
            for col in self.start.col..=self.end.col {
                let pos = Position::new(self.start.row, col);
                if !self.covers.contains_key(&pos) && board.get_square(pos).tile.is_none() {
                    return false;
                }
            }
        } else {
            for row in self.start.row..=self.end.row {
                let pos = Position::new(row, self.start.col);
                if !self.covers.contains_key(&pos) && board.get_square(pos).tile.is_none() {
                    return false;
                }
            }
        }
        let center = Position::new(BOARD_CENTER as i8, BOARD_CENTER as i8);
        if board.get_square(center).tile.is_none() {
            // the first move must go through the center
            if !self.covers.contains_key(&center) {
                return false;
            }
        } else if num_adjacent_tiles == 0 {
            return false;
        }
        if !self.validate_words {
            return true;
        }
        if self.word == ILLEGAL_MOVE_WORD || self.word.is_empty() {
            return false;
        }
        if !game.dawg.is_word(&self.word) {
            return false;
        }
        for (pos, cover) in &self.covers {
            let (prev, after) = board.cross_word_fragments(*pos, self.horizontal);
            if !prev.is_empty() || !after.is_empty() {
                let cross = format!("{prev}{}{after}", cover.actual);
                if !game.dawg.is_word(&cross) {
                    return false;
                }
            }
        }
        true
    }

    // moves the covered tiles from the player's rack onto the board and
    // refills the rack. the move must already be validated.
    fn apply(&self, rng: &mut dyn RngCore, game: &mut Game) -> Result<(), GameError> {
        let mover = game.player_to_move_index();
        for (pos, cover) in &self.covers {
            let mut tile = game.players[mover].rack.remove(cover.source)?;
            if cover.source == BLANK {
                // a played blank shows the chosen letter in uppercase
                tile.letter = cover.actual.to_ascii_uppercase();
            }
            game.board.place_tile(*pos, tile)?;
        }
        game.players[mover].rack.fill(rng, &mut game.bag);
        game.num_pass_moves = 0;
        Ok(())
    }

    pub fn score(&mut self, state: &GameState<'_>) -> i32 {
        if let Some(score) = self.cached_score {
            return score;
        }
        let mut score = 0;
        let mut cross_score = 0;
        let mut multiplier = 1;
        let (reverse, forward, row_incr, col_incr) = if self.horizontal {
            (Direction::Left, Direction::Right, 0, 1)
        } else {
            (Direction::Above, Direction::Below, 1, 0)
        };
        // any prefix already on the board counts at face value
        for tile in state.board.tile_fragment(self.start, reverse) {
            score += tile.value;
        }
        let mut pos = self.start;
        loop {
            let sq = state.board.get_square(pos);
            if let Some(cover) = self.covers.get(&pos) {
                // blanks score zero through their source letter
                let sc = state.tile_set.value(cover.source) * sq.letter_multiplier;
                score += sc;
                multiplier *= sq.word_multiplier;
                let (has_crossing, csc) = state.board.cross_score(pos, self.horizontal);
                if has_crossing {
                    cross_score += (csc + sc) * sq.word_multiplier;
                }
            } else {
                // pre-existing tiles never trigger premiums again
                score += sq.tile.map_or(0, |tile| tile.value);
            }
            if pos.row >= self.end.row && pos.col >= self.end.col {
                break;
            }
            pos.row += row_incr;
            pos.col += col_incr;
        }
        for tile in state.board.tile_fragment(self.end, forward) {
            score += tile.value;
        }
        score *= multiplier;
        score += cross_score;
        if self.covers.len() == RACK_SIZE {
            score += BINGO_BONUS;
        }
        self.cached_score = Some(score);
        score
    }
}

#[derive(Clone, Debug)]
pub struct ExchangeMove {
    pub letters: String,
}

impl ExchangeMove {
    pub fn is_valid(&self, game: &Game) -> bool {
        if !game.bag.exchange_allowed() {
            return false;
        }
        let count = self.letters.chars().count();
        if count < 1 || count > RACK_SIZE {
            return false;
        }
        let mut rack = game.player_to_move().rack.as_string();
        for letter in self.letters.chars() {
            match rack.find(letter) {
                Some(i) => {
                    rack.remove(i);
                }
                None => return false,
            }
        }
        true
    }

    // the rack is replenished before the exchanged tiles go back, so none of
    // them can be drawn right back.
    fn apply(&self, rng: &mut dyn RngCore, game: &mut Game) -> Result<(), GameError> {
        let mover = game.player_to_move_index();
        let mut removed = Vec::with_capacity(RACK_SIZE);
        for letter in self.letters.chars() {
            removed.push(game.players[mover].rack.remove(letter)?);
        }
        game.players[mover].rack.fill(rng, &mut game.bag);
        for tile in removed {
            game.bag.return_tile(tile);
        }
        game.num_pass_moves += 1;
        Ok(())
    }
}

// end-of-game adjustment: the value of the opponent's leave, doubled when
// the finishing player played out.
#[derive(Clone, Debug)]
pub struct FinalMove {
    pub opponent_rack: String,
    pub multiply_factor: i32,
}

impl FinalMove {
    pub fn score(&self, state: &GameState<'_>) -> i32 {
        let adjustment: i32 = self
            .opponent_rack
            .chars()
            .map(|letter| state.tile_set.value(letter))
            .sum();
        adjustment * self.multiply_factor
    }
}
