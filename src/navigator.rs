// Copyright (C) 2020-2026 Andy Kurnia.

use super::axis::Axis;
use super::board::BOARD_SIZE;
use super::dawg::{Dawg, EdgeState, ROOT};
use super::moves::{Cover, Covers, Move, TileMove};
use super::tile::BLANK;

// a navigator steers a dawg traversal: which edges to enter, which letters
// to consume, and what to do with each match.
pub trait Navigator {
    fn is_accepting(&self) -> bool;
    fn push_edge(&mut self, letter: char) -> bool;
    fn accepts(&mut self, letter: char) -> bool;
    fn accept(&mut self, matched: &str, is_word: bool, state: Option<&EdgeState>);
    fn pop_edge(&mut self) -> bool;
}

// drives one traversal. resumable navigations hand each accept() the edge
// state it can later be resumed from.
pub struct Navigation<'a> {
    dawg: &'a Dawg,
    is_resumable: bool,
}

impl<'a> Navigation<'a> {
    pub(crate) fn new(dawg: &'a Dawg, is_resumable: bool) -> Navigation<'a> {
        Navigation { dawg, is_resumable }
    }

    pub(crate) fn go<N: Navigator>(&self, navigator: &mut N) {
        if navigator.is_accepting() {
            self.from_node(navigator, ROOT, &mut String::new());
        }
    }

    // re-enter at a previously saved edge state. the saved prefix was
    // already consumed when the state was recorded, so it is replaced by the
    // NoPrefix sentinel and navigation descends straight into the next node.
    pub(crate) fn resume<N: Navigator>(&self, navigator: &mut N, state: &EdgeState, matched: &str) {
        if navigator.is_accepting() {
            let state = EdgeState {
                prefix: None,
                next_node: state.next_node,
            };
            self.from_edge(navigator, &state, &mut String::from(matched));
        }
    }

    fn from_node<N: Navigator>(&self, navigator: &mut N, node: u32, matched: &mut String) {
        let iter = self.dawg.iter_node(node);
        for state in iter.iter() {
            // cached adjacency always carries a concrete prefix
            if navigator.push_edge(state.prefix.unwrap()) {
                self.from_edge(navigator, state, matched);
                if !navigator.pop_edge() {
                    break;
                }
            }
        }
    }

    fn from_edge<N: Navigator>(&self, navigator: &mut N, state: &EdgeState, matched: &mut String) {
        let undo_len = matched.len();
        if let Some(letter) = state.prefix {
            if !navigator.accepts(letter) {
                return;
            }
            matched.push(letter);
            let is_word = match state.next_node {
                Some(next) => self.dawg.is_word_node(next),
                None => true,
            };
            navigator.accept(
                matched,
                is_word,
                if self.is_resumable { Some(state) } else { None },
            );
        }
        if let Some(next) = state.next_node {
            if navigator.is_accepting() {
                self.from_node(navigator, next, matched);
            }
        }
        matched.truncate(undo_len);
    }
}

#[inline(always)]
fn remove_letter(rack: &mut String, letter: char) {
    if let Some(i) = rack.find(letter) {
        rack.remove(i);
    }
}

// exact-word lookup.
pub struct FindNavigator {
    word: Vec<char>,
    index: usize,
    found: bool,
}

impl FindNavigator {
    pub fn new(word: &str) -> FindNavigator {
        FindNavigator {
            word: word.chars().collect(),
            index: 0,
            found: false,
        }
    }

    #[inline(always)]
    pub fn found(&self) -> bool {
        self.found
    }
}

impl Navigator for FindNavigator {
    fn is_accepting(&self) -> bool {
        self.index < self.word.len()
    }

    fn push_edge(&mut self, letter: char) -> bool {
        self.word[self.index] == letter
    }

    fn accepts(&mut self, _letter: char) -> bool {
        // edges are pre-filtered by push_edge
        self.index += 1;
        true
    }

    fn accept(&mut self, _matched: &str, is_word: bool, _state: Option<&EdgeState>) {
        if is_word && self.index == self.word.len() {
            self.found = true;
        }
    }

    fn pop_edge(&mut self) -> bool {
        // a single path can match, no siblings to visit
        false
    }
}

// fixed-length pattern match; '*' stands for any letter.
pub struct MatchNavigator {
    pattern: Vec<char>,
    index: usize,
    ch_match: char,
    is_wildcard: bool,
    stack: Vec<(usize, char, bool)>,
    results: Vec<String>,
}

impl MatchNavigator {
    pub fn new(pattern: &str) -> MatchNavigator {
        let pattern: Vec<char> = pattern.chars().collect();
        let ch_match = pattern.first().copied().unwrap_or('\0');
        MatchNavigator {
            ch_match,
            is_wildcard: ch_match == BLANK,
            pattern,
            index: 0,
            stack: Vec::new(),
            results: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn into_results(self) -> Vec<String> {
        self.results
    }
}

impl Navigator for MatchNavigator {
    fn is_accepting(&self) -> bool {
        self.index < self.pattern.len()
    }

    fn push_edge(&mut self, letter: char) -> bool {
        if letter != self.ch_match && !self.is_wildcard {
            return false;
        }
        self.stack.push((self.index, self.ch_match, self.is_wildcard));
        true
    }

    fn accepts(&mut self, letter: char) -> bool {
        if letter != self.ch_match && !self.is_wildcard {
            return false;
        }
        self.index += 1;
        if self.index < self.pattern.len() {
            self.ch_match = self.pattern[self.index];
            self.is_wildcard = self.ch_match == BLANK;
        }
        true
    }

    fn accept(&mut self, matched: &str, is_word: bool, _state: Option<&EdgeState>) {
        if is_word && self.index == self.pattern.len() {
            self.results.push(matched.to_string());
        }
    }

    fn pop_edge(&mut self) -> bool {
        let (index, ch_match, is_wildcard) = self.stack.pop().unwrap();
        self.index = index;
        self.ch_match = ch_match;
        self.is_wildcard = is_wildcard;
        // only a wildcard position has sibling edges worth trying
        self.is_wildcard
    }
}

// the navigation state saved after matching a left part, so move generation
// can resume from there with the remaining rack.
#[derive(Clone)]
pub struct LeftPart {
    pub matched: String,
    pub rack: String,
    pub state: EdgeState,
}

// enumerates every dictionary prefix spellable from the rack, leaving one
// tile for the anchor square. run once per turn, in resumable mode.
pub struct LeftPermutationNavigator {
    rack: String,
    stack: Vec<(String, usize)>,
    max_left: usize,
    left_parts: Vec<Vec<LeftPart>>,
    index: usize,
}

impl LeftPermutationNavigator {
    pub fn new(rack: &str) -> LeftPermutationNavigator {
        let len_rack = rack.chars().count();
        let max_left = len_rack.saturating_sub(1);
        LeftPermutationNavigator {
            rack: rack.to_string(),
            stack: Vec::new(),
            max_left,
            left_parts: (0..max_left).map(|_| Vec::new()).collect(),
            index: 0,
        }
    }

    #[inline(always)]
    pub fn into_left_parts(self) -> Vec<Vec<LeftPart>> {
        self.left_parts
    }
}

impl Navigator for LeftPermutationNavigator {
    fn is_accepting(&self) -> bool {
        self.index < self.max_left
    }

    fn push_edge(&mut self, letter: char) -> bool {
        if !self.rack.contains(letter) && !self.rack.contains(BLANK) {
            return false;
        }
        self.stack.push((self.rack.clone(), self.index));
        true
    }

    fn accepts(&mut self, letter: char) -> bool {
        let exact_match = self.rack.contains(letter);
        if !exact_match && !self.rack.contains(BLANK) {
            return false;
        }
        self.index += 1;
        if exact_match {
            remove_letter(&mut self.rack, letter);
        } else {
            remove_letter(&mut self.rack, BLANK);
        }
        true
    }

    fn accept(&mut self, matched: &str, _is_word: bool, state: Option<&EdgeState>) {
        if let Some(state) = state {
            let ix = matched.chars().count() - 1;
            self.left_parts[ix].push(LeftPart {
                matched: matched.to_string(),
                rack: self.rack.clone(),
                state: *state,
            });
        }
    }

    fn pop_edge(&mut self) -> bool {
        let (rack, index) = self.stack.pop().unwrap();
        self.rack = rack;
        self.index = index;
        true
    }
}

// walks an exact prefix that already sits on the board before an anchor and
// records the edge state navigation can resume from.
pub struct ExtendBeforeNavigator {
    prefix: Vec<char>,
    index: usize,
    state: Option<EdgeState>,
}

impl ExtendBeforeNavigator {
    pub fn new(prefix: &[char]) -> ExtendBeforeNavigator {
        ExtendBeforeNavigator {
            prefix: prefix.to_vec(),
            index: 0,
            state: None,
        }
    }

    #[inline(always)]
    pub fn state(&self) -> Option<EdgeState> {
        self.state
    }
}

impl Navigator for ExtendBeforeNavigator {
    fn is_accepting(&self) -> bool {
        self.index < self.prefix.len()
    }

    fn push_edge(&mut self, letter: char) -> bool {
        self.prefix[self.index] == letter
    }

    fn accepts(&mut self, _letter: char) -> bool {
        // edges are pre-filtered by push_edge
        self.index += 1;
        true
    }

    fn accept(&mut self, _matched: &str, _is_word: bool, state: Option<&EdgeState>) {
        if self.index == self.prefix.len() {
            self.state = state.copied();
        }
    }

    fn pop_edge(&mut self) -> bool {
        false
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum MatchKind {
    No,
    BoardTile,
    RackTile,
}

// the core of the Appel-Jacobson algorithm: extends rightward (or downward)
// from an anchor, covering empty squares with rack tiles under the cross
// checks, and emits a tile move at every complete word.
pub struct ExtendAfterNavigator<'a> {
    axis: &'a Axis<'a>,
    index: usize,
    rack: String,
    stack: Vec<(String, usize, bool)>,
    last_check: Option<MatchKind>,
    wildcard_in_rack: bool,
    moves: Vec<Move>,
}

impl<'a> ExtendAfterNavigator<'a> {
    pub fn new(axis: &'a Axis<'a>, anchor: usize, rack: &str) -> ExtendAfterNavigator<'a> {
        ExtendAfterNavigator {
            axis,
            index: anchor,
            rack: rack.to_string(),
            stack: Vec::new(),
            last_check: None,
            wildcard_in_rack: rack.contains(BLANK),
            moves: Vec::new(),
        }
    }

    #[inline(always)]
    pub fn into_moves(self) -> Vec<Move> {
        self.moves
    }

    fn check(&self, letter: char) -> MatchKind {
        if let Some(tile) = self.axis.square(self.index).tile {
            // an occupied square must be matched exactly
            return if letter == tile.letter {
                MatchKind::BoardTile
            } else {
                MatchKind::No
            };
        }
        if !self.wildcard_in_rack && !self.rack.contains(letter) {
            return MatchKind::No;
        }
        if self.axis.allows(self.index, letter) {
            MatchKind::RackTile
        } else {
            MatchKind::No
        }
    }
}

impl Navigator for ExtendAfterNavigator<'_> {
    fn is_accepting(&self) -> bool {
        if self.index >= BOARD_SIZE {
            return false;
        }
        // keep going while the rack has tiles, or for free through squares
        // that already hold a tile
        !self.rack.is_empty() || self.axis.square(self.index).tile.is_some()
    }

    fn push_edge(&mut self, letter: char) -> bool {
        let check = self.check(letter);
        self.last_check = Some(check);
        if check == MatchKind::No {
            return false;
        }
        self.stack
            .push((self.rack.clone(), self.index, self.wildcard_in_rack));
        true
    }

    fn accepts(&mut self, letter: char) -> bool {
        let matched = self
            .last_check
            .take()
            .unwrap_or_else(|| self.check(letter));
        if matched == MatchKind::No {
            return false;
        }
        self.index += 1;
        if matched == MatchKind::RackTile {
            if self.rack.contains(letter) {
                remove_letter(&mut self.rack, letter);
            } else {
                remove_letter(&mut self.rack, BLANK);
            }
            self.wildcard_in_rack = self.rack.contains(BLANK);
        }
        true
    }

    fn accept(&mut self, matched: &str, is_word: bool, state: Option<&EdgeState>) {
        if state.is_some() {
            panic!("extend-after navigation must not be resumable");
        }
        if !is_word
            || (self.index < BOARD_SIZE && self.axis.square(self.index).tile.is_some())
        {
            // not a whole word, or it would butt into an existing tile
            return;
        }
        let letters: Vec<char> = matched.chars().collect();
        if letters.len() < 2 {
            return;
        }
        let mut covers = Covers::default();
        let start = self.index - letters.len();
        let mut rack = self.axis.rack_string().to_string();
        for (i, &actual) in letters.iter().enumerate() {
            let sq = self.axis.square(start + i);
            if sq.tile.is_none() {
                let source = if rack.contains(actual) {
                    remove_letter(&mut rack, actual);
                    actual
                } else {
                    remove_letter(&mut rack, BLANK);
                    BLANK
                };
                covers.insert(sq.position, Cover { source, actual });
            }
        }
        // bot-generated moves are valid by construction of the traversal
        self.moves.push(Move::Tile(TileMove::new_unchecked(
            self.axis.board(),
            covers,
        )));
    }

    fn pop_edge(&mut self) -> bool {
        let (rack, index, wildcard_in_rack) = self.stack.pop().unwrap();
        self.rack = rack;
        self.index = index;
        self.wildcard_in_rack = wildcard_in_rack;
        true
    }
}
