// Copyright (C) 2020-2026 Andy Kurnia.

use super::error::GameError;
use super::lexicon::Lexicon;
use super::navigator::{
    FindNavigator, LeftPart, LeftPermutationNavigator, MatchNavigator, Navigation, Navigator,
};
use rustc_hash::FxHashMap;
use std::sync::{Arc, Mutex};

pub const ROOT: u32 = 0;

#[derive(Debug)]
pub struct Node {
    pub is_word: bool,
    pub edges: FxHashMap<char, u32>,
}

impl Node {
    fn new() -> Node {
        Node {
            is_word: false,
            edges: FxHashMap::default(),
        }
    }
}

// an edge out of a node. prefix None is the NoPrefix sentinel: nothing left
// to consume, as used when resuming a saved navigation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EdgeState {
    pub prefix: Option<char>,
    pub next_node: Option<u32>,
}

// prefix-sharing trie over the lexicon. nodes live in an arena indexed from
// the root at 0; the caches are shared across concurrent navigations.
pub struct Dawg {
    nodes: Vec<Node>,
    iter_cache: Mutex<FxHashMap<u32, Arc<[EdgeState]>>>,
    cross_cache: Mutex<FxHashMap<String, Arc<[char]>>>,
}

impl Dawg {
    pub fn new(lexicon: &Lexicon) -> Dawg {
        let mut dawg = Dawg {
            nodes: vec![Node::new()],
            iter_cache: Mutex::new(FxHashMap::default()),
            cross_cache: Mutex::new(FxHashMap::default()),
        };
        for word in &lexicon.words {
            dawg.insert(word);
        }
        dawg
    }

    fn insert(&mut self, word: &str) {
        let mut curr = ROOT as usize;
        for letter in word.chars() {
            curr = match self.nodes[curr].edges.get(&letter) {
                Some(&next) => next as usize,
                None => {
                    let next = self.nodes.len() as u32;
                    self.nodes.push(Node::new());
                    self.nodes[curr].edges.insert(letter, next);
                    next as usize
                }
            };
        }
        self.nodes[curr].is_word = true;
    }

    pub fn node(&self, id: u32) -> Result<&Node, GameError> {
        self.nodes.get(id as usize).ok_or(GameError::NodeNotFound)
    }

    pub fn next_of(&self, state: &EdgeState) -> Result<&Node, GameError> {
        match state.next_node {
            Some(id) => self.node(id),
            None => Err(GameError::NodeIsNil),
        }
    }

    #[inline(always)]
    pub(crate) fn is_word_node(&self, id: u32) -> bool {
        self.nodes[id as usize].is_word
    }

    // materialized adjacency of a node, filled lazily under the cache mutex.
    pub(crate) fn iter_node(&self, id: u32) -> Arc<[EdgeState]> {
        let mut cache = self.iter_cache.lock().unwrap();
        if let Some(list) = cache.get(&id) {
            return Arc::clone(list);
        }
        let list: Arc<[EdgeState]> = self.nodes[id as usize]
            .edges
            .iter()
            .map(|(&letter, &next)| EdgeState {
                prefix: Some(letter),
                next_node: Some(next),
            })
            .collect();
        cache.insert(id, Arc::clone(&list));
        list
    }

    pub fn is_word(&self, word: &str) -> bool {
        let mut fnav = FindNavigator::new(word);
        self.navigate(&mut fnav);
        fnav.found()
    }

    // all words matching a fixed-length pattern; '*' matches any letter.
    pub fn match_pattern(&self, pattern: &str) -> Vec<String> {
        let mut mnav = MatchNavigator::new(pattern);
        self.navigate(&mut mnav);
        mnav.into_results()
    }

    pub fn navigate<N: Navigator>(&self, navigator: &mut N) {
        Navigation::new(self, false).go(navigator);
    }

    pub fn navigate_resumable<N: Navigator>(&self, navigator: &mut N) {
        Navigation::new(self, true).go(navigator);
    }

    pub fn resume<N: Navigator>(&self, navigator: &mut N, state: &EdgeState, matched: &str) {
        Navigation::new(self, false).resume(navigator, state, matched);
    }

    // the set of letters that complete prev + letter + after into a word,
    // memoized under the "prev*after" key.
    pub fn cross_check(&self, prev: &str, after: &str) -> Arc<[char]> {
        let key = format!("{prev}*{after}");
        let mut cache = self.cross_cache.lock().unwrap();
        if let Some(letters) = cache.get(&key) {
            return Arc::clone(letters);
        }
        let len_left = prev.chars().count();
        let letters: Arc<[char]> = self
            .match_pattern(&key)
            .iter()
            .filter_map(|word| word.chars().nth(len_left))
            .collect();
        cache.insert(key, Arc::clone(&letters));
        letters
    }

    // every left part spellable from the rack, bucketed by length - 1.
    pub fn find_left_parts(&self, rack: &str) -> Vec<Vec<LeftPart>> {
        let mut lpn = LeftPermutationNavigator::new(rack);
        self.navigate_resumable(&mut lpn);
        lpn.into_left_parts()
    }
}
