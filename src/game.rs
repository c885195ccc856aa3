// Copyright (C) 2020-2026 Andy Kurnia.

use super::axis::Axis;
use super::bag::Bag;
use super::board::{Board, BOARD_SIZE};
use super::dawg::Dawg;
use super::error::GameError;
use super::moves::{FinalMove, Move};
use super::rack::Rack;
use super::tile::TileSet;
use rand::prelude::*;
use rayon::prelude::*;

pub const MAX_PASS_MOVES: usize = 6;

pub struct GamePlayer {
    pub score: i32,
    pub rack: Rack,
}

impl Clone for GamePlayer {
    #[inline(always)]
    fn clone(&self) -> Self {
        Self {
            score: self.score,
            rack: self.rack.clone(),
        }
    }

    #[inline(always)]
    fn clone_from(&mut self, source: &Self) {
        self.score.clone_from(&source.score);
        self.rack.clone_from(&source.rack);
    }
}

// an entry in the move list: the mover's rack as it was before the move,
// plus the move itself.
pub struct MoveItem {
    pub rack_before: String,
    pub mv: Move,
}

pub struct Game<'a> {
    pub players: [GamePlayer; 2],
    pub board: Board,
    pub bag: Bag,
    pub dawg: &'a Dawg,
    pub tile_set: &'a TileSet,
    pub move_list: Vec<MoveItem>,
    pub num_pass_moves: usize,
}

// the minimum a robot needs to decide on a move: a read-only snapshot taken
// per turn.
pub struct GameState<'a> {
    pub dawg: &'a Dawg,
    pub tile_set: &'a TileSet,
    pub board: &'a Board,
    pub rack: &'a Rack,
    pub exchange_allowed: bool,
}

impl<'a> Game<'a> {
    pub fn new(dawg: &'a Dawg, tile_set: &'a TileSet, rng: &mut dyn RngCore) -> Game<'a> {
        let mut bag = Bag::new(tile_set);
        bag.shuffle(rng);
        let mut players = [
            GamePlayer {
                score: 0,
                rack: Rack::new(),
            },
            GamePlayer {
                score: 0,
                rack: Rack::new(),
            },
        ];
        for player in players.iter_mut() {
            player.rack.fill(rng, &mut bag);
        }
        Game {
            players,
            board: Board::new(),
            bag,
            dawg,
            tile_set,
            move_list: Vec::new(),
            num_pass_moves: 0,
        }
    }

    #[inline(always)]
    pub fn player_to_move_index(&self) -> usize {
        self.move_list.len() % 2
    }

    #[inline(always)]
    pub fn player_to_move(&self) -> &GamePlayer {
        &self.players[self.player_to_move_index()]
    }

    pub fn state(&self) -> GameState<'_> {
        GameState {
            dawg: self.dawg,
            tile_set: self.tile_set,
            board: &self.board,
            rack: &self.player_to_move().rack,
            exchange_allowed: self.bag.exchange_allowed(),
        }
    }

    // applies an already validated move, appends it to the move list and
    // updates the score. when the game ends, both final adjustments are
    // appended as well.
    pub fn apply_valid(&mut self, rng: &mut dyn RngCore, mv: Move) -> Result<(), GameError> {
        let mover = self.player_to_move_index();
        let rack_before = self.players[mover].rack.as_string();
        mv.apply(rng, self)?;
        self.score_move(mover, rack_before, mv);
        if self.is_over() {
            let rack_player = self.players[mover].rack.as_string();
            let rack_opponent = self.players[1 - mover].rack.as_string();
            // playing out doubles the opponent's leave
            let multiply_factor = if rack_player.is_empty() { 2 } else { 1 };
            self.score_move(
                mover,
                rack_player.clone(),
                Move::Final(FinalMove {
                    opponent_rack: rack_opponent.clone(),
                    multiply_factor,
                }),
            );
            self.score_move(
                1 - mover,
                rack_opponent,
                Move::Final(FinalMove {
                    opponent_rack: rack_player,
                    multiply_factor,
                }),
            );
        }
        Ok(())
    }

    fn score_move(&mut self, player: usize, rack_before: String, mut mv: Move) {
        let score = mv.score(&self.state());
        self.players[player].score += score;
        self.move_list.push(MoveItem { rack_before, mv });
    }

    pub fn is_over(&self) -> bool {
        let num_moves = self.move_list.len();
        if num_moves == 0 {
            return false;
        }
        if self.num_pass_moves == MAX_PASS_MOVES {
            return true;
        }
        self.players[1 - (num_moves % 2)].rack.is_empty()
    }
}

impl GameState<'_> {
    // every legal tile move: one generation job per row and per column, run
    // concurrently over the shared snapshot. job order is unspecified and
    // strategies must not depend on it.
    pub fn generate_moves(&self) -> Vec<Move> {
        let left_parts = self.dawg.find_left_parts(&self.rack.as_string());
        (0..2 * BOARD_SIZE)
            .into_par_iter()
            .flat_map_iter(|job| {
                let horizontal = job < BOARD_SIZE;
                let index = if horizontal { job } else { job - BOARD_SIZE };
                Axis::new(self, index, horizontal).generate_moves(&left_parts)
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use super::super::lexicon::Lexicon;
    use super::super::moves::{Cover, Covers, TileMove};
    use super::super::board::Position;
    use super::super::tile::{Tile, BLANK};
    use rand::SeedableRng;

    pub(crate) fn rack_of(tile_set: &TileSet, letters: &str) -> Rack {
        Rack(letters.chars().map(|c| tile_set.new_tile(c)).collect())
    }

    // a game with fixed racks and a full bag, for deterministic tests.
    pub(crate) fn fixed_game<'a>(
        dawg: &'a Dawg,
        tile_set: &'a TileSet,
        rack_a: &str,
        rack_b: &str,
    ) -> Game<'a> {
        Game {
            players: [
                GamePlayer {
                    score: 0,
                    rack: rack_of(tile_set, rack_a),
                },
                GamePlayer {
                    score: 0,
                    rack: rack_of(tile_set, rack_b),
                },
            ],
            board: Board::new(),
            bag: Bag::new(tile_set),
            dawg,
            tile_set,
            move_list: Vec::new(),
            num_pass_moves: 0,
        }
    }

    fn rng() -> rand_chacha::ChaCha20Rng {
        rand_chacha::ChaCha20Rng::seed_from_u64(42)
    }

    fn tile_move(game: &Game<'_>, entries: &[(i8, i8, char, char)]) -> Move {
        let covers: Covers = entries
            .iter()
            .map(|&(row, col, source, actual)| (Position::new(row, col), Cover { source, actual }))
            .collect();
        Move::Tile(TileMove::new(&game.board, covers))
    }

    #[test]
    fn apply_tile_move_updates_everything() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "catsbe*", "aaaaaaa");
        let mut rng = rng();
        game.num_pass_moves = 3;
        let mv = tile_move(
            &game,
            &[(7, 6, 'c', 'c'), (7, 7, 'a', 'a'), (7, 8, 't', 't')],
        );
        assert!(mv.is_valid(&game));
        game.apply_valid(&mut rng, mv).unwrap();
        assert_eq!(game.players[0].score, 10);
        assert_eq!(game.num_pass_moves, 0);
        assert_eq!(game.move_list.len(), 1);
        assert_eq!(game.move_list[0].rack_before, "catsbe*");
        // rack refilled from the bag
        assert_eq!(game.players[0].rack.len(), 7);
        assert_eq!(game.bag.tile_count(), 102 - 3);
        for col in [6, 7, 8] {
            assert!(game.board.get_square(Position::new(7, col)).tile.is_some());
        }
        assert_eq!(game.player_to_move_index(), 1);
    }

    #[test]
    fn blank_is_relabeled_uppercase_on_the_board() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "*at", "aaaaaaa");
        // keep the refill from handing out another blank
        game.bag.0.retain(|t| t.letter != BLANK);
        let mut rng = rng();
        let mv = tile_move(
            &game,
            &[(7, 6, BLANK, 'c'), (7, 7, 'a', 'a'), (7, 8, 't', 't')],
        );
        assert!(mv.is_valid(&game));
        game.apply_valid(&mut rng, mv).unwrap();
        // blank scores zero: (0 + 1 + 1) * 2
        assert_eq!(game.players[0].score, 4);
        let placed = game.board.get_square(Position::new(7, 6)).tile.unwrap();
        assert_eq!(placed, Tile { letter: 'C', value: 0 });
        // the blank left the rack
        assert!(!game.move_list.is_empty());
        assert!(!game.players[0].rack.as_string().contains(BLANK));
    }

    #[test]
    fn pass_and_exchange_count_pass_moves() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "abcdefg", "abcdefg");
        let mut rng = rng();
        game.apply_valid(&mut rng, Move::Pass).unwrap();
        assert_eq!(game.num_pass_moves, 1);
        let exchange = Move::Exchange(super::super::moves::ExchangeMove {
            letters: "abc".to_string(),
        });
        assert!(exchange.is_valid(&game));
        game.apply_valid(&mut rng, exchange).unwrap();
        assert_eq!(game.num_pass_moves, 2);
        // the exchanged tiles went back after the refill
        assert_eq!(game.players[1].rack.len(), 7);
        assert_eq!(game.bag.tile_count(), 102);
        assert_eq!(game.players[0].score, 0);
        assert_eq!(game.players[1].score, 0);
    }

    #[test]
    fn six_pass_moves_end_the_game() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "ka", "e");
        let mut rng = rng();
        for i in 0..5 {
            game.apply_valid(&mut rng, Move::Pass).unwrap();
            assert!(!game.is_over(), "game ended after {} passes", i + 1);
        }
        game.apply_valid(&mut rng, Move::Pass).unwrap();
        assert!(game.is_over());
        // both final adjustments were appended
        assert_eq!(game.move_list.len(), 8);
        // nobody played out, so the factor is 1: the last mover (player 1)
        // is credited the opponent leave "ka" = 11, player 0 gets "e" = 1
        assert_eq!(game.players[1].score, 11);
        assert_eq!(game.players[0].score, 1);
    }

    #[test]
    fn playing_out_doubles_the_opponent_leave() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["at"]));
        let mut game = fixed_game(&dawg, &ts, "at", "ka");
        game.bag = Bag(Vec::new());
        let mut rng = rng();
        let mv = tile_move(&game, &[(7, 7, 'a', 'a'), (7, 8, 't', 't')]);
        assert!(mv.is_valid(&game));
        game.apply_valid(&mut rng, mv).unwrap();
        assert!(game.is_over());
        assert!(game.players[0].rack.is_empty());
        // word score (1+1)*2, plus twice the opponent leave k+a = 11
        assert_eq!(game.players[0].score, 4 + 22);
        assert_eq!(game.players[1].score, 0);
        assert_eq!(game.move_list.len(), 3);
        assert_eq!(game.num_pass_moves, 0);
    }

    #[test]
    fn first_moves_all_cover_the_center() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat", "cats", "cab"]));
        let game = fixed_game(&dawg, &ts, "cats", "");
        let state = game.state();
        let mut moves = state.generate_moves();
        // cat at 3 offsets and cats at 4 offsets, vertical through center
        assert_eq!(moves.len(), 7);
        let center = Position::new(7, 7);
        for mv in moves.iter_mut() {
            assert!(mv.is_valid(&game));
            match mv {
                Move::Tile(tm) => {
                    assert!(!tm.horizontal);
                    assert!(tm.covers.len() >= 2);
                    assert!(tm.covers.contains_key(&center));
                }
                _ => panic!("generator must only emit tile moves"),
            }
        }
        let best = moves
            .iter_mut()
            .map(|mv| mv.score(&state))
            .max()
            .unwrap();
        assert_eq!(best, 12);
    }

    #[test]
    fn generation_extends_words_already_on_the_board() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat", "cats", "cab"]));
        let mut game = fixed_game(&dawg, &ts, "s", "");
        for (col, letter) in [(6, 'c'), (7, 'a'), (8, 't')] {
            game.board
                .place_tile(Position::new(7, col), ts.new_tile(letter))
                .unwrap();
        }
        let state = game.state();
        let mut moves = state.generate_moves();
        assert_eq!(moves.len(), 1);
        match &mut moves[0] {
            Move::Tile(tm) => {
                assert_eq!(tm.word, "cats");
                assert_eq!(tm.covers.len(), 1);
                assert_eq!(
                    tm.covers[&Position::new(7, 9)],
                    Cover { source: 's', actual: 's' }
                );
                assert_eq!(tm.score(&state), 6);
            }
            _ => panic!("expected a tile move"),
        }
    }

    #[test]
    fn generation_spends_blanks_for_missing_letters() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let game = fixed_game(&dawg, &ts, "*at", "");
        let state = game.state();
        let mut moves = state.generate_moves();
        assert_eq!(moves.len(), 2);
        for mv in moves.iter_mut() {
            assert!(mv.is_valid(&game));
            match mv {
                Move::Tile(tm) => {
                    assert_eq!(tm.word, "cat");
                    let blank_cover = tm
                        .covers
                        .values()
                        .find(|cover| cover.source == BLANK)
                        .unwrap();
                    assert_eq!(blank_cover.actual, 'c');
                }
                _ => panic!("expected a tile move"),
            }
            assert_eq!(mv.score(&state), 4);
        }
    }

    #[test]
    fn generation_yields_the_same_moves_regardless_of_job_order() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat", "cats", "cab", "at", "ta"]));
        let mut game = fixed_game(&dawg, &ts, "cast", "");
        for (col, letter) in [(6, 'c'), (7, 'a'), (8, 't')] {
            game.board
                .place_tile(Position::new(7, col), ts.new_tile(letter))
                .unwrap();
        }
        let state = game.state();
        let key = |moves: Vec<Move>| -> Vec<(String, Position, Position, i32)> {
            let mut keyed: Vec<_> = moves
                .into_iter()
                .map(|mv| match mv {
                    Move::Tile(mut tm) => {
                        let score = tm.score(&state);
                        (tm.word, tm.start, tm.end, score)
                    }
                    _ => panic!("generator must only emit tile moves"),
                })
                .collect();
            keyed.sort_by(|a, b| (&a.0, a.1.row, a.1.col, a.3).cmp(&(&b.0, b.1.row, b.1.col, b.3)));
            keyed
        };
        let first = key(state.generate_moves());
        let second = key(state.generate_moves());
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn hopeless_rack_exchanges_through_the_strategy() {
        use super::super::strategy::Strategy;
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "zzzzzzz", "aaaaaaa");
        let mut rng = rng();
        let mv = {
            let state = game.state();
            Strategy::HighScore.generate_move(&mut rng, &state)
        };
        match &mv {
            Move::Exchange(em) => assert_eq!(em.letters, "zzzzzzz"),
            other => panic!("expected an exchange, got {other}"),
        }
        assert!(mv.is_valid(&game));
        game.apply_valid(&mut rng, mv).unwrap();
        assert_eq!(game.num_pass_moves, 1);
        assert_eq!(game.players[0].rack.len(), 7);
        assert_eq!(game.players[0].score, 0);
        assert_eq!(game.bag.tile_count(), 102);
    }

    #[test]
    fn game_over_is_monotone_after_six_passes() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&["cat"]));
        let mut game = fixed_game(&dawg, &ts, "a", "b");
        let mut rng = rng();
        for _ in 0..MAX_PASS_MOVES {
            game.apply_valid(&mut rng, Move::Pass).unwrap();
        }
        assert!(game.is_over());
        // still over no matter how often it is asked
        assert!(game.is_over());
    }

    #[test]
    fn generated_moves_are_valid_through_a_whole_game() {
        let ts = TileSet::french();
        let dawg = Dawg::new(&Lexicon::from_words(&[
            "cat", "cats", "cab", "at", "ta", "as", "sa", "rat", "rats", "tas", "bat", "bats",
            "sac", "car", "arc", "arcs", "rac",
        ]));
        let mut rng = rng();
        let mut game = Game::new(&dawg, &ts, &mut rng);
        let total = ts.num_tiles();
        loop {
            let mv = {
                let state = game.state();
                let mut moves = state.generate_moves();
                for mv in moves.iter() {
                    // every generated move must survive full validation,
                    // word checks included
                    match mv {
                        Move::Tile(tm) => {
                            let checked = TileMove::new(&game.board, tm.covers.clone());
                            assert!(checked.is_valid(&game), "invalid generated move: {mv}");
                        }
                        _ => panic!("generator must only emit tile moves"),
                    }
                }
                let scores: Vec<i32> = moves.iter_mut().map(|mv| mv.score(&state)).collect();
                match scores
                    .iter()
                    .enumerate()
                    .max_by_key(|&(_, score)| *score)
                    .map(|(i, _)| i)
                {
                    Some(i) => moves.swap_remove(i),
                    None => Move::Pass,
                }
            };
            game.apply_valid(&mut rng, mv).unwrap();
            // tiles are conserved across bag, racks and board
            let on_board = (0..BOARD_SIZE * BOARD_SIZE)
                .filter(|i| {
                    game.board
                        .get_square(Position::new((i / BOARD_SIZE) as i8, (i % BOARD_SIZE) as i8))
                        .tile
                        .is_some()
                })
                .count();
            assert_eq!(
                game.bag.tile_count()
                    + game.players[0].rack.len()
                    + game.players[1].rack.len()
                    + on_board,
                total
            );
            if game.is_over() {
                break;
            }
        }
        assert!(game.is_over());
    }
}
