// Copyright (C) 2020-2026 Andy Kurnia.

use chevalet::{dawg, error, game, lexicon, strategy, tile};
use clap::Parser;
use rand::prelude::*;

#[derive(Parser)]
#[command(name = "chevalet", about = "Scrabble bot-vs-bot simulator")]
struct Cli {
    /// Number of games to simulate
    #[arg(short = 'n', long = "num-games", default_value_t = 10)]
    num_games: u32,

    /// Lexicon name, loaded from assets/<name>.txt
    #[arg(short = 'l', long, default_value = "defaultFR")]
    lexicon: String,

    /// Print every move and each final board
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> error::Returns<()> {
    let cli = Cli::parse();
    let start = std::time::Instant::now();

    let lexicon = lexicon::Lexicon::load(&cli.lexicon)?;
    let tile_set = tile::TileSet::french();
    let dawg = dawg::Dawg::new(&lexicon);
    let mut rng = rand_chacha::ChaCha20Rng::from_entropy();

    let bot_a = strategy::Strategy::HighScore;
    let bot_b = strategy::Strategy::OneOfNBest(5);

    let mut wins_a = 0u32;
    let mut wins_b = 0u32;
    for _ in 0..cli.num_games {
        let (score_a, score_b) =
            simulate_game(&dawg, &tile_set, &bot_a, &bot_b, cli.verbose, &mut rng)?;
        if score_a > score_b {
            wins_a += 1;
        }
        if score_b > score_a {
            wins_b += 1;
        }
    }

    println!("{} games were played", cli.num_games);
    println!(
        "Robot A won {} games, and Robot B won {} games; {} games were draws.",
        wins_a,
        wins_b,
        cli.num_games - wins_a - wins_b,
    );
    println!("Took {:?}", start.elapsed());
    Ok(())
}

fn simulate_game(
    dawg: &dawg::Dawg,
    tile_set: &tile::TileSet,
    bot_a: &strategy::Strategy,
    bot_b: &strategy::Strategy,
    verbose: bool,
    rng: &mut dyn RngCore,
) -> error::Returns<(i32, i32)> {
    let mut game = game::Game::new(dawg, tile_set, rng);
    loop {
        let player = game.player_to_move_index();
        let mv = {
            let bot = if player == 0 { bot_a } else { bot_b };
            bot.generate_move(rng, &game.state())
        };
        if verbose {
            println!("Player {}: {mv}", player + 1);
        }
        game.apply_valid(rng, mv)?;
        if game.is_over() {
            break;
        }
    }
    if verbose {
        println!("{}", game.board);
        println!(
            "Game over! Final scores: {} - {}\n",
            game.players[0].score, game.players[1].score,
        );
    }
    Ok((game.players[0].score, game.players[1].score))
}
