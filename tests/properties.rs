use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use bramble_chess::engines::engine_negamax::{find_best_move, SearchConfig};
use bramble_chess::game_state::chess_types::{square_at, Color};
use bramble_chess::game_state::game_state::GameState;
use bramble_chess::move_generation::legal_move_checks::is_king_in_check;
use bramble_chess::moves::move_descriptions::Move;
use bramble_chess::search::board_scoring::{evaluate, PositionalScorer, CHECKMATE_SCORE};
use bramble_chess::search::negamax::NegamaxSearcher;
use bramble_chess::search::threading::{SharedSearchState, ThreadingConfig, ThreadingModel};
use bramble_chess::utils::long_algebraic::long_algebraic_to_move;

fn play(game: &mut GameState, moves: &[&str]) {
    for text in moves {
        let legal = game.get_valid_moves();
        let mv = long_algebraic_to_move(text, &legal).expect("scripted move should be legal");
        game.make_move(mv);
    }
}

fn find(legal: &[Move], text: &str) -> Option<Move> {
    legal.iter().copied().find(|mv| mv.to_long_algebraic() == text)
}

fn assert_sound(game: &mut GameState, depth: u8) {
    if depth == 0 {
        return;
    }
    let mover = game.side_to_move;
    for mv in game.get_valid_moves() {
        let before = game.clone();
        game.make_move(mv);
        assert!(
            !is_king_in_check(game, mover),
            "{mv} leaves the king attacked in {}",
            before.get_fen()
        );
        assert_sound(game, depth - 1);
        assert_eq!(game.undo_move(), Some(mv));
        assert!(game.same_position(&before), "undo of {mv} did not restore {}", before.get_fen());
    }
}

#[test]
fn make_undo_round_trips_on_random_games() {
    let mut rng = StdRng::seed_from_u64(0xC0FFEE);
    for _ in 0..8 {
        let mut game = GameState::new_game();
        let mut history = vec![game.clone()];

        for _ in 0..60 {
            let legal = game.get_valid_moves();
            let Some(&mv) = legal.choose(&mut rng) else {
                break;
            };
            game.make_move(mv);
            history.push(game.clone());
        }

        history.pop();
        while let Some(expected) = history.pop() {
            assert!(game.undo_move().is_some());
            assert!(game.same_position(&expected));
            assert_eq!(game.halfmove_clock, expected.halfmove_clock);
            assert_eq!(game.fullmove_number, expected.fullmove_number);
        }
        assert_eq!(game.undo_move(), None);
    }
}

#[test]
fn legal_moves_never_expose_the_king() {
    assert_sound(&mut GameState::new_game(), 3);
    assert_sound(
        &mut GameState::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
            .expect("FEN should parse"),
        2,
    );
}

#[test]
fn fools_mate_is_checkmate() {
    let mut game = GameState::new_game();
    play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);

    assert!(game.get_valid_moves().is_empty());
    assert!(game.checkmate);
    assert!(!game.stalemate);
    assert_eq!(game.side_to_move, Color::Light);
}

#[test]
fn lone_king_stalemate() {
    let mut game = GameState::from_fen("k7/2Q5/1K6/8/8/8/8/8 b - - 0 1").expect("FEN should parse");
    assert!(game.get_valid_moves().is_empty());
    assert!(game.stalemate);
    assert!(!game.checkmate);
}

#[test]
fn en_passant_is_available_for_exactly_one_ply() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert_eq!(game.en_passant_square, Some(square_at(5, 3)));

    let legal = game.get_valid_moves();
    let capture = find(&legal, "e5d6").expect("en passant should be offered");
    assert!(capture.is_en_passant);
    assert_eq!(legal.iter().filter(|mv| mv.is_en_passant).count(), 1);

    play(&mut game, &["g1f3", "h7h6"]);
    let legal = game.get_valid_moves();
    assert!(find(&legal, "e5d6").is_none());
    assert!(legal.iter().all(|mv| !mv.is_en_passant));
}

#[test]
fn pruning_never_changes_the_chosen_move_or_score() {
    for (fen, depth) in [
        ("r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3", 2),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 3),
        ("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1", 2),
    ] {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let legal = game.clone().get_valid_moves();
        let shared = SharedSearchState::default();
        let sign = game.side_to_move.sign();

        let mut pruned = NegamaxSearcher::new(&PositionalScorer, &shared, depth);
        let pruned_score = pruned
            .negamax(&mut game.clone(), &legal, depth, -CHECKMATE_SCORE, CHECKMATE_SCORE, sign)
            .expect("search should finish");

        let mut full = NegamaxSearcher::new(&PositionalScorer, &shared, depth).without_pruning();
        let full_score = full
            .negamax(&mut game.clone(), &legal, depth, -CHECKMATE_SCORE, CHECKMATE_SCORE, sign)
            .expect("search should finish");

        assert_eq!(pruned_score, full_score, "{fen}");
        assert_eq!(pruned.best_move, full.best_move, "{fen}");
        assert!(pruned.stats.positions_evaluated <= full.stats.positions_evaluated);
    }
}

#[test]
fn mirrored_positions_score_opposite() {
    let mut game = GameState::new_game();
    play(&mut game, &["e2e4", "c7c5", "g1f3", "d7d6", "d2d4", "c5d4", "f3d4"]);

    for fen in [
        game.get_fen(),
        "4k3/8/8/8/8/8/8/3QK3 w - - 0 1".to_owned(),
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b KQkq - 0 1".to_owned(),
    ] {
        let mut position = GameState::from_fen(&fen).expect("FEN should parse");
        let mut mirrored = position.mirrored();
        assert_eq!(evaluate(&mut position), -evaluate(&mut mirrored), "{fen}");
    }
}

#[test]
fn parallel_search_matches_sequential_score() {
    for fen in [
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    ] {
        let game = GameState::from_fen(fen).expect("FEN should parse");
        let legal = game.clone().get_valid_moves();
        let shared = SharedSearchState::default();

        let sequential = SearchConfig {
            depth: 2,
            threading: ThreadingConfig::single_threaded(),
            seed: Some(17),
            ..SearchConfig::default()
        };
        let parallel = SearchConfig {
            threading: ThreadingConfig {
                model: ThreadingModel::RootSplit,
                requested_threads: 3,
            },
            ..sequential
        };

        let a = find_best_move(&game, &legal, &sequential, &PositionalScorer, &shared).expect("search");
        let b = find_best_move(&game, &legal, &parallel, &PositionalScorer, &shared).expect("search");

        assert_eq!(a.best_score, b.best_score, "{fen}");
        assert!(legal.contains(&b.best_move.expect("a move")));
    }
}

#[test]
fn seeded_sequential_search_is_reproducible() {
    let game = GameState::new_game();
    let legal = game.clone().get_valid_moves();
    let shared = SharedSearchState::default();
    let config = SearchConfig {
        depth: 2,
        threading: ThreadingConfig::single_threaded(),
        seed: Some(99),
        ..SearchConfig::default()
    };

    let first = find_best_move(&game, &legal, &config, &PositionalScorer, &shared).expect("search");
    let second = find_best_move(&game, &legal, &config, &PositionalScorer, &shared).expect("search");
    assert_eq!(first.best_move, second.best_move);
    assert_eq!(first.best_score, second.best_score);
    assert_eq!(first.stats.positions_evaluated, second.stats.positions_evaluated);
}
