use bramble_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use bramble_chess::game_state::game_state::GameState;
use bramble_chess::move_generation::perft::{perft, PerftCounts};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
const POSITION_4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";
const POSITION_6: &str = "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

fn run(fen: &str, depth: u8) -> PerftCounts {
    let mut game = GameState::from_fen(fen).expect("FEN should parse");
    let before = game.clone();
    let counts = perft(&mut game, depth);
    assert!(game.same_position(&before), "perft left {fen} modified");
    counts
}

fn test_perft_fen_nodes(fen: &str, depth: u8, expected: usize) {
    let counts = run(fen, depth);
    assert_eq!(counts.nodes, expected, "PERFT({depth}) failed on {fen}");
}

#[test]
fn start_position() {
    test_perft_fen_nodes(STARTING_POSITION_FEN, 1, 20);
    test_perft_fen_nodes(STARTING_POSITION_FEN, 2, 400);

    let counts = run(STARTING_POSITION_FEN, 3);
    assert_eq!(counts.nodes, 8902);
    assert_eq!(counts.captures, 34);
    assert_eq!(counts.checks, 12);
    assert_eq!(counts.castles, 0);
}

#[test]
fn kiwipete() {
    let d1 = run(KIWIPETE, 1);
    assert_eq!(d1.nodes, 48);
    assert_eq!(d1.captures, 8);
    assert_eq!(d1.castles, 2);

    let d2 = run(KIWIPETE, 2);
    assert_eq!(
        d2,
        PerftCounts {
            nodes: 2039,
            captures: 351,
            en_passant: 1,
            castles: 91,
            promotions: 0,
            checks: 3,
        }
    );
}

#[test]
fn position_3() {
    let d1 = run(POSITION_3, 1);
    assert_eq!((d1.nodes, d1.captures, d1.checks), (14, 1, 2));

    let d2 = run(POSITION_3, 2);
    assert_eq!((d2.nodes, d2.captures, d2.checks), (191, 14, 10));

    let d3 = run(POSITION_3, 3);
    assert_eq!(
        (d3.nodes, d3.captures, d3.en_passant, d3.checks),
        (2812, 209, 2, 267)
    );
}

#[test]
fn position_4() {
    test_perft_fen_nodes(POSITION_4, 1, 6);
}

#[test]
fn position_6() {
    test_perft_fen_nodes(POSITION_6, 1, 46);
    test_perft_fen_nodes(POSITION_6, 2, 2079);
}
