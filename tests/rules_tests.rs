//! Rules tests - crush detection, removal, gravity, and move search

use candy_crush::core::{Board, DealPolicy, Rules, SimpleRng};
use candy_crush::types::{BoardEvent, Color, Direction, Position, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Build a board from rows of color initials (`.` = empty)
fn board_from(rows: &[&str], seed: u32) -> Board {
    let grid: Vec<Vec<Option<Color>>> = rows
        .iter()
        .map(|row| row.chars().map(Color::from_initial).collect())
        .collect();
    Board::from_rows(&grid, SimpleRng::new(seed)).unwrap()
}

#[test]
fn test_three_by_three_crush_refills_top_row() {
    let mut board = board_from(&["RRB", "GYO", "BPG"], 1);
    let below: Vec<_> = (1..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .map(|(r, c)| board.candy_at(r, c).unwrap())
        .collect();

    // Turn (0,2) red, as a crush-producing swap would.
    board.remove_candy_at(0, 2).unwrap();
    board.add_candy_at(0, 2, Color::Red).unwrap();

    let mut rules = Rules::new(&mut board);
    let crushes = rules.get_candy_crushes();
    assert_eq!(crushes.len(), 1);
    assert_eq!(
        crushes[0].cells.as_slice(),
        &[Position::new(0, 0), Position::new(0, 1), Position::new(0, 2)]
    );

    rules.remove_crushes(&crushes).unwrap();
    rules.move_candies_down().unwrap();

    assert_eq!(board.score(), 3);
    assert!(board.is_full());
    // Nothing above row 0 to fall, so rows 1-2 are untouched.
    let after: Vec<_> = (1..3)
        .flat_map(|r| (0..3).map(move |c| (r, c)))
        .map(|(r, c)| board.candy_at(r, c).unwrap())
        .collect();
    assert_eq!(after, below);

    let events = board.drain_events();
    let adds: Vec<(usize, usize)> = events
        .iter()
        .filter_map(|e| match e {
            BoardEvent::Add { to_row, to_col, .. } => Some((*to_row, *to_col)),
            _ => None,
        })
        .collect();
    assert_eq!(adds, vec![(0, 2), (0, 0), (0, 1), (0, 2)]);
    assert!(!events.iter().any(|e| matches!(e, BoardEvent::Move { .. })));
}

#[test]
fn test_no_crushes_on_quiet_board() {
    let mut board = board_from(&["RYGO", "BPRY", "GOBP", "RYGO"], 1);
    let mut rules = Rules::new(&mut board);
    assert!(rules.get_candy_crushes().is_empty());
    assert!(rules.valid_moves().is_empty());
    assert_eq!(rules.get_random_valid_move(), None);
}

#[test]
fn test_two_in_a_row_is_never_a_crush() {
    let mut board = board_from(&["RR.", "G.G", "..."], 1);
    assert!(Rules::new(&mut board).get_candy_crushes().is_empty());
}

#[test]
fn test_cross_shape_scores_both_runs() {
    let mut board = board_from(&["YBYOP", "OBGYO", "BBBBY", "GBYPO", "PYOGY"], 1);
    let mut rules = Rules::new(&mut board);
    let crushes = rules.get_candy_crushes();
    assert_eq!(crushes.len(), 2);
    assert_eq!(crushes[0].len(), 4);
    assert_eq!(crushes[1].len(), 4);
    assert!(crushes[0].contains(Position::new(2, 1)));
    assert!(crushes[1].contains(Position::new(2, 1)));

    let awarded = rules.remove_crushes(&crushes).unwrap();
    assert_eq!(awarded, 8);
    assert_eq!(board.score(), 8);
    // Seven distinct cells emptied.
    assert_eq!(board.occupied_count(), 25 - 7);
    for crush in &crushes {
        for pos in &crush.cells {
            assert_eq!(board.candy_at(pos.row, pos.col), Ok(None));
        }
    }
}

#[test]
fn test_move_validity_matches_speculative_swap() {
    let mut board = Board::with_rng(7, SimpleRng::new(2024)).unwrap();
    Rules::new(&mut board).prepare_new_game().unwrap();

    let candies: Vec<_> = board.candies().collect();
    for candy in candies {
        for direction in Direction::ALL {
            let expected = {
                let mut scratch = board.clone();
                match scratch.candy_in_direction(&candy, direction) {
                    Ok(Some(other)) => {
                        scratch.flip_candies(&candy, &other).unwrap();
                        let crushes = Rules::new(&mut scratch).get_candy_crushes();
                        let moved = [candy.position(), other.position()];
                        crushes
                            .iter()
                            .any(|c| moved.iter().any(|p| c.contains(*p)))
                    }
                    _ => false,
                }
            };
            let actual = Rules::new(&mut board).is_move_type_valid(&candy, direction);
            assert_eq!(
                actual, expected,
                "{:?} {:?}",
                candy.position(),
                direction
            );
        }
    }
}

#[test]
fn test_cascade_loop_settles() {
    let mut board = Board::with_rng(8, SimpleRng::new(5)).unwrap();
    let mut rules = Rules::new(&mut board);
    rules.prepare_new_game().unwrap();

    let mut rounds = 0;
    loop {
        let crushes = rules.get_candy_crushes();
        if crushes.is_empty() {
            break;
        }
        let before = rules.board().score();
        let awarded = rules.remove_crushes(&crushes).unwrap();
        assert!(awarded >= 3);
        assert_eq!(rules.board().score(), before + awarded);
        rules.move_candies_down().unwrap();
        rounds += 1;
        assert!(rounds < 1000, "cascade did not settle");
    }
    assert!(rules.get_candy_crushes().is_empty());
    assert!(board.is_full());
}

#[test]
fn test_prepare_new_game_resets_and_fills_every_size() {
    for size in MIN_BOARD_SIZE..=MAX_BOARD_SIZE {
        let mut board = Board::with_rng(size, SimpleRng::new(size as u32)).unwrap();
        board.add_score(10, None);
        let mut rules = Rules::new(&mut board);
        rules.prepare_new_game().unwrap();
        assert_eq!(board.score(), 0);
        assert_eq!(board.occupied_count(), size * size);
        for candy in board.candies() {
            assert!(Color::ALL.contains(&candy.color));
        }
    }
}

#[test]
fn test_same_seed_same_deal() {
    let deal = |seed: u32, policy: DealPolicy| {
        let mut board = Board::with_rng(8, SimpleRng::new(seed)).unwrap();
        Rules::new(&mut board).prepare_new_game_with(policy).unwrap();
        board.snapshot()
    };
    assert_eq!(deal(0, DealPolicy::Random), deal(0, DealPolicy::Random));
    assert_eq!(
        deal(9, DealPolicy::NoInitialCrushes),
        deal(9, DealPolicy::NoInitialCrushes)
    );
    assert_ne!(deal(0, DealPolicy::Random), deal(2, DealPolicy::Random));
}

#[test]
fn test_prepare_new_game_adds_in_column_major_order() {
    let mut board = Board::new(3).unwrap();
    Rules::new(&mut board).prepare_new_game().unwrap();
    let order: Vec<(usize, usize)> = board
        .drain_events()
        .into_iter()
        .map(|e| match e {
            BoardEvent::Add { to_row, to_col, .. } => (to_row, to_col),
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    assert_eq!(
        order,
        vec![
            (0, 0),
            (1, 0),
            (2, 0),
            (0, 1),
            (1, 1),
            (2, 1),
            (0, 2),
            (1, 2),
            (2, 2)
        ]
    );
}

#[test]
fn test_random_valid_move_is_valid() {
    let mut board = board_from(&["RRGR", "BYPG", "OBYO", "YOBP"], 3);
    let mut rules = Rules::new(&mut board);
    let all = rules.valid_moves();
    assert_eq!(all.len(), 2);
    for _ in 0..10 {
        let mv = rules.get_random_valid_move().unwrap();
        assert!(all.contains(&mv));
    }
}
