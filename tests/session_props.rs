use broadside::{
    place_fleet_random, validate_fleet, Board, Difficulty, GameSession, Orientation,
    ShipPlacement, BOARD_SIZE, NUM_SHIPS,
};
use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn random_fleet(seed: u64) -> Vec<ShipPlacement> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut board = Board::new();
    place_fleet_random(&mut board, &mut rng).unwrap();
    (0..NUM_SHIPS)
        .map(|i| {
            let (row, col, orientation) = board.placement(i).unwrap();
            ShipPlacement { ship_index: i, row, col, orientation }
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn duplicate_shot_never_mutates(seed in any::<u64>(), row in 0..BOARD_SIZE, col in 0..BOARD_SIZE) {
        let mut session = GameSession::with_seed(Difficulty::Medium, seed).unwrap();
        session.submit_fleet(&random_fleet(seed ^ 1)).unwrap();
        session.player_shoot(row, col).unwrap();
        session.opponent_shoot().unwrap();

        let before = session.snapshot();
        prop_assert!(session.player_shoot(row, col).is_err());
        prop_assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn rejected_fleet_leaves_board_empty(seed in any::<u64>(), corrupt in 0..4usize) {
        let mut board = Board::new();
        let mut fleet = random_fleet(seed);
        // Force the corrupted ship (length >= 3) out of bounds.
        fleet[corrupt].row = 0;
        fleet[corrupt].col = 8;
        fleet[corrupt].orientation = Orientation::Horizontal;
        prop_assert!(validate_fleet(&mut board, &fleet).is_err());
        prop_assert!(board.ship_map().is_empty());
        prop_assert!(!board.all_placed());
    }

    #[test]
    fn snapshot_is_pure(seed in any::<u64>(), turns in 0..30usize) {
        let mut session = GameSession::with_seed(Difficulty::Hard, seed).unwrap();
        session.submit_fleet(&random_fleet(seed ^ 2)).unwrap();

        let mut cells = (0..BOARD_SIZE).flat_map(|r| (0..BOARD_SIZE).map(move |c| (r, c)));
        for _ in 0..turns {
            if session.is_over() {
                break;
            }
            let (r, c) = cells.next().unwrap();
            session.player_shoot(r, c).unwrap();
            if session.is_over() {
                break;
            }
            session.opponent_shoot().unwrap();
        }
        prop_assert_eq!(session.snapshot(), session.snapshot());
    }

    #[test]
    fn random_fleets_are_always_legal(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board::new();
        place_fleet_random(&mut board, &mut rng).unwrap();
        let mut resubmit = Board::new();
        let fleet = (0..NUM_SHIPS)
            .map(|i| {
                let (row, col, orientation) = board.placement(i).unwrap();
                ShipPlacement { ship_index: i, row, col, orientation }
            })
            .collect::<Vec<_>>();
        prop_assert!(validate_fleet(&mut resubmit, &fleet).is_ok());
    }
}
