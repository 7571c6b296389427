#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::equation::{difficulty_label, generate_equations, GameMode, EQUATIONS_PER_LEVEL};
    use crate::game::{ArithmeticGame, ClickOutcome, GameStatus, ROUND_TIME};
    use crate::grid::{Endpoint, Grid, GridError};
    use crate::level::Level;
    use crate::side::Side;
    use crate::tile::{Connection, Tile};
    use crate::validate::{validate, FlowNode};

    fn port(row: usize, col: usize, side: Side) -> FlowNode {
        FlowNode::Port { row, col, side }
    }

    #[test]
    fn straight_tile_carries_flow_across() {
        let grid = Grid::from_rows(vec![vec![Tile::straight_horizontal()]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 0, Side::Right),
        ).unwrap();

        assert!(result.is_valid);
        assert_eq!(result.reachable, HashSet::from([
            FlowNode::Source,
            port(0, 0, Side::Left),
            port(0, 0, Side::Right),
            FlowNode::Sink,
        ]));
    }

    #[test]
    fn no_exit_on_requested_side() {
        let grid = Grid::from_rows(vec![vec![Tile::straight_horizontal()]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 0, Side::Bottom),
        ).unwrap();

        assert!(!result.is_valid);
        // the flow still runs through the tile, it just exits the wrong way
        assert!(result.flow_reaches(0, 0, Side::Right));
    }

    #[test]
    fn no_entry_on_requested_side() {
        // the reverse direction of a one-way connection does not accept flow
        let grid = Grid::from_rows(vec![vec![Tile::straight_horizontal()]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Right),
            Endpoint::new(0, 0, Side::Left),
        ).unwrap();

        assert!(!result.is_valid);
        assert_eq!(result.reachable, HashSet::from([FlowNode::Source]));
    }

    #[test]
    fn neighbor_handshake_links_cells() {
        let grid = Grid::from_rows(vec![vec![
            Tile::straight_horizontal(),
            Tile::curve_left_top(),
        ]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 1, Side::Top),
        ).unwrap();

        assert!(result.is_valid);
        assert!(result.flow_reaches(0, 1, Side::Left));
    }

    #[test]
    fn handshake_requires_matching_entry() {
        // the second tile flows bottom-to-top and has no entry on its left side
        let grid = Grid::from_rows(vec![vec![
            Tile::straight_horizontal(),
            Tile::new("s-v-up", vec![Connection::new(Side::Bottom, Side::Top)]),
        ]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 1, Side::Top),
        ).unwrap();

        assert!(!result.is_valid);
        assert!(!result.flow_reaches(0, 1, Side::Left));
    }

    #[test]
    fn wall_tile_blocks_and_stays_dark() {
        let grid = Grid::from_rows(vec![vec![
            Tile::straight_horizontal(),
            Tile::blocked(),
            Tile::straight_horizontal(),
        ]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 2, Side::Right),
        ).unwrap();

        assert!(!result.is_valid);
        for side in [Side::Top, Side::Right, Side::Bottom, Side::Left] {
            assert!(!result.flow_reaches(0, 1, side));
            assert!(!result.flow_reaches(0, 2, side));
        }
    }

    #[test]
    fn tee_fans_out_to_both_exits() {
        let grid = Grid::from_rows(vec![vec![Tile::tee()]]).unwrap();
        let result = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 0, Side::Right),
        ).unwrap();

        assert!(result.is_valid);
        assert!(result.flow_reaches(0, 0, Side::Top));
        assert!(result.flow_reaches(0, 0, Side::Right));
    }

    #[test]
    fn boundary_carries_both_directions_when_both_tiles_agree() {
        let dual = || Tile::new("dual", vec![
            Connection::new(Side::Left, Side::Right),
            Connection::new(Side::Right, Side::Left),
        ]);
        let grid = Grid::from_rows(vec![vec![dual(), dual()]]).unwrap();

        let rightward = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 1, Side::Right),
        ).unwrap();
        let leftward = validate(
            &grid,
            Endpoint::new(0, 1, Side::Right),
            Endpoint::new(0, 0, Side::Left),
        ).unwrap();

        assert!(rightward.is_valid);
        assert!(leftward.is_valid);
    }

    #[test]
    fn repeated_validation_is_deterministic() {
        let level = &Level::builtin()[1];
        let first = validate(&level.grid, level.start, level.end).unwrap();
        let second = validate(&level.grid, level.start, level.end).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn adding_a_connection_never_shrinks_reach() {
        let level = &Level::builtin()[0];
        let before = validate(&level.grid, level.start, level.end).unwrap();

        // cross carries a strict superset of the straight's connections
        let mut widened = level.grid.clone();
        widened.set_tile(1, 1, Tile::cross()).unwrap();
        let after = validate(&widened, level.start, level.end).unwrap();

        assert!(before.reachable.is_subset(&after.reachable));
    }

    fn transpose_side(side: Side) -> Side {
        match side {
            Side::Top => Side::Left,
            Side::Left => Side::Top,
            Side::Bottom => Side::Right,
            Side::Right => Side::Bottom,
        }
    }

    fn transposed(grid: &Grid) -> Grid {
        Grid::from_rows(
            (0..grid.cols()).map(|c| {
                (0..grid.rows()).map(|r| {
                    let tile = grid.tile(r, c).unwrap();
                    Tile::new(
                        tile.id(),
                        tile.connections().iter()
                            .map(|conn| Connection::new(transpose_side(conn.entry), transpose_side(conn.exit)))
                            .collect(),
                    )
                }).collect()
            }).collect()
        ).unwrap()
    }

    #[test]
    fn transposed_puzzle_gives_the_same_verdict() {
        for level in Level::builtin() {
            let original = validate(&level.grid, level.start, level.end).unwrap();

            let mirrored = validate(
                &transposed(&level.grid),
                Endpoint::new(level.start.col, level.start.row, transpose_side(level.start.side)),
                Endpoint::new(level.end.col, level.end.row, transpose_side(level.end.side)),
            ).unwrap();

            assert_eq!(original.is_valid, mirrored.is_valid);
            assert_eq!(original.reachable.len(), mirrored.reachable.len());
        }
    }

    #[test]
    fn out_of_bounds_endpoints_fail_fast() {
        let grid = Grid::from_rows(vec![vec![Tile::straight_horizontal()]]).unwrap();

        let bad_start = validate(
            &grid,
            Endpoint::new(3, 0, Side::Left),
            Endpoint::new(0, 0, Side::Right),
        );
        assert_eq!(bad_start, Err(GridError::EndpointOutOfBounds {
            endpoint: Endpoint::new(3, 0, Side::Left),
            rows: 1,
            cols: 1,
        }));

        let bad_end = validate(
            &grid,
            Endpoint::new(0, 0, Side::Left),
            Endpoint::new(0, 9, Side::Right),
        );
        assert!(matches!(bad_end, Err(GridError::EndpointOutOfBounds { .. })));
    }

    #[test]
    fn malformed_grids_rejected() {
        assert_eq!(Grid::from_rows(vec![]), Err(GridError::Empty));
        assert_eq!(Grid::from_rows(vec![vec![]]), Err(GridError::Empty));
        assert_eq!(
            Grid::from_rows(vec![
                vec![Tile::cross(), Tile::cross()],
                vec![Tile::cross()],
            ]),
            Err(GridError::Ragged { row: 1, expected: 2, got: 1 }),
        );
    }

    #[test]
    fn set_tile_rejects_out_of_bounds_writes() {
        let mut grid = Grid::from_rows(vec![vec![Tile::cross()]]).unwrap();
        assert_eq!(
            grid.set_tile(0, 5, Tile::blocked()),
            Err(GridError::CellOutOfBounds { row: 0, col: 5, rows: 1, cols: 1 }),
        );
    }

    #[test]
    fn authored_level_one_needs_rotation() {
        let level = &Level::builtin()[0];
        assert!(!validate(&level.grid, level.start, level.end).unwrap().is_valid);
    }

    #[test]
    fn level_one_solvable_after_swaps() {
        let level = &Level::builtin()[0];
        let mut grid = level.grid.clone();
        grid.set_tile(1, 0, Tile::straight_horizontal()).unwrap();
        grid.set_tile(1, 2, Tile::straight_horizontal()).unwrap();

        assert!(validate(&grid, level.start, level.end).unwrap().is_valid);
    }

    #[test]
    fn authored_cross_level_is_prelinked() {
        let level = &Level::builtin()[2];
        let result = validate(&level.grid, level.start, level.end).unwrap();

        assert!(result.is_valid);
        // the crossover's vertical lanes carry nothing; only the middle row lights up
        assert!(result.flow_reaches(2, 2, Side::Left));
        assert!(!result.flow_reaches(2, 2, Side::Top));
        assert!(!result.flow_reaches(0, 0, Side::Left));
    }

    #[test]
    fn grid_renders_tile_glyphs() {
        let level = &Level::builtin()[0];
        assert_eq!(format!("{}", level.grid), "─┌─
└─┐
│┘─
");
    }

    #[test]
    fn generator_yields_six_distinct_values() {
        let mut rng = StdRng::seed_from_u64(42);
        let equations = generate_equations(1, &mut rng);

        assert_eq!(equations.len(), EQUATIONS_PER_LEVEL);
        for (i, eq) in equations.iter().enumerate() {
            assert!(eq.value >= 0.0, "negative value in {}", eq.text);
            for other in &equations[..i] {
                assert_ne!(eq.id, other.id);
                assert_ne!(eq.value, other.value, "{} and {} collide", eq.text, other.text);
            }
        }
    }

    #[test]
    fn early_division_comes_out_clean() {
        let mut rng = StdRng::seed_from_u64(7);
        for level in [5, 6, 7, 8] {
            for eq in generate_equations(level, &mut rng) {
                assert_eq!(eq.value.fract(), 0.0, "{} should be integral at level {}", eq.text, level);
            }
        }
    }

    #[test]
    fn generated_text_matches_value() {
        let mut rng = StdRng::seed_from_u64(99);
        for level in [1, 10, 25, 50, 80] {
            for eq in generate_equations(level, &mut rng) {
                let parts: Vec<&str> = eq.text.split_whitespace().collect();
                let (a, op, b): (f64, &str, f64) =
                    (parts[0].parse().unwrap(), parts[1], parts[2].parse().unwrap());
                let expected = match op {
                    "+" => a + b,
                    "-" => a - b,
                    "*" => a * b,
                    "/" => (a / b * 10.0).round() / 10.0,
                    "%" => a % b,
                    other => panic!("unexpected operator {}", other),
                };
                assert_eq!(eq.value, expected, "{}", eq.text);
            }
        }
    }

    #[test]
    fn mode_phases_cover_the_run() {
        assert_eq!(GameMode::for_level(1), GameMode::Smallest);
        assert_eq!(GameMode::for_level(20), GameMode::Smallest);
        assert_eq!(GameMode::for_level(21), GameMode::Ascending);
        assert_eq!(GameMode::for_level(40), GameMode::Ascending);
        assert_eq!(GameMode::for_level(41), GameMode::Descending);
        assert_eq!(GameMode::for_level(60), GameMode::Descending);
        assert_eq!(GameMode::for_level(61), GameMode::Largest);
        assert_eq!(GameMode::for_level(80), GameMode::Largest);

        assert_eq!(difficulty_label(3), "PHASE 1.1: BASIC SMALL");
        assert_eq!(difficulty_label(12), "PHASE 1.3: MODULO MAGIC");
        assert_eq!(difficulty_label(33), "PHASE 2: LOW TO HIGH");
        assert_eq!(difficulty_label(77), "PHASE 4: BIGGEST");
    }

    fn id_of_extreme(game: &ArithmeticGame, largest: bool) -> String {
        let mut equations: Vec<_> = game.equations().iter().collect();
        equations.sort_by(|a, b| a.value.partial_cmp(&b.value).unwrap());
        let pick = if largest { equations.last() } else { equations.first() };
        pick.unwrap().id.clone()
    }

    #[test]
    fn smallest_mode_scores_and_advances() {
        let mut game = ArithmeticGame::seeded(7);
        game.start();
        assert_eq!(game.status(), GameStatus::Playing);

        let id = id_of_extreme(&game, false);
        assert_eq!(game.click(&id), ClickOutcome::Correct);
        assert_eq!(game.score(), 10);
        assert_eq!(game.level(), 2);
        assert_eq!(game.time_left(), ROUND_TIME);
    }

    #[test]
    fn wrong_click_advances_scoreless() {
        let mut game = ArithmeticGame::seeded(7);
        game.start();

        let id = id_of_extreme(&game, true);
        assert_eq!(game.click(&id), ClickOutcome::Wrong);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 2);
    }

    #[test]
    fn ascending_mode_walks_the_ladder() {
        let mut game = ArithmeticGame::seeded(11);
        game.start_level(21);
        assert_eq!(game.mode(), GameMode::Ascending);

        let mut ordered: Vec<_> = game.equations().iter()
            .map(|eq| (eq.value, eq.id.clone()))
            .collect();
        ordered.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        for (i, (_, id)) in ordered.iter().enumerate() {
            assert_eq!(game.click(id), ClickOutcome::Correct, "click {} of the ladder", i);
        }

        // five mid-sequence clicks at +2, completion at +10
        assert_eq!(game.score(), 20);
        assert_eq!(game.level(), 22);
    }

    #[test]
    fn ascending_wrong_order_forfeits() {
        let mut game = ArithmeticGame::seeded(11);
        game.start_level(21);

        let id = id_of_extreme(&game, true);
        assert_eq!(game.click(&id), ClickOutcome::Wrong);
        assert_eq!(game.score(), 0);
        assert_eq!(game.level(), 22);
    }

    #[test]
    fn descending_mid_click_stays_on_level() {
        let mut game = ArithmeticGame::seeded(3);
        game.start_level(41);
        assert_eq!(game.mode(), GameMode::Descending);

        let id = id_of_extreme(&game, true);
        assert_eq!(game.click(&id), ClickOutcome::Correct);
        assert_eq!(game.score(), 2);
        assert_eq!(game.level(), 41);
        assert_eq!(game.click(&id), ClickOutcome::Ignored);
    }

    #[test]
    fn timeout_forfeits_level() {
        let mut game = ArithmeticGame::seeded(5);
        game.start();

        for _ in 0..ROUND_TIME {
            game.tick();
        }

        assert_eq!(game.level(), 2);
        assert_eq!(game.score(), 0);
        assert_eq!(game.time_left(), ROUND_TIME);
    }

    #[test]
    fn run_completes_after_final_level() {
        let mut game = ArithmeticGame::seeded(13);
        game.start_level(80);
        assert_eq!(game.mode(), GameMode::Largest);

        let id = id_of_extreme(&game, true);
        assert_eq!(game.click(&id), ClickOutcome::Correct);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.score(), 10);
    }

    #[test]
    fn clicks_ignored_when_idle() {
        let mut game = ArithmeticGame::seeded(1);
        assert_eq!(game.status(), GameStatus::Idle);
        assert_eq!(game.click("lvl1-eq0-0"), ClickOutcome::Ignored);
    }
}
