//! Property-based tests for the incremental neighbour-count index.

use proptest::prelude::*;
use sparse_life::{Automaton, Cell, GridError, SparseGrid};
use std::collections::{HashMap, HashSet};

/// Cells in a small window so random sequences collide often.
fn cell() -> impl Strategy<Value = Cell> {
    (-6i64..6, -6i64..6).prop_map(Cell::from)
}

fn cells(max: usize) -> impl Strategy<Value = Vec<Cell>> {
    prop::collection::vec(cell(), 0..max)
}

/// Full snapshot of the grid: live cells and every non-zero neighbour count.
fn snapshot(grid: &SparseGrid) -> (Vec<Cell>, Vec<(Cell, u8)>) {
    let mut live = grid.live_cells().collect::<Vec<_>>();
    live.sort();
    let mut counts = grid.neighbour_counts().collect::<Vec<_>>();
    counts.sort();
    (live, counts)
}

/// Neighbour counts recomputed from the live set alone.
fn recount(grid: &SparseGrid) -> HashMap<Cell, u8> {
    let mut counts = HashMap::new();
    for cell in grid.live_cells() {
        for n in cell.neighbours() {
            *counts.entry(n).or_insert(0) += 1;
        }
    }
    counts
}

fn check_consistent(grid: &SparseGrid) -> Result<(), TestCaseError> {
    let expected = recount(grid);
    prop_assert_eq!(grid.tracked_cells(), expected.len());
    for (&cell, &count) in &expected {
        prop_assert_eq!(grid.neighbor_count(cell), count, "at {}", cell);
    }
    prop_assert!(grid.tracked_cells() <= 8 * grid.population());
    Ok(())
}

/// Reference Game of Life step on a plain set.
fn naive_step(live: &HashSet<Cell>) -> HashSet<Cell> {
    let mut counts: HashMap<Cell, u8> = HashMap::new();
    for cell in live {
        for n in cell.neighbours() {
            *counts.entry(n).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|(cell, n)| *n == 3 || (*n == 2 && live.contains(cell)))
        .map(|(cell, _)| cell)
        .collect()
}

proptest! {
    /// Counts stay exact after every single toggle, not only at the end.
    #[test]
    fn prop_counts_consistent_after_each_toggle(ops in cells(60)) {
        let mut grid = SparseGrid::new();
        for cell in ops {
            let was_live = grid.is_live(cell);
            if was_live {
                prop_assert_eq!(grid.deactivate(cell), Ok(()));
            } else {
                prop_assert_eq!(grid.activate(cell), Ok(()));
            }
            prop_assert_eq!(grid.is_live(cell), !was_live);
            check_consistent(&grid)?;
        }
    }

    /// Activating then deactivating a dead cell restores the exact prior state.
    #[test]
    fn prop_activate_deactivate_symmetry(start in cells(40), probe in cell()) {
        let mut grid = SparseGrid::from_cells(start);
        prop_assume!(!grid.is_live(probe));
        let before = snapshot(&grid);

        grid.activate(probe).unwrap();
        grid.deactivate(probe).unwrap();
        prop_assert_eq!(snapshot(&grid), before);
    }

    /// Rejected mutations never touch the grid.
    #[test]
    fn prop_rejections_leave_state(start in cells(40), probe in cell()) {
        let mut grid = SparseGrid::from_cells(start);
        let before = snapshot(&grid);
        if grid.is_live(probe) {
            prop_assert_eq!(grid.activate(probe), Err(GridError::AlreadyLive(probe)));
        } else {
            prop_assert_eq!(grid.deactivate(probe), Err(GridError::NotLive(probe)));
        }
        prop_assert_eq!(snapshot(&grid), before);
    }

    /// A valid batch equals its deactivations then activations applied one by one.
    #[test]
    fn prop_batch_equivalence(start in cells(40), kill_mask in prop::collection::vec(any::<bool>(), 40), births in cells(20)) {
        let base = SparseGrid::from_cells(start);
        let mut live = base.live_cells().collect::<Vec<_>>();
        live.sort();

        let dying = live
            .iter()
            .zip(kill_mask.iter().chain(std::iter::repeat(&false)))
            .filter(|(_, kill)| **kill)
            .map(|(&c, _)| c)
            .collect::<Vec<_>>();
        let mut born = vec![];
        for cell in births {
            let alive_after_kills = base.is_live(cell) && !dying.contains(&cell);
            if !alive_after_kills && !born.contains(&cell) {
                born.push(cell);
            }
        }

        let mut batched = base.clone();
        for &cell in &dying {
            batched.queue_deactivate(cell);
        }
        for &cell in &born {
            batched.queue_activate(cell);
        }
        batched.apply_pending().unwrap();
        prop_assert_eq!(batched.pending_len(), 0);

        let mut single = base;
        for &cell in &dying {
            single.deactivate(cell).unwrap();
        }
        for &cell in &born {
            single.activate(cell).unwrap();
        }

        prop_assert_eq!(snapshot(&batched), snapshot(&single));
        check_consistent(&batched)?;
    }

    /// The incremental automaton agrees with a from-scratch recount every generation.
    #[test]
    fn prop_step_matches_naive(start in cells(50), steps in 1usize..12) {
        let mut life = Automaton::from_grid(SparseGrid::from_cells(start));
        let mut reference = life.grid().live_cells().collect::<HashSet<_>>();
        for _ in 0..steps {
            life.step().unwrap();
            reference = naive_step(&reference);
            let actual = life.grid().live_cells().collect::<HashSet<_>>();
            prop_assert_eq!(&actual, &reference);
            check_consistent(life.grid())?;
        }
    }
}
