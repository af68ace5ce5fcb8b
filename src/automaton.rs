use crate::{Cell, GridError, SparseGrid};

/// Births and deaths of one generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepSummary {
    pub births: usize,
    pub deaths: usize,
}

/// Conway's Game of Life (B3/S23) over a [`SparseGrid`].
///
/// Each step looks only at live cells and at cells that have a live neighbour,
/// so its cost follows the population rather than any region of the plane.
#[derive(Clone, Debug, Default)]
pub struct Automaton {
    grid: SparseGrid,
    generation: u64,
}

impl Automaton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_grid(grid: SparseGrid) -> Self {
        Self {
            grid,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &SparseGrid {
        &self.grid
    }

    /// Direct access for user edits between generations.
    pub fn grid_mut(&mut self) -> &mut SparseGrid {
        &mut self.grid
    }

    pub fn into_grid(self) -> SparseGrid {
        self.grid
    }

    /// Number of generations simulated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Flips a single cell; returns its new state.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        self.grid.toggle(cell)
    }

    /// Advances the automaton by one generation.
    ///
    /// Every decision is taken against the counts of the current generation and
    /// only then applied as a single batch.
    pub fn step(&mut self) -> Result<StepSummary, GridError> {
        let grid = &self.grid;
        let dying = grid
            .live_cells()
            .filter(|&cell| !matches!(grid.neighbor_count(cell), 2 | 3))
            .collect::<Vec<_>>();
        let born = grid
            .neighbour_counts()
            .filter(|&(cell, count)| count == 3 && !grid.is_live(cell))
            .map(|(cell, _)| cell)
            .collect::<Vec<_>>();

        let summary = StepSummary {
            births: born.len(),
            deaths: dying.len(),
        };
        for cell in dying {
            self.grid.queue_deactivate(cell);
        }
        for cell in born {
            self.grid.queue_activate(cell);
        }
        self.grid.apply_pending()?;

        self.generation += 1;
        tracing::trace!(
            generation = self.generation,
            births = summary.births,
            deaths = summary.deaths,
            population = self.grid.population(),
            "advanced generation"
        );
        Ok(summary)
    }

    /// Advances the automaton by `steps` generations.
    pub fn advance(&mut self, steps: u64) -> Result<(), GridError> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }
}
