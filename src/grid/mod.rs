//! Sparse set of live cells with an incrementally maintained neighbour-count index.
//!
//! Memory is proportional to the number of live cells and the cells touching them,
//! never to a bounding box, which is what lets the plane be unbounded in practice.

mod cell;

pub use cell::Cell;

use crate::GridError;
use ahash::{AHashMap, AHashSet};
use std::{collections::hash_map::Entry, num::NonZeroU8};

/// Live cells of the plane plus, for every cell with at least one live neighbour,
/// the number of its live neighbours.
///
/// Invariant: for every cell `c`, `counts[c]` equals the number of live cells among
/// `c.neighbours()`, and cells with no live neighbours have no entry at all.
#[derive(Clone, Debug, Default)]
pub struct SparseGrid {
    alive: AHashSet<Cell>,
    counts: AHashMap<Cell, NonZeroU8>,
    to_activate: Vec<Cell>,
    to_deactivate: Vec<Cell>,
}

impl SparseGrid {
    /// Creates an empty grid.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a grid with the given cells alive; duplicates are collapsed.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut grid = Self::new();
        grid.insert_cells(cells, Cell::default());
        grid
    }

    /// Fills a `width x height` rectangle anchored at the origin with random cells.
    ///
    /// `seed` - random seed (if `None`, then random seed is generated)
    pub fn random(width: u32, height: u32, seed: Option<u64>, fill_rate: f64) -> Self {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let fill_rate = fill_rate.clamp(0., 1.);
        let cells = (0..height as i64)
            .flat_map(|y| (0..width as i64).map(move |x| Cell::new(x, y)))
            .filter(|_| rng.gen_bool(fill_rate))
            .collect::<Vec<_>>();
        Self::from_cells(cells)
    }

    /// Makes `cell` alive.
    ///
    /// Fails with [`GridError::AlreadyLive`] if it already is; the grid is then unchanged.
    pub fn activate(&mut self, cell: Cell) -> Result<(), GridError> {
        if !self.alive.insert(cell) {
            return Err(GridError::AlreadyLive(cell));
        }
        for n in cell.neighbours() {
            self.increment(n);
        }
        Ok(())
    }

    /// Makes `cell` dead.
    ///
    /// Fails with [`GridError::NotLive`] if it is not alive; the grid is then unchanged.
    pub fn deactivate(&mut self, cell: Cell) -> Result<(), GridError> {
        if !self.alive.remove(&cell) {
            return Err(GridError::NotLive(cell));
        }
        for n in cell.neighbours() {
            self.decrement(n);
        }
        Ok(())
    }

    /// Flips the state of `cell` and returns the new state.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.alive.remove(&cell) {
            for n in cell.neighbours() {
                self.decrement(n);
            }
            false
        } else {
            self.alive.insert(cell);
            for n in cell.neighbours() {
                self.increment(n);
            }
            true
        }
    }

    /// Activates every cell of `cells` shifted by `offset` that is not alive yet.
    ///
    /// Returns the number of cells that were activated.
    pub fn insert_cells(&mut self, cells: impl IntoIterator<Item = Cell>, offset: Cell) -> usize {
        cells
            .into_iter()
            .map(|c| c.offset(offset.x, offset.y))
            .filter(|&c| self.activate(c).is_ok())
            .count()
    }

    #[inline]
    pub fn is_live(&self, cell: Cell) -> bool {
        self.alive.contains(&cell)
    }

    /// Number of live neighbours of `cell`; 0 for cells absent from the index.
    #[inline]
    pub fn neighbor_count(&self, cell: Cell) -> u8 {
        self.counts.get(&cell).map_or(0, |c| c.get())
    }

    /// Live cells in unspecified order.
    pub fn live_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.alive.iter().copied()
    }

    /// Every cell with at least one live neighbour, together with that count.
    pub fn neighbour_counts(&self) -> impl Iterator<Item = (Cell, u8)> + '_ {
        self.counts.iter().map(|(&cell, count)| (cell, count.get()))
    }

    /// Total number of live cells.
    pub fn population(&self) -> usize {
        self.alive.len()
    }

    /// Number of entries in the neighbour-count index.
    pub fn tracked_cells(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alive.is_empty()
    }

    /// Smallest `[min, max]` corners enclosing every live cell, or `None` for an empty grid.
    pub fn bounding_box(&self) -> Option<[Cell; 2]> {
        let mut cells = self.live_cells();
        let first = cells.next()?;
        Some(cells.fold([first, first], |[lo, hi], c| {
            [
                Cell::new(lo.x.min(c.x), lo.y.min(c.y)),
                Cell::new(hi.x.max(c.x), hi.y.max(c.y)),
            ]
        }))
    }

    /// Schedules `cell` to become alive on the next [`apply_pending`](Self::apply_pending).
    pub fn queue_activate(&mut self, cell: Cell) {
        self.to_activate.push(cell);
    }

    /// Schedules `cell` to die on the next [`apply_pending`](Self::apply_pending).
    pub fn queue_deactivate(&mut self, cell: Cell) {
        self.to_deactivate.push(cell);
    }

    /// Number of queued activations and deactivations.
    pub fn pending_len(&self) -> usize {
        self.to_activate.len() + self.to_deactivate.len()
    }

    /// Drops every queued mutation without applying it.
    pub fn discard_pending(&mut self) {
        self.to_activate.clear();
        self.to_deactivate.clear();
    }

    /// Applies the queued mutations as one batch: every deactivation in queue order,
    /// then every activation in queue order. Both queues are empty afterwards.
    ///
    /// The batch is all-or-nothing. If any queued mutation would be rejected when
    /// replayed in that order, the grid is left untouched, the queues are discarded,
    /// and the first offending cell is reported.
    pub fn apply_pending(&mut self) -> Result<(), GridError> {
        let to_deactivate = std::mem::take(&mut self.to_deactivate);
        let to_activate = std::mem::take(&mut self.to_activate);

        if let Err(err) = self.validate_batch(&to_deactivate, &to_activate) {
            tracing::debug!(%err, "rejected pending batch");
            return Err(err);
        }

        for &cell in &to_deactivate {
            self.alive.remove(&cell);
            for n in cell.neighbours() {
                self.decrement(n);
            }
        }
        for &cell in &to_activate {
            self.alive.insert(cell);
            for n in cell.neighbours() {
                self.increment(n);
            }
        }

        // reuse the allocations for the next batch
        self.to_deactivate = to_deactivate;
        self.to_deactivate.clear();
        self.to_activate = to_activate;
        self.to_activate.clear();
        Ok(())
    }

    fn validate_batch(&self, to_deactivate: &[Cell], to_activate: &[Cell]) -> Result<(), GridError> {
        let mut removed = AHashSet::with_capacity(to_deactivate.len());
        for &cell in to_deactivate {
            if !self.is_live(cell) || !removed.insert(cell) {
                return Err(GridError::NotLive(cell));
            }
        }
        let mut added = AHashSet::with_capacity(to_activate.len());
        for &cell in to_activate {
            let live = self.is_live(cell) && !removed.contains(&cell);
            if live || !added.insert(cell) {
                return Err(GridError::AlreadyLive(cell));
            }
        }
        Ok(())
    }

    #[inline]
    fn increment(&mut self, cell: Cell) {
        self.counts
            .entry(cell)
            .and_modify(|c| *c = c.saturating_add(1))
            .or_insert(NonZeroU8::MIN);
    }

    #[inline]
    fn decrement(&mut self, cell: Cell) {
        // only neighbours of a live cell are decremented, so the entry exists
        if let Entry::Occupied(mut entry) = self.counts.entry(cell) {
            match NonZeroU8::new(entry.get().get() - 1) {
                Some(c) => {
                    entry.insert(c);
                }
                None => {
                    entry.remove();
                }
            }
        }
    }
}

impl FromIterator<Cell> for SparseGrid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self::from_cells(iter)
    }
}
