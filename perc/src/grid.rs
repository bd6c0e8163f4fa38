use std::fmt::Display;

use log::trace;

use crate::{
    error::{Error, Result},
    observer::{GridSnapshot, SiteState},
    union_find::{DisjointSet, WeightedQuickUnion},
};

////////////////////////////////////////////////////////////////////////////////

const NEIGHBOURS: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];

/// Square grid of sites that are opened one by one.
///
/// Connectivity is tracked by a [`DisjointSet`] over `side² + 2` nodes: one
/// per site plus two virtual nodes standing for the whole top row and the
/// whole bottom row. The grid percolates once those two share a class.
pub struct Percolation<U: DisjointSet = WeightedQuickUnion> {
    side: usize,
    open: Vec<bool>,
    open_count: usize,
    sets: U,
}

impl Percolation {
    /// Creates an `side`x`side` grid with every site blocked, backed by
    /// [`WeightedQuickUnion`].
    pub fn new(side: usize) -> Result<Self> {
        Self::with_side(side)
    }
}

impl<U: DisjointSet> Percolation<U> {
    /// Same as [`Percolation::new`], for any disjoint-set strategy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidSize`] if `side` is zero or `side² + 2` does not fit
    /// in `usize`.
    pub fn with_side(side: usize) -> Result<Self> {
        let sites = side
            .checked_mul(side)
            .filter(|sites| *sites > 0 && sites.checked_add(2).is_some())
            .ok_or(Error::InvalidSize(side))?;

        Ok(Self {
            side,
            open: vec![false; sites],
            open_count: 0,
            sets: U::with_len(sites + 2),
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    /// Opens a site and connects it to its open neighbours. Opening an
    /// already open site does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::CoordinateOutOfRange`] if `row` or `col` is not below
    /// `side`. The grid is left untouched.
    pub fn open(&mut self, row: usize, col: usize) -> Result<()> {
        let site = self.index(row, col).ok_or(Error::CoordinateOutOfRange {
            row,
            col,
            side: self.side,
        })?;
        if self.open[site] {
            return Ok(());
        }

        self.open[site] = true;
        self.open_count += 1;
        trace!("opened site ({row}, {col}), {} open", self.open_count);

        if row == 0 {
            self.sets.union(site, self.virtual_top());
        }
        if row == self.side - 1 {
            self.sets.union(site, self.virtual_bottom());
        }
        for (dr, dc) in NEIGHBOURS {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };
            if self.is_open(r, c) {
                self.sets.union(site, r * self.side + c);
            }
        }

        Ok(())
    }

    /// Returns `false` for coordinates outside of the grid.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.index(row, col).map_or(false, |site| self.open[site])
    }

    /// Returns `true` if the site is open and connected to the top row.
    pub fn is_full(&self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(site) => self.open[site] && self.sets.connected(site, self.virtual_top()),
            None => false,
        }
    }

    pub fn percolates(&self) -> bool {
        self.sets.connected(self.virtual_top(), self.virtual_bottom())
    }

    pub fn number_of_open_sites(&self) -> usize {
        self.open_count
    }

    /// Fraction of sites that are open, in `[0, 1]`.
    pub fn open_fraction(&self) -> f64 {
        self.open_count as f64 / self.open.len() as f64
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut sites = Vec::with_capacity(self.open.len());
        for row in 0..self.side {
            for col in 0..self.side {
                let state = if self.is_full(row, col) {
                    SiteState::Full
                } else if self.is_open(row, col) {
                    SiteState::Open
                } else {
                    SiteState::Blocked
                };
                sites.push(state);
            }
        }
        GridSnapshot::new(self.side, sites, self.open_count, self.percolates())
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.side && col < self.side {
            Some(row * self.side + col)
        } else {
            None
        }
    }

    fn virtual_top(&self) -> usize {
        self.open.len()
    }

    fn virtual_bottom(&self) -> usize {
        self.open.len() + 1
    }
}

impl<U: DisjointSet> Display for Percolation<U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.snapshot().fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;
    use crate::union_find::QuickFind;

    #[test]
    fn rejects_empty_grid() {
        assert_eq!(Percolation::new(0).err(), Some(Error::InvalidSize(0)));
        assert_eq!(
            Percolation::new(usize::MAX).err(),
            Some(Error::InvalidSize(usize::MAX))
        );
    }

    #[test]
    fn fresh_grid() {
        let grid = Percolation::new(3).unwrap();
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.number_of_open_sites(), 0);
        assert_eq!(grid.sets.len(), 11);
        assert!(!grid.percolates());
        for row in 0..3 {
            for col in 0..3 {
                assert!(!grid.is_open(row, col));
                assert!(!grid.is_full(row, col));
            }
        }
    }

    #[test]
    fn single_site() {
        let mut grid = Percolation::new(1).unwrap();
        assert!(!grid.percolates());
        grid.open(0, 0).unwrap();
        assert_eq!(grid.number_of_open_sites(), 1);
        assert_eq!(grid.open_fraction(), 1.0);
        assert!(grid.percolates());
        assert!(grid.is_full(0, 0));
    }

    #[test]
    fn vertical_pair() {
        let mut grid = Percolation::new(2).unwrap();
        grid.open(0, 0).unwrap();
        assert!(!grid.percolates());
        assert!(grid.is_full(0, 0));
        assert!(!grid.is_full(1, 0));

        grid.open(1, 0).unwrap();
        assert!(grid.percolates());
        assert!(grid.is_full(1, 0));
        assert!(!grid.is_full(1, 1));
    }

    #[test]
    fn open_is_idempotent() {
        let mut grid = Percolation::new(4).unwrap();
        grid.open(2, 3).unwrap();
        grid.open(2, 3).unwrap();
        assert_eq!(grid.number_of_open_sites(), 1);
        assert!(grid.is_open(2, 3));
    }

    #[test]
    fn out_of_range() {
        let mut grid = Percolation::new(3).unwrap();
        assert_eq!(
            grid.open(3, 0),
            Err(Error::CoordinateOutOfRange {
                row: 3,
                col: 0,
                side: 3
            })
        );
        assert!(grid.open(0, 7).is_err());
        assert_eq!(grid.number_of_open_sites(), 0);
        assert!(!grid.is_open(3, 3));
        assert!(!grid.is_full(0, 3));
    }

    #[test]
    fn no_wraparound_between_rows() {
        // (0, 2) and (1, 0) are adjacent in the flat index but not in the grid.
        let mut grid = Percolation::new(3).unwrap();
        grid.open(0, 2).unwrap();
        grid.open(1, 0).unwrap();
        grid.open(2, 0).unwrap();
        assert!(!grid.percolates());
        assert!(!grid.is_full(1, 0));
    }

    #[test]
    fn diagonal_does_not_connect() {
        let mut grid = Percolation::<QuickFind>::with_side(2).unwrap();
        grid.open(0, 0).unwrap();
        grid.open(1, 1).unwrap();
        assert!(!grid.percolates());
        grid.open(0, 1).unwrap();
        assert!(grid.percolates());
    }

    #[test]
    fn bottom_row_backwash() {
        // Bottom sites reachable only through the bottom virtual node are
        // reported as full once the grid percolates.
        let mut grid = Percolation::new(3).unwrap();
        for row in 0..3 {
            grid.open(row, 0).unwrap();
        }
        grid.open(2, 2).unwrap();
        assert!(grid.percolates());
        assert!(grid.is_full(2, 0));
        assert!(grid.is_full(2, 2));
    }

    #[test]
    fn fully_open_grid_percolates() {
        for side in 1..8 {
            let mut grid = Percolation::new(side).unwrap();
            for row in 0..side {
                for col in 0..side {
                    grid.open(row, col).unwrap();
                }
            }
            assert!(grid.percolates());
            assert_eq!(grid.number_of_open_sites(), side * side);
        }
    }

    #[test]
    fn display() {
        let mut grid = Percolation::new(3).unwrap();
        grid.open(0, 1).unwrap();
        grid.open(1, 1).unwrap();
        grid.open(2, 0).unwrap();
        assert_eq!(
            grid.to_string(),
            "#~#\n#~#\n.##\n3 open sites, does not percolate"
        );
    }
}
