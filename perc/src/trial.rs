use log::debug;
use rand::Rng;

use crate::{error::Result, grid::Percolation, observer::Observer, union_find::DisjointSet};

////////////////////////////////////////////////////////////////////////////////

/// How the next blocked site to open is picked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionStrategy {
    /// Draw uniformly over the whole grid, redraw when the site is open.
    #[default]
    Rejection,
    /// Draw uniformly from a shrinking pool of blocked sites.
    Shuffled,
}

////////////////////////////////////////////////////////////////////////////////

/// Opens random sites of a fresh `side`x`side` grid until it percolates and
/// returns the fraction of open sites at that moment.
///
/// If `observer` is given, it sees a snapshot after every opened site.
pub fn run_trial<U, R>(
    side: usize,
    strategy: SelectionStrategy,
    rng: &mut R,
    mut observer: Option<&mut dyn Observer>,
) -> Result<f64>
where
    U: DisjointSet,
    R: Rng + ?Sized,
{
    let mut grid = Percolation::<U>::with_side(side)?;
    let mut pool = match strategy {
        SelectionStrategy::Rejection => Vec::new(),
        SelectionStrategy::Shuffled => (0..side * side).collect(),
    };

    while !grid.percolates() {
        let (row, col) = match strategy {
            SelectionStrategy::Rejection => {
                let (row, col) = (rng.gen_range(0..side), rng.gen_range(0..side));
                if grid.is_open(row, col) {
                    continue;
                }
                (row, col)
            }
            SelectionStrategy::Shuffled => {
                let site = pool.swap_remove(rng.gen_range(0..pool.len()));
                (site / side, site % side)
            }
        };
        grid.open(row, col)?;

        if let Some(observer) = observer.as_mut() {
            observer.on_trial_step(&grid.snapshot());
        }
    }

    let fraction = grid.open_fraction();
    debug!(
        "trial percolated after {} of {} sites ({fraction:.4})",
        grid.number_of_open_sites(),
        side * side,
    );
    Ok(fraction)
}

////////////////////////////////////////////////////////////////////////////////
