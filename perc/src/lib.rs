#![forbid(unsafe_code)]

//! Monte Carlo estimation of the site percolation threshold of a square grid.
//!
//! A [`Percolation`] grid reduces "is the top row connected to the bottom
//! row" to a single [`DisjointSet`] query through two virtual nodes.
//! [`run_trial`] opens random sites until the grid percolates, and
//! [`Simulation`] repeats that to estimate the threshold.

mod error;
mod grid;
mod observer;
mod stats;
mod trial;
mod union_find;

pub use error::{Error, Result};
pub use grid::Percolation;
pub use observer::{GridSnapshot, Observer, SiteState};
pub use stats::{Simulation, Stats};
pub use trial::{run_trial, SelectionStrategy};
pub use union_find::{DisjointSet, QuickFind, WeightedQuickUnion};
