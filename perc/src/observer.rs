use std::fmt::Display;

////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteState {
    Blocked,
    Open,
    /// Open and connected to the top row.
    Full,
}

impl SiteState {
    fn symbol(self) -> char {
        match self {
            SiteState::Blocked => '#',
            SiteState::Open => '.',
            SiteState::Full => '~',
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Immutable picture of a grid taken after an `open` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSnapshot {
    side: usize,
    sites: Vec<SiteState>,
    open_sites: usize,
    percolates: bool,
}

impl GridSnapshot {
    pub(crate) fn new(
        side: usize,
        sites: Vec<SiteState>,
        open_sites: usize,
        percolates: bool,
    ) -> Self {
        Self {
            side,
            sites,
            open_sites,
            percolates,
        }
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn open_sites(&self) -> usize {
        self.open_sites
    }

    pub fn percolates(&self) -> bool {
        self.percolates
    }

    /// Returns `None` for coordinates outside of the grid.
    pub fn site(&self, row: usize, col: usize) -> Option<SiteState> {
        if row < self.side && col < self.side {
            Some(self.sites[row * self.side + col])
        } else {
            None
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = &[SiteState]> {
        self.sites.chunks(self.side)
    }
}

impl Display for GridSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            for site in row {
                write!(f, "{}", site.symbol())?;
            }
            writeln!(f)?;
        }
        write!(f, "{} open sites, ", self.open_sites)?;
        if self.percolates {
            write!(f, "percolates")
        } else {
            write!(f, "does not percolate")
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Receives a snapshot after every site opened during an observed trial.
pub trait Observer {
    fn on_trial_step(&mut self, snapshot: &GridSnapshot);
}

impl<F: FnMut(&GridSnapshot)> Observer for F {
    fn on_trial_step(&mut self, snapshot: &GridSnapshot) {
        self(snapshot)
    }
}

////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> GridSnapshot {
        use SiteState::*;
        GridSnapshot::new(2, vec![Full, Blocked, Open, Blocked], 2, false)
    }

    #[test]
    fn site_lookup() {
        let snapshot = sample();
        assert_eq!(snapshot.site(0, 0), Some(SiteState::Full));
        assert_eq!(snapshot.site(1, 0), Some(SiteState::Open));
        assert_eq!(snapshot.site(1, 1), Some(SiteState::Blocked));
        assert_eq!(snapshot.site(2, 0), None);
        assert_eq!(snapshot.site(0, 2), None);
    }

    #[test]
    fn display() {
        assert_eq!(
            sample().to_string(),
            "~#\n.#\n2 open sites, does not percolate"
        );
    }

    #[test]
    fn closure_observer() {
        let mut seen = Vec::new();
        {
            let mut observer = |s: &GridSnapshot| seen.push(s.open_sites());
            observer.on_trial_step(&sample());
            observer.on_trial_step(&sample());
        }
        assert_eq!(seen, vec![2, 2]);
    }
}
