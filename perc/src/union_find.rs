////////////////////////////////////////////////////////////////////////////////

/// Partition of a fixed universe `0..len` into connectivity classes.
///
/// Nodes are plain indices; passing an index `>= len` is a caller bug and
/// panics.
pub trait DisjointSet {
    /// Creates a structure where every node is its own class.
    fn with_len(len: usize) -> Self
    where
        Self: Sized;

    /// Returns the size of the universe.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the representative of the class containing `node`.
    fn find(&self, node: usize) -> usize;

    /// Merges the classes containing `a` and `b`.
    fn union(&mut self, a: usize, b: usize);

    fn connected(&self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Every node stores its class id directly: `find` is a lookup, `union`
/// relabels a whole class.
#[derive(Debug, Clone)]
pub struct QuickFind {
    ids: Vec<usize>,
}

impl DisjointSet for QuickFind {
    fn with_len(len: usize) -> Self {
        Self {
            ids: (0..len).collect(),
        }
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn find(&self, node: usize) -> usize {
        self.ids[node]
    }

    fn union(&mut self, a: usize, b: usize) {
        let (from, to) = (self.ids[a], self.ids[b]);
        if from == to {
            return;
        }
        for id in self.ids.iter_mut() {
            if *id == from {
                *id = to;
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////

/// Forest of classes, smaller trees are hung under larger ones.
/// Paths are halved while walking to a root during `union`.
#[derive(Debug, Clone)]
pub struct WeightedQuickUnion {
    parents: Vec<usize>,
    sizes: Vec<usize>,
}

impl WeightedQuickUnion {
    fn root_compressing(&mut self, mut node: usize) -> usize {
        while self.parents[node] != node {
            let grandparent = self.parents[self.parents[node]];
            self.parents[node] = grandparent;
            node = grandparent;
        }
        node
    }
}

impl DisjointSet for WeightedQuickUnion {
    fn with_len(len: usize) -> Self {
        Self {
            parents: (0..len).collect(),
            sizes: vec![1; len],
        }
    }

    fn len(&self) -> usize {
        self.parents.len()
    }

    fn find(&self, mut node: usize) -> usize {
        while self.parents[node] != node {
            node = self.parents[node];
        }
        node
    }

    fn union(&mut self, a: usize, b: usize) {
        let a = self.root_compressing(a);
        let b = self.root_compressing(b);
        if a == b {
            return;
        }

        let (small, large) = if self.sizes[a] < self.sizes[b] {
            (a, b)
        } else {
            (b, a)
        };
        self.parents[small] = large;
        self.sizes[large] += self.sizes[small];
    }
}

////////////////////////////////////////////////////////////////////////////////
