use link_cut_forest::{DynamicForest, EdgeError, Vertex};

/// O(n) reference forest backed by a plain parent array. Mirrors the
/// rerooting behavior of the fast implementation exactly, so root and lca
/// answers can be compared call for call.
#[derive(Debug)]
pub struct SlowForest {
    parent: Vec<Vertex>,
}

impl SlowForest {
    fn find_root(&self, u: Vertex) -> Vertex {
        if self.parent[u] == u {
            u
        } else {
            self.find_root(self.parent[u])
        }
    }

    /// u first, root last.
    fn ancestors(&self, u: Vertex) -> Vec<Vertex> {
        let mut path = vec![u];
        let mut last = u;
        while self.parent[last] != last {
            last = self.parent[last];
            path.push(last);
        }
        path
    }
}

impl DynamicForest for SlowForest {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
        }
    }

    fn link(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError> {
        if self.connected(u, v) {
            return Err(EdgeError::AlreadyConnected(u, v));
        }
        self.reroot(u);
        self.parent[u] = v;
        Ok(())
    }

    fn cut(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError> {
        // Reroots even when the cut fails, like the fast implementation.
        self.reroot(v);
        if u == v || self.parent[u] != v {
            return Err(EdgeError::NoSuchEdge(u, v));
        }
        self.parent[u] = u;
        Ok(())
    }

    fn connected(&mut self, u: Vertex, v: Vertex) -> bool {
        self.find_root(u) == self.find_root(v)
    }

    fn reroot(&mut self, u: Vertex) {
        let p = self.parent[u];
        if p != u {
            self.reroot(p);
            self.parent[p] = u;
            self.parent[u] = u;
        }
    }

    fn root(&mut self, u: Vertex) -> Vertex {
        self.find_root(u)
    }

    fn lca(&mut self, u: Vertex, v: Vertex) -> Option<Vertex> {
        let up = self.ancestors(u);
        self.ancestors(v).into_iter().find(|w| up.contains(w))
    }
}

/// Union-find the tests rebuild from the current edge set to cross-check
/// connectivity. Weighted union with path halving.
#[derive(Debug)]
pub struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    pub fn find(&mut self, mut u: usize) -> usize {
        while self.parent[u] != u {
            self.parent[u] = self.parent[self.parent[u]];
            u = self.parent[u];
        }
        u
    }

    pub fn union(&mut self, u: usize, v: usize) {
        let (ru, rv) = (self.find(u), self.find(v));
        if ru == rv {
            return;
        }
        if self.size[ru] < self.size[rv] {
            self.parent[ru] = rv;
            self.size[rv] += self.size[ru];
        } else {
            self.parent[rv] = ru;
            self.size[ru] += self.size[rv];
        }
    }

    pub fn same(&mut self, u: usize, v: usize) -> bool {
        self.find(u) == self.find(v)
    }
}
