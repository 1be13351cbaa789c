//! Link/cut forest over a fixed vertex set, with optional path aggregates.

use thiserror::Error;

use crate::splay::{PathAggregate, SplayForest, EMPTY};

pub type Vertex = usize;

/// Errors for operations that add or remove forest edges. Both are detected
/// before any connectivity is changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EdgeError {
    /// `link` between these vertices would close a cycle.
    #[error("vertices {0} and {1} are already connected")]
    AlreadyConnected(Vertex, Vertex),
    /// `cut` between vertices with no edge between them.
    #[error("no edge between vertices {0} and {1}")]
    NoSuchEdge(Vertex, Vertex),
}

/// Interface of a dynamic forest.
/// It maintains a collection of unrooted trees under edge insertion and
/// removal, with connectivity queries. Queries take `&mut self` because they
/// may restructure internal state.
pub trait DynamicForest {
    /// Create a new forest with n vertices and no edges.
    fn new(n: usize) -> Self;
    /// Adds an edge between u and v. Fails with [`EdgeError::AlreadyConnected`]
    /// if they are in the same tree. Reroots u's tree at u, and keeps the root
    /// of the tree containing v the same.
    fn link(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError>;
    /// Removes the edge between u and v. Fails with [`EdgeError::NoSuchEdge`]
    /// if there is no such edge. Reroots the tree containing v at v, whether
    /// or not the cut succeeds.
    fn cut(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError>;
    /// Are u and v in the same tree?
    fn connected(&mut self, u: Vertex, v: Vertex) -> bool;
    /// Makes u the root of its tree.
    fn reroot(&mut self, u: Vertex);
    /// Returns the root of the tree containing u.
    fn root(&mut self, u: Vertex) -> Vertex;
    /// The lowest common ancestor of u and v under the current root. None if
    /// they are in different trees.
    fn lca(&mut self, u: Vertex, v: Vertex) -> Option<Vertex>;
}

/// Link/cut tree over an arena of splay nodes. Vertices are `0..n`.
#[derive(Debug)]
pub struct LinkCutForest<Ag: PathAggregate = ()> {
    paths: SplayForest<Ag>,
}

impl<Ag: PathAggregate> LinkCutForest<Ag> {
    /// New forest with one vertex per value and no edges.
    pub fn from_values(values: impl IntoIterator<Item = Ag::Value>) -> Self {
        let values = values.into_iter();
        let mut paths = SplayForest::new(values.size_hint().0);
        for (i, value) in values.enumerate() {
            assert_eq!(paths.create(value), i);
        }
        Self { paths }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Value associated with u.
    pub fn value(&self, u: Vertex) -> &Ag::Value {
        self.paths.value(u)
    }

    /// Changes the value at u and updates aggregates.
    pub fn update_value(&mut self, u: Vertex, f: impl FnOnce(&mut Ag::Value)) {
        self.paths.splay(u);
        self.paths.mutate_value(u, f);
    }

    /// Aggregated value over the path from u to v, in that order. None if
    /// they are in different trees. Reroots the tree at u.
    pub fn path_agg(&mut self, u: Vertex, v: Vertex) -> Option<Ag> {
        if !self.connected(u, v) {
            return None;
        }
        self.reroot(u);
        self.access(v);
        Some(self.paths.agg(v))
    }

    /// Number of vertices on the path from u to v, both included. None if
    /// they are in different trees. Reroots the tree at u.
    pub fn path_len(&mut self, u: Vertex, v: Vertex) -> Option<usize> {
        if !self.connected(u, v) {
            return None;
        }
        self.reroot(u);
        self.access(v);
        Some(self.paths.size(v))
    }

    /// Makes the path from the root of u's tree to u a single splay tree,
    /// with u as its splay root. Returns the point where the operation
    /// entered the topmost preferred path, that is, the LCA of u with the
    /// last accessed node.
    fn access(&mut self, u: Vertex) -> Vertex {
        self.paths.splay(u);
        self.paths.remove_preferred_child(u);
        let mut top = u;
        loop {
            let p = self.paths.path_parent(top);
            if p == EMPTY {
                break;
            }
            self.paths.splay(p);
            self.paths.remove_preferred_child(p);
            self.paths.append_preferred_child(p, top);
            top = p;
        }
        if top != u {
            self.paths.splay(u);
        }
        log::trace!("access({u}) entered the topmost path at {top}");
        top
    }
}

impl<Ag: PathAggregate> DynamicForest for LinkCutForest<Ag> {
    fn new(n: usize) -> Self {
        Self::from_values((0..n).map(|_| Ag::Value::default()))
    }

    fn link(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError> {
        if self.connected(u, v) {
            return Err(EdgeError::AlreadyConnected(u, v));
        }
        self.reroot(u);
        self.paths.set_path_parent(u, v);
        log::trace!("link({u}, {v})");
        Ok(())
    }

    fn cut(&mut self, u: Vertex, v: Vertex) -> Result<(), EdgeError> {
        self.reroot(v);
        self.access(u);
        // The edge exists iff v is the whole path below u, i.e. the path
        // from the root v to u is exactly [v, u].
        if self.paths.left(u) != v || self.paths.size(v) != 1 {
            return Err(EdgeError::NoSuchEdge(u, v));
        }
        self.paths.take_left(u);
        log::trace!("cut({u}, {v})");
        Ok(())
    }

    fn connected(&mut self, u: Vertex, v: Vertex) -> bool {
        u == v || self.root(u) == self.root(v)
    }

    fn reroot(&mut self, u: Vertex) {
        self.access(u);
        let l = self.paths.take_left(u);
        if l != EMPTY {
            // The part of the path above u is logically reversed and now
            // hangs below u.
            self.paths.toggle_flip(l);
            self.paths.set_path_parent(l, u);
        }
        log::trace!("reroot({u})");
    }

    fn root(&mut self, u: Vertex) -> Vertex {
        self.access(u);
        self.paths.first(u)
    }

    fn lca(&mut self, u: Vertex, v: Vertex) -> Option<Vertex> {
        self.access(u);
        let ru = self.paths.first(u);
        let lca = self.access(v);
        let rv = self.paths.first(v);
        (ru == rv).then_some(lca)
    }
}
