use std::fmt::{Debug, Display, Formatter};

use debug_tree::{add_branch_to, AsTree, TreeBuilder};
use derivative::Derivative;

pub type Idx = usize;

/// Index of a missing node.
pub const EMPTY: Idx = usize::MAX;

fn idx_fmt(u: &Idx, f: &mut Formatter) -> std::fmt::Result {
    if *u == EMPTY {
        write!(f, "∅")
    } else {
        write!(f, "{u}")
    }
}
fn idx2_fmt([u, v]: &[Idx; 2], f: &mut Formatter) -> std::fmt::Result {
    write!(f, "[")?;
    idx_fmt(u, f)?;
    write!(f, ", ")?;
    idx_fmt(v, f)?;
    write!(f, "]")
}

/// Used to pretty print an Idx, outputting ∅ if it is EMPTY.
pub struct PrettyIdx(pub Idx);

impl Display for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        idx_fmt(&self.0, f)
    }
}

impl Debug for PrettyIdx {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        <Self as Display>::fmt(self, f)
    }
}

use PrettyIdx as I;

/// Aggregate over the values of one path, maintained per splay subtree.
/// `Default` must be the aggregate of an empty path (the merge identity).
pub trait PathAggregate: Debug + Clone + Default {
    /// Value stored at each node.
    type Value: Debug + Clone + Default;
    /// Aggregate of a single value.
    fn from_value(value: &Self::Value) -> Self;
    /// Merge with the aggregate of the values deeper along the path.
    fn merge(self, deeper: Self) -> Self;
    /// Aggregate of the same values in the opposite order. The default is
    /// only correct for order-insensitive aggregates.
    fn reverse(self) -> Self {
        self
    }
}

impl PathAggregate for () {
    type Value = ();
    fn from_value(_: &Self::Value) -> Self {
        ()
    }
    fn merge(self, _: Self) -> Self {
        ()
    }
}

#[derive(Derivative)]
#[derivative(Debug)]
struct Node<Ag: PathAggregate> {
    #[derivative(Debug(format_with = "idx_fmt"))]
    parent: Idx,
    /// Left and right child
    #[derivative(Debug(format_with = "idx2_fmt"))]
    child: [Idx; 2],
    /// Set only on splay roots. Points to the node this path hangs from.
    #[derivative(Debug(format_with = "idx_fmt"))]
    path_parent: Idx,
    /// This node's children and aggregated data should be flipped.
    flipped: bool,
    size: usize,
    /// Value for this node
    value: Ag::Value,
    /// Aggregated value for this node's subtree, in logical order.
    agg: Ag,
}

impl<Ag: PathAggregate> Node<Ag> {
    fn new(value: Ag::Value) -> Self {
        Self {
            agg: Ag::from_value(&value),
            value,
            child: [EMPTY; 2],
            parent: EMPTY,
            path_parent: EMPTY,
            size: 1,
            flipped: false,
        }
    }
}

/// Forest of splay trees over an arena of nodes. Each tree's in-order
/// sequence is one path, shallowest node first. Trees reference each other
/// only through `path_parent` on their roots.
pub struct SplayForest<Ag: PathAggregate = ()> {
    nodes: Vec<Node<Ag>>,
}

impl<Ag: PathAggregate> Debug for SplayForest<Ag> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let builder = TreeBuilder::new();
        let _b = builder.add_branch("SplayForest");
        for u in 0..self.nodes.len() {
            if self.nodes[u].parent == EMPTY {
                self.tree_inorder_dbg(u, &builder);
            }
        }
        writeln!(f, "{}", builder.string())
    }
}

impl<Ag: PathAggregate> SplayForest<Ag> {
    pub fn new(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Create a new single-node tree. Returns its index, which increases from 0.
    pub fn create(&mut self, value: Ag::Value) -> Idx {
        let idx = self.nodes.len();
        self.nodes.push(Node::new(value));
        idx
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn tree_inorder_dbg<T: AsTree>(&self, u: Idx, tree: &T) {
        let nu = &self.nodes[u];
        if nu.child[0] != EMPTY {
            add_branch_to!(*tree, "left child of {u}");
            self.tree_inorder_dbg(nu.child[0], tree);
        }
        add_branch_to!(*tree, "[{u}] {nu:?}");
        if nu.child[1] != EMPTY {
            self.tree_inorder_dbg(nu.child[1], tree);
        }
    }

    fn n(&self, u: Idx) -> Option<&Node<Ag>> {
        // Unlike nodes.get, out of range indices still panic.
        if u == EMPTY {
            None
        } else {
            Some(&self.nodes[u])
        }
    }

    pub fn parent(&self, u: Idx) -> Idx {
        self.n(u).map_or(EMPTY, |n| n.parent)
    }

    pub fn path_parent(&self, u: Idx) -> Idx {
        self.n(u).map_or(EMPTY, |n| n.path_parent)
    }

    /// Hang u's whole path from p through a non-preferred edge.
    pub fn set_path_parent(&mut self, u: Idx, p: Idx) {
        debug_assert!(self.is_root(u));
        self.nodes[u].path_parent = p;
    }

    pub fn size(&self, u: Idx) -> usize {
        self.n(u).map_or(0, |n| n.size)
    }

    /// Value associated with u. Panics if u doesn't exist.
    pub fn value(&self, u: Idx) -> &Ag::Value {
        &self.nodes[u].value
    }

    /// Aggregated value of u's subtree, in logical order.
    pub fn agg(&self, u: Idx) -> Ag {
        self.n(u).map_or_else(Ag::default, |n| n.agg.clone())
    }

    /// Is u the root of its splay tree?
    pub fn is_root(&self, u: Idx) -> bool {
        self.parent(u) == EMPTY
    }

    /// Logical left child of u.
    pub fn left(&mut self, u: Idx) -> Idx {
        self.push_flip(u);
        self.nodes[u].child[0]
    }

    fn side_of(&self, u: Idx) -> usize {
        (self.nodes[self.nodes[u].parent].child[1] == u) as usize
    }

    /// Logically reverse the order of u's subtree.
    pub fn toggle_flip(&mut self, u: Idx) {
        let n = &mut self.nodes[u];
        n.flipped ^= true;
        n.agg = n.agg.clone().reverse();
    }

    fn push_flip(&mut self, u: Idx) {
        let n = &mut self.nodes[u];
        if n.flipped {
            n.flipped = false;
            n.child.swap(0, 1);
            for c in n.child {
                if c != EMPTY {
                    self.toggle_flip(c);
                }
            }
        }
    }

    // Call when children are changed. Keeps agg in logical order even when
    // the flip bit is still set.
    fn recalc(&mut self, u: Idx) {
        let [l, r] = self.nodes[u].child;
        self.nodes[u].size = self.size(l) + 1 + self.size(r);
        let mut agg = self
            .agg(l)
            .merge(Ag::from_value(&self.nodes[u].value))
            .merge(self.agg(r));
        if self.nodes[u].flipped {
            agg = agg.reverse();
        }
        self.nodes[u].agg = agg;
    }

    /// Changes the value at u and updates aggregates up to u's splay root.
    pub fn mutate_value(&mut self, mut u: Idx, f: impl FnOnce(&mut Ag::Value)) {
        f(&mut self.nodes[u].value);
        while u != EMPTY {
            self.recalc(u);
            u = self.nodes[u].parent;
        }
    }

    // Flips must already be pushed on x and its parent.
    fn rotate(&mut self, x: Idx) {
        let p = self.nodes[x].parent;
        debug_assert_ne!(p, EMPTY);
        debug_assert!(!self.nodes[p].flipped && !self.nodes[x].flipped);
        let g = self.nodes[p].parent;
        let xs = self.side_of(x);
        let moved = self.nodes[x].child[1 - xs];
        if g != EMPTY {
            let ps = self.side_of(p);
            self.nodes[g].child[ps] = x;
        }
        self.nodes[x].parent = g;
        self.nodes[p].child[xs] = moved;
        if moved != EMPTY {
            self.nodes[moved].parent = p;
        }
        self.nodes[x].child[1 - xs] = p;
        self.nodes[p].parent = x;
        // path_parent stays with whichever node is on top of the splay tree
        let pp = self.nodes[p].path_parent;
        self.nodes[p].path_parent = EMPTY;
        self.nodes[x].path_parent = pp;
        self.recalc(p);
        self.recalc(x);
    }

    /// Rotates u to the root of its splay tree. Afterwards u carries the
    /// path_parent of the tree and no pending flip.
    pub fn splay(&mut self, u: Idx) {
        debug_assert_ne!(u, EMPTY);
        loop {
            let p = self.nodes[u].parent;
            if p == EMPTY {
                self.push_flip(u);
                return;
            }
            let g = self.nodes[p].parent;
            if g == EMPTY {
                self.push_flip(p);
                self.push_flip(u);
                self.rotate(u);
            } else {
                self.push_flip(g);
                self.push_flip(p);
                self.push_flip(u);
                if self.side_of(p) == self.side_of(u) {
                    self.rotate(p);
                } else {
                    self.rotate(u);
                }
                self.rotate(u);
            }
        }
    }

    /// Logically first node of u's splay tree. Splayed to the root before
    /// returning, so repeated calls stay cheap.
    pub fn first(&mut self, u: Idx) -> Idx {
        debug_assert_ne!(u, EMPTY);
        self.splay(u);
        let mut cur = u;
        loop {
            let l = self.nodes[cur].child[0];
            if l == EMPTY {
                break;
            }
            cur = l;
            self.push_flip(cur);
        }
        self.splay(cur);
        cur
    }

    /// Demote p's right subtree to a non-preferred child. p must be a splay
    /// root with its flip pushed.
    pub fn remove_preferred_child(&mut self, p: Idx) {
        debug_assert!(self.is_root(p) && !self.nodes[p].flipped);
        let r = self.nodes[p].child[1];
        if r != EMPTY {
            log::trace!("demote preferred child {r} of {p}");
            self.nodes[p].child[1] = EMPTY;
            self.nodes[r].parent = EMPTY;
            self.nodes[r].path_parent = p;
            self.recalc(p);
        }
    }

    /// Make the path rooted at u the preferred child of p. p must have no
    /// preferred child, as after [`Self::remove_preferred_child`].
    pub fn append_preferred_child(&mut self, p: Idx, u: Idx) {
        debug_assert!(self.is_root(p) && !self.nodes[p].flipped);
        debug_assert_eq!(self.nodes[p].child[1], EMPTY);
        debug_assert!(u != EMPTY && self.is_root(u));
        self.nodes[p].child[1] = u;
        self.nodes[u].parent = p;
        self.nodes[u].path_parent = EMPTY;
        self.recalc(p);
    }

    /// Detach and return u's logical left subtree, which may be EMPTY.
    pub fn take_left(&mut self, u: Idx) -> Idx {
        debug_assert!(self.is_root(u));
        self.push_flip(u);
        let l = self.nodes[u].child[0];
        if l != EMPTY {
            self.nodes[u].child[0] = EMPTY;
            self.nodes[l].parent = EMPTY;
            self.recalc(u);
        }
        log::trace!("take_left({u}) = {l}", l = I(l));
        l
    }
}
