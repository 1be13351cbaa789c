pub mod link_cut;
pub mod splay;
pub use link_cut::{DynamicForest, EdgeError, LinkCutForest, Vertex};
pub use splay::PathAggregate;
