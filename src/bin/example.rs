use link_cut_forest::{DynamicForest, LinkCutForest, PathAggregate};

/// Sum of the values on a path.
#[derive(Debug, Clone, Copy, Default)]
struct Sum(i64);

impl PathAggregate for Sum {
    type Value = i64;
    fn from_value(value: &i64) -> Self {
        Sum(*value)
    }
    fn merge(self, deeper: Self) -> Self {
        Sum(self.0 + deeper.0)
    }
}

fn link(f: &mut LinkCutForest<Sum>, u: usize, v: usize) {
    match f.link(u, v) {
        Ok(()) => println!("Linked {u} and {v}"),
        Err(e) => println!("Linking {u} and {v} failed: {e}"),
    }
}

fn cut(f: &mut LinkCutForest<Sum>, u: usize, v: usize) {
    match f.cut(u, v) {
        Ok(()) => println!("Cut the edge between {u} and {v}"),
        Err(e) => println!("Cutting {u} and {v} failed: {e}"),
    }
}

fn connected(f: &mut LinkCutForest<Sum>, u: usize, v: usize) {
    println!(
        "Are {u} and {v} connected? {}",
        if f.connected(u, v) { "Yes" } else { "No" }
    );
}

fn path_sum(f: &mut LinkCutForest<Sum>, u: usize, v: usize) {
    match f.path_agg(u, v) {
        Some(Sum(s)) => println!("Sum of the values from {u} to {v}: {s}"),
        None => println!("No path from {u} to {v}"),
    }
}

fn main() {
    let mut f = LinkCutForest::<Sum>::from_values(0..10);
    for u in 0..9 {
        f.link(u, u + 1).unwrap();
    }
    println!("Created a path over vertices 0 to 9, each holding its index as value");
    connected(&mut f, 0, 9);
    path_sum(&mut f, 0, 9);
    path_sum(&mut f, 3, 6);
    cut(&mut f, 4, 5);
    connected(&mut f, 0, 9);
    path_sum(&mut f, 3, 6);
    link(&mut f, 2, 7);
    connected(&mut f, 0, 9);
    path_sum(&mut f, 0, 9);
    link(&mut f, 0, 3);
    f.reroot(0);
    println!("With the tree rooted at 0, lca(4, 9) = {:?}", f.lca(4, 9));
}
