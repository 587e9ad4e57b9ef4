use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

use crate::layout::LayoutOptions;
use crate::tree::{LayoutTree, NodeId, NodeKind};
use crate::types::{Bounds, Coords};

const TWO_PI: f64 = 2.0 * PI;

/// Direction the backbone runs around junction circles.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    Clockwise,
    Counterclockwise,
}

impl Rotation {
    /// +1 for clockwise, -1 for counterclockwise.
    pub fn sign(self) -> i8 {
        match self {
            Rotation::Clockwise => 1,
            Rotation::Counterclockwise => -1,
        }
    }

    fn factor(self) -> f64 {
        f64::from(self.sign())
    }
}

/// Geometry assigned to one tree node.
///
/// Pair nodes sit at the midpoint of their two bases, junctions at the
/// center of their circle, unpaired bases at their own position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    /// Unit vector from the parent into this node.
    pub go_x: f64,
    pub go_y: f64,
    pub rotation: Rotation,
}

impl Placement {
    /// Unit vector perpendicular to travel, mirrored by the rotation.
    fn cross(&self) -> (f64, f64) {
        let s = self.rotation.factor();
        (-self.go_y * s, self.go_x * s)
    }
}

struct Visit {
    node: NodeId,
    parent: Option<NodeId>,
    x: f64,
    y: f64,
    go_x: f64,
    go_y: f64,
    rotation: Rotation,
}

/// Place every node of the tree; the result is indexed by `NodeId`.
///
/// The root starts at the origin heading along +y. A node with one child
/// passes its position on, one primary step further unless the child is a
/// junction. A junction with several children becomes a circle sized to
/// fit them, centered one radius beyond its parent along the heading.
pub fn place(tree: &LayoutTree, opts: &LayoutOptions) -> Vec<Placement> {
    let primary = opts.primary_space;
    let pair = opts.pair_space;
    let mut placements = vec![Placement::default(); tree.len()];

    let mut stack = vec![Visit {
        node: LayoutTree::ROOT,
        parent: None,
        x: 0.0,
        y: 0.0,
        go_x: 0.0,
        go_y: 1.0,
        rotation: opts.rotation,
    }];

    while let Some(v) = stack.pop() {
        let node = tree.node(v.node);
        let here = &mut placements[v.node];
        here.go_x = v.go_x;
        here.go_y = v.go_y;
        here.rotation = v.rotation;

        match node.children.as_slice() {
            [] => {
                here.x = v.x;
                here.y = v.y;
            }
            [child] => {
                here.x = v.x;
                here.y = v.y;
                let step = if tree.node(*child).is_junction() {
                    0.0
                } else {
                    primary
                };
                stack.push(Visit {
                    node: *child,
                    parent: Some(v.node),
                    x: v.x + v.go_x * step,
                    y: v.y + v.go_y * step,
                    ..v
                });
            }
            children => {
                let n_pairs = children
                    .iter()
                    .filter(|&&c| tree.node(c).is_pair())
                    .count();
                let circle_length = (children.len() + 1) as f64 * primary
                    + (n_pairs + 1) as f64 * pair;
                let radius = circle_length / TWO_PI;

                let (origin_x, origin_y) = v
                    .parent
                    .map_or((0.0, 0.0), |p| (placements[p].x, placements[p].y));
                let cx = origin_x + v.go_x * radius;
                let cy = origin_y + v.go_y * radius;
                let here = &mut placements[v.node];
                here.x = cx;
                here.y = cy;
                let (cross_x, cross_y) = here.cross();

                log::trace!(
                    "junction {}: {} children, {} pairs, radius {:.3}",
                    v.node,
                    children.len(),
                    n_pairs,
                    radius
                );

                let mut walker = pair / 2.0;
                for &child in children {
                    let is_pair = tree.node(child).is_pair();
                    walker += primary;
                    if is_pair {
                        walker += pair / 2.0;
                    }

                    let angle = walker / circle_length * TWO_PI - PI / 2.0;
                    let (sin, cos) = angle.sin_cos();
                    let x = cx + cos * cross_x * radius + sin * v.go_x * radius;
                    let y = cy + cos * cross_y * radius + sin * v.go_y * radius;
                    let (dx, dy) = (x - cx, y - cy);
                    let len = dx.hypot(dy);

                    stack.push(Visit {
                        node: child,
                        parent: Some(v.node),
                        x,
                        y,
                        go_x: dx / len,
                        go_y: dy / len,
                        rotation: v.rotation,
                    });

                    if is_pair {
                        walker += pair / 2.0;
                    }
                }
            }
        }
    }

    placements
}

/// Per-base coordinates read off a placed tree.
///
/// Pair bases sit half a pair spacing either side of the pair midpoint,
/// across the direction of travel. Positions at or beyond `length` are
/// skipped; positions the tree never reaches stay at the origin.
pub fn extract(
    tree: &LayoutTree,
    placements: &[Placement],
    opts: &LayoutOptions,
    length: usize,
) -> Coords {
    let mut coords = Coords::zeroed(length);
    let half = opts.pair_space / 2.0;

    for (node, p) in tree.nodes().iter().zip(placements) {
        match node.kind {
            NodeKind::Pair { a, b } => {
                let (cross_x, cross_y) = p.cross();
                coords.set(a, p.x + cross_x * half, p.y + cross_y * half);
                coords.set(b, p.x - cross_x * half, p.y - cross_y * half);
            }
            NodeKind::Unpaired { index } => coords.set(index, p.x, p.y),
            NodeKind::Junction => {}
        }
    }

    coords.finish()
}

/// Rotation sign of every base (+1 / -1).
pub fn rotation_signs(tree: &LayoutTree, placements: &[Placement], length: usize) -> Vec<i8> {
    let mut signs = vec![1; length];
    for (node, p) in tree.nodes().iter().zip(placements) {
        let indices = match node.kind {
            NodeKind::Pair { a, b } => [Some(a), Some(b)],
            NodeKind::Unpaired { index } => [Some(index), None],
            NodeKind::Junction => continue,
        };
        for i in indices.into_iter().flatten() {
            if let Some(s) = signs.get_mut(i) {
                *s = p.rotation.sign();
            }
        }
    }
    signs
}

/// Unstructured strand of up to four bases: a vertical line at x = 0.
pub fn line(length: usize, opts: &LayoutOptions) -> Coords {
    let mut coords = Coords::zeroed(length);
    for i in 0..length {
        coords.set(i, 0.0, i as f64 * opts.primary_space);
    }
    coords.finish()
}

/// Unstructured strand laid around one circle, starting heading up.
pub fn circle(length: usize, opts: &LayoutOptions) -> Coords {
    let primary = opts.primary_space;
    let pair = opts.pair_space;
    let circle_length = (length + 1) as f64 * primary + pair;
    let radius = circle_length / TWO_PI;

    let (go_x, go_y) = (0.0, 1.0);
    let root_x = go_x * radius;
    let root_y = go_y * radius;
    let s = opts.rotation.factor();
    let (cross_x, cross_y) = (-go_y * s, go_x * s);

    let mut coords = Coords::zeroed(length);
    let mut walker = pair / 2.0;
    for i in 0..length {
        walker += primary;
        let angle = walker / circle_length * TWO_PI - PI / 2.0;
        let (sin, cos) = angle.sin_cos();
        coords.set(
            i,
            root_x + cos * cross_x * radius + sin * go_x * radius,
            root_y + cos * cross_y * radius + sin * go_y * radius,
        );
    }
    coords.finish()
}

impl Coords {
    fn zeroed(length: usize) -> Self {
        Self {
            x: vec![0.0; length],
            y: vec![0.0; length],
            bounds: Bounds::empty(),
        }
    }

    fn set(&mut self, i: usize, x: f64, y: f64) {
        if i >= self.x.len() {
            return;
        }
        self.x[i] = x;
        self.y[i] = y;
        self.bounds.include(x, y);
    }

    fn finish(mut self) -> Self {
        if self.bounds.min_x > self.bounds.max_x {
            self.bounds = Bounds::default();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn placed(s: &str, opts: &LayoutOptions) -> (LayoutTree, Vec<Placement>) {
        let tree = LayoutTree::build(&parser::parse(s, false).unwrap())
            .unwrap()
            .unwrap();
        let placements = place(&tree, opts);
        (tree, placements)
    }

    fn dist(c: &Coords, i: usize, j: usize) -> f64 {
        (c.x[i] - c.x[j]).hypot(c.y[i] - c.y[j])
    }

    #[test]
    fn test_single_stem_runs_up_the_y_axis() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("((...))", &opts);
        // root (single child) at origin, first pair one step up, second one more
        assert_eq!((placements[0].x, placements[0].y), (0.0, 0.0));
        let outer = tree.root().children[0];
        assert_eq!((placements[outer].x, placements[outer].y), (0.0, 45.0));
        let inner = tree.node(outer).children[0];
        assert_eq!((placements[inner].x, placements[inner].y), (0.0, 90.0));
    }

    #[test]
    fn test_pair_bases_straddle_midpoint() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("((...))", &opts);
        let c = extract(&tree, &placements, &opts, 7);
        // heading +y, clockwise: cross = (-1, 0)
        assert!((c.x[0] + 22.5).abs() < 1e-9);
        assert!((c.x[6] - 22.5).abs() < 1e-9);
        assert!((c.y[0] - 45.0).abs() < 1e-9);
        assert!((dist(&c, 1, 5) - 45.0).abs() < 1e-9);
    }

    #[test]
    fn test_counterclockwise_mirrors_across_y_axis() {
        let cw = LayoutOptions::default();
        let ccw = LayoutOptions {
            rotation: Rotation::Counterclockwise,
            ..LayoutOptions::default()
        };
        let s = "((..((...))..((...))..))";
        let (tree, p_cw) = placed(s, &cw);
        let (_, p_ccw) = placed(s, &ccw);
        let a = extract(&tree, &p_cw, &cw, s.len());
        let b = extract(&tree, &p_ccw, &ccw, s.len());
        for i in 0..s.len() {
            assert!((a.x[i] + b.x[i]).abs() < 1e-9);
            assert!((a.y[i] - b.y[i]).abs() < 1e-9);
        }
    }

    #[test]
    fn test_junction_children_on_circle() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("(.((...))..(...).)", &opts);
        let pair = tree.root().children[0];
        let junction = tree.node(pair).children[0];
        let center = placements[junction];
        let children = &tree.node(junction).children;
        // 6 children, 2 of them pairs
        let radius = (7.0 * 45.0 + 3.0 * 45.0) / TWO_PI;
        for &c in children {
            let d = (placements[c].x - center.x).hypot(placements[c].y - center.y);
            assert!((d - radius).abs() < 1e-9);
            let go = placements[c].go_x.hypot(placements[c].go_y);
            assert!((go - 1.0).abs() < 1e-12);
        }
        // center sits one radius beyond the parent pair
        let parent = placements[pair];
        let offset = (center.x - parent.x).hypot(center.y - parent.y);
        assert!((offset - radius).abs() < 1e-9);
    }

    #[test]
    fn test_root_junction_centered_one_radius_up() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("(...)(...)", &opts);
        assert_eq!(tree.root().children.len(), 2);
        let radius = (3.0 * 45.0 + 3.0 * 45.0) / TWO_PI;
        assert!(placements[0].x.abs() < 1e-12);
        assert!((placements[0].y - radius).abs() < 1e-9);
    }

    #[test]
    fn test_empty_hairpin_stays_on_pair() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("()", &opts);
        let pair = tree.root().children[0];
        let empty = tree.node(pair).children[0];
        assert_eq!(placements[empty].x, placements[pair].x);
        assert_eq!(placements[empty].y, placements[pair].y);
    }

    #[test]
    fn test_extract_skips_positions_past_length() {
        let opts = LayoutOptions::default();
        let (tree, placements) = placed("((...))", &opts);
        let c = extract(&tree, &placements, &opts, 3);
        assert_eq!(c.x.len(), 3);
    }

    #[test]
    fn test_bounds_cover_all_points() {
        let opts = LayoutOptions::default();
        let s = "..((..((...))..((...)).))..";
        let (tree, placements) = placed(s, &opts);
        let c = extract(&tree, &placements, &opts, s.len());
        for i in 0..s.len() {
            assert!(c.bounds.min_x <= c.x[i] && c.x[i] <= c.bounds.max_x);
            assert!(c.bounds.min_y <= c.y[i] && c.y[i] <= c.bounds.max_y);
        }
        assert!(c.x.iter().any(|&x| x == c.bounds.min_x));
        assert!(c.y.iter().any(|&y| y == c.bounds.max_y));
    }

    #[test]
    fn test_line_fallback() {
        let c = line(3, &LayoutOptions::default());
        assert_eq!(c.x, vec![0.0, 0.0, 0.0]);
        assert_eq!(c.y, vec![0.0, 45.0, 90.0]);
        assert_eq!(c.bounds.min_x, 0.0);
        assert_eq!(c.bounds.max_x, 0.0);
        assert_eq!(c.bounds.max_y, 90.0);
    }

    #[test]
    fn test_circle_fallback() {
        let opts = LayoutOptions::default();
        let c = circle(10, &opts);
        let radius = (11.0 * 45.0 + 45.0) / TWO_PI;
        for i in 0..10 {
            let d = c.x[i].hypot(c.y[i] - radius);
            assert!((d - radius).abs() < 1e-9);
            for j in 0..i {
                assert!(dist(&c, i, j) > 1.0);
            }
        }
    }

    #[test]
    fn test_empty_output_has_zero_bounds() {
        let c = line(0, &LayoutOptions::default());
        assert!(c.x.is_empty());
        assert_eq!(c.bounds, Bounds::default());
    }

    #[test]
    fn test_rotation_signs() {
        let opts = LayoutOptions {
            rotation: Rotation::Counterclockwise,
            ..LayoutOptions::default()
        };
        let (tree, placements) = placed("(.)", &opts);
        assert_eq!(rotation_signs(&tree, &placements, 4), vec![-1, -1, -1, 1]);
    }
}
