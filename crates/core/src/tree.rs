use crate::error::{Error, Result};

/// Index of a node in [`LayoutTree::nodes`].
pub type NodeId = usize;

/// What a layout tree node stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Loop or branch point; its children sit around a circle.
    Junction,
    /// Base pair `(a, b)` with `a < b`.
    Pair { a: usize, b: usize },
    /// Single unpaired base.
    Unpaired { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub kind: NodeKind,
    /// Children in 5' to 3' order.
    pub children: Vec<NodeId>,
}

impl TreeNode {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self.kind, NodeKind::Pair { .. })
    }

    pub fn is_junction(&self) -> bool {
        matches!(self.kind, NodeKind::Junction)
    }
}

/// Skeleton of a nested structure: one node per unpaired base, per base
/// pair and per junction. Node 0 is the root, the exterior junction.
///
/// A pair node has exactly one child: the pair directly stacked inside it,
/// or else a junction over its interior (empty for an empty interior).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutTree {
    nodes: Vec<TreeNode>,
}

/// Pending interior of a pair node: positions `start..=end`.
struct Interior {
    pair: NodeId,
    start: usize,
    end: usize,
}

impl LayoutTree {
    pub const ROOT: NodeId = 0;

    /// Build the tree over a symmetric, pseudoknot-free partner table.
    ///
    /// Returns `Ok(None)` when nothing is paired. Uses an explicit work
    /// stack so long stems do not recurse.
    pub fn build(pairs: &[Option<usize>]) -> Result<Option<Self>> {
        if pairs.iter().all(Option::is_none) {
            return Ok(None);
        }

        let mut tree = Self {
            nodes: vec![TreeNode::new(NodeKind::Junction)],
        };
        let mut pending: Vec<Interior> = Vec::new();

        tree.fill_junction(Self::ROOT, pairs, 0, pairs.len(), &mut pending)?;

        while let Some(Interior { pair, start, end }) = pending.pop() {
            let child = if start < end && pairs[start] == Some(end) {
                let id = tree.push(NodeKind::Pair { a: start, b: end });
                pending.push(Interior {
                    pair: id,
                    start: start + 1,
                    end: end - 1,
                });
                id
            } else {
                let id = tree.push(NodeKind::Junction);
                // start == end + 1 is an empty interior
                tree.fill_junction(id, pairs, start, end + 1, &mut pending)?;
                id
            };
            tree.nodes[pair].children.push(child);
        }

        log::debug!("layout tree: {} nodes over {} bases", tree.len(), pairs.len());
        Ok(Some(tree))
    }

    /// Add the top-level items of `start..stop` as children of `junction`.
    fn fill_junction(
        &mut self,
        junction: NodeId,
        pairs: &[Option<usize>],
        start: usize,
        stop: usize,
        pending: &mut Vec<Interior>,
    ) -> Result<()> {
        let mut j = start;
        while j < stop {
            let child = match pairs[j] {
                None => {
                    let id = self.push(NodeKind::Unpaired { index: j });
                    j += 1;
                    id
                }
                Some(k) if k > j && k < stop => {
                    let id = self.push(NodeKind::Pair { a: j, b: k });
                    pending.push(Interior {
                        pair: id,
                        start: j + 1,
                        end: k - 1,
                    });
                    j = k + 1;
                    id
                }
                Some(k) => return Err(Error::Structural { start: j, end: k }),
            };
            self.nodes[junction].children.push(child);
        }
        Ok(())
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(TreeNode::new(kind));
        self.nodes.len() - 1
    }

    pub fn root(&self) -> &TreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    fn build(s: &str) -> LayoutTree {
        LayoutTree::build(&parser::parse(s, false).unwrap())
            .unwrap()
            .unwrap()
    }

    fn kinds(tree: &LayoutTree, ids: &[NodeId]) -> Vec<NodeKind> {
        ids.iter().map(|&id| tree.node(id).kind).collect()
    }

    #[test]
    fn test_no_pairs_no_tree() {
        assert_eq!(LayoutTree::build(&[None, None, None]), Ok(None));
        assert_eq!(LayoutTree::build(&[]), Ok(None));
    }

    #[test]
    fn test_hairpin_chains_stacked_pairs() {
        let tree = build("((...))");
        let root = tree.root();
        assert_eq!(kinds(&tree, &root.children), vec![NodeKind::Pair { a: 0, b: 6 }]);

        let outer = tree.node(root.children[0]);
        assert_eq!(outer.children.len(), 1);
        let inner = tree.node(outer.children[0]);
        assert_eq!(inner.kind, NodeKind::Pair { a: 1, b: 5 });

        let hairpin = tree.node(inner.children[0]);
        assert!(hairpin.is_junction());
        assert_eq!(
            kinds(&tree, &hairpin.children),
            vec![
                NodeKind::Unpaired { index: 2 },
                NodeKind::Unpaired { index: 3 },
                NodeKind::Unpaired { index: 4 },
            ]
        );
    }

    #[test]
    fn test_exterior_children_in_order() {
        let tree = build(".(.)..(.).");
        assert_eq!(
            kinds(&tree, &tree.root().children),
            vec![
                NodeKind::Unpaired { index: 0 },
                NodeKind::Pair { a: 1, b: 3 },
                NodeKind::Unpaired { index: 4 },
                NodeKind::Unpaired { index: 5 },
                NodeKind::Pair { a: 6, b: 8 },
                NodeKind::Unpaired { index: 9 },
            ]
        );
    }

    #[test]
    fn test_empty_interior_is_empty_junction() {
        let tree = build("()");
        let pair = tree.node(tree.root().children[0]);
        let loop_node = tree.node(pair.children[0]);
        assert!(loop_node.is_junction());
        assert!(loop_node.children.is_empty());
    }

    #[test]
    fn test_multiloop_interior() {
        let tree = build("(.(.).(.))");
        let pair = tree.node(tree.root().children[0]);
        let junction = tree.node(pair.children[0]);
        assert_eq!(
            kinds(&tree, &junction.children),
            vec![
                NodeKind::Unpaired { index: 1 },
                NodeKind::Pair { a: 2, b: 4 },
                NodeKind::Unpaired { index: 5 },
                NodeKind::Pair { a: 6, b: 8 },
            ]
        );
    }

    #[test]
    fn test_every_base_appears_once() {
        let s = "..((.((..))..((...)).))...(..)";
        let tree = build(s);
        let mut seen = vec![0usize; s.len()];
        for node in tree.nodes() {
            match node.kind {
                NodeKind::Pair { a, b } => {
                    seen[a] += 1;
                    seen[b] += 1;
                }
                NodeKind::Unpaired { index } => seen[index] += 1,
                NodeKind::Junction => {}
            }
        }
        assert!(seen.iter().all(|&n| n == 1));
        for node in tree.nodes().iter().filter(|n| n.is_pair()) {
            assert_eq!(node.children.len(), 1);
        }
    }

    #[test]
    fn test_crossing_pairs_are_structural_error() {
        // (0,2) and (1,3) cross; position 3 points back into (0,2)
        let pairs = vec![Some(2), Some(3), Some(0), Some(1)];
        assert_eq!(
            LayoutTree::build(&pairs),
            Err(Error::Structural { start: 3, end: 1 })
        );
    }

    #[test]
    fn test_backward_partner_is_structural_error() {
        let pairs = vec![None, Some(0), None];
        assert_eq!(
            LayoutTree::build(&pairs),
            Err(Error::Structural { start: 1, end: 0 })
        );
    }
}
