//! Node placement on the canvas
//!
//! Widths are estimated from port key lengths; new nodes go to the right of
//! the anchor (or below-left when attaching from the left) and are then
//! nudged down until they no longer sit on top of another node.

use crate::core::geometry::Vec2;
use crate::core::graph::{Document, Node};
use crate::core::id::NodeId;

/// Estimated width of one character of a port key
pub const LETTER_WIDTH: f32 = 14.0;
/// Minimum node width, also the horizontal offset for left placement
pub const NODE_MIN_WIDTH: f32 = 180.0;
/// Vertical drop applied when placing to the left of the anchor
pub const LEFT_DROP: f32 = 100.0;
/// Width reserved for the implicit `target` port
pub const TARGET_PORT_WIDTH: f32 = 120.0;
/// Two nodes closer than this overlap
pub const OVERLAP_THRESHOLD: f32 = 100.0;
/// Distance moved per nudge
pub const NUDGE_STEP: f32 = 10.0;
/// Nudges attempted before giving up
pub const MAX_NUDGES: usize = 100;

/// Approximate drawn width of a port label
pub fn port_width(key: &str) -> f32 {
    let len = key.chars().count() as f32;
    if key == "target" {
        TARGET_PORT_WIDTH
    } else if key.starts_with('%') {
        TARGET_PORT_WIDTH + len * LETTER_WIDTH
    } else {
        len * LETTER_WIDTH
    }
}

/// Approximate drawn width of a node: widest input plus widest output
pub fn node_width(node: &Node) -> f32 {
    let width = widest(node.input_keys()) + widest(node.output_keys());
    width.max(NODE_MIN_WIDTH)
}

fn widest<'a>(keys: impl Iterator<Item = &'a str>) -> f32 {
    keys.map(port_width).fold(0.0, f32::max)
}

/// Position for a node attached beside `anchor`
pub fn beside(anchor: &Node, left: bool) -> Vec2 {
    let offset = if left {
        Vec2::new(-NODE_MIN_WIDTH, LEFT_DROP)
    } else {
        Vec2::new(node_width(anchor), 0.0)
    };
    anchor.position + offset
}

/// Whether `node` sits within the overlap threshold of a sibling
pub fn overlaps(doc: &Document, node: NodeId) -> bool {
    let Some(n) = doc.node(node) else {
        return false;
    };
    doc.nodes_in(n.graph)
        .filter(|other| other.id != node)
        .any(|other| other.position.distance(n.position) < OVERLAP_THRESHOLD)
}

/// Nudge `node` down until it stops overlapping, giving up after
/// `MAX_NUDGES` steps. Returns the number of nudges applied.
pub fn space_out(doc: &mut Document, node: NodeId) -> usize {
    let mut nudges = 0;
    while overlaps(doc, node) {
        let Some(position) = doc.node(node).map(|n| n.position) else {
            break;
        };
        doc.set_position(node, position + Vec2::new(0.0, NUDGE_STEP));
        nudges += 1;
        if nudges >= MAX_NUDGES {
            break;
        }
    }
    nudges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::node::{NodeKind, NodeSpec};
    use crate::core::value::ValueType;

    fn plain(title: &str) -> NodeSpec {
        NodeSpec::new(NodeKind::Unit(title.into()), title)
    }

    #[test]
    fn test_port_width() {
        assert_eq!(port_width("target"), 120.0);
        assert_eq!(port_width("%value"), 120.0 + 6.0 * 14.0);
        assert_eq!(port_width("sum"), 42.0);
    }

    #[test]
    fn test_node_width_minimum_and_sum() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let small = doc.add_node(root, plain("a"), Vec2::ZERO).unwrap();
        assert_eq!(node_width(doc.node(small).unwrap()), NODE_MIN_WIDTH);

        let wide = plain("b")
            .value_in("target", ValueType::Object, None)
            .value_in("%translation", ValueType::Object, None)
            .value_out("result", ValueType::Object);
        let wide = doc.add_node(root, wide, Vec2::ZERO).unwrap();
        let expected = (120.0 + 12.0 * 14.0) + 6.0 * 14.0;
        assert_eq!(node_width(doc.node(wide).unwrap()), expected);
    }

    #[test]
    fn test_beside() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        let a = doc.add_node(root, plain("a"), Vec2::new(10.0, 10.0)).unwrap();
        let anchor = doc.node(a).unwrap();
        assert_eq!(beside(anchor, false), Vec2::new(190.0, 10.0));
        assert_eq!(beside(anchor, true), Vec2::new(-170.0, 110.0));
    }

    #[test]
    fn test_space_out_moves_until_clear() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        doc.add_node(root, plain("a"), Vec2::ZERO).unwrap();
        let b = doc.add_node(root, plain("b"), Vec2::new(0.0, 50.0)).unwrap();
        assert!(overlaps(&doc, b));
        let nudges = space_out(&mut doc, b);
        assert_eq!(nudges, 5);
        assert!(!overlaps(&doc, b));
        assert_eq!(doc.node(b).unwrap().position, Vec2::new(0.0, 100.0));
    }

    #[test]
    fn test_space_out_terminates_at_cap() {
        let mut doc = Document::new("Main");
        let root = doc.root();
        // A column of nodes that can never be escaped within the cap
        for i in 0..200 {
            doc.add_node(root, plain("wall"), Vec2::new(0.0, i as f32 * 10.0)).unwrap();
        }
        let n = doc.add_node(root, plain("new"), Vec2::ZERO).unwrap();
        assert_eq!(space_out(&mut doc, n), MAX_NUDGES);
        assert!(overlaps(&doc, n));
        assert_eq!(doc.node(n).unwrap().position, Vec2::new(0.0, 1000.0));
    }
}
