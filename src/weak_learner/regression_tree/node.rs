//! Defines the inner representation
//! of the regression tree.
use serde::{Serialize, Deserialize};

use super::split_rule::{LeftRight, Splitter};
use crate::{Regressor, Sample};


/// Enumeration of `BranchNode` and `LeafNode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// A node that have two childrens.
    Branch(BranchNode),


    /// A node that have no child.
    Leaf(LeafNode),
}


/// Represents the branch nodes of regression tree.
/// Each `BranchNode` must have two childrens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchNode {
    pub(super) rule: Splitter,
    pub(super) left: Box<Node>,
    pub(super) right: Box<Node>,
}


/// Represents the leaf nodes of regression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafNode {
    pub(super) prediction: f64,
}


impl Node {
    #[inline]
    pub(super) fn leaf(prediction: f64) -> Self {
        Node::Leaf(LeafNode { prediction })
    }


    #[inline]
    pub(super) fn branch(rule: Splitter, left: Node, right: Node) -> Self {
        Node::Branch(BranchNode {
            rule,
            left: Box::new(left),
            right: Box::new(right),
        })
    }


    /// Returns the number of leaves of this sub-tree.
    pub(super) fn leaves(&self) -> usize {
        match self {
            Node::Branch(b) => b.left.leaves() + b.right.leaves(),
            Node::Leaf(_) => 1,
        }
    }


    /// Returns the number of split levels below this node.
    pub(super) fn depth(&self) -> usize {
        match self {
            Node::Branch(b) => 1 + b.left.depth().max(b.right.depth()),
            Node::Leaf(_) => 0,
        }
    }
}


impl Regressor for Node {
    #[inline]
    fn predict(&self, sample: &Sample, row: usize) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Branch(b) => {
                    node = match b.rule.split(sample, row) {
                        LeftRight::Left => &*b.left,
                        LeftRight::Right => &*b.right,
                    };
                },
                Node::Leaf(l) => { return l.prediction; },
            }
        }
    }
}
