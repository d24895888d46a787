//! Formatting implementation for the PrefixTreap and the PrefixTable. The treap is printed as
//! nested maps that follow the tree structure.

use std::fmt::{Debug, Formatter, Result};

use crate::treap::node::Node;

use super::*;

impl<P: Debug, T: Debug> Debug for PrefixTreap<P, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self.root.as_deref() {
            Some(root) => DebugNode(root).fmt(f),
            None => f.debug_map().finish(),
        }
    }
}

struct DebugNode<'a, P, T>(&'a Node<P, T>);

impl<P: Debug, T: Debug> Debug for DebugNode<'_, P, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let node = self.0;
        let v = &node.value;
        match (node.left.as_deref(), node.right.as_deref()) {
            (None, None) => f.debug_map().entry(&node.key, v).finish(),
            (Some(child), None) | (None, Some(child)) => f
                .debug_map()
                .entry(&node.key, &(v, DebugNode(child)))
                .finish(),
            (Some(left), Some(right)) => f
                .debug_map()
                .entry(&node.key, &(v, DebugNode(left), DebugNode(right)))
                .finish(),
        }
    }
}

impl<P, T> Debug for PrefixTable<P, T>
where
    P: JointPrefix,
    P::P1: Debug,
    P::P2: Debug,
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("PrefixTable")
            .field("t1", &self.t1)
            .field("t2", &self.t2)
            .finish()
    }
}
