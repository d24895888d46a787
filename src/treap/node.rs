//! The node of the treap, its priority and the augmented `max_upper` field.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::Prefix;

/// An optional, possibly shared, subtree.
pub(crate) type Link<P, T> = Option<Arc<Node<P, T>>>;

/// A node of the treap.
///
/// `Clone` is the shallow copy-on-write clone: key, value and priority are copied, while both
/// children are shared with the original node.
#[derive(Clone)]
pub(crate) struct Node<P, T> {
    pub(crate) key: P,
    pub(crate) value: T,
    pub(crate) prio: u64,
    /// key with the largest last address in `{self} ∪ left ∪ right`.
    pub(crate) max_upper: P,
    pub(crate) left: Link<P, T>,
    pub(crate) right: Link<P, T>,
}

/// Priority of a key. It only depends on the canonical key, so the same set of prefixes always
/// produces the same tree shape, no matter in which order they were inserted.
pub(crate) fn priority<P: Prefix>(key: &P) -> u64 {
    let mut hasher = DefaultHasher::new();
    key.first().to_u128().unwrap_or_default().hash(&mut hasher);
    key.prefix_len().hash(&mut hasher);
    hasher.finish()
}

impl<P: Prefix + Clone, T> Node<P, T> {
    /// Create a leaf. The key is canonicalized before it is stored.
    pub(crate) fn new(key: P, value: T) -> Self {
        let key = key.canonical();
        Self {
            prio: priority(&key),
            max_upper: key.clone(),
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// Recompute `max_upper` from the node itself and the (already correct) augmentation of its
    /// direct children. Must be called whenever a child or the key changes.
    pub(crate) fn recalc(&mut self) {
        let mut max = &self.key;
        if let Some(right) = &self.right {
            if right.max_upper.last() > max.last() {
                max = &right.max_upper;
            }
        }
        if let Some(left) = &self.left {
            if left.max_upper.last() > max.last() {
                max = &left.max_upper;
            }
        }
        self.max_upper = max.clone();
    }
}

impl<P: Clone, T: Clone> Node<P, T> {
    /// Take the node out of its `Arc`, cloning it only if it is still shared.
    pub(crate) fn unshare(node: Arc<Self>) -> Self {
        Arc::try_unwrap(node).unwrap_or_else(|shared| (*shared).clone())
    }

    /// Copy the whole subtree, allocating a new node at every level.
    pub(crate) fn deep_clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            value: self.value.clone(),
            prio: self.prio,
            max_upper: self.max_upper.clone(),
            left: self.left.as_deref().map(|n| Arc::new(n.deep_clone())),
            right: self.right.as_deref().map(|n| Arc::new(n.deep_clone())),
        }
    }
}
