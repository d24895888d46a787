//! Implementation of the Prefix Treap, holding prefixes of a single address family.

use std::cmp::Ordering;
use std::sync::Arc;

use crate::Prefix;

mod iter;
mod lookup;
pub(crate) mod node;
mod split_join;

pub use iter::*;
use node::{Link, Node};
use split_join::{join, split};

/// Prefix map implemented as a treap, augmented with the largest last address of each subtree.
///
/// Cloning a `PrefixTreap` is `O(1)`: the clone shares all nodes with the original. Both versions
/// can be modified independently afterwards; nodes are copied on the first write. Use
/// [`PrefixTreap::deep_clone`] to get a copy that does not share any node.
pub struct PrefixTreap<P, T> {
    pub(crate) root: Link<P, T>,
    count: usize,
}

impl<P, T> Clone for PrefixTreap<P, T> {
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
            count: self.count,
        }
    }
}

impl<P, T> Default for PrefixTreap<P, T> {
    fn default() -> Self {
        Self {
            root: None,
            count: 0,
        }
    }
}

impl<P, T> PrefixTreap<P, T> {
    /// Create an empty prefix treap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of elements stored in `self`.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("192.168.1.0/24".parse()?, 1);
    /// pt.insert("192.168.1.0/25".parse()?, 2);
    /// pt.insert("192.168.1.0/24".parse()?, 3);
    /// assert_eq!(pt.len(), 2);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the treap contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Remove all elements. Nodes still shared with other versions stay alive in those versions.
    pub fn clear(&mut self) {
        self.root = None;
        self.count = 0;
    }

    /// Call `f` for every element in ascending order of the prefixes. As soon as `f` returns
    /// `false`, the walk stops and `walk` returns `false`.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("10.0.0.0/8".parse()?, 1);
    /// pt.insert("10.0.1.0/24".parse()?, 2);
    /// pt.insert("192.168.0.0/16".parse()?, 3);
    /// let mut seen = Vec::new();
    /// let completed = pt.walk(|p, v| {
    ///     seen.push((p.to_string(), *v));
    ///     *v < 2
    /// });
    /// assert!(!completed);
    /// assert_eq!(seen, vec![("10.0.0.0/8".to_string(), 1), ("10.0.1.0/24".to_string(), 2)]);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn walk<F>(&self, mut f: F) -> bool
    where
        F: FnMut(&P, &T) -> bool,
    {
        walk(&self.root, &mut f)
    }
}

impl<P, T> PrefixTreap<P, T>
where
    P: Prefix + Clone,
    T: Clone,
{
    /// Insert a new item into the treap, returning the value that was stored for the same prefix
    /// before. The prefix is canonicalized (host bits are cleared) before it is stored. An
    /// existing value is always replaced.
    ///
    /// Nodes that are shared with a clone of this treap are copied before they are changed, so
    /// the clone is never affected.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// assert_eq!(pt.insert("192.168.0.0/23".parse()?, 1), None);
    /// assert_eq!(pt.insert("192.168.1.0/24".parse()?, 2), None);
    /// assert_eq!(pt.insert("192.168.1.7/24".parse()?, 3), Some(2));
    /// assert_eq!(pt.get(&"192.168.1.0/24".parse()?), Some(&3));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn insert(&mut self, prefix: P, value: T) -> Option<T> {
        let (root, old) = insert(self.root.take(), Node::new(prefix, value));
        self.root = root;
        if old.is_none() {
            self.count += 1;
        }
        old
    }

    /// Insert a new item, returning a new treap and leaving `self` untouched. The new treap shares
    /// every node with `self` that is not on the path to the inserted prefix.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("10.0.0.0/8".parse()?, 1);
    /// let new = pt.insert_immutable("10.0.0.0/8".parse()?, 2);
    /// assert_eq!(pt.get(&"10.0.0.0/8".parse()?), Some(&1));
    /// assert_eq!(new.get(&"10.0.0.0/8".parse()?), Some(&2));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    #[must_use]
    pub fn insert_immutable(&self, prefix: P, value: T) -> Self {
        let mut new = self.clone();
        new.insert(prefix, value);
        new
    }

    /// Remove a prefix from the treap, returning its value if it was present.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// let prefix = "192.168.1.0/24".parse()?;
    /// pt.insert(prefix, 1);
    /// assert_eq!(pt.remove(&prefix), Some(1));
    /// assert_eq!(pt.remove(&prefix), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn remove(&mut self, prefix: &P) -> Option<T> {
        let (root, old) = remove(self.root.take(), prefix);
        self.root = root;
        if old.is_some() {
            self.count -= 1;
        }
        old
    }

    /// Remove a prefix from the treap, returning `true` if it was present.
    pub fn delete(&mut self, prefix: &P) -> bool {
        self.remove(prefix).is_some()
    }

    /// Remove a prefix, returning a new treap and whether the prefix was present. `self` is left
    /// untouched.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// let prefix = "192.168.1.0/24".parse()?;
    /// pt.insert(prefix, 1);
    /// let (new, found) = pt.delete_immutable(&prefix);
    /// assert!(found);
    /// assert!(new.is_empty());
    /// assert_eq!(pt.get(&prefix), Some(&1));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    #[must_use]
    pub fn delete_immutable(&self, prefix: &P) -> (Self, bool) {
        let mut new = self.clone();
        let found = new.delete(prefix);
        (new, found)
    }

    /// Merge `other` into `self`. For prefixes present in both, `overwrite` decides whether the
    /// value of `other` (`true`) or the value of `self` (`false`) is kept. `other` is never
    /// modified; nodes taken from it are copied.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut a: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// a.insert("10.0.0.0/8".parse()?, 1);
    /// a.insert("10.1.0.0/16".parse()?, 1);
    /// let mut b = PrefixTreap::new();
    /// b.insert("10.0.0.0/8".parse()?, 2);
    /// b.insert("10.2.0.0/16".parse()?, 2);
    ///
    /// let mut keep = a.clone();
    /// keep.union(&b, false);
    /// assert_eq!(keep.get(&"10.0.0.0/8".parse()?), Some(&1));
    ///
    /// a.union(&b, true);
    /// assert_eq!(a.len(), 3);
    /// assert_eq!(a.get(&"10.0.0.0/8".parse()?), Some(&2));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn union(&mut self, other: &Self, overwrite: bool) {
        let (root, dupes) = union(self.root.take(), other.root.clone(), overwrite);
        self.root = root;
        self.count = self.count + other.count - dupes;
    }

    /// Merge `self` and `other` into a new treap, leaving both untouched. See
    /// [`PrefixTreap::union`] for the meaning of `overwrite`.
    #[must_use]
    pub fn union_immutable(&self, other: &Self, overwrite: bool) -> Self {
        let mut new = self.clone();
        new.union(other, overwrite);
        new
    }

    /// Copy the treap, allocating new nodes for every element. The result shares nothing with
    /// `self`.
    pub fn deep_clone(&self) -> Self {
        Self {
            root: self.root.as_deref().map(|n| Arc::new(n.deep_clone())),
            count: self.count,
        }
    }
}

impl<P, T> PartialEq for PrefixTreap<P, T>
where
    P: Prefix,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|((lp, lt), (rp, rt))| lp.eq(rp) && lt == rt)
    }
}

impl<P, T> Eq for PrefixTreap<P, T>
where
    P: Prefix,
    T: Eq,
{
}

/// Insert `new` into the treap rooted at `link`. Returns the new root and the value replaced by
/// `new`, if any.
pub(crate) fn insert<P, T>(link: Link<P, T>, mut new: Node<P, T>) -> (Link<P, T>, Option<T>)
where
    P: Prefix + Clone,
    T: Clone,
{
    let mut node = match link {
        Some(node) => node,
        None => return (Some(Arc::new(new)), None),
    };

    // `new` becomes the root of this subtree
    if new.prio >= node.prio {
        //
        //          new
        //           | split in ( <new | dupe | >new )
        //           v
        //        n
        //       / \
        //     l     d(upe)
        //
        let (l, dupe, r) = split(Some(node), &new.key);
        new.left = l;
        new.right = r;
        new.recalc();
        return (Some(Arc::new(new)), dupe.map(|d| Node::unshare(d).value));
    }

    match new.key.cmp_key(&node.key) {
        // unreachable as long as equal keys have equal priorities
        Ordering::Equal => {
            let n = Arc::make_mut(&mut node);
            n.key = new.key;
            let old = std::mem::replace(&mut n.value, new.value);
            (Some(node), Some(old))
        }
        Ordering::Less => {
            let n = Arc::make_mut(&mut node);
            let (left, old) = insert(n.left.take(), new);
            n.left = left;
            n.recalc();
            (Some(node), old)
        }
        Ordering::Greater => {
            let n = Arc::make_mut(&mut node);
            let (right, old) = insert(n.right.take(), new);
            n.right = right;
            n.recalc();
            (Some(node), old)
        }
    }
}

/// Remove `key` from the treap rooted at `link`. Returns the new root and the removed value.
pub(crate) fn remove<P, T>(link: Link<P, T>, key: &P) -> (Link<P, T>, Option<T>)
where
    P: Prefix + Clone,
    T: Clone,
{
    let (l, m, r) = split(link, key);
    (join(l, r), m.map(|m| Node::unshare(m).value))
}

/// Union of two treaps. When a key exists in both, the node of `a` is kept, and its value is
/// replaced by the one of `b` if `overwrite` is set. Returns the new root and the number of
/// duplicate keys.
pub(crate) fn union<P, T>(a: Link<P, T>, b: Link<P, T>, overwrite: bool) -> (Link<P, T>, usize)
where
    P: Prefix + Clone,
    T: Clone,
{
    // the root with the higher priority stays on top. Swapping the operands also swaps which side
    // wins on duplicates.
    let (mut a, b, overwrite) = match (a, b) {
        (None, b) => return (b, 0),
        (a, None) => return (a, 0),
        (Some(a), Some(b)) if a.prio < b.prio => (b, a, !overwrite),
        (Some(a), Some(b)) => (a, b, overwrite),
    };

    let n = Arc::make_mut(&mut a);
    let (l, dupe, r) = split(Some(b), &n.key);

    let mut dupes = 0;
    if let Some(dupe) = dupe {
        dupes += 1;
        if overwrite {
            let dupe = Node::unshare(dupe);
            n.key = dupe.key;
            n.value = dupe.value;
        }
    }

    let (left, left_dupes) = union(n.left.take(), l, overwrite);
    let (right, right_dupes) = union(n.right.take(), r, overwrite);
    n.left = left;
    n.right = right;
    n.recalc();

    (Some(a), dupes + left_dupes + right_dupes)
}

/// In-order walk. Returns `false` as soon as `f` returned `false`.
pub(crate) fn walk<P, T, F>(link: &Link<P, T>, f: &mut F) -> bool
where
    F: FnMut(&P, &T) -> bool,
{
    match link.as_deref() {
        None => true,
        Some(n) => walk(&n.left, f) && f(&n.key, &n.value) && walk(&n.right, f),
    }
}

#[cfg(test)]
impl<P: Prefix + Clone, T> PrefixTreap<P, T> {
    /// Check the BST, heap and augmentation invariants of every node, and the element count.
    pub(crate) fn check_invariants(&self) -> Result<(), String> {
        fn check<P: Prefix + Clone, T>(n: &Node<P, T>) -> Result<(usize, P), String> {
            let mut size = 1;
            let mut max = n.key.clone();
            for (child, is_left) in [(&n.left, true), (&n.right, false)] {
                let Some(c) = child.as_deref() else { continue };
                if c.prio > n.prio {
                    return Err("heap property violated".to_string());
                }
                let (child_size, child_max) = check(c)?;
                size += child_size;
                if child_max.last() > max.last() {
                    max = child_max;
                }
                let mut ok = true;
                walk(child, &mut |p: &P, _: &T| {
                    let ord = p.cmp_key(&n.key);
                    ok = if is_left {
                        ord == Ordering::Less
                    } else {
                        ord == Ordering::Greater
                    };
                    ok
                });
                if !ok {
                    return Err("search tree property violated".to_string());
                }
            }
            if max.last() != n.max_upper.last() {
                return Err("max_upper is inconsistent".to_string());
            }
            if n.key.canonical().cmp_key(&n.key) != Ordering::Equal || n.key.mask() != n.key.repr()
            {
                return Err("key is not canonical".to_string());
            }
            Ok((size, max))
        }
        let size = match self.root.as_deref() {
            Some(root) => check(root)?.0,
            None => 0,
        };
        if size != self.count {
            return Err(format!("count is {}, but found {} nodes", self.count, size));
        }
        Ok(())
    }

    /// Depth of the deepest node (the root has depth 1).
    pub(crate) fn depth(&self) -> usize {
        fn depth<P, T>(link: &Link<P, T>) -> usize {
            match link.as_deref() {
                None => 0,
                Some(n) => 1 + depth(&n.left).max(depth(&n.right)),
            }
        }
        depth(&self.root)
    }
}
