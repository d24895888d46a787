//! Module that contains the implementation for the iterators

use crate::*;

use super::node::{Link, Node};

/// An iterator over all entries of a [`PrefixTreap`] in ascending order of the prefixes.
pub struct Iter<'a, P, T> {
    stack: Vec<&'a Node<P, T>>,
}

impl<P, T> Clone for Iter<'_, P, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<'a, P, T> Iter<'a, P, T> {
    fn new(root: &'a Link<P, T>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left(root);
        iter
    }

    /// push the left spine of `link` onto the stack.
    fn push_left(&mut self, mut link: &'a Link<P, T>) {
        while let Some(n) = link.as_deref() {
            self.stack.push(n);
            link = &n.left;
        }
    }
}

impl<'a, P, T> Iterator for Iter<'a, P, T> {
    type Item = (&'a P, &'a T);

    fn next(&mut self) -> Option<(&'a P, &'a T)> {
        let n = self.stack.pop()?;
        self.push_left(&n.right);
        Some((&n.key, &n.value))
    }
}

/// An iterator over all prefixes of a [`PrefixTreap`] in ascending order.
#[derive(Clone)]
pub struct Keys<'a, P, T> {
    pub(crate) inner: Iter<'a, P, T>,
}

impl<'a, P, T> Iterator for Keys<'a, P, T> {
    type Item = &'a P;

    fn next(&mut self) -> Option<&'a P> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over all values of a [`PrefixTreap`] in ascending order of their associated
/// prefixes.
#[derive(Clone)]
pub struct Values<'a, P, T> {
    pub(crate) inner: Iter<'a, P, T>,
}

impl<'a, P, T> Iterator for Values<'a, P, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(_, v)| v)
    }
}

/// An iterator over all owned entries of a [`PrefixTreap`] in ascending order. Nodes that are
/// still shared with another version of the treap are cloned.
pub struct IntoIter<P, T> {
    stack: Vec<Node<P, T>>,
}

impl<P: Clone, T: Clone> IntoIter<P, T> {
    fn push_left(&mut self, mut link: Link<P, T>) {
        while let Some(n) = link {
            let mut n = Node::unshare(n);
            link = n.left.take();
            self.stack.push(n);
        }
    }
}

impl<P: Clone, T: Clone> Iterator for IntoIter<P, T> {
    type Item = (P, T);

    fn next(&mut self) -> Option<(P, T)> {
        let mut n = self.stack.pop()?;
        self.push_left(n.right.take());
        Some((n.key, n.value))
    }
}

impl<P: Clone, T: Clone> IntoIterator for PrefixTreap<P, T> {
    type Item = (P, T);

    type IntoIter = IntoIter<P, T>;

    fn into_iter(self) -> Self::IntoIter {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left(self.root);
        iter
    }
}

impl<'a, P, T> IntoIterator for &'a PrefixTreap<P, T> {
    type Item = (&'a P, &'a T);

    type IntoIter = Iter<'a, P, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter::new(&self.root)
    }
}

impl<P, T> PrefixTreap<P, T> {
    /// An iterator visiting all key-value pairs in ascending order of the prefixes (by first
    /// address, supernets before their subnets). The iterator element type is `(&P, &T)`.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("192.168.0.0/22".parse()?, 1);
    /// pt.insert("192.168.0.0/23".parse()?, 2);
    /// pt.insert("192.168.2.0/23".parse()?, 3);
    /// pt.insert("192.168.0.0/24".parse()?, 4);
    /// pt.insert("192.168.2.0/24".parse()?, 5);
    /// assert_eq!(
    ///     pt.iter().collect::<Vec<_>>(),
    ///     vec![
    ///         (&"192.168.0.0/22".parse()?, &1),
    ///         (&"192.168.0.0/23".parse()?, &2),
    ///         (&"192.168.0.0/24".parse()?, &4),
    ///         (&"192.168.2.0/23".parse()?, &3),
    ///         (&"192.168.2.0/24".parse()?, &5),
    ///     ]
    /// );
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    #[inline(always)]
    pub fn iter(&self) -> Iter<'_, P, T> {
        self.into_iter()
    }

    /// An iterator visiting all keys in ascending order. The iterator element type is `&P`.
    pub fn keys(&self) -> Keys<'_, P, T> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in ascending order of their prefixes. The iterator element
    /// type is `&T`.
    pub fn values(&self) -> Values<'_, P, T> {
        Values { inner: self.iter() }
    }
}

impl<P: Prefix + Clone, T: Clone> FromIterator<(P, T)> for PrefixTreap<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut treap = PrefixTreap::new();
        treap.extend(iter);
        treap
    }
}

impl<P: Prefix + Clone, T: Clone> Extend<(P, T)> for PrefixTreap<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (p, t) in iter {
            self.insert(p, t);
        }
    }
}
