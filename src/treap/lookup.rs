//! Exact and longest-prefix-match lookups.
//!
//! All lookups are read-only and never allocate. The longest-prefix match uses the augmented
//! `max_upper` field to skip every subtree whose prefixes all end before the query.

use std::cmp::Ordering;

use super::node::{Link, Node};
use super::PrefixTreap;
use crate::Prefix;

impl<P: Prefix, T> PrefixTreap<P, T> {
    /// Get the value of an element by matching exactly on the prefix.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("192.168.1.0/24".parse()?, 1);
    /// assert_eq!(pt.get(&"192.168.1.0/24".parse()?), Some(&1));
    /// assert_eq!(pt.get(&"192.168.2.0/24".parse()?), None);
    /// assert_eq!(pt.get(&"192.168.0.0/23".parse()?), None);
    /// assert_eq!(pt.get(&"192.168.1.128/25".parse()?), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn get(&self, prefix: &P) -> Option<&T> {
        get(&self.root, prefix).map(|n| &n.value)
    }

    /// Get the stored prefix and the value of an element by matching exactly on the prefix.
    pub fn get_key_value(&self, prefix: &P) -> Option<(&P, &T)> {
        get(&self.root, prefix).map(|n| (&n.key, &n.value))
    }

    /// Check if a key is present in the datastructure.
    pub fn contains_key(&self, prefix: &P) -> bool {
        get(&self.root, prefix).is_some()
    }

    /// Longest-prefix match for a single address. Returns the most specific prefix that contains
    /// `addr`, together with its value.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # use std::net::Ipv4Addr;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("10.0.0.0/8".parse()?, 1);
    /// pt.insert("10.0.1.0/24".parse()?, 2);
    /// assert_eq!(pt.lookup(Ipv4Addr::new(10, 0, 1, 17)), Some((&"10.0.1.0/24".parse()?, &2)));
    /// assert_eq!(pt.lookup(Ipv4Addr::new(10, 2, 3, 4)), Some((&"10.0.0.0/8".parse()?, &1)));
    /// assert_eq!(pt.lookup(Ipv4Addr::new(42, 0, 0, 0)), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn lookup(&self, addr: impl Into<P::R>) -> Option<(&P, &T)> {
        lpm_addr(&self.root, addr.into()).map(|n| (&n.key, &n.value))
    }

    /// Longest-prefix match for a prefix. Returns the most specific stored prefix that is equal to
    /// or contains the whole range of `prefix`.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut pt: PrefixTreap<ipnet::Ipv4Net, _> = PrefixTreap::new();
    /// pt.insert("192.168.1.0/24".parse()?, 1);
    /// pt.insert("192.168.0.0/23".parse()?, 2);
    /// assert_eq!(pt.lookup_prefix(&"192.168.1.1/32".parse()?), Some((&"192.168.1.0/24".parse()?, &1)));
    /// assert_eq!(pt.lookup_prefix(&"192.168.1.0/24".parse()?), Some((&"192.168.1.0/24".parse()?, &1)));
    /// assert_eq!(pt.lookup_prefix(&"192.168.0.0/24".parse()?), Some((&"192.168.0.0/23".parse()?, &2)));
    /// assert_eq!(pt.lookup_prefix(&"192.168.0.0/22".parse()?), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn lookup_prefix(&self, prefix: &P) -> Option<(&P, &T)> {
        lpm_prefix(&self.root, prefix).map(|n| (&n.key, &n.value))
    }
}

/// Exact match by plain binary search.
fn get<'a, P: Prefix, T>(mut link: &'a Link<P, T>, key: &P) -> Option<&'a Node<P, T>> {
    loop {
        let n = link.as_deref()?;
        match n.key.cmp_key(key) {
            Ordering::Equal => return Some(n),
            Ordering::Less => link = &n.right,
            Ordering::Greater => link = &n.left,
        }
    }
}

/// Longest-prefix match for the point `addr`.
fn lpm_addr<P: Prefix, T>(mut link: &Link<P, T>, addr: P::R) -> Option<&Node<P, T>> {
    let n = loop {
        let n = link.as_deref()?;
        // no prefix in this subtree reaches up to `addr`
        if addr > n.max_upper.last() {
            return None;
        }
        if n.key.first() <= addr {
            break n;
        }
        link = &n.left;
    };

    // a more specific match can only start at or after `n`, i.e., in its right subtree
    if let Some(m) = lpm_addr(&n.right, addr) {
        return Some(m);
    }
    if n.key.contains_addr(addr) {
        return Some(n);
    }
    lpm_addr(&n.left, addr)
}

/// Longest-prefix match for the range of `prefix`.
fn lpm_prefix<'a, P: Prefix, T>(mut link: &'a Link<P, T>, prefix: &P) -> Option<&'a Node<P, T>> {
    let last = prefix.last();
    let n = loop {
        let n = link.as_deref()?;
        if last > n.max_upper.last() {
            return None;
        }
        match n.key.cmp_key(prefix) {
            Ordering::Equal => return Some(n),
            Ordering::Less => break n,
            Ordering::Greater => link = &n.left,
        }
    };

    if let Some(m) = lpm_prefix(&n.right, prefix) {
        return Some(m);
    }
    if n.key.contains(prefix) {
        return Some(n);
    }
    lpm_prefix(&n.left, prefix)
}
