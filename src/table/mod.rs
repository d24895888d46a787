//! Module that defines the dual-family [`PrefixTable`]: one [`PrefixTreap`] per address family,
//! behind a single API. Every operation dispatches on the family of its argument.
//!
//! Prefixes are returned as owned values, rebuilt from the family-specific prefix stored in the
//! treap. This is cheap for IPv4 and IPv6 prefixes, as they implement `Copy`.

macro_rules! fork {
    ($self:ident, $prefix:ident, $func:ident $(, $args:expr),*) => {
        match $prefix.p1_or_p2() {
            ::either::Either::Left(p) => $self.t1.$func(p$(, $args),*),
            ::either::Either::Right(p) => $self.t2.$func(p$(, $args),*),
        }
    };
}

macro_rules! fork_ref {
    ($self:ident, $prefix:ident, $func:ident $(, $args:expr),*) => {
        match $prefix.p1_or_p2_ref() {
            ::either::Either::Left(p) => $self.t1.$func(p$(, $args),*),
            ::either::Either::Right(p) => $self.t2.$func(p$(, $args),*),
        }
    };
    ($self:ident, $prefix:ident as ($P:ty,T), $func:ident $(, $args:expr),*) => {
        match $prefix.p1_or_p2_ref() {
            ::either::Either::Left(p) => $self.t1.$func(p$(, $args),*).map(|(p, t)| (<$P>::from_p1(p), t)),
            ::either::Either::Right(p) => $self.t2.$func(p$(, $args),*).map(|(p, t)| (<$P>::from_p2(p), t)),
        }
    };
}

mod iter;
mod prefix;

use either::{Left, Right};

pub use iter::*;
pub use prefix::JointPrefix;

use crate::PrefixTreap;

/// A dual-family prefix table, implemented as two separate prefix treaps.
///
/// Like [`PrefixTreap`], cloning a table is `O(1)` and both copies can be modified independently.
pub struct PrefixTable<P, T>
where
    P: JointPrefix,
{
    /// PrefixTreap that corresponds to the first prefix type
    pub t1: PrefixTreap<P::P1, T>,
    /// PrefixTreap that corresponds to the second prefix type
    pub t2: PrefixTreap<P::P2, T>,
}

impl<P: JointPrefix, T> Clone for PrefixTable<P, T> {
    fn clone(&self) -> Self {
        Self {
            t1: self.t1.clone(),
            t2: self.t2.clone(),
        }
    }
}

impl<P: JointPrefix, T> Default for PrefixTable<P, T> {
    fn default() -> Self {
        Self {
            t1: Default::default(),
            t2: Default::default(),
        }
    }
}

impl<P: JointPrefix, T> PrefixTable<P, T> {
    /// Create an empty prefix table
    pub fn new() -> Self {
        Self {
            t1: PrefixTreap::new(),
            t2: PrefixTreap::new(),
        }
    }

    /// Returns the number of elements stored in `self`, summed over both families.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::default();
    /// table.insert("192.168.1.0/24".parse()?, 1u32);
    /// table.insert("192.168.1.0/25".parse()?, 2u32);
    /// table.insert("2001::1:0:0/96".parse()?, 3u32);
    /// # let table = table.clone();
    /// assert_eq!(table.len(), 3);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.t1.len() + self.t2.len()
    }

    /// Returns `true` if the table contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.t1.is_empty() && self.t2.is_empty()
    }

    /// Remove all elements of both families.
    pub fn clear(&mut self) {
        self.t1.clear();
        self.t2.clear();
    }

    /// Call `f` for every element in ascending order, first all prefixes of the first family,
    /// then all of the second. The walk stops as soon as `f` returns `false`, in which case `walk`
    /// returns `false` and the second family is not visited anymore.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// table.insert("2001:db8::/32".parse()?, 3);
    /// table.insert("10.0.0.0/8".parse()?, 1);
    /// table.insert("192.168.0.0/16".parse()?, 2);
    /// let mut seen = Vec::new();
    /// assert!(table.walk(|p, _| {
    ///     seen.push(p.to_string());
    ///     true
    /// }));
    /// assert_eq!(seen, vec!["10.0.0.0/8", "192.168.0.0/16", "2001:db8::/32"]);
    /// assert!(!table.walk(|_, v| *v != 2));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn walk<F>(&self, mut f: F) -> bool
    where
        F: FnMut(P, &T) -> bool,
    {
        self.t1.walk(|p, t| f(P::from_p1(p), t)) && self.t2.walk(|p, t| f(P::from_p2(p), t))
    }

    /// Get the value of an element by matching exactly on the prefix.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// table.insert("192.168.1.0/24".parse()?, 1);
    /// table.insert("2001::1:0:0/96".parse()?, 2);
    /// assert_eq!(table.get(&"192.168.1.0/24".parse()?), Some(&1));
    /// assert_eq!(table.get(&"192.168.2.0/24".parse()?), None);
    /// assert_eq!(table.get(&"2001::1:0:0/96".parse()?), Some(&2));
    /// assert_eq!(table.get(&"0ca8:1::/24".parse()?), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn get<'a>(&'a self, prefix: &P) -> Option<&'a T> {
        fork_ref!(self, prefix, get)
    }

    /// Get the stored prefix and the value of an element by matching exactly on the prefix. The
    /// returned prefix has its host bits cleared.
    pub fn get_key_value<'a>(&'a self, prefix: &P) -> Option<(P, &'a T)> {
        fork_ref!(self, prefix as (P, T), get_key_value)
    }

    /// Check if a key is present in the datastructure.
    pub fn contains_key(&self, prefix: &P) -> bool {
        fork_ref!(self, prefix, contains_key)
    }

    /// Longest-prefix match for a single address of either family.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// table.insert("10.0.0.0/8".parse()?, 1);
    /// table.insert("10.0.1.0/24".parse()?, 2);
    /// table.insert("::/0".parse()?, 3);
    /// assert_eq!(table.lookup("10.0.1.17".parse()?), Some(("10.0.1.0/24".parse()?, &2)));
    /// assert_eq!(table.lookup("10.2.3.4".parse()?), Some(("10.0.0.0/8".parse()?, &1)));
    /// assert_eq!(table.lookup("42.0.0.0".parse()?), None);
    /// assert_eq!(table.lookup("::2".parse()?), Some(("::/0".parse()?, &3)));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn lookup(&self, addr: P::Addr) -> Option<(P, &T)> {
        match P::addr_p1_or_p2(addr) {
            Left(a) => self.t1.lookup(a).map(|(p, t)| (P::from_p1(p), t)),
            Right(a) => self.t2.lookup(a).map(|(p, t)| (P::from_p2(p), t)),
        }
    }

    /// Longest-prefix match for a prefix: the most specific stored prefix that is equal to or
    /// contains `prefix`.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// table.insert("192.168.1.0/24".parse()?, 1);
    /// table.insert("192.168.0.0/23".parse()?, 2);
    /// assert_eq!(table.lookup_prefix(&"192.168.1.1/32".parse()?), Some(("192.168.1.0/24".parse()?, &1)));
    /// assert_eq!(table.lookup_prefix(&"192.168.1.0/24".parse()?), Some(("192.168.1.0/24".parse()?, &1)));
    /// assert_eq!(table.lookup_prefix(&"192.168.0.0/24".parse()?), Some(("192.168.0.0/23".parse()?, &2)));
    /// assert_eq!(table.lookup_prefix(&"192.168.2.0/24".parse()?), None);
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn lookup_prefix<'a>(&'a self, prefix: &P) -> Option<(P, &'a T)> {
        fork_ref!(self, prefix as (P, T), lookup_prefix)
    }
}

impl<P, T> PrefixTable<P, T>
where
    P: JointPrefix,
    T: Clone,
{
    /// Insert a new item, returning the value that was stored for the same prefix before.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// assert_eq!(table.insert("192.168.0.0/23".parse()?, 1), None);
    /// assert_eq!(table.insert("192.168.1.0/24".parse()?, 2), None);
    /// assert_eq!(table.insert("192.168.1.0/24".parse()?, 3), Some(2));
    /// assert_eq!(table.insert("2001::1:0:0/96".parse()?, 4), None);
    /// assert_eq!(table.insert("2001::1:0:0/97".parse()?, 5), None);
    /// assert_eq!(table.insert("2001::1:0:0/97".parse()?, 6), Some(5));
    /// # Ok(())
    /// # }
    /// # #[cfg(not(feature = "ipnet"))]
    /// # fn main() {}
    /// ```
    pub fn insert(&mut self, prefix: P, value: T) -> Option<T> {
        fork!(self, prefix, insert, value)
    }

    /// Insert a new item, returning a new table and leaving `self` untouched.
    #[must_use]
    pub fn insert_immutable(&self, prefix: P, value: T) -> Self {
        let mut new = self.clone();
        new.insert(prefix, value);
        new
    }

    /// Remove a prefix from the table, returning its value if it was present.
    pub fn remove(&mut self, prefix: &P) -> Option<T> {
        fork_ref!(self, prefix, remove)
    }

    /// Remove a prefix from the table, returning `true` if it was present.
    pub fn delete(&mut self, prefix: &P) -> bool {
        fork_ref!(self, prefix, delete)
    }

    /// Remove a prefix, returning a new table and whether the prefix was present. `self` is left
    /// untouched.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// let prefix = "2001:db8::/32".parse()?;
    /// table.insert(prefix, 1);
    /// let (new, found) = table.delete_immutable(&prefix);
    /// assert!(found);
    /// assert!(new.is_empty());
    /// assert_eq!(table.get(&prefix), Some(&1));
    /// assert!(!new.delete_immutable(&prefix).1);
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

    /// Merge `other` into `self`, family by family. For prefixes present in both, `overwrite`
    /// decides whether the value of `other` (`true`) or of `self` (`false`) is kept.
    pub fn union(&mut self, other: &Self, overwrite: bool) {
        self.t1.union(&other.t1, overwrite);
        self.t2.union(&other.t2, overwrite);
    }

    /// Merge `self` and `other` into a new table, leaving both untouched.
    #[must_use]
    pub fn union_immutable(&self, other: &Self, overwrite: bool) -> Self {
        Self {
            t1: self.t1.union_immutable(&other.t1, overwrite),
            t2: self.t2.union_immutable(&other.t2, overwrite),
        }
    }

    /// Copy the table, allocating new nodes for every element of both families.
    pub fn deep_clone(&self) -> Self {
        Self {
            t1: self.t1.deep_clone(),
            t2: self.t2.deep_clone(),
        }
    }
}

impl<P, T> PartialEq for PrefixTable<P, T>
where
    P: JointPrefix,
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.t1 == other.t1 && self.t2 == other.t2
    }
}

impl<P, T> Eq for PrefixTable<P, T>
where
    P: JointPrefix,
    T: Eq,
{
}
