//! Module that contains the implementation for the iterators

use crate::treap;

use super::{JointPrefix, PrefixTable};

/// An iterator over all entries of a [`PrefixTable`], first all prefixes of the first family in
/// ascending order, then all prefixes of the second family.
pub struct Iter<'a, P: JointPrefix, T> {
    i1: Option<treap::Iter<'a, P::P1, T>>,
    i2: Option<treap::Iter<'a, P::P2, T>>,
}

impl<P: JointPrefix, T> Clone for Iter<'_, P, T> {
    fn clone(&self) -> Self {
        Self {
            i1: self.i1.clone(),
            i2: self.i2.clone(),
        }
    }
}

impl<'a, P: JointPrefix, T> Iterator for Iter<'a, P, T> {
    type Item = (P, &'a T);

    fn next(&mut self) -> Option<(P, &'a T)> {
        if let Some(i1) = self.i1.as_mut() {
            if let Some((p, t)) = i1.next() {
                return Some((P::from_p1(p), t));
            }
            // family 1 is exhausted
            self.i1 = None;
        }
        self.i2.as_mut()?.next().map(|(p, t)| (P::from_p2(p), t))
    }
}

/// An iterator over all prefixes of a [`PrefixTable`].
#[derive(Clone)]
pub struct Keys<'a, P: JointPrefix, T> {
    inner: Iter<'a, P, T>,
}

impl<P: JointPrefix, T> Iterator for Keys<'_, P, T> {
    type Item = P;

    fn next(&mut self) -> Option<P> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over all values of a [`PrefixTable`], in the order of their associated prefixes.
#[derive(Clone)]
pub struct Values<'a, P: JointPrefix, T> {
    inner: Iter<'a, P, T>,
}

impl<'a, P: JointPrefix, T> Iterator for Values<'a, P, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next().map(|(_, v)| v)
    }
}

impl<'a, P: JointPrefix, T> IntoIterator for &'a PrefixTable<P, T> {
    type Item = (P, &'a T);

    type IntoIter = Iter<'a, P, T>;

    fn into_iter(self) -> Self::IntoIter {
        Iter {
            i1: Some(self.t1.iter()),
            i2: Some(self.t2.iter()),
        }
    }
}

impl<P: JointPrefix, T> PrefixTable<P, T> {
    /// An iterator visiting all key-value pairs, first the ones of the first family, then the ones
    /// of the second. Within each family, prefixes are visited in ascending order.
    ///
    /// ```
    /// # use prefix_treap::*;
    /// # #[cfg(feature = "ipnet")]
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut table: PrefixTable<ipnet::IpNet, _> = PrefixTable::new();
    /// table.insert("2001:db8::/32".parse()?, 3);
    /// table.insert("192.168.0.0/22".parse()?, 1);
    /// table.insert("192.168.0.0/23".parse()?, 2);
    /// assert_eq!(
    ///     table.iter().collect::<Vec<_>>(),
    ///     vec![
    ///         ("192.168.0.0/22".parse()?, &1),
    ///         ("192.168.0.0/23".parse()?, &2),
    ///         ("2001:db8::/32".parse()?, &3),
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

    /// An iterator visiting all keys, family by family.
    pub fn keys(&self) -> Keys<'_, P, T> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values, family by family.
    pub fn values(&self) -> Values<'_, P, T> {
        Values { inner: self.iter() }
    }
}

impl<P: JointPrefix, T: Clone> FromIterator<(P, T)> for PrefixTable<P, T> {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut table = PrefixTable::new();
        table.extend(iter);
        table
    }
}

impl<P: JointPrefix, T: Clone> Extend<(P, T)> for PrefixTable<P, T> {
    fn extend<I: IntoIterator<Item = (P, T)>>(&mut self, iter: I) {
        for (p, t) in iter {
            self.insert(p, t);
        }
    }
}
