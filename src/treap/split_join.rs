//! The two treap primitives, `split` and `join`, that all modifications are built from.
//!
//! Both take their operands by value. Every node whose children change is first made writable
//! with [`Arc::make_mut`]: a node that is only reachable from the tree being modified is changed
//! in place, while a node that is shared with another version of the tree is copied first. A
//! caller that keeps a snapshot of the root therefore never observes any change.

use std::cmp::Ordering;
use std::sync::Arc;

use super::node::Link;
use crate::Prefix;

/// Split the treap into all nodes that compare less than `key`, the node equal to `key` (if any,
/// detached from its children), and all nodes that compare greater than `key`.
pub(crate) fn split<P, T>(link: Link<P, T>, key: &P) -> (Link<P, T>, Link<P, T>, Link<P, T>)
where
    P: Prefix + Clone,
    T: Clone,
{
    let mut node = match link {
        Some(node) => node,
        None => return (None, None, None),
    };
    let n = Arc::make_mut(&mut node);

    match n.key.cmp_key(key) {
        //
        //       (k)
        //      R
        //     l r   ==> (R.r, m, r) = R.r.split(k)
        //    l   r
        //
        Ordering::Less => {
            let (l, m, r) = split(n.right.take(), key);
            n.right = l;
            n.recalc();
            (Some(node), m, r)
        }
        //
        //   (k)
        //      R
        //     l r   ==> (l, m, R.l) = R.l.split(k)
        //    l   r
        //
        Ordering::Greater => {
            let (l, m, r) = split(n.left.take(), key);
            n.left = r;
            n.recalc();
            (l, m, Some(node))
        }
        //
        //     (k)
        //      R
        //     l r   ==> (R.l, R, R.r)
        //    l   r
        //
        Ordering::Equal => {
            let l = n.left.take();
            let r = n.right.take();
            n.recalc();
            (l, Some(node), r)
        }
    }
}

/// Join two treaps. All keys in `left` must compare less than all keys in `right`; this is not
/// checked. The root with the higher priority becomes the new root, ties go to `left`.
pub(crate) fn join<P, T>(left: Link<P, T>, right: Link<P, T>) -> Link<P, T>
where
    P: Prefix + Clone,
    T: Clone,
{
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(mut l), Some(mut r)) => {
            debug_assert!(l.key.cmp_key(&r.key) == Ordering::Less);
            if l.prio >= r.prio {
                //     l
                //    l r    r
                //          l r
                let n = Arc::make_mut(&mut l);
                n.right = join(n.right.take(), Some(r));
                n.recalc();
                Some(l)
            } else {
                //            r
                //      l    l r
                //     l r
                let n = Arc::make_mut(&mut r);
                n.left = join(Some(l), n.left.take());
                n.recalc();
                Some(r)
            }
        }
    }
}
