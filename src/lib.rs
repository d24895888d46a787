//! This crate provides a persistent prefix table for IP prefixes, implemented as a treap. Any
//! lookup performs longest-prefix match, either for a single address or for a whole prefix. This
//! crate supports both IPv4 and IPv6 (from [ipnet](https://docs.rs/ipnet/2.10.0),
//! [ipnetwork](https://crates.io/crates/ipnetwork), or [cidr](https://crates.io/crates/cidr)). It
//! also supports any tuple `(R, u8)`, where `R` is any unsigned primitive integer (`u8`, `u16`,
//! `u32`, `u64`, `u128`, or `usize`).
//!
//! # Description of the Tree
//!
//! A [`PrefixTreap`] stores prefixes of a single address family. Each node consists of a prefix,
//! a value, a priority, and two optional children. The tree is a binary search tree on the
//! prefixes, ordered by their first address and then by their length (supernets come before their
//! subnets). At the same time, it is a max-heap on the priorities. The priority is a hash of the
//! prefix, so a given set of prefixes always results in the same tree, no matter the order of
//! insertion, and the expected depth is logarithmic.
//!
//! Every node is augmented with the prefix that has the largest last address in its subtree. The
//! longest-prefix match uses it to skip all subtrees whose prefixes end before the query.
//!
//! A [`PrefixTable`] holds one treap per address family and dispatches every operation on the
//! family of its argument.
//!
//! # Versions
//!
//! Nodes are reference counted. Cloning a treap or a table is `O(1)`, and both copies share all
//! nodes. Every modification copies the nodes it changes if (and only if) they are still shared
//! with another copy. The `*_immutable` functions build on this: they clone `self`, apply the
//! modification to the clone, and return it, such that `self` remains unchanged.
//!
//! ```
//! # use prefix_treap::*;
//! # #[cfg(feature = "ipnet")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut table: PrefixTable<ipnet::IpNet, &str> = PrefixTable::new();
//! table.insert("10.0.0.0/8".parse()?, "a");
//! table.insert("2001:db8::/32".parse()?, "b");
//!
//! let snapshot = table.clone();
//! let next = table.insert_immutable("10.0.1.0/24".parse()?, "c");
//! table.delete(&"10.0.0.0/8".parse()?);
//!
//! assert_eq!(snapshot.lookup("10.0.1.1".parse()?), Some(("10.0.0.0/8".parse()?, &"a")));
//! assert_eq!(next.lookup("10.0.1.1".parse()?), Some(("10.0.1.0/24".parse()?, &"c")));
//! assert_eq!(table.lookup("10.0.1.1".parse()?), None);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "ipnet"))]
//! # fn main() {}
//! ```
//!
//! # Concurrency
//!
//! [`PrefixTreap`] and [`PrefixTable`] are `Send` and `Sync` whenever the prefix and the value
//! are. Any number of threads may read the same version at the same time. Modifications need
//! `&mut self`; a writer can publish a new version by handing out a clone.
//!
//! # Operations on the tree
//!
//! The following are the computational complexities of the functions, where `n` is the number of
//! elements in the tree, and `m <= n` the number of elements in the smaller operand of a union.
//!
//! | Operation                                    | Complexity (expected)    |
//! |----------------------------------------------|--------------------------|
//! | `insert`, `insert_immutable`                 | `O(log n)`               |
//! | `remove`, `delete`, `delete_immutable`       | `O(log n)`               |
//! | `get`, `contains_key`                        | `O(log n)`               |
//! | `lookup`, `lookup_prefix`                    | `O(log n)` typical       |
//! | `union`, `union_immutable`                   | `O(m log(n/m + 1))`      |
//! | `walk`, `iter`, `deep_clone`                 | `O(n)`                   |
//! | `clone`, `len` and `is_empty`                | `O(1)`                   |
//!
//! The longest-prefix match may need to inspect several candidates when many prefixes overlap.

#![deny(missing_docs)]

mod fmt;
mod prefix;
#[cfg(feature = "serde")]
mod serde;
#[cfg(test)]
mod fuzzing;

pub mod table;
pub mod treap;

pub use prefix::Prefix;
pub use table::{JointPrefix, PrefixTable};
pub use treap::PrefixTreap;
