//! Description of the generic type `Prefix`, and the key ordering and range model of the treap.

use std::cmp::Ordering;

#[cfg(feature = "cidr")]
use cidr::{Ipv4Cidr, Ipv6Cidr};
#[cfg(feature = "ipnet")]
use ipnet::{Ipv4Net, Ipv6Net};
#[cfg(feature = "ipnetwork")]
use ipnetwork::{Ipv4Network, Ipv6Network};
use num_traits::{CheckedShr, PrimInt, Unsigned, Zero};

/// Trait for defining prefixes.
///
/// A prefix covers the contiguous address range `[first, last]`. Two prefixes are ordered by their
/// first address, and if that is equal, the shorter prefix (the supernet) comes first. This is the
/// only ordering used by [`crate::PrefixTreap`].
pub trait Prefix: Sized {
    /// How can the prefix be represented. This must be one of `u8`, `u16`, `u32`, `u64`, or `u128`.
    type R: Unsigned + PrimInt + Zero + CheckedShr;

    /// Get raw representation of the address, ignoring the prefix length. This function may return
    /// the representation with host bits still set.
    fn repr(&self) -> Self::R;

    /// Prefix length
    fn prefix_len(&self) -> u8;

    /// Create a new prefix from the representation and the prefix length.
    fn from_repr_len(repr: Self::R, len: u8) -> Self;

    /// mask `self.repr()` using `self.len()`. If you can guarantee that `repr` is already masked,
    /// them simply re-implement this function for your type.
    fn mask(&self) -> Self::R {
        self.repr() & mask_from_prefix_len(self.prefix_len())
    }

    /// Create a prefix that matches everything
    fn zero() -> Self {
        Self::from_repr_len(Self::R::zero(), 0)
    }

    /// Return the same prefix with all host bits cleared.
    fn canonical(&self) -> Self {
        Self::from_repr_len(self.mask(), self.prefix_len())
    }

    /// The first address covered by the prefix (the network address).
    fn first(&self) -> Self::R {
        self.mask()
    }

    /// The last address covered by the prefix (the broadcast address for IPv4).
    fn last(&self) -> Self::R {
        self.mask() | !mask_from_prefix_len::<Self::R>(self.prefix_len())
    }

    /// Compare two prefixes by their first address. Prefixes starting at the same address are
    /// ordered by their length, so supernets sort before their subnets.
    fn cmp_key(&self, other: &Self) -> Ordering {
        self.first()
            .cmp(&other.first())
            .then_with(|| self.prefix_len().cmp(&other.prefix_len()))
    }

    /// Check if `self` contains `other` in its prefix range. This function also returns `True` if
    /// `self` is identical to `other`.
    fn contains(&self, other: &Self) -> bool {
        if self.prefix_len() > other.prefix_len() {
            return false;
        }
        other.repr() & mask_from_prefix_len(self.prefix_len()) == self.mask()
    }

    /// Check if the single address `addr` lies within the range of `self`.
    fn contains_addr(&self, addr: Self::R) -> bool {
        addr & mask_from_prefix_len(self.prefix_len()) == self.mask()
    }

    /// Compare two prefixes together
    fn eq(&self, other: &Self) -> bool {
        self.mask() == other.mask() && self.prefix_len() == other.prefix_len()
    }
}

pub(crate) fn mask_from_prefix_len<R>(len: u8) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 == R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len as usize)
    }
}

#[cfg(feature = "ipnet")]
impl Prefix for Ipv4Net {
    type R = u32;

    fn repr(&self) -> u32 {
        self.addr().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Ipv4Net::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u32 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn canonical(&self) -> Self {
        self.trunc()
    }

    fn last(&self) -> u32 {
        self.broadcast().into()
    }

    fn contains(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

#[cfg(feature = "ipnet")]
impl Prefix for Ipv6Net {
    type R = u128;

    fn repr(&self) -> u128 {
        self.addr().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        Ipv6Net::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u128 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn canonical(&self) -> Self {
        self.trunc()
    }

    fn last(&self) -> u128 {
        self.broadcast().into()
    }

    fn contains(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

#[cfg(feature = "ipnetwork")]
impl Prefix for Ipv4Network {
    type R = u32;

    fn repr(&self) -> u32 {
        self.ip().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Ipv4Network::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u32 {
        self.network().into()
    }
}

#[cfg(feature = "ipnetwork")]
impl Prefix for Ipv6Network {
    type R = u128;

    fn repr(&self) -> u128 {
        self.ip().into()
    }

    fn prefix_len(&self) -> u8 {
        self.prefix()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        Ipv6Network::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u128 {
        self.network().into()
    }
}

// `cidr` refuses addresses with host bits set, so the representation is masked before building.
#[cfg(feature = "cidr")]
impl Prefix for Ipv4Cidr {
    type R = u32;

    fn repr(&self) -> u32 {
        self.first_address().into()
    }

    fn prefix_len(&self) -> u8 {
        self.network_length()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        let repr = repr & mask_from_prefix_len::<u32>(len);
        Ipv4Cidr::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u32 {
        self.first_address().into()
    }

    fn canonical(&self) -> Self {
        *self
    }
}

#[cfg(feature = "cidr")]
impl Prefix for Ipv6Cidr {
    type R = u128;

    fn repr(&self) -> u128 {
        self.first_address().into()
    }

    fn prefix_len(&self) -> u8 {
        self.network_length()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        let repr = repr & mask_from_prefix_len::<u128>(len);
        Ipv6Cidr::new(repr.into(), len).unwrap()
    }

    fn eq(&self, other: &Self) -> bool {
        self == other
    }

    fn mask(&self) -> u128 {
        self.first_address().into()
    }

    fn canonical(&self) -> Self {
        *self
    }
}

impl<R> Prefix for (R, u8)
where
    R: Unsigned + PrimInt + Zero + CheckedShr,
{
    type R = R;

    fn repr(&self) -> R {
        self.0
    }

    fn prefix_len(&self) -> u8 {
        self.1
    }

    fn from_repr_len(repr: R, len: u8) -> Self {
        (repr, len)
    }

    fn eq(&self, other: &Self) -> bool {
        self.mask() == other.mask() && self.1 == other.1
    }
}
