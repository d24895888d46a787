use either::Either;
#[cfg(any(feature = "ipnet", feature = "ipnetwork", feature = "cidr"))]
use either::{Left, Right};

use crate::Prefix;

/// Trait that defines a joint prefix, for instance, one that describes either a IPv4 or IPv6
/// prefix. It also tells how a single address of either family is split up.
pub trait JointPrefix {
    /// The first prefix type, e.g., IPv4
    type P1: Prefix + Clone;
    /// The second prefix type, e.g., IPv6
    type P2: Prefix + Clone;
    /// A single address of either family, e.g., [`std::net::IpAddr`].
    type Addr;

    /// Get either `Left(P1)` or `Right(P2)`.
    fn p1_or_p2(self) -> Either<Self::P1, Self::P2>;

    /// Get either `Left(P1)` or `Right(P2)`, as a reference.
    fn p1_or_p2_ref(&self) -> Either<&Self::P1, &Self::P2>;

    /// Split an address into the representation of the first or the second family.
    fn addr_p1_or_p2(
        addr: Self::Addr,
    ) -> Either<<Self::P1 as Prefix>::R, <Self::P2 as Prefix>::R>;

    /// Construct a prefix from a reference to the first variant.
    fn from_p1(p: &Self::P1) -> Self;

    /// Construct a prefix from a reference to the second variant.
    fn from_p2(p: &Self::P2) -> Self;
}

#[cfg(any(feature = "ipnet", feature = "ipnetwork", feature = "cidr"))]
macro_rules! impl_joint_prefix {
    ($t:ident, $p1:ty, $p2:ty) => {
        impl JointPrefix for $t {
            type P1 = $p1;
            type P2 = $p2;
            type Addr = std::net::IpAddr;

            fn p1_or_p2(self) -> Either<$p1, $p2> {
                match self {
                    $t::V4(p) => Left(p),
                    $t::V6(p) => Right(p),
                }
            }

            fn p1_or_p2_ref(&self) -> Either<&$p1, &$p2> {
                match self {
                    $t::V4(p) => Left(p),
                    $t::V6(p) => Right(p),
                }
            }

            fn addr_p1_or_p2(addr: std::net::IpAddr) -> Either<u32, u128> {
                match addr {
                    std::net::IpAddr::V4(a) => Left(a.into()),
                    std::net::IpAddr::V6(a) => Right(a.into()),
                }
            }

            fn from_p1(p: &$p1) -> Self {
                $t::V4(*p)
            }

            fn from_p2(p: &$p2) -> Self {
                $t::V6(*p)
            }
        }
    };
}

#[cfg(feature = "ipnet")]
use ipnet::IpNet;
#[cfg(feature = "ipnet")]
impl_joint_prefix!(IpNet, ipnet::Ipv4Net, ipnet::Ipv6Net);

#[cfg(feature = "ipnetwork")]
use ipnetwork::IpNetwork;
#[cfg(feature = "ipnetwork")]
impl_joint_prefix!(IpNetwork, ipnetwork::Ipv4Network, ipnetwork::Ipv6Network);

#[cfg(feature = "cidr")]
use cidr::IpCidr;
#[cfg(feature = "cidr")]
impl_joint_prefix!(IpCidr, cidr::Ipv4Cidr, cidr::Ipv6Cidr);
