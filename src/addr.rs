//! Address byte-buffer helpers.
//!
//! Keys are fixed-width byte buffers traversed MSB-first: bit 0 is the most
//! significant bit of byte 0. IPv4 addresses are embedded into the 16-byte
//! canonical form by zero-padding the trailing twelve bytes, so both
//! families share one tree.

use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};

/// Canonical address width of the base tree, in bytes.
pub const ADDR_BYTES: usize = 16;

/// Address width of the pair tree (two interleaved addresses), in bytes.
pub const PAIR_ADDR_BYTES: usize = 32;

/// Full prefix width of an IPv4 address, in bits.
pub const IPV4_BITS: usize = 32;

/// Full prefix width of an IPv6 address, in bits.
pub const IPV6_BITS: usize = 128;

/// Get bit `i` of `addr`; bit 0 is the MSB of byte 0.
#[inline]
pub fn bit_at(addr: &[u8], i: usize) -> bool {
    addr[i / 8] & (1 << (7 - (i % 8))) != 0
}

/// Set bit `i` of `addr` to 1; bit 0 is the MSB of byte 0.
#[inline]
pub fn set_bit(addr: &mut [u8], i: usize) {
    addr[i / 8] |= 1 << (7 - (i % 8));
}

/// Whether `addr` holds an embedded IPv4 address: either a bare 4-byte key,
/// or a wider key whose bytes past the fourth are all zero.
pub fn is_ipv4_embedded(addr: &[u8]) -> bool {
    addr.len() == 4 || addr[4..].iter().all(|&b| b == 0)
}

/// Render an address prefix as text.
///
/// IPv4-embedded addresses render dotted-quad, everything else as RFC 5952
/// colon-hex. A `/depth` suffix is appended unless the depth equals the
/// family's full width.
pub fn prefix_str(addr: &[u8], depth: usize) -> String {
    if is_ipv4_embedded(addr) {
        let ip = Ipv4Addr::new(addr[0], addr[1], addr[2], addr[3]);
        if depth < IPV4_BITS {
            format!("{ip}/{depth}")
        } else {
            ip.to_string()
        }
    } else {
        let mut octets = [0u8; ADDR_BYTES];
        octets.copy_from_slice(&addr[..ADDR_BYTES]);
        let ip = Ipv6Addr::from(octets);
        if depth < IPV6_BITS {
            format!("{ip}/{depth}")
        } else {
            ip.to_string()
        }
    }
}

/// Convert an address prefix to an [`IpNet`].
///
/// IPv4-embedded prefixes no deeper than 32 bits become `IpNet::V4`; the
/// rest become `IpNet::V6`. `depth` must not exceed 128, which the
/// histogram walker guarantees for base-tree entries.
pub fn prefix_net(addr: &[u8; ADDR_BYTES], depth: usize) -> IpNet {
    if is_ipv4_embedded(addr) && depth <= IPV4_BITS {
        let ip = Ipv4Addr::new(addr[0], addr[1], addr[2], addr[3]);
        IpNet::V4(Ipv4Net::new(ip, depth as u8).expect("depth bounded by IPV4_BITS"))
    } else {
        let ip = Ipv6Addr::from(*addr);
        IpNet::V6(Ipv6Net::new(ip, depth as u8).expect("depth bounded by IPV6_BITS"))
    }
}

/// Embed an IPv4 address into the canonical 16-byte form.
pub fn embed_ipv4(ip: Ipv4Addr) -> [u8; ADDR_BYTES] {
    let mut addr = [0u8; ADDR_BYTES];
    addr[..4].copy_from_slice(&ip.octets());
    addr
}
