//! Histogram entries emitted by the tree walk.
//!
//! An entry is a `(prefix bytes, depth in bits, count)` triple. Terminal
//! nodes contribute the tallies of collapsed prefixes; interior nodes with
//! a nonzero local count contribute the weight of short keys added directly
//! at that prefix length.

use std::fmt;

use ipnet::IpNet;

use crate::addr::{self, ADDR_BYTES};
use crate::weight::Weight;

/// One histogram row: the prefix identified by the leading `depth` bits of
/// `addr`, and the weight tallied at exactly that prefix.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct HistogramEntry<W = u64, const N: usize = ADDR_BYTES> {
    addr: [u8; N],
    depth: u16,
    count: W,
}

impl<W: Weight, const N: usize> HistogramEntry<W, N> {
    pub(crate) fn new(addr: [u8; N], depth: usize, count: W) -> Self {
        debug_assert!(depth <= u16::MAX as usize);
        Self {
            addr,
            depth: depth as u16,
            count,
        }
    }

    /// The full-width address buffer; bits past `depth` are zero.
    pub fn addr(&self) -> &[u8; N] {
        &self.addr
    }

    /// Prefix depth in bits.
    pub fn depth(&self) -> usize {
        self.depth as usize
    }

    pub fn count(&self) -> W {
        self.count
    }

    /// Whether the entry is an embedded IPv4 prefix.
    pub fn is_ipv4(&self) -> bool {
        addr::is_ipv4_embedded(&self.addr)
    }

    /// Textual form of the prefix, e.g. `10.0.0.0/8` or `2001:db8::/32`.
    pub fn prefix_str(&self) -> String {
        addr::prefix_str(&self.addr, self.depth())
    }
}

impl<W: Weight> HistogramEntry<W, ADDR_BYTES> {
    /// The entry's prefix as an [`IpNet`], for callers that want a typed
    /// network rather than text.
    pub fn to_net(&self) -> IpNet {
        addr::prefix_net(&self.addr, self.depth())
    }
}

impl<W: Weight, const N: usize> fmt::Display for HistogramEntry<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix_str())
    }
}

impl<W: Weight, const N: usize> fmt::Debug for HistogramEntry<W, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HistogramEntry {{ addr: 0x{}, depth: {}, count: {} }}",
            hex::encode(self.addr),
            self.depth,
            self.count
        )
    }
}
