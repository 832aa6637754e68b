//! Joint (source, destination) address counting.
//!
//! [`PairTally`] reuses the core tree unchanged at double width: the two
//! addresses of a pair are interleaved bit by bit into one 32-byte key, so
//! a single prune policy degrades both sides of the pair together. Bit `2i`
//! of the key is bit `i` of the first address, bit `2i + 1` is bit `i` of
//! the second.
//!
//! Histogram entries from a pair tree carry interleaved keys; [`unpair`]
//! inverts the mapping for display, splitting an interleaved depth `d` into
//! `ceil(d / 2)` leading bits of the first address and `floor(d / 2)` of
//! the second.

use std::io;
use std::net::IpAddr;

use crate::addr::{self, ADDR_BYTES, PAIR_ADDR_BYTES};
use crate::histogram::HistogramEntry;
use crate::tree::{PrefixTally, TallyStats};
use crate::weight::Weight;

/// Interleave two equal-length addresses into one doubled-width key.
///
/// Returns the key buffer and its significant length in bytes (`2 * len`).
/// Inputs longer than 16 bytes are clamped.
pub fn interleave(a1: &[u8], a2: &[u8]) -> ([u8; PAIR_ADDR_BYTES], usize) {
    debug_assert_eq!(a1.len(), a2.len());
    let len = a1.len().min(a2.len()).min(ADDR_BYTES);
    let mut key = [0u8; PAIR_ADDR_BYTES];
    for i in 0..len * 8 {
        if addr::bit_at(a1, i) {
            addr::set_bit(&mut key, 2 * i);
        }
        if addr::bit_at(a2, i) {
            addr::set_bit(&mut key, 2 * i + 1);
        }
    }
    (key, 2 * len)
}

/// De-interleave a pair key observed at `depth` interleaved bits.
///
/// Returns `(a1, depth1, a2, depth2)` where `depth1 = ceil(depth / 2)` and
/// `depth2 = floor(depth / 2)`.
pub fn unpair(key: &[u8], depth: usize) -> ([u8; ADDR_BYTES], usize, [u8; ADDR_BYTES], usize) {
    let mut a1 = [0u8; ADDR_BYTES];
    let mut a2 = [0u8; ADDR_BYTES];
    for i in 0..key.len() * 8 / 2 {
        if addr::bit_at(key, 2 * i) {
            addr::set_bit(&mut a1, i);
        }
        if addr::bit_at(key, 2 * i + 1) {
            addr::set_bit(&mut a2, i);
        }
    }
    (a1, depth.div_ceil(2), a2, depth / 2)
}

/// Render an interleaved prefix as `"<a1 prefix> <a2 prefix>"`.
pub fn pair_str(key: &[u8], depth: usize) -> String {
    let (a1, depth1, a2, depth2) = unpair(key, depth);
    format!(
        "{} {}",
        addr::prefix_str(&a1, depth1),
        addr::prefix_str(&a2, depth2)
    )
}

/// A bounded tally of joint (src, dst) address prefixes.
///
/// Like the base tree, not `Clone`.
pub struct PairTally<W: Weight = u64> {
    tree: PrefixTally<W, PAIR_ADDR_BYTES>,
}

impl<W: Weight> PairTally<W> {
    /// Create an empty pair tally tolerating at most `max_nodes` nodes.
    pub fn new(max_nodes: usize) -> Self {
        Self {
            tree: PrefixTally::new(max_nodes),
        }
    }

    /// Tally `w` against the interleaved pair `(a1, a2)`. The addresses
    /// must be the same length (both 4-byte IPv4 or both 16-byte forms).
    pub fn add_pair(&mut self, a1: &[u8], a2: &[u8], w: W) {
        let (key, len) = interleave(a1, a2);
        self.tree.add(&key[..len], w);
    }

    /// Tally `w` against an IP address pair. A same-family IPv4 pair uses
    /// the compact 4-byte keys; anything else embeds both sides into the
    /// 16-byte canonical form.
    pub fn add_ip_pair(&mut self, a1: IpAddr, a2: IpAddr, w: W) {
        match (a1, a2) {
            (IpAddr::V4(v1), IpAddr::V4(v2)) => self.add_pair(&v1.octets(), &v2.octets(), w),
            _ => {
                let e1 = embed(a1);
                let e2 = embed(a2);
                self.add_pair(&e1, &e2, w);
            }
        }
    }

    /// Number of live non-root nodes.
    pub fn size(&self) -> usize {
        self.tree.size()
    }

    /// Total weight ever added.
    pub fn sum(&self) -> W {
        self.tree.sum()
    }

    /// Counter snapshot.
    pub fn stats(&self) -> TallyStats {
        self.tree.stats()
    }

    /// Collapse the least informative terminal pair. See
    /// [`PrefixTally::prune`].
    pub fn prune(&mut self) -> usize {
        self.tree.prune()
    }

    /// See [`PrefixTally::prune_if_greater`].
    pub fn prune_if_greater(&mut self, limit: usize) {
        self.tree.prune_if_greater(limit)
    }

    /// Append histogram entries with interleaved keys. Entries past 128
    /// interleaved bits (64 per address) are truncated by the walker's
    /// depth cap.
    pub fn get_histogram(&self, out: &mut Vec<HistogramEntry<W, PAIR_ADDR_BYTES>>) {
        self.tree.get_histogram(out)
    }

    /// The histogram as a fresh vector.
    pub fn histogram(&self) -> Vec<HistogramEntry<W, PAIR_ADDR_BYTES>> {
        self.tree.histogram()
    }

    /// Whether anything has been added since the last `mark_clean`.
    pub fn is_dirty(&self) -> bool {
        self.tree.is_dirty()
    }

    /// Clear every dirty flag.
    pub fn mark_clean(&mut self) {
        self.tree.mark_clean()
    }

    /// Write the histogram as text, one de-interleaved
    /// `<a1> <a2>  count=<c>` line per entry.
    pub fn dump<Out: io::Write>(&self, out: &mut Out) -> io::Result<()> {
        let hist = self.histogram();
        writeln!(out, "nodes: {}  histogram size: {}", self.size(), hist.len())?;
        for entry in &hist {
            writeln!(
                out,
                "{}  count={}",
                pair_str(entry.addr(), entry.depth()),
                entry.count()
            )?;
        }
        Ok(())
    }

    /// Write cache statistics as text.
    pub fn dump_stats<Out: io::Write>(&self, out: &mut Out) -> io::Result<()> {
        self.tree.dump_stats(out)
    }

    /// Verify structural invariants; see [`PrefixTally::check_invariants`].
    pub fn check_invariants(&self) -> Result<(), String> {
        self.tree.check_invariants()
    }
}

fn embed(ip: IpAddr) -> [u8; ADDR_BYTES] {
    match ip {
        IpAddr::V4(v4) => addr::embed_ipv4(v4),
        IpAddr::V6(v6) => v6.octets(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interleave_known_bits() {
        // a1 = 0b1000_0000, a2 = 0b0100_0000: key bits 0 (from a1) and 3
        // (from a2, bit 1 -> position 2*1+1).
        let (key, len) = interleave(&[0b1000_0000], &[0b0100_0000]);
        assert_eq!(len, 2);
        assert_eq!(key[0], 0b1001_0000);
        assert_eq!(key[1], 0);
    }

    #[test]
    fn test_unpair_inverts_interleave() {
        let a1 = [0x12u8, 0x34, 0x56, 0x78];
        let a2 = [0x9Au8, 0xBC, 0xDE, 0xF0];
        let (key, len) = interleave(&a1, &a2);
        let (out1, d1, out2, d2) = unpair(&key[..len], len * 8);
        assert_eq!(&out1[..4], &a1);
        assert_eq!(&out2[..4], &a2);
        assert_eq!(out1[4..], [0u8; 12]);
        assert_eq!(d1, 32);
        assert_eq!(d2, 32);
    }

    #[test]
    fn test_unpair_depth_split() {
        let key = [0u8; 32];
        assert_eq!(unpair(&key, 0).1, 0);
        assert_eq!(unpair(&key, 0).3, 0);
        assert_eq!(unpair(&key, 7).1, 4);
        assert_eq!(unpair(&key, 7).3, 3);
        assert_eq!(unpair(&key, 64).1, 32);
        assert_eq!(unpair(&key, 64).3, 32);
    }

    #[test]
    fn test_add_pair_counts() {
        let mut pairs: PairTally = PairTally::new(1_000_000);
        pairs.add_pair(&[1, 2, 3, 4], &[5, 6, 7, 8], 1);
        assert_eq!(pairs.size(), 64);
        assert_eq!(pairs.sum(), 1);

        let hist = pairs.histogram();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].depth(), 64);
        assert_eq!(
            pair_str(hist[0].addr(), hist[0].depth()),
            "1.2.3.4 5.6.7.8"
        );
        pairs.check_invariants().unwrap();
    }

    #[test]
    fn test_pair_dump_format() {
        let mut pairs: PairTally = PairTally::new(1_000_000);
        pairs.add_pair(&[1, 2, 3, 4], &[5, 6, 7, 8], 1);
        let mut buf = Vec::new();
        pairs.dump(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "nodes: 64  histogram size: 1\n1.2.3.4 5.6.7.8  count=1\n"
        );
    }

    #[test]
    fn test_add_ip_pair_mixed_families() {
        let mut pairs: PairTally = PairTally::new(1_000_000);
        pairs.add_ip_pair(
            "1.2.3.4".parse().unwrap(),
            "2001:db8::1".parse().unwrap(),
            1,
        );
        // Both sides embedded at 16 bytes: a 256-bit interleaved key.
        assert_eq!(pairs.size(), 256);
        assert_eq!(pairs.sum(), 1);
    }

    #[test]
    fn test_pair_prune_preserves_sum() {
        let mut pairs: PairTally = PairTally::new(1_000_000);
        pairs.add_pair(&[1, 2, 3, 4], &[5, 6, 7, 8], 3);
        pairs.add_pair(&[1, 2, 3, 4], &[5, 6, 7, 9], 2);
        assert_eq!(pairs.prune(), 1);
        assert_eq!(pairs.sum(), 5);
        pairs.check_invariants().unwrap();
    }

    #[test]
    fn test_deep_pair_histogram_truncates() {
        let mut pairs: PairTally = PairTally::new(1_000_000);
        let a1 = [0xFFu8; 16];
        let a2 = [0x0Fu8; 16];
        pairs.add_ip_pair(a1.into(), a2.into(), 1);
        assert_eq!(pairs.size(), 256);
        // The leaf sits at depth 256, past the walker's cap: nothing with a
        // nonzero count is visible, but the total is still intact.
        assert!(pairs.histogram().is_empty());
        assert_eq!(pairs.sum(), 1);
    }
}
