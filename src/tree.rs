//! The memory-bounded radix tally.
//!
//! [`PrefixTally`] counts weights against bit-level address prefixes while
//! keeping the number of live nodes under a configured ceiling. Every `add`
//! descends from the root one key bit at a time, creating nodes lazily, and
//! bumps the node at the full key depth. When the node count reaches the
//! ceiling, terminal siblings are folded into their parent, trading prefix
//! resolution for space; the total weight is preserved exactly across any
//! number of prunes.
//!
//! Nodes live in an arena indexed by [`NodeId`], with freed slots recycled
//! through a free list. The structure is single-threaded by design: no
//! operation takes a lock, and a multi-producer pipeline should shard trees
//! per thread and merge histograms afterwards.

use std::io;
use std::net::IpAddr;

use crate::addr::{self, ADDR_BYTES};
use crate::cache::AddrCache;
use crate::histogram::HistogramEntry;
use crate::node::{Node, NodeId};
use crate::weight::Weight;

/// Depth (in bits) past which the histogram walk stops descending.
///
/// Base-tree keys never exceed 128 bits, so the cap only binds for the
/// pair tree, whose 256-bit keys truncate at 64 bits per interleaved
/// address.
pub const MAX_HISTOGRAM_DEPTH: usize = 128;

/// The base tally: 16-byte canonical addresses, `u64` weights.
pub type IpTally = PrefixTally<u64, ADDR_BYTES>;

/// Counter snapshot returned by [`PrefixTally::stats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TallyStats {
    /// Insertion-path cache hits.
    pub cache_hits: u64,
    /// Insertion-path cache misses.
    pub cache_misses: u64,
    /// Nodes created by `add` descents.
    pub added: u64,
    /// Nodes removed by pruning.
    pub pruned: u64,
}

/// A memory-bounded binary radix counter over fixed-width byte keys.
///
/// `W` is the weight type (see [`Weight`]); `N` is the key width in bytes.
/// The tree is deliberately not `Clone`: nodes are identified by their
/// position and parent back-links make duplication meaningless.
pub struct PrefixTally<W: Weight = u64, const N: usize = ADDR_BYTES> {
    arena: Vec<Node<W>>,
    free: Vec<NodeId>,
    node_count: usize,
    max_nodes: usize,
    added: u64,
    pruned: u64,
    cache: AddrCache<N>,
}

impl<W: Weight, const N: usize> PrefixTally<W, N> {
    /// Create an empty tree tolerating at most `max_nodes` non-root nodes.
    pub fn new(max_nodes: usize) -> Self {
        Self {
            arena: vec![Node::detached()],
            free: Vec::new(),
            node_count: 0,
            max_nodes,
            added: 0,
            pruned: 0,
            cache: AddrCache::new(),
        }
    }

    /// Number of live non-root nodes.
    pub fn size(&self) -> usize {
        self.node_count
    }

    /// The configured node ceiling.
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Total weight ever added: the root's subtree sum, preserved exactly
    /// across pruning.
    pub fn sum(&self) -> W {
        self.subtree_sum(NodeId::ROOT)
    }

    /// Counter snapshot.
    pub fn stats(&self) -> TallyStats {
        TallyStats {
            cache_hits: self.cache.hits(),
            cache_misses: self.cache.misses(),
            added: self.added,
            pruned: self.pruned,
        }
    }

    /// Tally `w` against the key in `addr`.
    ///
    /// The key is the whole slice; slices longer than `N` bytes are clamped
    /// to the leading `N`. An empty slice tallies at the root. IPv4 keys
    /// are passed as their 4 octets, IPv6 as all 16.
    pub fn add(&mut self, addr: &[u8], w: W) {
        self.prune_if_greater(self.max_nodes);

        let len = addr.len().min(N);
        let key = &addr[..len];
        let bits = len * 8;

        if let Some(id) = self.cache.lookup(key) {
            self.bump(id, w);
            return;
        }

        let mut cur = NodeId::ROOT;
        for depth in 0..bits {
            let bit = addr::bit_at(key, depth);
            cur = match self.node(cur).child(bit) {
                Some(next) => next,
                None => {
                    let child = self.alloc(cur);
                    self.node_mut(cur).set_child(bit, child);
                    child
                }
            };
        }
        self.bump(cur, w);
        self.cache.insert(key, cur);
    }

    /// Collapse the least informative terminal pair (or lone terminal
    /// child) into its parent. Returns the number of nodes collapsed: 1,
    /// or 0 when nothing is prunable.
    pub fn prune(&mut self) -> usize {
        if self.node(NodeId::ROOT).is_terminal() {
            return 0;
        }
        match self.best_to_prune(NodeId::ROOT, 0) {
            Some((victim, _depth)) => {
                self.collapse(victim);
                1
            }
            None => 0,
        }
    }

    /// If the node count has reached `limit`, prune until it drops to 90%
    /// of the ceiling (slack against thrashing) or nothing is prunable.
    pub fn prune_if_greater(&mut self, limit: usize) {
        if self.node_count >= limit {
            let target = self.max_nodes * 9 / 10;
            while self.node_count > target {
                if self.prune() == 0 {
                    break;
                }
            }
        }
    }

    /// Append one entry per node with a nonzero local count, preorder,
    /// 0-child before 1-child.
    pub fn get_histogram(&self, out: &mut Vec<HistogramEntry<W, N>>) {
        self.walk(NodeId::ROOT, 0, [0u8; N], out);
    }

    /// The histogram as a fresh vector.
    pub fn histogram(&self) -> Vec<HistogramEntry<W, N>> {
        let mut out = Vec::new();
        self.get_histogram(&mut out);
        out
    }

    /// Whether anything has been added since the last [`mark_clean`].
    ///
    /// [`mark_clean`]: PrefixTally::mark_clean
    pub fn is_dirty(&self) -> bool {
        self.node(NodeId::ROOT).dirty()
    }

    /// Clear every dirty flag. Callers that dump histograms periodically
    /// pair this with [`is_dirty`](PrefixTally::is_dirty) to skip
    /// traversals when nothing changed.
    pub fn mark_clean(&mut self) {
        for node in &mut self.arena {
            node.set_dirty(false);
        }
    }

    /// Write the histogram as text: a header line, then one
    /// `<prefix>  count=<c>` line per entry.
    pub fn dump<Out: io::Write>(&self, out: &mut Out) -> io::Result<()> {
        let hist = self.histogram();
        writeln!(out, "nodes: {}  histogram size: {}", self.node_count, hist.len())?;
        for entry in &hist {
            writeln!(out, "{}  count={}", entry, entry.count())?;
        }
        Ok(())
    }

    /// Write cache statistics as text.
    pub fn dump_stats<Out: io::Write>(&self, out: &mut Out) -> io::Result<()> {
        writeln!(out, "cache_hits: {}", self.cache.hits())?;
        writeln!(out, "cache_misses: {}", self.cache.misses())?;
        Ok(())
    }

    /// Verify structural invariants, returning a description of the first
    /// violation found. Intended for tests and fuzzing; it walks the whole
    /// tree and is not cheap.
    ///
    /// Checked: parent/child link symmetry, the node count, free-list
    /// disjointness, terminal correctness (childless non-root nodes carry
    /// weight), and cache coherence (every occupied slot is reachable from
    /// the root by its own key bits).
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut seen = vec![false; self.arena.len()];
        let mut stack = vec![(NodeId::ROOT, None::<NodeId>)];
        let mut live = 0usize;

        while let Some((id, parent)) = stack.pop() {
            if seen[id.index()] {
                return Err(format!("{id:?} reachable through two parents"));
            }
            seen[id.index()] = true;

            let node = self.node(id);
            if node.parent() != parent {
                return Err(format!(
                    "{id:?} parent link {:?} does not match walk parent {parent:?}",
                    node.parent()
                ));
            }
            if id != NodeId::ROOT {
                live += 1;
                if node.children_count() == 0 && node.local().is_zero() {
                    return Err(format!("childless {id:?} has zero count"));
                }
            }
            if let Some(c) = node.child0() {
                stack.push((c, Some(id)));
            }
            if let Some(c) = node.child1() {
                stack.push((c, Some(id)));
            }
        }

        if live != self.node_count {
            return Err(format!(
                "node_count {} but {live} reachable non-root nodes",
                self.node_count
            ));
        }
        for id in &self.free {
            if seen[id.index()] {
                return Err(format!("freed {id:?} still reachable"));
            }
        }
        for (key, id) in self.cache.entries() {
            if !seen[id.index()] {
                return Err(format!("cache slot holds unreachable {id:?}"));
            }
            let mut cur = NodeId::ROOT;
            for depth in 0..key.len() * 8 {
                match self.node(cur).child(addr::bit_at(key, depth)) {
                    Some(next) => cur = next,
                    None => {
                        return Err(format!(
                            "cache key 0x{} dead-ends at bit {depth}",
                            hex::encode(key)
                        ))
                    }
                }
            }
            if cur != id {
                return Err(format!(
                    "cache key 0x{} resolves to {cur:?}, slot holds {id:?}",
                    hex::encode(key)
                ));
            }
        }
        Ok(())
    }

    fn node(&self, id: NodeId) -> &Node<W> {
        &self.arena[id.index()]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<W> {
        &mut self.arena[id.index()]
    }

    fn subtree_sum(&self, id: NodeId) -> W {
        let node = self.node(id);
        let mut sum = node.local();
        if let Some(c) = node.child0() {
            sum = sum.add(self.subtree_sum(c));
        }
        if let Some(c) = node.child1() {
            sum = sum.add(self.subtree_sum(c));
        }
        sum
    }

    fn alloc(&mut self, parent: NodeId) -> NodeId {
        let id = match self.free.pop() {
            Some(id) => {
                self.arena[id.index()] = Node::with_parent(parent);
                id
            }
            None => {
                let id = NodeId::from_index(self.arena.len());
                self.arena.push(Node::with_parent(parent));
                id
            }
        };
        self.node_count += 1;
        self.added += 1;
        id
    }

    /// Add weight at a node and mark it and its ancestors dirty. The
    /// upward walk stops at the first already-dirty node: a dirty node's
    /// ancestors are dirty too, since flags are only cleared all at once.
    fn bump(&mut self, id: NodeId, w: W) {
        self.node_mut(id).absorb(w);
        let mut cur = id;
        loop {
            let node = self.node_mut(cur);
            if node.dirty() {
                break;
            }
            node.set_dirty(true);
            match node.parent() {
                Some(parent) => cur = parent,
                None => break,
            }
        }
    }

    /// Find the best node to collapse, starting from a non-terminal `id`.
    ///
    /// A candidate is a node all of whose present children are terminal;
    /// collapsing it folds those children into the node. Of two candidates
    /// the one with the smaller subtree sum loses less information; ties
    /// prefer the deeper one, and a remaining tie resolves to the 1-side.
    /// Returns `None` when the subtree holds no candidate (possible when
    /// zero-weight adds leave childless zero-count nodes).
    fn best_to_prune(&self, id: NodeId, depth: usize) -> Option<(NodeId, usize)> {
        let node = self.node(id);
        debug_assert!(!node.is_terminal());

        let c0 = node.child0();
        let c1 = node.child1();
        let term0 = c0.is_some_and(|c| self.node(c).is_terminal());
        let term1 = c1.is_some_and(|c| self.node(c).is_terminal());

        match (c0, c1) {
            (None, None) => None,
            (Some(_), None) if term0 => Some((id, depth)),
            (None, Some(_)) if term1 => Some((id, depth)),
            (Some(_), Some(_)) if term0 && term1 => Some((id, depth)),
            (Some(c), None) | (None, Some(c)) => self.best_to_prune(c, depth + 1),
            (Some(_), Some(c)) if term0 => self.best_to_prune(c, depth + 1),
            (Some(c), Some(_)) if term1 => self.best_to_prune(c, depth + 1),
            (Some(c0), Some(c1)) => {
                match (
                    self.best_to_prune(c0, depth + 1),
                    self.best_to_prune(c1, depth + 1),
                ) {
                    (Some(a), Some(b)) => Some(self.better_candidate(a, b)),
                    (a, None) => a,
                    (None, b) => b,
                }
            }
        }
    }

    fn better_candidate(
        &self,
        a: (NodeId, usize),
        b: (NodeId, usize),
    ) -> (NodeId, usize) {
        let sum_a = self.subtree_sum(a.0);
        let sum_b = self.subtree_sum(b.0);
        if sum_a < sum_b {
            return a;
        }
        if sum_b < sum_a {
            return b;
        }
        if a.1 > b.1 {
            a
        } else {
            b
        }
    }

    /// Fold `id`'s children into `id`, leaving it terminal.
    fn collapse(&mut self, id: NodeId) {
        for bit in [false, true] {
            if let Some(child) = self.node(id).child(bit) {
                assert!(
                    self.node(child).is_terminal(),
                    "prune victim child must be terminal"
                );
                let w = self.node(child).local();
                self.node_mut(id).absorb(w);
                self.cache.invalidate(child);
                self.node_mut(id).clear_child(bit);
                self.arena[child.index()] = Node::detached();
                self.free.push(child);
                self.node_count -= 1;
                self.pruned += 1;
            }
        }
    }

    fn walk(
        &self,
        id: NodeId,
        depth: usize,
        prefix: [u8; N],
        out: &mut Vec<HistogramEntry<W, N>>,
    ) {
        let node = self.node(id);
        if !node.local().is_zero() {
            out.push(HistogramEntry::new(prefix, depth, node.local()));
        }
        if depth > MAX_HISTOGRAM_DEPTH || depth >= N * 8 {
            return;
        }
        if let Some(c) = node.child0() {
            self.walk(c, depth + 1, prefix, out);
        }
        if let Some(c) = node.child1() {
            let mut prefix1 = prefix;
            addr::set_bit(&mut prefix1, depth);
            self.walk(c, depth + 1, prefix1, out);
        }
    }
}

impl<W: Weight> PrefixTally<W, ADDR_BYTES> {
    /// Tally `w` against an IP address, embedding IPv4 as a 4-byte key.
    pub fn add_ip(&mut self, ip: IpAddr, w: W) {
        match ip {
            IpAddr::V4(v4) => self.add(&v4.octets(), w),
            IpAddr::V6(v6) => self.add(&v6.octets(), w),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v4(a: u8, b: u8, c: u8, d: u8) -> [u8; 4] {
        [a, b, c, d]
    }

    #[test]
    fn test_empty_tree() {
        let mut tree = IpTally::new(1000);
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.sum(), 0);
        assert_eq!(tree.prune(), 0);
        assert!(tree.histogram().is_empty());
        assert!(!tree.is_dirty());
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_single_address_repeated() {
        let mut tree = IpTally::new(1000);
        for _ in 0..4 {
            tree.add(&v4(1, 2, 3, 4), 1);
        }
        assert_eq!(tree.size(), 32);
        assert_eq!(tree.sum(), 4);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].depth(), 32);
        assert_eq!(hist[0].count(), 4);
        assert_eq!(hist[0].prefix_str(), "1.2.3.4");

        let stats = tree.stats();
        assert!(stats.cache_hits >= 3);
        assert_eq!(stats.added, 32);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_zero_length_key_tallies_root() {
        let mut tree = IpTally::new(1000);
        tree.add(&[], 5);
        assert_eq!(tree.size(), 0);
        assert_eq!(tree.sum(), 5);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].depth(), 0);
        assert_eq!(hist[0].count(), 5);
    }

    #[test]
    fn test_long_key_clamped() {
        let mut tree = IpTally::new(10_000);
        let long = [0xABu8; 20];
        tree.add(&long, 1);
        assert_eq!(tree.size(), 128);
        tree.add(&[0xABu8; 16], 1);
        assert_eq!(tree.size(), 128);
        assert_eq!(tree.sum(), 2);
    }

    #[test]
    fn test_sibling_split() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(1, 2, 3, 4), 1);
        tree.add(&v4(1, 2, 3, 5), 1);
        // 31 shared path nodes plus two leaves.
        assert_eq!(tree.size(), 33);
        assert_eq!(tree.sum(), 2);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 2);
        assert!(hist.iter().all(|e| e.depth() == 32));
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_prune_folds_lone_terminal_child() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(1, 2, 3, 4), 7);
        assert_eq!(tree.prune(), 1);
        assert_eq!(tree.size(), 31);
        assert_eq!(tree.sum(), 7);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].depth(), 31);
        assert_eq!(hist[0].prefix_str(), "1.2.3.4/31");
        assert_eq!(tree.stats().pruned, 1);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_prune_collapses_smallest_terminal_pair() {
        let mut tree = IpTally::new(1000);
        // 10.0.0.2 and 10.0.0.3 differ only in the last bit: siblings under
        // one depth-31 parent.
        tree.add(&v4(10, 0, 0, 2), 100);
        tree.add(&v4(10, 0, 0, 3), 1);
        assert_eq!(tree.size(), 33);

        assert_eq!(tree.prune(), 1);
        assert_eq!(tree.size(), 31);
        assert_eq!(tree.sum(), 101);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 1);
        assert_eq!(hist[0].depth(), 31);
        assert_eq!(hist[0].count(), 101);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_prune_prefers_lighter_branch() {
        let mut tree = IpTally::new(1000);
        // .1 and .2 differ at bit 30, so each leaf hangs alone under its own
        // depth-31 parent; the selector must pick the weight-1 side.
        tree.add(&v4(10, 0, 0, 1), 100);
        tree.add(&v4(10, 0, 0, 2), 1);

        assert_eq!(tree.prune(), 1);
        let hist = tree.histogram();
        assert!(hist
            .iter()
            .any(|e| e.depth() == 31 && e.count() == 1), "expected the light leaf folded, got {hist:?}");
        assert!(hist.iter().any(|e| e.depth() == 32 && e.count() == 100));
        assert_eq!(tree.sum(), 101);
    }

    #[test]
    fn test_prune_root_terminal_is_noop() {
        let mut tree = IpTally::new(1000);
        tree.add(&[], 3);
        assert_eq!(tree.prune(), 0);
        assert_eq!(tree.sum(), 3);
    }

    #[test]
    fn test_prune_if_greater_drains_to_target() {
        let mut tree = IpTally::new(100);
        for i in 0..64u8 {
            tree.add(&v4(i, 0, 0, 0), 1);
        }
        let before = tree.sum();
        tree.prune_if_greater(tree.size());
        assert!(tree.size() <= 90);
        assert_eq!(tree.sum(), before);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_pruned_prefix_can_regrow() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(1, 2, 3, 4), 1);
        assert_eq!(tree.prune(), 1);
        // The depth-31 node now carries the count; extending through it must
        // keep both the folded weight and the new leaf.
        tree.add(&v4(1, 2, 3, 4), 1);
        assert_eq!(tree.sum(), 2);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 2);
        assert_eq!(hist[0].depth(), 31);
        assert_eq!(hist[1].depth(), 32);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn test_zero_weight_adds_are_unprunable_not_fatal() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(9, 9, 9, 9), 0);
        assert_eq!(tree.sum(), 0);
        assert_eq!(tree.size(), 32);
        // The chain ends in a childless zero-count node: no candidate.
        assert_eq!(tree.prune(), 0);
    }

    #[test]
    fn test_dirty_tracking() {
        let mut tree = IpTally::new(1000);
        assert!(!tree.is_dirty());
        tree.add(&v4(1, 2, 3, 4), 1);
        assert!(tree.is_dirty());
        tree.mark_clean();
        assert!(!tree.is_dirty());
        // Cache-hit path must still propagate dirtiness from the leaf.
        tree.add(&v4(1, 2, 3, 4), 1);
        assert_eq!(tree.stats().cache_hits, 1);
        assert!(tree.is_dirty());
    }

    #[test]
    fn test_histogram_is_preorder_left_first() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(128, 0, 0, 1), 1);
        tree.add(&v4(1, 2, 3, 4), 1);
        tree.add(&[], 1);

        let hist = tree.histogram();
        assert_eq!(hist.len(), 3);
        assert_eq!(hist[0].depth(), 0);
        // 1.2.3.4 starts with a 0 bit, so it precedes 128.0.0.1.
        assert_eq!(hist[1].prefix_str(), "1.2.3.4");
        assert_eq!(hist[2].prefix_str(), "128.0.0.1");
    }

    #[test]
    fn test_add_ip_matches_raw_octets() {
        let mut by_ip = IpTally::new(1000);
        let mut by_bytes = IpTally::new(1000);
        by_ip.add_ip("1.2.3.4".parse().unwrap(), 2);
        by_bytes.add(&v4(1, 2, 3, 4), 2);
        assert_eq!(by_ip.histogram(), by_bytes.histogram());

        // ff02::1 leads with a 1 bit, so it shares no path with 1.2.3.4.
        by_ip.add_ip("ff02::1".parse().unwrap(), 1);
        assert_eq!(by_ip.sum(), 3);
        assert_eq!(by_ip.size(), 32 + 128);
    }

    #[test]
    fn test_dump_format() {
        let mut tree = IpTally::new(1000);
        tree.add(&v4(1, 2, 3, 4), 4);
        let mut buf = Vec::new();
        tree.dump(&mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "nodes: 32  histogram size: 1\n1.2.3.4  count=4\n"
        );

        let mut stats = Vec::new();
        tree.dump_stats(&mut stats).unwrap();
        assert_eq!(
            String::from_utf8(stats).unwrap(),
            "cache_hits: 0\ncache_misses: 1\n"
        );
    }

    #[test]
    fn test_selector_picks_global_minimum_sum() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let mut tree = IpTally::new(1_000_000);
            for _ in 0..rng.gen_range(2..40) {
                let addr = v4(rng.gen_range(0..4), 0, 0, rng.gen_range(0..16));
                tree.add(&addr, rng.gen_range(1..100u64));
            }

            // Enumerate every candidate the selector could legally pick.
            let mut candidates = Vec::new();
            let mut stack = vec![(NodeId::ROOT, 0usize)];
            while let Some((id, depth)) = stack.pop() {
                let node = tree.node(id);
                let kids: Vec<_> = [node.child0(), node.child1()]
                    .into_iter()
                    .flatten()
                    .collect();
                if !kids.is_empty()
                    && kids.iter().all(|&c| tree.node(c).is_terminal())
                {
                    candidates.push((id, depth));
                }
                for &c in &kids {
                    stack.push((c, depth + 1));
                }
            }
            if candidates.is_empty() {
                continue;
            }

            let best = tree
                .best_to_prune(NodeId::ROOT, 0)
                .expect("candidates exist");
            let best_sum = tree.subtree_sum(best.0);
            let min_sum = candidates
                .iter()
                .map(|&(id, _)| tree.subtree_sum(id))
                .min()
                .unwrap();
            assert_eq!(best_sum, min_sum, "selector missed the minimum-sum victim");

            let max_depth_at_min = candidates
                .iter()
                .filter(|&&(id, _)| tree.subtree_sum(id) == min_sum)
                .map(|&(_, d)| d)
                .max()
                .unwrap();
            assert_eq!(best.1, max_depth_at_min, "tie not broken by depth");
        }
    }
}
