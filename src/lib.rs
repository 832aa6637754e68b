//! # iptally
//!
//! A memory-bounded binary radix counter over IP addresses.
//!
//! The tally ingests `(address, weight)` observations one at a time and
//! maintains per-prefix counts in a bit-level trie whose node count never
//! exceeds a configured ceiling. Under pressure the tree sheds resolution:
//! the least informative terminal siblings are folded into their parent,
//! so totals are preserved exactly while fine-grained prefixes coarsen.
//! A single pass over hundreds of millions of observations runs in bounded
//! memory and ends with a `(prefix, depth, count)` histogram.
//!
//! Key properties:
//!
//! - **Conservation**: `sum()` always equals the total weight ever added,
//!   across any number of prunes
//! - **Bounded size**: the live node count obeys the ceiling after every
//!   `prune_if_greater`
//! - **Amortized-constant insertion**: a four-slot insertion-path cache
//!   short-circuits repeated hits on the same address
//! - **One tree, both families**: IPv4 keys are zero-padded into the
//!   16-byte canonical form alongside IPv6
//!
//! The pair variant ([`PairTally`]) interleaves two addresses bit by bit
//! into a 32-byte key, counting joint (src, dst) prefixes with the same
//! core.
//!
//! Trees are single-threaded by contract: shard per thread and merge
//! histograms downstream if you need parallel ingest.
//!
//! ## Example
//!
//! ```
//! use iptally::IpTally;
//!
//! let mut tally = IpTally::new(10_000);
//! tally.add(&[10, 0, 0, 1], 1);
//! tally.add(&[10, 0, 0, 2], 1);
//!
//! assert_eq!(tally.sum(), 2);
//! for entry in tally.histogram() {
//!     println!("{}  count={}", entry, entry.count());
//! }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod addr;
mod cache;
mod config;
mod error;
mod histogram;
mod node;
mod pair;
mod tree;
mod weight;

pub use addr::{
    bit_at, embed_ipv4, is_ipv4_embedded, prefix_net, prefix_str, set_bit, ADDR_BYTES,
    IPV4_BITS, IPV6_BITS, PAIR_ADDR_BYTES,
};
pub use cache::CACHE_SIZE;
pub use config::{
    check_protocol_version, TallyConfig, DEFAULT_MAX_HISTOGRAM_SIZE, HISTOGRAM_DUMP_KEY,
    MAX_HISTOGRAM_SIZE_KEY, PROTOCOL_VERSION,
};
pub use error::{Result, TallyError};
pub use histogram::HistogramEntry;
pub use node::{Node, NodeId};
pub use pair::{interleave, pair_str, unpair, PairTally};
pub use tree::{IpTally, PrefixTally, TallyStats, MAX_HISTOGRAM_DEPTH};
pub use weight::Weight;

/// Re-export the prefix type for convenience.
pub use ipnet::IpNet;
