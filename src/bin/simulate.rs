//! CLI binary for driving the tally with synthetic traffic.
//!
//! Usage:
//!   cargo run --bin simulate -- --ops 1000000 --max-nodes 10000
//!   cargo run --bin simulate -- --seed 12345 --ops 100000 --dump
//!   cargo run --bin simulate -- --pairs --ops 500000

use rand::{rngs::StdRng, Rng, SeedableRng};

use iptally::{
    check_protocol_version, IpTally, PairTally, TallyConfig, HISTOGRAM_DUMP_KEY,
    MAX_HISTOGRAM_SIZE_KEY, PROTOCOL_VERSION,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    // Stand-in for the host handing a protocol version down to the plugin.
    let protocol = parse_arg(&args, "--protocol")
        .map(|s| s.parse::<u32>().expect("invalid protocol version"))
        .unwrap_or(PROTOCOL_VERSION);
    if let Err(e) = check_protocol_version(protocol) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let seed = parse_arg(&args, "--seed")
        .map(|s| s.parse::<u64>().expect("invalid seed"))
        .unwrap_or(0);
    let ops = parse_arg(&args, "--ops")
        .map(|s| s.parse::<u64>().expect("invalid ops"))
        .unwrap_or(1_000_000);
    let max_nodes = parse_arg(&args, "--max-nodes").map(|s| s.to_string());
    let dump = args.iter().any(|a| a == "--dump");
    let pairs = args.iter().any(|a| a == "--pairs");

    // Route the ceiling through the textual config surface, the way an
    // embedding scanner would receive it.
    let config = TallyConfig::from_pairs(
        [
            max_nodes.as_deref().map(|v| (MAX_HISTOGRAM_SIZE_KEY, v)),
            dump.then_some((HISTOGRAM_DUMP_KEY, "1")),
        ]
        .into_iter()
        .flatten(),
    )
    .unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    println!("=== iptally ingest simulation ===");
    println!("Seed: {seed}");
    println!("Ops: {ops}");
    println!("Max nodes: {}", config.max_nodes);
    println!("Mode: {}", if pairs { "pair" } else { "single" });
    println!();

    let ok = if pairs {
        run_pairs(seed, ops, &config)
    } else {
        run_single(seed, ops, &config)
    };
    if !ok {
        std::process::exit(1);
    }
}

/// A bursty traffic mix: half the observations revisit a small hot set,
/// the rest are fresh addresses, one in four of them IPv6.
fn next_addr(rng: &mut StdRng, hot: &[[u8; 16]; 16]) -> ([u8; 16], usize) {
    if rng.gen_bool(0.5) {
        (hot[rng.gen_range(0..hot.len())], 4)
    } else if rng.gen_range(0..4u32) == 0 {
        let mut addr = [0u8; 16];
        rng.fill(&mut addr[..]);
        addr[0] = 0x20; // keep it out of the v4-embedded space
        (addr, 16)
    } else {
        let mut addr = [0u8; 16];
        addr[0] = rng.gen();
        addr[1] = rng.gen();
        addr[2] = rng.gen();
        addr[3] = rng.gen();
        (addr, 4)
    }
}

fn hot_set(rng: &mut StdRng) -> [[u8; 16]; 16] {
    let mut hot = [[0u8; 16]; 16];
    for addr in &mut hot {
        addr[0] = 10;
        addr[1] = rng.gen();
        addr[2] = rng.gen();
        addr[3] = rng.gen();
    }
    hot
}

fn run_single(seed: u64, ops: u64, config: &TallyConfig) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let hot = hot_set(&mut rng);
    let mut tree = IpTally::new(config.max_nodes);
    let mut expected: u64 = 0;

    for _ in 0..ops {
        let (addr, len) = next_addr(&mut rng, &hot);
        let w = rng.gen_range(1..16u64);
        tree.add(&addr[..len], w);
        expected = expected.wrapping_add(w);
    }
    tree.prune_if_greater(config.max_nodes);

    let ok = report(
        "single",
        seed,
        tree.sum(),
        expected,
        tree.size(),
        config.max_nodes,
        tree.check_invariants(),
    );

    tree.dump_stats(&mut std::io::stderr()).expect("stderr write");
    if config.histogram_dump {
        tree.dump(&mut std::io::stdout()).expect("stdout write");
    }
    ok
}

fn run_pairs(seed: u64, ops: u64, config: &TallyConfig) -> bool {
    let mut rng = StdRng::seed_from_u64(seed);
    let hot = hot_set(&mut rng);
    let mut tree: PairTally = PairTally::new(config.max_nodes);
    let mut expected: u64 = 0;

    for _ in 0..ops {
        let (src, src_len) = next_addr(&mut rng, &hot);
        let (dst, dst_len) = next_addr(&mut rng, &hot);
        let w = rng.gen_range(1..16u64);
        if src_len == 4 && dst_len == 4 {
            tree.add_pair(&src[..4], &dst[..4], w);
        } else {
            tree.add_pair(&src, &dst, w);
        }
        expected = expected.wrapping_add(w);
    }
    tree.prune_if_greater(config.max_nodes);

    let ok = report(
        "pair",
        seed,
        tree.sum(),
        expected,
        tree.size(),
        config.max_nodes,
        tree.check_invariants(),
    );

    tree.dump_stats(&mut std::io::stderr()).expect("stderr write");
    if config.histogram_dump {
        tree.dump(&mut std::io::stdout()).expect("stdout write");
    }
    ok
}

fn report(
    mode: &str,
    seed: u64,
    sum: u64,
    expected: u64,
    size: usize,
    max_nodes: usize,
    invariants: Result<(), String>,
) -> bool {
    let mut ok = true;
    if sum != expected {
        println!("[FAIL] {mode} seed {seed}: sum {sum} != expected {expected}");
        ok = false;
    }
    if size > max_nodes {
        println!("[FAIL] {mode} seed {seed}: size {size} exceeds ceiling {max_nodes}");
        ok = false;
    }
    if let Err(violation) = invariants {
        println!("[FAIL] {mode} seed {seed}: {violation}");
        ok = false;
    }
    if ok {
        println!("[PASS] {mode} seed {seed}: sum={sum} nodes={size}");
    }
    ok
}

fn parse_arg<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}

fn print_usage() {
    println!("iptally ingest simulation");
    println!();
    println!("USAGE:");
    println!("  simulate [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --seed <N>        RNG seed (default: 0)");
    println!("  --ops <N>         Observations to ingest (default: 1000000)");
    println!("  --max-nodes <N>   Node ceiling (default: 1000000)");
    println!("  --pairs           Drive the (src, dst) pair tree");
    println!("  --dump            Dump the histogram to stdout at shutdown");
    println!("  --protocol <N>    Announce a host protocol version");
    println!("  --help            Show this message");
}
