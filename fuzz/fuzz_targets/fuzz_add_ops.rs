//! Fuzz the tally with an arbitrary stream of add/prune operations and
//! check that conservation, the node ceiling, and structural coherence all
//! survive.

#![no_main]

use libfuzzer_sys::fuzz_target;

use iptally::IpTally;

fuzz_target!(|data: &[u8]| {
    let mut tree = IpTally::new(64);
    let mut expected: u64 = 0;

    let mut input = data;
    while let Some((&op, rest)) = input.split_first() {
        input = rest;
        match op % 4 {
            0 => {
                // 4-byte add
                if input.len() < 5 {
                    break;
                }
                let (addr, rest) = input.split_at(4);
                let w = u64::from(rest[0]) + 1;
                input = &rest[1..];
                tree.add(addr, w);
                expected = expected.wrapping_add(w);
            }
            1 => {
                // 16-byte add
                if input.len() < 17 {
                    break;
                }
                let (addr, rest) = input.split_at(16);
                let w = u64::from(rest[0]) + 1;
                input = &rest[1..];
                tree.add(addr, w);
                expected = expected.wrapping_add(w);
            }
            2 => {
                tree.prune();
            }
            _ => {
                tree.prune_if_greater(64);
            }
        }
    }

    assert_eq!(tree.sum(), expected);
    tree.prune_if_greater(64);
    assert!(tree.size() <= 64);
    if let Err(violation) = tree.check_invariants() {
        panic!("{violation}");
    }

    let total: u64 = tree
        .histogram()
        .iter()
        .fold(0u64, |acc, e| acc.wrapping_add(e.count()));
    assert_eq!(total, expected);
});
