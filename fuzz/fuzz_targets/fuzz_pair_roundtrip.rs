//! Fuzz the pair interleaving: de-interleave must invert interleave for
//! equal-length inputs, at every depth.

#![no_main]

use libfuzzer_sys::fuzz_target;

use iptally::{interleave, unpair};

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let depth_seed = data[0];
    let halves = &data[1..];
    let len = (halves.len() / 2).min(16);
    let (a1, a2) = (&halves[..len], &halves[len..2 * len]);

    let (key, key_len) = interleave(a1, a2);
    assert_eq!(key_len, 2 * len);

    let bits = key_len * 8;
    let depth = usize::from(depth_seed) % (bits + 1);
    let (out1, d1, out2, d2) = unpair(&key[..key_len], depth);
    assert_eq!(&out1[..len], a1);
    assert_eq!(&out2[..len], a2);
    assert_eq!(d1 + d2, depth);
    assert!(d1 == d2 || d1 == d2 + 1);
});
