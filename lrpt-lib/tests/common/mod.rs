#![allow(dead_code)]

use lrpt::deframing::{BASE_LEN, BRANCHES, DATA_LEN, SYNC_LEN};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Soft symbols for the hard-decision byte `byte`, LSB first.
pub fn sync_symbols(byte: u8) -> [u8; SYNC_LEN] {
    let mut syms = [0xd0u8; SYNC_LEN];
    for (i, s) in syms.iter_mut().enumerate() {
        if (byte >> i) & 1 == 1 {
            *s = 0x30;
        }
    }
    syms
}

/// Frame `data` into a raw stream of sync words, each followed by 72 symbols of
/// `data`. `data` must be a multiple of 72 long.
pub fn frame(data: &[u8], sync: u8) -> Vec<u8> {
    assert_eq!(data.len() % DATA_LEN, 0);
    let mut raw = Vec::with_capacity(data.len() / DATA_LEN * (SYNC_LEN + DATA_LEN));
    for chunk in data.chunks_exact(DATA_LEN) {
        raw.extend_from_slice(&sync_symbols(sync));
        raw.extend_from_slice(chunk);
    }
    raw
}

pub fn random_symbols(rng: &mut StdRng, len: usize) -> Vec<u8> {
    (0..len).map(|_| rng.gen()).collect()
}

/// LRPT convolutional interleave of `message` into a buffer of `len` symbols,
/// everything not written from `message` being random. Symbols that would land past
/// `len` are lost.
pub fn interleave(message: &[u8], len: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut out = random_symbols(rng, len);
    for (i, sym) in message.iter().enumerate() {
        let dst = i + (i % BRANCHES) * BASE_LEN;
        if dst < len {
            out[dst] = *sym;
        }
    }
    out
}
