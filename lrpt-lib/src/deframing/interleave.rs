/// Number of interleaver branches.
pub const BRANCHES: usize = 36;
/// Per-branch delay, in symbols.
pub const DELAY: usize = 2048;
/// Interleaver base length, `BRANCHES * DELAY`.
pub const BASE_LEN: usize = BRANCHES * DELAY;
/// Length of a complete interleaved message, `BRANCHES * BASE_LEN`.
pub const MESSAGE_LEN: usize = BRANCHES * BASE_LEN;

/// Undo the LRPT convolutional interleave on resynchronized data.
///
/// Symbol `i` of the output is taken from `i + (i % BRANCHES) * BASE_LEN` of the
/// input. Output positions whose source is past the end of `data` are left as 0, so
/// the tail of the output is only fully populated once `(BRANCHES - 1) * BASE_LEN`
/// further symbols have been received.
#[must_use]
pub fn deinterleave(data: &[u8]) -> Vec<u8> {
    deinterleave_with(data, BRANCHES, BASE_LEN)
}

fn deinterleave_with(data: &[u8], branches: usize, base_len: usize) -> Vec<u8> {
    let mut out = vec![0u8; data.len()];
    for (i, dst) in out.iter_mut().enumerate() {
        let src = i + (i % branches) * base_len;
        if let Some(sym) = data.get(src) {
            *dst = *sym;
        }
    }
    out
}
