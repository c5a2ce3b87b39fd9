/// Nominal LRPT sync word, `00100111`.
///
/// The hard-decision byte actually observed in a stream depends on the unknown
/// orientation of the demodulated constellation, so synchronization never compares
/// against this value directly; see [find_sync].
pub const SYNC_WORD: u8 = 0b0010_0111;

/// Hard-decision threshold; soft symbols below this are a `1` bit.
pub const THRESHOLD: u8 = 128;

/// Produce a byte from the 8 soft symbols starting at `offset` using hard decision
/// thresholding. The symbol at `offset` becomes the least significant bit.
///
/// Returns `None` if there are fewer than 8 symbols available at `offset`.
#[must_use]
pub fn byte_at(data: &[u8], offset: usize) -> Option<u8> {
    let end = offset.checked_add(8)?;
    let symbols = data.get(offset..end)?;

    let mut byte = 0u8;
    for (i, sym) in symbols.iter().enumerate() {
        if *sym < THRESHOLD {
            byte |= 1 << i;
        }
    }
    Some(byte)
}

/// A located sync train.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncLoc {
    /// Offset of the first sync word, relative to the start of the searched data.
    pub offset: usize,
    /// The hard-decision byte value of the sync word in this stream orientation.
    pub sync: u8,
}

/// Search `data` for a byte pattern repeating every `stride` symbols.
///
/// Candidate offsets are `0..window - stride * depth`. A candidate is accepted when
/// the byte at the offset is repeated exactly at each of the next `depth` strides.
/// The first accepted candidate is returned.
///
/// Confirmations may read past `window` as long as they are within `data`; anything
/// past the end of `data` is a mismatch.
///
/// Because the comparison is against the stream itself, rather than a known marker,
/// the search does not care which orientation the sync word has.
#[must_use]
pub fn find_sync(data: &[u8], window: usize, stride: usize, depth: usize) -> Option<SyncLoc> {
    let limit = window.checked_sub(stride.checked_mul(depth)?)?;

    'candidate: for offset in 0..limit {
        let Some(sync) = byte_at(data, offset) else {
            // Every later offset is shorter still
            return None;
        };
        for k in 1..=depth {
            if byte_at(data, offset + k * stride) != Some(sync) {
                continue 'candidate;
            }
        }
        return Some(SyncLoc { offset, sync });
    }

    None
}
