//! LRPT soft-symbol deframing.
//!
//! The 80 ksym/s LRPT stream is a repeating sequence of frame periods, each an
//! 8 symbol sync word followed by 72 interleaved data symbols:
//!
//! ```text
//! 00100111 36 bits 36 bits 00100111 36 bits 36 bits ...
//! ```
//!
//! The sync words are located ([find_sync]) and removed ([Resynchronizer]) and the
//! remaining data is de-interleaved ([deinterleave]).
mod interleave;
mod resync;
mod synchronizer;

pub use interleave::*;
pub use resync::*;
pub use synchronizer::*;

use crate::prelude::*;
use tracing::debug;

/// Sync word length, in symbols.
pub const SYNC_LEN: usize = 8;
/// Data symbols following each sync word.
pub const DATA_LEN: usize = 72;
/// Length of a frame period, sync word plus data.
pub const FRAME_LEN: usize = SYNC_LEN + DATA_LEN;

/// Resynchronize `raw` in place and de-interleave the result.
///
/// After this returns the start of `raw` holds the compacted, still interleaved,
/// data symbols; nothing about the rest of `raw` should be assumed.
///
/// # Errors
/// [Error::NoSync] if no sync train was found, or [Error::InsufficientShrink] if the
/// resynchronized data is not shorter than `raw`. Both are expected with weak or
/// absent signal and the caller should simply try again with more data.
pub fn resync_and_deinterleave(raw: &mut [u8], opts: &ResyncOpts) -> Result<Vec<u8>> {
    let mut resync = Resynchronizer::new(opts.clone());
    let resync_len = resync.resync_in_place(raw);

    if resync_len == 0 {
        return Err(Error::NoSync { len: raw.len() });
    }
    // Unreachable while frames never overlap; output is always shorter than input
    if resync_len >= raw.len() {
        return Err(Error::InsufficientShrink {
            raw: raw.len(),
            resynced: resync_len,
        });
    }
    debug!(
        raw_len = raw.len(),
        resync_len,
        acquisitions = resync.stats.acquisitions,
        flywheel_frames = resync.stats.flywheel_frames,
        "deinterleaving"
    );

    Ok(deinterleave(&raw[..resync_len]))
}
