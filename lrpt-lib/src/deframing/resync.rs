use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::synchronizer::{byte_at, find_sync};
use super::{DATA_LEN, FRAME_LEN, SYNC_LEN};

/// Options used for resynchronization.
///
/// The defaults are the tolerances that have proven themselves on Meteor-M
/// passes. They are empirical, so they are exposed here rather than being fixed.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResyncOpts {
    /// Number of consecutive sync word confirmations, after the first, required to
    /// acquire a sync train.
    pub depth: usize,
    /// Number of frame periods to look ahead for a sync word while tracking before
    /// declaring sync lost.
    pub lookahead: usize,
    /// Number of frame periods the coarse search advances after a failed search.
    pub retry_periods: usize,
}

impl Default for ResyncOpts {
    fn default() -> Self {
        Self::new()
    }
}

impl ResyncOpts {
    pub const DEFAULT_DEPTH: usize = 4;
    pub const DEFAULT_LOOKAHEAD: usize = 128;

    #[must_use]
    pub fn new() -> Self {
        ResyncOpts {
            depth: Self::DEFAULT_DEPTH,
            lookahead: Self::DEFAULT_LOOKAHEAD,
            retry_periods: Self::DEFAULT_DEPTH - 1,
        }
    }

    /// Set the acquisition depth. This also resets `retry_periods` to `depth - 1`
    /// (minimum 1), so set that afterwards if it should differ.
    #[must_use]
    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth;
        self.retry_periods = depth.saturating_sub(1).max(1);
        self
    }

    #[must_use]
    pub fn with_lookahead(mut self, lookahead: usize) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub fn with_retry_periods(mut self, periods: usize) -> Self {
        self.retry_periods = periods;
        self
    }

    /// Length of the block searched by each coarse acquisition attempt.
    #[must_use]
    pub fn block_len(&self) -> usize {
        self.effective_depth()
            .saturating_add(1)
            .saturating_mul(FRAME_LEN)
    }

    // At least one confirmation and one look-ahead position are needed for the
    // cursor to always advance.
    fn effective_depth(&self) -> usize {
        self.depth.max(1)
    }

    fn effective_lookahead(&self) -> usize {
        self.lookahead.max(1)
    }

    /// Room that must remain at the cursor for a coarse search to be attempted.
    /// Saturates, so an overflowing depth never leaves room.
    fn margin(&self) -> usize {
        self.effective_depth().saturating_mul(FRAME_LEN)
    }

    fn retry_step(&self) -> usize {
        self.retry_periods.max(1).saturating_mul(FRAME_LEN)
    }
}

/// Counters accumulated by a [Resynchronizer].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ResyncStats {
    /// Number of times a sync train was acquired by the coarse search.
    pub acquisitions: usize,
    /// Total number of frames emitted.
    pub frames: usize,
    /// Frames emitted without a sync word at the expected position, i.e., carried
    /// through by the look-ahead.
    pub flywheel_frames: usize,
    /// Number of times tracking gave up and fell back to a coarse search.
    pub sync_losses: usize,
}

/// Removes sync words from a raw soft-symbol stream, stitching the frame data back
/// together.
///
/// Resynchronization is two-tier: a coarse search looks for a sync train of
/// `depth + 1` words using [find_sync](super::find_sync), then the train is
/// tracked frame by frame. While tracking, a frame is accepted if the acquired sync
/// byte can be found at the current position or at any of the following
/// `lookahead` frame positions, which lets weak or faded sync words through without
/// a new search.
#[derive(Debug, Default)]
pub struct Resynchronizer {
    opts: ResyncOpts,
    /// Accumulated counters.
    pub stats: ResyncStats,
    /// Count of acquisitions per hard-decision sync byte value.
    pub sync_hits: HashMap<u8, usize>,
}

impl Resynchronizer {
    #[must_use]
    pub fn new(opts: ResyncOpts) -> Self {
        Resynchronizer {
            opts,
            stats: ResyncStats::default(),
            sync_hits: HashMap::new(),
        }
    }

    #[must_use]
    pub fn opts(&self) -> &ResyncOpts {
        &self.opts
    }

    pub fn reset_stats(&mut self) {
        self.stats = ResyncStats::default();
        self.sync_hits.clear();
    }

    /// Resynchronize `raw`, returning only the data symbols of each tracked frame.
    ///
    /// The result is a multiple of [DATA_LEN] long and is empty if no sync train
    /// could be acquired.
    pub fn resync(&mut self, raw: &[u8]) -> Vec<u8> {
        let mut out: Vec<u8> = Vec::with_capacity(raw.len() / FRAME_LEN * DATA_LEN);
        let mut posn: usize = 0;

        while posn.saturating_add(self.opts.margin()) < raw.len() {
            let window = self.opts.block_len().min(raw.len() - posn);
            let depth = self.opts.effective_depth();
            let Some(loc) = find_sync(&raw[posn..], window, FRAME_LEN, depth) else {
                posn = posn.saturating_add(self.opts.retry_step());
                continue;
            };
            posn += loc.offset;

            self.stats.acquisitions += 1;
            *self.sync_hits.entry(loc.sync).or_default() += 1;
            debug!(posn, sync = loc.sync, "sync acquired");

            posn = self.track(raw, posn, loc.sync, &mut out);
        }

        debug!(
            raw_len = raw.len(),
            resync_len = out.len(),
            frames = self.stats.frames,
            "resync complete"
        );

        out
    }

    /// Track a sync train starting at `posn`, appending frame data to `out`.
    /// Returns the position where tracking stopped.
    fn track(&mut self, raw: &[u8], mut posn: usize, sync: u8, out: &mut Vec<u8>) -> usize {
        while posn + FRAME_LEN <= raw.len() {
            let found = (0..self.opts.effective_lookahead())
                .map(|i| posn + i * FRAME_LEN)
                .take_while(|cand| cand + SYNC_LEN <= raw.len())
                .position(|cand| byte_at(raw, cand) == Some(sync));

            match found {
                None => {
                    self.stats.sync_losses += 1;
                    debug!(posn, "sync lost");
                    break;
                }
                Some(0) => (),
                Some(ahead) => {
                    self.stats.flywheel_frames += 1;
                    trace!(posn, ahead, "sync word missing; found ahead");
                }
            }

            out.extend_from_slice(&raw[posn + SYNC_LEN..posn + FRAME_LEN]);
            self.stats.frames += 1;
            posn += FRAME_LEN;
        }
        posn
    }

    /// Resynchronize `raw` in place. The data symbols are compacted into the start of
    /// `raw` and the number written is returned. Symbols past the returned length are
    /// left as they were.
    ///
    /// The search reads from a private snapshot, so it never sees the compacted
    /// output.
    pub fn resync_in_place(&mut self, raw: &mut [u8]) -> usize {
        let snapshot = raw.to_vec();
        let data = self.resync(&snapshot);
        raw[..data.len()].copy_from_slice(&data);
        data.len()
    }
}
