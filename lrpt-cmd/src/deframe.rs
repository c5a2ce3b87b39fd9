use anyhow::{bail, Context, Result};
use lrpt::deframing::{resync_and_deinterleave, ResyncOpts};
use lrpt::Error;
use std::{fs::File, io::Write, path::Path};
use tracing::{info, warn};

/// Resynchronize and de-interleave the raw soft symbols in `srcpath`, writing the
/// de-interleaved symbols to `dstpath`.
pub fn deframe(srcpath: &Path, dstpath: &Path, opts: &ResyncOpts) -> Result<()> {
    let mut raw = std::fs::read(srcpath).context("reading source")?;
    let raw_len = raw.len();

    let data = match resync_and_deinterleave(&mut raw, opts) {
        Ok(data) => data,
        Err(err @ (Error::NoSync { .. } | Error::InsufficientShrink { .. })) => {
            warn!("{err}");
            bail!("failed to resynchronize {srcpath:?}; is there any signal?");
        }
        Err(err) => return Err(err).context("deframing"),
    };
    info!(raw_len, len = data.len(), "deframed");

    let mut dst = File::create(dstpath).context("creating dest")?;
    dst.write_all(&data)?;

    Ok(())
}
