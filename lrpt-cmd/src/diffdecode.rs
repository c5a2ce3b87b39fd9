use anyhow::{Context, Result};
use lrpt::doqpsk::{init_sqrt_table, release_sqrt_table, DiffDecoder};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
    sync::Arc,
};
use tracing::info;

/// Differentially decode the signed soft symbols in `srcpath` to `dstpath`,
/// `chunk_size` symbols at a time.
pub fn diffdecode(srcpath: &Path, dstpath: &Path, chunk_size: usize) -> Result<()> {
    let src = BufReader::new(File::open(srcpath).context("opening source")?);
    let dst = BufWriter::new(File::create(dstpath).context("creating dest")?);

    let table = Arc::new(init_sqrt_table());
    let mut decoder = DiffDecoder::new(table.clone());
    let num = decoder
        .decode_stream(src, dst, chunk_size)
        .context("decoding")?;
    info!(symbols = num, "decoded");

    drop(decoder);
    if let Ok(table) = Arc::try_unwrap(table) {
        release_sqrt_table(table);
    }

    Ok(())
}
