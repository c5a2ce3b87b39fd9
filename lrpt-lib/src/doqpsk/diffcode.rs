use std::io::{ErrorKind, Read, Write};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::IsqrtTable;
use crate::prelude::*;

/// Previous in-phase and quadrature raw soft symbols of a stream.
///
/// This carries differential decoding across successive buffers of the same
/// stream. Each independent stream needs its own state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiffState {
    pub prev_i: i8,
    pub prev_q: i8,
}

fn to_symbol(root: i32) -> i8 {
    // Only sqrt(-128 * -128) = 128 is out of range
    root.clamp(i32::from(i8::MIN), i32::from(i8::MAX)) as i8
}

/// Undo differential offset-QPSK encoding of interleaved I/Q soft symbols in place.
///
/// Each pair becomes `(sqrt(I * pI), sqrt(-Q * pQ))` where `(pI, pQ)` is the raw
/// pair before it and the square root is sign preserving. The first pair uses
/// `state`, and on return `state` holds the last raw pair of `buf`.
///
/// # Errors
/// [Error::InvalidLength] if `buf` is not an even length of at least 2, in which
/// case neither `buf` nor `state` are modified.
pub fn differential_decode(
    table: &IsqrtTable,
    state: &mut DiffState,
    buf: &mut [i8],
) -> Result<()> {
    if buf.len() < 2 || buf.len() % 2 != 0 {
        return Err(Error::InvalidLength { len: buf.len() });
    }

    let mut prev_i = i32::from(state.prev_i);
    let mut prev_q = i32::from(state.prev_q);
    for pair in buf.chunks_exact_mut(2) {
        let i = i32::from(pair[0]);
        let q = i32::from(pair[1]);

        pair[0] = to_symbol(table.lookup(i * prev_i));
        pair[1] = to_symbol(table.lookup(-q * prev_q));

        prev_i = i;
        prev_q = q;
    }

    *state = DiffState {
        prev_i: prev_i as i8,
        prev_q: prev_q as i8,
    };
    Ok(())
}

/// Differential decoder for a single logical stream.
///
/// Wraps a shared [IsqrtTable] and the [DiffState] carried between calls, so
/// buffers of one stream can be decoded one after the other as they arrive.
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use lrpt::doqpsk::{DiffDecoder, IsqrtTable};
///
/// let table = Arc::new(IsqrtTable::new());
/// let mut decoder = DiffDecoder::new(table);
///
/// let mut first = vec![100i8, -100, 100, 100];
/// let mut second = vec![-100i8, -100];
/// decoder.decode(&mut first).unwrap();
/// decoder.decode(&mut second).unwrap();
///
/// assert_eq!(first, [0, 0, 100, 100]);
/// assert_eq!(second, [-100, 100]);
/// ```
#[derive(Debug, Clone)]
pub struct DiffDecoder {
    table: Arc<IsqrtTable>,
    state: DiffState,
}

impl DiffDecoder {
    const DEFAULT_CHUNK_SIZE: usize = 16_384;
    /// Largest number of symbols decoded at a time by [DiffDecoder::decode_stream].
    pub const MAX_CHUNK_SIZE: usize = 1 << 24;

    #[must_use]
    pub fn new(table: Arc<IsqrtTable>) -> Self {
        Self::with_state(table, DiffState::default())
    }

    /// Create a decoder continuing a stream from `state`.
    #[must_use]
    pub fn with_state(table: Arc<IsqrtTable>, state: DiffState) -> Self {
        DiffDecoder { table, state }
    }

    #[must_use]
    pub fn state(&self) -> DiffState {
        self.state
    }

    /// Forget the carried state, e.g., before starting on a new stream.
    pub fn reset(&mut self) {
        self.state = DiffState::default();
    }

    /// Decode the next buffer of the stream in place.
    ///
    /// # Errors
    /// See [differential_decode].
    pub fn decode(&mut self, buf: &mut [i8]) -> Result<()> {
        differential_decode(&self.table, &mut self.state, buf)
    }

    /// Decode all symbols from `reader` to `writer`, `chunk_size` symbols at a time,
    /// returning the number of symbols written. A `chunk_size` of 0 uses the default
    /// and larger than [Self::MAX_CHUNK_SIZE] is capped.
    ///
    /// A trailing unpaired symbol is dropped.
    ///
    /// # Errors
    /// Any [Error::Io] reading or writing.
    pub fn decode_stream<R, W>(
        &mut self,
        mut reader: R,
        mut writer: W,
        chunk_size: usize,
    ) -> Result<usize>
    where
        R: Read,
        W: Write,
    {
        let chunk_size = match chunk_size {
            0 => Self::DEFAULT_CHUNK_SIZE,
            n => n.min(Self::MAX_CHUNK_SIZE).saturating_add(1) & !1,
        };
        let mut raw = vec![0u8; chunk_size];
        let mut syms: Vec<i8> = Vec::with_capacity(chunk_size);
        let mut total = 0;

        loop {
            let n = fill(&mut reader, &mut raw)?;
            let even = n & !1;
            if even > 0 {
                syms.clear();
                syms.extend(raw[..even].iter().map(|b| *b as i8));
                self.decode(&mut syms)?;
                for (dst, sym) in raw.iter_mut().zip(&syms) {
                    *dst = *sym as u8;
                }
                writer.write_all(&raw[..even])?;
                total += even;
                trace!(symbols = even, "decoded chunk");
            }
            if n < raw.len() {
                if n != even {
                    debug!("dropping unpaired trailing symbol");
                }
                break;
            }
        }
        writer.flush()?;

        Ok(total)
    }
}

/// Read until `buf` is full or EOF, returning the number of bytes read.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut n = 0;
    while n < buf.len() {
        match reader.read(&mut buf[n..]) {
            Ok(0) => break,
            Ok(x) => n += x,
            Err(err) if err.kind() == ErrorKind::Interrupted => (),
            Err(err) => return Err(err),
        }
    }
    Ok(n)
}
