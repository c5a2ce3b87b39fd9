use tracing::debug;

/// Integer square-root lookup table.
///
/// Holds `floor(sqrt(n))` for every `n` in `0..=IsqrtTable::MAX`, which covers the
/// product of any two 8-bit signed soft symbols. The table is immutable once built
/// and may be shared between threads, e.g., in an `Arc`.
///
/// Creating a table is the only way to get lookups, and it is released when dropped
/// (see also [init_sqrt_table] and [release_sqrt_table]).
#[derive(Debug)]
pub struct IsqrtTable {
    table: Box<[u8]>,
}

impl IsqrtTable {
    /// Largest magnitude that may be looked up.
    pub const MAX: i32 = 16_384;

    #[must_use]
    pub fn new() -> Self {
        let table: Box<[u8]> = (0..=Self::MAX)
            .map(|n| f64::from(n).sqrt() as u8)
            .collect();
        IsqrtTable { table }
    }

    /// Sign-preserving truncated square root of `a`, i.e., `-sqrt(-a)` for negative
    /// values.
    ///
    /// # Panics
    /// If `|a| > IsqrtTable::MAX`. Callers only ever pass the product of two 8-bit
    /// soft symbols, so this is a programming error.
    #[must_use]
    #[inline]
    pub fn lookup(&self, a: i32) -> i32 {
        debug_assert!(
            a.unsigned_abs() <= Self::MAX.unsigned_abs(),
            "isqrt argument {a} out of range"
        );
        let root = i32::from(self.table[a.unsigned_abs() as usize]);
        if a < 0 {
            -root
        } else {
            root
        }
    }
}

impl Default for IsqrtTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the integer square-root table.
///
/// This should happen once, before any decoding, with the result shared by all
/// decoders.
#[must_use]
pub fn init_sqrt_table() -> IsqrtTable {
    let table = IsqrtTable::new();
    debug!(entries = table.table.len(), "isqrt table initialized");
    table
}

/// Release the integer square-root table. Once released no lookups are possible.
pub fn release_sqrt_table(table: IsqrtTable) {
    debug!(entries = table.table.len(), "isqrt table released");
    drop(table);
}
