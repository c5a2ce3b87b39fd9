#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No sync train could be acquired anywhere in the raw buffer.
    #[error("no sync train found in {len} raw symbols")]
    NoSync { len: usize },

    /// Resynchronization did not strip anything, so the sync markers could not be
    /// located reliably.
    #[error("resync did not shrink buffer: raw={raw} resynced={resynced}")]
    InsufficientShrink { raw: usize, resynced: usize },

    #[error("invalid symbol buffer length {len}; must be even and at least 2")]
    InvalidLength { len: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
