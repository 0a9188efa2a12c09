use thiserror::Error;

/// Errors raised before any record is decoded.
///
/// Decoding itself never fails; these cover inputs that are not a STABS
/// record table at all.
#[derive(Debug, Error)]
pub enum Error {
    #[error("record table of {len} bytes is not a multiple of the {record_size}-byte record size")]
    Misaligned { len: usize, record_size: usize },

    #[error("unsupported record width: {0} bits")]
    UnsupportedWidth(u32),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
