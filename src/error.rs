//! Errors shared by every field type.

use thiserror::Error;

pub type Result<T, E = FieldError> = std::result::Result<T, E>;

/// Failure of a single encode or decode call.
///
/// Errors are terminal for the call that raised them. A decode that fails
/// leaves the target value as it was.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A fixed-length field was used without a declared length.
    #[error("missing length")]
    MissingLength,

    #[error("length of value is longer than definition; type={type_name}, def_len={max}, len={len}")]
    ValueTooLong {
        type_name: &'static str,
        max:       usize,
        len:       usize,
    },

    #[error("invalid encoder")]
    InvalidEncoder,

    #[error("invalid length encoder")]
    InvalidLengthEncoder,

    /// The body length does not fit in the length header.
    #[error("invalid length head: {len} does not fit")]
    InvalidLengthHead { len: usize },

    #[error("bad raw data: need {needed} bytes, have {available}")]
    BadRaw { needed: usize, available: usize },

    #[error("parse length head failed: {}", hex::encode(.raw))]
    ParseLengthFailed { raw: Vec<u8> },

    /// Decoded bytes of a text field are not UTF-8.
    #[error("invalid text: {}", hex::encode(.raw))]
    InvalidText { raw: Vec<u8> },

    #[error("unknown encoding selector {value}")]
    UnknownEncoding { value: u8 },
}

/// Fails with [`FieldError::BadRaw`] unless `raw` holds at least `needed` bytes.
pub(crate) fn ensure_remaining(raw: &[u8], needed: usize) -> Result<()> {
    if raw.len() < needed {
        return Err(FieldError::BadRaw {
            needed,
            available: raw.len(),
        });
    }
    Ok(())
}

/// Fails with [`FieldError::ValueTooLong`] if `len` exceeds `max`.
pub(crate) fn ensure_fits(type_name: &'static str, max: usize, len: usize) -> Result<()> {
    if len > max {
        return Err(FieldError::ValueTooLong {
            type_name,
            max,
            len,
        });
    }
    Ok(())
}
