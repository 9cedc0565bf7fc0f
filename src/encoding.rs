//! Wire encodings for field bodies and length headers.

use {
    crate::error::{FieldError, Result},
    num_enum::{IntoPrimitive, TryFromPrimitive, TryFromPrimitiveError},
    std::fmt::{self, Display, Formatter},
};

/// Representation of digits on the wire.
///
/// The same selector is used for a field body and, separately, for the
/// length header of variable length fields. Discriminants match the raw
/// selectors used by message dictionaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Encoding {
    /// One ASCII character per digit.
    Ascii = 0,

    /// Packed decimal, odd digit counts padded with a trailing zero nibble.
    Bcd = 1,

    /// Packed decimal, odd digit counts padded with a leading zero nibble.
    /// For example `"643"` is sent as `[0x06, 0x43]`.
    RBcd = 2,
}

impl Encoding {
    /// Converts a raw body selector, rejecting unknown values as
    /// [`FieldError::InvalidEncoder`].
    pub fn body(raw: i64) -> Result<Self> {
        Self::from_raw(raw).ok_or(FieldError::InvalidEncoder)
    }

    /// Converts a raw length header selector, rejecting unknown values as
    /// [`FieldError::InvalidLengthEncoder`].
    pub fn length_header(raw: i64) -> Result<Self> {
        Self::from_raw(raw).ok_or(FieldError::InvalidLengthEncoder)
    }

    pub const fn is_packed(self) -> bool {
        matches!(self, Self::Bcd | Self::RBcd)
    }

    fn from_raw(raw: i64) -> Option<Self> {
        u8::try_from(raw).ok().and_then(|b| Self::try_from(b).ok())
    }
}

/// Plain ASCII, the encoding of every field that carries text.
impl Default for Encoding {
    fn default() -> Self {
        Self::Ascii
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Self::Ascii => "ASCII",
            Self::Bcd => "BCD",
            Self::RBcd => "rBCD",
        })
    }
}

impl From<TryFromPrimitiveError<Encoding>> for FieldError {
    fn from(err: TryFromPrimitiveError<Encoding>) -> Self {
        Self::UnknownEncoding { value: err.number }
    }
}
