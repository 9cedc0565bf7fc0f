//! Field values and their wire codecs.
//!
//! Every field type implements [`Field`]. The encoding, length encoding and
//! declared length are not stored in a value; the message layer passes them
//! on every call, usually from a [`FieldDef`](crate::FieldDef).

mod fixed;
mod var;

pub use self::{
    fixed::{Alphanumeric, Binary, Numeric},
    var::{LlNumeric, LlVar, LllNumeric, LllVar},
};
use {
    crate::{
        bcd,
        encoding::Encoding,
        error::{ensure_remaining, FieldError, Result},
    },
    bytes::{BufMut, BytesMut},
    tracing::trace,
};

/// Conversion of a single field value to and from its wire representation.
pub trait Field {
    /// Appends the wire representation to `buffer`.
    ///
    /// Nothing is written when an error is returned.
    fn encode<B: BufMut>(
        &self,
        buffer: &mut B,
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<()>;

    fn to_bytes(
        &self,
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<Vec<u8>> {
        let mut buffer = Vec::with_capacity(16);
        self.encode(&mut buffer, encoding, length_encoding, length)?;
        Ok(buffer)
    }

    fn encoded_len(
        &self,
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize> {
        let mut buffer = BytesMut::new();
        self.encode(&mut buffer, encoding, length_encoding, length)?;
        Ok(buffer.len())
    }

    /// Reads the value from the start of `raw` and returns the number of
    /// bytes consumed.
    ///
    /// On error `self` is left unchanged.
    fn decode(
        &mut self,
        raw: &[u8],
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize>;

    fn is_empty(&self) -> bool;
}

/// The kinds of field values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Numeric,
    Alphanumeric,
    Binary,
    LlVar,
    LlNumeric,
    LllVar,
    LllNumeric,
}

/// A field value of any kind.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FieldValue {
    Numeric(Numeric),
    Alphanumeric(Alphanumeric),
    Binary(Binary),
    LlVar(LlVar),
    LlNumeric(LlNumeric),
    LllVar(LllVar),
    LllNumeric(LllNumeric),
}

macro_rules! dispatch {
    ($value:expr, $field:ident => $body:expr) => {
        match $value {
            FieldValue::Numeric($field) => $body,
            FieldValue::Alphanumeric($field) => $body,
            FieldValue::Binary($field) => $body,
            FieldValue::LlVar($field) => $body,
            FieldValue::LlNumeric($field) => $body,
            FieldValue::LllVar($field) => $body,
            FieldValue::LllNumeric($field) => $body,
        }
    };
}

impl FieldValue {
    /// An empty value of the given kind, ready to be decoded into.
    pub fn empty(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Numeric => Self::Numeric(Numeric::default()),
            FieldKind::Alphanumeric => Self::Alphanumeric(Alphanumeric::default()),
            FieldKind::Binary => Self::Binary(Binary::default()),
            FieldKind::LlVar => Self::LlVar(LlVar::default()),
            FieldKind::LlNumeric => Self::LlNumeric(LlNumeric::default()),
            FieldKind::LllVar => Self::LllVar(LllVar::default()),
            FieldKind::LllNumeric => Self::LllNumeric(LllNumeric::default()),
        }
    }

    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::Numeric(_) => FieldKind::Numeric,
            Self::Alphanumeric(_) => FieldKind::Alphanumeric,
            Self::Binary(_) => FieldKind::Binary,
            Self::LlVar(_) => FieldKind::LlVar,
            Self::LlNumeric(_) => FieldKind::LlNumeric,
            Self::LllVar(_) => FieldKind::LllVar,
            Self::LllNumeric(_) => FieldKind::LllNumeric,
        }
    }

    /// The logical value as bytes: digits or text as ASCII, binary as is.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Numeric(field) => field.value.as_bytes(),
            Self::Alphanumeric(field) => field.value.as_bytes(),
            Self::LlNumeric(field) => field.value.as_bytes(),
            Self::LllNumeric(field) => field.value.as_bytes(),
            Self::Binary(field) => &field.value,
            Self::LlVar(field) => &field.value,
            Self::LllVar(field) => &field.value,
        }
    }
}

impl Field for FieldValue {
    fn encode<B: BufMut>(
        &self,
        buffer: &mut B,
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<()> {
        dispatch!(self, field => field.encode(buffer, encoding, length_encoding, length))
    }

    fn decode(
        &mut self,
        raw: &[u8],
        encoding: Encoding,
        length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize> {
        dispatch!(self, field => field.decode(raw, encoding, length_encoding, length))
    }

    fn is_empty(&self) -> bool {
        dispatch!(self, field => field.is_empty())
    }
}

macro_rules! impl_from {
    ($($variant:ident)+) => {
        $(
            impl From<$variant> for FieldValue {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from!(Numeric Alphanumeric Binary LlVar LlNumeric LllVar LllNumeric);

/// Digits in the requested body encoding.
fn pack_digits(encoding: Encoding, digits: &[u8]) -> Vec<u8> {
    match encoding {
        Encoding::Ascii => digits.to_vec(),
        Encoding::Bcd => bcd::pack_left(digits),
        Encoding::RBcd => bcd::pack_right(digits),
    }
}

/// Reads `digit_count` digits from the start of `raw`, returning them with the
/// number of bytes they occupied.
fn unpack_digits(encoding: Encoding, raw: &[u8], digit_count: usize) -> Result<(Vec<u8>, usize)> {
    match encoding {
        Encoding::Ascii => {
            ensure_remaining(raw, digit_count)?;
            Ok((raw[..digit_count].to_vec(), digit_count))
        }
        Encoding::Bcd | Encoding::RBcd => {
            let read = bcd::packed_len(digit_count);
            ensure_remaining(raw, read)?;
            let digits = if encoding == Encoding::Bcd {
                bcd::unpack_left(&raw[..read], digit_count)
            } else {
                bcd::unpack_right(&raw[..read], digit_count)
            };
            Ok((digits, read))
        }
    }
}

fn into_text(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| FieldError::InvalidText {
        raw: err.into_bytes(),
    })
}

fn trace_decoded(type_name: &'static str, consumed: &[u8]) {
    trace!(
        field = type_name,
        read = consumed.len(),
        raw = %hex::encode(consumed),
        "decoded field"
    );
}

#[cfg(test)]
mod tests {
    use {super::*, hex_literal::hex};

    const KINDS: [FieldKind; 7] = [
        FieldKind::Numeric,
        FieldKind::Alphanumeric,
        FieldKind::Binary,
        FieldKind::LlVar,
        FieldKind::LlNumeric,
        FieldKind::LllVar,
        FieldKind::LllNumeric,
    ];

    #[test]
    fn test_empty() {
        for kind in KINDS {
            let value = FieldValue::empty(kind);
            assert_eq!(value.kind(), kind);
            assert!(value.is_empty());
            assert!(value.as_bytes().is_empty());
        }
    }

    #[test]
    fn test_dispatch() {
        let value = FieldValue::from(LlNumeric::new("12345"));
        assert!(!value.is_empty());
        assert_eq!(
            value.to_bytes(Encoding::Bcd, Encoding::Bcd, None),
            Ok(hex!("05 12 34 50").to_vec())
        );
        assert_eq!(
            value.encoded_len(Encoding::Ascii, Encoding::Ascii, None),
            Ok(7)
        );

        let mut decoded = FieldValue::empty(FieldKind::LlNumeric);
        let read = decoded.decode(&hex!("05 12 34 50 ff"), Encoding::Bcd, Encoding::Bcd, None);
        assert_eq!(read, Ok(4));
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_encode_appends() {
        let mut buffer = b"xx".to_vec();
        Numeric::new("7")
            .encode(&mut buffer, Encoding::Ascii, Encoding::Ascii, Some(3))
            .unwrap();
        assert_eq!(buffer, b"xx007");
    }

    #[test]
    fn test_unpack_digits() {
        assert_eq!(
            unpack_digits(Encoding::RBcd, &hex!("06 43 99"), 3),
            Ok((b"643".to_vec(), 2))
        );
        assert_eq!(
            unpack_digits(Encoding::Ascii, b"12", 3),
            Err(FieldError::BadRaw {
                needed:    3,
                available: 2,
            })
        );
    }

    #[test]
    fn test_into_text() {
        assert_eq!(into_text(b"ok".to_vec()), Ok("ok".to_string()));
        assert_eq!(
            into_text(vec![0xff, 0xfe]),
            Err(FieldError::InvalidText {
                raw: vec![0xff, 0xfe],
            })
        );
    }
}
