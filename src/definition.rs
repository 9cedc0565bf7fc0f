//! Per-field definitions, as kept in a message dictionary.

use {
    crate::{
        encoding::Encoding,
        error::Result,
        field::{Field, FieldKind, FieldValue},
    },
    bytes::BufMut,
};

/// How one field of a message is put on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldDef {
    pub kind:            FieldKind,
    pub encoding:        Encoding,
    pub length_encoding: Encoding,

    /// Fixed length, or the upper bound for variable length fields.
    pub length: Option<usize>,
}

/// An ASCII alphanumeric field without a length.
impl Default for FieldDef {
    fn default() -> Self {
        Self::new(FieldKind::Alphanumeric)
    }
}

impl FieldDef {
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            encoding: Encoding::Ascii,
            length_encoding: Encoding::Ascii,
            length: None,
        }
    }

    pub const fn numeric(length: usize) -> Self {
        Self::new(FieldKind::Numeric).with_length(length)
    }

    pub const fn alphanumeric(length: usize) -> Self {
        Self::new(FieldKind::Alphanumeric).with_length(length)
    }

    pub const fn binary(length: usize) -> Self {
        Self::new(FieldKind::Binary).with_length(length)
    }

    pub const fn llvar() -> Self {
        Self::new(FieldKind::LlVar)
    }

    pub const fn lllvar() -> Self {
        Self::new(FieldKind::LllVar)
    }

    pub const fn llnumeric() -> Self {
        Self::new(FieldKind::LlNumeric)
    }

    pub const fn lllnumeric() -> Self {
        Self::new(FieldKind::LllNumeric)
    }

    /// Builds a definition from raw dictionary values.
    ///
    /// Selectors are `0` for ASCII, `1` for BCD and `2` for rBCD. A negative
    /// length means the length is not known.
    pub fn from_raw(kind: FieldKind, encoder: i64, length_encoder: i64, length: i64) -> Result<Self> {
        Ok(Self {
            kind,
            encoding: Encoding::body(encoder)?,
            length_encoding: Encoding::length_header(length_encoder)?,
            length: usize::try_from(length).ok(),
        })
    }

    pub const fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub const fn with_length_encoding(mut self, length_encoding: Encoding) -> Self {
        self.length_encoding = length_encoding;
        self
    }

    pub const fn with_length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    pub fn encode<B: BufMut>(&self, buffer: &mut B, value: &FieldValue) -> Result<()> {
        value.encode(buffer, self.encoding, self.length_encoding, self.length)
    }

    pub fn to_bytes(&self, value: &FieldValue) -> Result<Vec<u8>> {
        value.to_bytes(self.encoding, self.length_encoding, self.length)
    }

    /// Decodes a fresh value of this definition's kind from the start of
    /// `raw`, returning it with the number of bytes consumed.
    pub fn decode(&self, raw: &[u8]) -> Result<(FieldValue, usize)> {
        let mut value = FieldValue::empty(self.kind);
        let read = value.decode(raw, self.encoding, self.length_encoding, self.length)?;
        Ok((value, read))
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            error::FieldError,
            field::{Binary, LlVar, Numeric},
        },
        hex_literal::hex,
    };

    #[test]
    fn test_from_raw() {
        assert_eq!(
            FieldDef::from_raw(FieldKind::Numeric, 2, 0, 3),
            Ok(FieldDef::numeric(3).with_encoding(Encoding::RBcd))
        );
        assert_eq!(
            FieldDef::from_raw(FieldKind::LlVar, 0, 1, -1),
            Ok(FieldDef::llvar().with_length_encoding(Encoding::Bcd))
        );
        assert_eq!(
            FieldDef::from_raw(FieldKind::LlVar, 5, 0, -1),
            Err(FieldError::InvalidEncoder)
        );
        assert_eq!(
            FieldDef::from_raw(FieldKind::LlVar, 0, 3, -1),
            Err(FieldError::InvalidLengthEncoder)
        );
    }

    #[test]
    fn test_default() {
        let def = FieldDef::default();
        assert_eq!(def.kind, FieldKind::Alphanumeric);
        assert_eq!(def.encoding, Encoding::Ascii);
        assert_eq!(def.length, None);
    }

    #[test]
    fn test_round_trip() {
        let def = FieldDef::numeric(3).with_encoding(Encoding::RBcd);
        let value = FieldValue::from(Numeric::new("643"));
        assert_eq!(def.to_bytes(&value), Ok(hex!("06 43").to_vec()));
        assert_eq!(def.decode(&hex!("06 43 ff")), Ok((value, 2)));

        let def = FieldDef::llvar().with_length_encoding(Encoding::Bcd);
        let value = FieldValue::from(LlVar::new(hex!("aa bb").to_vec()));
        let mut buffer: Vec<u8> = Vec::new();
        def.encode(&mut buffer, &value).unwrap();
        assert_eq!(buffer, hex!("02 aa bb"));
        assert_eq!(def.decode(&buffer), Ok((value, 3)));
    }

    #[test]
    fn test_decode_missing_length() {
        assert_eq!(
            FieldDef::new(FieldKind::Binary).decode(&hex!("00")),
            Err(FieldError::MissingLength)
        );
        let (value, read) = FieldDef::binary(2).decode(&hex!("01 02 03")).unwrap();
        assert_eq!(read, 2);
        assert_eq!(value.as_bytes(), &hex!("01 02"));
        assert!(matches!(value, FieldValue::Binary(ref b) if b.fixed_len() == Some(2)));
        assert_ne!(value, FieldValue::from(Binary::new(hex!("01 02").to_vec())));
    }
}
