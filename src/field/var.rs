//! Variable length fields carrying their length in a decimal header.
//!
//! The header is two digits (LL) or three digits (LLL). In ASCII it takes one
//! byte per digit, packed it is right-aligned BCD of one or two bytes. For
//! byte fields the header counts bytes, for numeric fields it counts digits.

use {
    super::{into_text, pack_digits, trace_decoded, unpack_digits, Field},
    crate::{
        bcd,
        encoding::Encoding,
        error::{ensure_fits, ensure_remaining, FieldError, Result},
    },
    bytes::BufMut,
};

/// Decimal length prefix with a fixed number of digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct LengthHead {
    digits: usize,
}

impl LengthHead {
    const LL: Self = Self { digits: 2 };
    const LLL: Self = Self { digits: 3 };

    const fn packed_len(self) -> usize {
        bcd::packed_len(self.digits)
    }

    /// Header bytes announcing a body of `len`.
    fn encode(self, encoding: Encoding, len: usize) -> Result<Vec<u8>> {
        let digits = format!("{len:0width$}", width = self.digits);
        if digits.len() > self.digits {
            return Err(FieldError::InvalidLengthHead { len });
        }
        if !encoding.is_packed() {
            return Ok(digits.into_bytes());
        }
        let packed = bcd::pack_right(digits.as_bytes());
        if packed.len() > self.packed_len() {
            return Err(FieldError::InvalidLengthHead { len });
        }
        Ok(packed)
    }

    /// Parses the header at the start of `raw`, returning the number of
    /// header bytes and the announced length.
    fn decode(self, raw: &[u8], encoding: Encoding) -> Result<(usize, usize)> {
        let read = if encoding.is_packed() {
            self.packed_len()
        } else {
            self.digits
        };
        ensure_remaining(raw, read)?;
        let digits = if encoding.is_packed() {
            bcd::unpack_right(&raw[..read], self.digits)
        } else {
            raw[..read].to_vec()
        };
        let len = parse_decimal(&digits).ok_or_else(|| FieldError::ParseLengthFailed {
            raw: raw[..read].to_vec(),
        })?;
        Ok((read, len))
    }
}

fn parse_decimal(digits: &[u8]) -> Option<usize> {
    digits.iter().try_fold(0_usize, |acc, &digit| {
        digit
            .is_ascii_digit()
            .then(|| acc * 10 + usize::from(digit - b'0'))
    })
}

fn encode_bytes<B: BufMut>(
    type_name: &'static str,
    head: LengthHead,
    value: &[u8],
    buffer: &mut B,
    encoding: Encoding,
    length_encoding: Encoding,
    length: Option<usize>,
) -> Result<()> {
    if let Some(max) = length {
        ensure_fits(type_name, max, value.len())?;
    }
    if encoding != Encoding::Ascii {
        return Err(FieldError::InvalidEncoder);
    }
    let header = head.encode(length_encoding, value.len())?;
    buffer.put_slice(&header);
    buffer.put_slice(value);
    Ok(())
}

fn decode_bytes(
    head: LengthHead,
    raw: &[u8],
    encoding: Encoding,
    length_encoding: Encoding,
) -> Result<(Vec<u8>, usize)> {
    let (read, len) = head.decode(raw, length_encoding)?;
    ensure_remaining(raw, read + len)?;
    if encoding != Encoding::Ascii {
        return Err(FieldError::InvalidEncoder);
    }
    Ok((raw[read..read + len].to_vec(), read + len))
}

fn encode_numeric<B: BufMut>(
    type_name: &'static str,
    head: LengthHead,
    value: &str,
    buffer: &mut B,
    encoding: Encoding,
    length_encoding: Encoding,
    length: Option<usize>,
) -> Result<()> {
    let digits = value.as_bytes();
    if let Some(max) = length {
        ensure_fits(type_name, max, digits.len())?;
    }
    let body = pack_digits(encoding, digits);
    let header = head.encode(length_encoding, digits.len())?;
    buffer.put_slice(&header);
    buffer.put_slice(&body);
    Ok(())
}

fn decode_numeric(
    head: LengthHead,
    raw: &[u8],
    encoding: Encoding,
    length_encoding: Encoding,
) -> Result<(String, usize)> {
    let (read, len) = head.decode(raw, length_encoding)?;
    let (digits, body_len) = unpack_digits(encoding, &raw[read..], len).map_err(|err| match err {
        FieldError::BadRaw { needed, .. } => FieldError::BadRaw {
            needed:    read + needed,
            available: raw.len(),
        },
        err => err,
    })?;
    Ok((into_text(digits)?, read + body_len))
}

macro_rules! var_bytes {
    ($(#[$doc:meta])* $name:ident, $head:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            pub value: Vec<u8>,
        }

        impl $name {
            pub fn new(value: impl Into<Vec<u8>>) -> Self {
                Self { value: value.into() }
            }
        }

        impl Field for $name {
            fn encode<B: BufMut>(
                &self,
                buffer: &mut B,
                encoding: Encoding,
                length_encoding: Encoding,
                length: Option<usize>,
            ) -> Result<()> {
                encode_bytes(
                    stringify!($name),
                    $head,
                    &self.value,
                    buffer,
                    encoding,
                    length_encoding,
                    length,
                )
            }

            fn decode(
                &mut self,
                raw: &[u8],
                encoding: Encoding,
                length_encoding: Encoding,
                _length: Option<usize>,
            ) -> Result<usize> {
                let (value, read) = decode_bytes($head, raw, encoding, length_encoding)?;
                self.value = value;
                trace_decoded(stringify!($name), &raw[..read]);
                Ok(read)
            }

            fn is_empty(&self) -> bool {
                self.value.is_empty()
            }
        }
    };
}

macro_rules! var_numeric {
    ($(#[$doc:meta])* $name:ident, $head:expr) => {
        $(#[$doc])*
        #[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
        pub struct $name {
            pub value: String,
        }

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self { value: value.into() }
            }
        }

        impl Field for $name {
            fn encode<B: BufMut>(
                &self,
                buffer: &mut B,
                encoding: Encoding,
                length_encoding: Encoding,
                length: Option<usize>,
            ) -> Result<()> {
                encode_numeric(
                    stringify!($name),
                    $head,
                    &self.value,
                    buffer,
                    encoding,
                    length_encoding,
                    length,
                )
            }

            fn decode(
                &mut self,
                raw: &[u8],
                encoding: Encoding,
                length_encoding: Encoding,
                _length: Option<usize>,
            ) -> Result<usize> {
                let (value, read) = decode_numeric($head, raw, encoding, length_encoding)?;
                self.value = value;
                trace_decoded(stringify!($name), &raw[..read]);
                Ok(read)
            }

            fn is_empty(&self) -> bool {
                self.value.is_empty()
            }
        }
    };
}

var_bytes!(
    /// Up to 99 bytes behind a two digit length. The body is always ASCII
    /// (copied as is); the length may be packed.
    LlVar,
    LengthHead::LL
);

var_bytes!(
    /// Up to 999 bytes behind a three digit length.
    LllVar,
    LengthHead::LLL
);

var_numeric!(
    /// Up to 99 digits behind a two digit length.
    LlNumeric,
    LengthHead::LL
);

var_numeric!(
    /// Up to 999 digits behind a three digit length.
    LllNumeric,
    LengthHead::LLL
);

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::encoding::Encoding::{Ascii, Bcd, RBcd},
        hex_literal::hex,
    };

    #[test]
    fn test_head_encode() {
        assert_eq!(LengthHead::LL.encode(Ascii, 5), Ok(b"05".to_vec()));
        assert_eq!(LengthHead::LL.encode(Bcd, 5), Ok(hex!("05").to_vec()));
        assert_eq!(LengthHead::LL.encode(RBcd, 99), Ok(hex!("99").to_vec()));
        assert_eq!(LengthHead::LLL.encode(Ascii, 7), Ok(b"007".to_vec()));
        assert_eq!(LengthHead::LLL.encode(Bcd, 123), Ok(hex!("01 23").to_vec()));
        for encoding in [Ascii, Bcd, RBcd] {
            assert_eq!(
                LengthHead::LL.encode(encoding, 100),
                Err(FieldError::InvalidLengthHead { len: 100 })
            );
            assert_eq!(
                LengthHead::LLL.encode(encoding, 1000),
                Err(FieldError::InvalidLengthHead { len: 1000 })
            );
        }
    }

    #[test]
    fn test_head_decode() {
        assert_eq!(LengthHead::LL.decode(b"05abc", Ascii), Ok((2, 5)));
        assert_eq!(LengthHead::LLL.decode(b"120", Ascii), Ok((3, 120)));
        assert_eq!(LengthHead::LL.decode(&hex!("42"), RBcd), Ok((1, 42)));
        assert_eq!(LengthHead::LLL.decode(&hex!("09 99"), Bcd), Ok((2, 999)));
        assert_eq!(
            LengthHead::LL.decode(b"5", Ascii),
            Err(FieldError::BadRaw {
                needed:    2,
                available: 1,
            })
        );
        assert_eq!(
            LengthHead::LL.decode(b"+5", Ascii),
            Err(FieldError::ParseLengthFailed { raw: b"+5".to_vec() })
        );
        assert_eq!(
            LengthHead::LL.decode(&hex!("1a"), Bcd),
            Err(FieldError::ParseLengthFailed { raw: vec![0x1a] })
        );
    }

    #[test]
    fn test_llvar() {
        let value = LlVar::new(hex!("aa bb").to_vec());
        assert_eq!(
            value.to_bytes(Ascii, Bcd, None),
            Ok(hex!("02 aa bb").to_vec())
        );
        assert_eq!(
            value.to_bytes(Ascii, Ascii, Some(5)),
            Ok(hex!("30 32 aa bb").to_vec())
        );
        assert_eq!(
            value.to_bytes(Bcd, Ascii, None),
            Err(FieldError::InvalidEncoder)
        );
        assert_eq!(
            value.to_bytes(Ascii, Ascii, Some(1)),
            Err(FieldError::ValueTooLong {
                type_name: "LlVar",
                max:       1,
                len:       2,
            })
        );
        assert_eq!(
            LlVar::new(vec![0; 100]).to_bytes(Ascii, RBcd, None),
            Err(FieldError::InvalidLengthHead { len: 100 })
        );

        let mut decoded = LlVar::default();
        assert_eq!(decoded.decode(&hex!("02 aa bb cc"), Ascii, RBcd, None), Ok(3));
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_llvar_failed_decode_keeps_value() {
        let mut value = LlVar::new(b"keep".to_vec());
        assert_eq!(
            value.decode(&hex!("02 aa bb"), Bcd, Bcd, None),
            Err(FieldError::InvalidEncoder)
        );
        assert_eq!(
            value.decode(b"05abc", Ascii, Ascii, None),
            Err(FieldError::BadRaw {
                needed:    7,
                available: 5,
            })
        );
        assert_eq!(value.value, b"keep");
    }

    #[test]
    fn test_bad_length_head() {
        let mut value = LlVar::new(b"keep".to_vec());
        assert_eq!(
            value.decode(b"x5abcde", Ascii, Ascii, None),
            Err(FieldError::ParseLengthFailed { raw: b"x5".to_vec() })
        );
        let mut numeric = LllNumeric::default();
        assert_eq!(
            numeric.decode(&hex!("0f 12 34"), Bcd, RBcd, None),
            Err(FieldError::ParseLengthFailed { raw: vec![0x0f, 0x12] })
        );
        assert_eq!(value.value, b"keep");
        assert!(numeric.is_empty());
    }

    #[test]
    fn test_lllvar() {
        let value = LllVar::new(vec![0x5a; 250]);
        let encoded = value.to_bytes(Ascii, Bcd, None).unwrap();
        assert_eq!(encoded[..2], hex!("02 50"));
        assert_eq!(encoded.len(), 252);

        let encoded = value.to_bytes(Ascii, Ascii, None).unwrap();
        assert_eq!(&encoded[..3], b"250");

        let mut decoded = LllVar::default();
        assert_eq!(decoded.decode(&encoded, Ascii, Ascii, None), Ok(253));
        assert_eq!(decoded, value);

        assert_eq!(
            LllVar::new(vec![0; 1000]).to_bytes(Ascii, Ascii, None),
            Err(FieldError::InvalidLengthHead { len: 1000 })
        );
    }

    #[test]
    fn test_llnumeric() {
        let value = LlNumeric::new("12345");
        assert_eq!(value.to_bytes(Ascii, Ascii, None), Ok(b"0512345".to_vec()));
        assert_eq!(
            value.to_bytes(Bcd, Bcd, None),
            Ok(hex!("05 12 34 50").to_vec())
        );
        assert_eq!(
            value.to_bytes(RBcd, Ascii, None),
            Ok(hex!("30 35 01 23 45").to_vec())
        );
        assert_eq!(
            value.to_bytes(Ascii, Ascii, Some(4)),
            Err(FieldError::ValueTooLong {
                type_name: "LlNumeric",
                max:       4,
                len:       5,
            })
        );

        let mut decoded = LlNumeric::default();
        assert_eq!(decoded.decode(&hex!("05 01 23 45"), RBcd, Bcd, None), Ok(4));
        assert_eq!(decoded, value);
        assert_eq!(decoded.decode(&hex!("05 12 34 50"), Bcd, Bcd, None), Ok(4));
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_llnumeric_short_buffer() {
        let mut value = LlNumeric::default();
        assert_eq!(
            value.decode(b"051234", Ascii, Ascii, None),
            Err(FieldError::BadRaw {
                needed:    7,
                available: 6,
            })
        );
        assert_eq!(
            value.decode(&hex!("05 12 34"), Bcd, Bcd, None),
            Err(FieldError::BadRaw {
                needed:    4,
                available: 3,
            })
        );
        assert!(value.is_empty());
    }

    #[test]
    fn test_lllnumeric() {
        let value = LllNumeric::new("9".repeat(101));
        let encoded = value.to_bytes(RBcd, RBcd, None).unwrap();
        assert_eq!(encoded[..3], hex!("01 01 09"));
        assert_eq!(encoded.len(), 2 + 51);

        let mut decoded = LllNumeric::default();
        assert_eq!(decoded.decode(&encoded, RBcd, RBcd, None), Ok(53));
        assert_eq!(decoded, value);

        assert_eq!(
            LllNumeric::new("1".repeat(1000)).to_bytes(Ascii, Bcd, None),
            Err(FieldError::InvalidLengthHead { len: 1000 })
        );
    }
}
