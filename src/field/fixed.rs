//! Fixed length fields. The declared length is never sent on the wire.

use {
    super::{into_text, pack_digits, trace_decoded, unpack_digits, Field},
    crate::{
        encoding::Encoding,
        error::{ensure_fits, ensure_remaining, FieldError, Result},
    },
    bytes::BufMut,
    tracing::debug,
};

/// Digits in a fixed number of positions.
///
/// The declared length counts digits. Shorter values are padded with leading
/// zeros. Supports all encodings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Numeric {
    pub value: String,
}

/// Text in a fixed number of bytes, padded with leading spaces. ASCII only.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Alphanumeric {
    pub value: String,
}

/// Bytes in a fixed number of positions, padded with trailing zero bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Binary {
    pub value: Vec<u8>,

    /// Length seen by the last successful decode. Takes precedence over the
    /// declared length when encoding.
    fixed_len: Option<usize>,
}

impl Numeric {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Alphanumeric {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Binary {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value:     value.into(),
            fixed_len: None,
        }
    }

    pub const fn fixed_len(&self) -> Option<usize> {
        self.fixed_len
    }
}

fn pad_left(value: &[u8], width: usize, fill: u8) -> Vec<u8> {
    let mut padded = vec![fill; width.saturating_sub(value.len())];
    padded.extend_from_slice(value);
    padded
}

impl Field for Numeric {
    fn encode<B: BufMut>(
        &self,
        buffer: &mut B,
        encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<()> {
        let length = length.ok_or(FieldError::MissingLength)?;
        let mut digits = self.value.as_bytes();

        // Values may still carry the rBCD pad digit, e.g. "0643" for length 3
        // when built by hand or taken from another decoder. Drop it.
        if encoding == Encoding::RBcd
            && digits.len().checked_sub(1) == Some(length)
            && digits[0] == b'0'
        {
            debug!(value = %self.value, length, "dropping rBCD pad digit");
            digits = &digits[1..];
        }

        ensure_fits("Numeric", length, digits.len())?;
        let padded = pad_left(digits, length, b'0');
        buffer.put_slice(&pack_digits(encoding, &padded));
        Ok(())
    }

    fn decode(
        &mut self,
        raw: &[u8],
        encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize> {
        let length = length.ok_or(FieldError::MissingLength)?;
        let (digits, read) = unpack_digits(encoding, raw, length)?;
        self.value = into_text(digits)?;
        trace_decoded("Numeric", &raw[..read]);
        Ok(read)
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Field for Alphanumeric {
    fn encode<B: BufMut>(
        &self,
        buffer: &mut B,
        _encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<()> {
        let length = length.ok_or(FieldError::MissingLength)?;
        let text = self.value.as_bytes();
        ensure_fits("Alphanumeric", length, text.len())?;
        buffer.put_slice(&pad_left(text, length, b' '));
        Ok(())
    }

    fn decode(
        &mut self,
        raw: &[u8],
        _encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize> {
        let length = length.ok_or(FieldError::MissingLength)?;
        ensure_remaining(raw, length)?;
        self.value = into_text(raw[..length].to_vec())?;
        trace_decoded("Alphanumeric", &raw[..length]);
        Ok(length)
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

impl Field for Binary {
    fn encode<B: BufMut>(
        &self,
        buffer: &mut B,
        _encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<()> {
        let length = self
            .fixed_len
            .or(length)
            .ok_or(FieldError::MissingLength)?;
        ensure_fits("Binary", length, self.value.len())?;
        buffer.put_slice(&self.value);
        buffer.put_bytes(0, length - self.value.len());
        Ok(())
    }

    fn decode(
        &mut self,
        raw: &[u8],
        _encoding: Encoding,
        _length_encoding: Encoding,
        length: Option<usize>,
    ) -> Result<usize> {
        let length = length.ok_or(FieldError::MissingLength)?;
        ensure_remaining(raw, length)?;
        self.value = raw[..length].to_vec();
        self.fixed_len = Some(length);
        trace_decoded("Binary", &raw[..length]);
        Ok(length)
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}
