//! Field level codecs for ISO 8583 financial messages.
//!
//! Converts field values to and from their wire bytes in ASCII, left-aligned
//! BCD and right-aligned BCD, with the fixed length (`n`, `an`, `b`) and
//! length prefixed (`LLVAR`, `LLLVAR`, `LLNUM`, `LLLNUM`) field formats.
//! Building whole messages (bitmaps, field dictionaries, MACs) is left to the
//! caller.
//!
//! ```
//! use iso8583_field::{Encoding, Field, LlNumeric, Numeric};
//!
//! let pan = LlNumeric::new("12345");
//! assert_eq!(pan.to_bytes(Encoding::Ascii, Encoding::Ascii, None)?, b"0512345");
//!
//! let mut currency = Numeric::default();
//! let read = currency.decode(&[0x06, 0x43], Encoding::RBcd, Encoding::Ascii, Some(3))?;
//! assert_eq!((read, currency.value.as_str()), (2, "643"));
//! # Ok::<(), iso8583_field::FieldError>(())
//! ```

pub mod bcd;
mod definition;
mod encoding;
mod error;
pub mod field;

pub use self::{
    definition::FieldDef,
    encoding::Encoding,
    error::{FieldError, Result},
    field::{
        Alphanumeric, Binary, Field, FieldKind, FieldValue, LlNumeric, LlVar, LllNumeric, LllVar,
        Numeric,
    },
};
