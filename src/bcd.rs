//! Packed decimal (BCD) conversion.
//!
//! Two decimal digits are stored per byte, the first digit of a pair in the
//! high nibble. An odd digit count needs one pad nibble, which is either
//! placed at the end (left-aligned) or at the start (right-aligned):
//!
//! | digits    | left-aligned   | right-aligned  |
//! |-----------|----------------|----------------|
//! | `"1234"`  | `12 34`        | `12 34`        |
//! | `"643"`   | `64 30`        | `06 43`        |
//!
//! Digits are taken by their low four bits, nibbles are turned back into
//! characters as `b'0' + nibble`. Nothing here checks that the input actually
//! consists of digits.

/// Number of bytes needed to pack `digit_count` digits.
pub const fn packed_len(digit_count: usize) -> usize {
    digit_count.div_ceil(2)
}

/// Packs digits left-aligned: an odd count leaves a zero low nibble in the
/// last byte.
pub fn pack_left(digits: &[u8]) -> Vec<u8> {
    digits
        .chunks(2)
        .map(|pair| (nibble(pair[0]) << 4) | pair.get(1).map_or(0, |&low| nibble(low)))
        .collect()
}

/// Packs digits right-aligned: an odd count gets a zero high nibble in the
/// first byte.
pub fn pack_right(digits: &[u8]) -> Vec<u8> {
    let mut packed = Vec::with_capacity(packed_len(digits.len()));
    let rest = if digits.len() % 2 == 1 {
        packed.push(nibble(digits[0]));
        &digits[1..]
    } else {
        digits
    };
    packed.extend(
        rest.chunks_exact(2)
            .map(|pair| (nibble(pair[0]) << 4) | nibble(pair[1])),
    );
    packed
}

/// Returns the first `digit_count` digits of left-aligned packed `bytes`.
///
/// `bytes` must hold at least [`packed_len`]`(digit_count)` bytes, otherwise
/// fewer digits are returned.
pub fn unpack_left(bytes: &[u8], digit_count: usize) -> Vec<u8> {
    debug_assert!(bytes.len() >= packed_len(digit_count));
    let mut digits = unpack(bytes);
    digits.truncate(digit_count);
    digits
}

/// Returns the last `digit_count` digits of right-aligned packed `bytes`.
///
/// Same precondition as [`unpack_left`].
pub fn unpack_right(bytes: &[u8], digit_count: usize) -> Vec<u8> {
    debug_assert!(bytes.len() >= packed_len(digit_count));
    let mut digits = unpack(bytes);
    let skip = digits.len().saturating_sub(digit_count);
    digits.drain(..skip);
    digits
}

fn unpack(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .flat_map(|&byte| [b'0' + (byte >> 4), b'0' + (byte & 0x0f)])
        .collect()
}

const fn nibble(digit: u8) -> u8 {
    digit & 0x0f
}
