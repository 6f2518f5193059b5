//! Big-endian base-128 variable-length integers. Every transmitted byte
//! except the last carries a set continuation bit (bit 7); payload bits
//! concatenate most-significant-group-first. The signed form spends bit 6 of
//! the first transmitted byte on the sign, leaving it 6 payload bits where
//! every other byte has 7. Zero always encodes with a clear sign bit; there
//! is no negative-zero form on the wire.
//!
//! Magnitudes are fixed at 64 bits: `uvar` covers all of `u64`, `ivar` all of
//! `i64`. A wire value that accumulates past 64 bits is an [Overflow]
//! (DecodeError::Overflow), never a silent wrap.
//!
//! [Overflow]: crate::DecodeError::Overflow

use crate::error::{DecodeError, EncodeError};
use std::io::Write;

const CONT: u8 = 0x80;
const SIGN: u8 = 0x40;

/// Returns the number of written bytes (1 to 10).
pub(crate) fn encode_uvar<W: Write>(value: u64, w: &mut W) -> Result<usize, EncodeError> {
    // collect 7-bit groups least-significant-first, then emit them reversed;
    // only the first collected group (last on the wire) lacks the flag
    let mut groups = [0u8; 10];
    let mut n = 0;
    let mut v = value;
    loop {
        groups[n] = (v & 0x7F) as u8;
        n += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    let mut out = [0u8; 10];
    for (i, g) in (0..n).rev().enumerate() {
        out[i] = if g == 0 { groups[g] } else { groups[g] | CONT };
    }
    w.write_all(&out[..n])?;
    Ok(n)
}

pub(crate) fn encode_ivar<W: Write>(value: i64, w: &mut W) -> Result<usize, EncodeError> {
    let sign = if value < 0 { SIGN } else { 0 };
    let mut mag = value.unsigned_abs();
    // groups below the leading 6-bit one, least-significant-first
    let mut groups = [0u8; 10];
    let mut n = 0;
    while mag > 0x3F {
        groups[n] = (mag & 0x7F) as u8;
        n += 1;
        mag >>= 7;
    }
    let mut out = [0u8; 10];
    out[0] = if n == 0 { 0 } else { CONT } | sign | mag as u8;
    for (i, g) in (0..n).rev().enumerate() {
        out[i + 1] = if g == 0 { groups[g] } else { groups[g] | CONT };
    }
    w.write_all(&out[..n + 1])?;
    Ok(n + 1)
}

/// Returns the decoded value and the number of consumed bytes. A buffer that
/// ends mid-number is `Eof`; array decoding treats that as the clip point
/// instead of an error.
pub(crate) fn decode_uvar(buf: &[u8], offset: usize) -> Result<(u64, usize), DecodeError> {
    let mut acc: u64 = 0;
    let mut pos = offset;
    loop {
        let byte = *buf.get(pos).ok_or(DecodeError::Eof)?;
        pos += 1;
        if acc > u64::MAX >> 7 {
            return Err(DecodeError::Overflow);
        }
        acc = acc << 7 | (byte & !CONT) as u64;
        if byte & CONT == 0 {
            return Ok((acc, pos - offset));
        }
    }
}

pub(crate) fn decode_ivar(buf: &[u8], offset: usize) -> Result<(i64, usize), DecodeError> {
    let mut byte = *buf.get(offset).ok_or(DecodeError::Eof)?;
    let negative = byte & SIGN != 0;
    let mut mag = (byte & 0x3F) as u64;
    let mut pos = offset + 1;
    while byte & CONT != 0 {
        byte = *buf.get(pos).ok_or(DecodeError::Eof)?;
        pos += 1;
        if mag > u64::MAX >> 7 {
            return Err(DecodeError::Overflow);
        }
        mag = mag << 7 | (byte & !CONT) as u64;
    }
    let value = if negative {
        // -(2^63) is representable, +(2^63) is not
        let v = -(mag as i128);
        if v < i64::MIN as i128 {
            return Err(DecodeError::Overflow);
        }
        v as i64
    } else {
        if mag > i64::MAX as u64 {
            return Err(DecodeError::Overflow);
        }
        mag as i64
    };
    Ok((value, pos - offset))
}

pub(crate) fn encode_uvar_array<W: Write>(values: &[u64], w: &mut W) -> Result<usize, EncodeError> {
    values.iter().try_fold(0, |c, &v| Ok(c + encode_uvar(v, w)?))
}

pub(crate) fn encode_ivar_array<W: Write>(values: &[i64], w: &mut W) -> Result<usize, EncodeError> {
    values.iter().try_fold(0, |c, &v| Ok(c + encode_ivar(v, w)?))
}

pub(crate) fn decode_uvar_array(buf: &[u8], offset: usize, count: Option<usize>) -> Result<(Vec<u64>, usize), DecodeError> {
    decode_array(buf, offset, count, decode_uvar)
}

pub(crate) fn decode_ivar_array(buf: &[u8], offset: usize, count: Option<usize>) -> Result<(Vec<i64>, usize), DecodeError> {
    decode_array(buf, offset, count, decode_ivar)
}

/// Repeats a scalar decode `count` times or until the buffer is exhausted.
/// Trailing bytes that do not complete a number are not emitted and not
/// counted; only [Overflow](DecodeError::Overflow) aborts.
fn decode_array<T>(buf: &[u8], offset: usize, count: Option<usize>, decode: impl Fn(&[u8], usize) -> Result<(T, usize), DecodeError>) -> Result<(Vec<T>, usize), DecodeError> {
    let mut values = Vec::new();
    let mut pos = offset;
    while count.map_or(pos < buf.len(), |n| values.len() < n) {
        match decode(buf, pos) {
            Ok((value, c)) => {
                values.push(value);
                pos += c;
            },
            Err(DecodeError::Eof) => break,
            Err(e) => return Err(e),
        }
    }
    Ok((values, pos - offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uvar(value: u64) -> Vec<u8> {
        let mut buf = Vec::new();
        let c = encode_uvar(value, &mut buf).unwrap();
        assert_eq!(c, buf.len());
        buf
    }

    fn ivar(value: i64) -> Vec<u8> {
        let mut buf = Vec::new();
        let c = encode_ivar(value, &mut buf).unwrap();
        assert_eq!(c, buf.len());
        buf
    }

    #[test]
    fn uvar_canonical_bytes() {
        assert_eq!(uvar(0), [0x00]);
        assert_eq!(uvar(127), [0x7F]);
        assert_eq!(uvar(128), [0x81, 0x00]);
        assert_eq!(uvar(16383), [0xFF, 0x7F]);
        assert_eq!(uvar(16384), [0x81, 0x80, 0x00]);
    }

    #[test]
    fn ivar_canonical_bytes() {
        assert_eq!(ivar(0), [0x00]);
        assert_eq!(ivar(63), [0x3F]);
        assert_eq!(ivar(-63), [0x7F]);
        assert_eq!(ivar(8191), [0xBF, 0x7F]);
        assert_eq!(ivar(-8191), [0xFF, 0x7F]);
    }

    #[test]
    fn uvar_roundtrip() {
        for value in [0, 1, 127, 128, 16383, 16384, 0xDEAD_BEEF, u64::MAX] {
            let buf = uvar(value);
            assert_eq!(decode_uvar(&buf, 0).unwrap(), (value, buf.len()));
        }
    }

    #[test]
    fn ivar_roundtrip() {
        for value in [0, 1, -1, 63, -63, 64, -64, 8191, -8192, i64::MAX, i64::MIN] {
            let buf = ivar(value);
            assert_eq!(decode_ivar(&buf, 0).unwrap(), (value, buf.len()));
        }
    }

    #[test]
    fn negative_zero_has_no_wire_form() {
        // a sign bit on a zero magnitude still decodes to plain zero
        assert_eq!(decode_ivar(&[SIGN], 0).unwrap(), (0, 1));
        assert_eq!(ivar(0), [0x00]);
    }

    #[test]
    fn scalar_eof_mid_number() {
        assert_eq!(decode_uvar(&[], 0).unwrap_err(), DecodeError::Eof);
        assert_eq!(decode_uvar(&[0x81], 0).unwrap_err(), DecodeError::Eof);
        assert_eq!(decode_ivar(&[0xFF, 0x80], 0).unwrap_err(), DecodeError::Eof);
    }

    #[test]
    fn overflow_is_an_error() {
        // eleven groups of payload exceed 64 bits
        let buf = [0xFF; 11];
        assert_eq!(decode_uvar(&buf, 0).unwrap_err(), DecodeError::Overflow);
        // positive magnitude 2^63 fits u64 but not i64
        let positive = [0x81, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert_eq!(decode_ivar(&positive, 0).unwrap_err(), DecodeError::Overflow);
        // the same magnitude with the sign bit is exactly i64::MIN
        let negative = [0xC1, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x80, 0x00];
        assert_eq!(decode_ivar(&negative, 0).unwrap(), (i64::MIN, 10));
    }

    #[test]
    fn arrays_pack_back_to_back() {
        let mut buf = Vec::new();
        let c = encode_uvar_array(&[0, 128, 127], &mut buf).unwrap();
        assert_eq!(buf, [0x00, 0x81, 0x00, 0x7F]);
        assert_eq!(c, 4);
        let (values, c) = decode_uvar_array(&buf, 0, None).unwrap();
        assert_eq!(values, [0, 128, 127]);
        assert_eq!(c, 4);
    }

    #[test]
    fn array_count_limits_consumption() {
        let buf = [0x01, 0x02, 0x03];
        let (values, c) = decode_uvar_array(&buf, 0, Some(2)).unwrap();
        assert_eq!(values, [1, 2]);
        assert_eq!(c, 2);
    }

    #[test]
    fn array_drops_partial_trailing_number() {
        // 0x81 opens a number that never completes
        let buf = [0x7F, 0x81];
        let (values, c) = decode_uvar_array(&buf, 0, None).unwrap();
        assert_eq!(values, [127]);
        assert_eq!(c, 1);
        let (values, c) = decode_ivar_array(&buf, 0, Some(5)).unwrap();
        assert_eq!(values, [63]);
        assert_eq!(c, 1);
    }
}
