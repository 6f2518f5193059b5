//! The flat primitives: `bool`, `cstr`, `str` and `bytes`. Only `cstr`
//! carries any framing of its own (the NUL terminator); `str` and `bytes`
//! spans are agreed out of band, either as an explicit length or as the rest
//! of the buffer.

use crate::error::{DecodeError, EncodeError};
use std::io::Write;
use std::str::from_utf8;

pub(crate) fn encode_bool<W: Write>(value: bool, w: &mut W) -> Result<usize, EncodeError> {
    w.write_all(&[value as u8])?;
    Ok(1)
}

/// Any byte value of 1 or above reads back as `true`.
pub(crate) fn decode_bool(buf: &[u8], offset: usize) -> Result<(bool, usize), DecodeError> {
    let byte = *buf.get(offset).ok_or(DecodeError::Eof)?;
    Ok((byte >= 1, 1))
}

pub(crate) fn encode_cstr<W: Write>(value: &str, w: &mut W) -> Result<usize, EncodeError> {
    w.write_all(value.as_bytes())?;
    w.write_all(&[0])?;
    Ok(value.len() + 1)
}

/// Scans forward for the first NUL. A buffer that ends without one yields
/// the scanned span as the value; the terminator is counted only when it was
/// actually consumed.
pub(crate) fn decode_cstr(buf: &[u8], offset: usize) -> Result<(&str, usize), DecodeError> {
    let tail = buf.get(offset..).unwrap_or(&[]);
    match tail.iter().position(|&b| b == 0) {
        Some(i) => Ok((from_utf8(&tail[..i])?, i + 1)),
        None => Ok((from_utf8(tail)?, tail.len())),
    }
}

pub(crate) fn encode_str<W: Write>(value: &str, w: &mut W) -> Result<usize, EncodeError> {
    w.write_all(value.as_bytes())?;
    Ok(value.len())
}

pub(crate) fn decode_str(buf: &[u8], offset: usize, len: Option<usize>) -> Result<(&str, usize), DecodeError> {
    let (bytes, c) = decode_bytes(buf, offset, len);
    Ok((from_utf8(bytes)?, c))
}

pub(crate) fn encode_bytes<W: Write>(value: &[u8], w: &mut W) -> Result<usize, EncodeError> {
    w.write_all(value)?;
    Ok(value.len())
}

/// Takes `len` bytes, or the rest of the buffer when `len` is absent,
/// clipping silently to what is available.
pub(crate) fn decode_bytes(buf: &[u8], offset: usize, len: Option<usize>) -> (&[u8], usize) {
    let tail = buf.get(offset..).unwrap_or(&[]);
    let take = len.map_or(tail.len(), |l| l.min(tail.len()));
    (&tail[..take], take)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_is_one_byte() {
        let mut buf = Vec::new();
        encode_bool(true, &mut buf).unwrap();
        encode_bool(false, &mut buf).unwrap();
        assert_eq!(buf, [1, 0]);
        assert_eq!(decode_bool(&buf, 0).unwrap(), (true, 1));
        assert_eq!(decode_bool(&buf, 1).unwrap(), (false, 1));
        assert_eq!(decode_bool(&[42], 0).unwrap(), (true, 1));
        assert_eq!(decode_bool(&buf, 2).unwrap_err(), DecodeError::Eof);
    }

    #[test]
    fn cstr_terminator() {
        let mut buf = Vec::new();
        assert_eq!(encode_cstr("abc", &mut buf).unwrap(), 4);
        assert_eq!(buf, [97, 98, 99, 0]);
        assert_eq!(decode_cstr(&[97, 98, 99, 0, 100], 0).unwrap(), ("abc", 4));
    }

    #[test]
    fn cstr_without_terminator_runs_to_end() {
        assert_eq!(decode_cstr(&[104, 105], 0).unwrap(), ("hi", 2));
        assert_eq!(decode_cstr(&[104, 105], 5).unwrap(), ("", 0));
    }

    #[test]
    fn cstr_invalid_utf8() {
        assert!(matches!(decode_cstr(&[0xC3, 0x28, 0x00], 0), Err(DecodeError::Utf8(_))));
    }

    #[test]
    fn str_explicit_and_rest_of_buffer() {
        let buf = b"hello!";
        assert_eq!(decode_str(buf, 0, Some(5)).unwrap(), ("hello", 5));
        assert_eq!(decode_str(buf, 1, None).unwrap(), ("ello!", 5));
        // clipped, not an error
        assert_eq!(decode_str(buf, 4, Some(10)).unwrap(), ("o!", 2));
    }

    #[test]
    fn bytes_are_a_raw_slice() {
        let buf = [1, 2, 3, 4];
        assert_eq!(decode_bytes(&buf, 1, Some(2)), (&buf[1..3], 2));
        assert_eq!(decode_bytes(&buf, 2, None), (&buf[2..], 2));
        assert_eq!(decode_bytes(&buf, 9, None), (&[][..], 0));
        let mut out = Vec::new();
        assert_eq!(encode_bytes(&buf, &mut out).unwrap(), 4);
        assert_eq!(out, buf);
    }
}
