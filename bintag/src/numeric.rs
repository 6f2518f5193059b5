//! Fixed-width numeric arrays. Encoding materializes the values in native
//! byte order at the requested width, then byte-swaps per element when the
//! requested order differs from the host; decoding swaps first and
//! reinterprets after. Values wider than the wire width are truncated to the
//! low bytes (two's complement for signed, `f32` rounding for 4-byte floats).
//!
//! 8-byte integers are deliberately unsupported; the tag parser rejects them.

use crate::endian::{needs_swap, swap_elements};
use crate::error::EncodeError;
use crate::tag::Endian;
use std::convert::TryInto;
use std::io::Write;

/// Returns the number of written bytes, always `values.len() * size`.
pub(crate) fn encode_unsigned<W: Write>(values: &[u64], size: u8, endian: Endian, w: &mut W) -> Result<usize, EncodeError> {
    let mut bytes = Vec::with_capacity(values.len() * size as usize);
    for &v in values {
        match size {
            1 => bytes.push(v as u8),
            2 => bytes.extend_from_slice(&(v as u16).to_ne_bytes()),
            4 => bytes.extend_from_slice(&(v as u32).to_ne_bytes()),
            _ => unreachable!("tag parsing rejects this width"),
        }
    }
    finish(bytes, size, endian, w)
}

pub(crate) fn encode_signed<W: Write>(values: &[i64], size: u8, endian: Endian, w: &mut W) -> Result<usize, EncodeError> {
    let mut bytes = Vec::with_capacity(values.len() * size as usize);
    for &v in values {
        match size {
            1 => bytes.push(v as i8 as u8),
            2 => bytes.extend_from_slice(&(v as i16).to_ne_bytes()),
            4 => bytes.extend_from_slice(&(v as i32).to_ne_bytes()),
            _ => unreachable!("tag parsing rejects this width"),
        }
    }
    finish(bytes, size, endian, w)
}

pub(crate) fn encode_float<W: Write>(values: &[f64], size: u8, endian: Endian, w: &mut W) -> Result<usize, EncodeError> {
    let mut bytes = Vec::with_capacity(values.len() * size as usize);
    for &v in values {
        match size {
            4 => bytes.extend_from_slice(&(v as f32).to_ne_bytes()),
            8 => bytes.extend_from_slice(&v.to_ne_bytes()),
            _ => unreachable!("tag parsing rejects this width"),
        }
    }
    finish(bytes, size, endian, w)
}

fn finish<W: Write>(mut bytes: Vec<u8>, size: u8, endian: Endian, w: &mut W) -> Result<usize, EncodeError> {
    if needs_swap(endian, size) {
        swap_elements(&mut bytes, size as usize);
    }
    w.write_all(&bytes)?;
    Ok(bytes.len())
}

/// Returns the decoded numbers and the number of consumed bytes. Reads
/// `count * size` bytes when `count` is given and the rest of the buffer
/// otherwise, silently clipping to the full elements actually present —
/// callers detect truncation by comparing the byte count to expectation.
pub(crate) fn decode_unsigned(buf: &[u8], offset: usize, size: u8, endian: Endian, count: Option<usize>) -> (Vec<u64>, usize) {
    let bytes = native_span(buf, offset, size, endian, count);
    let values = bytes.chunks_exact(size as usize).map(|c| match size {
        1 => c[0] as u64,
        2 => u16::from_ne_bytes(c.try_into().unwrap()) as u64,
        4 => u32::from_ne_bytes(c.try_into().unwrap()) as u64,
        _ => unreachable!("tag parsing rejects this width"),
    }).collect();
    (values, bytes.len())
}

pub(crate) fn decode_signed(buf: &[u8], offset: usize, size: u8, endian: Endian, count: Option<usize>) -> (Vec<i64>, usize) {
    let bytes = native_span(buf, offset, size, endian, count);
    let values = bytes.chunks_exact(size as usize).map(|c| match size {
        1 => c[0] as i8 as i64,
        2 => i16::from_ne_bytes(c.try_into().unwrap()) as i64,
        4 => i32::from_ne_bytes(c.try_into().unwrap()) as i64,
        _ => unreachable!("tag parsing rejects this width"),
    }).collect();
    (values, bytes.len())
}

pub(crate) fn decode_float(buf: &[u8], offset: usize, size: u8, endian: Endian, count: Option<usize>) -> (Vec<f64>, usize) {
    let bytes = native_span(buf, offset, size, endian, count);
    let values = bytes.chunks_exact(size as usize).map(|c| match size {
        4 => f32::from_ne_bytes(c.try_into().unwrap()) as f64,
        8 => f64::from_ne_bytes(c.try_into().unwrap()),
        _ => unreachable!("tag parsing rejects this width"),
    }).collect();
    (values, bytes.len())
}

/// Clips the requested span to the full elements available starting at
/// `offset` and returns it in native byte order.
fn native_span(buf: &[u8], offset: usize, size: u8, endian: Endian, count: Option<usize>) -> Vec<u8> {
    let tail = buf.get(offset..).unwrap_or(&[]);
    let want = match count {
        Some(n) => n.saturating_mul(size as usize).min(tail.len()),
        None => tail.len(),
    };
    let len = want / size as usize * size as usize;
    let mut bytes = tail[..len].to_vec();
    if needs_swap(endian, size) {
        swap_elements(&mut bytes, size as usize);
    }
    bytes
}
