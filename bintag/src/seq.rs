//! Chaining tags over an ordered tuple of fields. A sequence is nothing but
//! the fields' fragments back to back — no padding, no alignment, no length
//! prefixes — so both ends must agree on the tag list out of band.

use crate::error::{DecoderError, EncodeError};
use crate::tag::Tag;
use crate::value::Value;
use std::io::Write;

/// Packs each field in declaration order and returns the total number of
/// written bytes.
pub fn pack_seq<W: Write>(fields: &[(Tag, Value)], w: &mut W) -> Result<usize, EncodeError> {
    let mut c = 0;
    for (tag, value) in fields {
        c += tag.pack(value, w)?;
    }
    Ok(c)
}

/// Unpacks one value per declared `(tag, explicit length)` entry, advancing a
/// running cursor by each field's consumed bytes. Returns the values in
/// declaration order and the total number of consumed bytes; errors carry the
/// input position of the failing field.
pub fn unpack_seq<'a>(buf: &'a [u8], offset: usize, fields: &[(Tag, Option<usize>)]) -> Result<(Vec<Value<'a>>, usize), DecoderError> {
    let mut values = Vec::with_capacity(fields.len());
    let mut pos = offset;
    for (tag, len) in fields {
        let (value, c) = tag.unpack(buf, pos, *len).map_err(|e| e.at(pos))?;
        values.push(value);
        pos += c;
    }
    Ok((values, pos - offset))
}

/// Single-field cursor read: unpacks one value at `at` and returns it
/// together with the advanced cursor.
pub fn read_from<'a>(tag: &Tag, buf: &'a [u8], at: usize, len: Option<usize>) -> Result<(Value<'a>, usize), DecoderError> {
    let (value, c) = tag.unpack(buf, at, len).map_err(|e| e.at(at))?;
    Ok((value, at + c))
}

/// Single-field cursor write into a caller-provided slice: encodes the value
/// at `at` and returns the advanced cursor. A fragment that does not fit is
/// [EncodeError::Space] and leaves `buf` untouched.
pub fn write_to(tag: &Tag, value: &Value, buf: &mut [u8], at: usize) -> Result<usize, EncodeError> {
    let mut fragment = Vec::new();
    tag.pack(value, &mut fragment)?;
    let have = buf.len().saturating_sub(at);
    if fragment.len() > have {
        return Err(EncodeError::Space { need: fragment.len(), have });
    }
    buf[at..at + fragment.len()].copy_from_slice(&fragment);
    Ok(at + fragment.len())
}
