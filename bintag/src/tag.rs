//! A type tag names the wire shape of exactly one field. The textual grammar
//! is `{kind}{size}{endian}` for fixed-width numerics (`u2l`, `f8b`, ...),
//! `{kind}v` for varints, and the flat words `bool`, `cstr`, `str` and
//! `bytes`; a `[]` suffix on the numeric and varint forms selects the packed
//! array variant. Tags are parsed once at the call boundary into this closed
//! enum and dispatched exhaustively from there.
//!
//! An unrecognized tag is rejected at parse time with a [TagError]. This is
//! stricter than interpreting unknown tags as raw unsigned bytes; a caller
//! who wants that reading asks for `u1[]` explicitly.

use crate::error::{DecodeError, EncodeError, TagError};
use crate::value::Value;
use crate::{numeric, scalar, varint};
use std::borrow::Cow;
use std::fmt::{Display, Formatter, self};
use std::io::Write;
use std::str::FromStr;

/// Numeric interpretation of a fixed-width element.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Kind { Unsigned, Signed, Float }

/// Byte order of a multi-byte element. Irrelevant at width 1.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Endian { Little, Big }

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Tag {
    /// `u`/`i` at widths 1, 2 and 4, `f` at 4 and 8. 8-byte integers have no
    /// tag on purpose.
    Numeric { kind: Kind, size: u8, endian: Endian, array: bool },
    /// Base-128 continuation-flagged integer, unsigned or sign-and-magnitude.
    Varint { signed: bool, array: bool },
    /// Exactly one byte, any value of 1 or above decodes to `true`.
    Bool,
    /// UTF-8 text with a NUL terminator.
    CStr,
    /// UTF-8 text spanning an out-of-band-agreed length.
    Str,
    /// Raw pass-through slice.
    Bytes,
}

impl FromStr for Tag {
    type Err = TagError;

    fn from_str(s: &str) -> Result<Self, TagError> {
        match s {
            "bool"  => return Ok(Tag::Bool),
            "cstr"  => return Ok(Tag::CStr),
            "str"   => return Ok(Tag::Str),
            "bytes" => return Ok(Tag::Bytes),
            _ => {},
        }
        let (body, array) = match s.strip_suffix("[]") {
            Some(body) => (body, true),
            None => (s, false),
        };
        let unknown = || TagError::Unknown(s.to_string());
        let mut chars = body.chars();
        let kind_char = chars.next().ok_or_else(unknown)?;
        let kind = match kind_char {
            'u' => Kind::Unsigned,
            'i' => Kind::Signed,
            'f' => Kind::Float,
            _ => return Err(unknown()),
        };
        let rest = chars.as_str();
        if rest == "v" {
            return match kind {
                Kind::Float => Err(unknown()),
                _ => Ok(Tag::Varint { signed: kind == Kind::Signed, array }),
            };
        }
        let rest = rest.as_bytes();
        let size = match rest.first().copied() {
            Some(c @ b'0'..=b'9') => c - b'0',
            _ => return Err(unknown()),
        };
        let endian = match (rest.get(1).copied(), size) {
            (None, 1) => Endian::Little,
            (Some(b'l'), _) => Endian::Little,
            (Some(b'b'), _) => Endian::Big,
            _ => return Err(unknown()),
        };
        if rest.len() > 2 {
            return Err(unknown());
        }
        match (kind, size) {
            (Kind::Float, 4 | 8) => {},
            (Kind::Unsigned | Kind::Signed, 1 | 2 | 4) => {},
            _ => return Err(TagError::Width { kind: kind_char, size }),
        }
        Ok(Tag::Numeric { kind, size, endian, array })
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Tag::Bool  => f.write_str("bool"),
            Tag::CStr  => f.write_str("cstr"),
            Tag::Str   => f.write_str("str"),
            Tag::Bytes => f.write_str("bytes"),
            Tag::Varint { signed, array } =>
                write!(f, "{}v{}", if signed { 'i' } else { 'u' }, if array { "[]" } else { "" }),
            Tag::Numeric { kind, size, endian, array } => {
                let kind = match kind { Kind::Unsigned => 'u', Kind::Signed => 'i', Kind::Float => 'f' };
                let array = if array { "[]" } else { "" };
                if size == 1 {
                    write!(f, "{}1{}", kind, array)
                } else {
                    write!(f, "{}{}{}{}", kind, size, match endian { Endian::Little => 'l', Endian::Big => 'b' }, array)
                }
            },
        }
    }
}

impl Tag {

    /// Packs one value under this tag. Returns the number of written bytes.
    /// A value whose shape does not match the tag is an
    /// [EncodeError::Type]; nothing is written in that case.
    pub fn pack<W: Write>(&self, value: &Value, w: &mut W) -> Result<usize, EncodeError> {
        match (*self, value) {
            (Tag::Bool,  Value::Bool(v))  => scalar::encode_bool(*v, w),
            (Tag::CStr,  Value::Str(v))   => scalar::encode_cstr(v, w),
            (Tag::Str,   Value::Str(v))   => scalar::encode_str(v, w),
            (Tag::Bytes, Value::Bytes(v)) => scalar::encode_bytes(v, w),
            (Tag::Varint { signed: false, array: false }, Value::Unsigned(v))      => varint::encode_uvar(*v, w),
            (Tag::Varint { signed: true,  array: false }, Value::Signed(v))        => varint::encode_ivar(*v, w),
            (Tag::Varint { signed: false, array: true },  Value::UnsignedArray(v)) => varint::encode_uvar_array(v, w),
            (Tag::Varint { signed: true,  array: true },  Value::SignedArray(v))   => varint::encode_ivar_array(v, w),
            (Tag::Numeric { kind: Kind::Unsigned, size, endian, array: false }, Value::Unsigned(v))      => numeric::encode_unsigned(&[*v], size, endian, w),
            (Tag::Numeric { kind: Kind::Signed,   size, endian, array: false }, Value::Signed(v))        => numeric::encode_signed(&[*v], size, endian, w),
            (Tag::Numeric { kind: Kind::Float,    size, endian, array: false }, Value::Float(v))         => numeric::encode_float(&[*v], size, endian, w),
            (Tag::Numeric { kind: Kind::Unsigned, size, endian, array: true },  Value::UnsignedArray(v)) => numeric::encode_unsigned(v, size, endian, w),
            (Tag::Numeric { kind: Kind::Signed,   size, endian, array: true },  Value::SignedArray(v))   => numeric::encode_signed(v, size, endian, w),
            (Tag::Numeric { kind: Kind::Float,    size, endian, array: true },  Value::FloatArray(v))    => numeric::encode_float(v, size, endian, w),
            (tag, value) => Err(EncodeError::Type { expected: tag.expects(), found: value.typename() }),
        }
    }

    /// Unpacks one value of this tag from `buf` starting at `offset`.
    /// Returns the value and the number of consumed bytes. `len` is the
    /// optional explicit span argument: an element count for the array tags,
    /// a byte length for `str` and `bytes`; the remaining tags ignore it.
    ///
    /// Span and array decodes clip silently when the buffer is short; a
    /// scalar that cannot complete at all is [DecodeError::Eof]. Truncation
    /// is detected by comparing the byte count against expectation.
    pub fn unpack<'a>(&self, buf: &'a [u8], offset: usize, len: Option<usize>) -> Result<(Value<'a>, usize), DecodeError> {
        match *self {
            Tag::Bool  => scalar::decode_bool(buf, offset).map(|(v, c)| (Value::Bool(v), c)),
            Tag::CStr  => scalar::decode_cstr(buf, offset).map(|(v, c)| (Value::Str(Cow::Borrowed(v)), c)),
            Tag::Str   => scalar::decode_str(buf, offset, len).map(|(v, c)| (Value::Str(Cow::Borrowed(v)), c)),
            Tag::Bytes => {
                let (v, c) = scalar::decode_bytes(buf, offset, len);
                Ok((Value::Bytes(Cow::Borrowed(v)), c))
            },
            Tag::Varint { signed: false, array: false } => varint::decode_uvar(buf, offset).map(|(v, c)| (Value::Unsigned(v), c)),
            Tag::Varint { signed: true,  array: false } => varint::decode_ivar(buf, offset).map(|(v, c)| (Value::Signed(v), c)),
            Tag::Varint { signed: false, array: true }  => varint::decode_uvar_array(buf, offset, len).map(|(v, c)| (Value::UnsignedArray(v), c)),
            Tag::Varint { signed: true,  array: true }  => varint::decode_ivar_array(buf, offset, len).map(|(v, c)| (Value::SignedArray(v), c)),
            Tag::Numeric { kind, size, endian, array: false } => match kind {
                Kind::Unsigned => {
                    let (values, c) = numeric::decode_unsigned(buf, offset, size, endian, Some(1));
                    values.first().map(|&v| (Value::Unsigned(v), c)).ok_or(DecodeError::Eof)
                },
                Kind::Signed => {
                    let (values, c) = numeric::decode_signed(buf, offset, size, endian, Some(1));
                    values.first().map(|&v| (Value::Signed(v), c)).ok_or(DecodeError::Eof)
                },
                Kind::Float => {
                    let (values, c) = numeric::decode_float(buf, offset, size, endian, Some(1));
                    values.first().map(|&v| (Value::Float(v), c)).ok_or(DecodeError::Eof)
                },
            },
            Tag::Numeric { kind, size, endian, array: true } => Ok(match kind {
                Kind::Unsigned => {
                    let (values, c) = numeric::decode_unsigned(buf, offset, size, endian, len);
                    (Value::UnsignedArray(values), c)
                },
                Kind::Signed => {
                    let (values, c) = numeric::decode_signed(buf, offset, size, endian, len);
                    (Value::SignedArray(values), c)
                },
                Kind::Float => {
                    let (values, c) = numeric::decode_float(buf, offset, size, endian, len);
                    (Value::FloatArray(values), c)
                },
            }),
        }
    }

    /// Name of the value shape this tag packs, for error messages.
    fn expects(&self) -> &'static str {
        match *self {
            Tag::Bool => "bool",
            Tag::CStr | Tag::Str => "string",
            Tag::Bytes => "bytes",
            Tag::Varint { signed: false, array: false } | Tag::Numeric { kind: Kind::Unsigned, array: false, .. } => "unsigned",
            Tag::Varint { signed: true,  array: false } | Tag::Numeric { kind: Kind::Signed,   array: false, .. } => "signed",
            Tag::Numeric { kind: Kind::Float, array: false, .. } => "float",
            Tag::Varint { signed: false, array: true } | Tag::Numeric { kind: Kind::Unsigned, array: true, .. } => "unsigned array",
            Tag::Varint { signed: true,  array: true } | Tag::Numeric { kind: Kind::Signed,   array: true, .. } => "signed array",
            Tag::Numeric { kind: Kind::Float, array: true, .. } => "float array",
        }
    }

}

#[cfg(test)]
mod tests {
    use super::{Endian, Kind, Tag};
    use crate::error::{DecodeError, EncodeError, TagError};
    use crate::value::Value;
    use std::borrow::Cow;

    fn tag(s: &str) -> Tag {
        s.parse().unwrap()
    }

    #[test]
    fn parse_numeric_tags() {
        assert_eq!(tag("u2l"), Tag::Numeric { kind: Kind::Unsigned, size: 2, endian: Endian::Little, array: false });
        assert_eq!(tag("f8b"), Tag::Numeric { kind: Kind::Float, size: 8, endian: Endian::Big, array: false });
        assert_eq!(tag("i4b[]"), Tag::Numeric { kind: Kind::Signed, size: 4, endian: Endian::Big, array: true });
        assert_eq!(tag("u1"), Tag::Numeric { kind: Kind::Unsigned, size: 1, endian: Endian::Little, array: false });
        assert_eq!(tag("i1b[]"), Tag::Numeric { kind: Kind::Signed, size: 1, endian: Endian::Big, array: true });
    }

    #[test]
    fn parse_varint_and_flat_tags() {
        assert_eq!(tag("uv"), Tag::Varint { signed: false, array: false });
        assert_eq!(tag("iv[]"), Tag::Varint { signed: true, array: true });
        assert_eq!(tag("bool"), Tag::Bool);
        assert_eq!(tag("cstr"), Tag::CStr);
        assert_eq!(tag("str"), Tag::Str);
        assert_eq!(tag("bytes"), Tag::Bytes);
    }

    #[test]
    fn unrecognized_tags_fail_fast() {
        for bad in ["", "x4l", "u", "u4", "fv", "u2x", "u4lb", "bool[]", "uvv"] {
            assert_eq!(bad.parse::<Tag>().unwrap_err(), TagError::Unknown(bad.to_string()), "{}", bad);
        }
    }

    #[test]
    fn unsupported_widths_are_their_own_error() {
        assert_eq!("u8l".parse::<Tag>().unwrap_err(), TagError::Width { kind: 'u', size: 8 });
        assert_eq!("i8b[]".parse::<Tag>().unwrap_err(), TagError::Width { kind: 'i', size: 8 });
        assert_eq!("f2l".parse::<Tag>().unwrap_err(), TagError::Width { kind: 'f', size: 2 });
        assert_eq!("u3b".parse::<Tag>().unwrap_err(), TagError::Width { kind: 'u', size: 3 });
    }

    #[test]
    fn display_is_canonical() {
        for s in ["u2l", "i4b", "f8l", "u1", "u4b[]", "uv", "iv[]", "bool", "cstr", "str", "bytes"] {
            assert_eq!(s, format!("{}", tag(s)));
        }
        // size-1 tags shed their endian letter
        assert_eq!("i1", format!("{}", tag("i1b")));
    }

    #[test]
    fn dispatch_roundtrips() {
        let cases: Vec<(Tag, Value)> = vec![
            (tag("bool"), Value::Bool(true)),
            (tag("u4b"), Value::Unsigned(0x12AB98)),
            (tag("i2l"), Value::Signed(-1234)),
            (tag("f8l"), Value::Float(2.75)),
            (tag("uv"), Value::Unsigned(16384)),
            (tag("iv"), Value::Signed(-8191)),
            (tag("cstr"), Value::Str(Cow::Borrowed("grüße"))),
            (tag("u2b[]"), Value::UnsignedArray(vec![1, 2, 3])),
            (tag("iv[]"), Value::SignedArray(vec![0, -63, 8191])),
            (tag("f4l[]"), Value::FloatArray(vec![0.5, -1.25])),
        ];
        for (tag, value) in cases {
            let mut buf = Vec::new();
            let written = tag.pack(&value, &mut buf).unwrap();
            assert_eq!(written, buf.len(), "{}", tag);
            let (decoded, consumed) = tag.unpack(&buf, 0, None).unwrap();
            assert_eq!(decoded, value, "{}", tag);
            assert_eq!(consumed, written, "{}", tag);
        }
    }

    #[test]
    fn reencoding_a_decoded_value_is_byte_identical() {
        let wire = [0x00, 0x12, 0xAB, 0x98];
        let (value, _) = tag("u4b").unpack(&wire, 0, None).unwrap();
        let mut again = Vec::new();
        tag("u4b").pack(&value, &mut again).unwrap();
        assert_eq!(again, wire);
    }

    #[test]
    fn mismatched_value_shape() {
        let mut buf = Vec::new();
        match tag("u4b").pack(&Value::Str(Cow::Borrowed("nope")), &mut buf) {
            Err(EncodeError::Type { expected: "unsigned", found: "string" }) => {},
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
        assert!(buf.is_empty());
    }

    #[test]
    fn scalar_numeric_eof() {
        assert_eq!(tag("u4b").unpack(&[1, 2, 3], 0, None).unwrap_err(), DecodeError::Eof);
        assert_eq!(tag("f8l").unpack(&[], 0, None).unwrap_err(), DecodeError::Eof);
    }

    #[test]
    fn array_unpack_clips() {
        let buf = [0, 1, 0, 2, 0];
        let (value, c) = tag("u2b[]").unpack(&buf, 0, Some(3)).unwrap();
        assert_eq!(value, Value::UnsignedArray(vec![1, 2]));
        assert_eq!(c, 4);
    }
}
