//! The unit of exchange between tags and codecs is the `Value`. Decoders
//! borrow string and byte content from the input buffer instead of copying,
//! so a decoded value may only live as long as the buffer it came from.

use std::borrow::Cow;
use std::iter::repeat;

/// Every shape of datum a [Tag](crate::Tag) can carry. Fixed-width and
/// variable-length integers share the `Unsigned`/`Signed` variants; the wire
/// width lives in the tag, not the value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    Bool(bool),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Str(Cow<'a, str>),
    Bytes(Cow<'a, [u8]>),
    UnsignedArray(Vec<u64>),
    SignedArray(Vec<i64>),
    FloatArray(Vec<f64>),
}

impl<'a> Value<'a> {

    fn b64(input: &[u8]) -> String {
        const CHAR_SET: &'static [char] = &['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N',
            'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
            'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', '+', '/'
        ];
        let mut array = [0; 4];
        input.chunks(3).flat_map(|chunk| {
            let len = chunk.len();
            array[1..1 + len].copy_from_slice(chunk);
            for i in 0..(3 - len) {
                array[3 - i] = 0;
            }
            let x = u32::from_be_bytes(array);
            (0..=len).map(move |o| CHAR_SET[(x >> (18 - 6*o) & 0x3f) as usize]).chain(repeat('=').take(3-len))
        }).collect()
    }

    /// Returns the name of the value's shape. This is useful for error messages.
    pub fn typename(&self) -> &'static str {
        match *self {
            Self::Bool(_)          => "bool",
            Self::Unsigned(_)      => "unsigned",
            Self::Signed(_)        => "signed",
            Self::Float(_)         => "float",
            Self::Str(_)           => "string",
            Self::Bytes(_)         => "bytes",
            Self::UnsignedArray(_) => "unsigned array",
            Self::SignedArray(_)   => "signed array",
            Self::FloatArray(_)    => "float array",
        }
    }

    /// Discards the borrow and clones whatever still points into the decode
    /// buffer, yielding a value with no outside lifetime.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Bool(v)          => Value::Bool(v),
            Self::Unsigned(v)      => Value::Unsigned(v),
            Self::Signed(v)        => Value::Signed(v),
            Self::Float(v)         => Value::Float(v),
            Self::Str(v)           => Value::Str(Cow::Owned(v.into_owned())),
            Self::Bytes(v)         => Value::Bytes(Cow::Owned(v.into_owned())),
            Self::UnsignedArray(v) => Value::UnsignedArray(v),
            Self::SignedArray(v)   => Value::SignedArray(v),
            Self::FloatArray(v)    => Value::FloatArray(v),
        }
    }

}

fn escape(v: &str) -> String {
    v.replace("\\", "\\\\").replace("\"", "\\\"").replace("\n", "\\n")
}

fn join<T: std::fmt::Display>(v: &[T]) -> String {
    v.iter().map(|e| format!("{}", e)).collect::<Vec<String>>().join(", ")
}

impl<'a> std::fmt::Display for Value<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(true)      => f.write_str("true"),
            Value::Bool(false)     => f.write_str("false"),
            Value::Unsigned(v)     => write!(f, "{}", v),
            Value::Signed(v)       => write!(f, "{}", v),
            Value::Float(v)        => write!(f, "{}", v),
            Value::Str(v)          => write!(f, "\"{}\"", escape(v)),
            Value::Bytes(v)        => write!(f, "'{}'", Self::b64(v).as_str()),
            Value::UnsignedArray(v) => write!(f, "[{}]", join(v)),
            Value::SignedArray(v)   => write!(f, "[{}]", join(v)),
            Value::FloatArray(v)    => write!(f, "[{}]", join(v)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Value;
    use std::borrow::Cow;

    #[test]
    fn display_scalars() {
        assert_eq!("true", format!("{}", Value::Bool(true)));
        assert_eq!("-17", format!("{}", Value::Signed(-17)));
        assert_eq!("3.25", format!("{}", Value::Float(3.25)));
        assert_eq!("\"say \\\"hi\\\"\"", format!("{}", Value::Str(Cow::Borrowed("say \"hi\""))));
    }

    #[test]
    fn display_bytes_b64() {
        assert_eq!("'AQIDBP8='", format!("{}", Value::Bytes(Cow::Borrowed(&[1, 2, 3, 4, 255]))));
        assert_eq!("''", format!("{}", Value::Bytes(Cow::Borrowed(&[]))));
    }

    #[test]
    fn display_arrays() {
        assert_eq!("[1, 2, 3]", format!("{}", Value::UnsignedArray(vec![1, 2, 3])));
        assert_eq!("[]", format!("{}", Value::FloatArray(vec![])));
    }

    #[test]
    fn into_owned_detaches() {
        let buf = b"abc".to_vec();
        let borrowed = Value::Bytes(Cow::Borrowed(&buf));
        let owned = borrowed.into_owned();
        drop(buf);
        assert_eq!(Value::Bytes(Cow::Owned(b"abc".to_vec())), owned);
    }
}
