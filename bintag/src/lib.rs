//! Pack scalar and array primitives into a flat byte buffer and back, driven
//! by a compact type tag supplied identically at encode and decode time. All
//! packing functions take a writer and return the number of written bytes;
//! all unpacking functions take a buffer plus an explicit starting offset and
//! return the value together with the number of consumed bytes, which always
//! equals what the matching encoder would have produced for that value.
//!
//! # A note on truncated buffers
//!
//! Decoding is deliberately fail-soft: span and array decoders clip to the
//! full elements actually present instead of raising an error, and `cstr`
//! without a terminator decodes through to the buffer's end. Callers detect
//! truncation by comparing the reported byte count to their expectation.
//! Only a scalar that cannot produce a value at all is a `DecodeError::Eof`.
//!
//! # A note on integer widths
//!
//! Varint magnitudes are fixed at 64 bits, so `uv` covers all of `u64` and
//! `iv` all of `i64`; a wire value beyond that is a `DecodeError::Overflow`,
//! never a silent wrap. Fixed-width integer tags stop at 4 bytes — there is
//! no `u8l`/`i8l` on purpose.
//!
//! # Examples
//!
//! ```
//! use bintag::*;
//! use std::borrow::Cow;
//!
//! let fields = [
//!     ("u4b".parse::<Tag>().unwrap(), Value::Unsigned(0x12AB98)),
//!     ("str".parse::<Tag>().unwrap(), Value::Str(Cow::Borrowed("hello"))),
//!     ("bool".parse::<Tag>().unwrap(), Value::Bool(false)),
//! ];
//! let mut buf = Vec::new();
//! pack_seq(&fields, &mut buf).unwrap();
//! assert_eq!(buf, [
//!     0x00, // 0x0012AB98, most significant byte first
//!     0x12,
//!     0xAB,
//!     0x98,
//!     104,  // 'h'
//!     101,  // 'e'
//!     108,  // 'l'
//!     108,  // 'l'
//!     111,  // 'o'
//!     0x00, // false
//! ]);
//! let (values, consumed) = unpack_seq(&buf, 0, &[
//!     ("u4b".parse().unwrap(), None),
//!     ("str".parse().unwrap(), Some(5)),
//!     ("bool".parse().unwrap(), None),
//! ]).unwrap();
//! assert_eq!(values[0], Value::Unsigned(0x12AB98));
//! assert_eq!(values[1], Value::Str(Cow::Borrowed("hello")));
//! assert_eq!(values[2], Value::Bool(false));
//! assert_eq!(10, consumed);
//! ```

mod error;
mod numeric;
mod scalar;
mod seq;
mod tag;
mod value;
mod varint;
pub mod endian;

pub use error::*;
pub use seq::*;
pub use tag::*;
pub use value::*;
