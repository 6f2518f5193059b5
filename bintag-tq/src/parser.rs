//! Parses the textual field representation that `tq` prints, one `tag: value`
//! entry after another. Value syntax is tag-directed: the tag is parsed
//! first and decides whether the text after the colon is read as a number, a
//! quoted string, a base64 bytes literal or a bracketed list.

use nom::{
    character::complete::{digit1, none_of},
    Finish,
    IResult,
    combinator::{all_consuming, map, map_res, opt, recognize, value},
    sequence::{delimited, preceded, terminated, tuple},
    multi::{many0, separated_list0},
    branch::alt,
    bytes::complete::{tag as sym, take_while, take_while1},
};
use bintag::{Kind, Tag, Value};
use anyhow::{anyhow, Result};
use base64::decode;
use std::borrow::Cow;

const WHITESPACE: &'static str = " \t\r\n";
const B64_CHARS: &'static str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz01234567890+/=";

fn white(i: &str) -> IResult<&str, &str> {
    take_while(move |c| WHITESPACE.contains(c))(i)
}

fn boolean(i: &str) -> IResult<&str, bool> {
    alt((value(true, sym("true")), value(false, sym("false"))))(i)
}

fn unsigned(i: &str) -> IResult<&str, u64> {
    map_res(digit1, |n: &str| n.parse())(i)
}

fn signed(i: &str) -> IResult<&str, i64> {
    map_res(recognize(tuple((opt(sym("-")), digit1))), |n: &str| n.parse())(i)
}

fn float(i: &str) -> IResult<&str, f64> {
    map_res(recognize(tuple((opt(sym("-")), opt(digit1), opt(sym(".")), opt(digit1)))), |n: &str| n.parse())(i)
}

fn bytes(i: &str) -> IResult<&str, Vec<u8>> {
    map_res(delimited(sym("'"), take_while(move |c| B64_CHARS.contains(c)), sym("'")), |b| decode(b))(i)
}

fn string(i: &str) -> IResult<&str, String> {
    delimited(
            sym("\""),
            map(opt(nom::bytes::complete::escaped_transform(
                none_of("\\\""),
                '\\',
                alt((
                        value("\\", sym("\\")),
                        value("\"", sym("\"")),
                        value("\n", sym("n")),
                )))), |c| c.unwrap_or("".into())),
            sym("\"")
    )(i)
}

fn unsigned_list(i: &str) -> IResult<&str, Vec<u64>> {
    delimited(tuple((sym("["), white)), separated_list0(tuple((white, sym(","), white)), unsigned), tuple((white, sym("]"))))(i)
}

fn signed_list(i: &str) -> IResult<&str, Vec<i64>> {
    delimited(tuple((sym("["), white)), separated_list0(tuple((white, sym(","), white)), signed), tuple((white, sym("]"))))(i)
}

fn float_list(i: &str) -> IResult<&str, Vec<f64>> {
    delimited(tuple((sym("["), white)), separated_list0(tuple((white, sym(","), white)), float), tuple((white, sym("]"))))(i)
}

fn tag_name(i: &str) -> IResult<&str, Tag> {
    map_res(recognize(tuple((take_while1(|c: char| c.is_ascii_alphanumeric()), opt(sym("[]"))))), |s: &str| s.parse())(i)
}

fn field_value<'a>(t: &Tag, i: &'a str) -> IResult<&'a str, Value<'static>> {
    match *t {
        Tag::Bool => map(boolean, Value::Bool)(i),
        Tag::CStr | Tag::Str => map(string, |s| Value::Str(Cow::Owned(s)))(i),
        Tag::Bytes => map(bytes, |b| Value::Bytes(Cow::Owned(b)))(i),
        Tag::Varint { signed: false, array: false } => map(unsigned, Value::Unsigned)(i),
        Tag::Varint { signed: true, array: false } => map(signed, Value::Signed)(i),
        Tag::Varint { signed: false, array: true } => map(unsigned_list, Value::UnsignedArray)(i),
        Tag::Varint { signed: true, array: true } => map(signed_list, Value::SignedArray)(i),
        Tag::Numeric { kind, array, .. } => match (kind, array) {
            (Kind::Unsigned, false) => map(unsigned, Value::Unsigned)(i),
            (Kind::Signed, false) => map(signed, Value::Signed)(i),
            (Kind::Float, false) => map(float, Value::Float)(i),
            (Kind::Unsigned, true) => map(unsigned_list, Value::UnsignedArray)(i),
            (Kind::Signed, true) => map(signed_list, Value::SignedArray)(i),
            (Kind::Float, true) => map(float_list, Value::FloatArray)(i),
        },
    }
}

fn field(i: &str) -> IResult<&str, (Tag, Value<'static>)> {
    let (i, t) = tag_name(i)?;
    let (i, _) = tuple((white, sym(":"), white))(i)?;
    let (i, v) = field_value(&t, i)?;
    Ok((i, (t, v)))
}

pub fn parse(i: &str) -> Result<Vec<(Tag, Value<'static>)>> {
    Ok(all_consuming(terminated(many0(preceded(white, field)), white))(i).finish().map_err(|e| anyhow!("{}", e))?.1)
}

#[cfg(test)]
mod tests {
    use super::parse;
    use bintag::Value;
    use std::borrow::Cow;

    #[test]
    fn parses_a_field_list() {
        let fields = parse("u4b: 1223576\nstr: \"hello\"\nbool: false\n").unwrap();
        assert_eq!(fields.len(), 3);
        assert_eq!(fields[0].1, Value::Unsigned(1223576));
        assert_eq!(fields[1].1, Value::Str(Cow::Borrowed("hello")));
        assert_eq!(fields[2].1, Value::Bool(false));
    }

    #[test]
    fn value_syntax_follows_the_tag() {
        let fields = parse("iv: -63 f8l: -0.5 u2l[]: [1, 2, 3] bytes: 'AQID'").unwrap();
        assert_eq!(fields[0].1, Value::Signed(-63));
        assert_eq!(fields[1].1, Value::Float(-0.5));
        assert_eq!(fields[2].1, Value::UnsignedArray(vec![1, 2, 3]));
        assert_eq!(fields[3].1, Value::Bytes(Cow::Borrowed(&[1, 2, 3][..])));
    }

    #[test]
    fn string_escapes() {
        let fields = parse("cstr: \"a \\\"b\\\"\\nc\"").unwrap();
        assert_eq!(fields[0].1, Value::Str(Cow::Borrowed("a \"b\"\nc")));
    }

    #[test]
    fn rejects_trailing_garbage_and_bad_tags() {
        assert!(parse("u4b: 12 what").is_err());
        assert!(parse("u9x: 12").is_err());
        assert!(parse("u4b: \"not a number\"").is_err());
    }
}
