mod parser;

use bintag::*;
use std::io::{self, Read, Write};
use anyhow::{Context, Result};
use structopt::StructOpt;
use std::str::from_utf8;

/// Decode and print bintag field sequences
#[derive(StructOpt)]
#[structopt(name = "tq")]
struct Opt {
    /// parse a textual field list and write the packed bytes to stdout instead
    #[structopt(short, long)]
    encode: bool,
    /// expected type tags in field order, optionally with an explicit length
    /// after a colon (`str:5`, `u2l[]:3`)
    tags: Vec<String>,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();
    let mut buffer = Vec::new();
    io::stdin().read_to_end(&mut buffer).context("Failed to read stdin")?;
    if opt.encode {
        encode(&buffer)
    } else {
        print(&buffer, &opt.tags)
    }
}

fn print(buffer: &[u8], specs: &[String]) -> Result<()> {
    let fields = specs.iter().map(|s| tag_spec(s)).collect::<Result<Vec<_>>>()?;
    let (values, consumed) = unpack_seq(buffer, 0, &fields).context("Decoding error")?;
    for ((tag, _), value) in fields.iter().zip(values.iter()) {
        println!("{}: {}", tag, value);
    }
    if consumed < buffer.len() {
        eprintln!("warning: {} trailing bytes not covered by any tag", buffer.len() - consumed);
    }
    Ok(())
}

fn encode(buffer: &[u8]) -> Result<()> {
    let string = from_utf8(buffer).context("input is not utf-8")?;
    let fields = parser::parse(string)?;
    let mut out = Vec::new();
    pack_seq(&fields, &mut out)?;
    io::stdout().write_all(&out).context("Failed to write stdout")?;
    Ok(())
}

fn tag_spec(spec: &str) -> Result<(Tag, Option<usize>)> {
    match spec.split_once(':') {
        Some((tag, len)) => {
            let len = len.parse().with_context(|| format!("invalid length in `{}`", spec))?;
            Ok((tag.parse::<Tag>()?, Some(len)))
        },
        None => Ok((spec.parse::<Tag>()?, None)),
    }
}
