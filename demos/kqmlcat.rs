// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


use kqml::parse::Reader;
use kqml::read::{read_file, read_stream, write_all};
use kqml::value::KqmlList;
use clap::Parser as ClapParser;
use std::io::{stdin, stdout, BufWriter};
use std::path::PathBuf;
use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;


#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Read the input as a stream of messages and report each one
    /// (default: read all top-level lists first)
    #[clap(short, long, value_parser)]
    messages: bool,
    /// Print the parsed data
    #[clap(long, value_parser)]
    print: bool,
    /// Show the value of this keyword argument of each message (only
    /// with --messages)
    #[clap(short, long, value_parser)]
    keyword: Option<String>,
    /// Path to the input file, `-` for stdin
    #[clap(value_parser, required(true))]
    input_path: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let is_stdin = args.input_path.as_os_str() == "-";

    if args.messages {

        // Read message by message, as an agent would from a
        // connection, stopping at the first error.

        let mut count = 0;
        let mut reader =
            if is_stdin {
                Reader::new(stdin().lock())
            } else {
                Reader::new(std::fs::File::open(&args.input_path)?)
            };
        for p in reader.performatives() {
            let p = match p {
                Ok(p) => p,
                Err(e) => bail!("{:?}: {}", args.input_path, e),
            };
            count += 1;
            let verb = p.verb().unwrap_or("(no verb)");
            if let Some(keyword) = &args.keyword {
                match p.get(keyword) {
                    Some(v) => println!("{verb} {keyword} {v}"),
                    None => println!("{verb} {keyword} -"),
                }
            } else if args.print {
                println!("{p}");
            } else {
                println!("{verb}");
            }
        }
        println!(";; count_messages = {count}");

    } else {

        // Slurp in the whole input as a list of forms, then
        // optionally print those.

        let v: Vec<KqmlList> =
            if is_stdin {
                read_stream(stdin().lock(), "stdin")?
            } else {
                read_file(&args.input_path)?
            };
        if args.print {
            write_all(BufWriter::new(stdout()), &v)?;
        }
        println!(";; count_toplevel = {}", v.len());

    }
    Ok(())
}
