// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Reading whole inputs at once, with the source named in errors, and
//! writing values back out.

use crate::parse::{Reader, ReadErrorWithPos};
use crate::performative::Performative;
use crate::value::KqmlList;
use std::fmt::{Formatter, Display};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::fs::File;
use thiserror::Error;

/// Where the text being read comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    /// A stream without a path, like stdin or a connection to another
    /// agent.
    Stream(String),
}

impl Source {
    fn preposition(&self) -> &'static str {
        match self {
            Source::File(_) => "in",
            Source::Stream(_) => "from",
        }
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Source::File(path) => f.write_fmt(format_args!("{:?}", path)),
            Source::Stream(name) => f.write_fmt(format_args!("({})", name)),
        }
    }
}

// (The field is not called `source` since thiserror would take that
// for the underlying error.)
#[derive(Error, Debug)]
pub enum ReadErrorWithLocation {
    /// Followed by the position, Emacs style: `in "foo.kqml"@3.12`.
    #[error("{} {} {}{} after {:?}",
            .err.err, .origin.preposition(), .origin, .err.pos, .err.inbuf)]
    Parse { err: ReadErrorWithPos, origin: Source },
    #[error("{origin}: {err}")]
    Io { err: std::io::Error, origin: Source },
}

impl ReadErrorWithLocation {
    pub fn origin(&self) -> &Source {
        match self {
            ReadErrorWithLocation::Parse { origin, .. } => origin,
            ReadErrorWithLocation::Io { origin, .. } => origin,
        }
    }
}

/// Read exactly one message from `fh`; trailing input is left unread.
pub fn read_performative(fh: impl Read) -> Result<Performative, ReadErrorWithPos> {
    Reader::new(fh).read_performative()
}

/// Read all top-level lists until the input ends.
pub fn read_all(fh: impl Read) -> Result<Vec<KqmlList>, ReadErrorWithPos> {
    let mut reader = Reader::new(fh);
    let mut v = Vec::new();
    while let Some(l) = reader.read_list_for_file()? {
        v.push(l);
    }
    Ok(v)
}

pub fn read_file(path: &Path) -> Result<Vec<KqmlList>, ReadErrorWithLocation> {
    let origin = || Source::File(path.to_path_buf());
    let fh = File::open(path)
        .map_err(|err| ReadErrorWithLocation::Io { err, origin: origin() })?;
    read_all(fh)
        .map_err(|err| ReadErrorWithLocation::Parse { err, origin: origin() })
}

/// Like `read_all`, with `name` identifying the stream in errors.
pub fn read_stream(fh: impl Read, name: &str) -> Result<Vec<KqmlList>, ReadErrorWithLocation> {
    read_all(fh).map_err(|err| ReadErrorWithLocation::Parse {
        err,
        origin: Source::Stream(name.to_string())
    })
}

/// Write each value followed by a newline.
pub fn write_all<'t, T: Display + 't>(
    out: impl Write,
    vals: impl IntoIterator<Item = &'t T>
) -> Result<(), std::io::Error> {
    let mut out = out; // for `File`
    for v in vals.into_iter() {
        writeln!(out, "{}", v)?;
    }
    out.flush()
}

pub fn write_file<'t, T: Display + 't>(
    path: &Path,
    vals: impl IntoIterator<Item = &'t T>
) -> Result<(), std::io::Error> {
    write_all(File::create(path)?, vals)
}
