// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Recursive descent reader for KQML expressions. Dispatch looks at
//! one character of lookahead only, so there is no backtracking: a
//! character that doesn't fit is an error right away, and the stream
//! is left wherever the error happened.

use crate::buffered_chars::CharsError;
use crate::classify::{is_token_char, is_whitespace};
use crate::performative::Performative;
use crate::pos::Pos;
use crate::settings::{Settings, DEFAULT_SETTINGS};
use crate::stream::CharStream;
use crate::value::{Expr, KqmlList, Quotekind};
use std::io::Read;
use kstring::KString;
use thiserror::Error;
use tracing::{error, trace};

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("end of input")]
    Eof,
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("IO error ({0})")]
    Io(std::io::Error),
    #[error("invalid UTF-8 byte sequence {0:x?}")]
    InvalidUtf8(Vec<u8>),
    #[error("',' outside of backquote")]
    BadCommand,
    #[error("unexpected character {0:?}")]
    BadCharacter(char),
    /// A non-digit in the length of a hashed string, or the digit that
    /// made the length overflow.
    #[error("invalid character {0:?} in length of hashed string")]
    BadHash(char),
    #[error("expected '(', got {0:?}")]
    BadOpen(char),
    #[error("expected ')', got {0:?}")]
    BadClose(char),
    #[error("expected whitespace, got {0:?}")]
    ExpectedWhitespace(char),
    #[error("expected a list")]
    ExpectedList,
    #[error("nesting too deep")]
    NestingTooDeep,
    // Only reachable through a bug in the dispatch of `read_expr`.
    #[error("not a quotation marker: {0:?}")]
    NotAQuotationMarker(char),
}

impl From<CharsError> for ReadError {
    fn from(e: CharsError) -> ReadError {
        match e {
            CharsError::Io(e) => ReadError::Io(e),
            CharsError::InvalidUtf8(bytes) => ReadError::InvalidUtf8(bytes),
            CharsError::Truncated(_) => ReadError::UnexpectedEof,
        }
    }
}

impl ReadError {
    pub fn at(self, pos: Pos, inbuf: &str) -> ReadErrorWithPos {
        ReadErrorWithPos {
            err: self,
            pos,
            inbuf: inbuf.to_string()
        }
    }
}

/// A `ReadError` with the position where it happened and the
/// characters consumed before it (since the start of the current
/// performative).
#[derive(Error, Debug)]
#[error("{err} {pos} after {inbuf:?}")]
pub struct ReadErrorWithPos {
    pub err: ReadError,
    pub pos: Pos,
    pub inbuf: String,
}

impl ReadErrorWithPos {
    /// End of input before anything was read.
    pub fn is_eof(&self) -> bool {
        matches!(self.err, ReadError::Eof)
    }

    /// The input ended in the middle of something; more input might
    /// have completed it.
    pub fn is_incomplete(&self) -> bool {
        matches!(self.err, ReadError::UnexpectedEof)
    }

    // Once part of an expression was read, running out of input is
    // no longer a clean end.
    fn eof_is_unexpected(mut self) -> ReadErrorWithPos {
        if self.is_eof() {
            self.err = ReadError::UnexpectedEof;
        }
        self
    }
}

fn ends_with_paren(e: &Expr) -> bool {
    match e {
        Expr::List(_) => true,
        Expr::Quotation(_, e) => ends_with_paren(e),
        _ => false
    }
}

pub struct Reader<'r> {
    cs: CharStream<'r>,
    settings: Settings,
}

impl<'r> Reader<'r> {
    pub fn new(fh: impl Read + 'r) -> Reader<'r> {
        Reader::with_settings(fh, &DEFAULT_SETTINGS)
    }

    pub fn with_settings(fh: impl Read + 'r, settings: &Settings) -> Reader<'r> {
        Reader::from_stream(CharStream::new(fh), settings)
    }

    pub fn from_stream(cs: CharStream<'r>, settings: &Settings) -> Reader<'r> {
        Reader { cs, settings: *settings }
    }

    pub fn stream(&self) -> &CharStream<'r> {
        &self.cs
    }

    pub fn close(self) {
        self.cs.close()
    }

    fn fail<T>(&self, err: ReadError) -> Result<T, ReadErrorWithPos> {
        Err(self.cs.error(err))
    }

    // Run `f` on input that must not be empty: end of input before `f`
    // is `Eof`, while `f` running out of input is `UnexpectedEof`.
    fn content<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ReadErrorWithPos>
    ) -> Result<T, ReadErrorWithPos> {
        self.cs.peek_char()?;
        f(self).map_err(ReadErrorWithPos::eof_is_unexpected)
    }

    /// Read one expression. `backquoted` enables `,` (unquote), and is
    /// set while reading the contents of a backquote.
    pub fn read_expr(&mut self, backquoted: bool) -> Result<Expr, ReadErrorWithPos> {
        let fuel = self.settings.depth_fuel;
        self.content(|r| r.expr(backquoted, fuel))
    }

    fn expr(&mut self, backquoted: bool, fuel: u32) -> Result<Expr, ReadErrorWithPos> {
        match self.cs.peek_char()? {
            '\'' | '`' => self.quotation(backquoted, fuel),
            '"' | '#' => self.string(),
            '(' => Ok(Expr::List(self.list(backquoted, fuel)?)),
            ',' => {
                if backquoted {
                    self.quotation(backquoted, fuel)
                } else {
                    self.cs.read_char()?;
                    self.fail(ReadError::BadCommand)
                }
            }
            c if is_token_char(c) => self.read_token(),
            c => {
                self.cs.read_char()?;
                self.fail(ReadError::BadCharacter(c))
            }
        }
    }

    /// Read a run of token characters. The end of the input ends the
    /// token, too.
    pub fn read_token(&mut self) -> Result<Expr, ReadErrorWithPos> {
        let mut buf = String::new();
        loop {
            match self.cs.peek_char() {
                Ok(c) if is_token_char(c) => {
                    self.cs.read_char()?;
                    buf.push(c);
                }
                Ok(c) => {
                    if buf.is_empty() {
                        self.cs.read_char()?;
                        return self.fail(ReadError::BadCharacter(c))
                    }
                    break;
                }
                Err(e) if e.is_eof() && !buf.is_empty() => break,
                Err(e) => return Err(e),
            }
        }
        Ok(Expr::Token(KString::from_string(buf)))
    }

    pub fn read_quotation(&mut self, backquoted: bool) -> Result<Expr, ReadErrorWithPos> {
        let fuel = self.settings.depth_fuel;
        self.content(|r| r.quotation(backquoted, fuel))
    }

    fn quotation(&mut self, backquoted: bool, fuel: u32) -> Result<Expr, ReadErrorWithPos> {
        let c = self.cs.read_char()?;
        let kind = match Quotekind::from_marker(c) {
            Some(kind) => kind,
            None => return self.fail(ReadError::NotAQuotationMarker(c)),
        };
        if fuel == 0 {
            return self.fail(ReadError::NestingTooDeep)
        }
        let backquoted = kind == Quotekind::Quasiquote || backquoted;
        let e = self.expr(backquoted, fuel - 1)?;
        Ok(Expr::Quotation(kind, Box::new(e)))
    }

    /// Read a string in quoted (`"..."`) or hashed (`#3"...`) syntax.
    pub fn read_string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        self.content(|r| r.string())
    }

    fn string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        match self.cs.read_char()? {
            '"' => self.quoted_string(),
            '#' => self.hashed_string(),
            c => self.fail(ReadError::BadCharacter(c)),
        }
    }

    /// Read the rest of a string after the opening `"`.
    pub fn read_quoted_string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        self.quoted_string().map_err(ReadErrorWithPos::eof_is_unexpected)
    }

    fn quoted_string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        let mut buf = String::new();
        loop {
            match self.cs.read_char()? {
                '"' => break,
                '\\' => {
                    let c = self.cs.read_char()?;
                    if c == '\\' {
                        // kept escaped
                        buf.push_str("\\\\");
                    } else {
                        buf.push(c);
                    }
                }
                c => buf.push(c),
            }
        }
        Ok(Expr::String(KString::from_string(buf)))
    }

    /// Read the rest of a hashed string after the `#`: the decimal
    /// length, a `"`, then exactly that many characters, taken as is.
    pub fn read_hashed_string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        self.hashed_string().map_err(ReadErrorWithPos::eof_is_unexpected)
    }

    fn hashed_string(&mut self) -> Result<Expr, ReadErrorWithPos> {
        let mut count: usize = 0;
        loop {
            let c = self.cs.read_char()?;
            if c == '"' {
                break;
            }
            let d = match c.to_digit(10) {
                Some(d) => d as usize,
                None => return self.fail(ReadError::BadHash(c)),
            };
            count = match count.checked_mul(10).and_then(|n| n.checked_add(d)) {
                Some(n) => n,
                None => return self.fail(ReadError::BadHash(c)),
            };
        }
        // The length is untrusted, don't preallocate.
        let mut buf = String::new();
        for _ in 0..count {
            buf.push(self.cs.read_char()?);
        }
        Ok(Expr::String(KString::from_string(buf)))
    }

    pub fn read_list(&mut self, backquoted: bool) -> Result<KqmlList, ReadErrorWithPos> {
        let fuel = self.settings.depth_fuel;
        self.content(|r| r.list(backquoted, fuel))
    }

    fn list(&mut self, backquoted: bool, fuel: u32) -> Result<KqmlList, ReadErrorWithPos> {
        let c = self.cs.read_char()?;
        if c != '(' {
            return self.fail(ReadError::BadOpen(c))
        }
        if fuel == 0 {
            return self.fail(ReadError::NestingTooDeep)
        }
        let mut l = KqmlList::new();
        self.skip_whitespace()?;
        loop {
            if self.cs.peek_char()? == ')' {
                break;
            }
            let e = self.expr(backquoted, fuel - 1)?;
            let after_paren = ends_with_paren(&e);
            l.append(e);
            // sublists need no separator on either side
            if after_paren {
                self.skip_whitespace()?;
            } else {
                let c = self.cs.peek_char()?;
                if c != ')' && c != '(' {
                    self.read_whitespace()?;
                }
            }
        }
        let c = self.cs.read_char()?;
        if c != ')' {
            return self.fail(ReadError::BadClose(c))
        }
        Ok(l)
    }

    /// Read at least one whitespace character.
    pub fn read_whitespace(&mut self) -> Result<(), ReadErrorWithPos> {
        let c = self.cs.read_char()?;
        if !is_whitespace(c) {
            error!("expected whitespace, got {:?}", c);
            return self.fail(ReadError::ExpectedWhitespace(c))
        }
        self.skip_whitespace()
    }

    pub fn skip_whitespace(&mut self) -> Result<(), ReadErrorWithPos> {
        loop {
            let c = self.cs.peek_char()?;
            if !is_whitespace(c) {
                return Ok(())
            }
            self.cs.read_char()?;
        }
    }

    /// Read a message. Gives `Eof` if the input ends before anything
    /// but whitespace.
    pub fn read_performative(&mut self) -> Result<Performative, ReadErrorWithPos> {
        self.cs.reset_inbuf();
        self.skip_whitespace()?;
        // Diagnostics start at the message itself.
        self.cs.reset_inbuf();
        match self.read_expr(false)? {
            Expr::List(l) => {
                let p = Performative::from_list(l);
                if self.settings.trace_performatives {
                    trace!(verb = p.verb().unwrap_or(""), "read performative");
                }
                Ok(p)
            }
            _ => self.fail(ReadError::ExpectedList),
        }
    }

    /// Read the next top-level list of a file. Returns `None` if the
    /// input ends before anything but whitespace; running out of input
    /// inside the list is an `UnexpectedEof` error.
    pub fn read_list_for_file(&mut self) -> Result<Option<KqmlList>, ReadErrorWithPos> {
        match self.skip_whitespace() {
            Err(e) if e.is_eof() => return Ok(None),
            r => r?,
        }
        self.cs.reset_inbuf();
        self.read_list(false).map(Some)
    }

    /// Iterate over the messages in the input until it ends. Iteration
    /// stops after the first error.
    pub fn performatives(&mut self) -> Performatives<'_, 'r> {
        Performatives { reader: self, done: false }
    }
}

pub struct Performatives<'a, 'r> {
    reader: &'a mut Reader<'r>,
    done: bool,
}

impl<'a, 'r> Iterator for Performatives<'a, 'r> {
    type Item = Result<Performative, ReadErrorWithPos>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }
        match self.reader.read_performative() {
            Ok(p) => Some(Ok(p)),
            Err(e) => {
                self.done = true;
                if e.is_eof() {
                    None
                } else {
                    Some(Err(e))
                }
            }
        }
    }
}
