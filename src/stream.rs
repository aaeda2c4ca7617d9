// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! A character stream with one character of pushback, keeping the
//! characters consumed since the last reset for error messages.

use crate::buffered_chars::{buffered_chars, CharsError};
use crate::parse::{ReadError, ReadErrorWithPos};
use crate::pos::Pos;
use std::io::Read;

pub struct CharStream<'r> {
    chars: Box<dyn Iterator<Item = Result<(char, Pos), CharsError>> + 'r>,
    pushback: Option<(char, Pos)>,
    /// Position of the most recently read character
    last_pos: Pos,
    /// Position of the character the next read will return
    next_pos: Pos,
    inbuf: String,
}

impl<'r> CharStream<'r> {
    pub fn new(fh: impl Read + 'r) -> CharStream<'r> {
        CharStream {
            // fused since the generator must not be resumed after it
            // finished
            chars: Box::new(buffered_chars(fh).fuse()),
            pushback: None,
            last_pos: Pos::default(),
            next_pos: Pos::default(),
            inbuf: String::new(),
        }
    }

    /// Attach the position of the last character read and the
    /// diagnostic buffer to `err`.
    pub fn error(&self, err: ReadError) -> ReadErrorWithPos {
        err.at(self.last_pos, &self.inbuf)
    }

    pub fn read_char(&mut self) -> Result<char, ReadErrorWithPos> {
        let (c, pos) = match self.pushback.take() {
            Some(cp) => cp,
            None => match self.chars.next() {
                Some(Ok(cp)) => cp,
                Some(Err(e)) => return Err(self.error(e.into())),
                None => return Err(self.error(ReadError::Eof)),
            }
        };
        self.last_pos = pos;
        self.next_pos = pos.advance(c);
        self.inbuf.push(c);
        Ok(c)
    }

    /// Make `c` the next character to be read. Only one character can
    /// be pushed back before the next read.
    pub fn unget_char(&mut self, c: char) {
        assert!(self.pushback.is_none(),
                "unget_char: a character was already pushed back");
        self.pushback = Some((c, self.last_pos));
        self.next_pos = self.last_pos;
        self.inbuf.pop();
    }

    pub fn peek_char(&mut self) -> Result<char, ReadErrorWithPos> {
        let c = self.read_char()?;
        self.unget_char(c);
        Ok(c)
    }

    pub fn pos(&self) -> Pos {
        self.next_pos
    }

    /// The characters consumed since the last `reset_inbuf`.
    pub fn inbuf(&self) -> &str {
        &self.inbuf
    }

    pub fn reset_inbuf(&mut self) {
        self.inbuf.clear();
    }

    /// Drop the underlying source, closing files and sockets.
    pub fn close(self) {}
}
