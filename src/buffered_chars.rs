// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Decode characters and their positions from anything implementing
//! `Read`, using the strict decoder of the `utf-8` crate.

use crate::pos::Pos;
use std::io::{self, Read};
use genawaiter::rc::Gen;
use thiserror::Error;
use utf8::{BufReadDecoder, BufReadDecoderError};

#[derive(Error, Debug)]
pub enum CharsError {
    #[error("IO error: {0}")]
    Io(io::Error),
    #[error("invalid UTF-8 byte sequence {0:x?}")]
    InvalidUtf8(Vec<u8>),
    #[error("input ends inside the UTF-8 sequence {0:x?}")]
    Truncated(Vec<u8>),
}

// Number of bytes of the sequence started by lead byte `b`, or None if
// `b` can't start a multi-byte sequence.
fn sequence_len(b: u8) -> Option<usize> {
    match b {
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None
    }
}

// Whether `bytes` could be completed to a valid character by more
// input.
fn is_incomplete_sequence(bytes: &[u8]) -> bool {
    match bytes.split_first() {
        Some((lead, rest)) => match sequence_len(*lead) {
            Some(n) => bytes.len() < n
                && rest.iter().all(|b| (0x80..=0xBF).contains(b)),
            None => false
        },
        None => false
    }
}

/// Iterate over the characters of `fh`. The iterator ends after the
/// first error.
pub fn buffered_chars<'r, R>(
    fh: R
) -> impl Iterator<Item=Result<(char, Pos), CharsError>> + 'r
    where R: Read + 'r
{
    Gen::new(|co| async move {
        let mut inp = BufReadDecoder::new(io::BufReader::new(fh));
        let mut pos = Pos::default();
        loop {
            let failure = match inp.next_strict() {
                None => return,
                Some(Ok(s)) => {
                    for c in s.chars() {
                        co.yield_(Ok((c, pos))).await;
                        pos = pos.advance(c);
                    }
                    continue;
                }
                Some(Err(BufReadDecoderError::Io(e))) => CharsError::Io(e),
                Some(Err(BufReadDecoderError::InvalidByteSequence(bytes))) =>
                    CharsError::InvalidUtf8(bytes.to_vec()),
            };
            // The decoder reports a sequence cut short by the end of
            // the input like any other invalid one; tell them apart
            // by checking that nothing follows.
            let failure = match failure {
                CharsError::InvalidUtf8(bytes) if is_incomplete_sequence(&bytes) => {
                    if inp.next_strict().is_none() {
                        CharsError::Truncated(bytes)
                    } else {
                        CharsError::InvalidUtf8(bytes)
                    }
                }
                other => other
            };
            co.yield_(Err(failure)).await;
            return;
        }
    }).into_iter()
}
