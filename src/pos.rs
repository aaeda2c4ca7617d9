// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


/// Location of a character in the input. Both line and col are zero
/// based; line is incremented by 1 in Display, so that, prefixed with
/// a path, it follows the Emacs convention for location information.

#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct Pos {
    pub line: u32,
    pub col: u32,
}

impl Pos {
    /// The position of the character following `c`, if `c` is at
    /// `self`.
    pub fn advance(self, c: char) -> Pos {
        if c == '\n' {
            Pos { line: self.line + 1, col: 0 }
        } else {
            Pos { line: self.line, col: self.col + 1 }
        }
    }
}

impl std::fmt::Display for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_fmt(format_args!("@{}.{}", self.line + 1, self.col))
    }
}
