// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Character classes of the KQML expression grammar.

const SPECIAL_CHARS: &str = "<>=+-*/&^~_@$%:.!?|";

/// Characters that end a token even without whitespace.
const NON_TOKEN_CHARS: &str = "'`\"#()";

/// The punctuation characters KQML allows in words besides letters and
/// digits. Not used for dispatch.
pub fn is_special(c: char) -> bool {
    SPECIAL_CHARS.contains(c)
}

pub fn is_whitespace(c: char) -> bool {
    c.is_whitespace()
}

/// Whether `c` can be part of a token (an unquoted word).
pub fn is_token_char(c: char) -> bool {
    !is_whitespace(c) && !NON_TOKEN_CHARS.contains(c)
}
