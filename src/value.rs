// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Runtime data types representing a KQML expression.

//! [Expr](Expr) is a token, a string, a quotation or a list; lists are
//! [KqmlList](KqmlList)s, i.e. Rust vectors. The `Display`
//! implementations write the text form that the reader in
//! [parse](../parse/index.html) reads back.

use crate::classify::{is_special, is_token_char};
use std::fmt::Write;
use kstring::KString;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quotekind {
    /// `'`
    Quote,
    /// `` ` ``
    Quasiquote,
    /// `,`, only valid inside a quasiquote
    Unquote,
}

impl Quotekind {
    pub fn from_marker(c: char) -> Option<Quotekind> {
        match c {
            '\'' => Some(Quotekind::Quote),
            '`' => Some(Quotekind::Quasiquote),
            ',' => Some(Quotekind::Unquote),
            _ => None
        }
    }
    pub fn marker(self) -> char {
        match self {
            Quotekind::Quote => '\'',
            Quotekind::Quasiquote => '`',
            Quotekind::Unquote => ',',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Token(KString),
    String(KString),
    Quotation(Quotekind, Box<Expr>),
    List(KqmlList),
}

impl Expr {
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Expr::Token(s) => Some(s.as_str()),
            _ => None
        }
    }
    pub fn as_string(&self) -> Option<&str> {
        match self {
            Expr::String(s) => Some(s.as_str()),
            _ => None
        }
    }
    pub fn as_list(&self) -> Option<&KqmlList> {
        match self {
            Expr::List(l) => Some(l),
            _ => None
        }
    }
    pub fn is_list(&self) -> bool {
        matches!(self, Expr::List(_))
    }
}

/// Easily create a token
pub fn token(s: &str) -> Expr {
    Expr::Token(KString::from_ref(s))
}

/// Easily create a string
pub fn string(s: &str) -> Expr {
    Expr::String(KString::from_ref(s))
}

/// Easily create a quotation
pub fn quotation(kind: Quotekind, e: Expr) -> Expr {
    Expr::Quotation(kind, Box::new(e))
}

/// Whether `s` is a KQML word: non-empty, made of letters, digits and
/// the special characters only.
pub fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || is_special(c))
}

/// Ordered sequence of expressions, the contents of a parenthesized
/// list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KqmlList(Vec<Expr>);

impl KqmlList {
    pub fn new() -> KqmlList {
        KqmlList(Vec::new())
    }
    pub fn append(&mut self, e: Expr) {
        self.0.push(e)
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn get(&self, i: usize) -> Option<&Expr> {
        self.0.get(i)
    }
    pub fn iter(&self) -> std::slice::Iter<'_, Expr> {
        self.0.iter()
    }
    /// The first element, if it is a token.
    pub fn head(&self) -> Option<&str> {
        self.0.first()?.as_token()
    }
    /// The element following the first token equal to `keyword`
    /// (ignoring ASCII case, as KQML keywords are case-insensitive).
    pub fn get_keyword_arg(&self, keyword: &str) -> Option<&Expr> {
        let i = self.0.iter().position(|e| {
            e.as_token().map_or(false, |t| t.eq_ignore_ascii_case(keyword))
        })?;
        self.0.get(i + 1)
    }
    pub fn into_vec(self) -> Vec<Expr> {
        self.0
    }
}

impl From<Vec<Expr>> for KqmlList {
    fn from(v: Vec<Expr>) -> KqmlList {
        KqmlList(v)
    }
}

impl<'t> IntoIterator for &'t KqmlList {
    type Item = &'t Expr;
    type IntoIter = std::slice::Iter<'t, Expr>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

// Quoted form is only usable if reading it back gives the same
// string: the reader keeps `\\` as two characters, so any backslash
// forces the hashed form.
fn fmt_string(f: &mut std::fmt::Formatter<'_>, s: &str)
              -> Result<(), std::fmt::Error> {
    if s.contains('\\') {
        f.write_fmt(format_args!("#{}\"{}", s.chars().count(), s))
    } else {
        f.write_char('"')?;
        for c in s.chars() {
            if c == '"' {
                f.write_char('\\')?;
            }
            f.write_char(c)?;
        }
        f.write_char('"')
    }
}

impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        match self {
            Expr::Token(s) => {
                if !s.starts_with(',') && !s.is_empty()
                    && s.chars().all(is_token_char)
                {
                    f.write_str(s)
                } else {
                    // Not representable as a token; the closest
                    // readable thing is a string.
                    fmt_string(f, s)
                }
            }
            Expr::String(s) => fmt_string(f, s),
            Expr::Quotation(kind, e) => {
                f.write_char(kind.marker())?;
                write!(f, "{}", e)
            }
            Expr::List(l) => write!(f, "{}", l),
        }
    }
}

impl std::fmt::Display for KqmlList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        f.write_char('(')?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "{}", item)?;
        }
        f.write_char(')')
    }
}
