// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! A KQML message: a list of a verb followed by keyword arguments,
//! e.g. `(tell :sender a :content (p x))`. Nothing here checks that
//! the list actually has that shape.

use crate::value::{Expr, KqmlList};

#[derive(Debug, Clone, PartialEq)]
pub struct Performative {
    list: KqmlList,
}

impl Performative {
    pub fn from_list(list: KqmlList) -> Performative {
        Performative { list }
    }

    /// The first element of the list, if it is a token.
    pub fn verb(&self) -> Option<&str> {
        self.list.head()
    }

    /// The value of keyword argument `keyword` (including the colon,
    /// e.g. `":content"`).
    pub fn get(&self, keyword: &str) -> Option<&Expr> {
        self.list.get_keyword_arg(keyword)
    }

    pub fn list(&self) -> &KqmlList {
        &self.list
    }

    pub fn into_list(self) -> KqmlList {
        self.list
    }
}

impl TryFrom<Expr> for Performative {
    /// Gives back the expression if it's not a list.
    type Error = Expr;
    fn try_from(e: Expr) -> Result<Performative, Expr> {
        match e {
            Expr::List(l) => Ok(Performative::from_list(l)),
            e => Err(e)
        }
    }
}

impl std::fmt::Display for Performative {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>)
           -> Result<(), std::fmt::Error> {
        write!(f, "{}", self.list)
    }
}
