// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! A reader and writer for KQML (Knowledge Query and Manipulation
//! Language) messages, the Lisp-like text format agents use to talk to
//! each other.
//!
//! * `kqml::parse::Reader` reads characters from anything implementing
//!   `Read` (files, sockets, byte slices) and builds
//!   [Expr](value::Expr) trees: tokens, strings (quoted or hashed),
//!   quotations (`'`, `` ` ``, `,`) and lists. Messages
//!   ([Performative](performative::Performative)s) are the lists at the
//!   top level.
//!
//! * `kqml::read` has helpers to read whole files or streams, with the
//!   source named in errors, and to write values back.
//!
//! * Errors carry the position and the characters consumed since the
//!   start of the current message.
//!
//! The reader is strictly blocking and single threaded. It does not
//! check whether a message makes sense (verb, keyword arguments); it
//! only checks the expression syntax.
//!
//! Diagnostics are emitted via `tracing`; they are silent unless the
//! application installs a subscriber.

pub mod buffered_chars;
pub mod classify;
pub mod parse;
pub mod performative;
pub mod pos;
pub mod read;
pub mod settings;
pub mod stream;
pub mod value;
