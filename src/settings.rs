// Copyright 2023 Christian Jaeger <ch@christianjaeger.ch>. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.


//! Settings for the reader.

#[derive(Debug, Clone, Copy)]
pub struct Settings {
    /// Maximum nesting of lists and quotations. The limit with default
    /// settings on Linux is around 1200 for the main thread.
    pub depth_fuel: u32,
    /// Emit a trace event for every performative read.
    pub trace_performatives: bool,
}

pub const DEFAULT_SETTINGS : Settings = Settings {
    depth_fuel: 500,
    trace_performatives: true,
};

pub const SHALLOW_SETTINGS : Settings = Settings {
    // enough for messages with nested :content
    depth_fuel: 32,
    trace_performatives: false,
};

impl Default for Settings {
    fn default() -> Settings {
        DEFAULT_SETTINGS
    }
}
