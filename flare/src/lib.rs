// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Project Flare
//!
//! Flare is a 100% pure Rust decoding library for the legacy Flash file
//! formats: the SWF container and the ABC (AVM2 bytecode) blocks embedded
//! inside it.
//!
//! ## Formats
//!
//! | Format | Feature Flag | Default |
//! |--------|--------------|---------|
//! | SWF    | `swf`        | Yes     |
//! | ABC    | `abc`        | Yes     |
//!
//! ## Usage
//!
//! Decoding is a pure function from bytes to an immutable record tree; no
//! file I/O is performed. Load a file into memory and hand it to
//! [`decode_swf`]. Script blocks inside the decoded file
//! ([`swf::tags::DoAbc`]) hold their block bytes raw; feed them to
//! [`decode_abc`] on demand.
//!
//! ```no_run
//! let bytes = std::fs::read("movie.swf").expect("readable file");
//! let movie = flare::decode_swf(&bytes).expect("a well-formed file");
//!
//! for tag in &movie.tags {
//!     if let flare::swf::tags::Tag::DoAbc(block) = tag {
//!         let abc = flare::decode_abc(&block.data).expect("a well-formed block");
//!         println!("{}: {} classes", block.name, abc.classes.len());
//!     }
//! }
//! ```

pub use flare_core as core;

#[cfg(feature = "abc")]
pub use flare_format_abc as abc;

#[cfg(feature = "swf")]
pub use flare_format_swf as swf;

/// Decodes an in-memory SWF file.
#[cfg(feature = "swf")]
pub fn decode_swf(data: &[u8]) -> flare_core::errors::Result<swf::SwfFile> {
    swf::decode(data)
}

/// Decodes an in-memory ABC block.
#[cfg(feature = "abc")]
pub fn decode_abc(data: &[u8]) -> flare_core::errors::Result<abc::AbcFile> {
    abc::decode(data)
}
