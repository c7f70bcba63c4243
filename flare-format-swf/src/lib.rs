// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A decoder for the SWF container format.
//!
//! SWF is a tagged stream of display-list, shape, and script records,
//! optionally compressed with zlib or LZMA. [`decode`] consumes a complete
//! file held in memory and produces an immutable [`SwfFile`] tree; no field
//! is mutated after decoding and the tag order mirrors the on-disk order.

pub mod actions;
pub mod compression;
pub mod filters;
pub mod records;
pub mod shape;
pub mod tags;

mod file;

pub use file::{decode, Signature, SwfFile, SwfHeader};
