// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::borrow::Cow;

use flare_core::errors::{Error, Result};
use flare_core::io::BitReader;

use crate::compression;
use crate::records::Rectangle;
use crate::tags::{Tag, TagIterator};

/// The compression scheme declared by a SWF signature.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Signature {
    /// "FWS": no compression.
    Uncompressed,
    /// "CWS": the body is zlib compressed.
    Zlib,
    /// "ZWS": the body is LZMA compressed.
    Lzma,
}

impl Signature {
    fn from_bytes(bytes: [u8; 3]) -> Result<Self> {
        match &bytes {
            b"FWS" => Ok(Signature::Uncompressed),
            b"CWS" => Ok(Signature::Zlib),
            b"ZWS" => Ok(Signature::Lzma),
            _ => Err(Error::InvalidSignature(bytes)),
        }
    }
}

/// The file header. The frame rate is kept as the raw 16-bit word it is
/// stored as (conventionally an 8.8 fixed-point value).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SwfHeader {
    pub signature: Signature,
    pub version: u8,
    pub file_length: u32,
    pub frame_size: Rectangle,
    pub frame_rate: u16,
    pub frame_count: u16,
}

/// A decoded SWF file: the header and the top-level tag list in on-disk
/// order. The terminating End tag is consumed but not stored.
#[derive(Clone, Debug, PartialEq)]
pub struct SwfFile {
    pub header: SwfHeader,
    pub tags: Vec<Tag>,
}

/// Decodes a complete SWF file held in memory.
///
/// The signature selects a decompressor for the body; the declared file
/// length is validated against the eight header bytes plus the decompressed
/// body before any tag is decoded.
pub fn decode(data: &[u8]) -> Result<SwfFile> {
    let mut reader = BitReader::new(data);

    let signature =
        Signature::from_bytes([reader.read_u8()?, reader.read_u8()?, reader.read_u8()?])?;
    let version = reader.read_u8()?;
    let file_length = reader.read_u32()?;

    let body: Cow<'_, [u8]> = match signature {
        Signature::Uncompressed => Cow::Borrowed(&data[reader.byte_position()..]),
        Signature::Zlib => {
            Cow::Owned(compression::zlib_decompress(&data[reader.byte_position()..])?)
        }
        Signature::Lzma => {
            // The 32-bit compressed size ahead of the LZMA properties is
            // redundant for decoding; the output size comes from the
            // declared file length instead.
            reader.read_u32()?;
            let expected_len = u64::from(file_length).saturating_sub(8);
            Cow::Owned(compression::lzma_decompress(
                &data[reader.byte_position()..],
                Some(expected_len),
            )?)
        }
    };

    let actual = 8 + body.len() as u64;
    if u64::from(file_length) != actual {
        return Err(Error::UnmatchedFileLength { declared: file_length, actual });
    }

    // The remaining header fields live inside the (possibly compressed)
    // body, so they are read only now.
    let mut reader = BitReader::new(&body);
    let frame_size = Rectangle::read(&mut reader)?;
    let frame_rate = reader.read_u16()?;
    let frame_count = reader.read_u16()?;

    let header = SwfHeader { signature, version, file_length, frame_size, frame_rate, frame_count };

    let mut tags = Vec::new();
    let mut iter = TagIterator::new(&mut reader, version);
    while let Some(tag) = iter.next_tag()? {
        tags.push(tag);
    }

    Ok(SwfFile { header, tags })
}
