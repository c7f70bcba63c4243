// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `tags` module decodes the tagged records that make up the body of a
//! SWF file.
//!
//! A tag header packs a 10-bit code and a 6-bit length into one 16-bit
//! word; a length of 0x3f flags an extended 32-bit length. Each payload is
//! decoded strictly within its declared window: unread remainder is skipped
//! and overreads fail. Unknown codes are not errors; their payloads are
//! captured raw so the tag stream's shape is preserved.

use flare_core::errors::{decode_error, Result};
use flare_core::io::BitReader;

use phf::phf_map;

mod control;
mod define;
mod place;

pub use control::{
    AssetRef, DefineScalingGrid, EnableDebugger, ExportAssets, FileAttributes, FrameLabel,
    ImportAssets, Metadata, ProductInfo, ScriptLimits, SetBackgroundColor, SetTabIndex,
    SymbolClass,
};
pub use define::{
    DefineBinaryData, DefineMorphShape, DefineShape, DefineShape4, DefineSprite, DoAbc,
};
pub use place::{BlendMode, PlaceObject, PlaceObject2, PlaceObject3, RemoveObject, RemoveObject2};

/// Tag types, keyed by their 10-bit tag codes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TagType {
    End,
    ShowFrame,
    DefineShape,
    PlaceObject,
    RemoveObject,
    SetBackgroundColor,
    DefineShape2,
    Protect,
    PlaceObject2,
    RemoveObject2,
    DefineShape3,
    DefineSprite,
    ProductInfo,
    FrameLabel,
    DefineMorphShape,
    ExportAssets,
    ImportAssets,
    EnableDebugger,
    EnableDebugger2,
    ScriptLimits,
    SetTabIndex,
    FileAttributes,
    PlaceObject3,
    ImportAssets2,
    SymbolClass,
    Metadata,
    DefineScalingGrid,
    DoAbc,
    DefineShape4,
    DefineBinaryData,
}

/// The tag registry: decoder dispatch is keyed on the tag code. The map is
/// built at compile time and is read-only during decoding.
static TAG_TYPES: phf::Map<u16, TagType> = phf_map! {
    0u16 => TagType::End,
    1u16 => TagType::ShowFrame,
    2u16 => TagType::DefineShape,
    4u16 => TagType::PlaceObject,
    5u16 => TagType::RemoveObject,
    9u16 => TagType::SetBackgroundColor,
    22u16 => TagType::DefineShape2,
    24u16 => TagType::Protect,
    26u16 => TagType::PlaceObject2,
    28u16 => TagType::RemoveObject2,
    32u16 => TagType::DefineShape3,
    39u16 => TagType::DefineSprite,
    41u16 => TagType::ProductInfo,
    43u16 => TagType::FrameLabel,
    46u16 => TagType::DefineMorphShape,
    56u16 => TagType::ExportAssets,
    57u16 => TagType::ImportAssets,
    58u16 => TagType::EnableDebugger,
    64u16 => TagType::EnableDebugger2,
    65u16 => TagType::ScriptLimits,
    66u16 => TagType::SetTabIndex,
    69u16 => TagType::FileAttributes,
    70u16 => TagType::PlaceObject3,
    71u16 => TagType::ImportAssets2,
    76u16 => TagType::SymbolClass,
    77u16 => TagType::Metadata,
    78u16 => TagType::DefineScalingGrid,
    82u16 => TagType::DoAbc,
    83u16 => TagType::DefineShape4,
    87u16 => TagType::DefineBinaryData,
};

/// Common tag header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TagHeader {
    /// The 10-bit tag code.
    pub code: u16,
    /// The payload length in bytes.
    pub length: u32,
    /// The byte position of the payload.
    pub data_pos: usize,
}

impl TagHeader {
    /// The short-form length value flagging an extended 32-bit length.
    const EXTENDED_LENGTH: u16 = 0x3f;

    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let code_and_length = reader.read_u16()?;

        let code = code_and_length >> 6;
        let mut length = u32::from(code_and_length & 0x003f);

        if length == u32::from(TagHeader::EXTENDED_LENGTH) {
            length = reader.read_u32()?;
        }

        Ok(TagHeader { code, length, data_pos: reader.byte_position() })
    }

    /// The byte position one past the payload.
    pub fn end_pos(&self) -> usize {
        self.data_pos + self.length as usize
    }

    /// The payload bytes not yet consumed at the given position.
    pub fn data_unread_at(&self, pos: usize) -> usize {
        self.end_pos().saturating_sub(pos)
    }
}

/// A tag outside the known set. The payload is captured raw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownTag {
    pub code: u16,
    pub data: Box<[u8]>,
}

/// A decoded tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Tag {
    ShowFrame,
    Protect,
    PlaceObject(PlaceObject),
    PlaceObject2(PlaceObject2),
    PlaceObject3(PlaceObject3),
    RemoveObject(RemoveObject),
    RemoveObject2(RemoveObject2),
    SetBackgroundColor(SetBackgroundColor),
    FrameLabel(FrameLabel),
    ExportAssets(ExportAssets),
    ImportAssets(ImportAssets),
    ImportAssets2(ImportAssets),
    EnableDebugger(EnableDebugger),
    EnableDebugger2(EnableDebugger),
    ScriptLimits(ScriptLimits),
    SetTabIndex(SetTabIndex),
    FileAttributes(FileAttributes),
    SymbolClass(SymbolClass),
    Metadata(Metadata),
    DefineScalingGrid(DefineScalingGrid),
    ProductInfo(ProductInfo),
    DefineShape(DefineShape),
    DefineShape2(DefineShape),
    DefineShape3(DefineShape),
    DefineShape4(DefineShape4),
    DefineMorphShape(DefineMorphShape),
    DefineSprite(DefineSprite),
    DefineBinaryData(DefineBinaryData),
    DoAbc(DoAbc),
    Unknown(UnknownTag),
}

/// An iterator over a stream of tags, enforcing each tag's payload window.
pub struct TagIterator<'r, 'a> {
    reader: &'r mut BitReader<'a>,
    version: u8,
}

impl<'r, 'a> TagIterator<'r, 'a> {
    pub fn new(reader: &'r mut BitReader<'a>, version: u8) -> Self {
        TagIterator { reader, version }
    }

    /// Decodes the next tag, or returns `None` when the End tag is reached.
    pub fn next_tag(&mut self) -> Result<Option<Tag>> {
        self.reader.byte_align();

        let header = TagHeader::read(self.reader)?;

        let Some(tag_type) = TAG_TYPES.get(&header.code).copied() else {
            log::warn!("swf: unknown tag {}, skipping {} bytes", header.code, header.length);
            let data = self.reader.read_boxed_slice(header.length as usize)?;
            return Ok(Some(Tag::Unknown(UnknownTag { code: header.code, data })));
        };

        let reader = &mut *self.reader;
        let version = self.version;

        let tag = match tag_type {
            TagType::End => {
                reader.seek_bytes(header.end_pos())?;
                return Ok(None);
            }
            TagType::ShowFrame => Tag::ShowFrame,
            TagType::Protect => Tag::Protect,
            TagType::PlaceObject => Tag::PlaceObject(PlaceObject::read(&header, reader)?),
            TagType::PlaceObject2 => Tag::PlaceObject2(PlaceObject2::read(version, reader)?),
            TagType::PlaceObject3 => Tag::PlaceObject3(PlaceObject3::read(version, reader)?),
            TagType::RemoveObject => Tag::RemoveObject(RemoveObject::read(reader)?),
            TagType::RemoveObject2 => Tag::RemoveObject2(RemoveObject2::read(reader)?),
            TagType::SetBackgroundColor => {
                Tag::SetBackgroundColor(SetBackgroundColor::read(reader)?)
            }
            TagType::FrameLabel => Tag::FrameLabel(FrameLabel::read(&header, reader)?),
            TagType::ExportAssets => Tag::ExportAssets(ExportAssets::read(reader)?),
            TagType::ImportAssets => Tag::ImportAssets(ImportAssets::read(reader)?),
            TagType::ImportAssets2 => Tag::ImportAssets2(ImportAssets::read_v2(reader)?),
            TagType::EnableDebugger => Tag::EnableDebugger(EnableDebugger::read(reader)?),
            TagType::EnableDebugger2 => Tag::EnableDebugger2(EnableDebugger::read_v2(reader)?),
            TagType::ScriptLimits => Tag::ScriptLimits(ScriptLimits::read(reader)?),
            TagType::SetTabIndex => Tag::SetTabIndex(SetTabIndex::read(reader)?),
            TagType::FileAttributes => Tag::FileAttributes(FileAttributes::read(reader)?),
            TagType::SymbolClass => Tag::SymbolClass(SymbolClass::read(reader)?),
            TagType::Metadata => Tag::Metadata(Metadata::read(reader)?),
            TagType::DefineScalingGrid => Tag::DefineScalingGrid(DefineScalingGrid::read(reader)?),
            TagType::ProductInfo => Tag::ProductInfo(ProductInfo::read(reader)?),
            TagType::DefineShape => Tag::DefineShape(DefineShape::read(1, reader)?),
            TagType::DefineShape2 => Tag::DefineShape2(DefineShape::read(2, reader)?),
            TagType::DefineShape3 => Tag::DefineShape3(DefineShape::read(3, reader)?),
            TagType::DefineShape4 => Tag::DefineShape4(DefineShape4::read(reader)?),
            TagType::DefineMorphShape => Tag::DefineMorphShape(DefineMorphShape::read(reader)?),
            TagType::DefineSprite => Tag::DefineSprite(DefineSprite::read(version, reader)?),
            TagType::DefineBinaryData => {
                Tag::DefineBinaryData(DefineBinaryData::read(&header, reader)?)
            }
            TagType::DoAbc => Tag::DoAbc(DoAbc::read(&header, reader)?),
        };

        // Enforce the payload window: skip what the decoder left unread and
        // reject decoders that consumed past the declared length.
        let pos = self.reader.byte_position();
        if pos > header.end_pos() {
            return decode_error("swf: tag payload overread");
        }
        if pos < header.end_pos() {
            log::debug!(
                "swf: tag {} left {} payload bytes unread",
                header.code,
                header.data_unread_at(pos)
            );
        }
        self.reader.seek_bytes(header.end_pos())?;

        Ok(Some(tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Rgb;

    #[test]
    fn short_form_header() {
        // (1 << 6) | 0: ShowFrame with no payload.
        let mut reader = BitReader::new(&[0x40, 0x00]);
        let header = TagHeader::read(&mut reader).unwrap();
        assert_eq!(header, TagHeader { code: 1, length: 0, data_pos: 2 });
    }

    #[test]
    fn long_form_header() {
        // Short length 0x3f flags a 32-bit length of 256.
        let mut reader = BitReader::new(&[0x3f, 0x00, 0x00, 0x01, 0x00, 0x00]);
        let header = TagHeader::read(&mut reader).unwrap();
        assert_eq!(header, TagHeader { code: 0, length: 256, data_pos: 6 });
    }

    #[test]
    fn end_tag_terminates_iteration() {
        let data = [0x40, 0x00, 0x00, 0x00]; // ShowFrame, End
        let mut reader = BitReader::new(&data);
        let mut tags = TagIterator::new(&mut reader, 6);

        assert_eq!(tags.next_tag().unwrap(), Some(Tag::ShowFrame));
        assert_eq!(tags.next_tag().unwrap(), None);
    }

    #[test]
    fn unknown_tags_are_captured_not_failed() {
        // Tag code 3 is not in the registry; two payload bytes follow, then
        // a SetBackgroundColor that must decode cleanly.
        let data = [0xc2, 0x00, 0xaa, 0xbb, 0x43, 0x02, 0x11, 0x22, 0x33, 0x00, 0x00];
        let mut reader = BitReader::new(&data);
        let mut tags = TagIterator::new(&mut reader, 6);

        assert_eq!(
            tags.next_tag().unwrap(),
            Some(Tag::Unknown(UnknownTag { code: 3, data: Box::from(&[0xaa, 0xbb][..]) }))
        );
        assert_eq!(
            tags.next_tag().unwrap(),
            Some(Tag::SetBackgroundColor(SetBackgroundColor {
                background_color: Rgb { red: 0x11, green: 0x22, blue: 0x33 },
            }))
        );
        assert_eq!(tags.next_tag().unwrap(), None);
    }

    #[test]
    fn unread_payload_remainder_is_skipped() {
        // A RemoveObject2 with two trailing junk bytes; the iterator must
        // resynchronize on the next tag header.
        let data = [0x04, 0x07, 0x05, 0x00, 0xde, 0xad, 0x40, 0x00, 0x00, 0x00];
        let mut reader = BitReader::new(&data);
        let mut tags = TagIterator::new(&mut reader, 6);

        assert_eq!(
            tags.next_tag().unwrap(),
            Some(Tag::RemoveObject2(RemoveObject2 { depth: 5 }))
        );
        assert_eq!(tags.next_tag().unwrap(), Some(Tag::ShowFrame));
        assert_eq!(tags.next_tag().unwrap(), None);
    }
}
