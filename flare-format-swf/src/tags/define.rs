// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Definition tags: shapes, morph shapes, sprites, and embedded data.

use flare_core::errors::Result;
use flare_core::io::BitReader;

use crate::records::Rectangle;
use crate::shape::{
    read_morph_fill_style_array, read_morph_line_style_array, MorphFillStyle, MorphLineStyles,
    Shape, ShapeWithStyle,
};
use crate::tags::{Tag, TagHeader, TagIterator};

/// DefineShape, DefineShape2, and DefineShape3 (tags 2, 22, and 32). The
/// three differ only in the shape version handed to the style decoders.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineShape {
    pub shape_id: u16,
    pub shape_bounds: Rectangle,
    pub shapes: ShapeWithStyle,
}

impl DefineShape {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let shape_id = reader.read_u16()?;
        let shape_bounds = Rectangle::read(reader)?;
        let shapes = ShapeWithStyle::read(shape_version, reader)?;

        Ok(DefineShape { shape_id, shape_bounds, shapes })
    }
}

/// DefineShape4 (tag 83): shape version 4, with a usage-flag prefix ahead
/// of the styles.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineShape4 {
    pub shape_id: u16,
    pub shape_bounds: Rectangle,
    pub uses_fill_winding_rule: bool,
    pub uses_non_scaling_strokes: bool,
    pub uses_scaling_strokes: bool,
    pub shapes: ShapeWithStyle,
}

impl DefineShape4 {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let shape_id = reader.read_u16()?;
        let shape_bounds = Rectangle::read(reader)?;

        reader.read_ubits(5)?; // reserved
        let uses_fill_winding_rule = reader.read_bit()?;
        let uses_non_scaling_strokes = reader.read_bit()?;
        let uses_scaling_strokes = reader.read_bit()?;

        let shapes = ShapeWithStyle::read(4, reader)?;

        Ok(DefineShape4 {
            shape_id,
            shape_bounds,
            uses_fill_winding_rule,
            uses_non_scaling_strokes,
            uses_scaling_strokes,
            shapes,
        })
    }
}

/// DefineMorphShape (tag 46).
#[derive(Clone, Debug, PartialEq)]
pub struct DefineMorphShape {
    pub character_id: u16,
    pub start_bounds: Rectangle,
    pub end_bounds: Rectangle,
    /// Byte offset from the end of this field to the first end-edge record.
    pub offset: u32,
    pub fill_styles: Vec<MorphFillStyle>,
    pub line_styles: MorphLineStyles,
    pub start_edges: Shape,
    pub end_edges: ShapeWithStyle,
}

impl DefineMorphShape {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let character_id = reader.read_u16()?;
        let start_bounds = Rectangle::read(reader)?;
        let end_bounds = Rectangle::read(reader)?;
        let offset = reader.read_u32()?;

        let fill_styles = read_morph_fill_style_array(reader)?;
        let line_styles = read_morph_line_style_array(1, reader)?;

        let start_edges = Shape::read(1, reader)?;
        let end_edges = ShapeWithStyle::read(1, reader)?;

        Ok(DefineMorphShape {
            character_id,
            start_bounds,
            end_bounds,
            offset,
            fill_styles,
            line_styles,
            start_edges,
            end_edges,
        })
    }
}

/// DefineSprite (tag 39): a nested, End-terminated tag stream decoded with
/// the same registry as the top-level stream.
#[derive(Clone, Debug, PartialEq)]
pub struct DefineSprite {
    pub sprite_id: u16,
    pub frame_count: u16,
    pub control_tags: Vec<Tag>,
}

impl DefineSprite {
    pub fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let sprite_id = reader.read_u16()?;
        let frame_count = reader.read_u16()?;

        let mut control_tags = Vec::new();
        let mut tags = TagIterator::new(reader, version);
        while let Some(tag) = tags.next_tag()? {
            control_tags.push(tag);
        }

        Ok(DefineSprite { sprite_id, frame_count, control_tags })
    }
}

/// DefineBinaryData (tag 87): an opaque blob attached to a character id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefineBinaryData {
    pub tag: u16,
    pub data: Box<[u8]>,
}

impl DefineBinaryData {
    pub fn read(header: &TagHeader, reader: &mut BitReader<'_>) -> Result<Self> {
        let tag = reader.read_u16()?;
        reader.read_u32()?; // reserved

        let data = reader.read_boxed_slice(header.data_unread_at(reader.byte_position()))?;

        Ok(DefineBinaryData { tag, data })
    }
}

/// DoAbc (tag 82): an embedded ABC block. The block bytes are captured raw
/// and can be decoded on demand by an ABC decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DoAbc {
    pub flags: u32,
    pub name: String,
    pub data: Box<[u8]>,
}

impl DoAbc {
    pub fn read(header: &TagHeader, reader: &mut BitReader<'_>) -> Result<Self> {
        let flags = reader.read_u32()?;
        let name = reader.read_nul_string()?;

        let data = reader.read_boxed_slice(header.data_unread_at(reader.byte_position()))?;

        Ok(DoAbc { flags, name, data })
    }
}
