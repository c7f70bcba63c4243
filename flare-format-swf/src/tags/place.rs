// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Display-list tags: PlaceObject1/2/3 and RemoveObject1/2.
//!
//! The PlaceObject2/3 payloads are almost entirely optional fields gated by
//! a leading flag byte (or two); absent fields were not present in the
//! stream and decode to `None`.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use crate::actions::ClipActions;
use crate::filters::{read_filter_list, Filter};
use crate::records::{ColorTransform, ColorTransformAlpha, Matrix, Rgba};
use crate::tags::TagHeader;

/// The blend mode of a placed object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Layer,
    Multiply,
    Screen,
    Lighten,
    Darken,
    Difference,
    Add,
    Subtract,
    Invert,
    Alpha,
    Erase,
    Overlay,
    Hardlight,
}

impl BlendMode {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let value = reader.read_u8()?;

        let mode = match value {
            0 | 1 => BlendMode::Normal,
            2 => BlendMode::Layer,
            3 => BlendMode::Multiply,
            4 => BlendMode::Screen,
            5 => BlendMode::Lighten,
            6 => BlendMode::Darken,
            7 => BlendMode::Difference,
            8 => BlendMode::Add,
            9 => BlendMode::Subtract,
            10 => BlendMode::Invert,
            11 => BlendMode::Alpha,
            12 => BlendMode::Erase,
            13 => BlendMode::Overlay,
            14 => BlendMode::Hardlight,
            _ => return unknown_discriminator_error("blend mode", u32::from(value)),
        };

        Ok(mode)
    }
}

/// PlaceObject (tag 4).
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceObject {
    pub character_id: u16,
    pub depth: u16,
    pub matrix: Matrix,
    pub color_transform: Option<ColorTransform>,
}

impl PlaceObject {
    pub fn read(header: &TagHeader, reader: &mut BitReader<'_>) -> Result<Self> {
        let character_id = reader.read_u16()?;
        let depth = reader.read_u16()?;
        let matrix = Matrix::read(reader)?;

        // The trailing color transform is optional; the payload window, not
        // a flag, gates it.
        let color_transform = if header.data_unread_at(reader.byte_position()) > 0 {
            Some(ColorTransform::read(reader)?)
        }
        else {
            None
        };

        Ok(PlaceObject { character_id, depth, matrix, color_transform })
    }
}

/// PlaceObject2 (tag 26).
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceObject2 {
    pub is_move: bool,
    pub depth: u16,
    pub character_id: Option<u16>,
    pub matrix: Option<Matrix>,
    pub color_transform: Option<ColorTransformAlpha>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    pub clip_actions: Option<ClipActions>,
}

impl PlaceObject2 {
    pub fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let has_clip_actions = reader.read_bit()?;
        let has_clip_depth = reader.read_bit()?;
        let has_name = reader.read_bit()?;
        let has_ratio = reader.read_bit()?;
        let has_color_transform = reader.read_bit()?;
        let has_matrix = reader.read_bit()?;
        let has_character = reader.read_bit()?;
        let is_move = reader.read_bit()?;

        let depth = reader.read_u16()?;

        let character_id = if has_character { Some(reader.read_u16()?) } else { None };
        let matrix = if has_matrix { Some(Matrix::read(reader)?) } else { None };
        let color_transform =
            if has_color_transform { Some(ColorTransformAlpha::read(reader)?) } else { None };
        let ratio = if has_ratio { Some(reader.read_u16()?) } else { None };
        let name = if has_name { Some(reader.read_nul_string()?) } else { None };
        let clip_depth = if has_clip_depth { Some(reader.read_u16()?) } else { None };
        let clip_actions =
            if has_clip_actions { Some(ClipActions::read(version, reader)?) } else { None };

        Ok(PlaceObject2 {
            is_move,
            depth,
            character_id,
            matrix,
            color_transform,
            ratio,
            name,
            clip_depth,
            clip_actions,
        })
    }
}

/// PlaceObject3 (tag 70).
#[derive(Clone, Debug, PartialEq)]
pub struct PlaceObject3 {
    pub is_move: bool,
    pub opaque_background: bool,
    pub depth: u16,
    pub class_name: Option<String>,
    pub character_id: Option<u16>,
    pub matrix: Option<Matrix>,
    pub color_transform: Option<ColorTransformAlpha>,
    pub ratio: Option<u16>,
    pub name: Option<String>,
    pub clip_depth: Option<u16>,
    pub surface_filter_list: Option<Vec<Filter>>,
    pub blend_mode: Option<BlendMode>,
    pub bitmap_cache: Option<u8>,
    pub visible: Option<u8>,
    pub background_color: Option<Rgba>,
    pub clip_actions: Option<ClipActions>,
}

impl PlaceObject3 {
    pub fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let has_clip_actions = reader.read_bit()?;
        let has_clip_depth = reader.read_bit()?;
        let has_name = reader.read_bit()?;
        let has_ratio = reader.read_bit()?;
        let has_color_transform = reader.read_bit()?;
        let has_matrix = reader.read_bit()?;
        let has_character = reader.read_bit()?;
        let is_move = reader.read_bit()?;

        let opaque_background = reader.read_bit()?;
        let has_visible = reader.read_bit()?;
        let has_image = reader.read_bit()?;
        let has_class_name = reader.read_bit()?;
        let has_cache_as_bitmap = reader.read_bit()?;
        let has_blend_mode = reader.read_bit()?;
        let has_filter_list = reader.read_bit()?;

        let depth = reader.read_u16()?;

        let class_name = if has_class_name || (has_image && has_character) {
            Some(reader.read_nul_string()?)
        }
        else {
            None
        };

        let character_id = if has_character { Some(reader.read_u16()?) } else { None };
        let matrix = if has_matrix { Some(Matrix::read(reader)?) } else { None };
        let color_transform =
            if has_color_transform { Some(ColorTransformAlpha::read(reader)?) } else { None };
        let ratio = if has_ratio { Some(reader.read_u16()?) } else { None };
        let name = if has_name { Some(reader.read_nul_string()?) } else { None };
        let clip_depth = if has_clip_depth { Some(reader.read_u16()?) } else { None };

        let surface_filter_list =
            if has_filter_list { Some(read_filter_list(reader)?) } else { None };
        let blend_mode = if has_blend_mode { Some(BlendMode::read(reader)?) } else { None };
        let bitmap_cache = if has_cache_as_bitmap { Some(reader.read_u8()?) } else { None };

        let (visible, background_color) = if has_visible {
            (Some(reader.read_u8()?), Some(Rgba::read(reader)?))
        }
        else {
            (None, None)
        };

        let clip_actions =
            if has_clip_actions { Some(ClipActions::read(version, reader)?) } else { None };

        Ok(PlaceObject3 {
            is_move,
            opaque_background,
            depth,
            class_name,
            character_id,
            matrix,
            color_transform,
            ratio,
            name,
            clip_depth,
            surface_filter_list,
            blend_mode,
            bitmap_cache,
            visible,
            background_color,
            clip_actions,
        })
    }
}

/// RemoveObject (tag 5).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemoveObject {
    pub character_id: u16,
    pub depth: u16,
}

impl RemoveObject {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let character_id = reader.read_u16()?;
        let depth = reader.read_u16()?;

        Ok(RemoveObject { character_id, depth })
    }
}

/// RemoveObject2 (tag 28).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RemoveObject2 {
    pub depth: u16,
}

impl RemoveObject2 {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        Ok(RemoveObject2 { depth: reader.read_u16()? })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_object2_optional_fields() {
        // has_character | has_ratio | has_name, depth 1, id 7, ratio 100,
        // name "clip".
        let data = [
            0b0011_0010, 0x01, 0x00, 0x07, 0x00, 0x64, 0x00, b'c', b'l', b'i', b'p', 0x00,
        ];
        let place = PlaceObject2::read(6, &mut BitReader::new(&data)).unwrap();

        assert!(!place.is_move);
        assert_eq!(place.depth, 1);
        assert_eq!(place.character_id, Some(7));
        assert_eq!(place.matrix, None);
        assert_eq!(place.color_transform, None);
        assert_eq!(place.ratio, Some(100));
        assert_eq!(place.name.as_deref(), Some("clip"));
        assert_eq!(place.clip_depth, None);
        assert_eq!(place.clip_actions, None);
    }

    #[test]
    fn place_object_color_transform_gated_by_window() {
        // character 1 at depth 2, identity matrix, no trailing transform.
        let data = [0x01, 0x00, 0x02, 0x00, 0x00];
        let header = TagHeader { code: 4, length: data.len() as u32, data_pos: 0 };
        let place = PlaceObject::read(&header, &mut BitReader::new(&data)).unwrap();

        assert_eq!(place.character_id, 1);
        assert_eq!(place.depth, 2);
        assert_eq!(place.color_transform, None);

        // The same payload with a transform appended.
        let data = [0x01, 0x00, 0x02, 0x00, 0x00, 0x00];
        let header = TagHeader { code: 4, length: data.len() as u32, data_pos: 0 };
        let place = PlaceObject::read(&header, &mut BitReader::new(&data)).unwrap();

        assert_eq!(
            place.color_transform,
            Some(ColorTransform { mult_terms: None, add_terms: None })
        );
    }

    #[test]
    fn place_object3_class_name_and_blend_mode() {
        // Flag bytes: has_character; has_class_name | has_blend_mode.
        let data = [
            0b0000_0010, 0b0001_0100, 0x05, 0x00, b'a', b'.', b'B', 0x00, 0x09, 0x00, 0x03,
        ];
        let place = PlaceObject3::read(8, &mut BitReader::new(&data)).unwrap();

        assert_eq!(place.depth, 5);
        assert_eq!(place.class_name.as_deref(), Some("a.B"));
        assert_eq!(place.character_id, Some(9));
        assert_eq!(place.blend_mode, Some(BlendMode::Multiply));
    }

    #[test]
    fn blend_mode_is_a_closed_set() {
        let result = BlendMode::read(&mut BitReader::new(&[0x0f]));
        assert!(result.is_err());
    }
}
