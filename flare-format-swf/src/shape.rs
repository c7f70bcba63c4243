// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `shape` module decodes fill styles, line styles, and the bit-packed
//! shape record stream shared by the DefineShape and DefineMorphShape tag
//! families.
//!
//! Shape decoding is stateful: the widths of fill- and line-style indices
//! are declared up front and may be replaced mid-stream by a style-change
//! record carrying new style arrays. All records after such a record are
//! decoded with the new widths.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use crate::records::{Color, FocalGradient, Gradient, Matrix, Rgba};

const FILL_SOLID: u8 = 0x00;
const FILL_LINEAR_GRADIENT: u8 = 0x10;
const FILL_RADIAL_GRADIENT: u8 = 0x12;
const FILL_FOCAL_RADIAL_GRADIENT: u8 = 0x13;
const FILL_REPEATING_BITMAP: u8 = 0x40;
const FILL_CLIPPED_BITMAP: u8 = 0x41;
const FILL_NON_SMOOTHED_REPEATING_BITMAP: u8 = 0x42;
const FILL_NON_SMOOTHED_CLIPPED_BITMAP: u8 = 0x43;

/// A fill style, discriminated on the wire by a one-byte kind.
#[derive(Clone, Debug, PartialEq)]
pub enum FillStyle {
    Solid(Color),
    LinearGradient { matrix: Matrix, gradient: Gradient },
    RadialGradient { matrix: Matrix, gradient: Gradient },
    FocalRadialGradient { matrix: Matrix, gradient: FocalGradient },
    RepeatingBitmap { bitmap_id: u16, matrix: Matrix },
    ClippedBitmap { bitmap_id: u16, matrix: Matrix },
    NonSmoothedRepeatingBitmap { bitmap_id: u16, matrix: Matrix },
    NonSmoothedClippedBitmap { bitmap_id: u16, matrix: Matrix },
}

impl FillStyle {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;

        let style = match kind {
            FILL_SOLID => FillStyle::Solid(Color::read(shape_version, reader)?),
            FILL_LINEAR_GRADIENT => {
                let matrix = Matrix::read(reader)?;
                let gradient = Gradient::read(shape_version, reader)?;
                FillStyle::LinearGradient { matrix, gradient }
            }
            FILL_RADIAL_GRADIENT => {
                let matrix = Matrix::read(reader)?;
                let gradient = Gradient::read(shape_version, reader)?;
                FillStyle::RadialGradient { matrix, gradient }
            }
            FILL_FOCAL_RADIAL_GRADIENT => {
                let matrix = Matrix::read(reader)?;
                let gradient = FocalGradient::read(shape_version, reader)?;
                FillStyle::FocalRadialGradient { matrix, gradient }
            }
            FILL_REPEATING_BITMAP => {
                let bitmap_id = reader.read_u16()?;
                let matrix = Matrix::read(reader)?;
                FillStyle::RepeatingBitmap { bitmap_id, matrix }
            }
            FILL_CLIPPED_BITMAP => {
                let bitmap_id = reader.read_u16()?;
                let matrix = Matrix::read(reader)?;
                FillStyle::ClippedBitmap { bitmap_id, matrix }
            }
            FILL_NON_SMOOTHED_REPEATING_BITMAP => {
                let bitmap_id = reader.read_u16()?;
                let matrix = Matrix::read(reader)?;
                FillStyle::NonSmoothedRepeatingBitmap { bitmap_id, matrix }
            }
            FILL_NON_SMOOTHED_CLIPPED_BITMAP => {
                let bitmap_id = reader.read_u16()?;
                let matrix = Matrix::read(reader)?;
                FillStyle::NonSmoothedClippedBitmap { bitmap_id, matrix }
            }
            _ => return unknown_discriminator_error("fill style kind", u32::from(kind)),
        };

        Ok(style)
    }
}

/// A line style. The color width follows the shape version.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct LineStyle {
    pub width: u16,
    pub color: Color,
}

impl LineStyle {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let width = reader.read_u16()?;
        let color = Color::read(shape_version, reader)?;

        Ok(LineStyle { width, color })
    }
}

/// Reads a style array count: one byte, with 0xff flagging an extended
/// 16-bit count.
fn read_style_count(reader: &mut BitReader<'_>) -> Result<usize> {
    let count = reader.read_u8()?;
    if count == 0xff {
        Ok(usize::from(reader.read_u16()?))
    }
    else {
        Ok(usize::from(count))
    }
}

pub fn read_fill_style_array(
    shape_version: u8,
    reader: &mut BitReader<'_>,
) -> Result<Vec<FillStyle>> {
    let count = read_style_count(reader)?;
    let mut styles = Vec::with_capacity(count);
    for _ in 0..count {
        styles.push(FillStyle::read(shape_version, reader)?);
    }
    Ok(styles)
}

pub fn read_line_style_array(
    shape_version: u8,
    reader: &mut BitReader<'_>,
) -> Result<Vec<LineStyle>> {
    let count = read_style_count(reader)?;
    let mut styles = Vec::with_capacity(count);
    for _ in 0..count {
        styles.push(LineStyle::read(shape_version, reader)?);
    }
    Ok(styles)
}

/// Replacement style arrays carried by a style-change record, along with the
/// new fill- and line-index widths that apply to all subsequent records.
#[derive(Clone, Debug, PartialEq)]
pub struct NewStyles {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
    pub fill_bits: u32,
    pub line_bits: u32,
}

/// A non-edge record selecting new positions and styles.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct StyleChange {
    pub move_delta: Option<(i32, i32)>,
    pub fill_style_0: Option<u32>,
    pub fill_style_1: Option<u32>,
    pub line_style: Option<u32>,
    pub new_styles: Option<NewStyles>,
}

impl StyleChange {
    fn read(
        flags: u32,
        fill_bits: u32,
        line_bits: u32,
        shape_version: u8,
        reader: &mut BitReader<'_>,
    ) -> Result<Self> {
        let move_delta = if flags & 0x01 != 0 {
            let move_bits = reader.read_ubits(5)?;
            Some((reader.read_sbits(move_bits)?, reader.read_sbits(move_bits)?))
        }
        else {
            None
        };

        let fill_style_0 =
            if flags & 0x02 != 0 { Some(reader.read_ubits(fill_bits)?) } else { None };
        let fill_style_1 =
            if flags & 0x04 != 0 { Some(reader.read_ubits(fill_bits)?) } else { None };
        let line_style = if flags & 0x08 != 0 { Some(reader.read_ubits(line_bits)?) } else { None };

        let new_styles = if flags & 0x10 != 0 {
            let fill_styles = read_fill_style_array(shape_version, reader)?;
            let line_styles = read_line_style_array(shape_version, reader)?;
            let fill_bits = reader.read_ubits(4)?;
            let line_bits = reader.read_ubits(4)?;
            Some(NewStyles { fill_styles, line_styles, fill_bits, line_bits })
        }
        else {
            None
        };

        Ok(StyleChange { move_delta, fill_style_0, fill_style_1, line_style, new_styles })
    }
}

/// A straight edge. A non-general line holds one axis at zero.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StraightEdge {
    pub delta_x: i32,
    pub delta_y: i32,
}

impl StraightEdge {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let bits = reader.read_ubits(4)? + 2;

        let general_line = reader.read_bit()?;
        let vertical_line = if general_line { false } else { reader.read_bit()? };

        let mut delta_x = 0;
        let mut delta_y = 0;
        if general_line || !vertical_line {
            delta_x = reader.read_sbits(bits)?;
        }
        if general_line || vertical_line {
            delta_y = reader.read_sbits(bits)?;
        }

        Ok(StraightEdge { delta_x, delta_y })
    }
}

/// A quadratic bezier edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CurvedEdge {
    pub control_delta_x: i32,
    pub control_delta_y: i32,
    pub anchor_delta_x: i32,
    pub anchor_delta_y: i32,
}

impl CurvedEdge {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let bits = reader.read_ubits(4)? + 2;

        let control_delta_x = reader.read_sbits(bits)?;
        let control_delta_y = reader.read_sbits(bits)?;
        let anchor_delta_x = reader.read_sbits(bits)?;
        let anchor_delta_y = reader.read_sbits(bits)?;

        Ok(CurvedEdge { control_delta_x, control_delta_y, anchor_delta_x, anchor_delta_y })
    }
}

/// One record of a shape's edge stream.
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeRecord {
    StyleChange(StyleChange),
    StraightEdge(StraightEdge),
    CurvedEdge(CurvedEdge),
}

/// A shape: the initial fill- and line-index widths and the edge stream. The
/// terminating end record (five zero bits at a non-edge position) is
/// consumed but not stored.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub fill_bits: u32,
    pub line_bits: u32,
    pub records: Vec<ShapeRecord>,
}

impl Shape {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        reader.byte_align();

        let initial_fill_bits = reader.read_ubits(4)?;
        let initial_line_bits = reader.read_ubits(4)?;

        let mut fill_bits = initial_fill_bits;
        let mut line_bits = initial_line_bits;
        let mut records = Vec::new();

        loop {
            let is_edge = reader.read_bit()?;

            if is_edge {
                if reader.read_bit()? {
                    records.push(ShapeRecord::StraightEdge(StraightEdge::read(reader)?));
                }
                else {
                    records.push(ShapeRecord::CurvedEdge(CurvedEdge::read(reader)?));
                }
            }
            else {
                let flags = reader.read_ubits(5)?;
                if flags == 0 {
                    break;
                }

                let change = StyleChange::read(flags, fill_bits, line_bits, shape_version, reader)?;
                if let Some(new_styles) = &change.new_styles {
                    fill_bits = new_styles.fill_bits;
                    line_bits = new_styles.line_bits;
                }
                records.push(ShapeRecord::StyleChange(change));
            }
        }

        Ok(Shape { fill_bits: initial_fill_bits, line_bits: initial_line_bits, records })
    }
}

/// A shape preceded by its initial fill- and line-style arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeWithStyle {
    pub fill_styles: Vec<FillStyle>,
    pub line_styles: Vec<LineStyle>,
    pub shape: Shape,
}

impl ShapeWithStyle {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let fill_styles = read_fill_style_array(shape_version, reader)?;
        let line_styles = read_line_style_array(shape_version, reader)?;
        let shape = Shape::read(shape_version, reader)?;

        Ok(ShapeWithStyle { fill_styles, line_styles, shape })
    }
}

/// A morph gradient control point: paired start and end stops.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MorphGradRecord {
    pub start_ratio: u8,
    pub start_color: Rgba,
    pub end_ratio: u8,
    pub end_color: Rgba,
}

impl MorphGradRecord {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let start_ratio = reader.read_u8()?;
        let start_color = Rgba::read(reader)?;
        let end_ratio = reader.read_u8()?;
        let end_color = Rgba::read(reader)?;

        Ok(MorphGradRecord { start_ratio, start_color, end_ratio, end_color })
    }
}

/// A morph gradient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MorphGradient {
    pub records: Vec<MorphGradRecord>,
}

impl MorphGradient {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let count = reader.read_u8()?;
        let mut records = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            records.push(MorphGradRecord::read(reader)?);
        }

        Ok(MorphGradient { records })
    }
}

/// A morph fill style: every field comes in paired start and end form.
#[derive(Clone, Debug, PartialEq)]
pub enum MorphFillStyle {
    Solid { start_color: Rgba, end_color: Rgba },
    LinearGradient { start_matrix: Matrix, end_matrix: Matrix, gradient: MorphGradient },
    RadialGradient { start_matrix: Matrix, end_matrix: Matrix, gradient: MorphGradient },
    RepeatingBitmap { bitmap_id: u16, start_matrix: Matrix, end_matrix: Matrix },
    ClippedBitmap { bitmap_id: u16, start_matrix: Matrix, end_matrix: Matrix },
    NonSmoothedRepeatingBitmap { bitmap_id: u16, start_matrix: Matrix, end_matrix: Matrix },
    NonSmoothedClippedBitmap { bitmap_id: u16, start_matrix: Matrix, end_matrix: Matrix },
}

impl MorphFillStyle {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let kind = reader.read_u8()?;

        let style = match kind {
            FILL_SOLID => {
                let start_color = Rgba::read(reader)?;
                let end_color = Rgba::read(reader)?;
                MorphFillStyle::Solid { start_color, end_color }
            }
            FILL_LINEAR_GRADIENT | FILL_RADIAL_GRADIENT => {
                let start_matrix = Matrix::read(reader)?;
                let end_matrix = Matrix::read(reader)?;
                let gradient = MorphGradient::read(reader)?;
                if kind == FILL_LINEAR_GRADIENT {
                    MorphFillStyle::LinearGradient { start_matrix, end_matrix, gradient }
                }
                else {
                    MorphFillStyle::RadialGradient { start_matrix, end_matrix, gradient }
                }
            }
            FILL_REPEATING_BITMAP
            | FILL_CLIPPED_BITMAP
            | FILL_NON_SMOOTHED_REPEATING_BITMAP
            | FILL_NON_SMOOTHED_CLIPPED_BITMAP => {
                let bitmap_id = reader.read_u16()?;
                let start_matrix = Matrix::read(reader)?;
                let end_matrix = Matrix::read(reader)?;
                match kind {
                    FILL_REPEATING_BITMAP => {
                        MorphFillStyle::RepeatingBitmap { bitmap_id, start_matrix, end_matrix }
                    }
                    FILL_CLIPPED_BITMAP => {
                        MorphFillStyle::ClippedBitmap { bitmap_id, start_matrix, end_matrix }
                    }
                    FILL_NON_SMOOTHED_REPEATING_BITMAP => MorphFillStyle::NonSmoothedRepeatingBitmap {
                        bitmap_id,
                        start_matrix,
                        end_matrix,
                    },
                    _ => MorphFillStyle::NonSmoothedClippedBitmap {
                        bitmap_id,
                        start_matrix,
                        end_matrix,
                    },
                }
            }
            _ => return unknown_discriminator_error("morph fill style kind", u32::from(kind)),
        };

        Ok(style)
    }
}

pub fn read_morph_fill_style_array(reader: &mut BitReader<'_>) -> Result<Vec<MorphFillStyle>> {
    let count = read_style_count(reader)?;
    let mut styles = Vec::with_capacity(count);
    for _ in 0..count {
        styles.push(MorphFillStyle::read(reader)?);
    }
    Ok(styles)
}

/// A line cap style.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CapStyle {
    Round,
    None,
    Square,
}

impl CapStyle {
    fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            0 => Ok(CapStyle::Round),
            1 => Ok(CapStyle::None),
            2 => Ok(CapStyle::Square),
            _ => unknown_discriminator_error("cap style", bits),
        }
    }
}

/// A line join style.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum JoinStyle {
    Round,
    Bevel,
    Miter,
}

impl JoinStyle {
    fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            0 => Ok(JoinStyle::Round),
            1 => Ok(JoinStyle::Bevel),
            2 => Ok(JoinStyle::Miter),
            _ => unknown_discriminator_error("join style", bits),
        }
    }
}

/// A version 1 morph line style.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MorphLineStyle {
    pub start_width: u16,
    pub end_width: u16,
    pub start_color: Rgba,
    pub end_color: Rgba,
}

impl MorphLineStyle {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let start_width = reader.read_u16()?;
        let end_width = reader.read_u16()?;
        let start_color = Rgba::read(reader)?;
        let end_color = Rgba::read(reader)?;

        Ok(MorphLineStyle { start_width, end_width, start_color, end_color })
    }
}

/// The stroke fill of a version 2 morph line style: either paired solid
/// colors or an inner morph fill.
#[derive(Clone, Debug, PartialEq)]
pub enum MorphLineFill {
    Color { start_color: Rgba, end_color: Rgba },
    Fill(MorphFillStyle),
}

/// A version 2 morph line style with cap, join, and scaling behavior.
#[derive(Clone, Debug, PartialEq)]
pub struct MorphLineStyle2 {
    pub start_width: u16,
    pub end_width: u16,
    pub start_cap_style: CapStyle,
    pub join_style: JoinStyle,
    pub no_h_scale: bool,
    pub no_v_scale: bool,
    pub pixel_hinting: bool,
    pub no_close: bool,
    pub end_cap_style: CapStyle,
    pub miter_limit_factor: Option<u16>,
    pub fill: MorphLineFill,
}

impl MorphLineStyle2 {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let start_width = reader.read_u16()?;
        let end_width = reader.read_u16()?;

        let start_cap_style = CapStyle::from_bits(reader.read_ubits(2)?)?;
        let join_style = JoinStyle::from_bits(reader.read_ubits(2)?)?;
        let has_fill = reader.read_bit()?;
        let no_h_scale = reader.read_bit()?;
        let no_v_scale = reader.read_bit()?;
        let pixel_hinting = reader.read_bit()?;
        reader.read_ubits(5)?; // reserved
        let no_close = reader.read_bit()?;
        let end_cap_style = CapStyle::from_bits(reader.read_ubits(2)?)?;

        let miter_limit_factor =
            if join_style == JoinStyle::Miter { Some(reader.read_u16()?) } else { None };

        let fill = if has_fill {
            MorphLineFill::Fill(MorphFillStyle::read(reader)?)
        }
        else {
            let start_color = Rgba::read(reader)?;
            let end_color = Rgba::read(reader)?;
            MorphLineFill::Color { start_color, end_color }
        };

        Ok(MorphLineStyle2 {
            start_width,
            end_width,
            start_cap_style,
            join_style,
            no_h_scale,
            no_v_scale,
            pixel_hinting,
            no_close,
            end_cap_style,
            miter_limit_factor,
            fill,
        })
    }
}

/// Morph line styles, in the form selected by the morph shape version.
#[derive(Clone, Debug, PartialEq)]
pub enum MorphLineStyles {
    V1(Vec<MorphLineStyle>),
    V2(Vec<MorphLineStyle2>),
}

pub fn read_morph_line_style_array(
    shape_version: u8,
    reader: &mut BitReader<'_>,
) -> Result<MorphLineStyles> {
    let count = read_style_count(reader)?;

    if shape_version == 1 {
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(MorphLineStyle::read(reader)?);
        }
        Ok(MorphLineStyles::V1(styles))
    }
    else {
        let mut styles = Vec::with_capacity(count);
        for _ in 0..count {
            styles.push(MorphLineStyle2::read(reader)?);
        }
        Ok(MorphLineStyles::V2(styles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Rgb;
    use flare_core::errors::Error;

    #[test]
    fn shape_loop_terminates_on_five_zero_bits() {
        // fill_bits = 1, line_bits = 1; a move-only style change, a general
        // straight edge, then the end record.
        let data = [0x11, 0x04, 0xa2, 0xf6, 0x15, 0x00];
        let shape = Shape::read(1, &mut BitReader::new(&data)).unwrap();

        assert_eq!(shape.fill_bits, 1);
        assert_eq!(shape.line_bits, 1);
        assert_eq!(shape.records.len(), 2);
        assert_eq!(
            shape.records[0],
            ShapeRecord::StyleChange(StyleChange {
                move_delta: Some((2, -2)),
                ..Default::default()
            })
        );
        assert_eq!(
            shape.records[1],
            ShapeRecord::StraightEdge(StraightEdge { delta_x: 1, delta_y: 1 })
        );
    }

    #[test]
    fn vertical_line_leaves_x_at_zero() {
        let data = [0x00, 0xc1, 0x40];
        let shape = Shape::read(1, &mut BitReader::new(&data)).unwrap();

        assert_eq!(
            shape.records[0],
            ShapeRecord::StraightEdge(StraightEdge { delta_x: 0, delta_y: 1 })
        );
    }

    #[test]
    fn new_styles_replace_index_widths() {
        // fill_bits = 0; a style change carrying new styles widens
        // fill_bits to 1, and the following style change reads a one-bit
        // fill index with the new width.
        let data =
            [0x00, 0x40, 0x01, 0x00, 0xff, 0x00, 0x00, 0xff, 0x00, 0x10, 0x0a, 0x00];
        let shape = Shape::read(3, &mut BitReader::new(&data)).unwrap();

        assert_eq!(shape.records.len(), 2);

        match &shape.records[0] {
            ShapeRecord::StyleChange(change) => {
                let new_styles = change.new_styles.as_ref().unwrap();
                assert_eq!(new_styles.fill_bits, 1);
                assert_eq!(new_styles.line_bits, 0);
                assert_eq!(
                    new_styles.fill_styles,
                    vec![FillStyle::Solid(Color::Rgba(Rgba {
                        red: 0xff,
                        green: 0x00,
                        blue: 0x00,
                        alpha: 0xff,
                    }))]
                );
            }
            other => panic!("expected a style change, got {:?}", other),
        }

        assert_eq!(
            shape.records[1],
            ShapeRecord::StyleChange(StyleChange {
                fill_style_0: Some(1),
                ..Default::default()
            })
        );
    }

    #[test]
    fn solid_fill_width_follows_shape_version() {
        let data = [0x00, 0x12, 0x34, 0x56, 0x78];

        let style = FillStyle::read(2, &mut BitReader::new(&data)).unwrap();
        assert_eq!(
            style,
            FillStyle::Solid(Color::Rgb(Rgb { red: 0x12, green: 0x34, blue: 0x56 }))
        );

        let style = FillStyle::read(3, &mut BitReader::new(&data)).unwrap();
        assert_eq!(
            style,
            FillStyle::Solid(Color::Rgba(Rgba {
                red: 0x12,
                green: 0x34,
                blue: 0x56,
                alpha: 0x78,
            }))
        );
    }

    #[test]
    fn unknown_fill_kind_is_an_error() {
        let result = FillStyle::read(1, &mut BitReader::new(&[0x05]));
        assert!(matches!(result, Err(Error::UnknownDiscriminator { value: 0x05, .. })));
    }

    #[test]
    fn extended_style_count() {
        // 0xff flags a 16-bit count; 0x0100 solid styles follow.
        let mut data = vec![0xff, 0x00, 0x01];
        for _ in 0..0x100 {
            data.extend_from_slice(&[0x00, 0x01, 0x02, 0x03]);
        }
        let styles = read_fill_style_array(1, &mut BitReader::new(&data)).unwrap();
        assert_eq!(styles.len(), 0x100);
    }

    #[test]
    fn morph_line_style2_miter_and_colors() {
        let data = [
            0x0a, 0x00, 0x14, 0x00, 0x20, 0x00, 0x00, 0x01, 0xff, 0x00, 0x00, 0xff, 0x00,
            0xff, 0x00, 0xff,
        ];
        let styles =
            read_morph_line_style_array(2, &mut BitReader::new(&[&[0x01][..], &data[..]].concat()));
        let styles = match styles.unwrap() {
            MorphLineStyles::V2(styles) => styles,
            other => panic!("expected v2 styles, got {:?}", other),
        };

        let style = &styles[0];
        assert_eq!(style.start_width, 10);
        assert_eq!(style.end_width, 20);
        assert_eq!(style.join_style, JoinStyle::Miter);
        assert_eq!(style.miter_limit_factor, Some(0x100));
        assert_eq!(
            style.fill,
            MorphLineFill::Color {
                start_color: Rgba { red: 0xff, green: 0x00, blue: 0x00, alpha: 0xff },
                end_color: Rgba { red: 0x00, green: 0xff, blue: 0x00, alpha: 0xff },
            }
        );
    }
}
