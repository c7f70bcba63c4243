// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `records` module decodes the fixed-layout primitive records shared by
//! many tags: colors, rectangles, matrices, color transforms, gradients, and
//! clip event masks.

use flare_core::errors::Result;
use flare_core::io::BitReader;

use bitflags::bitflags;

/// A 24-bit red, green, blue color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let red = reader.read_u8()?;
        let green = reader.read_u8()?;
        let blue = reader.read_u8()?;

        Ok(Rgb { red, green, blue })
    }
}

/// A 32-bit red, green, blue, alpha color.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Rgba {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let rgb = Rgb::read(reader)?;
        let alpha = reader.read_u8()?;

        Ok(Rgba { red: rgb.red, green: rgb.green, blue: rgb.blue, alpha })
    }

    /// Reads the alpha-first byte order used by lossless bitmap records.
    pub fn read_argb(reader: &mut BitReader<'_>) -> Result<Self> {
        let alpha = reader.read_u8()?;
        let rgb = Rgb::read(reader)?;

        Ok(Rgba { red: rgb.red, green: rgb.green, blue: rgb.blue, alpha })
    }
}

/// A color whose width depends on the shape version carrying it: RGB for
/// shape versions 1 and 2, RGBA for version 3 and up.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Color {
    Rgb(Rgb),
    Rgba(Rgba),
}

impl Color {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        if shape_version <= 2 {
            Ok(Color::Rgb(Rgb::read(reader)?))
        }
        else {
            Ok(Color::Rgba(Rgba::read(reader)?))
        }
    }
}

/// An axis-aligned rectangle in twips.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct Rectangle {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl Rectangle {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.byte_align();

        let nbits = reader.read_ubits(5)?;
        let x_min = reader.read_sbits(nbits)?;
        let x_max = reader.read_sbits(nbits)?;
        let y_min = reader.read_sbits(nbits)?;
        let y_max = reader.read_sbits(nbits)?;

        Ok(Rectangle { x_min, x_max, y_min, y_max })
    }
}

/// A 2x3 affine transformation matrix. Scale and rotate/skew terms are 16.16
/// fixed-point; absent term pairs were not present in the stream.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Matrix {
    pub scale: Option<(f64, f64)>,
    pub rotate_skew: Option<(f64, f64)>,
    pub translate_x: i32,
    pub translate_y: i32,
}

impl Matrix {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.byte_align();

        let scale = if reader.read_bit()? {
            let nbits = reader.read_ubits(5)?;
            Some((reader.read_fbits(nbits)?, reader.read_fbits(nbits)?))
        }
        else {
            None
        };

        let rotate_skew = if reader.read_bit()? {
            let nbits = reader.read_ubits(5)?;
            Some((reader.read_fbits(nbits)?, reader.read_fbits(nbits)?))
        }
        else {
            None
        };

        let nbits = reader.read_ubits(5)?;
        let translate_x = reader.read_sbits(nbits)?;
        let translate_y = reader.read_sbits(nbits)?;

        Ok(Matrix { scale, rotate_skew, translate_x, translate_y })
    }
}

/// A color transform with multiplicative and additive terms for the red,
/// green, and blue channels.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorTransform {
    pub mult_terms: Option<[i32; 3]>,
    pub add_terms: Option<[i32; 3]>,
}

impl ColorTransform {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.byte_align();

        let has_add_terms = reader.read_bit()?;
        let has_mult_terms = reader.read_bit()?;
        let nbits = reader.read_ubits(4)?;

        let mult_terms =
            if has_mult_terms { Some(read_terms::<3>(nbits, reader)?) } else { None };
        let add_terms = if has_add_terms { Some(read_terms::<3>(nbits, reader)?) } else { None };

        Ok(ColorTransform { mult_terms, add_terms })
    }
}

/// A color transform that also carries alpha terms. The alpha terms trail
/// the red, green, and blue term groups.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColorTransformAlpha {
    pub mult_terms: Option<[i32; 3]>,
    pub add_terms: Option<[i32; 3]>,
    pub alpha_mult_term: Option<i32>,
    pub alpha_add_term: Option<i32>,
}

impl ColorTransformAlpha {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        reader.byte_align();

        let has_add_terms = reader.read_bit()?;
        let has_mult_terms = reader.read_bit()?;
        let nbits = reader.read_ubits(4)?;

        let mult_terms =
            if has_mult_terms { Some(read_terms::<3>(nbits, reader)?) } else { None };
        let add_terms = if has_add_terms { Some(read_terms::<3>(nbits, reader)?) } else { None };

        let alpha_mult_term =
            if has_mult_terms { Some(reader.read_sbits(nbits)?) } else { None };
        let alpha_add_term = if has_add_terms { Some(reader.read_sbits(nbits)?) } else { None };

        Ok(ColorTransformAlpha { mult_terms, add_terms, alpha_mult_term, alpha_add_term })
    }
}

fn read_terms<const N: usize>(nbits: u32, reader: &mut BitReader<'_>) -> Result<[i32; N]> {
    let mut terms = [0i32; N];
    for term in terms.iter_mut() {
        *term = reader.read_sbits(nbits)?;
    }
    Ok(terms)
}

bitflags! {
    /// The clip event mask of a PlaceObject2/3 clip action. SWF 5 and
    /// earlier files carry only the upper 16 bits on the wire; the remainder
    /// was introduced with SWF 6.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct ClipEventFlags: u32 {
        const KEY_UP          = 1 << 31;
        const KEY_DOWN        = 1 << 30;
        const MOUSE_UP        = 1 << 29;
        const MOUSE_DOWN      = 1 << 28;
        const MOUSE_MOVE      = 1 << 27;
        const UNLOAD          = 1 << 26;
        const ENTER_FRAME     = 1 << 25;
        const LOAD            = 1 << 24;
        const DRAG_OVER       = 1 << 23;
        const ROLL_OUT        = 1 << 22;
        const ROLL_OVER       = 1 << 21;
        const RELEASE_OUTSIDE = 1 << 20;
        const RELEASE         = 1 << 19;
        const PRESS           = 1 << 18;
        const INITIALIZE      = 1 << 17;
        const DATA            = 1 << 16;
        // 5 reserved bits.
        const CONSTRUCT       = 1 << 10;
        const KEY_PRESS       = 1 << 9;
        const DRAG_OUT        = 1 << 8;
        // 8 reserved bits.
    }
}

impl ClipEventFlags {
    /// Reads a clip event mask: 16 bits for SWF 5 and earlier, 32 bits for
    /// SWF 6 and later. Reserved bits are dropped.
    pub fn read(version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let raw = if version >= 6 {
            reader.read_ubits(32)?
        }
        else {
            reader.read_ubits(16)? << 16
        };

        Ok(ClipEventFlags::from_bits_truncate(raw))
    }
}

/// A single gradient control point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GradRecord {
    pub ratio: u8,
    pub color: Color,
}

impl GradRecord {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let ratio = reader.read_u8()?;
        let color = Color::read(shape_version, reader)?;

        Ok(GradRecord { ratio, color })
    }
}

/// A gradient of up to 15 control points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Gradient {
    pub spread_mode: u8,
    pub interpolation_mode: u8,
    pub records: Vec<GradRecord>,
}

impl Gradient {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let spread_mode = reader.read_ubits(2)? as u8;
        let interpolation_mode = reader.read_ubits(2)? as u8;
        let count = reader.read_ubits(4)?;

        let mut records = Vec::with_capacity(count as usize);
        for _ in 0..count {
            records.push(GradRecord::read(shape_version, reader)?);
        }

        Ok(Gradient { spread_mode, interpolation_mode, records })
    }
}

/// A radial gradient with an 8.8 fixed-point focal point trailing the
/// control points.
#[derive(Clone, Debug, PartialEq)]
pub struct FocalGradient {
    pub gradient: Gradient,
    pub focal_point: f64,
}

impl FocalGradient {
    pub fn read(shape_version: u8, reader: &mut BitReader<'_>) -> Result<Self> {
        let gradient = Gradient::read(shape_version, reader)?;
        let focal_point = reader.read_fixed8()?;

        Ok(FocalGradient { gradient, focal_point })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_rectangle() {
        // nbits = 0: every field is empty.
        let mut reader = BitReader::new(&[0x00]);
        let rect = Rectangle::read(&mut reader).unwrap();
        assert_eq!(rect, Rectangle::default());
        assert_eq!(reader.bit_position(), 5);
    }

    #[test]
    fn rectangle_with_bounds() {
        // nbits = 15; 11000 x 8000 twips (a 550x400 pixel stage).
        // 01111 000000000000000 010101011111000 000000000000000 001111101000000
        let mut reader = BitReader::new(&[0x78, 0x00, 0x05, 0x5f, 0x00, 0x00, 0x0f, 0xa0, 0x00]);
        let rect = Rectangle::read(&mut reader).unwrap();
        assert_eq!(rect, Rectangle { x_min: 0, x_max: 11000, y_min: 0, y_max: 8000 });
    }

    #[test]
    fn identity_matrix() {
        // No scale bit, no rotate bit, 5-bit translate width of zero.
        let mut reader = BitReader::new(&[0x00]);
        let matrix = Matrix::read(&mut reader).unwrap();
        assert_eq!(matrix.scale, None);
        assert_eq!(matrix.rotate_skew, None);
        assert_eq!((matrix.translate_x, matrix.translate_y), (0, 0));
    }

    #[test]
    fn matrix_with_scale() {
        // has_scale, nbits = 17, scale = (1.0, 1.0), no rotate, translate
        // nbits = 0.
        // 1 10001 10000000000000000 10000000000000000 0 00000
        let mut reader = BitReader::new(&[0xc6, 0x00, 0x01, 0x00, 0x00, 0x00]);
        let matrix = Matrix::read(&mut reader).unwrap();
        assert_eq!(matrix.scale, Some((1.0, 1.0)));
        assert_eq!(matrix.rotate_skew, None);
        assert_eq!((matrix.translate_x, matrix.translate_y), (0, 0));
    }

    #[test]
    fn color_transform_terms_trail_flags() {
        // has_add = 1, has_mult = 1, nbits = 8, mult = (1, 2, 3),
        // add = (4, 5, 6).
        let mut reader = BitReader::new(&[0xe0, 0x04, 0x08, 0x0c, 0x10, 0x14, 0x18]);
        let cx = ColorTransform::read(&mut reader).unwrap();
        assert_eq!(cx.mult_terms, Some([1, 2, 3]));
        assert_eq!(cx.add_terms, Some([4, 5, 6]));
    }

    #[test]
    fn clip_event_flags_by_version() {
        // SWF 5: 16 bits only.
        let mut reader = BitReader::new(&[0x80, 0x01]);
        let events = ClipEventFlags::read(5, &mut reader).unwrap();
        assert_eq!(events, ClipEventFlags::KEY_UP | ClipEventFlags::DATA);
        assert_eq!(reader.bit_position(), 16);

        // SWF 6: the full 32 bits, reserved bits dropped.
        let mut reader = BitReader::new(&[0x00, 0x00, 0x07, 0xff]);
        let events = ClipEventFlags::read(6, &mut reader).unwrap();
        assert_eq!(
            events,
            ClipEventFlags::CONSTRUCT | ClipEventFlags::KEY_PRESS | ClipEventFlags::DRAG_OUT
        );
    }

    #[test]
    fn gradient_stop_width_follows_shape_version() {
        // Spread pad, 1 stop: ratio 0x40, color red.
        let data = [0b0000_0001, 0x40, 0xff, 0x00, 0x00, 0xff];

        let mut reader = BitReader::new(&data);
        let gradient = Gradient::read(1, &mut reader).unwrap();
        assert_eq!(
            gradient.records[0].color,
            Color::Rgb(Rgb { red: 0xff, green: 0x00, blue: 0x00 })
        );

        let mut reader = BitReader::new(&data);
        let gradient = Gradient::read(3, &mut reader).unwrap();
        assert_eq!(
            gradient.records[0].color,
            Color::Rgba(Rgba { red: 0xff, green: 0x00, blue: 0x00, alpha: 0xff })
        );
    }
}
