// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `filters` module decodes the visual surface filters attached to
//! display-list objects by PlaceObject3.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use crate::records::Rgba;

const FILTER_DROP_SHADOW: u8 = 0;
const FILTER_BLUR: u8 = 1;
const FILTER_GLOW: u8 = 2;
const FILTER_BEVEL: u8 = 3;
const FILTER_GRADIENT_GLOW: u8 = 4;
const FILTER_CONVOLUTION: u8 = 5;
const FILTER_COLOR_MATRIX: u8 = 6;
const FILTER_GRADIENT_BEVEL: u8 = 7;

/// A drop shadow filter.
#[derive(Clone, Debug, PartialEq)]
pub struct DropShadowFilter {
    pub color: Rgba,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub passes: u8,
}

impl DropShadowFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let color = Rgba::read(reader)?;
        let blur_x = reader.read_fixed16()?;
        let blur_y = reader.read_fixed16()?;
        let angle = reader.read_fixed16()?;
        let distance = reader.read_fixed16()?;
        let strength = reader.read_fixed8()?;
        let inner_shadow = reader.read_bit()?;
        let knockout = reader.read_bit()?;
        let composite_source = reader.read_bit()?;
        let passes = reader.read_ubits(5)? as u8;

        Ok(DropShadowFilter {
            color,
            blur_x,
            blur_y,
            angle,
            distance,
            strength,
            inner_shadow,
            knockout,
            composite_source,
            passes,
        })
    }
}

/// A box blur filter.
#[derive(Clone, Debug, PartialEq)]
pub struct BlurFilter {
    pub blur_x: f64,
    pub blur_y: f64,
    pub passes: u8,
}

impl BlurFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let blur_x = reader.read_fixed16()?;
        let blur_y = reader.read_fixed16()?;
        let passes = reader.read_ubits(5)? as u8;
        reader.read_ubits(3)?; // reserved

        Ok(BlurFilter { blur_x, blur_y, passes })
    }
}

/// A glow filter.
#[derive(Clone, Debug, PartialEq)]
pub struct GlowFilter {
    pub color: Rgba,
    pub blur_x: f64,
    pub blur_y: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_glow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub passes: u8,
}

impl GlowFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let color = Rgba::read(reader)?;
        let blur_x = reader.read_fixed16()?;
        let blur_y = reader.read_fixed16()?;
        let distance = reader.read_fixed16()?;
        let strength = reader.read_fixed8()?;
        let inner_glow = reader.read_bit()?;
        let knockout = reader.read_bit()?;
        let composite_source = reader.read_bit()?;
        let passes = reader.read_ubits(5)? as u8;

        Ok(GlowFilter {
            color,
            blur_x,
            blur_y,
            distance,
            strength,
            inner_glow,
            knockout,
            composite_source,
            passes,
        })
    }
}

/// A bevel filter.
#[derive(Clone, Debug, PartialEq)]
pub struct BevelFilter {
    pub shadow_color: Rgba,
    pub highlight_color: Rgba,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub on_top: bool,
    pub passes: u8,
}

impl BevelFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let shadow_color = Rgba::read(reader)?;
        let highlight_color = Rgba::read(reader)?;
        let blur_x = reader.read_fixed16()?;
        let blur_y = reader.read_fixed16()?;
        let angle = reader.read_fixed16()?;
        let distance = reader.read_fixed16()?;
        let strength = reader.read_fixed8()?;
        let inner_shadow = reader.read_bit()?;
        let knockout = reader.read_bit()?;
        let composite_source = reader.read_bit()?;
        let on_top = reader.read_bit()?;
        let passes = reader.read_ubits(4)? as u8;

        Ok(BevelFilter {
            shadow_color,
            highlight_color,
            blur_x,
            blur_y,
            angle,
            distance,
            strength,
            inner_shadow,
            knockout,
            composite_source,
            on_top,
            passes,
        })
    }
}

/// A gradient glow or gradient bevel filter. The two share one layout; the
/// gradient control points are stored as parallel color and ratio arrays.
#[derive(Clone, Debug, PartialEq)]
pub struct GradientFilter {
    pub colors: Vec<Rgba>,
    pub ratios: Vec<u8>,
    pub blur_x: f64,
    pub blur_y: f64,
    pub angle: f64,
    pub distance: f64,
    pub strength: f64,
    pub inner_shadow: bool,
    pub knockout: bool,
    pub composite_source: bool,
    pub on_top: bool,
    pub passes: u8,
}

impl GradientFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let count = reader.read_u8()?;

        let mut colors = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            colors.push(Rgba::read(reader)?);
        }
        let mut ratios = Vec::with_capacity(usize::from(count));
        for _ in 0..count {
            ratios.push(reader.read_u8()?);
        }

        let blur_x = reader.read_fixed16()?;
        let blur_y = reader.read_fixed16()?;
        let angle = reader.read_fixed16()?;
        let distance = reader.read_fixed16()?;
        let strength = reader.read_fixed8()?;
        let inner_shadow = reader.read_bit()?;
        let knockout = reader.read_bit()?;
        let composite_source = reader.read_bit()?;
        let on_top = reader.read_bit()?;
        let passes = reader.read_ubits(4)? as u8;

        Ok(GradientFilter {
            colors,
            ratios,
            blur_x,
            blur_y,
            angle,
            distance,
            strength,
            inner_shadow,
            knockout,
            composite_source,
            on_top,
            passes,
        })
    }
}

/// A convolution filter with a `matrix_x` by `matrix_y` kernel stored in
/// row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct ConvolutionFilter {
    pub matrix_x: u8,
    pub matrix_y: u8,
    pub divisor: f32,
    pub bias: f32,
    pub matrix: Vec<f32>,
    pub default_color: Rgba,
    pub clamp: bool,
    pub preserve_alpha: bool,
}

impl ConvolutionFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let matrix_x = reader.read_u8()?;
        let matrix_y = reader.read_u8()?;
        let divisor = reader.read_f32()?;
        let bias = reader.read_f32()?;

        let len = usize::from(matrix_x) * usize::from(matrix_y);
        let mut matrix = Vec::with_capacity(len);
        for _ in 0..len {
            matrix.push(reader.read_f32()?);
        }

        let default_color = Rgba::read(reader)?;
        reader.read_ubits(6)?; // reserved
        let clamp = reader.read_bit()?;
        let preserve_alpha = reader.read_bit()?;

        Ok(ConvolutionFilter {
            matrix_x,
            matrix_y,
            divisor,
            bias,
            matrix,
            default_color,
            clamp,
            preserve_alpha,
        })
    }
}

/// A 4x5 color matrix filter.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorMatrixFilter {
    pub matrix: [f32; 20],
}

impl ColorMatrixFilter {
    fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let mut matrix = [0f32; 20];
        for value in matrix.iter_mut() {
            *value = reader.read_f32()?;
        }

        Ok(ColorMatrixFilter { matrix })
    }
}

/// A surface filter, discriminated on the wire by a one-byte id.
#[derive(Clone, Debug, PartialEq)]
pub enum Filter {
    DropShadow(DropShadowFilter),
    Blur(BlurFilter),
    Glow(GlowFilter),
    Bevel(BevelFilter),
    GradientGlow(GradientFilter),
    Convolution(ConvolutionFilter),
    ColorMatrix(ColorMatrixFilter),
    GradientBevel(GradientFilter),
}

impl Filter {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let id = reader.read_u8()?;

        let filter = match id {
            FILTER_DROP_SHADOW => Filter::DropShadow(DropShadowFilter::read(reader)?),
            FILTER_BLUR => Filter::Blur(BlurFilter::read(reader)?),
            FILTER_GLOW => Filter::Glow(GlowFilter::read(reader)?),
            FILTER_BEVEL => Filter::Bevel(BevelFilter::read(reader)?),
            FILTER_GRADIENT_GLOW => Filter::GradientGlow(GradientFilter::read(reader)?),
            FILTER_CONVOLUTION => Filter::Convolution(ConvolutionFilter::read(reader)?),
            FILTER_COLOR_MATRIX => Filter::ColorMatrix(ColorMatrixFilter::read(reader)?),
            FILTER_GRADIENT_BEVEL => Filter::GradientBevel(GradientFilter::read(reader)?),
            _ => return unknown_discriminator_error("filter id", u32::from(id)),
        };

        Ok(filter)
    }
}

/// Reads a filter list: a one-byte count followed by that many filters.
pub fn read_filter_list(reader: &mut BitReader<'_>) -> Result<Vec<Filter>> {
    let count = reader.read_u8()?;
    let mut filters = Vec::with_capacity(usize::from(count));
    for _ in 0..count {
        filters.push(Filter::read(reader)?);
    }
    Ok(filters)
}
