// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Trait declarations: the named members of classes, instances, scripts,
//! and method bodies.
//!
//! A trait packs its attributes and kind into one byte as
//! `(attributes << 4) | kind`. Both halves are closed sets. A metadata
//! index list trails the body iff the METADATA attribute is set.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use bitflags::bitflags;

use crate::pool::ConstantKind;

bitflags! {
    /// Trait attributes, stored in the upper nibble of the trait byte.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct TraitAttributes: u8 {
        const FINAL    = 0x1;
        const OVERRIDE = 0x2;
        const METADATA = 0x4;
    }
}

/// A slot's or const's initial value: a pool index whose meaning is
/// selected by the constant kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ConstantValue {
    pub index: u32,
    pub kind: ConstantKind,
}

fn read_slot_value(reader: &mut BitReader<'_>) -> Result<Option<ConstantValue>> {
    let index = reader.read_var_u30()?;
    if index == 0 {
        return Ok(None);
    }
    let kind = ConstantKind::from_byte(reader.read_u8()?)?;

    Ok(Some(ConstantValue { index, kind }))
}

/// The kind-specific body of a trait. Slot and const share a layout, as do
/// method, getter, and setter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TraitData {
    Slot { slot_id: u32, type_name: u32, value: Option<ConstantValue> },
    Method { disp_id: u32, method: u32 },
    Getter { disp_id: u32, method: u32 },
    Setter { disp_id: u32, method: u32 },
    Class { slot_id: u32, class: u32 },
    Function { slot_id: u32, function: u32 },
    Const { slot_id: u32, type_name: u32, value: Option<ConstantValue> },
}

/// A trait declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trait {
    /// Multiname pool index of the trait name.
    pub name: u32,
    pub attributes: TraitAttributes,
    pub data: TraitData,
    /// Metadata entry indices; present iff the METADATA attribute is set.
    pub metadata: Vec<u32>,
}

impl Trait {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let name = reader.read_var_u30()?;

        let packed = reader.read_u8()?;
        let kind = packed & 0x0f;

        let Some(attributes) = TraitAttributes::from_bits(packed >> 4) else {
            return unknown_discriminator_error("trait attributes", u32::from(packed >> 4));
        };

        let data = match kind {
            0 => {
                let slot_id = reader.read_var_u30()?;
                let type_name = reader.read_var_u30()?;
                let value = read_slot_value(reader)?;
                TraitData::Slot { slot_id, type_name, value }
            }
            1 => {
                let disp_id = reader.read_var_u30()?;
                let method = reader.read_var_u30()?;
                TraitData::Method { disp_id, method }
            }
            2 => {
                let disp_id = reader.read_var_u30()?;
                let method = reader.read_var_u30()?;
                TraitData::Getter { disp_id, method }
            }
            3 => {
                let disp_id = reader.read_var_u30()?;
                let method = reader.read_var_u30()?;
                TraitData::Setter { disp_id, method }
            }
            4 => {
                let slot_id = reader.read_var_u30()?;
                let class = reader.read_var_u30()?;
                TraitData::Class { slot_id, class }
            }
            5 => {
                let slot_id = reader.read_var_u30()?;
                let function = reader.read_var_u30()?;
                TraitData::Function { slot_id, function }
            }
            6 => {
                let slot_id = reader.read_var_u30()?;
                let type_name = reader.read_var_u30()?;
                let value = read_slot_value(reader)?;
                TraitData::Const { slot_id, type_name, value }
            }
            _ => return unknown_discriminator_error("trait kind", u32::from(kind)),
        };

        let mut metadata = Vec::new();
        if attributes.contains(TraitAttributes::METADATA) {
            let count = reader.read_var_u30()?;
            metadata.reserve(count as usize);
            for _ in 0..count {
                metadata.push(reader.read_var_u30()?);
            }
        }

        Ok(Trait { name, attributes, data, metadata })
    }
}

/// Reads a count-prefixed trait list.
pub fn read_traits(reader: &mut BitReader<'_>) -> Result<Vec<Trait>> {
    let count = reader.read_var_u30()?;
    let mut traits = Vec::with_capacity(count as usize);
    for _ in 0..count {
        traits.push(Trait::read(reader)?);
    }
    Ok(traits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::errors::Error;

    #[test]
    fn slot_with_a_default_value() {
        // name 1, kind slot, slot 2, type 3, vindex 4 of kind Int.
        let data = [0x01, 0x00, 0x02, 0x03, 0x04, 0x03];
        let t = Trait::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(t.name, 1);
        assert_eq!(t.attributes, TraitAttributes::empty());
        assert_eq!(
            t.data,
            TraitData::Slot {
                slot_id: 2,
                type_name: 3,
                value: Some(ConstantValue { index: 4, kind: ConstantKind::Int }),
            }
        );
    }

    #[test]
    fn slot_without_a_value_has_no_kind_byte() {
        // vindex 0: no value kind byte follows; the next trait begins
        // immediately.
        let data = [0x01, 0x00, 0x02, 0x03, 0x00];
        let mut reader = BitReader::new(&data);
        let t = Trait::read(&mut reader).unwrap();

        assert_eq!(t.data, TraitData::Slot { slot_id: 2, type_name: 3, value: None });
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn attributes_unpack_from_the_upper_nibble() {
        // (FINAL | METADATA) << 4 | method kind, disp 1, method 2, one
        // metadata index.
        let data = [0x01, 0x51, 0x01, 0x02, 0x01, 0x07];
        let t = Trait::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(t.attributes, TraitAttributes::FINAL | TraitAttributes::METADATA);
        assert_eq!(t.data, TraitData::Method { disp_id: 1, method: 2 });
        assert_eq!(t.metadata, vec![7]);
    }

    #[test]
    fn metadata_list_absent_without_the_attribute() {
        let data = [0x01, 0x11, 0x01, 0x02];
        let mut reader = BitReader::new(&data);
        let t = Trait::read(&mut reader).unwrap();

        assert_eq!(t.attributes, TraitAttributes::FINAL);
        assert!(t.metadata.is_empty());
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn trait_kind_is_a_closed_set() {
        let data = [0x01, 0x07, 0x01, 0x02];
        let result = Trait::read(&mut BitReader::new(&data));
        assert!(matches!(result, Err(Error::UnknownDiscriminator { value: 7, .. })));
    }
}
