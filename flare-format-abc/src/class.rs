// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Instance, class, and script records.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use bitflags::bitflags;

use crate::traits::{read_traits, Trait};

bitflags! {
    /// Instance declaration flags. Bits outside this set are a decode
    /// error.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct InstanceFlags: u8 {
        const SEALED       = 0x01;
        const FINAL        = 0x02;
        const INTERFACE    = 0x04;
        const PROTECTED_NS = 0x08;
    }
}

/// The instance half of a class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    pub name: u32,
    pub super_name: u32,
    pub flags: InstanceFlags,
    /// Present iff the PROTECTED_NS flag is set.
    pub protected_ns: Option<u32>,
    /// Multiname indices of the implemented interfaces.
    pub interfaces: Vec<u32>,
    /// Method index of the instance initializer.
    pub init_method: u32,
    pub traits: Vec<Trait>,
}

impl Instance {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let name = reader.read_var_u30()?;
        let super_name = reader.read_var_u30()?;

        let flag_byte = reader.read_u8()?;
        let Some(flags) = InstanceFlags::from_bits(flag_byte) else {
            return unknown_discriminator_error("instance flags", u32::from(flag_byte));
        };

        let protected_ns = if flags.contains(InstanceFlags::PROTECTED_NS) {
            Some(reader.read_var_u30()?)
        }
        else {
            None
        };

        let interface_count = reader.read_var_u30()?;
        let mut interfaces = Vec::with_capacity(interface_count as usize);
        for _ in 0..interface_count {
            interfaces.push(reader.read_var_u30()?);
        }

        let init_method = reader.read_var_u30()?;
        let traits = read_traits(reader)?;

        Ok(Instance { name, super_name, flags, protected_ns, interfaces, init_method, traits })
    }
}

/// The static half of a class declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Class {
    /// Method index of the class initializer.
    pub init_method: u32,
    pub traits: Vec<Trait>,
}

impl Class {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let init_method = reader.read_var_u30()?;
        let traits = read_traits(reader)?;

        Ok(Class { init_method, traits })
    }
}

/// A script record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Script {
    /// Method index of the script initializer.
    pub init_method: u32,
    pub traits: Vec<Trait>,
}

impl Script {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let init_method = reader.read_var_u30()?;
        let traits = read_traits(reader)?;

        Ok(Script { init_method, traits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::errors::Error;

    #[test]
    fn instance_with_protected_namespace() {
        // name 1, super 2, SEALED | PROTECTED_NS, ns 3, one interface (4),
        // init 5, no traits.
        let data = [0x01, 0x02, 0x09, 0x03, 0x01, 0x04, 0x05, 0x00];
        let instance = Instance::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(instance.name, 1);
        assert_eq!(instance.super_name, 2);
        assert_eq!(instance.flags, InstanceFlags::SEALED | InstanceFlags::PROTECTED_NS);
        assert_eq!(instance.protected_ns, Some(3));
        assert_eq!(instance.interfaces, vec![4]);
        assert_eq!(instance.init_method, 5);
        assert!(instance.traits.is_empty());
    }

    #[test]
    fn protected_namespace_absent_without_the_flag() {
        let data = [0x01, 0x00, 0x01, 0x00, 0x02, 0x00];
        let mut reader = BitReader::new(&data);
        let instance = Instance::read(&mut reader).unwrap();

        assert_eq!(instance.protected_ns, None);
        assert_eq!(instance.init_method, 2);
        assert_eq!(reader.byte_position(), data.len());
    }

    #[test]
    fn undefined_instance_flag_bits_are_an_error() {
        let data = [0x01, 0x00, 0x80];
        let result = Instance::read(&mut BitReader::new(&data));
        assert!(matches!(result, Err(Error::UnknownDiscriminator { value: 0x80, .. })));
    }
}
