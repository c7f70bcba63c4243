// Flare
// Copyright (c) 2026 The Project Flare Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Method signatures and file-level metadata entries.

use flare_core::errors::{unknown_discriminator_error, Result};
use flare_core::io::BitReader;

use bitflags::bitflags;

use crate::pool::ConstantKind;

bitflags! {
    /// Method signature flags. Bits outside this set are a decode error.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct MethodFlags: u8 {
        const NEED_ARGUMENTS  = 0x01;
        const NEED_ACTIVATION = 0x02;
        const NEED_REST       = 0x04;
        const HAS_OPTIONAL    = 0x08;
        const SET_DXNS        = 0x40;
        const HAS_PARAM_NAMES = 0x80;
    }
}

/// A default value for an optional parameter: a pool index whose meaning is
/// selected by the constant kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OptionDetail {
    pub value: u32,
    pub kind: ConstantKind,
}

/// A method signature. All names and types are pool indices; index 0 means
/// "any".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Method {
    pub return_type: u32,
    pub param_types: Vec<u32>,
    pub name: u32,
    pub flags: MethodFlags,
    pub options: Vec<OptionDetail>,
    pub param_names: Vec<u32>,
}

impl Method {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let param_count = reader.read_var_u30()?;
        let return_type = reader.read_var_u30()?;

        let mut param_types = Vec::with_capacity(param_count as usize);
        for _ in 0..param_count {
            param_types.push(reader.read_var_u30()?);
        }

        let name = reader.read_var_u30()?;

        let flag_byte = reader.read_u8()?;
        let Some(flags) = MethodFlags::from_bits(flag_byte) else {
            return unknown_discriminator_error("method flags", u32::from(flag_byte));
        };

        let mut options = Vec::new();
        if flags.contains(MethodFlags::HAS_OPTIONAL) {
            let option_count = reader.read_var_u30()?;
            options.reserve(option_count as usize);
            for _ in 0..option_count {
                let value = reader.read_var_u30()?;
                let kind = ConstantKind::from_byte(reader.read_u8()?)?;
                options.push(OptionDetail { value, kind });
            }
        }

        let mut param_names = Vec::new();
        if flags.contains(MethodFlags::HAS_PARAM_NAMES) {
            param_names.reserve(param_count as usize);
            for _ in 0..param_count {
                param_names.push(reader.read_var_u30()?);
            }
        }

        Ok(Method { return_type, param_types, name, flags, options, param_names })
    }
}

/// One key/value item of a metadata entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MetadataItem {
    pub key: u32,
    pub value: u32,
}

/// A metadata entry attached to traits by index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetadataEntry {
    pub name: u32,
    pub items: Vec<MetadataItem>,
}

impl MetadataEntry {
    pub fn read(reader: &mut BitReader<'_>) -> Result<Self> {
        let name = reader.read_var_u30()?;

        let item_count = reader.read_var_u30()?;
        let mut items = Vec::with_capacity(item_count as usize);
        for _ in 0..item_count {
            let key = reader.read_var_u30()?;
            let value = reader.read_var_u30()?;
            items.push(MetadataItem { key, value });
        }

        Ok(MetadataEntry { name, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::errors::Error;

    #[test]
    fn plain_signature() {
        // Two params of types 3 and 4, return type 2, name 9, no flags.
        let data = [0x02, 0x02, 0x03, 0x04, 0x09, 0x00];
        let method = Method::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(method.return_type, 2);
        assert_eq!(method.param_types, vec![3, 4]);
        assert_eq!(method.name, 9);
        assert_eq!(method.flags, MethodFlags::empty());
        assert!(method.options.is_empty());
        assert!(method.param_names.is_empty());
    }

    #[test]
    fn optional_defaults_and_param_names() {
        // One param, HAS_OPTIONAL | HAS_PARAM_NAMES: one True default and
        // one name index.
        let data = [0x01, 0x00, 0x03, 0x05, 0x88, 0x01, 0x06, 0x0b, 0x07];
        let method = Method::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(method.options, vec![OptionDetail { value: 6, kind: ConstantKind::True }]);
        assert_eq!(method.param_names, vec![7]);
    }

    #[test]
    fn undefined_flag_bits_are_an_error() {
        let data = [0x00, 0x00, 0x01, 0x10];
        let result = Method::read(&mut BitReader::new(&data));
        assert!(matches!(result, Err(Error::UnknownDiscriminator { value: 0x10, .. })));
    }

    #[test]
    fn metadata_items_pair_keys_and_values() {
        let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let entry = MetadataEntry::read(&mut BitReader::new(&data)).unwrap();

        assert_eq!(entry.name, 1);
        assert_eq!(
            entry.items,
            vec![MetadataItem { key: 3, value: 4 }, MetadataItem { key: 5, value: 6 }]
        );
    }
}
